//! Keyword search across a whole dictionary.
//!
//! Matching is plain case-insensitive substring containment over names and
//! descriptions. Hits come back in traversal order (suite, entity, nested
//! member); nothing is ranked.

use crate::dictionary::model::{Class, Document, Enumeration, Suite};
use crate::format::{
    access_suffix, class_summary, command_signature, dash_suffix, enumeration_summary,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitKind {
    Command,
    Class,
    Property,
    Enumeration,
    EnumeratorValue,
}

impl HitKind {
    /// Short tag shown at the start of a rendered hit line.
    pub fn tag(self) -> &'static str {
        match self {
            HitKind::Command => "CMD",
            HitKind::Class => "CLS",
            HitKind::Property => "PROP",
            HitKind::Enumeration => "ENUM",
            HitKind::EnumeratorValue => "VAL",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One search result: its kind, owning suite, and a one-line summary.
pub struct Hit<'a> {
    pub kind: HitKind,
    pub suite: &'a str,
    pub summary: String,
}

/// Search every suite of `document` for `query`.
///
/// An enumeration whose own name matches yields a single `Enumeration` hit and
/// its values are not checked separately; otherwise each matching value yields
/// an `EnumeratorValue` hit.
pub fn search<'a>(document: &'a Document, query: &str) -> Vec<Hit<'a>> {
    let needle = query.to_lowercase();
    let mut hits = Vec::new();
    for suite in &document.suites {
        search_suite(suite, &needle, &mut hits);
    }
    hits
}

fn search_suite<'a>(suite: &'a Suite, needle: &str, hits: &mut Vec<Hit<'a>>) {
    let mut push = |kind: HitKind, summary: String| {
        hits.push(Hit {
            kind,
            suite: &suite.name,
            summary,
        })
    };

    for command in &suite.commands {
        if contains(&command.name, needle) || contains(&command.description, needle) {
            push(HitKind::Command, command_signature(command));
        }
    }

    for class in &suite.classes {
        if contains(&class.name, needle) || contains(&class.description, needle) {
            push(HitKind::Class, class_summary(class));
        }
        for summary in matching_properties(class, needle) {
            push(HitKind::Property, summary);
        }
    }

    for enumeration in &suite.enumerations {
        if contains(&enumeration.name, needle) {
            push(HitKind::Enumeration, enumeration_summary(enumeration));
        } else {
            for summary in matching_values(enumeration, needle) {
                push(HitKind::EnumeratorValue, summary);
            }
        }
    }
}

fn matching_properties(class: &Class, needle: &str) -> Vec<String> {
    class
        .properties
        .iter()
        .filter(|prop| contains(&prop.name, needle) || contains(&prop.description, needle))
        .map(|prop| {
            format!(
                "{}.{}: {}{}",
                class.name,
                prop.name,
                prop.type_name,
                access_suffix(&prop.access)
            )
        })
        .collect()
}

fn matching_values(enumeration: &Enumeration, needle: &str) -> Vec<String> {
    enumeration
        .values
        .iter()
        .filter(|value| contains(&value.name, needle))
        .map(|value| {
            format!(
                "{}.{}{}",
                enumeration.name,
                value.name,
                dash_suffix(&value.description)
            )
        })
        .collect()
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::parse_document;

    fn sample() -> Document {
        parse_document(
            r#"<dictionary>
  <suite name="Browser Suite">
    <command name="open location" description="Open a URL."/>
    <command name="do JavaScript"/>
    <class name="tab" description="A browser tab showing one URL.">
      <property name="URL" type="text" description="The current address."/>
      <property name="index" type="integer" access="r"/>
    </class>
    <class name="window" description="A window.">
      <property name="current tab" type="tab"/>
    </class>
    <enumeration name="url kinds">
      <enumerator name="http"/>
    </enumeration>
    <enumeration name="printing error handling">
      <enumerator name="standard" description="Standard PostScript error handling"/>
      <enumerator name="detailed"/>
    </enumeration>
    <enumeration name="save options">
      <enumerator name="save now"/>
      <enumerator name="ask"/>
    </enumeration>
  </suite>
</dictionary>"#,
        )
        .expect("sample parses")
    }

    fn kinds(hits: &[Hit<'_>]) -> Vec<HitKind> {
        hits.iter().map(|hit| hit.kind).collect()
    }

    #[test]
    fn matches_names_and_descriptions_in_traversal_order() {
        let doc = sample();
        let hits = search(&doc, "url");
        assert_eq!(
            kinds(&hits),
            [
                HitKind::Command,
                HitKind::Class,
                HitKind::Property,
                HitKind::Enumeration
            ]
        );
        assert_eq!(hits[0].summary, "open location  // Open a URL.");
        assert_eq!(hits[1].summary, "tab (2p 0e)");
        assert_eq!(hits[2].summary, "tab.URL: text");
        assert_eq!(hits[3].summary, "url kinds: http");
        assert!(hits.iter().all(|hit| hit.suite == "Browser Suite"));
    }

    #[test]
    fn description_only_match_still_hits_class() {
        let doc = sample();
        let hits = search(&doc, "BROWSER TAB");
        assert_eq!(kinds(&hits), [HitKind::Class]);
    }

    #[test]
    fn property_hits_do_not_require_class_match() {
        let doc = sample();
        let hits = search(&doc, "current");
        assert_eq!(kinds(&hits), [HitKind::Property, HitKind::Property]);
        assert_eq!(hits[0].summary, "tab.URL: text");
        assert_eq!(hits[1].summary, "window.current tab: tab");
    }

    #[test]
    fn enumerator_value_hit_when_enum_name_misses() {
        let doc = sample();
        let hits = search(&doc, "standard");
        assert_eq!(kinds(&hits), [HitKind::EnumeratorValue]);
        assert_eq!(
            hits[0].summary,
            "printing error handling.standard — Standard PostScript error handling"
        );

        // Enumerator descriptions are not searched.
        assert!(search(&doc, "postscript").is_empty());
    }

    #[test]
    fn enum_name_match_suppresses_value_hits() {
        let doc = sample();
        let hits = search(&doc, "http");
        assert_eq!(kinds(&hits), [HitKind::EnumeratorValue]);

        let hits = search(&doc, "kinds");
        assert_eq!(kinds(&hits), [HitKind::Enumeration]);

        // "save" matches both the enumeration and its "save now" value.
        let hits = search(&doc, "save");
        assert_eq!(kinds(&hits), [HitKind::Enumeration]);
        assert_eq!(hits[0].summary, "save options: save now | ask");
    }

    #[test]
    fn read_only_access_is_annotated() {
        let doc = sample();
        let hits = search(&doc, "index");
        assert_eq!(hits[0].summary, "tab.index: integer [r]");
    }

    #[test]
    fn no_hits_is_empty() {
        let doc = sample();
        assert!(search(&doc, "zzz").is_empty());
    }
}
