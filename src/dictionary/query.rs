//! Case-insensitive lookups over a loaded dictionary.
//!
//! Every lookup by command, class, or enumeration name returns all matches
//! across all suites: suites legitimately redefine commands and layer
//! class-extensions over classes defined elsewhere. A miss is reported as
//! `NotFound`, carrying the names a caller could have meant.

use crate::dictionary::model::{Class, Command, Document, Enumeration, Suite};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Suite,
    Command,
    Class,
    Enumeration,
}

impl EntityKind {
    /// Label used in not-found messages.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Suite => "Suite",
            EntityKind::Command => "Command",
            EntityKind::Class => "Class",
            EntityKind::Enumeration => "Enum",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A lookup miss plus the names that would have matched something.
pub struct NotFound {
    pub kind: EntityKind,
    pub query: String,
    pub available: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A matched entity tagged with the suite that defines it.
pub struct Match<'a, T> {
    pub item: &'a T,
    pub suite: &'a str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Per-suite counts for the overview listing.
pub struct SuiteSummary<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub commands: usize,
    pub classes: usize,
    pub enumerations: usize,
}

/// Read-only query view over one `Document`.
#[derive(Clone, Copy, Debug)]
pub struct QueryEngine<'a> {
    document: &'a Document,
}

impl<'a> QueryEngine<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// Suite names, descriptions, and entity counts in document order.
    pub fn suites_overview(&self) -> Vec<SuiteSummary<'a>> {
        self.document
            .suites
            .iter()
            .map(|suite| SuiteSummary {
                name: &suite.name,
                description: &suite.description,
                commands: suite.commands.len(),
                classes: suite.classes.len(),
                enumerations: suite.enumerations.len(),
            })
            .collect()
    }

    /// First suite whose name matches, ignoring case.
    ///
    /// On a miss every suite name is reported in document order.
    pub fn suite_by_name(&self, name: &str) -> Result<&'a Suite, NotFound> {
        let wanted = name.to_lowercase();
        self.document
            .suites
            .iter()
            .find(|suite| suite.name.to_lowercase() == wanted)
            .ok_or_else(|| NotFound {
                kind: EntityKind::Suite,
                query: name.to_string(),
                available: self
                    .document
                    .suites
                    .iter()
                    .map(|suite| suite.name.clone())
                    .collect(),
            })
    }

    pub fn command_by_name(&self, name: &str) -> Result<Vec<Match<'a, Command>>, NotFound> {
        self.find_all(
            EntityKind::Command,
            name,
            |suite| suite.commands.as_slice(),
            |c| c.name.as_str(),
        )
    }

    /// All classes and class-extensions with this name.
    pub fn class_by_name(&self, name: &str) -> Result<Vec<Match<'a, Class>>, NotFound> {
        self.find_all(
            EntityKind::Class,
            name,
            |suite| suite.classes.as_slice(),
            |c| c.name.as_str(),
        )
    }

    pub fn enumeration_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<Match<'a, Enumeration>>, NotFound> {
        self.find_all(
            EntityKind::Enumeration,
            name,
            |suite| suite.enumerations.as_slice(),
            |e| e.name.as_str(),
        )
    }

    fn find_all<T: 'a>(
        &self,
        kind: EntityKind,
        name: &str,
        items: impl Fn(&'a Suite) -> &'a [T],
        name_of: impl Fn(&T) -> &str,
    ) -> Result<Vec<Match<'a, T>>, NotFound> {
        let wanted = name.to_lowercase();
        let matches: Vec<Match<'a, T>> = self
            .document
            .suites
            .iter()
            .flat_map(|suite| {
                items(suite).iter().map(move |item| Match {
                    item,
                    suite: suite.name.as_str(),
                })
            })
            .filter(|found| name_of(found.item).to_lowercase() == wanted)
            .collect();

        if !matches.is_empty() {
            return Ok(matches);
        }

        let available: BTreeSet<&str> = self
            .document
            .suites
            .iter()
            .flat_map(|suite| items(suite).iter().map(&name_of))
            .collect();
        Err(NotFound {
            kind,
            query: name.to_string(),
            available: available.into_iter().map(str::to_string).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::parse_document;

    fn sample() -> Document {
        parse_document(
            r#"<dictionary title="Sample">
  <suite name="Standard Suite" description="Common terms.">
    <command name="make" description="Make a new object."/>
    <command name="close"/>
    <class name="document"/>
    <class name="window"/>
    <enumeration name="save options"><enumerator name="yes"/></enumeration>
  </suite>
  <suite name="Text Suite">
    <command name="Make" description="Make text."/>
    <class-extension name="Document"><property name="text"/></class-extension>
    <enumeration name="justification"/>
    <enumeration name="save options"/>
  </suite>
</dictionary>"#,
        )
        .expect("sample parses")
    }

    #[test]
    fn overview_counts_follow_document_order() {
        let doc = sample();
        let overview = QueryEngine::new(&doc).suites_overview();
        assert_eq!(overview.len(), 2);
        assert_eq!(overview[0].name, "Standard Suite");
        assert_eq!(
            (overview[0].commands, overview[0].classes, overview[0].enumerations),
            (2, 2, 1)
        );
        assert_eq!(
            (overview[1].commands, overview[1].classes, overview[1].enumerations),
            (1, 1, 2)
        );
    }

    #[test]
    fn suite_lookup_ignores_case_and_lists_alternatives() {
        let doc = sample();
        let engine = QueryEngine::new(&doc);
        assert_eq!(engine.suite_by_name("text suite").unwrap().name, "Text Suite");

        let miss = engine.suite_by_name("Missing").unwrap_err();
        assert_eq!(miss.kind, EntityKind::Suite);
        assert_eq!(miss.available, ["Standard Suite", "Text Suite"]);
    }

    #[test]
    fn command_lookup_is_case_insensitive_and_multi_hit() {
        let doc = sample();
        let engine = QueryEngine::new(&doc);
        let lower = engine.command_by_name("make").unwrap();
        assert_eq!(lower.len(), 2);
        assert_eq!(lower[0].suite, "Standard Suite");
        assert_eq!(lower[1].suite, "Text Suite");
        assert_eq!(lower, engine.command_by_name("Make").unwrap());
        assert_eq!(lower, engine.command_by_name("MAKE").unwrap());
    }

    #[test]
    fn class_lookup_surfaces_extensions() {
        let doc = sample();
        let hits = QueryEngine::new(&doc).class_by_name("document").unwrap();
        assert_eq!(hits.len(), 2);
        assert!(!hits[0].item.is_extension);
        assert!(hits[1].item.is_extension);
        assert_eq!(hits[1].item.properties.len(), 1);
    }

    #[test]
    fn misses_report_sorted_unique_names() {
        let doc = sample();
        let engine = QueryEngine::new(&doc);

        let miss = engine.enumeration_by_name("nonexistent").unwrap_err();
        assert_eq!(miss.kind, EntityKind::Enumeration);
        assert_eq!(miss.query, "nonexistent");
        assert_eq!(miss.available, ["justification", "save options"]);

        let miss = engine.command_by_name("quit").unwrap_err();
        assert_eq!(miss.available, ["Make", "close", "make"]);
    }
}
