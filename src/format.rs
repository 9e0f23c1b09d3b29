//! Compact plain-text rendering of dictionary entities.
//!
//! Output is meant to be read by people and language models alike, so it
//! favors one-line signatures and short headers over exhaustive markup. Every
//! renderer is a pure function of its inputs and writes into any
//! `fmt::Write`; none of them emit a trailing newline.

use crate::dictionary::model::{Class, Command, DEFAULT_ACCESS, Document, Enumeration, Suite};
use crate::dictionary::{EntityKind, Hit, Match, NotFound, QueryEngine};
use std::fmt;

/// Render into a fresh `String`.
pub fn render_to_string(render: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails.
    let _ = render(&mut out);
    out
}

/// Suite list with counts, headed by the dictionary title (or `app` when the
/// dictionary has none).
pub fn render_overview(document: &Document, app: &str, out: &mut impl fmt::Write) -> fmt::Result {
    let title = if document.title.is_empty() {
        app
    } else {
        document.title.as_str()
    };
    write!(out, "Dictionary: {title}")?;
    for summary in QueryEngine::new(document).suites_overview() {
        let description = if summary.description.is_empty() {
            "—"
        } else {
            summary.description
        };
        write!(
            out,
            "\n\n■ {}\n  {}\n  {} commands · {} classes · {} enums",
            summary.name, description, summary.commands, summary.classes, summary.enumerations
        )?;
    }
    Ok(())
}

pub fn render_suite_detail(suite: &Suite, out: &mut impl fmt::Write) -> fmt::Result {
    write!(out, "═══ {} ═══", suite.name)?;
    if !suite.description.is_empty() {
        write!(out, "\n{}", suite.description)?;
    }

    if !suite.commands.is_empty() {
        out.write_str("\n\nCOMMANDS:")?;
        for command in &suite.commands {
            write!(out, "\n  {}", command_signature(command))?;
        }
    }

    if !suite.classes.is_empty() {
        out.write_str("\n\nCLASSES:")?;
        for class in &suite.classes {
            let ext = if class.is_extension { " [ext]" } else { "" };
            write!(
                out,
                "\n  {}{}{} {}{}",
                class.name,
                inherits_suffix(class),
                ext,
                member_counts(class),
                dash_suffix(&class.description)
            )?;
        }
    }

    if !suite.enumerations.is_empty() {
        out.write_str("\n\nENUMS:")?;
        for enumeration in &suite.enumerations {
            write!(
                out,
                "\n  {}: {}",
                enumeration.name,
                enumerator_names(enumeration)
            )?;
        }
    }
    Ok(())
}

/// One-line command signature:
/// `name <direct?> param:type? → result  // description`.
pub fn command_signature(command: &Command) -> String {
    let mut parts = vec![command.name.clone()];
    if let Some(direct) = &command.direct_parameter {
        parts.push(format!(
            "<{}{}>",
            direct.type_name,
            optional_mark(direct.optional)
        ));
    }
    for param in &command.parameters {
        parts.push(format!(
            "{}:{}{}",
            param.name,
            param.type_name,
            optional_mark(param.optional)
        ));
    }
    if let Some(result) = &command.result {
        parts.push(format!("→ {}", result.type_name));
    }

    let mut signature = parts.join(" ");
    if !command.description.is_empty() {
        signature.push_str("  // ");
        signature.push_str(&command.description);
    }
    signature
}

/// `name : parent (Np Me)`, as used in search hits.
pub fn class_summary(class: &Class) -> String {
    format!(
        "{}{} {}",
        class.name,
        inherits_suffix(class),
        member_counts(class)
    )
}

/// `name: a | b | c`.
pub fn enumeration_summary(enumeration: &Enumeration) -> String {
    format!("{}: {}", enumeration.name, enumerator_names(enumeration))
}

pub fn render_command_detail(
    command: &Command,
    suite: &str,
    out: &mut impl fmt::Write,
) -> fmt::Result {
    write_header(out, "COMMAND", &command.name, suite)?;
    if !command.description.is_empty() {
        write!(out, "\n  {}", command.description)?;
    }

    if let Some(direct) = &command.direct_parameter {
        write!(
            out,
            "\n  Direct param: {}{}",
            direct.type_name,
            optional_label(direct.optional)
        )?;
        if !direct.description.is_empty() {
            write!(out, "\n    {}", direct.description)?;
        }
    }

    if !command.parameters.is_empty() {
        out.write_str("\n  Params:")?;
        for param in &command.parameters {
            write!(
                out,
                "\n    {}: {}{}{}",
                param.name,
                param.type_name,
                optional_label(param.optional),
                dash_suffix(&param.description)
            )?;
        }
    }

    if let Some(result) = &command.result {
        write!(
            out,
            "\n  Returns: {}{}",
            result.type_name,
            dash_suffix(&result.description)
        )?;
    }
    Ok(())
}

pub fn render_class_detail(class: &Class, suite: &str, out: &mut impl fmt::Write) -> fmt::Result {
    write_header(out, "CLASS", &class.name, suite)?;
    if !class.inherits.is_empty() {
        write!(out, "\n  Inherits: {}", class.inherits)?;
    }
    if !class.plural.is_empty() {
        write!(out, "\n  Plural: {}", class.plural)?;
    }
    if class.is_extension {
        out.write_str("\n  (class extension)")?;
    }
    if !class.description.is_empty() {
        write!(out, "\n  {}", class.description)?;
    }

    if !class.properties.is_empty() {
        out.write_str("\n  Properties:")?;
        for prop in &class.properties {
            write!(
                out,
                "\n    {}: {}{}{}",
                prop.name,
                prop.type_name,
                access_suffix(&prop.access),
                dash_suffix(&prop.description)
            )?;
        }
    }

    if !class.elements.is_empty() {
        let types: Vec<&str> = class
            .elements
            .iter()
            .map(|el| el.type_name.as_str())
            .collect();
        write!(out, "\n  Elements: {}", types.join(", "))?;
    }

    if !class.responds_to.is_empty() {
        write!(out, "\n  Responds to: {}", class.responds_to.join(", "))?;
    }
    Ok(())
}

pub fn render_enumeration_detail(
    enumeration: &Enumeration,
    suite: &str,
    out: &mut impl fmt::Write,
) -> fmt::Result {
    write_header(out, "ENUM", &enumeration.name, suite)?;
    for value in &enumeration.values {
        write!(out, "\n  {}{}", value.name, dash_suffix(&value.description))?;
    }
    Ok(())
}

/// Render every match with `render_one`, separated by a blank line.
pub fn render_matches<T, W: fmt::Write>(
    matches: &[Match<'_, T>],
    out: &mut W,
    render_one: impl Fn(&T, &str, &mut W) -> fmt::Result,
) -> fmt::Result {
    for (idx, found) in matches.iter().enumerate() {
        if idx > 0 {
            out.write_str("\n\n")?;
        }
        render_one(found.item, found.suite, out)?;
    }
    Ok(())
}

pub fn render_not_found(missing: &NotFound, out: &mut impl fmt::Write) -> fmt::Result {
    let available = missing.available.join(", ");
    match missing.kind {
        EntityKind::Suite => write!(
            out,
            "Suite '{}' not found. Available: {available}",
            missing.query
        ),
        kind => write!(
            out,
            "{kind} '{}' not found.\nAvailable: {available}",
            missing.query
        ),
    }
}

pub fn render_hits(
    query: &str,
    app: &str,
    hits: &[Hit<'_>],
    out: &mut impl fmt::Write,
) -> fmt::Result {
    if hits.is_empty() {
        return write!(out, "No results for '{query}' in {app}'s dictionary.");
    }
    write!(out, "Search '{query}' in {app} ({} hits):", hits.len())?;
    for hit in hits {
        write!(
            out,
            "\n  {:<4} [{}] {}",
            hit.kind.tag(),
            hit.suite,
            hit.summary
        )?;
    }
    Ok(())
}

pub fn render_app_list(apps: &[String], out: &mut impl fmt::Write) -> fmt::Result {
    if apps.is_empty() {
        return out.write_str("No scriptable apps found.");
    }
    out.write_str("Scriptable apps:")?;
    for app in apps {
        write!(out, "\n  {app}")?;
    }
    Ok(())
}

fn write_header(out: &mut impl fmt::Write, label: &str, name: &str, suite: &str) -> fmt::Result {
    write!(out, "{label}: {name}")?;
    if !suite.is_empty() {
        write!(out, "  [{suite}]")?;
    }
    Ok(())
}

fn inherits_suffix(class: &Class) -> String {
    if class.inherits.is_empty() {
        String::new()
    } else {
        format!(" : {}", class.inherits)
    }
}

fn member_counts(class: &Class) -> String {
    format!("({}p {}e)", class.properties.len(), class.elements.len())
}

fn enumerator_names(enumeration: &Enumeration) -> String {
    enumeration
        .values
        .iter()
        .map(|v| v.name.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

pub(crate) fn access_suffix(access: &str) -> String {
    if access == DEFAULT_ACCESS {
        String::new()
    } else {
        format!(" [{access}]")
    }
}

pub(crate) fn dash_suffix(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!(" — {text}")
    }
}

fn optional_mark(optional: bool) -> &'static str {
    if optional { "?" } else { "" }
}

fn optional_label(optional: bool) -> &'static str {
    if optional { " [optional]" } else { "" }
}
