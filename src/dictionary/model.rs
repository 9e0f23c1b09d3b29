//! Plain records for a parsed scripting dictionary.
//!
//! The types mirror the SDEF element hierarchy one level at a time. They carry
//! no behavior: the parser builds them once, the cache shares them read-only,
//! and the query/search/format layers only borrow them. Cross-references such
//! as `Class::inherits` and `Class::responds_to` stay plain strings; resolve
//! them through `QueryEngine` when needed.

use serde::Serialize;

/// Type string used when an element carries no type information at all.
pub const ANY_TYPE: &str = "any";

/// Default access for properties and elements that omit `access`.
pub const DEFAULT_ACCESS: &str = "rw";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// One application's scripting dictionary.
pub struct Document {
    pub title: String,
    pub suites: Vec<Suite>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Named grouping of related commands, classes, and enumerations.
pub struct Suite {
    pub name: String,
    pub code: String,
    pub description: String,
    pub commands: Vec<Command>,
    pub classes: Vec<Class>,
    pub enumerations: Vec<Enumeration>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Command {
    pub name: String,
    pub code: String,
    pub description: String,
    pub direct_parameter: Option<Parameter>,
    pub parameters: Vec<Parameter>,
    pub result: Option<CommandResult>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Named or direct parameter of a command.
///
/// Direct parameters usually leave `name` and `code` empty.
pub struct Parameter {
    pub name: String,
    pub code: String,
    pub description: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub optional: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Value a command returns.
pub struct CommandResult {
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Scriptable object type, or a class-extension when `is_extension` is set.
///
/// Extensions are stored next to ordinary classes in `Suite::classes` rather
/// than merged into the class they extend.
pub struct Class {
    pub name: String,
    pub code: String,
    pub description: String,
    pub inherits: String,
    pub plural: String,
    pub properties: Vec<Property>,
    pub elements: Vec<Element>,
    pub responds_to: Vec<String>,
    pub is_extension: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub code: String,
    pub description: String,
    #[serde(rename = "type")]
    pub type_name: String,
    /// One of `r`, `w`, `rw`.
    pub access: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Typed, unnamed collection a class may contain.
pub struct Element {
    #[serde(rename = "type")]
    pub type_name: String,
    pub access: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Enumeration {
    pub name: String,
    pub code: String,
    pub values: Vec<Enumerator>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Enumerator {
    pub name: String,
    pub code: String,
    pub description: String,
}
