//! Scripting dictionary model, parser, and read-only views.
//!
//! `parse_document` turns SDEF XML into a `Document`; `QueryEngine` answers
//! name lookups over it and `search` scans it for keywords. Types here carry
//! no I/O: loading and caching live in `cache` and `provider`.

pub mod model;
pub mod parser;
pub mod query;
pub mod search;

pub use model::{
    Class, Command, CommandResult, Document, Element, Enumeration, Enumerator, Parameter,
    Property, Suite,
};
pub use parser::parse_document;
pub use query::{EntityKind, Match, NotFound, QueryEngine, SuiteSummary};
pub use search::{Hit, HitKind, search};
