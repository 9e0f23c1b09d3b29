//! Reader for macOS scripting dictionaries (SDEF).
//!
//! The crate turns an application's SDEF XML into a typed [`Document`],
//! keeps parsed documents in a [`DictionaryCache`], and answers lookups
//! (suites, commands, classes, enumerations, keyword search) as compact text
//! through [`DictionaryService`]. Raw dictionaries come from a
//! [`DocumentProvider`]: the host's `sdef` utility, or a directory of
//! pre-extracted `.sdef` files.

pub mod cache;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod format;
pub mod protocol;
pub mod provider;
pub mod runtime;
pub mod service;

pub use cache::DictionaryCache;
pub use config::ProviderConfig;
pub use dictionary::{
    Class, Command, CommandResult, Document, Element, EntityKind, Enumeration, Enumerator, Hit,
    HitKind, Match, NotFound, Parameter, Property, QueryEngine, Suite, SuiteSummary,
    parse_document, search,
};
pub use error::DictionaryError;
pub use protocol::{Request, Response, dispatch, serve};
pub use provider::{DirectoryProvider, DocumentProvider, SystemProvider, provider_from_config};
pub use service::DictionaryService;
