//! The operations exposed to callers.
//!
//! Each operation takes an application identifier plus a name or query and
//! returns ready-to-print text. Lookup misses come back as `Ok` text listing
//! the alternatives; only loading failures surface as `DictionaryError`.

use crate::cache::DictionaryCache;
use crate::dictionary::{QueryEngine, search};
use crate::error::DictionaryError;
use crate::format::{
    render_app_list, render_class_detail, render_command_detail, render_enumeration_detail,
    render_hits, render_matches, render_not_found, render_overview, render_suite_detail,
    render_to_string,
};
use crate::provider::DocumentProvider;
use std::path::Path;

pub struct DictionaryService {
    cache: DictionaryCache,
}

impl DictionaryService {
    pub fn new(provider: Box<dyn DocumentProvider>) -> Self {
        Self::with_cache(DictionaryCache::new(provider))
    }

    pub fn with_cache(cache: DictionaryCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &DictionaryCache {
        &self.cache
    }

    /// Scriptable applications the provider knows about.
    pub fn list_apps(&self, search_dir: Option<&Path>) -> Result<String, DictionaryError> {
        let apps = self.cache.provider().scriptable_apps(search_dir)?;
        Ok(render_to_string(|out| render_app_list(&apps, out)))
    }

    /// Suite names, descriptions, and counts. The usual starting point.
    pub fn overview(&self, app: &str) -> Result<String, DictionaryError> {
        let document = self.cache.get_or_load(app)?;
        Ok(render_to_string(|out| render_overview(&document, app, out)))
    }

    pub fn suite_detail(&self, app: &str, suite_name: &str) -> Result<String, DictionaryError> {
        let document = self.cache.get_or_load(app)?;
        let text = match QueryEngine::new(&document).suite_by_name(suite_name) {
            Ok(suite) => render_to_string(|out| render_suite_detail(suite, out)),
            Err(missing) => render_to_string(|out| render_not_found(&missing, out)),
        };
        Ok(text)
    }

    /// Every definition of the command, one block per defining suite.
    pub fn command_detail(&self, app: &str, command_name: &str) -> Result<String, DictionaryError> {
        let document = self.cache.get_or_load(app)?;
        let text = match QueryEngine::new(&document).command_by_name(command_name) {
            Ok(matches) => {
                render_to_string(|out| render_matches(&matches, out, render_command_detail))
            }
            Err(missing) => render_to_string(|out| render_not_found(&missing, out)),
        };
        Ok(text)
    }

    /// Classes and class-extensions sharing the name, in document order.
    pub fn class_detail(&self, app: &str, class_name: &str) -> Result<String, DictionaryError> {
        let document = self.cache.get_or_load(app)?;
        let text = match QueryEngine::new(&document).class_by_name(class_name) {
            Ok(matches) => {
                render_to_string(|out| render_matches(&matches, out, render_class_detail))
            }
            Err(missing) => render_to_string(|out| render_not_found(&missing, out)),
        };
        Ok(text)
    }

    pub fn enumeration_detail(
        &self,
        app: &str,
        enum_name: &str,
    ) -> Result<String, DictionaryError> {
        let document = self.cache.get_or_load(app)?;
        let text = match QueryEngine::new(&document).enumeration_by_name(enum_name) {
            Ok(matches) => {
                render_to_string(|out| render_matches(&matches, out, render_enumeration_detail))
            }
            Err(missing) => render_to_string(|out| render_not_found(&missing, out)),
        };
        Ok(text)
    }

    pub fn search(&self, app: &str, query: &str) -> Result<String, DictionaryError> {
        let document = self.cache.get_or_load(app)?;
        let hits = search(&document, query);
        Ok(render_to_string(|out| render_hits(query, app, &hits, out)))
    }

    /// The parsed dictionary as pretty-printed JSON.
    pub fn export(&self, app: &str) -> Result<String, DictionaryError> {
        let document = self.cache.get_or_load(app)?;
        Ok(serde_json::to_string_pretty(document.as_ref())?)
    }
}
