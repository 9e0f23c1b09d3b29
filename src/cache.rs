//! Lazily populated, never-invalidated store of parsed dictionaries.
//!
//! Entries are keyed by the application identifier exactly as the caller
//! spelled it. Each identifier gets its own slot lock so concurrent first
//! requests for one app load once while other apps load in parallel. A failed
//! load is not remembered: the next request retries, and an identifier that
//! never loads does not keep a slot alive.

use crate::dictionary::{Document, parse_document};
use crate::error::DictionaryError;
use crate::provider::DocumentProvider;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

type Slot = Arc<Mutex<Option<Arc<Document>>>>;

pub struct DictionaryCache {
    provider: Box<dyn DocumentProvider>,
    slots: Mutex<BTreeMap<String, Slot>>,
}

impl DictionaryCache {
    pub fn new(provider: Box<dyn DocumentProvider>) -> Self {
        Self {
            provider,
            slots: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn provider(&self) -> &dyn DocumentProvider {
        self.provider.as_ref()
    }

    /// Return the dictionary for `app`, loading and parsing it on first use.
    pub fn get_or_load(&self, app: &str) -> Result<Arc<Document>, DictionaryError> {
        let slot = self.slot(app);
        let mut entry = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(document) = entry.as_ref() {
            debug!(app, "dictionary cache hit");
            return Ok(Arc::clone(document));
        }

        match self.load(app) {
            Ok(document) => {
                *entry = Some(Arc::clone(&document));
                Ok(document)
            }
            Err(err) => {
                self.forget(app, &slot);
                Err(err)
            }
        }
    }

    fn load(&self, app: &str) -> Result<Arc<Document>, DictionaryError> {
        let path = self.provider.locate(app)?;
        let raw = self.provider.fetch_document(&path)?;
        let document = Arc::new(parse_document(&raw)?);
        info!(
            app,
            path = %path.display(),
            suites = document.suites.len(),
            "loaded scripting dictionary"
        );
        Ok(document)
    }

    /// Drop an empty slot after a failed load unless another caller is
    /// already waiting on it.
    ///
    /// Slots are only cloned under the map lock, so the count checked here
    /// cannot grow underneath us.
    fn forget(&self, app: &str, slot: &Slot) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let unshared = slots
            .get(app)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && Arc::strong_count(slot) == 2);
        if unshared {
            slots.remove(app);
        }
    }

    /// Whether a parsed dictionary is stored for exactly this identifier.
    pub fn is_cached(&self, app: &str) -> bool {
        let slot = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(app)
            .cloned();
        slot.is_some_and(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).is_some())
    }

    /// Number of identifiers with a loaded dictionary.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        slots
            .iter()
            .filter(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, app: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(app.to_string()).or_default())
    }
}
