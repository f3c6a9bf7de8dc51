//! Ownership of the cache shared between widgets.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;

use super::store::ResultCache;

/// Whether a widget shares the registry-owned cache or gets its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    #[default]
    Shared,
    Private,
}

/// Shared handle to one cache instance.
pub type CacheHandle = Rc<RefCell<ResultCache>>;

/// Hands out cache handles to controllers.
///
/// The application builds one registry at startup and asks it for a handle
/// per widget. The shared instance lives exactly as long as the registry's
/// handles do; there is no process-wide state behind it.
#[derive(Debug, Default)]
pub struct CacheRegistry {
    shared: Option<CacheHandle>,
}

impl CacheRegistry {
    pub fn new() -> Self {
        Self { shared: None }
    }

    /// Hand out a cache handle. `Shared` returns the registry-owned
    /// instance, created with `max_length` on the first request; later
    /// requests reuse it with its original capacity. `Private` builds a
    /// fresh instance per call.
    pub fn handle(&mut self, mode: CacheMode, max_length: usize) -> CacheHandle {
        match mode {
            CacheMode::Shared => self
                .shared
                .get_or_insert_with(|| Rc::new(RefCell::new(ResultCache::new(max_length))))
                .clone(),
            CacheMode::Private => Rc::new(RefCell::new(ResultCache::new(max_length))),
        }
    }
}
