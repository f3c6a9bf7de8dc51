mod registry;
mod store;

// Re-export public types
pub use registry::{CacheHandle, CacheMode, CacheRegistry};
pub use store::{DEFAULT_CACHE_LENGTH, ResultCache};
