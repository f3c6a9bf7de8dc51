pub mod debouncer;
pub mod scheduler;

// Re-export public types
pub use debouncer::{DEFAULT_REQUEST_DELAY_MS, Debouncer};
pub use scheduler::LookupScheduler;
