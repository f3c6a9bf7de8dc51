//! typeahead library - interactive autocomplete over JSON datasets
//!
//! This library exposes the widget's building blocks: the interaction
//! controller, the pluggable data sources, the bounded query cache, and
//! the terminal field and surface implementations.

pub mod app;
pub mod cache;
pub mod commit;
pub mod config;
pub mod controller;
pub mod dataset;
pub mod error;
pub mod field;
pub mod lookup;
pub mod selection;
pub mod source;
pub mod surface;
pub mod widgets;

// Re-export commonly used types for convenience
pub use config::Config;
pub use controller::{Controller, WidgetOptions};
pub use source::{DataSource, Query, RemoteSource, ResultItem, ResultSet, StaticSource};
