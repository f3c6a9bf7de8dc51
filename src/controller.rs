mod events;
pub mod intents;
pub mod options;
mod state;
pub mod translator;

// Re-export public types
pub use intents::{ControllerEvent, Dispatch, FieldEvent, InputKey, Intent, SurfaceEvent};
pub use options::{DEFAULT_MAX_VISIBLE_ITEMS, WidgetOptions};
pub use state::Controller;
pub use translator::IntentTranslator;
