mod selection_state;

// Re-export public types
pub use selection_state::{Committed, Direction, SelectionState};
