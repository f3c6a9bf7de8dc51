pub mod sinks;

// Re-export public types
pub use sinks::{DisplayOnlySink, HiddenValueSink, OptionEntry, OptionListSink};

use crate::source::types::ResultItem;

/// Where a committed selection's machine value goes.
///
/// The controller always writes the display text into the field itself;
/// the sink decides what else a commit means for the host. Composing a
/// controller with a sink replaces one widget subclass per field flavor.
pub trait CommitSink {
    fn commit(&mut self, item: &ResultItem);

    /// A previously committed value was deselected.
    fn clear(&mut self);

    /// Current machine value, if this sink keeps one.
    fn value(&self) -> Option<String>;
}
