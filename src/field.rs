pub mod text_field;

// Re-export public types
pub use text_field::TextField;

use ratatui::layout::Rect;

/// Semantic states the field can signal while the widget drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A lookup is in flight.
    Loading,
    /// A committed selection backs the current text.
    Selected,
    /// The last lookup listed nothing.
    Empty,
}

/// The single-line input the widget is attached to.
///
/// The host keeps ownership of editing; the widget reads values, writes
/// committed text, toggles semantic markers, and switches the field's
/// native hinting off for the duration of the attachment.
pub trait Field {
    /// Current text of the field.
    fn value(&self) -> String;

    /// Replace the text, leaving the caret at the end.
    fn set_value(&mut self, text: &str);

    fn caret_to_end(&mut self);

    fn set_marker(&mut self, marker: Marker, on: bool);

    fn marker(&self, marker: Marker) -> bool;

    fn native_hint_enabled(&self) -> bool;

    /// Toggle the field's own hinting (e.g. placeholder text) so it cannot
    /// fight the suggestion list.
    fn set_native_hint(&mut self, on: bool);

    /// On-screen rectangle the results surface anchors beneath.
    fn bounds(&self) -> Rect;
}
