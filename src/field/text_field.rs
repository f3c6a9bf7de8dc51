//! Single-line input field backed by a textarea widget.

use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::{CursorMove, Input, TextArea};

use super::{Field, Marker};

/// Terminal implementation of the field contract.
#[derive(Debug)]
pub struct TextField {
    textarea: TextArea<'static>,
    placeholder: String,
    hint_enabled: bool,
    loading: bool,
    selected: bool,
    empty: bool,
    area: Rect,
}

impl TextField {
    pub fn new(placeholder: &str) -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text(placeholder);

        Self {
            textarea,
            placeholder: placeholder.to_string(),
            hint_enabled: true,
            loading: false,
            selected: false,
            empty: false,
            area: Rect::default(),
        }
    }

    /// Feed one edit to the textarea. Returns true when the content
    /// changed.
    pub fn input(&mut self, input: impl Into<Input>) -> bool {
        self.textarea.input(input)
    }

    pub fn insert_str(&mut self, text: &str) {
        self.textarea.insert_str(text);
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn textarea_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.textarea
    }

    /// Record where the field was laid out this frame.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }
}

impl Field for TextField {
    fn value(&self) -> String {
        // A textarea always has at least one line
        self.textarea.lines()[0].clone()
    }

    fn set_value(&mut self, text: &str) {
        self.textarea.select_all();
        self.textarea.cut();
        self.textarea.insert_str(text);
    }

    fn caret_to_end(&mut self) {
        self.textarea.move_cursor(CursorMove::End);
    }

    fn set_marker(&mut self, marker: Marker, on: bool) {
        match marker {
            Marker::Loading => self.loading = on,
            Marker::Selected => self.selected = on,
            Marker::Empty => self.empty = on,
        }
    }

    fn marker(&self, marker: Marker) -> bool {
        match marker {
            Marker::Loading => self.loading,
            Marker::Selected => self.selected,
            Marker::Empty => self.empty,
        }
    }

    fn native_hint_enabled(&self) -> bool {
        self.hint_enabled
    }

    fn set_native_hint(&mut self, on: bool) {
        self.hint_enabled = on;
        if on {
            self.textarea.set_placeholder_text(self.placeholder.clone());
        } else {
            self.textarea.set_placeholder_text("");
        }
    }

    fn bounds(&self) -> Rect {
        self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_textarea::Key;

    fn char_input(c: char) -> Input {
        Input {
            key: Key::Char(c),
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    #[test]
    fn test_new_field_is_empty() {
        let field = TextField::new("type here");
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_input_updates_value() {
        let mut field = TextField::new("");
        assert!(field.input(char_input('a')));
        assert!(field.input(char_input('b')));
        assert_eq!(field.value(), "ab");
    }

    #[test]
    fn test_set_value_replaces_existing_text() {
        let mut field = TextField::new("");
        field.insert_str("draft");

        field.set_value("Apple");

        assert_eq!(field.value(), "Apple");
        // Caret ends up after the inserted text
        assert_eq!(field.textarea().cursor(), (0, 5));
    }

    #[test]
    fn test_set_value_empty_clears_field() {
        let mut field = TextField::new("");
        field.insert_str("draft");
        field.set_value("");
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_caret_to_end_moves_cursor() {
        let mut field = TextField::new("");
        field.insert_str("hello");
        field.textarea_mut().move_cursor(CursorMove::Head);

        field.caret_to_end();

        assert_eq!(field.textarea().cursor(), (0, 5));
    }

    #[test]
    fn test_markers_toggle_independently() {
        let mut field = TextField::new("");
        field.set_marker(Marker::Loading, true);
        field.set_marker(Marker::Selected, true);

        assert!(field.marker(Marker::Loading));
        assert!(field.marker(Marker::Selected));
        assert!(!field.marker(Marker::Empty));

        field.set_marker(Marker::Loading, false);
        assert!(!field.marker(Marker::Loading));
        assert!(field.marker(Marker::Selected));
    }

    #[test]
    fn test_native_hint_restores_placeholder() {
        let mut field = TextField::new("type to search");
        assert!(field.native_hint_enabled());

        field.set_native_hint(false);
        assert!(!field.native_hint_enabled());
        assert_eq!(field.textarea().placeholder_text(), "");

        field.set_native_hint(true);
        assert_eq!(field.textarea().placeholder_text(), "type to search");
    }
}
