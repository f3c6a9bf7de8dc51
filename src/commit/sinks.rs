//! Commit sink implementations.

use serde_json::Value;

use crate::source::types::ResultItem;

use super::CommitSink;

fn value_as_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// For plain text fields: the display text is the whole story.
#[derive(Debug, Default)]
pub struct DisplayOnlySink;

impl CommitSink for DisplayOnlySink {
    fn commit(&mut self, _item: &ResultItem) {}

    fn clear(&mut self) {}

    fn value(&self) -> Option<String> {
        None
    }
}

/// Keeps a companion machine value distinct from the display text, the
/// way a hidden form input shadows a visible one.
#[derive(Debug, Default)]
pub struct HiddenValueSink {
    value: Option<String>,
}

impl HiddenValueSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommitSink for HiddenValueSink {
    fn commit(&mut self, item: &ResultItem) {
        self.value = Some(value_as_string(item.value()));
    }

    fn clear(&mut self) {
        self.value = None;
    }

    fn value(&self) -> Option<String> {
        self.value.clone()
    }
}

/// One entry of an option list a commit can select.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionEntry {
    pub label: String,
    pub value: String,
}

impl OptionEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Marks one entry of an owned option list as selected, mirroring a
/// native selection control. Matches by value first, then by label.
#[derive(Debug, Default)]
pub struct OptionListSink {
    options: Vec<OptionEntry>,
    selected: Option<usize>,
}

impl OptionListSink {
    pub fn new(options: Vec<OptionEntry>) -> Self {
        Self {
            options,
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<&OptionEntry> {
        self.selected.map(|index| &self.options[index])
    }
}

impl CommitSink for OptionListSink {
    fn commit(&mut self, item: &ResultItem) {
        let value = value_as_string(item.value());
        self.selected = self
            .options
            .iter()
            .position(|option| option.value == value)
            .or_else(|| {
                self.options
                    .iter()
                    .position(|option| option.label == item.display_text())
            });
    }

    fn clear(&mut self) {
        self.selected = None;
    }

    fn value(&self) -> Option<String> {
        self.selected
            .map(|index| self.options[index].value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(display: &str, value: Value) -> ResultItem {
        ResultItem::new(display, value, 0)
    }

    #[test]
    fn test_display_only_sink_keeps_nothing() {
        let mut sink = DisplayOnlySink;
        sink.commit(&item("Apple", json!("apple-1")));

        assert_eq!(sink.value(), None);
    }

    #[test]
    fn test_hidden_value_sink_stores_string_values_verbatim() {
        let mut sink = HiddenValueSink::new();
        sink.commit(&item("Apple", json!("apple-1")));

        assert_eq!(sink.value(), Some("apple-1".to_string()));
    }

    #[test]
    fn test_hidden_value_sink_serializes_structured_values() {
        let mut sink = HiddenValueSink::new();
        sink.commit(&item("Apple", json!({"id": 1})));

        assert_eq!(sink.value(), Some("{\"id\":1}".to_string()));
    }

    #[test]
    fn test_hidden_value_sink_clear_forgets_the_value() {
        let mut sink = HiddenValueSink::new();
        sink.commit(&item("Apple", json!("apple-1")));
        sink.clear();

        assert_eq!(sink.value(), None);
    }

    #[test]
    fn test_option_list_sink_matches_by_value() {
        let mut sink = OptionListSink::new(vec![
            OptionEntry::new("Apple", "1"),
            OptionEntry::new("Banana", "2"),
        ]);

        sink.commit(&item("anything", json!("2")));

        assert_eq!(sink.selected().unwrap().label, "Banana");
        assert_eq!(sink.value(), Some("2".to_string()));
    }

    #[test]
    fn test_option_list_sink_falls_back_to_label_match() {
        let mut sink = OptionListSink::new(vec![
            OptionEntry::new("Apple", "1"),
            OptionEntry::new("Banana", "2"),
        ]);

        sink.commit(&item("Apple", json!("no-such-value")));

        assert_eq!(sink.value(), Some("1".to_string()));
    }

    #[test]
    fn test_option_list_sink_unmatched_commit_selects_nothing() {
        let mut sink = OptionListSink::new(vec![OptionEntry::new("Apple", "1")]);

        sink.commit(&item("Cherry", json!("3")));

        assert_eq!(sink.selected(), None);
        assert_eq!(sink.value(), None);
    }
}
