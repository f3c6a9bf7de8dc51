//! Record field extraction shared by the data sources.

use serde_json::Value;

use super::types::ResultItem;

/// Convert a dotted field path ("user.name") to a JSON pointer
/// ("/user/name"). An empty path points at the record itself.
pub(crate) fn pointer_from_dotted(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut pointer = String::with_capacity(path.len() + 1);
    for segment in path.split('.') {
        pointer.push('/');
        pointer.push_str(&segment.replace('~', "~0").replace('/', "~1"));
    }
    pointer
}

/// Extract display text for a record at `pointer`.
///
/// Strings are used as-is, numbers and booleans are formatted. Anything
/// else (missing, null, nested) yields None and the record is skipped.
pub(crate) fn display_text_at(record: &Value, pointer: &str) -> Option<String> {
    let target = if pointer.is_empty() {
        record
    } else {
        record.pointer(pointer)?
    };
    match target {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Resolve the machine value stored alongside the display text. Without a
/// value pointer the display text itself is the value.
pub(crate) fn machine_value_at(record: &Value, value_pointer: Option<&str>, display: &str) -> Value {
    match value_pointer {
        Some(pointer) if !pointer.is_empty() => {
            record.pointer(pointer).cloned().unwrap_or(Value::Null)
        }
        Some(_) => record.clone(),
        None => Value::String(display.to_string()),
    }
}

/// Map raw records to ranked result items using the configured paths.
/// Records without usable display text are skipped; ranks are assigned
/// after skipping, so they stay contiguous.
pub(crate) fn items_from_records<'a, I>(
    records: I,
    field_pointer: &str,
    value_pointer: Option<&str>,
) -> Vec<ResultItem>
where
    I: IntoIterator<Item = &'a Value>,
{
    records
        .into_iter()
        .filter_map(|record| {
            let display = display_text_at(record, field_pointer)?;
            let value = machine_value_at(record, value_pointer, &display);
            Some((display, value))
        })
        .enumerate()
        .map(|(rank, (display, value))| ResultItem::new(display, value, rank))
        .collect()
}
