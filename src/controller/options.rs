//! Per-widget tuning knobs.

use crate::lookup::DEFAULT_REQUEST_DELAY_MS;
use crate::surface::RowFormatter;

/// Rows shown at once before the list starts scrolling.
pub const DEFAULT_MAX_VISIBLE_ITEMS: usize = 10;

/// Behavior knobs for one widget instance.
///
/// Defaults match the classic widget: no minimum length, a 150 ms quiet
/// period, ten visible rows, and tab committing the focused item.
#[derive(Debug)]
pub struct WidgetOptions {
    /// Minimum typed characters before a lookup runs.
    pub min_chars: usize,
    /// Quiet period between the last change and the lookup it triggers.
    pub request_delay_ms: u64,
    /// Cap on visible rows; None means the list never scrolls.
    pub max_visible_items: Option<usize>,
    /// Whether tab commits the focused item (without ever consuming the
    /// key, so focus still moves on).
    pub select_on_tab: bool,
    /// Row formatting hooks.
    pub formatter: RowFormatter,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            min_chars: 0,
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            max_visible_items: Some(DEFAULT_MAX_VISIBLE_ITEMS),
            select_on_tab: true,
            formatter: RowFormatter::default(),
        }
    }
}
