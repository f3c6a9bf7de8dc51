//! Focus and commit state over the rendered result set.

use crate::source::types::ResultItem;

/// Movement through the rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A committed selection: the item and the row it occupied when committed.
#[derive(Debug, Clone, PartialEq)]
pub struct Committed {
    pub index: usize,
    pub item: ResultItem,
}

/// Tracks which row has focus and which item is committed.
///
/// Focus follows the keyboard and mouse and resets whenever a new result
/// set renders; the committed selection persists until it is explicitly
/// replaced or cleared.
#[derive(Debug, Default)]
pub struct SelectionState {
    focused: Option<usize>,
    committed: Option<Committed>,
    deferred_navigation: Option<Direction>,
    blur_guard: bool,
    item_count: usize,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn committed(&self) -> Option<&Committed> {
        self.committed.as_ref()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// A new result set rendered: focus resets, the committed selection
    /// persists.
    pub fn apply_results(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.focused = None;
    }

    /// Move focus. From nothing, both directions converge on the first
    /// row; past either end is a no-op. Returns the newly focused row.
    pub fn navigate(&mut self, direction: Direction) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        let next = match self.focused {
            None => 0,
            Some(current) => match direction {
                Direction::Down => {
                    if current + 1 >= self.item_count {
                        return None;
                    }
                    current + 1
                }
                Direction::Up => {
                    if current == 0 {
                        return None;
                    }
                    current - 1
                }
            },
        };
        self.focused = Some(next);
        Some(next)
    }

    /// Focus the hovered row. Returns false when out of bounds or when the
    /// row is already focused.
    pub fn hover(&mut self, index: usize) -> bool {
        if index >= self.item_count || self.focused == Some(index) {
            return false;
        }
        self.focused = Some(index);
        true
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// The list closed: focus and pending deferred navigation are gone,
    /// the committed selection stays.
    pub fn close(&mut self) {
        self.focused = None;
        self.deferred_navigation = None;
    }

    /// Remember a navigation that should run once results first render.
    pub fn defer_navigation(&mut self, direction: Direction) {
        self.deferred_navigation = Some(direction);
    }

    pub fn take_deferred_navigation(&mut self) -> Option<Direction> {
        self.deferred_navigation.take()
    }

    /// Arm the one-shot guard that keeps the next field blur from tearing
    /// the list down before a press on it completes.
    pub fn arm_blur_guard(&mut self) {
        self.blur_guard = true;
    }

    pub fn take_blur_guard(&mut self) -> bool {
        std::mem::take(&mut self.blur_guard)
    }

    pub fn set_committed(&mut self, index: usize, item: ResultItem) {
        self.committed = Some(Committed { index, item });
    }

    pub fn take_committed(&mut self) -> Option<Committed> {
        self.committed.take()
    }

    /// Row to mark as committed, if that row still exists in the rendered
    /// set.
    pub fn committed_row_within(&self, item_count: usize) -> Option<usize> {
        self.committed
            .as_ref()
            .map(|committed| committed.index)
            .filter(|&index| index < item_count)
    }

    /// Full reset at detach time.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;
