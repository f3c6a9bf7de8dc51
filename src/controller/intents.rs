//! Event and intent vocabulary of the controller.

use crate::selection::Direction;
use crate::source::types::ResultItem;

/// Keys the translator distinguishes. Anything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Char(char),
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Shift,
    Control,
    Alt,
    Meta,
    Other,
}

/// A raw field event as reported by the host. Key and paste events carry
/// the field's value after the host applied the edit, so no timer games
/// are needed to observe the post-edit text.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    KeyInput { key: InputKey, text_after: String },
    Paste { text_after: String },
    Focus,
    Blur,
    Click,
}

/// Mouse interaction with the rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Hover(usize),
    Press(usize),
}

/// Semantic intent distilled from one field event.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    QueryChanged(String),
    /// A pasted value: looked up without the usual quiet period.
    PasteChanged(String),
    Navigate(Direction),
    /// Open the list, then move focus once results first render.
    OpenThenNavigate(Direction),
    OpenList,
    Commit,
    Dismiss,
    Activate,
    Deactivate,
}

/// Translation result: the intent, if any, plus whether the host should
/// suppress its own default handling of the event.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub intent: Option<Intent>,
    pub suppress_default: bool,
}

impl Dispatch {
    pub fn none() -> Self {
        Self {
            intent: None,
            suppress_default: false,
        }
    }

    pub fn of(intent: Intent) -> Self {
        Self {
            intent: Some(intent),
            suppress_default: false,
        }
    }

    pub fn suppressing(intent: Intent) -> Self {
        Self {
            intent: Some(intent),
            suppress_default: true,
        }
    }
}

/// Notifications delivered synchronously to registered observers.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// An item was committed.
    Select { item: ResultItem, index: usize },
    /// A previously committed item was replaced or cleared. Always fires
    /// before the `Select` that replaces it.
    Deselect { item: ResultItem, index: usize },
    /// Focus moved onto an item via keyboard or hover.
    FocusItem { item: ResultItem },
    /// A lookup completed with nothing to list.
    NoItemToList,
}
