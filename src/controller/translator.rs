//! Translation of raw field events into semantic intents.

use crate::selection::Direction;

use super::intents::{Dispatch, FieldEvent, InputKey, Intent};

/// Clicks on the focused field needed to reopen a closed list.
const CLICK_OPEN_THRESHOLD: u8 = 2;

/// Turns raw field events into intents.
///
/// Keeps the last text it observed so no-op keystrokes (modifiers, caret
/// movement, edits that leave the value unchanged) never re-trigger a
/// lookup, and counts clicks toward the double-click-to-open gesture.
#[derive(Debug)]
pub struct IntentTranslator {
    last_observed: String,
    click_count: u8,
    select_on_tab: bool,
}

impl IntentTranslator {
    pub fn new(select_on_tab: bool) -> Self {
        Self {
            last_observed: String::new(),
            click_count: 0,
            select_on_tab,
        }
    }

    /// Align the change detector with text the widget itself wrote, so a
    /// programmatic write is not mistaken for typing.
    pub fn sync_observed(&mut self, text: &str) {
        self.last_observed = text.to_string();
    }

    pub fn translate(&mut self, event: &FieldEvent, list_showing: bool) -> Dispatch {
        match event {
            FieldEvent::KeyInput { key, text_after } => {
                self.translate_key(*key, text_after, list_showing)
            }
            FieldEvent::Paste { text_after } => {
                if self.changed(text_after) {
                    Dispatch::of(Intent::PasteChanged(text_after.clone()))
                } else {
                    Dispatch::none()
                }
            }
            FieldEvent::Focus => Dispatch::of(Intent::Activate),
            FieldEvent::Blur => {
                self.click_count = 0;
                Dispatch::of(Intent::Deactivate)
            }
            FieldEvent::Click => {
                self.click_count += 1;
                if self.click_count >= CLICK_OPEN_THRESHOLD {
                    self.click_count = 0;
                    if !list_showing {
                        return Dispatch::of(Intent::OpenList);
                    }
                }
                Dispatch::none()
            }
        }
    }

    fn translate_key(&mut self, key: InputKey, text_after: &str, list_showing: bool) -> Dispatch {
        match key {
            InputKey::Up => Dispatch::suppressing(Self::navigation(Direction::Up, list_showing)),
            InputKey::Down => {
                Dispatch::suppressing(Self::navigation(Direction::Down, list_showing))
            }
            InputKey::Enter => {
                if list_showing {
                    Dispatch::suppressing(Intent::Commit)
                } else {
                    Dispatch::none()
                }
            }
            InputKey::Tab => {
                // Tab is never consumed: focus must still move on
                if self.select_on_tab {
                    Dispatch::of(Intent::Commit)
                } else {
                    Dispatch::none()
                }
            }
            InputKey::Escape => {
                self.click_count = 0;
                Dispatch {
                    intent: Some(Intent::Dismiss),
                    suppress_default: list_showing,
                }
            }
            // Caret movement and bare modifiers cannot change the text
            InputKey::Left
            | InputKey::Right
            | InputKey::Shift
            | InputKey::Control
            | InputKey::Alt
            | InputKey::Meta => Dispatch::none(),
            InputKey::Char(_) | InputKey::Backspace | InputKey::Delete | InputKey::Other => {
                if self.changed(text_after) {
                    Dispatch::of(Intent::QueryChanged(text_after.to_string()))
                } else {
                    Dispatch::none()
                }
            }
        }
    }

    fn navigation(direction: Direction, list_showing: bool) -> Intent {
        if list_showing {
            Intent::Navigate(direction)
        } else {
            Intent::OpenThenNavigate(direction)
        }
    }

    fn changed(&mut self, text_after: &str) -> bool {
        if text_after == self.last_observed {
            return false;
        }
        self.last_observed = text_after.to_string();
        true
    }
}

#[cfg(test)]
#[path = "translator_tests.rs"]
mod translator_tests;
