//! Row markup for the suggestion list.
//!
//! Markup is produced once per result set, when a lookup completes, and is
//! cached with the set so a cache hit re-renders without re-formatting.

use std::fmt;

use crate::source::types::ResultItem;

/// Alternating stripe applied to rows by rank. The first row is odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTone {
    Odd,
    Even,
}

impl RowTone {
    pub fn for_rank(rank: usize) -> Self {
        if rank % 2 == 0 {
            RowTone::Odd
        } else {
            RowTone::Even
        }
    }
}

/// Pre-formatted content for one list row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMarkup {
    title: String,
    content: String,
    tone: RowTone,
}

impl RowMarkup {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tone: RowTone) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tone,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tone(&self) -> RowTone {
        self.tone
    }
}

/// Formatting hooks applied to each item when a result set is built.
///
/// Both closures receive the typed text that produced the set and the item
/// being rendered. The default title is the item's display text; the
/// default content mirrors the title.
pub struct RowFormatter {
    title: Option<Box<dyn Fn(&str, &ResultItem) -> String>>,
    content: Option<Box<dyn Fn(&str, &ResultItem) -> String>>,
}

impl fmt::Debug for RowFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowFormatter").finish_non_exhaustive()
    }
}

impl Default for RowFormatter {
    fn default() -> Self {
        Self {
            title: None,
            content: None,
        }
    }
}

impl RowFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, format: impl Fn(&str, &ResultItem) -> String + 'static) -> Self {
        self.title = Some(Box::new(format));
        self
    }

    pub fn with_content(mut self, format: impl Fn(&str, &ResultItem) -> String + 'static) -> Self {
        self.content = Some(Box::new(format));
        self
    }

    /// Render every item of a completed lookup into row markup.
    pub fn build_rows(&self, typed_text: &str, items: &[ResultItem]) -> Vec<RowMarkup> {
        items
            .iter()
            .map(|item| {
                let title = match &self.title {
                    Some(format) => format(typed_text, item),
                    None => item.display_text().to_string(),
                };
                let content = match &self.content {
                    Some(format) => format(typed_text, item),
                    None => title.clone(),
                };
                RowMarkup::new(title, content, RowTone::for_rank(item.rank()))
            })
            .collect()
    }
}
