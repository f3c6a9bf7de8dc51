//! In-memory data source over a fixed record list.

use std::fmt;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use memchr::memmem;
use serde::Deserialize;
use serde_json::Value;

use super::DataSource;
use super::record;
use super::types::{FetchOutcome, Query, RequestToken, ResultItem, SourceError};

/// How the static source matches typed text against a record's field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive substring match.
    #[default]
    Contains,
    /// Case-insensitive prefix match.
    Prefix,
    /// Fuzzy subsequence match, best scores first.
    Fuzzy,
}

/// Data source filtering an in-memory record list.
///
/// Lookups complete on the next poll, so the fetch lifecycle is identical
/// to the remote source's and the controller has no second code path.
pub struct StaticSource {
    records: Vec<Value>,
    field_pointer: String,
    value_pointer: Option<String>,
    mode: MatchMode,
    predicate: Option<Box<dyn Fn(&str, &Value) -> bool>>,
    matcher: SkimMatcherV2,
    signature: String,
    ready: Option<FetchOutcome>,
}

impl fmt::Debug for StaticSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticSource")
            .field("records", &self.records.len())
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl StaticSource {
    /// Build a source over `records`, matching on the dotted `field` path.
    pub fn new(records: Vec<Value>, field: &str) -> Self {
        let signature = format!(
            "static:{}",
            serde_json::to_string(&records).unwrap_or_default()
        );
        Self {
            records,
            field_pointer: record::pointer_from_dotted(field),
            value_pointer: None,
            mode: MatchMode::Contains,
            predicate: None,
            matcher: SkimMatcherV2::default(),
            signature,
            ready: None,
        }
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Dotted path of the machine value committed alongside the display
    /// text.
    pub fn with_value_field(mut self, path: &str) -> Self {
        self.value_pointer = Some(record::pointer_from_dotted(path));
        self
    }

    /// Replace the built-in matching with a caller-supplied predicate over
    /// the typed text and the raw record.
    pub fn with_predicate(mut self, predicate: impl Fn(&str, &Value) -> bool + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    fn matching_items(&self, text: &str) -> Vec<ResultItem> {
        if let Some(predicate) = &self.predicate {
            let selected: Vec<&Value> = self
                .records
                .iter()
                .filter(|record| predicate(text, record))
                .collect();
            return record::items_from_records(
                selected,
                &self.field_pointer,
                self.value_pointer.as_deref(),
            );
        }

        match self.mode {
            MatchMode::Contains => {
                let needle = text.to_lowercase();
                let finder = memmem::Finder::new(needle.as_bytes());
                // An empty needle matches everything, matching the find
                // semantics of substring search
                self.ranked(|display| finder.find(display.to_lowercase().as_bytes()).is_some())
            }
            MatchMode::Prefix => {
                let needle = text.to_lowercase();
                self.ranked(|display| display.to_lowercase().starts_with(&needle))
            }
            MatchMode::Fuzzy => self.fuzzy_ranked(text),
        }
    }

    /// Filter in dataset order and rank survivors contiguously.
    fn ranked(&self, keep: impl Fn(&str) -> bool) -> Vec<ResultItem> {
        self.records
            .iter()
            .filter_map(|rec| {
                let display = record::display_text_at(rec, &self.field_pointer)?;
                if !keep(&display) {
                    return None;
                }
                let value =
                    record::machine_value_at(rec, self.value_pointer.as_deref(), &display);
                Some((display, value))
            })
            .enumerate()
            .map(|(rank, (display, value))| ResultItem::new(display, value, rank))
            .collect()
    }

    fn fuzzy_ranked(&self, text: &str) -> Vec<ResultItem> {
        let mut scored: Vec<(i64, String, Value)> = self
            .records
            .iter()
            .filter_map(|rec| {
                let display = record::display_text_at(rec, &self.field_pointer)?;
                let score = if text.is_empty() {
                    0
                } else {
                    self.matcher.fuzzy_match(&display, text)?
                };
                let value =
                    record::machine_value_at(rec, self.value_pointer.as_deref(), &display);
                Some((score, display, value))
            })
            .collect();

        // Stable sort keeps dataset order among equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .enumerate()
            .map(|(rank, (_, display, value))| ResultItem::new(display, value, rank))
            .collect()
    }
}

impl DataSource for StaticSource {
    fn signature(&self) -> &str {
        &self.signature
    }

    fn begin_fetch(&mut self, query: &Query, token: RequestToken) {
        let items = self.matching_items(query.text());
        self.ready = Some(FetchOutcome::Success { token, items });
    }

    fn poll(&mut self) -> Option<FetchOutcome> {
        self.ready.take()
    }

    fn cancel(&mut self) {
        self.ready = None;
    }

    fn seed(&mut self, text: &str) -> Result<Vec<ResultItem>, SourceError> {
        let needle = text.to_lowercase();
        Ok(self.ranked(|display| display.to_lowercase() == needle))
    }
}

#[cfg(test)]
#[path = "static_source_tests.rs"]
mod static_source_tests;
