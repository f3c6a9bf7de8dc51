//! Core data types shared between the controller, the cache, and the
//! data sources.

use serde_json::Value;
use thiserror::Error;

use crate::surface::RowMarkup;

/// One lookup request: the typed text plus the identity of the dataset it
/// runs against. Both parts participate in equality so the same text typed
/// against two different datasets never collides in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    text: String,
    dataset_signature: String,
}

impl Query {
    pub fn new(text: impl Into<String>, dataset_signature: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            dataset_signature: dataset_signature.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn dataset_signature(&self) -> &str {
        &self.dataset_signature
    }
}

/// A single candidate produced by a data source.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    display_text: String,
    value: Value,
    rank: usize,
}

impl ResultItem {
    pub fn new(display_text: impl Into<String>, value: Value, rank: usize) -> Self {
        Self {
            display_text: display_text.into(),
            value,
            rank,
        }
    }

    /// Human-readable text written into the field on commit.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Machine value handed to the commit sink; may differ from the
    /// display text.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Zero-based position within the set that produced this item.
    pub fn rank(&self) -> usize {
        self.rank
    }
}

/// The ordered outcome of one completed lookup, with its row markup built
/// once and stored alongside the items so a cache hit re-renders without
/// re-formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    items: Vec<ResultItem>,
    rows: Vec<RowMarkup>,
}

impl ResultSet {
    pub fn new(items: Vec<ResultItem>, rows: Vec<RowMarkup>) -> Self {
        Self { items, rows }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    pub fn rows(&self) -> &[RowMarkup] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Handle identifying one in-flight fetch. Completions carrying a token
/// that is no longer live are discarded. Token 0 is reserved for
/// worker-level failures that cannot be tied to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(pub u64);

/// Completion of a fetch started with `begin_fetch`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The lookup finished. Zero items is a valid outcome, not an error.
    Success {
        token: RequestToken,
        items: Vec<ResultItem>,
    },
    /// Transport or parse failure. Rendered the same as zero items.
    Failure {
        token: RequestToken,
        error: SourceError,
    },
    /// The lookup was cancelled before it finished.
    Cancelled { token: RequestToken },
}

impl FetchOutcome {
    pub fn token(&self) -> RequestToken {
        match self {
            FetchOutcome::Success { token, .. }
            | FetchOutcome::Failure { token, .. }
            | FetchOutcome::Cancelled { token } => *token,
        }
    }
}

/// Errors surfaced by data sources.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    InvalidBody(String),

    #[error("lookup worker disconnected")]
    WorkerGone,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_equality_includes_dataset_signature() {
        let a = Query::new("apple", "static:1");
        let b = Query::new("apple", "static:2");
        let c = Query::new("apple", "static:1");

        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_fetch_outcome_exposes_token() {
        let success = FetchOutcome::Success {
            token: RequestToken(3),
            items: vec![],
        };
        let failure = FetchOutcome::Failure {
            token: RequestToken(4),
            error: SourceError::WorkerGone,
        };
        let cancelled = FetchOutcome::Cancelled {
            token: RequestToken(5),
        };

        assert_eq!(success.token(), RequestToken(3));
        assert_eq!(failure.token(), RequestToken(4));
        assert_eq!(cancelled.token(), RequestToken(5));
    }

    #[test]
    fn test_empty_result_set() {
        let set = ResultSet::empty();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert!(set.rows().is_empty());
    }

    #[test]
    fn test_result_item_accessors() {
        let item = ResultItem::new("Apple", json!({"id": 1}), 0);
        assert_eq!(item.display_text(), "Apple");
        assert_eq!(item.value(), &json!({"id": 1}));
        assert_eq!(item.rank(), 0);
    }
}
