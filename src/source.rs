mod record;
pub mod remote;
pub mod static_source;
pub mod types;
mod worker;

// Re-export public types
pub use remote::{ParamValue, RemoteSource};
pub use static_source::{MatchMode, StaticSource};
pub use types::{FetchOutcome, Query, RequestToken, ResultItem, ResultSet, SourceError};

/// Contract between the controller and whatever produces its candidates.
///
/// Every variant funnels through the same begin/poll/cancel lifecycle; an
/// in-memory source simply completes on the next poll. That keeps the
/// controller to a single fetch path.
pub trait DataSource {
    /// Stable identity of the backing dataset, mixed into cache keys so
    /// the same text against different datasets is never confused.
    fn signature(&self) -> &str;

    /// Start a lookup for `query`, superseding any fetch still in flight.
    fn begin_fetch(&mut self, query: &Query, token: RequestToken);

    /// Non-blocking check for a finished lookup.
    fn poll(&mut self) -> Option<FetchOutcome>;

    /// Best-effort abort of the in-flight lookup; no-op when idle.
    fn cancel(&mut self);

    /// Blocking exact-match lookup used once, at attach time, to resolve a
    /// pre-filled field value into a committed selection.
    fn seed(&mut self, text: &str) -> Result<Vec<ResultItem>, SourceError>;
}
