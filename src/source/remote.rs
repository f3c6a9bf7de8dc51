//! HTTP-backed data source.

use std::fmt;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::DataSource;
use super::record;
use super::types::{FetchOutcome, Query, RequestToken, ResultItem, SourceError};
use super::worker::{FetchReply, FetchRequest, spawn_worker};

/// How long the attach-time seed lookup may block before giving up.
const SEED_TIMEOUT: Duration = Duration::from_secs(5);

/// Reserved token for the blocking seed round trip.
const SEED_TOKEN: RequestToken = RequestToken(u64::MAX);

/// A request parameter: fixed at construction, or evaluated when each
/// request is sent (for values that track other UI state).
pub enum ParamValue {
    Static(String),
    Dynamic(Box<dyn Fn() -> String>),
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Static(value) => f.debug_tuple("Static").field(value).finish(),
            ParamValue::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Data source that fetches suggestions from an HTTP endpoint.
///
/// Fetches run on a dedicated worker thread; the UI thread polls for
/// replies. Cancelling stops the in-flight request at the next chunk
/// boundary of its body stream.
pub struct RemoteSource {
    url: String,
    query_var: String,
    params: Vec<(String, ParamValue)>,
    limit: Option<usize>,
    field_pointer: String,
    value_pointer: Option<String>,
    mapper: Option<Box<dyn Fn(&[Value]) -> Vec<ResultItem>>>,
    signature: String,
    request_tx: Option<Sender<FetchRequest>>,
    reply_rx: Option<Receiver<FetchReply>>,
    in_flight: Option<(RequestToken, CancellationToken)>,
    ready_failure: Option<FetchOutcome>,
}

impl fmt::Debug for RemoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSource")
            .field("url", &self.url)
            .field("query_var", &self.query_var)
            .finish_non_exhaustive()
    }
}

impl RemoteSource {
    /// Build a source for `url`, extracting display text from the dotted
    /// `field` path of each response record. Spawns the worker thread.
    pub fn new(url: &str, field: &str) -> Self {
        let (request_tx, request_rx) = channel();
        let (reply_tx, reply_rx) = channel();
        spawn_worker(request_rx, reply_tx);

        Self {
            url: url.to_string(),
            query_var: "q".to_string(),
            params: Vec::new(),
            limit: None,
            field_pointer: record::pointer_from_dotted(field),
            value_pointer: None,
            mapper: None,
            signature: format!("remote:{url}"),
            request_tx: Some(request_tx),
            reply_rx: Some(reply_rx),
            in_flight: None,
            ready_failure: None,
        }
    }

    /// Name of the query parameter carrying the typed text (default "q").
    pub fn with_query_var(mut self, name: &str) -> Self {
        self.query_var = name.to_string();
        self
    }

    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params
            .push((name.to_string(), ParamValue::Static(value.to_string())));
        self
    }

    /// Parameter whose value is computed when each request is sent.
    pub fn with_dynamic_param(mut self, name: &str, value: impl Fn() -> String + 'static) -> Self {
        self.params
            .push((name.to_string(), ParamValue::Dynamic(Box::new(value))));
        self
    }

    /// Ask the endpoint to cap the number of returned records via a
    /// "limit" parameter.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Dotted path of the machine value committed alongside the display
    /// text.
    pub fn with_value_field(mut self, path: &str) -> Self {
        self.value_pointer = Some(record::pointer_from_dotted(path));
        self
    }

    /// Replace the default record mapping with a caller-supplied one.
    pub fn with_mapper(mut self, mapper: impl Fn(&[Value]) -> Vec<ResultItem> + 'static) -> Self {
        self.mapper = Some(Box::new(mapper));
        self
    }

    fn resolved_params(&self, text: &str) -> Vec<(String, String)> {
        let mut params = vec![(self.query_var.clone(), text.to_string())];
        for (name, value) in &self.params {
            let resolved = match value {
                ParamValue::Static(fixed) => fixed.clone(),
                ParamValue::Dynamic(compute) => compute(),
            };
            params.push((name.clone(), resolved));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    fn map_records(&self, records: &[Value]) -> Vec<ResultItem> {
        match &self.mapper {
            Some(mapper) => mapper(records),
            None => record::items_from_records(
                records,
                &self.field_pointer,
                self.value_pointer.as_deref(),
            ),
        }
    }

    fn send_request(&mut self, text: &str, token: RequestToken, cancel: CancellationToken) -> bool {
        let Some(tx) = &self.request_tx else {
            return false;
        };
        let request = FetchRequest {
            url: self.url.clone(),
            params: self.resolved_params(text),
            token,
            cancel_token: cancel,
        };
        if tx.send(request).is_err() {
            log::error!("Fetch worker gone, dropping request {}", token.0);
            self.request_tx = None;
            return false;
        }
        true
    }

    fn reply_to_outcome(&self, reply: FetchReply) -> FetchOutcome {
        match reply {
            FetchReply::Success { token, records } => FetchOutcome::Success {
                token,
                items: self.map_records(&records),
            },
            FetchReply::Failure { token, error } => FetchOutcome::Failure { token, error },
            FetchReply::Cancelled { token } => FetchOutcome::Cancelled { token },
        }
    }
}

impl DataSource for RemoteSource {
    fn signature(&self) -> &str {
        &self.signature
    }

    fn begin_fetch(&mut self, query: &Query, token: RequestToken) {
        self.cancel();

        let cancel = CancellationToken::new();
        if self.send_request(query.text(), token, cancel.clone()) {
            self.in_flight = Some((token, cancel));
        } else {
            self.ready_failure = Some(FetchOutcome::Failure {
                token,
                error: SourceError::WorkerGone,
            });
        }
    }

    fn poll(&mut self) -> Option<FetchOutcome> {
        if let Some(outcome) = self.ready_failure.take() {
            return Some(outcome);
        }

        // Take the receiver out so mapping a reply can borrow self freely
        let rx = self.reply_rx.take()?;

        let outcome = match rx.try_recv() {
            Ok(reply) => {
                let mapped = self.reply_to_outcome(reply);
                if self
                    .in_flight
                    .as_ref()
                    .is_some_and(|(token, _)| *token == mapped.token())
                {
                    self.in_flight = None;
                }
                Some(mapped)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::error!("Fetch worker disconnected");
                self.request_tx = None;
                // The receiver is dead; surface the loss once for the
                // request that will never complete
                return self
                    .in_flight
                    .take()
                    .map(|(token, _)| FetchOutcome::Failure {
                        token,
                        error: SourceError::WorkerGone,
                    });
            }
        };

        self.reply_rx = Some(rx);
        outcome
    }

    fn cancel(&mut self) {
        if let Some((token, cancel)) = self.in_flight.take() {
            cancel.cancel();
            log::debug!("Cancelled request {}", token.0);
        }
    }

    fn seed(&mut self, text: &str) -> Result<Vec<ResultItem>, SourceError> {
        if !self.send_request(text, SEED_TOKEN, CancellationToken::new()) {
            return Err(SourceError::WorkerGone);
        }

        let rx = self.reply_rx.as_ref().ok_or(SourceError::WorkerGone)?;
        let deadline = Instant::now() + SEED_TIMEOUT;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(SourceError::Transport("seed lookup timed out".to_string()));
            }
            match rx.recv_timeout(remaining) {
                Ok(reply) if reply.token() == SEED_TOKEN => {
                    return match reply {
                        FetchReply::Success { records, .. } => Ok(self.map_records(&records)),
                        FetchReply::Failure { error, .. } => Err(error),
                        FetchReply::Cancelled { .. } => {
                            Err(SourceError::Transport("seed lookup cancelled".to_string()))
                        }
                    };
                }
                Ok(stale) => {
                    log::debug!("Dropping stale reply {} during seed", stale.token().0);
                }
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                    return Err(SourceError::Transport("seed lookup timed out".to_string()));
                }
                Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                    return Err(SourceError::WorkerGone);
                }
            }
        }
    }
}
