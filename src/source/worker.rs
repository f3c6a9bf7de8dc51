//! Remote Lookup Worker Thread
//!
//! Runs HTTP fetches off the UI thread. Receives requests over a channel,
//! performs the GET with streaming and cancellation, parses the body into
//! records, and sends replies back tagged with the request's token.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, Sender};

use bytes::BytesMut;
use futures::StreamExt;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::types::{RequestToken, SourceError};

/// One fetch handed to the worker. Parameters are already resolved; any
/// dynamic parameters are evaluated on the UI thread at send time.
#[derive(Debug)]
pub(crate) struct FetchRequest {
    pub url: String,
    pub params: Vec<(String, String)>,
    pub token: RequestToken,
    pub cancel_token: CancellationToken,
}

/// Worker reply carrying raw records; mapping to result items happens on
/// the UI thread where the field configuration lives.
#[derive(Debug)]
pub(crate) enum FetchReply {
    Success {
        token: RequestToken,
        records: Vec<Value>,
    },
    Failure {
        token: RequestToken,
        error: SourceError,
    },
    Cancelled {
        token: RequestToken,
    },
}

impl FetchReply {
    pub fn token(&self) -> RequestToken {
        match self {
            FetchReply::Success { token, .. }
            | FetchReply::Failure { token, .. }
            | FetchReply::Cancelled { token } => *token,
        }
    }
}

/// Spawn the fetch worker thread.
///
/// The thread owns a current-thread tokio runtime and processes requests
/// until the channel closes. Panics are caught and reported as a failure
/// with token 0 so a crash cannot corrupt the TUI with stray stderr output.
pub(crate) fn spawn_worker(request_rx: Receiver<FetchRequest>, reply_tx: Sender<FetchReply>) {
    std::thread::spawn(move || {
        let reply_tx_clone = reply_tx.clone();
        let prev_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let panic_msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic in fetch worker".to_string()
            };

            log::error!(
                "Fetch worker panic: {} at {:?}",
                panic_msg,
                panic_info.location()
            );

            let _ = reply_tx_clone.send(FetchReply::Failure {
                token: RequestToken(0),
                error: SourceError::Transport(format!("fetch worker crashed: {panic_msg}")),
            });
        }));

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to create tokio runtime");

            rt.block_on(worker_loop(request_rx, reply_tx));
        }));

        panic::set_hook(prev_hook);

        if result.is_err() {
            log::error!("Fetch worker thread terminated by panic");
        }
    });
}

async fn worker_loop(request_rx: Receiver<FetchRequest>, reply_tx: Sender<FetchReply>) {
    let client = reqwest::Client::new();

    // Blocking recv is fine here, the thread exists for this loop
    while let Ok(request) = request_rx.recv() {
        log::debug!(
            "Worker handling request {} for {}",
            request.token.0,
            request.url
        );
        let reply = handle_request(&client, request).await;
        if reply_tx.send(reply).is_err() {
            break;
        }
    }

    log::debug!("Fetch worker shutting down");
}

async fn handle_request(client: &reqwest::Client, request: FetchRequest) -> FetchReply {
    let token = request.token;

    if request.cancel_token.is_cancelled() {
        return FetchReply::Cancelled { token };
    }

    match fetch_records(client, &request).await {
        Ok(Some(records)) => FetchReply::Success { token, records },
        Ok(None) => FetchReply::Cancelled { token },
        Err(error) => FetchReply::Failure { token, error },
    }
}

/// Perform the GET and stream the body, checking cancellation between
/// chunks. Ok(None) means the request was cancelled mid-flight.
async fn fetch_records(
    client: &reqwest::Client,
    request: &FetchRequest,
) -> Result<Option<Vec<Value>>, SourceError> {
    let response = tokio::select! {
        biased;

        _ = request.cancel_token.cancelled() => return Ok(None),
        result = client.get(&request.url).query(&request.params).send() => {
            result.map_err(|e| SourceError::Transport(e.to_string()))?
        }
    };

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }

    let mut stream = response.bytes_stream();
    let mut body = BytesMut::new();

    loop {
        tokio::select! {
            biased;

            _ = request.cancel_token.cancelled() => {
                log::debug!("Request {} cancelled mid-stream", request.token.0);
                return Ok(None);
            }
            chunk = stream.next() => {
                match chunk {
                    Some(Ok(bytes)) => body.extend_from_slice(&bytes),
                    Some(Err(e)) => return Err(SourceError::Transport(e.to_string())),
                    None => break,
                }
            }
        }
    }

    parse_records(&body).map(Some)
}

/// Accept either a bare JSON array of records or an object wrapping one in
/// an "items" field.
pub(crate) fn parse_records(body: &[u8]) -> Result<Vec<Value>, SourceError> {
    let parsed: Value =
        serde_json::from_slice(body).map_err(|e| SourceError::InvalidBody(e.to_string()))?;

    match parsed {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(SourceError::InvalidBody(
                "expected an array of records or an object with an items array".to_string(),
            )),
        },
        _ => Err(SourceError::InvalidBody(
            "expected an array of records".to_string(),
        )),
    }
}
