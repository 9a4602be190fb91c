use crate::domain::model::{CreateBatchResponse, SubmitOutcome};
use crate::utils::error::{ImportError, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Upper bound for the `batch_size` sent to the worker-trigger endpoint.
pub const WORKER_BATCH_CAP: u64 = 50;

const EXCERPT_LIMIT: usize = 200;

pub fn worker_batch_size(added: u64) -> u64 {
    added.min(WORKER_BATCH_CAP)
}

/// First part of a response body, for error diagnostics.
pub fn excerpt(body: &str) -> String {
    let mut out: String = body.chars().take(EXCERPT_LIMIT).collect();
    if out.len() < body.len() {
        out.push('…');
    }
    out
}

/// Decodes a backend JSON response, keeping the three failure kinds
/// distinguishable: non-2xx status and HTML-instead-of-JSON are server
/// errors, an unparseable body is a malformed response. Transport failures
/// never reach this point.
pub fn decode_json_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        return Err(ImportError::ServerError {
            message: format!("HTTP {}: {}", status.as_u16(), excerpt(body)),
        });
    }
    if body.trim_start().starts_with('<') {
        return Err(ImportError::ServerError {
            message: format!("expected JSON but received HTML: {}", excerpt(body)),
        });
    }
    serde_json::from_str(body).map_err(|e| ImportError::MalformedResponse {
        message: format!("{}: {}", e, excerpt(body)),
    })
}

/// Folds the backend's create-batch answer into an outcome, surfacing its
/// `error`/`hint` when it reports failure inside a 2xx response.
pub fn outcome_from_response(response: CreateBatchResponse) -> Result<SubmitOutcome> {
    if !response.success {
        let mut message = response
            .error
            .unwrap_or_else(|| "backend reported failure without a message".to_string());
        if let Some(hint) = response.hint {
            message = format!("{} (hint: {})", message, hint);
        }
        return Err(ImportError::ServerError { message });
    }
    Ok(SubmitOutcome {
        added: response.added.unwrap_or(0),
        duplicates: response.duplicates.unwrap_or(0),
        invalid: response.invalid.unwrap_or(0),
        worker_triggered: response.worker_triggered.unwrap_or(false),
    })
}
