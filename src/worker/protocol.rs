//! Wire messages exchanged with the search worker.
//!
//! Messages are JSON objects tagged by `type` with SCREAMING_SNAKE_CASE names
//! and camelCase fields. Every message carries a numeric `id`; a response
//! reuses the id of the request it answers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::index::document::Document;
use crate::index::inverted::IndexStats;
use crate::search::result::SearchResult;
use crate::streaming::{StreamBatch, StreamSummary};

pub const DEFAULT_MAX_RESULTS: usize = 50;
pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 10;

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_max_suggestions() -> usize {
    DEFAULT_MAX_SUGGESTIONS
}

/// Requests accepted by the worker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerRequest {
    BuildIndex {
        documents: Vec<Document>,
    },
    #[serde(rename_all = "camelCase")]
    Search {
        query: String,
        #[serde(default = "default_max_results")]
        max_results: usize,
    },
    /// Scan `documents`, or the documents of the last build when absent.
    #[serde(rename_all = "camelCase")]
    SearchStreaming {
        query: String,
        #[serde(default = "default_batch_size")]
        batch_size: usize,
        #[serde(default)]
        documents: Option<Vec<Document>>,
    },
    GetSuggestions {
        prefix: String,
        #[serde(default = "default_max_suggestions")]
        max: usize,
    },
    GetStats,
    ClearIndex,
}

/// Every request `type` the worker understands.
pub const REQUEST_TYPES: &[&str] = &[
    "BUILD_INDEX",
    "SEARCH",
    "SEARCH_STREAMING",
    "GET_SUGGESTIONS",
    "GET_STATS",
    "CLEAR_INDEX",
];

/// Error categories reported in `ERROR` responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UnknownMessageType,
    MalformedMessage,
    Cancelled,
    Internal,
}

/// Responses produced by the worker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerResponse {
    IndexBuilt {
        stats: IndexStats,
    },
    #[serde(rename_all = "camelCase")]
    SearchResults {
        results: Vec<SearchResult>,
        search_time_ms: f64,
    },
    #[serde(rename_all = "camelCase")]
    SearchBatch {
        results: Vec<SearchResult>,
        processed: usize,
        total: usize,
        percentage: f64,
        is_final: bool,
    },
    #[serde(rename_all = "camelCase")]
    SearchComplete {
        total_found: usize,
        scanned: usize,
        search_time_ms: f64,
    },
    Suggestions {
        suggestions: Vec<String>,
    },
    Stats {
        stats: IndexStats,
    },
    IndexCleared,
    Error {
        code: ErrorCode,
        message: String,
    },
}

impl WorkerResponse {
    pub fn error<S: Into<String>>(code: ErrorCode, message: S) -> Self {
        WorkerResponse::Error {
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, WorkerResponse::Error { .. })
    }
}

impl From<StreamBatch> for WorkerResponse {
    fn from(batch: StreamBatch) -> Self {
        WorkerResponse::SearchBatch {
            results: batch.results,
            processed: batch.processed,
            total: batch.total,
            percentage: batch.percentage,
            is_final: batch.is_final,
        }
    }
}

impl From<StreamSummary> for WorkerResponse {
    fn from(summary: StreamSummary) -> Self {
        WorkerResponse::SearchComplete {
            total_found: summary.total_found,
            scanned: summary.scanned,
            search_time_ms: summary.elapsed.as_secs_f64() * 1000.0,
        }
    }
}

/// A request with its correlation id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub id: u64,
    #[serde(flatten)]
    pub request: WorkerRequest,
}

/// A response with the id of the request it answers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub id: u64,
    #[serde(flatten)]
    pub response: WorkerResponse,
}

impl ResponseEnvelope {
    pub fn new(id: u64, response: WorkerResponse) -> Self {
        ResponseEnvelope { id, response }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Why an incoming message could not be decoded. Carries the response to
/// send back.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{code:?}: {message}")]
pub struct DecodeError {
    pub id: u64,
    pub code: ErrorCode,
    pub message: String,
}

impl DecodeError {
    pub fn into_response(self) -> ResponseEnvelope {
        ResponseEnvelope::new(self.id, WorkerResponse::error(self.code, self.message))
    }
}

impl RequestEnvelope {
    pub fn new(id: u64, request: WorkerRequest) -> Self {
        RequestEnvelope { id, request }
    }

    /// Decode a request, distinguishing unknown message types from malformed
    /// payloads of a known type.
    pub fn from_json(text: &str) -> std::result::Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(text).map_err(|e| DecodeError {
            id: 0,
            code: ErrorCode::MalformedMessage,
            message: format!("invalid JSON: {e}"),
        })?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> std::result::Result<Self, DecodeError> {
        let id = value.get("id").and_then(Value::as_u64).unwrap_or(0);
        let kind = match value.get("type").and_then(Value::as_str) {
            Some(kind) => kind.to_string(),
            None => {
                return Err(DecodeError {
                    id,
                    code: ErrorCode::MalformedMessage,
                    message: "message has no string `type` field".to_string(),
                });
            }
        };

        if !REQUEST_TYPES.contains(&kind.as_str()) {
            return Err(DecodeError {
                id,
                code: ErrorCode::UnknownMessageType,
                message: format!("unknown message type: {kind}"),
            });
        }

        let mut value = value;
        if let Some(object) = value.as_object_mut() {
            object.entry("id").or_insert(Value::from(id));
        }
        serde_json::from_value(value).map_err(|e| DecodeError {
            id,
            code: ErrorCode::MalformedMessage,
            message: format!("malformed {kind} message: {e}"),
        })
    }
}
