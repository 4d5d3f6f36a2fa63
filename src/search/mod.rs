//! Offloaded fuzzy search.
//!
//! Search never runs on the interactive thread: the caller projects the
//! searchable fields of whatever it is searching (cards, boards, ...) into a
//! flat request and ships it to a background worker task over a
//! request/response channel. The channel is a serialization boundary: JSON
//! strings cross it, each tagged with a correlation id so in-flight requests
//! may overlap freely.

pub mod matcher;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use worker::{SearchHandle, SearchWorker};

/// One searchable entity, projected down to the fields that matter for
/// matching. Callers keep the payload small by projecting only these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDoc {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub data: Vec<SearchDoc>,
}

/// A ranked match. Lower score is better; 0 is an exact match. Responses
/// arrive already sorted ascending by score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub score: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search worker is no longer running")]
    WorkerGone,

    #[error("search protocol encoding failed: {0}")]
    Codec(#[from] serde_json::Error),
}
