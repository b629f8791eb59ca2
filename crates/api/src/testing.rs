//! In-memory gateway double.
//!
//! [`ScriptedApi`] replays queued responses in order and records every call,
//! so tests can assert both what a composite operation returned and which
//! upstream requests it made.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use comicvine_util::QueryParams;
use serde_json::Value;

use crate::{ApiError, ComicVineApi};

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub path: String,
    pub params: QueryParams,
}

impl RecordedCall {
    /// Parameter value rendered as it would appear in the query string.
    pub fn param(&self, key: &str) -> Option<String> {
        self.params.get(key).map(|value| value.as_query_string())
    }
}

#[derive(Debug, Default)]
pub struct ScriptedApi {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful JSON response.
    pub fn respond(self, payload: Value) -> Self {
        self.push(Ok(payload));
        self
    }

    /// Queues a failure.
    pub fn fail(self, error: ApiError) -> Self {
        self.push(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(&self, response: Result<Value, ApiError>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }
}

#[async_trait]
impl ComicVineApi for ScriptedApi {
    async fn get(&self, path: &str, params: &QueryParams) -> Result<Value, ApiError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                path: path.to_string(),
                params: params.clone(),
            });
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(ApiError::Upstream {
                    status: 500,
                    body: format!("no scripted response for {path}"),
                })
            })
    }
}
