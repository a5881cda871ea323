//! Testing utilities including mock implementations.
//!
//! Useful for testing applications that use the curation library
//! without making real model calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{CurationError, Result};
use crate::traits::inference::Inference;

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Failure(String),
}

/// Record of one call made to the mock.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
}

/// A mock inference backend for testing.
///
/// Replies are scripted in order; each call consumes the next entry.
/// Calls beyond the script fail, which keeps tests honest about how
/// many model calls a code path makes.
#[derive(Default)]
pub struct MockInference {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockInference {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scripted reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Reply(reply.into()));
        self
    }

    /// Append a scripted reply serialized from a JSON value.
    pub fn with_reply_json(self, value: serde_json::Value) -> Self {
        self.with_reply(value.to_string())
    }

    /// Append a scripted failure.
    pub fn with_failure(self, reason: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Failure(reason.into()));
        self
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Inference for MockInference {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            user: user.to_string(),
        });

        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Reply(text)) => Ok(text),
            Some(Scripted::Failure(reason)) => Err(CurationError::Inference(reason.into())),
            None => Err(CurationError::Inference("mock script exhausted".into())),
        }
    }
}
