//! Testing utilities including a mock AI implementation.
//!
//! Useful for testing applications that use the clustering library
//! without making real LLM calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::error::{ClusterError, Result};
use crate::traits::ai::AI;

enum Scripted {
    Response(String),
    Failure(String),
}

/// A mock AI returning scripted responses in order.
///
/// Each `complete` call pops the next scripted entry; when the script
/// runs out the mock returns an empty JSON object, which the pipeline
/// treats as an empty proposal. All calls are recorded for assertions.
/// Clones share the script and the call log.
#[derive(Clone, Default)]
pub struct MockAI {
    script: Arc<RwLock<VecDeque<Scripted>>>,
    calls: Arc<RwLock<Vec<MockAICall>>>,
}

/// Record of one call made to the mock AI.
#[derive(Debug, Clone)]
pub struct MockAICall {
    pub system_instructions: String,
    pub user_payload: String,
}

impl MockAI {
    /// Create a new mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response returned verbatim.
    pub fn with_response(self, json: impl Into<String>) -> Self {
        self.script
            .write()
            .unwrap()
            .push_back(Scripted::Response(json.into()));
        self
    }

    /// Queue a transport failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script
            .write()
            .unwrap()
            .push_back(Scripted::Failure(message.into()));
        self
    }

    /// All calls made to this mock so far.
    pub fn calls(&self) -> Vec<MockAICall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of calls made to this mock so far.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Clear the call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl AI for MockAI {
    async fn complete(&self, system_instructions: &str, user_payload: &str) -> Result<String> {
        self.calls.write().unwrap().push(MockAICall {
            system_instructions: system_instructions.to_string(),
            user_payload: user_payload.to_string(),
        });

        match self.script.write().unwrap().pop_front() {
            Some(Scripted::Response(json)) => Ok(json),
            Some(Scripted::Failure(message)) => Err(ClusterError::AI(message.into())),
            None => Ok("{}".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_responses_come_back_in_order() {
        let ai = MockAI::new()
            .with_response(r#"{"merges": []}"#)
            .with_failure("boom");

        assert_eq!(ai.complete("sys", "{}").await.unwrap(), r#"{"merges": []}"#);
        assert!(ai.complete("sys", "{}").await.is_err());
        // Script exhausted: empty object
        assert_eq!(ai.complete("sys", "{}").await.unwrap(), "{}");
        assert_eq!(ai.call_count(), 3);
    }

    #[tokio::test]
    async fn clones_share_script_and_log() {
        let ai = MockAI::new().with_response("{}");
        let clone = ai.clone();

        clone.complete("sys", "payload").await.unwrap();

        assert_eq!(ai.call_count(), 1);
        assert_eq!(ai.calls()[0].user_payload, "payload");
    }
}
