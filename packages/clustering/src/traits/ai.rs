//! AI trait for LLM operations.
//!
//! The clustering pipeline needs exactly one capability from its LLM
//! collaborator: a completion call that takes system instructions plus a
//! JSON payload and returns a single JSON document as text.

use async_trait::async_trait;

use crate::error::Result;

/// AI trait for LLM operations.
///
/// Implementations wrap specific LLM providers (OpenAI, Anthropic, etc.)
/// and should request a JSON-object response where the provider supports
/// it. The pipeline parses the returned text itself and degrades malformed
/// output to an empty proposal, so implementations fail only on transport
/// or provider errors, never on content they cannot interpret.
#[async_trait]
pub trait AI: Send + Sync {
    /// Run a completion with system instructions and a JSON user payload.
    ///
    /// Returns the raw response text, expected (but not guaranteed) to be
    /// a single JSON object matching one of the proposal shapes.
    async fn complete(&self, system_instructions: &str, user_payload: &str) -> Result<String>;
}
