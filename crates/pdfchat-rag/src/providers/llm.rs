//! LLM provider trait for answer generation

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM-backed answer generation.
///
/// One stateless request per question: implementations receive the
/// question and the assembled context, nothing else. Failures are not
/// retried.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate an answer for `question` grounded in `context`
    async fn generate_answer(&self, question: &str, context: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier being used
    fn model(&self) -> &str;
}
