//! Prompt assembly for grounded answer generation

/// Prompt builder for chat-over-documents queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Fixed instruction sent with every chat request. The model is
    /// told to answer from the context alone and to fall back to the
    /// [`Self::NO_ANSWER`] sentinel.
    pub const INSTRUCTION: &'static str = "Using the information contained in the context, \
        give a comprehensive answer to the question. \
        Respond only to the question asked, response should be concise and relevant to the question. \
        If the answer cannot be deduced from the context, say 'I have no answer'.";

    /// Sentinel the model replies with when the context has no answer
    pub const NO_ANSWER: &'static str = "I have no answer";

    /// Build the context block from retrieved chunk texts, rank 0 first
    pub fn build_context<S: AsRef<str>>(chunks: &[S]) -> String {
        let mut context = String::from("\nExtracted documents:\n");
        for (i, chunk) in chunks.iter().enumerate() {
            context.push_str(&format!("Document {}:::\n{}", i, chunk.as_ref()));
        }
        context
    }

    /// Build the per-question message around the assembled context
    pub fn build_message(question: &str, context: &str) -> String {
        format!(
            "Question:\n{}\nContext:{}\nResponse:\n",
            question, context
        )
    }
}
