//! Core data types and error definitions for the summarization pipeline.

use thiserror::Error;

/// Errors produced while splitting text into word-bounded chunks.
#[derive(Debug, Error)]
pub enum ChunkingError {
    /// Caller configured an impossible word budget.
    #[error("chunk word budget must be greater than zero")]
    InvalidWordBudget,
}

/// Errors emitted by the summarization pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input text is below the minimum length accepted by the service.
    #[error("Text too short")]
    TextTooShort,
    /// Chunking step failed to segment the document.
    #[error("Failed to chunk document: {0}")]
    Chunking(#[from] ChunkingError),
    /// Model invocation failed for one of the chunks.
    #[error("Failed to generate summary: {0}")]
    Summarization(#[from] crate::summarization::SummarizationClientError),
}

/// Result of a completed summarization request produced by
/// [`crate::processing::Summarizer::summarize`].
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    /// Final abstractive summary returned to the caller.
    pub summary: String,
    /// Number of chunks sent to the model.
    pub chunk_count: usize,
    /// Extractive summary computed for internal reporting, when enabled.
    pub extractive: Option<String>,
}
