//! Text processing pipeline: sanitation, extractive ranking, chunking, and orchestration.

pub mod chunking;
pub mod rank;
pub mod sanitize;
mod service;
pub mod types;

pub use service::{Summarizer, SummarizeApi};
pub use types::{ChunkingError, PipelineError, SummaryOutcome};
