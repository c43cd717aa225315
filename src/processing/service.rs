//! Pipeline service coordinating sanitation, extractive ranking, chunking, and model calls.

use crate::{
    config::get_config,
    metrics::{MetricsSnapshot, SummaryMetrics},
    processing::{
        chunking::{DEFAULT_MAX_WORDS, chunk_text, count_words},
        rank::extractive_summary,
        sanitize::sanitize,
        types::{PipelineError, SummaryOutcome},
    },
    summarization::{GenerationOptions, SummarizationClient, SummarizationRequest},
};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Minimum accepted length of the raw input text, in characters.
pub const MIN_TEXT_CHARS: usize = 50;

/// Coordinates the full request pipeline: sanitize, rank, chunk, summarize, join.
///
/// The service owns the model client handle and the metrics registry so every surface
/// shares the same components. Construct it once near process start and share it through
/// an `Arc`; the client is read-only after construction, so concurrent requests need no
/// locking.
pub struct Summarizer {
    client: Box<dyn SummarizationClient + Send + Sync>,
    metrics: Arc<SummaryMetrics>,
}

/// Abstraction over the pipeline used by external surfaces (HTTP, CLI).
#[async_trait]
pub trait SummarizeApi: Send + Sync {
    /// Run the full pipeline over raw input text.
    async fn summarize(&self, text: String) -> Result<SummaryOutcome, PipelineError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl Summarizer {
    /// Build a new pipeline service around the supplied model client.
    pub fn new(client: Box<dyn SummarizationClient + Send + Sync>) -> Self {
        Self {
            client,
            metrics: Arc::new(SummaryMetrics::new()),
        }
    }

    /// Run the full pipeline over raw input text.
    ///
    /// Validation happens on the raw input before sanitization. Chunks are summarized
    /// strictly in order with one model call each; any chunk failure fails the whole
    /// request, with no partial result.
    pub async fn summarize(&self, text: String) -> Result<SummaryOutcome, PipelineError> {
        if text.chars().count() < MIN_TEXT_CHARS {
            return Err(PipelineError::TextTooShort);
        }

        let config = get_config();
        let sanitized = sanitize(&text);
        tracing::info!(
            fingerprint = %document_fingerprint(&sanitized),
            chars = sanitized.len(),
            "Processing document"
        );

        let extractive = if config.extractive_report {
            let report = extractive_summary(
                &sanitized,
                config.extractive_sentences,
                config.extractive_document_order,
            );
            tracing::debug!(extractive = %report, "Extractive report");
            Some(report)
        } else {
            None
        };

        let max_words = config.chunk_max_words.unwrap_or(DEFAULT_MAX_WORDS);
        let chunks = chunk_text(&sanitized, max_words)?;

        let options = GenerationOptions::default();
        let mut parts = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let words = count_words(chunk);
            if words > options.max_input_tokens {
                tracing::warn!(
                    index,
                    words,
                    budget = options.max_input_tokens,
                    "Chunk exceeds the model input budget; output may be truncated"
                );
            }
            tracing::debug!(index, words, "Summarizing chunk");
            let part = self
                .client
                .generate_summary(SummarizationRequest {
                    model: config.summarizer_model.clone(),
                    text: chunk.clone(),
                    options: options.clone(),
                })
                .await?;
            parts.push(part);
        }

        let summary = parts.join(" ");
        self.metrics.record_request(chunks.len() as u64);
        tracing::info!(
            chunks = chunks.len(),
            summary_chars = summary.len(),
            "Document summarized"
        );

        Ok(SummaryOutcome {
            summary,
            chunk_count: chunks.len(),
            extractive,
        })
    }

    /// Return the current request metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[async_trait]
impl SummarizeApi for Summarizer {
    async fn summarize(&self, text: String) -> Result<SummaryOutcome, PipelineError> {
        Summarizer::summarize(self, text).await
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        Summarizer::metrics_snapshot(self)
    }
}

/// Short SHA-256 digest of the sanitized document, logged instead of the text itself.
fn document_fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ensure_test_config;
    use crate::summarization::SummarizationClientError;
    use tokio::sync::Mutex;

    struct StubClient {
        calls: Arc<Mutex<Vec<SummarizationRequest>>>,
        fail: bool,
    }

    impl StubClient {
        fn new() -> (Self, Arc<Mutex<Vec<SummarizationRequest>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    calls: calls.clone(),
                    fail: false,
                },
                calls,
            )
        }

        fn failing() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl SummarizationClient for StubClient {
        async fn generate_summary(
            &self,
            request: SummarizationRequest,
        ) -> Result<String, SummarizationClientError> {
            if self.fail {
                return Err(SummarizationClientError::GenerationFailed("boom".into()));
            }
            let mut guard = self.calls.lock().await;
            guard.push(request);
            Ok(format!("S{}", guard.len()))
        }
    }

    #[tokio::test]
    async fn short_input_is_rejected_before_any_model_call() {
        ensure_test_config();
        let (client, calls) = StubClient::new();
        let service = Summarizer::new(Box::new(client));

        let error = service
            .summarize("Too short.".into())
            .await
            .expect_err("short input rejected");
        assert!(matches!(error, PipelineError::TextTooShort));
        assert!(calls.lock().await.is_empty());
        assert_eq!(service.metrics_snapshot().requests_summarized, 0);
    }

    #[tokio::test]
    async fn summarizes_chunks_in_order_and_joins_with_spaces() {
        ensure_test_config();
        let (client, calls) = StubClient::new();
        let service = Summarizer::new(Box::new(client));

        // Three nine-word sentences against the twelve-word test budget: one chunk each.
        let text = "alpha beta gamma delta epsilon zeta eta theta iota. \
                    one two three four five six seven eight nine. \
                    red orange yellow green blue indigo violet pink gray."
            .to_string();
        let outcome = service.summarize(text).await.expect("summary");

        assert_eq!(outcome.chunk_count, 3);
        assert_eq!(outcome.summary, "S1 S2 S3");
        assert!(outcome.extractive.is_some());

        let recorded = calls.lock().await;
        assert_eq!(recorded.len(), 3);
        assert!(recorded[0].text.starts_with("alpha beta"));
        assert!(recorded[2].text.starts_with("red orange"));
        for request in recorded.iter() {
            assert_eq!(request.model, "test-model");
            assert_eq!(request.options.num_beams, 4);
        }

        let snapshot = service.metrics_snapshot();
        assert_eq!(snapshot.requests_summarized, 1);
        assert_eq!(snapshot.chunks_summarized, 3);
        assert_eq!(snapshot.last_chunk_count, Some(3));
    }

    #[tokio::test]
    async fn model_failure_fails_the_whole_request() {
        ensure_test_config();
        let service = Summarizer::new(Box::new(StubClient::failing()));

        let text = "This sentence is long enough to clear the minimum length check easily.".to_string();
        let error = service.summarize(text).await.expect_err("model failure");
        assert!(matches!(error, PipelineError::Summarization(_)));
        assert_eq!(service.metrics_snapshot().requests_summarized, 0);
    }
}
