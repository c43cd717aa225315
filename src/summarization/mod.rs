//! Abstractions for generating abstractive summaries via a hosted model endpoint.
//!
//! The pipeline treats the pretrained encoder-decoder model as an opaque text-to-text
//! function behind [`SummarizationClient`]. The bundled adapter speaks the Hugging Face
//! Inference summarization protocol; tests substitute the trait with local doubles.

use crate::config::get_config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced while attempting abstractive summarization.
#[derive(Debug, Error)]
pub enum SummarizationClientError {
    /// Provider was unreachable or the model is not served.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Generation envelope applied to every chunk request.
///
/// Mirrors the fixed decoding configuration of the deployed model: truncated input,
/// bounded output length, beam search with early stopping, and a no-repeat trigram
/// constraint.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Input token budget; the model host truncates anything beyond it.
    pub max_input_tokens: usize,
    /// Minimum generated summary length in tokens.
    pub min_new_tokens: usize,
    /// Maximum generated summary length in tokens.
    pub max_new_tokens: usize,
    /// Beam search width.
    pub num_beams: usize,
    /// Stop beams early once complete candidates exist.
    pub early_stopping: bool,
    /// Forbid any trigram from repeating in the output.
    pub no_repeat_ngram_size: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_input_tokens: 1024,
            min_new_tokens: 30,
            max_new_tokens: 130,
            num_beams: 4,
            early_stopping: true,
            no_repeat_ngram_size: 3,
        }
    }
}

/// Request payload passed to the summarization provider.
#[derive(Debug, Clone)]
pub struct SummarizationRequest {
    /// Fully qualified model identifier understood by the provider.
    pub model: String,
    /// Chunk text assembled by the processing pipeline.
    pub text: String,
    /// Decoding configuration forwarded with the request.
    pub options: GenerationOptions,
}

/// Interface implemented by abstractive summarization providers.
#[async_trait]
pub trait SummarizationClient: Send + Sync {
    /// Generate a bounded-length summary for a single chunk.
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError>;
}

/// Build a summarization client from configuration.
pub fn get_summarization_client() -> Box<dyn SummarizationClient + Send + Sync> {
    let config = get_config();
    Box::new(HfSummarizationClient::new(
        config.summarizer_url.clone(),
        config.summarizer_api_key.clone(),
        config.summarizer_timeout_secs.map(Duration::from_secs),
    ))
}

struct HfSummarizationClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HfSummarizationClient {
    fn new(base_url: String, api_key: Option<String>, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder().user_agent("textsum/summary");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .expect("Failed to construct reqwest::Client for summarization");
        Self {
            http,
            base_url,
            api_key,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), model)
    }
}

#[derive(Debug, Deserialize)]
struct SummaryPayload {
    summary_text: String,
}

#[async_trait]
impl SummarizationClient for HfSummarizationClient {
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "inputs": request.text,
            "parameters": {
                "min_length": request.options.min_new_tokens,
                "max_length": request.options.max_new_tokens,
                "num_beams": request.options.num_beams,
                "early_stopping": request.options.early_stopping,
                "no_repeat_ngram_size": request.options.no_repeat_ngram_size,
                "truncation": "longest_first",
            },
            "options": { "wait_for_model": true },
        });

        let mut http_request = self.http.post(self.endpoint(&request.model)).json(&payload);
        if let Some(key) = &self.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request.send().await.map_err(|error| {
            SummarizationClientError::ProviderUnavailable(format!(
                "failed to reach summarization endpoint at {}: {error}",
                self.base_url
            ))
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizationClientError::ProviderUnavailable(format!(
                "summarization endpoint {} returned 404",
                self.endpoint(&request.model)
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::GenerationFailed(format!(
                "summarization endpoint returned {status}: {body}"
            )));
        }

        let body: Vec<SummaryPayload> = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode summarization response: {error}"
            ))
        })?;

        body.into_iter()
            .next()
            .map(|payload| payload.summary_text.trim().to_string())
            .ok_or_else(|| {
                SummarizationClientError::InvalidResponse(
                    "summarization endpoint returned no candidates".into(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    fn test_client(base_url: String) -> HfSummarizationClient {
        HfSummarizationClient::new(base_url, None, Some(Duration::from_secs(5)))
    }

    fn request() -> SummarizationRequest {
        SummarizationRequest {
            model: "facebook/bart-large-cnn".into(),
            text: "A chunk of sanitized text.".into(),
            options: GenerationOptions::default(),
        }
    }

    #[tokio::test]
    async fn client_handles_successful_response() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/facebook/bart-large-cnn")
                    .json_body_partial(r#"{"parameters": {"num_beams": 4, "min_length": 30, "max_length": 130, "no_repeat_ngram_size": 3}}"#);
                then.status(200)
                    .json_body(json!([{ "summary_text": " Summary text. " }]));
            })
            .await;

        let summary = client.generate_summary(request()).await.expect("summary");

        mock.assert();
        assert_eq!(summary, "Summary text.");
    }

    #[tokio::test]
    async fn client_handles_error_status() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/models/facebook/bart-large-cnn");
                then.status(500).body("boom");
            })
            .await;

        let error = client
            .generate_summary(request())
            .await
            .expect_err("error response");

        assert!(
            matches!(error, SummarizationClientError::GenerationFailed(message) if message.contains("500"))
        );
    }

    #[tokio::test]
    async fn client_rejects_malformed_payload() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/models/facebook/bart-large-cnn");
                then.status(200).json_body(json!({ "unexpected": true }));
            })
            .await;

        let error = client
            .generate_summary(request())
            .await
            .expect_err("malformed response");

        assert!(matches!(
            error,
            SummarizationClientError::InvalidResponse(_)
        ));
    }

    #[tokio::test]
    async fn client_reports_missing_model_as_unavailable() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/models/facebook/bart-large-cnn");
                then.status(404).body("model not found");
            })
            .await;

        let error = client
            .generate_summary(request())
            .await
            .expect_err("missing model");

        assert!(matches!(
            error,
            SummarizationClientError::ProviderUnavailable(_)
        ));
    }
}
