use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing summarization activity.
#[derive(Default)]
pub struct SummaryMetrics {
    requests_summarized: AtomicU64,
    chunks_summarized: AtomicU64,
    last_chunk_count: AtomicU64,
}

impl SummaryMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed request and the number of chunks it produced.
    pub fn record_request(&self, chunk_count: u64) {
        self.requests_summarized.fetch_add(1, Ordering::Relaxed);
        self.chunks_summarized
            .fetch_add(chunk_count, Ordering::Relaxed);
        self.last_chunk_count.store(chunk_count, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests_summarized.load(Ordering::Relaxed);
        MetricsSnapshot {
            requests_summarized: requests,
            chunks_summarized: self.chunks_summarized.load(Ordering::Relaxed),
            last_chunk_count: if requests > 0 {
                Some(self.last_chunk_count.load(Ordering::Relaxed))
            } else {
                None
            },
        }
    }
}

/// Immutable view of request counters used for reporting.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of requests summarized since startup.
    pub requests_summarized: u64,
    /// Total chunk count sent to the model across all requests.
    pub chunks_summarized: u64,
    /// Chunk count of the most recent request, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_chunk_count: Option<u64>,
}
