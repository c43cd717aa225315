#![deny(missing_docs)]

//! Core library for the Textsum summarization server.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Summarization request counters.
pub mod metrics;
/// Text processing pipeline utilities.
pub mod processing;
/// Abstractive summarization client abstraction and adapters.
pub mod summarization;
