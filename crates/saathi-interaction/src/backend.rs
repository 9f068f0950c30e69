//! The remote-operation seam consumed by the orchestrator.

use crate::dto::{HealthReport, NewsArticle};
use async_trait::async_trait;
use saathi_core::Result;
use saathi_core::chat::WireMessage;
use saathi_core::scan::UrlScanResult;
use std::path::Path;

/// Abstraction over the four remote operations the assistant depends on.
///
/// The HTTP implementation lives in [`crate::client::BackendClient`]; tests
/// substitute an in-memory mock. Every call is bounded by a timeout and
/// resolves to a value or a `SaathiError` rather than hanging.
#[async_trait]
pub trait SaathiBackend: Send + Sync {
    /// Sends the full wire history (system instruction first) and returns
    /// the assistant reply text.
    async fn chat(&self, messages: &[WireMessage]) -> Result<String>;

    /// Scans one absolute URL and returns the structured verdict.
    async fn scan_url(&self, url: &str) -> Result<UrlScanResult>;

    /// Probes backend availability.
    async fn health(&self) -> Result<HealthReport>;

    /// Uploads a recorded audio file and returns the transcribed text.
    async fn transcribe(&self, audio: &Path) -> Result<String>;

    /// Fetches the curated cybersecurity news feed.
    async fn news(&self) -> Result<Vec<NewsArticle>>;
}
