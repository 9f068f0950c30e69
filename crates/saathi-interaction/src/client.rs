//! HTTP client for the CyberSaathi backend proxy.
//!
//! The backend exposes thin JSON endpoints (`/chat`, `/scan-url`, `/health`,
//! `/transcribe`, `/news`). Every request carries a bounded timeout and all
//! failures are normalized into `SaathiError` variants so the orchestrator
//! can treat them uniformly.

use crate::backend::SaathiBackend;
use crate::config::BackendConfig;
use crate::dto::{
    ChatRequest, ChatResponse, ErrorBody, HealthReport, NewsArticle, NewsResponse, ScanRequest,
    ScanResponse, TranscribeResponse,
};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use saathi_core::chat::WireMessage;
use saathi_core::scan::UrlScanResult;
use saathi_core::{Result, SaathiError};
use std::path::Path;
use std::time::Duration;

/// Timeout for health and chat calls.
const SHORT_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for scan and transcription calls; reputation scans can take a
/// while on the provider side.
const LONG_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the CyberSaathi backend.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client from the resolved configuration
    /// (config file, then environment, then the built-in default).
    pub fn from_config() -> Self {
        Self::new(BackendConfig::resolve().base_url)
    }

    /// The configured backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_http_error(status, body))
    }
}

#[async_trait]
impl SaathiBackend for BackendClient {
    async fn chat(&self, messages: &[WireMessage]) -> Result<String> {
        tracing::debug!("[BackendClient] POST /chat with {} messages", messages.len());

        let response = self
            .client
            .post(self.endpoint("/chat"))
            .timeout(SHORT_TIMEOUT)
            .json(&ChatRequest {
                messages: messages.to_vec(),
            })
            .send()
            .await
            .map_err(|e| map_send_error(e, SHORT_TIMEOUT))?;

        let parsed: ChatResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| SaathiError::malformed(format!("chat response: {e}")))?;

        if !parsed.success {
            return Err(SaathiError::backend(
                parsed.error.unwrap_or_else(|| "chat request failed".into()),
            ));
        }

        parsed
            .response
            .ok_or_else(|| SaathiError::malformed("chat response missing `response` field"))
    }

    async fn scan_url(&self, url: &str) -> Result<UrlScanResult> {
        tracing::debug!("[BackendClient] POST /scan-url for {url}");

        let response = self
            .client
            .post(self.endpoint("/scan-url"))
            .timeout(LONG_TIMEOUT)
            .json(&ScanRequest { url: url.into() })
            .send()
            .await
            .map_err(|e| map_send_error(e, LONG_TIMEOUT))?;

        let parsed: ScanResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| SaathiError::malformed(format!("scan response: {e}")))?;

        if !parsed.success {
            return Err(SaathiError::backend(
                parsed.error.unwrap_or_else(|| "URL scan failed".into()),
            ));
        }

        parsed
            .result
            .ok_or_else(|| SaathiError::malformed("scan response missing `result` field"))
    }

    async fn health(&self) -> Result<HealthReport> {
        let response = self
            .client
            .get(self.endpoint("/health"))
            .timeout(SHORT_TIMEOUT)
            .send()
            .await
            .map_err(|e| map_send_error(e, SHORT_TIMEOUT))?;

        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| SaathiError::malformed(format!("health response: {e}")))
    }

    async fn transcribe(&self, audio: &Path) -> Result<String> {
        tracing::debug!("[BackendClient] POST /transcribe for {}", audio.display());

        let bytes = tokio::fs::read(audio).await?;
        let file_name = audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.m4a".to_string());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/m4a")
            .map_err(|e| SaathiError::internal(format!("multipart mime: {e}")))?;
        let form = reqwest::multipart::Form::new().part("audio", part);

        let response = self
            .client
            .post(self.endpoint("/transcribe"))
            .timeout(LONG_TIMEOUT)
            .multipart(form)
            .send()
            .await
            .map_err(|e| map_send_error(e, LONG_TIMEOUT))?;

        let parsed: TranscribeResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| SaathiError::malformed(format!("transcribe response: {e}")))?;

        if !parsed.success {
            return Err(SaathiError::backend(
                parsed.error.unwrap_or_else(|| "transcription failed".into()),
            ));
        }

        parsed
            .text
            .ok_or_else(|| SaathiError::malformed("transcribe response missing `text` field"))
    }

    async fn news(&self) -> Result<Vec<NewsArticle>> {
        let response = self
            .client
            .get(self.endpoint("/news"))
            .timeout(SHORT_TIMEOUT)
            .send()
            .await
            .map_err(|e| map_send_error(e, SHORT_TIMEOUT))?;

        let parsed: NewsResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| SaathiError::malformed(format!("news response: {e}")))?;

        if !parsed.success {
            return Err(SaathiError::backend(
                parsed.error.unwrap_or_else(|| "news fetch failed".into()),
            ));
        }

        Ok(parsed.articles)
    }
}

fn map_send_error(err: reqwest::Error, deadline: Duration) -> SaathiError {
    if err.is_timeout() {
        SaathiError::timeout(deadline.as_secs())
    } else {
        err.into()
    }
}

fn map_http_error(status: StatusCode, body: String) -> SaathiError {
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|wrapper| wrapper.error)
        .unwrap_or_else(|| {
            if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body
            }
        });

    SaathiError::http(status.as_u16(), message)
}
