//! Request/response bodies exchanged with the CyberSaathi backend.
//!
//! The backend is a thin JSON proxy; field names here mirror its wire
//! shapes exactly (camelCase where the wire uses it).

use chrono::{DateTime, Utc};
use saathi_core::chat::WireMessage;
use saathi_core::scan::UrlScanResult;
use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<WireMessage>,
}

/// Reply of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /scan-url`.
#[derive(Debug, Clone, Serialize)]
pub struct ScanRequest {
    pub url: String,
}

/// Reply of `POST /scan-url`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanResponse {
    pub success: bool,
    #[serde(default)]
    pub result: Option<UrlScanResult>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Per-capability availability flags from `GET /health`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthServices {
    #[serde(default)]
    pub ai: bool,
    #[serde(default)]
    pub url_scanner: bool,
    #[serde(default)]
    pub news: bool,
}

/// Reply of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub services: HealthServices,
}

/// Reply of `POST /transcribe`.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscribeResponse {
    pub success: bool,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One article from `GET /news`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Reply of `GET /news`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsResponse {
    pub success: bool,
    #[serde(default)]
    pub articles: Vec<NewsArticle>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error envelope the backend uses for non-2xx replies.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}
