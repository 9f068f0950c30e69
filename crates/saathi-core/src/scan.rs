//! URL scan results and their presentation.
//!
//! The scan operation returns a structured verdict; this module renders it
//! into the inline-markup report appended to the transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Assessed threat category for a scanned URL.
///
/// `Unknown` is a first-class value: absence of data is representable and
/// must never be silently treated as safe. Unrecognized wire values also
/// deserialize to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Suspicious,
    Dangerous,
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    /// Marker glyph used in the report header.
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Dangerous => "🚨",
            Self::Suspicious => "⚠️",
            Self::Safe => "✅",
            Self::Unknown => "❓",
        }
    }

    /// One-line assessment shown next to the risk level.
    pub fn assessment(self) -> &'static str {
        match self {
            Self::Dangerous => "This URL has been flagged as dangerous!",
            Self::Suspicious => "This URL appears suspicious. Exercise caution.",
            Self::Safe => "This URL appears to be safe.",
            Self::Unknown => "Unable to determine risk level.",
        }
    }

    /// Closing recommendation appended to the report.
    pub fn advice(self) -> &'static str {
        match self {
            Self::Dangerous => {
                "🚨 **WARNING**: Do not visit this website! It may contain malware or be used for phishing."
            }
            Self::Suspicious => {
                "⚠️ **CAUTION**: Be very careful if you choose to visit this website."
            }
            Self::Safe => {
                "✅ **RECOMMENDATION**: While this URL appears safe, always be cautious with personal information."
            }
            Self::Unknown => {
                "❓ **NOTE**: No verdict is available for this URL. Treat it with the same caution as an unrated site."
            }
        }
    }

    /// Wire label, uppercased for the report.
    pub fn label(self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Suspicious => "SUSPICIOUS",
            Self::Dangerous => "DANGEROUS",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Per-engine detection counts from the reputation service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanDetails {
    pub malicious: u32,
    pub suspicious: u32,
    pub harmless: u32,
    pub undetected: u32,
}

/// The structured outcome of scanning one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlScanResult {
    pub url: String,
    #[serde(default)]
    pub status: String,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub threats: Vec<String>,
    pub scan_time: DateTime<Utc>,
    pub details: ScanDetails,
}

impl UrlScanResult {
    /// Renders the scan report with inline markup, ready to append to the
    /// transcript as a `UrlScanResult` message.
    pub fn to_report(&self) -> String {
        let risk = self.risk_level;
        format!(
            "{emoji} **Security Scan Results**\n\n\
             🔗 **URL**: {url}\n\
             🛡️ **Risk Level**: {label}\n\
             📊 **Assessment**: {assessment}\n\n\
             **Detection Details**:\n\
             • Malicious: {malicious}\n\
             • Suspicious: {suspicious}\n\
             • Safe: {harmless}\n\
             • Unrated: {undetected}\n\n\
             ⏱️ **Scan Time**: {time}\n\n\
             {advice}",
            emoji = risk.emoji(),
            url = self.url,
            label = risk.label(),
            assessment = risk.assessment(),
            malicious = self.details.malicious,
            suspicious = self.details.suspicious,
            harmless = self.details.harmless,
            undetected = self.details.undetected,
            time = self.scan_time.format("%H:%M:%S"),
            advice = risk.advice(),
        )
    }
}
