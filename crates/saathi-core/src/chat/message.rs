//! Conversation message types.
//!
//! This module contains types for representing messages in a chat
//! transcript, including senders and message kinds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a message in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Message typed (or dictated) by the user.
    User,
    /// Message produced by the assistant.
    Assistant,
}

/// Presentation category of a message.
///
/// The kind only drives rendering (background tint, icon); dispatch never
/// branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    /// Ordinary conversational text.
    Plain,
    /// A formatted URL security-scan report.
    UrlScanResult,
    /// Emergency guidance (helpline referrals).
    Emergency,
    /// Informational notice (greeting, progress, usage hints).
    Info,
}

/// A single message in a conversation transcript.
///
/// Messages are immutable once created; the transcript is append-only and
/// insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier (UUID v4), stable for the session.
    pub id: String,
    /// Message text; may contain inline markup tokens (bold, link, code).
    pub content: String,
    /// Who produced the message.
    pub sender: Sender,
    /// Creation instant, immutable once set.
    pub timestamp: DateTime<Utc>,
    /// Presentation category.
    pub kind: MessageKind,
}

impl ChatMessage {
    /// Creates a message with a freshly generated id and the current time.
    pub fn new(content: impl Into<String>, sender: Sender, kind: MessageKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
            kind,
        }
    }

    /// A plain user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, Sender::User, MessageKind::Plain)
    }

    /// A plain assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, Sender::Assistant, MessageKind::Plain)
    }

    /// An informational assistant message.
    pub fn info(content: impl Into<String>) -> Self {
        Self::new(content, Sender::Assistant, MessageKind::Info)
    }

    /// A formatted scan-report message.
    pub fn scan_result(content: impl Into<String>) -> Self {
        Self::new(content, Sender::Assistant, MessageKind::UrlScanResult)
    }

    /// An emergency-guidance message.
    pub fn emergency(content: impl Into<String>) -> Self {
        Self::new(content, Sender::Assistant, MessageKind::Emergency)
    }
}
