//! Wire message format for the chat-completion operation.
//!
//! The remote model receives the full visible conversation as a list of
//! role/content pairs, with one leading system instruction that is never
//! part of the visible history.

use serde::{Deserialize, Serialize};

/// Role label on the wire. Labels must be preserved exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    /// The fixed persona/safety instruction.
    System,
    /// A user turn.
    User,
    /// A prior assistant turn.
    Assistant,
}

/// One element of the message list sent to the chat-completion operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: WireRole,
    pub content: String,
}

impl WireMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: WireRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: WireRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: WireRole::Assistant,
            content: content.into(),
        }
    }
}
