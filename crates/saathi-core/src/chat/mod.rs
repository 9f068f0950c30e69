//! Chat transcript domain: messages, the append-only log, and the wire
//! format replayed to the remote model.

mod log;
mod message;
mod wire;

pub use log::ConversationLog;
pub use message::{ChatMessage, MessageKind, Sender};
pub use wire::{WireMessage, WireRole};

use serde::{Deserialize, Serialize};

/// Advisory backend reachability, updated by the health probe.
///
/// Never gates submission; it only drives UI hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl Connectivity {
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}
