//! Append-only conversation log.

use super::message::{ChatMessage, Sender};
use super::wire::WireMessage;

/// The ordered transcript of one chat session.
///
/// The log is the single source of truth rendered by the presentation
/// layer. It is append-only: messages are never mutated or individually
/// removed, and insertion order is display order. One session owns exactly
/// one log; turn serialization in the controller provides the single-writer
/// guarantee, so no internal locking is needed.
#[derive(Debug, Clone)]
pub struct ConversationLog {
    greeting: String,
    messages: Vec<ChatMessage>,
}

impl ConversationLog {
    /// Creates a log seeded with a single assistant greeting message.
    pub fn new(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        let seed = ChatMessage::info(greeting.clone());
        Self {
            greeting,
            messages: vec![seed],
        }
    }

    /// Appends a message. Always succeeds, O(1).
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Read-only view of the transcript in insertion order.
    pub fn all(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages in the transcript.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recently appended message.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Replaces the history with exactly one fresh greeting message.
    ///
    /// The seed gets a new id and timestamp on every reset.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(ChatMessage::info(self.greeting.clone()));
    }

    /// Serializes the visible history to the wire format.
    ///
    /// Assistant messages map to role "assistant", user messages to role
    /// "user". Messages whose content is empty after trimming are skipped.
    /// The system instruction is not included here; the orchestrator
    /// prepends it per request.
    pub fn to_wire(&self) -> Vec<WireMessage> {
        self.messages
            .iter()
            .filter(|m| !m.content.trim().is_empty())
            .map(|m| match m.sender {
                Sender::User => WireMessage::user(m.content.clone()),
                Sender::Assistant => WireMessage::assistant(m.content.clone()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::wire::WireRole;

    #[test]
    fn test_new_log_seeds_greeting() {
        let log = ConversationLog::new("Hello!");
        assert_eq!(log.len(), 1);
        assert_eq!(log.all()[0].content, "Hello!");
        assert_eq!(log.all()[0].sender, Sender::Assistant);
    }

    #[test]
    fn test_append_round_trip() {
        let mut log = ConversationLog::new("Hello!");
        let msg = ChatMessage::user("is this site safe?");
        let expected = msg.clone();
        log.append(msg);

        let last = log.last().unwrap();
        assert_eq!(last, &expected);
        assert_eq!(last.id, expected.id);
        assert_eq!(last.timestamp, expected.timestamp);
    }

    #[test]
    fn test_reset_is_idempotent_with_fresh_ids() {
        let mut log = ConversationLog::new("Hello!");
        log.append(ChatMessage::user("one"));
        log.append(ChatMessage::assistant("two"));

        log.reset();
        assert_eq!(log.len(), 1);
        let first_id = log.all()[0].id.clone();

        log.reset();
        assert_eq!(log.len(), 1);
        assert_ne!(log.all()[0].id, first_id);
    }

    #[test]
    fn test_to_wire_maps_roles_and_skips_blank() {
        let mut log = ConversationLog::new("Hi");
        log.append(ChatMessage::user("question"));
        log.append(ChatMessage::user("   "));
        log.append(ChatMessage::assistant("answer"));

        let wire = log.to_wire();
        assert_eq!(wire.len(), 3);
        assert_eq!(wire[0].role, WireRole::Assistant);
        assert_eq!(wire[1].role, WireRole::User);
        assert_eq!(wire[2].role, WireRole::Assistant);
        assert_eq!(wire[2].content, "answer");
    }
}
