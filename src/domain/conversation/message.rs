//! Message entity for the journal conversation.
//!
//! Messages are immutable records of user/assistant exchanges. Assistant
//! messages that confirm a new log entry carry the extracted data so the
//! transcript can render confirmation chips.

use serde::{Deserialize, Serialize};

use super::ExtractionPayload;
use crate::domain::foundation::{MessageId, Timestamp};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Plain,
    /// Assistant reply that produced a new log entry.
    LogConfirmation,
}

/// An immutable chat message.
///
/// # Invariants
///
/// - `id` is unique within the conversation
/// - `kind == LogConfirmation` iff `data` is present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    sender: Sender,
    text: String,
    timestamp: Timestamp,
    #[serde(default)]
    kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<ExtractionPayload>,
}

impl Message {
    /// Creates a plain user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text, MessageKind::Plain, None)
    }

    /// Creates a plain assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text, MessageKind::Plain, None)
    }

    /// Creates an assistant message confirming a logged extraction.
    pub fn log_confirmation(text: impl Into<String>, data: ExtractionPayload) -> Self {
        Self::new(Sender::Assistant, text, MessageKind::LogConfirmation, Some(data))
    }

    fn new(
        sender: Sender,
        text: impl Into<String>,
        kind: MessageKind,
        data: Option<ExtractionPayload>,
    ) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            text: text.into(),
            timestamp: Timestamp::now(),
            kind,
            data,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn data(&self) -> Option<&ExtractionPayload> {
        self.data.as_ref()
    }

    pub fn is_log_confirmation(&self) -> bool {
        self.kind == MessageKind::LogConfirmation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cycle_log::Flow;

    fn payload() -> ExtractionPayload {
        ExtractionPayload {
            mood: Some("Calm".into()),
            symptoms: vec![],
            flow: Some(Flow::Light),
            emotional_note: None,
        }
    }

    #[test]
    fn user_and_assistant_messages_are_plain() {
        let user = Message::user("hi");
        let assistant = Message::assistant("hello");
        assert_eq!(user.sender(), Sender::User);
        assert_eq!(assistant.sender(), Sender::Assistant);
        assert_eq!(user.kind(), MessageKind::Plain);
        assert!(assistant.data().is_none());
    }

    #[test]
    fn log_confirmation_carries_data() {
        let msg = Message::log_confirmation("Logged!", payload());
        assert!(msg.is_log_confirmation());
        assert_eq!(msg.sender(), Sender::Assistant);
        assert_eq!(msg.data(), Some(&payload()));
    }

    #[test]
    fn plain_message_omits_data_when_serialized() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["sender"], "user");
        assert_eq!(json["kind"], "plain");
    }

    #[test]
    fn kind_defaults_to_plain_when_missing() {
        let msg = Message::assistant("hello");
        let mut json = serde_json::to_value(&msg).unwrap();
        json.as_object_mut().unwrap().remove("kind");
        let back: Message = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), MessageKind::Plain);
    }
}
