//! Conversation module - chat transcript and assistant reply parsing.

#[allow(clippy::module_inception)]
mod conversation;
mod extractor;
mod message;

pub use conversation::Conversation;
pub use extractor::{
    strip_code_fences, AssistantReply, ExtractionError, ExtractionPayload, ReplyParser,
    MAX_RESPONSE_LENGTH,
};
pub use message::{Message, MessageKind, Sender};
