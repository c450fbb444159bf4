//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that the journal
//! domain is written in.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{LogEntryId, MessageId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
