//! Ports - interfaces the application layer depends on.
//!
//! - `AIProvider` - single-shot text completion against a generative model
//! - `KeyValueStore` - durable named slots holding JSON documents

mod ai_provider;
mod key_value_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use key_value_store::{validate_key, KeyValueStore, StoreError};
