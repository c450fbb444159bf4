//! AI Provider Adapters
//!
//! - **GeminiProvider** - Google Generative Language API
//! - **MockAIProvider** - scripted responses for tests

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider, DEFAULT_BASE_URL};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
