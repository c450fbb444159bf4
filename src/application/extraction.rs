//! Turns one user utterance into an assistant reply and, when the model
//! found any, structured cycle data.
//!
//! The call either succeeds, or degrades to a fixed reply. It never errors
//! out to the caller and never retries.

use secrecy::{ExposeSecret, SecretString};
use std::fmt::Write as _;
use std::sync::Arc;

use crate::domain::conversation::{ExtractionPayload, ReplyParser};
use crate::domain::cycle_log::CycleLogEntry;
use crate::domain::profile::Profile;
use crate::ports::{AIProvider, CompletionRequest, MessageRole};

/// Reply when no credential is configured. No request is made.
pub const MISSING_CREDENTIAL_REPLY: &str = "I'd love to help you track how you're feeling, \
but I need a Gemini API key first. 🔑 Add one with `/key <your-key>` and we can get started.";

/// Reply when the model call or its parsing fails.
pub const FALLBACK_REPLY: &str = "I'm having a little trouble connecting right now. 🌙 \
Could you tell me that again in a moment?";

/// How many recent log entries are summarized into the prompt.
pub const RECENT_LOG_WINDOW: usize = 3;

const PERSONA: &str = "You are Luna, a warm, gentle and supportive companion who helps \
the user keep a menstrual cycle journal. Reply conversationally in two or three short \
sentences, acknowledge feelings, and never give medical diagnoses.

From the user's latest message, pick out anything worth logging: their mood (one or two \
words, e.g. Happy, Sad, Anxious, Pain), physical symptoms (short labels such as Cramps, \
Headache, Bloating) and menstrual flow (one of Light, Medium, Heavy, Spotting). Leave a \
field null or empty when the message does not mention it; do not guess.

Answer with a single JSON object and nothing else, no markdown fences:
{\"response\": \"<your reply>\", \"extracted_data\": {\"mood\": string|null, \
\"symptoms\": [string], \"flow\": \"Light\"|\"Medium\"|\"Heavy\"|\"Spotting\"|null, \
\"emotional_note\": string|null}}";

/// Generation parameters for the extraction call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionSettings {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 1024,
        }
    }
}

/// How an extraction attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStatus {
    /// Model replied and reported loggable data.
    Extracted,
    /// Model replied with nothing to log.
    Conversational,
    /// No credential; the request was never sent.
    MissingCredential,
    /// Request or parsing failed; the fallback reply was used.
    Degraded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    pub reply: String,
    /// Present only with [`ExtractionStatus::Extracted`].
    pub extraction: Option<ExtractionPayload>,
    pub status: ExtractionStatus,
}

impl ExtractionOutcome {
    fn missing_credential() -> Self {
        Self {
            reply: MISSING_CREDENTIAL_REPLY.to_string(),
            extraction: None,
            status: ExtractionStatus::MissingCredential,
        }
    }

    fn degraded() -> Self {
        Self {
            reply: FALLBACK_REPLY.to_string(),
            extraction: None,
            status: ExtractionStatus::Degraded,
        }
    }
}

/// Wraps the AI provider with the journal's prompt and parsing rules.
pub struct CycleExtractor {
    provider: Arc<dyn AIProvider>,
    parser: ReplyParser,
    settings: ExtractionSettings,
}

impl CycleExtractor {
    pub fn new(provider: Arc<dyn AIProvider>, settings: ExtractionSettings) -> Self {
        Self {
            provider,
            parser: ReplyParser::new(),
            settings,
        }
    }

    /// Sends `utterance` to the model together with the profile and the
    /// most recent entries.
    pub async fn extract(
        &self,
        utterance: &str,
        recent: &[CycleLogEntry],
        profile: &Profile,
        credential: Option<&SecretString>,
    ) -> ExtractionOutcome {
        let Some(credential) = credential.filter(|c| !c.expose_secret().trim().is_empty())
        else {
            tracing::info!("no API key configured, skipping model call");
            return ExtractionOutcome::missing_credential();
        };

        let request = self.build_request(utterance, recent, profile, credential.clone());
        let info = self.provider.provider_info();
        tracing::debug!(provider = %info.name, model = %info.model, "requesting extraction");

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, transient = e.is_transient(), "model call failed");
                return ExtractionOutcome::degraded();
            }
        };

        match self.parser.parse(&response.content) {
            Ok(parsed) => {
                let status = if parsed.extraction.is_some() {
                    ExtractionStatus::Extracted
                } else {
                    ExtractionStatus::Conversational
                };
                ExtractionOutcome {
                    reply: parsed.reply,
                    extraction: parsed.extraction,
                    status,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "model reply could not be parsed");
                ExtractionOutcome::degraded()
            }
        }
    }

    fn build_request(
        &self,
        utterance: &str,
        recent: &[CycleLogEntry],
        profile: &Profile,
        credential: SecretString,
    ) -> CompletionRequest {
        CompletionRequest::new(credential)
            .with_system_prompt(system_prompt(recent, profile))
            .with_message(MessageRole::User, utterance)
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_output_tokens)
            .expecting_json()
    }
}

fn system_prompt(recent: &[CycleLogEntry], profile: &Profile) -> String {
    let mut prompt = String::from(PERSONA);
    let _ = write!(
        prompt,
        "\n\nThe user's name is {}. Their goal: {}.",
        profile.name(),
        profile.preferences().goal.label()
    );

    let start = recent.len().saturating_sub(RECENT_LOG_WINDOW);
    let window = &recent[start..];
    if window.is_empty() {
        prompt.push_str("\nThey have no journal entries yet.");
    } else {
        prompt.push_str("\nTheir most recent journal entries:");
        for entry in window {
            let _ = write!(prompt, "\n- {}", entry.summary());
        }
    }
    prompt
}
