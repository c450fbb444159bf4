//! Parsing of the assistant's structured reply.
//!
//! The model is asked for a single JSON object
//! `{"response": ..., "extracted_data": {"mood", "symptoms", "flow", "emotional_note"}}`.
//! Models still wrap it in markdown fences now and then, so fences are
//! stripped before decoding into a strict schema.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::cycle_log::{CycleLogEntry, Flow};
use crate::domain::foundation::Timestamp;

/// Maximum allowed raw reply length (100KB).
pub const MAX_RESPONSE_LENGTH: usize = 100_000;

/// Spellings models use for "no flow today".
const ABSENT_FLOW_TOKENS: [&str; 5] = ["", "none", "null", "n/a", "no"];

/// Errors that can occur while parsing an assistant reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Response too long: {actual} bytes exceeds maximum of {max} bytes")]
    TooLong { max: usize, actual: usize },

    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Structured data the assistant derived from a user utterance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionPayload {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub flow: Option<Flow>,
    #[serde(default)]
    pub emotional_note: Option<String>,
}

impl ExtractionPayload {
    /// True when at least one of mood, symptoms or flow carries data.
    ///
    /// An emotional note alone does not make a log entry.
    pub fn is_present(&self) -> bool {
        self.mood.as_deref().is_some_and(|m| !m.trim().is_empty())
            || !self.symptoms.is_empty()
            || self.flow.is_some()
    }

    /// Builds the log entry this payload describes.
    pub fn to_log_entry(&self, at: Timestamp) -> CycleLogEntry {
        CycleLogEntry::record_at(
            at,
            self.mood.clone(),
            self.symptoms.clone(),
            self.flow,
            self.emotional_note.clone().unwrap_or_default(),
        )
    }
}

/// A decoded assistant reply.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    /// Natural-language text shown to the user.
    pub reply: String,
    /// Extraction, only when [`ExtractionPayload::is_present`] holds.
    pub extraction: Option<ExtractionPayload>,
}

#[derive(Debug, Deserialize)]
struct WireReply {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    extracted_data: Option<WireExtraction>,
}

#[derive(Debug, Deserialize)]
struct WireExtraction {
    #[serde(default)]
    mood: Option<String>,
    #[serde(default)]
    symptoms: Option<Vec<String>>,
    #[serde(default)]
    flow: Option<String>,
    #[serde(default)]
    emotional_note: Option<String>,
}

/// Decodes raw model output into an [`AssistantReply`].
#[derive(Debug, Clone, Default)]
pub struct ReplyParser;

impl ReplyParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses a raw model reply.
    ///
    /// # Steps
    /// 1. Validate length
    /// 2. Decode JSON into the wire schema, retrying once with code
    ///    fences stripped
    /// 4. Normalize and validate fields
    pub fn parse(&self, raw: &str) -> Result<AssistantReply, ExtractionError> {
        if raw.len() > MAX_RESPONSE_LENGTH {
            return Err(ExtractionError::TooLong {
                max: MAX_RESPONSE_LENGTH,
                actual: raw.len(),
            });
        }

        let trimmed = raw.trim();
        let wire: WireReply = match serde_json::from_str(trimmed) {
            Ok(wire) => wire,
            Err(_) => serde_json::from_str(strip_code_fences(trimmed))
                .map_err(|e| ExtractionError::ParseError(e.to_string()))?,
        };

        let reply = wire
            .response
            .map(|r| remove_control_chars(r.trim()))
            .filter(|r| !r.is_empty())
            .ok_or_else(|| ExtractionError::MissingField("response".to_string()))?;

        let extraction = match wire.extracted_data {
            Some(data) => Some(normalize(data)?),
            None => None,
        }
        .filter(ExtractionPayload::is_present);

        Ok(AssistantReply { reply, extraction })
    }
}

fn normalize(data: WireExtraction) -> Result<ExtractionPayload, ExtractionError> {
    let flow = match data.flow.as_deref().map(str::trim) {
        Some(f) if !ABSENT_FLOW_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(f)) => Some(
            f.parse::<Flow>()
                .map_err(|e| ExtractionError::SchemaValidation(e.to_string()))?,
        ),
        _ => None,
    };

    let mut symptoms: Vec<String> = Vec::new();
    for s in data.symptoms.unwrap_or_default() {
        let s = s.trim();
        if s.is_empty() || symptoms.iter().any(|seen| seen.eq_ignore_ascii_case(s)) {
            continue;
        }
        symptoms.push(s.to_string());
    }

    Ok(ExtractionPayload {
        mood: non_blank(data.mood),
        symptoms,
        flow,
        emotional_note: non_blank(data.emotional_note),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn remove_control_chars(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Strips markdown code fences around a payload, if present.
///
/// Handles ```` ```json ```` and bare ```` ``` ```` openers and ignores any
/// chatter outside the fenced block. An opener must start a line, so
/// backticks inside a JSON string are left alone.
pub fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(open) = trimmed
        .match_indices("```")
        .map(|(i, _)| i)
        .find(|&i| i == 0 || trimmed[..i].ends_with('\n'))
    else {
        return trimmed;
    };

    let after_open = &trimmed[open + 3..];
    // Skip the info string (e.g. "json") up to the end of the fence line.
    let body_start = after_open.find('\n').map(|i| i + 1).unwrap_or_else(|| {
        after_open
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(after_open.len())
    });
    let body = &after_open[body_start..];

    match body.rfind("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}
