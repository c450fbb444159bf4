//! Onboarding module - gates chat input until a profile exists.
//!
//! ```text
//! NoProfile ──dismiss welcome──▶ AwaitingName ──name submitted──▶ ProfileCreated
//! ```
//!
//! There is no backward edge. `ProfileCreated` routes every further input to
//! the extractor.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;
use crate::domain::profile::{Profile, ProfileName};

/// Greeting appended when the welcome screen is dismissed.
pub const WELCOME_GREETING: &str = "Hi there, I'm Luna! 🌙 I'm here to help you keep track of \
how you feel through your cycle. You can just talk to me and I'll take care of the notes. \
First things first: what should I call you?";

/// Onboarding progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStage {
    NoProfile,
    AwaitingName,
    ProfileCreated,
}

impl OnboardingStage {
    /// Derives the stage from persisted state.
    ///
    /// A missing profile with a non-empty transcript means the greeting was
    /// already shown and a name is still owed.
    pub fn derive(profile: Option<&Profile>, conversation_started: bool) -> Self {
        match (profile, conversation_started) {
            (Some(_), _) => OnboardingStage::ProfileCreated,
            (None, true) => OnboardingStage::AwaitingName,
            (None, false) => OnboardingStage::NoProfile,
        }
    }

    pub fn is_onboarded(&self) -> bool {
        *self == OnboardingStage::ProfileCreated
    }
}

impl StateMachine for OnboardingStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OnboardingStage::*;
        matches!(
            (self, target),
            (NoProfile, AwaitingName) | (AwaitingName, ProfileCreated)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OnboardingStage::*;
        match self {
            NoProfile => vec![AwaitingName],
            AwaitingName => vec![ProfileCreated],
            ProfileCreated => vec![],
        }
    }
}

/// Acknowledgment appended once the profile is created.
pub fn acknowledgment(name: &ProfileName) -> String {
    format!(
        "Lovely to meet you, {}! 💜 Whenever you're ready, tell me how you're feeling today, \
any symptoms you've noticed, or how your flow is. I'll keep track of it all.",
        name
    )
}
