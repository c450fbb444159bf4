//! In-memory journal state owned by the controller.

use chrono::NaiveDate;
use secrecy::SecretString;

use crate::domain::conversation::Conversation;
use crate::domain::cycle_log::CycleLog;
use crate::domain::onboarding::OnboardingStage;
use crate::domain::profile::Profile;

/// Everything the journal knows, as loaded from storage.
///
/// `stage` is derived on construction and then advanced only by the
/// onboarding operations.
#[derive(Debug)]
pub struct JournalState {
    pub profile: Option<Profile>,
    pub logs: CycleLog,
    pub conversation: Conversation,
    pub credential: Option<SecretString>,
    pub last_check_in: Option<NaiveDate>,
    pub stage: OnboardingStage,
}

impl JournalState {
    pub fn new(
        profile: Option<Profile>,
        logs: CycleLog,
        conversation: Conversation,
        credential: Option<SecretString>,
        last_check_in: Option<NaiveDate>,
    ) -> Self {
        let stage = OnboardingStage::derive(profile.as_ref(), !conversation.is_empty());
        Self {
            profile,
            logs,
            conversation,
            credential,
            last_check_in,
            stage,
        }
    }
}

impl Default for JournalState {
    fn default() -> Self {
        Self::new(None, CycleLog::new(), Conversation::new(), None, None)
    }
}
