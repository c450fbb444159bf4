//! JournalController - owns the journal state and runs every mutation.
//!
//! All operations take `&mut self`: a second submission cannot start while
//! the first is still awaiting the model, and the check-in trigger can never
//! interleave with a chat turn. Each mutation is followed by a save of the
//! slots it touched.

use chrono::{NaiveDate, NaiveDateTime};
use secrecy::SecretString;
use thiserror::Error;

use crate::domain::check_in::{check_in_message, CheckInPolicy};
use crate::domain::conversation::{Conversation, Message};
use crate::domain::cycle_log::CycleLog;
use crate::domain::foundation::{DomainError, ErrorCode, StateMachine, Timestamp, ValidationError};
use crate::domain::onboarding::{acknowledgment, OnboardingStage, WELCOME_GREETING};
use crate::domain::profile::{CheckInFrequency, Goal, Profile, ProfileName};

use super::dashboard::DashboardView;
use super::extraction::{CycleExtractor, ExtractionStatus, RECENT_LOG_WINDOW};
use super::persistence::{JournalRepository, PersistenceError};
use super::report::render_markdown;
use super::state::JournalState;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl JournalError {
    pub fn code(&self) -> ErrorCode {
        match self {
            JournalError::Domain(e) => e.code,
            JournalError::Persistence(_) => ErrorCode::StorageError,
        }
    }

    fn profile_missing() -> Self {
        JournalError::Domain(DomainError::new(
            ErrorCode::ProfileMissing,
            "No profile yet. Finish onboarding first.",
        ))
    }
}

impl From<ValidationError> for JournalError {
    fn from(err: ValidationError) -> Self {
        JournalError::Domain(err.into())
    }
}

/// Knobs the controller takes from configuration.
#[derive(Debug, Clone, Default)]
pub struct ControllerOptions {
    pub check_in: CheckInPolicy,
    /// Used when no credential has been saved in the journal.
    pub fallback_credential: Option<SecretString>,
    /// Maximum transcript length; oldest messages are dropped first.
    pub history_limit: Option<usize>,
}

/// Result of a successful [`JournalController::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The name was accepted and the profile created.
    Onboarded(Message),
    /// The assistant answered a journal message.
    Replied {
        reply: Message,
        status: ExtractionStatus,
    },
}

impl SubmitOutcome {
    pub fn reply(&self) -> &Message {
        match self {
            SubmitOutcome::Onboarded(reply) => reply,
            SubmitOutcome::Replied { reply, .. } => reply,
        }
    }
}

pub struct JournalController {
    state: JournalState,
    repository: JournalRepository,
    extractor: CycleExtractor,
    options: ControllerOptions,
}

impl JournalController {
    /// Loads persisted state and derives the onboarding stage.
    pub async fn load(
        repository: JournalRepository,
        extractor: CycleExtractor,
        options: ControllerOptions,
    ) -> Result<Self, JournalError> {
        let state = repository.load().await?;
        Ok(Self {
            state,
            repository,
            extractor,
            options,
        })
    }

    pub fn stage(&self) -> OnboardingStage {
        self.state.stage
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.state.profile.as_ref()
    }

    pub fn logs(&self) -> &CycleLog {
        &self.state.logs
    }

    pub fn conversation(&self) -> &Conversation {
        &self.state.conversation
    }

    pub fn last_check_in(&self) -> Option<NaiveDate> {
        self.state.last_check_in
    }

    /// True when a saved or configured credential is available.
    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    fn credential(&self) -> Option<&SecretString> {
        self.state
            .credential
            .as_ref()
            .or(self.options.fallback_credential.as_ref())
    }

    /// Leaves the welcome screen and posts the greeting.
    pub async fn dismiss_welcome(&mut self) -> Result<Message, JournalError> {
        let next = self.state.stage.transition_to(OnboardingStage::AwaitingName)?;

        let greeting = Message::assistant(WELCOME_GREETING);
        self.append(greeting.clone());
        self.state.stage = next;
        self.repository
            .save_conversation(&self.state.conversation)
            .await?;

        Ok(greeting)
    }

    /// Routes user input by onboarding stage.
    ///
    /// While awaiting a name the text becomes the profile name; afterwards it
    /// goes to the model and may produce a log entry.
    pub async fn submit(&mut self, text: &str) -> Result<SubmitOutcome, JournalError> {
        match self.state.stage {
            OnboardingStage::NoProfile => Err(ValidationError::invalid_format(
                "state_transition",
                "Dismiss the welcome screen before chatting",
            )
            .into()),
            OnboardingStage::AwaitingName => self.complete_onboarding(text).await,
            OnboardingStage::ProfileCreated => self.converse(text).await,
        }
    }

    async fn complete_onboarding(&mut self, text: &str) -> Result<SubmitOutcome, JournalError> {
        let name = ProfileName::new(text)?;
        let next = self
            .state
            .stage
            .transition_to(OnboardingStage::ProfileCreated)?;

        let profile = Profile::create(name);
        let reply = Message::assistant(acknowledgment(profile.name()));
        self.append(Message::user(profile.name().as_str()));
        self.append(reply.clone());

        self.repository.save_profile(&profile).await?;
        self.state.profile = Some(profile);
        self.state.stage = next;
        self.repository
            .save_conversation(&self.state.conversation)
            .await?;

        tracing::info!("profile created, onboarding complete");
        Ok(SubmitOutcome::Onboarded(reply))
    }

    async fn converse(&mut self, text: &str) -> Result<SubmitOutcome, JournalError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty_field("message").into());
        }

        self.append(Message::user(text));
        self.repository
            .save_conversation(&self.state.conversation)
            .await?;

        let profile = self
            .state
            .profile
            .as_ref()
            .ok_or_else(JournalError::profile_missing)?;
        let outcome = self
            .extractor
            .extract(
                text,
                self.state.logs.recent(RECENT_LOG_WINDOW),
                profile,
                self.credential(),
            )
            .await;

        let reply = match outcome.extraction {
            Some(data) => {
                let entry = data.to_log_entry(Timestamp::now());
                tracing::info!(entry_id = %entry.id(), "cycle entry logged");
                self.state.logs.append(entry);
                self.repository.save_logs(&self.state.logs).await?;
                Message::log_confirmation(outcome.reply, data)
            }
            None => Message::assistant(outcome.reply),
        };

        self.append(reply.clone());
        self.repository
            .save_conversation(&self.state.conversation)
            .await?;

        Ok(SubmitOutcome::Replied {
            reply,
            status: outcome.status,
        })
    }

    /// Posts the daily check-in if one is due at local time `now`.
    ///
    /// Returns the posted message, or `None` when nothing was due.
    pub async fn run_check_in(
        &mut self,
        now: NaiveDateTime,
    ) -> Result<Option<Message>, JournalError> {
        let Some(profile) = self.state.profile.as_ref() else {
            return Ok(None);
        };
        let frequency = profile.preferences().check_in_frequency;
        if !self
            .options
            .check_in
            .is_due(self.state.last_check_in, now, frequency)
        {
            return Ok(None);
        }

        let message = Message::assistant(check_in_message(profile.name()));
        let today = now.date();
        self.append(message.clone());
        self.state.last_check_in = Some(today);

        self.repository.save_last_check_in(today).await?;
        self.repository
            .save_conversation(&self.state.conversation)
            .await?;

        tracing::info!(date = %today, "daily check-in posted");
        Ok(Some(message))
    }

    pub async fn set_goal(&mut self, goal: Goal) -> Result<(), JournalError> {
        let profile = self
            .state
            .profile
            .as_mut()
            .ok_or_else(JournalError::profile_missing)?;
        profile.set_goal(goal);
        self.repository.save_profile(profile).await?;
        Ok(())
    }

    pub async fn set_check_in_frequency(
        &mut self,
        frequency: CheckInFrequency,
    ) -> Result<(), JournalError> {
        let profile = self
            .state
            .profile
            .as_mut()
            .ok_or_else(JournalError::profile_missing)?;
        profile.set_check_in_frequency(frequency);
        self.repository.save_profile(profile).await?;
        Ok(())
    }

    /// Saves the API credential used for model calls.
    pub async fn set_credential(&mut self, raw: &str) -> Result<(), JournalError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("api_key").into());
        }
        let secret = SecretString::new(trimmed.to_string());
        self.repository.save_credential(Some(&secret)).await?;
        self.state.credential = Some(secret);
        tracing::info!("API key saved");
        Ok(())
    }

    pub async fn clear_credential(&mut self) -> Result<(), JournalError> {
        self.repository.save_credential(None).await?;
        self.state.credential = None;
        tracing::info!("API key cleared");
        Ok(())
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView::build(self.state.profile.as_ref(), &self.state.logs)
    }

    /// Markdown report of the whole journal.
    pub fn report(&self) -> String {
        render_markdown(self.state.profile.as_ref(), &self.state.logs, Timestamp::now())
    }

    fn append(&mut self, message: Message) {
        self.state.conversation.push(message);
        if let Some(limit) = self.options.history_limit {
            let evicted = self.state.conversation.evict_oldest(limit);
            if evicted > 0 {
                tracing::debug!(evicted, "oldest messages dropped from history");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::application::extraction::{ExtractionSettings, MISSING_CREDENTIAL_REPLY};
    use chrono::NaiveDate;
    use std::sync::Arc;

    async fn controller(
        provider: &MockAIProvider,
        options: ControllerOptions,
    ) -> (JournalController, InMemoryKeyValueStore) {
        let store = InMemoryKeyValueStore::new();
        let repository = JournalRepository::new(Arc::new(store.clone()));
        let extractor =
            CycleExtractor::new(Arc::new(provider.clone()), ExtractionSettings::default());
        let controller = JournalController::load(repository, extractor, options)
            .await
            .unwrap();
        (controller, store)
    }

    async fn onboarded(provider: &MockAIProvider) -> JournalController {
        let options = ControllerOptions {
            fallback_credential: Some(SecretString::new("test-key".to_string())),
            ..Default::default()
        };
        let (mut c, _) = controller(provider, options).await;
        c.dismiss_welcome().await.unwrap();
        c.submit("Maya").await.unwrap();
        c
    }

    fn evening(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(21, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn submit_before_welcome_is_rejected() {
        let provider = MockAIProvider::new();
        let (mut c, _) = controller(&provider, ControllerOptions::default()).await;

        let err = c.submit("Maya").await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
        assert!(c.conversation().is_empty());
    }

    #[tokio::test]
    async fn dismissing_twice_is_rejected() {
        let provider = MockAIProvider::new();
        let (mut c, _) = controller(&provider, ControllerOptions::default()).await;

        let greeting = c.dismiss_welcome().await.unwrap();
        assert_eq!(greeting.text(), WELCOME_GREETING);

        let err = c.dismiss_welcome().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
        assert_eq!(c.conversation().len(), 1);
    }

    #[tokio::test]
    async fn blank_name_keeps_awaiting() {
        let provider = MockAIProvider::new();
        let (mut c, _) = controller(&provider, ControllerOptions::default()).await;
        c.dismiss_welcome().await.unwrap();

        let err = c.submit("   ").await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::EmptyField);
        assert_eq!(c.stage(), OnboardingStage::AwaitingName);
        assert!(c.profile().is_none());
    }

    #[tokio::test]
    async fn name_is_trimmed_and_never_sent_to_model() {
        let provider = MockAIProvider::new();
        let (mut c, _) = controller(&provider, ControllerOptions::default()).await;
        c.dismiss_welcome().await.unwrap();

        let outcome = c.submit("  Maya ").await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Onboarded(_)));
        assert!(outcome.reply().text().contains("Maya"));
        assert_eq!(c.profile().unwrap().name().as_str(), "Maya");
        assert_eq!(c.conversation().messages()[1].text(), "Maya");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn long_name_completes_onboarding() {
        let provider = MockAIProvider::new();
        let (mut c, _) = controller(&provider, ControllerOptions::default()).await;
        c.dismiss_welcome().await.unwrap();
        let name = "Maria-Alejandra Fernanda de los Santos Gutierrez-Villanueva Ortega";

        c.submit(name).await.unwrap();

        assert_eq!(c.stage(), OnboardingStage::ProfileCreated);
        assert_eq!(c.profile().unwrap().name().as_str(), name);
    }

    #[tokio::test]
    async fn missing_credential_reply_is_plain() {
        let provider = MockAIProvider::new();
        let (mut c, _) = controller(&provider, ControllerOptions::default()).await;
        c.dismiss_welcome().await.unwrap();
        c.submit("Maya").await.unwrap();

        let outcome = c.submit("I feel happy").await.unwrap();

        assert_eq!(outcome.reply().text(), MISSING_CREDENTIAL_REPLY);
        assert!(matches!(
            outcome,
            SubmitOutcome::Replied {
                status: ExtractionStatus::MissingCredential,
                ..
            }
        ));
        assert!(c.logs().is_empty());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn saved_credential_takes_precedence_and_can_be_cleared() {
        let provider = MockAIProvider::new();
        let mut c = onboarded(&provider).await;

        c.set_credential("  saved-key ").await.unwrap();
        c.submit("hello").await.unwrap();
        {
            use secrecy::ExposeSecret;
            assert_eq!(
                provider.get_calls()[0].credential.expose_secret(),
                "saved-key"
            );
        }

        c.clear_credential().await.unwrap();
        assert!(c.has_credential(), "config fallback still applies");
        assert!(c.set_credential(" ").await.is_err());
    }

    #[tokio::test]
    async fn empty_message_is_rejected_after_onboarding() {
        let provider = MockAIProvider::new();
        let mut c = onboarded(&provider).await;

        let err = c.submit("  ").await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::EmptyField);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn preferences_require_a_profile() {
        let provider = MockAIProvider::new();
        let (mut c, _) = controller(&provider, ControllerOptions::default()).await;

        let err = c.set_goal(Goal::PlanPregnancy).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ProfileMissing);
    }

    #[tokio::test]
    async fn preference_edits_are_saved() {
        let provider = MockAIProvider::new();
        let mut c = onboarded(&provider).await;

        c.set_goal(Goal::PlanPregnancy).await.unwrap();
        c.set_check_in_frequency(CheckInFrequency::Weekly)
            .await
            .unwrap();

        let prefs = c.profile().unwrap().preferences();
        assert_eq!(prefs.goal, Goal::PlanPregnancy);
        assert_eq!(prefs.check_in_frequency, CheckInFrequency::Weekly);
    }

    #[tokio::test]
    async fn check_in_needs_a_profile() {
        let provider = MockAIProvider::new();
        let (mut c, _) = controller(&provider, ControllerOptions::default()).await;

        assert_eq!(c.run_check_in(evening(2024, 3, 4)).await.unwrap(), None);
        assert!(c.conversation().is_empty());
    }

    #[tokio::test]
    async fn check_in_fires_once_per_day() {
        let provider = MockAIProvider::new();
        let mut c = onboarded(&provider).await;
        let before = c.conversation().len();

        let first = c.run_check_in(evening(2024, 3, 4)).await.unwrap();
        let second = c.run_check_in(evening(2024, 3, 4)).await.unwrap();

        assert!(first.unwrap().text().starts_with("Hey Maya"));
        assert!(second.is_none());
        assert_eq!(c.conversation().len(), before + 1);
        assert_eq!(c.last_check_in(), NaiveDate::from_ymd_opt(2024, 3, 4));
    }

    #[tokio::test]
    async fn confirmation_carries_the_logged_symptoms() {
        let provider = MockAIProvider::new().with_response(
            r#"{"response":"Noted.","extracted_data":{"symptoms":["Cramps","cramps"]}}"#,
        );
        let mut c = onboarded(&provider).await;

        let outcome = c.submit("cramps, so many cramps").await.unwrap();

        let entry = c.logs().latest().unwrap();
        assert_eq!(entry.symptoms(), ["Cramps"]);
        assert_eq!(outcome.reply().data().unwrap().symptoms, entry.symptoms());
    }

    #[tokio::test]
    async fn history_limit_drops_oldest_messages() {
        let provider = MockAIProvider::new();
        let options = ControllerOptions {
            history_limit: Some(3),
            fallback_credential: Some(SecretString::new("k".to_string())),
            ..Default::default()
        };
        let (mut c, _) = controller(&provider, options).await;
        c.dismiss_welcome().await.unwrap();
        c.submit("Maya").await.unwrap();
        c.submit("hello").await.unwrap();

        // greeting and name are gone; acknowledgment, "hello" and the reply remain
        assert_eq!(c.conversation().len(), 3);
        assert_eq!(c.conversation().messages()[1].text(), "hello");
        assert_eq!(c.stage(), OnboardingStage::ProfileCreated);
    }
}
