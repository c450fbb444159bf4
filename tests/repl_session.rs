//! Scripted REPL sessions: input from a byte slice, output captured in a Vec.

use secrecy::SecretString;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use cycle_companion::adapters::ai::MockAIProvider;
use cycle_companion::adapters::cli::{Repl, ReplSettings};
use cycle_companion::adapters::storage::InMemoryKeyValueStore;
use cycle_companion::application::{
    ControllerOptions, CycleExtractor, ExtractionSettings, JournalController, JournalRepository,
    MISSING_CREDENTIAL_REPLY,
};
use cycle_companion::domain::onboarding::OnboardingStage;
use cycle_companion::domain::profile::Goal;

async fn session(
    provider: &MockAIProvider,
    options: ControllerOptions,
    report_dir: &Path,
    script: &str,
) -> (String, Repl<Vec<u8>>) {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let extractor = CycleExtractor::new(Arc::new(provider.clone()), ExtractionSettings::default());
    let controller = JournalController::load(JournalRepository::new(store), extractor, options)
        .await
        .unwrap();
    let settings = ReplSettings {
        check_in_enabled: false,
        poll_interval: Duration::from_secs(3600),
        report_dir: report_dir.to_path_buf(),
    };

    let mut repl = Repl::new(controller, settings, Vec::new());
    repl.run(tokio::io::BufReader::new(script.as_bytes()))
        .await
        .unwrap();
    let out = String::from_utf8(repl.output().clone()).unwrap();
    (out, repl)
}

fn with_key() -> ControllerOptions {
    ControllerOptions {
        fallback_credential: Some(SecretString::new("test-key".to_string())),
        ..Default::default()
    }
}

#[tokio::test]
async fn first_run_walks_through_onboarding() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockAIProvider::new().with_response(
        json!({
            "response": "Sorry about the cramps.",
            "extracted_data": { "mood": "Tired", "symptoms": ["Cramps"] }
        })
        .to_string(),
    );

    let (out, repl) = session(
        &provider,
        with_key(),
        dir.path(),
        "\nMaya\nI have cramps\n/dashboard\n/quit\n",
    )
    .await;

    assert!(out.contains("Cycle Companion"));
    assert!(out.contains("Luna is typing"));
    assert!(out.contains("Luna: Sorry about the cramps."));
    assert!(out.contains("✓ Logged (mood: Tired · symptoms: Cramps)"));
    assert!(out.contains("── Dashboard · Soothing ──"));
    assert!(out.trim_end().ends_with("Take care! 🌙"));

    assert_eq!(repl.controller().stage(), OnboardingStage::ProfileCreated);
    assert_eq!(repl.controller().logs().len(), 1);
}

#[tokio::test]
async fn commands_update_preferences_and_report_errors() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockAIProvider::new();

    let (out, repl) = session(
        &provider,
        with_key(),
        dir.path(),
        "\nMaya\n/goal manage_symptoms\n/goal nonsense\n/frobnicate\n/profile\n",
    )
    .await;

    assert!(out.contains("Goal set to"));
    assert!(out.contains("Unknown command '/frobnicate'"));
    assert!(out.contains("Name: Maya"));
    assert_eq!(
        repl.controller().profile().unwrap().preferences().goal,
        Goal::ManageSymptoms
    );
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn chat_without_key_asks_for_one() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockAIProvider::new();

    let (out, repl) = session(
        &provider,
        ControllerOptions::default(),
        dir.path(),
        "\nMaya\nfeeling low\n",
    )
    .await;

    assert!(out.contains(MISSING_CREDENTIAL_REPLY));
    assert_eq!(provider.call_count(), 0);
    assert!(repl.controller().logs().is_empty());
}

#[tokio::test]
async fn key_command_enables_model_calls() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockAIProvider::new();

    let (out, repl) = session(
        &provider,
        ControllerOptions::default(),
        dir.path(),
        "\nMaya\n/key my-secret\nhello\n",
    )
    .await;

    assert!(out.contains("API key saved"));
    assert!(repl.controller().has_credential());
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn report_is_written_to_report_dir() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockAIProvider::new();

    let (out, _) = session(&provider, with_key(), dir.path(), "\nMaya\n/report\n").await;

    assert!(out.contains("Report saved to"));
    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("cycle-report-"));
    assert!(files[0].ends_with(".md"));

    let doc = std::fs::read_to_string(dir.path().join(&files[0])).unwrap();
    assert!(doc.contains("Maya"));
}
