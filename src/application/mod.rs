//! Application layer - orchestrates domain operations over the ports.
//!
//! - `JournalController` owns the journal state and performs every mutation
//! - `CycleExtractor` wraps the model call with the prompt and parse rules
//! - `JournalRepository` maps journal state onto key-value slots

mod controller;
mod dashboard;
mod extraction;
mod persistence;
mod report;
mod state;

pub use controller::{ControllerOptions, JournalController, JournalError, SubmitOutcome};
pub use dashboard::{DashboardView, RECENT_ENTRIES, TOP_SYMPTOMS};
pub use extraction::{
    CycleExtractor, ExtractionOutcome, ExtractionSettings, ExtractionStatus, FALLBACK_REPLY,
    MISSING_CREDENTIAL_REPLY, RECENT_LOG_WINDOW,
};
pub use persistence::{keys, JournalRepository, PersistenceError};
pub use report::render_markdown;
pub use state::JournalState;
