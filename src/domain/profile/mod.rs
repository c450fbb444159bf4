//! Profile module - who the user is and how they want to be checked on.

mod preferences;
#[allow(clippy::module_inception)]
mod profile;

pub use preferences::{CheckInFrequency, Goal, Preferences};
pub use profile::{Confidence, LearnedInsight, Profile, ProfileName};
