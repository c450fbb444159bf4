//! Dashboard view model, recomputed on every render.

use crate::domain::cycle_log::{CycleLog, CycleLogEntry};
use crate::domain::insights::{top_symptoms, InsightCard, Theme, INSIGHT_CARDS};
use crate::domain::profile::{LearnedInsight, Profile};

/// Entries listed under "recent".
pub const RECENT_ENTRIES: usize = 5;

/// Symptoms listed under "most frequent".
pub const TOP_SYMPTOMS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub theme: Theme,
    pub cards: &'static [InsightCard],
    pub learned_insights: Vec<LearnedInsight>,
    pub entry_count: usize,
    /// Oldest first.
    pub recent_entries: Vec<CycleLogEntry>,
    pub top_symptoms: Vec<(String, usize)>,
}

impl DashboardView {
    pub fn build(profile: Option<&Profile>, logs: &CycleLog) -> Self {
        Self {
            theme: Theme::for_log(logs),
            cards: &INSIGHT_CARDS,
            learned_insights: profile.map(|p| p.insights().to_vec()).unwrap_or_default(),
            entry_count: logs.len(),
            recent_entries: logs.recent(RECENT_ENTRIES).to_vec(),
            top_symptoms: top_symptoms(logs, TOP_SYMPTOMS),
        }
    }
}
