//! Markdown export of the journal.

use std::fmt::Write as _;

use crate::domain::cycle_log::CycleLog;
use crate::domain::foundation::Timestamp;
use crate::domain::insights::{top_symptoms, Theme};
use crate::domain::profile::Profile;

/// Renders every log entry, oldest first, with a short summary header.
pub fn render_markdown(
    profile: Option<&Profile>,
    logs: &CycleLog,
    generated_at: Timestamp,
) -> String {
    let mut doc = String::from("# Cycle Journal Report\n\n");

    if let Some(profile) = profile {
        let _ = writeln!(doc, "**Name:** {}  ", profile.name());
        let _ = writeln!(doc, "**Goal:** {}  ", profile.preferences().goal.label());
    }
    let _ = writeln!(doc, "**Generated:** {}  ", generated_at.local_date());
    let _ = writeln!(doc, "**Entries:** {}\n", logs.len());

    if logs.is_empty() {
        doc.push_str("_No entries logged yet._\n");
        return doc;
    }

    doc.push_str("## Summary\n\n");
    let _ = writeln!(doc, "- Current theme: {}", Theme::for_log(logs));
    let top = top_symptoms(logs, 5);
    if !top.is_empty() {
        let listed: Vec<String> = top
            .iter()
            .map(|(label, count)| format!("{} ({})", label, count))
            .collect();
        let _ = writeln!(doc, "- Most frequent symptoms: {}", listed.join(", "));
    }
    doc.push('\n');

    doc.push_str("## Entries\n\n");
    doc.push_str("| Date | Mood | Symptoms | Flow | Note |\n");
    doc.push_str("|------|------|----------|------|------|\n");
    for entry in logs.entries() {
        let _ = writeln!(
            doc,
            "| {} | {} | {} | {} | {} |",
            entry.date().short_local(),
            cell(entry.mood().unwrap_or("")),
            cell(&entry.symptoms().join(", ")),
            entry.flow().map(|f| f.as_str()).unwrap_or(""),
            cell(entry.note()),
        );
    }
    doc
}

/// Keeps user text from breaking the table.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}
