//! Plain-text rendering of REPL views.

use std::fmt::Write as _;

use crate::application::DashboardView;
use crate::domain::conversation::{Message, Sender};
use crate::domain::profile::Profile;

use super::commands::{frequency_hint, goal_hint};

pub const WELCOME_SCREEN: &str = "\
🌙  Cycle Companion
    A gentle journal for your cycle, moods and symptoms.

    Press Enter to begin.";

pub const TYPING_INDICATOR: &str = "Luna is typing…";

pub fn message(msg: &Message) -> String {
    let who = match msg.sender() {
        Sender::User => "You",
        Sender::Assistant => "Luna",
    };
    let mut out = format!("[{}] {}: {}", msg.timestamp().short_local(), who, msg.text());

    if let Some(data) = msg.data() {
        let mut chips = Vec::new();
        if let Some(mood) = &data.mood {
            chips.push(format!("mood: {}", mood));
        }
        if !data.symptoms.is_empty() {
            chips.push(format!("symptoms: {}", data.symptoms.join(", ")));
        }
        if let Some(flow) = data.flow {
            chips.push(format!("flow: {}", flow));
        }
        let _ = write!(out, "\n    ✓ Logged ({})", chips.join(" · "));
    }
    out
}

pub fn transcript(messages: &[Message]) -> String {
    messages.iter().map(message).collect::<Vec<_>>().join("\n")
}

pub fn dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "── Dashboard · {} ──", view.theme);
    let _ = writeln!(out, "{}", view.theme.tagline());

    let _ = writeln!(out, "\nInsights");
    for card in view.cards {
        let _ = writeln!(out, "  • {}: {}", card.title, card.body);
    }

    if !view.learned_insights.is_empty() {
        let _ = writeln!(out, "\nWhat I've learned about you");
        for insight in &view.learned_insights {
            let _ = writeln!(
                out,
                "  • {} ({:.0}% confident, since {})",
                insight.pattern,
                insight.confidence.value() * 100.0,
                insight.learned_date
            );
        }
    }

    let _ = writeln!(out, "\nEntries logged: {}", view.entry_count);
    if view.recent_entries.is_empty() {
        let _ = writeln!(out, "  Nothing yet. Tell me how you're feeling!");
    } else {
        for entry in &view.recent_entries {
            let _ = writeln!(out, "  - {}", entry.summary());
        }
    }

    if !view.top_symptoms.is_empty() {
        let listed: Vec<String> = view
            .top_symptoms
            .iter()
            .map(|(label, count)| format!("{} ×{}", label, count))
            .collect();
        let _ = writeln!(out, "\nMost frequent symptoms: {}", listed.join(", "));
    }
    out.trim_end().to_string()
}

pub fn profile(profile: Option<&Profile>, has_credential: bool) -> String {
    let key_line = if has_credential {
        "API key: configured"
    } else {
        "API key: not set (use /key <your-key>)"
    };
    match profile {
        None => format!("No profile yet.\n{}", key_line),
        Some(p) => format!(
            "── Profile ──\nName: {}\nGoal: {}\nCheck-ins: {}\n{}",
            p.name(),
            p.preferences().goal,
            p.preferences().check_in_frequency,
            key_line
        ),
    }
}

pub fn help() -> String {
    let goal = goal_hint();
    let frequency = frequency_hint();
    let rows: [(&str, &str); 8] = [
        ("/dashboard", "theme, insights and recent entries"),
        ("/profile", "your name and preferences"),
        ("/goal <goal>", &goal),
        ("/frequency <frequency>", &frequency),
        ("/key <key> | clear", "set or remove your Gemini API key"),
        ("/report", "save a Markdown report of your journal"),
        ("/help", "this list"),
        ("/quit", "leave"),
    ];

    let mut out = String::from("Just type to talk with Luna. Commands:");
    for (usage, about) in rows {
        let _ = write!(out, "\n  {:<24}{}", usage, about);
    }
    out
}
