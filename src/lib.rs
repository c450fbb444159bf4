//! Cycle Companion - conversational cycle journal.
//!
//! A user talks to an assistant persona about how they feel; the model's
//! reply is parsed for mood, symptoms and flow, which are logged locally and
//! summarized on a dashboard.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
