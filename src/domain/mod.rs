//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `profile` - The single user profile and its preferences
//! - `cycle_log` - Append-only journal of cycle entries
//! - `conversation` - Chat transcript and assistant reply parsing
//! - `onboarding` - Stage machine gating chat until a profile exists
//! - `insights` - Theme heuristic and insight cards
//! - `check_in` - Daily check-in policy

pub mod check_in;
pub mod conversation;
pub mod cycle_log;
pub mod foundation;
pub mod insights;
pub mod onboarding;
pub mod profile;
