//! Adapters - implementations of ports plus the terminal front end.
//!
//! - `ai` - Gemini HTTP provider and a scripted mock
//! - `storage` - file and in-memory key-value stores
//! - `cli` - REPL driving the journal controller

pub mod ai;
pub mod cli;
pub mod storage;
