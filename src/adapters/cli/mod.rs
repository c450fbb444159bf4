//! Terminal front end: command parsing, view rendering and the REPL loop.

mod commands;
pub mod render;
mod repl;

pub use commands::{Command, CommandError};
pub use repl::{Repl, ReplSettings};
