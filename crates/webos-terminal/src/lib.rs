//! Command interpreter for the WebOS terminal app.
//!
//! Registry-based dispatch: commands implement the [`Command`] trait and
//! are registered by name. The interpreter splits an input line into
//! whitespace-separated tokens, resolves the first as the command name,
//! and dispatches with a mutable [`Environment`] (working directory +
//! file system). Failures come back as `WebosError::Command` carrying
//! the user-facing message; the hosting view prints them in its error
//! style and nothing propagates further.

mod commands;
mod interpreter;

pub use commands::register_builtins;
pub use interpreter::{Command, CommandOutput, CommandRegistry, Environment, resolve_path};
