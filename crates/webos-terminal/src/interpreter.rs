//! Command trait, registry, and dispatch.

use std::collections::HashMap;

use webos_types::error::{Result, WebosError};
use webos_vfs::FileSystem;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Signal to the hosting view to clear its scrollback.
    Clear,
}

/// Mutable environment threaded through every command.
pub struct Environment<'a> {
    /// Current working directory (absolute VFS path).
    pub cwd: String,
    /// The virtual file system.
    pub fs: &'a mut FileSystem,
}

impl<'a> Environment<'a> {
    /// An environment rooted at `/`.
    pub fn new(fs: &'a mut FileSystem) -> Self {
        Self {
            cwd: "/".to_string(),
            fs,
        }
    }
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "cat <file>").
    fn usage(&self) -> &str;

    /// Execute with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Registry of available commands with name dispatch.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same
    /// name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Parse and execute one input line. Command names are
    /// case-insensitive; arguments are whitespace-separated.
    pub fn execute(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(CommandOutput::None);
        };
        let args: Vec<&str> = tokens.collect();
        let name_lower = name.to_ascii_lowercase();

        if name_lower == "help" {
            return Ok(self.execute_help(&args));
        }

        match self.commands.get(name_lower.as_str()) {
            Some(cmd) => cmd.execute(&args, env),
            None => Err(WebosError::Command(format!("command not found: {name}"))),
        }
    }

    fn execute_help(&self, args: &[&str]) -> CommandOutput {
        if let Some(&name) = args.first()
            && let Some(cmd) = self.commands.get(&name.to_ascii_lowercase())
        {
            return CommandOutput::Text(format!(
                "{}\n  {}\n  Usage: {}",
                cmd.name(),
                cmd.description(),
                cmd.usage()
            ));
        }
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.push("help");
        names.sort_unstable();
        CommandOutput::Text(format!("Available commands: {}", names.join(", ")))
    }

    /// Sorted (name, description) pairs for all registered commands.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        let mut cmds: Vec<(&str, &str)> = self
            .commands
            .values()
            .map(|c| (c.name(), c.description()))
            .collect();
        cmds.sort_by_key(|(name, _)| *name);
        cmds
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a possibly-relative path against the working directory,
/// folding `.` and `..` components.
pub fn resolve_path(cwd: &str, input: &str) -> String {
    let raw = if input.starts_with('/') {
        input.to_string()
    } else if cwd == "/" {
        format!("/{input}")
    } else {
        format!("{cwd}/{input}")
    };

    let mut parts: Vec<&str> = Vec::new();
    for component in raw.split('/') {
        match component {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}
