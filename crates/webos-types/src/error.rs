//! Error types for WebOS.

use std::io;

/// Errors produced by the WebOS framework.
#[derive(Debug, thiserror::Error)]
pub enum WebosError {
    #[error("storage error: {0}")]
    Store(String),

    #[error("VFS error: {0}")]
    Vfs(String),

    #[error("window manager error: {0}")]
    Wm(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, WebosError>;
