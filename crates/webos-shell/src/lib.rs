//! Desktop session wiring for WebOS.
//!
//! Glues the file system, window manager, and persisted look-and-feel
//! into one [`Session`], configured through [`ShellConfig`].

pub mod config;
pub mod session;

pub use config::{DEFAULT_ACCENT, DEFAULT_WALLPAPER, ShellConfig};
pub use session::Session;
