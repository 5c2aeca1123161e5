//! Window manager for WebOS.
//!
//! An ordered collection of window records with a focus pointer and a
//! strictly increasing z-index counter. The manager is pure state: it
//! never renders, never clamps against a viewport, and runs on the one
//! logical thread of the shell.

mod manager;
mod window;

pub use manager::WindowManager;
pub use window::{AppType, WindowData, WindowId, WindowState};
