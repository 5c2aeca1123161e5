//! Foundation types for WebOS.
//!
//! This crate contains the types shared by every WebOS crate: the error
//! enum, the `Result` alias, and the geometry primitives used by the
//! window manager and shell.

pub mod error;
pub mod geometry;

pub use error::{Result, WebosError};
pub use geometry::{Point, Rect, Size};
