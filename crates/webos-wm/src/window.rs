//! Window records and the application tags they mount.

use std::fmt;
use std::str::FromStr;

use webos_types::{Point, Size, WebosError};

/// Opaque window identifier, strictly monotonic within one manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which application body a window mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppType {
    Terminal,
    Files,
    Editor,
    Snake,
    Settings,
    Browser,
    Sheets,
    Deck,
    Calculator,
}

impl AppType {
    /// All known app types, in launcher order.
    pub const ALL: &[AppType] = &[
        AppType::Terminal,
        AppType::Files,
        AppType::Editor,
        AppType::Snake,
        AppType::Settings,
        AppType::Browser,
        AppType::Sheets,
        AppType::Deck,
        AppType::Calculator,
    ];

    /// The tag string used in launch commands and persisted payloads.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::Files => "files",
            Self::Editor => "editor",
            Self::Snake => "snake",
            Self::Settings => "settings",
            Self::Browser => "browser",
            Self::Sheets => "sheets",
            Self::Deck => "deck",
            Self::Calculator => "calculator",
        }
    }

    /// Default window title when no explicit title is given.
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Terminal => "Terminal",
            Self::Files => "File Manager",
            Self::Editor => "Text Editor",
            Self::Snake => "Snake",
            Self::Settings => "Settings",
            Self::Browser => "Internet Explorer",
            Self::Sheets => "Sheets",
            Self::Deck => "Deck",
            Self::Calculator => "Calculator",
        }
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AppType {
    type Err = WebosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppType::ALL
            .iter()
            .copied()
            .find(|app| app.tag() == s)
            .ok_or_else(|| WebosError::Wm(format!("unknown app type: {s}")))
    }
}

/// Typed launch payload handed to the mounted app.
///
/// Each variant's shape is known per app type, so consumers match
/// instead of downcasting an untyped bag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WindowData {
    #[default]
    None,
    /// Editor windows preload the file at `path`.
    Editor { path: String },
}

/// One window's state. Fields are mutated only through the manager.
#[derive(Debug, Clone)]
pub struct WindowState {
    pub id: WindowId,
    pub app_type: AppType,
    pub title: String,
    pub position: Point,
    pub size: Size,
    pub minimized: bool,
    pub maximized: bool,
    pub z_index: u32,
    pub data: WindowData,
}
