//! Desktop configuration, loaded from TOML.
//!
//! Every field is serde-defaulted so a partial (or absent) config file
//! still yields a working desktop.

use serde::Deserialize;

use webos_types::{Point, Result, Size, WebosError};

/// The synthwave grid the desktop ships with.
pub const DEFAULT_WALLPAPER: &str = "repeating-linear-gradient(90deg, transparent, transparent 59px, rgba(255,0,255,0.18) 59px, rgba(255,0,255,0.18) 60px), repeating-linear-gradient(0deg, transparent, transparent 59px, rgba(255,0,255,0.18) 59px, rgba(255,0,255,0.18) 60px), linear-gradient(to bottom, #0a0014 0%, #1a0030 50%, #2d004d 75%, #0a0a2e 100%)";

/// Default accent color (magenta, matching the wallpaper grid).
pub const DEFAULT_ACCENT: &str = "#ff00ff";

/// Desktop session configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Width new windows open with.
    pub window_width: u32,
    /// Height new windows open with.
    pub window_height: u32,
    /// X of the first cascade position.
    pub cascade_x: i32,
    /// Y of the first cascade position.
    pub cascade_y: i32,
    /// Per-window cascade offset in pixels.
    pub cascade_step: i32,
    /// Wallpaper used when none is persisted.
    pub wallpaper: String,
    /// Accent color used when none is persisted.
    pub accent: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            window_width: 600,
            window_height: 400,
            cascade_x: 50,
            cascade_y: 50,
            cascade_step: 20,
            wallpaper: DEFAULT_WALLPAPER.to_string(),
            accent: DEFAULT_ACCENT.to_string(),
        }
    }
}

impl ShellConfig {
    /// Parse from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(WebosError::from)
    }

    /// Load from a file. A missing file is the default config; a present
    /// but unparseable file is an error.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(WebosError::from(e)),
        }
    }

    /// First cascade position.
    pub fn cascade_origin(&self) -> Point {
        Point::new(self.cascade_x, self.cascade_y)
    }

    /// Size new windows open with.
    pub fn default_window_size(&self) -> Size {
        Size::new(self.window_width, self.window_height)
    }
}
