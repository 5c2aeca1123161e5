//! The window manager state machine.
//!
//! Per-window states are {normal, minimized, maximized} x {focused,
//! unfocused}. At most one window is focused; a minimized window is never
//! the focused window; the focused window always holds the strict
//! maximum z-index. The z counter only ever grows, so stacking never
//! needs renormalization within a session.

use log::debug;
use webos_types::{Point, Size};

use crate::window::{AppType, WindowData, WindowId, WindowState};

/// Cascade origin for the first window.
const CASCADE_ORIGIN: Point = Point::new(50, 50);
/// Cascade offset applied per already-open window, both axes.
const CASCADE_STEP: i32 = 20;
/// Default size for new windows.
const DEFAULT_SIZE: Size = Size::new(600, 400);
/// First z-index handed out; desktop chrome sits below this.
const BASE_Z: u32 = 10;

/// Registry of open windows with focus and stacking policy.
pub struct WindowManager {
    windows: Vec<WindowState>,
    active: Option<WindowId>,
    next_id: u64,
    z_counter: u32,
    cascade_origin: Point,
    cascade_step: i32,
    default_size: Size,
}

impl WindowManager {
    /// Create an empty manager with the standard cascade defaults.
    pub fn new() -> Self {
        Self::with_defaults(CASCADE_ORIGIN, CASCADE_STEP, DEFAULT_SIZE)
    }

    /// Create an empty manager with explicit placement defaults.
    pub fn with_defaults(cascade_origin: Point, cascade_step: i32, default_size: Size) -> Self {
        Self {
            windows: Vec::new(),
            active: None,
            next_id: 0,
            z_counter: BASE_Z,
            cascade_origin,
            cascade_step,
            default_size,
        }
    }

    /// All open windows in creation order.
    pub fn windows(&self) -> &[WindowState] {
        &self.windows
    }

    /// The focused window's id, if any window is focused.
    pub fn active_window_id(&self) -> Option<WindowId> {
        self.active
    }

    /// The focused window, if any.
    pub fn active_window(&self) -> Option<&WindowState> {
        let id = self.active?;
        self.get(id)
    }

    /// Look up a window by id.
    pub fn get(&self, id: WindowId) -> Option<&WindowState> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowState> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    fn next_z(&mut self) -> u32 {
        self.z_counter += 1;
        self.z_counter
    }

    /// Open a new window: cascaded position, default size, appended to
    /// the collection, immediately focused on top.
    ///
    /// The cascade offset grows with the number of already-open windows
    /// and is never wrapped; a long-lived session can cascade windows
    /// off-screen, which the presentation layer may clamp if it cares.
    pub fn open_window(&mut self, app_type: AppType, title: &str, data: WindowData) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        let shift = self.cascade_step * self.windows.len() as i32;
        let z = self.next_z();
        let window = WindowState {
            id,
            app_type,
            title: title.to_string(),
            position: self.cascade_origin.offset(shift, shift),
            size: self.default_size,
            minimized: false,
            maximized: false,
            z_index: z,
            data,
        };
        debug!("open {app_type} window {id} (z={z})");
        self.windows.push(window);
        self.active = Some(id);
        id
    }

    /// Close a window. If it was focused, focus becomes empty; no other
    /// window is promoted.
    pub fn close_window(&mut self, id: WindowId) {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != id);
        if self.windows.len() != before {
            debug!("close window {id}");
        }
        if self.active == Some(id) {
            self.active = None;
        }
    }

    /// Minimize a window. A minimized window is never rendered and never
    /// focused: if it was the active window, focus becomes empty rather
    /// than moving to the next window.
    pub fn minimize_window(&mut self, id: WindowId) {
        if let Some(w) = self.get_mut(id) {
            w.minimized = true;
            debug!("minimize window {id}");
        }
        if self.active == Some(id) {
            self.active = None;
        }
    }

    /// Toggle a window's maximized flag and focus it, regardless of
    /// which direction the toggle went.
    pub fn maximize_window(&mut self, id: WindowId) {
        let Some(w) = self.get_mut(id) else {
            return;
        };
        w.maximized = !w.maximized;
        debug!("window {id} maximized={}", w.maximized);
        self.focus_window(id);
    }

    /// Focus a window: set it active, clear its minimized flag, and
    /// raise it above everything with a fresh top z-index.
    pub fn focus_window(&mut self, id: WindowId) {
        let z = self.next_z();
        let Some(w) = self.get_mut(id) else {
            return;
        };
        w.minimized = false;
        w.z_index = z;
        self.active = Some(id);
        debug!("focus window {id} (z={z})");
    }

    /// Move a window. Direct field replacement; no viewport clamping.
    pub fn update_position(&mut self, id: WindowId, position: Point) {
        if let Some(w) = self.get_mut(id) {
            w.position = position;
        }
    }

    /// Resize a window. Direct field replacement; no clamping.
    pub fn update_size(&mut self, id: WindowId, size: Size) {
        if let Some(w) = self.get_mut(id) {
            w.size = size;
        }
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}
