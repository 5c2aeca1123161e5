//! One desktop session: the file system, the window manager, and the
//! persisted look-and-feel, all hanging off a single storage handle.

use std::rc::Rc;

use log::info;
use webos_apps::{DeckState, EditorSession, SheetStore};
use webos_store::{SharedStorage, keys};
use webos_vfs::FileSystem;
use webos_wm::{AppType, WindowData, WindowId, WindowManager};

use crate::config::ShellConfig;

/// The running desktop.
pub struct Session {
    store: SharedStorage,
    fs: FileSystem,
    wm: WindowManager,
    wallpaper: String,
    accent: String,
}

impl Session {
    /// Start a session with the default configuration.
    pub fn new(store: SharedStorage) -> Self {
        Self::with_config(ShellConfig::default(), store)
    }

    /// Start a session. Wallpaper and accent come from storage when
    /// persisted, from `config` otherwise.
    pub fn with_config(config: ShellConfig, store: SharedStorage) -> Self {
        let (wallpaper, accent) = {
            let s = store.borrow();
            (
                s.get(keys::WALLPAPER).unwrap_or_else(|| config.wallpaper.clone()),
                s.get(keys::ACCENT).unwrap_or_else(|| config.accent.clone()),
            )
        };
        let fs = FileSystem::with_storage(Rc::clone(&store));
        let wm = WindowManager::with_defaults(
            config.cascade_origin(),
            config.cascade_step,
            config.default_window_size(),
        );
        info!("session started");
        Self {
            store,
            fs,
            wm,
            wallpaper,
            accent,
        }
    }

    pub fn fs(&self) -> &FileSystem {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut FileSystem {
        &mut self.fs
    }

    pub fn wm(&self) -> &WindowManager {
        &self.wm
    }

    pub fn wm_mut(&mut self) -> &mut WindowManager {
        &mut self.wm
    }

    // --- Look and feel -------------------------------------------------

    pub fn wallpaper(&self) -> &str {
        &self.wallpaper
    }

    /// Change the wallpaper and persist it.
    pub fn set_wallpaper(&mut self, wallpaper: impl Into<String>) {
        self.wallpaper = wallpaper.into();
        self.store.borrow_mut().set(keys::WALLPAPER, &self.wallpaper);
    }

    pub fn accent(&self) -> &str {
        &self.accent
    }

    /// Change the accent color and persist it.
    pub fn set_accent(&mut self, accent: impl Into<String>) {
        self.accent = accent.into();
        self.store.borrow_mut().set(keys::ACCENT, &self.accent);
    }

    // --- Launcher ------------------------------------------------------

    /// Open a new window for `app` under its default title.
    pub fn launch(&mut self, app: AppType) -> WindowId {
        self.wm
            .open_window(app, app.default_title(), WindowData::None)
    }

    /// Open `path` in a new editor window titled after the file name.
    pub fn open_file(&mut self, path: &str) -> WindowId {
        let title = path.rsplit('/').next().unwrap_or(path);
        self.wm.open_window(
            AppType::Editor,
            title,
            WindowData::Editor {
                path: path.to_string(),
            },
        )
    }

    // --- App state -----------------------------------------------------

    /// An editor buffer preloaded from `path`.
    pub fn open_editor(&self, path: &str) -> EditorSession {
        EditorSession::open(&self.fs, path)
    }

    /// The spreadsheet cells, bound to this session's store.
    pub fn open_sheets(&self) -> SheetStore {
        SheetStore::with_storage(Rc::clone(&self.store))
    }

    /// The slide deck, bound to this session's store.
    pub fn open_deck(&self) -> DeckState {
        DeckState::with_storage(Rc::clone(&self.store))
    }

    /// A taskbar button click: the active unminimized window minimizes,
    /// anything else comes to the front.
    pub fn taskbar_click(&mut self, id: WindowId) {
        let is_active_unminimized = self.wm.active_window_id() == Some(id)
            && self.wm.get(id).is_some_and(|w| !w.minimized);
        if is_active_unminimized {
            self.wm.minimize_window(id);
        } else {
            self.wm.focus_window(id);
        }
    }
}
