//! Session storage for WebOS.
//!
//! Models browser local storage: a flat map of string keys to string
//! values. Consumers never see write failures; a backend that cannot
//! persist logs a warning and keeps the value in memory, which matches
//! the "absent or present, never failed" contract the rest of the system
//! is written against.

use std::cell::RefCell;
use std::rc::Rc;

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Shared handle to a storage backend.
///
/// The shell, the VFS, and the app controllers all persist into the same
/// store; the whole system runs on one logical thread, so a `Rc<RefCell>`
/// is the entire sharing discipline.
pub type SharedStorage = Rc<RefCell<dyn Storage>>;

/// Wrap a storage backend in a shared handle.
pub fn shared(storage: impl Storage + 'static) -> SharedStorage {
    Rc::new(RefCell::new(storage))
}

/// Well-known storage keys.
pub mod keys {
    /// Serialized virtual file system snapshot.
    pub const FS: &str = "webos_fs";
    /// Desktop wallpaper (CSS background string or color).
    pub const WALLPAPER: &str = "webos_wallpaper";
    /// Accent color.
    pub const ACCENT: &str = "webos_accent";
    /// Spreadsheet cell contents (JSON object).
    pub const SHEETS: &str = "webos_sheets_data";
    /// Slide deck contents (JSON array).
    pub const DECK: &str = "webos_deck_data";
}

/// A flat string key/value store.
///
/// All operations are infallible from the caller's point of view: `get`
/// returns `None` for anything that is missing *or* unreadable, and
/// `set`/`remove` absorb backend failures internally.
pub trait Storage {
    /// Fetch the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);

    /// Delete the value stored under `key`, if any.
    fn remove(&mut self, key: &str);

    /// All currently stored keys, in unspecified order.
    fn keys(&self) -> Vec<String>;
}
