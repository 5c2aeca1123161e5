//! Text editor session state.
//!
//! Mirrors the save semantics of the file system exactly: saving to an
//! existing path goes through `write_file` (which never creates), while
//! "save as" goes through `create_file` (which may replace a same-named
//! sibling, last write wins).

use log::debug;
use webos_vfs::{FileSystem, split_parent};

/// One open editor buffer.
#[derive(Debug, Default)]
pub struct EditorSession {
    path: Option<String>,
    content: String,
    dirty: bool,
    status: String,
}

impl EditorSession {
    /// A fresh untitled buffer.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Open `path`, preloading the file's content.
    ///
    /// A path that does not resolve to a file yields an empty buffer
    /// with a "File not found" status, matching the shell's silent-miss
    /// convention.
    pub fn open(fs: &FileSystem, path: &str) -> Self {
        match fs.read_file(path) {
            Some(content) => Self {
                path: Some(path.to_string()),
                content: content.to_string(),
                dirty: false,
                status: String::new(),
            },
            None => Self {
                path: Some(path.to_string()),
                content: String::new(),
                dirty: false,
                status: "File not found".to_string(),
            },
        }
    }

    /// The path this buffer is bound to, if any.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the buffer has unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Last status message ("Saved", "File not found", ...).
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Replace the buffer content, marking it dirty.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.dirty = true;
    }

    /// Save to the bound path.
    ///
    /// Returns `false` (and leaves the buffer dirty) when there is no
    /// bound path or the file no longer exists; use [`save_as`] for
    /// those cases.
    ///
    /// [`save_as`]: EditorSession::save_as
    pub fn save(&mut self, fs: &mut FileSystem) -> bool {
        let Some(path) = &self.path else {
            self.status = "No file name".to_string();
            return false;
        };
        if fs.read_file(path).is_none() {
            self.status = "File not found".to_string();
            return false;
        }
        fs.write_file(path, &self.content);
        debug!("saved {path}");
        self.dirty = false;
        self.status = "Saved".to_string();
        true
    }

    /// Save under a new absolute path, creating the file.
    ///
    /// Fails only when the path has no valid parent directory. Binds the
    /// buffer to the new path on success.
    pub fn save_as(&mut self, fs: &mut FileSystem, path: &str) -> bool {
        let Some((parent, name)) = split_parent(path) else {
            self.status = "Invalid path".to_string();
            return false;
        };
        if !fs.is_dir(&parent) {
            self.status = format!("No such directory: {parent}");
            return false;
        }
        fs.create_file(&parent, name, &self.content);
        debug!("saved {path} (new file)");
        self.path = Some(path.to_string());
        self.dirty = false;
        self.status = "Saved".to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_preloads_content() {
        let fs = FileSystem::new();
        let ed = EditorSession::open(&fs, "/documents/welcome.txt");
        assert!(ed.content().starts_with("Welcome to WebOS!"));
        assert!(!ed.is_dirty());
        assert_eq!(ed.status(), "");
    }

    #[test]
    fn open_missing_file_reports_status() {
        let fs = FileSystem::new();
        let ed = EditorSession::open(&fs, "/documents/ghost.txt");
        assert_eq!(ed.content(), "");
        assert_eq!(ed.status(), "File not found");
    }

    #[test]
    fn edit_save_roundtrip() {
        let mut fs = FileSystem::new();
        let mut ed = EditorSession::open(&fs, "/documents/welcome.txt");
        ed.set_content("rewritten");
        assert!(ed.is_dirty());
        assert!(ed.save(&mut fs));
        assert!(!ed.is_dirty());
        assert_eq!(ed.status(), "Saved");
        assert_eq!(fs.read_file("/documents/welcome.txt"), Some("rewritten"));
    }

    #[test]
    fn save_without_path_fails() {
        let mut fs = FileSystem::new();
        let mut ed = EditorSession::blank();
        ed.set_content("draft");
        assert!(!ed.save(&mut fs));
        assert!(ed.is_dirty());
        assert_eq!(ed.status(), "No file name");
    }

    #[test]
    fn save_to_deleted_file_fails() {
        let mut fs = FileSystem::new();
        let mut ed = EditorSession::open(&fs, "/documents/welcome.txt");
        fs.delete_item("/documents/welcome.txt");
        ed.set_content("late edit");
        assert!(!ed.save(&mut fs));
        // write_file never creates, so nothing reappeared.
        assert_eq!(fs.read_file("/documents/welcome.txt"), None);
    }

    #[test]
    fn save_as_creates_and_rebinds() {
        let mut fs = FileSystem::new();
        let mut ed = EditorSession::blank();
        ed.set_content("notes");
        assert!(ed.save_as(&mut fs, "/documents/notes.txt"));
        assert_eq!(ed.path(), Some("/documents/notes.txt"));
        assert_eq!(fs.read_file("/documents/notes.txt"), Some("notes"));

        // Subsequent plain saves now work.
        ed.set_content("notes v2");
        assert!(ed.save(&mut fs));
        assert_eq!(fs.read_file("/documents/notes.txt"), Some("notes v2"));
    }

    #[test]
    fn save_as_into_missing_dir_fails() {
        let mut fs = FileSystem::new();
        let mut ed = EditorSession::blank();
        ed.set_content("x");
        assert!(!ed.save_as(&mut fs, "/nowhere/x.txt"));
        assert!(ed.status().contains("No such directory"));
        assert_eq!(ed.path(), None);
    }

    #[test]
    fn save_as_root_file() {
        let mut fs = FileSystem::new();
        let mut ed = EditorSession::blank();
        ed.set_content("top");
        assert!(ed.save_as(&mut fs, "/top.txt"));
        assert_eq!(fs.read_file("/top.txt"), Some("top"));
    }
}
