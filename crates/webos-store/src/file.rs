//! File-backed storage: the whole key/value map serialized as one JSON
//! object.
//!
//! Loading tolerates a missing or malformed file by starting empty, and
//! every `set`/`remove` rewrites the file. Write failures are logged and
//! otherwise ignored; the in-memory copy stays authoritative for the
//! rest of the session.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::Storage;

/// A `Storage` implementation persisted to a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading any existing contents.
    ///
    /// A missing file yields an empty store. A file that exists but does
    /// not parse as a JSON string map also yields an empty store; the
    /// parse failure is logged, never surfaced.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<HashMap<String, String>>(&text) {
                Ok(map) => map,
                Err(e) => {
                    warn!("ignoring malformed store file {}: {e}", path.display());
                    HashMap::new()
                },
            },
            Err(_) => HashMap::new(),
        };
        debug!("opened store {} ({} keys)", path.display(), values.len());
        Self { path, values }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let json = match serde_json::to_string_pretty(&self.values) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize store: {e}");
                return;
            },
        };
        if let Err(e) = fs::write(&self.path, json) {
            warn!("failed to write store file {}: {e}", self.path.display());
        }
    }
}

impl Storage for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.flush();
        }
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}
