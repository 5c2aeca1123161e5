//! The `FileSystem` controller: path resolution, CRUD, persistence.

use log::{debug, warn};
use webos_store::{SharedStorage, keys};

use crate::node::{FileNode, NodeId, NodeKind};

/// Split a path into slash-delimited segments, dropping empty ones so
/// that `/`, `//a/`, and `a/` all normalize consistently. Root is the
/// empty segment list.
fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Split a path into its parent path and final segment name.
///
/// Returns `None` for the root path (root has no parent). The parent
/// path comes back normalized with a leading slash.
pub fn split_parent(path: &str) -> Option<(String, &str)> {
    let segs = segments(path);
    let (&name, parents) = segs.split_last()?;
    Some((format!("/{}", parents.join("/")), name))
}

/// The virtual file system controller.
///
/// Owns the node tree exclusively; consumers either borrow read views
/// (`read_file`, `list_dir`) or go through the mutating operations, all
/// of which persist a fresh snapshot when a store is attached.
pub struct FileSystem {
    root: FileNode,
    next_id: u64,
    store: Option<SharedStorage>,
}

impl FileSystem {
    /// Create an ephemeral file system with the default tree and no
    /// persistence. Used by tests and throwaway sessions.
    pub fn new() -> Self {
        let mut next_id = 0;
        let root = default_tree(&mut next_id);
        Self {
            root,
            next_id,
            store: None,
        }
    }

    /// Create a file system backed by `store`.
    ///
    /// A stored snapshot, if present and parseable, replaces the default
    /// tree. A malformed snapshot is logged and discarded; the session
    /// starts from the default tree as if nothing were stored.
    pub fn with_storage(store: SharedStorage) -> Self {
        let snapshot = store.borrow().get(keys::FS);
        let mut fs = match snapshot {
            Some(json) => match serde_json::from_str::<FileNode>(&json) {
                Ok(root) if root.is_dir() => {
                    let next_id = root.max_id() + 1;
                    Self {
                        root,
                        next_id,
                        store: None,
                    }
                },
                Ok(_) => {
                    warn!("stored VFS snapshot has a non-directory root, using defaults");
                    Self::new()
                },
                Err(e) => {
                    warn!("ignoring malformed VFS snapshot: {e}");
                    Self::new()
                },
            },
            None => Self::new(),
        };
        fs.store = Some(store);
        fs
    }

    /// The root directory node.
    pub fn root(&self) -> &FileNode {
        &self.root
    }

    fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Resolve a path to a node by walking the children maps from the
    /// root. The first missing segment aborts resolution.
    pub fn find(&self, path: &str) -> Option<&FileNode> {
        let mut current = &self.root;
        for seg in segments(path) {
            current = current.child(seg)?;
        }
        Some(current)
    }

    fn find_mut(&mut self, path: &str) -> Option<&mut FileNode> {
        let mut current = &mut self.root;
        for seg in segments(path) {
            current = current.children_mut()?.get_mut(seg)?;
        }
        Some(current)
    }

    /// Whether the path resolves to any node.
    pub fn exists(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    /// Whether the path resolves to a directory.
    pub fn is_dir(&self, path: &str) -> bool {
        self.find(path).is_some_and(FileNode::is_dir)
    }

    /// Read a file's content. `None` unless the path resolves to a file.
    pub fn read_file(&self, path: &str) -> Option<&str> {
        self.find(path).and_then(FileNode::content)
    }

    /// Overwrite an existing file's content.
    ///
    /// Silent no-op if the path does not resolve to a file: unlike
    /// `create_file`, this never brings a file into existence.
    pub fn write_file(&mut self, path: &str, content: &str) {
        match self.find_mut(path) {
            Some(node) => match &mut node.kind {
                NodeKind::File { content: existing } => {
                    *existing = content.to_string();
                    debug!("write_file {path} ({} bytes)", content.len());
                    self.persist();
                },
                NodeKind::Dir { .. } => debug!("write_file ignored, {path} is a directory"),
            },
            None => debug!("write_file ignored, {path} does not exist"),
        }
    }

    /// Create a file under `parent_path`.
    ///
    /// No-op unless `parent_path` resolves to a directory. An existing
    /// sibling with the same name is replaced without warning
    /// (last-write-wins).
    pub fn create_file(&mut self, parent_path: &str, name: &str, content: &str) {
        let id = self.alloc_id();
        let node = FileNode::file(id, name, content);
        self.insert_child(parent_path, node);
    }

    /// Create an empty directory under `parent_path`. Same semantics as
    /// `create_file`.
    pub fn create_dir(&mut self, parent_path: &str, name: &str) {
        let id = self.alloc_id();
        let node = FileNode::dir(id, name);
        self.insert_child(parent_path, node);
    }

    fn insert_child(&mut self, parent_path: &str, node: FileNode) {
        match self.find_mut(parent_path).and_then(FileNode::children_mut) {
            Some(children) => {
                debug!("create {} under {parent_path}", node.name);
                children.insert(node.name.clone(), node);
                self.persist();
            },
            None => debug!(
                "create ignored, {parent_path} is not an existing directory"
            ),
        }
    }

    /// Remove a node and its entire subtree.
    ///
    /// No-op if the path does not resolve. The root cannot be deleted;
    /// it has no parent to detach from.
    pub fn delete_item(&mut self, path: &str) {
        let Some((parent_path, name)) = split_parent(path) else {
            debug!("delete ignored, cannot remove root");
            return;
        };
        let removed = self
            .find_mut(&parent_path)
            .and_then(FileNode::children_mut)
            .and_then(|children| children.remove(name));
        if removed.is_some() {
            debug!("deleted {path}");
            self.persist();
        } else {
            debug!("delete ignored, {path} does not exist");
        }
    }

    /// List a directory's direct children.
    ///
    /// Empty for a missing path, a file path, or an empty directory.
    /// Ordering is lexicographic by name.
    pub fn list_dir(&self, path: &str) -> Vec<&FileNode> {
        self.find(path)
            .and_then(FileNode::children)
            .map(|c| c.values().collect())
            .unwrap_or_default()
    }

    /// Replace the entire tree with a fresh default tree.
    pub fn reset(&mut self) {
        self.next_id = 0;
        self.root = default_tree(&mut self.next_id);
        debug!("file system reset to defaults");
        self.persist();
    }

    fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        match serde_json::to_string(&self.root) {
            Ok(json) => store.borrow_mut().set(keys::FS, &json),
            Err(e) => warn!("failed to serialize VFS snapshot: {e}"),
        }
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in default tree: `/documents/welcome.txt` and an empty
/// `/desktop`.
fn default_tree(next_id: &mut u64) -> FileNode {
    let mut alloc = || {
        let id = NodeId(*next_id);
        *next_id += 1;
        id
    };
    let mut root = FileNode::dir(alloc(), "root");
    let mut documents = FileNode::dir(alloc(), "documents");
    let welcome = FileNode::file(
        alloc(),
        "welcome.txt",
        "Welcome to WebOS! This is a simple text file.",
    );
    documents
        .children_mut()
        .expect("documents is a directory")
        .insert(welcome.name.clone(), welcome);
    let desktop = FileNode::dir(alloc(), "desktop");
    let children = root.children_mut().expect("root is a directory");
    children.insert(documents.name.clone(), documents);
    children.insert(desktop.name.clone(), desktop);
    root
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use webos_store::{MemoryStore, shared};

    use super::*;

    #[test]
    fn default_tree_contents() {
        let fs = FileSystem::new();
        assert!(fs.is_dir("/documents"));
        assert!(fs.is_dir("/desktop"));
        assert_eq!(
            fs.read_file("/documents/welcome.txt"),
            Some("Welcome to WebOS! This is a simple text file.")
        );
    }

    #[test]
    fn root_path_forms_are_equivalent() {
        let fs = FileSystem::new();
        for path in ["/", "", "//"] {
            assert!(fs.is_dir(path), "expected {path:?} to resolve to root");
            assert_eq!(fs.list_dir(path).len(), 2);
        }
    }

    #[test]
    fn path_normalization_drops_empty_segments() {
        let fs = FileSystem::new();
        assert!(fs.exists("/documents/welcome.txt"));
        assert!(fs.exists("//documents//welcome.txt"));
        assert!(fs.exists("documents/welcome.txt/"));
    }

    #[test]
    fn read_missing_file_is_none() {
        let fs = FileSystem::new();
        assert_eq!(fs.read_file("/nope.txt"), None);
        // A directory is not a file.
        assert_eq!(fs.read_file("/documents"), None);
    }

    #[test]
    fn write_updates_existing_file_only() {
        let mut fs = FileSystem::new();
        fs.write_file("/documents/welcome.txt", "updated");
        assert_eq!(fs.read_file("/documents/welcome.txt"), Some("updated"));

        // Deliberate asymmetry: write never creates.
        fs.write_file("/documents/new.txt", "ghost");
        assert_eq!(fs.read_file("/documents/new.txt"), None);
    }

    #[test]
    fn create_file_and_read_back() {
        let mut fs = FileSystem::new();
        fs.create_file("/documents", "note.txt", "hi");
        assert_eq!(fs.read_file("/documents/note.txt"), Some("hi"));
    }

    #[test]
    fn create_under_missing_parent_is_noop() {
        let mut fs = FileSystem::new();
        fs.create_file("/nowhere", "a.txt", "x");
        assert!(!fs.exists("/nowhere/a.txt"));
        // A file is not a valid parent either.
        fs.create_file("/documents/welcome.txt", "a.txt", "x");
        assert!(!fs.exists("/documents/welcome.txt/a.txt"));
    }

    #[test]
    fn create_overwrites_same_named_sibling() {
        let mut fs = FileSystem::new();
        fs.create_file("/", "x", "first");
        fs.create_file("/", "x", "second");
        assert_eq!(fs.read_file("/x"), Some("second"));

        // A dir can replace a file of the same name, last write wins.
        fs.create_dir("/", "x");
        assert!(fs.is_dir("/x"));
    }

    #[test]
    fn delete_removes_subtree_transitively() {
        let mut fs = FileSystem::new();
        fs.create_dir("/", "a");
        fs.create_dir("/a", "b");
        fs.create_file("/a/b", "deep.txt", "bottom");
        assert_eq!(fs.read_file("/a/b/deep.txt"), Some("bottom"));

        fs.delete_item("/a");
        assert!(!fs.exists("/a"));
        assert!(!fs.exists("/a/b"));
        assert_eq!(fs.read_file("/a/b/deep.txt"), None);
        assert!(fs.list_dir("/a").is_empty());
    }

    #[test]
    fn delete_missing_and_root_are_noops() {
        let mut fs = FileSystem::new();
        fs.delete_item("/ghost");
        fs.delete_item("/");
        assert!(fs.is_dir("/documents"));
    }

    #[test]
    fn list_dir_reflects_live_children() {
        let mut fs = FileSystem::new();
        fs.create_dir("/", "projects");
        fs.create_file("/", "readme.txt", "");
        let names: Vec<&str> = fs.list_dir("/").iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["desktop", "documents", "projects", "readme.txt"]);

        fs.delete_item("/projects");
        let names: Vec<&str> = fs.list_dir("/").iter().map(|n| n.name.as_str()).collect();
        assert!(!names.contains(&"projects"));
    }

    #[test]
    fn list_dir_missing_or_file_is_empty() {
        let fs = FileSystem::new();
        assert!(fs.list_dir("/ghost").is_empty());
        assert!(fs.list_dir("/documents/welcome.txt").is_empty());
        assert!(fs.list_dir("/desktop").is_empty());
    }

    #[test]
    fn disjoint_subtree_operations_commute() {
        // Same operations on unrelated paths, applied in two orders.
        let mut a = FileSystem::new();
        a.create_dir("/", "left");
        a.create_dir("/", "right");
        a.create_file("/left", "l.txt", "1");
        a.create_file("/right", "r.txt", "2");
        a.delete_item("/left/l.txt");

        let mut b = FileSystem::new();
        b.create_dir("/", "right");
        b.create_file("/right", "r.txt", "2");
        b.create_dir("/", "left");
        b.create_file("/left", "l.txt", "1");
        b.delete_item("/left/l.txt");

        let names =
            |fs: &FileSystem, p: &str| -> Vec<String> {
                fs.list_dir(p).iter().map(|n| n.name.clone()).collect()
            };
        assert_eq!(names(&a, "/"), names(&b, "/"));
        assert_eq!(names(&a, "/left"), names(&b, "/left"));
        assert_eq!(names(&a, "/right"), names(&b, "/right"));
    }

    #[test]
    fn spec_scenario_projects() {
        let mut fs = FileSystem::new();
        fs.create_dir("/", "projects");
        fs.create_file("/projects", "a.txt", "hello");
        assert_eq!(fs.read_file("/projects/a.txt"), Some("hello"));

        fs.delete_item("/projects");
        let names: Vec<&str> = fs.list_dir("/").iter().map(|n| n.name.as_str()).collect();
        assert!(!names.contains(&"projects"));
        assert_eq!(fs.read_file("/projects/a.txt"), None);
    }

    #[test]
    fn reset_restores_default_tree() {
        let mut fs = FileSystem::new();
        fs.create_dir("/", "junk");
        fs.write_file("/documents/welcome.txt", "scribbled");
        fs.reset();
        assert!(!fs.exists("/junk"));
        assert_eq!(
            fs.read_file("/documents/welcome.txt"),
            Some("Welcome to WebOS! This is a simple text file.")
        );
    }

    #[test]
    fn node_ids_are_unique_and_monotonic() {
        let mut fs = FileSystem::new();
        fs.create_file("/", "a", "");
        fs.create_file("/", "b", "");
        let a = fs.find("/a").unwrap().id;
        let b = fs.find("/b").unwrap().id;
        assert!(b > a);
        assert_ne!(fs.root().id, a);
    }

    #[test]
    fn split_parent_forms() {
        assert_eq!(
            split_parent("/projects/a.txt"),
            Some(("/projects".to_string(), "a.txt"))
        );
        assert_eq!(split_parent("/a.txt"), Some(("/".to_string(), "a.txt")));
        assert_eq!(split_parent("a.txt"), Some(("/".to_string(), "a.txt")));
        assert_eq!(split_parent("/"), None);
        assert_eq!(split_parent(""), None);
    }

    // -- persistence ----------------------------------------------------

    #[test]
    fn mutations_persist_and_reload() {
        let store = shared(MemoryStore::new());
        {
            let mut fs = FileSystem::with_storage(Rc::clone(&store));
            fs.create_dir("/", "projects");
            fs.create_file("/projects", "a.txt", "hello");
        }
        let fs = FileSystem::with_storage(store);
        assert_eq!(fs.read_file("/projects/a.txt"), Some("hello"));
        assert!(fs.read_file("/documents/welcome.txt").is_some());
    }

    #[test]
    fn malformed_snapshot_falls_back_to_defaults() {
        let store = shared(MemoryStore::new());
        store.borrow_mut().set(keys::FS, "{ definitely not a tree");
        let fs = FileSystem::with_storage(store);
        assert!(fs.is_dir("/documents"));
        assert!(fs.is_dir("/desktop"));
    }

    #[test]
    fn id_counter_resumes_past_loaded_snapshot() {
        let store = shared(MemoryStore::new());
        {
            let mut fs = FileSystem::with_storage(Rc::clone(&store));
            fs.create_file("/", "a", "");
        }
        let mut fs = FileSystem::with_storage(store);
        let old = fs.find("/a").unwrap().id;
        fs.create_file("/", "b", "");
        assert!(fs.find("/b").unwrap().id > old);
    }

    #[test]
    fn snapshot_roundtrip_with_special_content() {
        let store = shared(MemoryStore::new());
        let text = "line1\nline2 with / slash\n\u{00fc}nic\u{00f6}de \u{1F680}";
        {
            let mut fs = FileSystem::with_storage(Rc::clone(&store));
            fs.create_dir("/", "misc");
            fs.create_file("/misc", "odd.txt", text);
            fs.create_dir("/misc", "empty");
        }
        let fs = FileSystem::with_storage(store);
        assert_eq!(fs.read_file("/misc/odd.txt"), Some(text));
        assert!(fs.is_dir("/misc/empty"));
        assert!(fs.list_dir("/misc/empty").is_empty());
    }

    mod prop {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn create_then_read_roundtrips(
                name in "[a-z][a-z0-9_.]{0,11}",
                content in ".{0,64}",
            ) {
                let mut fs = FileSystem::new();
                fs.create_file("/", &name, &content);
                prop_assert_eq!(fs.read_file(&format!("/{name}")), Some(content.as_str()));
            }

            #[test]
            fn nested_dirs_resolve_at_every_depth(
                segs in proptest::collection::vec("[a-z]{1,6}", 1..5),
            ) {
                let mut fs = FileSystem::new();
                let mut parent = "/".to_string();
                for seg in &segs {
                    fs.create_dir(&parent, seg);
                    if parent == "/" {
                        parent = format!("/{seg}");
                    } else {
                        parent = format!("{parent}/{seg}");
                    }
                    prop_assert!(fs.is_dir(&parent), "missing {parent}");
                }
            }

            #[test]
            fn delete_top_removes_whole_chain(
                segs in proptest::collection::vec("[a-z]{1,6}", 1..5),
            ) {
                let mut fs = FileSystem::new();
                let mut parent = "/".to_string();
                for seg in &segs {
                    fs.create_dir(&parent, seg);
                    parent = if parent == "/" {
                        format!("/{seg}")
                    } else {
                        format!("{parent}/{seg}")
                    };
                }
                let top = format!("/{}", segs[0]);
                fs.delete_item(&top);
                prop_assert!(!fs.exists(&top));
                prop_assert!(!fs.exists(&parent));
            }

            #[test]
            fn tree_serde_roundtrip(
                names in proptest::collection::vec("[a-z]{1,8}", 1..6),
                content in ".{0,32}",
            ) {
                let mut fs = FileSystem::new();
                for name in &names {
                    fs.create_file("/desktop", name, &content);
                }
                let json = serde_json::to_string(fs.root()).unwrap();
                let back: FileNode = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(fs.root(), &back);
            }
        }
    }
}
