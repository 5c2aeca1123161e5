//! Tree nodes: files with text content, directories with named children.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Opaque node identifier, assigned at creation and stable for the
/// node's lifetime. Strictly monotonic within one file system.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// What a node is: a file carrying content, or a directory carrying
/// children keyed by name. The two capabilities are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    File {
        content: String,
    },
    Dir {
        /// Direct children, keyed by segment name. Sibling names are
        /// unique by construction; iteration is lexicographic.
        children: BTreeMap<String, FileNode>,
    },
}

/// A single node in the virtual file system tree.
///
/// Every non-root node is owned by exactly one parent directory's
/// children map, so the tree cannot share nodes or form cycles. Nodes do
/// not cache their own path; resolution is always a top-down walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub id: NodeId,
    pub name: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl FileNode {
    /// Create a file node.
    pub fn file(id: NodeId, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::File {
                content: content.into(),
            },
        }
    }

    /// Create an empty directory node.
    pub fn dir(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Dir {
                children: BTreeMap::new(),
            },
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Dir { .. })
    }

    /// File content, or `None` for directories.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { content } => Some(content),
            NodeKind::Dir { .. } => None,
        }
    }

    /// Children map, or `None` for files.
    pub fn children(&self) -> Option<&BTreeMap<String, FileNode>> {
        match &self.kind {
            NodeKind::Dir { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut BTreeMap<String, FileNode>> {
        match &mut self.kind {
            NodeKind::Dir { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&FileNode> {
        self.children().and_then(|c| c.get(name))
    }

    /// The largest id in this subtree, used to restart the id counter
    /// after loading a snapshot.
    pub(crate) fn max_id(&self) -> u64 {
        let mut max = self.id.0;
        if let NodeKind::Dir { children } = &self.kind {
            for child in children.values() {
                max = max.max(child.max_id());
            }
        }
        max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_accessors() {
        let f = FileNode::file(NodeId(1), "a.txt", "hello");
        assert!(f.is_file());
        assert!(!f.is_dir());
        assert_eq!(f.content(), Some("hello"));
        assert!(f.children().is_none());
    }

    #[test]
    fn dir_accessors() {
        let d = FileNode::dir(NodeId(2), "docs");
        assert!(d.is_dir());
        assert_eq!(d.content(), None);
        assert!(d.children().unwrap().is_empty());
    }

    #[test]
    fn serde_shape_uses_kind_tag() {
        let f = FileNode::file(NodeId(7), "a.txt", "x");
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["kind"], "file");
        assert_eq!(json["content"], "x");
        assert_eq!(json["name"], "a.txt");

        let d = FileNode::dir(NodeId(8), "docs");
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "dir");
        assert!(json["children"].is_object());
    }

    #[test]
    fn serde_roundtrip_nested() {
        let mut root = FileNode::dir(NodeId(0), "root");
        let mut docs = FileNode::dir(NodeId(1), "docs");
        docs.children_mut().unwrap().insert(
            "w.txt".into(),
            FileNode::file(NodeId(2), "w.txt", "line1\nline2 / \u{00e9}\u{1F600}"),
        );
        root.children_mut().unwrap().insert("docs".into(), docs);
        root.children_mut()
            .unwrap()
            .insert("empty".into(), FileNode::dir(NodeId(3), "empty"));

        let json = serde_json::to_string(&root).unwrap();
        let back: FileNode = serde_json::from_str(&json).unwrap();
        assert_eq!(root, back);
    }

    #[test]
    fn max_id_walks_subtree() {
        let mut root = FileNode::dir(NodeId(0), "root");
        let mut docs = FileNode::dir(NodeId(5), "docs");
        docs.children_mut()
            .unwrap()
            .insert("f".into(), FileNode::file(NodeId(9), "f", ""));
        root.children_mut().unwrap().insert("docs".into(), docs);
        assert_eq!(root.max_id(), 9);
    }
}
