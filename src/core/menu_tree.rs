// src/core/menu_tree.rs

//! Read-only snapshot of a resolved menu.
//!
//! The resolver's output is flattened into an arena: nodes refer to their parent and
//! children by [`NodeId`], so upward walks (path computation) and downward searches
//! (visibility) are plain loops. A snapshot is never edited; the editor throws it away
//! and resolves a new one after every save.

use crate::models::{SnapshotNode, TreeSnapshot};
use std::path::PathBuf;

/// Index of a node inside one [`MenuTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root directory of every tree.
    pub const ROOT: Self = Self(0);
}

/// Display and visibility data of a sub-menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryInfo {
    pub menu_id: String,
    pub name: String,
    pub icon: Option<String>,
    pub comment: Option<String>,
    pub directory_file: Option<PathBuf>,
    pub excluded: bool,
    pub no_display: bool,
}

/// Display and visibility data of an application entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub desktop_file_id: String,
    pub desktop_file_path: PathBuf,
    pub name: String,
    pub icon: Option<String>,
    pub comment: Option<String>,
    pub exec: String,
    pub terminal: bool,
    pub excluded: bool,
    pub no_display: bool,
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Directory(DirectoryInfo),
    Entry(EntryInfo),
    Separator,
}

/// One node of the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

impl MenuNode {
    /// Directory data, if this node is a directory.
    pub fn as_directory(&self) -> Option<&DirectoryInfo> {
        match &self.kind {
            NodeKind::Directory(info) => Some(info),
            _ => None,
        }
    }

    /// Entry data, if this node is an entry.
    pub fn as_entry(&self) -> Option<&EntryInfo> {
        match &self.kind {
            NodeKind::Entry(info) => Some(info),
            _ => None,
        }
    }

    /// Display name (empty for separators).
    pub fn name(&self) -> &str {
        match &self.kind {
            NodeKind::Directory(info) => &info.name,
            NodeKind::Entry(info) => &info.name,
            NodeKind::Separator => "",
        }
    }
}

/// An immutable resolved menu tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTree {
    menu_file: String,
    nodes: Vec<MenuNode>,
}

impl MenuTree {
    /// Flattens a resolver snapshot. Children keep resolver order.
    pub fn from_snapshot(snapshot: TreeSnapshot) -> Self {
        let mut nodes: Vec<MenuNode> = Vec::new();
        // (node, parent) pairs still to be placed; reversed so the first child pops first.
        let mut pending: Vec<(SnapshotNode, Option<NodeId>)> = vec![(snapshot.root, None)];

        while let Some((snapshot_node, parent)) = pending.pop() {
            let id = NodeId(nodes.len());
            let (kind, children) = convert(snapshot_node);
            nodes.push(MenuNode {
                id,
                parent,
                children: Vec::new(),
                kind,
            });
            if let Some(parent_id) = parent {
                if let Some(parent_node) = nodes.get_mut(parent_id.0) {
                    parent_node.children.push(id);
                }
            }
            pending.extend(children.into_iter().rev().map(|child| (child, Some(id))));
        }

        Self {
            menu_file: snapshot.menu_file,
            nodes,
        }
    }

    /// The root menu file this tree was resolved from.
    pub fn menu_file(&self) -> &str {
        &self.menu_file
    }

    /// Looks up a node of this snapshot.
    pub fn get(&self, id: NodeId) -> Option<&MenuNode> {
        self.nodes.get(id.0)
    }

    /// Children of `id` in resolver order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &MenuNode> + '_ {
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.get(*child))
    }

    /// Menu ids from the root's first child down to `id` (the root itself is left out).
    pub fn directory_chain(&self, id: NodeId) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut current = self.get(id);
        while let Some(node) = current {
            let Some(parent) = node.parent else { break };
            if let Some(info) = node.as_directory() {
                chain.push(info.menu_id.as_str());
            }
            current = self.get(parent);
        }
        chain.reverse();
        chain
    }

    /// Whether any directory below the root has `menu_id`, searching the whole tree.
    pub fn contains_directory(&self, menu_id: &str) -> bool {
        let mut stack: Vec<NodeId> = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            for child in self.children(id) {
                if let Some(info) = child.as_directory() {
                    if info.menu_id == menu_id {
                        return true;
                    }
                    stack.push(child.id);
                }
            }
        }
        false
    }

    /// Number of nodes in the snapshot.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn convert(node: SnapshotNode) -> (NodeKind, Vec<SnapshotNode>) {
    match node {
        SnapshotNode::Directory {
            menu_id,
            name,
            icon,
            comment,
            directory_file,
            excluded,
            no_display,
            children,
        } => (
            NodeKind::Directory(DirectoryInfo {
                menu_id,
                name,
                icon,
                comment,
                directory_file,
                excluded,
                no_display,
            }),
            children,
        ),
        SnapshotNode::Entry {
            desktop_file_id,
            desktop_file_path,
            name,
            icon,
            comment,
            exec,
            terminal,
            excluded,
            no_display,
        } => (
            NodeKind::Entry(EntryInfo {
                desktop_file_id,
                desktop_file_path,
                name,
                icon,
                comment,
                exec,
                terminal,
                excluded,
                no_display,
            }),
            Vec::new(),
        ),
        SnapshotNode::Separator => (NodeKind::Separator, Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "menu_file": "applications.menu",
        "root": {
            "type": "directory", "menu_id": "Applications", "name": "Applications",
            "children": [
                {"type": "directory", "menu_id": "Games", "name": "Games", "children": [
                    {"type": "directory", "menu_id": "Arcade", "name": "Arcade", "children": []}
                ]},
                {"type": "separator"},
                {"type": "entry", "desktop_file_id": "foo.desktop",
                 "desktop_file_path": "/usr/share/applications/foo.desktop",
                 "name": "Foo", "exec": "foo", "no_display": true}
            ]
        }
    }"#;

    fn tree() -> MenuTree {
        MenuTree::from_snapshot(serde_json::from_str(SNAPSHOT).unwrap())
    }

    #[test]
    fn test_from_snapshot_keeps_resolver_order() {
        let tree = tree();
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.menu_file(), "applications.menu");

        let kinds: Vec<&str> = tree
            .children(NodeId::ROOT)
            .map(|node| match &node.kind {
                NodeKind::Directory(_) => "dir",
                NodeKind::Entry(_) => "entry",
                NodeKind::Separator => "sep",
            })
            .collect();
        assert_eq!(kinds, vec!["dir", "sep", "entry"]);

        let entry = tree.children(NodeId::ROOT).last().unwrap();
        assert_eq!(entry.parent, Some(NodeId::ROOT));
        let info = entry.as_entry().unwrap();
        assert!(info.no_display);
        assert!(!info.terminal);
        assert_eq!(info.icon, None);
    }

    #[test]
    fn test_directory_chain_and_search() {
        let tree = tree();
        let games = tree.children(NodeId::ROOT).next().unwrap();
        let arcade = tree.children(games.id).next().unwrap();

        assert_eq!(tree.directory_chain(arcade.id), vec!["Games", "Arcade"]);
        assert!(tree.directory_chain(NodeId::ROOT).is_empty());
        assert!(tree.contains_directory("Arcade"));
        assert!(!tree.contains_directory("Office"));
    }
}
