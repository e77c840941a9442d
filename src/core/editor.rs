// src/core/editor.rs

//! The menu editor.
//!
//! [`MenuEditor`] keeps, per namespace, two resolved snapshots (the full tree and the
//! visible tree) and the override document. Queries read the snapshots. Every mutation
//! edits the override document and/or writes user key-file copies, then calls
//! [`MenuEditor::save`], which writes both documents and resolves everything again.
//! Handles ([`NodeRef`]) therefore only live until the next mutation.

use crate::constants::{
    DESKTOP_EXTENSION, DIRECTORY_EXTENSION, OTHER_MENU_ID, USER_CUSTOM_SUFFIX, keys,
};
use crate::core::keyfile::{KeyFile, KeyFileError, KeyFileType};
use crate::core::layout::{Layout, LayoutError, LayoutItem};
use crate::core::menu_tree::{DirectoryInfo, EntryInfo, MenuNode, MenuTree, NodeId, NodeKind};
use crate::core::naming;
use crate::core::override_doc::{self, OverrideDocument, OverrideError, RuleKind};
use crate::core::paths::MenuPaths;
use crate::core::resolver::{MenuResolver, ResolveError};
use crate::dev_utils::BlockTimer;
use crate::models::{ItemDetails, MenuDetails, Namespace, ResolveFlags};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Override(#[from] OverrideError),
    #[error(transparent)]
    KeyFile(#[from] KeyFileError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("New menu items need a name")]
    MissingName,
    #[error("Node {node:?} does not exist in the current {namespace} menu (it may be stale)")]
    NodeNotFound { namespace: Namespace, node: NodeId },
    #[error("'{0}' is not a menu")]
    NotADirectory(String),
    #[error("'{0}' is not an application entry")]
    NotAnEntry(String),
    #[error("'{anchor}' is not an entry of menu '{menu}'")]
    AnchorNotInMenu { anchor: String, menu: String },
    #[error("Nothing found at menu path '{0}'")]
    PathNotFound(String),
}

/// A node of the current snapshot of one namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub namespace: Namespace,
    pub node: NodeId,
}

impl NodeRef {
    /// The root menu of `namespace`.
    pub fn root(namespace: Namespace) -> Self {
        Self {
            namespace,
            node: NodeId::ROOT,
        }
    }
}

struct NamespaceState {
    tree: MenuTree,
    visible_tree: MenuTree,
    document: OverrideDocument,
}

/// Key-file fields to write for an entry. `None` and empty strings leave the key alone.
#[derive(Debug, Default)]
struct ItemFields<'a> {
    icon: Option<&'a str>,
    name: Option<&'a str>,
    comment: Option<&'a str>,
    command: Option<&'a str>,
    use_terminal: Option<bool>,
    no_display: Option<bool>,
    hidden: Option<bool>,
}

impl<'a> ItemFields<'a> {
    fn from_details(details: &'a ItemDetails) -> Self {
        Self {
            icon: Some(details.icon.as_str()),
            name: Some(details.name.as_str()),
            comment: Some(details.comment.as_str()),
            command: Some(details.command.as_str()),
            use_terminal: Some(details.use_terminal),
            ..Default::default()
        }
    }
}

/// Key-file fields to write for a menu.
#[derive(Debug, Default)]
struct MenuFields<'a> {
    icon: Option<&'a str>,
    name: Option<&'a str>,
    comment: Option<&'a str>,
    no_display: Option<bool>,
}

impl<'a> MenuFields<'a> {
    fn from_details(details: &'a MenuDetails) -> Self {
        Self {
            icon: Some(details.icon.as_str()),
            name: Some(details.name.as_str()),
            comment: Some(details.comment.as_str()),
            no_display: None,
        }
    }
}

/// The children of a target menu with the slot a new or moved child goes into.
struct Placement {
    items: Vec<LayoutItem>,
    index: usize,
}

impl Placement {
    fn into_layout(mut self, item: LayoutItem) -> Layout {
        let index = self.index.min(self.items.len());
        self.items.insert(index, item);
        Layout::from_order(self.items)
    }
}

/// Edits the applications and settings menus of one user.
pub struct MenuEditor<R: MenuResolver> {
    resolver: R,
    paths: MenuPaths,
    locale: Option<String>,
    applications: NamespaceState,
    settings: NamespaceState,
}

impl<R: MenuResolver> MenuEditor<R> {
    /// Resolves both namespaces and loads their override documents.
    ///
    /// `locale` is the tag used for localized keys (`Name[de_DE]`); `None` writes only
    /// the unlocalized keys.
    pub fn new(resolver: R, paths: MenuPaths, locale: Option<String>) -> Result<Self, EditorError> {
        let applications = load_namespace(&resolver, &paths, Namespace::Applications)?;
        let settings = load_namespace(&resolver, &paths, Namespace::Settings)?;
        Ok(Self {
            resolver,
            paths,
            locale,
            applications,
            settings,
        })
    }

    /// The override document of `namespace` as currently held in memory.
    pub fn document(&self, namespace: Namespace) -> &OverrideDocument {
        &self.state(namespace).document
    }

    // --- Queries ---

    /// The two namespace roots, applications first.
    pub fn top_level_menus(&self) -> Vec<NodeRef> {
        Namespace::ALL.into_iter().map(NodeRef::root).collect()
    }

    /// Looks up a node of the current full tree.
    pub fn node(&self, node: NodeRef) -> Result<&MenuNode, EditorError> {
        self.state(node.namespace)
            .tree
            .get(node.node)
            .ok_or(EditorError::NodeNotFound {
                namespace: node.namespace,
                node: node.node,
            })
    }

    /// Sub-menus of `parent` with their visibility. An empty `Other` menu is left out.
    pub fn child_menus(&self, parent: NodeRef) -> Result<Vec<(NodeRef, bool)>, EditorError> {
        self.directory(parent)?;
        let tree = &self.state(parent.namespace).tree;
        let mut menus = Vec::new();
        for child in tree.children(parent.node) {
            let Some(info) = child.as_directory() else {
                continue;
            };
            if info.menu_id == OTHER_MENU_ID && child.children.is_empty() {
                continue;
            }
            let handle = NodeRef {
                namespace: parent.namespace,
                node: child.id,
            };
            menus.push((handle, self.is_visible(handle)?));
        }
        Ok(menus)
    }

    /// Children of `menu` in resolver order with their visibility. Internal
    /// `-usercustom.desktop` entries are never listed.
    pub fn items(&self, menu: NodeRef) -> Result<Vec<(NodeRef, bool)>, EditorError> {
        self.directory(menu)?;
        let tree = &self.state(menu.namespace).tree;
        let mut items = Vec::new();
        for child in tree.children(menu.node) {
            if child
                .as_entry()
                .is_some_and(|entry| entry.desktop_file_id.ends_with(USER_CUSTOM_SUFFIX))
            {
                continue;
            }
            let handle = NodeRef {
                namespace: menu.namespace,
                node: child.id,
            };
            items.push((handle, self.is_visible(handle)?));
        }
        Ok(items)
    }

    /// Whether `node` shows up in the menu.
    ///
    /// Entries are visible unless excluded or `NoDisplay`. Directories are visible when
    /// a directory with the same id is present anywhere in the visible tree. Separators
    /// always are.
    pub fn is_visible(&self, node: NodeRef) -> Result<bool, EditorError> {
        let menu_node = self.node(node)?;
        Ok(match &menu_node.kind {
            NodeKind::Entry(entry) => !(entry.excluded || entry.no_display),
            NodeKind::Directory(info) => self
                .state(node.namespace)
                .visible_tree
                .contains_directory(&info.menu_id),
            NodeKind::Separator => true,
        })
    }

    /// The override path of a directory: the namespace sentinel followed by the menu ids
    /// from the top down (`Applications/Games/Arcade`).
    pub fn menu_path(&self, menu: NodeRef) -> Result<String, EditorError> {
        self.directory(menu)?;
        let tree = &self.state(menu.namespace).tree;
        let mut path = menu.namespace.sentinel().to_string();
        for menu_id in tree.directory_chain(menu.node) {
            path.push('/');
            path.push_str(menu_id);
        }
        Ok(path)
    }

    /// Resolves a path such as `Applications/Games/foo.desktop`: a namespace sentinel,
    /// then menu ids, optionally ending in a desktop file id.
    pub fn find(&self, path: &str) -> Result<NodeRef, EditorError> {
        let not_found = || EditorError::PathNotFound(path.to_string());
        let trimmed = path.trim_matches('/');
        let mut segments = trimmed.split('/');
        let namespace = segments
            .next()
            .and_then(Namespace::from_sentinel)
            .ok_or_else(not_found)?;
        let tree = &self.state(namespace).tree;

        let mut current = NodeId::ROOT;
        for segment in segments {
            let current_is_directory = tree
                .get(current)
                .is_some_and(|node| node.as_directory().is_some());
            if !current_is_directory {
                return Err(not_found());
            }
            let child = tree
                .children(current)
                .find(|child| match &child.kind {
                    NodeKind::Directory(info) => info.menu_id == segment,
                    NodeKind::Entry(entry) => entry.desktop_file_id == segment,
                    NodeKind::Separator => false,
                })
                .ok_or_else(not_found)?;
            current = child.id;
        }
        Ok(NodeRef {
            namespace,
            node: current,
        })
    }

    // --- Mutations ---

    /// Shows or hides an entry or a directory, then saves.
    ///
    /// Directories without children are left alone and nothing is saved.
    pub fn set_visible(&mut self, item: NodeRef, visible: bool) -> Result<(), EditorError> {
        let node = self.node(item)?.clone();
        match &node.kind {
            NodeKind::Entry(entry) => {
                let parent = NodeRef {
                    namespace: item.namespace,
                    node: node.parent.unwrap_or(NodeId::ROOT),
                };
                let path = self.menu_path(parent)?;
                log::debug!(
                    "{} entry '{}' in '{}'",
                    if visible { "Showing" } else { "Hiding" },
                    entry.desktop_file_id,
                    path
                );
                let kind = if visible {
                    RuleKind::Include
                } else {
                    RuleKind::Exclude
                };
                let container = self.document_mut(item.namespace).menu_node_mut(&path)?;
                override_doc::replace_filename_rule(container, &entry.desktop_file_id, kind);
                if visible {
                    self.write_item(
                        Some(entry),
                        &ItemFields {
                            no_display: Some(false),
                            ..Default::default()
                        },
                    )?;
                }
            }
            NodeKind::Directory(info) => {
                if node.children.is_empty() {
                    log::debug!(
                        "Menu '{}' is empty, leaving its visibility untouched.",
                        info.menu_id
                    );
                    return Ok(());
                }
                let path = self.menu_path(item)?;
                log::debug!(
                    "{} menu '{}'",
                    if visible { "Showing" } else { "Hiding" },
                    path
                );
                let container = self.document_mut(item.namespace).menu_node_mut(&path)?;
                override_doc::remove_deletion_markers(container);
                self.write_menu(
                    Some(info),
                    &MenuFields {
                        no_display: Some(!visible),
                        ..Default::default()
                    },
                )?;
            }
            NodeKind::Separator => {
                log::debug!("Separators cannot be hidden, ignoring.");
                return Ok(());
            }
        }
        self.save()
    }

    pub fn hide_item(&mut self, item: NodeRef) -> Result<(), EditorError> {
        self.set_visible(item, false)
    }

    pub fn show_item(&mut self, item: NodeRef) -> Result<(), EditorError> {
        self.set_visible(item, true)
    }

    /// Writes a new `.desktop` file and includes it in `parent`. Returns its file id.
    pub fn create_item(
        &mut self,
        parent: NodeRef,
        details: &ItemDetails,
        before: Option<NodeRef>,
        after: Option<NodeRef>,
    ) -> Result<String, EditorError> {
        let path = self.menu_path(parent)?;
        let placement = self.placement(parent, None, before, after)?;

        let file_id = self.write_item(None, &ItemFields::from_details(details))?;
        log::debug!("Creating entry '{}' in '{}'", file_id, path);
        let container = self.document_mut(parent.namespace).menu_node_mut(&path)?;
        override_doc::replace_filename_rule(container, &file_id, RuleKind::Include);
        if let Some(placement) = placement {
            self.apply_layout(parent, placement.into_layout(LayoutItem::File(file_id.clone())))?;
        }

        self.save()?;
        Ok(file_id)
    }

    /// Writes a new `.directory` file and adds a sub-menu for it under `parent`.
    /// Returns the new menu id (the file id without its extension).
    pub fn create_menu(
        &mut self,
        parent: NodeRef,
        details: &MenuDetails,
        before: Option<NodeRef>,
        after: Option<NodeRef>,
    ) -> Result<String, EditorError> {
        let parent_path = self.menu_path(parent)?;
        let placement = self.placement(parent, None, before, after)?;

        let file_id = self.write_menu(None, &MenuFields::from_details(details))?;
        let menu_id = file_id
            .rsplit_once('.')
            .map_or(file_id.as_str(), |(stem, _)| stem)
            .to_string();
        let path = format!("{parent_path}/{menu_id}");
        log::debug!("Creating menu '{}' backed by '{}'", path, file_id);

        let container = self.document_mut(parent.namespace).menu_node_mut(&path)?;
        container.append_text_element("Directory", &file_id);
        if let Some(placement) = placement {
            self.apply_layout(parent, placement.into_layout(LayoutItem::Menu(menu_id.clone())))?;
        }

        self.save()?;
        Ok(menu_id)
    }

    /// Rewrites the user copy of an entry. Returns `false` without writing anything
    /// when every field already has the requested value.
    pub fn edit_item(&mut self, item: NodeRef, details: &ItemDetails) -> Result<bool, EditorError> {
        let entry = self.entry(item)?.clone();
        let unchanged = details.icon == entry.icon.as_deref().unwrap_or_default()
            && details.name == entry.name
            && details.comment == entry.comment.as_deref().unwrap_or_default()
            && details.command == entry.exec
            && details.use_terminal == entry.terminal;
        if unchanged {
            log::debug!("Entry '{}' unchanged, nothing to write.", entry.desktop_file_id);
            return Ok(false);
        }

        log::debug!("Editing entry '{}'", entry.desktop_file_id);
        self.write_item(Some(&entry), &ItemFields::from_details(details))?;
        self.save()?;
        Ok(true)
    }

    /// Rewrites the user copy of a menu's `.directory` file. Returns `false` without
    /// writing anything when every field already has the requested value.
    pub fn edit_menu(&mut self, menu: NodeRef, details: &MenuDetails) -> Result<bool, EditorError> {
        let info = self.directory(menu)?.clone();
        let unchanged = details.icon == info.icon.as_deref().unwrap_or_default()
            && details.name == info.name
            && details.comment == info.comment.as_deref().unwrap_or_default();
        if unchanged {
            log::debug!("Menu '{}' unchanged, nothing to write.", info.menu_id);
            return Ok(false);
        }

        // A <Menu> has to exist for the directory override to be honored.
        let path = self.menu_path(menu)?;
        log::debug!("Editing menu '{}'", path);
        self.document_mut(menu.namespace).menu_node_mut(&path)?;
        self.write_menu(Some(&info), &MenuFields::from_details(details))?;
        self.save()?;
        Ok(true)
    }

    /// Copies an entry into `new_parent` under a fresh file id with empty `Categories`.
    /// Returns the new file id.
    pub fn copy_item(
        &mut self,
        item: NodeRef,
        new_parent: NodeRef,
        before: Option<NodeRef>,
        after: Option<NodeRef>,
    ) -> Result<String, EditorError> {
        let entry = self.entry(item)?.clone();
        let path = self.menu_path(new_parent)?;
        let placement = self.placement(new_parent, None, before, after)?;

        let file_id = self.write_copy(&entry, false)?;
        log::debug!(
            "Copied entry '{}' to '{}' in '{}'",
            entry.desktop_file_id,
            file_id,
            path
        );
        let container = self.document_mut(new_parent.namespace).menu_node_mut(&path)?;
        override_doc::replace_filename_rule(container, &file_id, RuleKind::Include);
        if let Some(placement) = placement {
            self.apply_layout(new_parent, placement.into_layout(LayoutItem::File(file_id.clone())))?;
        }

        self.save()?;
        Ok(file_id)
    }

    /// Moves an entry.
    ///
    /// Across menus the original file id is marked `Hidden=true` and a copy (empty
    /// `Categories`, `Hidden=false`) is included in `new_parent`. With `before`/`after`
    /// the entry is also positioned through `new_parent`'s `<Layout>`.
    pub fn move_item(
        &mut self,
        item: NodeRef,
        old_parent: NodeRef,
        new_parent: NodeRef,
        before: Option<NodeRef>,
        after: Option<NodeRef>,
    ) -> Result<(), EditorError> {
        let entry = self.entry(item)?.clone();
        self.directory(old_parent)?;
        let path = self.menu_path(new_parent)?;
        let same_parent = old_parent == new_parent;
        let moving = if same_parent { Some(item) } else { None };
        let placement = self.placement(new_parent, moving, before, after)?;

        if same_parent && placement.is_none() {
            log::debug!(
                "Entry '{}' stays where it is, nothing to do.",
                entry.desktop_file_id
            );
            return Ok(());
        }

        let file_id = if same_parent {
            entry.desktop_file_id.clone()
        } else {
            self.write_item(
                Some(&entry),
                &ItemFields {
                    hidden: Some(true),
                    ..Default::default()
                },
            )?;
            let file_id = self.write_copy(&entry, true)?;
            let container = self.document_mut(new_parent.namespace).menu_node_mut(&path)?;
            override_doc::replace_filename_rule(container, &file_id, RuleKind::Include);
            file_id
        };
        log::debug!(
            "Moved entry '{}' to '{}' as '{}'",
            entry.desktop_file_id,
            path,
            file_id
        );

        if let Some(placement) = placement {
            self.apply_layout(new_parent, placement.into_layout(LayoutItem::File(file_id)))?;
        }
        self.save()
    }

    // --- Persistence ---

    /// Writes both override documents and reloads all menu state from disk.
    pub fn save(&mut self) -> Result<(), EditorError> {
        for namespace in Namespace::ALL {
            self.state(namespace).document.save()?;
        }
        self.reload()
    }

    /// Resolves both namespaces again and re-reads the override documents.
    pub fn reload(&mut self) -> Result<(), EditorError> {
        let _timer = BlockTimer::new("menu reload");
        self.applications = load_namespace(&self.resolver, &self.paths, Namespace::Applications)?;
        self.settings = load_namespace(&self.resolver, &self.paths, Namespace::Settings)?;
        log::debug!("Reloaded menus.");
        Ok(())
    }

    // --- Internals ---

    fn state(&self, namespace: Namespace) -> &NamespaceState {
        match namespace {
            Namespace::Applications => &self.applications,
            Namespace::Settings => &self.settings,
        }
    }

    fn document_mut(&mut self, namespace: Namespace) -> &mut OverrideDocument {
        match namespace {
            Namespace::Applications => &mut self.applications.document,
            Namespace::Settings => &mut self.settings.document,
        }
    }

    fn directory(&self, node: NodeRef) -> Result<&DirectoryInfo, EditorError> {
        let menu_node = self.node(node)?;
        menu_node
            .as_directory()
            .ok_or_else(|| EditorError::NotADirectory(display_name(menu_node)))
    }

    fn entry(&self, node: NodeRef) -> Result<&EntryInfo, EditorError> {
        let menu_node = self.node(node)?;
        menu_node
            .as_entry()
            .ok_or_else(|| EditorError::NotAnEntry(display_name(menu_node)))
    }

    /// Children of `parent` minus `moving`, and the slot given by the anchors.
    /// `None` when no anchor is given. Fails before anything is written.
    fn placement(
        &self,
        parent: NodeRef,
        moving: Option<NodeRef>,
        before: Option<NodeRef>,
        after: Option<NodeRef>,
    ) -> Result<Option<Placement>, EditorError> {
        let (anchor, offset) = match (after, before) {
            (Some(after), _) => (after, 1),
            (None, Some(before)) => (before, 0),
            (None, None) => return Ok(None),
        };
        self.directory(parent)?;
        let tree = &self.state(parent.namespace).tree;

        let mut items = Vec::new();
        let mut anchor_index = None;
        let mut offset = offset;
        for child in tree.children(parent.node) {
            let child_ref = NodeRef {
                namespace: parent.namespace,
                node: child.id,
            };
            if Some(child_ref) == moving {
                // Anchored on itself: it goes back into the slot it came from.
                if child_ref == anchor {
                    anchor_index = Some(items.len());
                    offset = 0;
                }
                continue;
            }
            if child_ref == anchor {
                anchor_index = Some(items.len());
            }
            items.push(match &child.kind {
                NodeKind::Directory(info) => LayoutItem::Menu(info.menu_id.clone()),
                NodeKind::Entry(entry) => LayoutItem::File(entry.desktop_file_id.clone()),
                NodeKind::Separator => LayoutItem::Separator,
            });
        }

        let index = anchor_index.ok_or_else(|| EditorError::AnchorNotInMenu {
            anchor: self
                .node(anchor)
                .map(display_name)
                .unwrap_or_else(|_| format!("{:?}", anchor.node)),
            menu: self.menu_path(parent).unwrap_or_default(),
        })?;
        Ok(Some(Placement {
            items,
            index: index + offset,
        }))
    }

    /// Replaces the `<Layout>` of `parent`, keeping the menu-wide options of a previous one.
    fn apply_layout(&mut self, parent: NodeRef, layout: Layout) -> Result<(), EditorError> {
        let path = self.menu_path(parent)?;
        let container = self.document_mut(parent.namespace).menu_node_mut(&path)?;
        let layout = match override_doc::current_layout(container)? {
            Some(previous) => layout.with_options_of(&previous),
            None => layout,
        };
        log::debug!("Writing layout of '{}' ({} directives)", path, layout.order.len());
        override_doc::replace_layout(container, &layout);
        Ok(())
    }

    /// Writes the user copy of an entry (`existing`) or a brand-new entry, setting only
    /// the fields that carry a value. Returns the file id.
    fn write_item(
        &self,
        existing: Option<&EntryInfo>,
        fields: &ItemFields<'_>,
    ) -> Result<String, EditorError> {
        let (file_id, mut keyfile) = match existing {
            Some(entry) => (
                entry.desktop_file_id.clone(),
                open_source(&entry.desktop_file_path, KeyFileType::Application)?,
            ),
            None => {
                let name = fields
                    .name
                    .filter(|name| !name.is_empty())
                    .ok_or(EditorError::MissingName)?;
                (
                    naming::unique_file_id(name, DESKTOP_EXTENSION, &self.paths),
                    KeyFile::new(KeyFileType::Application),
                )
            }
        };

        self.set_localized(&mut keyfile, keys::ICON, fields.icon);
        self.set_localized(&mut keyfile, keys::NAME, fields.name);
        self.set_localized(&mut keyfile, keys::COMMENT, fields.comment);
        if let Some(command) = fields.command.filter(|c| !c.is_empty()) {
            keyfile.set(keys::EXEC, command, None);
        }
        if let Some(use_terminal) = fields.use_terminal {
            keyfile.set_bool(keys::TERMINAL, use_terminal);
        }
        if let Some(no_display) = fields.no_display {
            keyfile.set_bool(keys::NO_DISPLAY, no_display);
        }
        if let Some(hidden) = fields.hidden {
            keyfile.set_bool(keys::HIDDEN, hidden);
        }

        keyfile.write(&self.paths.user_item_dir().join(&file_id))?;
        Ok(file_id)
    }

    /// Writes the user copy of a menu's `.directory` file (`existing`) or a new one.
    /// Only `Name` and `Comment` get localized variants. Returns the file id.
    fn write_menu(
        &self,
        existing: Option<&DirectoryInfo>,
        fields: &MenuFields<'_>,
    ) -> Result<String, EditorError> {
        let (file_id, mut keyfile) = match existing {
            Some(info) => {
                let file_id = format!("{}{}", info.menu_id, DIRECTORY_EXTENSION);
                let source = self
                    .paths
                    .find_directory(&file_id)
                    .or_else(|| info.directory_file.clone());
                let keyfile = match source {
                    Some(path) => open_source(&path, KeyFileType::Directory)?,
                    None => KeyFile::new(KeyFileType::Directory),
                };
                (file_id, keyfile)
            }
            None => {
                let name = fields
                    .name
                    .filter(|name| !name.is_empty())
                    .ok_or(EditorError::MissingName)?;
                (
                    naming::unique_file_id(name, DIRECTORY_EXTENSION, &self.paths),
                    KeyFile::new(KeyFileType::Directory),
                )
            }
        };

        if let Some(icon) = fields.icon.filter(|i| !i.is_empty()) {
            keyfile.set(keys::ICON, icon, None);
        }
        self.set_localized(&mut keyfile, keys::NAME, fields.name);
        self.set_localized(&mut keyfile, keys::COMMENT, fields.comment);
        if let Some(no_display) = fields.no_display {
            keyfile.set_bool(keys::NO_DISPLAY, no_display);
        }

        keyfile.write(&self.paths.user_directory_dir().join(&file_id))?;
        Ok(file_id)
    }

    /// Duplicates an entry's key-file under a new id with `Categories` cleared.
    fn write_copy(&self, entry: &EntryInfo, unhide: bool) -> Result<String, EditorError> {
        let mut keyfile = open_source(&entry.desktop_file_path, KeyFileType::Application)?;
        keyfile.set(keys::CATEGORIES, "", None);
        if unhide {
            keyfile.set_bool(keys::HIDDEN, false);
        }
        let file_id = naming::unique_file_id(&entry.name, DESKTOP_EXTENSION, &self.paths);
        keyfile.write(&self.paths.user_item_dir().join(&file_id))?;
        Ok(file_id)
    }

    fn set_localized(&self, keyfile: &mut KeyFile, key: &str, value: Option<&str>) {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return;
        };
        keyfile.set(key, value, None);
        if let Some(locale) = self.locale.as_deref() {
            keyfile.set(key, value, Some(locale));
        }
    }
}

fn load_namespace<R: MenuResolver>(
    resolver: &R,
    paths: &MenuPaths,
    namespace: Namespace,
) -> Result<NamespaceState, EditorError> {
    let menu_file = namespace.menu_file();
    let tree = resolver.resolve(menu_file, ResolveFlags::FULL)?;
    let visible_tree = resolver.resolve(menu_file, ResolveFlags::VISIBLE)?;
    let document = OverrideDocument::load(namespace, paths)?;
    log::debug!(
        "Loaded {} menu: {} nodes, {} visible",
        namespace,
        tree.node_count(),
        visible_tree.node_count()
    );
    Ok(NamespaceState {
        tree,
        visible_tree,
        document,
    })
}

fn open_source(path: &Path, file_type: KeyFileType) -> Result<KeyFile, KeyFileError> {
    if !path.exists() {
        log::warn!(
            "Key-file '{}' is gone, writing the user copy from scratch.",
            path.display()
        );
    }
    KeyFile::open(path, file_type)
}

fn display_name(node: &MenuNode) -> String {
    match &node.kind {
        NodeKind::Directory(info) => info.menu_id.clone(),
        NodeKind::Entry(entry) => entry.desktop_file_id.clone(),
        NodeKind::Separator => "separator".to_string(),
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod tests;
