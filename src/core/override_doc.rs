// src/core/override_doc.rs

//! The per-user override menu file of one namespace.
//!
//! The document is loaded once, edited in place by the editor, and written back in full
//! by [`OverrideDocument::save`]. Menus inside it are addressed by '/'-joined paths of
//! `<Name>`s starting at the root menu (`Applications/Games/Arcade`).

use crate::constants::{MENU_DOCTYPE, MENUS_DIR};
use crate::core::layout::{Layout, LayoutError};
use crate::core::paths::{self, MenuPaths, PathError};
use crate::core::xml_tree::{self, Document, Element, XmlError};
use crate::models::Namespace;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverrideError {
    #[error("Could not read override file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not write override file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not replace override file '{path}': {source}")]
    Persist {
        path: String,
        #[source]
        source: tempfile::PersistError,
    },
    #[error("Invalid override file '{path}': {source}")]
    Xml {
        path: String,
        #[source]
        source: XmlError,
    },
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("Invalid layout in override file: {0}")]
    Layout(#[from] LayoutError),
    #[error("Menu path '{path}' does not start at the root menu '{root}'")]
    RootMismatch { path: String, root: String },
}

/// Kind of a filename rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Include,
    Exclude,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Include => "Include",
            Self::Exclude => "Exclude",
        }
    }
}

/// An override menu file and where it is saved.
#[derive(Debug, Clone)]
pub struct OverrideDocument {
    namespace: Namespace,
    path: PathBuf,
    document: Document,
}

impl OverrideDocument {
    /// Loads the namespace's override file, or synthesizes the first-use document when
    /// there is none yet. Whitespace-only text is dropped on load.
    pub fn load(namespace: Namespace, paths: &MenuPaths) -> Result<Self, OverrideError> {
        let path = paths.override_path(namespace.menu_file());
        let mut document = if path.is_file() {
            let content = fs::read_to_string(&path).map_err(|e| OverrideError::Read {
                path: path.display().to_string(),
                source: e,
            })?;
            Document::parse(&content).map_err(|e| OverrideError::Xml {
                path: path.display().to_string(),
                source: e,
            })?
        } else {
            log::info!(
                "No override file at '{}', starting from the default {} menu.",
                path.display(),
                namespace
            );
            default_document(namespace, paths)
        };
        xml_tree::strip_whitespace_nodes(&mut document.root);

        Ok(Self {
            namespace,
            path,
            document,
        })
    }

    /// Where [`save`](Self::save) writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The root `<Menu>`.
    pub fn root(&self) -> &Element {
        &self.document.root
    }

    /// Looks up the `<Menu>` at `path` without creating anything.
    pub fn menu_node(&self, path: &str) -> Option<&Element> {
        let mut segments = path.split('/');
        let root = &self.document.root;
        if menu_name(root) != segments.next() {
            return None;
        }
        let mut current = root;
        for segment in segments {
            current = current
                .child_elements()
                .find(|child| is_menu_named(child, segment))?;
        }
        Some(current)
    }

    /// Finds the `<Menu>` at `path`, creating every missing level on the way. Each
    /// level is created at most once, so repeated calls return the same element.
    pub fn menu_node_mut(&mut self, path: &str) -> Result<&mut Element, OverrideError> {
        let mut segments = path.split('/');
        let first = segments.next().unwrap_or_default();
        let root_name = menu_name(&self.document.root).unwrap_or_default();
        if first != root_name {
            return Err(OverrideError::RootMismatch {
                path: path.to_string(),
                root: root_name.to_string(),
            });
        }

        let mut current = &mut self.document.root;
        for segment in segments {
            let index = match current.position_of(|child| is_menu_named(child, segment)) {
                Some(index) => index,
                None => {
                    log::trace!("Creating <Menu> '{}' in '{}'", segment, path);
                    let mut menu = Element::new("Menu");
                    menu.append_text_element("Name", segment);
                    current.push_element(menu)
                }
            };
            match current.element_at_mut(index) {
                Some(child) => current = child,
                None => {
                    return Err(OverrideError::RootMismatch {
                        path: path.to_string(),
                        root: first.to_string(),
                    });
                }
            }
        }
        Ok(current)
    }

    /// The document as it will be written.
    pub fn to_xml_string(&self) -> Result<String, OverrideError> {
        self.document
            .to_pretty_string()
            .map_err(|e| OverrideError::Xml {
                path: self.path.display().to_string(),
                source: e,
            })
    }

    /// Writes the document, replacing the file in one step.
    pub fn save(&self) -> Result<(), OverrideError> {
        let xml = self.to_xml_string()?;
        let parent = self
            .path
            .parent()
            .map_or_else(|| PathBuf::from(MENUS_DIR), Path::to_path_buf);
        paths::ensure_dir(&parent)?;

        let write_err = |e: std::io::Error| OverrideError::Write {
            path: self.path.display().to_string(),
            source: e,
        };
        let mut temp = NamedTempFile::new_in(&parent).map_err(write_err)?;
        temp.write_all(xml.as_bytes()).map_err(write_err)?;
        temp.flush().map_err(write_err)?;
        temp.persist(&self.path)
            .map_err(|e| OverrideError::Persist {
                path: self.path.display().to_string(),
                source: e,
            })?;

        log::debug!(
            "Saved {} override '{}' ({} bytes)",
            self.namespace,
            self.path.display(),
            xml.len()
        );
        Ok(())
    }
}

/// The override file written on first use: a root menu that merges the system file.
pub fn default_document(namespace: Namespace, paths: &MenuPaths) -> Document {
    let system_menu = paths
        .system_menu_path(namespace.menu_file())
        .unwrap_or_else(|| {
            PathBuf::from("/etc/xdg")
                .join(MENUS_DIR)
                .join(namespace.menu_file())
        });

    let mut root = Element::new("Menu");
    root.append_text_element("Name", namespace.sentinel());
    let mut merge_file = Element::with_text("MergeFile", system_menu.display().to_string());
    merge_file.set_attribute("type", "parent");
    root.push_element(merge_file);

    Document {
        doctype: Some(MENU_DOCTYPE.to_string()),
        leading_comments: Vec::new(),
        root,
        trailing_comments: Vec::new(),
    }
}

/// Replaces any `<Include>`/`<Exclude>` mentioning `filename` with a single rule of `kind`.
pub fn replace_filename_rule(container: &mut Element, filename: &str, kind: RuleKind) {
    let removed = container.remove_elements_where(|child| {
        (child.name == "Include" || child.name == "Exclude")
            && child
                .first_child_element()
                .is_some_and(|rule| rule.name == "Filename" && rule.text() == Some(filename))
    });
    log::trace!(
        "Replacing {} stale rule(s) for '{}' with <{}>",
        removed,
        filename,
        kind.as_str()
    );

    let mut rule = Element::new(kind.as_str());
    rule.append_text_element("Filename", filename);
    container.push_element(rule);
}

/// Replaces any `<Layout>` of `container` with `layout`.
pub fn replace_layout(container: &mut Element, layout: &Layout) {
    container.remove_elements_where(|child| child.name == "Layout");
    container.push_element(layout.to_xml());
}

/// The first `<Layout>` of `container`, parsed.
pub fn current_layout(container: &Element) -> Result<Option<Layout>, LayoutError> {
    container
        .elements_named(&["Layout"])
        .next()
        .map(Layout::from_xml)
        .transpose()
}

/// Drops `<Deleted>`/`<NotDeleted>` markers; returns how many were removed.
pub fn remove_deletion_markers(container: &mut Element) -> usize {
    container.remove_elements_where(|child| child.name == "Deleted" || child.name == "NotDeleted")
}

/// Direct `<Include>`/`<Exclude>` rules mentioning `filename`, in document order.
pub fn filename_rules<'a>(
    container: &'a Element,
    filename: &'a str,
) -> impl Iterator<Item = RuleKind> + 'a {
    container.child_elements().filter_map(move |child| {
        let kind = match child.name.as_str() {
            "Include" => RuleKind::Include,
            "Exclude" => RuleKind::Exclude,
            _ => return None,
        };
        child
            .first_child_element()
            .filter(|rule| rule.name == "Filename" && rule.text() == Some(filename))
            .map(|_| kind)
    })
}

fn menu_name(menu: &Element) -> Option<&str> {
    menu.elements_named(&["Name"]).find_map(Element::text)
}

fn is_menu_named(element: &Element, name: &str) -> bool {
    element.name == "Menu"
        && element
            .elements_named(&["Name"])
            .any(|child| child.text() == Some(name))
}
