// src/models.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::constants::{
    APPLICATIONS_MENU_FILE, APPLICATIONS_SENTINEL, SETTINGS_MENU_FILE, SETTINGS_SENTINEL,
};

// --- MENU NAMESPACES ---

/// One of the two independent root menus maintained side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// `applications.menu`, rooted at `Applications`.
    Applications,
    /// `settings.menu`, rooted at `Desktop`.
    Settings,
}

impl Namespace {
    /// Both namespaces, in listing order.
    pub const ALL: [Self; 2] = [Self::Applications, Self::Settings];

    /// The root menu file this namespace is resolved from.
    pub fn menu_file(self) -> &'static str {
        match self {
            Self::Applications => APPLICATIONS_MENU_FILE,
            Self::Settings => SETTINGS_MENU_FILE,
        }
    }

    /// The first segment of every override path in this namespace.
    pub fn sentinel(self) -> &'static str {
        match self {
            Self::Applications => APPLICATIONS_SENTINEL,
            Self::Settings => SETTINGS_SENTINEL,
        }
    }

    /// Finds the namespace whose sentinel is `segment`.
    pub fn from_sentinel(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.sentinel() == segment)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applications => write!(f, "applications"),
            Self::Settings => write!(f, "settings"),
        }
    }
}

/// Selects which nodes the menu resolver keeps in its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveFlags {
    /// Keep entries excluded by `<Exclude>` rules.
    pub include_excluded: bool,
    /// Keep entries flagged `NoDisplay=true`.
    pub include_nodisplay: bool,
    /// Keep directories without any visible child.
    pub show_empty: bool,
}

impl ResolveFlags {
    /// Every node regardless of visibility (the "full" tree).
    pub const FULL: Self = Self {
        include_excluded: true,
        include_nodisplay: true,
        show_empty: true,
    };

    /// Only what a menu would actually show (the "visible" tree).
    pub const VISIBLE: Self = Self {
        include_excluded: false,
        include_nodisplay: false,
        show_empty: false,
    };
}

// --- RESOLVER SNAPSHOT MODELS (what the external resolver prints as JSON) ---

/// A resolved menu tree as emitted by the external resolver.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TreeSnapshot {
    /// The root menu file the tree was resolved from.
    pub menu_file: String,
    /// The root directory.
    pub root: SnapshotNode,
}

/// One node of a [`TreeSnapshot`], tagged by `"type"`.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SnapshotNode {
    /// A sub-menu.
    Directory {
        /// Menu identifier (the `<Name>` of the menu).
        menu_id: String,
        /// Display name.
        name: String,
        /// Icon name or path.
        #[serde(default)]
        icon: Option<String>,
        /// Tooltip text.
        #[serde(default)]
        comment: Option<String>,
        /// The `.directory` file backing the display fields, if any.
        #[serde(default)]
        directory_file: Option<PathBuf>,
        /// Excluded by an override rule.
        #[serde(default)]
        excluded: bool,
        /// Flagged `NoDisplay`.
        #[serde(default)]
        no_display: bool,
        /// Children in resolver order.
        #[serde(default)]
        children: Vec<SnapshotNode>,
    },
    /// An application launcher.
    Entry {
        /// Desktop file id, unique within the menu system.
        desktop_file_id: String,
        /// Where the backing `.desktop` file lives.
        desktop_file_path: PathBuf,
        /// Display name.
        name: String,
        /// Icon name or path.
        #[serde(default)]
        icon: Option<String>,
        /// Tooltip text.
        #[serde(default)]
        comment: Option<String>,
        /// Command line.
        #[serde(default)]
        exec: String,
        /// Run inside a terminal.
        #[serde(default)]
        terminal: bool,
        /// Excluded by an override rule.
        #[serde(default)]
        excluded: bool,
        /// Flagged `NoDisplay`.
        #[serde(default)]
        no_display: bool,
    },
    /// A visual separator.
    Separator,
}

// --- EDIT PAYLOADS ---

/// Display fields of an application entry as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDetails {
    /// Icon name or path.
    pub icon: String,
    /// Display name.
    pub name: String,
    /// Tooltip text.
    pub comment: String,
    /// Command line.
    pub command: String,
    /// Run inside a terminal.
    pub use_terminal: bool,
}

/// Display fields of a menu directory as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuDetails {
    /// Icon name or path.
    pub icon: String,
    /// Display name.
    pub name: String,
    /// Tooltip text.
    pub comment: String,
}

// --- `config.toml` MODELS ---

/// Represents the deserialized structure of the editor's `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorConfig {
    /// Locale tag used for localized keys (e.g. `de_DE`). Detected from the environment when absent.
    #[serde(default)]
    pub locale: Option<String>,
    /// How the merged menu tree is obtained.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Overrides for the per-user XDG directories.
    #[serde(default)]
    pub paths: PathsConfig,
}

/// The `[resolver]` table.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Command line of the external resolver; the menu file and flags are appended.
    pub command: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            command: "xdg-menu-resolve --json".to_string(),
        }
    }
}

/// The `[paths]` table. Values may use `~` and `$VARS`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PathsConfig {
    /// Replaces `$XDG_CONFIG_HOME`.
    #[serde(default)]
    pub config_home: Option<String>,
    /// Replaces `$XDG_DATA_HOME`.
    #[serde(default)]
    pub data_home: Option<String>,
}
