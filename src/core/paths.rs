// src/core/paths.rs

use crate::constants::{
    APP_CONFIG_DIR, APPLICATIONS_DIR, CONFIG_FILENAME, DEFAULT_CONFIG_DIRS, DEFAULT_DATA_DIRS,
    DESKTOP_DIRECTORIES_DIR, MENUS_DIR,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Could not find user data directory.")]
    DataDirNotFound,
    #[error("Could not create directory at '{path}': {source}")]
    DirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to expand path '{path}': {reason}")]
    Expansion { path: String, reason: String },
}

/// Every directory the editor reads from or writes to.
///
/// Built once at startup; nothing below consults the environment afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPaths {
    config_home: PathBuf,
    data_home: PathBuf,
    config_dirs: Vec<PathBuf>,
    data_dirs: Vec<PathBuf>,
}

impl MenuPaths {
    /// Builds the XDG layout from the process environment, falling back to the
    /// base-directory defaults when a variable is unset.
    pub fn from_env() -> Result<Self, PathError> {
        let config_home = dirs::config_dir().ok_or(PathError::ConfigDirNotFound)?;
        let data_home = dirs::data_dir().ok_or(PathError::DataDirNotFound)?;
        Ok(Self {
            config_home,
            data_home,
            config_dirs: split_dirs(env::var("XDG_CONFIG_DIRS").ok(), DEFAULT_CONFIG_DIRS),
            data_dirs: split_dirs(env::var("XDG_DATA_DIRS").ok(), DEFAULT_DATA_DIRS),
        })
    }

    /// Uses explicit user homes and no system directories at all. Mostly for tests
    /// and sandboxed runs.
    pub fn with_homes(config_home: impl Into<PathBuf>, data_home: impl Into<PathBuf>) -> Self {
        Self {
            config_home: config_home.into(),
            data_home: data_home.into(),
            config_dirs: Vec::new(),
            data_dirs: Vec::new(),
        }
    }

    /// Replaces the system search directories.
    pub fn with_system_dirs(mut self, config_dirs: Vec<PathBuf>, data_dirs: Vec<PathBuf>) -> Self {
        self.config_dirs = config_dirs;
        self.data_dirs = data_dirs;
        self
    }

    /// Replaces the user homes with (shell-expanded) overrides from `config.toml`.
    pub fn with_overrides(
        mut self,
        config_home: Option<&str>,
        data_home: Option<&str>,
    ) -> Result<Self, PathError> {
        if let Some(template) = config_home {
            self.config_home = expand(template)?;
        }
        if let Some(template) = data_home {
            self.data_home = expand(template)?;
        }
        Ok(self)
    }

    /// `$XDG_CONFIG_HOME/menus`, where override documents live.
    pub fn user_menu_dir(&self) -> PathBuf {
        self.config_home.join(MENUS_DIR)
    }

    /// `$XDG_DATA_HOME/applications`, where user `.desktop` copies live.
    pub fn user_item_dir(&self) -> PathBuf {
        self.data_home.join(APPLICATIONS_DIR)
    }

    /// `$XDG_DATA_HOME/desktop-directories`, where user `.directory` copies live.
    pub fn user_directory_dir(&self) -> PathBuf {
        self.data_home.join(DESKTOP_DIRECTORIES_DIR)
    }

    /// The override document path for a root menu file.
    pub fn override_path(&self, menu_file: &str) -> PathBuf {
        self.user_menu_dir().join(menu_file)
    }

    /// The system copy of a root menu file, if one is installed.
    pub fn system_menu_path(&self, menu_file: &str) -> Option<PathBuf> {
        find_in(&self.config_dirs, MENUS_DIR, menu_file)
    }

    /// A system `.desktop` file with the given id, if one is installed.
    pub fn find_system_item(&self, file_id: &str) -> Option<PathBuf> {
        find_in(&self.data_dirs, APPLICATIONS_DIR, file_id)
    }

    /// A `.directory` file with the given id, looking at the user copy first.
    pub fn find_directory(&self, file_id: &str) -> Option<PathBuf> {
        let user = self.user_directory_dir().join(file_id);
        if user.is_file() {
            return Some(user);
        }
        find_in(&self.data_dirs, DESKTOP_DIRECTORIES_DIR, file_id)
    }

    /// Whether `file_id` is already taken by a user copy or a system file.
    pub fn item_id_taken(&self, file_id: &str) -> bool {
        self.user_item_dir().join(file_id).is_file() || self.find_system_item(file_id).is_some()
    }

    /// Whether `file_id` is already taken by any `.directory` file.
    pub fn directory_id_taken(&self, file_id: &str) -> bool {
        self.find_directory(file_id).is_some()
    }
}

/// Creates `dir` (and its parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<(), PathError> {
    if !dir.exists() {
        log::info!("Creating missing directory '{}'", dir.display());
        fs::create_dir_all(dir).map_err(|e| PathError::DirCreation {
            path: dir.display().to_string(),
            source: e,
        })?;
    }
    Ok(())
}

/// Returns the path to the editor's own configuration directory
/// (`~/.config/xdg-menu-editor`). Creates it if it doesn't exist.
pub fn get_app_config_dir() -> Result<PathBuf, PathError> {
    let config_path = dirs::config_dir()
        .ok_or(PathError::ConfigDirNotFound)?
        .join(APP_CONFIG_DIR);
    ensure_dir(&config_path)?;
    Ok(config_path)
}

/// Returns the path to the default `config.toml`.
pub fn get_config_file_path() -> Result<PathBuf, PathError> {
    get_app_config_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

fn split_dirs(value: Option<String>, default: &str) -> Vec<PathBuf> {
    let raw = value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    env::split_paths(&raw)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

fn find_in(bases: &[PathBuf], sub_dir: &str, file_name: &str) -> Option<PathBuf> {
    bases
        .iter()
        .map(|base| base.join(sub_dir).join(file_name))
        .find(|candidate| candidate.is_file())
}

fn expand(template: &str) -> Result<PathBuf, PathError> {
    // `shellexpand::full` handles both `~` and `$VAR`.
    let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
        path: template.to_string(),
        reason: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_user_dirs_are_derived_from_homes() {
        let paths = MenuPaths::with_homes("/home/u/.config", "/home/u/.local/share");
        assert_eq!(paths.user_menu_dir(), PathBuf::from("/home/u/.config/menus"));
        assert_eq!(
            paths.user_item_dir(),
            PathBuf::from("/home/u/.local/share/applications")
        );
        assert_eq!(
            paths.user_directory_dir(),
            PathBuf::from("/home/u/.local/share/desktop-directories")
        );
        assert_eq!(
            paths.override_path("settings.menu"),
            PathBuf::from("/home/u/.config/menus/settings.menu")
        );
    }

    #[test]
    fn test_system_lookups_use_first_match() {
        // --- Setup ---
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        fs::create_dir_all(second.join("menus")).unwrap();
        fs::write(second.join("menus/applications.menu"), "<Menu/>").unwrap();
        fs::create_dir_all(first.join("applications")).unwrap();
        fs::write(first.join("applications/foo.desktop"), "").unwrap();

        let paths = MenuPaths::with_homes(tmp.path().join("c"), tmp.path().join("d"))
            .with_system_dirs(vec![first.clone(), second.clone()], vec![first.clone(), second]);

        // --- Execute & Assert ---
        assert_eq!(
            paths.system_menu_path("applications.menu"),
            Some(tmp.path().join("second/menus/applications.menu"))
        );
        assert!(paths.system_menu_path("settings.menu").is_none());
        assert!(paths.item_id_taken("foo.desktop"));
        assert!(!paths.item_id_taken("bar.desktop"));
    }

    #[test]
    fn test_find_directory_prefers_user_copy() {
        let tmp = TempDir::new().unwrap();
        let system = tmp.path().join("sys");
        fs::create_dir_all(system.join("desktop-directories")).unwrap();
        fs::write(system.join("desktop-directories/Games.directory"), "").unwrap();

        let paths = MenuPaths::with_homes(tmp.path().join("c"), tmp.path().join("d"))
            .with_system_dirs(Vec::new(), vec![system.clone()]);
        assert_eq!(
            paths.find_directory("Games.directory"),
            Some(system.join("desktop-directories/Games.directory"))
        );

        ensure_dir(&paths.user_directory_dir()).unwrap();
        fs::write(paths.user_directory_dir().join("Games.directory"), "").unwrap();
        assert_eq!(
            paths.find_directory("Games.directory"),
            Some(paths.user_directory_dir().join("Games.directory"))
        );
    }

    #[test]
    fn test_split_dirs_falls_back_to_default() {
        assert_eq!(
            split_dirs(None, "/a:/b"),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
        assert_eq!(split_dirs(Some(String::new()), "/a"), vec![PathBuf::from("/a")]);
        assert_eq!(split_dirs(Some("/x".to_string()), "/a"), vec![PathBuf::from("/x")]);
    }
}
