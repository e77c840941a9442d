// src/config.rs

use crate::core::paths::{self, PathError};
use crate::models::EditorConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("Could not access config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize default config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Loads the editor config from `explicit` or from the default location.
pub fn load_config(explicit: Option<&Path>) -> Result<EditorConfig, ConfigError> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => paths::get_config_file_path()?,
    };
    load_config_from(&path)
}

/// Reads `path`, writing a default config there first if it does not exist yet.
pub fn load_config_from(path: &Path) -> Result<EditorConfig, ConfigError> {
    let io_err = |e: std::io::Error| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    };

    if !path.exists() {
        let default_config = EditorConfig::default();
        let toml_string = toml::to_string_pretty(&default_config)?;
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }
        fs::write(path, toml_string).map_err(io_err)?;
        log::info!("Wrote default config to '{}'", path.display());
        return Ok(default_config);
    }

    let content = fs::read_to_string(path).map_err(io_err)?;
    let config = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.display().to_string(),
        source: e,
    })?;
    log::debug!("Loaded config from '{}'", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_created_with_defaults() {
        // --- Setup ---
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/config.toml");

        // --- Execute ---
        let config = load_config_from(&path).unwrap();

        // --- Assert ---
        assert_eq!(config, EditorConfig::default());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("command = \"xdg-menu-resolve --json\""));
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "locale = \"de_DE\"\n\n[paths]\ndata_home = \"~/sandbox/share\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.locale.as_deref(), Some("de_DE"));
        assert_eq!(config.resolver.command, "xdg-menu-resolve --json");
        assert_eq!(config.paths.data_home.as_deref(), Some("~/sandbox/share"));
        assert_eq!(config.paths.config_home, None);
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "locale = [").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}
