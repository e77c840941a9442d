// src/core/keyfile.rs

//! Minimal desktop-entry key-file store.
//!
//! Only what the editor needs: read a `.desktop`/`.directory` file, get and set keys of
//! the `[Desktop Entry]` group (optionally locale-qualified) and write it back. Every
//! other line (comments, blank lines, action groups, unknown keys) is kept verbatim
//! and in order.

use crate::constants::{DESKTOP_ENTRY_GROUP, keys};
use crate::core::paths::{self, PathError};
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyFileError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    #[error("Could not replace '{path}': {source}")]
    Persist {
        path: String,
        #[source]
        source: tempfile::PersistError,
    },
    #[error("Invalid line {line} in key-file: '{content}'")]
    InvalidLine { line: usize, content: String },
    #[error("Key '{key}' on line {line} appears before any group header")]
    KeyOutsideGroup { line: usize, key: String },
}

/// What a freshly created key-file describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFileType {
    /// A `.desktop` launcher.
    Application,
    /// A `.directory` menu description.
    Directory,
}

impl KeyFileType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Application => "Application",
            Self::Directory => "Directory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Blank,
    Comment(String),
    Group(String),
    Pair { key: String, value: String },
}

/// An in-memory key-file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFile {
    lines: Vec<Line>,
}

impl KeyFile {
    /// A new key-file holding only `[Desktop Entry]` and its `Type`.
    pub fn new(file_type: KeyFileType) -> Self {
        Self {
            lines: vec![
                Line::Group(DESKTOP_ENTRY_GROUP.to_string()),
                Line::Pair {
                    key: keys::TYPE.to_string(),
                    value: file_type.as_str().to_string(),
                },
            ],
        }
    }

    /// Reads `path`, or starts a new key-file of `file_type` when it does not exist.
    pub fn open(path: &Path, file_type: KeyFileType) -> Result<Self, KeyFileError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!(
                    "Key-file '{}' does not exist, starting a new one.",
                    path.display()
                );
                Ok(Self::new(file_type))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parses key-file text.
    pub fn parse(content: &str) -> Result<Self, KeyFileError> {
        let mut lines = Vec::new();
        let mut in_group = false;

        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                lines.push(Line::Blank);
            } else if trimmed.starts_with('#') {
                lines.push(Line::Comment(raw.to_string()));
            } else if let Some(name) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                lines.push(Line::Group(name.to_string()));
                in_group = true;
            } else if let Some((key, value)) = raw.split_once('=') {
                let key = key.trim().to_string();
                if !in_group {
                    return Err(KeyFileError::KeyOutsideGroup { line: line_no, key });
                }
                lines.push(Line::Pair {
                    key,
                    value: value.trim_start().to_string(),
                });
            } else {
                return Err(KeyFileError::InvalidLine {
                    line: line_no,
                    content: raw.to_string(),
                });
            }
        }

        Ok(Self { lines })
    }

    /// Value of `key` (or `key[locale]`) in the `[Desktop Entry]` group.
    pub fn get(&self, key: &str, locale: Option<&str>) -> Option<&str> {
        let full_key = qualify(key, locale);
        let (start, end) = self.main_group_bounds()?;
        self.lines
            .get(start..end)?
            .iter()
            .find_map(|line| match line {
                Line::Pair { key, value } if *key == full_key => Some(value.as_str()),
                _ => None,
            })
    }

    /// Sets `key` (or `key[locale]`) in the `[Desktop Entry]` group, replacing an
    /// existing value in place or appending the key at the end of the group.
    pub fn set(&mut self, key: &str, value: &str, locale: Option<&str>) {
        let full_key = qualify(key, locale);
        let (start, end) = match self.main_group_bounds() {
            Some(bounds) => bounds,
            None => {
                self.lines
                    .insert(0, Line::Group(DESKTOP_ENTRY_GROUP.to_string()));
                (1, 1)
            }
        };

        let existing = self
            .lines
            .iter_mut()
            .skip(start)
            .take(end - start)
            .find_map(|line| match line {
                Line::Pair { key, value } if *key == full_key => Some(value),
                _ => None,
            });
        if let Some(slot) = existing {
            *slot = value.to_string();
            return;
        }

        // Append after the last non-blank line of the group.
        let mut insert_at = end;
        while insert_at > start && matches!(self.lines.get(insert_at - 1), Some(Line::Blank)) {
            insert_at -= 1;
        }
        self.lines.insert(
            insert_at,
            Line::Pair {
                key: full_key,
                value: value.to_string(),
            },
        );
    }

    /// Sets a boolean key (`true`/`false`).
    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" }, None);
    }

    /// Writes the key-file to `path`, replacing any existing file in one step.
    pub fn write(&self, path: &Path) -> Result<(), KeyFileError> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        paths::ensure_dir(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(self.to_string().as_bytes())?;
        temp.flush()?;
        temp.persist(path).map_err(|e| KeyFileError::Persist {
            path: path.display().to_string(),
            source: e,
        })?;

        log::debug!("Wrote key-file '{}'", path.display());
        Ok(())
    }

    /// Line range `[start, end)` holding the pairs of `[Desktop Entry]`.
    fn main_group_bounds(&self) -> Option<(usize, usize)> {
        let header = self
            .lines
            .iter()
            .position(|line| matches!(line, Line::Group(name) if name == DESKTOP_ENTRY_GROUP))?;
        let start = header + 1;
        let end = self
            .lines
            .iter()
            .skip(start)
            .position(|line| matches!(line, Line::Group(_)))
            .map_or(self.lines.len(), |offset| start + offset);
        Some((start, end))
    }
}

impl fmt::Display for KeyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            match line {
                Line::Blank => writeln!(f)?,
                Line::Comment(text) => writeln!(f, "{text}")?,
                Line::Group(name) => writeln!(f, "[{name}]")?,
                Line::Pair { key, value } => writeln!(f, "{key}={value}")?,
            }
        }
        Ok(())
    }
}

fn qualify(key: &str, locale: Option<&str>) -> String {
    match locale {
        Some(tag) => format!("{key}[{tag}]"),
        None => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FIREFOX: &str = "\
# Managed by the distribution
[Desktop Entry]
Type=Application
Name=Firefox
Name[de]=Firefox Browser
Exec=firefox %u
Categories=Network;WebBrowser;

[Desktop Action new-window]
Name=New Window
Exec=firefox --new-window
";

    #[test]
    fn test_parse_and_get() {
        let keyfile = KeyFile::parse(FIREFOX).unwrap();
        assert_eq!(keyfile.get("Name", None), Some("Firefox"));
        assert_eq!(keyfile.get("Name", Some("de")), Some("Firefox Browser"));
        assert_eq!(keyfile.get("Exec", None), Some("firefox %u"));
        assert_eq!(keyfile.get("Icon", None), None);
    }

    #[test]
    fn test_get_ignores_other_groups() {
        let keyfile = KeyFile::parse("[Desktop Action x]\nName=Other\n").unwrap();
        assert_eq!(keyfile.get("Name", None), None);
    }

    #[test]
    fn test_set_replaces_in_place_and_appends_inside_group() {
        // --- Setup ---
        let mut keyfile = KeyFile::parse(FIREFOX).unwrap();

        // --- Execute ---
        keyfile.set("Name", "Web", None);
        keyfile.set("Name", "Netz", Some("de_DE"));
        keyfile.set_bool("NoDisplay", true);

        // --- Assert ---
        let text = keyfile.to_string();
        assert!(text.starts_with("# Managed by the distribution\n[Desktop Entry]\n"));
        assert!(text.contains("Name=Web\n"));
        assert!(text.contains(
            "Categories=Network;WebBrowser;\nName[de_DE]=Netz\nNoDisplay=true\n\n[Desktop Action new-window]"
        ));
        // The action group keeps its own Name.
        assert!(text.contains("[Desktop Action new-window]\nName=New Window\n"));
        assert_eq!(keyfile.get("NoDisplay", None), Some("true"));
    }

    #[test]
    fn test_set_creates_missing_main_group() {
        let mut keyfile = KeyFile::parse("[Desktop Action x]\nExec=x\n").unwrap();
        keyfile.set("Name", "Y", None);
        assert_eq!(
            keyfile.to_string(),
            "[Desktop Entry]\nName=Y\n[Desktop Action x]\nExec=x\n"
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            KeyFile::parse("[Desktop Entry]\nthis is not a pair\n"),
            Err(KeyFileError::InvalidLine { line: 2, .. })
        ));
        assert!(matches!(
            KeyFile::parse("Name=x\n"),
            Err(KeyFileError::KeyOutsideGroup { line: 1, .. })
        ));
    }

    #[test]
    fn test_open_missing_file_starts_typed_keyfile() {
        let tmp = TempDir::new().unwrap();
        let keyfile =
            KeyFile::open(&tmp.path().join("nope.directory"), KeyFileType::Directory).unwrap();
        assert_eq!(keyfile.to_string(), "[Desktop Entry]\nType=Directory\n");
    }

    #[test]
    fn test_write_creates_directories() {
        // --- Setup ---
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("share/applications/foo-1.desktop");
        let mut keyfile = KeyFile::new(KeyFileType::Application);
        keyfile.set("Exec", "foo", None);

        // --- Execute ---
        keyfile.write(&target).unwrap();

        // --- Assert ---
        let written = fs::read_to_string(&target).unwrap();
        assert_eq!(written, "[Desktop Entry]\nType=Application\nExec=foo\n");
        assert_eq!(KeyFile::open(&target, KeyFileType::Application).unwrap(), keyfile);
    }
}
