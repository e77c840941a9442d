// src/core/resolver.rs

//! The seam to the menu-resolution library.
//!
//! Merging system and user menu files and applying `<Include>`/`<Exclude>` rules is
//! not done here. The editor only consumes the result through [`MenuResolver`].
//! [`CommandResolver`] obtains it from an external program that prints the resolved
//! tree as JSON.

use crate::core::menu_tree::MenuTree;
use crate::models::{ResolveFlags, TreeSnapshot};
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Resolver command could not be parsed: {0}")]
    CommandParse(String),
    #[error("No resolver command configured.")]
    EmptyCommand,
    #[error("Resolver command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Resolver command '{command}' exited with status {status}: {stderr}")]
    NonZeroExitStatus {
        command: String,
        status: i32,
        stderr: String,
    },
    #[error("Resolver command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("Resolver output for '{menu_file}' is not a valid menu tree: {source}")]
    InvalidTree {
        menu_file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Resolver output describes menu '{found}', not '{requested}'")]
    MenuNotFound { requested: String, found: String },
}

/// Produces a read-only merged menu tree for a root menu file.
pub trait MenuResolver {
    /// Resolves `menu_file` keeping the nodes selected by `flags`.
    fn resolve(&self, menu_file: &str, flags: ResolveFlags) -> Result<MenuTree, ResolveError>;
}

/// Runs an external resolver and parses its JSON output.
///
/// The command line is split like a shell would, then the menu file and one switch
/// per set flag (`--include-excluded`, `--include-nodisplay`, `--show-empty`) are
/// appended.
#[derive(Debug, Clone)]
pub struct CommandResolver {
    command_line: String,
}

impl CommandResolver {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self {
            command_line: command_line.into(),
        }
    }

    fn build_args(&self, menu_file: &str, flags: ResolveFlags) -> Result<Vec<String>, ResolveError> {
        let trimmed = self.command_line.trim();
        let mut parts = shlex::split(trimmed)
            .ok_or_else(|| ResolveError::CommandParse(trimmed.to_string()))?;
        if parts.is_empty() {
            return Err(ResolveError::EmptyCommand);
        }
        parts.push(menu_file.to_string());
        if flags.include_excluded {
            parts.push("--include-excluded".to_string());
        }
        if flags.include_nodisplay {
            parts.push("--include-nodisplay".to_string());
        }
        if flags.show_empty {
            parts.push("--show-empty".to_string());
        }
        Ok(parts)
    }
}

impl MenuResolver for CommandResolver {
    fn resolve(&self, menu_file: &str, flags: ResolveFlags) -> Result<MenuTree, ResolveError> {
        let parts = self.build_args(menu_file, flags)?;
        let Some((program, args)) = parts.split_first() else {
            return Err(ResolveError::EmptyCommand);
        };
        let display_command = parts.join(" ");
        log::debug!("Resolving menu with: {}", display_command);

        let output = StdCommand::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ResolveError::CommandFailed(display_command.clone(), e))?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(ResolveError::NonZeroExitStatus {
                command: display_command,
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }
        if !stderr.is_empty() {
            log::warn!("Menu resolver reported: {}", stderr);
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            ResolveError::InvalidUtf8Output {
                command: display_command,
                source: e,
            }
        })?;
        parse_tree(menu_file, &stdout)
    }
}

/// Parses resolver JSON into a [`MenuTree`]. The output must describe `menu_file`.
pub fn parse_tree(menu_file: &str, json: &str) -> Result<MenuTree, ResolveError> {
    let snapshot: TreeSnapshot =
        serde_json::from_str(json).map_err(|e| ResolveError::InvalidTree {
            menu_file: menu_file.to_string(),
            source: e,
        })?;
    let tree = MenuTree::from_snapshot(snapshot);
    if tree.menu_file() != menu_file {
        return Err(ResolveError::MenuNotFound {
            requested: menu_file.to_string(),
            found: tree.menu_file().to_string(),
        });
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_appends_menu_and_flags() {
        let resolver = CommandResolver::new("xdg-menu-resolve --json --root '/etc/xdg'");
        let args = resolver
            .build_args("applications.menu", ResolveFlags::FULL)
            .unwrap();
        assert_eq!(
            args,
            vec![
                "xdg-menu-resolve",
                "--json",
                "--root",
                "/etc/xdg",
                "applications.menu",
                "--include-excluded",
                "--include-nodisplay",
                "--show-empty",
            ]
        );

        let visible = resolver
            .build_args("settings.menu", ResolveFlags::VISIBLE)
            .unwrap();
        assert_eq!(visible.last().map(String::as_str), Some("settings.menu"));
    }

    #[test]
    fn test_build_args_rejects_empty_and_unbalanced_commands() {
        assert!(matches!(
            CommandResolver::new("   ").build_args("a.menu", ResolveFlags::VISIBLE),
            Err(ResolveError::EmptyCommand)
        ));
        assert!(matches!(
            CommandResolver::new("resolve 'oops").build_args("a.menu", ResolveFlags::VISIBLE),
            Err(ResolveError::CommandParse(_))
        ));
    }

    #[test]
    fn test_parse_tree_reports_menu_file() {
        let err = parse_tree("settings.menu", "{not json").unwrap_err();
        assert!(err.to_string().contains("settings.menu"));

        let tree = parse_tree(
            "settings.menu",
            r#"{"menu_file":"settings.menu","root":{"type":"directory","menu_id":"Desktop","name":"Settings"}}"#,
        )
        .unwrap();
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_parse_tree_rejects_other_menu_file() {
        let result = parse_tree(
            "settings.menu",
            r#"{"menu_file":"applications.menu","root":{"type":"directory","menu_id":"Applications","name":"A"}}"#,
        );
        match result {
            Err(ResolveError::MenuNotFound { requested, found }) => {
                assert_eq!(requested, "settings.menu");
                assert_eq!(found, "applications.menu");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_command_resolver_runs_program() {
        let resolver = CommandResolver::new(
            r#"sh -c 'echo "{\"menu_file\":\"$0\",\"root\":{\"type\":\"directory\",\"menu_id\":\"Applications\",\"name\":\"A\"}}"'"#,
        );
        let tree = resolver
            .resolve("applications.menu", ResolveFlags::VISIBLE)
            .unwrap();
        assert_eq!(tree.menu_file(), "applications.menu");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_resolver_reports_failure() {
        let resolver = CommandResolver::new("sh -c 'echo broken >&2; exit 3'");
        match resolver.resolve("applications.menu", ResolveFlags::VISIBLE) {
            Err(ResolveError::NonZeroExitStatus { status, stderr, .. }) => {
                assert_eq!(status, 3);
                assert_eq!(stderr, "broken");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
