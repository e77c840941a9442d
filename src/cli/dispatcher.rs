// src/cli/dispatcher.rs

use anyhow::{Result, bail};

use crate::cli::Cli;
use crate::cli::handlers::{self, commons::Editor};

// --- Command Definition and Registry ---

/// Defines a command, its aliases and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>, &mut Editor) -> Result<()>,
}

/// The single source of truth for all commands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "menus",
        aliases: &["tree", "ls"],
        handler: handlers::menus::handle,
    },
    CommandDefinition {
        name: "items",
        aliases: &["list"],
        handler: handlers::items::handle,
    },
    CommandDefinition {
        name: "hide",
        aliases: &[],
        handler: handlers::visibility::handle_hide,
    },
    CommandDefinition {
        name: "show",
        aliases: &[],
        handler: handlers::visibility::handle_show,
    },
    CommandDefinition {
        name: "new-item",
        aliases: &["new"],
        handler: handlers::create::handle_item,
    },
    CommandDefinition {
        name: "new-menu",
        aliases: &["mkmenu"],
        handler: handlers::create::handle_menu,
    },
    CommandDefinition {
        name: "edit-item",
        aliases: &["edit"],
        handler: handlers::edit::handle_item,
    },
    CommandDefinition {
        name: "edit-menu",
        aliases: &[],
        handler: handlers::edit::handle_menu,
    },
    CommandDefinition {
        name: "copy",
        aliases: &["cp"],
        handler: handlers::transfer::handle_copy,
    },
    CommandDefinition {
        name: "move",
        aliases: &["mv"],
        handler: handlers::transfer::handle_move,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Routes the parsed command line to its handler. Without a command, the menu trees
/// are shown.
pub fn dispatch(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let mut args = cli.args.into_iter();
    let command_name = args.next().unwrap_or_else(|| "menus".to_string());
    let Some(command) = find_command(&command_name) else {
        bail!(
            "Unknown command '{}'. Run with --help to see the available commands.",
            command_name
        );
    };

    let mut editor = handlers::commons::build_editor(cli.config.as_deref())?;
    (command.handler)(args.collect(), &mut editor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_command_by_name_and_alias() {
        assert_eq!(find_command("move").map(|c| c.name), Some("move"));
        assert_eq!(find_command("mv").map(|c| c.name), Some("move"));
        assert_eq!(find_command("ls").map(|c| c.name), Some("menus"));
        assert!(find_command("delete").is_none());
    }

    #[test]
    fn test_command_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for command in COMMAND_REGISTRY {
            assert!(seen.insert(command.name));
            for alias in command.aliases {
                assert!(seen.insert(*alias));
            }
        }
    }
}
