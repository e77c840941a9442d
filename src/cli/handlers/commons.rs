// src/cli/handlers/commons.rs

// Shared helpers used by multiple handlers.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::{
    cli::args::PlacementArgs,
    config,
    core::{
        editor::{MenuEditor, NodeRef},
        locale,
        menu_tree::NodeKind,
        paths::MenuPaths,
        resolver::CommandResolver,
    },
};

/// The editor as driven by the command line.
pub type Editor = MenuEditor<CommandResolver>;

/// Loads the config and builds an editor from it.
pub fn build_editor(config_path: Option<&Path>) -> Result<Editor> {
    let config = config::load_config(config_path).context("Failed to load the configuration")?;

    let paths = MenuPaths::from_env()?.with_overrides(
        config.paths.config_home.as_deref(),
        config.paths.data_home.as_deref(),
    )?;
    let locale = locale::detect_locale(config.locale.as_deref());
    log::debug!("Using locale {:?}", locale);

    let resolver = CommandResolver::new(config.resolver.command);
    MenuEditor::new(resolver, paths, locale).context("Failed to load the menus")
}

/// Resolves a menu path given on the command line.
pub fn resolve_path(editor: &Editor, path: &str) -> Result<NodeRef> {
    editor
        .find(path)
        .with_context(|| format!("Could not resolve '{}'", path))
}

/// Resolves the optional `--before`/`--after` anchors.
pub fn resolve_placement(
    editor: &Editor,
    placement: &PlacementArgs,
) -> Result<(Option<NodeRef>, Option<NodeRef>)> {
    let before = placement
        .before
        .as_deref()
        .map(|path| resolve_path(editor, path))
        .transpose()?;
    let after = placement
        .after
        .as_deref()
        .map(|path| resolve_path(editor, path))
        .transpose()?;
    Ok((before, after))
}

/// A one-line description of a node: name plus its id, dimmed.
pub fn describe(editor: &Editor, node: NodeRef) -> String {
    let Ok(menu_node) = editor.node(node) else {
        return "?".to_string();
    };
    match &menu_node.kind {
        NodeKind::Directory(info) => {
            format!("{} {}", info.name.bold(), format!("({})", info.menu_id).dimmed())
        }
        NodeKind::Entry(entry) => {
            format!("{} {}", entry.name, format!("({})", entry.desktop_file_id).dimmed())
        }
        NodeKind::Separator => "────────".dimmed().to_string(),
    }
}

/// Prints the common success banner followed by `message`.
pub fn print_success(message: &str) {
    println!("\n{}", "Success!".green().bold());
    println!("  {}", message);
}

/// Prints the "nothing changed" notice.
pub fn print_no_change(message: &str) {
    println!("\n{}", message.yellow());
}
