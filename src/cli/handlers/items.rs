// src/cli/handlers/items.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::cli::{
    args::ItemsArgs,
    handlers::commons::{self, Editor},
};
use crate::core::menu_tree::NodeKind;

pub fn handle(args: Vec<String>, editor: &mut Editor) -> Result<()> {
    let items_args = ItemsArgs::try_parse_from(&args)?;
    let menu = commons::resolve_path(editor, &items_args.menu)?;
    let items = editor.items(menu)?;

    println!("\nContents of {}:", editor.menu_path(menu)?.cyan());
    if items.is_empty() {
        println!("  {}", "(empty)".dimmed());
        return Ok(());
    }

    for (node, visible) in items {
        let menu_node = editor.node(node)?;
        let marker = match &menu_node.kind {
            NodeKind::Directory(_) => "[menu]".blue(),
            NodeKind::Entry(_) | NodeKind::Separator => "      ".normal(),
        };
        let label = if items_args.ids {
            commons::describe(editor, node)
        } else if matches!(menu_node.kind, NodeKind::Separator) {
            "────────".dimmed().to_string()
        } else {
            menu_node.name().to_string()
        };
        if visible {
            println!("  {} {}", marker, label);
        } else {
            println!("  {} {} {}", marker, label.dimmed(), "(hidden)".yellow());
        }
    }
    Ok(())
}
