// src/cli/handlers/menus.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::cli::{
    args::MenusArgs,
    handlers::commons::{self, Editor},
};
use crate::core::editor::NodeRef;

pub fn handle(args: Vec<String>, editor: &mut Editor) -> Result<()> {
    // 1. Parse this handler's specific arguments.
    let menus_args = MenusArgs::try_parse_from(&args)?;

    // 2. Print every namespace root with its sub-menus below it.
    for root in editor.top_level_menus() {
        let path = editor.menu_path(root)?;
        println!("\n{} {}", commons::describe(editor, root), format!("[{}]", path).dimmed());
        print_children(editor, root, "", menus_args.items)?;
    }
    Ok(())
}

/// Prints the sub-menus (and, with `with_items`, the entries) of `menu` as an ASCII tree.
fn print_children(editor: &Editor, menu: NodeRef, prefix: &str, with_items: bool) -> Result<()> {
    let mut rows: Vec<(NodeRef, bool, bool)> = editor
        .child_menus(menu)?
        .into_iter()
        .map(|(node, visible)| (node, visible, true))
        .collect();
    if with_items {
        rows.extend(
            editor
                .items(menu)?
                .into_iter()
                .filter(|(node, _)| {
                    editor
                        .node(*node)
                        .is_ok_and(|menu_node| menu_node.as_directory().is_none())
                })
                .map(|(node, visible)| (node, visible, false)),
        );
    }

    let count = rows.len();
    for (i, (node, visible, is_menu)) in rows.into_iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "└─ " } else { "├─ " };
        let label = commons::describe(editor, node);
        if visible {
            println!("{}{}{}", prefix, connector, label);
        } else {
            println!("{}{}{} {}", prefix, connector, label.dimmed(), "(hidden)".yellow());
        }

        if is_menu {
            let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
            print_children(editor, node, &child_prefix, with_items)?;
        }
    }
    Ok(())
}
