// src/cli/handlers/edit.rs

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::Colorize;

use crate::cli::{
    args::{EditItemArgs, EditMenuArgs},
    handlers::commons::{self, Editor},
};
use crate::models::{ItemDetails, MenuDetails};

pub fn handle_item(args: Vec<String>, editor: &mut Editor) -> Result<()> {
    // 1. Parse and resolve the entry.
    let edit_args = EditItemArgs::try_parse_from(&args)?;
    let node = commons::resolve_path(editor, &edit_args.path)?;
    let entry = editor
        .node(node)?
        .as_entry()
        .ok_or_else(|| anyhow!("'{}' is not an application entry", edit_args.path))?;

    // 2. Options not given keep their current value.
    let details = ItemDetails {
        icon: edit_args
            .icon
            .unwrap_or_else(|| entry.icon.clone().unwrap_or_default()),
        name: edit_args.name.unwrap_or_else(|| entry.name.clone()),
        comment: edit_args
            .comment
            .unwrap_or_else(|| entry.comment.clone().unwrap_or_default()),
        command: edit_args.exec.unwrap_or_else(|| entry.exec.clone()),
        use_terminal: edit_args.terminal.unwrap_or(entry.terminal),
    };

    // 3. Write it.
    if editor.edit_item(node, &details)? {
        commons::print_success(&format!("Updated entry '{}'.", details.name.cyan()));
    } else {
        commons::print_no_change("Nothing changed.");
    }
    Ok(())
}

pub fn handle_menu(args: Vec<String>, editor: &mut Editor) -> Result<()> {
    let edit_args = EditMenuArgs::try_parse_from(&args)?;
    let node = commons::resolve_path(editor, &edit_args.path)?;
    let info = editor
        .node(node)?
        .as_directory()
        .ok_or_else(|| anyhow!("'{}' is not a menu", edit_args.path))?;

    let details = MenuDetails {
        icon: edit_args
            .icon
            .unwrap_or_else(|| info.icon.clone().unwrap_or_default()),
        name: edit_args.name.unwrap_or_else(|| info.name.clone()),
        comment: edit_args
            .comment
            .unwrap_or_else(|| info.comment.clone().unwrap_or_default()),
    };

    if editor.edit_menu(node, &details)? {
        commons::print_success(&format!("Updated menu '{}'.", details.name.cyan()));
    } else {
        commons::print_no_change("Nothing changed.");
    }
    Ok(())
}
