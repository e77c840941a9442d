// src/cli/handlers/transfer.rs

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::Colorize;

use crate::cli::{
    args::TransferArgs,
    handlers::commons::{self, Editor},
};
use crate::core::editor::NodeRef;

pub fn handle_copy(args: Vec<String>, editor: &mut Editor) -> Result<()> {
    let transfer_args = TransferArgs::try_parse_from(&args)?;
    let item = commons::resolve_path(editor, &transfer_args.path)?;
    let new_parent = commons::resolve_path(editor, &transfer_args.new_parent)?;
    let (before, after) = commons::resolve_placement(editor, &transfer_args.placement)?;
    let label = commons::describe(editor, item);

    let file_id = editor.copy_item(item, new_parent, before, after)?;

    commons::print_success(&format!(
        "Copied {} to {} as {}.",
        label,
        transfer_args.new_parent.cyan(),
        file_id.dimmed()
    ));
    Ok(())
}

pub fn handle_move(args: Vec<String>, editor: &mut Editor) -> Result<()> {
    // 1. Resolve the entry, its current menu and the target.
    let transfer_args = TransferArgs::try_parse_from(&args)?;
    let item = commons::resolve_path(editor, &transfer_args.path)?;
    let old_parent = editor
        .node(item)?
        .parent
        .map(|node| NodeRef {
            namespace: item.namespace,
            node,
        })
        .ok_or_else(|| anyhow!("'{}' has no parent menu", transfer_args.path))?;
    let new_parent = commons::resolve_path(editor, &transfer_args.new_parent)?;
    let (before, after) = commons::resolve_placement(editor, &transfer_args.placement)?;
    let label = commons::describe(editor, item);

    // 2. Move it.
    editor.move_item(item, old_parent, new_parent, before, after)?;

    commons::print_success(&format!(
        "Moved {} to {}.",
        label,
        transfer_args.new_parent.cyan()
    ));
    Ok(())
}
