// src/cli/handlers/create.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::cli::{
    args::{NewItemArgs, NewMenuArgs},
    handlers::commons::{self, Editor},
};
use crate::models::{ItemDetails, MenuDetails};

pub fn handle_item(args: Vec<String>, editor: &mut Editor) -> Result<()> {
    // 1. Parse the arguments and resolve every path before anything is written.
    let new_args = NewItemArgs::try_parse_from(&args)?;
    let parent = commons::resolve_path(editor, &new_args.parent)?;
    let (before, after) = commons::resolve_placement(editor, &new_args.placement)?;

    // 2. Create the entry.
    let details = ItemDetails {
        icon: new_args.icon,
        name: new_args.name,
        comment: new_args.comment,
        command: new_args.exec,
        use_terminal: new_args.terminal,
    };
    let file_id = editor.create_item(parent, &details, before, after)?;

    commons::print_success(&format!(
        "Created entry '{}' as {} in {}.",
        details.name.cyan(),
        file_id.dimmed(),
        new_args.parent
    ));
    Ok(())
}

pub fn handle_menu(args: Vec<String>, editor: &mut Editor) -> Result<()> {
    let new_args = NewMenuArgs::try_parse_from(&args)?;
    let parent = commons::resolve_path(editor, &new_args.parent)?;
    let (before, after) = commons::resolve_placement(editor, &new_args.placement)?;

    let details = MenuDetails {
        icon: new_args.icon,
        name: new_args.name,
        comment: new_args.comment,
    };
    let menu_id = editor.create_menu(parent, &details, before, after)?;

    commons::print_success(&format!(
        "Created menu '{}' at {}/{}.",
        details.name.cyan(),
        new_args.parent.trim_end_matches('/'),
        menu_id
    ));
    Ok(())
}
