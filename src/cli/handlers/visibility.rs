// src/cli/handlers/visibility.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::cli::{
    args::PathArgs,
    handlers::commons::{self, Editor},
};

pub fn handle_hide(args: Vec<String>, editor: &mut Editor) -> Result<()> {
    set_visible(args, editor, false)
}

pub fn handle_show(args: Vec<String>, editor: &mut Editor) -> Result<()> {
    set_visible(args, editor, true)
}

fn set_visible(args: Vec<String>, editor: &mut Editor, visible: bool) -> Result<()> {
    // 1. Resolve the target.
    let path_args = PathArgs::try_parse_from(&args)?;
    let node = commons::resolve_path(editor, &path_args.path)?;
    let label = commons::describe(editor, node);

    // 2. Nothing to do when it already is in the requested state.
    if editor.is_visible(node)? == visible {
        let state = if visible { "visible" } else { "hidden" };
        commons::print_no_change(&format!("'{}' is already {}.", path_args.path, state));
        return Ok(());
    }

    // 3. Apply and report.
    editor.set_visible(node, visible)?;
    let verb = if visible { "Shown".green() } else { "Hidden".yellow() };
    commons::print_success(&format!("{} {}", verb, label));
    Ok(())
}
