// src/bin/menu-editor.rs

use clap::Parser;
use colored::Colorize;
use xdg_menu_editor::cli::{Cli, dispatcher};

/// The main entry point of the `menu-editor` application.
fn main() {
    env_logger::init();

    // Every handler reports through `anyhow`, so errors are printed in one place.
    if let Err(e) = dispatcher::dispatch(Cli::parse()) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}
