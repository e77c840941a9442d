// src/cli/mod.rs

use clap::Parser;
use std::path::PathBuf;

pub mod args;
pub mod dispatcher;
pub mod handlers;

const COMMANDS_HELP: &str = "\
Commands:
  menus                              Show both menu trees
  items <menu>                       List the entries of a menu
  hide <path> / show <path>          Hide or show an entry or menu
  new-item <parent> --name N --exec CMD [--icon I] [--comment C] [--terminal]
  new-menu <parent> --name N [--icon I] [--comment C]
  edit-item <path> [--name N] [--icon I] [--comment C] [--exec CMD] [--terminal BOOL]
  edit-menu <path> [--name N] [--icon I] [--comment C]
  copy <path> <new-parent>           Copy an entry into another menu
  move <path> <new-parent>           Move an entry into another menu

new-item, new-menu, copy and move accept --before <path> / --after <path>.
Paths start with a root menu: Applications/Games/foo.desktop or Desktop/Personal.";

/// menu-editor: edits freedesktop.org application menus.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    after_help = COMMANDS_HELP,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
#[command(trailing_var_arg = true)]
pub struct Cli {
    /// Use this config file instead of ~/.config/xdg-menu-editor/config.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The command followed by its own arguments.
    #[arg(value_name = "COMMAND")]
    pub args: Vec<String>,
}
