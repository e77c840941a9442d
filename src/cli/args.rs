// src/cli/args.rs
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Shows both menu trees.")]
pub struct MenusArgs {
    /// Also list the entries of every menu.
    #[arg(long, short)]
    pub items: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Lists the children of a menu.")]
pub struct ItemsArgs {
    /// The menu to list, e.g. `Applications/Games`.
    pub menu: String,

    /// Show desktop file ids next to the names.
    #[arg(long)]
    pub ids: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct PathArgs {
    /// The entry or menu, e.g. `Applications/Games/foo.desktop`.
    pub path: String,
}

/// Where a new or moved entry goes among its siblings.
#[derive(clap::Args, Debug, Default)]
pub struct PlacementArgs {
    /// Place it right before this sibling.
    #[arg(long, value_name = "PATH")]
    pub before: Option<String>,

    /// Place it right after this sibling (wins over --before).
    #[arg(long, value_name = "PATH")]
    pub after: Option<String>,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Creates a new application entry.")]
pub struct NewItemArgs {
    /// The menu that receives the entry.
    pub parent: String,

    /// Display name.
    #[arg(long)]
    pub name: String,

    /// Command line to run.
    #[arg(long)]
    pub exec: String,

    /// Icon name or path.
    #[arg(long, default_value = "")]
    pub icon: String,

    /// Tooltip text.
    #[arg(long, default_value = "")]
    pub comment: String,

    /// Run the command inside a terminal.
    #[arg(long)]
    pub terminal: bool,

    #[command(flatten)]
    pub placement: PlacementArgs,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Creates a new sub-menu.")]
pub struct NewMenuArgs {
    /// The menu that receives the sub-menu.
    pub parent: String,

    /// Display name.
    #[arg(long)]
    pub name: String,

    /// Icon name or path.
    #[arg(long, default_value = "")]
    pub icon: String,

    /// Tooltip text.
    #[arg(long, default_value = "")]
    pub comment: String,

    #[command(flatten)]
    pub placement: PlacementArgs,
}

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Edits an application entry. Fields not given keep their value."
)]
pub struct EditItemArgs {
    /// The entry to edit.
    pub path: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub icon: Option<String>,

    #[arg(long)]
    pub comment: Option<String>,

    #[arg(long)]
    pub exec: Option<String>,

    /// `true` or `false`.
    #[arg(long, value_name = "BOOL")]
    pub terminal: Option<bool>,
}

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Edits a menu. Fields not given keep their value."
)]
pub struct EditMenuArgs {
    /// The menu to edit.
    pub path: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub icon: Option<String>,

    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct TransferArgs {
    /// The entry to copy or move.
    pub path: String,

    /// The menu that receives it.
    pub new_parent: String,

    #[command(flatten)]
    pub placement: PlacementArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_args_parse() {
        let args = NewItemArgs::try_parse_from([
            "Applications/Games",
            "--name",
            "Solitaire",
            "--exec",
            "sol --fast",
            "--terminal",
            "--after",
            "Applications/Games/foo.desktop",
        ])
        .unwrap();
        assert_eq!(args.parent, "Applications/Games");
        assert_eq!(args.exec, "sol --fast");
        assert!(args.terminal);
        assert_eq!(args.icon, "");
        assert_eq!(
            args.placement.after.as_deref(),
            Some("Applications/Games/foo.desktop")
        );
        assert!(args.placement.before.is_none());
    }

    #[test]
    fn test_new_item_requires_name_and_exec() {
        assert!(NewItemArgs::try_parse_from(["Applications", "--name", "X"]).is_err());
    }

    #[test]
    fn test_edit_item_terminal_takes_a_value() {
        let args =
            EditItemArgs::try_parse_from(["Applications/foo.desktop", "--terminal", "false"])
                .unwrap();
        assert_eq!(args.terminal, Some(false));
        assert!(args.name.is_none());
    }
}
