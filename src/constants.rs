// src/constants.rs

/// The name of the directory holding the editor's own configuration (in ~/.config/).
pub const APP_CONFIG_DIR: &str = "xdg-menu-editor";

/// The name of the editor's configuration file (inside the app config directory).
pub const CONFIG_FILENAME: &str = "config.toml";

/// Root menu file of the "applications" namespace.
pub const APPLICATIONS_MENU_FILE: &str = "applications.menu";

/// Root menu file of the "settings" namespace.
pub const SETTINGS_MENU_FILE: &str = "settings.menu";

/// Path sentinel (and root `<Name>`) of the "applications" namespace.
pub const APPLICATIONS_SENTINEL: &str = "Applications";

/// Path sentinel (and root `<Name>`) of the "settings" namespace.
pub const SETTINGS_SENTINEL: &str = "Desktop";

/// Sub-directory of the config dirs holding menu files.
pub const MENUS_DIR: &str = "menus";

/// Sub-directory of the data dirs holding `.desktop` files.
pub const APPLICATIONS_DIR: &str = "applications";

/// Sub-directory of the data dirs holding `.directory` files.
pub const DESKTOP_DIRECTORIES_DIR: &str = "desktop-directories";

/// Extension of application entry key-files.
pub const DESKTOP_EXTENSION: &str = ".desktop";

/// Extension of menu directory key-files.
pub const DIRECTORY_EXTENSION: &str = ".directory";

/// Entries whose id ends with this suffix are internal bookkeeping and never listed.
pub const USER_CUSTOM_SUFFIX: &str = "-usercustom.desktop";

/// Menu id of the catch-all category, hidden from listings while empty.
pub const OTHER_MENU_ID: &str = "Other";

/// Public identifier of the menu DTD, written into synthesized override files.
pub const MENU_DOCTYPE: &str = "Menu PUBLIC \"-//freedesktop//DTD Menu 1.0//EN\" \"http://standards.freedesktop.org/menu-spec/menu-1.0.dtd\"";

/// Fallback system config dir when `$XDG_CONFIG_DIRS` is unset.
pub const DEFAULT_CONFIG_DIRS: &str = "/etc/xdg";

/// Fallback system data dirs when `$XDG_DATA_DIRS` is unset.
pub const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";

/// Main group of every desktop-entry key-file.
pub const DESKTOP_ENTRY_GROUP: &str = "Desktop Entry";

/// Key names used by the editor.
pub mod keys {
    /// `Type`
    pub const TYPE: &str = "Type";
    /// `Icon`
    pub const ICON: &str = "Icon";
    /// `Name`
    pub const NAME: &str = "Name";
    /// `Comment`
    pub const COMMENT: &str = "Comment";
    /// `Exec`
    pub const EXEC: &str = "Exec";
    /// `Terminal`
    pub const TERMINAL: &str = "Terminal";
    /// `NoDisplay`
    pub const NO_DISPLAY: &str = "NoDisplay";
    /// `Hidden`
    pub const HIDDEN: &str = "Hidden";
    /// `Categories`
    pub const CATEGORIES: &str = "Categories";
}
