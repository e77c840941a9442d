// src/lib.rs

//! Editing of freedesktop.org application menus.
//!
//! The library keeps the resolved menu trees read-only and expresses every change as
//! per-user override files: `applications.menu`/`settings.menu` documents under
//! `$XDG_CONFIG_HOME/menus` and key-file copies under `$XDG_DATA_HOME`.

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod dev_utils;
pub mod models;
