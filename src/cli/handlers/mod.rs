// src/cli/handlers/mod.rs

pub mod commons;
pub mod create;
pub mod edit;
pub mod items;
pub mod menus;
pub mod transfer;
pub mod visibility;
