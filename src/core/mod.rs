// src/core/mod.rs

pub mod editor;
pub mod keyfile;
pub mod layout;
pub mod locale;
pub mod menu_tree;
pub mod naming;
pub mod override_doc;
pub mod paths;
pub mod resolver;
pub mod xml_tree;
