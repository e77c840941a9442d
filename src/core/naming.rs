// src/core/naming.rs

use crate::constants::{DESKTOP_EXTENSION, DIRECTORY_EXTENSION};
use crate::core::paths::MenuPaths;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_SLUG_RUN: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Lowercases `name` and collapses every run of characters outside `[a-z0-9]`
/// into a single `-`.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_SLUG_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Generates a key-file id for `name` that no user copy or system file uses yet.
///
/// The id is always `<slug>-<n><extension>` with `n` starting at 1.
pub fn unique_file_id(name: &str, extension: &str, paths: &MenuPaths) -> String {
    let mut slug = slugify(name);
    if slug.is_empty() {
        slug = if extension == DIRECTORY_EXTENSION {
            "menu".to_string()
        } else {
            "item".to_string()
        };
    }

    let is_taken = |candidate: &str| {
        if extension == DESKTOP_EXTENSION {
            paths.item_id_taken(candidate)
        } else {
            paths.directory_id_taken(candidate)
        }
    };

    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{slug}-{counter}{extension}");
        if !is_taken(&candidate) {
            log::trace!("Generated file id '{}' for '{}'", candidate, name);
            return candidate;
        }
        counter += 1;
    }
}
