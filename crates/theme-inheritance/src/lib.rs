/*
 * theme-inheritance
 * Copyright (c) 2025 Posit, PBC
 *
 * Theme inheritance-chain, asset, and template-engine resolution.
 *
 * A theme is a directory under a themes root. It may declare a parent
 * theme by name in a `parent` file at its root, and a templating engine
 * in an `engine` file. Resolving a theme yields its chain: the theme
 * itself followed by its ancestors, nearest-first. Assets are looked up
 * along the chain with a first-match-wins policy, so a theme overrides
 * anything it inherits.
 */

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File at a theme root naming the theme's parent.
const PARENT_FILE: &str = "parent";

/// File at a theme root naming the templating engine the theme uses.
const ENGINE_FILE: &str = "engine";

/// Engine assumed when no theme in a chain declares one.
pub const DEFAULT_ENGINE: &str = "mako";

/// Error type for theme resolution operations.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// A theme named in a chain has no directory under the themes root.
    #[error("theme '{theme}' not found under {themes_dir}")]
    NotFound { theme: String, themes_dir: PathBuf },

    /// A declaration file existed but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve the directory of a single theme under `themes_dir`.
pub fn get_theme_path(theme: &str, themes_dir: &Path) -> Result<PathBuf, ThemeError> {
    let path = themes_dir.join(theme);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(ThemeError::NotFound {
            theme: theme.to_string(),
            themes_dir: themes_dir.to_path_buf(),
        })
    }
}

/// Resolve a theme's inheritance chain, nearest-first.
///
/// The returned sequence starts with `theme` itself and walks `parent`
/// declarations upward. Traversal stops at a theme with no `parent` file,
/// or when the declared parent is already in the chain (inheritance
/// cycles terminate rather than loop). A theme directory missing anywhere
/// along the walk is an error.
pub fn get_theme_chain(theme: &str, themes_dir: &Path) -> Result<Vec<String>, ThemeError> {
    let mut chain = vec![theme.to_string()];
    let mut current = theme.to_string();
    while let Some(parent) = parent_of(&current, themes_dir)? {
        if chain.contains(&parent) {
            break;
        }
        chain.push(parent.clone());
        current = parent;
    }
    Ok(chain)
}

/// Read a theme's `parent` declaration, if it has one.
fn parent_of(theme: &str, themes_dir: &Path) -> Result<Option<String>, ThemeError> {
    let declaration = get_theme_path(theme, themes_dir)?.join(PARENT_FILE);
    if !declaration.is_file() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&declaration).map_err(|source| ThemeError::Io {
        path: declaration,
        source,
    })?;
    Ok(Some(raw.trim().to_string()))
}

/// Find the first chain member (nearest-first) carrying `filename`.
///
/// Returns the full path of the winning file, or `None` when no member
/// of the chain has it. First match wins: a theme's own asset shadows
/// any inherited one.
pub fn get_asset_path(
    filename: &str,
    chain: &[String],
    themes_dir: &Path,
) -> Result<Option<PathBuf>, ThemeError> {
    for theme in chain {
        let candidate = get_theme_path(theme, themes_dir)?.join(filename);
        if candidate.is_file() {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// Determine the templating engine a chain uses.
///
/// The nearest chain member with an `engine` file decides; without one
/// the chain falls back to [`DEFAULT_ENGINE`].
pub fn get_template_engine(chain: &[String], themes_dir: &Path) -> Result<String, ThemeError> {
    for theme in chain {
        let declaration = get_theme_path(theme, themes_dir)?.join(ENGINE_FILE);
        if declaration.is_file() {
            let raw = fs::read_to_string(&declaration).map_err(|source| ThemeError::Io {
                path: declaration,
                source,
            })?;
            return Ok(raw.trim().to_string());
        }
    }
    Ok(DEFAULT_ENGINE.to_string())
}
