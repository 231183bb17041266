/*
 * builder.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Theme enumeration, per-theme resolution, and aggregation.
 */

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use crate::highlight;
use crate::versions::SupportedVersions;

/// Substituted when no theme in a chain carries a README.
pub const README_PLACEHOLDER: &str = "No README.md file available.";

/// Reserved output key holding build-wide metadata.
pub const META_KEY: &str = "__meta__";

/// Themes listed even when absent from the current version tree.
/// These shipped with every release before themes moved into `v<N>`
/// directories, and the site still links to them by name.
const LEGACY_THEMES: [&str; 6] = [
    "base",
    "base-jinja",
    "bootstrap",
    "bootstrap-jinja",
    "bootstrap3",
    "bootstrap3-jinja",
];

/// Chains touching any of these are part of the bootswatch family.
const BOOTSWATCH_FAMILY: [&str; 4] = [
    "bootstrap",
    "bootstrap-jinja",
    "bootstrap3-jinja",
    "bootstrap3",
];

/// The one bootstrap derivative that does not support swatches.
const BOOTSWATCH_EXCLUDED: &str = "bootstrap3-gradients";

/// Resolved metadata for one theme, as it appears in the data file.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeRecord {
    /// Versions with at least one theme directory on disk, ascending.
    pub allver: Vec<u32>,
    /// Whether the chain can be restyled with bootswatch swatches.
    pub bootswatch: bool,
    /// Inheritance chain, furthest ancestor first.
    pub chain: Vec<String>,
    /// Highlighted HTML of the nearest `conf.py.sample`, if any chain
    /// member has one. `None` serializes as JSON null; unlike the
    /// README there is no placeholder text.
    pub confpy: Option<String>,
    /// Templating engine the chain uses.
    pub engine: String,
    pub name: String,
    /// Text of the nearest `README.md`, or [`README_PLACEHOLDER`].
    pub readme: String,
}

/// One-shot builder for the theme data file.
pub struct SiteBuilder {
    root: PathBuf,
    versions: SupportedVersions,
}

impl SiteBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            versions: SupportedVersions::CURRENT,
        }
    }

    /// The theme names to process: the legacy list plus every immediate
    /// subdirectory of the maximum version's tree, deduplicated and
    /// sorted lexicographically. An absent tree contributes nothing.
    pub fn theme_list(&self) -> Result<Vec<String>> {
        let mut names: BTreeSet<String> = LEGACY_THEMES.iter().map(|s| s.to_string()).collect();

        let max_root = self.versions.max_root(&self.root);
        if max_root.is_dir() {
            for entry in fs::read_dir(&max_root)
                .with_context(|| format!("failed to list {}", max_root.display()))?
            {
                let entry = entry?;
                if entry.file_type()?.is_dir() {
                    names.insert(entry.file_name().to_string_lossy().into_owned());
                }
            }
        }

        Ok(names.into_iter().collect())
    }

    /// Resolve one theme against the maximum version's tree.
    ///
    /// `available` is the theme-independent version availability computed
    /// once per build; it lands verbatim in every record.
    pub fn theme_record(&self, theme: &str, available: &[u32]) -> Result<ThemeRecord> {
        let themes_dir = self.versions.max_root(&self.root);
        let chain = theme_inheritance::get_theme_chain(theme, &themes_dir)?;

        let readme = match theme_inheritance::get_asset_path("README.md", &chain, &themes_dir)? {
            Some(path) => fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            None => README_PLACEHOLDER.to_string(),
        };

        let confpy =
            match theme_inheritance::get_asset_path("conf.py.sample", &chain, &themes_dir)? {
                Some(path) => {
                    let source = fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    Some(highlight::highlight_python(&source)?)
                }
                None => None,
            };

        let bootswatch = is_bootswatch(&chain);
        let engine = theme_inheritance::get_template_engine(&chain, &themes_dir)?;

        // Resolution order is nearest-first; the data file wants the
        // furthest ancestor first.
        let mut chain = chain;
        chain.reverse();

        Ok(ThemeRecord {
            allver: available.to_vec(),
            bootswatch,
            chain,
            confpy,
            engine,
            name: theme.to_string(),
            readme,
        })
    }

    /// Resolve every theme and assemble the output object.
    ///
    /// Any per-theme failure aborts the whole build; there is no partial
    /// output. With `verbose`, each theme is reported on stderr as it is
    /// processed.
    pub fn build(&self, verbose: bool) -> Result<Value> {
        let themes = self.theme_list()?;
        let available = self.versions.available(&self.root)?;

        // serde_json's map is ordered, which gives the sorted output keys
        // the consuming site relies on for stable diffs.
        let mut data = serde_json::Map::new();
        for theme in &themes {
            if verbose {
                eprintln!("  {theme}");
            }
            let record = self
                .theme_record(theme, &available)
                .with_context(|| format!("failed to resolve theme '{theme}'"))?;
            data.insert(theme.clone(), serde_json::to_value(&record)?);
        }

        // Reserved key; a theme literally named "__meta__" would be
        // shadowed here.
        data.insert(
            META_KEY.to_string(),
            json!({ "allver": self.versions.all().collect::<Vec<u32>>() }),
        );

        Ok(Value::Object(data))
    }
}

/// Set-membership test on the resolved chain, order-independent.
fn is_bootswatch(chain: &[String]) -> bool {
    chain
        .iter()
        .any(|theme| BOOTSWATCH_FAMILY.contains(&theme.as_str()))
        && !chain.iter().any(|theme| theme == BOOTSWATCH_EXCLUDED)
}
