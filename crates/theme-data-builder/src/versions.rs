/*
 * versions.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The supported major-version range of the theme system.
 */

use anyhow::{Context, Result};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// The inclusive range of major versions the builder knows about.
///
/// Fixed at startup and read-only thereafter. Each version `N` owns a
/// `v<N>` directory tree of themes under the site root; only the tree
/// for the maximum version is searched during resolution, but every
/// version in the range is reported in the output metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedVersions {
    min: u32,
    max: u32,
}

impl SupportedVersions {
    /// The range currently shipped by the themes site.
    pub const CURRENT: SupportedVersions = SupportedVersions { min: 6, max: 7 };

    /// All supported versions, ascending.
    pub fn all(self) -> RangeInclusive<u32> {
        self.min..=self.max
    }

    /// The maximum supported version.
    pub fn max(self) -> u32 {
        self.max
    }

    /// The `v<N>` directory for one version under `root`.
    pub fn root_for(self, root: &Path, version: u32) -> PathBuf {
        root.join(format!("v{version}"))
    }

    /// The directory tree searched during theme resolution.
    pub fn max_root(self, root: &Path) -> PathBuf {
        self.root_for(root, self.max)
    }

    /// The subset of versions whose `v<N>` directory exists and holds at
    /// least one entry, ascending. A missing version directory is not an
    /// error; it is simply absent from the result.
    pub fn available(self, root: &Path) -> Result<Vec<u32>> {
        let mut found = Vec::new();
        for version in self.all() {
            let dir = self.root_for(root, version);
            if !dir.is_dir() {
                continue;
            }
            let mut entries = fs::read_dir(&dir)
                .with_context(|| format!("failed to list {}", dir.display()))?;
            if entries.next().is_some() {
                found.push(version);
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_all_is_ascending_inclusive() {
        let versions: Vec<u32> = SupportedVersions::CURRENT.all().collect();
        assert_eq!(versions, vec![6, 7]);
    }

    #[test]
    fn test_roots() {
        let v = SupportedVersions::CURRENT;
        assert_eq!(v.root_for(Path::new("site"), 6), PathBuf::from("site/v6"));
        assert_eq!(v.max_root(Path::new("site")), PathBuf::from("site/v7"));
    }

    #[test]
    fn test_available_skips_missing_and_empty() {
        let tmp = TempDir::new().unwrap();
        // v6 populated, v7 exists but is empty
        fs::create_dir_all(tmp.path().join("v6/base")).unwrap();
        fs::create_dir_all(tmp.path().join("v7")).unwrap();

        let available = SupportedVersions::CURRENT.available(tmp.path()).unwrap();
        assert_eq!(available, vec![6]);
    }

    #[test]
    fn test_available_all_populated() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("v6/base")).unwrap();
        fs::create_dir_all(tmp.path().join("v7/base")).unwrap();

        let available = SupportedVersions::CURRENT.available(tmp.path()).unwrap();
        assert_eq!(available, vec![6, 7]);
    }
}
