//! Exclusion filtering.
//!
//! Two passes remove modules from the [`VersionMap`]: the manifest's own
//! `exclude` directives, then the [`ExclusionSet`] built from the default
//! list and user-supplied paths. Both are set differences, so their order
//! does not change the result.

use super::resolver::VersionMap;
use crate::modfile::Exclude;
use std::collections::BTreeSet;
use tracing::info;

/// Module paths that must never be pinned.
///
/// The union of the default exclusions (unless disabled) and the
/// user-supplied ones. Adding a path twice has no further effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    paths: BTreeSet<String>,
}

impl ExclusionSet {
    /// Builds the set from defaults and user paths.
    ///
    /// When `use_defaults` is false only `user` contributes.
    pub fn new<D, U>(defaults: D, user: U, use_defaults: bool) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        U: IntoIterator,
        U::Item: Into<String>,
    {
        let mut set = Self::default();
        if use_defaults {
            set.extend(defaults);
        }
        set.extend(user);
        set
    }

    /// Adds paths to the set.
    pub fn extend<I>(&mut self, paths: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
    }

    /// Reports whether `path` is excluded.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Number of distinct paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Reports whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterates paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Removes every excluded path from `map`, returning the removed paths.
    pub fn apply(&self, map: &mut VersionMap) -> Vec<String> {
        let mut removed = Vec::new();
        for path in &self.paths {
            if map.remove(path).is_some() {
                info!("Excluding (from flags) {path}");
                removed.push(path.clone());
            }
        }
        removed
    }
}

/// Removes modules named by the manifest's `exclude` directives.
///
/// Any version of an excluded path is removed, not only the excluded
/// version. Returns the removed paths in directive order.
pub fn apply_manifest_excludes(map: &mut VersionMap, excludes: &[Exclude]) -> Vec<String> {
    let mut removed = Vec::new();
    for exclude in excludes {
        if let Some(version) = map.remove(&exclude.module.path) {
            info!("Excluding (from go.mod exclude) {}@{}", exclude.module.path, version);
            removed.push(exclude.module.path.clone());
        }
    }
    removed
}

/// Runs both exclusion passes.
pub fn filter(map: &mut VersionMap, excludes: &[Exclude], set: &ExclusionSet) {
    apply_manifest_excludes(map, excludes);
    set.apply(map);
}
