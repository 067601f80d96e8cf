//! Version resolution: from the require list and replace directives to the
//! set of versions worth pinning.

use crate::modfile::{ModFile, ModuleRef, Replace};
use std::collections::HashMap;
use tracing::{debug, info};

/// Mapping from module path to the version that should be pinned.
///
/// Keys are unique. The backing map has no meaningful iteration order, so
/// anything user-visible must go through [`VersionMap::sorted`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionMap {
    versions: HashMap<String, String>,
}

impl VersionMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a map from required modules. A later entry for the same path wins.
    pub fn from_modules<'a, I>(modules: I) -> Self
    where
        I: IntoIterator<Item = &'a ModuleRef>,
    {
        let mut map = Self::new();
        for module in modules {
            map.insert(module.path.clone(), module.version.clone());
        }
        map
    }

    /// Inserts or overwrites the version for `path`.
    pub fn insert(&mut self, path: impl Into<String>, version: impl Into<String>) {
        self.versions.insert(path.into(), version.into());
    }

    /// Removes `path`, returning its version if it was present.
    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.versions.remove(path)
    }

    /// Version for `path`, if present.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.versions.get(path).map(String::as_str)
    }

    /// Reports whether `path` is present.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.versions.contains_key(path)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Reports whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Entries ordered by path, byte-wise.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> =
            self.versions.iter().map(|(p, v)| (p.as_str(), v.as_str())).collect();
        entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        entries
    }

    /// Applies replace directives in order.
    ///
    /// A cross-path replace drops the old path: the dependency is satisfied
    /// elsewhere and must not be pinned under its original identity. A
    /// self-replace overrides the version with the replacement's version.
    pub fn apply_replaces(&mut self, replaces: &[Replace]) {
        for replace in replaces {
            if replace.is_self_replace() {
                info!("Replacing: {} with {}", replace.old.path, replace.new.version);
                self.insert(replace.old.path.clone(), replace.new.version.clone());
            } else if self.remove(&replace.old.path).is_some() {
                debug!(
                    "Dropping {} (replaced by {})",
                    replace.old.path, replace.new
                );
            }
        }
    }
}

/// Builds the version map for a parsed manifest.
///
/// Seeds with every `require` entry, then applies `replace` directives in
/// file order.
#[must_use]
pub fn resolve(file: &ModFile) -> VersionMap {
    let mut map = VersionMap::from_modules(file.require.iter().map(|r| &r.module));
    map.apply_replaces(&file.replace);
    debug!("Resolved {} candidate modules", map.len());
    map
}
