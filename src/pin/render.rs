//! Rendering of the override block appended to go.mod.

use super::resolver::VersionMap;
use crate::constants::{BLOCK_HEADER, BLOCK_SEPARATOR};
use tracing::debug;

/// The rendered `replace ( ... )` block and the number of entries in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideBlock {
    /// Text to append, starting with the blank-line separator
    pub text: String,
    /// Number of `path => path version` lines emitted
    pub count: usize,
}

impl OverrideBlock {
    /// Reports whether the block pins nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Renders `map` as an override block, entries sorted by path.
///
/// Entries with an empty version are skipped: `path => path` with no version
/// is not a valid directive. The framing is always produced, so a block with
/// `count == 0` is well formed, though the writer never appends it.
#[must_use]
pub fn render(map: &VersionMap) -> OverrideBlock {
    let mut text = String::new();
    text.push_str(BLOCK_SEPARATOR);
    text.push_str(BLOCK_HEADER);
    text.push('\n');
    text.push_str("replace (\n");

    let mut count = 0;
    for (path, version) in map.sorted() {
        if version.is_empty() {
            debug!("Skipping {path} due to empty version");
            continue;
        }
        text.push_str(&format!("\t{path} => {path} {version}\n"));
        count += 1;
    }
    text.push_str(")\n");

    OverrideBlock {
        text,
        count,
    }
}
