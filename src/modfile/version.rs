//! Module and toolchain version checks.
//!
//! Module versions in go.mod are semantic versions with a leading `v`. The
//! parser stores the canonical form: `vMAJOR` and `vMAJOR.MINOR` shorthands are
//! padded, build metadata is dropped, and `+incompatible` is the one build
//! suffix that survives.

use regex::Regex;
use std::sync::OnceLock;

const GO_VERSION_PATTERN: &str =
    r"^([1-9][0-9]*)\.(0|[1-9][0-9]*)(\.(0|[1-9][0-9]*))?([a-z]+[0-9]+)?$";

fn go_version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(GO_VERSION_PATTERN).expect("GO_VERSION_PATTERN compiles"))
}

/// Returns the canonical form of a module version, or `None` if `version`
/// is not a valid module version.
///
/// # Examples
///
/// ```rust
/// use gomodpin::modfile::canonical_version;
///
/// assert_eq!(canonical_version("v1.2").as_deref(), Some("v1.2.0"));
/// assert_eq!(canonical_version("v1.2.3+meta").as_deref(), Some("v1.2.3"));
/// assert_eq!(canonical_version("v2.0.0+incompatible").as_deref(), Some("v2.0.0+incompatible"));
/// assert_eq!(canonical_version("1.2.3"), None);
/// ```
#[must_use]
pub fn canonical_version(version: &str) -> Option<String> {
    let rest = version.strip_prefix('v')?;

    let (core_and_pre, build) = match rest.split_once('+') {
        Some((head, build)) => (head, Some(build)),
        None => (rest, None),
    };
    let (core, pre) = match core_and_pre.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (core_and_pre, None),
    };

    // Shorthand forms are only valid when nothing follows them.
    let full = match core.split('.').count() {
        3 => rest.to_string(),
        1 if pre.is_none() && build.is_none() => format!("{core}.0.0"),
        2 if pre.is_none() && build.is_none() => format!("{core}.0"),
        _ => return None,
    };

    let parsed = semver::Version::parse(&full).ok()?;

    let mut canonical = format!("v{}.{}.{}", parsed.major, parsed.minor, parsed.patch);
    if !parsed.pre.is_empty() {
        canonical.push('-');
        canonical.push_str(parsed.pre.as_str());
    }
    if parsed.build.as_str() == "incompatible" {
        canonical.push_str("+incompatible");
    }
    Some(canonical)
}

/// Reports whether `version` is a valid argument to the `go` directive
/// (`1.21`, `1.21.0`, `1.21rc1`, ...).
#[must_use]
pub fn is_go_version(version: &str) -> bool {
    go_version_regex().is_match(version)
}

/// Reports whether `path` names a directory on disk rather than a module.
///
/// Only filesystem paths may appear as a replacement target without a version.
/// Both Unix and Windows forms are recognised, since a go.mod moves between
/// systems.
#[must_use]
pub fn is_directory_path(path: &str) -> bool {
    if path == "." || path == ".." {
        return true;
    }
    if ["./", ".\\", "../", "..\\", "/", "\\"].iter().any(|prefix| path.starts_with(prefix)) {
        return true;
    }
    // Drive letters: C:, C:\src, c:/src
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Splits the major-version suffix off a module path.
///
/// Returns the prefix and the suffix (`/v2`, `.v3`, or empty when the path
/// has none). `None` means the suffix is malformed, e.g. `/v1`, `/v01`,
/// `/v2.1`, or a `gopkg.in` path without `.vN`.
#[must_use]
pub fn split_path_major(path: &str) -> Option<(&str, &str)> {
    if path.starts_with("gopkg.in/") {
        return split_gopkg_in(path);
    }

    let bytes = path.as_bytes();
    let mut i = bytes.len();
    let mut dot = false;
    while i > 0 && (bytes[i - 1].is_ascii_digit() || bytes[i - 1] == b'.') {
        dot |= bytes[i - 1] == b'.';
        i -= 1;
    }
    if i <= 1 || i == bytes.len() || bytes[i - 1] != b'v' || bytes[i - 2] != b'/' {
        return Some((path, ""));
    }

    let (prefix, major) = path.split_at(i - 2);
    if dot || major.len() <= 2 || major.as_bytes()[2] == b'0' || major == "/v1" {
        return None;
    }
    Some((prefix, major))
}

fn split_gopkg_in(path: &str) -> Option<(&str, &str)> {
    let bytes = path.as_bytes();
    let mut i = path.strip_suffix("-unstable").map_or(bytes.len(), str::len);
    while i > 0 && bytes[i - 1].is_ascii_digit() {
        i -= 1;
    }
    if i <= 1 || bytes[i - 1] != b'v' || bytes[i - 2] != b'.' {
        return None;
    }

    let (prefix, major) = path.split_at(i - 2);
    if major.len() <= 2 || (major.as_bytes()[2] == b'0' && major != ".v0") {
        return None;
    }
    Some((prefix, major))
}

/// Checks that a canonical `version` is allowed for module `path`.
///
/// A path ending in `/vN` (or `.vN` for `gopkg.in`) only takes `vN.x.y`
/// versions. A path without a suffix only takes `v0` and `v1`, or a higher
/// major marked `+incompatible`.
///
/// # Errors
///
/// Returns the reason as a message suitable for a parse error.
///
/// # Examples
///
/// ```rust
/// use gomodpin::modfile::check_path_major;
///
/// assert!(check_path_major("github.com/x/y/v2", "v2.3.0").is_ok());
/// assert!(check_path_major("github.com/x/y", "v2.0.0+incompatible").is_ok());
/// assert!(check_path_major("github.com/x/y/v2", "v1.0.0").is_err());
/// assert!(check_path_major("gopkg.in/yaml.v3", "v2.4.0").is_err());
/// ```
pub fn check_path_major(path: &str, version: &str) -> Result<(), String> {
    let Some((_, path_major)) = split_path_major(path) else {
        return Err("invalid module path: malformed major version suffix".to_string());
    };

    if path_major.starts_with(".v") && path_major.ends_with("-unstable") {
        return Ok(());
    }
    // Old pseudo-versions of gopkg.in .v1 packages were generated as v0.0.0-
    if path_major == ".v1" && version.starts_with("v0.0.0-") {
        return Ok(());
    }

    let major = version_major(version);
    let expected = if path_major.is_empty() {
        if major == "v0" || major == "v1" || version.ends_with("+incompatible") {
            return Ok(());
        }
        "v0 or v1"
    } else {
        let expected = &path_major[1..];
        if major == expected {
            return Ok(());
        }
        expected
    };

    Err(format!("version {version:?} invalid: should be {expected}, not {major}"))
}

/// The `vN` prefix of a canonical version.
fn version_major(version: &str) -> &str {
    version.split_once('.').map_or(version, |(major, _)| major)
}
