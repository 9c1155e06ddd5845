//! Filesystem search helpers.
//!
//! The `search_by_*` functions walk every entry below an absolute root
//! (the root itself included) and return the paths whose final component
//! passes a predicate. Unreadable entries are logged and skipped.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use regex_lite::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::SearchError;

/// All paths under `root` whose file name is exactly `name`.
pub fn search_by_file_name(root: &Path, name: &str) -> Result<Vec<PathBuf>, SearchError> {
    require_absolute(root)?;
    if name.is_empty() {
        return Err(SearchError::EmptyName);
    }

    Ok(walk_matching(root, |file_name| file_name == OsStr::new(name)))
}

/// All paths under `root` whose file name matches `pattern`.
///
/// The pattern is unanchored: `"md"` matches `README.md`.
pub fn search_by_file_name_regex(
    root: &Path,
    pattern: &str,
) -> Result<Vec<PathBuf>, SearchError> {
    require_absolute(root)?;
    if pattern.is_empty() {
        return Err(SearchError::EmptyName);
    }

    let re = Regex::new(pattern).map_err(|e| SearchError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    Ok(walk_matching(root, |file_name| {
        re.is_match(&file_name.to_string_lossy())
    }))
}

/// All paths under `root` with extension `ext`, which must include the dot
/// (e.g. `".md"`).
///
/// The extension is everything from the last dot of the file name, so a
/// dotfile such as `.bazelrc` has extension `".bazelrc"`.
pub fn search_by_extension(root: &Path, ext: &str) -> Result<Vec<PathBuf>, SearchError> {
    require_absolute(root)?;
    if ext.is_empty() {
        return Err(SearchError::EmptyExtension);
    }
    if !ext.starts_with('.') {
        return Err(SearchError::MissingDot(ext.to_string()));
    }

    Ok(walk_matching(root, |file_name| file_extension(file_name).as_deref() == Some(ext)))
}

/// Closest directory, starting at `start` itself and walking up, that
/// contains an entry named `name`.
///
/// `start` may be relative; the result is absolute. Errors other than
/// "not found" while checking a directory are returned as-is.
///
/// An empty `name` names `start` itself, so `start` is returned.
pub fn search_closest_parent_containing(start: &Path, name: &str) -> Result<PathBuf, SearchError> {
    let absolute = std::path::absolute(start).map_err(SearchError::Io)?;
    let mut current = absolute.as_path();

    loop {
        match std::fs::metadata(current.join(name)) {
            Ok(_) => {
                debug!(dir = %current.display(), name, "Found containing parent");
                return Ok(current.to_path_buf());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(SearchError::Io(e)),
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => {
                return Err(SearchError::NotFoundInParents {
                    start: start.to_path_buf(),
                    name: name.to_string(),
                });
            }
        }
    }
}

/// Suffix of `file_name` starting at its last dot, dot included.
fn file_extension(file_name: &OsStr) -> Option<String> {
    let name = file_name.to_string_lossy();
    name.rfind('.').map(|i| name[i..].to_string())
}

fn require_absolute(root: &Path) -> Result<(), SearchError> {
    if root.is_absolute() {
        Ok(())
    } else {
        Err(SearchError::RelativeRoot(root.to_path_buf()))
    }
}

/// Walk `root` in file-name order, keeping paths whose file name passes `matches`.
fn walk_matching(root: &Path, matches: impl Fn(&OsStr) -> bool) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!("Failed to read directory entry: {}", err);
                continue;
            }
        };

        if matches(entry.file_name()) {
            found.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), matches = found.len(), "Search finished");
    found
}
