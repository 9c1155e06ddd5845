//! Patterns for Bazel target labels.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Characters allowed in package and target names.
pub const LABEL_CHARACTERS: &str = r"a-zA-Z0-9_\-";

/// Labels of the current repository, e.g. `//foo/bar:baz` or `//foo`.
pub static REPO_LABEL_PATTERN: LazyLock<String> = LazyLock::new(|| {
    format!(
        "//([{chars}]+/)*[{chars}]+(:[{chars}]+){{0,1}}",
        chars = LABEL_CHARACTERS
    )
});

/// Labels relative to the current package, e.g. `:baz`.
pub static PACKAGE_LABEL_PATTERN: LazyLock<String> =
    LazyLock::new(|| format!(":[{}]+", LABEL_CHARACTERS));

static REPO_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&REPO_LABEL_PATTERN).expect("repo label pattern is valid"));

static PACKAGE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&PACKAGE_LABEL_PATTERN).expect("package label pattern is valid"));

/// All repository labels in `text`, in order of appearance.
pub fn repo_labels(text: &str) -> Vec<&str> {
    REPO_LABEL.find_iter(text).map(|m| m.as_str()).collect()
}

/// All package-relative labels in `text`, in order of appearance.
pub fn package_labels(text: &str) -> Vec<&str> {
    PACKAGE_LABEL.find_iter(text).map(|m| m.as_str()).collect()
}
