//! Bazel query wrapper and label patterns.

pub mod labels;
pub mod query;

pub use labels::{
    LABEL_CHARACTERS, PACKAGE_LABEL_PATTERN, REPO_LABEL_PATTERN, package_labels, repo_labels,
};
pub use query::{BazelShell, check_bazel_installed};
