//! Error types for toolbelt modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from changelog reading and segmentation.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to read changelog: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Release heading '{text}' was classified as dated but no date could be extracted")]
    MalformedHeading { text: String },
}

/// Errors from git command wrappers.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable '{0}' not found in PATH")]
    NotInstalled(String),

    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git {operation} failed with {}: {stderr}",
            code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    CommandFailed {
        operation: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("git {operation} returned unexpected output: {output:?}")]
    InvalidOutput { operation: String, output: String },
}

/// Errors from bazel query.
#[derive(Error, Debug)]
pub enum BazelError {
    #[error("bazel executable '{0}' not found in PATH")]
    NotInstalled(String),

    #[error("Failed to spawn bazel: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("bazel query '{query}' exited with {}: {stderr}",
            code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    QueryFailed {
        query: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Errors from filesystem search helpers.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search root is not absolute: {0}")]
    RelativeRoot(PathBuf),

    #[error("File name to search for cannot be empty")]
    EmptyName,

    #[error("Extension cannot be empty")]
    EmptyExtension,

    #[error("Extension must start with a dot (.): {0}")]
    MissingDot(String),

    #[error("Invalid file name pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Nothing named {name} in {} or any of its parents", start.display())]
    NotFoundInParents { start: PathBuf, name: String },

    #[error("I/O error during search: {0}")]
    Io(#[source] std::io::Error),
}
