//! repo-toolbelt - small helpers for repository tooling.
//!
//! # Overview
//!
//! - [`changelog`] splits a Markdown changelog whose release headings start
//!   with a `DD.MM.YYYY` date into ordered [`Release`]s.
//! - [`git`] and [`bazel`] wrap single `git` / `bazel query` invocations.
//! - [`search`] finds files below a directory by name, regex or extension,
//!   and finds the closest parent containing a given entry.

pub mod bazel;
pub mod changelog;
pub mod config;
pub mod error;
pub mod git;
pub mod process;
pub mod search;

// Re-export commonly used types
pub use bazel::BazelShell;
pub use changelog::{Block, ChangelogNode, Release, ReleaseSummary, segment};
pub use error::{BazelError, ChangelogError, GitError, SearchError};
pub use git::{FileChange, GitShell};
pub use process::{CommandRunner, SystemRunner};
