//! Git operations shelled out to the system `git` binary.
//!
//! Running the real binary inherits the user's git config, hooks and
//! credential helpers.

pub mod diff;
pub mod shell;

pub use diff::{FileChange, parse_name_status};
pub use shell::{GitShell, check_git_installed};
