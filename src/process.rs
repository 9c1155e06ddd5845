//! Subprocess execution shared by the git and bazel wrappers.

use std::io;
use std::path::Path;
use std::process::{Command, Output};

use tracing::debug;

/// Trait for running external commands.
///
/// This abstraction allows mocking subprocesses in tests.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run `program` with `args` inside `cwd` and collect its output.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> io::Result<Output>;
}

/// Runner that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> io::Result<Output> {
        debug!(program, ?args, cwd = %cwd.display(), "Running command");

        Command::new(program).args(args).current_dir(cwd).output()
    }
}

/// Whether a spawn failure means the program itself is missing.
pub(crate) fn is_missing_program(program: &str, err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound && which::which(program).is_err()
}

/// Lossy UTF-8 stderr, trimmed, for error messages.
pub(crate) fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}
