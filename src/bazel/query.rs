//! `bazel query` invocation.

use std::path::Path;

use tracing::warn;

use crate::config::bazel_program;
use crate::error::BazelError;
use crate::process::{CommandRunner, SystemRunner, is_missing_program, stderr_text};

/// Exit code bazel uses when `--keep_going` produced a partial result.
///
/// See <https://bazel.build/run/scripts#exit-codes>.
const PARTIAL_SUCCESS_EXIT_CODE: i32 = 3;

/// Check that the configured bazel executable is on PATH.
pub fn check_bazel_installed() -> Result<(), BazelError> {
    let program = bazel_program();
    which::which(&program).map_err(|_| BazelError::NotInstalled(program))?;
    Ok(())
}

/// Runs `bazel query` inside a workspace directory.
pub struct BazelShell<R = SystemRunner> {
    program: String,
    runner: R,
}

impl BazelShell<SystemRunner> {
    /// Shell using the configured bazel executable (`TOOLBELT_BAZEL`).
    pub fn new() -> Self {
        Self::with_runner(bazel_program(), SystemRunner)
    }
}

impl Default for BazelShell<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> BazelShell<R> {
    pub fn with_runner(program: impl Into<String>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    /// Run `bazel query <query> <flags...>` in `workspace` and return each
    /// output line.
    ///
    /// A partial failure (exit code 3 with output, typical of `--keep_going`)
    /// is logged and its output returned.
    pub fn query(
        &self,
        workspace: &Path,
        query: &str,
        flags: &[String],
    ) -> Result<Vec<String>, BazelError> {
        let mut args = vec!["query".to_string(), query.to_string()];
        args.extend(flags.iter().cloned());

        let output = self
            .runner
            .run(&self.program, &args, workspace)
            .map_err(|e| {
                if is_missing_program(&self.program, &e) {
                    BazelError::NotInstalled(self.program.clone())
                } else {
                    BazelError::SpawnFailed(e)
                }
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            let code = output.status.code();
            let stderr = stderr_text(&output);

            if code == Some(PARTIAL_SUCCESS_EXIT_CODE) && !stdout.is_empty() {
                warn!(
                    query,
                    "bazel query returned a partial result (exit code 3): {}", stderr
                );
            } else {
                return Err(BazelError::QueryFailed {
                    query: query.to_string(),
                    code,
                    stderr,
                });
            }
        }

        Ok(stdout.lines().map(str::to_string).collect())
    }
}
