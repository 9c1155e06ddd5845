//! Environment configuration for the external tools.

use std::env;

use tracing::warn;

/// Environment variable naming the git executable.
pub const GIT_ENV_VAR: &str = "TOOLBELT_GIT";

/// Environment variable naming the bazel executable (e.g. `bazelisk`).
pub const BAZEL_ENV_VAR: &str = "TOOLBELT_BAZEL";

const DEFAULT_GIT: &str = "git";
const DEFAULT_BAZEL: &str = "bazel";

/// Git executable to run, from `TOOLBELT_GIT` or `git`.
pub fn git_program() -> String {
    program_from_env(GIT_ENV_VAR, DEFAULT_GIT)
}

/// Bazel executable to run, from `TOOLBELT_BAZEL` or `bazel`.
pub fn bazel_program() -> String {
    program_from_env(BAZEL_ENV_VAR, DEFAULT_BAZEL)
}

/// Read a program name override, falling back to `default` when unset.
///
/// Logs a warning if the variable is set but blank.
fn program_from_env(var: &str, default: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        Ok(_) => {
            warn!("{} is set but empty, using default '{}'", var, default);
            default.to_string()
        }
        Err(_) => default.to_string(),
    }
}
