//! Thin wrappers around single `git` invocations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::git_program;
use crate::error::GitError;
use crate::process::{CommandRunner, SystemRunner, is_missing_program, stderr_text};

use super::diff::{FileChange, parse_name_status};

/// Length of a full SHA-1 object name.
const SHA1_HEX_LEN: usize = 40;

/// Check that the configured git executable is on PATH.
pub fn check_git_installed() -> Result<(), GitError> {
    let program = git_program();
    which::which(&program).map_err(|_| GitError::NotInstalled(program))?;
    Ok(())
}

/// Runs git commands inside a repository directory.
pub struct GitShell<R = SystemRunner> {
    program: String,
    runner: R,
}

impl GitShell<SystemRunner> {
    /// Shell using the configured git executable (`TOOLBELT_GIT`).
    pub fn new() -> Self {
        Self::with_runner(git_program(), SystemRunner)
    }
}

impl Default for GitShell<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> GitShell<R> {
    pub fn with_runner(program: impl Into<String>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    /// Resolve a revision specifier (branch, tag, `HEAD~2`, ...) to its SHA-1.
    pub fn resolve_revision(&self, repo: &Path, revision: &str) -> Result<String, GitError> {
        let stdout = self.run(repo, &["rev-parse", revision], "rev-parse")?;
        match stdout.get(..SHA1_HEX_LEN) {
            Some(sha) if sha.chars().all(|c| c.is_ascii_hexdigit()) => Ok(sha.to_string()),
            _ => Err(GitError::InvalidOutput {
                operation: "rev-parse".to_string(),
                output: stdout,
            }),
        }
    }

    /// Stage a path.
    pub fn add(&self, repo: &Path, path: &Path) -> Result<(), GitError> {
        let path = path.to_string_lossy();
        self.run(repo, &["add", &path], "add")?;
        info!(path = %path, "Added file to the index");
        Ok(())
    }

    /// Commit the index with `message`.
    pub fn commit(&self, repo: &Path, message: &str) -> Result<(), GitError> {
        self.run(repo, &["commit", "-m", message], "commit")?;
        info!("Committed with the given message");
        Ok(())
    }

    /// Full message (subject and body) of a commit.
    pub fn commit_message(&self, repo: &Path, hash: &str) -> Result<String, GitError> {
        self.run(
            repo,
            &["log", "-n", "1", "--pretty=format:%B", hash],
            "log",
        )
    }

    /// Check out a branch or commit.
    pub fn checkout(&self, repo: &Path, revision: &str) -> Result<(), GitError> {
        self.run(repo, &["checkout", revision], "checkout")?;
        info!(revision, "Checked out branch or commit");
        Ok(())
    }

    /// Top-level directory of the repository containing `path`.
    pub fn resolve_root(&self, path: &Path) -> Result<PathBuf, GitError> {
        let stdout = self.run(path, &["rev-parse", "--show-toplevel"], "rev-parse")?;
        let root = stdout.trim_end_matches(['\n', '\r']);
        if root.is_empty() {
            return Err(GitError::InvalidOutput {
                operation: "rev-parse --show-toplevel".to_string(),
                output: stdout,
            });
        }
        Ok(PathBuf::from(root))
    }

    /// Hard reset the working tree and index to `commit`.
    pub fn reset_hard(&self, repo: &Path, commit: &str) -> Result<(), GitError> {
        self.run(repo, &["reset", "--hard", commit], "reset")?;
        info!(commit, "Reset working tree");
        Ok(())
    }

    /// Files added, modified or deleted between two commits. Renames are
    /// reported as a deletion plus an addition.
    pub fn file_diff(
        &self,
        repo: &Path,
        previous: &str,
        current: &str,
    ) -> Result<BTreeMap<String, FileChange>, GitError> {
        let stdout = self.run(
            repo,
            &["diff", "--no-renames", "--name-status", previous, current],
            "diff",
        )?;
        Ok(parse_name_status(&stdout))
    }

    /// Run a git command and return its stdout, or a descriptive error.
    fn run(&self, repo: &Path, args: &[&str], operation: &str) -> Result<String, GitError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();

        let output = self
            .runner
            .run(&self.program, &args, repo)
            .map_err(|e| {
                if is_missing_program(&self.program, &e) {
                    GitError::NotInstalled(self.program.clone())
                } else {
                    GitError::SpawnFailed(e)
                }
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                operation: operation.to_string(),
                code: output.status.code(),
                stderr: stderr_text(&output),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::process::MockCommandRunner;
    use crate::process::testing::output;

    const SHA: &str = "0123456789abcdef0123456789abcdef01234567";

    fn shell(mock: MockCommandRunner) -> GitShell<MockCommandRunner> {
        GitShell::with_runner("git", mock)
    }

    #[test]
    fn test_resolve_revision_trims_to_sha() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .withf(|program, args, cwd| {
                program == "git" && args == ["rev-parse", "main"] && cwd == Path::new("/repo")
            })
            .times(1)
            .returning(|_, _, _| Ok(output(0, &format!("{}\n", SHA), "")));

        let sha = shell(mock)
            .resolve_revision(Path::new("/repo"), "main")
            .unwrap();
        assert_eq!(sha, SHA);
    }

    #[test]
    fn test_resolve_revision_rejects_short_output() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .returning(|_, _, _| Ok(output(0, "abc123\n", "")));

        let result = shell(mock).resolve_revision(Path::new("/repo"), "main");
        assert!(matches!(result, Err(GitError::InvalidOutput { .. })));
    }

    #[test]
    fn test_non_zero_exit_is_command_failed() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run().returning(|_, _, _| {
            Ok(output(128, "", "fatal: not a git repository\n"))
        });

        match shell(mock).checkout(Path::new("/tmp"), "main") {
            Err(GitError::CommandFailed {
                operation,
                code,
                stderr,
            }) => {
                assert_eq!(operation, "checkout");
                assert_eq!(code, Some(128));
                assert_eq!(stderr, "fatal: not a git repository");
            }
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_binary_is_not_installed() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run().returning(|_, _, _| {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"))
        });

        let git = GitShell::with_runner("definitely-not-git-xyz", mock);
        match git.commit(Path::new("/repo"), "msg") {
            Err(GitError::NotInstalled(program)) => assert_eq!(program, "definitely-not-git-xyz"),
            other => panic!("Expected NotInstalled, got {:?}", other),
        }
    }

    #[test]
    fn test_commit_message_passes_format() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .withf(|_, args, _| args == ["log", "-n", "1", "--pretty=format:%B", SHA])
            .returning(|_, _, _| Ok(output(0, "feat: thing\n\nbody\n", "")));

        let message = shell(mock).commit_message(Path::new("/repo"), SHA).unwrap();
        assert_eq!(message, "feat: thing\n\nbody\n");
    }

    #[test]
    fn test_resolve_root_strips_newline() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .returning(|_, _, _| Ok(output(0, "/home/me/project\n", "")));

        let root = shell(mock).resolve_root(Path::new("/home/me/project/src")).unwrap();
        assert_eq!(root, PathBuf::from("/home/me/project"));
    }

    #[test]
    fn test_file_diff_uses_name_status() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .withf(|_, args, _| {
                args == ["diff", "--no-renames", "--name-status", "HEAD~1", "HEAD"]
            })
            .returning(|_, _, _| Ok(output(0, "M\ta.rs\nD\tb.rs\n", "")));

        let changes = shell(mock)
            .file_diff(Path::new("/repo"), "HEAD~1", "HEAD")
            .unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes["a.rs"], FileChange::Modified);
        assert_eq!(changes["b.rs"], FileChange::Deleted);
    }
}
