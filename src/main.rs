//! toolbelt - CLI entry point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use repo_toolbelt::bazel::BazelShell;
use repo_toolbelt::changelog::summarize_file;
use repo_toolbelt::git::{GitShell, check_git_installed};
use repo_toolbelt::search::{
    search_by_extension, search_by_file_name, search_by_file_name_regex,
    search_closest_parent_containing,
};

/// Repository helpers: changelog releases, git and bazel wrappers, file search.
#[derive(Parser, Debug)]
#[command(name = "toolbelt")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the dated releases of a Markdown changelog
    Changelog {
        /// Path to the changelog file
        #[arg(default_value = "CHANGELOG.md")]
        file: PathBuf,

        /// Print releases as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a git operation
    Git {
        /// Repository directory
        #[arg(short = 'C', long, default_value = ".")]
        repo: PathBuf,

        #[command(subcommand)]
        op: GitOp,
    },

    /// Run a bazel query and print each result line
    Bazel {
        /// Workspace directory
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,

        /// Query expression
        query: String,

        /// Extra flags passed to bazel query (after `--`)
        #[arg(last = true)]
        flags: Vec<String>,
    },

    /// Search the filesystem
    Find {
        #[command(subcommand)]
        by: FindBy,
    },
}

#[derive(Subcommand, Debug)]
enum GitOp {
    /// Resolve a revision to its SHA-1
    RevParse { revision: String },
    /// Stage a path
    Add { path: PathBuf },
    /// Commit the index
    Commit {
        #[arg(short, long)]
        message: String,
    },
    /// Print a commit's message
    Message { hash: String },
    /// Check out a branch or commit
    Checkout { revision: String },
    /// Print the repository root
    Root,
    /// Hard reset to a commit
    Reset { commit: String },
    /// List files added, modified or deleted between two commits
    Diff {
        previous: String,
        current: String,
        /// Print changes as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum FindBy {
    /// Files named exactly NAME
    Name { root: PathBuf, name: String },
    /// Files whose name matches PATTERN
    Regex { root: PathBuf, pattern: String },
    /// Files with extension EXT (including the dot)
    Ext { root: PathBuf, ext: String },
    /// Closest parent of START containing NAME
    Parent { start: PathBuf, name: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Changelog { file, json } => run_changelog(&file, json),
        Command::Git { repo, op } => run_git(&repo, op),
        Command::Bazel {
            workspace,
            query,
            flags,
        } => {
            let lines = BazelShell::new()
                .query(&workspace, &query, &flags)
                .context("bazel query failed")?;
            for line in lines {
                println!("{}", line);
            }
            Ok(())
        }
        Command::Find { by } => run_find(by),
    }
}

/// Log to stderr, honouring RUST_LOG when set.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_changelog(file: &Path, json: bool) -> Result<()> {
    let releases = summarize_file(file)
        .with_context(|| format!("Failed to segment changelog {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&releases)?);
        return Ok(());
    }

    if releases.is_empty() {
        println!("No dated releases found in {}.", file.display());
        return Ok(());
    }

    for release in &releases {
        let block_word = if release.content_nodes == 1 { "block" } else { "blocks" };
        println!(
            "{}  {} ({} {})",
            release.date, release.heading, release.content_nodes, block_word
        );
    }

    Ok(())
}

fn run_git(repo: &Path, op: GitOp) -> Result<()> {
    check_git_installed()?;
    let git = GitShell::new();

    match op {
        GitOp::RevParse { revision } => {
            println!("{}", git.resolve_revision(repo, &revision)?);
        }
        GitOp::Add { path } => git.add(repo, &path)?,
        GitOp::Commit { message } => git.commit(repo, &message)?,
        GitOp::Message { hash } => {
            println!("{}", git.commit_message(repo, &hash)?);
        }
        GitOp::Checkout { revision } => git.checkout(repo, &revision)?,
        GitOp::Root => {
            println!("{}", git.resolve_root(repo)?.display());
        }
        GitOp::Reset { commit } => git.reset_hard(repo, &commit)?,
        GitOp::Diff {
            previous,
            current,
            json,
        } => {
            let changes = git.file_diff(repo, &previous, &current)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&changes)?);
            } else {
                for (path, change) in &changes {
                    println!("{}\t{}", change.as_str(), path);
                }
            }
        }
    }

    Ok(())
}

fn run_find(by: FindBy) -> Result<()> {
    let paths = match by {
        FindBy::Name { root, name } => search_by_file_name(&absolute(&root)?, &name)?,
        FindBy::Regex { root, pattern } => {
            search_by_file_name_regex(&absolute(&root)?, &pattern)?
        }
        FindBy::Ext { root, ext } => search_by_extension(&absolute(&root)?, &ext)?,
        FindBy::Parent { start, name } => vec![search_closest_parent_containing(&start, &name)?],
    };

    for path in paths {
        println!("{}", path.display());
    }

    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Invalid path {}", path.display()))
}
