//! Parsing of `git diff --name-status` output.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// What happened to a file between two commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileChange {
    Modified,
    Added,
    Deleted,
}

impl FileChange {
    /// The single-letter status git prints for this change.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modified => "M",
            Self::Added => "A",
            Self::Deleted => "D",
        }
    }
}

impl std::str::FromStr for FileChange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::Modified),
            "A" => Ok(Self::Added),
            "D" => Ok(Self::Deleted),
            _ => Err(format!("Unknown git status: {}", s)),
        }
    }
}

/// Parse `--name-status` lines into a path -> change map.
///
/// Each line is split on its first whitespace run into status and path.
/// Lines with other statuses (type changes, unmerged, ...) or without a path
/// are skipped.
pub fn parse_name_status(output: &str) -> BTreeMap<String, FileChange> {
    let mut changes = BTreeMap::new();

    for line in output.lines() {
        let mut parts = WHITESPACE.splitn(line, 2);
        let (Some(status), Some(path)) = (parts.next(), parts.next()) else {
            continue;
        };

        match status.parse::<FileChange>() {
            Ok(change) => {
                changes.insert(path.to_string(), change);
            }
            Err(e) => debug!("Skipping diff line '{}': {}", line, e),
        }
    }

    changes
}
