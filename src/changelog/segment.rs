//! Split a parsed changelog into dated releases.
//!
//! A release starts at every top-level heading whose text begins with a
//! `DD.MM.YYYY` date. Anything before the first such heading is preamble and
//! is dropped. Undated headings are ordinary release content.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::debug;

use crate::error::ChangelogError;

/// Anchored at the start of the raw heading text. No calendar validation.
static RELEASE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}\.\d{1,2}\.\d{4})").expect("release date pattern is valid")
});

/// Block-level view of a document node, as far as segmentation cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A heading and the literal text of its first inline child, if it has one.
    Heading { text: Option<String> },
    Other,
}

impl Block {
    /// Date this block would open a release with, if any.
    pub fn release_date(&self) -> Option<&str> {
        match self {
            Self::Heading { text: Some(text) } => extract_release_date(text),
            _ => None,
        }
    }

    pub fn is_release_heading(&self) -> bool {
        self.release_date().is_some()
    }
}

/// A lightweight handle to a node of a parsed document.
///
/// Handles are borrowed from whatever owns the tree (for comrak, its arena),
/// so segmentation only re-groups them and never copies or mutates nodes.
pub trait ChangelogNode: Copy {
    /// Classify this node.
    fn block_kind(&self) -> Block;

    /// Direct children in document order.
    fn child_nodes(&self) -> impl Iterator<Item = Self>;
}

/// One dated section of a changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release<N> {
    /// `DD.MM.YYYY`-shaped date taken from the header text, as written.
    pub date: String,
    /// The heading that introduced this release.
    pub header: N,
    /// Top-level nodes after the header, up to the next release heading.
    pub content: Vec<N>,
}

impl<N: ChangelogNode> Release<N> {
    fn close(header: N, content: Vec<N>) -> Result<Self, ChangelogError> {
        let text = match header.block_kind() {
            Block::Heading { text: Some(text) } => text,
            _ => String::new(),
        };

        let date = match extract_release_date(&text) {
            Some(date) => date.to_string(),
            None => return Err(ChangelogError::MalformedHeading { text }),
        };

        Ok(Self {
            date,
            header,
            content,
        })
    }
}

/// Whether `text` starts with a release date.
pub fn is_release_date(text: &str) -> bool {
    RELEASE_DATE.is_match(text)
}

/// Leading `DD.MM.YYYY` date of `text`, e.g. `"11.05.2020 Release"` -> `"11.05.2020"`.
///
/// Leading whitespace is not skipped.
pub fn extract_release_date(text: &str) -> Option<&str> {
    RELEASE_DATE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Segment the document rooted at `root` into releases, in document order.
///
/// Only the root's direct children are inspected. A document without any
/// dated heading yields an empty list; that is not an error.
pub fn segment<N: ChangelogNode>(root: N) -> Result<Vec<Release<N>>, ChangelogError> {
    let nodes: Vec<N> = root.child_nodes().collect();
    let release_nodes = drop_preamble(&nodes);
    group_by_release(release_nodes)
}

fn drop_preamble<N: ChangelogNode>(nodes: &[N]) -> &[N] {
    match nodes
        .iter()
        .position(|node| node.block_kind().is_release_heading())
    {
        Some(idx) => {
            debug!(dropped = idx, "Dropped changelog preamble");
            &nodes[idx..]
        }
        None => {
            debug!(nodes = nodes.len(), "No dated release heading found");
            &[]
        }
    }
}

fn group_by_release<N: ChangelogNode>(nodes: &[N]) -> Result<Vec<Release<N>>, ChangelogError> {
    let Some((&first, rest)) = nodes.split_first() else {
        return Ok(Vec::new());
    };

    let mut releases = Vec::new();
    let mut header = first;
    let mut content = Vec::new();

    for &node in rest {
        if node.block_kind().is_release_heading() {
            releases.push(Release::close(header, std::mem::take(&mut content))?);
            header = node;
        } else {
            content.push(node);
        }
    }

    releases.push(Release::close(header, content)?);

    Ok(releases)
}
