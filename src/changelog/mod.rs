//! Changelog parsing and segmentation into dated releases.

pub mod document;
pub mod segment;

pub use document::{ReleaseSummary, parse_markdown, read_changelog, summarize, summarize_file};
pub use segment::{
    Block, ChangelogNode, Release, extract_release_date, is_release_date, segment,
};
