//! Markdown parsing with comrak and the node view used by the segmenter.

use std::path::Path;

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, parse_document};
use serde::{Deserialize, Serialize};

use crate::error::ChangelogError;

use super::segment::{Block, ChangelogNode, Release, segment};

fn markdown_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
}

/// Parse Markdown into a comrak AST allocated in `arena`.
pub fn parse_markdown<'a>(arena: &'a Arena<AstNode<'a>>, source: &str) -> &'a AstNode<'a> {
    parse_document(arena, source, &markdown_options())
}

/// Read a changelog file into memory.
pub fn read_changelog(path: &Path) -> Result<String, ChangelogError> {
    std::fs::read_to_string(path).map_err(ChangelogError::ReadFailed)
}

impl<'a> ChangelogNode for &'a AstNode<'a> {
    fn block_kind(&self) -> Block {
        match self.data.borrow().value {
            NodeValue::Heading(_) => Block::Heading {
                text: self.first_child().map(inline_literal),
            },
            _ => Block::Other,
        }
    }

    fn child_nodes(&self) -> impl Iterator<Item = Self> {
        (*self).children()
    }
}

/// Literal of a single inline node. Containers such as emphasis have none.
fn inline_literal(node: &AstNode<'_>) -> String {
    match &node.data.borrow().value {
        NodeValue::Text(text) => text.clone(),
        NodeValue::Code(code) => code.literal.clone(),
        _ => String::new(),
    }
}

/// Full visible text of a node, concatenated across its inline descendants.
pub fn node_text<'a>(node: &'a AstNode<'a>) -> String {
    node.descendants()
        .map(|d| match &d.data.borrow().value {
            NodeValue::Text(text) => text.clone(),
            NodeValue::Code(code) => code.literal.clone(),
            NodeValue::SoftBreak | NodeValue::LineBreak => " ".to_string(),
            _ => String::new(),
        })
        .collect()
}

/// Serializable outline of a release for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSummary {
    pub date: String,
    pub heading: String,
    pub content_nodes: usize,
}

/// Outline each release by date, heading text and number of content nodes.
pub fn summarize<'a>(releases: &[Release<&'a AstNode<'a>>]) -> Vec<ReleaseSummary> {
    releases
        .iter()
        .map(|release| ReleaseSummary {
            date: release.date.clone(),
            heading: node_text(release.header),
            content_nodes: release.content.len(),
        })
        .collect()
}

/// Parse Markdown source and outline its releases.
pub fn summarize_source(source: &str) -> Result<Vec<ReleaseSummary>, ChangelogError> {
    let arena = Arena::new();
    let root = parse_markdown(&arena, source);
    let releases = segment(root)?;
    Ok(summarize(&releases))
}

/// Read, parse and outline the releases of a changelog file.
pub fn summarize_file(path: &Path) -> Result<Vec<ReleaseSummary>, ChangelogError> {
    let source = read_changelog(path)?;
    summarize_source(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_block<'a>(arena: &'a Arena<AstNode<'a>>, source: &str) -> Block {
        let root = parse_markdown(arena, source);
        root.child_nodes()
            .next()
            .expect("document has a first block")
            .block_kind()
    }

    #[test]
    fn test_heading_text_is_first_inline_literal() {
        let arena = Arena::new();
        assert_eq!(
            first_block(&arena, "## 11.05.2020 Release\n"),
            Block::Heading {
                text: Some("11.05.2020 Release".to_string())
            }
        );
    }

    #[test]
    fn test_empty_heading_has_no_text() {
        let arena = Arena::new();
        assert_eq!(first_block(&arena, "##\n"), Block::Heading { text: None });
    }

    #[test]
    fn test_emphasised_heading_has_empty_literal() {
        let arena = Arena::new();
        let block = first_block(&arena, "## *11.05.2020*\n");
        assert_eq!(
            block,
            Block::Heading {
                text: Some(String::new())
            }
        );
        assert!(!block.is_release_heading());
    }

    #[test]
    fn test_paragraph_is_other() {
        let arena = Arena::new();
        assert_eq!(first_block(&arena, "11.05.2020 is a date\n"), Block::Other);
    }

    #[test]
    fn test_node_text_joins_inlines() {
        let arena = Arena::new();
        let root = parse_markdown(&arena, "## 01.02.2023 `v1.2` *final*\n");
        let heading = root.first_child().expect("heading");
        assert_eq!(node_text(heading), "01.02.2023 v1.2 final");
    }

    #[test]
    fn test_summarize_source() {
        let source = "# Changelog\n\n## 01.01.2022 First\n\n- a\n\n## 02.01.2022\n";
        let summary = summarize_source(source).unwrap();

        assert_eq!(
            summary,
            vec![
                ReleaseSummary {
                    date: "01.01.2022".to_string(),
                    heading: "01.01.2022 First".to_string(),
                    content_nodes: 1,
                },
                ReleaseSummary {
                    date: "02.01.2022".to_string(),
                    heading: "02.01.2022".to_string(),
                    content_nodes: 0,
                },
            ]
        );
    }
}
