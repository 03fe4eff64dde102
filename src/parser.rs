use std::sync::LazyLock;

use regex::Regex;

use crate::block::BlockType;
use crate::error::{Error, Result};

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A(#{1,6}) (?s:.+)\z").expect("heading pattern is valid"));

const CODE_FENCE: &str = "```";

/// Split a document into blocks on blank lines.
///
/// Splitting is on the literal `"\n\n"` substring. Every piece is trimmed and
/// empty pieces are dropped, so longer runs of blank lines collapse into a
/// single boundary.
pub fn segment(document: &str) -> Vec<String> {
    document
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classify a single block. Rules are tried in priority order and the first
/// match wins; anything unmatched is a paragraph.
pub fn classify(block: &str) -> BlockType {
    if let Some(level) = heading_level(block) {
        BlockType::Heading { level }
    } else if is_code(block) {
        BlockType::Code
    } else if is_quote(block) {
        BlockType::Quote
    } else if is_unordered_list(block) {
        BlockType::UnorderedList
    } else if is_ordered_list(block) {
        BlockType::OrderedList
    } else {
        BlockType::Paragraph
    }
}

/// Segment a document and classify every block exactly once.
///
/// Returned as ordered pairs so identical blocks keep their own entry.
pub fn parse(document: &str) -> Vec<(String, BlockType)> {
    segment(document)
        .into_iter()
        .map(|block| {
            let block_type = classify(&block);
            log::debug!("classified block as {:?}", block_type);
            (block, block_type)
        })
        .collect()
}

/// Text of the first level 1 heading in the document, trimmed.
pub fn extract_title(document: &str) -> Result<String> {
    segment(document)
        .iter()
        .find(|block| heading_level(block) == Some(1))
        .map(|block| heading_text(block, 1).to_string())
        .ok_or(Error::MissingTitle)
}

/// Heading content with the `#` run and separating whitespace removed.
pub(crate) fn heading_text(block: &str, level: u8) -> &str {
    block[usize::from(level)..].trim()
}

fn heading_level(block: &str) -> Option<u8> {
    HEADING
        .captures(block)
        .and_then(|caps| caps.get(1))
        .and_then(|hashes| u8::try_from(hashes.len()).ok())
}

fn is_code(block: &str) -> bool {
    block.len() >= CODE_FENCE.len() * 2 + 1
        && block.starts_with("```\n")
        && block.ends_with(CODE_FENCE)
}

fn is_quote(block: &str) -> bool {
    block.split('\n').all(|line| line.starts_with('>'))
}

fn is_unordered_list(block: &str) -> bool {
    block
        .split('\n')
        .filter(|line| !line.is_empty())
        .all(|line| line.starts_with("- "))
}

fn is_ordered_list(block: &str) -> bool {
    block
        .split('\n')
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)))
}
