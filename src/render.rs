use crate::block::{BlockType, TextSpan};
use crate::error::{Error, Result};
use crate::html::HtmlNode;
use crate::inline::tokenize;
use crate::parser::heading_text;

/// Convert classified blocks into an `html > body > div*` tree, one `div`
/// per block.
pub fn blocks_to_html(blocks: &[(String, BlockType)]) -> Result<HtmlNode> {
    let divs = blocks
        .iter()
        .map(|(block, block_type)| {
            let node = emit_block(block, *block_type)?;
            Ok(HtmlNode::element("div", vec![node]))
        })
        .collect::<Result<Vec<_>>>()?;

    let body = HtmlNode::element("body", divs);
    Ok(HtmlNode::element("html", vec![body]))
}

fn emit_block(block: &str, block_type: BlockType) -> Result<HtmlNode> {
    let tag = block_type.tag();
    match block_type {
        BlockType::Paragraph => Ok(HtmlNode::element(tag, text_to_children(block)?)),
        BlockType::Heading { level } => {
            let text = heading_text(block, level);
            Ok(HtmlNode::element(tag, text_to_children(text)?))
        }
        BlockType::Code => {
            // Raw text, fences included, no inline processing
            let code = HtmlNode::leaf("code", block);
            Ok(HtmlNode::element(tag, vec![code]))
        }
        BlockType::Quote => {
            let text = block
                .split('\n')
                .map(|line| line.strip_prefix('>').unwrap_or(line).trim_start())
                .collect::<Vec<_>>()
                .join("\n");
            Ok(HtmlNode::element(tag, text_to_children(&text)?))
        }
        BlockType::UnorderedList => list_to_html(block, tag, unordered_item),
        BlockType::OrderedList => list_to_html(block, tag, ordered_item),
    }
}

/// Every line of a list block must carry its marker, blank lines included.
fn list_to_html(block: &str, tag: &str, item: fn(&str) -> Result<&str>) -> Result<HtmlNode> {
    let items = block
        .split('\n')
        .map(|line| Ok(HtmlNode::element("li", text_to_children(item(line)?)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(HtmlNode::element(tag, items))
}

fn unordered_item(line: &str) -> Result<&str> {
    line.split_once("- ")
        .map(|(_, rest)| rest)
        .ok_or_else(|| missing_marker("- ", line))
}

fn ordered_item(line: &str) -> Result<&str> {
    line.split_once(". ")
        .map(|(_, rest)| rest)
        .ok_or_else(|| missing_marker(". ", line))
}

fn missing_marker(marker: &str, line: &str) -> Error {
    Error::Internal(format!("list line {line:?} has no {marker:?} marker"))
}

/// Tokenize inline text and map every span to a node.
///
/// Empty plain runs left over from delimiter splitting are dropped, unless
/// nothing else remains.
pub fn text_to_children(text: &str) -> Result<Vec<HtmlNode>> {
    let children = tokenize(text)?
        .into_iter()
        .filter(|span| !(span.is_plain() && span.content().is_empty()))
        .map(HtmlNode::try_from)
        .collect::<Result<Vec<_>>>()?;

    if children.is_empty() {
        return Ok(vec![HtmlNode::try_from(TextSpan::plain(""))?]);
    }
    Ok(children)
}
