mod block;
mod config;
mod error;
mod html;
mod inline;
mod parser;
mod render;
pub mod site;

pub use block::{BlockType, SpanKind, TextSpan};
pub use config::Config;
pub use error::{Error, Result};
pub use html::{Attributes, HtmlNode, serialize};
pub use inline::{Delimiter, split_delimiter, tokenize};
pub use parser::{classify, extract_title, segment};

/// Split markdown into blocks, each paired with its classification.
pub fn parse(markdown: &str) -> Vec<(String, BlockType)> {
    parser::parse(markdown)
}

/// Render markdown to an `html > body` node tree.
pub fn render(markdown: &str) -> Result<HtmlNode> {
    let blocks = parse(markdown);
    render::blocks_to_html(&blocks)
}

/// Render markdown straight to an HTML string.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    serialize(&render(markdown)?)
}

/// Render inline markdown (no block structure) to HTML nodes.
pub fn inline_to_html(text: &str) -> Result<Vec<HtmlNode>> {
    render::text_to_children(text)
}
