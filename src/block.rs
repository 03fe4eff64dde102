use crate::inline::Delimiter;

/// Formatting carried by an inline span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl SpanKind {
    /// Whether spans of this kind point somewhere (href or src).
    pub fn has_target(self) -> bool {
        matches!(self, SpanKind::Link | SpanKind::Image)
    }
}

/// A fragment of inline content with a single formatting kind.
///
/// `target` is set for links and images and absent for everything else; the
/// constructors are the only way to build one outside this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    content: String,
    kind: SpanKind,
    target: Option<String>,
}

impl TextSpan {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: SpanKind::Plain,
            target: None,
        }
    }

    /// A bold, italic or code span, named by the delimiter that produces it.
    pub fn styled(content: impl Into<String>, delimiter: Delimiter) -> Self {
        Self {
            content: content.into(),
            kind: delimiter.kind(),
            target: None,
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            kind: SpanKind::Link,
            target: Some(url.into()),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: alt.into(),
            kind: SpanKind::Image,
            target: Some(url.into()),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }

    pub(crate) fn into_parts(self) -> (String, SpanKind, Option<String>) {
        (self.content, self.kind, self.target)
    }
}

/// Block-level classification of a blank-line delimited chunk of Markdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    Heading { level: u8 },
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl BlockType {
    /// The HTML tag the renderer wraps this block's content in.
    pub fn tag(self) -> &'static str {
        match self {
            BlockType::Paragraph => "p",
            BlockType::Heading { level: 1 } => "h1",
            BlockType::Heading { level: 2 } => "h2",
            BlockType::Heading { level: 3 } => "h3",
            BlockType::Heading { level: 4 } => "h4",
            BlockType::Heading { level: 5 } => "h5",
            BlockType::Heading { .. } => "h6",
            BlockType::Code => "pre",
            BlockType::Quote => "blockquote",
            BlockType::UnorderedList => "ul",
            BlockType::OrderedList => "ol",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;
    use crate::html::HtmlNode;

    #[test]
    fn target_only_on_links_and_images() {
        assert_eq!(TextSpan::plain("a").target(), None);
        assert_eq!(TextSpan::styled("a", Delimiter::Bold).target(), None);
        assert_eq!(TextSpan::link("a", "u").target(), Some("u"));
        assert_eq!(TextSpan::image("a", "u").target(), Some("u"));
    }

    #[test]
    fn styled_kind_follows_delimiter() {
        assert_eq!(TextSpan::styled("a", Delimiter::Code).kind(), SpanKind::Code);
        assert_eq!(TextSpan::styled("a", Delimiter::Bold).kind(), SpanKind::Bold);
        assert_eq!(TextSpan::styled("a", Delimiter::Italic).kind(), SpanKind::Italic);
    }

    #[test]
    fn link_or_image_without_target_cannot_become_a_node() {
        for kind in [SpanKind::Link, SpanKind::Image] {
            let span = TextSpan {
                content: "broken".to_string(),
                kind,
                target: None,
            };
            match HtmlNode::try_from(span) {
                Err(Error::MissingTarget { kind: missing }) => assert_eq!(missing, kind),
                other => panic!("expected missing target for {kind:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn heading_tags_follow_level() {
        assert_eq!(BlockType::Heading { level: 1 }.tag(), "h1");
        assert_eq!(BlockType::Heading { level: 6 }.tag(), "h6");
        assert_eq!(BlockType::OrderedList.tag(), "ol");
    }
}
