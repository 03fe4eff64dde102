use std::fmt;

use crate::block::{SpanKind, TextSpan};
use crate::error::{Error, Result};

/// Ordered HTML attributes.
///
/// Attributes serialize in insertion order, but two sets with the same
/// pairs compare equal whatever order they were inserted in.
#[derive(Debug, Clone, Default, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

/// A node in the rendered HTML tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// A tag wrapping child nodes. Serializing requires at least one child.
    Element {
        tag: String,
        children: Vec<HtmlNode>,
        attributes: Option<Attributes>,
    },
    /// Text, optionally wrapped in a single tag. Untagged leaves are raw text.
    Leaf {
        tag: Option<String>,
        text: String,
        attributes: Option<Attributes>,
    },
    /// A tag with no children and no closing tag, e.g. `img`.
    Void {
        tag: String,
        attributes: Option<Attributes>,
    },
}

impl HtmlNode {
    pub fn element(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Element {
            tag: tag.into(),
            children,
            attributes: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: None,
            text: text.into(),
            attributes: None,
        }
    }

    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.into()),
            text: text.into(),
            attributes: None,
        }
    }

    pub fn void(tag: impl Into<String>, attributes: Attributes) -> Self {
        HtmlNode::Void {
            tag: tag.into(),
            attributes: Some(attributes),
        }
    }

    /// Attach attributes, replacing any already set.
    pub fn with_attributes(mut self, attrs: Attributes) -> Self {
        match &mut self {
            HtmlNode::Element { attributes, .. }
            | HtmlNode::Leaf { attributes, .. }
            | HtmlNode::Void { attributes, .. } => *attributes = Some(attrs),
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Element { tag, .. } | HtmlNode::Void { tag, .. } => Some(tag),
            HtmlNode::Leaf { tag, .. } => tag.as_deref(),
        }
    }

    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Element { children, .. } => children,
            HtmlNode::Leaf { .. } | HtmlNode::Void { .. } => &[],
        }
    }

    /// Render this node and its descendants to an HTML string.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        write_node(self, &mut out)?;
        Ok(out)
    }
}

impl TryFrom<TextSpan> for HtmlNode {
    type Error = Error;

    fn try_from(span: TextSpan) -> Result<Self> {
        let (content, kind, target) = span.into_parts();
        let node = match kind {
            SpanKind::Plain => HtmlNode::text(content),
            SpanKind::Bold => HtmlNode::leaf("b", content),
            SpanKind::Italic => HtmlNode::leaf("i", content),
            SpanKind::Code => HtmlNode::leaf("code", content),
            SpanKind::Link => {
                let href = target.ok_or(Error::MissingTarget { kind })?;
                HtmlNode::leaf("a", content).with_attributes([("href", href)].into_iter().collect())
            }
            SpanKind::Image => {
                let src = target.ok_or(Error::MissingTarget { kind })?;
                HtmlNode::void("img", [("src", src), ("alt", content)].into_iter().collect())
            }
        };
        Ok(node)
    }
}

impl fmt::Display for HtmlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let html = self.to_html().map_err(|_| fmt::Error)?;
        f.write_str(&html)
    }
}

/// Serialize a node tree to HTML. No escaping is applied to text or
/// attribute values.
pub fn serialize(node: &HtmlNode) -> Result<String> {
    node.to_html()
}

fn write_node(node: &HtmlNode, out: &mut String) -> Result<()> {
    match node {
        HtmlNode::Leaf { tag: None, text, .. } => out.push_str(text),
        HtmlNode::Leaf {
            tag: Some(tag),
            text,
            attributes,
        } => {
            open_tag(tag, attributes.as_ref(), out)?;
            out.push_str(text);
            close_tag(tag, out);
        }
        HtmlNode::Element {
            tag,
            children,
            attributes,
        } => {
            if children.is_empty() {
                return Err(if tag.is_empty() {
                    Error::MissingTag
                } else {
                    Error::MissingChildren { tag: tag.clone() }
                });
            }
            open_tag(tag, attributes.as_ref(), out)?;
            for child in children {
                write_node(child, out)?;
            }
            close_tag(tag, out);
        }
        HtmlNode::Void { tag, attributes } => {
            open_tag(tag, attributes.as_ref(), out)?;
        }
    }
    Ok(())
}

fn open_tag(tag: &str, attributes: Option<&Attributes>, out: &mut String) -> Result<()> {
    if tag.is_empty() {
        return Err(Error::MissingTag);
    }
    out.push('<');
    out.push_str(tag);
    if let Some(attributes) = attributes {
        for (key, value) in attributes.iter() {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
    out.push('>');
    Ok(())
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
