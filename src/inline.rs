use std::sync::LazyLock;

use regex::Regex;

use crate::block::{SpanKind, TextSpan};
use crate::error::{Error, Result};

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("image pattern is valid"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("link pattern is valid"));

/// Literal inline delimiters, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Code,
    Bold,
    Italic,
}

impl Delimiter {
    pub const ORDER: [Delimiter; 3] = [Delimiter::Code, Delimiter::Bold, Delimiter::Italic];

    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::Code => "`",
            Delimiter::Bold => "**",
            Delimiter::Italic => "_",
        }
    }

    pub fn kind(self) -> SpanKind {
        match self {
            Delimiter::Code => SpanKind::Code,
            Delimiter::Bold => SpanKind::Bold,
            Delimiter::Italic => SpanKind::Italic,
        }
    }
}

/// Split inline text into typed spans.
///
/// Images are extracted first, then links, then code, bold and italic
/// delimiters. Spans never nest: once a span has a kind other than plain it
/// passes through the later stages untouched.
pub fn tokenize(text: &str) -> Result<Vec<TextSpan>> {
    let spans = vec![TextSpan::plain(text)];
    let spans = split_images(spans);
    let mut spans = split_links(spans);
    for delimiter in Delimiter::ORDER {
        spans = split_delimiter(spans, delimiter)?;
    }
    Ok(spans)
}

/// Split every plain span on `delimiter`.
///
/// Segments alternate plain/styled starting with plain. An unmatched
/// delimiter leaves the trailing segment styled, and empty segments at the
/// boundaries are kept.
pub fn split_delimiter(spans: Vec<TextSpan>, delimiter: Delimiter) -> Result<Vec<TextSpan>> {
    if spans.is_empty() {
        return Err(Error::Internal(format!(
            "no spans to split on {:?}",
            delimiter.as_str()
        )));
    }

    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }
        for (i, part) in span.content().split(delimiter.as_str()).enumerate() {
            if i % 2 == 0 {
                out.push(TextSpan::plain(part));
            } else {
                out.push(TextSpan::styled(part, delimiter));
            }
        }
    }
    Ok(out)
}

/// Pull `![alt](url)` images out of plain spans.
pub fn split_images(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_pattern(spans, &IMAGE, false, |alt, url| TextSpan::image(alt, url))
}

/// Pull `[text](url)` links out of plain spans, ignoring any preceded by `!`.
pub fn split_links(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_pattern(spans, &LINK, true, |text, url| TextSpan::link(text, url))
}

fn split_pattern(
    spans: Vec<TextSpan>,
    pattern: &Regex,
    skip_after_bang: bool,
    make: fn(&str, &str) -> TextSpan,
) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let text = span.content();
        let mut found = Vec::new();
        let mut pos = 0;
        while let Some(caps) = pattern.captures_at(text, pos) {
            let Some(whole) = caps.get(0) else { break };
            if skip_after_bang && text[..whole.start()].ends_with('!') {
                // Retry one character on, as a lookbehind would.
                match text[whole.start()..].chars().next() {
                    Some(ch) => pos = whole.start() + ch.len_utf8(),
                    None => break,
                }
                continue;
            }
            let label = caps.get(1).map_or("", |m| m.as_str());
            let url = caps.get(2).map_or("", |m| m.as_str());
            found.push((whole.start(), whole.end(), make(label, url)));
            pos = whole.end();
        }

        if found.is_empty() {
            out.push(span);
            continue;
        }

        let mut last = 0;
        for (start, end, matched) in found {
            if start > last {
                out.push(TextSpan::plain(&text[last..start]));
            }
            out.push(matched);
            last = end;
        }
        if last < text.len() {
            out.push(TextSpan::plain(&text[last..]));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bold(s: &str) -> TextSpan {
        TextSpan::styled(s, Delimiter::Bold)
    }

    fn italic(s: &str) -> TextSpan {
        TextSpan::styled(s, Delimiter::Italic)
    }

    fn code(s: &str) -> TextSpan {
        TextSpan::styled(s, Delimiter::Code)
    }

    fn plain(s: &str) -> TextSpan {
        TextSpan::plain(s)
    }

    #[test]
    fn bold_delimiter_split() {
        let spans = split_delimiter(
            vec![plain("shouldn't be **should be** shouldn't be")],
            Delimiter::Bold,
        )
        .unwrap();
        assert_eq!(
            spans,
            vec![plain("shouldn't be "), bold("should be"), plain(" shouldn't be")]
        );
    }

    #[test]
    fn unterminated_delimiter_is_styled_to_end() {
        let spans = split_delimiter(vec![plain("A **bold B")], Delimiter::Bold).unwrap();
        assert_eq!(spans, vec![plain("A "), bold("bold B")]);
    }

    #[test]
    fn delimiter_parity() {
        // even count: occurrences + 1 spans ending in plain
        let spans = split_delimiter(vec![plain("a `b` c `d` e")], Delimiter::Code).unwrap();
        assert_eq!(spans.len(), 5);
        assert!(spans.last().unwrap().is_plain());

        // odd count: same alternation, trailing segment styled
        let spans = split_delimiter(vec![plain("a `b` c `d")], Delimiter::Code).unwrap();
        assert_eq!(spans.len(), 4);
        assert_eq!(spans.last().unwrap().kind(), SpanKind::Code);
    }

    #[test]
    fn delimiters_keep_empty_boundaries() {
        let spans = split_delimiter(vec![plain("**all bold**")], Delimiter::Bold).unwrap();
        assert_eq!(spans, vec![plain(""), bold("all bold"), plain("")]);
    }

    #[test]
    fn bold_and_italic_do_not_cross_match() {
        let spans = split_delimiter(vec![plain("a **b** c")], Delimiter::Italic).unwrap();
        assert_eq!(spans, vec![plain("a **b** c")]);

        let spans = split_delimiter(vec![plain("a _b_ c")], Delimiter::Bold).unwrap();
        assert_eq!(spans, vec![plain("a _b_ c")]);
    }

    #[test]
    fn typed_spans_pass_through_delimiters() {
        let spans = split_delimiter(
            vec![TextSpan::link("**x**", "u"), plain("_y_")],
            Delimiter::Bold,
        )
        .unwrap();
        assert_eq!(spans[0], TextSpan::link("**x**", "u"));
        assert_eq!(spans[1], plain("_y_"));
    }

    #[test]
    fn empty_input_state_is_internal_error() {
        assert!(matches!(
            split_delimiter(Vec::new(), Delimiter::Code),
            Err(Error::Internal(_))
        ));
    }

    #[test]
    fn images_are_extracted() {
        let spans = split_images(vec![plain("Look ![cat](https://img/cat.png) here.")]);
        assert_eq!(
            spans,
            vec![
                plain("Look "),
                TextSpan::image("cat", "https://img/cat.png"),
                plain(" here."),
            ]
        );
    }

    #[test]
    fn adjacent_images_have_no_empty_text_between() {
        let spans = split_images(vec![plain("![a](u)![b](v)")]);
        assert_eq!(spans, vec![TextSpan::image("a", "u"), TextSpan::image("b", "v")]);
    }

    #[test]
    fn links_skip_image_syntax() {
        let spans = split_links(vec![plain("![not a link](u) but [this](v) is")]);
        assert_eq!(
            spans,
            vec![
                plain("![not a link](u) but "),
                TextSpan::link("this", "v"),
                plain(" is"),
            ]
        );
    }

    #[test]
    fn tokenize_mixed() {
        let spans = tokenize("This has **bold**, _italic_, and `code`.").unwrap();
        let spans: Vec<_> = spans.into_iter().filter(|s| !s.content().is_empty()).collect();
        assert_eq!(
            spans,
            vec![
                plain("This has "),
                bold("bold"),
                plain(", "),
                italic("italic"),
                plain(", and "),
                code("code"),
                plain("."),
            ]
        );
    }

    #[test]
    fn tokenize_image_then_link() {
        let spans = tokenize("![alt](img) and [link](u)").unwrap();
        assert_eq!(
            spans,
            vec![
                TextSpan::image("alt", "img"),
                plain(" and "),
                TextSpan::link("link", "u"),
            ]
        );
    }

    #[test]
    fn code_protects_underscores() {
        let spans = tokenize("call `snake_case_name` now").unwrap();
        assert_eq!(
            spans,
            vec![plain("call "), code("snake_case_name"), plain(" now")]
        );
    }

    #[test]
    fn link_text_is_not_formatted() {
        let spans = tokenize("[**bold?**](u)").unwrap();
        assert_eq!(spans, vec![TextSpan::link("**bold?**", "u")]);
    }

    #[test]
    fn plain_text_is_one_span() {
        assert_eq!(tokenize("Line1\nLine2").unwrap(), vec![plain("Line1\nLine2")]);
        assert_eq!(tokenize("").unwrap(), vec![plain("")]);
    }
}
