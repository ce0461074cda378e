use html_escape::encode_text;

use crate::parsing::{
    context::Scope,
    fragment::MultiLineParseResult,
    registry::{GrammarModule, ModuleKind, Rule},
};

/// A raw span found by [`RawText::extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSpan {
    /// Byte offset of `<!` in the start line.
    pub open: usize,
    /// Last line the span touches (inclusive).
    pub end_index: usize,
    /// Text after `!>` on the last line.
    pub suffix: String,
    pub html: String,
}

pub struct RawText;

impl RawText {
    pub const OPEN: &'static str = "<!";
    pub const CLOSE: &'static str = "!>";
    pub const PRIORITY: i32 = 100;

    pub fn matches(line: &str) -> bool {
        line.contains(Self::OPEN)
    }

    /// Finds the first `<!` at or after byte `from` of `lines[start]` and its
    /// closing `!>`, which may be on a later line.
    ///
    /// A span with nothing else on its lines, or one that crosses lines,
    /// becomes a `<pre>`; a span embedded in other text becomes a `<span>`.
    pub fn extract(lines: &[String], start: usize, from: usize) -> Option<RawSpan> {
        let first = lines.get(start)?;
        let open = from + first.get(from..)?.find(Self::OPEN)?;
        let body_start = open + Self::OPEN.len();
        let prefix = &first[..open];

        if let Some(close) = first[body_start..].find(Self::CLOSE) {
            let body = &first[body_start..body_start + close];
            let suffix = &first[body_start + close + Self::CLOSE.len()..];
            let standalone = prefix.trim().is_empty() && suffix.trim().is_empty();
            return Some(RawSpan {
                open,
                end_index: start,
                suffix: suffix.to_string(),
                html: Self::render(body, standalone),
            });
        }

        let (end, close) = lines
            .iter()
            .enumerate()
            .skip(start + 1)
            .find_map(|(j, line)| line.find(Self::CLOSE).map(|c| (j, c)))?;

        let mut body = first[body_start..].to_string();
        for line in &lines[start + 1..end] {
            body.push('\n');
            body.push_str(line);
        }
        body.push('\n');
        body.push_str(&lines[end][..close]);

        let body = body.strip_prefix('\n').unwrap_or(&body);
        let body = body.strip_suffix('\n').unwrap_or(body);
        Some(RawSpan {
            open,
            end_index: end,
            suffix: lines[end][close + Self::CLOSE.len()..].to_string(),
            html: Self::render(body, true),
        })
    }

    fn render(body: &str, block: bool) -> String {
        if block {
            format!("<pre class=\"pmd-raw\">{}</pre>", encode_text(body))
        } else {
            format!("<span class=\"pmd-raw\">{}</span>", encode_text(body))
        }
    }

    /// Renders the first span on `lines[start]` together with the text around
    /// it, untouched.
    pub fn parse(
        lines: &[String],
        start: usize,
        _scope: &mut Scope<'_>,
    ) -> Option<MultiLineParseResult> {
        let span = Self::extract(lines, start, 0)?;
        let prefix = &lines[start][..span.open];
        Some(MultiLineParseResult {
            html: format!("{prefix}{}{}", span.html, span.suffix),
            end_index: span.end_index,
        })
    }
}

pub fn module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::RawText,
        name: ModuleKind::RawText.name(),
        priority: RawText::PRIORITY,
        matches: RawText::matches,
        rule: Rule::MultiLine(RawText::parse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn standalone_single_line_is_pre() {
        let span = RawText::extract(&lines(&["<!<b>x</b>!>"]), 0, 0).unwrap();
        assert_eq!(span.html, r#"<pre class="pmd-raw">&lt;b&gt;x&lt;/b&gt;</pre>"#);
        assert_eq!(span.open, 0);
        assert_eq!(span.end_index, 0);
        assert_eq!(span.suffix, "");
    }

    #[test]
    fn embedded_span_is_inline() {
        let span = RawText::extract(&lines(&["a <!**b**!> c"]), 0, 0).unwrap();
        assert_eq!(span.html, r#"<span class="pmd-raw">**b**</span>"#);
        assert_eq!(span.open, 2);
        assert_eq!(span.suffix, " c");
    }

    #[test]
    fn multi_line_span() {
        let src = lines(&["<!", "# not a heading", "| x |", "!> tail"]);
        let span = RawText::extract(&src, 0, 0).unwrap();
        assert_eq!(span.end_index, 3);
        assert_eq!(span.suffix, " tail");
        assert_eq!(
            span.html,
            "<pre class=\"pmd-raw\"># not a heading\n| x |</pre>"
        );
    }

    #[test]
    fn search_starts_at_offset() {
        let src = lines(&["<!a!> <!b!>"]);
        let span = RawText::extract(&src, 0, 5).unwrap();
        assert_eq!(span.open, 6);
        assert_eq!(span.html, r#"<span class="pmd-raw">b</span>"#);
    }

    #[test]
    fn unclosed_span_is_not_raw() {
        assert_eq!(RawText::extract(&lines(&["<! open", "still open"]), 0, 0), None);
    }

    #[test]
    fn parse_keeps_surrounding_text() {
        let parser = crate::Parser::default();
        let mut ctx = crate::ParseContext::new();
        let mut scope = Scope::new(&parser, &mut ctx);
        let result = RawText::parse(&lines(&["x <!y!> z"]), 0, &mut scope).unwrap();
        assert_eq!(result.html, r#"x <span class="pmd-raw">y</span> z"#);
    }
}
