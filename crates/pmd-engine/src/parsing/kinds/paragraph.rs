use crate::parsing::{
    context::Scope,
    fragment::ParseResult,
    inline::render_inline,
    lines::is_blank,
    registry::{GrammarModule, ModuleKind, Rule},
};

/// Catch-all for non-blank lines.
pub struct Paragraph;

impl Paragraph {
    pub const PRIORITY: i32 = 1;

    /// Void elements that may stand alone on a compiled line.
    const VOID_TAGS: [&'static str; 3] = ["hr", "br", "img"];

    /// A line that is one compiled element: its opening tag carries a
    /// `pmd-` class and the line ends by closing that same tag (or the tag is
    /// void and is the whole line).
    ///
    /// Such lines pass through untouched, so compiled output fed back in
    /// compiles to itself. Hand-written HTML mixed with PMD is rendered.
    pub fn is_html_line(line: &str) -> bool {
        let t = line.trim();
        let Some(rest) = t.strip_prefix('<') else {
            return false;
        };
        let name_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        let name = &rest[..name_len];
        let Some(tag_end) = rest.find('>') else {
            return false;
        };
        if name.is_empty() || tag_end < name_len {
            return false;
        }
        let attrs = &rest[name_len..tag_end];
        if !attrs.starts_with(char::is_whitespace) || !attrs.contains("class=\"pmd-") {
            return false;
        }
        if Self::VOID_TAGS.contains(&name) {
            return tag_end + 1 == rest.len();
        }
        t.strip_suffix('>')
            .and_then(|s| s.strip_suffix(name))
            .is_some_and(|s| s.ends_with("</"))
    }

    /// `<p class="pmd-p">` around the inline rendering of `line`.
    pub fn render(line: &str) -> ParseResult {
        ParseResult::Html(format!("<p class=\"pmd-p\">{}</p>", render_inline(line.trim())))
    }

    pub fn matches(line: &str) -> bool {
        !is_blank(line)
    }

    pub fn parse(line: &str, _scope: &mut Scope<'_>) -> Option<ParseResult> {
        if Self::is_html_line(line) {
            return Some(ParseResult::Html(line.trim().to_string()));
        }
        Some(Self::render(line))
    }
}

pub fn module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::Paragraph,
        name: ModuleKind::Paragraph.name(),
        priority: Paragraph::PRIORITY,
        matches: Paragraph::matches,
        rule: Rule::SingleLine(Paragraph::parse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, parsing::dispatch::wrap};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn text_becomes_paragraph() {
        assert_eq!(
            parse("see [docs](https://pmd.dev)"),
            wrap(r#"<p class="pmd-p">see <a class="pmd-link pmd-link-external" href="https://pmd.dev" target="_blank" rel="noopener noreferrer">docs</a></p>"#)
        );
    }

    #[test]
    fn html_lines_pass_through() {
        assert_eq!(
            parse(r#"  <p class="pmd-p">x</p>"#),
            wrap(r#"<p class="pmd-p">x</p>"#)
        );
    }

    #[rstest]
    #[case(r#"<p class="pmd-p">x</p>"#, true)]
    #[case(r#"<hr class="pmd-hr pmd-hr-solid">"#, true)]
    #[case(r#"<ul class="pmd-ul"><li>a</li></ul>"#, true)]
    #[case("<hr>", false)]
    #[case(r#"<p class="pmd-p">x</div>"#, false)]
    #[case(r#"<hr class="pmd-hr"> trailing"#, false)]
    #[case(r#"<p class="note">x</p>"#, false)]
    #[case("<b>Note</b> see [docs](#x) <br>", false)]
    #[case("<b>unclosed", false)]
    #[case("a < b > c", false)]
    fn compiled_line_detection(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(Paragraph::is_html_line(line), expected);
    }

    #[test]
    fn hand_written_html_still_gets_links() {
        assert_eq!(
            parse("<b>Note</b> see [docs](#x) **now** <br>"),
            wrap(r##"<p class="pmd-p"><b>Note</b> see <a class="pmd-link pmd-link-internal" href="#x">docs</a> <strong>now</strong> <br></p>"##)
        );
    }
}
