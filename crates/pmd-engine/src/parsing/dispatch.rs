//! The per-pass pipeline: raw extraction, line dispatch, assembly,
//! placeholder restoration and wrapping.

use super::{
    context::Scope,
    fragment::{ParseResult, assemble},
    inline,
    kinds::{code_block::CodeBlock, raw_text::RawText},
    lines::{is_blank, split_lines},
    registry::{ModuleKind, Rule},
};

/// Wraps the body of every pass.
pub fn wrap(body: &str) -> String {
    format!("<div class=\"pmd-content\" style=\"white-space: pre-wrap;\">{body}</div>")
}

impl Scope<'_> {
    /// Runs the whole pipeline over `content` at the current depth.
    ///
    /// The top-level pass (depth 0) empties the placeholder table when it
    /// restores; nested passes leave it for their ancestors.
    pub(crate) fn run(&mut self, content: &str) -> String {
        if self.ctx.depth == 0 {
            self.ctx.placeholders.seal(content);
        }
        let mut lines = split_lines(content);
        self.extract_raw_text(&mut lines);
        let fragments = self.dispatch(&lines);
        let assembled = assemble(&fragments);
        let restored = if self.ctx.depth == 0 {
            self.ctx.placeholders.drain(&assembled)
        } else {
            self.ctx.placeholders.restore(&assembled)
        };
        wrap(&restored)
    }

    /// Replaces every closed `<!` ... `!>` span with a placeholder id.
    ///
    /// Lines inside closed code fences are left alone, as are openers inside
    /// a `lang[...]` tag. Spans over several lines collapse those lines into
    /// one.
    fn extract_raw_text(&mut self, lines: &mut Vec<String>) {
        if self.excluded.contains(ModuleKind::RawText) {
            return;
        }
        let Some(raw) = self.parser.registry().by_kind(ModuleKind::RawText) else {
            return;
        };
        let matches = raw.matches;

        let mut i = 0;
        while i < lines.len() {
            if let Some(close) = CodeBlock::closed_fence_end(lines, i) {
                i = close + 1;
                continue;
            }

            let mut from = 0;
            while from <= lines[i].len() && matches(&lines[i][from..]) {
                let Some(span) = RawText::extract(lines, i, from) else {
                    break;
                };
                if let Some(tag_end) = inline::lang_tag_around(&lines[i], span.open) {
                    from = tag_end;
                    continue;
                }
                let id = self.ctx.placeholders.insert(span.html);
                let prefix = &lines[i][..span.open];
                let merged = format!("{prefix}{id}{}", span.suffix);
                from = span.open + id.len();
                lines.splice(i..=span.end_index, [merged]);
            }
            i += 1;
        }
    }

    fn dispatch(&mut self, lines: &[String]) -> Vec<ParseResult> {
        let mut fragments = Vec::with_capacity(lines.len());
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];
            if let Some(html) = self.ctx.placeholders.get(line) {
                fragments.push(ParseResult::Html(html.to_string()));
                i += 1;
                continue;
            }

            match self.claim(lines, i) {
                Some((fragment, end)) => {
                    fragments.push(fragment);
                    i = end + 1;
                }
                None => {
                    fragments.push(fallback(line));
                    i += 1;
                }
            }
        }
        fragments
    }

    /// First visible module, by priority, whose rule accepts line `i`.
    fn claim(&mut self, lines: &[String], i: usize) -> Option<(ParseResult, usize)> {
        let parser = self.parser;
        for module in parser.registry().view(self.excluded) {
            // Raw spans were handled before dispatch.
            if module.kind == ModuleKind::RawText || !(module.matches)(&lines[i]) {
                continue;
            }
            let claimed = match module.rule {
                Rule::SingleLine(rule) => rule(&lines[i], self).map(|fragment| (fragment, i)),
                Rule::MultiLine(rule) => rule(lines, i, self)
                    .map(|r| (ParseResult::Html(r.html), r.end_index.max(i))),
            };
            if let Some((fragment, end)) = claimed {
                log::trace!("{} claimed lines {i}..={end}", module.name);
                return Some((fragment, end));
            }
        }
        None
    }
}

/// Output for a line no module claimed.
fn fallback(line: &str) -> ParseResult {
    if is_blank(line) {
        ParseResult::Blank
    } else {
        ParseResult::Html(inline::substitute_lang(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Parser, ParseOptions};
    use pretty_assertions::assert_eq;

    #[test]
    fn unclaimed_lines_only_get_lang_substitution() {
        let options = ParseOptions {
            disabled_modules: vec!["paragraph".into(), "text_style".into()],
            ..ParseOptions::default()
        };
        let parser = Parser::new(options);
        assert_eq!(
            parser.parse(r#"**a** lang[en="Hi"]"#),
            wrap(r#"**a** <span class="pmd-lang" data-lang-en="Hi">Hi</span>"#)
        );
    }

    #[test]
    fn unclaimed_blank_lines_stay_blank() {
        let options = ParseOptions {
            disabled_modules: vec!["empty_line".into(), "paragraph".into()],
            ..ParseOptions::default()
        };
        let parser = Parser::new(options);
        assert_eq!(parser.parse("# a\n\n# b"), wrap(
            "<h1 class=\"pmd-h1\">a</h1>\n<h1 class=\"pmd-h1\">b</h1>"
        ));
    }

    #[test]
    fn raw_extraction_skips_code_fences() {
        let html = crate::parse("```\n<!x!>\n```\n<!y!>");
        assert!(html.contains("&lt;!x!&gt;"));
        assert!(html.contains(r#"<pre class="pmd-raw">y</pre>"#));
    }

    #[test]
    fn raw_openers_inside_lang_values_stay_text() {
        let html = crate::parse(r#"lang[en="<!x!>", fr="y"] and <!z!>"#);
        assert!(html.contains(r#"data-lang-en="&lt;!x!&gt;""#), "{html}");
        assert!(html.contains(r#"<span class="pmd-raw">z</span>"#), "{html}");
    }

    #[test]
    fn literal_placeholder_text_is_not_resolved() {
        for forged in ["\u{E000}PMDRAW0\u{E001}", "\u{E000}PMDRAW0:0\u{E001}"] {
            let html = crate::parse(&format!("{forged} x <!secret!>"));
            assert_eq!(html.matches("secret").count(), 1, "{html}");
            assert!(html.contains(forged));
        }
    }

    #[test]
    fn disabled_raw_text_leaves_spans_alone() {
        let options = ParseOptions {
            disabled_modules: vec!["raw_text".into()],
            ..ParseOptions::default()
        };
        let html = Parser::new(options).parse("a <!**b**!>");
        assert!(!html.contains("pmd-raw"));
        assert!(html.contains("<strong>b</strong>"));
    }
}
