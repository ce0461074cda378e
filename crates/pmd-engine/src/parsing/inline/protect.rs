//! Segments that later inline passes must not touch: code spans and
//! `lang[...]` tags. They are swapped for numbered markers first and put back
//! last.

use html_escape::{encode_double_quoted_attribute, encode_text};
use pmd_syntax::lang::{self, LangPairSet, lexer::is_ident_char};

use super::cursor::Cursor;

const OPEN: char = '\u{E002}';
const CLOSE: char = '\u{E003}';

pub const TICK: u8 = b'`';
const LANG_OPEN: &str = "lang[";
/// A marker character already present in the input.
const LITERAL_OPEN: &str = "\u{E002}";

#[derive(Debug, Default)]
pub struct Protected {
    segments: Vec<String>,
}

impl Protected {
    fn stash(&mut self, html: String) -> String {
        let marker = format!("{OPEN}{}{CLOSE}", self.segments.len());
        self.segments.push(html);
        marker
    }

    /// Replaces protected constructs in `text` with markers. Code spans are
    /// only recognised when `code_spans` is set.
    pub fn shield(&mut self, text: &str, code_spans: bool) -> String {
        let mut cur = Cursor::new(text);
        let mut out = String::with_capacity(text.len());
        let mut text_start = 0;

        while !cur.eof() {
            let start = cur.pos();
            let html = if cur.starts_with(LITERAL_OPEN.as_bytes()) {
                cur.bump_n(LITERAL_OPEN.len());
                Some(LITERAL_OPEN.to_string())
            } else if code_spans {
                try_code_span(&mut cur)
            } else {
                None
            };
            match html.or_else(|| try_lang(&mut cur)) {
                Some(html) => {
                    out.push_str(&text[text_start..start]);
                    let marker = self.stash(html);
                    out.push_str(&marker);
                    text_start = cur.pos();
                }
                None => {
                    cur.bump();
                }
            }
        }

        out.push_str(&text[text_start..]);
        out
    }

    /// Swaps markers back for the stashed HTML.
    pub fn restore(&self, text: &str) -> String {
        if self.segments.is_empty() {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(open) = rest.find(OPEN) {
            out.push_str(&rest[..open]);
            let after = &rest[open + OPEN.len_utf8()..];
            let segment = after.find(CLOSE).and_then(|close| {
                let n: usize = after[..close].parse().ok()?;
                Some((self.segments.get(n)?, close))
            });
            match segment {
                Some((html, close)) => {
                    out.push_str(html);
                    rest = &after[close + CLOSE.len_utf8()..];
                }
                None => {
                    out.push(OPEN);
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// `` `code` `` with the body escaped. Unclosed ticks are plain text.
fn try_code_span(cur: &mut Cursor<'_>) -> Option<String> {
    if cur.peek() != Some(TICK) {
        return None;
    }
    let saved = cur.clone();
    cur.bump();
    let inner_start = cur.pos();
    while !cur.eof() && cur.peek() != Some(TICK) {
        cur.bump();
    }
    if cur.peek() != Some(TICK) {
        *cur = saved;
        return None;
    }
    let inner = &cur.s[inner_start..cur.pos()];
    cur.bump();
    Some(format!(
        "<code class=\"pmd-inline-code\">{}</code>",
        encode_text(inner)
    ))
}

/// A complete `lang[...]` tag that does not continue a word.
fn try_lang(cur: &mut Cursor<'_>) -> Option<String> {
    if !cur.starts_with(LANG_OPEN.as_bytes()) || cur.prev_char().is_some_and(is_ident_char) {
        return None;
    }
    match lang::parse_prefix(cur.rest()) {
        Ok((pairs, consumed)) => {
            cur.bump_n(consumed);
            Some(render_lang(&pairs))
        }
        Err(e) => {
            log::debug!("lang tag kept as text: {e}");
            None
        }
    }
}

/// End of the well-formed `lang[...]` tag in `line` that contains byte
/// `at`, if any.
pub fn lang_tag_around(line: &str, at: usize) -> Option<usize> {
    let mut search = 0;
    while let Some(found) = line.get(search..at)?.find(LANG_OPEN) {
        let start = search + found;
        search = start + 1;
        if line[..start].chars().next_back().is_some_and(is_ident_char) {
            continue;
        }
        if let Ok((_, consumed)) = lang::parse_prefix(&line[start..]) {
            let end = start + consumed;
            if end > at {
                return Some(end);
            }
            search = end;
        }
    }
    None
}

/// `<span>` carrying every translation as a `data-lang-*` attribute and
/// showing the first.
pub fn render_lang(pairs: &LangPairSet) -> String {
    let mut out = String::from("<span class=\"pmd-lang\"");
    for (code, value) in pairs.iter() {
        out.push_str(&format!(
            " data-lang-{code}=\"{}\"",
            encode_double_quoted_attribute(value)
        ));
    }
    out.push('>');
    if let Some((_, shown)) = pairs.first() {
        out.push_str(&encode_text(shown));
    }
    out.push_str("</span>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn round_trip(text: &str, code_spans: bool) -> String {
        let mut protected = Protected::default();
        let shielded = protected.shield(text, code_spans);
        protected.restore(&shielded)
    }

    #[test]
    fn literal_markers_survive() {
        let text = "a \u{E002}0\u{E003} `b`";
        assert_eq!(
            round_trip(text, true),
            "a \u{E002}0\u{E003} <code class=\"pmd-inline-code\">b</code>"
        );
    }

    #[test]
    fn lang_tag_around_positions() {
        let line = r#"x lang[en="<!a!>"] <!b!>"#;
        let inside = line.find("<!a").unwrap();
        let outside = line.find("<!b").unwrap();
        assert_eq!(lang_tag_around(line, inside), Some(line.find(']').unwrap() + 1));
        assert_eq!(lang_tag_around(line, outside), None);
        assert_eq!(lang_tag_around(r#"lang[en="<!a"#, 9), None);
        assert_eq!(lang_tag_around(r#"xlang[en="<!a"]"#, 10), None);
    }

    #[test]
    fn code_span_body_is_escaped_and_hidden() {
        let mut protected = Protected::default();
        let shielded = protected.shield("a `<b>**x**</b>` c", true);
        assert!(!shielded.contains("**"));
        assert_eq!(
            protected.restore(&shielded),
            "a <code class=\"pmd-inline-code\">&lt;b&gt;**x**&lt;/b&gt;</code> c"
        );
    }

    #[test]
    fn unclosed_tick_is_text() {
        assert_eq!(round_trip("a ` b", true), "a ` b");
    }

    #[test]
    fn lang_tag_renders_first_value() {
        assert_eq!(
            round_trip(r#"say lang[en="Hi", fr="Salut"]!"#, false),
            r#"say <span class="pmd-lang" data-lang-en="Hi" data-lang-fr="Salut">Hi</span>!"#
        );
    }

    #[test]
    fn lang_values_are_escaped() {
        assert_eq!(
            round_trip(r#"lang[en="<a \"q\">"]"#, false),
            r#"<span class="pmd-lang" data-lang-en="&lt;a &quot;q&quot;&gt;">&lt;a "q"&gt;</span>"#
        );
    }

    #[test]
    fn malformed_lang_is_kept() {
        let text = r#"lang[en="open"#;
        assert_eq!(round_trip(text, false), text);
    }

    #[test]
    fn lang_inside_word_is_text() {
        let text = r#"slang[en="x"]"#;
        assert_eq!(round_trip(text, false), text);
    }

    #[test]
    fn code_spans_ignored_when_disabled() {
        assert_eq!(round_trip("`x`", false), "`x`");
    }

    #[test]
    fn lang_inside_code_span_is_code() {
        assert_eq!(
            round_trip(r#"`lang[en="x"]`"#, true),
            r#"<code class="pmd-inline-code">lang[en="x"]</code>"#
        );
    }
}
