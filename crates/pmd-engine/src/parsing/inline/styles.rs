use std::sync::OnceLock;

use regex::Regex;

fn bold_italic() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*\*(.+?)\*\*\*").expect("Invalid bold-italic regex"))
}

fn bold() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("Invalid bold regex"))
}

fn strike() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"~~(.+?)~~").expect("Invalid strikethrough regex"))
}

/// Applies `***both***`, `**bold**`, `_italic_` and `~~strike~~`, in that
/// order.
pub fn apply(text: &str) -> String {
    let text = bold_italic().replace_all(text, "<strong><em>${1}</em></strong>");
    let text = bold().replace_all(&text, "<strong>${1}</strong>");
    let text = italics(&text);
    strike().replace_all(&text, "<del>${1}</del>").into_owned()
}

/// True when [`apply`] would change `text`.
pub fn has_style(text: &str) -> bool {
    bold().is_match(text) || strike().is_match(text) || italics(text) != text
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `_x_` outside words, so `snake_case_name` stays as written.
fn italics(text: &str) -> String {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let opens = |k: usize| {
        (k == 0 || !is_word(chars[k - 1].1))
            && chars
                .get(k + 1)
                .is_some_and(|&(_, c)| !c.is_whitespace() && c != '_')
    };
    let closes = |k: usize| {
        !chars[k - 1].1.is_whitespace() && chars.get(k + 1).is_none_or(|&(_, c)| !is_word(c))
    };

    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut k = 0;
    while k < chars.len() {
        let (at, c) = chars[k];
        if c == '_' && opens(k) {
            let close = (k + 2..chars.len()).find(|&m| chars[m].1 == '_' && closes(m));
            if let Some(close) = close {
                let end = chars[close].0;
                out.push_str(&text[copied..at]);
                out.push_str("<em>");
                out.push_str(&text[at + 1..end]);
                out.push_str("</em>");
                copied = end + 1;
                k = close + 1;
                continue;
            }
        }
        k += 1;
    }
    out.push_str(&text[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("**b**", "<strong>b</strong>")]
    #[case("***bi***", "<strong><em>bi</em></strong>")]
    #[case("_i_", "<em>i</em>")]
    #[case("~~s~~", "<del>s</del>")]
    #[case("a **b** and **c**", "a <strong>b</strong> and <strong>c</strong>")]
    #[case("(_x_)", "(<em>x</em>)")]
    #[case("snake_case_name", "snake_case_name")]
    #[case("_ spaced _", "_ spaced _")]
    #[case("__init__", "__init__")]
    #[case("no markup", "no markup")]
    #[case("**unclosed", "**unclosed")]
    fn styles(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(apply(input), expected);
    }

    #[test]
    fn detection_matches_application() {
        for text in ["**b**", "_i_", "~~s~~", "***x***", "plain", "a_b_c"] {
            assert_eq!(has_style(text), apply(text) != text, "{text}");
        }
    }
}
