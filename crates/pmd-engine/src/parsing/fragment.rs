/// Output of a single-line rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    Html(String),
    /// A blank line; rendered as a line break between neighbours.
    Blank,
}

/// Output of a multi-line rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiLineParseResult {
    pub html: String,
    /// Index of the last line consumed (inclusive). Never before the start.
    pub end_index: usize,
}

/// Joins fragments in source order.
///
/// A newline is inserted before every blank fragment except the first;
/// nothing is inserted between other neighbours.
pub fn assemble(fragments: &[ParseResult]) -> String {
    let mut out = String::new();
    for (i, fragment) in fragments.iter().enumerate() {
        match fragment {
            ParseResult::Html(html) => out.push_str(html),
            ParseResult::Blank if i > 0 => out.push('\n'),
            ParseResult::Blank => {}
        }
    }
    out
}
