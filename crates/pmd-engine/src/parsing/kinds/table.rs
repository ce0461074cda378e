use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::{
    context::Scope,
    fragment::MultiLineParseResult,
    inline::render_inline,
    registry::{GrammarModule, ModuleKind, Rule},
};

fn separator_cell() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^:?-{3,}:?$").expect("Invalid separator regex"))
}

/// Column alignment taken from the separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    None,
    Left,
    Center,
    Right,
}

impl Align {
    fn from_cell(cell: &str) -> Option<Self> {
        if !separator_cell().is_match(cell) {
            return None;
        }
        Some(match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => Align::Center,
            (true, false) => Align::Left,
            (false, true) => Align::Right,
            (false, false) => Align::None,
        })
    }

    fn style(self) -> &'static str {
        match self {
            Align::None => "",
            Align::Left => " style=\"text-align: left\"",
            Align::Center => " style=\"text-align: center\"",
            Align::Right => " style=\"text-align: right\"",
        }
    }
}

/// A pipe table that starts with its separator row:
///
/// ```text
/// | :---: | ---: |
/// | Name  | Qty  |
/// | apple | 3    |
/// ```
///
/// The row after the separator is the header; the rows after that, up to the
/// first line not starting with `|`, are the body.
pub struct Table;

impl Table {
    pub const PIPE: char = '|';
    pub const PRIORITY: i32 = 70;

    pub fn matches(line: &str) -> bool {
        Self::separator(line).is_some()
    }

    fn is_row(line: &str) -> bool {
        line.trim_start().starts_with(Self::PIPE)
    }

    /// Cells of a row, trimmed. `\|` stands for a literal pipe.
    pub fn cells(line: &str) -> Vec<String> {
        let t = line.trim();
        let t = t.strip_prefix(Self::PIPE).unwrap_or(t);
        let t = match t.strip_suffix(Self::PIPE) {
            Some(inner) if !inner.ends_with('\\') => inner,
            _ => t,
        };

        let mut cells = vec![];
        let mut cell = String::new();
        let mut chars = t.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&Self::PIPE) => {
                    cell.push(Self::PIPE);
                    chars.next();
                }
                Self::PIPE => cells.push(std::mem::take(&mut cell).trim().to_string()),
                c => cell.push(c),
            }
        }
        cells.push(cell.trim().to_string());
        cells
    }

    pub fn separator(line: &str) -> Option<Vec<Align>> {
        if !Self::is_row(line) {
            return None;
        }
        Self::cells(line)
            .iter()
            .map(|cell| Align::from_cell(cell))
            .collect()
    }

    fn render_row(tag: &str, cells: &[String], aligns: &[Align]) -> String {
        let mut html = String::from("<tr>");
        for (i, align) in aligns.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            html.push_str(&format!(
                "<{tag}{}>{}</{tag}>",
                align.style(),
                render_inline(cell)
            ));
        }
        html.push_str("</tr>");
        html
    }

    pub fn parse(
        lines: &[String],
        start: usize,
        _scope: &mut Scope<'_>,
    ) -> Option<MultiLineParseResult> {
        let aligns = Self::separator(&lines[start])?;
        let header_line = lines.get(start + 1)?;
        if !Self::is_row(header_line) {
            return None;
        }

        let header = Self::cells(header_line);
        // Rows are padded or cut to the header width.
        let aligns: Vec<Align> = (0..header.len())
            .map(|i| aligns.get(i).copied().unwrap_or(Align::None))
            .collect();

        let mut end = start + 1;
        let mut body = String::new();
        while let Some(line) = lines.get(end + 1).filter(|l| Self::is_row(l)) {
            body.push_str(&Self::render_row("td", &Self::cells(line), &aligns));
            end += 1;
        }

        let html = format!(
            "<table class=\"pmd-table\"><thead>{}</thead><tbody>{body}</tbody></table>",
            Self::render_row("th", &header, &aligns)
        );
        Some(MultiLineParseResult {
            html,
            end_index: end,
        })
    }
}

pub fn module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::Table,
        name: ModuleKind::Table.name(),
        priority: Table::PRIORITY,
        matches: Table::matches,
        rule: Rule::MultiLine(Table::parse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParseContext, Parser};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn run(src: &[&str]) -> Option<MultiLineParseResult> {
        let lines: Vec<String> = src.iter().map(|s| s.to_string()).collect();
        let parser = Parser::default();
        let mut ctx = ParseContext::new();
        let mut scope = Scope::new(&parser, &mut ctx);
        Table::parse(&lines, 0, &mut scope)
    }

    #[test]
    fn centred_single_column() {
        let result = run(&["| :---: |", "| H |", "| a |"]).unwrap();
        assert_eq!(result.end_index, 2);
        assert_eq!(
            result.html,
            concat!(
                r#"<table class="pmd-table"><thead><tr><th style="text-align: center">H</th></tr></thead>"#,
                r#"<tbody><tr><td style="text-align: center">a</td></tr></tbody></table>"#
            )
        );
    }

    #[test]
    fn rows_are_padded_and_truncated() {
        let result = run(&["| --- | --- |", "| a | b |", "| 1 |", "| 1 | 2 | 3 |", "after"]).unwrap();
        assert_eq!(result.end_index, 3);
        assert!(result.html.contains("<tr><td>1</td><td></td></tr>"));
        assert!(result.html.contains("<tr><td>1</td><td>2</td></tr>"));
        assert!(!result.html.contains("3"));
    }

    #[test]
    fn header_only_table() {
        let result = run(&["| ---: |", "| H |"]).unwrap();
        assert_eq!(result.end_index, 1);
        assert!(result.html.ends_with("<tbody></tbody></table>"));
    }

    #[test]
    fn missing_header_declines() {
        assert_eq!(run(&["| --- |"]), None);
        assert_eq!(run(&["| --- |", "text"]), None);
    }

    #[test]
    fn cell_content_is_inline_rendered() {
        let result = run(&["| --- |", "| **H** |"]).unwrap();
        assert!(result.html.contains("<th><strong>H</strong></th>"));
    }

    #[rstest]
    #[case("| :--- | ---: | --- |", Some(vec![Align::Left, Align::Right, Align::None]))]
    #[case("|:---:|", Some(vec![Align::Center]))]
    #[case("| -- |", None)]
    #[case("| a |", None)]
    #[case(":---:", None)]
    fn separators(#[case] line: &str, #[case] expected: Option<Vec<Align>>) {
        assert_eq!(Table::separator(line), expected);
    }

    #[test]
    fn escaped_pipes() {
        assert_eq!(Table::cells(r"| a \| b | c |"), vec!["a | b", "c"]);
        assert_eq!(Table::cells(r"| x \|"), vec!["x |"]);
    }
}
