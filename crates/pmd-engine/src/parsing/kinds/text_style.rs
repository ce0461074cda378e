use super::paragraph::Paragraph;
use crate::parsing::{
    context::Scope,
    fragment::ParseResult,
    inline::has_style,
    registry::{GrammarModule, ModuleKind, Rule},
};

/// A line with bold, italic or strikethrough markup.
pub struct TextStyle;

impl TextStyle {
    pub const PRIORITY: i32 = 15;

    pub fn matches(line: &str) -> bool {
        !Paragraph::is_html_line(line) && has_style(line)
    }

    pub fn parse(line: &str, _scope: &mut Scope<'_>) -> Option<ParseResult> {
        Some(Paragraph::render(line))
    }
}

pub fn module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::TextStyle,
        name: ModuleKind::TextStyle.name(),
        priority: TextStyle::PRIORITY,
        matches: TextStyle::matches,
        rule: Rule::SingleLine(TextStyle::parse),
    }
}
