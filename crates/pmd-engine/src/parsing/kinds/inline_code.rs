use super::paragraph::Paragraph;
use crate::parsing::{
    context::Scope,
    fragment::ParseResult,
    inline::has_code_span,
    registry::{GrammarModule, ModuleKind, Rule},
};

/// A line holding at least one `` `code` `` span.
pub struct InlineCode;

impl InlineCode {
    pub const PRIORITY: i32 = 20;

    pub fn matches(line: &str) -> bool {
        !Paragraph::is_html_line(line) && has_code_span(line)
    }

    pub fn parse(line: &str, _scope: &mut Scope<'_>) -> Option<ParseResult> {
        Some(Paragraph::render(line))
    }
}

pub fn module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::InlineCode,
        name: ModuleKind::InlineCode.name(),
        priority: InlineCode::PRIORITY,
        matches: InlineCode::matches,
        rule: Rule::SingleLine(InlineCode::parse),
    }
}
