use crate::parsing::{
    context::Scope,
    fragment::ParseResult,
    lines::is_blank,
    registry::{GrammarModule, ModuleKind, Rule},
};

pub struct EmptyLine;

impl EmptyLine {
    pub const PRIORITY: i32 = 5;

    pub fn parse(_line: &str, _scope: &mut Scope<'_>) -> Option<ParseResult> {
        Some(ParseResult::Blank)
    }
}

pub fn module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::EmptyLine,
        name: ModuleKind::EmptyLine.name(),
        priority: EmptyLine::PRIORITY,
        matches: is_blank,
        rule: Rule::SingleLine(EmptyLine::parse),
    }
}
