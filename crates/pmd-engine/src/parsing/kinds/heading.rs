use crate::parsing::{
    context::Scope,
    fragment::ParseResult,
    inline::render_inline,
    registry::{GrammarModule, ModuleKind, Rule},
};

pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: usize = 3;
    pub const PRIORITY: i32 = 60;

    /// Level and title of `# `, `## ` or `### ` lines.
    pub fn level(line: &str) -> Option<(usize, &str)> {
        let t = line.trim();
        let level = t.chars().take_while(|&c| c == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL {
            return None;
        }
        let rest = &t[level..];
        if !rest.starts_with([' ', '\t']) {
            return None;
        }
        Some((level, rest.trim()))
    }

    pub fn matches(line: &str) -> bool {
        Self::level(line).is_some()
    }

    pub fn parse(line: &str, _scope: &mut Scope<'_>) -> Option<ParseResult> {
        let (n, title) = Self::level(line)?;
        Some(ParseResult::Html(format!(
            "<h{n} class=\"pmd-h{n}\">{}</h{n}>",
            render_inline(title)
        )))
    }
}

pub fn module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::Heading,
        name: ModuleKind::Heading.name(),
        priority: Heading::PRIORITY,
        matches: Heading::matches,
        rule: Rule::SingleLine(Heading::parse),
    }
}
