use crate::parsing::{
    context::Scope,
    fragment::ParseResult,
    inline::render_inline,
    registry::{GrammarModule, ModuleKind, Rule},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakStyle {
    /// `---`
    Solid,
    /// `===`
    Double,
    /// `···`
    Dotted,
}

impl BreakStyle {
    pub fn marker(self) -> char {
        match self {
            BreakStyle::Solid => '-',
            BreakStyle::Double => '=',
            BreakStyle::Dotted => '·',
        }
    }

    fn class(self) -> &'static str {
        match self {
            BreakStyle::Solid => "pmd-hr-solid",
            BreakStyle::Double => "pmd-hr-double",
            BreakStyle::Dotted => "pmd-hr-dotted",
        }
    }
}

/// A horizontal rule, optionally with a caption: `--- Chapter 2 ---`.
pub struct ThematicBreak;

impl ThematicBreak {
    pub const MIN_RUN: usize = 3;
    pub const PRIORITY: i32 = 55;

    pub fn style(line: &str) -> Option<BreakStyle> {
        let t = line.trim_start();
        [BreakStyle::Solid, BreakStyle::Double, BreakStyle::Dotted]
            .into_iter()
            .find(|s| t.chars().take(Self::MIN_RUN).filter(|&c| c == s.marker()).count() == Self::MIN_RUN)
    }

    pub fn matches(line: &str) -> bool {
        Self::style(line).is_some()
    }

    pub fn parse(line: &str, _scope: &mut Scope<'_>) -> Option<ParseResult> {
        let style = Self::style(line)?;
        let marker = style.marker();
        let caption = line.trim().trim_matches(marker).trim();
        let html = if caption.is_empty() {
            format!("<hr class=\"pmd-hr {}\">", style.class())
        } else {
            format!(
                "<div class=\"pmd-hr {} pmd-hr-captioned\"><span class=\"pmd-hr-caption\">{}</span></div>",
                style.class(),
                render_inline(caption)
            )
        };
        Some(ParseResult::Html(html))
    }
}

pub fn module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::ThematicBreak,
        name: ModuleKind::ThematicBreak.name(),
        priority: ThematicBreak::PRIORITY,
        matches: ThematicBreak::matches,
        rule: Rule::SingleLine(ThematicBreak::parse),
    }
}
