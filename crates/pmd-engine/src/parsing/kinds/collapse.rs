use crate::parsing::{
    context::Scope,
    fragment::MultiLineParseResult,
    inline::render_inline,
    registry::{GrammarModule, ModuleKind, ModuleSet, Rule},
};

/// `(summary)[body]^`, on one line or with the body spread over following
/// lines up to a line ending in `]^`. Collapses may nest.
pub struct CollapseBlock;

impl CollapseBlock {
    pub const SEPARATOR: &'static str = ")[";
    pub const CLOSE: &'static str = "]^";
    pub const PRIORITY: i32 = 80;

    pub fn matches(line: &str) -> bool {
        Self::header(line).is_some()
    }

    /// Summary and the text after `)[`.
    pub fn header(line: &str) -> Option<(&str, &str)> {
        let inner = line.trim().strip_prefix('(')?;
        let sep = inner.find(Self::SEPARATOR)?;
        Some((&inner[..sep], &inner[sep + Self::SEPARATOR.len()..]))
    }

    /// Finds the line closing the collapse opened at `start`, counting
    /// collapses opened in between.
    fn closing_line(lines: &[String], start: usize) -> Option<usize> {
        let mut open = 1usize;
        for (j, line) in lines.iter().enumerate().skip(start + 1) {
            let t = line.trim_end();
            match (Self::header(t).is_some(), t.ends_with(Self::CLOSE)) {
                (true, false) => open += 1,
                (false, true) => {
                    open -= 1;
                    if open == 0 {
                        return Some(j);
                    }
                }
                _ => {}
            }
        }
        None
    }

    pub fn render(summary: &str, body: &str, scope: &mut Scope<'_>) -> String {
        match scope.render_nested(body, ModuleSet::EMPTY) {
            Ok(content) => format!(
                "<div class=\"pmd-collapse\"><div class=\"pmd-collapse-header\" onclick=\"pmdToggleCollapse(this)\">{}</div><div class=\"pmd-collapse-body\">{content}</div></div>",
                render_inline(summary.trim())
            ),
            Err(e) => e.to_html(),
        }
    }

    pub fn parse(
        lines: &[String],
        start: usize,
        scope: &mut Scope<'_>,
    ) -> Option<MultiLineParseResult> {
        let (summary, after) = Self::header(&lines[start])?;
        if let Some(body) = after.strip_suffix(Self::CLOSE) {
            return Some(MultiLineParseResult {
                html: Self::render(summary, body.trim(), scope),
                end_index: start,
            });
        }

        let end = Self::closing_line(lines, start)?;
        let mut body = Vec::with_capacity(end - start + 1);
        if !after.trim().is_empty() {
            body.push(after.to_string());
        }
        body.extend(lines[start + 1..end].iter().cloned());
        let last = lines[end].trim_end();
        let last = &last[..last.len() - Self::CLOSE.len()];
        if !last.trim().is_empty() {
            body.push(last.to_string());
        }

        Some(MultiLineParseResult {
            html: Self::render(summary, &body.join("\n"), scope),
            end_index: end,
        })
    }
}

pub fn module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::CollapseBlock,
        name: ModuleKind::CollapseBlock.name(),
        priority: CollapseBlock::PRIORITY,
        matches: CollapseBlock::matches,
        rule: Rule::MultiLine(CollapseBlock::parse),
    }
}
