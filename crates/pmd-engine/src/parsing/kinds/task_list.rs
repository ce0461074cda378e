use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::{
    context::Scope,
    fragment::MultiLineParseResult,
    inline::render_inline,
    registry::{GrammarModule, ModuleKind, Rule},
};

fn task_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*[-*+]\s+\[([ xX])\](?:\s+(.*))?$").expect("Invalid task item regex")
    })
}

/// Consecutive `- [ ]` / `- [x]` lines.
pub struct TaskList;

impl TaskList {
    pub const PRIORITY: i32 = 50;

    /// Whether the box is ticked, and the item text.
    pub fn item(line: &str) -> Option<(bool, &str)> {
        let caps = task_item().captures(line)?;
        let done = !caps.get(1)?.as_str().trim().is_empty();
        let text = caps.get(2).map_or("", |m| m.as_str());
        Some((done, text))
    }

    pub fn matches(line: &str) -> bool {
        task_item().is_match(line)
    }

    fn render_item(done: bool, text: &str) -> String {
        if done {
            format!(
                "<li class=\"pmd-task pmd-task-done\"><input type=\"checkbox\" disabled checked> {}</li>",
                render_inline(text.trim())
            )
        } else {
            format!(
                "<li class=\"pmd-task\"><input type=\"checkbox\" disabled> {}</li>",
                render_inline(text.trim())
            )
        }
    }

    pub fn parse(
        lines: &[String],
        start: usize,
        _scope: &mut Scope<'_>,
    ) -> Option<MultiLineParseResult> {
        let mut html = String::from("<ul class=\"pmd-task-list\">");
        let mut end = None;
        for (j, line) in lines.iter().enumerate().skip(start) {
            let Some((done, text)) = Self::item(line) else {
                break;
            };
            html.push_str(&Self::render_item(done, text));
            end = Some(j);
        }
        html.push_str("</ul>");
        Some(MultiLineParseResult {
            html,
            end_index: end?,
        })
    }
}

pub fn module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::TaskList,
        name: ModuleKind::TaskList.name(),
        priority: TaskList::PRIORITY,
        matches: TaskList::matches,
        rule: Rule::MultiLine(TaskList::parse),
    }
}
