//! Ordered (`1.`, `1.2`, `2·`) and unordered (`-`, `*`, `+`) lists.
//!
//! Consecutive item lines form one list. Each item has a level; items are
//! folded into a [`ListNode`] tree and rendered as nested lists.

use std::sync::OnceLock;

use regex::Regex;

use super::task_list::TaskList;
use crate::parsing::{
    context::Scope,
    fragment::MultiLineParseResult,
    inline::render_inline,
    registry::{GrammarModule, ModuleKind, Rule},
};

fn ordered_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\d+(?:\.\d+)*)[.·]?\s+(.*)$").expect("Invalid ordered item regex")
    })
}

fn unordered_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([ \t]*)[-*+]\s+(.*)$").expect("Invalid unordered item regex"))
}

/// One list item and the items nested under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListNode {
    /// Rendered inline HTML. Empty for parents synthesised to bridge a jump
    /// of more than one level.
    pub content: String,
    pub children: Vec<ListNode>,
}

impl ListNode {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            children: vec![],
        }
    }

    /// Folds `(level, content)` items, levels starting at 1, into a forest.
    ///
    /// An item deeper than its predecessor nests under it; missing levels in
    /// between get empty parents.
    pub fn build(items: impl IntoIterator<Item = (usize, String)>) -> Vec<ListNode> {
        let mut roots: Vec<ListNode> = vec![];
        for (level, content) in items {
            let mut siblings = &mut roots;
            for _ in 1..level.max(1) {
                if siblings.is_empty() {
                    siblings.push(ListNode::default());
                }
                let last = siblings.len() - 1;
                siblings = &mut siblings[last].children;
            }
            siblings.push(ListNode::new(content));
        }
        roots
    }

    /// Renders a forest as nested lists, opening each with `open_tag`.
    pub fn render(nodes: &[ListNode], open_tag: &str, close_tag: &str) -> String {
        let mut html = String::from(open_tag);
        for node in nodes {
            html.push_str("<li>");
            html.push_str(&node.content);
            if !node.children.is_empty() {
                html.push_str(&Self::render(&node.children, open_tag, close_tag));
            }
            html.push_str("</li>");
        }
        html.push_str(close_tag);
        html
    }
}

/// Collects consecutive items from `start` with `item`, then renders them.
///
/// Levels are capped at the scope's nesting limit; deeper items become
/// siblings at the deepest allowed level.
fn collect_list(
    lines: &[String],
    start: usize,
    item: fn(&str) -> Option<(usize, &str)>,
    tags: (&str, &str),
    scope: &Scope<'_>,
) -> Option<MultiLineParseResult> {
    let max_level = scope.options().max_depth.max(1);
    let mut items = vec![];
    let mut end = start;
    for (j, line) in lines.iter().enumerate().skip(start) {
        let Some((level, text)) = item(line) else {
            break;
        };
        if level > max_level {
            log::debug!("list item at level {level} capped to {max_level}");
        }
        items.push((level.min(max_level), render_inline(text.trim())));
        end = j;
    }
    if items.is_empty() {
        return None;
    }
    Some(MultiLineParseResult {
        html: ListNode::render(&ListNode::build(items), tags.0, tags.1),
        end_index: end,
    })
}

pub struct OrderedList;

impl OrderedList {
    pub const PRIORITY: i32 = 45;
    const OPEN: &'static str = "<ol class=\"pmd-ol\">";
    const CLOSE: &'static str = "</ol>";

    /// Level (number of dotted segments) and text of an item line.
    pub fn item(line: &str) -> Option<(usize, &str)> {
        let caps = ordered_item().captures(line)?;
        let level = caps.get(1)?.as_str().split('.').count();
        Some((level, caps.get(2)?.as_str()))
    }

    pub fn matches(line: &str) -> bool {
        ordered_item().is_match(line)
    }

    pub fn parse(
        lines: &[String],
        start: usize,
        scope: &mut Scope<'_>,
    ) -> Option<MultiLineParseResult> {
        collect_list(lines, start, Self::item, (Self::OPEN, Self::CLOSE), scope)
    }
}

pub struct UnorderedList;

impl UnorderedList {
    pub const PRIORITY: i32 = 40;
    /// Indent width, in columns, of one nesting level. A tab counts as one
    /// level.
    pub const INDENT: usize = 2;
    const OPEN: &'static str = "<ul class=\"pmd-ul\">";
    const CLOSE: &'static str = "</ul>";

    /// Level (from indentation) and text of a bullet line that is not a task.
    pub fn item(line: &str) -> Option<(usize, &str)> {
        if TaskList::item(line).is_some() {
            return None;
        }
        let caps = unordered_item().captures(line)?;
        let indent: usize = caps
            .get(1)?
            .as_str()
            .chars()
            .map(|c| if c == '\t' { Self::INDENT } else { 1 })
            .sum();
        Some((indent / Self::INDENT + 1, caps.get(2)?.as_str()))
    }

    pub fn matches(line: &str) -> bool {
        Self::item(line).is_some()
    }

    pub fn parse(
        lines: &[String],
        start: usize,
        scope: &mut Scope<'_>,
    ) -> Option<MultiLineParseResult> {
        collect_list(lines, start, Self::item, (Self::OPEN, Self::CLOSE), scope)
    }
}

pub fn ordered_module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::OrderedList,
        name: ModuleKind::OrderedList.name(),
        priority: OrderedList::PRIORITY,
        matches: OrderedList::matches,
        rule: Rule::MultiLine(OrderedList::parse),
    }
}

pub fn unordered_module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::UnorderedList,
        name: ModuleKind::UnorderedList.name(),
        priority: UnorderedList::PRIORITY,
        matches: UnorderedList::matches,
        rule: Rule::MultiLine(UnorderedList::parse),
    }
}
