//! Grammar module descriptors and the priority-ordered registry.

use std::{cmp::Reverse, collections::HashSet, fmt};

use super::{
    context::Scope,
    fragment::{MultiLineParseResult, ParseResult},
    kinds,
};
use crate::{error::RegistryError, options::ParseOptions};

/// Cheap pre-check run before a rule.
pub type MatchFn = fn(&str) -> bool;
/// Rule that consumes exactly one line.
pub type LineFn = fn(&str, &mut Scope<'_>) -> Option<ParseResult>;
/// Rule that consumes `lines[start..=end_index]`.
pub type SpanFn = fn(&[String], usize, &mut Scope<'_>) -> Option<MultiLineParseResult>;

#[derive(Clone, Copy)]
pub enum Rule {
    SingleLine(LineFn),
    MultiLine(SpanFn),
}

/// Every built-in grammar module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    RawText,
    CodeBlock,
    RoundedNotification,
    SquareNotification,
    CollapseBlock,
    Table,
    Heading,
    ThematicBreak,
    TaskList,
    OrderedList,
    UnorderedList,
    InlineCode,
    TextStyle,
    EmptyLine,
    Paragraph,
}

impl ModuleKind {
    /// Discovery order.
    pub const ALL: [ModuleKind; 15] = [
        ModuleKind::RawText,
        ModuleKind::CodeBlock,
        ModuleKind::RoundedNotification,
        ModuleKind::SquareNotification,
        ModuleKind::CollapseBlock,
        ModuleKind::Table,
        ModuleKind::Heading,
        ModuleKind::ThematicBreak,
        ModuleKind::TaskList,
        ModuleKind::OrderedList,
        ModuleKind::UnorderedList,
        ModuleKind::InlineCode,
        ModuleKind::TextStyle,
        ModuleKind::EmptyLine,
        ModuleKind::Paragraph,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModuleKind::RawText => "raw_text",
            ModuleKind::CodeBlock => "code_block",
            ModuleKind::RoundedNotification => "rounded_notification",
            ModuleKind::SquareNotification => "square_notification",
            ModuleKind::CollapseBlock => "collapse_block",
            ModuleKind::Table => "table",
            ModuleKind::Heading => "heading",
            ModuleKind::ThematicBreak => "thematic_break",
            ModuleKind::TaskList => "task_list",
            ModuleKind::OrderedList => "ordered_list",
            ModuleKind::UnorderedList => "unordered_list",
            ModuleKind::InlineCode => "inline_code",
            ModuleKind::TextStyle => "text_style",
            ModuleKind::EmptyLine => "empty_line",
            ModuleKind::Paragraph => "paragraph",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The built-in descriptor for this kind.
    pub fn module(self) -> GrammarModule {
        match self {
            ModuleKind::RawText => kinds::raw_text::module(),
            ModuleKind::CodeBlock => kinds::code_block::module(),
            ModuleKind::RoundedNotification => kinds::notification::rounded_module(),
            ModuleKind::SquareNotification => kinds::notification::square_module(),
            ModuleKind::CollapseBlock => kinds::collapse::module(),
            ModuleKind::Table => kinds::table::module(),
            ModuleKind::Heading => kinds::heading::module(),
            ModuleKind::ThematicBreak => kinds::thematic_break::module(),
            ModuleKind::TaskList => kinds::task_list::module(),
            ModuleKind::OrderedList => kinds::lists::ordered_module(),
            ModuleKind::UnorderedList => kinds::lists::unordered_module(),
            ModuleKind::InlineCode => kinds::inline_code::module(),
            ModuleKind::TextStyle => kinds::text_style::module(),
            ModuleKind::EmptyLine => kinds::empty_line::module(),
            ModuleKind::Paragraph => kinds::paragraph::module(),
        }
    }

    const fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// A small set of [`ModuleKind`]s, used to hide modules from a nested pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleSet(u32);

impl ModuleSet {
    pub const EMPTY: ModuleSet = ModuleSet(0);

    pub const fn of(kinds: &[ModuleKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= kinds[i].bit();
            i += 1;
        }
        ModuleSet(bits)
    }

    pub fn contains(self, kind: ModuleKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn union(self, other: ModuleSet) -> Self {
        ModuleSet(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A grammar module: identity, priority and its rule.
#[derive(Clone, Copy)]
pub struct GrammarModule {
    pub kind: ModuleKind,
    pub name: &'static str,
    /// Higher runs first.
    pub priority: i32,
    pub matches: MatchFn,
    pub rule: Rule,
}

impl fmt::Debug for GrammarModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = match self.rule {
            Rule::SingleLine(_) => "single-line",
            Rule::MultiLine(_) => "multi-line",
        };
        f.debug_struct("GrammarModule")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("rule", &rule)
            .finish()
    }
}

/// Modules sorted by descending priority. Ties keep discovery order.
#[derive(Debug, Clone)]
pub struct Registry {
    modules: Vec<GrammarModule>,
}

impl Registry {
    /// Loads the built-in modules, minus the ones `options` disables.
    pub fn discover(options: &ParseOptions) -> Self {
        Self::from_modules(
            ModuleKind::ALL.into_iter().map(ModuleKind::module),
            &options.disabled_modules,
        )
    }

    /// Builds a registry from explicit candidates.
    ///
    /// Candidates that fail validation are logged and left out; the rest
    /// still load.
    pub fn from_modules(
        candidates: impl IntoIterator<Item = GrammarModule>,
        disabled: &[String],
    ) -> Self {
        let mut seen = HashSet::new();
        let mut modules = Vec::new();

        for module in candidates {
            if let Err(e) = validate(&module, &seen) {
                log::warn!("skipping grammar module: {e}");
                continue;
            }
            seen.insert(module.name);
            if disabled.iter().any(|name| name == module.name) {
                log::debug!("grammar module `{}` disabled", module.name);
                continue;
            }
            modules.push(module);
        }

        for name in disabled {
            if !seen.contains(name.as_str()) {
                log::warn!("cannot disable: {}", RegistryError::UnknownModule(name.clone()));
            }
        }

        modules.sort_by_key(|m| Reverse(m.priority));
        Self { modules }
    }

    pub fn modules(&self) -> &[GrammarModule] {
        &self.modules
    }

    pub fn get(&self, name: &str) -> Option<&GrammarModule> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn by_kind(&self, kind: ModuleKind) -> Option<&GrammarModule> {
        self.modules.iter().find(|m| m.kind == kind)
    }

    /// Modules visible once `excluded` is hidden, in priority order.
    pub fn view(&self, excluded: ModuleSet) -> impl Iterator<Item = &GrammarModule> {
        self.modules
            .iter()
            .filter(move |m| !excluded.contains(m.kind))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::discover(&ParseOptions::default())
    }
}

fn validate(module: &GrammarModule, seen: &HashSet<&str>) -> Result<(), RegistryError> {
    if module.name.trim().is_empty() {
        return Err(RegistryError::EmptyName);
    }
    if seen.contains(module.name) {
        return Err(RegistryError::DuplicateName(module.name.to_string()));
    }
    Ok(())
}
