//! # Parsing Pipeline
//!
//! Each pass over a piece of PMD source runs five steps:
//!
//! 1. **Raw extraction.** Closed `<!` ... `!>` spans become placeholder ids
//!    ([`placeholder`]).
//! 2. **Dispatch.** Lines are offered to the grammar modules in priority order
//!    ([`registry`], [`kinds`]). The first rule that accepts a line produces a
//!    fragment and says how many lines it consumed.
//! 3. **Assembly.** Fragments are joined ([`fragment::assemble`]).
//! 4. **Restoration.** Placeholder ids are swapped back for their HTML.
//! 5. **Wrapping.** The body goes into a `pmd-content` div.
//!
//! Collapse and notification bodies re-enter the pipeline through
//! [`Scope::render_nested`](context::Scope::render_nested), one level deeper,
//! sharing the placeholder table of the top-level pass.
//!
//! A [`Parser`] holds no per-call state and can be shared across threads.

pub mod context;
pub mod dispatch;
pub mod fragment;
pub mod inline;
pub mod kinds;
pub mod lines;
pub mod placeholder;
pub mod registry;

#[cfg(test)]
mod tests;

use std::sync::OnceLock;

use crate::options::ParseOptions;
use context::{ParseContext, Scope};
use registry::Registry;

/// A configured PMD compiler.
#[derive(Debug, Clone)]
pub struct Parser {
    registry: Registry,
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        let registry = Registry::discover(&options);
        log::debug!("parser ready with {} grammar modules", registry.len());
        Self { registry, options }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Compiles `content` to HTML. Never fails: malformed constructs fall
    /// through to lower-priority modules.
    pub fn parse(&self, content: &str) -> String {
        let mut ctx = ParseContext::new();
        self.parse_in(content, &mut ctx)
    }

    /// Like [`Parser::parse`], with caller-owned state. `ctx` should be fresh;
    /// its placeholder table is empty again when this returns.
    pub fn parse_in(&self, content: &str, ctx: &mut ParseContext) -> String {
        Scope::new(self, ctx).run(content)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

/// Compiles `content` with default options.
pub fn parse(content: &str) -> String {
    static DEFAULT: OnceLock<Parser> = OnceLock::new();
    DEFAULT.get_or_init(Parser::default).parse(content)
}
