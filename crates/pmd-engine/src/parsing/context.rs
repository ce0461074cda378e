use super::{Parser, placeholder::PlaceholderTable, registry::ModuleSet};
use crate::{error::EngineError, options::ParseOptions};

/// State shared by every pass of one top-level parse.
#[derive(Debug, Default)]
pub struct ParseContext {
    pub placeholders: PlaceholderTable,
    /// Current nesting depth; 0 for the top-level pass.
    pub depth: usize,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What a grammar module sees while it runs: the parser, the shared context
/// and the set of modules hidden from this pass.
pub struct Scope<'a> {
    pub(crate) parser: &'a Parser,
    pub(crate) ctx: &'a mut ParseContext,
    pub(crate) excluded: ModuleSet,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(parser: &'a Parser, ctx: &'a mut ParseContext) -> Self {
        Self {
            parser,
            ctx,
            excluded: ModuleSet::EMPTY,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        self.parser.options()
    }

    pub fn depth(&self) -> usize {
        self.ctx.depth
    }

    /// Modules hidden from this pass.
    pub fn excluded(&self) -> ModuleSet {
        self.excluded
    }

    /// Runs the full pipeline over `content` one level deeper, with
    /// `exclude` hidden on top of what is already hidden here.
    ///
    /// Placeholders created by the nested pass land in the shared table and
    /// are resolved in the returned HTML.
    pub fn render_nested(
        &mut self,
        content: &str,
        exclude: ModuleSet,
    ) -> Result<String, EngineError> {
        let limit = self.parser.options().max_depth;
        let depth = self.ctx.depth + 1;
        if depth > limit {
            log::warn!("nesting limit of {limit} reached, block skipped");
            return Err(EngineError::TooDeeplyNested { limit });
        }

        self.ctx.depth = depth;
        let html = {
            let mut nested = Scope {
                parser: self.parser,
                ctx: &mut *self.ctx,
                excluded: self.excluded.union(exclude),
            };
            nested.run(content)
        };
        self.ctx.depth = depth - 1;
        Ok(html)
    }
}
