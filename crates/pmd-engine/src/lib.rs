//! # pmd-engine
//!
//! Compiles PMD markup to HTML.
//!
//! ```
//! let html = pmd_engine::parse("# Title\n\nSome **bold** text\n");
//! assert!(html.contains(r#"<h1 class="pmd-h1">Title</h1>"#));
//! assert!(html.contains("<strong>bold</strong>"));
//! ```
//!
//! See [`parsing`] for the pipeline and [`parsing::kinds`] for the grammar
//! modules.

pub mod error;
pub mod options;
pub mod parsing;

pub use error::{EngineError, RegistryError};
pub use options::{DEFAULT_MAX_DEPTH, ParseOptions};
pub use parsing::{
    Parser, parse,
    context::{ParseContext, Scope},
    fragment::{MultiLineParseResult, ParseResult},
    registry::{GrammarModule, ModuleKind, ModuleSet, Registry, Rule},
};
