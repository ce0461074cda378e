//! # `lang[...]` Mini-grammar
//!
//! Inline multi-language tags:
//!
//! ```text
//! lang[en="Hello", zh="你好"]
//! ```
//!
//! Grammar:
//!
//! ```text
//! tag   := "lang" "[" pair+ "]"
//! pair  := ident "=" string ","?
//! ident := ([A-Za-z0-9_] | CJK ideograph)+
//! ```
//!
//! Two stages: [`lexer::LangLexer`] produces tokens on demand and the
//! recursive-descent parser in [`parser`] consumes them. A tag either parses
//! completely or fails with a [`SyntaxError`]; there are no partial results.

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::SyntaxError;
pub use parser::{LangPairSet, parse, parse_prefix};
