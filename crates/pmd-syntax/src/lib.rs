//! # pmd-syntax
//!
//! Syntax-level building blocks for the PMD markup dialect that do not depend
//! on the block dispatcher:
//!
//! - [`token`]: a lossless, context-free [Logos] tokenizer producing the PMD
//!   token classes (heading markers, thematic breaks, notification
//!   delimiters, text, whitespace, newlines, end of input).
//! - [`lang`]: the `lang[key="value", ...]` mini-grammar used by the engine's
//!   inline renderer.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Quick Start
//!
//! ```
//! use pmd_syntax::lang;
//!
//! let pairs = lang::parse(r#"lang[en="Hello", fr="Bonjour"]"#).unwrap();
//! assert_eq!(pairs.get("fr"), Some("Bonjour"));
//!
//! assert!(lang::parse(r#"lang[en="Hello""#).is_err());
//! ```

pub mod lang;
pub mod token;

pub use lang::{LangPairSet, SyntaxError};
pub use token::{Token, TokenKind, tokenize};
