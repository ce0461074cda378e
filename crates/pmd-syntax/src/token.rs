//! # Token Model
//!
//! A standalone, context-free tokenizer for PMD source built on [Logos].
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte of the input appears in exactly one token; concatenating the
//! token texts gives back the source:
//!
//! ```
//! use pmd_syntax::token::tokenize;
//!
//! let input = "# Hello\n(:: note ::)\n";
//! let tokens = tokenize(input);
//! let rebuilt: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, rebuilt);
//! ```
//!
//! The stream always ends with a single [`TokenKind::Eof`] token whose text is
//! empty and whose offset is the input length.
//!
//! ## Why Two Token Enums?
//!
//! Logos needs its own enum for `#[derive(Logos)]` ([`RawKind`]); the public
//! [`TokenKind`] adds [`TokenKind::Eof`], which Logos never produces, and folds
//! stray punctuation into [`TokenKind::Text`].
//!
//! The block dispatcher in `pmd-engine` is line based and does not consume
//! these tokens. The tokenizer exists for tooling (`pmd-cli --tokens`).

use logos::Logos;

/// Token classes produced by [`tokenize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of `#`; the token's `level` is the run length.
    HeadingMarker,
    /// A run of three or more `-`, `=` or `·`.
    ThematicBreak,
    /// `(::` or `[::`
    NotificationOpen,
    /// `::)` or `::]`
    NotificationClose,
    Text,
    /// Horizontal whitespace (spaces, tabs)
    Whitespace,
    /// Line ending (LF, CRLF or a lone CR)
    Newline,
    /// End of input. Always the last token, always empty.
    Eof,
}

/// Logos-facing token kinds.
///
/// `Punct` covers single characters that only carry meaning as part of a
/// longer delimiter; it is reported as [`TokenKind::Text`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    #[regex(r"#+")]
    HeadingMarker,

    #[regex(r"-{3,}|={3,}|(·){3,}")]
    ThematicBreak,

    #[token("(::")]
    #[token("[::")]
    NotificationOpen,

    #[token("::)")]
    #[token("::]")]
    NotificationClose,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"\r\n|\n|\r")]
    Newline,

    #[regex(r"[=\-()\[\]:·]")]
    Punct,

    /// Anything not matched by other rules
    #[regex(r"[^ \t\r\n#=\-()\[\]:·]+")]
    Text,
}

impl RawKind {
    /// Convert to the public [`TokenKind`].
    pub fn to_token_kind(self) -> TokenKind {
        match self {
            RawKind::HeadingMarker => TokenKind::HeadingMarker,
            RawKind::ThematicBreak => TokenKind::ThematicBreak,
            RawKind::NotificationOpen => TokenKind::NotificationOpen,
            RawKind::NotificationClose => TokenKind::NotificationClose,
            RawKind::Whitespace => TokenKind::Whitespace,
            RawKind::Newline => TokenKind::Newline,
            RawKind::Punct | RawKind::Text => TokenKind::Text,
        }
    }
}

/// A token with its class, source text and byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of `text` in the input.
    pub offset: usize,
    /// Heading depth for [`TokenKind::HeadingMarker`], `None` otherwise.
    pub level: Option<u8>,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, text: &'a str, offset: usize) -> Self {
        let level = match kind {
            TokenKind::HeadingMarker => Some(u8::try_from(text.len()).unwrap_or(u8::MAX)),
            _ => None,
        };
        Self {
            kind,
            text,
            offset,
            level,
        }
    }

    /// Byte range of the token in the input.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.text.len()
    }
}

/// Tokenize the input, terminating the stream with [`TokenKind::Eof`].
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = RawKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(raw) => raw.to_token_kind(),
            // Every character is covered by some rule; keep the bytes anyway.
            Err(()) => TokenKind::Text,
        };
        tokens.push(Token::new(kind, lexer.slice(), span.start));
    }

    tokens.push(Token::new(TokenKind::Eof, "", input.len()));
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_input_is_just_eof() {
        let tokens = tokenize("");
        assert_eq!(tokens, vec![Token::new(TokenKind::Eof, "", 0)]);
    }

    #[test]
    fn heading_marker_carries_level() {
        let tokens = tokenize("### Title");
        assert_eq!(tokens[0].kind, TokenKind::HeadingMarker);
        assert_eq!(tokens[0].level, Some(3));
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[2].kind, TokenKind::Text);
        assert_eq!(tokens[2].text, "Title");
        assert_eq!(tokens[2].level, None);
    }

    #[test]
    fn thematic_break_variants() {
        assert_eq!(kinds("---"), vec![TokenKind::ThematicBreak, TokenKind::Eof]);
        assert_eq!(kinds("====="), vec![TokenKind::ThematicBreak, TokenKind::Eof]);
        assert_eq!(kinds("···"), vec![TokenKind::ThematicBreak, TokenKind::Eof]);
    }

    #[test]
    fn notification_delimiters() {
        assert_eq!(
            kinds("(:: hi ::)"),
            vec![
                TokenKind::NotificationOpen,
                TokenKind::Whitespace,
                TokenKind::Text,
                TokenKind::Whitespace,
                TokenKind::NotificationClose,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("[::x::]"),
            vec![
                TokenKind::NotificationOpen,
                TokenKind::Text,
                TokenKind::NotificationClose,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn newlines_lf_and_crlf() {
        let tokens = tokenize("a\r\nb\n");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[1].text, "\r\n");
        assert_eq!(tokens[3].kind, TokenKind::Newline);
        assert_eq!(tokens[3].text, "\n");
    }

    #[test]
    fn offsets_match_source() {
        let input = "## Head\n(:: note ::)\n---\n";
        for token in tokenize(input) {
            assert_eq!(token.text, &input[token.span()]);
        }
    }

    #[test]
    fn eof_offset_is_input_length() {
        let input = "text";
        let tokens = tokenize(input);
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Eof);
        assert_eq!(last.offset, input.len());
    }

    #[test]
    fn all_bytes_preserved() {
        let input = "# Title\n\n(::> #ff0000 careful ::)\n[:: box ::]\n=== caption ===\n| :---: |\n";
        let rebuilt: String = tokenize(input).iter().map(|t| t.text).collect();
        assert_eq!(input, rebuilt);
    }
}
