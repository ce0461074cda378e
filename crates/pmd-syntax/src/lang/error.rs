/// Why a `lang[...]` tag was rejected.
///
/// Offsets are byte positions in the text handed to the parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("expected `lang` keyword at byte {offset}")]
    MissingKeyword { offset: usize },

    #[error("expected `[` after `lang` at byte {offset}")]
    MissingOpenBracket { offset: usize },

    #[error("malformed language identifier at byte {offset}")]
    MalformedIdentifier { offset: usize },

    #[error("expected `=` after `{key}` at byte {offset}")]
    MissingEquals { key: String, offset: usize },

    #[error("expected a string literal for `{key}` at byte {offset}")]
    ExpectedString { key: String, offset: usize },

    #[error("unterminated string literal starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("missing closing `]` at byte {offset}")]
    MissingCloseBracket { offset: usize },

    #[error("unexpected input after `]` at byte {offset}")]
    TrailingInput { offset: usize },
}

impl SyntaxError {
    /// Byte offset where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            SyntaxError::MissingKeyword { offset }
            | SyntaxError::MissingOpenBracket { offset }
            | SyntaxError::MalformedIdentifier { offset }
            | SyntaxError::MissingEquals { offset, .. }
            | SyntaxError::ExpectedString { offset, .. }
            | SyntaxError::UnterminatedString { offset }
            | SyntaxError::MissingCloseBracket { offset }
            | SyntaxError::TrailingInput { offset } => *offset,
        }
    }
}
