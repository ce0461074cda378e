use super::error::SyntaxError;

/// Token classes of the `lang[...]` mini-grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LangTokenKind {
    /// The `lang` keyword.
    Lang,
    Ident(String),
    /// A cooked string literal (escapes already applied).
    Str(String),
    LBracket,
    RBracket,
    Eq,
    Comma,
    /// A character with no meaning in the grammar. The parser decides which
    /// error it causes.
    Unknown(char),
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangToken {
    pub kind: LangTokenKind,
    /// Byte offset of the first character of the token.
    pub offset: usize,
}

/// Lazy lexer: tokens are produced on demand so that text after the closing
/// `]` is never examined.
#[derive(Clone)]
pub struct LangLexer<'a> {
    src: &'a str,
    i: usize,
}

impl<'a> LangLexer<'a> {
    pub const KEYWORD: &'static str = "lang";

    pub fn new(src: &'a str) -> Self {
        Self { src, i: 0 }
    }

    /// Current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.i..].chars().next()
    }

    fn bump_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.i += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if !c.is_whitespace() {
                break;
            }
            self.i += c.len_utf8();
        }
    }

    /// Produces the next token.
    pub fn next_token(&mut self) -> Result<LangToken, SyntaxError> {
        self.skip_whitespace();
        let offset = self.i;
        let Some(c) = self.bump_char() else {
            return Ok(LangToken {
                kind: LangTokenKind::Eof,
                offset,
            });
        };

        let kind = match c {
            '[' => LangTokenKind::LBracket,
            ']' => LangTokenKind::RBracket,
            '=' => LangTokenKind::Eq,
            ',' => LangTokenKind::Comma,
            '"' => LangTokenKind::Str(self.string_body(offset)?),
            c if is_ident_char(c) => {
                while let Some(next) = self.peek_char() {
                    if !is_ident_char(next) {
                        break;
                    }
                    self.i += next.len_utf8();
                }
                let word = &self.src[offset..self.i];
                if word == Self::KEYWORD {
                    LangTokenKind::Lang
                } else {
                    LangTokenKind::Ident(word.to_string())
                }
            }
            other => LangTokenKind::Unknown(other),
        };

        Ok(LangToken { kind, offset })
    }

    /// Reads a string literal after its opening quote.
    fn string_body(&mut self, start: usize) -> Result<String, SyntaxError> {
        let mut out = String::new();
        loop {
            match self.bump_char() {
                None => return Err(SyntaxError::UnterminatedString { offset: start }),
                Some('"') => return Ok(out),
                Some('\\') => match self.bump_char() {
                    None => return Err(SyntaxError::UnterminatedString { offset: start }),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                },
                Some(c) => out.push(c),
            }
        }
    }
}

/// `[A-Za-z0-9_]` or a CJK ideograph.
pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || is_cjk_ideograph(c)
}

fn is_cjk_ideograph(c: char) -> bool {
    matches!(c,
        '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2FA1F}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(src: &str) -> Vec<LangTokenKind> {
        let mut lexer = LangLexer::new(src);
        let mut out = vec![];
        loop {
            let token = lexer.next_token().unwrap();
            let done = token.kind == LangTokenKind::Eof;
            out.push(token.kind);
            if done {
                return out;
            }
        }
    }

    #[test]
    fn lexes_full_tag() {
        assert_eq!(
            kinds(r#"lang[en="Hi", zh="你好"]"#),
            vec![
                LangTokenKind::Lang,
                LangTokenKind::LBracket,
                LangTokenKind::Ident("en".into()),
                LangTokenKind::Eq,
                LangTokenKind::Str("Hi".into()),
                LangTokenKind::Comma,
                LangTokenKind::Ident("zh".into()),
                LangTokenKind::Eq,
                LangTokenKind::Str("你好".into()),
                LangTokenKind::RBracket,
                LangTokenKind::Eof,
            ]
        );
    }

    #[test]
    fn cjk_identifier() {
        assert_eq!(
            kinds("中文"),
            vec![LangTokenKind::Ident("中文".into()), LangTokenKind::Eof]
        );
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            kinds(r#""a\nb\t\"q\"\\ \x""#),
            vec![
                LangTokenKind::Str("a\nb\t\"q\"\\ \\x".into()),
                LangTokenKind::Eof
            ]
        );
    }

    #[test]
    fn unterminated_string_reports_start() {
        let mut lexer = LangLexer::new(r#"  "abc"#);
        assert_eq!(
            lexer.next_token(),
            Err(SyntaxError::UnterminatedString { offset: 2 })
        );
    }

    #[test]
    fn trailing_backslash_is_unterminated() {
        let mut lexer = LangLexer::new("\"abc\\");
        assert_eq!(
            lexer.next_token(),
            Err(SyntaxError::UnterminatedString { offset: 0 })
        );
    }

    #[test]
    fn unknown_characters_are_tokens() {
        assert_eq!(
            kinds("-"),
            vec![LangTokenKind::Unknown('-'), LangTokenKind::Eof]
        );
    }

    #[test]
    fn offsets_are_bytes() {
        let mut lexer = LangLexer::new("中 x");
        assert_eq!(lexer.next_token().unwrap().offset, 0);
        assert_eq!(lexer.next_token().unwrap().offset, 4);
    }
}
