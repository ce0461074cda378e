use super::{
    error::SyntaxError,
    lexer::{LangLexer, LangToken, LangTokenKind},
};

/// Ordered mapping from language code to display value.
///
/// Insertion order is kept; inserting an existing code replaces its value in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LangPairSet {
    pairs: Vec<(String, String)>,
}

impl LangPairSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, value: impl Into<String>) {
        let code = code.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(c, _)| *c == code) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((code, value)),
        }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, v)| v.as_str())
    }

    /// The first pair in source order; its value is the default rendering.
    pub fn first(&self) -> Option<(&str, &str)> {
        self.pairs.first().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Recursive-descent parser over a [`LangLexer`] with one token of lookahead.
struct LangParser<'a> {
    lexer: LangLexer<'a>,
    peeked: Option<LangToken>,
}

impl<'a> LangParser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            lexer: LangLexer::new(src),
            peeked: None,
        }
    }

    fn peek(&mut self) -> Result<&LangToken, SyntaxError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    fn bump(&mut self) -> Result<LangToken, SyntaxError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.lexer.next_token(),
        }
    }

    /// `tag := "lang" "[" pair+ "]"`
    fn tag(&mut self) -> Result<LangPairSet, SyntaxError> {
        let token = self.bump()?;
        if token.kind != LangTokenKind::Lang {
            return Err(SyntaxError::MissingKeyword {
                offset: token.offset,
            });
        }

        let token = self.bump()?;
        if token.kind != LangTokenKind::LBracket {
            return Err(SyntaxError::MissingOpenBracket {
                offset: token.offset,
            });
        }

        let mut pairs = LangPairSet::new();
        loop {
            let (key, value) = self.pair()?;
            pairs.insert(key, value);

            // `pair := ident "=" string ","?`
            let (kind, offset) = {
                let token = self.peek()?;
                (token.kind.clone(), token.offset)
            };
            match kind {
                LangTokenKind::Comma => {
                    self.bump()?;
                    if self.peek()?.kind == LangTokenKind::RBracket {
                        self.bump()?;
                        return Ok(pairs);
                    }
                }
                LangTokenKind::RBracket => {
                    self.bump()?;
                    return Ok(pairs);
                }
                LangTokenKind::Ident(_) | LangTokenKind::Lang => {}
                _ => return Err(SyntaxError::MissingCloseBracket { offset }),
            }
        }
    }

    fn pair(&mut self) -> Result<(String, String), SyntaxError> {
        let token = self.bump()?;
        let key = match token.kind {
            LangTokenKind::Ident(name) => name,
            LangTokenKind::Lang => LangLexer::KEYWORD.to_string(),
            LangTokenKind::Eof => {
                return Err(SyntaxError::MissingCloseBracket {
                    offset: token.offset,
                });
            }
            _ => {
                return Err(SyntaxError::MalformedIdentifier {
                    offset: token.offset,
                });
            }
        };

        let token = self.bump()?;
        if token.kind != LangTokenKind::Eq {
            return Err(SyntaxError::MissingEquals {
                key,
                offset: token.offset,
            });
        }

        let token = self.bump()?;
        match token.kind {
            LangTokenKind::Str(value) => Ok((key, value)),
            _ => Err(SyntaxError::ExpectedString {
                key,
                offset: token.offset,
            }),
        }
    }
}

/// Parses one `lang[...]` tag at the start of `text`.
///
/// Returns the pairs and the number of bytes consumed (up to and including
/// the closing `]`). Text after the tag is never examined.
pub fn parse_prefix(text: &str) -> Result<(LangPairSet, usize), SyntaxError> {
    let mut parser = LangParser::new(text);
    let pairs = parser.tag()?;
    Ok((pairs, parser.lexer.pos()))
}

/// Parses `text` as exactly one `lang[...]` tag, surrounding whitespace
/// allowed.
pub fn parse(text: &str) -> Result<LangPairSet, SyntaxError> {
    let (pairs, consumed) = parse_prefix(text)?;
    let rest = &text[consumed..];
    let trimmed = rest.trim_start();
    if !trimmed.is_empty() {
        return Err(SyntaxError::TrailingInput {
            offset: consumed + (rest.len() - trimmed.len()),
        });
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn parses_pairs_in_order() {
        let pairs = parse(r#"lang[en="Hello", zh="你好", ja="こんにちは"]"#).unwrap();
        let collected: Vec<_> = pairs.iter().collect();
        assert_eq!(
            collected,
            vec![("en", "Hello"), ("zh", "你好"), ("ja", "こんにちは")]
        );
        assert_eq!(pairs.first(), Some(("en", "Hello")));
    }

    #[test]
    fn commas_are_optional() {
        let pairs = parse(r#"lang[en="a" fr="b",]"#).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.get("fr"), Some("b"));
    }

    #[test]
    fn repeated_code_replaces_value_in_place() {
        let pairs = parse(r#"lang[en="a", fr="b", en="c"]"#).unwrap();
        let collected: Vec<_> = pairs.iter().collect();
        assert_eq!(collected, vec![("en", "c"), ("fr", "b")]);
    }

    #[test]
    fn cjk_identifiers_are_codes() {
        let pairs = parse(r#"lang[中文="你好"]"#).unwrap();
        assert_eq!(pairs.get("中文"), Some("你好"));
    }

    #[test]
    fn keyword_is_allowed_as_key() {
        let pairs = parse(r#"lang[lang="x"]"#).unwrap();
        assert_eq!(pairs.get("lang"), Some("x"));
    }

    #[test]
    fn escapes_are_cooked() {
        let pairs = parse(r#"lang[en="say \"hi\"\n", x="\q"]"#).unwrap();
        assert_eq!(pairs.get("en"), Some("say \"hi\"\n"));
        assert_eq!(pairs.get("x"), Some("\\q"));
    }

    #[test]
    fn prefix_reports_consumed_bytes() {
        let text = r#"lang[en="a"] and the rest "unterminated"#;
        let (pairs, consumed) = parse_prefix(text).unwrap();
        assert_eq!(pairs.get("en"), Some("a"));
        assert_eq!(&text[..consumed], r#"lang[en="a"]"#);
    }

    #[rstest]
    #[case(r#"lnag[en="a"]"#, SyntaxError::MissingKeyword { offset: 0 })]
    #[case(r#"lang(en="a")"#, SyntaxError::MissingOpenBracket { offset: 4 })]
    #[case(r#"lang[-="a"]"#, SyntaxError::MalformedIdentifier { offset: 5 })]
    #[case(r#"lang[]"#, SyntaxError::MalformedIdentifier { offset: 5 })]
    #[case(r#"lang[en "a"]"#, SyntaxError::MissingEquals { key: "en".into(), offset: 8 })]
    #[case(r#"lang[en=a]"#, SyntaxError::ExpectedString { key: "en".into(), offset: 8 })]
    #[case(r#"lang[en="a]"#, SyntaxError::UnterminatedString { offset: 8 })]
    #[case(r#"lang[a="x""#, SyntaxError::MissingCloseBracket { offset: 10 })]
    #[case(r#"lang["#, SyntaxError::MissingCloseBracket { offset: 5 })]
    #[case(r#"lang[en="a"] x"#, SyntaxError::TrailingInput { offset: 13 })]
    fn rejects_malformed_tags(#[case] input: &str, #[case] expected: SyntaxError) {
        assert_eq!(parse(input), Err(expected));
    }

    #[test]
    fn error_offset_accessor() {
        let err = parse(r#"lang[a="x""#).unwrap_err();
        assert_eq!(err.offset(), 10);
        assert_eq!(err.to_string(), "missing closing `]` at byte 10");
    }
}
