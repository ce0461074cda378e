/// Splits source text into logical lines.
///
/// Lines are split on `\n` with any trailing `\r` removed. A final newline
/// does not produce an extra empty line, and empty input has no lines.
pub fn split_lines(content: &str) -> Vec<String> {
    if content.is_empty() {
        return vec![];
    }
    let body = content.strip_suffix('\n').unwrap_or(content);
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// True for lines holding nothing but whitespace.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", vec![])]
    #[case("a", vec!["a"])]
    #[case("a\n", vec!["a"])]
    #[case("a\r\nb\r\n", vec!["a", "b"])]
    #[case("a\n\nb", vec!["a", "", "b"])]
    #[case("\n", vec![""])]
    fn splits(#[case] input: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_lines(input), expected);
    }

    #[test]
    fn blank_lines() {
        assert!(is_blank(""));
        assert!(is_blank(" \t "));
        assert!(!is_blank(" x "));
    }
}
