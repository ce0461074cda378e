use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::parsing::{
    context::Scope,
    fragment::MultiLineParseResult,
    registry::{GrammarModule, ModuleKind, Rule},
};

pub struct CodeBlock;

impl CodeBlock {
    pub const FENCE: &'static str = "```";
    pub const PRIORITY: i32 = 90;

    pub fn matches(line: &str) -> bool {
        line.trim_start().starts_with(Self::FENCE)
    }

    /// A line of nothing but three or more backticks.
    pub fn is_closing(line: &str) -> bool {
        let t = line.trim();
        t.len() >= Self::FENCE.len() && t.bytes().all(|b| b == b'`')
    }

    /// Index of the fence closing the one opened at `lines[start]`.
    pub fn closed_fence_end(lines: &[String], start: usize) -> Option<usize> {
        if !Self::matches(lines.get(start)?) {
            return None;
        }
        (start + 1..lines.len()).find(|&j| Self::is_closing(&lines[j]))
    }

    /// First word of the info string after the opening fence.
    pub fn language(open_line: &str) -> &str {
        open_line
            .trim()
            .trim_start_matches('`')
            .split_whitespace()
            .next()
            .unwrap_or("")
    }

    pub fn render(language: &str, code: &str, copy_button: bool) -> String {
        let mut html = String::from("<div class=\"pmd-code-block\">");
        if !language.is_empty() || copy_button {
            html.push_str("<div class=\"pmd-code-header\">");
            if !language.is_empty() {
                html.push_str(&format!(
                    "<span class=\"pmd-code-lang\">{}</span>",
                    encode_text(language)
                ));
            }
            if copy_button {
                html.push_str(
                    "<button class=\"pmd-copy-button\" onclick=\"pmdCopyCode(this)\">Copy</button>",
                );
            }
            html.push_str("</div>");
        }
        if language.is_empty() {
            html.push_str("<pre><code>");
        } else {
            html.push_str(&format!(
                "<pre><code class=\"language-{}\">",
                encode_double_quoted_attribute(language)
            ));
        }
        html.push_str(&encode_text(code));
        html.push_str("</code></pre></div>");
        html
    }

    /// A fenced block. Without a closing fence the opening line is left for
    /// other modules.
    pub fn parse(
        lines: &[String],
        start: usize,
        scope: &mut Scope<'_>,
    ) -> Option<MultiLineParseResult> {
        let end = Self::closed_fence_end(lines, start)?;
        let code = lines[start + 1..end].join("\n");
        Some(MultiLineParseResult {
            html: Self::render(
                Self::language(&lines[start]),
                &code,
                scope.options().code_copy_button,
            ),
            end_index: end,
        })
    }
}

pub fn module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::CodeBlock,
        name: ModuleKind::CodeBlock.name(),
        priority: CodeBlock::PRIORITY,
        matches: CodeBlock::matches,
        rule: Rule::MultiLine(CodeBlock::parse),
    }
}
