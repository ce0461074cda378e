//! Rounded `(:: ... ::)` and square `[:: ... ::]` notification boxes.
//!
//! Right after the opening delimiter, on the same line, optional settings may
//! appear in this order: `>` for a bordered box, then a background colour. The body is
//! rendered through the full pipeline with both notification families
//! hidden.

use super::color::Color;
use crate::parsing::{
    context::Scope,
    fragment::MultiLineParseResult,
    registry::{GrammarModule, ModuleKind, ModuleSet, Rule},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationShape {
    Rounded,
    Square,
}

impl NotificationShape {
    pub fn open(self) -> &'static str {
        match self {
            NotificationShape::Rounded => "(::",
            NotificationShape::Square => "[::",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            NotificationShape::Rounded => "::)",
            NotificationShape::Square => "::]",
        }
    }

    fn class(self) -> &'static str {
        match self {
            NotificationShape::Rounded => "pmd-notification-rounded",
            NotificationShape::Square => "pmd-notification-square",
        }
    }
}

/// Settings read from the start of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationStyle {
    pub bordered: bool,
    pub color: Option<Color>,
}

pub struct Notification;

impl Notification {
    pub const PRIORITY: i32 = 85;
    pub const BORDER: char = '>';
    /// Hidden from notification bodies.
    pub const FAMILY: ModuleSet = ModuleSet::of(&[
        ModuleKind::RoundedNotification,
        ModuleKind::SquareNotification,
    ]);

    fn opens(shape: NotificationShape, line: &str) -> bool {
        line.trim_start().starts_with(shape.open())
    }

    /// Splits leading settings off `text`.
    pub fn style(text: &str) -> (NotificationStyle, &str) {
        let mut rest = text.trim_start();
        let mut style = NotificationStyle::default();
        if let Some(after) = rest.strip_prefix(Self::BORDER) {
            style.bordered = true;
            rest = after.trim_start();
        }
        if let Some((color, len)) = Color::parse_prefix(rest) {
            style.color = Some(color);
            rest = rest[len..].trim_start();
        }
        (style, rest)
    }

    /// The raw body and the closing line.
    fn span(shape: NotificationShape, lines: &[String], start: usize) -> Option<(String, usize)> {
        let after = lines[start].trim().strip_prefix(shape.open())?;
        if let Some(inner) = after.strip_suffix(shape.close()) {
            return Some((inner.to_string(), start));
        }

        let end = (start + 1..lines.len()).find(|&j| lines[j].trim_end().ends_with(shape.close()))?;
        let mut body = vec![after.to_string()];
        body.extend(lines[start + 1..end].iter().cloned());
        let last = lines[end].trim_end();
        body.push(last[..last.len() - shape.close().len()].to_string());
        Some((body.join("\n"), end))
    }

    pub fn render(
        shape: NotificationShape,
        raw: &str,
        scope: &mut Scope<'_>,
    ) -> String {
        let (opener, tail) = match raw.split_once('\n') {
            Some((opener, tail)) => (opener, Some(tail)),
            None => (raw, None),
        };
        let (style, opener) = Self::style(opener);
        let body = match tail {
            Some(tail) => format!("{opener}\n{tail}"),
            None => opener.to_string(),
        };
        let content = match scope.render_nested(body.trim(), Self::FAMILY) {
            Ok(html) => html,
            Err(e) => return e.to_html(),
        };

        let mut class = format!("pmd-notification {}", shape.class());
        if style.bordered {
            class.push_str(" pmd-notification-bordered");
        }
        let style_attr = style
            .color
            .map(|c| {
                format!(
                    " style=\"background-color: {}; color: {};\"",
                    c.css,
                    c.foreground()
                )
            })
            .unwrap_or_default();
        format!("<div class=\"{class}\"{style_attr}>{content}</div>")
    }

    fn parse(
        shape: NotificationShape,
        lines: &[String],
        start: usize,
        scope: &mut Scope<'_>,
    ) -> Option<MultiLineParseResult> {
        let (raw, end) = Self::span(shape, lines, start)?;
        Some(MultiLineParseResult {
            html: Self::render(shape, &raw, scope),
            end_index: end,
        })
    }
}

fn rounded_matches(line: &str) -> bool {
    Notification::opens(NotificationShape::Rounded, line)
}

fn rounded_parse(
    lines: &[String],
    start: usize,
    scope: &mut Scope<'_>,
) -> Option<MultiLineParseResult> {
    Notification::parse(NotificationShape::Rounded, lines, start, scope)
}

fn square_matches(line: &str) -> bool {
    Notification::opens(NotificationShape::Square, line)
}

fn square_parse(
    lines: &[String],
    start: usize,
    scope: &mut Scope<'_>,
) -> Option<MultiLineParseResult> {
    Notification::parse(NotificationShape::Square, lines, start, scope)
}

pub fn rounded_module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::RoundedNotification,
        name: ModuleKind::RoundedNotification.name(),
        priority: Notification::PRIORITY,
        matches: rounded_matches,
        rule: Rule::MultiLine(rounded_parse),
    }
}

pub fn square_module() -> GrammarModule {
    GrammarModule {
        kind: ModuleKind::SquareNotification,
        name: ModuleKind::SquareNotification.name(),
        priority: Notification::PRIORITY,
        matches: square_matches,
        rule: Rule::MultiLine(square_parse),
    }
}
