use std::sync::OnceLock;

use regex::Regex;

fn rgb() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*[0-9.]+%?\s*)?\)",
        )
        .expect("Invalid rgb regex")
    })
}

/// A notification background colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// The colour as written, used verbatim in the style attribute.
    pub css: String,
}

impl Color {
    /// Reads `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(...)` or
    /// `rgba(...)` at the start of `text`. Returns the colour and the number
    /// of bytes it spans.
    pub fn parse_prefix(text: &str) -> Option<(Color, usize)> {
        if let Some(hex) = text.strip_prefix('#') {
            let digits = hex.bytes().take_while(u8::is_ascii_hexdigit).count();
            let boundary = hex[digits..].chars().next().is_none_or(char::is_whitespace);
            if !boundary {
                return None;
            }
            let channel = |i: usize, width: usize| {
                let v = u8::from_str_radix(&hex[i * width..(i + 1) * width], 16).ok()?;
                Some(if width == 1 { v * 17 } else { v })
            };
            let width = match digits {
                3 | 4 => 1,
                6 | 8 => 2,
                _ => return None,
            };
            let color = Color {
                r: channel(0, width)?,
                g: channel(1, width)?,
                b: channel(2, width)?,
                css: text[..=digits].to_string(),
            };
            return Some((color, digits + 1));
        }

        let caps = rgb().captures(text)?;
        let channel = |i: usize| caps[i].parse::<u8>().ok();
        let len = caps.get(0)?.end();
        Some((
            Color {
                r: channel(1)?,
                g: channel(2)?,
                b: channel(3)?,
                css: text[..len].to_string(),
            },
            len,
        ))
    }

    /// Perceived brightness, 0 to 255.
    pub fn luminance(&self) -> u32 {
        (u32::from(self.r) * 299 + u32::from(self.g) * 587 + u32::from(self.b) * 114) / 1000
    }

    /// Black text on light backgrounds, white on dark.
    pub fn foreground(&self) -> &'static str {
        if self.luminance() >= 128 {
            "#000000"
        } else {
            "#ffffff"
        }
    }
}
