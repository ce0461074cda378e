use std::sync::OnceLock;

use html_escape::encode_double_quoted_attribute;
use regex::{Captures, Regex};

fn image() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").expect("Invalid image regex"))
}

fn link() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").expect("Invalid link regex"))
}

/// Where a link points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// `#id` on the same page.
    Internal,
    /// `http://` or `https://`; opens in a new tab.
    External,
    /// Anything else (relative paths, `mailto:`).
    Other,
}

impl LinkTarget {
    pub fn classify(href: &str) -> Self {
        if href.starts_with('#') {
            LinkTarget::Internal
        } else if href.starts_with("http://") || href.starts_with("https://") {
            LinkTarget::External
        } else {
            LinkTarget::Other
        }
    }
}

/// Images first, so `![alt](src)` is never read as a link.
pub fn apply(text: &str) -> String {
    let text = image().replace_all(text, |caps: &Captures<'_>| {
        format!(
            "<img class=\"pmd-img\" src=\"{}\" alt=\"{}\">",
            encode_double_quoted_attribute(&caps[2]),
            encode_double_quoted_attribute(&caps[1])
        )
    });
    link()
        .replace_all(&text, |caps: &Captures<'_>| {
            let label = &caps[1];
            let href = encode_double_quoted_attribute(&caps[2]);
            match LinkTarget::classify(&caps[2]) {
                LinkTarget::Internal => {
                    format!("<a class=\"pmd-link pmd-link-internal\" href=\"{href}\">{label}</a>")
                }
                LinkTarget::External => format!(
                    "<a class=\"pmd-link pmd-link-external\" href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\">{label}</a>"
                ),
                LinkTarget::Other => format!("<a class=\"pmd-link\" href=\"{href}\">{label}</a>"),
            }
        })
        .into_owned()
}
