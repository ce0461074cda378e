//! Properties every compiled document must have.

use crate::parsing::placeholder;

const WRAPPER_OPEN: &str = r#"<div class="pmd-content" style="white-space: pre-wrap;">"#;

/// Panics with a description of the first violated property of `html`, the
/// output compiled from `source`.
pub fn check(source: &str, html: &str) {
    assert!(
        html.starts_with(WRAPPER_OPEN) && html.ends_with("</div>"),
        "output is not wrapped: {html:?}"
    );
    assert_eq!(
        html.matches("<div").count(),
        html.matches("</div>").count(),
        "unbalanced divs: {html:?}"
    );
    if !source.contains(['\u{E002}', '\u{E003}']) {
        assert!(
            !html.contains(['\u{E002}', '\u{E003}']),
            "inline marker leaked: {html:?}"
        );
    }
    if !source.contains(placeholder::OPEN) {
        assert!(
            !html.contains(placeholder::OPEN),
            "raw placeholder leaked: {html:?}"
        );
    }
}
