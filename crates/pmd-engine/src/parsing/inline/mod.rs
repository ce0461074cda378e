//! # Inline Rendering
//!
//! Turns the text of one line into HTML. Passes run in a fixed order:
//!
//! 1. code spans and `lang[...]` tags are swapped for markers
//!    ([`protect`]), so nothing below can reach inside them;
//! 2. emphasis, in the order `***`, `**`, `_`, `~~` ([`styles`]);
//! 3. images, then links ([`links`]);
//! 4. markers are swapped back.
//!
//! Text outside these constructs is passed through unescaped: the input is
//! trusted and may carry HTML of its own.

pub mod cursor;
pub mod links;
pub mod protect;
pub mod styles;

use protect::{Protected, TICK};

pub use links::LinkTarget;
pub use protect::lang_tag_around;
pub use styles::has_style;

/// Renders every inline construct in `text`.
pub fn render_inline(text: &str) -> String {
    let mut protected = Protected::default();
    let shielded = protected.shield(text, true);
    let styled = styles::apply(&shielded);
    let linked = links::apply(&styled);
    protected.restore(&linked)
}

/// Renders `lang[...]` tags only; everything else is left as written.
pub fn substitute_lang(text: &str) -> String {
    let mut protected = Protected::default();
    let shielded = protected.shield(text, false);
    protected.restore(&shielded)
}

/// True when `text` holds a closed `` `code` `` span.
pub fn has_code_span(text: &str) -> bool {
    let tick = char::from(TICK);
    text.find(tick)
        .is_some_and(|open| text[open + 1..].contains(tick))
}
