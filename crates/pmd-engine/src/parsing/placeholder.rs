//! Placeholder table for raw-text spans.
//!
//! Raw spans are cut out of the source before any module runs and replaced by
//! an opaque id built from private-use code points, so no grammar module can
//! mistake it for syntax. Ids are resolved back to HTML after assembly.
//!
//! Ids carry a salt picked per top-level parse ([`PlaceholderTable::seal`])
//! so that no id can already occur in the source text.

use std::collections::HashMap;

/// Marks the start of a placeholder id.
pub const OPEN: char = '\u{E000}';
/// Marks the end of a placeholder id.
pub const CLOSE: char = '\u{E001}';

const PREFIX: &str = "PMDRAW";

/// Id to HTML mapping, shared by every nested pass of one top-level parse.
#[derive(Debug, Default, Clone)]
pub struct PlaceholderTable {
    entries: HashMap<String, String>,
    next: usize,
    salt: usize,
}

impl PlaceholderTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn id_prefix(&self) -> String {
        format!("{OPEN}{PREFIX}{}:", self.salt)
    }

    /// Picks the smallest salt whose ids cannot be found in `source`.
    pub fn seal(&mut self, source: &str) {
        self.salt = 0;
        while source.contains(&self.id_prefix()) {
            self.salt += 1;
        }
    }

    /// Stores `html` and returns the id that stands in for it.
    pub fn insert(&mut self, html: String) -> String {
        let id = format!("{}{}{CLOSE}", self.id_prefix(), self.next);
        self.next += 1;
        self.entries.insert(id.clone(), html);
        id
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// True when `line` is exactly one known id.
    pub fn is_placeholder(&self, line: &str) -> bool {
        self.entries.contains_key(line)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces every known id in `text` with its HTML. Unknown ids are left
    /// as they are.
    pub fn restore(&self, text: &str) -> String {
        if self.entries.is_empty() || !text.contains(OPEN) {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(open) = rest.find(OPEN) {
            out.push_str(&rest[..open]);
            let candidate = &rest[open..];
            let resolved = candidate.find(CLOSE).and_then(|close| {
                let id = &candidate[..close + CLOSE.len_utf8()];
                self.get(id).map(|html| (id.len(), html))
            });
            match resolved {
                Some((len, html)) => {
                    out.push_str(html);
                    rest = &candidate[len..];
                }
                None => {
                    out.push(OPEN);
                    rest = &candidate[OPEN.len_utf8()..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Restores `text` and empties the table.
    pub fn drain(&mut self, text: &str) -> String {
        let out = self.restore(text);
        self.entries.clear();
        out
    }
}
