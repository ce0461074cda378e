/// Byte cursor over a line of inline text.
///
/// Only ASCII delimiters are matched, so every position a construct starts or
/// ends at is a char boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The line being scanned.
    pub s: &'a str,
    /// Byte index of the next unread byte in `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Starts a cursor at byte 0 of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Byte position of the cursor within the line.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// True once every byte has been consumed.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// The byte under the cursor, without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// True if the unread bytes begin with `pat`. Never panics past the end.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat)
    }

    /// Consumes one byte and returns it.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Skips `n` bytes. The caller has already matched them.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Text from the cursor to the end. Empty unless the cursor sits on a
    /// char boundary.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or("")
    }

    /// The char just before the cursor, if the cursor is on a boundary.
    pub fn prev_char(&self) -> Option<char> {
        self.s.get(..self.i)?.chars().next_back()
    }
}
