//! Character cursor for traversing source text.
//!
//! The cursor keeps a byte position and a column counter; the scanner owns
//! the logical line counter because lines advance on framing and on `;`,
//! not on every newline the cursor happens to cross.

/// A cursor over source text, advancing one character at a time.
pub struct Cursor<'a> {
    /// The source being traversed.
    source: &'a str,

    /// Current byte position.
    position: usize,

    /// Current column (1-based, in characters).
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            column: 1,
        }
    }

    /// The character at the cursor, or `'\0'` at the end.
    #[inline]
    pub fn current_char(&self) -> char {
        self.source[self.position..].chars().next().unwrap_or('\0')
    }

    /// The character `offset` characters ahead of the cursor
    /// (`peek(0)` is the current character), or `'\0'` past the end.
    pub fn peek(&self, offset: usize) -> char {
        self.source[self.position..]
            .chars()
            .nth(offset)
            .unwrap_or('\0')
    }

    /// Advance one character, bumping the column.
    pub fn advance(&mut self) {
        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
            self.column += 1;
        }
    }

    /// Advance `n` characters.
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// True once the cursor has consumed the whole source.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// True when the remaining input starts with `s`.
    #[inline]
    pub fn starts_with(&self, s: &str) -> bool {
        self.source[self.position..].starts_with(s)
    }

    /// The remaining input.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.source[self.position..]
    }

    /// Current byte position.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current column (1-based).
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Reset the column counter, used when a new physical line starts.
    #[inline]
    pub fn set_column(&mut self, column: u32) {
        self.column = column;
    }
}
