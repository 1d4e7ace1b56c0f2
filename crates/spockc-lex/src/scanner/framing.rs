//! Source preparation and the physical-line framing protocol.
//!
//! Every physical line must open with a decimal line number, exactly one
//! period, and at least two spaces before any token. Comments are removed
//! before framing runs, so a block comment that swallows a newline also
//! swallows the next line's framing duty.

use spockc_util::{Diagnostic, Location, Result};

use super::core::Scanner;

/// Normalize `\r\n` and bare `\r` line endings to `\n`.
pub(super) fn normalize_line_endings(source: &str) -> String {
    source.replace("\r\n", "\n").replace('\r', "\n")
}

/// Remove `/* ... */` block comments. Comments do not nest; the removed
/// text includes any newlines it spans.
///
/// # Errors
///
/// An unterminated `/*` or a stray `*/` is a scanner error pinned to the
/// offending fence (physical line and column, counted before removal).
pub(super) fn strip_block_comments(source: &str) -> Result<String> {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());

    let mut i = 0;
    let mut line = 1u32;
    let mut column = 1u32;
    let mut in_comment = false;
    let mut open_at = (1u32, 1u32);

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if !in_comment && c == '/' && next == Some('*') {
            in_comment = true;
            open_at = (line, column);
            i += 2;
            column += 2;
            continue;
        }

        if c == '*' && next == Some('/') {
            if !in_comment {
                return Err(Diagnostic::scanner("unmatched comment terminator '*/'")
                    .at(Location::line_col(line, column)));
            }
            in_comment = false;
            i += 2;
            column += 2;
            continue;
        }

        if !in_comment {
            out.push(c);
        }

        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
        i += 1;
    }

    if in_comment {
        let (line, column) = open_at;
        return Err(
            Diagnostic::scanner("unterminated block comment").at(Location::line_col(line, column))
        );
    }

    Ok(out)
}

impl Scanner<'_> {
    /// Consume the framing of the physical line the cursor sits on:
    /// a decimal digit run, one `.`, then two spaces (checked, not
    /// consumed). Called at scan start and after every `\n`.
    ///
    /// A line holding nothing but whitespace and the `$$` terminator is
    /// exempt, so a trailing newline before `$$` is not a framing error.
    pub(super) fn consume_framing(&mut self) -> Result<()> {
        self.line += 1;
        self.cursor.set_column(1);

        if self
            .cursor
            .rest()
            .trim_start_matches([' ', '\t'])
            .starts_with("$$")
        {
            return Ok(());
        }

        let mut saw_digit = false;
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
            saw_digit = true;
        }

        let saw_period = self.cursor.current_char() == '.';
        if saw_period {
            self.cursor.advance();
        }

        if !saw_digit || !saw_period {
            return Err(Diagnostic::scanner(
                "No line number and/or period at the start of a new physical line",
            )
            .at(Location::line_col(self.line, self.cursor.column())));
        }

        if !(self.cursor.current_char() == ' ' && self.cursor.peek(1) == ' ') {
            return Err(Diagnostic::scanner(
                "There must be at least two spaces after each line number",
            )
            .at(Location::line_col(self.line, self.cursor.column())));
        }

        Ok(())
    }
}
