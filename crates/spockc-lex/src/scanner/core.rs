//! Main scanner implementation for the Spock language.
//!
//! The scanner enforces the physical-line framing protocol, strips block
//! comments, and emits a token stream terminated by the `$$` sentinel.
//! Whitespace never reaches the token stream; `;` is consumed as a logical
//! line break, while `,` is emitted for the set-literal parser to consume.

use spockc_util::{Diagnostic, Location, Result};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind, Truth};

use super::framing::{normalize_line_endings, strip_block_comments};

/// Scan Spock source text into a token list.
///
/// The input must already carry the `$$` terminator (the caller's duty).
/// The returned stream always ends with the `$$` sentinel token.
///
/// # Errors
///
/// Returns a scanner-stage [`Diagnostic`] on framing violations, unbalanced
/// comments, a missing terminator, or an undefined character.
pub fn scan(source: &str) -> Result<Vec<Token>> {
    let normalized = normalize_line_endings(source);
    let stripped = strip_block_comments(&normalized)?;

    if !stripped.ends_with("$$") {
        return Err(Diagnostic::scanner("Source must end with '$$'"));
    }

    Scanner::new(&stripped).run()
}

/// Scanner state: a cursor over the stripped source plus the logical line
/// counter and the tokens collected so far.
pub(super) struct Scanner<'a> {
    pub(super) cursor: Cursor<'a>,
    pub(super) line: u32,
    pub(super) tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            line: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        // The first physical line is framed like every other one.
        self.consume_framing()?;

        loop {
            let c = self.cursor.current_char();

            if self.cursor.is_at_end() {
                // The `$$` suffix was verified up front; running out of
                // input means an earlier token swallowed it.
                return Err(Diagnostic::scanner("Source must end with '$$'"));
            }

            if c == '\n' {
                self.cursor.advance();
                self.consume_framing()?;
                continue;
            }

            // `;` opens a new logical line and yields no token.
            if c == ';' {
                self.cursor.advance();
                self.line += 1;
                continue;
            }

            if c.is_whitespace() {
                self.cursor.advance();
                continue;
            }

            if self.cursor.starts_with("$$") {
                let (line, column, position) = self.token_start();
                self.cursor.advance_by(2);
                self.tokens
                    .push(Token::new("$$", TokenKind::Delimiter, line, column, position));
                break;
            }

            // Detectors, in order: identifier munch, digit run,
            // two-character fusion, single-character lexicon.
            if self.identifier_token() {
                continue;
            }
            if self.number_token() {
                continue;
            }
            if self.two_char_token() {
                continue;
            }
            if self.single_char_token() {
                continue;
            }

            return Err(Diagnostic::scanner(format!(
                "Token not yet defined or implemented '{}'",
                c
            ))
            .at(Location::line_col(self.line, self.cursor.column())));
        }

        Ok(self.tokens)
    }

    /// Location triple at the start of the token being scanned.
    pub(super) fn token_start(&self) -> (u32, u32, usize) {
        (self.line, self.cursor.column(), self.cursor.position())
    }

    /// Push a plain text token.
    pub(super) fn push_text(
        &mut self,
        lexeme: impl Into<String>,
        kind: TokenKind,
        start: (u32, u32, usize),
    ) {
        let (line, column, position) = start;
        self.tokens
            .push(Token::new(lexeme, kind, line, column, position));
    }

    /// Push a boolean token with a normalized `True`/`False` lexeme.
    pub(super) fn push_boolean(&mut self, value: bool, start: (u32, u32, usize)) {
        let (line, column, position) = start;
        self.tokens.push(Token::boolean(value, line, column, position));
    }

    /// Push a boolean token keeping its written spelling (`true`, `false`).
    pub(super) fn push_boolean_spelled(
        &mut self,
        lexeme: impl Into<String>,
        value: bool,
        start: (u32, u32, usize),
    ) {
        let (line, column, position) = start;
        let mut token = Token::new(lexeme, TokenKind::Boolean, line, column, position);
        token.value = Truth::from(value);
        self.tokens.push(token);
    }
}
