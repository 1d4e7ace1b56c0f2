//! Set-literal parsing: `{ … }` and `set { … }` collapse to one token.
//!
//! Content between braces accumulates into display keys; commas delimit
//! elements; nested braces push frames. The closing brace of the outermost
//! frame yields a single `Set`-kind token whose lexeme is the element map
//! and whose location comes from that brace. An empty outer set degrades
//! to a boolean `∅` token.

use spockc_util::{Diagnostic, ExitCode, Location, Result};

use spockc_lex::{set_display, SetEntry, SetMap, Token, TokenKind, Truth};

use crate::group::{GroupNode, Grouper, MAX_NESTING};

/// Move any accumulated scalar text into the top frame as an element.
fn flush_scalar(frames: &mut [SetMap], scalar: &mut String) {
    if scalar.is_empty() {
        return;
    }
    let key = std::mem::take(scalar);
    let top = frames.last_mut().expect("set parser always has a frame");
    top.insert(key.clone(), SetEntry::Scalar(key));
}

impl Grouper<'_> {
    /// Parse a set literal. The cursor sits on `set` or `{`.
    pub(crate) fn set_literal(&mut self) -> Result<GroupNode> {
        if self.current().is_some_and(|t| t.is_text("set")) {
            let keyword = self.current().expect("checked above").clone();
            self.pos += 1;
            if !self.current().is_some_and(|t| t.is_text("{")) {
                return Err(Diagnostic::parser("expected '{' after 'set'")
                    .at(Location::line_col(keyword.line, keyword.column)));
            }
        }

        self.pos += 1; // consume the opening '{'

        let mut frames: Vec<SetMap> = vec![SetMap::new()];
        let mut scalar = String::new();

        loop {
            let Some(tok) = self.current() else {
                return Err(Diagnostic::parser(
                    "Unexpected end of tokens (missing '$$' EOF).",
                ));
            };

            if tok.is_text("$$") {
                return Err(Diagnostic::parser(format!(
                    "Unmatched opening delimiter: {{ (expected '}}' before line {}, column {})",
                    tok.line, tok.column
                ))
                .at(Location::line_col(tok.line, tok.column)));
            }

            // `set` directly before a nested `{` is decoration
            if tok.is_text("set") && self.peek(1).is_some_and(|t| t.is_text("{")) {
                flush_scalar(&mut frames, &mut scalar);
                self.pos += 1;
                continue;
            }

            if tok.is_text("{") {
                if frames.len() as u32 >= MAX_NESTING {
                    return Err(
                        Diagnostic::parser("set nesting exceeds the supported depth")
                            .with_code(ExitCode::RECURSION)
                            .at(Location::line_col(tok.line, tok.column)),
                    );
                }
                flush_scalar(&mut frames, &mut scalar);
                frames.push(SetMap::new());
                self.pos += 1;
                continue;
            }

            if tok.is_text(",") {
                flush_scalar(&mut frames, &mut scalar);
                self.pos += 1;
                continue;
            }

            if tok.is_text("}") {
                flush_scalar(&mut frames, &mut scalar);
                let closed = frames.pop().expect("set parser always has a frame");
                let close = tok.clone();
                self.pos += 1;

                if frames.is_empty() {
                    return Ok(GroupNode::Token(outer_set_token(closed, &close)));
                }

                let key = set_display(&closed);
                let top = frames.last_mut().expect("parent frame exists");
                top.insert(key, SetEntry::Set(closed));
                continue;
            }

            if tok.kind == TokenKind::Statement {
                return Err(Diagnostic::parser(
                    "A statement may not be present in an expression.",
                )
                .at(Location::line_col(tok.line, tok.column)));
            }

            // Anything else accumulates into the pending element text.
            scalar.push_str(tok.text());
            self.pos += 1;
        }
    }
}

/// The token for a closed outermost set: the element map, or boolean `∅`
/// when empty. Location comes from the closing brace.
fn outer_set_token(map: SetMap, close: &Token) -> Token {
    if map.is_empty() {
        let mut token = Token::new(
            "∅",
            TokenKind::Boolean,
            close.line,
            close.column,
            close.position,
        );
        token.value = Truth::False;
        token
    } else {
        Token::set(map, close.line, close.column, close.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{group, Statement};
    use spockc_lex::{scan, Lexeme};

    fn single_token(source: &str) -> Token {
        let stmts: Vec<Statement> = group(&scan(source).unwrap()).unwrap();
        assert_eq!(stmts.len(), 1);
        assert_eq!(stmts[0].nodes.len(), 1);
        match &stmts[0].nodes[0] {
            GroupNode::Token(t) => t.clone(),
            GroupNode::Group(_) => panic!("expected a single token"),
        }
    }

    #[test]
    fn test_flat_set() {
        let t = single_token("1.  {a, b, c} .$$");
        assert_eq!(t.kind, TokenKind::Set);
        assert_eq!(t.display(), "{a, b, c}");
    }

    #[test]
    fn test_set_keyword_form() {
        let t = single_token("1.  set {a, b} .$$");
        assert_eq!(t.display(), "{a, b}");
    }

    #[test]
    fn test_nested_set() {
        let t = single_token("1.  {a, {x, y}, b} .$$");
        assert_eq!(t.display(), "{a, {x, y}, b}");
        let Lexeme::Set(map) = &t.lexeme else {
            panic!("expected set lexeme");
        };
        assert!(matches!(map.get("{x, y}"), Some(SetEntry::Set(_))));
    }

    #[test]
    fn test_nested_set_keyword() {
        let t = single_token("1.  {a, set {x}} .$$");
        assert_eq!(t.display(), "{a, {x}}");
    }

    #[test]
    fn test_duplicate_elements_collapse() {
        let t = single_token("1.  {a, a, b} .$$");
        assert_eq!(t.display(), "{a, b}");
    }

    #[test]
    fn test_empty_set_degrades_to_false() {
        let t = single_token("1.  {} .$$");
        assert_eq!(t.kind, TokenKind::Boolean);
        assert_eq!(t.text(), "∅");
        assert_eq!(t.value, Truth::False);
    }

    #[test]
    fn test_empty_set_keyword_form() {
        let t = single_token("1.  set {} .$$");
        assert_eq!(t.text(), "∅");
        assert_eq!(t.value, Truth::False);
    }

    #[test]
    fn test_multi_token_element_concatenates() {
        let t = single_token("1.  {p ∧ q, r} .$$");
        assert_eq!(t.display(), "{p∧q, r}");
    }

    #[test]
    fn test_location_comes_from_closing_brace() {
        let t = single_token("1.  {a, b} .$$");
        // "1.  {a, b}" - the closing brace sits at column 10.
        assert_eq!(t.column, 10);
        assert_eq!(t.line, 1);
    }

    #[test]
    fn test_unclosed_set() {
        let err = group(&scan("1.  {a, b .$$").unwrap()).unwrap_err();
        assert!(err.message.starts_with("Unmatched opening delimiter: {"));
    }

    #[test]
    fn test_set_keyword_without_brace() {
        let err = group(&scan("1.  set p .$$").unwrap()).unwrap_err();
        assert_eq!(err.message, "expected '{' after 'set'");
    }

    #[test]
    fn test_statement_inside_set() {
        let err = group(&scan("1.  {val x} .$$").unwrap()).unwrap_err();
        assert_eq!(err.message, "A statement may not be present in an expression.");
    }

    #[test]
    fn test_set_inside_parens() {
        let stmts = group(&scan("1.  ({a} ∈ {a, b}) .$$").unwrap()).unwrap();
        let GroupNode::Group(inner) = &stmts[0].nodes[0] else {
            panic!("expected group");
        };
        assert_eq!(inner.len(), 3);
        assert!(matches!(&inner[0], GroupNode::Token(t) if t.kind == TokenKind::Set));
    }
}
