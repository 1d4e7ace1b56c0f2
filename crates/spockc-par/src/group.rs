//! Grouping: from the flat token stream to per-statement trees.
//!
//! A statement is everything up to its terminating `.`. Parenthesized
//! subexpressions nest as child groups; set literals collapse into single
//! tokens (see `set_literal`); `,` separates without grouping. Statements
//! whose first token is a statement starter (`:=`, `val`) are kept as
//! opaque declaration groups.

use spockc_util::{Diagnostic, ExitCode, Location, Result};

use spockc_lex::{Token, TokenKind};

/// Deepest group/set nesting the parser accepts.
pub(crate) const MAX_NESTING: u32 = 64;

/// A node of a grouped expression: a token, or a nested group.
#[derive(Clone, Debug, PartialEq)]
pub enum GroupNode {
    Token(Token),
    Group(Vec<GroupNode>),
}

impl GroupNode {
    /// First token in this node, in source order.
    pub fn first_leaf(&self) -> Option<&Token> {
        match self {
            GroupNode::Token(t) => Some(t),
            GroupNode::Group(nodes) => nodes.iter().find_map(|n| n.first_leaf()),
        }
    }

    /// Last token in this node, in source order.
    pub fn last_leaf(&self) -> Option<&Token> {
        match self {
            GroupNode::Token(t) => Some(t),
            GroupNode::Group(nodes) => nodes.iter().rev().find_map(|n| n.last_leaf()),
        }
    }
}

/// One `.`-terminated statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub nodes: Vec<GroupNode>,
}

impl Statement {
    /// True when the statement opens with a statement starter and is
    /// therefore opaque to validation and planning.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self.nodes.first().and_then(|n| n.first_leaf()),
            Some(t) if t.kind == TokenKind::Statement
        )
    }
}

/// Group a scanned token stream into statements.
///
/// # Errors
///
/// Parser-stage diagnostics for unmatched delimiters, statement tokens in
/// expressions, empty statements, and a missing terminal period.
pub fn group(tokens: &[Token]) -> Result<Vec<Statement>> {
    Grouper { tokens, pos: 0 }.run()
}

pub(crate) struct Grouper<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) pos: usize,
}

impl<'a> Grouper<'a> {
    pub(crate) fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn peek(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    fn run(mut self) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();

        loop {
            match self.current() {
                None => {
                    return Err(Diagnostic::parser(
                        "Unexpected end of tokens (missing '$$' EOF).",
                    ))
                }
                Some(t) if t.is_text("$$") => break,
                Some(_) => {}
            }

            let (nodes, terminated) = self.statement()?;
            if terminated {
                statements.push(Statement { nodes });
            } else if !nodes.is_empty() {
                return Err(Diagnostic::parser(
                    "Terminal period missing from end of last statement",
                ));
            }
        }

        if statements.is_empty() {
            return Err(Diagnostic::parser(
                "Terminal period missing from end of last statement",
            ));
        }

        Ok(statements)
    }

    /// Collect one statement. Returns the nodes and whether a terminating
    /// `.` was consumed (false means the stream hit `$$`).
    fn statement(&mut self) -> Result<(Vec<GroupNode>, bool)> {
        let mut nodes: Vec<GroupNode> = Vec::new();
        let mut declaration = false;

        loop {
            let Some(tok) = self.current() else {
                return Err(Diagnostic::parser(
                    "Unexpected end of tokens (missing '$$' EOF).",
                ));
            };

            if tok.is_text("$$") {
                return Ok((nodes, false));
            }

            if tok.is_text(".") {
                if nodes.is_empty() {
                    return Err(Diagnostic::parser("Premature termination by period")
                        .at(Location::line_col(tok.line, tok.column)));
                }
                self.pos += 1;
                return Ok((nodes, true));
            }

            if tok.is_text(",") {
                self.pos += 1;
                continue;
            }

            if tok.is_text("(") {
                nodes.push(self.subgroup(1)?);
                continue;
            }

            if tok.is_text(")") {
                return Err(Diagnostic::parser(
                    "Closing parentheses without matching opening parentheses",
                )
                .at(Location::line_col(tok.line, tok.column)));
            }

            if tok.is_text("{") || tok.is_text("set") {
                nodes.push(self.set_literal()?);
                continue;
            }

            if tok.is_text("}") {
                return Err(Diagnostic::parser("Unmatched closing delimiter: }")
                    .at(Location::line_col(tok.line, tok.column)));
            }

            if tok.kind == TokenKind::Statement {
                if nodes.is_empty() {
                    declaration = true;
                } else if !declaration {
                    return Err(Diagnostic::parser(
                        "A statement may not be present in an expression.",
                    )
                    .at(Location::line_col(tok.line, tok.column)));
                }
                nodes.push(GroupNode::Token(tok.clone()));
                self.pos += 1;
                continue;
            }

            nodes.push(GroupNode::Token(tok.clone()));
            self.pos += 1;
        }
    }

    /// Parse a parenthesized subexpression. `depth` counts open parens.
    fn subgroup(&mut self, depth: u32) -> Result<GroupNode> {
        if depth > MAX_NESTING {
            let tok = self.current().expect("subgroup starts on a token");
            return Err(
                Diagnostic::parser("expression nesting exceeds the supported depth")
                    .with_code(ExitCode::RECURSION)
                    .at(Location::line_col(tok.line, tok.column)),
            );
        }

        let open = self.current().expect("subgroup starts on '('").clone();
        self.pos += 1;

        let mut items: Vec<GroupNode> = Vec::new();
        loop {
            let Some(tok) = self.current() else {
                return Err(Diagnostic::parser(
                    "Unexpected end of tokens (missing '$$' EOF).",
                ));
            };

            if tok.is_text("$$") {
                return Err(Diagnostic::parser("Unmatched opening delimiter: (")
                    .at(Location::line_col(open.line, open.column)));
            }

            if tok.is_text(".") {
                return Err(Diagnostic::parser(
                    "Unexpected termination of token list with open parentheses",
                )
                .at(Location::line_col(tok.line, tok.column)));
            }

            if tok.is_text(",") {
                self.pos += 1;
                continue;
            }

            if tok.is_text("(") {
                items.push(self.subgroup(depth + 1)?);
                continue;
            }

            if tok.is_text(")") {
                self.pos += 1;
                return Ok(GroupNode::Group(items));
            }

            if tok.is_text("{") || tok.is_text("set") {
                items.push(self.set_literal()?);
                continue;
            }

            if tok.is_text("}") {
                return Err(Diagnostic::parser("Unmatched closing delimiter: }")
                    .at(Location::line_col(tok.line, tok.column)));
            }

            if tok.kind == TokenKind::Statement {
                return Err(Diagnostic::parser(
                    "A statement may not be present in an expression.",
                )
                .at(Location::line_col(tok.line, tok.column)));
            }

            items.push(GroupNode::Token(tok.clone()));
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spockc_lex::scan;

    fn statements(source: &str) -> Vec<Statement> {
        group(&scan(source).unwrap()).unwrap()
    }

    fn leaf_texts(nodes: &[GroupNode]) -> Vec<String> {
        let mut out = Vec::new();
        for node in nodes {
            match node {
                GroupNode::Token(t) => out.push(t.text().to_string()),
                GroupNode::Group(inner) => {
                    out.push("(".into());
                    out.extend(leaf_texts(inner));
                    out.push(")".into());
                }
            }
        }
        out
    }

    #[test]
    fn test_flat_statement() {
        let stmts = statements("1.  p ∧ q .$$");
        assert_eq!(stmts.len(), 1);
        assert_eq!(leaf_texts(&stmts[0].nodes), vec!["p", "∧", "q"]);
    }

    #[test]
    fn test_nested_group() {
        let stmts = statements("1.  p → (q → p) .$$");
        assert_eq!(
            leaf_texts(&stmts[0].nodes),
            vec!["p", "→", "(", "q", "→", "p", ")"]
        );
    }

    #[test]
    fn test_deeply_nested() {
        let stmts = statements("1.  ((p)) .$$");
        let GroupNode::Group(outer) = &stmts[0].nodes[0] else {
            panic!("expected group");
        };
        let GroupNode::Group(inner) = &outer[0] else {
            panic!("expected inner group");
        };
        assert!(matches!(&inner[0], GroupNode::Token(t) if t.is_text("p")));
    }

    #[test]
    fn test_two_statements() {
        let stmts = statements("1.  p .\n2.  q .$$");
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn test_declaration_statement() {
        let stmts = statements("1.  val x := 1 .$$");
        assert_eq!(stmts.len(), 1);
        assert!(stmts[0].is_declaration());
    }

    #[test]
    fn test_statement_token_mid_expression() {
        let err = group(&scan("1.  p val q .$$").unwrap()).unwrap_err();
        assert_eq!(err.message, "A statement may not be present in an expression.");
    }

    #[test]
    fn test_statement_token_inside_group() {
        let err = group(&scan("1.  (val x) .$$").unwrap()).unwrap_err();
        assert_eq!(err.message, "A statement may not be present in an expression.");
    }

    #[test]
    fn test_stray_close_paren() {
        let err = group(&scan("1.  p ) .$$").unwrap()).unwrap_err();
        assert_eq!(
            err.message,
            "Closing parentheses without matching opening parentheses"
        );
    }

    #[test]
    fn test_unclosed_paren() {
        let err = group(&scan("1.  (p ∧ q $$").unwrap()).unwrap_err();
        assert_eq!(err.message, "Unmatched opening delimiter: (");
    }

    #[test]
    fn test_period_inside_parens() {
        let err = group(&scan("1.  (p . q) .$$").unwrap()).unwrap_err();
        assert_eq!(
            err.message,
            "Unexpected termination of token list with open parentheses"
        );
    }

    #[test]
    fn test_premature_period() {
        let err = group(&scan("1.  . p .$$").unwrap()).unwrap_err();
        assert_eq!(err.message, "Premature termination by period");
    }

    #[test]
    fn test_terminal_period_missing() {
        let err = group(&scan("1.  p $$").unwrap()).unwrap_err();
        assert_eq!(err.message, "Terminal period missing from end of last statement");
    }

    #[test]
    fn test_empty_program_needs_a_period() {
        let err = group(&scan("1.  $$").unwrap()).unwrap_err();
        assert_eq!(err.message, "Terminal period missing from end of last statement");
    }

    #[test]
    fn test_stray_closing_brace() {
        let err = group(&scan("1.  p } .$$").unwrap()).unwrap_err();
        assert_eq!(err.message, "Unmatched closing delimiter: }");
    }

    #[test]
    fn test_nesting_limit() {
        let mut source = String::from("1.  ");
        for _ in 0..70 {
            source.push('(');
        }
        source.push('p');
        for _ in 0..70 {
            source.push(')');
        }
        source.push_str(" .$$");
        let err = group(&scan(&source).unwrap()).unwrap_err();
        assert_eq!(err.code, ExitCode::RECURSION);
    }
}
