//! Shape validation on the grouped tree, before RPN planning.
//!
//! Three families of checks, all reported against 1-based expression
//! numbers: infix arity (an operand on each side, same container, same
//! logical line), the strict substitution shape (`/x ≡ …` opening its
//! expression), and adjacent operands with no operator between them.
//!
//! Declaration statements are opaque and skipped.

use spockc_util::{Diagnostic, Location, Result};

use spockc_lex::{is_table_operator, is_unary_prefix, Token, TokenKind};

use crate::group::{GroupNode, Statement};

/// Validate every statement. The first violation aborts.
pub fn validate(statements: &[Statement]) -> Result<()> {
    let mut base = 1u32;
    for stmt in statements {
        let numberer = ExprNumberer::build(stmt, base);
        if !stmt.is_declaration() {
            check_container(&stmt.nodes, &numberer)?;
        }
        base += numberer.count();
    }
    Ok(())
}

/// Expression numbering for one statement: the statement's expressions are
/// its logical lines, numbered consecutively after the previous
/// statement's.
pub(crate) struct ExprNumberer {
    base: u32,
    /// (byte position, logical line, expression number) per leaf, in order
    leaves: Vec<(usize, u32, u32)>,
}

impl ExprNumberer {
    pub(crate) fn build(stmt: &Statement, base: u32) -> Self {
        let mut leaves = Vec::new();
        let mut expr = base;
        let mut prev_line: Option<u32> = None;
        collect_leaves(&stmt.nodes, &mut |tok: &Token| {
            if let Some(prev) = prev_line {
                if prev != tok.line {
                    expr += 1;
                }
            }
            prev_line = Some(tok.line);
            leaves.push((tok.position, tok.line, expr));
        });
        Self { base, leaves }
    }

    /// Expression number at a token's byte position.
    pub(crate) fn number_at(&self, position: usize) -> u32 {
        self.leaves
            .iter()
            .find(|(p, _, _)| *p == position)
            .map(|(_, _, e)| *e)
            .unwrap_or(self.base)
    }

    /// Byte position of the first leaf on a logical line, if any.
    pub(crate) fn first_position_on_line(&self, line: u32) -> Option<usize> {
        self.leaves
            .iter()
            .find(|(_, l, _)| *l == line)
            .map(|(p, _, _)| *p)
    }

    /// How many expressions this statement spans.
    pub(crate) fn count(&self) -> u32 {
        self.leaves
            .last()
            .map(|(_, _, e)| e - self.base + 1)
            .unwrap_or(1)
    }
}

fn collect_leaves(nodes: &[GroupNode], visit: &mut impl FnMut(&Token)) {
    for node in nodes {
        match node {
            GroupNode::Token(t) => visit(t),
            GroupNode::Group(inner) => collect_leaves(inner, visit),
        }
    }
}

/// Operand nodes: nested groups, or tokens of the operand kinds.
fn is_operand_node(node: &GroupNode) -> bool {
    match node {
        GroupNode::Group(_) => true,
        GroupNode::Token(t) => matches!(
            t.kind,
            TokenKind::Identifier
                | TokenKind::Boolean
                | TokenKind::Number
                | TokenKind::Container
                | TokenKind::Set
        ),
    }
}

/// A lone unary prefix operator token.
fn is_prefix_node(node: &GroupNode) -> bool {
    matches!(
        node,
        GroupNode::Token(t) if t.kind == TokenKind::Operator && is_unary_prefix(t.text())
    )
}

fn first_line(node: &GroupNode) -> Option<u32> {
    node.first_leaf().map(|t| t.line)
}

fn last_line(node: &GroupNode) -> Option<u32> {
    node.last_leaf().map(|t| t.line)
}

fn expr_prefix(numberer: &ExprNumberer, tok: &Token) -> (u32, String) {
    let expr = numberer.number_at(tok.position);
    (
        expr,
        format!("Expression {}, column {}", expr, tok.column),
    )
}

fn shape_error(numberer: &ExprNumberer, tok: &Token, detail: String) -> Diagnostic {
    let (expr, prefix) = expr_prefix(numberer, tok);
    Diagnostic::parser(format!("{}: {}", prefix, detail))
        .at(Location::expression(expr, Some(tok.column)))
}

fn check_container(nodes: &[GroupNode], numberer: &ExprNumberer) -> Result<()> {
    // Child containers first
    for node in nodes {
        if let GroupNode::Group(inner) = node {
            check_container(inner, numberer)?;
        }
    }

    // Infix arity and substitution shape
    for (i, node) in nodes.iter().enumerate() {
        let GroupNode::Token(tok) = node else { continue };
        if tok.kind != TokenKind::Operator {
            continue;
        }
        let lex = tok.text();

        if lex == "/" {
            check_substitution(nodes, i, numberer)?;
            continue;
        }

        if !is_table_operator(lex) || is_unary_prefix(lex) {
            continue;
        }

        if !has_left_operand(nodes, i, tok.line) {
            return Err(shape_error(
                numberer,
                tok,
                format!("infix operator '{}' is missing an operand on its left side.", lex),
            ));
        }

        if !has_right_operand(nodes, i, tok.line) {
            return Err(shape_error(
                numberer,
                tok,
                format!("infix operator '{}' is missing an operand on its right side.", lex),
            ));
        }
    }

    // Adjacent operands
    check_adjacency(nodes, numberer)
}

fn has_left_operand(nodes: &[GroupNode], i: usize, line: u32) -> bool {
    let mut j = i;
    while j > 0 {
        j -= 1;
        let left = &nodes[j];
        // An empty group has no leaf line; only a known, different line breaks
        if last_line(left).is_some_and(|l| l != line) {
            return false;
        }
        match left {
            GroupNode::Group(_) => return true,
            GroupNode::Token(_) => {
                if is_operand_node(left) {
                    return true;
                }
                if is_prefix_node(left) {
                    continue;
                }
                // Another operator, a delimiter, a statement starter
                return false;
            }
        }
    }
    false
}

fn has_right_operand(nodes: &[GroupNode], i: usize, line: u32) -> bool {
    let mut k = i + 1;
    // A chain of unary prefixes may stand before the operand
    while k < nodes.len() && is_prefix_node(&nodes[k]) && first_line(&nodes[k]) == Some(line) {
        k += 1;
    }
    match nodes.get(k) {
        Some(node) => {
            !first_line(node).is_some_and(|l| l != line) && is_operand_node(node)
        }
        None => false,
    }
}

fn check_adjacency(nodes: &[GroupNode], numberer: &ExprNumberer) -> Result<()> {
    let n = nodes.len();
    for p in 0..n.saturating_sub(1) {
        if !is_operand_node(&nodes[p]) {
            continue;
        }
        let right = &nodes[p + 1];

        // A line change is an implicit expression boundary
        if let (Some(ll), Some(rl)) = (last_line(&nodes[p]), first_line(right)) {
            if ll != rl {
                continue;
            }
        }

        let offender = if is_operand_node(right) {
            Some(right)
        } else if is_prefix_node(right) {
            let mut q = p + 1;
            while q < n && is_prefix_node(&nodes[q]) {
                q += 1;
            }
            nodes.get(q).filter(|&node| is_operand_node(node))
        } else {
            None
        };

        if let Some(node) = offender {
            let detail = "two adjacent operands; missing infix operator between them.";
            return Err(match node.first_leaf() {
                Some(tok) => shape_error(numberer, tok, detail.to_string()),
                // An empty group offers no column to point at
                None => {
                    let expr = numberer.base;
                    Diagnostic::parser(format!("Expression {}: {}", expr, detail))
                        .at(Location::expression(expr, None))
                }
            });
        }
    }
    Ok(())
}

/// The strict substitution shape: `/` opens its expression, followed by a
/// bare identifier or a parenthesized single identifier, then `≡` or `↔`
/// on the same line.
fn check_substitution(nodes: &[GroupNode], i: usize, numberer: &ExprNumberer) -> Result<()> {
    let GroupNode::Token(slash) = &nodes[i] else {
        unreachable!("caller checked the token");
    };

    if numberer.first_position_on_line(slash.line) != Some(slash.position) {
        return Err(shape_error(
            numberer,
            slash,
            "substitution '/' must appear at the start of its expression.".to_string(),
        ));
    }

    let followed_by_connector = |k: usize| -> bool {
        matches!(
            nodes.get(k),
            Some(GroupNode::Token(t))
                if t.kind == TokenKind::Operator
                    && (t.is_text("≡") || t.is_text("↔"))
                    && t.line == slash.line
        )
    };

    match nodes.get(i + 1) {
        None => Err(shape_error(
            numberer,
            slash,
            "substitution '/' is missing the target variable.".to_string(),
        )),
        Some(GroupNode::Token(t))
            if t.kind == TokenKind::Identifier && t.line == slash.line =>
        {
            if followed_by_connector(i + 2) {
                Ok(())
            } else {
                Err(shape_error(
                    numberer,
                    slash,
                    format!(
                        "substitution '/{}' must be immediately followed by '≡' or '↔'.",
                        t.text()
                    ),
                ))
            }
        }
        Some(GroupNode::Group(inner)) if first_line(&nodes[i + 1]) == Some(slash.line) => {
            let single_identifier = match inner.as_slice() {
                [GroupNode::Token(t)] if t.kind == TokenKind::Identifier => Some(t),
                _ => None,
            };
            let Some(target) = single_identifier else {
                return Err(shape_error(
                    numberer,
                    slash,
                    "substitution '/' expects a single identifier in parentheses immediately after '/'."
                        .to_string(),
                ));
            };
            if followed_by_connector(i + 2) {
                Ok(())
            } else {
                Err(shape_error(
                    numberer,
                    slash,
                    format!(
                        "substitution '/({})' must be immediately followed by '≡' or '↔'.",
                        target.text()
                    ),
                ))
            }
        }
        Some(_) => Err(shape_error(
            numberer,
            slash,
            "substitution '/' must be immediately followed by an identifier or a parenthesized identifier."
                .to_string(),
        )),
    }
}
