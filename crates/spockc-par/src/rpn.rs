//! RPN planning: per-line shunting-yard with virtual parentheses.
//!
//! The planner flattens each statement's tokens in walk order (source
//! order), partitions them by logical line, and serializes every line to
//! postfix. Nesting depth deltas stand in for parentheses: a rise pushes a
//! virtual `(` on the operator stack, a fall pops operators until one is
//! discarded. Unary prefix operators push without popping, since they open
//! an operand rather than close one.
//!
//! A validated substitution line `/ x (≡|↔) φ…` plans as `plan(φ…) x /`:
//! the replacement expression reduces first, then the target, then the
//! substitution operator. The connector is consumed by the form.

use std::collections::BTreeMap;

use spockc_lex::{associativity, is_unary_prefix, precedence, Assoc, Token, TokenKind};

use crate::group::{GroupNode, Statement};

/// Plan every logical line to an RPN token sequence: statements in order,
/// lines ascending within each. Statements never share an RPN line, even
/// when they share a physical one. Declaration statements are opaque and
/// contribute nothing.
pub fn plan(statements: &[Statement]) -> Vec<Vec<Token>> {
    let mut lines: Vec<Vec<Token>> = Vec::new();
    for stmt in statements {
        if stmt.is_declaration() {
            continue;
        }
        let mut by_line: BTreeMap<u32, Vec<Token>> = BTreeMap::new();
        collect(&stmt.nodes, &mut by_line);
        lines.extend(by_line.into_values().map(|line| line_to_rpn(&line)));
    }
    lines
}

/// Gather the tokens the planner cares about (operands and operators),
/// preserving walk order within each logical line.
fn collect(nodes: &[GroupNode], by_line: &mut BTreeMap<u32, Vec<Token>>) {
    for node in nodes {
        match node {
            GroupNode::Token(t) => {
                if t.kind.is_operand() || t.kind == TokenKind::Operator {
                    by_line.entry(t.line).or_default().push(t.clone());
                }
            }
            GroupNode::Group(inner) => collect(inner, by_line),
        }
    }
}

enum StackEntry {
    VirtualParen,
    Op(Token),
}

fn line_to_rpn(tokens: &[Token]) -> Vec<Token> {
    // Substitution form, already validated for shape.
    if tokens.len() >= 3
        && tokens[0].kind == TokenKind::Operator
        && tokens[0].is_text("/")
        && tokens[1].kind == TokenKind::Identifier
        && (tokens[2].is_text("≡") || tokens[2].is_text("↔"))
    {
        let mut out = line_to_rpn(&tokens[3..]);
        out.push(tokens[1].clone());
        out.push(tokens[0].clone());
        return out;
    }

    let base = tokens.iter().map(Token::depth).min().unwrap_or(0);
    let mut current = base;
    let mut out: Vec<Token> = Vec::new();
    let mut stack: Vec<StackEntry> = Vec::new();

    for token in tokens {
        let depth = token.depth();
        while current < depth {
            stack.push(StackEntry::VirtualParen);
            current += 1;
        }
        while current > depth {
            close_virtual_paren(&mut stack, &mut out);
            current -= 1;
        }

        if token.kind.is_operand() {
            out.push(token.clone());
            continue;
        }

        if token.kind == TokenKind::Operator {
            let lex = token.text();
            if is_unary_prefix(lex) {
                stack.push(StackEntry::Op(token.clone()));
                continue;
            }

            let prec = precedence(lex);
            let assoc = associativity(lex);
            while let Some(StackEntry::Op(top)) = stack.last() {
                let top_prec = precedence(top.text());
                if top_prec < prec || (top_prec == prec && assoc == Assoc::Left) {
                    let Some(StackEntry::Op(popped)) = stack.pop() else {
                        unreachable!("just matched an operator on top");
                    };
                    out.push(popped);
                } else {
                    break;
                }
            }
            stack.push(StackEntry::Op(token.clone()));
        }
    }

    while current > base {
        close_virtual_paren(&mut stack, &mut out);
        current -= 1;
    }
    while let Some(entry) = stack.pop() {
        if let StackEntry::Op(token) = entry {
            out.push(token);
        }
    }
    out
}

/// Pop operators into the output until a virtual `(` is discarded.
fn close_virtual_paren(stack: &mut Vec<StackEntry>, out: &mut Vec<Token>) {
    while let Some(entry) = stack.pop() {
        match entry {
            StackEntry::Op(token) => out.push(token),
            StackEntry::VirtualParen => return,
        }
    }
}
