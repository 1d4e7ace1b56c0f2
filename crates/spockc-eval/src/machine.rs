//! The reduction machine: a value stack, a pending-operator queue, and the
//! substitution environment.
//!
//! Operands push; operators pop their arity and push the reduction. An
//! operator that outruns its operands is parked and retried, oldest first,
//! after each push; a pending unary operator applies to the operand it was
//! waiting for as soon as that operand lands. A sequence that ends with
//! parked operators or more than one value is reported as stack
//! corruption.
//!
//! Substitution (`/`) binds the target identifier in a request-scoped
//! environment instead of rewriting tokens in place; identifiers are
//! resolved through the environment as they are pushed, so exactly the
//! occurrences after the binding - including those on later lines - see
//! the replacement.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use spockc_util::{Diagnostic, Result};

use spockc_lex::{is_unary_prefix, Lexeme, Token, TokenKind, Truth};

use crate::logic::{self, Operand, Reduced};
use crate::render::render_token;

/// Evaluate planned RPN lines to the final output text: one rendered
/// result per non-empty line, each newline-terminated.
pub fn evaluate(rpn_lines: Vec<Vec<Token>>) -> Result<String> {
    let mut machine = Machine::new();
    let mut output = String::new();
    for line in rpn_lines {
        if let Some(result) = machine.reduce_line(line)? {
            output.push_str(&render_token(&result));
            output.push('\n');
        }
    }
    Ok(output)
}

/// What a substituted identifier resolves to.
enum Binding {
    Bool(bool),
    Text(String),
}

/// The evaluator. One machine lives for one request; its bindings carry
/// substitutions across lines but never across requests.
pub struct Machine {
    bindings: FxHashMap<String, Binding>,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Self {
            bindings: FxHashMap::default(),
        }
    }

    /// Reduce one line's RPN to its final token, or `None` for an empty
    /// line.
    pub fn reduce_line(&mut self, mut rpn: Vec<Token>) -> Result<Option<Token>> {
        normalize_booleans(&mut rpn);

        let mut stack: Vec<Token> = Vec::new();
        let mut parked: VecDeque<Token> = VecDeque::new();

        let mut tokens = rpn.into_iter().peekable();
        while let Some(token) = tokens.next() {
            if token.kind == TokenKind::Operator {
                if stack.len() < arity_of(token.text()) {
                    parked.push_back(token);
                } else {
                    self.apply(token, &mut stack)?;
                }
            } else {
                let mut token = token;
                // The operand directly before a `/` is the substitution
                // target - a binding occurrence, never a use.
                let binds_next = matches!(
                    tokens.peek(),
                    Some(next) if next.kind == TokenKind::Operator && next.is_text("/")
                );
                if !binds_next {
                    self.resolve(&mut token);
                }
                stack.push(token);
                self.retry_parked(&mut stack, &mut parked)?;
            }
        }

        if let Some(op) = parked.front() {
            return Err(Diagnostic::evaluator(format!(
                "expression stack corrupted: operator '{}' is missing its operands",
                op.text()
            )));
        }

        match stack.len() {
            0 => Ok(None),
            1 => Ok(stack.pop()),
            n => Err(Diagnostic::evaluator(format!(
                "expression stack corrupted: {} values remain after reduction",
                n
            ))),
        }
    }

    /// Retry parked operators, oldest first, while the stack feeds them.
    fn retry_parked(&mut self, stack: &mut Vec<Token>, parked: &mut VecDeque<Token>) -> Result<()> {
        while let Some(front) = parked.front() {
            if stack.len() < arity_of(front.text()) {
                break;
            }
            let op = parked.pop_front().expect("front was just observed");
            self.apply(op, stack)?;
        }
        Ok(())
    }

    /// Apply one operator to the stack. Arity has been checked.
    fn apply(&mut self, op: Token, stack: &mut Vec<Token>) -> Result<()> {
        let lex = op.text().to_string();

        if is_unary_prefix(&lex) {
            let a = stack.pop().expect("arity was checked");
            stack.push(apply_unary(&lex, &a, &op)?);
            return Ok(());
        }

        let b = stack.pop().expect("arity was checked");
        let a = stack.pop().expect("arity was checked");

        if lex == "/" {
            stack.push(self.substitute(&op, &a, &b));
            return Ok(());
        }

        let a_text = a.display();
        let b_text = b.display();
        let a_operand = Operand {
            value: a.value,
            text: &a_text,
        };
        let b_operand = Operand {
            value: b.value,
            text: &b_text,
        };

        let reduced = match lex.as_str() {
            "∈" | "∉" => logic::membership(&lex, &a_operand, &b_operand),
            "∧" | "&" => logic::conjunction(&a_operand, &b_operand),
            "∨" => logic::disjunction(&a_operand, &b_operand),
            "↑" => logic::nand(&a_operand, &b_operand),
            "↓" => logic::nor(&a_operand, &b_operand),
            "⨁" => logic::exclusive_or(&a_operand, &b_operand),
            "→" => logic::implication(&a_operand, &b_operand),
            "↔" => logic::biconditional(&a_operand, &b_operand),
            "≡" => logic::equivalence(&a_operand, &b_operand),
            _ => {
                return Err(Diagnostic::evaluator(format!(
                    "Unknown binary operator: {}",
                    lex
                )))
            }
        };

        stack.push(reduced_token(reduced, &op));
        Ok(())
    }

    /// `/` pops `(a, b)` with the target `b` on top: bind `b` to `a` and
    /// leave the `(a / b)` residual. Boolean replacements bind by value
    /// (later occurrences keep their spelling); symbolic replacements bind
    /// by text, with one matching outer parenthesis pair dropped.
    fn substitute(&mut self, op: &Token, a: &Token, b: &Token) -> Token {
        let target = b.text().to_string();

        if a.value.is_definite() {
            self.bindings
                .insert(target.clone(), Binding::Bool(a.value == Truth::True));
            residual_token(format!("({} / {})", a.display(), target), op)
        } else {
            let replacement = strip_outer_parens(&a.display()).to_string();
            self.bindings
                .insert(target.clone(), Binding::Text(replacement.clone()));
            residual_token(format!("({} / {})", replacement, target), op)
        }
    }

    /// Resolve an identifier operand through the substitution environment.
    fn resolve(&self, token: &mut Token) {
        if token.kind != TokenKind::Identifier {
            return;
        }
        let Lexeme::Text(name) = &token.lexeme else {
            return;
        };
        match self.bindings.get(name) {
            Some(Binding::Bool(v)) => token.value = Truth::from(*v),
            Some(Binding::Text(text)) => token.lexeme = Lexeme::Text(text.clone()),
            None => {}
        }
    }
}

/// Apply a unary operator: negation flips definite values, quantifiers
/// pass them through; unknowns wrap residually.
fn apply_unary(op: &str, a: &Token, origin: &Token) -> Result<Token> {
    let text = a.display();
    let definite = a.value.is_definite();
    let truth = a.value == Truth::True;

    let reduced = match op {
        "¬" | "!" => {
            if definite {
                Reduced::Definite(!truth)
            } else {
                Reduced::Residual(format!("(¬{})", text))
            }
        }
        "∃" => {
            if definite {
                Reduced::Definite(truth)
            } else {
                Reduced::Residual(format!("(∃{})", text))
            }
        }
        "∀" => {
            if definite {
                Reduced::Definite(truth)
            } else {
                Reduced::Residual(format!("(∀{})", text))
            }
        }
        "¬∃" | "!∃" => {
            if definite {
                Reduced::Definite(!truth)
            } else {
                Reduced::Residual(format!("(¬∃{})", text))
            }
        }
        "¬∀" | "!∀" => {
            if definite {
                Reduced::Definite(!truth)
            } else {
                Reduced::Residual(format!("(¬∀{})", text))
            }
        }
        _ => {
            return Err(Diagnostic::evaluator(format!(
                "Unknown unary operator: {}",
                op
            )))
        }
    };

    Ok(reduced_token(reduced, origin))
}

/// Build the stack token for a reduction outcome, locating it at the
/// operator that produced it.
fn reduced_token(reduced: Reduced, origin: &Token) -> Token {
    match reduced {
        Reduced::Definite(v) => Token::boolean(v, origin.line, origin.column, origin.position),
        Reduced::Residual(text) => residual_token(text, origin),
    }
}

fn residual_token(text: String, origin: &Token) -> Token {
    Token::new(
        text,
        TokenKind::Identifier,
        origin.line,
        origin.column,
        origin.position,
    )
}

/// Pre-normalization: boolean lexemes gain their definite values.
fn normalize_booleans(rpn: &mut [Token]) {
    for token in rpn.iter_mut() {
        if token.kind != TokenKind::Boolean {
            continue;
        }
        match token.text() {
            "⊤" | "T" | "True" | "true" | "1" => token.value = Truth::True,
            "⊥" | "F" | "False" | "false" | "∅" | "0" => token.value = Truth::False,
            _ => {}
        }
    }
}

fn arity_of(op: &str) -> usize {
    if is_unary_prefix(op) {
        1
    } else {
        2
    }
}

/// Drop one outer parenthesis pair when it wraps the whole string.
fn strip_outer_parens(s: &str) -> &str {
    let Some(inner) = s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) else {
        return s;
    };
    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return s;
                }
            }
            _ => {}
        }
    }
    if depth == 0 {
        inner
    } else {
        s
    }
}
