//! Three-valued connective tables.
//!
//! Each connective reduces a pair of operands to a definite boolean when
//! the truth values force one, and to a parenthesized residual string
//! otherwise. Residuals reuse the operands' display lexemes verbatim, so
//! nested residuals compose without re-parenthesization.

use spockc_lex::Truth;

/// One operand as the connectives see it: its truth value and the text it
/// shows in a residual.
pub struct Operand<'a> {
    pub value: Truth,
    pub text: &'a str,
}

/// Outcome of one reduction step.
#[derive(Clone, Debug, PartialEq)]
pub enum Reduced {
    Definite(bool),
    Residual(String),
}

fn residual(a: &Operand<'_>, op: &str, b: &Operand<'_>) -> Reduced {
    Reduced::Residual(format!("({} {} {})", a.text, op, b.text))
}

/// `∧` - false dominates; truth alone cannot force a result.
pub fn conjunction(a: &Operand<'_>, b: &Operand<'_>) -> Reduced {
    use Truth::*;
    match (a.value, b.value) {
        (Unknown, Unknown) | (Unknown, True) | (True, Unknown) => residual(a, "∧", b),
        (False, _) | (_, False) => Reduced::Definite(false),
        (True, True) => Reduced::Definite(true),
    }
}

/// `∨` - truth dominates.
pub fn disjunction(a: &Operand<'_>, b: &Operand<'_>) -> Reduced {
    use Truth::*;
    match (a.value, b.value) {
        (Unknown, Unknown) | (Unknown, False) | (False, Unknown) => residual(a, "∨", b),
        (True, _) | (_, True) => Reduced::Definite(true),
        (False, False) => Reduced::Definite(false),
    }
}

/// `↑` - falsity on either side already settles a NAND.
pub fn nand(a: &Operand<'_>, b: &Operand<'_>) -> Reduced {
    use Truth::*;
    match (a.value, b.value) {
        (Unknown, Unknown) | (Unknown, True) | (True, Unknown) => residual(a, "↑", b),
        (False, _) | (_, False) => Reduced::Definite(true),
        (True, True) => Reduced::Definite(false),
    }
}

/// `↓` - truth on either side already settles a NOR.
pub fn nor(a: &Operand<'_>, b: &Operand<'_>) -> Reduced {
    use Truth::*;
    match (a.value, b.value) {
        (Unknown, Unknown) | (Unknown, False) | (False, Unknown) => residual(a, "↓", b),
        (True, _) | (_, True) => Reduced::Definite(false),
        (False, False) => Reduced::Definite(true),
    }
}

/// `⨁` - exclusive or never short-circuits on a single side.
pub fn exclusive_or(a: &Operand<'_>, b: &Operand<'_>) -> Reduced {
    use Truth::*;
    match (a.value, b.value) {
        (Unknown, _) | (_, Unknown) => residual(a, "⨁", b),
        (av, bv) => Reduced::Definite(av != bv),
    }
}

/// `→` - a false antecedent or a true consequent settles it.
pub fn implication(a: &Operand<'_>, b: &Operand<'_>) -> Reduced {
    use Truth::*;
    match (a.value, b.value) {
        (False, _) => Reduced::Definite(true),
        (_, True) => Reduced::Definite(true),
        (True, False) => Reduced::Definite(false),
        _ => residual(a, "→", b),
    }
}

/// `↔` - both sides must be definite.
pub fn biconditional(a: &Operand<'_>, b: &Operand<'_>) -> Reduced {
    use Truth::*;
    match (a.value, b.value) {
        (Unknown, _) | (_, Unknown) => residual(a, "↔", b),
        (av, bv) => Reduced::Definite(av == bv),
    }
}

/// `≡` - same table as `↔`, printed with its own glyph.
pub fn equivalence(a: &Operand<'_>, b: &Operand<'_>) -> Reduced {
    use Truth::*;
    match (a.value, b.value) {
        (Unknown, _) | (_, Unknown) => residual(a, "≡", b),
        (av, bv) => Reduced::Definite(av == bv),
    }
}

/// `∈` / `∉` - membership always residuates; no set model is consulted.
pub fn membership(op: &str, a: &Operand<'_>, b: &Operand<'_>) -> Reduced {
    residual(a, op, b)
}
