//! The static lexicon shared by the scanner and the parser.
//!
//! Three tables define the language surface: the token-kind map (lexeme →
//! classification), the precedence map (lower number binds tighter), and
//! the associativity map. A fourth table drives the scanner's two-character
//! negation collapse (`¬∧` → `↑`, `¬¬` → nothing, `¬T` → `False`, …).
//!
//! All tables are read-only module data, loaded once. Only cleanly decoded
//! Unicode glyphs are recognized; mojibake spellings are not.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::token::TokenKind;

/// Precedence assigned to anything absent from the precedence map.
pub const NON_OPERATOR_PRECEDENCE: u8 = 99;

/// Token-kind map: every literal lexeme the language recognizes.
pub static TOKEN_KINDS: Lazy<FxHashMap<&'static str, TokenKind>> = Lazy::new(|| {
    use TokenKind::*;

    let entries: &[(&str, TokenKind)] = &[
        // Boolean literals
        ("⊤", Boolean),
        ("⊥", Boolean),
        ("T", Boolean),
        ("F", Boolean),
        ("True", Boolean),
        ("False", Boolean),
        ("true", Boolean),
        ("false", Boolean),
        ("∅", Boolean),
        ("0", Boolean),
        ("1", Boolean),
        // Negated boolean spellings (collapsed by the scanner)
        ("¬⊤", Boolean),
        ("¬⊥", Boolean),
        ("¬T", Boolean),
        ("¬F", Boolean),
        ("!⊤", Boolean),
        ("!⊥", Boolean),
        ("!T", Boolean),
        ("!F", Boolean),
        // Operators
        ("¬", Operator),
        ("!", Operator),
        ("∧", Operator),
        ("∨", Operator),
        ("→", Operator),
        ("⨁", Operator),
        ("↓", Operator),
        ("↑", Operator),
        ("&", Operator),
        ("↔", Operator),
        ("≡", Operator),
        ("/", Operator),
        (":", Operator),
        ("∈", Operator),
        ("∉", Operator),
        // Quantifiers and their negated fusions
        ("∃", Operator),
        ("∀", Operator),
        ("¬∃", Operator),
        ("¬∀", Operator),
        ("!∃", Operator),
        ("!∀", Operator),
        // Negated binary spellings (collapsed by the scanner)
        ("¬∧", Operator),
        ("¬∨", Operator),
        ("¬⨁", Operator),
        ("¬↓", Operator),
        ("¬↑", Operator),
        ("¬&", Operator),
        ("¬≡", Operator),
        ("!∧", Operator),
        ("!∨", Operator),
        ("!⨁", Operator),
        ("!↓", Operator),
        ("!↑", Operator),
        ("!&", Operator),
        ("!≡", Operator),
        ("¬∈", Operator),
        ("!∈", Operator),
        ("¬∉", Operator),
        ("!∉", Operator),
        // Containers
        ("(", Container),
        (")", Container),
        ("{", Container),
        ("}", Container),
        ("set", Container),
        // Delimiters
        (";", Delimiter),
        (",", Delimiter),
        (".", Delimiter),
        ("/*", Delimiter),
        ("*/", Delimiter),
        ("$$", Delimiter),
        // Reserved identifiers
        ("φ", Identifier),
        ("ϕ", Identifier),
        ("ψ", Identifier),
        // Statement starters
        (":=", Statement),
        ("val", Statement),
    ];

    entries.iter().copied().collect()
});

/// Operator precedence. Lower binds tighter; 99 means "not an operator".
pub fn precedence(op: &str) -> u8 {
    match op {
        "/" => 0,
        ":" | "∃" | "∀" | "¬∃" | "¬∀" | "!∃" | "!∀" => 1,
        "!" | "¬" => 2,
        "↑" => 5,
        "∧" | "&" => 6,
        "⨁" | "↓" => 7,
        "∨" => 9,
        "→" => 10,
        "↔" | "≡" => 11,
        _ => NON_OPERATOR_PRECEDENCE,
    }
}

/// True when `op` appears in the precedence map.
#[inline]
pub fn is_table_operator(op: &str) -> bool {
    precedence(op) != NON_OPERATOR_PRECEDENCE
}

/// Operator associativity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// Associativity for a table operator; anything unlisted is left-associative.
pub fn associativity(op: &str) -> Assoc {
    match op {
        "/" | ":" | "¬" | "!" | "∃" | "∀" | "¬∃" | "¬∀" | "!∃" | "!∀" | "→" => Assoc::Right,
        _ => Assoc::Left,
    }
}

/// True for the unary prefix operators (negation and quantifiers).
pub fn is_unary_prefix(op: &str) -> bool {
    matches!(op, "¬" | "!" | "∃" | "∀" | "¬∃" | "¬∀" | "!∃" | "!∀")
}

/// Outcome of collapsing a `¬X` / `!X` two-character sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collapse {
    /// The pair cancels entirely (`¬¬`, `!!`, `¬!`, `!¬`)
    Vanish,
    /// The pair rewrites to a single operator lexeme
    Operator(&'static str),
    /// The pair rewrites to a boolean literal
    Boolean(bool),
}

/// Negation-collapse table: rewrite for a two-character sequence whose
/// first character is `¬` or `!`. `None` means the pair does not fuse and
/// the negation scans as a lone prefix operator.
pub fn negation_collapse(second: char) -> Option<Collapse> {
    match second {
        '¬' | '!' => Some(Collapse::Vanish),
        '∧' | '&' => Some(Collapse::Operator("↑")),
        '∨' => Some(Collapse::Operator("↓")),
        '⨁' => Some(Collapse::Operator("≡")),
        '≡' => Some(Collapse::Operator("⨁")),
        '↓' => Some(Collapse::Operator("∨")),
        '↑' => Some(Collapse::Operator("∧")),
        '∃' => Some(Collapse::Operator("¬∃")),
        '∀' => Some(Collapse::Operator("¬∀")),
        '∈' => Some(Collapse::Operator("∉")),
        '∉' => Some(Collapse::Operator("∈")),
        'T' | '⊤' | '1' => Some(Collapse::Boolean(false)),
        'F' | '⊥' | '∅' | '0' => Some(Collapse::Boolean(true)),
        _ => None,
    }
}
