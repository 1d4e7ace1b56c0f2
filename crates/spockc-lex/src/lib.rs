//! spockc-lex - Scanner for the Spock symbolic logic language
//!
//! The scanner is the first pipeline stage. It enforces the physical-line
//! framing protocol (`N.` followed by at least two spaces), strips block
//! comments, normalizes the Unicode and ASCII boolean spellings, fuses
//! two-character negated forms (`¬∧` → `↑`, `¬¬` → nothing, `¬T` →
//! `False`), and emits a token stream ending in the `$$` sentinel.
//!
//! This crate also owns the [`token`] model and the static [`lexicon`]
//! tables, which the parser shares: the kind map, the precedence map, and
//! the associativity map together define the language surface.
//!
//! # Example
//!
//! ```
//! let tokens = spockc_lex::scan("1.  p ∧ q .$$").unwrap();
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
//! assert_eq!(texts, vec!["p", "∧", "q", ".", "$$"]);
//! ```

pub mod cursor;
pub mod lexicon;
pub mod scanner;
pub mod token;

#[cfg(test)]
mod edge_cases;

pub use lexicon::{
    associativity, is_table_operator, is_unary_prefix, negation_collapse, precedence, Assoc,
    Collapse, NON_OPERATOR_PRECEDENCE, TOKEN_KINDS,
};
pub use scanner::scan;
pub use token::{set_display, Coords, Lexeme, SetEntry, SetMap, Token, TokenKind, Truth};
