//! spockc-par - Parser for the Spock symbolic logic language
//!
//! The parser is the second pipeline stage. It runs three passes over the
//! scanner's token stream:
//!
//! 1. **Grouping** (`group`, `set_literal`) - statements split at `.`,
//!    parentheses nest into child groups, set literals collapse into
//!    single tokens.
//! 2. **Validation** (`validate`) - infix arity, the strict substitution
//!    shape, and adjacent-operand detection, reported against 1-based
//!    expression numbers.
//! 3. **Planning** (`coords`, `rpn`) - every token gains a
//!    `(depth, gpad, pig)` coordinate in one tree walk, then each logical
//!    line is serialized to reverse-Polish order by a shunting-yard run
//!    whose parentheses are virtual, driven by depth deltas.
//!
//! # Example
//!
//! ```
//! let tokens = spockc_lex::scan("1.  p ∧ q .$$").unwrap();
//! let rpn = spockc_par::parse(&tokens).unwrap();
//! let texts: Vec<&str> = rpn[0].iter().map(|t| t.text()).collect();
//! assert_eq!(texts, vec!["p", "q", "∧"]);
//! ```

pub mod coords;
pub mod group;
pub mod rpn;
pub mod set_literal;
pub mod validate;

#[cfg(test)]
mod edge_cases;

pub use coords::assign_coordinates;
pub use group::{group, GroupNode, Statement};
pub use rpn::plan;
pub use validate::validate;

use spockc_lex::Token;
use spockc_util::Result;

/// Parse a scanned token stream into per-line RPN sequences.
///
/// # Errors
///
/// Parser-stage diagnostics from grouping or validation; see the module
/// documentation for the taxonomy.
pub fn parse(tokens: &[Token]) -> Result<Vec<Vec<Token>>> {
    let mut statements = group::group(tokens)?;
    validate::validate(&statements)?;
    coords::assign_coordinates(&mut statements);
    Ok(rpn::plan(&statements))
}
