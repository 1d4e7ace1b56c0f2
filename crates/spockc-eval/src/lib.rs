//! spockc-eval - Three-valued evaluator for the Spock language
//!
//! The evaluator is the final pipeline stage. It reduces each logical
//! line's RPN sequence on a value stack under three-valued semantics:
//! every value is `True`, `False`, or an unknown carrying a residual
//! symbolic form. Connectives short-circuit where one side forces the
//! result and residuate otherwise; quantifier adornments wrap; membership
//! always residuates; substitution (`/`) binds identifiers for the rest of
//! the request through an environment.
//!
//! # Example
//!
//! ```
//! let tokens = spockc_lex::scan("1.  True ∧ False .$$").unwrap();
//! let rpn = spockc_par::parse(&tokens).unwrap();
//! assert_eq!(spockc_eval::evaluate(rpn).unwrap(), "False\n");
//! ```

pub mod logic;
pub mod machine;
pub mod render;

pub use machine::{evaluate, Machine};
pub use render::render_token;
