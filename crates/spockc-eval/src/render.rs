//! Result rendering.
//!
//! A definite final token prints as `True`/`False`; a set prints its
//! values recursively; anything else prints its lexeme text, which for
//! residuals is already the parenthesized symbolic form.

use spockc_lex::{Token, Truth};

/// Render one line's final token.
pub fn render_token(token: &Token) -> String {
    match token.value {
        Truth::True => "True".to_string(),
        Truth::False => "False".to_string(),
        Truth::Unknown => token.display(),
    }
}
