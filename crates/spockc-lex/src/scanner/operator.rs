//! Operator scanning: two-character fusion and single-character lexicon.
//!
//! A `¬`/`!` followed by an operator or boolean undergoes the table-driven
//! negation collapse before anything else: cancellations vanish, negated
//! connectives rewrite to their dual, negated booleans flip. Everything
//! else falls through to a single-character lexicon lookup.

use crate::lexicon::{negation_collapse, Collapse, TOKEN_KINDS};
use crate::token::TokenKind;

use super::core::Scanner;
use super::identifier::is_identifier_continue;

impl Scanner<'_> {
    /// Try the two-character detectors: negation fusion and `:=`.
    pub(super) fn two_char_token(&mut self) -> bool {
        let c = self.cursor.current_char();
        let next = self.cursor.peek(1);

        if next == '\0' || next.is_whitespace() {
            return false;
        }

        if c == '¬' || c == '!' {
            if let Some(collapse) = negation_collapse(next) {
                // `¬T`/`¬1` only fuse when the letter or digit is the whole
                // literal; `¬True` and `¬10` scan as a lone prefix negation.
                if next.is_ascii_alphanumeric() && is_identifier_continue(self.cursor.peek(2)) {
                    return false;
                }

                let start = self.token_start();
                self.cursor.advance_by(2);
                match collapse {
                    Collapse::Vanish => {}
                    Collapse::Operator(op) => self.push_text(op, TokenKind::Operator, start),
                    Collapse::Boolean(value) => self.push_boolean(value, start),
                }
                return true;
            }
            return false;
        }

        if c == ':' && next == '=' {
            let start = self.token_start();
            self.cursor.advance_by(2);
            self.push_text(":=", TokenKind::Statement, start);
            return true;
        }

        false
    }

    /// Try the single-character lexicon. Returns false for characters the
    /// lexicon does not know.
    pub(super) fn single_char_token(&mut self) -> bool {
        let c = self.cursor.current_char();
        let lexeme = c.to_string();

        let Some(&kind) = TOKEN_KINDS.get(lexeme.as_str()) else {
            return false;
        };

        let start = self.token_start();
        self.cursor.advance();
        match c {
            '⊤' => self.push_boolean(true, start),
            '⊥' | '∅' => {
                // Both scan as definite falsity; `∅` keeps its glyph so
                // residuals can still show the empty set.
                let spelled = if c == '∅' { "∅" } else { "False" };
                self.push_boolean_spelled(spelled, false, start);
            }
            _ => self.push_text(lexeme, kind, start),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::scanner::scan;
    use crate::token::{TokenKind, Truth};

    fn texts(source: &str) -> Vec<String> {
        scan(source)
            .unwrap()
            .iter()
            .map(|t| t.text().to_string())
            .collect()
    }

    #[test]
    fn test_double_negation_vanishes() {
        assert_eq!(texts("1.  ¬¬p .$$"), texts("1.  p .$$"));
        assert_eq!(texts("1.  !!p .$$"), texts("1.  p .$$"));
        assert_eq!(texts("1.  ¬!p .$$"), texts("1.  p .$$"));
        assert_eq!(texts("1.  !¬p .$$"), texts("1.  p .$$"));
    }

    #[test]
    fn test_negated_connectives_rewrite() {
        assert_eq!(texts("1.  p ¬∧ q .$$")[1], "↑");
        assert_eq!(texts("1.  p ¬∨ q .$$")[1], "↓");
        assert_eq!(texts("1.  p ¬⨁ q .$$")[1], "≡");
        assert_eq!(texts("1.  p ¬≡ q .$$")[1], "⨁");
        assert_eq!(texts("1.  p ¬↑ q .$$")[1], "∧");
        assert_eq!(texts("1.  p ¬↓ q .$$")[1], "∨");
        assert_eq!(texts("1.  p !& q .$$")[1], "↑");
    }

    #[test]
    fn test_negated_membership() {
        assert_eq!(texts("1.  p ¬∈ {a} .$$")[1], "∉");
        assert_eq!(texts("1.  p ¬∉ {a} .$$")[1], "∈");
    }

    #[test]
    fn test_negated_quantifiers_keep_identity() {
        assert_eq!(texts("1.  ¬∃p .$$")[0], "¬∃");
        assert_eq!(texts("1.  ¬∀p .$$")[0], "¬∀");
        assert_eq!(texts("1.  !∃p .$$")[0], "¬∃");
        assert_eq!(texts("1.  !∀p .$$")[0], "¬∀");
    }

    #[test]
    fn test_negated_booleans_flip() {
        let tokens = scan("1.  ¬T .$$").unwrap();
        assert_eq!(tokens[0].text(), "False");
        assert_eq!(tokens[0].value, Truth::False);
        let tokens = scan("1.  !⊥ .$$").unwrap();
        assert_eq!(tokens[0].text(), "True");
        let tokens = scan("1.  ¬0 .$$").unwrap();
        assert_eq!(tokens[0].value, Truth::True);
        let tokens = scan("1.  ¬1 .$$").unwrap();
        assert_eq!(tokens[0].value, Truth::False);
    }

    #[test]
    fn test_negation_before_word_stays_prefix() {
        let tokens = scan("1.  ¬True .$$").unwrap();
        assert_eq!(tokens[0].text(), "¬");
        assert_eq!(tokens[0].kind, TokenKind::Operator);
        assert_eq!(tokens[1].text(), "True");
    }

    #[test]
    fn test_negation_before_identifier_stays_prefix() {
        let tokens = scan("1.  ¬p .$$").unwrap();
        assert_eq!(tokens[0].text(), "¬");
        assert_eq!(tokens[1].text(), "p");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_spaced_negation_never_fuses() {
        let tokens = scan("1.  ¬ T .$$").unwrap();
        assert_eq!(tokens[0].text(), "¬");
        assert_eq!(tokens[1].text(), "True");
    }

    #[test]
    fn test_assignment_statement_token() {
        let tokens = scan("1.  val x := 1 .$$").unwrap();
        let assign = tokens.iter().find(|t| t.is_text(":=")).unwrap();
        assert_eq!(assign.kind, TokenKind::Statement);
    }

    #[test]
    fn test_colon_alone_is_operator() {
        let tokens = scan("1.  p : q .$$").unwrap();
        assert_eq!(tokens[1].text(), ":");
        assert_eq!(tokens[1].kind, TokenKind::Operator);
    }

    #[test]
    fn test_substitution_slash_is_single() {
        let tokens = scan("1.  /p ≡ q .$$").unwrap();
        assert_eq!(tokens[0].text(), "/");
        assert_eq!(tokens[0].kind, TokenKind::Operator);
        assert_eq!(tokens[1].text(), "p");
    }

    #[test]
    fn test_empty_set_glyph() {
        let tokens = scan("1.  ∅ ∨ p .$$").unwrap();
        assert_eq!(tokens[0].text(), "∅");
        assert_eq!(tokens[0].value, Truth::False);
    }

    #[test]
    fn test_containers() {
        let tokens = scan("1.  (p) .$$").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Container);
        assert_eq!(tokens[2].kind, TokenKind::Container);
    }
}
