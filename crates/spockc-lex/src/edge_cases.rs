//! Edge case tests for spockc-lex

#[cfg(test)]
mod tests {
    use crate::scanner::scan;
    use crate::token::TokenKind;

    fn texts(source: &str) -> Vec<String> {
        scan(source)
            .unwrap()
            .iter()
            .map(|t| t.text().to_string())
            .collect()
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_minimal_program() {
        assert_eq!(texts("1.  True .$$"), vec!["True", ".", "$$"]);
    }

    #[test]
    fn test_edge_terminator_only_line() {
        let tokens = scan("1.  p .$$").unwrap();
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "a".repeat(5000);
        let tokens = scan(&format!("1.  {} .$$", name)).unwrap();
        assert_eq!(tokens[0].text(), name);
    }

    #[test]
    fn test_edge_crlf_line_endings() {
        let tokens = scan("1.  p .\r\n2.  q .$$").unwrap();
        let q = tokens.iter().find(|t| t.is_text("q")).unwrap();
        assert_eq!(q.line, 2);
    }

    #[test]
    fn test_edge_nothing_after_early_terminator() {
        // The scan stops at the first `$$`; the suffix rule still holds
        // because the source also ends with it.
        let tokens = scan("1.  p .$$").unwrap();
        assert_eq!(tokens.last().unwrap().text(), "$$");
    }

    #[test]
    fn test_edge_large_line_number() {
        let tokens = scan("99999.  p .$$").unwrap();
        // The written number is framing, not a token, and the scanner
        // counts lines itself.
        assert_eq!(tokens[0].text(), "p");
        assert_eq!(tokens[0].line, 1);
    }

    #[test]
    fn test_edge_line_number_value_ignored() {
        let tokens = scan("7.  p .\n3.  q .$$").unwrap();
        let q = tokens.iter().find(|t| t.is_text("q")).unwrap();
        assert_eq!(q.line, 2);
    }

    #[test]
    fn test_edge_tab_after_framing_spaces() {
        let tokens = scan("1.  \tp .$$").unwrap();
        assert_eq!(tokens[0].text(), "p");
    }

    #[test]
    fn test_edge_every_operator_scans() {
        let tokens = scan("1.  p ∧ q ∨ r → s ⨁ t ↓ u ↑ v & w ↔ x ≡ y .$$").unwrap();
        let ops: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Operator)
            .map(|t| t.text())
            .collect();
        assert_eq!(ops, vec!["∧", "∨", "→", "⨁", "↓", "↑", "&", "↔", "≡"]);
    }

    #[test]
    fn test_edge_quantifiers() {
        let tokens = scan("1.  ∃p ∧ ∀q .$$").unwrap();
        assert_eq!(tokens[0].text(), "∃");
        assert_eq!(tokens[0].kind, TokenKind::Operator);
        assert_eq!(tokens[3].text(), "∀");
    }

    #[test]
    fn test_edge_membership_glyphs() {
        let tokens = scan("1.  p ∈ q ∧ r ∉ s .$$").unwrap();
        assert_eq!(tokens[1].text(), "∈");
        assert_eq!(tokens[5].text(), "∉");
    }

    #[test]
    fn test_edge_comment_before_framing_consumed_line() {
        // A comment opening on line 1 and closing on line 2 deletes the
        // newline, so the text after `*/` continues line 1.
        let tokens = scan("1.  p ∧ /* c1\nc2 */ q .$$").unwrap();
        let q = tokens.iter().find(|t| t.is_text("q")).unwrap();
        assert_eq!(q.line, 1);
    }

    #[test]
    fn test_edge_adjacent_comments() {
        let tokens = scan("1.  p /* a */ /* b */ ∧ q .$$").unwrap();
        assert_eq!(
            tokens.iter().map(|t| t.text()).collect::<Vec<_>>(),
            vec!["p", "∧", "q", ".", "$$"]
        );
    }

    #[test]
    fn test_edge_comment_is_not_nested() {
        // `/* /* */` closes at the first `*/`; the second `*/` is stray.
        let err = scan("1.  p /* /* */ */ .$$").unwrap_err();
        assert_eq!(err.message, "unmatched comment terminator '*/'");
    }

    #[test]
    fn test_edge_multiple_semicolons() {
        let tokens = scan("1.  p ; q ; r .$$").unwrap();
        let lines: Vec<u32> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Identifier)
            .map(|t| t.line)
            .collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn test_edge_fusion_at_line_start() {
        let tokens = scan("1.  ¬⊤ .$$").unwrap();
        assert_eq!(tokens[0].text(), "False");
    }

    #[test]
    fn test_edge_dollar_alone_is_undefined() {
        let err = scan("1.  $p .$$").unwrap_err();
        assert!(err.message.contains("'$'"));
    }

    #[test]
    fn test_edge_unknown_glyph() {
        let err = scan("1.  p ⊆ q .$$").unwrap_err();
        assert!(err.message.contains("Token not yet defined or implemented"));
    }
}

#[cfg(test)]
mod properties {
    use crate::scanner::scan;
    use crate::token::TokenKind;
    use proptest::prelude::*;

    fn stream_shape(source: &str) -> Option<Vec<(String, TokenKind)>> {
        scan(source)
            .ok()
            .map(|ts| ts.into_iter().map(|t| (t.text().to_string(), t.kind)).collect())
    }

    proptest! {
        /// Double negation in front of any identifier collapses away:
        /// `¬¬x` and `x` scan to the same token shapes.
        #[test]
        fn prop_double_negation_collapses(name in "[a-z][a-z0-9_]{0,12}") {
            let plain = stream_shape(&format!("1.  {} .$$", name));
            let negated = stream_shape(&format!("1.  ¬¬{} .$$", name));
            prop_assert_eq!(plain, negated);
        }

        /// The scanner never panics and, when it accepts, the stream ends
        /// with the `$$` sentinel and nothing follows it.
        #[test]
        fn prop_sentinel_terminates(body in "[a-z ∧∨¬(){},.]{0,40}") {
            if let Ok(tokens) = scan(&format!("1.  {} .$$", body)) {
                let sentinel = tokens.iter().position(|t| t.is_text("$$"));
                prop_assert_eq!(sentinel, Some(tokens.len() - 1));
            }
        }

        /// Scanning is deterministic.
        #[test]
        fn prop_deterministic(body in "[a-zTF01 ∧∨→¬!]{0,30}") {
            let source = format!("1.  {} .$$", body);
            prop_assert_eq!(stream_shape(&source), stream_shape(&source));
        }
    }
}
