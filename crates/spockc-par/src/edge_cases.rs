//! Edge case tests for spockc-par

#[cfg(test)]
mod tests {
    use crate::parse;
    use spockc_lex::scan;

    fn rpn_texts(source: &str) -> Vec<Vec<String>> {
        parse(&scan(source).unwrap())
            .unwrap()
            .into_iter()
            .map(|line| line.into_iter().map(|t| t.text().to_string()).collect())
            .collect()
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_single_operand_line() {
        assert_eq!(rpn_texts("1.  p .$$"), vec![vec!["p"]]);
    }

    #[test]
    fn test_edge_single_boolean() {
        assert_eq!(rpn_texts("1.  True .$$"), vec![vec!["True"]]);
    }

    #[test]
    fn test_edge_redundant_parens_flatten() {
        assert_eq!(rpn_texts("1.  ((p ∧ q)) .$$"), vec![vec!["p", "q", "∧"]]);
    }

    #[test]
    fn test_edge_empty_group_plans_nothing() {
        // `( )` contributes no tokens, so its line has no RPN entry.
        let lines = rpn_texts("1.  ( ) .$$");
        assert_eq!(lines, Vec::<Vec<String>>::new());
    }

    #[test]
    fn test_edge_empty_group_adjacent_to_operand() {
        let err = parse(&scan("1.  ( ) p .$$").unwrap()).unwrap_err();
        assert!(err.message.contains("two adjacent operands"));
    }

    #[test]
    fn test_edge_deep_right_nesting() {
        assert_eq!(
            rpn_texts("1.  p → (q → (r → s)) .$$"),
            vec![vec!["p", "q", "r", "s", "→", "→", "→"]]
        );
    }

    #[test]
    fn test_edge_mixed_precedence_ladder() {
        // ↑ (5) before ∧ (6) before ⨁ (7) before ∨ (9) before → (10)
        assert_eq!(
            rpn_texts("1.  a → b ∨ c ⨁ d ∧ e ↑ f .$$"),
            vec![vec!["a", "b", "c", "d", "e", "f", "↑", "∧", "⨁", "∨", "→"]]
        );
    }

    #[test]
    fn test_edge_equivalence_is_loosest() {
        assert_eq!(
            rpn_texts("1.  p → q ≡ r .$$"),
            vec![vec!["p", "q", "→", "r", "≡"]]
        );
    }

    #[test]
    fn test_edge_quantifier_over_group() {
        assert_eq!(
            rpn_texts("1.  ∀(p → q) .$$"),
            vec![vec!["p", "q", "→", "∀"]]
        );
    }

    #[test]
    fn test_edge_negated_quantifier_token() {
        assert_eq!(rpn_texts("1.  ¬∃p .$$"), vec![vec!["p", "¬∃"]]);
    }

    #[test]
    fn test_edge_three_statements() {
        assert_eq!(
            rpn_texts("1.  p .\n2.  q .\n3.  r .$$"),
            vec![vec!["p"], vec!["q"], vec!["r"]]
        );
    }

    #[test]
    fn test_edge_comma_separates_without_grouping() {
        assert_eq!(rpn_texts("1.  p , ∧ q .$$").len(), 1);
    }

    #[test]
    fn test_edge_number_is_an_operand() {
        assert_eq!(rpn_texts("1.  42 .$$"), vec![vec!["42"]]);
    }

    #[test]
    fn test_edge_coordinates_present_after_parse() {
        let tokens = scan("1.  p ∧ (q) .$$").unwrap();
        let rpn = crate::parse(&tokens).unwrap();
        for line in &rpn {
            for token in line {
                assert!(token.coords.is_some(), "token {:?} lacks coords", token.text());
            }
        }
    }

    #[test]
    fn test_edge_rpn_is_operator_terminated() {
        let rpn = rpn_texts("1.  p ∧ q ∨ ¬r .$$");
        assert_eq!(rpn[0].last().unwrap(), "∨");
    }
}
