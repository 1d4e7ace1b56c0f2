//! Token definitions for the Spock language.
//!
//! A token is a record, not a bare tag: downstream stages read and decorate
//! its location, coordinate, and truth-value fields. Set literals carry a
//! nested display map as their lexeme instead of text.

use indexmap::IndexMap;

/// Classification of a token, mirroring the lexicon's kind table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `⊤`, `⊥`, `True`, `0`, `1`, `∅` and friends
    Boolean,
    /// Logical operators, quantifiers, membership, substitution
    Operator,
    /// User identifiers and the reserved `φ`, `ϕ`, `ψ`
    Identifier,
    /// Digit runs other than `0`/`1`
    Number,
    /// `(`, `)`, `{`, `}`, `set`
    Container,
    /// A parsed set literal (parser-made; the scanner never emits these)
    Set,
    /// Statement starters: `:=`, `val`
    Statement,
    /// `.`, `,`, `;`, `$$`, comment fences
    Delimiter,
}

impl TokenKind {
    /// True for the kinds the RPN planner treats as operands.
    #[inline]
    pub fn is_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::Boolean | TokenKind::Number | TokenKind::Set
        )
    }
}

/// Three-valued truth: definite `True`/`False`, or symbolic `Unknown`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Truth {
    True,
    False,
    #[default]
    Unknown,
}

impl Truth {
    /// True when the value is not `Unknown`.
    #[inline]
    pub fn is_definite(&self) -> bool {
        !matches!(self, Truth::Unknown)
    }
}

impl From<bool> for Truth {
    #[inline]
    fn from(b: bool) -> Self {
        if b {
            Truth::True
        } else {
            Truth::False
        }
    }
}

/// The elements of a set literal, keyed by their display text.
///
/// Insertion order is the source order of the elements; inserting a
/// duplicate display key collapses it, which is how set literals
/// deduplicate.
pub type SetMap = IndexMap<String, SetEntry>;

/// One element of a set literal.
#[derive(Clone, Debug, PartialEq)]
pub enum SetEntry {
    /// A scalar element, stored as its display text
    Scalar(String),
    /// A nested set
    Set(SetMap),
}

/// Render a set map as `{v1, v2, …}`, values only, recursing into nested
/// sets. An empty map renders as `{}` (the empty *outer* set never reaches
/// here; the parser degrades it to a boolean token).
pub fn set_display(map: &SetMap) -> String {
    let parts: Vec<String> = map
        .values()
        .map(|entry| match entry {
            SetEntry::Scalar(s) => s.clone(),
            SetEntry::Set(inner) => set_display(inner),
        })
        .collect();
    format!("{{{}}}", parts.join(", "))
}

/// A token's lexeme: text for everything except set literals.
#[derive(Clone, Debug, PartialEq)]
pub enum Lexeme {
    Text(String),
    Set(SetMap),
}

impl Lexeme {
    /// The lexeme text, or `""` for a set lexeme.
    #[inline]
    pub fn text(&self) -> &str {
        match self {
            Lexeme::Text(s) => s,
            Lexeme::Set(_) => "",
        }
    }
}

/// Planner coordinates, assigned to every token after grouping.
///
/// `depth` is the nesting level (0 at top), `gpad` the 0-based ordinal of
/// the containing group among all groups at that depth, `pig` the 0-based
/// position within the group, `op_prec` the operator precedence (99 for
/// non-operators).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coords {
    pub depth: u32,
    pub gpad: u32,
    pub pig: u32,
    pub op_prec: u8,
}

/// A scanned (and later decorated) token.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// Lexeme text, or the element map for set literals
    pub lexeme: Lexeme,
    /// Lexicon classification
    pub kind: TokenKind,
    /// Logical line, 1-based (`;` opens a new logical line)
    pub line: u32,
    /// Column within the physical line, 1-based
    pub column: u32,
    /// Byte offset in the comment-stripped source
    pub position: usize,
    /// Three-valued truth; definite only for boolean tokens
    pub value: Truth,
    /// Planner coordinates, absent until grouping
    pub coords: Option<Coords>,
}

impl Token {
    /// Build a text token with an unknown value.
    pub fn new(
        lexeme: impl Into<String>,
        kind: TokenKind,
        line: u32,
        column: u32,
        position: usize,
    ) -> Self {
        Self {
            lexeme: Lexeme::Text(lexeme.into()),
            kind,
            line,
            column,
            position,
            value: Truth::Unknown,
            coords: None,
        }
    }

    /// Build a boolean token with a definite value and a normalized
    /// `True`/`False` lexeme.
    pub fn boolean(value: bool, line: u32, column: u32, position: usize) -> Self {
        Self {
            lexeme: Lexeme::Text(if value { "True" } else { "False" }.into()),
            kind: TokenKind::Boolean,
            line,
            column,
            position,
            value: value.into(),
            coords: None,
        }
    }

    /// Build a set-literal token from its element map.
    pub fn set(map: SetMap, line: u32, column: u32, position: usize) -> Self {
        Self {
            lexeme: Lexeme::Set(map),
            kind: TokenKind::Set,
            line,
            column,
            position,
            value: Truth::Unknown,
            coords: None,
        }
    }

    /// The lexeme text (`""` for set lexemes).
    #[inline]
    pub fn text(&self) -> &str {
        self.lexeme.text()
    }

    /// True when the lexeme is exactly `s`.
    #[inline]
    pub fn is_text(&self, s: &str) -> bool {
        self.text() == s
    }

    /// Display form used when the token appears inside a residual:
    /// the lexeme text, or `{v1, v2, …}` for sets.
    pub fn display(&self) -> String {
        match &self.lexeme {
            Lexeme::Text(s) => s.clone(),
            Lexeme::Set(map) => set_display(map),
        }
    }

    /// Nesting depth from the planner coordinates (0 before assignment).
    #[inline]
    pub fn depth(&self) -> u32 {
        self.coords.map(|c| c.depth).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truth_from_bool() {
        assert_eq!(Truth::from(true), Truth::True);
        assert_eq!(Truth::from(false), Truth::False);
        assert!(Truth::True.is_definite());
        assert!(!Truth::Unknown.is_definite());
    }

    #[test]
    fn test_boolean_token_normalizes_lexeme() {
        let t = Token::boolean(true, 1, 5, 4);
        assert_eq!(t.text(), "True");
        assert_eq!(t.value, Truth::True);
        assert_eq!(t.kind, TokenKind::Boolean);
    }

    #[test]
    fn test_operand_kinds() {
        assert!(TokenKind::Identifier.is_operand());
        assert!(TokenKind::Boolean.is_operand());
        assert!(TokenKind::Number.is_operand());
        assert!(TokenKind::Set.is_operand());
        assert!(!TokenKind::Operator.is_operand());
        assert!(!TokenKind::Container.is_operand());
        assert!(!TokenKind::Delimiter.is_operand());
    }

    #[test]
    fn test_set_display_flat() {
        let mut map = SetMap::new();
        map.insert("a".into(), SetEntry::Scalar("a".into()));
        map.insert("b".into(), SetEntry::Scalar("b".into()));
        assert_eq!(set_display(&map), "{a, b}");
    }

    #[test]
    fn test_set_display_nested() {
        let mut inner = SetMap::new();
        inner.insert("x".into(), SetEntry::Scalar("x".into()));
        let mut map = SetMap::new();
        map.insert("a".into(), SetEntry::Scalar("a".into()));
        map.insert("{x}".into(), SetEntry::Set(inner));
        assert_eq!(set_display(&map), "{a, {x}}");
    }

    #[test]
    fn test_set_display_dedup() {
        let mut map = SetMap::new();
        map.insert("a".into(), SetEntry::Scalar("a".into()));
        map.insert("a".into(), SetEntry::Scalar("a".into()));
        assert_eq!(set_display(&map), "{a}");
    }

    #[test]
    fn test_token_display_for_set() {
        let mut map = SetMap::new();
        map.insert("p".into(), SetEntry::Scalar("p".into()));
        let t = Token::set(map, 1, 9, 12);
        assert_eq!(t.display(), "{p}");
        assert_eq!(t.text(), "");
    }

    #[test]
    fn test_depth_defaults_to_zero() {
        let t = Token::new("p", TokenKind::Identifier, 1, 5, 4);
        assert_eq!(t.depth(), 0);
        assert!(t.coords.is_none());
    }
}
