//! logos-based tokenizer for declaration values.
//!
//! Stylesheet structure (selectors, braces, `;`) is handled line by line in
//! [`crate::css::parser`]; this lexer only splits the right-hand side of a
//! `key: value` declaration.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `12px` as Dimension beats `12` as Number)
//! 2. For equal length matches, earlier-defined variants win

use logos::Logos;

/// Declaration value token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Number with unit suffix: `50%`, `12px`, `12p`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?(%|px|p)")]
    Dimension,

    /// Number: integer or float, possibly negative.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Identifier: keywords, function names, sprite names (`ui/button.png`).
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_./-]*")]
    Ident,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// `,`
    #[token(",")]
    Comma,
}

/// Tokenize a declaration value into `(Token, text)` pairs.
///
/// Characters the lexer does not recognise are skipped.
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    let lexer = Token::lexer(input);
    lexer
        .spanned()
        .filter_map(|(result, span)| {
            result.ok().map(|token| (token, input[span].to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).into_iter().map(|(t, _)| t).collect()
    }

    // ── Numbers and dimensions ───────────────────────────────────────

    #[test]
    fn test_numbers() {
        let result = tokenize("10 -5 3.14 0");
        assert_eq!(result[0], (Token::Number, "10".into()));
        assert_eq!(result[1], (Token::Number, "-5".into()));
        assert_eq!(result[2], (Token::Number, "3.14".into()));
        assert_eq!(result[3], (Token::Number, "0".into()));
    }

    #[test]
    fn test_dimensions() {
        let result = tokenize("50% 12px 7p -10%");
        assert_eq!(result[0], (Token::Dimension, "50%".into()));
        assert_eq!(result[1], (Token::Dimension, "12px".into()));
        assert_eq!(result[2], (Token::Dimension, "7p".into()));
        assert_eq!(result[3], (Token::Dimension, "-10%".into()));
    }

    #[test]
    fn test_dimension_over_number() {
        assert_eq!(tokens("12px"), vec![Token::Dimension]);
        assert_eq!(tokens("12"), vec![Token::Number]);
    }

    // ── Identifiers ──────────────────────────────────────────────────

    #[test]
    fn test_keywords_and_sprite_names() {
        let result = tokenize("center right ui/button.png");
        assert_eq!(result[0], (Token::Ident, "center".into()));
        assert_eq!(result[1], (Token::Ident, "right".into()));
        assert_eq!(result[2], (Token::Ident, "ui/button.png".into()));
    }

    // ── Colours ──────────────────────────────────────────────────────

    #[test]
    fn test_rgba_function() {
        assert_eq!(
            tokens("RGBA(128, 70, 27, 255)"),
            vec![
                Token::Ident,
                Token::ParenOpen,
                Token::Number,
                Token::Comma,
                Token::Number,
                Token::Comma,
                Token::Number,
                Token::Comma,
                Token::Number,
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn test_border_shorthand() {
        assert_eq!(
            tokens("2 RGBA(1,2,3)"),
            vec![
                Token::Number,
                Token::Ident,
                Token::ParenOpen,
                Token::Number,
                Token::Comma,
                Token::Number,
                Token::Comma,
                Token::Number,
                Token::ParenClose,
            ]
        );
    }

    // ── Strings ──────────────────────────────────────────────────────

    #[test]
    fn test_string_literals() {
        let result = tokenize(r#""atlas.gorilla" 'other'"#);
        assert_eq!(result[0], (Token::StringLiteral, "\"atlas.gorilla\"".into()));
        assert_eq!(result[1], (Token::StringLiteralSingle, "'other'".into()));
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        assert_eq!(tokens("12 ! ~ 3"), vec![Token::Number, Token::Number]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokens("").is_empty());
        assert!(tokens("   \t ").is_empty());
    }
}
