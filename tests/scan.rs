use lox_scanner::{
    scanner::Scanner,
    token::{Literal, Token, TokenKind},
    Error,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn scan(source: &str) -> (Vec<Token>, Vec<Error>) {
    Scanner::new(source).scan()
}

#[test]
fn small_program() {
    let source = "\
// greet someone
fun greet(name) {
  print \"hello \" + name
}

greet(\"world\")
";
    let (tokens, errors) = scan(source);
    assert!(errors.is_empty());

    let summary: Vec<_> = tokens
        .iter()
        .map(|t| (t.kind(), t.lexeme(), t.line()))
        .collect();

    use TokenKind::*;
    assert_eq!(
        vec![
            (Fun, "fun", 2),
            (Identifier, "greet", 2),
            (LeftParen, "(", 2),
            (Identifier, "name", 2),
            (RightParen, ")", 2),
            (LeftBrace, "{", 2),
            (Print, "print", 3),
            (String, "\"hello \"", 3),
            (Plus, "+", 3),
            (Identifier, "name", 3),
            (RightBrace, "}", 4),
            (Identifier, "greet", 6),
            (LeftParen, "(", 6),
            (String, "\"world\"", 6),
            (RightParen, ")", 6),
            (EndOfFile, "", 7),
        ],
        summary,
    );
}

#[test]
fn errors_do_not_stop_scanning() {
    let (tokens, errors) = scan("a # b\n\"never closed");
    let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
    assert_eq!(
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::EndOfFile],
        kinds,
    );
    let rendered: Vec<_> = errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        vec![
            "[line 1] Error: Unexpected character '#'.".to_string(),
            "[line 2] Error: Unterminated string.".to_string(),
        ],
        rendered,
    );
}

#[test]
fn scanning_is_repeatable() {
    let source = "var answer = 42.0 // comment\nanswer >= 7";
    assert_eq!(scan(source), scan(source));
}

#[test]
fn number_literals() {
    let (tokens, _) = scan("0 007 2.75");
    let literals: Vec<_> = tokens.iter().filter_map(Token::literal).cloned().collect();
    assert_eq!(
        vec![Literal::Number(0.0), Literal::Number(7.0), Literal::Number(2.75)],
        literals,
    );
}

fn lexeme_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "(", ")", "{", "}", ",", ".", "-", "+", "*", "/",
            "!", "!=", "=", "==", "<", "<=", ">", ">=",
            "and", "class", "else", "false", "for", "fun", "if", "nil",
            "or", "print", "return", "super", "this", "true", "var", "while",
        ])
        .prop_map(str::to_string),
        "[a-zA-Z][a-zA-Z0-9]{0,8}",
        "[0-9]{1,5}(\\.[0-9]{1,3})?",
        "\"[a-z \\n]{0,6}\"",
    ]
}

fn separator_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ \\t\\r\\n]{1,3}",
        "[ \\t] //[a-z ]{0,8}\\n",
    ]
}

proptest! {
    #[test]
    fn end_of_file_is_last_and_unique(source in any::<String>()) {
        let (tokens, _) = scan(&source);
        prop_assert_eq!(Some(TokenKind::EndOfFile), tokens.last().map(Token::kind));
        let count = tokens.iter().filter(|t| t.kind() == TokenKind::EndOfFile).count();
        prop_assert_eq!(1, count);
    }

    #[test]
    fn lexemes_and_skipped_spans_rebuild_source(
        pieces in prop::collection::vec((lexeme_strategy(), separator_strategy()), 0..24)
    ) {
        let source: String = pieces
            .iter()
            .map(|(lexeme, separator)| format!("{}{}", lexeme, separator))
            .collect();

        let (tokens, errors) = scan(&source);
        prop_assert!(errors.is_empty());
        prop_assert_eq!(pieces.len() + 1, tokens.len());

        let mut rebuilt = String::new();
        for ((expected, separator), token) in pieces.iter().zip(tokens.iter()) {
            prop_assert_eq!(expected.as_str(), token.lexeme());
            rebuilt.push_str(token.lexeme());
            rebuilt.push_str(separator);
        }
        prop_assert_eq!(source, rebuilt);
    }
}
