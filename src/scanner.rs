use crate::{
    error::{Error, Result},
    token::{Literal, Token, TokenKind},
};
use peekmore::{PeekMore, PeekMoreIterator};
use phf::phf_map;
use std::str::CharIndices;
use tracing::{debug, trace};

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "and" => TokenKind::And,
    "class" => TokenKind::Class,
    "else" => TokenKind::Else,
    "false" => TokenKind::False,
    "for" => TokenKind::For,
    "fun" => TokenKind::Fun,
    "if" => TokenKind::If,
    "nil" => TokenKind::Nil,
    "or" => TokenKind::Or,
    "print" => TokenKind::Print,
    "return" => TokenKind::Return,
    "super" => TokenKind::Super,
    "this" => TokenKind::This,
    "true" => TokenKind::True,
    "var" => TokenKind::Var,
    "while" => TokenKind::While,
};

/// Receives lexical errors as `(line, location, message)`.
///
/// The scanner never decides whether an error is fatal, it only hands
/// each one to the reporter in source order.
pub trait Reporter {
    fn error(&mut self, line: usize, location: &str, message: &str);
}

/// Collects each report as a lexical `Error`. Scanner reports never carry
/// a location, so nothing is lost.
impl Reporter for Vec<Error> {
    fn error(&mut self, line: usize, _location: &str, message: &str) {
        self.push(Error::lexical(line, message))
    }
}

pub struct Scanner<'a> {
    source: &'a str,
    src: PeekMoreIterator<CharIndices<'a>>,
    start: usize,
    current: usize,
    line: usize,
}

/// Yields one token or one lexical error per step, skipping whitespace and
/// comments. The end-of-file token is not yielded; see `scan`.
impl <'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        loop {
            self.start = self.current;
            let next_char = self.advance()?;
            if let Some(token) = self.scan_token(next_char) {
                return Some(token);
            }
        }
    }
}

impl <'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            src: source.char_indices().peekmore(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Scans the whole source, handing every lexical error to `reporter`
    /// as it is found. The returned tokens always end with a single
    /// `EndOfFile`.
    #[tracing::instrument(level = "debug", skip_all, fields(len = self.source.len()))]
    pub fn scan_tokens(mut self, reporter: &mut dyn Reporter) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut error_count = 0;

        for result in self.by_ref() {
            match result {
                Ok(token) => {
                    trace!(kind = %token.kind, line = token.line, lexeme = token.lexeme.as_str(), "token");
                    tokens.push(token);
                },
                Err(e) => {
                    debug!(line = e.line(), message = e.message(), "lexical error");
                    reporter.error(e.line(), e.location(), e.message());
                    error_count += 1;
                },
            }
        }

        tokens.push(Token::end_of_file(self.line));
        debug!(tokens = tokens.len(), errors = error_count, "scan complete");
        tokens
    }

    /// Scans the whole source, returning the tokens alongside every
    /// lexical error found.
    pub fn scan(self) -> (Vec<Token>, Vec<Error>) {
        let mut errors = Vec::new();
        let tokens = self.scan_tokens(&mut errors);
        (tokens, errors)
    }

    fn scan_token(&mut self, c: char) -> Option<Result<Token>> {
        use TokenKind::*;
        match c {
            '(' => Some(Ok(self.make(LeftParen))),
            ')' => Some(Ok(self.make(RightParen))),
            '{' => Some(Ok(self.make(LeftBrace))),
            '}' => Some(Ok(self.make(RightBrace))),
            ',' => Some(Ok(self.make(Comma))),
            '.' => Some(Ok(self.make(Dot))),
            '-' => Some(Ok(self.make(Minus))),
            '+' => Some(Ok(self.make(Plus))),
            '*' => Some(Ok(self.make(Star))),
            '!' => {
                let kind = if self.does_next_match('=') { BangEqual } else { Bang };
                Some(Ok(self.make(kind)))
            },
            '=' => {
                let kind = if self.does_next_match('=') { EqualEqual } else { Equal };
                Some(Ok(self.make(kind)))
            },
            '<' => {
                let kind = if self.does_next_match('=') { LessEqual } else { Less };
                Some(Ok(self.make(kind)))
            },
            '>' => {
                let kind = if self.does_next_match('=') { GreaterEqual } else { Greater };
                Some(Ok(self.make(kind)))
            },
            '/' => {
                if self.does_next_match('/') { // comment runs to the end of the line
                    self.advance_until(|n| n == '\n');
                    None
                } else {
                    Some(Ok(self.make(Slash)))
                }
            },
            ' ' | '\r' | '\t' => None,
            '\n' => {
                self.line += 1;
                None
            },
            '"' => Some(self.extract_string()),
            c if c.is_ascii_digit() => Some(Ok(self.extract_number())),
            c if c.is_alphabetic() => Some(Ok(self.extract_identifier())),
            c => Some(Err(Error::unexpected_character(self.line, c))),
        }
    }

    fn advance(&mut self) -> Option<char> {
        let (index, c) = self.src.next()?;
        self.current = index + c.len_utf8();
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.src.peek_nth(0).map(|&(_, c)| c)
    }

    fn peek_next(&mut self) -> Option<char> {
        self.src.peek_nth(1).map(|&(_, c)| c)
    }

    fn does_next_match(&mut self, c: char) -> bool {
        match self.peek() {
            Some(next) if c == next => {
                self.advance();
                true
            },
            _ => false,
        }
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn make(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.lexeme(), None, self.line)
    }

    fn make_literal(&self, kind: TokenKind, literal: Literal) -> Token {
        Token::new(kind, self.lexeme(), Some(literal), self.line)
    }

    fn extract_string(&mut self) -> Result<Token> {
        let mut newline_count = 0;
        self.advance_until_for_each(|n| n == '"', |c| if c == '\n' { newline_count += 1 });
        self.line += newline_count;

        match self.advance() {
            None => Err(Error::unterminated_string(self.line)),
            Some(_) => { // must be the closing quote
                let value = &self.source[self.start + 1..self.current - 1];
                Ok(self.make_literal(TokenKind::String, Literal::String(value.to_string())))
            },
        }
    }

    fn extract_number(&mut self) -> Token {
        self.advance_until(|n| !n.is_ascii_digit());

        if self.peek() == Some('.') {
            if let Some(maybe_digit) = self.peek_next() {
                if maybe_digit.is_ascii_digit() {
                    self.advance();
                    self.advance_until(|n| !n.is_ascii_digit());
                }
            }
        }

        // only ASCII digits with an optional fraction get here
        let number = self.lexeme().parse().expect("digit run is a valid f64");
        self.make_literal(TokenKind::Number, Literal::Number(number))
    }

    fn extract_identifier(&mut self) -> Token {
        self.advance_until(|n| !n.is_alphanumeric());

        let kind = KEYWORDS.get(self.lexeme()).copied().unwrap_or(TokenKind::Identifier);
        self.make(kind)
    }

    fn advance_until(&mut self, should_stop: impl Fn(char) -> bool) {
        self.advance_until_for_each(should_stop, |_| {})
    }

    fn advance_until_for_each(
        &mut self,
        should_stop: impl Fn(char) -> bool,
        mut f: impl FnMut(char),
    ) {
        while let Some(next) = self.peek() {
            if should_stop(next) { break }
            self.advance();
            f(next);
        }
    }
}
