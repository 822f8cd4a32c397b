//! Minimal ASCII tokenizer for exercising the offside engine in tests.
//!
//! The shipped crates treat tokenization as an external concern; test
//! suites still need token streams with accurate spans and line/column
//! positions, which this crate produces for simple C-like snippets:
//! identifier runs, digit-led literals, `//` and `/* */` comments,
//! double-quoted strings (no escapes), and single-character punctuation.
//!
//! ASCII only: byte offsets equal character columns, which keeps test
//! sources easy to reason about.

use offside_ir::{LineCol, Span, Token, TokenKind, TokenList};

const KEYWORDS: &[&str] = &["if", "else", "for", "while", "return", "fn", "let"];

/// Tokenize a test snippet into a [`TokenList`].
///
/// Unterminated comments and strings extend to end of input.
pub fn lex(source: &str) -> TokenList {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    column: u32,
    tokens: TokenList,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Lexer {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            column: 0,
            tokens: TokenList::new(),
        }
    }

    fn run(mut self) -> TokenList {
        while let Some(&byte) = self.bytes.get(self.pos) {
            match byte {
                b' ' | b'\t' | b'\r' => self.advance(),
                b'\n' => self.advance(),
                b'/' if self.peek_next() == Some(b'/') => self.line_comment(),
                b'/' if self.peek_next() == Some(b'*') => self.block_comment(),
                b'"' => self.string(),
                b if b.is_ascii_alphabetic() || b == b'_' => self.word(),
                b if b.is_ascii_digit() => self.number(),
                _ => self.punct(),
            }
        }
        self.tokens
    }

    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    fn advance(&mut self) {
        if self.bytes[self.pos] == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    fn here(&self) -> (usize, LineCol) {
        (self.pos, LineCol::new(self.line, self.column))
    }

    fn emit(&mut self, kind: TokenKind, start: (usize, LineCol)) {
        let span = Span::try_from_range(start.0..self.pos).unwrap_or(Span::new(0, 0));
        let end = LineCol::new(self.line, self.column);
        self.tokens.push(Token::new(kind, span, start.1, end));
    }

    fn line_comment(&mut self) {
        let start = self.here();
        while self.bytes.get(self.pos).is_some_and(|&b| b != b'\n') {
            self.advance();
        }
        self.emit(TokenKind::Comment, start);
    }

    fn block_comment(&mut self) {
        let start = self.here();
        self.advance(); // `/`
        self.advance(); // `*`
        while let Some(&byte) = self.bytes.get(self.pos) {
            if byte == b'*' && self.peek_next() == Some(b'/') {
                self.advance();
                self.advance();
                break;
            }
            self.advance();
        }
        self.emit(TokenKind::Comment, start);
    }

    fn string(&mut self) {
        let start = self.here();
        self.advance(); // opening quote
        while let Some(&byte) = self.bytes.get(self.pos) {
            self.advance();
            if byte == b'"' {
                break;
            }
        }
        self.emit(TokenKind::Literal, start);
    }

    fn word(&mut self) {
        let start = self.here();
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|&b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.advance();
        }
        let text = &self.source[start.0..self.pos];
        let kind = if KEYWORDS.contains(&text) {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        };
        self.emit(kind, start);
    }

    fn number(&mut self) {
        let start = self.here();
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|&b| b.is_ascii_alphanumeric() || b == b'.')
        {
            self.advance();
        }
        self.emit(TokenKind::Literal, start);
    }

    fn punct(&mut self) {
        let start = self.here();
        self.advance();
        self.emit(TokenKind::Punct, start);
    }
}
