//! Token types for the indentation checker.
//!
//! Tokens are produced by an external tokenizer and never mutated here.
//! Every token gets a dense [`TokenId`] at push time; all engine side
//! tables (offset descriptors, alignment locks, ignore sets, caches) key
//! on that id rather than on token identity.

use crate::Span;
use std::fmt;

/// Dense index of a token in its [`TokenList`], assigned in push order.
///
/// Ids are only meaningful within the list that assigned them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TokenId(u32);

impl TokenId {
    /// Index into the owning token list.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Source position: 1-based line, 0-based character column.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        LineCol { line, column }
    }
}

/// Coarse lexical classes.
///
/// The checker only attaches semantics to `Comment` (reporting leniency
/// for free-floating comment lines); the other classes exist so external
/// tokenizers can round-trip their classification.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Ident,
    Keyword,
    Punct,
    Literal,
    Comment,
}

impl TokenKind {
    /// Whether reporting applies the comment-line leniency to this token.
    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(self, TokenKind::Comment)
    }
}

/// A token with its byte span and start/end positions.
///
/// Multi-line tokens (block comments, multi-line literals) have
/// `end.line > start.line`.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub start: LineCol,
    pub end: LineCol,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span, start: LineCol, end: LineCol) -> Self {
        Token {
            kind,
            span,
            start,
            end,
        }
    }

    /// Whether the token's text crosses a line boundary.
    #[inline]
    pub fn is_multiline(&self) -> bool {
        self.end.line > self.start.line
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} @ {} ({}:{})",
            self.kind, self.span, self.start.line, self.start.column
        )
    }
}

/// Append-only token stream in source order.
///
/// Tokens must be pushed in ascending span order; the engine relies on
/// ids increasing with source position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Append a token and return its assigned id.
    pub fn push(&mut self, token: Token) -> TokenId {
        let id = TokenId(u32::try_from(self.tokens.len()).unwrap_or(u32::MAX));
        self.tokens.push(token);
        id
    }

    #[inline]
    pub fn get(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate the assigned ids, in source order.
    pub fn ids(&self) -> impl Iterator<Item = TokenId> {
        (0..self.tokens.len()).map(|i| TokenId(u32::try_from(i).unwrap_or(u32::MAX)))
    }

    /// Iterate tokens with their ids, in source order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &Token)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (TokenId(u32::try_from(i).unwrap_or(u32::MAX)), t))
    }

    /// The token immediately before `id` in the stream, if any.
    #[inline]
    pub fn prev(&self, id: TokenId) -> Option<TokenId> {
        id.0.checked_sub(1).map(TokenId)
    }

    /// The token immediately after `id` in the stream, if any.
    #[inline]
    pub fn next(&self, id: TokenId) -> Option<TokenId> {
        let next = id.0.checked_add(1)?;
        ((next as usize) < self.tokens.len()).then_some(TokenId(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn punct(start: u32, end: u32) -> Token {
        Token::new(
            TokenKind::Punct,
            Span::new(start, end),
            LineCol::new(1, start),
            LineCol::new(1, end),
        )
    }

    #[test]
    fn push_assigns_dense_ids() {
        let mut tokens = TokenList::new();
        let a = tokens.push(punct(0, 1));
        let b = tokens.push(punct(1, 2));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn ids_walk_the_stream_in_order() {
        let mut tokens = TokenList::new();
        let a = tokens.push(punct(0, 1));
        let b = tokens.push(punct(1, 2));
        let ids: Vec<TokenId> = tokens.ids().collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn stream_neighbors() {
        let mut tokens = TokenList::new();
        let a = tokens.push(punct(0, 1));
        let b = tokens.push(punct(1, 2));
        assert_eq!(tokens.prev(a), None);
        assert_eq!(tokens.next(a), Some(b));
        assert_eq!(tokens.prev(b), Some(a));
        assert_eq!(tokens.next(b), None);
    }

    #[test]
    fn multiline_detection() {
        let token = Token::new(
            TokenKind::Comment,
            Span::new(0, 10),
            LineCol::new(1, 0),
            LineCol::new(3, 2),
        );
        assert!(token.is_multiline());
        assert!(!punct(0, 1).is_multiline());
    }
}
