//! First-token-of-line registry and literal indentation extraction.
//!
//! The reporting pass only ever examines the first token of each physical
//! line; this index is built in one pass over the token stream. Leading
//! whitespace is read directly from raw source text, never reconstructed
//! from positions.

use crate::lines::LineMap;
use offside_ir::{Token, TokenId, TokenList};

/// Literal leading whitespace of a token's line, split by character.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Indent {
    pub spaces: u32,
    pub tabs: u32,
}

impl Indent {
    /// Total character width of the indentation run.
    #[inline]
    pub const fn width(self) -> u32 {
        self.spaces + self.tabs
    }

    /// Whether the run mixes spaces and tabs.
    #[inline]
    pub const fn is_mixed(self) -> bool {
        self.spaces > 0 && self.tabs > 0
    }
}

/// Maps each physical line to its first token.
///
/// A multi-line token (block comment, multi-line literal) is additionally
/// registered as the first token of its *end* line when meaningful
/// trailing content sits there (end column > 0) and no token already
/// claimed that line. Lines claimed this way are continuation lines: the
/// reporting pass skips them because the registered token started earlier.
#[derive(Clone, Debug)]
pub struct TokenIndex {
    /// Indexed by 1-based line number; slot 0 is unused.
    first_of_line: Vec<Option<TokenId>>,
}

impl TokenIndex {
    /// Build the registry in one pass over the token stream.
    pub fn new(lines: &LineMap, tokens: &TokenList) -> Self {
        let mut first_of_line = vec![None; lines.line_count() as usize + 1];
        for (id, token) in tokens.iter() {
            claim(&mut first_of_line, token.start.line, id);
            if token.is_multiline() && token.end.column > 0 {
                claim(&mut first_of_line, token.end.line, id);
            }
        }
        TokenIndex { first_of_line }
    }

    /// First token registered for a physical line, if any.
    #[inline]
    pub fn first_on_line(&self, line: u32) -> Option<TokenId> {
        self.first_of_line.get(line as usize).copied().flatten()
    }

    /// Whether `id` is the first token starting on its own line.
    pub fn is_first_on_line(&self, id: TokenId, tokens: &TokenList) -> bool {
        self.first_on_line(tokens.get(id).start.line) == Some(id)
    }
}

fn claim(first_of_line: &mut [Option<TokenId>], line: u32, id: TokenId) {
    if let Some(slot) = first_of_line.get_mut(line as usize) {
        if slot.is_none() {
            *slot = Some(id);
        }
    }
}

/// Literal run of spaces/tabs immediately preceding `token` on its line.
///
/// Reads raw source text backwards from the token start, stopping at the
/// line start or the first non-whitespace character.
pub fn actual_indent(source: &str, lines: &LineMap, token: &Token) -> Indent {
    let line_start = lines.line_start(token.start.line).unwrap_or(0) as usize;
    let token_start = (token.span.start as usize).min(source.len());
    let bytes = source.as_bytes();

    let mut indent = Indent::default();
    let mut pos = token_start;
    while pos > line_start {
        match bytes[pos - 1] {
            b' ' => indent.spaces += 1,
            b'\t' => indent.tabs += 1,
            _ => break,
        }
        pos -= 1;
    }
    indent
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use offside_testlex::lex;
    use pretty_assertions::assert_eq;

    fn index(source: &str) -> (LineMap, TokenList, TokenIndex) {
        let lines = LineMap::new(source);
        let tokens = lex(source);
        let idx = TokenIndex::new(&lines, &tokens);
        (lines, tokens, idx)
    }

    #[test]
    fn first_token_per_line() {
        let (_, tokens, idx) = index("foo(\n  a,\n  b\n)");
        let first = idx.first_on_line(2).unwrap();
        assert_eq!(tokens.get(first).start.column, 2);
        assert!(idx.is_first_on_line(first, &tokens));
        // `(` is not first on line 1
        let paren = tokens.iter().find(|(_, t)| t.span.start == 3).unwrap().0;
        assert!(!idx.is_first_on_line(paren, &tokens));
    }

    #[test]
    fn blank_lines_have_no_first_token() {
        let (_, _, idx) = index("a\n\nb");
        assert!(idx.first_on_line(1).is_some());
        assert_eq!(idx.first_on_line(2), None);
        assert!(idx.first_on_line(3).is_some());
    }

    #[test]
    fn multiline_token_claims_its_end_line() {
        // Block comment ends on line 2 with the `*/` at column 1.
        let (_, tokens, idx) = index("/* one\n */ after");
        let first = idx.first_on_line(2).unwrap();
        assert!(tokens.get(first).kind.is_comment());
        assert_eq!(tokens.get(first).start.line, 1);
    }

    #[test]
    fn actual_indent_splits_spaces_and_tabs() {
        let source = "\t  x";
        let (lines, tokens, _) = index(source);
        let (_, token) = tokens.iter().next().unwrap();
        let indent = actual_indent(source, &lines, token);
        assert_eq!(indent, Indent { spaces: 2, tabs: 1 });
        assert_eq!(indent.width(), 3);
        assert!(indent.is_mixed());
    }

    #[test]
    fn actual_indent_stops_at_content() {
        let source = "ab  x";
        let (lines, tokens, _) = index(source);
        let x = tokens.iter().find(|(_, t)| t.span.start == 4).unwrap();
        let indent = actual_indent(source, &lines, x.1);
        assert_eq!(indent, Indent { spaces: 2, tabs: 0 });
    }
}
