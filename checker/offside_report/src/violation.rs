//! Violation records and machine-applicable fixes.
//!
//! Pure data: rendering human-readable messages is the host tool's
//! concern.

use offside_ir::Span;

/// A text substitution that corrects one line's leading whitespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fix {
    /// The leading-whitespace run to replace.
    pub span: Span,
    /// Replacement text: the unit character repeated to the desired width.
    pub text: String,
}

impl Fix {
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Fix {
            span,
            text: text.into(),
        }
    }
}

/// One line whose actual indentation disagrees with its resolved level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// 1-based physical line.
    pub line: u32,
    /// 0-based column of the line's first token.
    pub column: u32,
    /// Resolved indentation in indent units.
    pub expected_units: i32,
    /// Spaces found in the actual indentation run.
    pub actual_spaces: u32,
    /// Tabs found in the actual indentation run.
    pub actual_tabs: u32,
    /// Whitespace rewrite that makes the line conform.
    pub fix: Fix,
}
