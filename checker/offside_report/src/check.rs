//! The reporting pass.
//!
//! Drives one declare-then-query run: the caller's policy closure walks
//! its syntax tree and declares offset relationships, the engine is
//! frozen, and every physical line's first token is compared against its
//! resolved indentation.

use crate::options::IndentOptions;
use crate::violation::{Fix, Violation};
use offside_core::{Indent, OffsetCycle, OffsetEngine, ResolvedOffsets};
use offside_ir::{Span, TokenId, TokenList};
use tracing::trace;

/// Check the indentation of a tokenized file.
///
/// `declare` is the traversal glue: it receives the engine during the
/// declaration phase and is expected to walk the file's syntax tree
/// top-down (parent before children, siblings in source order), calling
/// [`OffsetEngine::declare_offsets`] and friends. Constructs it does not
/// recognize need no calls at all: their tokens inherit the nearest
/// enclosing declaration, or the whole-domain default of zero.
///
/// Returns violations ordered by line, then column. The only error is a
/// cyclic anchor chain, which is a defect in the declaring walker.
pub fn check_indentation(
    source: &str,
    tokens: &TokenList,
    options: IndentOptions,
    declare: impl FnOnce(&mut OffsetEngine<'_>),
) -> Result<Vec<Violation>, OffsetCycle> {
    let mut engine = OffsetEngine::new(source, tokens, options.size);
    declare(&mut engine);
    let mut resolved = engine.freeze();

    let mut violations = Vec::new();
    for line in 1..=resolved.line_count() {
        if let Some(violation) = check_line(&mut resolved, tokens, options, line)? {
            violations.push(violation);
        }
    }
    Ok(violations)
}

fn check_line(
    resolved: &mut ResolvedOffsets<'_>,
    tokens: &TokenList,
    options: IndentOptions,
    line: u32,
) -> Result<Option<Violation>, OffsetCycle> {
    // Blank lines have no first token.
    let Some(id) = resolved.first_on_line(line) else {
        return Ok(None);
    };
    let token = resolved.token(id).clone();

    // Continuation lines of multi-line tokens are never independently
    // checked.
    if token.start.line != line {
        return Ok(None);
    }
    if resolved.is_ignored(id) {
        return Ok(None);
    }

    let indent = resolved.actual_indent(id);
    // Mixed space/tab indentation belongs to a separate check.
    if indent.is_mixed() {
        return Ok(None);
    }

    let expected_units = resolved.resolve(id)?;
    let desired_width = desired_width(expected_units, options.size);

    if token.kind.is_comment() && comment_is_lenient(resolved, tokens, id, indent, options)? {
        return Ok(None);
    }

    if indent.width() == desired_width && char_matches(indent, options) {
        return Ok(None);
    }

    let fix_start = token.span.start.saturating_sub(indent.width());
    let fix = Fix::new(
        Span::new(fix_start, token.span.start),
        options
            .unit
            .as_char()
            .to_string()
            .repeat(desired_width as usize),
    );
    trace!(line, expected_units, ?indent, "indentation violation");
    Ok(Some(Violation {
        line,
        column: token.start.column,
        expected_units,
        actual_spaces: indent.spaces,
        actual_tabs: indent.tabs,
        fix,
    }))
}

/// A comment line is lenient: it also passes when its indentation width
/// matches the resolved level of the token immediately preceding or
/// following it in the stream. Width only; the character check belongs
/// to the main comparison.
fn comment_is_lenient(
    resolved: &mut ResolvedOffsets<'_>,
    tokens: &TokenList,
    id: TokenId,
    indent: Indent,
    options: IndentOptions,
) -> Result<bool, OffsetCycle> {
    for neighbor in [tokens.prev(id), tokens.next(id)].into_iter().flatten() {
        let units = resolved.resolve(neighbor)?;
        if indent.width() == desired_width(units, options.size) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Desired indentation width in characters; negative levels clamp to 0.
fn desired_width(units: i32, size: u32) -> u32 {
    u32::try_from(units).map_or(0, |units| units.saturating_mul(size))
}

/// An indentation run made of the wrong character is wrong even at the
/// right width. The empty run matches either unit.
fn char_matches(indent: Indent, options: IndentOptions) -> bool {
    use crate::options::IndentChar;
    match options.unit {
        IndentChar::Space => indent.tabs == 0,
        IndentChar::Tab => indent.spaces == 0,
    }
}
