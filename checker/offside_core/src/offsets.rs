//! Offset declaration and resolution.
//!
//! Two-phase lifecycle, one instance per file run:
//!
//! 1. **Declare**: an external tree walker visits grammar constructs in
//!    document order (parent before children, siblings in source order)
//!    and declares offset relationships over token ranges via
//!    [`OffsetEngine`]. This is a single forward pass with no queries.
//! 2. **Query**: [`OffsetEngine::freeze`] converts the engine into a
//!    read-only [`ResolvedOffsets`], and the reporting pass resolves the
//!    indentation of every first-of-line token.
//!
//! The type-state split makes interleaving declarations with queries a
//! compile error, so the memoization cache can never go stale.

use crate::lines::LineMap;
use crate::store::{OffsetDesc, OffsetStore};
use crate::token_index::{actual_indent, Indent, TokenIndex};
use offside_ir::{Span, Token, TokenId, TokenList};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use tracing::trace;

/// Cyclic anchor chain detected during resolution.
///
/// Anchors must be declared strictly before the ranges that name them, so
/// a cycle is a defect in the declaring walker, not in the input source.
/// The engine fails fast naming both ends instead of looping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetCycle {
    /// The token whose resolution re-entered the chain.
    pub token: TokenId,
    /// The anchor that was already being resolved.
    pub anchor: TokenId,
}

impl fmt::Display for OffsetCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cyclic anchor chain: {:?} depends on {:?}, which is still being resolved",
            self.token, self.anchor
        )
    }
}

impl std::error::Error for OffsetCycle {}

/// Declaration-phase handle. See the module docs for the lifecycle.
pub struct OffsetEngine<'a> {
    source: &'a str,
    tokens: &'a TokenList,
    lines: LineMap,
    index: TokenIndex,
    store: OffsetStore,
    /// target -> base: target's column equals an established column of base.
    locks: FxHashMap<TokenId, TokenId>,
    /// Tokens whose desired indentation is defined as their actual one.
    ignored: FxHashSet<TokenId>,
    unit_size: u32,
}

impl<'a> OffsetEngine<'a> {
    /// Create an engine for one file run.
    ///
    /// `unit_size` is the configured indent unit width in characters
    /// (clamped to at least 1).
    pub fn new(source: &'a str, tokens: &'a TokenList, unit_size: u32) -> Self {
        let lines = LineMap::new(source);
        let index = TokenIndex::new(&lines, tokens);
        OffsetEngine {
            source,
            tokens,
            lines,
            index,
            store: OffsetStore::new(),
            locks: FxHashMap::default(),
            ignored: FxHashSet::default(),
            unit_size: unit_size.max(1),
        }
    }

    /// Offset every token starting in `range` by `level` units from
    /// `anchor`, collapsing to zero when dependent and anchor share a
    /// physical line.
    pub fn declare_offsets(&mut self, range: Span, anchor: Option<TokenId>, level: i32) {
        self.set_offsets(range, anchor, level, false);
    }

    /// Like [`declare_offsets`](Self::declare_offsets), but the offset
    /// applies even on the anchor's own line.
    pub fn declare_offsets_forced(&mut self, range: Span, anchor: Option<TokenId>, level: i32) {
        self.set_offsets(range, anchor, level, true);
    }

    /// Give `target` the same indentation as `base`.
    pub fn match_indent(&mut self, base: TokenId, target: TokenId) {
        let range = self.tokens.get(target).span;
        self.declare_offsets(range, Some(base), 0);
    }

    /// Lock `target`'s column to `base`'s established column, overriding
    /// descriptor-based resolution entirely. Used for "align with first
    /// sibling" style policies where alignment is exact, not a multiple
    /// of the indent unit.
    pub fn lock_alignment(&mut self, base: TokenId, target: TokenId) {
        self.locks.insert(target, base);
    }

    /// Exempt `token` from reporting. Only first-of-line tokens are ever
    /// queried, so ignoring any other token is a no-op.
    pub fn ignore(&mut self, token: TokenId) {
        if self.index.is_first_on_line(token, self.tokens) {
            self.ignored.insert(token);
        }
    }

    /// The underlying interval store. Exposed for invariant checks.
    pub fn store(&self) -> &OffsetStore {
        &self.store
    }

    /// End the declaration phase and switch to read-only queries.
    pub fn freeze(self) -> ResolvedOffsets<'a> {
        ResolvedOffsets {
            source: self.source,
            tokens: self.tokens,
            lines: self.lines,
            index: self.index,
            store: self.store,
            locks: self.locks,
            ignored: self.ignored,
            unit_size: self.unit_size,
            cache: FxHashMap::default(),
            in_flight: FxHashSet::default(),
        }
    }

    fn set_offsets(&mut self, range: Span, anchor: Option<TokenId>, level: i32, forced: bool) {
        if range.is_empty() {
            return;
        }
        trace!(?range, ?anchor, level, forced, "declare offsets");

        let desc = OffsetDesc {
            level,
            anchor,
            forced,
        };

        // Positions at/after the range end keep their prior relationship:
        // the effect of this call must not leak past its boundary.
        let tail = *self.store.floor(range.end);

        // Self-reference avoidance: a range must never make its own anchor
        // depend on itself. Capture the anchor's prior descriptor before
        // the range is overwritten.
        let split = anchor.and_then(|id| {
            let anchor_span = self.tokens.get(id).span;
            range
                .contains(anchor_span.start)
                .then(|| (anchor_span, *self.store.floor(anchor_span.start)))
        });

        self.store.clear_between(range.start, range.end);
        self.store.insert(range.start, desc);

        if let Some((anchor_span, anchor_prior)) = split {
            // The anchor keeps its old relationship; tokens between the
            // anchor and the range end still get the declared offset so
            // they depend on the anchor rather than being overwritten.
            self.store.insert(anchor_span.start, anchor_prior);
            if anchor_span.end < range.end {
                self.store.insert(anchor_span.end, desc);
            }
        }

        self.store.insert(range.end, tail);
    }
}

/// Query-phase handle: the frozen partition plus a memoization cache.
pub struct ResolvedOffsets<'a> {
    source: &'a str,
    tokens: &'a TokenList,
    lines: LineMap,
    index: TokenIndex,
    store: OffsetStore,
    locks: FxHashMap<TokenId, TokenId>,
    ignored: FxHashSet<TokenId>,
    unit_size: u32,
    cache: FxHashMap<TokenId, i32>,
    in_flight: FxHashSet<TokenId>,
}

impl ResolvedOffsets<'_> {
    /// Resolved indentation of `token`, in indent units.
    ///
    /// Memoized; valid because no declarations occur after freezing.
    pub fn resolve(&mut self, token: TokenId) -> Result<i32, OffsetCycle> {
        if let Some(&units) = self.cache.get(&token) {
            return Ok(units);
        }
        self.in_flight.insert(token);
        let result = self.resolve_uncached(token);
        self.in_flight.remove(&token);
        let units = result?;
        self.cache.insert(token, units);
        Ok(units)
    }

    fn resolve_uncached(&mut self, token: TokenId) -> Result<i32, OffsetCycle> {
        // Ignored tokens pass their actual indentation through, so they
        // can never be flagged.
        if self.ignored.contains(&token) {
            let width = self.actual_indent(token).width();
            return Ok(to_units(width / self.unit_size));
        }

        if let Some(&base) = self.locks.get(&token) {
            return self.resolve_locked(token, base);
        }

        let start = self.tokens.get(token).span.start;
        let desc = *self.store.floor(start);
        let Some(anchor) = desc.anchor else {
            return Ok(desc.level);
        };

        // Same-line collapse: an anchor/dependent pair sharing a physical
        // line already has its visual offset; contribute nothing extra
        // unless the declaration was forced.
        let same_line = self.tokens.get(anchor).start.line == self.tokens.get(token).start.line;
        let contribution = if same_line && !desc.forced {
            0
        } else {
            desc.level
        };
        Ok(contribution + self.resolve_dep(token, anchor)?)
    }

    fn resolve_locked(&mut self, token: TokenId, base: TokenId) -> Result<i32, OffsetCycle> {
        let base_tok = self.tokens.get(base);
        let base_col = base_tok.start.column;
        let first = self.index.first_on_line(base_tok.start.line).unwrap_or(base);
        let first_col = self.tokens.get(first).start.column;
        let first_units = self.resolve_dep(token, first)?;
        // Exact column alignment, not a multiple of the indent unit.
        let delta = base_col.saturating_sub(first_col) / self.unit_size;
        Ok(first_units + to_units(delta))
    }

    fn resolve_dep(&mut self, token: TokenId, dep: TokenId) -> Result<i32, OffsetCycle> {
        if self.in_flight.contains(&dep) {
            return Err(OffsetCycle { token, anchor: dep });
        }
        self.resolve(dep)
    }

    /// Configured indent unit width in characters.
    #[inline]
    pub fn unit_size(&self) -> u32 {
        self.unit_size
    }

    /// Number of physical lines in the source.
    #[inline]
    pub fn line_count(&self) -> u32 {
        self.lines.line_count()
    }

    /// First token registered for a physical line, if any.
    #[inline]
    pub fn first_on_line(&self, line: u32) -> Option<TokenId> {
        self.index.first_on_line(line)
    }

    /// Whether `token` was marked ignored during the declaration phase.
    #[inline]
    pub fn is_ignored(&self, token: TokenId) -> bool {
        self.ignored.contains(&token)
    }

    /// The token behind an id.
    #[inline]
    pub fn token(&self, id: TokenId) -> &Token {
        self.tokens.get(id)
    }

    /// Literal leading whitespace of `token`'s line, from raw source.
    pub fn actual_indent(&self, token: TokenId) -> Indent {
        actual_indent(self.source, &self.lines, self.tokens.get(token))
    }
}

fn to_units(raw: u32) -> i32 {
    i32::try_from(raw).unwrap_or(i32::MAX)
}
