//! Ordered interval store for offset descriptors.
//!
//! A breakpoint map that *tiles* the position domain `[0, +inf)`: at any
//! moment exactly one descriptor is active for every position. The map
//! always contains key `0` (the whole-domain default), so predecessor
//! lookup is total. Backed by a `BTreeMap` for O(log n) predecessor
//! queries and bounded-range deletion.

use offside_ir::TokenId;
use std::collections::BTreeMap;
use std::ops::Bound::Excluded;

/// Offset relationship governing a run of positions.
///
/// Tokens governed by this descriptor sit `level` indent units from
/// `anchor`'s resolved indentation. When the anchor and a dependent token
/// share a physical line the level collapses to zero, unless `forced`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OffsetDesc {
    pub level: i32,
    pub anchor: Option<TokenId>,
    pub forced: bool,
}

impl OffsetDesc {
    /// Whole-domain default: no anchor, zero offset.
    pub const DEFAULT: OffsetDesc = OffsetDesc {
        level: 0,
        anchor: None,
        forced: false,
    };
}

/// Position-keyed, predecessor-queryable, range-overwritable map.
#[derive(Clone, Debug)]
pub struct OffsetStore {
    tree: BTreeMap<u32, OffsetDesc>,
}

impl Default for OffsetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OffsetStore {
    /// A store covering the whole domain with the default descriptor.
    pub fn new() -> Self {
        let mut tree = BTreeMap::new();
        tree.insert(0, OffsetDesc::DEFAULT);
        OffsetStore { tree }
    }

    /// Upsert the descriptor active from `key` until the next larger key.
    #[inline]
    pub fn insert(&mut self, key: u32, desc: OffsetDesc) {
        self.tree.insert(key, desc);
    }

    /// Descriptor with the largest key `<= key`.
    ///
    /// Total for every key: key `0` is never removed. The fallback is
    /// unreachable under the tiling invariant.
    #[inline]
    pub fn floor(&self, key: u32) -> &OffsetDesc {
        self.tree
            .range(..=key)
            .next_back()
            .map_or(&OffsetDesc::DEFAULT, |(_, desc)| desc)
    }

    /// Remove all breakpoints with `start < key < end`.
    ///
    /// Breakpoints at `start` and `end` themselves are untouched; callers
    /// overwrite `start` explicitly and reinstate `end`. `start == end`
    /// (or an inverted range) is a no-op.
    pub fn clear_between(&mut self, start: u32, end: u32) {
        if start >= end {
            return;
        }
        let doomed: Vec<u32> = self
            .tree
            .range((Excluded(start), Excluded(end)))
            .map(|(key, _)| *key)
            .collect();
        for key in doomed {
            self.tree.remove(&key);
        }
    }

    /// Breakpoints in ascending key order. Used by invariant checks.
    pub fn breakpoints(&self) -> impl Iterator<Item = (u32, &OffsetDesc)> {
        self.tree.iter().map(|(key, desc)| (*key, desc))
    }

    /// Number of breakpoints. At least 1: key 0 is never removed.
    #[inline]
    pub fn breakpoint_count(&self) -> usize {
        self.tree.len()
    }
}
