//! Physical line map.
//!
//! Pre-computes the byte offset of every line start for O(log L) lookups
//! instead of O(n) scans. Built once per file run.

use memchr::memchr_iter;

/// Byte offsets of line starts, 1-based line numbers.
///
/// # Example
///
/// ```
/// use offside_core::LineMap;
///
/// let lines = LineMap::new("foo\nbar\n");
/// assert_eq!(lines.line_count(), 3); // trailing newline opens line 3
/// assert_eq!(lines.line_start(2), Some(4));
/// assert_eq!(lines.line_of(5), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineMap {
    /// `starts[0] = 0` (line 1); `starts[i]` = byte after the i-th `\n`.
    starts: Vec<u32>,
}

impl LineMap {
    /// Scan the source once for newlines. O(n) construction.
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0u32];
        for pos in memchr_iter(b'\n', source.as_bytes()) {
            starts.push(u32::try_from(pos + 1).unwrap_or(u32::MAX));
        }
        LineMap { starts }
    }

    /// Number of physical lines (a trailing newline opens a final empty line).
    #[inline]
    pub fn line_count(&self) -> u32 {
        u32::try_from(self.starts.len()).unwrap_or(u32::MAX)
    }

    /// Byte offset of a line start. `None` if `line` is 0 or out of range.
    #[inline]
    pub fn line_start(&self, line: u32) -> Option<u32> {
        let idx = (line as usize).checked_sub(1)?;
        self.starts.get(idx).copied()
    }

    /// 1-based line number containing a byte offset, by binary search.
    pub fn line_of(&self, offset: u32) -> u32 {
        let idx = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(idx).unwrap_or(u32::MAX - 1) + 1
    }
}
