//! Offside offset resolution engine.
//!
//! Computes the *expected* indentation level of every token in a file,
//! given offset relationships declared during one traversal of the
//! syntax tree. The engine knows nothing about any grammar: policy
//! layers declare relationships ("these tokens sit one unit past that
//! opening bracket"), and the reporting layer queries resolved levels
//! afterwards.
//!
//! # Architecture
//!
//! Declare-then-query, one engine per file run:
//!
//! 1. A tree walker declares offsets top-down via [`OffsetEngine`].
//! 2. [`OffsetEngine::freeze`] produces a read-only [`ResolvedOffsets`]
//!    whose memoized [`resolve`](ResolvedOffsets::resolve) answers
//!    queries in amortized O(1) per token.
//!
//! # Modules
//!
//! - [`lines`]: physical line map over raw source
//! - [`token_index`]: first-token-of-line registry, indent extraction
//! - [`store`]: the ordered interval store (breakpoint partition)
//! - [`offsets`]: declaration API and resolution

pub mod lines;
pub mod offsets;
pub mod store;
pub mod token_index;

pub use lines::LineMap;
pub use offsets::{OffsetCycle, OffsetEngine, ResolvedOffsets};
pub use store::{OffsetDesc, OffsetStore};
pub use token_index::{actual_indent, Indent, TokenIndex};
