//! Shared data model for the offside indentation checker.
//!
//! This crate is standalone: external tokenizers depend on it to produce
//! [`Token`] streams without pulling in the engine.
//!
//! # Modules
//!
//! - [`span`]: compact half-open byte ranges
//! - [`token`]: tokens, dense ids, and the append-only token list

pub mod span;
pub mod token;

pub use span::{Span, SpanError};
pub use token::{LineCol, Token, TokenId, TokenKind, TokenList};
