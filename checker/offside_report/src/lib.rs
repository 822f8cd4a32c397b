//! Reporting pass for the offside indentation checker.
//!
//! Glues a caller-supplied declaration walk to the offset engine and
//! turns resolved-vs-actual disagreements into [`Violation`] records
//! with machine-applicable [`Fix`]es. Produces data only; rendering
//! messages and applying fixes are the host tool's concern.
//!
//! # Modules
//!
//! - [`options`]: indent unit configuration
//! - [`violation`]: violation and fix records
//! - [`check`]: the line-by-line reporting pass

pub mod check;
pub mod options;
pub mod violation;

pub use check::check_indentation;
pub use options::{IndentChar, IndentOptions};
pub use violation::{Fix, Violation};
