//! Indentation options.
//!
//! Consumed, not owned: loading and merging configuration files is the
//! host tool's concern.

/// The character one indent unit is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum IndentChar {
    /// Indent with spaces (default).
    #[default]
    Space,
    /// Indent with tabs.
    Tab,
}

impl IndentChar {
    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            IndentChar::Space => ' ',
            IndentChar::Tab => '\t',
        }
    }
}

/// Configuration for one checking run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndentOptions {
    /// Unit character.
    pub unit: IndentChar,
    /// Characters per indentation level. Must be positive; zero is
    /// clamped to 1 by the engine.
    pub size: u32,
}

impl Default for IndentOptions {
    fn default() -> Self {
        IndentOptions {
            unit: IndentChar::Space,
            size: 4,
        }
    }
}

impl IndentOptions {
    /// Spaces with the given unit size.
    pub fn spaces(size: u32) -> Self {
        IndentOptions {
            unit: IndentChar::Space,
            size,
        }
    }

    /// Tabs, one tab per level.
    pub fn tabs() -> Self {
        IndentOptions {
            unit: IndentChar::Tab,
            size: 1,
        }
    }
}
