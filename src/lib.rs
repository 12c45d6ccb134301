//! Element Explorer library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod lookup;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Top-level screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum View {
    #[default]
    Table,
    Quiz,
}

impl View {
    /// Case-insensitive parse of `"table"` / `"quiz"`.
    pub fn parse(s: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(s.trim(), true).ok()
    }
}
