//! Common types and utilities shared across all KTGL formats

pub mod magic;
pub(crate) mod reader;
pub mod version;

pub use magic::{DataType, classify, is_data_table};
pub use version::decode_version;

pub(crate) use reader::ByteReader;

/// Options shared by the section parsers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Parse sections even when their version is not the supported one.
    pub ignore_version: bool,
}

impl ParseOptions {
    /// Options that skip the section version check.
    #[must_use]
    pub fn unchecked() -> Self {
        Self {
            ignore_version: true,
        }
    }
}
