//! Readers for KTGL container formats
//!
//! - `RTRP` multi-entry data tables
//! - `G1M_` models and their tagged sections
//! - `G1TG` texture groups

pub mod common;
pub mod g1m;
pub mod g1t;
pub mod table;

// Re-export common types for convenience
pub use common::{DataType, ParseOptions, classify, decode_version, is_data_table};

// Re-export main container types
pub use g1m::{G1Model, ModelSection, SectionHeader};
pub use g1t::{G1TextureGroup, TextureDescriptor, TextureFormat, TextureRecord, unpack_header};
pub use table::{DataTable, TableEntry, split_table};
