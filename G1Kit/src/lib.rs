//! # G1Kit
//!
//! A pure-Rust library for the binary containers of the KTGL engine family.
//!
//! ## Supported Formats
//!
//! - **RTRP data tables** - Split multi-entry tables into borrowed entries
//! - **G1M models** - Section walking, skeletons (with world transforms),
//!   geometry sub-sections and materials, bind matrices
//! - **G1T texture groups** - Descriptor unpacking, BC1-BC7 decompression,
//!   PNG export, DDS passthrough
//!
//! ## Quick Start
//!
//! ### Loading a Model
//!
//! ```no_run
//! use g1kit::prelude::*;
//!
//! let data = std::fs::read("E32.bin")?;
//! let loaded = LoadedContainer::load(&data, None, ParseOptions::default())?;
//!
//! if let Some(skeleton) = loaded.model.skeleton()? {
//!     for bone in &skeleton.world_bones {
//!         println!("{:?}", bone.position);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Exporting Textures
//!
//! ```no_run
//! use g1kit::prelude::*;
//!
//! let data = std::fs::read("textures.g1t")?;
//! let group = G1TextureGroup::read(&data)?;
//! for (record, export) in group.textures.iter().zip(export_texture_group(&group, &TextureExportOptions::default())) {
//!     match export? {
//!         TextureExport::Decoded(levels) => std::fs::write(format!("{}.png", record.name()), levels[0].to_png()?)?,
//!         TextureExport::Fallback(raw) => std::fs::write(format!("{}.dds", record.name()), raw.to_dds()?)?,
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `g1kit` command-line binary

pub mod container;
pub mod converter;
pub mod error;
pub mod formats;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::container::LoadedContainer;
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::formats::common::{DataType, ParseOptions, classify, is_data_table};
    pub use crate::formats::g1m::{Bone, G1Model, Geometry, Material, Matrices, ModelSection, Skeleton};
    pub use crate::formats::g1t::{G1TextureGroup, TextureDescriptor, TextureFormat, TextureRecord, unpack_header};
    pub use crate::formats::table::{DataTable, TableEntry, split_table};

    pub use crate::converter;
    pub use crate::converter::{
        ModelReport, PixelBuffer, RawTexture, TextureExport, TextureExportOptions, decompress,
        decompress_mips, export_texture, export_texture_group, material_dump,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
