//! Conversion of decoded KTGL structures into interchange outputs
//!
//! - G1T textures → RGBA8 pixel buffers, PNG, or DDS passthrough
//! - G1M models → JSON reports and plain-text material listings

pub mod material_dump;
pub mod report;
pub mod texture;

pub use material_dump::material_dump;
pub use report::{ModelReport, SectionError};
pub use texture::{
    PixelBuffer, RawTexture, TextureExport, TextureExportOptions, decompress, decompress_mips,
    export_texture, export_texture_group, export_texture_group_with_progress,
};
