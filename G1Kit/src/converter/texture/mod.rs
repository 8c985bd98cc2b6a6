//! Texture export: G1T payloads to RGBA8, PNG, or DDS
//!
//! Textures with a known decoder are decompressed to RGBA8 pixel buffers.
//! Anything else falls back to the raw payload and its descriptor so it
//! can be rewrapped as DDS unchanged.

mod decode;
mod dds;
mod types;

use std::sync::atomic::{AtomicUsize, Ordering};

use image::RgbaImage;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::formats::g1t::{G1TextureGroup, TextureRecord};

pub use dds::dxgi_format;
pub use decode::{decompress, decompress_mips};
pub use types::{TextureExportPhase, TextureExportProgress, TextureProgressCallback};

/// Options for texture export.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureExportOptions {
    /// Decode every mip level instead of only the base level.
    pub all_mips: bool,
}

impl TextureExportOptions {
    #[must_use]
    pub fn with_all_mips() -> Self {
        Self { all_mips: true }
    }
}

/// Tightly packed RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Encode as PNG.
    ///
    /// # Errors
    /// Returns [`Error::PngEncodeFailed`] if the buffer size does not match
    /// its dimensions or encoding fails.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let img = RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            Error::PngEncodeFailed {
                message: format!(
                    "{} bytes do not fill a {}x{} image",
                    self.data.len(),
                    self.width,
                    self.height
                ),
            }
        })?;

        let mut png_data = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_data);
        img.write_with_encoder(encoder)
            .map_err(|e| Error::PngEncodeFailed {
                message: e.to_string(),
            })?;

        Ok(png_data)
    }
}

/// A texture that could not be decoded, with its values exactly as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTexture<'a> {
    pub blob: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub mip_count: u8,
    pub format_code: u8,
}

impl RawTexture<'_> {
    /// Wrap the payload in a DX10 DDS container.
    ///
    /// # Errors
    /// [`Error::UnsupportedFormat`] if the format code has no DXGI
    /// equivalent, or a DDS error.
    pub fn to_dds(&self) -> Result<Vec<u8>> {
        dds::build_dds(
            self.blob,
            self.width,
            self.height,
            u32::from(self.mip_count),
            self.format_code,
        )
    }
}

/// Result of exporting one texture.
#[derive(Debug, Clone)]
pub enum TextureExport<'a> {
    /// Decoded levels, largest first.
    Decoded(Vec<PixelBuffer>),
    /// Undecodable payload, passed through.
    Fallback(RawTexture<'a>),
}

impl TextureExport<'_> {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Export one texture, falling back to its raw payload when its format has
/// no decoder.
///
/// # Errors
/// Any error other than [`Error::UnsupportedFormat`], such as a payload
/// shorter than its levels require.
pub fn export_texture<'a>(
    record: &TextureRecord<'a>,
    options: &TextureExportOptions,
) -> Result<TextureExport<'a>> {
    let descriptor = record.descriptor();
    let decoded = if options.all_mips {
        decompress_mips(record.blob, &descriptor)
    } else {
        decompress(
            record.blob,
            descriptor.width,
            descriptor.height,
            descriptor.format_code,
        )
        .map(|level| vec![level])
    };

    match decoded {
        Ok(levels) => Ok(TextureExport::Decoded(levels)),
        Err(Error::UnsupportedFormat { code }) => {
            tracing::info!(
                "Texture {} has undecodable format {:#04x}, passing through raw",
                record.name(),
                code
            );
            Ok(TextureExport::Fallback(RawTexture {
                blob: record.blob,
                width: descriptor.width,
                height: descriptor.height,
                mip_count: descriptor.mip_count,
                format_code: descriptor.format_code,
            }))
        }
        Err(e) => Err(e),
    }
}

/// Export every texture of a group in parallel, results in record order.
///
/// One texture failing does not affect the others.
#[must_use]
pub fn export_texture_group<'a>(
    group: &G1TextureGroup<'a>,
    options: &TextureExportOptions,
) -> Vec<Result<TextureExport<'a>>> {
    export_texture_group_with_progress(group, options, &|_| {})
}

/// [`export_texture_group`] with a progress callback, invoked once per
/// texture as it finishes.
#[must_use]
pub fn export_texture_group_with_progress<'a>(
    group: &G1TextureGroup<'a>,
    options: &TextureExportOptions,
    progress: TextureProgressCallback<'_>,
) -> Vec<Result<TextureExport<'a>>> {
    let total = group.len();
    let processed = AtomicUsize::new(0);

    let results: Vec<_> = group
        .textures
        .par_iter()
        .map(|record| {
            let result = export_texture(record, options);
            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&TextureExportProgress::with_texture(
                TextureExportPhase::Decoding,
                current,
                total,
                record.name(),
            ));
            result
        })
        .collect();

    progress(&TextureExportProgress::new(TextureExportPhase::Complete, total, total));
    tracing::info!("Exported {total} textures");

    results
}
