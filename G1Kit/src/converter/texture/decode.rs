//! Texture decompression to RGBA8 using `bcdec_rs`

use super::PixelBuffer;
use crate::error::{Error, Result};
use crate::formats::common::ByteReader;
use crate::formats::g1t::{TextureDescriptor, TextureFormat};

/// Decompress the base level of a texture payload to RGBA8.
///
/// # Errors
/// [`Error::UnsupportedFormat`] for formats without a decoder (BC6H and
/// unknown codes), or [`Error::OutOfBounds`] if `blob` is shorter than the
/// level requires.
pub fn decompress(blob: &[u8], width: u32, height: u32, format_code: u8) -> Result<PixelBuffer> {
    let format = TextureFormat::from_code(format_code);
    let size = decodable_level_size(format, format_code, width, height)?;
    let level = ByteReader::new(blob).slice(0, size)?;
    decode_level(level, width, height, format, format_code)
}

/// Decompress every stored level, largest first.
///
/// Levels are packed back to back; each halves both dimensions down to 1.
///
/// # Errors
/// See [`decompress`].
pub fn decompress_mips(blob: &[u8], descriptor: &TextureDescriptor) -> Result<Vec<PixelBuffer>> {
    let format = descriptor.format();
    let reader = ByteReader::new(blob);
    let mut offset = 0;
    let mut levels = Vec::with_capacity(descriptor.level_count() as usize);

    for level in 0..descriptor.level_count() {
        let width = (descriptor.width >> level).max(1);
        let height = (descriptor.height >> level).max(1);
        let size = decodable_level_size(format, descriptor.format_code, width, height)?;
        let bytes = reader.slice(offset, size)?;
        levels.push(decode_level(bytes, width, height, format, descriptor.format_code)?);
        offset += size;
    }

    Ok(levels)
}

fn decodable_level_size(format: TextureFormat, code: u8, width: u32, height: u32) -> Result<usize> {
    match format {
        TextureFormat::Bc6h | TextureFormat::Unknown(_) => Err(Error::UnsupportedFormat { code }),
        _ => format
            .level_size(width, height)
            .ok_or(Error::UnsupportedFormat { code }),
    }
}

/// `data` must hold at least one full level.
fn decode_level(
    data: &[u8],
    width: u32,
    height: u32,
    format: TextureFormat,
    code: u8,
) -> Result<PixelBuffer> {
    let (w, h) = (width as usize, height as usize);
    let rgba = match format {
        TextureFormat::Rgba8 => data[..w * h * 4].to_vec(),
        TextureFormat::Bgra8 => {
            let mut rgba = data[..w * h * 4].to_vec();
            for chunk in rgba.chunks_exact_mut(4) {
                chunk.swap(0, 2);
            }
            rgba
        }
        TextureFormat::Bc1 => decode_bc(data, w, h, BcFormat::Bc1),
        TextureFormat::Bc2 => decode_bc(data, w, h, BcFormat::Bc2),
        TextureFormat::Bc3 => decode_bc(data, w, h, BcFormat::Bc3),
        TextureFormat::Bc4 => decode_bc(data, w, h, BcFormat::Bc4),
        TextureFormat::Bc5 => decode_bc(data, w, h, BcFormat::Bc5),
        TextureFormat::Bc7 => decode_bc(data, w, h, BcFormat::Bc7),
        TextureFormat::Bc6h | TextureFormat::Unknown(_) => {
            return Err(Error::UnsupportedFormat { code });
        }
    };

    Ok(PixelBuffer {
        width,
        height,
        data: rgba,
    })
}

// ============================================================================
// Block Compression (BC) formats
// ============================================================================

#[derive(Clone, Copy)]
enum BcFormat {
    Bc1, // 8 bytes per block
    Bc2, // 16 bytes per block, explicit alpha
    Bc3, // 16 bytes per block, interpolated alpha
    Bc4, // 8 bytes per block, one channel
    Bc5, // 16 bytes per block, two channels
    Bc7, // 16 bytes per block
}

impl BcFormat {
    const fn block_size(self) -> usize {
        match self {
            Self::Bc1 | Self::Bc4 => 8,
            Self::Bc2 | Self::Bc3 | Self::Bc5 | Self::Bc7 => 16,
        }
    }
}

/// Decode a BC level; the caller guarantees every block is present.
fn decode_bc(data: &[u8], width: usize, height: usize, format: BcFormat) -> Vec<u8> {
    let mut rgba = vec![0u8; width * height * 4];
    let blocks_x = width.div_ceil(4);
    let blocks_y = height.div_ceil(4);
    let block_size = format.block_size();

    // 4x4 RGBA8 scratch block
    let mut block_rgba = [0u8; 64];

    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let block_idx = (by * blocks_x + bx) * block_size;
            let block = &data[block_idx..block_idx + block_size];
            decode_block(block, &mut block_rgba, format);

            for py in 0..4 {
                for px in 0..4 {
                    let fx = bx * 4 + px;
                    let fy = by * 4 + py;
                    if fx >= width || fy >= height {
                        continue;
                    }
                    let src_idx = (py * 4 + px) * 4;
                    let dst_idx = (fy * width + fx) * 4;
                    rgba[dst_idx..dst_idx + 4].copy_from_slice(&block_rgba[src_idx..src_idx + 4]);
                }
            }
        }
    }

    rgba
}

/// Decode one block into 4x4 RGBA8.
fn decode_block(block: &[u8], out: &mut [u8; 64], format: BcFormat) {
    match format {
        BcFormat::Bc1 => bcdec_rs::bc1(block, out, 16),
        BcFormat::Bc2 => bcdec_rs::bc2(block, out, 16),
        BcFormat::Bc3 => bcdec_rs::bc3(block, out, 16),
        BcFormat::Bc7 => bcdec_rs::bc7(block, out, 16),
        BcFormat::Bc4 => {
            // R8 output, expanded to grey
            let mut red = [0u8; 16];
            bcdec_rs::bc4(block, &mut red, 4, false);
            for (pixel, r) in out.chunks_exact_mut(4).zip(red) {
                pixel.copy_from_slice(&[r, r, r, 255]);
            }
        }
        BcFormat::Bc5 => {
            // RG8 output
            let mut rg = [0u8; 32];
            bcdec_rs::bc5(block, &mut rg, 8, false);
            for (pixel, c) in out.chunks_exact_mut(4).zip(rg.chunks_exact(2)) {
                pixel.copy_from_slice(&[c[0], c[1], 0, 255]);
            }
        }
    }
}
