//! DDS rewrapping of undecodable texture payloads

use ddsfile::{AlphaMode, D3D10ResourceDimension, Dds, DxgiFormat, NewDxgiParams};

use crate::error::{Error, Result};
use crate::formats::g1t::TextureFormat;

/// DXGI format for a G1T pixel format, if DDS can describe it.
#[must_use]
pub fn dxgi_format(format: TextureFormat) -> Option<DxgiFormat> {
    match format {
        TextureFormat::Rgba8 => Some(DxgiFormat::R8G8B8A8_UNorm),
        TextureFormat::Bgra8 => Some(DxgiFormat::B8G8R8A8_UNorm),
        TextureFormat::Bc1 => Some(DxgiFormat::BC1_UNorm),
        TextureFormat::Bc2 => Some(DxgiFormat::BC2_UNorm),
        TextureFormat::Bc3 => Some(DxgiFormat::BC3_UNorm),
        TextureFormat::Bc4 => Some(DxgiFormat::BC4_UNorm),
        TextureFormat::Bc5 => Some(DxgiFormat::BC5_UNorm),
        TextureFormat::Bc6h => Some(DxgiFormat::BC6H_UF16),
        TextureFormat::Bc7 => Some(DxgiFormat::BC7_UNorm),
        TextureFormat::Unknown(_) => None,
    }
}

/// Build a DX10 DDS file around an existing payload, bytes unchanged.
pub(super) fn build_dds(
    payload: &[u8],
    width: u32,
    height: u32,
    mip_levels: u32,
    format_code: u8,
) -> Result<Vec<u8>> {
    let format = dxgi_format(TextureFormat::from_code(format_code))
        .ok_or(Error::UnsupportedFormat { code: format_code })?;

    let mut dds = Dds::new_dxgi(NewDxgiParams {
        height,
        width,
        depth: None,
        format,
        mipmap_levels: Some(mip_levels.max(1)),
        array_layers: None,
        caps2: None,
        is_cubemap: false,
        resource_dimension: D3D10ResourceDimension::Texture2D,
        alpha_mode: AlphaMode::Straight,
    })
    .map_err(|e| Error::DdsCreateFailed {
        message: e.to_string(),
    })?;

    // payload is passed through even if its size disagrees with the header
    dds.data = payload.to_vec();

    let mut output = Vec::new();
    dds.write(&mut output).map_err(|e| Error::DdsWriteFailed {
        message: e.to_string(),
    })?;

    Ok(output)
}
