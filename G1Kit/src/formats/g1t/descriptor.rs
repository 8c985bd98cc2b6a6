//! Packed texture headers and pixel format codes

use serde::Serialize;

/// Dimensions and format unpacked from a texture's packed header word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextureDescriptor {
    pub width: u32,
    pub height: u32,
    pub mip_count: u8,
    pub format_code: u8,
    pub texture_system: u8,
}

impl TextureDescriptor {
    #[must_use]
    pub fn format(&self) -> TextureFormat {
        TextureFormat::from_code(self.format_code)
    }

    /// Number of stored levels; a zero mip count still holds the base level.
    #[must_use]
    pub fn level_count(&self) -> u32 {
        u32::from(self.mip_count.max(1))
    }
}

/// Unpack a texture header word.
///
/// | bits  | field                |
/// |-------|----------------------|
/// | 0-3   | texture system       |
/// | 4-7   | mip count            |
/// | 8-15  | format code          |
/// | 16-19 | log2 width           |
/// | 20-23 | log2 height          |
/// | 24-31 | reserved             |
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn unpack_header(packed: u32) -> TextureDescriptor {
    TextureDescriptor {
        texture_system: (packed & 0xF) as u8,
        mip_count: ((packed >> 4) & 0xF) as u8,
        format_code: ((packed >> 8) & 0xFF) as u8,
        width: 1 << ((packed >> 16) & 0xF),
        height: 1 << ((packed >> 20) & 0xF),
    }
}

/// Pixel formats by G1T format code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextureFormat {
    Rgba8,
    Bgra8,
    Bc1,
    Bc2,
    Bc3,
    Bc4,
    Bc5,
    Bc6h,
    Bc7,
    Unknown(u8),
}

impl TextureFormat {
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => Self::Rgba8,
            0x01 => Self::Bgra8,
            0x06 | 0x59 => Self::Bc1,
            0x07 | 0x5A => Self::Bc2,
            0x08 | 0x5B => Self::Bc3,
            0x5C => Self::Bc4,
            0x5D => Self::Bc5,
            0x5E => Self::Bc6h,
            0x5F => Self::Bc7,
            other => Self::Unknown(other),
        }
    }

    /// Bytes per 4x4 block, or `None` for uncompressed and unknown formats.
    #[must_use]
    pub fn block_size(self) -> Option<usize> {
        match self {
            Self::Bc1 | Self::Bc4 => Some(8),
            Self::Bc2 | Self::Bc3 | Self::Bc5 | Self::Bc6h | Self::Bc7 => Some(16),
            Self::Rgba8 | Self::Bgra8 | Self::Unknown(_) => None,
        }
    }

    /// Byte size of one level, or `None` for unknown formats.
    #[must_use]
    pub fn level_size(self, width: u32, height: u32) -> Option<usize> {
        let (width, height) = (width as usize, height as usize);
        match self {
            Self::Rgba8 | Self::Bgra8 => Some(width * height * 4),
            Self::Unknown(_) => None,
            _ => self
                .block_size()
                .map(|block| width.div_ceil(4) * height.div_ceil(4) * block),
        }
    }
}

impl std::fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rgba8 => write!(f, "RGBA8"),
            Self::Bgra8 => write!(f, "BGRA8"),
            Self::Bc1 => write!(f, "BC1"),
            Self::Bc2 => write!(f, "BC2"),
            Self::Bc3 => write!(f, "BC3"),
            Self::Bc4 => write!(f, "BC4"),
            Self::Bc5 => write!(f, "BC5"),
            Self::Bc6h => write!(f, "BC6H"),
            Self::Bc7 => write!(f, "BC7"),
            Self::Unknown(code) => write!(f, "unknown ({code:#04x})"),
        }
    }
}
