//! G1MG geometry sections
//!
//! The geometry section carries its own table of sub-sections (materials,
//! vertex buffers, index buffers, ...). Sub-sections are recorded as
//! borrowed byte ranges; only materials are decoded.

use std::fmt;

use serde::Serialize;

use super::{ModelSection, ParsedSection, SectionHeader};
use crate::error::{Error, Result};
use crate::formats::common::{ByteReader, DataType};

/// Geometry sub-section kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubsectionKind {
    Sockets,
    Materials,
    ShaderParams,
    VertexBuffers,
    VertexAttributes,
    JointPalettes,
    IndexBuffers,
    Submeshes,
    Meshes,
    Unknown,
}

impl SubsectionKind {
    #[must_use]
    pub fn from_u32(value: u32) -> Self {
        match value {
            0x00010001 => Self::Sockets,
            0x00010002 => Self::Materials,
            0x00010003 => Self::ShaderParams,
            0x00010004 => Self::VertexBuffers,
            0x00010005 => Self::VertexAttributes,
            0x00010006 => Self::JointPalettes,
            0x00010007 => Self::IndexBuffers,
            0x00010008 => Self::Submeshes,
            0x00010009 => Self::Meshes,
            _ => Self::Unknown,
        }
    }
}

/// One geometry sub-section.
#[derive(Debug, Clone, Copy)]
pub struct GeometrySubsection<'a> {
    pub kind: SubsectionKind,
    pub magic: u32,
    /// Offset of the sub-section header within the geometry section.
    pub offset: usize,
    /// Body, after the 8-byte sub-section header.
    pub data: &'a [u8],
}

impl GeometrySubsection<'_> {
    pub const HEADER_SIZE: usize = 8;

    /// Leading entry count of the body, when present.
    #[must_use]
    pub fn entry_count(&self) -> Option<u32> {
        ByteReader::new(self.data).read_u32().ok()
    }
}

/// Texture slot semantic, as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TextureKind(pub u16);

impl TextureKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "None",
            1 => "Diffuse",
            3 => "Normal",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for TextureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            "Unknown" => write!(f, "{}", self.0),
            name => f.write_str(name),
        }
    }
}

/// Texture reference of a material (12 bytes on disk).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextureBinding {
    /// Index into the model's texture group.
    pub index: u16,
    pub uv_layer: u16,
    pub kind: TextureKind,
    pub alternate_kind: TextureKind,
    pub unknown4: u16,
    pub unknown5: u16,
}

impl TextureBinding {
    pub const SIZE: usize = 12;

    fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            index: reader.read_u16()?,
            uv_layer: reader.read_u16()?,
            kind: TextureKind(reader.read_u16()?),
            alternate_kind: TextureKind(reader.read_u16()?),
            unknown4: reader.read_u16()?,
            unknown5: reader.read_u16()?,
        })
    }
}

/// Material record with its texture bindings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub unknown1: u32,
    /// Number of texture bindings that follow.
    pub texture_count: u32,
    pub unknown2: i32,
    pub unknown3: i32,
    pub textures: Vec<TextureBinding>,
}

impl Material {
    fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let unknown1 = reader.read_u32()?;
        let texture_count = reader.read_u32()?;
        let unknown2 = reader.read_i32()?;
        let unknown3 = reader.read_i32()?;
        let textures = (0..texture_count)
            .map(|_| TextureBinding::read(reader))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            unknown1,
            texture_count,
            unknown2,
            unknown3,
            textures,
        })
    }
}

/// Parsed geometry section.
#[derive(Debug, Clone)]
pub struct Geometry<'a> {
    pub section: SectionHeader,
    pub platform: u32,
    pub reserved: u32,
    /// Min xyz followed by max xyz.
    pub bounding_box: [f32; 6],
    pub subsections: Vec<GeometrySubsection<'a>>,
}

impl<'a> Geometry<'a> {
    /// First sub-section of the given kind.
    #[must_use]
    pub fn subsection(&self, kind: SubsectionKind) -> Option<&GeometrySubsection<'a>> {
        self.subsections.iter().find(|s| s.kind == kind)
    }

    /// Decode the material sub-section; empty if the model has none.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if a record runs past the sub-section.
    pub fn materials(&self) -> Result<Vec<Material>> {
        let Some(subsection) = self.subsection(SubsectionKind::Materials) else {
            return Ok(Vec::new());
        };

        let mut reader = ByteReader::new(subsection.data);
        let count = reader.read_u32()?;
        (0..count).map(|_| Material::read(&mut reader)).collect()
    }
}

impl<'a> ModelSection<'a> for Geometry<'a> {
    const MAGIC: DataType = DataType::ModelGeometry;
    const SUPPORTED_VERSION: u32 = 44;

    fn parse(section: SectionHeader, data: &'a [u8]) -> Result<Self> {
        let mut reader = ByteReader::at(data, SectionHeader::SIZE)?;
        let platform = reader.read_u32()?;
        let reserved = reader.read_u32()?;
        let bounding_box = reader.read_f32_array::<6>()?;
        let count = reader.read_u32()?;

        let mut subsections = Vec::new();
        for _ in 0..count {
            let offset = reader.position();
            let magic = reader.read_u32()?;
            let size = reader.read_u32()?;
            let body_len = (size as usize)
                .checked_sub(GeometrySubsection::HEADER_SIZE)
                .ok_or(Error::InvalidSectionSize {
                    magic: DataType::Unknown(magic),
                    offset,
                    size,
                })?;
            let body = reader.bytes(body_len)?;
            subsections.push(GeometrySubsection {
                kind: SubsectionKind::from_u32(magic),
                magic,
                offset,
                data: body,
            });
        }

        tracing::debug!("G1MG: {} sub-sections", subsections.len());

        Ok(Self {
            section,
            platform,
            reserved,
            bounding_box,
            subsections,
        })
    }

    fn wrap(self) -> ParsedSection<'a> {
        ParsedSection::Geometry(self)
    }

    fn unwrap_ref<'s>(parsed: &'s ParsedSection<'a>) -> Option<&'s Self> {
        match parsed {
            ParsedSection::Geometry(geometry) => Some(geometry),
            _ => None,
        }
    }
}
