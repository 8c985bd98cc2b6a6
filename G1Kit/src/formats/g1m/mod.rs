//! G1M model containers
//!
//! A G1M file is a 24-byte master header followed by a contiguous run of
//! tagged, versioned sections (skeleton, geometry, bind matrices, ...).
//! Loading only records the section headers; typed views are parsed on
//! first lookup and cached per section.

mod geometry;
mod matrices;
mod skeleton;

use std::cell::OnceCell;
use std::ops::Range;

pub use geometry::{Geometry, GeometrySubsection, Material, SubsectionKind, TextureBinding, TextureKind};
pub use matrices::Matrices;
pub use skeleton::{Bone, Skeleton, SkeletonHeader, quat_mul, resolve_world_bones, rotate_vector};

use super::common::{ByteReader, DataType, ParseOptions, decode_version};
use crate::error::{Error, Result};

/// G1M master header (24 bytes)
#[derive(Debug, Clone)]
pub struct ModelHeader {
    pub magic: DataType,
    pub version: u32,
    pub file_size: u32,
    pub first_section_offset: u32,
    pub reserved: u32,
    pub section_count: u32,
}

impl ModelHeader {
    pub const SIZE: usize = 24;

    fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            magic: DataType::from_u32(reader.read_u32()?),
            version: reader.read_u32()?,
            file_size: reader.read_u32()?,
            first_section_offset: reader.read_u32()?,
            reserved: reader.read_u32()?,
            section_count: reader.read_u32()?,
        })
    }
}

/// Section header (12 bytes), plus where the section sits in its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    pub magic: DataType,
    /// Raw version code; see [`decode_version`].
    pub version: u32,
    /// Section size including this header.
    pub size: u32,
    /// Offset of the section header in the buffer.
    pub offset: usize,
    /// Offset of the section body in the buffer.
    pub data_offset: usize,
}

impl SectionHeader {
    pub const SIZE: usize = 12;

    /// Read a section header at `offset`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the header does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<Self> {
        let mut reader = ByteReader::at(data, offset)?;
        Ok(Self {
            magic: DataType::from_u32(reader.read_u32()?),
            version: reader.read_u32()?,
            size: reader.read_u32()?,
            offset,
            data_offset: offset + Self::SIZE,
        })
    }

    /// Decoded version number, if the code is four ASCII digits.
    #[must_use]
    pub fn version_number(&self) -> Option<u32> {
        decode_version(self.version)
    }

    /// Byte range of the whole section within its buffer.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.size as usize
    }
}

/// A typed section view constructed from one tagged section.
pub trait ModelSection<'a>: Sized {
    /// Tag this view decodes.
    const MAGIC: DataType;
    /// The only version accepted without [`ParseOptions::ignore_version`].
    const SUPPORTED_VERSION: u32;

    /// Parse a section whose header has already been validated.
    ///
    /// `section` spans the whole section, header included, so offsets
    /// stored in the body are section-relative.
    fn parse(header: SectionHeader, section: &'a [u8]) -> Result<Self>;

    /// Store this view in the section cache.
    fn wrap(self) -> ParsedSection<'a>;

    /// Borrow this view back out of the section cache.
    fn unwrap_ref<'s>(parsed: &'s ParsedSection<'a>) -> Option<&'s Self>;

    /// Validate the header's tag and version, then parse.
    ///
    /// # Errors
    /// [`Error::InvalidMagic`] on a tag mismatch, [`Error::VersionMismatch`]
    /// on an unsupported version unless ignored, or any parse error.
    fn read(header: SectionHeader, section: &'a [u8], options: ParseOptions) -> Result<Self> {
        if header.magic != Self::MAGIC {
            return Err(Error::InvalidMagic {
                expected: Self::MAGIC,
                found: header.magic,
            });
        }

        let version = header.version_number();
        if version != Some(Self::SUPPORTED_VERSION) {
            if !options.ignore_version {
                return Err(Error::VersionMismatch {
                    section: Self::MAGIC,
                    expected: Self::SUPPORTED_VERSION,
                    found: version,
                    raw: header.version,
                });
            }
            tracing::debug!(
                "Parsing {} version {:?} without version check",
                Self::MAGIC,
                version
            );
        }

        Self::parse(header, section)
    }

    /// Parse a standalone section buffer that starts with its own header.
    ///
    /// # Errors
    /// As [`ModelSection::read`], plus [`Error::OutOfBounds`] if the declared
    /// size runs past the buffer.
    fn from_bytes(section: &'a [u8], options: ParseOptions) -> Result<Self> {
        let header = SectionHeader::read(section, 0)?;
        if header.magic != Self::MAGIC {
            return Err(Error::InvalidMagic {
                expected: Self::MAGIC,
                found: header.magic,
            });
        }
        let bytes = ByteReader::new(section).slice(0, header.size as usize)?;
        Self::read(header, bytes, options)
    }
}

/// Cached typed view of a section.
#[derive(Debug)]
pub enum ParsedSection<'a> {
    Skeleton(Skeleton),
    Geometry(Geometry<'a>),
    Matrices(Matrices),
}

#[derive(Debug)]
struct SectionSlot<'a> {
    header: SectionHeader,
    parsed: OnceCell<ParsedSection<'a>>,
}

/// A loaded G1M model.
#[derive(Debug)]
pub struct G1Model<'a> {
    data: &'a [u8],
    pub header: ModelHeader,
    sections: Vec<SectionSlot<'a>>,
    options: ParseOptions,
}

impl<'a> G1Model<'a> {
    /// Load a model with strict version checks.
    ///
    /// # Errors
    /// Returns a format error if the master header or any section header is
    /// invalid.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        Self::with_options(data, ParseOptions::default())
    }

    /// Load a model with explicit parse options.
    ///
    /// # Errors
    /// See [`G1Model::new`].
    pub fn with_options(data: &'a [u8], options: ParseOptions) -> Result<Self> {
        let mut reader = ByteReader::new(data);
        let header = ModelHeader::read(&mut reader)?;

        if header.magic != DataType::Model {
            return Err(Error::InvalidMagic {
                expected: DataType::Model,
                found: header.magic,
            });
        }

        let file_size = header.file_size as usize;
        if file_size > data.len() {
            return Err(Error::OutOfBounds {
                offset: 0,
                len: file_size,
                size: data.len(),
            });
        }

        let mut offset = header.first_section_offset as usize;
        if offset < ModelHeader::SIZE {
            return Err(Error::InvalidSectionSize {
                magic: DataType::Model,
                offset: 0,
                size: header.first_section_offset,
            });
        }

        let body = &data[..file_size];
        let mut sections = Vec::new();
        while offset < file_size {
            let section = SectionHeader::read(body, offset)?;
            let size = section.size as usize;
            if size < SectionHeader::SIZE || size > file_size - offset {
                return Err(Error::InvalidSectionSize {
                    magic: section.magic,
                    offset,
                    size: section.size,
                });
            }

            tracing::debug!(
                "G1M section {} version {:?} at {:#x} ({} bytes)",
                section.magic,
                section.version_number(),
                offset,
                size
            );

            sections.push(SectionSlot {
                header: section,
                parsed: OnceCell::new(),
            });
            offset += size;
        }

        if sections.len() != header.section_count as usize {
            tracing::warn!(
                "G1M declares {} sections but {} were found",
                header.section_count,
                sections.len()
            );
        }

        Ok(Self {
            data,
            header,
            sections,
            options,
        })
    }

    /// Section headers in file order.
    pub fn sections(&self) -> impl Iterator<Item = &SectionHeader> {
        self.sections.iter().map(|slot| &slot.header)
    }

    /// Raw bytes of the first section with the given tag, header included.
    #[must_use]
    pub fn section_bytes(&self, magic: DataType) -> Option<&'a [u8]> {
        self.sections
            .iter()
            .find(|slot| slot.header.magic == magic)
            .map(|slot| &self.data[slot.header.range()])
    }

    /// Typed view of the first section tagged `T::MAGIC`.
    ///
    /// The view is parsed on the first call and cached; a failed parse is
    /// not cached and leaves other sections usable.
    ///
    /// # Errors
    /// Returns the section's parse error, including
    /// [`Error::VersionMismatch`] when version checks are enabled.
    pub fn get_section<T: ModelSection<'a>>(&self) -> Result<Option<&T>> {
        let Some(slot) = self.sections.iter().find(|slot| slot.header.magic == T::MAGIC) else {
            return Ok(None);
        };

        if let Some(parsed) = slot.parsed.get() {
            return Ok(T::unwrap_ref(parsed));
        }

        let bytes = &self.data[slot.header.range()];
        let section = T::read(slot.header, bytes, self.options)?;
        let parsed = slot.parsed.get_or_init(|| section.wrap());
        Ok(T::unwrap_ref(parsed))
    }

    /// Skeleton section, if present.
    ///
    /// # Errors
    /// See [`G1Model::get_section`].
    pub fn skeleton(&self) -> Result<Option<&Skeleton>> {
        self.get_section::<Skeleton>()
    }

    /// Geometry section, if present.
    ///
    /// # Errors
    /// See [`G1Model::get_section`].
    pub fn geometry(&self) -> Result<Option<&Geometry<'a>>> {
        self.get_section::<Geometry<'a>>()
    }

    /// Bind matrix section, if present.
    ///
    /// # Errors
    /// See [`G1Model::get_section`].
    pub fn matrices(&self) -> Result<Option<&Matrices>> {
        self.get_section::<Matrices>()
    }

    #[must_use]
    pub fn options(&self) -> ParseOptions {
        self.options
    }
}
