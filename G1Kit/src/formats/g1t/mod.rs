//! G1T texture groups
//!
//! A texture group is a 28-byte header, a per-texture usage array, and an
//! offset table pointing at the textures. Each texture carries an 8-byte
//! header (packed descriptor + flags), an optional extra header, and its
//! raw pixel payload, which runs up to the next texture.

mod descriptor;

pub use descriptor::{TextureDescriptor, TextureFormat, unpack_header};

use super::common::{ByteReader, DataType, decode_version};
use crate::error::{Error, Result};

/// Texture group header (28 bytes)
#[derive(Debug, Clone)]
pub struct TextureGroupHeader {
    pub magic: DataType,
    /// Raw version code; not enforced.
    pub version: u32,
    pub file_size: u32,
    pub table_offset: u32,
    pub texture_count: u32,
    pub platform: u32,
    pub extra_size: u32,
}

impl TextureGroupHeader {
    pub const SIZE: usize = 28;

    fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            magic: DataType::from_u32(reader.read_u32()?),
            version: reader.read_u32()?,
            file_size: reader.read_u32()?,
            table_offset: reader.read_u32()?,
            texture_count: reader.read_u32()?,
            platform: reader.read_u32()?,
            extra_size: reader.read_u32()?,
        })
    }
}

/// One texture of a group, borrowing its payload from the group buffer.
#[derive(Debug, Clone, Copy)]
pub struct TextureRecord<'a> {
    pub index: usize,
    pub usage: u32,
    pub packed: u32,
    pub unknown: u32,
    /// Extra header, size field included.
    pub extra: Option<&'a [u8]>,
    pub blob: &'a [u8],
}

impl TextureRecord<'_> {
    /// Per-texture header size preceding any extra header.
    pub const HEADER_SIZE: usize = 8;

    /// Four-digit hex index used as the texture's file stem.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{:04X}", self.index)
    }

    #[must_use]
    pub fn descriptor(&self) -> TextureDescriptor {
        unpack_header(self.packed)
    }

    #[must_use]
    pub fn has_extra_header(&self) -> bool {
        self.unknown >> 24 != 0
    }
}

/// A parsed texture group.
#[derive(Debug, Clone)]
pub struct G1TextureGroup<'a> {
    pub header: TextureGroupHeader,
    pub textures: Vec<TextureRecord<'a>>,
}

impl<'a> G1TextureGroup<'a> {
    /// Parse a texture group.
    ///
    /// # Errors
    /// Returns a format error if the magic is wrong, the tables do not fit
    /// the declared file size, or a texture's headers overrun its payload.
    pub fn read(data: &'a [u8]) -> Result<Self> {
        let mut reader = ByteReader::new(data);
        let header = TextureGroupHeader::read(&mut reader)?;

        if header.magic != DataType::TextureGroup {
            return Err(Error::InvalidMagic {
                expected: DataType::TextureGroup,
                found: header.magic,
            });
        }

        tracing::debug!(
            "G1T version {:?}, {} textures, platform {}",
            decode_version(header.version),
            header.texture_count,
            header.platform
        );

        let file_size = header.file_size as usize;
        if file_size > data.len() {
            return Err(invalid(format!(
                "declared file size {file_size} exceeds buffer of {} bytes",
                data.len()
            )));
        }

        let body = ByteReader::new(&data[..file_size]);
        let count = header.texture_count as usize;
        let usage = body
            .u32_table(TextureGroupHeader::SIZE, count)
            .map_err(|_| invalid(format!("usage flags for {count} textures exceed file size")))?;
        let table_offset = header.table_offset as usize;
        let starts = body
            .u32_table(table_offset, count)
            .map_err(|_| invalid(format!("offset table at {table_offset:#x} exceeds file size")))?
            .into_iter()
            .map(|relative| table_offset + relative as usize)
            .collect::<Vec<_>>();

        let mut ordered = starts.clone();
        ordered.sort_unstable();
        ordered.dedup();

        let textures = starts
            .iter()
            .enumerate()
            .map(|(index, &start)| {
                let end = ordered
                    .iter()
                    .copied()
                    .find(|&next| next > start)
                    .unwrap_or(file_size);
                read_texture(&body, index, start, end, usage[index])
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { header, textures })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TextureRecord<'a>> {
        self.textures.get(index)
    }
}

fn read_texture<'a>(
    body: &ByteReader<'a>,
    index: usize,
    start: usize,
    end: usize,
    usage: u32,
) -> Result<TextureRecord<'a>> {
    let mut reader = ByteReader::new(body_slice(body, start, end, index)?);
    let packed = reader.read_u32().map_err(|_| short_header(index, start))?;
    let unknown = reader.read_u32().map_err(|_| short_header(index, start))?;

    let mut record = TextureRecord {
        index,
        usage,
        packed,
        unknown,
        extra: None,
        blob: &[],
    };

    if record.has_extra_header() {
        let size = reader.read_u32().map_err(|_| short_header(index, start))? as usize;
        if size < 4 {
            return Err(invalid(format!("texture {index} has extra header of {size} bytes")));
        }
        let extra = reader
            .slice(TextureRecord::HEADER_SIZE, size)
            .map_err(|_| short_header(index, start))?;
        record.extra = Some(extra);
        reader.seek(TextureRecord::HEADER_SIZE + size)?;
    }

    record.blob = reader.bytes(reader.len() - reader.position())?;
    Ok(record)
}

fn body_slice<'a>(body: &ByteReader<'a>, start: usize, end: usize, index: usize) -> Result<&'a [u8]> {
    end.checked_sub(start)
        .and_then(|len| body.slice(start, len).ok())
        .ok_or_else(|| invalid(format!("texture {index} at {start:#x} exceeds file size")))
}

fn short_header(index: usize, start: usize) -> Error {
    invalid(format!("texture {index} at {start:#x} is too short for its headers"))
}

fn invalid(message: String) -> Error {
    Error::InvalidTextureGroup { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TextureGroupBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_records_in_order() {
        let data = TextureGroupBuilder::new()
            .texture(0x0022_0810, vec![1; 32])
            .texture_with_extra(0x0022_0810, vec![0xAA; 12], vec![2; 32])
            .build();
        let group = G1TextureGroup::read(&data).unwrap();
        assert_eq!(group.len(), 2);

        let first = group.get(0).unwrap();
        assert_eq!(first.name(), "0000");
        assert_eq!(first.blob, &[1u8; 32][..]);
        assert!(first.extra.is_none());

        let second = group.get(1).unwrap();
        assert_eq!(second.extra.map(<[u8]>::len), Some(12));
        assert_eq!(second.blob, &[2u8; 32][..]);
        let descriptor = second.descriptor();
        assert_eq!((descriptor.width, descriptor.height), (4, 4));
        assert_eq!(descriptor.format(), TextureFormat::Bc3);
    }

    #[test]
    fn test_blob_ends_at_next_texture_in_offset_order() {
        let mut data = TextureGroupBuilder::new()
            .texture(0x0022_0010, vec![1; 64])
            .texture(0x0022_0010, vec![2; 64])
            .build();
        // swap the two offsets so the table is not in file order
        let table = u32::from_le_bytes(data[0x0C..0x10].try_into().unwrap()) as usize;
        let (a, b) = (
            data[table..table + 4].to_vec(),
            data[table + 4..table + 8].to_vec(),
        );
        data[table..table + 4].copy_from_slice(&b);
        data[table + 4..table + 8].copy_from_slice(&a);

        let group = G1TextureGroup::read(&data).unwrap();
        assert_eq!(group.get(0).unwrap().blob, &[2u8; 64][..]);
        assert_eq!(group.get(1).unwrap().blob, &[1u8; 64][..]);
    }

    #[test]
    fn test_wrong_magic() {
        let mut data = TextureGroupBuilder::new().build();
        data[0..4].copy_from_slice(b"_M1G");
        assert!(matches!(
            G1TextureGroup::read(&data),
            Err(Error::InvalidMagic { found: DataType::Model, .. })
        ));
    }

    #[test]
    fn test_offset_table_past_file_size() {
        let mut data = TextureGroupBuilder::new().texture(0x10, vec![0; 8]).build();
        data[0x0C..0x10].copy_from_slice(&0xFFFFu32.to_le_bytes());
        assert!(matches!(
            G1TextureGroup::read(&data),
            Err(Error::InvalidTextureGroup { .. })
        ));
    }

    #[test]
    fn test_texture_offset_past_file_size() {
        let mut data = TextureGroupBuilder::new().texture(0x10, vec![0; 8]).build();
        let table = u32::from_le_bytes(data[0x0C..0x10].try_into().unwrap()) as usize;
        data[table..table + 4].copy_from_slice(&0x0010_0000u32.to_le_bytes());
        assert!(matches!(
            G1TextureGroup::read(&data),
            Err(Error::InvalidTextureGroup { .. })
        ));
    }

    #[test]
    fn test_undersized_extra_header() {
        let mut data = TextureGroupBuilder::new()
            .texture_with_extra(0x10, vec![0; 4], vec![0; 16])
            .build();
        let len = data.len();
        // extra header size field sits right after the 8-byte texture header
        let at = len - 16 - 4;
        data[at..at + 4].copy_from_slice(&2u32.to_le_bytes());
        assert!(matches!(
            G1TextureGroup::read(&data),
            Err(Error::InvalidTextureGroup { .. })
        ));
    }
}
