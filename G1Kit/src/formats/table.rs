//! RTRP multi-entry data tables
//!
//! A data table is a header followed by two parallel u32 tables: entry
//! offsets and entry sizes. Entries are borrowed sub-ranges of the input.

use super::common::{ByteReader, DataType, classify};
use crate::error::{Error, Result};

/// Data table header (40 bytes)
#[derive(Debug, Clone)]
pub struct TableHeader {
    pub magic: DataType,
    pub long_magic: u32,
    pub version: u32,
    pub header_size: u32,
    pub file_size: u32,
    pub pointer_count: u32,
    pub size_count: u32,
    pub reserved: u32,
    pub pointer_table_offset: u32,
    pub size_table_offset: u32,
}

impl TableHeader {
    pub const SIZE: usize = 40;

    fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            magic: DataType::from_u32(reader.read_u32()?),
            long_magic: reader.read_u32()?,
            version: reader.read_u32()?,
            header_size: reader.read_u32()?,
            file_size: reader.read_u32()?,
            pointer_count: reader.read_u32()?,
            size_count: reader.read_u32()?,
            reserved: reader.read_u32()?,
            pointer_table_offset: reader.read_u32()?,
            size_table_offset: reader.read_u32()?,
        })
    }
}

/// One entry of a data table, borrowing its bytes from the table buffer.
#[derive(Debug, Clone, Copy)]
pub struct TableEntry<'a> {
    pub index: usize,
    pub offset: usize,
    pub data: &'a [u8],
}

impl TableEntry<'_> {
    /// Zero-padded index used as the entry's name.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{:04}", self.index)
    }

    /// Classification of the entry's own leading tag.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        classify(self.data)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A parsed data table.
#[derive(Debug, Clone)]
pub struct DataTable<'a> {
    pub header: TableHeader,
    pub entries: Vec<TableEntry<'a>>,
}

impl<'a> DataTable<'a> {
    /// Parse a data table and split it into entries.
    ///
    /// # Errors
    /// Returns a format error if the magic is wrong or any offset table or
    /// entry range reaches past the declared file size.
    pub fn read(data: &'a [u8]) -> Result<Self> {
        let mut reader = ByteReader::new(data);
        let header = TableHeader::read(&mut reader)?;

        if header.magic != DataType::DataTable {
            return Err(Error::InvalidMagic {
                expected: DataType::DataTable,
                found: header.magic,
            });
        }

        let file_size = header.file_size as usize;
        if file_size > data.len() {
            return Err(Error::InvalidTable {
                message: format!(
                    "declared file size {file_size} exceeds buffer of {} bytes",
                    data.len()
                ),
            });
        }

        // Everything below is bounded by the declared size, not the buffer.
        let table = ByteReader::new(&data[..file_size]);
        let offsets = read_table(
            &table,
            header.pointer_table_offset,
            header.pointer_count,
            "pointer",
        )?;
        let sizes = read_table(&table, header.size_table_offset, header.size_count, "size")?;

        if offsets.len() != sizes.len() {
            tracing::warn!(
                "Data table pointer count {} differs from size count {}",
                offsets.len(),
                sizes.len()
            );
        }

        let entries = offsets
            .iter()
            .zip(&sizes)
            .enumerate()
            .map(|(index, (&offset, &size))| {
                let offset = offset as usize;
                let data = table.slice(offset, size as usize).map_err(|_| Error::InvalidTable {
                    message: format!(
                        "entry {index} ({size} bytes at {offset:#x}) exceeds file size {file_size}"
                    ),
                })?;
                Ok(TableEntry { index, offset, data })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Data table: {} entries", entries.len());

        Ok(Self { header, entries })
    }

    /// First entry whose leading tag is `data_type`.
    #[must_use]
    pub fn first_of(&self, data_type: DataType) -> Option<&TableEntry<'a>> {
        self.entries.iter().find(|e| e.data_type() == data_type)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn read_table(reader: &ByteReader<'_>, offset: u32, count: u32, what: &str) -> Result<Vec<u32>> {
    reader
        .u32_table(offset as usize, count as usize)
        .map_err(|_| Error::InvalidTable {
            message: format!(
                "{count} {what} entries at {offset:#x} exceed file size {}",
                reader.len()
            ),
        })
}

/// Split a data table buffer into its entries.
///
/// # Errors
/// See [`DataTable::read`].
pub fn split_table(data: &[u8]) -> Result<Vec<TableEntry<'_>>> {
    DataTable::read(data).map(|table| table.entries)
}
