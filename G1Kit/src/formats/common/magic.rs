//! Magic tag registry and buffer classification
//!
//! Tags are stored as little-endian u32 values whose big-endian byte order
//! spells the tag name, so `G1MS` appears on disk as the bytes `SM1G`.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use serde::{Serialize, Serializer};

/// Known KTGL container and section tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// G1M model container (`G1M_`)
    Model,
    /// G1M format section (`G1MF`)
    ModelFormat,
    /// G1M skeleton section (`G1MS`)
    ModelSkeleton,
    /// G1M bind matrix section (`G1MM`)
    ModelMatrices,
    /// G1M geometry section (`G1MG`)
    ModelGeometry,
    /// G1M extra data section (`EXTR`)
    ModelExtra,
    /// G1M collision section (`COLL`)
    ModelCollision,
    /// Cloth/physics section (`NUNV`)
    ModelNunv,
    /// Cloth/physics section (`NUNO`)
    ModelNuno,
    /// Cloth/physics section (`NUNS`)
    ModelNuns,
    /// G1T texture group (`G1TG`)
    TextureGroup,
    /// Multi-entry data table (`RTRP`)
    DataTable,
    /// Any other tag.
    Unknown(u32),
}

impl DataType {
    /// Map a raw tag value onto the registry.
    #[must_use]
    pub fn from_u32(value: u32) -> Self {
        match value {
            0x47314D5F => Self::Model,
            0x47314D46 => Self::ModelFormat,
            0x47314D53 => Self::ModelSkeleton,
            0x47314D4D => Self::ModelMatrices,
            0x47314D47 => Self::ModelGeometry,
            0x45585452 => Self::ModelExtra,
            0x434F4C4C => Self::ModelCollision,
            0x4E554E56 => Self::ModelNunv,
            0x4E554E4F => Self::ModelNuno,
            0x4E554E53 => Self::ModelNuns,
            0x47315447 => Self::TextureGroup,
            0x52545250 => Self::DataTable,
            other => Self::Unknown(other),
        }
    }

    /// The raw tag value as stored in files.
    #[must_use]
    pub fn to_u32(self) -> u32 {
        match self {
            Self::Model => 0x47314D5F,
            Self::ModelFormat => 0x47314D46,
            Self::ModelSkeleton => 0x47314D53,
            Self::ModelMatrices => 0x47314D4D,
            Self::ModelGeometry => 0x47314D47,
            Self::ModelExtra => 0x45585452,
            Self::ModelCollision => 0x434F4C4C,
            Self::ModelNunv => 0x4E554E56,
            Self::ModelNuno => 0x4E554E4F,
            Self::ModelNuns => 0x4E554E53,
            Self::TextureGroup => 0x47315447,
            Self::DataTable => 0x52545250,
            Self::Unknown(value) => value,
        }
    }

    /// Four-character name of the tag, with non-printable bytes as `.`.
    #[must_use]
    pub fn name(self) -> String {
        self.to_u32()
            .to_be_bytes()
            .iter()
            .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
            .collect()
    }

    /// File extension used when writing a table entry of this type.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Model => "g1m",
            Self::TextureGroup => "g1t",
            Self::DataTable => "rtrp",
            _ => "bin",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

/// Classify a buffer by the tag at offset 0.
///
/// Buffers shorter than a tag classify as `Unknown(0)`.
#[must_use]
pub fn classify(data: &[u8]) -> DataType {
    if data.len() < 4 {
        return DataType::Unknown(0);
    }
    DataType::from_u32(LittleEndian::read_u32(&data[..4]))
}

/// Check whether a buffer starts with the data table tag.
#[must_use]
pub fn is_data_table(data: &[u8]) -> bool {
    classify(data) == DataType::DataTable
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_tags() {
        assert_eq!(classify(b"_M1G0037"), DataType::Model);
        assert_eq!(classify(b"GT1G0060"), DataType::TextureGroup);
        assert_eq!(classify(&0x52545250u32.to_le_bytes()), DataType::DataTable);
        assert!(is_data_table(&DataType::DataTable.to_u32().to_le_bytes()));
    }

    #[test]
    fn test_classify_unknown_and_short() {
        assert_eq!(classify(b"ABCD"), DataType::Unknown(0x44434241));
        assert_eq!(classify(b"AB"), DataType::Unknown(0));
        assert!(!is_data_table(b""));
    }

    #[test]
    fn test_name_round_trip() {
        assert_eq!(DataType::ModelSkeleton.name(), "G1MS");
        assert_eq!(DataType::Model.to_string(), "G1M_");
        assert_eq!(DataType::from_u32(DataType::ModelNuno.to_u32()), DataType::ModelNuno);
        assert_eq!(DataType::Unknown(0x0001_0002).name(), "....");
    }
}
