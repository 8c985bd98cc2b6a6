//! G1MM bind matrix sections

use glam::Mat4;

use super::{ModelSection, ParsedSection, SectionHeader};
use crate::error::Result;
use crate::formats::common::{ByteReader, DataType};

/// Parsed bind matrix section: a counted array of column-major 4x4 matrices.
#[derive(Debug, Clone)]
pub struct Matrices {
    pub section: SectionHeader,
    pub matrices: Vec<Mat4>,
}

impl Matrices {
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

impl<'a> ModelSection<'a> for Matrices {
    const MAGIC: DataType = DataType::ModelMatrices;
    const SUPPORTED_VERSION: u32 = 20;

    fn parse(section: SectionHeader, data: &'a [u8]) -> Result<Self> {
        let mut reader = ByteReader::at(data, SectionHeader::SIZE)?;
        let count = reader.read_u32()?;
        let matrices = (0..count)
            .map(|_| reader.read_f32_array::<16>().map(|m| Mat4::from_cols_array(&m)))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("G1MM: {} matrices", matrices.len());

        Ok(Self { section, matrices })
    }

    fn wrap(self) -> ParsedSection<'a> {
        ParsedSection::Matrices(self)
    }

    fn unwrap_ref<'s>(parsed: &'s ParsedSection<'a>) -> Option<&'s Self> {
        match parsed {
            ParsedSection::Matrices(matrices) => Some(matrices),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::formats::common::ParseOptions;
    use crate::formats::g1m::G1Model;
    use crate::test_support::ModelBuilder;
    use glam::Vec3;

    fn matrices_body(matrices: &[Mat4]) -> Vec<u8> {
        let mut body = (matrices.len() as u32).to_le_bytes().to_vec();
        for m in matrices {
            for v in m.to_cols_array() {
                body.extend_from_slice(&v.to_le_bytes());
            }
        }
        body
    }

    #[test]
    fn test_column_major_order() {
        let translation = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let data = ModelBuilder::new()
            .section(
                DataType::ModelMatrices,
                20,
                matrices_body(&[Mat4::IDENTITY, translation]),
            )
            .build();
        let model = G1Model::new(&data).unwrap();
        let matrices = model.matrices().unwrap().unwrap();
        assert_eq!(matrices.len(), 2);
        assert_eq!(matrices.matrices[0], Mat4::IDENTITY);
        // translation lives in the fourth column
        assert_eq!(matrices.matrices[1].w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_count_past_section_end() {
        let mut body = matrices_body(&[Mat4::IDENTITY]);
        body[0..4].copy_from_slice(&2u32.to_le_bytes());
        let data = ModelBuilder::new()
            .section(DataType::ModelMatrices, 20, body)
            .build();
        let model = G1Model::new(&data).unwrap();
        assert!(matches!(model.matrices(), Err(Error::OutOfBounds { .. })));
    }

    #[test]
    fn test_other_version_when_ignored() {
        let data = ModelBuilder::new()
            .section(DataType::ModelMatrices, 21, matrices_body(&[]))
            .build();
        assert!(G1Model::new(&data).unwrap().matrices().is_err());
        let model = G1Model::with_options(&data, ParseOptions::unchecked()).unwrap();
        assert!(model.matrices().unwrap().unwrap().is_empty());
    }
}
