//! Serializable model summaries

use serde::Serialize;

use crate::error::{Error, Result};
use crate::formats::common::DataType;
use crate::formats::g1m::{Bone, G1Model, Geometry, Material, Matrices, Skeleton, SubsectionKind};

/// JSON-ready summary of a loaded model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelReport {
    pub sections: Vec<SectionSummary>,
    pub skeleton: Option<SkeletonReport>,
    pub geometry: Option<GeometryReport>,
    pub materials: Vec<Material>,
    pub bind_matrix_count: Option<usize>,
    /// Sections that failed to parse; the rest of the report is still filled.
    pub section_errors: Vec<SectionError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionError {
    pub magic: DataType,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    pub magic: DataType,
    /// Decoded version, `None` if the code is not four ASCII digits.
    pub version: Option<u32>,
    pub offset: usize,
    pub size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkeletonReport {
    pub bone_indices: Vec<i16>,
    pub bones: Vec<BoneReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoneReport {
    pub index: usize,
    pub parent: i32,
    pub local: BoneTransform,
    pub world: BoneTransform,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BoneTransform {
    pub scale: [f32; 3],
    /// x, y, z, w
    pub rotation: [f32; 4],
    pub position: [f32; 3],
    pub length: f32,
}

impl From<&Bone> for BoneTransform {
    fn from(bone: &Bone) -> Self {
        Self {
            scale: bone.scale.to_array(),
            rotation: bone.rotation.to_array(),
            position: bone.position.to_array(),
            length: bone.length,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeometryReport {
    pub platform: u32,
    pub bounding_box: [f32; 6],
    pub subsections: Vec<SubsectionSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubsectionSummary {
    pub kind: SubsectionKind,
    pub magic: u32,
    pub size: usize,
    pub entry_count: Option<u32>,
}

impl ModelReport {
    /// Build a report, parsing every section it covers.
    ///
    /// A section that fails to parse is recorded in `section_errors` and
    /// left out; it does not affect the other sections.
    #[must_use]
    pub fn from_model(model: &G1Model<'_>) -> Self {
        let sections = model
            .sections()
            .map(|s| SectionSummary {
                magic: s.magic,
                version: s.version_number(),
                offset: s.offset,
                size: s.size,
            })
            .collect();

        let mut errors = Vec::new();
        let skeleton = recorded(model.skeleton(), DataType::ModelSkeleton, &mut errors);
        let geometry = recorded(model.geometry(), DataType::ModelGeometry, &mut errors);
        let materials = geometry
            .and_then(|g| recorded(g.materials().map(Some), DataType::ModelGeometry, &mut errors))
            .unwrap_or_default();
        let matrices = recorded(model.matrices(), DataType::ModelMatrices, &mut errors);

        Self {
            sections,
            skeleton: skeleton.map(skeleton_report),
            geometry: geometry.map(geometry_report),
            materials,
            bind_matrix_count: matrices.map(Matrices::len),
            section_errors: errors,
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`crate::Error::JsonError`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn recorded<T>(result: Result<Option<T>>, magic: DataType, errors: &mut Vec<SectionError>) -> Option<T> {
    result.unwrap_or_else(|e: Error| {
        tracing::warn!("Skipping {magic} in report: {e}");
        errors.push(SectionError {
            magic,
            message: e.to_string(),
        });
        None
    })
}

fn skeleton_report(skeleton: &Skeleton) -> SkeletonReport {
    SkeletonReport {
        bone_indices: skeleton.bone_indices.clone(),
        bones: skeleton
            .bones
            .iter()
            .zip(&skeleton.world_bones)
            .enumerate()
            .map(|(index, (local, world))| BoneReport {
                index,
                parent: local.parent,
                local: local.into(),
                world: world.into(),
            })
            .collect(),
    }
}

fn geometry_report(geometry: &Geometry<'_>) -> GeometryReport {
    GeometryReport {
        platform: geometry.platform,
        bounding_box: geometry.bounding_box,
        subsections: geometry
            .subsections
            .iter()
            .map(|s| SubsectionSummary {
                kind: s.kind,
                magic: s.magic,
                size: s.data.len(),
                entry_count: s.entry_count(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{GeometryBuilder, ModelBuilder, bone, skeleton_body};
    use glam::Quat;

    #[test]
    fn test_report_json() {
        let bones = [
            bone(-1, [0.0, 1.0, 0.0], Quat::IDENTITY),
            bone(0, [0.0, 1.0, 0.0], Quat::IDENTITY),
        ];
        let data = ModelBuilder::new()
            .section(DataType::ModelSkeleton, 32, skeleton_body(&bones, &[0, 1]))
            .section(
                DataType::ModelGeometry,
                44,
                GeometryBuilder::new().subsection(0x00010007, 2u32.to_le_bytes().to_vec()).build(),
            )
            .build();
        let model = G1Model::new(&data).unwrap();
        let report = ModelReport::from_model(&model);

        assert_eq!(report.sections.len(), 2);
        let skeleton = report.skeleton.as_ref().unwrap();
        assert_eq!(skeleton.bones[1].world.position, [0.0, 2.0, 0.0]);
        assert!(report.materials.is_empty());
        assert_eq!(report.bind_matrix_count, None);
        assert!(report.section_errors.is_empty());

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["sections"][0]["magic"], "G1MS");
        assert_eq!(json["sections"][0]["version"], 32);
        assert_eq!(json["geometry"]["subsections"][0]["kind"], "IndexBuffers");
        assert_eq!(json["geometry"]["subsections"][0]["entry_count"], 2);
    }

    #[test]
    fn test_section_error_does_not_block_other_sections() {
        let bones = [bone(-1, [0.0, 1.0, 0.0], Quat::IDENTITY)];
        let data = ModelBuilder::new()
            .section(DataType::ModelSkeleton, 32, skeleton_body(&bones, &[0]))
            .section(DataType::ModelMatrices, 21, 0u32.to_le_bytes().to_vec())
            .build();
        let model = G1Model::new(&data).unwrap();
        let report = ModelReport::from_model(&model);

        assert_eq!(report.skeleton.as_ref().unwrap().bones.len(), 1);
        assert_eq!(report.bind_matrix_count, None);
        assert_eq!(report.section_errors.len(), 1);
        assert_eq!(report.section_errors[0].magic, DataType::ModelMatrices);
        assert_eq!(
            report.section_errors[0].message,
            "G1MM version 21 is not supported (expected 20)"
        );

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["section_errors"][0]["magic"], "G1MM");
    }
}
