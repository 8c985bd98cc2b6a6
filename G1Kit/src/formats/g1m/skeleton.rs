//! G1MS skeleton sections
//!
//! Bones are stored parent-relative and ordered so that every parent
//! precedes its children. World transforms are composed in one forward pass.
//!
//! The composition uses raw quaternion products without renormalization and
//! does not apply parent scale to child positions. Exported skeletons are
//! expected to match existing tooling bit for bit, so keep this arithmetic
//! as it is.

use glam::{Quat, Vec3};

use super::{ModelSection, ParsedSection, SectionHeader};
use crate::error::{Error, Result};
use crate::formats::common::{ByteReader, DataType};

/// One bone, in either local or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bone {
    pub scale: Vec3,
    /// Parent bone index; negative for roots.
    pub parent: i32,
    /// Rotation as stored (x, y, z, w); never normalized.
    pub rotation: Quat,
    pub position: Vec3,
    pub length: f32,
}

impl Bone {
    /// On-disk size of a bone record.
    pub const SIZE: usize = 48;

    fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let scale = reader.read_f32_array::<3>()?;
        let parent = reader.read_i32()?;
        let rotation = reader.read_f32_array::<4>()?;
        let position = reader.read_f32_array::<3>()?;
        let length = reader.read_f32()?;
        Ok(Self {
            scale: Vec3::from_array(scale),
            parent,
            rotation: Quat::from_array(rotation),
            position: Vec3::from_array(position),
            length,
        })
    }

    /// Parent index, or `None` for a root bone.
    #[must_use]
    pub fn parent_index(&self) -> Option<usize> {
        usize::try_from(self.parent).ok()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent < 0
    }
}

/// Hamilton product `l * r`, evaluated in a fixed order.
#[must_use]
pub fn quat_mul(l: Quat, r: Quat) -> Quat {
    let [lx, ly, lz, lw] = l.to_array();
    let [rx, ry, rz, rw] = r.to_array();

    let cx = ly * rz - lz * ry;
    let cy = lz * rx - lx * rz;
    let cz = lx * ry - ly * rx;
    let dot = lx * rx + ly * ry + lz * rz;

    Quat::from_xyzw(
        rw * lx + lw * rx + cx,
        rw * ly + lw * ry + cy,
        rw * lz + lw * rz + cz,
        lw * rw - dot,
    )
}

/// Vector part of `q * (v, 0) * conj(q)`; `q` is not normalized first.
#[must_use]
pub fn rotate_vector(q: Quat, v: Vec3) -> Vec3 {
    let [x, y, z, w] = q.to_array();
    let pure = Quat::from_xyzw(v.x, v.y, v.z, 0.0);
    let conjugate = Quat::from_xyzw(-x, -y, -z, w);
    let [rx, ry, rz, _] = quat_mul(quat_mul(q, pure), conjugate).to_array();
    Vec3::new(rx, ry, rz)
}

/// Compose parent-relative bones into world space.
///
/// # Errors
/// Returns [`Error::BoneOrder`] if any bone's parent does not precede it;
/// no partial result is produced.
pub fn resolve_world_bones(bones: &[Bone]) -> Result<Vec<Bone>> {
    let mut world: Vec<Bone> = Vec::with_capacity(bones.len());

    for (index, bone) in bones.iter().enumerate() {
        let Some(parent_index) = bone.parent_index() else {
            world.push(*bone);
            continue;
        };

        if parent_index >= index {
            return Err(Error::BoneOrder {
                bone: index,
                parent: bone.parent,
            });
        }

        let parent = world[parent_index];
        let offset = rotate_vector(parent.rotation, bone.position);
        world.push(Bone {
            scale: parent.scale * bone.scale,
            parent: bone.parent,
            rotation: quat_mul(parent.rotation, bone.rotation),
            position: Vec3::new(
                offset.x + parent.position.x,
                offset.y + parent.position.y,
                offset.z + parent.position.z,
            ),
            length: bone.length,
        });
    }

    Ok(world)
}

/// G1MS header fields following the section header.
#[derive(Debug, Clone, Copy)]
pub struct SkeletonHeader {
    /// Section-relative offset of the bone array.
    pub bone_table_offset: u32,
    pub unknown: u32,
    pub bone_count: u16,
    /// Byte length of the bone index array.
    pub bone_index_size: u16,
    pub layer: u16,
    pub padding: u16,
}

/// Parsed skeleton section.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub section: SectionHeader,
    pub header: SkeletonHeader,
    /// External bone id to array position remap, as stored.
    pub bone_indices: Vec<i16>,
    /// Parent-relative bones.
    pub bones: Vec<Bone>,
    /// World-space bones, same order as `bones`.
    pub world_bones: Vec<Bone>,
}

impl<'a> ModelSection<'a> for Skeleton {
    const MAGIC: DataType = DataType::ModelSkeleton;
    const SUPPORTED_VERSION: u32 = 32;

    fn parse(section: SectionHeader, data: &'a [u8]) -> Result<Self> {
        let mut reader = ByteReader::at(data, SectionHeader::SIZE)?;
        let header = SkeletonHeader {
            bone_table_offset: reader.read_u32()?,
            unknown: reader.read_u32()?,
            bone_count: reader.read_u16()?,
            bone_index_size: reader.read_u16()?,
            layer: reader.read_u16()?,
            padding: reader.read_u16()?,
        };

        let bone_indices = (0..header.bone_index_size / 2)
            .map(|_| reader.read_i16())
            .collect::<Result<Vec<_>>>()?;

        reader.seek(header.bone_table_offset as usize)?;
        let bones = (0..header.bone_count)
            .map(|_| Bone::read(&mut reader))
            .collect::<Result<Vec<_>>>()?;

        let world_bones = resolve_world_bones(&bones)?;

        tracing::debug!(
            "G1MS: {} bones, {} bone indices",
            bones.len(),
            bone_indices.len()
        );

        Ok(Self {
            section,
            header,
            bone_indices,
            bones,
            world_bones,
        })
    }

    fn wrap(self) -> ParsedSection<'a> {
        ParsedSection::Skeleton(self)
    }

    fn unwrap_ref<'s>(parsed: &'s ParsedSection<'a>) -> Option<&'s Self> {
        match parsed {
            ParsedSection::Skeleton(skeleton) => Some(skeleton),
            _ => None,
        }
    }
}
