//! Builders for synthetic containers used by unit tests

use glam::{Quat, Vec3};

use crate::formats::common::DataType;
use crate::formats::common::version::encode_version;
use crate::formats::g1m::{Bone, Material};

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_f32s(out: &mut Vec<u8>, values: &[f32]) {
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

fn len_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap()
}

/// Data table with entries laid out back to back after the offset tables.
#[derive(Default)]
pub struct TableBuilder {
    entries: Vec<Vec<u8>>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, data: Vec<u8>) -> Self {
        self.entries.push(data);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let count = self.entries.len();
        let pointer_table = 40;
        let size_table = pointer_table + count * 4;
        let data_start = size_table + count * 4;
        let total = data_start + self.entries.iter().map(Vec::len).sum::<usize>();

        let mut out = Vec::with_capacity(total);
        push_u32(&mut out, DataType::DataTable.to_u32());
        push_u32(&mut out, 0x4B50_5254);
        push_u32(&mut out, encode_version(1));
        push_u32(&mut out, 40);
        push_u32(&mut out, len_u32(total));
        push_u32(&mut out, len_u32(count));
        push_u32(&mut out, len_u32(count));
        push_u32(&mut out, 0);
        push_u32(&mut out, len_u32(pointer_table));
        push_u32(&mut out, len_u32(size_table));

        let mut offset = data_start;
        for entry in &self.entries {
            push_u32(&mut out, len_u32(offset));
            offset += entry.len();
        }
        for entry in &self.entries {
            push_u32(&mut out, len_u32(entry.len()));
        }
        for entry in self.entries {
            out.extend(entry);
        }
        out
    }
}

/// G1M model with sections in insertion order, the first at offset 24.
#[derive(Default)]
pub struct ModelBuilder {
    sections: Vec<(DataType, u32, Vec<u8>)>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section; `body` excludes the 12-byte section header.
    pub fn section(mut self, magic: DataType, version: u32, body: Vec<u8>) -> Self {
        self.sections.push((magic, version, body));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let total = 24 + self.sections.iter().map(|(_, _, b)| 12 + b.len()).sum::<usize>();
        let mut out = Vec::with_capacity(total);
        push_u32(&mut out, DataType::Model.to_u32());
        push_u32(&mut out, encode_version(37));
        push_u32(&mut out, len_u32(total));
        push_u32(&mut out, 24);
        push_u32(&mut out, 0);
        push_u32(&mut out, len_u32(self.sections.len()));

        for (magic, version, body) in self.sections {
            push_u32(&mut out, magic.to_u32());
            push_u32(&mut out, encode_version(version));
            push_u32(&mut out, len_u32(12 + body.len()));
            out.extend(body);
        }
        out
    }
}

/// Bone with unit scale and a fixed length.
pub fn bone(parent: i32, position: [f32; 3], rotation: Quat) -> Bone {
    Bone {
        scale: Vec3::ONE,
        parent,
        rotation,
        position: Vec3::from_array(position),
        length: 0.5,
    }
}

/// G1MS body: header, bone index array, then the bone table on a 4-byte
/// boundary.
pub fn skeleton_body(bones: &[Bone], indices: &[i16]) -> Vec<u8> {
    let table_offset = (12 + 16 + indices.len() * 2).next_multiple_of(4);

    let mut out = Vec::new();
    push_u32(&mut out, len_u32(table_offset));
    push_u32(&mut out, 0);
    out.extend_from_slice(&u16::try_from(bones.len()).unwrap().to_le_bytes());
    out.extend_from_slice(&u16::try_from(indices.len() * 2).unwrap().to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    for index in indices {
        out.extend_from_slice(&index.to_le_bytes());
    }
    out.resize(table_offset - 12, 0);

    for bone in bones {
        push_f32s(&mut out, &bone.scale.to_array());
        out.extend_from_slice(&bone.parent.to_le_bytes());
        push_f32s(&mut out, &bone.rotation.to_array());
        push_f32s(&mut out, &bone.position.to_array());
        push_f32s(&mut out, &[bone.length]);
    }
    out
}

/// G1MG body with a sub-section table.
#[derive(Default)]
pub struct GeometryBuilder {
    subsections: Vec<(u32, Vec<u8>)>,
}

impl GeometryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subsection(mut self, magic: u32, body: Vec<u8>) -> Self {
        self.subsections.push((magic, body));
        self
    }

    /// Add a material sub-section holding `materials`.
    pub fn materials(self, materials: &[Material]) -> Self {
        let mut body = Vec::new();
        push_u32(&mut body, len_u32(materials.len()));
        for material in materials {
            push_u32(&mut body, material.unknown1);
            push_u32(&mut body, material.texture_count);
            body.extend_from_slice(&material.unknown2.to_le_bytes());
            body.extend_from_slice(&material.unknown3.to_le_bytes());
            for t in &material.textures {
                for v in [t.index, t.uv_layer, t.kind.0, t.alternate_kind.0, t.unknown4, t.unknown5] {
                    body.extend_from_slice(&v.to_le_bytes());
                }
            }
        }
        self.subsection(0x0001_0002, body)
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::new();
        push_u32(&mut out, 0);
        push_u32(&mut out, 0);
        push_f32s(&mut out, &[-1.0, -1.0, -1.0, 1.0, 1.0, 1.0]);
        push_u32(&mut out, len_u32(self.subsections.len()));
        for (magic, body) in self.subsections {
            push_u32(&mut out, magic);
            push_u32(&mut out, len_u32(8 + body.len()));
            out.extend(body);
        }
        out
    }
}

/// G1T texture group with textures back to back after the offset table.
#[derive(Default)]
pub struct TextureGroupBuilder {
    textures: Vec<(u32, Option<Vec<u8>>, Vec<u8>)>,
}

impl TextureGroupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture(mut self, packed: u32, blob: Vec<u8>) -> Self {
        self.textures.push((packed, None, blob));
        self
    }

    /// Add a texture with an extra header; the first four bytes of `extra`
    /// are overwritten with its length.
    pub fn texture_with_extra(mut self, packed: u32, mut extra: Vec<u8>, blob: Vec<u8>) -> Self {
        let size = len_u32(extra.len()).to_le_bytes();
        extra[..4].copy_from_slice(&size);
        self.textures.push((packed, Some(extra), blob));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let count = self.textures.len();
        let table_offset = 28 + count * 4;

        let mut textures = Vec::new();
        let mut offsets = Vec::with_capacity(count);
        for (packed, extra, blob) in self.textures {
            offsets.push(len_u32(count * 4 + textures.len()));
            push_u32(&mut textures, packed);
            push_u32(&mut textures, if extra.is_some() { 0x1000_0000 } else { 0 });
            if let Some(extra) = extra {
                textures.extend(extra);
            }
            textures.extend(blob);
        }

        let total = table_offset + count * 4 + textures.len();
        let mut out = Vec::with_capacity(total);
        push_u32(&mut out, DataType::TextureGroup.to_u32());
        push_u32(&mut out, encode_version(60));
        push_u32(&mut out, len_u32(total));
        push_u32(&mut out, len_u32(table_offset));
        push_u32(&mut out, len_u32(count));
        push_u32(&mut out, 0);
        push_u32(&mut out, 0);
        for _ in 0..count {
            push_u32(&mut out, 0);
        }
        for offset in offsets {
            push_u32(&mut out, offset);
        }
        out.extend(textures);
        out
    }
}
