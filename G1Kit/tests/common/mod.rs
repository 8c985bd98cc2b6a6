//! Minimal container writers for integration tests

#![allow(dead_code)]

pub fn tag(name: &[u8; 4]) -> [u8; 4] {
    u32::from_be_bytes(*name).to_le_bytes()
}

pub fn version(v: u32) -> [u8; 4] {
    let digits = format!("{v:04}");
    let b = digits.as_bytes();
    u32::from_be_bytes([b[0], b[1], b[2], b[3]]).to_le_bytes()
}

fn u32le(v: usize) -> [u8; 4] {
    u32::try_from(v).unwrap().to_le_bytes()
}

/// Data table with entries back to back.
pub fn data_table(entries: &[Vec<u8>]) -> Vec<u8> {
    let n = entries.len();
    let data_start = 40 + n * 8;
    let total = data_start + entries.iter().map(Vec::len).sum::<usize>();
    let mut out = Vec::new();
    out.extend(tag(b"RTRP"));
    out.extend([0; 4]);
    out.extend(version(1));
    out.extend(u32le(40));
    out.extend(u32le(total));
    out.extend(u32le(n));
    out.extend(u32le(n));
    out.extend([0; 4]);
    out.extend(u32le(40));
    out.extend(u32le(40 + n * 4));
    let mut offset = data_start;
    for e in entries {
        out.extend(u32le(offset));
        offset += e.len();
    }
    for e in entries {
        out.extend(u32le(e.len()));
    }
    for e in entries {
        out.extend_from_slice(e);
    }
    out
}

/// G1M model from `(tag, version, body)` sections.
pub fn model(sections: &[(&[u8; 4], u32, Vec<u8>)]) -> Vec<u8> {
    let total = 24 + sections.iter().map(|s| 12 + s.2.len()).sum::<usize>();
    let mut out = Vec::new();
    out.extend(tag(b"G1M_"));
    out.extend(version(37));
    out.extend(u32le(total));
    out.extend(u32le(24));
    out.extend([0; 4]);
    out.extend(u32le(sections.len()));
    for (name, v, body) in sections {
        out.extend(tag(name));
        out.extend(version(*v));
        out.extend(u32le(12 + body.len()));
        out.extend_from_slice(body);
    }
    out
}

/// G1MS body from `(parent, position, rotation)` bones with unit scale.
pub fn skeleton(bones: &[(i32, [f32; 3], [f32; 4])]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend(u32le(28));
    out.extend([0; 4]);
    out.extend(u16::try_from(bones.len()).unwrap().to_le_bytes());
    out.extend([0; 6]);
    for (parent, position, rotation) in bones {
        for v in [1.0f32; 3] {
            out.extend(v.to_le_bytes());
        }
        out.extend(parent.to_le_bytes());
        for v in rotation.iter().chain(position) {
            out.extend(v.to_le_bytes());
        }
        out.extend(1.0f32.to_le_bytes());
    }
    out
}

/// G1MG body with one material using the given texture indices as diffuse.
pub fn geometry_with_material(textures: &[u16]) -> Vec<u8> {
    let mut material = Vec::new();
    material.extend(1u32.to_le_bytes());
    material.extend([0; 4]);
    material.extend(u32le(textures.len()));
    material.extend([0; 8]);
    for &index in textures {
        for v in [index, 0, 1, 1, 4, 4] {
            material.extend(v.to_le_bytes());
        }
    }

    let mut out = Vec::new();
    out.extend([0; 8]);
    out.extend([0; 24]);
    out.extend(1u32.to_le_bytes());
    out.extend(0x0001_0002u32.to_le_bytes());
    out.extend(u32le(8 + material.len()));
    out.extend(material);
    out
}

/// G1T texture group from `(packed, blob)` textures without extra headers.
pub fn texture_group(textures: &[(u32, Vec<u8>)]) -> Vec<u8> {
    let n = textures.len();
    let table_offset = 28 + n * 4;
    let mut body = Vec::new();
    let mut offsets = Vec::new();
    for (packed, blob) in textures {
        offsets.push(n * 4 + body.len());
        body.extend(packed.to_le_bytes());
        body.extend([0; 4]);
        body.extend_from_slice(blob);
    }
    let total = table_offset + n * 4 + body.len();
    let mut out = Vec::new();
    out.extend(tag(b"G1TG"));
    out.extend(version(60));
    out.extend(u32le(total));
    out.extend(u32le(table_offset));
    out.extend(u32le(n));
    out.extend([0; 8]);
    out.extend(std::iter::repeat_n(0u8, n * 4));
    for o in offsets {
        out.extend(u32le(o));
    }
    out.extend(body);
    out
}
