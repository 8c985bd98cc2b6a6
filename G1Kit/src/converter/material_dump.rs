//! Plain-text material listing

use crate::formats::g1m::Material;

/// One line per material, then one tab-indented line per texture binding.
#[must_use]
pub fn material_dump(materials: &[Material]) -> String {
    let mut out = String::new();
    for (index, material) in materials.iter().enumerate() {
        out.push_str(&format!(
            "Material {index} {{ Count = {}, Unknowns = [{}, {}, {}] }}\n",
            material.texture_count, material.unknown1, material.unknown2, material.unknown3
        ));
        for texture in &material.textures {
            out.push_str(&format!(
                "\tTexture {{ Index = {:04X}, Type = {}, AlternateType = {}, UV Layer = {}, Unknowns = [{}, {}] }}\n",
                texture.index,
                texture.kind,
                texture.alternate_kind,
                texture.uv_layer,
                texture.unknown4,
                texture.unknown5
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::g1m::{TextureBinding, TextureKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dump_layout() {
        let materials = [Material {
            unknown1: 0,
            texture_count: 1,
            unknown2: 1,
            unknown3: -1,
            textures: vec![TextureBinding {
                index: 10,
                uv_layer: 0,
                kind: TextureKind(1),
                alternate_kind: TextureKind(42),
                unknown4: 4,
                unknown5: 5,
            }],
        }];
        assert_eq!(
            material_dump(&materials),
            "Material 0 { Count = 1, Unknowns = [0, 1, -1] }\n\
             \tTexture { Index = 000A, Type = Diffuse, AlternateType = 42, UV Layer = 0, Unknowns = [4, 5] }\n"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(material_dump(&[]), "");
    }
}
