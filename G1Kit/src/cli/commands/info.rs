//! CLI command for inspecting containers

use std::path::Path;

use anyhow::Context;

use crate::formats::{DataTable, DataType, G1Model, G1TextureGroup, ParseOptions, classify};

pub fn execute(path: &Path) -> anyhow::Result<()> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let data_type = classify(&data);

    println!("{}: {} ({} bytes)", path.display(), data_type, data.len());
    println!();

    match data_type {
        DataType::DataTable => print_table(&data),
        DataType::Model => print_model(&data),
        DataType::TextureGroup => print_textures(&data),
        _ => {
            println!("Unrecognized container");
            Ok(())
        }
    }
}

fn print_table(data: &[u8]) -> anyhow::Result<()> {
    let table = DataTable::read(data)?;
    println!("{} entries", table.len());
    for entry in &table.entries {
        println!(
            "  {}  {:<6} {:#010x}  {} bytes",
            entry.name(),
            entry.data_type().to_string(),
            entry.offset,
            entry.data.len()
        );
    }
    Ok(())
}

fn print_model(data: &[u8]) -> anyhow::Result<()> {
    let model = G1Model::with_options(data, ParseOptions::unchecked())?;
    println!("{} sections", model.sections().count());
    for section in model.sections() {
        let version = section
            .version_number()
            .map_or_else(|| format!("{:#010x}", section.version), |v| v.to_string());
        println!(
            "  {}  v{:<4} {:#010x}  {} bytes",
            section.magic, version, section.offset, section.size
        );
    }

    if let Ok(Some(skeleton)) = model.skeleton() {
        println!();
        println!("Skeleton: {} bones", skeleton.bones.len());
    }
    if let Ok(Some(geometry)) = model.geometry() {
        println!();
        println!("Geometry: {} sub-sections", geometry.subsections.len());
        for sub in &geometry.subsections {
            println!(
                "  {:?} ({:#010x}): {} entries",
                sub.kind,
                sub.magic,
                sub.entry_count().unwrap_or(0)
            );
        }
    }
    Ok(())
}

fn print_textures(data: &[u8]) -> anyhow::Result<()> {
    let group = G1TextureGroup::read(data)?;
    println!("{} textures", group.len());
    for texture in &group.textures {
        let d = texture.descriptor();
        println!(
            "  {}  {}x{}  {} mips  {}  {} bytes",
            texture.name(),
            d.width,
            d.height,
            d.mip_count,
            d.format(),
            texture.blob.len()
        );
    }
    Ok(())
}
