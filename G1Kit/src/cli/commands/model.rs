//! CLI command for model export

use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::cli::progress::{CUBE, DISK, LOOKING_GLASS, PICTURE, print_done, print_step};
use crate::container::LoadedContainer;
use crate::converter::{ModelReport, TextureExportOptions, material_dump};
use crate::formats::ParseOptions;

pub fn execute(
    path: &Path,
    textures: Option<&Path>,
    output: Option<&Path>,
    ignore_version: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let texture_data = match textures {
        Some(set) if set.exists() => Some(std::fs::read(set)?),
        Some(set) => {
            println!("File does not exist: {}", set.display());
            None
        }
        None => None,
    };

    print_step(1, 3, &LOOKING_GLASS, "Loading container...");
    let options = ParseOptions { ignore_version };
    let loaded = LoadedContainer::load(&data, texture_data.as_deref(), options)?;

    let dest = output.map_or_else(
        || path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        Path::to_path_buf,
    );
    std::fs::create_dir_all(&dest)?;
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();

    print_step(2, 3, &CUBE, "Writing model report...");
    let report = ModelReport::from_model(&loaded.model);
    for error in &report.section_errors {
        println!("  {} skipped: {}", error.magic, error.message);
    }
    let report_path = dest.join(format!("{stem}.json"));
    std::fs::write(&report_path, report.to_json()?)?;
    let material_path = dest.join(format!("{stem}.material.txt"));
    std::fs::write(&material_path, material_dump(&report.materials))?;
    println!("{}{}", DISK, report_path.display());
    println!("{}{}", DISK, material_path.display());

    match &loaded.textures {
        Some(group) => {
            print_step(3, 3, &PICTURE, &format!("Exporting {} textures...", group.len()));
            let texture_dir = dest.join(format!("{stem}_textures"));
            let summary = super::textures::write_textures(
                group,
                &texture_dir,
                &TextureExportOptions::default(),
                false,
            )?;
            println!(
                "{}{} decoded, {} passed through as DDS, {} failed → {}",
                DISK,
                summary.decoded,
                summary.fallback,
                summary.failed,
                texture_dir.display()
            );
        }
        None => print_step(3, 3, &PICTURE, "No texture group found, skipping textures"),
    }

    print_done(start.elapsed());
    Ok(())
}
