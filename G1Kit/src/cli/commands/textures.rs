//! CLI command for texture group export

use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::cli::progress::{DISK, LOOKING_GLASS, PICTURE, print_done, print_step, simple_bar};
use crate::converter::{TextureExport, TextureExportOptions, export_texture_group_with_progress};
use crate::formats::{DataTable, DataType, G1TextureGroup, classify};

/// Outcome counts of a texture export run
#[derive(Debug, Default, Clone, Copy)]
pub struct ExportSummary {
    pub decoded: usize,
    pub fallback: usize,
    pub failed: usize,
}

pub fn execute(path: &Path, output: Option<&Path>, all_mips: bool, quiet: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    print_step(1, 2, &LOOKING_GLASS, "Reading texture group...");
    let group = match classify(&data) {
        DataType::TextureGroup => G1TextureGroup::read(&data)?,
        DataType::DataTable => {
            let table = DataTable::read(&data)?;
            let entry = table
                .first_of(DataType::TextureGroup)
                .context("Data table contains no texture group")?;
            G1TextureGroup::read(entry.data)?
        }
        other => anyhow::bail!("Not a texture group or data table: {other}"),
    };

    let dest = output.map_or_else(|| super::sibling_dir(path, "_textures"), Path::to_path_buf);
    print_step(2, 2, &PICTURE, &format!("Exporting {} textures...", group.len()));
    let options = TextureExportOptions { all_mips };
    let summary = write_textures(&group, &dest, &options, quiet)?;

    println!(
        "{}{} decoded, {} passed through as DDS, {} failed → {}",
        DISK,
        summary.decoded,
        summary.fallback,
        summary.failed,
        dest.display()
    );
    print_done(start.elapsed());
    Ok(())
}

/// Export every texture of `group` into `dest`.
///
/// Decoded textures become `NNNN.png` (or `NNNN_mipM.png` with all mips);
/// undecodable ones become `NNNN.dds`. Per-texture failures are logged and
/// counted, not returned.
pub(crate) fn write_textures(
    group: &G1TextureGroup<'_>,
    dest: &Path,
    options: &TextureExportOptions,
    quiet: bool,
) -> anyhow::Result<ExportSummary> {
    std::fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    let pb = simple_bar(group.len() as u64, "Decoding", quiet);
    let results = export_texture_group_with_progress(group, options, &|progress| {
        pb.set_position(progress.current as u64);
        if let Some(ref name) = progress.texture {
            pb.set_message(name.clone());
        }
    });
    pb.finish_and_clear();

    let mut summary = ExportSummary::default();
    for (record, result) in group.textures.iter().zip(results) {
        let name = record.name();
        let written = result.map_err(anyhow::Error::from).and_then(|export| match export {
            TextureExport::Decoded(levels) => {
                for (level, pixels) in levels.iter().enumerate() {
                    let file = if options.all_mips {
                        format!("{name}_mip{level}.png")
                    } else {
                        format!("{name}.png")
                    };
                    std::fs::write(dest.join(file), pixels.to_png()?)?;
                }
                Ok(false)
            }
            TextureExport::Fallback(raw) => {
                std::fs::write(dest.join(format!("{name}.dds")), raw.to_dds()?)?;
                Ok(true)
            }
        });

        match written {
            Ok(false) => summary.decoded += 1,
            Ok(true) => summary.fallback += 1,
            Err(e) => {
                tracing::warn!("Texture {name}: {e}");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
