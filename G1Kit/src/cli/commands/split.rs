//! CLI command for splitting data tables

use std::path::Path;

use anyhow::Context;

use crate::cli::progress::{DISK, PACKAGE, print_step};
use crate::formats::split_table;

pub fn execute(path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let entries = split_table(&data)?;

    let dest = output.map_or_else(|| super::sibling_dir(path, "_entries"), Path::to_path_buf);
    std::fs::create_dir_all(&dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    print_step(1, 1, &PACKAGE, &format!("Writing {} entries...", entries.len()));
    for entry in &entries {
        let file = format!("{}.{}", entry.name(), entry.data_type().extension());
        std::fs::write(dest.join(file), entry.data)?;
    }

    println!("{}{} entries → {}", DISK, entries.len(), dest.display());
    Ok(())
}
