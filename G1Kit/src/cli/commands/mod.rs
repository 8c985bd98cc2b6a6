//! Subcommand definitions and dispatch

pub mod info;
pub mod model;
pub mod split;
pub mod textures;

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Show the structure of a model, texture group, or data table
    Info {
        /// Input file
        path: PathBuf,
    },

    /// Export a model's report, material listing, and textures
    Model {
        /// Model file or data table containing one
        path: PathBuf,

        /// Separate texture group file
        #[arg(short, long)]
        textures: Option<PathBuf>,

        /// Output directory (defaults to the input's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Parse sections whose version is not the supported one
        #[arg(long)]
        ignore_version: bool,
    },

    /// Export every texture of a texture group as PNG, or DDS when undecodable
    Textures {
        /// Texture group file or data table containing one
        path: PathBuf,

        /// Output directory (defaults to `<name>_textures` next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export every mip level as `NNNN_mipM.png`
        #[arg(long)]
        all_mips: bool,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write each entry of a data table to its own file
    Split {
        /// Data table file
        path: PathBuf,

        /// Output directory (defaults to `<name>_entries` next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Info { path } => info::execute(path),
            Commands::Model {
                path,
                textures,
                output,
                ignore_version,
            } => model::execute(path, textures.as_deref(), output.as_deref(), *ignore_version),
            Commands::Textures {
                path,
                output,
                all_mips,
                quiet,
            } => textures::execute(path, output.as_deref(), *all_mips, *quiet),
            Commands::Split { path, output } => split::execute(path, output.as_deref()),
        }
    }
}

/// Directory next to `path` named after its stem plus `suffix`.
fn sibling_dir(path: &std::path::Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!("{stem}{suffix}"))
}
