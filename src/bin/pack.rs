//! Packaging CLI - build-time glue for the backend sidecar and manifests

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use basinview::launcher::host_triple;
use basinview::pack;

#[derive(Parser)]
#[command(name = "pack", version, about = "Packaging glue for the basinview bundle")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rename the backend binary to embed the target triple
    RenameSidecar {
        /// Directory holding the compiled backend
        #[arg(long)]
        dist_dir: PathBuf,
        /// Target triple; defaults to the host triple
        #[arg(long)]
        triple: Option<String>,
    },
    /// Copy the app manifest version into the build manifest
    SyncVersion {
        #[arg(long)]
        app_manifest: PathBuf,
        #[arg(long)]
        build_manifest: PathBuf,
    },
    /// Convert a JSON5 manifest to strict JSON
    ConvertManifest {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::RenameSidecar { dist_dir, triple } => {
            let triple = triple.unwrap_or_else(host_triple);
            let new_path = pack::rename_sidecar(
                &dist_dir,
                basinview::constants::SIDECAR_STEM,
                &triple,
                std::env::consts::EXE_SUFFIX,
            )?;
            println!("Renamed sidecar to {}", new_path.display());
        }
        Command::SyncVersion {
            app_manifest,
            build_manifest,
        } => {
            let version = pack::sync_version(&app_manifest, &build_manifest)?;
            println!("Synced {} to version {}", build_manifest.display(), version);
        }
        Command::ConvertManifest { input, output } => {
            pack::convert_manifest(&input, &output)?;
            println!("Converted {} to {}", input.display(), output.display());
        }
    }

    Ok(())
}
