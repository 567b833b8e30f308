use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{error, info};

use quilt::atlas::AtlasBuilder;
use quilt::cli::{CliArgs, Command, CompressionLevel, PackArgs};
use quilt::config::{AtlasConfig, LoadedProject, PROJECT_TEMPLATE};
use quilt::output::{page_png_filename, save_page_image, write_data_file};
use quilt::sprite::load_sprites;

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    let verbose = match &cli.command {
        Command::Pack(args) => args.verbose,
        Command::Init => false,
    };

    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    match cli.command {
        Command::Init => init_project(),
        Command::Pack(args) => pack_project(&args),
    }
}

/// Write the starter config into the working directory.
fn init_project() -> Result<()> {
    let destination = Path::new("atlas.json");
    fs::write(destination, PROJECT_TEMPLATE).context("failed to write atlas.json")?;
    info!("Created atlas.json config file");
    Ok(())
}

fn pack_project(args: &PackArgs) -> Result<()> {
    let config_path = args
        .project
        .clone()
        .unwrap_or_else(|| PathBuf::from("atlas.json"));
    let project = LoadedProject::load(&config_path)?;

    info!("Quilt texture packer v{}", env!("CARGO_PKG_VERSION"));

    // A failed entry does not stop the remaining entries, but the run
    // still ends with a non-zero exit so failures are never silent.
    let mut failed = 0usize;
    for entry in &project.config.atlas {
        if let Err(e) = pack_entry(&project, entry, args.compress) {
            error!("Unable to pack atlas '{}': {:#}", entry.name, e);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} atlas(es) failed", failed, project.config.atlas.len());
    }

    info!("Done!");
    Ok(())
}

fn pack_entry(
    project: &LoadedProject,
    entry: &AtlasConfig,
    compress: Option<CompressionLevel>,
) -> Result<()> {
    let inputs = project
        .resolve_inputs(entry)
        .with_context(|| format!("failed to resolve input files for atlas '{}'", entry.name))?;

    let registry = load_sprites(&inputs, Some(&project.config_dir))?;
    info!("Loaded {} sprites for atlas '{}'", registry.len(), entry.name);

    let atlas = AtlasBuilder::new(entry.max_width, entry.max_height)
        .padding(entry.padding)
        .extrude(entry.extrude)
        .build(&registry)?;

    let save_folder = project.resolve_save_folder(entry);
    if !save_folder.exists() {
        fs::create_dir_all(&save_folder)?;
    }

    let total = atlas.pages.len();
    for page in &atlas.pages {
        let path = save_folder.join(page_png_filename(&entry.name, page.index, total));
        save_page_image(page, &path, compress)?;
        info!("Saved {}", path.display());
    }

    if !entry.no_data {
        write_data_file(&atlas, &save_folder, &entry.name)?;
        info!("Generated {}.json", entry.name);
    }

    Ok(())
}
