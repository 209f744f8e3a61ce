mod config;
mod grid;
mod ingest;
mod render;

use clap::Parser;
use config::{ConfigErrors, PlotConfig};
use grid::{GridError, TpsGrid};
use ingest::IngestError;
use render::RenderError;
use std::{path::PathBuf, process::exit};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tpsmap", version, about = "Render rw_tps benchmark results as a throughput heatmap")]
struct Cli {
    /// yaml config file, defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// override the benchmark data file
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// override the output image path
    #[arg(short, long)]
    image: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigErrors),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let mut config = match cli.config {
        Some(path) => PlotConfig::load(&path)?,
        None => PlotConfig::default(),
    };

    if let Some(data) = cli.data {
        config.data = data;
    }
    if let Some(image) = cli.image {
        config.image = image;
    }

    let accumulator = ingest::ingest_file(&config.data)?;
    let grid = TpsGrid::build(&accumulator)?;
    render::render(&grid, &config.style, &config.image)?;

    info!(
        data = ?config.data,
        image = ?config.image,
        loads = grid.loads.len(),
        lens = grid.lens.len(),
        "Rendered throughput heatmap"
    );

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(error) = run(Cli::parse()) {
        error!("{error}");
        exit(1);
    }
}
