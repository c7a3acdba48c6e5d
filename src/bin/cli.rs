use anyhow::{Context, bail};
use clap::Parser;
use mapregions::map_file::MapData;
use mapregions::region::png::RegionMap;
use mapregions::{AnalysisConfig, decompose, synth};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Splits a strategy map into regions and renders them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file in TOML format
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Map to analyse (.json document or ASCII map)
    #[arg(short, long, conflicts_with = "demo")]
    map: Option<PathBuf>,

    /// Generate a synthetic map from the [demo] settings instead
    #[arg(long)]
    demo: bool,

    /// Where to write the region map (default: ./regions.png)
    #[arg(short, long, default_value = "regions.png")]
    output: PathBuf,

    /// Optional JSON dump of the region table
    #[arg(short, long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    let map = match (&cli.map, cli.demo) {
        (Some(path), false) => {
            MapData::load(path).with_context(|| format!("loading map {}", path.display()))?
        }
        (None, true) => synth::generate_map(&config.demo).context("generating demo map")?,
        _ => bail!("pass either --map <file> or --demo"),
    };
    info!(
        width = map.grid.width(),
        height = map.grid.height(),
        strongholds = map.strongholds.len(),
        "map loaded"
    );

    let graph = decompose(&map.grid, &map.strongholds, &config.regions)
        .context("decomposing map into regions")?;

    let water = graph.regions().iter().filter(|r| r.is_water()).count();
    info!(
        regions = graph.len(),
        land = graph.len() - water,
        water,
        "decomposition complete"
    );

    RegionMap::from_graph(&graph)
        .save_as_png(&graph, &config.render, &cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!(path = %cli.output.display(), "region map saved");

    if let Some(path) = &cli.summary {
        let json = serde_json::to_string_pretty(&graph.summaries())?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "region table saved");
    }

    Ok(())
}
