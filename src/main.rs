use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use geokd::{Config, KdTree, Point, PruningBound, load_locations};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PruningArg {
    Planar,
    Spherical,
}

impl From<PruningArg> for PruningBound {
    fn from(arg: PruningArg) -> Self {
        match arg {
            PruningArg::Planar => PruningBound::Planar,
            PruningArg::Spherical => PruningBound::Spherical,
        }
    }
}

/// Report the known location closest to a point.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV file of `label,latitude,longitude` records
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Query latitude in degrees
    #[arg(long, default_value_t = 48.8566, allow_hyphen_values = true)]
    lat: f64,

    /// Query longitude in degrees
    #[arg(long, default_value_t = 2.3522, allow_hyphen_values = true)]
    lon: f64,

    /// Skip records with out-of-range coordinates
    #[arg(long)]
    strict: bool,

    #[arg(long, value_enum)]
    pruning: Option<PruningArg>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geokd=info,info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(path) = args.data {
        config = config.with_data_path(path);
    }
    if args.strict {
        config = config.with_validation(true);
    }
    if let Some(pruning) = args.pruning {
        config = config.with_pruning(pruning.into());
    }

    let locations = load_locations(&config.data_path, &config.loader_options());
    if locations.is_empty() {
        bail!(
            "could not load location data from {}",
            config.data_path.display()
        );
    }
    info!(
        "Loaded {} locations from {}",
        locations.len(),
        config.data_path.display()
    );

    let tree = KdTree::with_pruning(locations, config.pruning);
    let query = Point::new(args.lon, args.lat);
    let nearest = tree.nearest(&query)?;

    println!(
        "The nearest location to ({}, {}) is: {}",
        args.lat,
        args.lon,
        nearest.location.label()
    );

    Ok(())
}
