//! dn-coverage: coverage analysis for Da Nang administrative offices.
//!
//! Loads office and ward-boundary fixtures, then reports per-layer coverage,
//! overlapping coverage circles and Layer-B/Layer-A containment.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use danang_coverage::{
    analyze_coverage, distance_km, filter_layer_c, fixtures, layers::layer_b_within_layer_a, AnalysisOptions,
    ClusterStrategy, DefaultRadii, Office, Point, RadiusPolicy,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod output;

use config::Config;
use output::Status;

/// Coverage analysis for Da Nang administrative offices
#[derive(Parser)]
#[command(name = "dn-coverage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze coverage and overlaps
    Analyze {
        /// JSON file with office records
        #[arg(long)]
        offices: PathBuf,

        /// GeoJSON file with ward boundaries
        #[arg(long)]
        boundaries: PathBuf,

        /// Governing radius for Layer-A offices
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,

        /// Overlap clustering strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Drop Layer-C offices sharing a location with Layer-A/B offices
        #[arg(long)]
        dedupe_layer_c: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Great-circle distance between two points in kilometers
    #[command(allow_negative_numbers = true)]
    Distance {
        lat1: f64,
        lng1: f64,
        lat2: f64,
        lng2: f64,
    },

    /// List Layer-B offices inside a Layer-A coverage circle
    Containment {
        /// JSON file with office records
        #[arg(long)]
        offices: PathBuf,

        /// Governing radius for Layer-A offices
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Reception,
    Management,
}

impl From<PolicyArg> for RadiusPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Reception => RadiusPolicy::Reception,
            PolicyArg::Management => RadiusPolicy::Management,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Greedy,
    Connected,
}

impl From<StrategyArg> for ClusterStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => ClusterStrategy::Greedy,
            StrategyArg::Connected => ClusterStrategy::ConnectedComponents,
        }
    }
}

fn init_logging(level: &str, verbose: bool) {
    let default_level = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn read_offices(path: &Path, radii: &DefaultRadii) -> Result<Vec<Office>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read offices file {}", path.display()))?;
    fixtures::load_offices(&json, radii).with_context(|| format!("Invalid offices file {}", path.display()))
}

fn run(cli: Cli, config: Config) -> Result<()> {
    let schema = config.schema;

    match cli.command {
        Commands::Analyze {
            offices,
            boundaries,
            policy,
            strategy,
            dedupe_layer_c,
            json,
        } => {
            let mut office_list = read_offices(&offices, &schema.radii)?;
            let boundary_json = std::fs::read_to_string(&boundaries)
                .with_context(|| format!("Failed to read boundaries file {}", boundaries.display()))?;
            let boundary_list = fixtures::load_boundaries(&boundary_json)
                .with_context(|| format!("Invalid boundaries file {}", boundaries.display()))?;

            if dedupe_layer_c || schema.analysis.dedupe_layer_c {
                let before = office_list.len();
                office_list = filter_layer_c(&office_list);
                debug!(removed = before - office_list.len(), "Filtered duplicate Layer C offices");
            }

            let mut options: AnalysisOptions = schema.analysis.options();
            if let Some(policy) = policy {
                options.radius_policy = policy.into();
            }
            if let Some(strategy) = strategy {
                options.clustering = strategy.into();
            }

            let analysis = analyze_coverage(&office_list, &boundary_list, &options);
            info!(overlaps = analysis.overlaps.len(), "Analysis finished");

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                output::print_analysis(&analysis, office_list.len(), boundary_list.len());
            }
        }

        Commands::Distance { lat1, lng1, lat2, lng2 } => {
            let km = distance_km(&Point::new(lat1, lng1), &Point::new(lat2, lng2));
            println!("{:.3} km", km);
        }

        Commands::Containment { offices, policy, json } => {
            let office_list = read_offices(&offices, &schema.radii)?;
            let policy = policy.map(RadiusPolicy::from).unwrap_or(schema.analysis.radius_policy);
            let pairs = layer_b_within_layer_a(&office_list, policy);

            if json {
                let rows: Vec<serde_json::Value> = pairs
                    .iter()
                    .map(|(office_b, office_a)| {
                        serde_json::json!({
                            "office": office_b.id,
                            "containedBy": office_a.id,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                output::print_containment(&pairs);
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Status::error(&format!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.schema.logging.level, cli.verbose);
    if let Some(path) = &config.path {
        debug!(path = %path.display(), "Loaded configuration");
    }

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Status::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
