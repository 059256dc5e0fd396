use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use coverage_merge::aggregate::aggregate;
use coverage_merge::config::AppConfig;
use coverage_merge::encode::{self, MergeResponse};
use coverage_merge::server;
use coverage_merge::types::MergeRequest;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one aggregation from a request file and print the result
    Merge {
        /// JSON file holding a merge request ({"coverageList": [...], ...})
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Points)]
        format: OutputFormat,
    },
    /// Serve the coverage merge API
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Per-region lists of {x, y} ring points
    Points,
    /// GeoJSON FeatureCollection, one feature per polygon piece
    Geojson,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Merge {
            input,
            config,
            format,
        } => {
            let app_config = match config {
                Some(path) => AppConfig::load_from_file(path)?,
                None => AppConfig::default(),
            };

            let content = fs::read_to_string(input)
                .with_context(|| format!("Failed to read request file: {:?}", input))?;
            let request: MergeRequest = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse merge request: {:?}", input))?;

            let steps = request.steps.unwrap_or(app_config.merge.steps);
            let mode = request.mode.unwrap_or(app_config.merge.mode);
            eprintln!(
                "Merging {} coverages (steps = {})...",
                request.coverage_list.len(),
                steps
            );

            let result = aggregate(&request.coverage_list, steps, mode)?;
            if result.is_degraded() {
                eprintln!(
                    "Warning: {} boolean operation(s) fell back to a coarser result",
                    result.fallbacks.len()
                );
            }

            let output = match format {
                OutputFormat::Points => {
                    serde_json::to_string_pretty(&MergeResponse::from(&result))?
                }
                OutputFormat::Geojson => {
                    serde_json::to_string_pretty(&encode::to_feature_collection(&result))?
                }
            };
            println!("{}", output);
        }
        Commands::Serve { config } => {
            let app_config = AppConfig::load_from_file(config)?;
            server::start_server(app_config).await?;
        }
    }

    Ok(())
}
