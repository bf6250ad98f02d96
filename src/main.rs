mod catalog;
#[cfg(test)]
mod fixtures;
mod input;
mod telemetry;
mod tools;
mod track;
mod validation;
mod web;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::process::ExitCode;
use std::sync::Arc;

use crate::catalog::CelestrakClient;
use crate::tools::{ToolContext, ToolName};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "sat-o-track")]
#[command(about = "Satellite ground tracks and footprints as callable tools")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP tool server
    Serve,
    /// Generate a ground track
    Track {
        /// Satellite name or NORAD ID
        identifier: String,
        /// Start time, e.g. "now", "in 2 hours" or an ISO-8601 date
        #[arg(long)]
        start: Option<String>,
        /// Duration, e.g. "90 minutes"
        #[arg(long)]
        duration: Option<String>,
        /// Step between points, e.g. "10 seconds"
        #[arg(long)]
        step: Option<String>,
        /// Attach a sensor footprint to every point
        #[arg(long)]
        footprint: bool,
        /// Sensor field of view in degrees
        #[arg(long)]
        fov: Option<f64>,
    },
    /// Show catalog number, name and elements
    Info { identifier: String },
    /// Search the catalog by name
    Search {
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Sensor footprint at one instant
    Footprint {
        identifier: String,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        fov: Option<f64>,
    },
    /// List the available tools and their input schemas
    Tools,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let (tool, arguments) = match cli.command {
        Commands::Serve => return serve(config).await,
        Commands::Tools => return print_json(&json!(tools::tool_descriptors())),
        Commands::Track {
            identifier,
            start,
            duration,
            step,
            footprint,
            fov,
        } => (
            ToolName::GenerateGroundTrack,
            json!({
                "satellite_identifier": identifier,
                "start_time": start,
                "duration": duration,
                "step_interval": step,
                "include_footprint": footprint,
                "fov_deg": fov,
            }),
        ),
        Commands::Info { identifier } => (
            ToolName::GetSatelliteInfo,
            json!({ "satellite_identifier": identifier }),
        ),
        Commands::Search { query, limit } => (
            ToolName::SearchSatellites,
            json!({ "query": query, "limit": limit }),
        ),
        Commands::Footprint {
            identifier,
            time,
            fov,
        } => (
            ToolName::GetFootprint,
            json!({ "satellite_identifier": identifier, "time": time, "fov_deg": fov }),
        ),
    };

    let ctx = ToolContext {
        catalog: Arc::new(CelestrakClient::new(&config.catalog)),
        config: Arc::new(config),
    };

    match tools::call_tool(&ctx, tool.as_ref(), arguments).await {
        Ok(result) => print_json(&result),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: Config) -> ExitCode {
    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_json(value: &Value) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error encoding output: {}", e);
            ExitCode::FAILURE
        }
    }
}
