mod api;
mod resolver;
mod task;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::api::{FlightSource, SantaApi, SavedResponses};
use crate::task::{
    schema, DirectorySink, FeatureSink, SchemaType, StdoutSink, Task, TaskConfig,
};

#[derive(Parser)]
#[command(name = "santa-tracker")]
#[command(about = "Current position of Santa as a GeoJSON feed")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,
    /// Verbose logging, print results in logs
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the tracker API and submit the current position
    Poll {
        /// Keep polling at this interval (e.g. "30s")
        #[arg(long, value_parser = humantime::parse_duration)]
        interval: Option<Duration>,
        /// Write each collection to this directory instead of stdout
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Override the server clock (RFC 3339)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Resolve the position from saved API responses
    Resolve {
        info: PathBuf,
        route: PathBuf,
        /// Override the server clock (RFC 3339)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Print the input or output schema
    Schema {
        #[arg(value_enum, default_value = "input")]
        kind: SchemaType,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match TaskConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => TaskConfig::default(),
    };
    config.debug |= cli.debug;

    let level = if config.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Poll {
            interval,
            out_dir,
            at,
        } => {
            let api = match SantaApi::new(config.info_url.clone(), config.timeout) {
                Ok(api) => api,
                Err(e) => {
                    eprintln!("Cannot create HTTP client: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            match out_dir {
                Some(dir) => poll(api, DirectorySink::new(dir), &config, interval, at).await,
                None => poll(api, StdoutSink, &config, interval, at).await,
            }
        }
        Commands::Resolve { info, route, at } => {
            let saved = SavedResponses::new(info, route);
            poll(saved, StdoutSink, &config, None, at).await
        }
        Commands::Schema { kind } => match serde_json::to_string_pretty(&schema(kind)) {
            Ok(s) => {
                println!("{}", s);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error rendering schema: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn poll<S: FlightSource, K: FeatureSink>(
    source: S,
    sink: K,
    config: &TaskConfig,
    interval: Option<Duration>,
    at: Option<DateTime<Utc>>,
) -> ExitCode {
    let task = Task::new(source, sink, config.debug).with_server_clock(at);

    let Some(every) = interval else {
        return match task.control().await {
            Ok(fc) => {
                log::info!("submitted {} feature(s)", fc.features.len());
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("poll failed: {}", e);
                ExitCode::FAILURE
            }
        };
    };

    log::info!("polling every {}", humantime::format_duration(every));
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        // a failed poll only loses this cycle
        match task.control().await {
            Ok(fc) => log::info!("submitted {} feature(s)", fc.features.len()),
            Err(e) => log::error!("poll failed: {}", e),
        }
    }
}
