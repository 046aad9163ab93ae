//! Scheduling simulator CLI
//!
//! `serve` starts the REST API; `run` executes a single scheduling request
//! from a JSON file and prints the response.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use schedsim_api::ScheduleRequest;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schedsim")]
#[command(about = "Deterministic CPU-scheduling simulator with a REST API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Bind address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Bind port
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Run one scheduling request from a JSON file
    Run {
        /// Request file (JSON)
        #[arg(short, long)]
        file: PathBuf,
        /// Override the algorithm in the request
        #[arg(short, long)]
        algorithm: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { host, port } => {
            let addr: SocketAddr = format!("{}:{}", host, port)
                .parse()
                .context("invalid bind address")?;
            schedsim_api::serve(addr).await?;
        }
        Commands::Run { file, algorithm } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let mut request: ScheduleRequest =
                serde_json::from_str(&content).context("invalid request JSON")?;
            if let Some(algorithm) = algorithm {
                request.algorithm = algorithm;
            }
            let response = schedsim_api::execute_schedule(&request)
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }
    Ok(())
}
