mod conjunction;
mod elements;
mod error;
mod propagate;
mod web;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::web::{AppState, Config};

#[derive(Parser)]
#[command(name = "orbit-guard")]
#[command(about = "Satellite conjunction screening")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        config: Option<String>,
    },
    /// Assess one pair of objects and print the result as JSON
    Predict {
        norad_id_1: String,
        norad_id_2: String,
        #[arg(long)]
        config: Option<String>,
        /// Start of the forecast window (RFC3339), defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Predict {
            norad_id_1,
            norad_id_2,
            config,
            at,
        } => predict(&norad_id_1, &norad_id_2, config.as_deref(), at.as_deref()).await,
    }
}

fn load_config(path: Option<&str>) -> Option<Config> {
    let result = match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    };
    match result {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Config error: {}", e);
            None
        }
    }
}

async fn serve(config_path: Option<&str>) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn predict(id1: &str, id2: &str, config_path: Option<&str>, at: Option<&str>) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };

    let reference = match at {
        Some(s) => match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(e) => {
                eprintln!("Invalid --at time: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Utc::now(),
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Setup error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let texts = match (
        state.elements.fetch(id1).await,
        state.elements.fetch(id2).await,
    ) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match state.engine.evaluate(&texts.0, &texts.1, reference) {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
