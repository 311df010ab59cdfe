//! Connection switcher (v1)
//!
//! Loads the switching rule set and validates it before any traffic is
//! accepted.
//!
//! # Architecture Overview
//!
//! ```text
//!   --config <path>
//!        │
//!        ▼
//!   ┌──────────┐    ┌────────────┐    ┌──────────────┐    ┌─────────────┐
//!   │  loader  │───▶│ validation │───▶│ Configuration│───▶│  dispatch   │
//!   │ read +   │    │ rules in   │    │ Arc, frozen  │    │  engine     │
//!   │ parse    │    │ order      │    │              │    │ (external)  │
//!   └──────────┘    └────────────┘    └──────────────┘    └─────────────┘
//!        │                │
//!        └──── error ─────┴──▶ log + exit(1)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use switcher::lifecycle;
use switcher::observability::init_logging;

#[derive(Parser)]
#[command(name = "switcher")]
#[command(about = "Switches client connections between targets by rule", long_about = None)]
struct Cli {
    /// config.json file path
    #[arg(long, default_value = "./config.json")]
    config: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = match init_logging() {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("switcher v0.1.0 starting");

    match lifecycle::start(&cli.config, &logging) {
        Ok(config) => {
            tracing::info!(rules = config.rules.len(), "Ready");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
