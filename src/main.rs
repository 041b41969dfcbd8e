//! Command-line entry point.
//!
//! Loads the configuration, installs tracing, then runs one [`Session`]
//! that reads commands from stdin and draws frames on stdout.
//!
//! ```text
//! recipe-client [--config <path>] [--base-url <url>]
//! ```
//!
//! The screen size comes from `LINES` and `COLUMNS` when the shell exports
//! them, otherwise 24x80. Type `help` at the prompt for the command list.

#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::Instrument;

use recipe_client::api::HttpRecipeApi;
use recipe_client::observability::init_tracing;
use recipe_client::ui::TerminalFrontend;
use recipe_client::worker::Worker;
use recipe_client::{initialize, Config, Result, Session};

const DEFAULT_ROWS: usize = 24;
const DEFAULT_COLS: usize = 80;

#[derive(Parser, Debug)]
#[command(name = "recipe-client")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Recipe service URL, overriding the config file
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("recipe-client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _guard = init_tracing(&config);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "session failed");
            eprintln!("recipe-client: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    if let Some(url) = &cli.base_url {
        let overrides = [("base_url".to_string(), url.clone())].into_iter().collect();
        config.base_url = Config::from_map(&overrides)?.base_url;
    }
    Ok(config)
}

fn run(config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let session_span = tracing::info_span!("session", base_url = %config.base_url);
    runtime.block_on(
        async {
            let state = initialize(config);
            let api = Arc::new(HttpRecipeApi::new(&config.base_url));
            let (events_tx, events_rx) = mpsc::unbounded_channel();
            let worker = Worker::new(api, events_tx, config.worker_settings());
            let frontend = TerminalFrontend::new(
                std::io::stdout(),
                env_size("LINES", DEFAULT_ROWS),
                env_size("COLUMNS", DEFAULT_COLS),
            );

            Session::new(state, worker, frontend, config.download_dir())
                .run(BufReader::new(tokio::io::stdin()), events_rx)
                .await
        }
        .instrument(session_span),
    )
}

fn env_size(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or(default)
}
