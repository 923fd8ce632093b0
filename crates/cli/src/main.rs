//! `stowage` -- command-line client for the warehouse layout backend.
//!
//! # Environment variables
//!
//! | Variable                       | Required | Default                     | Description                        |
//! |--------------------------------|----------|-----------------------------|------------------------------------|
//! | `STOWAGE_API_URL`              | no       | `http://localhost:8000/api` | Backend base URL                   |
//! | `STOWAGE_API_TOKEN`            | no       | --                          | Bearer token sent with every call  |
//! | `STOWAGE_REQUEST_TIMEOUT_SECS` | no       | `30`                        | Per-request timeout                |
//! | `STOWAGE_PREFS_PATH`           | no       | `.stowage-prefs.json`       | Where the language choice is saved |
//! | `RUST_LOG`                     | no       | `stowage=info,stowage_client=info` | Log filter                  |

use anyhow::Context;
use clap::Parser;
use stowage_cli::args::Cli;
use stowage_cli::commands::App;
use stowage_client::api::WarehouseApi;
use stowage_client::config::ClientConfig;
use stowage_core::locale::{JsonFileStore, Translator};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stowage=info,stowage_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("Invalid client configuration")?;
    let api = WarehouseApi::from_config(&config).context("Failed to build HTTP client")?;
    let prefs = JsonFileStore::new(config.prefs_path.clone());
    let translator = Translator::load(&prefs).context("Failed to read preferences")?;

    tracing::debug!(api_url = %config.api_url, locale = translator.locale().code(), "Starting stowage");

    let mut app = App {
        api,
        translator,
        prefs,
    };

    match app.run(cli.command).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("{}", e.user_message(&app.translator));
            std::process::exit(1);
        }
    }
}
