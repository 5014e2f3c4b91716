use std::env;
use std::sync::Arc;

use clap::Parser;
use lexis_config::Config;
use tracing_subscriber::EnvFilter;

mod cli;
mod controller;
mod events;
mod io;
mod lookup;
mod profile;
mod sequencer;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::cli::Cli;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let base = Config::new();
    profile::init_user_config(&base)?;
    let config = profile::load_user_profile(&base, &cli.profile)?.with_env_overrides();
    tracing::info!("Using profile {}", cli.profile);

    let state = Arc::new(AppState::new(config)?);
    cli::run(cli, state).await
}

/// `RUST_LOG` filters; `LOG_FORMAT=json` switches to structured output
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}
