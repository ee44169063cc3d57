mod cli;
mod commands;
mod config;
mod shutdown;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use config::{AppConfig, DataStores};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (warn unless RUST_LOG says otherwise)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("whackamole=warn,whackamole_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = AppConfig::load_or_default(&args.config);
    let data_dir = app_config.resolve_data_dir(args.data_dir.as_deref());
    debug!("Using data directory {}", data_dir.display());
    let stores = DataStores::new(data_dir);

    match args.command {
        Some(Command::Signup { username, password }) => {
            commands::signup::run(&stores, &username, &password)
        }
        Some(Command::Play { user, password }) => commands::play::run(
            &stores,
            &app_config.engine,
            user.as_deref(),
            password.as_deref(),
        ),
        Some(Command::Scores {
            user,
            password,
            json,
        }) => commands::scores::run(&stores, &user, &password, json),
        Some(Command::HighScore { json }) => commands::high_score::run(&stores, json),
        None => commands::play::run(&stores, &app_config.engine, None, None),
    }
}
