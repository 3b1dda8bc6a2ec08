use clap::Parser;
use runbatch_cli::cli::Cli;
use runbatch_cli::config::{load_config, RunbatchConfig};
use std::io;
use std::process::ExitCode;
use tracing::{debug, error, Level};
use tracing_subscriber::FmtSubscriber;

mod commands;

fn init_logging(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref());
    let level = match (&cli.log_level, &config) {
        (Some(level), _) => *level,
        (None, Ok(config)) => config.logging.level().unwrap_or(Level::INFO),
        (None, Err(_)) => Level::INFO,
    };
    init_logging(level);

    let result = config.and_then(|config: RunbatchConfig| {
        debug!(?config, "configuration loaded");
        commands::handle(&cli.command, &config)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
