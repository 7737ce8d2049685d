use std::process::ExitCode;

use clap::Parser;
use noteport::{Cli, Command, Config};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = Config::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Command::Export { dump, dest } => cmd::export::run(&config, &dump, dest.as_deref()),
        Command::Plan { dump, dest, json } => cmd::plan::run(&config, &dump, dest.as_deref(), json),
        Command::Config => cmd::config::run(&config, cli.config.as_deref()),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

mod cmd {
    pub mod export;
    pub mod plan;
    pub mod config;
}
