//! cloudeff CLI - rightsizing savings by employee and team

use std::io;

use clap::{CommandFactory, Parser};

mod allocation;
mod analytics;
mod bootstrap;
mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod route;

use cli::{CacheCommands, Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match &cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("cloudeff version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Show { selection } => cli::show::run(&opts, selection).await,
        Commands::Instances { selection, limit } => {
            cli::instances::run(&opts, selection, *limit).await
        }
        Commands::Users { manager } => cli::users::run(&opts, manager.as_deref()).await,
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Status => cli::cache::status(opts.format),
            CacheCommands::Clear { period } => cli::cache::clear(opts.format, period.as_deref()),
            CacheCommands::Path => cli::cache::path(),
        },
        Commands::Completion { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "cloudeff", &mut io::stdout());
            Ok(())
        }
    }
}

/// `--debug` forces debug output; otherwise `RUST_LOG`, defaulting to warn.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
