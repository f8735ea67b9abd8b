mod cli;
mod output;

use std::process;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{Level, error, info};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};
use zapper_engine::{ChannelScheduler, EventBus, HttpTransport, PlaylistSource, VlcLauncher};

use crate::cli::Args;
use crate::output::ConsoleReporter;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    println!("zapper - M3U playlist channel rotation");
    println!("Press CTRL+C to stop this program.");

    if let Err(e) = run(args).await {
        error!("fatal: {e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = args.to_config();

    let bus = Arc::new(EventBus::new());
    Arc::new(ConsoleReporter::new()).attach(&bus);

    let source = PlaylistSource::new(HttpTransport::new()?, Arc::clone(&bus));
    let launcher = VlcLauncher::new(config.player_path.clone());
    let mut scheduler = ChannelScheduler::new(config, Arc::clone(&bus), launcher);

    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping rotation");
            signal_token.cancel();
        }
    });

    scheduler.run(&source, token).await?;
    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}
