//! mad-aliens — simulate an invasion of mad aliens on a city map.
//!
//! Reads a textual map, releases the requested number of concurrently
//! roaming aliens onto it, and writes whatever survives once every alien is
//! dead, out of moves, or told to stop.  Ctrl-C (and SIGTERM/SIGHUP on
//! unix) cancels the run cooperatively; the surviving map is still written.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

use xeno_sim::simulate_invasion;
use xeno_stream::{load_map, save_map, write_map};

/// A program for simulating the invasion of mad aliens on Earth.
#[derive(Parser)]
#[command(name = "mad-aliens", version, about)]
struct Cli {
    /// Number of aliens to release onto the map
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    aliens: u32,

    /// The path to the input map file of the Earth
    #[arg(long, value_name = "FILE")]
    map_path: PathBuf,

    /// Where to write the post-invasion map; stdout when omitted
    #[arg(long, value_name = "FILE")]
    output_path: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    // 1. Load the map.  A missing or unreadable file is fatal before any
    //    alien is spawned.
    let mut world = load_map(&cli.map_path)
        .with_context(|| format!("unable to read the map file {}", cli.map_path.display()))?;

    // 2. Translate process signals into the cancellation token the
    //    orchestrator observes.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            cancel.cancel();
        });
    }

    // 3. Run the invasion to completion or cancellation.
    let report = simulate_invasion(&mut world, cli.aliens as usize, &cancel).await;
    info!(
        "Invasion over: {} aliens launched, {} killed, {} exhausted",
        report.launched, report.killed, report.exhausted
    );

    // 4. Write the surviving map, to the chosen file or the console.
    match &cli.output_path {
        Some(path) => save_map(&world, path)
            .with_context(|| format!("unable to write the output file {}", path.display()))?,
        None => write_map(&world, io::stdout().lock())
            .context("unable to write the map to the console")?,
    }

    info!("Invasion completed successfully!");
    Ok(())
}

/// Logs go to stderr; stdout is reserved for the serialized map.
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    Ok(())
}

/// Resolves when the process is asked to stop.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    let hangup = async {
        signal::unix::signal(signal::unix::SignalKind::hangup())
            .expect("failed to install SIGHUP handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    #[cfg(not(unix))]
    let hangup = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
        _ = hangup => {},
    }
}
