use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use gw2shade_core::link::DEFAULT_LINK_NAME;
use gw2shade_core::{MumbleLink, ShutdownSignal, WatchConfig, Watcher};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod console;
mod elevate;
mod supervise;

#[derive(Parser)]
#[command(name = "gw2shade")]
#[command(about = "Maintains a ReShade header file with live Guild Wars 2 map data")]
struct Args {
    /// Output header file
    #[arg(default_value = "gw2map.h")]
    output: PathBuf,

    /// Launch this command and exit when it does
    #[arg(
        long = "run",
        num_args = 1..,
        value_name = "COMMAND",
        allow_hyphen_values = true
    )]
    run: Option<Vec<OsString>>,

    /// Hide the console window
    #[arg(long)]
    hide_console: bool,

    /// Interval between shared-memory polls (ms)
    #[arg(long, default_value_t = 100)]
    poll_interval_ms: u64,

    /// Hold after each file write so ReShade notices the change (ms)
    #[arg(long, default_value_t = 3000)]
    settle_delay_ms: u64,

    /// How long the game tick may stall before the player counts as
    /// inactive (ms)
    #[arg(long, default_value_t = 300_000)]
    activity_timeout_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gw2shade=info".parse()?)
                .add_directive("gw2shade_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    if args.hide_console {
        if let Err(e) = console::hide() {
            warn!("Failed to hide console window: {e}");
        }
    }

    let shutdown = Arc::new(ShutdownSignal::new());
    let shutdown_ctrlc = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal, stopping...");
        shutdown_ctrlc.trigger();
    })?;

    let link = match MumbleLink::open(DEFAULT_LINK_NAME) {
        Ok(link) => link,
        Err(e) if e.is_access_denied() => {
            error!("{e}");
            if !elevate::is_elevated() {
                info!("Relaunching with elevated privileges...");
                elevate::relaunch_elevated()?;
                return Ok(());
            }
            anyhow::bail!("Permission denied opening the MumbleLink region even when elevated");
        }
        Err(e) => return Err(e.into()),
    };

    let supervisor = match &args.run {
        Some(command) => Some(supervise::spawn(command, Arc::clone(&shutdown))?),
        None => None,
    };

    info!(
        "Maintaining {} with map data from Guild Wars 2 using the Mumble Link API",
        args.output.display()
    );

    let config = WatchConfig {
        poll_interval: Duration::from_millis(args.poll_interval_ms),
        settle_delay: Duration::from_millis(args.settle_delay_ms),
        activity_timeout: Duration::from_millis(args.activity_timeout_ms),
    };
    Watcher::new(link, args.output, config).run(&shutdown)?;

    if let Some(supervisor) = supervisor {
        supervisor.join();
    }
    Ok(())
}
