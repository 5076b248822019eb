//! Child process launch and supervision.
//!
//! With `--run` the tool owns a child process (typically the game
//! launcher) and stops maintaining the header once that child exits.

use std::ffi::OsString;
use std::process::Child;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use gw2shade_core::ShutdownSignal;
use tracing::{info, warn};

/// Poll cadence for the supervised child.
const WAIT_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to the background supervision thread.
pub struct Supervisor {
    handle: JoinHandle<()>,
}

impl Supervisor {
    pub fn join(self) {
        let _ = self.handle.join();
    }
}

/// Launch `command` and watch it from a background thread; the
/// shutdown signal triggers when it exits.
pub fn spawn(command: &[OsString], shutdown: Arc<ShutdownSignal>) -> Result<Supervisor> {
    let (program, args) = command
        .split_first()
        .context("Empty command passed to --run")?;
    let child = std::process::Command::new(program)
        .args(args)
        .spawn()
        .with_context(|| format!("Failed to launch {program:?}"))?;
    info!("Launched {:?} (pid {})", program, child.id());

    let handle = thread::spawn(move || watch(child, shutdown));
    Ok(Supervisor { handle })
}

fn watch(mut child: Child, shutdown: Arc<ShutdownSignal>) {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                info!("Supervised process exited ({status}), stopping");
                shutdown.trigger();
                return;
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Failed to poll supervised process: {e}");
                shutdown.trigger();
                return;
            }
        }
        if shutdown.wait(WAIT_INTERVAL) {
            return;
        }
    }
}
