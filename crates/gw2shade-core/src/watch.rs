//! The poll loop: read, decode, derive, render, conditionally write.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local, Offset, Utc};
use tracing::{debug, info};

use crate::activity::ActivityTracker;
use crate::cycle::classify;
use crate::error::{Error, Result};
use crate::link::{LinkSource, decode_context, decode_linked_mem};
use crate::render::render_header;
use crate::shutdown::ShutdownSignal;

/// Tunables of the watch loop.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Interval between link snapshots.
    pub poll_interval: Duration,
    /// Hold after each write so ReShade's own file poller sees the new
    /// content before any further overwrite.
    pub settle_delay: Duration,
    /// How long the tick counter may stand still before the player
    /// counts as inactive.
    pub activity_timeout: Duration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            settle_delay: Duration::from_millis(3000),
            activity_timeout: Duration::from_secs(300),
        }
    }
}

impl WatchConfig {
    /// Activity timeout expressed in poll cycles, rounded up.
    pub fn activity_timeout_cycles(&self) -> u32 {
        let poll = self.poll_interval.as_millis().max(1);
        let timeout = self.activity_timeout.as_millis();
        (timeout.div_ceil(poll)).max(1) as u32
    }
}

/// What a single poll cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Derived values changed; the file was rewritten.
    Written,
    /// Rendered text matched the last write; nothing to do.
    Unchanged,
    /// Snapshot was unusable this cycle (truncated); prior state kept.
    Skipped,
}

/// Owns the poll cycle and the change-detection state.
pub struct Watcher<S: LinkSource> {
    source: S,
    out_path: PathBuf,
    config: WatchConfig,
    tracker: ActivityTracker,
    last_written: Option<String>,
}

impl<S: LinkSource> Watcher<S> {
    pub fn new(source: S, out_path: impl Into<PathBuf>, config: WatchConfig) -> Self {
        let tracker = ActivityTracker::new(config.activity_timeout_cycles());
        Self {
            source,
            out_path: out_path.into(),
            config,
            tracker,
            last_written: None,
        }
    }

    /// Run one poll cycle against the given wall clock.
    ///
    /// Output-file write failures propagate as fatal; a truncated
    /// snapshot is transient and reports [`PollOutcome::Skipped`].
    pub fn poll_once(&mut self, now: DateTime<Utc>, utc_offset_secs: i32) -> Result<PollOutcome> {
        let snapshot = self.source.read_snapshot()?;
        let state = match decode_linked_mem(&snapshot) {
            Ok(state) => state,
            Err(Error::TruncatedSnapshot { expected, actual }) => {
                debug!(expected, actual, "Truncated snapshot, skipping cycle");
                return Ok(PollOutcome::Skipped);
            }
            Err(e) => return Err(e),
        };
        let context = decode_context(&state.context)?;

        let active = self.tracker.observe(state.ui_tick);
        let tod = classify(now);
        let text = render_header(context.map_id, tod, active, utc_offset_secs);

        if self.last_written.as_deref() == Some(text.as_str()) {
            return Ok(PollOutcome::Unchanged);
        }

        fs::write(&self.out_path, &text)?;
        info!(
            "Updated {}: GW2MapId = {}, GW2TOD = {} ({}), GW2Active = {}",
            self.out_path.display(),
            context.map_id,
            tod as u8,
            tod,
            u8::from(active),
        );
        if !state.identity.is_empty() {
            debug!(identity = %state.identity, "Link identity");
        }
        self.last_written = Some(text);
        Ok(PollOutcome::Written)
    }

    /// Poll until the shutdown signal triggers.
    ///
    /// After every write the loop holds for the settle delay before
    /// resuming, so short-lived states cannot flicker past the
    /// downstream poller.
    pub fn run(&mut self, shutdown: &ShutdownSignal) -> Result<()> {
        while !shutdown.is_shutdown() {
            let outcome = self.poll_once(Utc::now(), local_utc_offset_secs())?;

            if outcome == PollOutcome::Written && shutdown.wait(self.config.settle_delay) {
                break;
            }
            if shutdown.wait(self.config.poll_interval) {
                break;
            }
        }
        debug!("Watch loop exiting");
        Ok(())
    }
}

/// Local UTC offset in seconds, as written to the `TimeZone` define.
pub fn local_utc_offset_secs() -> i32 {
    Local::now().offset().fix().local_minus_utc()
}
