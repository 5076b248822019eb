//! # gw2shade-core
//!
//! Core library for the gw2shade ReShade bridge.
//!
//! This crate provides:
//! - MumbleLink shared-memory region access (Windows file mapping)
//! - Fixed-layout binary decoding of the link structure and the
//!   Guild Wars 2 context sub-record
//! - Day/night cycle classification from UTC wall-clock time
//! - Player activity detection from the link tick counter
//! - Rendering and change-detected writing of the ReShade header file

pub mod activity;
pub mod cycle;
pub mod error;
pub mod link;
pub mod render;
pub mod shutdown;
pub mod watch;

pub use activity::ActivityTracker;
pub use cycle::{TimeOfDay, classify};
pub use error::{Error, Result};
pub use link::{Gw2Context, LinkSource, LinkedMem, MumbleLink, decode_context, decode_linked_mem};
pub use render::render_header;
pub use shutdown::ShutdownSignal;
pub use watch::{PollOutcome, WatchConfig, Watcher};
