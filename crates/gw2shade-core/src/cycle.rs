//! Tyrian day/night cycle classification.
//!
//! The in-game cycle is a fixed 2-hour loop anchored to the real-world
//! clock: it starts at 00:25:00 UTC and repeats every 7200 seconds,
//! independent of calendar date or timezone.

use chrono::{DateTime, Timelike, Utc};
use strum::{Display, FromRepr};

/// Cycle start, seconds after UTC midnight (00:25:00).
const ORIGIN_SECS: i64 = 25 * 60;
/// Full cycle length in seconds (2 hours).
const CYCLE_SECS: i64 = 120 * 60;

// Phase boundaries within one cycle, in seconds. These are the 5/120,
// 75/120 and 80/120 fractions of the two-hour loop.
const DAWN_END: i64 = 5 * 60;
const DAY_END: i64 = 75 * 60;
const DUSK_END: i64 = 80 * 60;

/// One of the four phases of the in-game day.
///
/// The discriminants are the values written to the `GW2TOD` define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, FromRepr)]
#[repr(u8)]
pub enum TimeOfDay {
    Dawn = 0,
    Day = 1,
    Dusk = 2,
    Night = 3,
}

/// Classify a UTC instant into its cycle phase.
pub fn classify(now: DateTime<Utc>) -> TimeOfDay {
    let secs = i64::from(now.time().num_seconds_from_midnight());
    let phase = (secs - ORIGIN_SECS + CYCLE_SECS) % CYCLE_SECS;

    if phase < DAWN_END {
        TimeOfDay::Dawn
    } else if phase < DAY_END {
        TimeOfDay::Day
    } else if phase < DUSK_END {
        TimeOfDay::Dusk
    } else {
        TimeOfDay::Night
    }
}
