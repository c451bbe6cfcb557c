//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

use grow_common::config::{DEBOUNCE_MS, TICK_INTERVAL_MS};

/// Control loop period (10 Hz). The loop sleeps if a tick completes early.
pub const TICK_INTERVAL: Duration = Duration::from_millis(TICK_INTERVAL_MS);

/// Minimum time between two accepted presses of the same key.
pub const DEBOUNCE: Duration = Duration::from_millis(DEBOUNCE_MS);

/// Step at which a background pump dose adds water to the soil.
pub const PUMP_STEP: Duration = Duration::from_millis(50);
