//! Factory defaults for channel and alarm configuration.
//!
//! Every value here can be overridden from the settings document. The
//! `const` assertions keep the defaults inside the ranges the settings
//! validation enforces.

// =============================================================================
// Moisture Thresholds
// =============================================================================

/// Saturation below which a channel waters its plant.
pub const WATER_LEVEL: f32 = 0.5;

/// Saturation below which a channel raises its alarm.
pub const ALARM_LEVEL: f32 = 0.5;

const _: () = assert!(WATER_LEVEL >= 0.0 && WATER_LEVEL <= 1.0);
const _: () = assert!(ALARM_LEVEL >= 0.0 && ALARM_LEVEL <= 1.0);

// =============================================================================
// Pump
// =============================================================================

/// Pump duty cycle for a dose (0..1).
pub const PUMP_SPEED: f32 = 0.7;

/// Length of a dose in seconds.
pub const PUMP_TIME: f32 = 0.7;

/// Minimum seconds between two doses on the same channel.
pub const WATERING_DELAY: f32 = 30.0;

const _: () = assert!(PUMP_SPEED >= 0.0 && PUMP_SPEED <= 1.0);
const _: () = assert!(PUMP_TIME > 0.0);
const _: () = assert!(WATERING_DELAY >= 0.0);

// =============================================================================
// Sensor Calibration
// =============================================================================

/// Sensor pulse frequency (Hz) read in saturated soil.
pub const WET_POINT: f32 = 0.7;

/// Sensor pulse frequency (Hz) read in dry soil.
pub const DRY_POINT: f32 = 26.7;

const _: () = assert!(WET_POINT < DRY_POINT);

// =============================================================================
// Audible Alarm
// =============================================================================

/// Whether latched alarms beep. Off unless the settings turn it on.
pub const ALARM_ENABLE: bool = false;

/// Minimum seconds between two alarm beep bursts.
pub const ALARM_INTERVAL: f32 = 10.0;

/// Tone of an alarm beep.
pub const ALARM_TONE_HZ: u32 = 440;

/// Length of a single alarm beep in seconds.
pub const ALARM_BEEP_SECS: f32 = 0.1;

/// Offsets of the beeps inside one burst, in milliseconds.
pub const ALARM_BURST_OFFSETS_MS: [u64; 3] = [0, 300, 600];

const _: () = assert!(ALARM_INTERVAL > 0.0);

#[cfg(test)]
#[allow(clippy::assertions_on_constants)]
mod tests {
    use super::*;

    #[test]
    fn test_calibration_ordering() {
        assert!(WET_POINT < DRY_POINT);
    }

    #[test]
    fn test_burst_fits_inside_interval() {
        let last = ALARM_BURST_OFFSETS_MS[ALARM_BURST_OFFSETS_MS.len() - 1];
        assert!((last as f32 / 1000.0) < ALARM_INTERVAL);
    }
}
