//! Simulated plants: soil that dries out, sensors that read it and pumps that
//! water it.
//!
//! A capacitive moisture sensor reports a pulse frequency that rises as the
//! soil dries. Each channel owns one [`Soil`], shared between its sensor and
//! its pump so a dose on a background thread is visible to the next reading.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use grow_common::{MoistureSensor, Pump};
use parking_lot::Mutex;
use rand::Rng;
use tracing::{debug, error};

use crate::timing::PUMP_STEP;

/// Soil shared between a sensor and a pump.
pub type SharedSoil = Arc<Mutex<Soil>>;

/// Pulse frequencies the soil model stays within.
const MIN_FREQUENCY: f32 = 0.5;
const MAX_FREQUENCY: f32 = 28.0;

/// Pulse frequency gained per second of drying.
const DRYING_HZ_PER_SEC: f32 = 0.05;

/// Pulse frequency lost per second of pumping at full speed.
const WATERING_HZ_PER_SEC: f32 = 20.0;

/// Peak sensor noise in Hz.
const NOISE_HZ: f32 = 0.2;

/// Starting pulse frequencies: one moist, one wet, one bone dry.
pub const START_FREQUENCIES: [f32; 3] = [15.0, 2.0, 27.0];

// =============================================================================
// Soil
// =============================================================================

/// Moisture state of one pot, expressed as the sensor pulse frequency.
#[derive(Debug)]
pub struct Soil {
    frequency: f32,
}

impl Soil {
    pub fn new(frequency: f32) -> Self {
        Self {
            frequency: frequency.clamp(MIN_FREQUENCY, MAX_FREQUENCY),
        }
    }

    /// Shared handle around a new soil.
    pub fn shared(frequency: f32) -> SharedSoil { Arc::new(Mutex::new(Self::new(frequency))) }

    #[inline]
    pub fn frequency(&self) -> f32 { self.frequency }

    /// Let `seconds` of evaporation pass.
    pub fn dry_out(
        &mut self,
        seconds: f32,
    ) {
        self.frequency = (self.frequency + DRYING_HZ_PER_SEC * seconds).min(MAX_FREQUENCY);
    }

    /// Pump water in at `speed` (0..1) for `seconds`.
    pub fn water(
        &mut self,
        speed: f32,
        seconds: f32,
    ) {
        self.frequency = (self.frequency - WATERING_HZ_PER_SEC * speed * seconds).max(MIN_FREQUENCY);
    }
}

// =============================================================================
// Sensor
// =============================================================================

/// Moisture sensor reading a [`Soil`] through its calibration points.
pub struct SimSensor {
    soil: SharedSoil,
    wet_point: f32,
    dry_point: f32,
    plugged_in: bool,
    noise: bool,
    last_read: Option<Instant>,
}

impl SimSensor {
    pub fn new(soil: SharedSoil) -> Self {
        Self {
            soil,
            wet_point: grow_common::defaults::WET_POINT,
            dry_point: grow_common::defaults::DRY_POINT,
            plugged_in: true,
            noise: true,
            last_read: None,
        }
    }

    /// Mark the sensor as disconnected.
    pub fn unplug(&mut self) { self.plugged_in = false; }

    /// Turn the random reading noise off.
    #[cfg(test)]
    #[must_use]
    pub fn without_noise(mut self) -> Self {
        self.noise = false;
        self
    }

    /// Saturation for a pulse frequency under the current calibration.
    fn saturation_for(
        &self,
        frequency: f32,
    ) -> f32 {
        let range = self.dry_point - self.wet_point;
        if range.abs() < f32::EPSILON {
            return 0.0;
        }
        (1.0 - (frequency - self.wet_point) / range).clamp(0.0, 1.0)
    }
}

impl MoistureSensor for SimSensor {
    fn saturation(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = self.last_read.map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_read = Some(now);

        let frequency = {
            let mut soil = self.soil.lock();
            soil.dry_out(elapsed);
            soil.frequency()
        };

        let noise = if self.noise {
            rand::rng().random_range(-NOISE_HZ..=NOISE_HZ)
        } else {
            0.0
        };
        self.saturation_for(frequency + noise)
    }

    fn is_active(&self) -> bool { self.plugged_in }

    fn set_wet_point(
        &mut self,
        value: f32,
    ) {
        self.wet_point = value;
    }

    fn set_dry_point(
        &mut self,
        value: f32,
    ) {
        self.dry_point = value;
    }
}

// =============================================================================
// Pump
// =============================================================================

/// Pump adding water to a [`Soil`]. Non-blocking doses run on their own thread.
pub struct SimPump {
    channel: u8,
    soil: SharedSoil,
}

impl SimPump {
    pub fn new(
        channel: u8,
        soil: SharedSoil,
    ) -> Self {
        Self { channel, soil }
    }
}

impl Pump for SimPump {
    fn dose(
        &mut self,
        speed: f32,
        seconds: f32,
        blocking: bool,
    ) {
        debug!(channel = self.channel, speed, seconds, blocking, "Pump dose");
        if blocking {
            run_dose(&self.soil, speed, seconds);
            return;
        }

        let soil = Arc::clone(&self.soil);
        let spawned = thread::Builder::new()
            .name(format!("pump-{}", self.channel))
            .spawn(move || run_dose(&soil, speed, seconds));
        if let Err(e) = spawned {
            error!(channel = self.channel, "Failed to start pump thread: {e}");
        }
    }
}

/// Water the soil in small steps so readings during a dose see it rise.
fn run_dose(
    soil: &SharedSoil,
    speed: f32,
    seconds: f32,
) {
    let step = PUMP_STEP.as_secs_f32();
    let mut remaining = seconds.max(0.0);
    while remaining > 0.0 {
        let slice = remaining.min(step);
        thread::sleep(PUMP_STEP.mul_f32(slice / step));
        soil.lock().water(speed, slice);
        remaining -= slice;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
