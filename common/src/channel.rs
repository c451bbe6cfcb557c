//! One sensor/pump pair and its watering and alarm logic.
//!
//! # Tick
//!
//! Every control tick the controller calls [`Channel::sample`] (read the
//! sensor) and then [`Channel::update`] (decide whether to water and whether
//! to raise the alarm).
//!
//! | Condition | Action |
//! |-----------|--------|
//! | channel disabled | nothing at all |
//! | `saturation < water_level`, auto water on, delay elapsed | non-blocking dose |
//! | `saturation < water_level` and `< alarm_level` | latch alarm |
//! | `saturation >= water_level` | nothing, alarm untouched |
//!
//! # Alarm Latch
//!
//! The alarm is only ever cleared by [`Channel::acknowledge_alarm`]. A plant
//! that recovers after watering keeps its alarm until someone presses the
//! acknowledge button.

use core::fmt::{self, Write};
use core::time::Duration;

use heapless::String;
use log::{info, warn};
use serde::Deserialize;

use crate::config::TITLE_LEN;
use crate::defaults;
use crate::hardware::{MoistureSensor, Pump};
use crate::history::SaturationHistory;

// =============================================================================
// Configuration
// =============================================================================

/// Effective configuration of one channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelConfig {
    /// Saturation below which the channel waters.
    pub water_level: f32,
    /// Saturation below which the alarm latches.
    pub alarm_level: f32,
    /// Pump duty cycle for a dose.
    pub pump_speed: f32,
    /// Dose length in seconds.
    pub pump_time: f32,
    /// Minimum seconds between doses.
    pub watering_delay: f32,
    /// Sensor calibration for saturated soil.
    pub wet_point: f32,
    /// Sensor calibration for dry soil.
    pub dry_point: f32,
    /// Whether the channel doses on its own.
    pub auto_water: bool,
    /// Whether the channel does anything at all.
    pub enabled: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            water_level: defaults::WATER_LEVEL,
            alarm_level: defaults::ALARM_LEVEL,
            pump_speed: defaults::PUMP_SPEED,
            pump_time: defaults::PUMP_TIME,
            watering_delay: defaults::WATERING_DELAY,
            wet_point: defaults::WET_POINT,
            dry_point: defaults::DRY_POINT,
            auto_water: false,
            enabled: false,
        }
    }
}

/// Per-channel overrides read from the settings document.
///
/// Every key is optional. Absent keys keep the current value and keys this
/// struct does not know are ignored by the deserializer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChannelSettings {
    pub pump_speed: Option<f32>,
    pub pump_time: Option<f32>,
    pub alarm_level: Option<f32>,
    pub water_level: Option<f32>,
    pub watering_delay: Option<f32>,
    pub auto_water: Option<bool>,
    pub enabled: Option<bool>,
    pub wet_point: Option<f32>,
    pub dry_point: Option<f32>,
}

/// A settings value that cannot be applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettingsFault {
    /// Offending key.
    pub key: &'static str,
    /// Accepted range, human readable.
    pub expected: &'static str,
}

impl fmt::Display for SettingsFault {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "`{}` must be {}", self.key, self.expected)
    }
}

impl core::error::Error for SettingsFault {}

impl ChannelSettings {
    /// Check every present value against its accepted range.
    pub fn validate(&self) -> Result<(), SettingsFault> {
        check(self.water_level, "water_level", "between 0 and 1", is_unit)?;
        check(self.alarm_level, "alarm_level", "between 0 and 1", is_unit)?;
        check(self.pump_speed, "pump_speed", "between 0 and 1", is_unit)?;
        check(self.pump_time, "pump_time", "greater than 0", |v| v.is_finite() && v > 0.0)?;
        check(self.watering_delay, "watering_delay", "0 or more", |v| v.is_finite() && v >= 0.0)?;
        check(self.wet_point, "wet_point", "a finite number", f32::is_finite)?;
        check(self.dry_point, "dry_point", "a finite number", f32::is_finite)?;
        Ok(())
    }
}

fn is_unit(value: f32) -> bool { (0.0..=1.0).contains(&value) }

fn check(
    value: Option<f32>,
    key: &'static str,
    expected: &'static str,
    valid: impl Fn(f32) -> bool,
) -> Result<(), SettingsFault> {
    match value {
        Some(v) if !valid(v) => Err(SettingsFault { key, expected }),
        _ => Ok(()),
    }
}

// =============================================================================
// Channel State
// =============================================================================

/// Watering activity during the most recent tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WaterState {
    /// No dose this tick.
    #[default]
    Idle,
    /// A dose was started this tick.
    Watering,
}

/// What a single [`Channel::update`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// A pump dose was started.
    pub dosed: bool,
    /// The alarm latched during this update.
    pub alarm_raised: bool,
}

/// One plant: moisture sensor, pump, configuration and runtime state.
pub struct Channel<S, P> {
    id: u8,
    title: String<TITLE_LEN>,
    config: ChannelConfig,
    sensor: S,
    pump: P,
    last_dose: Option<Duration>,
    alarm_active: bool,
    saturation: f32,
    history: SaturationHistory,
    state: WaterState,
}

impl<S, P> Channel<S, P>
where
    S: MoistureSensor,
    P: Pump,
{
    /// Create channel `id` (1-based) with factory defaults.
    pub fn new(
        id: u8,
        mut sensor: S,
        pump: P,
    ) -> Self {
        let config = ChannelConfig::default();
        sensor.set_wet_point(config.wet_point);
        sensor.set_dry_point(config.dry_point);

        let mut title = String::new();
        write!(title, "Channel {id}").ok();

        Self {
            id,
            title,
            config,
            sensor,
            pump,
            last_dose: None,
            alarm_active: false,
            saturation: 0.0,
            history: SaturationHistory::new(),
            state: WaterState::Idle,
        }
    }

    /// Overlay the keys present in `settings` onto the configuration.
    ///
    /// `None` leaves the channel untouched. Calibration points are forwarded
    /// to the sensor.
    pub fn apply_config(
        &mut self,
        settings: Option<&ChannelSettings>,
    ) {
        let Some(settings) = settings else {
            return;
        };

        let c = &mut self.config;
        c.pump_speed = settings.pump_speed.unwrap_or(c.pump_speed);
        c.pump_time = settings.pump_time.unwrap_or(c.pump_time);
        c.alarm_level = settings.alarm_level.unwrap_or(c.alarm_level);
        c.water_level = settings.water_level.unwrap_or(c.water_level);
        c.watering_delay = settings.watering_delay.unwrap_or(c.watering_delay);
        c.auto_water = settings.auto_water.unwrap_or(c.auto_water);
        c.enabled = settings.enabled.unwrap_or(c.enabled);
        c.wet_point = settings.wet_point.unwrap_or(c.wet_point);
        c.dry_point = settings.dry_point.unwrap_or(c.dry_point);

        self.sensor.set_wet_point(self.config.wet_point);
        self.sensor.set_dry_point(self.config.dry_point);
    }

    /// Read the sensor into `saturation` and the history.
    ///
    /// Readings are clamped to `[0, 1]`. A non-finite reading is dropped and
    /// the previous saturation is kept.
    pub fn sample(&mut self) {
        let reading = self.sensor.saturation();
        if !reading.is_finite() {
            return;
        }
        self.saturation = reading.clamp(0.0, 1.0);
        self.history.push(self.saturation);
    }

    /// Run the watering and alarm logic for the tick at `now`.
    ///
    /// `now` is the time since the controller started.
    pub fn update(
        &mut self,
        now: Duration,
    ) -> UpdateOutcome {
        let mut outcome = UpdateOutcome::default();
        if !self.config.enabled {
            return outcome;
        }

        self.state = WaterState::Idle;
        let saturation = self.saturation;
        if saturation < self.config.water_level {
            if self.water(now) {
                info!(
                    "Watering Channel: {} - rate {:.2} for {:.2}sec",
                    self.id, self.config.pump_speed, self.config.pump_time
                );
                self.state = WaterState::Watering;
                outcome.dosed = true;
            }

            if saturation < self.config.alarm_level && !self.alarm_active {
                warn!(
                    "Alarm on Channel: {} - saturation is {:.2}% (warn level {:.2}%)",
                    self.id,
                    saturation * 100.0,
                    self.config.alarm_level * 100.0
                );
                self.alarm_active = true;
                outcome.alarm_raised = true;
            }
        }

        outcome
    }

    fn water(
        &mut self,
        now: Duration,
    ) -> bool {
        if !self.config.auto_water {
            return false;
        }

        let due = match self.last_dose {
            None => true,
            Some(last) => now.saturating_sub(last).as_secs_f32() > self.config.watering_delay,
        };
        if due {
            self.pump.dose(self.config.pump_speed, self.config.pump_time, false);
            self.last_dose = Some(now);
        }
        due
    }

    /// Clear the alarm latch.
    #[inline]
    pub fn acknowledge_alarm(&mut self) { self.alarm_active = false; }

    /// Whether the sensor is connected and the channel enabled.
    #[inline]
    pub fn is_active(&self) -> bool { self.config.enabled && self.sensor.is_active() }
}

impl<S, P> Channel<S, P> {
    /// 1-based channel number.
    #[inline]
    pub const fn id(&self) -> u8 { self.id }

    /// Display title.
    #[inline]
    pub fn title(&self) -> &str { &self.title }

    /// Effective configuration.
    #[inline]
    pub const fn config(&self) -> &ChannelConfig { &self.config }

    /// Most recent saturation sample.
    #[inline]
    pub const fn saturation(&self) -> f32 { self.saturation }

    /// Saturation samples, oldest first.
    #[inline]
    pub const fn history(&self) -> &SaturationHistory { &self.history }

    /// Whether the alarm is latched.
    #[inline]
    pub const fn alarm_active(&self) -> bool { self.alarm_active }

    /// Watering activity of the last update.
    #[inline]
    pub const fn state(&self) -> WaterState { self.state }

    /// Time of the last dose, if any.
    #[inline]
    pub const fn last_dose(&self) -> Option<Duration> { self.last_dose }

    /// The pump collaborator.
    #[inline]
    pub const fn pump(&self) -> &P { &self.pump }

    /// The sensor collaborator.
    #[inline]
    pub fn sensor_mut(&mut self) -> &mut S { &mut self.sensor }
}

impl<S, P> fmt::Display for Channel<S, P> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let c = &self.config;
        writeln!(f, "Channel: {}", self.id)?;
        writeln!(f, "Enabled: {}", c.enabled)?;
        writeln!(f, "Alarm level: {}", c.alarm_level)?;
        writeln!(f, "Auto water: {}", c.auto_water)?;
        writeln!(f, "Water level: {}", c.water_level)?;
        writeln!(f, "Pump speed: {}", c.pump_speed)?;
        writeln!(f, "Pump time: {}", c.pump_time)?;
        writeln!(f, "Delay: {}", c.watering_delay)?;
        writeln!(f, "Wet point: {}", c.wet_point)?;
        write!(f, "Dry point: {}", c.dry_point)
    }
}

// =============================================================================
// Test Doubles
// =============================================================================

/// Scripted sensor and recording pump shared by the crate's tests.
#[cfg(test)]
pub(crate) mod fakes {
    use std::vec::Vec;

    use crate::hardware::{MoistureSensor, Pump};

    #[derive(Default)]
    pub struct FakeSensor {
        pub value: f32,
        pub unplugged: bool,
        pub wet_point: f32,
        pub dry_point: f32,
    }

    impl FakeSensor {
        pub fn reading(value: f32) -> Self {
            Self {
                value,
                ..Self::default()
            }
        }
    }

    impl MoistureSensor for FakeSensor {
        fn saturation(&mut self) -> f32 { self.value }

        fn is_active(&self) -> bool { !self.unplugged }

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

    #[derive(Default)]
    pub struct FakePump {
        pub doses: Vec<(f32, f32, bool)>,
    }

    impl Pump for FakePump {
        fn dose(
            &mut self,
            speed: f32,
            seconds: f32,
            blocking: bool,
        ) {
            self.doses.push((speed, seconds, blocking));
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::fakes::{FakePump, FakeSensor};
    use super::*;

    fn secs(s: u64) -> Duration { Duration::from_secs(s) }

    fn watering_channel(saturation: f32) -> Channel<FakeSensor, FakePump> {
        let mut channel = Channel::new(1, FakeSensor::reading(saturation), FakePump::default());
        channel.apply_config(Some(&ChannelSettings {
            enabled: Some(true),
            auto_water: Some(true),
            water_level: Some(0.5),
            alarm_level: Some(0.3),
            watering_delay: Some(30.0),
            ..ChannelSettings::default()
        }));
        channel
    }

    fn tick(
        channel: &mut Channel<FakeSensor, FakePump>,
        now: Duration,
    ) -> UpdateOutcome {
        channel.sample();
        channel.update(now)
    }

    #[test]
    fn test_defaults() {
        let channel = Channel::new(2, FakeSensor::default(), FakePump::default());
        assert_eq!(channel.id(), 2);
        assert_eq!(channel.title(), "Channel 2");
        assert_eq!(*channel.config(), ChannelConfig::default());
        assert!(!channel.config().enabled);
        assert!(!channel.alarm_active());
        assert_eq!(channel.last_dose(), None);
    }

    #[test]
    fn test_new_pushes_calibration_to_sensor() {
        let mut channel = Channel::new(1, FakeSensor::default(), FakePump::default());
        assert_eq!(channel.sensor_mut().wet_point, defaults::WET_POINT);
        assert_eq!(channel.sensor_mut().dry_point, defaults::DRY_POINT);
    }

    #[test]
    fn test_disabled_channel_is_dormant() {
        let mut channel = Channel::new(1, FakeSensor::reading(0.0), FakePump::default());
        channel.apply_config(Some(&ChannelSettings {
            auto_water: Some(true),
            ..ChannelSettings::default()
        }));

        for t in [0, 40, 80] {
            assert_eq!(tick(&mut channel, secs(t)), UpdateOutcome::default());
        }
        assert!(channel.pump().doses.is_empty());
        assert!(!channel.alarm_active());
        assert_eq!(channel.state(), WaterState::Idle);
    }

    #[test]
    fn test_dose_once_per_delay_window() {
        let mut channel = watering_channel(0.4);

        assert!(tick(&mut channel, secs(0)).dosed);
        assert_eq!(channel.state(), WaterState::Watering);
        assert_eq!(channel.pump().doses, vec![(defaults::PUMP_SPEED, defaults::PUMP_TIME, false)]);

        assert!(!tick(&mut channel, secs(10)).dosed);
        assert!(!tick(&mut channel, secs(30)).dosed, "delay must be strictly exceeded");
        assert_eq!(channel.state(), WaterState::Idle);
        assert_eq!(channel.pump().doses.len(), 1);

        assert!(tick(&mut channel, secs(31)).dosed);
        assert_eq!(channel.pump().doses.len(), 2);
        assert_eq!(channel.last_dose(), Some(secs(31)));
    }

    #[test]
    fn test_no_dose_without_auto_water() {
        let mut channel = watering_channel(0.1);
        channel.apply_config(Some(&ChannelSettings {
            auto_water: Some(false),
            ..ChannelSettings::default()
        }));

        let outcome = tick(&mut channel, secs(0));
        assert!(!outcome.dosed);
        assert!(outcome.alarm_raised, "alarm is independent of auto water");
        assert!(channel.pump().doses.is_empty());
    }

    #[test]
    fn test_wet_soil_does_nothing() {
        let mut channel = watering_channel(0.5);
        assert_eq!(tick(&mut channel, secs(0)), UpdateOutcome::default());
        assert!(channel.pump().doses.is_empty());
    }

    #[test]
    fn test_alarm_latches_until_acknowledged() {
        let mut channel = watering_channel(0.2);
        let outcome = tick(&mut channel, secs(0));
        assert!(outcome.alarm_raised);
        assert!(channel.alarm_active());

        // recovery does not clear the latch
        channel.sensor_mut().value = 0.9;
        for t in 1..5 {
            let outcome = tick(&mut channel, secs(t));
            assert!(!outcome.alarm_raised);
            assert!(channel.alarm_active());
        }

        channel.acknowledge_alarm();
        assert!(!channel.alarm_active());
    }

    #[test]
    fn test_alarm_raised_only_once() {
        let mut channel = watering_channel(0.2);
        assert!(tick(&mut channel, secs(0)).alarm_raised);
        assert!(!tick(&mut channel, secs(1)).alarm_raised);

        channel.acknowledge_alarm();
        assert!(tick(&mut channel, secs(2)).alarm_raised, "relatches while still dry");
    }

    #[test]
    fn test_alarm_requires_water_level_breach() {
        // alarm_level above water_level: between the two nothing happens
        let mut channel = watering_channel(0.45);
        channel.apply_config(Some(&ChannelSettings {
            water_level: Some(0.4),
            alarm_level: Some(0.6),
            ..ChannelSettings::default()
        }));
        assert_eq!(tick(&mut channel, secs(0)), UpdateOutcome::default());
        assert!(!channel.alarm_active());
    }

    #[test]
    fn test_sample_clamps_and_skips_non_finite() {
        let mut channel = watering_channel(1.4);
        channel.sample();
        assert_eq!(channel.saturation(), 1.0);

        channel.sensor_mut().value = -0.2;
        channel.sample();
        assert_eq!(channel.saturation(), 0.0);

        channel.sensor_mut().value = f32::NAN;
        channel.sample();
        assert_eq!(channel.saturation(), 0.0);
        assert_eq!(channel.history().len(), 2);
    }

    #[test]
    fn test_apply_config_partial() {
        let mut channel = Channel::new(3, FakeSensor::default(), FakePump::default());
        channel.apply_config(Some(&ChannelSettings {
            pump_time: Some(2.5),
            wet_point: Some(1.5),
            ..ChannelSettings::default()
        }));

        let config = channel.config();
        assert_eq!(config.pump_time, 2.5);
        assert_eq!(config.wet_point, 1.5);
        assert_eq!(config.pump_speed, defaults::PUMP_SPEED);
        assert_eq!(config.dry_point, defaults::DRY_POINT);
        assert_eq!(channel.sensor_mut().wet_point, 1.5);
    }

    #[test]
    fn test_apply_config_none_is_noop() {
        let mut channel = Channel::new(1, FakeSensor::default(), FakePump::default());
        channel.apply_config(None);
        assert_eq!(*channel.config(), ChannelConfig::default());
    }

    #[test]
    fn test_is_active_needs_sensor_and_enable() {
        let mut channel = watering_channel(0.5);
        assert!(channel.is_active());
        channel.sensor_mut().unplugged = true;
        assert!(!channel.is_active());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let ok = ChannelSettings {
            water_level: Some(0.2),
            pump_time: Some(1.0),
            watering_delay: Some(0.0),
            ..ChannelSettings::default()
        };
        assert_eq!(ok.validate(), Ok(()));

        let bad = ChannelSettings {
            alarm_level: Some(1.5),
            ..ChannelSettings::default()
        };
        let fault = bad.validate().unwrap_err();
        assert_eq!(fault.key, "alarm_level");

        let bad = ChannelSettings {
            pump_time: Some(0.0),
            ..ChannelSettings::default()
        };
        assert_eq!(bad.validate().unwrap_err().key, "pump_time");
    }

    #[test]
    fn test_fault_message() {
        let fault = SettingsFault {
            key: "pump_speed",
            expected: "between 0 and 1",
        };
        assert_eq!(fault.to_string(), "`pump_speed` must be between 0 and 1");
    }

    #[test]
    fn test_display_summary() {
        let channel = Channel::new(1, FakeSensor::default(), FakePump::default());
        let text = channel.to_string();
        assert!(text.starts_with("Channel: 1\nEnabled: false\n"));
        assert!(text.contains("Delay: 30\n"));
        assert!(text.ends_with("Dry point: 26.7"));
    }
}
