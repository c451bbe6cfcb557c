//! Audible alarm.
//!
//! While any channel has a latched alarm and the alarm is enabled in the
//! general settings, the buzzer plays a short burst of beeps. Bursts repeat
//! no more often than `alarm_interval` seconds.
//!
//! # Scheduling
//!
//! A burst is spread over several ticks instead of sleeping inside one: when
//! a burst starts its beeps are queued with their due times, and every tick
//! plays the beeps that have come due. The control loop never blocks on the
//! buzzer.

use core::time::Duration;

use heapless::Deque;
use log::debug;
use serde::Deserialize;

use crate::channel::SettingsFault;
use crate::defaults::{ALARM_BEEP_SECS, ALARM_BURST_OFFSETS_MS, ALARM_ENABLE, ALARM_INTERVAL, ALARM_TONE_HZ};
use crate::hardware::Buzzer;

const BURST_LEN: usize = ALARM_BURST_OFFSETS_MS.len();

/// The `general` table of the settings document.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Whether latched alarms beep.
    pub alarm_enable: bool,
    /// Minimum seconds between bursts.
    pub alarm_interval: f32,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            alarm_enable: ALARM_ENABLE,
            alarm_interval: ALARM_INTERVAL,
        }
    }
}

impl GeneralSettings {
    pub fn validate(&self) -> Result<(), SettingsFault> {
        if self.alarm_interval.is_finite() && self.alarm_interval > 0.0 {
            Ok(())
        } else {
            Err(SettingsFault {
                key: "alarm_interval",
                expected: "greater than 0",
            })
        }
    }
}

/// Drives the buzzer from the combined alarm state of all channels.
pub struct AlarmBeeper {
    settings: GeneralSettings,
    last_burst: Option<Duration>,
    pending: Deque<Duration, BURST_LEN>,
}

impl AlarmBeeper {
    pub fn new(settings: GeneralSettings) -> Self {
        Self {
            settings,
            last_burst: None,
            pending: Deque::new(),
        }
    }

    #[inline]
    pub const fn settings(&self) -> &GeneralSettings { &self.settings }

    /// Advance to `now`.
    ///
    /// `alarm` is true while at least one channel alarm is latched. Returns
    /// `true` when a new burst started on this call.
    pub fn tick<B: Buzzer>(
        &mut self,
        now: Duration,
        alarm: bool,
        buzzer: &mut B,
    ) -> bool {
        if !self.settings.alarm_enable || !alarm {
            self.pending.clear();
            return false;
        }

        let started = self.burst_due(now);
        if started {
            debug!("Alarm burst at {:.1}s", now.as_secs_f32());
            self.last_burst = Some(now);
            for offset in ALARM_BURST_OFFSETS_MS {
                self.pending.push_back(now + Duration::from_millis(offset)).ok();
            }
        }

        while let Some(&due) = self.pending.front()
            && due <= now
        {
            self.pending.pop_front();
            buzzer.beep(ALARM_TONE_HZ, ALARM_BEEP_SECS, false);
        }

        started
    }

    fn burst_due(
        &self,
        now: Duration,
    ) -> bool {
        if !self.pending.is_empty() {
            return false;
        }
        match self.last_burst {
            None => true,
            Some(last) => now.saturating_sub(last).as_secs_f32() >= self.settings.alarm_interval,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
