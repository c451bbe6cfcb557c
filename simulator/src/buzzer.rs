//! Buzzer that writes its tones to the log.

use std::thread;
use std::time::Duration;

use grow_common::Buzzer;
use tracing::info;

/// Logs every beep instead of sounding it.
#[derive(Default)]
pub struct LogBuzzer {
    beeps: u64,
}

impl LogBuzzer {
    /// Number of beeps so far.
    #[inline]
    pub const fn beeps(&self) -> u64 { self.beeps }
}

impl Buzzer for LogBuzzer {
    fn beep(
        &mut self,
        frequency_hz: u32,
        seconds: f32,
        blocking: bool,
    ) {
        self.beeps += 1;
        info!(frequency_hz, seconds, "Beep");
        if blocking {
            thread::sleep(Duration::from_secs_f32(seconds.max(0.0)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_beeps() {
        let mut buzzer = LogBuzzer::default();
        buzzer.beep(440, 0.1, false);
        buzzer.beep(440, 0.01, true);
        assert_eq!(buzzer.beeps(), 2);
    }
}
