//! Interfaces to the board peripherals.
//!
//! The core never talks to GPIO, SPI or PWM directly. Each peripheral is
//! reached through one of these traits, implemented by the hardware layer on
//! the device and by simulated parts on the desktop.
//!
//! None of the actuator calls report failure: a pump or buzzer that does not
//! respond is the driver's problem, and the channel logic carries on.

use crate::frame::Frame;

/// Capacitive moisture sensor producing a calibrated saturation.
pub trait MoistureSensor {
    /// Current saturation, nominally `0.0` (dry) to `1.0` (wet).
    fn saturation(&mut self) -> f32;

    /// Whether the sensor is connected and producing readings.
    fn is_active(&self) -> bool;

    /// Calibration reading for saturated soil.
    fn set_wet_point(
        &mut self,
        value: f32,
    );

    /// Calibration reading for dry soil.
    fn set_dry_point(
        &mut self,
        value: f32,
    );
}

/// Water pump driven at a duty cycle for a fixed time.
pub trait Pump {
    /// Run the pump at `speed` (0..1) for `seconds`.
    ///
    /// With `blocking == false` the call returns immediately and the dose
    /// completes in the background.
    fn dose(
        &mut self,
        speed: f32,
        seconds: f32,
        blocking: bool,
    );
}

/// Piezo buzzer.
pub trait Buzzer {
    /// Sound a tone of `frequency_hz` for `seconds`.
    fn beep(
        &mut self,
        frequency_hz: u32,
        seconds: f32,
        blocking: bool,
    );
}

/// Destination for finished frames, called once per tick.
pub trait DisplaySink {
    /// Transport error of the underlying display.
    type Error;

    /// Push a complete frame to the panel.
    fn present(
        &mut self,
        frame: &Frame,
    ) -> Result<(), Self::Error>;
}
