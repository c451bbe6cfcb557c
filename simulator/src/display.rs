//! Display sinks: an SDL window, or an off-screen buffer for headless runs.

use std::convert::Infallible;
use std::path::Path;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettings, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use grow_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use grow_common::{DisplaySink, Frame};

use crate::error::SimulatorError;

fn panel() -> SimulatorDisplay<Rgb565> { SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)) }

fn output_settings(scale: u32) -> OutputSettings { OutputSettingsBuilder::new().scale(scale.max(1)).build() }

/// Window showing the panel at `scale` times its size.
pub struct WindowDisplay {
    display: SimulatorDisplay<Rgb565>,
    window: Window,
}

impl WindowDisplay {
    pub fn new(scale: u32) -> Self {
        let display = panel();
        let mut window = Window::new("Grow Simulator", &output_settings(scale));
        // the window only exists after the first update
        window.update(&display);
        Self { display, window }
    }

    /// Window events since the last call.
    pub fn events(&mut self) -> Vec<SimulatorEvent> { self.window.events().collect() }
}

impl DisplaySink for WindowDisplay {
    type Error = Infallible;

    fn present(
        &mut self,
        frame: &Frame,
    ) -> Result<(), Self::Error> {
        self.display.draw_iter(frame.pixels())?;
        self.window.update(&self.display);
        Ok(())
    }
}

/// Off-screen panel, keeps the last presented frame.
pub struct HeadlessDisplay {
    display: SimulatorDisplay<Rgb565>,
    frames: u64,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self {
            display: panel(),
            frames: 0,
        }
    }

    /// Number of frames presented so far.
    #[inline]
    pub const fn frames(&self) -> u64 { self.frames }

    /// Colour of the last presented frame at `point`.
    #[cfg(test)]
    pub fn pixel(
        &self,
        point: Point,
    ) -> Rgb565 {
        self.display.get_pixel(point)
    }

    /// Write the last presented frame to a PNG file.
    pub fn save_png(
        &self,
        path: &Path,
        scale: u32,
    ) -> Result<(), SimulatorError> {
        self.display
            .to_rgb_output_image(&output_settings(scale))
            .save_png(path)
            .map_err(|e| SimulatorError::Screenshot {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }
}

impl Default for HeadlessDisplay {
    fn default() -> Self { Self::new() }
}

impl DisplaySink for HeadlessDisplay {
    type Error = Infallible;

    fn present(
        &mut self,
        frame: &Frame,
    ) -> Result<(), Self::Error> {
        self.display.draw_iter(frame.pixels())?;
        self.frames += 1;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
