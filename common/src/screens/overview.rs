//! Overview screen: one saturation bar per channel.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::colors::{NAV_BLUE, WHITE};
use crate::config::CHANNEL_COLUMNS;
use crate::widgets::{GaugeData, draw_gauge, draw_nav_icon};

/// Draw the overview. Gauges beyond the available columns are ignored.
pub fn draw_overview_screen<D>(
    display: &mut D,
    gauges: &[GaugeData],
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(WHITE).ok();

    for (x, gauge) in CHANNEL_COLUMNS.iter().zip(gauges) {
        draw_gauge(display, *x, gauge);
    }

    draw_nav_icon(display, NAV_BLUE);
}

// =============================================================================
// Unit Tests
// =============================================================================
