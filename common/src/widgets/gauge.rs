//! Saturation bar and channel label for the overview screen.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;

use crate::colors::{BAR_PALETTE, INACTIVE_GRAY, LABEL_PALETTE, RED, color_for, display_color_for};
use crate::config::{BAR_WIDTH, LABEL_OFFSET_X, LABEL_SIZE, SCREEN_HEIGHT};
use crate::styles::{TAB_STYLE, TOP_CENTERED};
use crate::widgets::primitives::fill;

const LABEL_Y: i32 = 2;
const MARKER_Y: i32 = LABEL_Y + LABEL_SIZE as i32 + 1;
const MARKER_HEIGHT: u32 = 3;

const RED_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(RED);

/// What a gauge shows for one channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeData {
    /// 1-based channel number printed on the label.
    pub number: u8,
    /// Latest saturation, 0..1.
    pub saturation: f32,
    /// Sensor connected and channel enabled.
    pub active: bool,
    /// Alarm latched.
    pub alarm: bool,
}

/// Draw one overview column with its left edge at `x`.
///
/// The bar is only drawn for an active channel. An inactive channel keeps a
/// grey label.
pub fn draw_gauge<D>(
    display: &mut D,
    x: i32,
    data: &GaugeData,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if data.active {
        // bar top is truncated, not rounded
        let top = ((1.0 - data.saturation.clamp(0.0, 1.0)) * SCREEN_HEIGHT as f32) as i32;
        let height = SCREEN_HEIGHT as i32 - top;
        if height > 0 {
            Rectangle::new(Point::new(x, top), Size::new(BAR_WIDTH, height as u32))
                .into_styled(PrimitiveStyle::with_fill(display_color_for(data.saturation, BAR_PALETTE)))
                .draw(display)
                .ok();
        }
    }

    let label_x = x + LABEL_OFFSET_X;
    let label_color = if data.active {
        color_for(data.saturation, LABEL_PALETTE)
    } else {
        INACTIVE_GRAY
    };
    fill(
        display,
        Rectangle::new(Point::new(label_x, LABEL_Y), Size::new(LABEL_SIZE, LABEL_SIZE)),
        label_color,
    );

    let mut number: String<3> = String::new();
    write!(number, "{}", data.number).ok();
    Text::with_text_style(
        &number,
        Point::new(label_x + LABEL_SIZE as i32 / 2, LABEL_Y),
        TAB_STYLE,
        TOP_CENTERED,
    )
    .draw(display)
    .ok();

    if data.alarm {
        Rectangle::new(Point::new(label_x, MARKER_Y), Size::new(LABEL_SIZE, MARKER_HEIGHT))
            .into_styled(RED_FILL)
            .draw(display)
            .ok();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::WHITE;
    use crate::frame::Frame;

    fn gauge(
        saturation: f32,
        active: bool,
        alarm: bool,
    ) -> GaugeData {
        GaugeData {
            number: 1,
            saturation,
            active,
            alarm,
        }
    }

    #[test]
    fn test_bar_height_follows_saturation() {
        let mut frame = Frame::new();
        draw_gauge(&mut frame, 21, &gauge(0.25, true, false));

        let bar = display_color_for(0.25, BAR_PALETTE);
        assert_eq!(frame.pixel(21, 60), Some(bar));
        assert_eq!(frame.pixel(58, 79), Some(bar));
        assert_eq!(frame.pixel(21, 59), Some(WHITE));
        assert_eq!(frame.pixel(59, 79), Some(WHITE));
    }

    #[test]
    fn test_bar_top_truncates_fraction() {
        let mut frame = Frame::new();
        draw_gauge(&mut frame, 21, &gauge(0.33, true, false));

        // (1 - 0.33) * 80 = 53.6
        let bar = display_color_for(0.33, BAR_PALETTE);
        assert_eq!(frame.pixel(21, 53), Some(bar));
        assert_eq!(frame.pixel(21, 52), Some(WHITE));
    }

    #[test]
    fn test_inactive_gauge_has_gray_label_only() {
        let mut frame = Frame::new();
        draw_gauge(&mut frame, 61, &gauge(0.9, false, false));

        assert_eq!(frame.pixel(61 + 15, 2), Some(Rgb565::from(INACTIVE_GRAY)));
        assert_eq!(frame.pixel(61, 79), Some(WHITE));
    }

    #[test]
    fn test_label_color_and_alarm_marker() {
        let mut frame = Frame::new();
        draw_gauge(&mut frame, 101, &gauge(0.1, true, true));

        let label = Rgb565::from(color_for(0.1, LABEL_PALETTE));
        assert_eq!(frame.pixel(101 + 15, 2), Some(label));
        assert_eq!(frame.pixel(101 + 15, MARKER_Y), Some(RED));
    }
}
