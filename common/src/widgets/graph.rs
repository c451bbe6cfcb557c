//! Saturation history graph for the detail screen.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
#[cfg(not(test))]
use micromath::F32Ext;

use crate::colors::{BAR_PALETTE, GRAPH_GRAY, RED, display_color_for};
use crate::config::{GRAPH_HEIGHT, HEADER_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::history::SaturationHistory;
use crate::styles::{TAB_STYLE, TOP_LEFT};
use crate::widgets::primitives::fill;

const GRAPH_AREA: Rectangle = Rectangle::new(
    Point::new(0, HEADER_HEIGHT as i32),
    Size::new(SCREEN_WIDTH, GRAPH_HEIGHT),
);

const ALARM_TAG_WIDTH: u32 = 50;
const ALARM_TAG_HEIGHT: u32 = 17;
const ALARM_TAG_X: i32 = (SCREEN_WIDTH - ALARM_TAG_WIDTH) as i32;

const RED_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(RED);

/// Height in pixels of a saturation inside the graph.
fn scaled(value: f32) -> u32 { (value.clamp(0.0, 1.0) * GRAPH_HEIGHT as f32).round() as u32 }

/// Draw the dark graph area with one column per sample, newest at the right.
pub fn draw_history_graph<D>(
    display: &mut D,
    history: &SaturationHistory,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill(display, GRAPH_AREA, GRAPH_GRAY);

    let first_x = SCREEN_WIDTH as i32 - history.len() as i32;
    for (i, value) in history.iter().enumerate() {
        let h = scaled(value);
        if h == 0 {
            continue;
        }
        let x = first_x + i as i32;
        Rectangle::new(Point::new(x, (SCREEN_HEIGHT - h) as i32), Size::new(1, h))
            .into_styled(PrimitiveStyle::with_fill(display_color_for(value, BAR_PALETTE)))
            .draw(display)
            .ok();
    }
}

/// Draw the red alarm threshold line with its "Alarm" tag.
pub fn draw_alarm_line<D>(
    display: &mut D,
    alarm_level: f32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let y = (SCREEN_HEIGHT - scaled(alarm_level)) as i32;

    Rectangle::new(Point::new(0, y), Size::new(SCREEN_WIDTH, 1))
        .into_styled(RED_FILL)
        .draw(display)
        .ok();

    Rectangle::new(
        Point::new(ALARM_TAG_X, y - ALARM_TAG_HEIGHT as i32 + 1),
        Size::new(ALARM_TAG_WIDTH, ALARM_TAG_HEIGHT),
    )
    .into_styled(RED_FILL)
    .draw(display)
    .ok();

    Text::with_text_style("Alarm", Point::new(ALARM_TAG_X + 3, y - 15), TAB_STYLE, TOP_LEFT)
        .draw(display)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================
