//! Detail screen: saturation history of one channel.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;

use crate::colors::{NAV_BLUE, TAB_BLUE, WHITE};
use crate::config::{HEADER_HEIGHT, SCREEN_WIDTH};
use crate::history::SaturationHistory;
use crate::styles::{TITLE_STYLE, TOP_LEFT};
use crate::widgets::{draw_alarm_line, draw_history_graph, draw_nav_icon, draw_tab};

const TITLE_POS: Point = Point::new(23, 3);

const EDIT_TAB_WIDTH: u32 = 30;
const EDIT_TAB: Rectangle = Rectangle::new(
    Point::new((SCREEN_WIDTH - EDIT_TAB_WIDTH) as i32, 0),
    Size::new(EDIT_TAB_WIDTH, HEADER_HEIGHT),
);
const EDIT_TEXT_POS: Point = Point::new(SCREEN_WIDTH as i32 - 28, 3);

/// What the detail screen shows.
pub struct DetailData<'a> {
    pub title: &'a str,
    pub history: &'a SaturationHistory,
    pub alarm_level: f32,
}

pub fn draw_detail_screen<D>(
    display: &mut D,
    data: &DetailData<'_>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(WHITE).ok();

    Text::with_text_style(data.title, TITLE_POS, TITLE_STYLE, TOP_LEFT)
        .draw(display)
        .ok();

    draw_history_graph(display, data.history);
    draw_alarm_line(display, data.alarm_level);

    draw_nav_icon(display, NAV_BLUE);
    draw_tab(display, EDIT_TAB, TAB_BLUE, "Edit", EDIT_TEXT_POS);
}

// =============================================================================
// Unit Tests
// =============================================================================
