//! Edit screen: live saturation and calibration points of one channel.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use heapless::String;

use crate::colors::{DRY_YELLOW, NAV_GRAY, TAB_BLUE, WET_BLUE, WHITE};
use crate::config::{HEADER_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH, TAB_HEIGHT};
use crate::styles::{SMALL_STYLE, TITLE_STYLE, TOP_LEFT};
use crate::widgets::{draw_nav_icon, draw_tab};

const TITLE_POS: Point = Point::new(23, 3);
const SATURATION_POS: Point = Point::new(5, 26);
const CALIBRATION_POS: Point = Point::new(5, 45);

const DONE_TAB_WIDTH: u32 = 38;
const DONE_TAB: Rectangle = Rectangle::new(
    Point::new((SCREEN_WIDTH - DONE_TAB_WIDTH) as i32, 0),
    Size::new(DONE_TAB_WIDTH, HEADER_HEIGHT),
);
const DONE_TEXT_POS: Point = Point::new(SCREEN_WIDTH as i32 - 36, 3);

const BOTTOM_TAB_WIDTH: u32 = 60;
const BOTTOM_TAB_Y: i32 = (SCREEN_HEIGHT - TAB_HEIGHT) as i32;
const WET_TAB: Rectangle = Rectangle::new(Point::new(0, BOTTOM_TAB_Y), Size::new(BOTTOM_TAB_WIDTH, TAB_HEIGHT));
const DRY_TAB: Rectangle = Rectangle::new(
    Point::new((SCREEN_WIDTH - BOTTOM_TAB_WIDTH) as i32, BOTTOM_TAB_Y),
    Size::new(BOTTOM_TAB_WIDTH, TAB_HEIGHT),
);
const WET_TEXT_POS: Point = Point::new(2, BOTTOM_TAB_Y + 3);
const DRY_TEXT_POS: Point = Point::new((SCREEN_WIDTH - BOTTOM_TAB_WIDTH) as i32 + 2, BOTTOM_TAB_Y + 3);

/// What the edit screen shows.
pub struct EditData<'a> {
    pub title: &'a str,
    pub saturation: f32,
    pub wet_point: f32,
    pub dry_point: f32,
}

pub fn draw_edit_screen<D>(
    display: &mut D,
    data: &EditData<'_>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(WHITE).ok();

    Text::with_text_style(data.title, TITLE_POS, TITLE_STYLE, TOP_LEFT)
        .draw(display)
        .ok();

    let mut line: String<32> = String::new();
    write!(line, "Sat: {:.2}%", data.saturation * 100.0).ok();
    Text::with_text_style(&line, SATURATION_POS, TITLE_STYLE, TOP_LEFT)
        .draw(display)
        .ok();

    line.clear();
    write!(line, "Wet {:.1}  Dry {:.1}", data.wet_point, data.dry_point).ok();
    Text::with_text_style(&line, CALIBRATION_POS, SMALL_STYLE, TOP_LEFT)
        .draw(display)
        .ok();

    // navigation is locked on this page
    draw_nav_icon(display, NAV_GRAY);
    draw_tab(display, DONE_TAB, TAB_BLUE, "Done", DONE_TEXT_POS);
    draw_tab(display, WET_TAB, WET_BLUE, "Set Wet", WET_TEXT_POS);
    draw_tab(display, DRY_TAB, DRY_YELLOW, "Set Dry", DRY_TEXT_POS);
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;

    #[test]
    fn test_layout() {
        let mut frame = Frame::new();
        draw_edit_screen(
            &mut frame,
            &EditData {
                title: "Channel 2",
                saturation: 0.42,
                wet_point: 0.7,
                dry_point: 26.7,
            },
        );

        assert_eq!(frame.pixel(0, 0), Some(Rgb565::from(NAV_GRAY)));
        assert_eq!(frame.pixel(159, 0), Some(Rgb565::from(TAB_BLUE)));
        assert_eq!(frame.pixel(0, 79), Some(Rgb565::from(WET_BLUE)));
        assert_eq!(frame.pixel(159, 79), Some(Rgb565::from(DRY_YELLOW)));
        assert_eq!(frame.pixel(80, 79), Some(WHITE));
    }
}
