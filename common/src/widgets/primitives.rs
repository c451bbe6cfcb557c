//! Low-level drawing primitives shared across screens.

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle, Triangle};
use embedded_graphics::text::Text;

use crate::colors::WHITE;
use crate::config::ICON_SIZE;
use crate::styles::{TAB_STYLE, TOP_LEFT};

const ICON_BACKDROP: Rectangle = Rectangle::new(Point::zero(), Size::new(ICON_SIZE, ICON_SIZE));

const ARROW_SHAFT: Line = Line::new(Point::new(4, 10), Point::new(11, 10));
const ARROW_HEAD: Triangle = Triangle::new(Point::new(11, 5), Point::new(16, 10), Point::new(11, 15));

const ARROW_STROKE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(WHITE, 3);
const ARROW_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(WHITE);

/// Draw the navigation backdrop in the top-left corner with a white
/// right-arrow on top.
pub fn draw_nav_icon<D>(
    display: &mut D,
    backdrop: Rgb888,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill(display, ICON_BACKDROP, backdrop);
    ARROW_SHAFT.into_styled(ARROW_STROKE).draw(display).ok();
    ARROW_HEAD.into_styled(ARROW_FILL).draw(display).ok();
}

/// Draw a filled tab with a white label at `text_pos`.
pub fn draw_tab<D>(
    display: &mut D,
    area: Rectangle,
    color: Rgb888,
    label: &str,
    text_pos: Point,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill(display, area, color);
    Text::with_text_style(label, text_pos, TAB_STYLE, TOP_LEFT)
        .draw(display)
        .ok();
}

/// Fill `area` with an `Rgb888` colour.
pub fn fill<D>(
    display: &mut D,
    area: Rectangle,
    color: Rgb888,
) where
    D: DrawTarget<Color = Rgb565>,
{
    area.into_styled(PrimitiveStyle::with_fill(Rgb565::from(color)))
        .draw(display)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================
