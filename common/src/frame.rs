//! In-memory framebuffer the screens render into.
//!
//! The controller draws the whole screen into a [`Frame`] every tick and
//! hands the finished frame to a [`DisplaySink`](crate::hardware::DisplaySink).
//! Keeping the pixels in RAM means a sink only ever sees complete frames, and
//! tests can inspect exactly what would have been shown.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::WHITE;
use crate::config::{FRAME_PIXELS, SCREEN_HEIGHT, SCREEN_WIDTH};

const WIDTH: usize = SCREEN_WIDTH as usize;
const HEIGHT: usize = SCREEN_HEIGHT as usize;

/// Full-screen `Rgb565` framebuffer (160x80).
pub struct Frame {
    pixels: [Rgb565; FRAME_PIXELS],
}

impl Frame {
    /// Create a frame filled with white.
    pub const fn new() -> Self { Self { pixels: [WHITE; FRAME_PIXELS] } }

    /// Colour at `(x, y)`, or `None` outside the frame.
    pub fn pixel(
        &self,
        x: i32,
        y: i32,
    ) -> Option<Rgb565> {
        Self::index(x, y).map(|idx| self.pixels[idx])
    }

    /// Raw pixels in row-major order.
    #[inline]
    pub const fn as_slice(&self) -> &[Rgb565] { &self.pixels }

    /// Every pixel with its position, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<Rgb565>> + '_ {
        self.pixels.iter().enumerate().map(|(idx, &color)| {
            let x = (idx % WIDTH) as i32;
            let y = (idx / WIDTH) as i32;
            Pixel(Point::new(x, y), color)
        })
    }

    #[inline]
    fn index(
        x: i32,
        y: i32,
    ) -> Option<usize> {
        if x >= 0 && x < WIDTH as i32 && y >= 0 && y < HEIGHT as i32 {
            Some(y as usize * WIDTH + x as usize)
        } else {
            None
        }
    }
}

impl Default for Frame {
    fn default() -> Self { Self::new() }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl DrawTarget for Frame {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(idx) = Self::index(point.x, point.y) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let drawable_area = area.intersection(&self.bounding_box());
        if drawable_area.size == Size::zero() {
            return Ok(());
        }

        let x_start = drawable_area.top_left.x as usize;
        let width = drawable_area.size.width as usize;
        for y in drawable_area.rows() {
            let row_start = y as usize * WIDTH + x_start;
            self.pixels[row_start..row_start + width].fill(color);
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::PrimitiveStyle;

    use super::*;
    use crate::colors::{BLACK, RED};

    #[test]
    fn test_new_frame_is_white() {
        let frame = Frame::new();
        assert!(frame.as_slice().iter().all(|&c| c == WHITE));
        assert_eq!(frame.size(), Size::new(160, 80));
    }

    #[test]
    fn test_pixel_bounds() {
        let frame = Frame::new();
        assert_eq!(frame.pixel(0, 0), Some(WHITE));
        assert_eq!(frame.pixel(159, 79), Some(WHITE));
        assert_eq!(frame.pixel(160, 0), None);
        assert_eq!(frame.pixel(0, -1), None);
    }

    #[test]
    fn test_fill_solid_is_clipped() {
        let mut frame = Frame::new();
        Rectangle::new(Point::new(150, 70), Size::new(20, 20))
            .into_styled(PrimitiveStyle::with_fill(RED))
            .draw(&mut frame)
            .ok();

        assert_eq!(frame.pixel(150, 70), Some(RED));
        assert_eq!(frame.pixel(159, 79), Some(RED));
        assert_eq!(frame.pixel(149, 70), Some(WHITE));
        assert_eq!(frame.as_slice().iter().filter(|&&c| c == RED).count(), 10 * 10);
    }

    #[test]
    fn test_draw_iter_ignores_outside_points() {
        let mut frame = Frame::new();
        frame
            .draw_iter([Pixel(Point::new(-1, 5), BLACK), Pixel(Point::new(3, 4), BLACK)])
            .ok();
        assert_eq!(frame.pixel(3, 4), Some(BLACK));
        assert_eq!(frame.as_slice().iter().filter(|&&c| c == BLACK).count(), 1);
    }

    #[test]
    fn test_clear_and_pixels_iterator() {
        let mut frame = Frame::new();
        frame.clear(BLACK).ok();
        assert!(frame.pixels().all(|Pixel(_, c)| c == BLACK));

        let last = frame.pixels().last().map(|Pixel(p, _)| p);
        assert_eq!(last, Some(Point::new(159, 79)));
    }
}
