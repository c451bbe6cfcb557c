//! Colour constants, the indicator palettes and palette interpolation.
//!
//! # Colour Spaces
//!
//! Palettes are authored in 8-bit `Rgb888` so interpolation works on the same
//! values the artwork was designed with. Everything drawn to the display is
//! `Rgb565` (native to the ST7735 panel); conversion happens once per
//! primitive via `Rgb565::from`.
//!
//! # Interpolation
//!
//! [`color_for`] maps a saturation in `[0, 1]` onto a palette. The value is
//! inverted first, so a wet plant reads from the start of the palette (blue)
//! and a dry plant from the end (red).

use embedded_graphics::pixelcolor::{Rgb565, Rgb888, RgbColor};
#[cfg(not(test))]
use micromath::F32Ext;

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Used for titles and readouts on the white background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Used for backgrounds and text on coloured tabs.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Used for the alarm line and alarm markers.
pub const RED: Rgb565 = Rgb565::RED;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Backdrop behind the navigation arrow.
pub const NAV_BLUE: Rgb888 = Rgb888::new(32, 138, 251);

/// "Edit" / "Done" tab fill.
pub const TAB_BLUE: Rgb888 = Rgb888::new(75, 166, 252);

/// "Set Wet" tab fill.
pub const WET_BLUE: Rgb888 = Rgb888::new(32, 137, 251);

/// "Set Dry" tab fill.
pub const DRY_YELLOW: Rgb888 = Rgb888::new(254, 219, 82);

/// Navigation backdrop while editing (navigation is locked).
pub const NAV_GRAY: Rgb888 = Rgb888::new(138, 138, 138);

/// Channel label when the sensor is missing or the channel is disabled.
pub const INACTIVE_GRAY: Rgb888 = Rgb888::new(129, 129, 129);

/// Background of the history graph.
pub const GRAPH_GRAY: Rgb888 = Rgb888::new(60, 60, 60);

// =============================================================================
// Palettes
// =============================================================================

/// An ordered colour ramp with at least two stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette<'a> {
    stops: &'a [Rgb888],
}

impl<'a> Palette<'a> {
    /// Wrap a slice of colour stops.
    ///
    /// # Panics
    ///
    /// Panics when fewer than two stops are given. For `const` palettes this
    /// is a compile error.
    pub const fn new(stops: &'a [Rgb888]) -> Self {
        assert!(stops.len() >= 2, "a palette needs at least two colours");
        Self { stops }
    }

    /// Colour stops in order.
    #[inline]
    pub const fn stops(&self) -> &'a [Rgb888] { self.stops }

    /// First stop (wettest).
    #[inline]
    pub const fn first(&self) -> Rgb888 { self.stops[0] }

    /// Last stop (driest).
    #[inline]
    pub const fn last(&self) -> Rgb888 { self.stops[self.stops.len() - 1] }
}

const BAR_STOPS: [Rgb888; 4] = [
    Rgb888::new(192, 225, 254), // Blue
    Rgb888::new(196, 255, 209), // Green
    Rgb888::new(255, 243, 192), // Yellow
    Rgb888::new(254, 192, 192), // Red
];

const LABEL_STOPS: [Rgb888; 4] = [
    Rgb888::new(32, 137, 251),  // Blue
    Rgb888::new(100, 255, 124), // Green
    Rgb888::new(254, 219, 82),  // Yellow
    Rgb888::new(254, 82, 82),   // Red
];

/// Pastel ramp for the saturation bars and graph columns.
pub const BAR_PALETTE: Palette<'static> = Palette::new(&BAR_STOPS);

/// Saturated ramp for the channel number labels.
pub const LABEL_PALETTE: Palette<'static> = Palette::new(&LABEL_STOPS);

// =============================================================================
// Interpolation
// =============================================================================

/// Map a saturation onto `palette` by linear interpolation between stops.
///
/// `value` is expected in `[0, 1]`. Values outside are clamped and NaN is
/// treated as `0.0` (fully dry), so the result is always a palette colour or
/// a blend of two neighbouring stops.
pub fn color_for(
    value: f32,
    palette: Palette<'_>,
) -> Rgb888 {
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let v = 1.0 - value;

    if v <= 0.0 {
        return palette.first();
    }
    if v >= 1.0 {
        return palette.last();
    }

    let stops = palette.stops();
    let scaled = v * (stops.len() - 1) as f32;
    // scaled is non-negative, so truncation is floor
    let a = (scaled as usize).min(stops.len() - 2);
    let t = scaled - a as f32;
    let (from, to) = (stops[a], stops[a + 1]);

    Rgb888::new(
        lerp_channel(from.r(), to.r(), t),
        lerp_channel(from.g(), to.g(), t),
        lerp_channel(from.b(), to.b(), t),
    )
}

/// [`color_for`] converted for drawing.
#[inline]
pub fn display_color_for(
    value: f32,
    palette: Palette<'_>,
) -> Rgb565 {
    Rgb565::from(color_for(value, palette))
}

#[inline]
fn lerp_channel(
    from: u8,
    to: u8,
    t: f32,
) -> u8 {
    let from = f32::from(from);
    let to = f32::from(to);
    (from + (to - from) * t).round().clamp(0.0, 255.0) as u8
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const TWO_STOPS: [Rgb888; 2] = [Rgb888::new(0, 0, 0), Rgb888::new(200, 100, 50)];
    const TWO_STOP: Palette<'static> = Palette::new(&TWO_STOPS);

    #[test]
    fn test_endpoints_return_palette_ends() {
        // value 1.0 is wet -> first stop, value 0.0 is dry -> last stop
        assert_eq!(color_for(1.0, BAR_PALETTE), BAR_PALETTE.first());
        assert_eq!(color_for(0.0, BAR_PALETTE), BAR_PALETTE.last());
        assert_eq!(color_for(1.0, LABEL_PALETTE), Rgb888::new(32, 137, 251));
        assert_eq!(color_for(0.0, LABEL_PALETTE), Rgb888::new(254, 82, 82));
    }

    #[test]
    fn test_exact_stop_hits() {
        // four stops: v = 1/3 lands on the second stop
        let c = color_for(1.0 - 1.0 / 3.0, LABEL_PALETTE);
        assert_eq!(c, Rgb888::new(100, 255, 124));
    }

    #[test]
    fn test_midpoint_blend_rounds() {
        let c = color_for(0.5, TWO_STOP);
        assert_eq!(c, Rgb888::new(100, 50, 25));

        // 0.25 of the way from black: 50, 25, 12.5 -> rounds to 13
        let c = color_for(0.75, TWO_STOP);
        assert_eq!(c, Rgb888::new(50, 25, 13));
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(color_for(1.7, BAR_PALETTE), BAR_PALETTE.first());
        assert_eq!(color_for(-0.4, BAR_PALETTE), BAR_PALETTE.last());
        assert_eq!(color_for(f32::NAN, BAR_PALETTE), BAR_PALETTE.last());
    }

    #[test]
    fn test_display_color_matches_conversion() {
        let expected = Rgb565::from(color_for(0.42, BAR_PALETTE));
        assert_eq!(display_color_for(0.42, BAR_PALETTE), expected);
    }

    #[test]
    #[should_panic(expected = "at least two colours")]
    fn test_single_stop_palette_rejected() {
        let stops = [Rgb888::new(1, 2, 3)];
        let _ = Palette::new(&stops);
    }

    fn arb_palette() -> impl Strategy<Value = Vec<Rgb888>> {
        prop::collection::vec(
            (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb888::new(r, g, b)),
            2..6,
        )
    }

    proptest! {
        #[test]
        fn test_small_steps_give_small_colour_changes(
            stops in arb_palette(),
            value in 0.0f32..=1.0,
        ) {
            let palette = Palette::new(&stops);
            let step = 1.0e-3;
            let next = (value + step).min(1.0);
            let a = color_for(value, palette);
            let b = color_for(next, palette);

            // one segment spans 1/(n-1) of the input, a full 255 swing at most
            let segments = (stops.len() - 1) as f32;
            let bound = (255.0 * segments * step).ceil() as i32 + 1;
            prop_assert!((i32::from(a.r()) - i32::from(b.r())).abs() <= bound);
            prop_assert!((i32::from(a.g()) - i32::from(b.g())).abs() <= bound);
            prop_assert!((i32::from(a.b()) - i32::from(b.b())).abs() <= bound);
        }

        #[test]
        fn test_ends_hold_for_any_palette(stops in arb_palette()) {
            let palette = Palette::new(&stops);
            prop_assert_eq!(color_for(1.0, palette), stops[0]);
            prop_assert_eq!(color_for(0.0, palette), stops[stops.len() - 1]);
        }
    }
}
