//! Pre-computed text styles shared by the screens.
//!
//! All styles are `const` so the screens never rebuild them per frame. Text is
//! positioned by its top-left corner ([`Baseline::Top`]), which is how the
//! layout coordinates are measured.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::PROFONT_12_POINT;

use crate::colors::{BLACK, WHITE};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Left-aligned, positioned by the top edge.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Centred on x, positioned by the top edge. Used for the channel numbers.
pub const TOP_CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Top)
    .build();

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

/// Screen titles and readouts on the white background.
pub const TITLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_12_POINT, BLACK);

/// Text on coloured tabs, labels and the alarm tag.
pub const TAB_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_12_POINT, WHITE);

/// Small secondary text (calibration points).
pub const SMALL_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, BLACK);
