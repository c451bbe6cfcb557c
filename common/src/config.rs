//! Display, layout and timing configuration constants.
//!
//! # Pre-computed Layout Constants
//!
//! Positions that the screens reuse every frame are computed here as `const`
//! so the drawing code never recalculates them.

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (ST7735 0.96" panel, rotated to landscape: 160x80).
pub const SCREEN_WIDTH: u32 = 160;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 80;

/// Number of pixels in one frame.
pub const FRAME_PIXELS: usize = (SCREEN_WIDTH * SCREEN_HEIGHT) as usize;

// =============================================================================
// Channels
// =============================================================================

/// Number of sensor/pump channels on the board.
pub const CHANNEL_COUNT: usize = 3;

/// Saturation samples kept per channel (one graph column per sample).
pub const HISTORY_SIZE: usize = SCREEN_WIDTH as usize;

/// Maximum length of a channel title.
pub const TITLE_LEN: usize = 24;

// =============================================================================
// Timing
// =============================================================================

/// Control loop period in milliseconds (10 Hz).
pub const TICK_INTERVAL_MS: u64 = 100;

/// Minimum time between two accepted presses of the same button.
pub const DEBOUNCE_MS: u64 = 200;

/// Button events buffered between two ticks.
pub const INPUT_QUEUE_CAPACITY: usize = 8;

// =============================================================================
// Pre-computed Layout Constants
// =============================================================================

/// Height of the top strip holding the navigation icon, title and tabs.
pub const HEADER_HEIGHT: u32 = 20;

/// Height of the history graph under the header.
pub const GRAPH_HEIGHT: u32 = SCREEN_HEIGHT - HEADER_HEIGHT;

/// Left edge of each channel column on the overview.
pub const CHANNEL_COLUMNS: [i32; CHANNEL_COUNT] = [21, 61, 101];

/// Width of a saturation bar on the overview.
pub const BAR_WIDTH: u32 = 38;

/// Offset of the channel label square from its column edge.
pub const LABEL_OFFSET_X: i32 = 15;

/// Side of the channel label square.
pub const LABEL_SIZE: u32 = 16;

/// Side of the navigation icon backdrop in the top-left corner.
pub const ICON_SIZE: u32 = 20;

/// Height of the bottom tabs on the edit screen.
pub const TAB_HEIGHT: u32 = 20;

const _: () = assert!(HISTORY_SIZE as u32 == SCREEN_WIDTH);
const _: () = assert!(CHANNEL_COLUMNS[CHANNEL_COUNT - 1] + BAR_WIDTH as i32 <= SCREEN_WIDTH as i32);
