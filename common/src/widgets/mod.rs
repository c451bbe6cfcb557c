//! Widget components for the plant monitor display.
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>` for platform independence.

mod gauge;
mod graph;
mod primitives;

pub use gauge::{GaugeData, draw_gauge};
pub use graph::{draw_alarm_line, draw_history_graph};
pub use primitives::{draw_nav_icon, draw_tab, fill};
