//! Full-screen layouts.
//!
//! Each screen clears the frame and draws itself from a small data struct, so
//! rendering depends on nothing but its inputs.

mod detail;
mod edit;
mod overview;

pub use detail::{DetailData, draw_detail_screen};
pub use edit::{EditData, draw_edit_screen};
pub use overview::draw_overview_screen;
