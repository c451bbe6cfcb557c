//! View navigation for the multi-screen interface.
//!
//! Button `A` cycles through the views, button `X` flips between the pages of
//! a paged view.
//!
//! # Views
//!
//! | Index | View | Pages |
//! |-------|------|-------|
//! | 0 | Overview | [`Screen::Overview`] |
//! | 1..=N | Channel N | [`Screen::Detail`], [`Screen::Edit`] |
//!
//! While a paged view shows anything other than its first page, `A` is
//! ignored so the edit page cannot be left half-way.

use core::fmt;

use heapless::Vec;

use crate::config::CHANNEL_COUNT;

/// Most pages a single view can hold.
pub const MAX_PAGES: usize = 2;

/// Most views the navigation can hold.
pub const MAX_VIEWS: usize = CHANNEL_COUNT + 1;

/// A drawable screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Screen {
    /// Bars for every channel.
    Overview,
    /// Saturation history of one channel (0-based index).
    Detail(usize),
    /// Calibration readout of one channel (0-based index).
    Edit(usize),
}

impl fmt::Display for Screen {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Overview => f.write_str("Overview"),
            Self::Detail(idx) => write!(f, "Channel {} detail", idx + 1),
            Self::Edit(idx) => write!(f, "Channel {} edit", idx + 1),
        }
    }
}

/// A navigation stop: one screen, or several pages toggled with `X`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum View {
    Single(Screen),
    Paged(Vec<Screen, MAX_PAGES>),
}

impl View {
    fn page_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Paged(pages) => pages.len(),
        }
    }

    fn page(
        &self,
        subview: usize,
    ) -> Screen {
        match self {
            Self::Single(screen) => *screen,
            Self::Paged(pages) => pages.get(subview).copied().unwrap_or(Screen::Overview),
        }
    }
}

/// Current position in the view list.
pub struct Navigation {
    views: Vec<View, MAX_VIEWS>,
    current_view: usize,
    current_subview: usize,
}

impl Navigation {
    /// Overview followed by a detail/edit view for each of `count` channels.
    ///
    /// Channels beyond [`CHANNEL_COUNT`] are ignored.
    pub fn for_channels(count: usize) -> Self {
        let mut views = Vec::new();
        views.push(View::Single(Screen::Overview)).ok();
        for idx in 0..count.min(CHANNEL_COUNT) {
            let mut pages = Vec::new();
            pages.push(Screen::Detail(idx)).ok();
            pages.push(Screen::Edit(idx)).ok();
            views.push(View::Paged(pages)).ok();
        }

        Self {
            views,
            current_view: 0,
            current_subview: 0,
        }
    }

    /// Advance to the next view, wrapping at the end.
    ///
    /// Returns `false` without moving while a non-first page is shown.
    pub fn next(&mut self) -> bool {
        if self.current_subview != 0 {
            return false;
        }
        self.current_view = (self.current_view + 1) % self.views.len();
        self.current_subview = 0;
        true
    }

    /// Flip to the next page of a paged view. No effect on single views.
    pub fn toggle_subview(&mut self) {
        let pages = self.view().page_count();
        if pages > 1 {
            self.current_subview = (self.current_subview + 1) % pages;
        }
    }

    /// Screen to draw.
    pub fn screen(&self) -> Screen { self.view().page(self.current_subview) }

    #[inline]
    pub const fn current_view(&self) -> usize { self.current_view }

    #[inline]
    pub const fn current_subview(&self) -> usize { self.current_subview }

    /// Number of views.
    #[inline]
    pub fn len(&self) -> usize { self.views.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.views.is_empty() }

    fn view(&self) -> &View { &self.views[self.current_view] }
}

impl Default for Navigation {
    fn default() -> Self { Self::for_channels(CHANNEL_COUNT) }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let nav = Navigation::default();
        assert_eq!(nav.len(), 4);
        assert_eq!(nav.screen(), Screen::Overview);
        assert_eq!(nav.current_view(), 0);
        assert_eq!(nav.current_subview(), 0);
    }

    #[test]
    fn test_next_cycles_and_wraps() {
        let mut nav = Navigation::default();
        let mut seen = Vec::<Screen, 8>::new();
        for _ in 0..5 {
            assert!(nav.next());
            seen.push(nav.screen()).ok();
        }
        assert_eq!(
            seen.as_slice(),
            &[Screen::Detail(0), Screen::Detail(1), Screen::Detail(2), Screen::Overview, Screen::Detail(0)]
        );
    }

    #[test]
    fn test_toggle_subview_on_paged_view() {
        let mut nav = Navigation::default();
        nav.next();
        nav.toggle_subview();
        assert_eq!(nav.screen(), Screen::Edit(0));
        nav.toggle_subview();
        assert_eq!(nav.screen(), Screen::Detail(0));
    }

    #[test]
    fn test_toggle_subview_on_single_view_is_noop() {
        let mut nav = Navigation::default();
        nav.toggle_subview();
        assert_eq!(nav.current_subview(), 0);
        assert_eq!(nav.screen(), Screen::Overview);
    }

    #[test]
    fn test_next_blocked_on_edit_page() {
        let mut nav = Navigation::default();
        nav.next();
        nav.toggle_subview();
        assert!(!nav.next());
        assert_eq!(nav.screen(), Screen::Edit(0));
        assert_eq!(nav.current_view(), 1);
    }

    #[test]
    fn test_fewer_channels() {
        let mut nav = Navigation::for_channels(1);
        assert_eq!(nav.len(), 2);
        nav.next();
        nav.next();
        assert_eq!(nav.screen(), Screen::Overview);
    }

    #[test]
    fn test_screen_names() {
        assert_eq!(Screen::Overview.to_string(), "Overview");
        assert_eq!(Screen::Detail(1).to_string(), "Channel 2 detail");
        assert_eq!(Screen::Edit(0).to_string(), "Channel 1 edit");
    }
}
