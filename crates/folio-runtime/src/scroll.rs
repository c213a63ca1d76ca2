#![forbid(unsafe_code)]

//! Scroll-driven page chrome: navigation bar, mobile menu, scroll-to-top.
//!
//! Unlike section reveals these states follow the scroll offset in both
//! directions.

use crate::section::SectionId;

/// Offset past which the navigation bar switches to its compact style.
pub const NAV_SCROLLED_OFFSET: f64 = 50.0;
/// Offset past which the scroll-to-top button is shown.
pub const SCROLL_TO_TOP_OFFSET: f64 = 300.0;

/// Scroll the host should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    /// Smooth-scroll to the top of the document.
    Top,
    /// Smooth-scroll the section into view.
    Section(SectionId),
}

#[derive(Debug, Clone)]
pub struct ScrollChrome {
    nav_offset: f64,
    top_offset: f64,
    offset_y: f64,
    menu_open: bool,
}

impl Default for ScrollChrome {
    fn default() -> Self {
        Self::new(NAV_SCROLLED_OFFSET, SCROLL_TO_TOP_OFFSET)
    }
}

impl ScrollChrome {
    pub fn new(nav_offset: f64, top_offset: f64) -> Self {
        Self {
            nav_offset,
            top_offset,
            offset_y: 0.0,
            menu_open: false,
        }
    }

    /// Record the document's vertical scroll offset.
    pub fn on_scroll(&mut self, offset_y: f64) {
        self.offset_y = offset_y;
    }

    #[inline]
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    #[inline]
    pub fn nav_scrolled(&self) -> bool {
        self.offset_y > self.nav_offset
    }

    #[inline]
    pub fn scroll_to_top_visible(&self) -> bool {
        self.offset_y > self.top_offset
    }

    #[inline]
    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Jump to `section` if it is mounted. Closes the mobile menu on success;
    /// leaves everything untouched otherwise.
    pub fn navigate_to(&mut self, section: SectionId, mounted: bool) -> Option<ScrollRequest> {
        if !mounted {
            tracing::debug!(%section, "navigation target not mounted");
            return None;
        }
        self.menu_open = false;
        Some(ScrollRequest::Section(section))
    }

    pub fn scroll_to_top(&self) -> ScrollRequest {
        ScrollRequest::Top
    }
}
