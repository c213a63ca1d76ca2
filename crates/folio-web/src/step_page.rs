#![forbid(unsafe_code)]

//! Step-based page runner.
//!
//! [`StepPage`] drives a [`Page`] over a [`WebHost`] without threads or
//! blocking. The host (JavaScript) controls the loop:
//!
//! 1. Push layout and scroll via [`StepPage::host`] / [`StepPage::scroll_to`].
//! 2. Advance time via [`StepPage::advance_time`].
//! 3. Call [`StepPage::step`] to open the loading gate when due and deliver
//!    pending intersection reports.
//! 4. Read [`StepPage::view`] and render.
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use folio_runtime::{PageConfig, SectionId};
//! use folio_web::{StepPage, WebHost};
//!
//! let mut page = StepPage::new(PageConfig::default(), WebHost::new(1280.0, 800.0)).unwrap();
//! page.host().stack_sections(&[(SectionId::Hero, 800.0), (SectionId::About, 900.0)]);
//!
//! page.advance_time(Duration::from_millis(2500));
//! let result = page.step();
//! assert!(result.mounted);
//! assert_eq!(page.view().sections.len(), SectionId::ALL.len());
//! ```

use core::time::Duration;
use std::rc::Rc;

use folio_runtime::{Page, PageConfig, PageError, PageView, ScrollRequest, SectionId};

use crate::{DeterministicClock, WebHost};

/// Result of a single [`StepPage::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Loading gate is open.
    pub ready: bool,
    /// Sections mounted during this step.
    pub mounted: bool,
    /// Sections currently visible.
    pub visible: usize,
    /// Step index (monotonically increasing).
    pub step_idx: u64,
}

/// Host-driven, non-blocking page runner.
pub struct StepPage {
    page: Page<WebHost>,
    clock: DeterministicClock,
    step_idx: u64,
}

impl StepPage {
    /// Start the page at time zero.
    pub fn new(config: PageConfig, host: WebHost) -> Result<Self, PageError> {
        let clock = DeterministicClock::new();
        let page = Page::new(config, Rc::new(host), clock.now())?;
        Ok(Self {
            page,
            clock,
            step_idx: 0,
        })
    }

    pub fn host(&self) -> &WebHost {
        self.page.host()
    }

    pub fn page(&self) -> &Page<WebHost> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page<WebHost> {
        &mut self.page
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Open the gate if due, then deliver pending reports.
    pub fn step(&mut self) -> StepResult {
        self.step_idx += 1;
        let mounted = self.page.tick(self.clock.now());
        self.page.host().flush();
        let view = self.page.view();
        let result = StepResult {
            ready: !view.loading,
            mounted,
            visible: view.sections.iter().filter(|s| s.visible).count(),
            step_idx: self.step_idx,
        };
        tracing::trace!(
            step = result.step_idx,
            ready = result.ready,
            visible = result.visible,
            "page step"
        );
        result
    }

    /// Scroll the document to `y` and update the chrome.
    pub fn scroll_to(&mut self, y: f64) {
        let host = self.page.host();
        host.scroll_to(y);
        let offset = host.viewport().scroll_y();
        self.page.on_scroll(offset);
    }

    /// Carry out a scroll the page requested. Jumps are instant here; the
    /// smooth animation belongs to the embedding.
    pub fn perform(&mut self, request: ScrollRequest) {
        match request {
            ScrollRequest::Top => self.scroll_to(0.0),
            ScrollRequest::Section(section) => {
                if let Some(rect) = self.page.host().viewport().element(&section.element_id()) {
                    self.scroll_to(rect.y);
                }
            }
        }
    }

    /// Navigate to `section` and perform the resulting scroll, if any.
    pub fn navigate_to(&mut self, section: SectionId) -> bool {
        match self.page.navigate_to(section) {
            Some(request) => {
                self.perform(request);
                true
            }
            None => false,
        }
    }

    pub fn view(&self) -> PageView {
        self.page.view()
    }
}
