#![forbid(unsafe_code)]

//! Page composition.
//!
//! [`Page`] wires the pieces together the way the portfolio mounts them:
//!
//! 1. The theme synchronizer starts at the root, before anything else.
//! 2. The loading gate holds back every section for the splash duration.
//! 3. When the gate opens, each section mounts its own reveal controller in
//!    document order. A section's reveal clock starts here, not at load.
//! 4. Scroll offsets drive the navigation chrome independently.
//!
//! The host drives everything through [`Page::tick`] and
//! [`Page::on_scroll`], and reads back a [`PageView`] for rendering.

use core::time::Duration;
use std::fmt;
use std::rc::Rc;

use folio_core::{Host, Theme};

use crate::config::{ConfigError, PageConfig};
use crate::contact::{ContactForm, ContactSubmission, FieldError};
use crate::loading::LoadingGate;
use crate::reveal::RevealController;
use crate::scroll::{ScrollChrome, ScrollRequest};
use crate::section::SectionId;
use crate::theme_sync::{ThemeError, ThemeHandle, ThemeSynchronizer};

/// A mounted section and its controller.
#[derive(Debug)]
struct MountedSection {
    id: SectionId,
    reveal: RevealController,
}

/// Render-facing snapshot of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionView {
    pub id: SectionId,
    pub visible: bool,
}

/// Render-facing snapshot of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// Splash screen still showing; `sections` is empty.
    pub loading: bool,
    pub theme: Theme,
    pub sections: Vec<SectionView>,
    pub nav_scrolled: bool,
    pub menu_open: bool,
    pub scroll_to_top_visible: bool,
}

/// The whole page.
pub struct Page<H: Host + 'static> {
    // Field order matters: sections release before the synchronizer.
    sections: Vec<MountedSection>,
    theme: ThemeSynchronizer,
    config: PageConfig,
    gate: LoadingGate,
    chrome: ScrollChrome,
    contact: ContactForm,
    host: Rc<H>,
}

impl<H: Host + 'static> Page<H> {
    /// Start the page at host time `now`.
    pub fn new(config: PageConfig, host: Rc<H>, now: Duration) -> Result<Self, PageError> {
        config.validate()?;
        let sink: Rc<dyn folio_core::PresentationSink> = host.clone();
        let theme = ThemeSynchronizer::start(&*host, sink)?;
        tracing::info!(
            theme = %theme.current(),
            loading_ms = config.loading_ms,
            "page started"
        );
        Ok(Self {
            sections: Vec::new(),
            theme,
            gate: LoadingGate::new(now, config.loading_duration()),
            chrome: ScrollChrome::new(config.nav_scroll_offset, config.scroll_to_top_offset),
            contact: ContactForm::new(),
            config,
            host,
        })
    }

    /// Advance to host time `now`. Returns `true` on the tick that mounts
    /// the sections.
    pub fn tick(&mut self, now: Duration) -> bool {
        if !self.gate.advance(now) {
            return false;
        }
        self.mount_sections();
        true
    }

    fn mount_sections(&mut self) {
        let host: &dyn folio_core::IntersectionHost = &*self.host;
        for id in SectionId::ALL {
            let policy = id.reveal_policy(&self.config);
            let reveal = RevealController::mount_with_policy(host, Some(id.element_id()), policy);
            tracing::debug!(section = %id, visible = reveal.is_visible(), "section mounted");
            self.sections.push(MountedSection { id, reveal });
        }
    }

    /// Record the document scroll offset.
    pub fn on_scroll(&mut self, offset_y: f64) {
        self.chrome.on_scroll(offset_y);
    }

    pub fn toggle_menu(&mut self) {
        self.chrome.toggle_menu();
    }

    /// Request a scroll to `section`; `None` while it is not mounted.
    pub fn navigate_to(&mut self, section: SectionId) -> Option<ScrollRequest> {
        let mounted = self.is_mounted(section);
        self.chrome.navigate_to(section, mounted)
    }

    pub fn scroll_to_top(&self) -> ScrollRequest {
        self.chrome.scroll_to_top()
    }

    pub fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    pub fn is_mounted(&self, section: SectionId) -> bool {
        self.sections.iter().any(|s| s.id == section)
    }

    /// Visibility of `section`, `None` while it is not mounted.
    pub fn section_visible(&self, section: SectionId) -> Option<bool> {
        self.sections
            .iter()
            .find(|s| s.id == section)
            .map(|s| s.reveal.is_visible())
    }

    /// Reveal class for `section`'s content.
    pub fn reveal_class(&self, section: SectionId) -> Option<&'static str> {
        self.sections
            .iter()
            .find(|s| s.id == section)
            .and_then(|s| s.reveal.reveal_class())
    }

    /// Theme accessor to hand to consumers.
    pub fn theme_handle(&self) -> ThemeHandle {
        self.theme.handle()
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    /// Submit the contact form to the configured endpoint.
    pub fn submit_contact(&mut self) -> Result<ContactSubmission, Vec<FieldError>> {
        self.contact.submit(&self.config.contact_endpoint)
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    pub fn view(&self) -> PageView {
        PageView {
            loading: !self.gate.is_ready(),
            theme: self.theme.current(),
            sections: self
                .sections
                .iter()
                .map(|s| SectionView {
                    id: s.id,
                    visible: s.reveal.is_visible(),
                })
                .collect(),
            nav_scrolled: self.chrome.nav_scrolled(),
            menu_open: self.chrome.menu_open(),
            scroll_to_top_visible: self.chrome.scroll_to_top_visible(),
        }
    }
}

impl<H: Host + 'static> fmt::Debug for Page<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("ready", &self.gate.is_ready())
            .field("theme", &self.theme)
            .field("sections", &self.sections)
            .finish_non_exhaustive()
    }
}

/// The page could not start.
#[derive(Debug)]
pub enum PageError {
    Config(ConfigError),
    Theme(ThemeError),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Theme(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Theme(err) => Some(err),
        }
    }
}

impl From<ConfigError> for PageError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ThemeError> for PageError {
    fn from(err: ThemeError) -> Self {
        Self::Theme(err)
    }
}
