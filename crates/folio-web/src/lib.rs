#![forbid(unsafe_code)]

//! `folio-web` provides a host-driven backend for the folio runtime.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes scroll
//!   offsets, layout, and color-scheme changes.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! The same [`WebHost`] serves as the injectable fake in tests: every
//! capability can be switched off through [`HostFeatures`] to exercise the
//! fail-open paths.

pub mod color_scheme;
pub mod document;
pub mod step_page;
pub mod viewport;

use core::time::Duration;
use std::cell::Cell;
use std::rc::Rc;

use folio_core::host::{IntersectionCallback, SchemeCallback};
use folio_core::{
    CapabilityError, ColorSchemeHost, ElementId, HostFeatures, IntersectionHost,
    PresentationSink, Rect, Subscription, Theme, Threshold,
};
use folio_runtime::SectionId;

pub use color_scheme::ColorScheme;
pub use document::{AttributeWrite, DocumentAttributes};
pub use step_page::{StepPage, StepResult};
pub use viewport::Viewport;

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    #[inline]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

/// In-process host: viewport, color scheme, and document attributes.
pub struct WebHost {
    features: HostFeatures,
    viewport: Viewport,
    scheme: ColorScheme,
    document: DocumentAttributes,
}

impl WebHost {
    /// Host with a `width × height` viewport, light system scheme, and every
    /// capability enabled.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let ids = Rc::new(Cell::new(1));
        Self {
            features: HostFeatures::all(),
            viewport: Viewport::new(width, height, Rc::clone(&ids)),
            scheme: ColorScheme::new(Theme::Light, ids),
            document: DocumentAttributes::new(),
        }
    }

    /// Restrict the advertised capabilities.
    #[must_use]
    pub fn with_features(mut self, features: HostFeatures) -> Self {
        self.features = features;
        self
    }

    /// Start with the given system scheme.
    #[must_use]
    pub fn with_color_scheme(self, theme: Theme) -> Self {
        self.scheme.set(theme);
        self
    }

    #[inline]
    pub fn features(&self) -> HostFeatures {
        self.features
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn color_scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    pub fn document(&self) -> &DocumentAttributes {
        &self.document
    }

    /// Stack `sections` top to bottom from `y = 0`, full viewport width.
    pub fn stack_sections(&self, sections: &[(SectionId, f64)]) {
        let width = self.viewport.rect().width;
        let mut y = 0.0;
        for &(section, height) in sections {
            self.viewport
                .place(section.element_id(), Rect::new(0.0, y, width, height));
            y += height.max(0.0);
        }
    }

    /// Scroll the viewport and deliver reports.
    pub fn scroll_to(&self, y: f64) {
        self.viewport.scroll_to(y);
    }

    /// Deliver pending intersection reports.
    pub fn flush(&self) {
        self.viewport.flush();
    }

    /// Inject a raw intersection ratio for `id`.
    pub fn report_ratio(&self, id: &str, ratio: f64) {
        self.viewport.report(&ElementId::new(id), ratio);
    }

    /// Change the system color scheme, notifying watchers if it changed.
    pub fn set_color_scheme(&self, theme: Theme) -> bool {
        self.scheme.set(theme)
    }

    /// Current `data-theme` attribute.
    pub fn theme_attribute(&self) -> Option<String> {
        self.document.get(Theme::ATTRIBUTE)
    }
}

impl IntersectionHost for WebHost {
    fn observe(
        &self,
        target: &ElementId,
        threshold: Threshold,
        callback: IntersectionCallback,
    ) -> Result<Subscription, CapabilityError> {
        if !self.features.contains(HostFeatures::INTERSECTION) {
            return Err(CapabilityError::Unavailable("IntersectionObserver"));
        }
        Ok(self.viewport.observe(target, threshold, callback))
    }
}

impl ColorSchemeHost for WebHost {
    fn query(&self) -> Result<Theme, CapabilityError> {
        if !self.features.contains(HostFeatures::COLOR_SCHEME) {
            return Err(CapabilityError::Unavailable("matchMedia"));
        }
        Ok(self.scheme.current())
    }

    fn watch(&self, callback: SchemeCallback) -> Result<Subscription, CapabilityError> {
        if !self.features.contains(HostFeatures::COLOR_SCHEME) {
            return Err(CapabilityError::Unavailable("matchMedia"));
        }
        Ok(self.scheme.watch(callback))
    }
}

impl PresentationSink for WebHost {
    fn set_document_attribute(&self, name: &str, value: &str) {
        self.document.set(name, value);
    }
}
