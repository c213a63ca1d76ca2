#![forbid(unsafe_code)]

//! Host capability boundary.
//!
//! The runtime never touches a document or a window directly. Everything it
//! needs from the embedding environment goes through three traits:
//!
//! | Trait | Capability |
//! |-------|------------|
//! | [`IntersectionHost`] | "tell me when element E's visible fraction crosses T" |
//! | [`ColorSchemeHost`] | "what is the system color scheme, and tell me when it changes" |
//! | [`PresentationSink`] | "set this document-global attribute" |
//!
//! Hosts are single-threaded and hand out callbacks from their own event
//! loop, so methods take `&self` and implementations use interior
//! mutability. Callbacks must be short and must not block.
//!
//! A host that lacks a capability returns [`CapabilityError::Unavailable`];
//! callers decide how to degrade.

use std::fmt;

use bitflags::bitflags;

use crate::subscription::Subscription;
use crate::theme::Theme;
use crate::threshold::Threshold;

bitflags! {
    /// Capabilities an embedding advertises.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HostFeatures: u8 {
        /// Element/viewport intersection observation.
        const INTERSECTION = 1 << 0;
        /// `prefers-color-scheme` query and change notifications.
        const COLOR_SCHEME = 1 << 1;
    }
}

impl Default for HostFeatures {
    fn default() -> Self {
        Self::all()
    }
}

/// Identifier of an element in the host document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One intersection report for an observed element.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    /// Visible fraction of the element's area, in `[0, 1]`.
    pub ratio: f64,
    /// Whether any part of the element is inside the viewport.
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn new(target: ElementId, ratio: f64) -> Self {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        Self {
            target,
            ratio,
            is_intersecting: ratio > 0.0,
        }
    }
}

/// What an intersection callback wants the host to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserveFlow {
    /// Keep delivering reports.
    Continue,
    /// Stop observing this element; the callback is never called again.
    Disconnect,
}

/// Intersection callback. Invoked on the host's event loop.
pub type IntersectionCallback = Box<dyn FnMut(&IntersectionEntry) -> ObserveFlow>;

/// Color-scheme change callback. Receives the newly reported scheme.
pub type SchemeCallback = Box<dyn FnMut(Theme)>;

/// Viewport intersection observation.
pub trait IntersectionHost {
    /// Start observing `target`. The host delivers one report with the
    /// current fraction on its next delivery pass after registration, then
    /// one whenever the fraction crosses `threshold` or the element enters or
    /// leaves the viewport.
    fn observe(
        &self,
        target: &ElementId,
        threshold: Threshold,
        callback: IntersectionCallback,
    ) -> Result<Subscription, CapabilityError>;
}

/// System color-scheme preference.
pub trait ColorSchemeHost {
    /// Current preference.
    fn query(&self) -> Result<Theme, CapabilityError>;

    /// Subscribe to preference changes.
    fn watch(&self, callback: SchemeCallback) -> Result<Subscription, CapabilityError>;
}

/// Document-global presentation attributes.
pub trait PresentationSink {
    fn set_document_attribute(&self, name: &str, value: &str);
}

/// Everything a page needs from its embedding, in one bound.
pub trait Host: IntersectionHost + ColorSchemeHost + PresentationSink {}

impl<T: IntersectionHost + ColorSchemeHost + PresentationSink> Host for T {}

/// A host capability could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityError {
    /// The host does not provide the named capability.
    Unavailable(&'static str),
}

impl fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(what) => write!(f, "host capability unavailable: {what}"),
        }
    }
}

impl std::error::Error for CapabilityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_clamps_ratio() {
        let e = IntersectionEntry::new("about".into(), 1.7);
        assert_eq!(e.ratio, 1.0);
        assert!(e.is_intersecting);

        let e = IntersectionEntry::new("about".into(), -0.2);
        assert_eq!(e.ratio, 0.0);
        assert!(!e.is_intersecting);
    }

    #[test]
    fn entry_treats_nan_as_hidden() {
        let e = IntersectionEntry::new("about".into(), f64::NAN);
        assert_eq!(e.ratio, 0.0);
    }

    #[test]
    fn default_features_are_complete() {
        let f = HostFeatures::default();
        assert!(f.contains(HostFeatures::INTERSECTION | HostFeatures::COLOR_SCHEME));
    }

    #[test]
    fn element_id_round_trips_str() {
        let id = ElementId::from("contact");
        assert_eq!(id.as_str(), "contact");
        assert_eq!(id.to_string(), "contact");
    }

    #[test]
    fn capability_error_names_capability() {
        let err = CapabilityError::Unavailable("IntersectionObserver");
        assert_eq!(
            err.to_string(),
            "host capability unavailable: IntersectionObserver"
        );
    }
}
