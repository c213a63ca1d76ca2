#![forbid(unsafe_code)]

//! Core: theme value, page geometry, reveal thresholds, and the host
//! capability boundary shared by the runtime and the host backends.

pub mod geometry;
pub mod host;
pub mod logging;
pub mod subscription;
pub mod theme;
pub mod threshold;

pub use geometry::Rect;
pub use host::{
    CapabilityError, ColorSchemeHost, ElementId, Host, HostFeatures, IntersectionEntry,
    IntersectionCallback, IntersectionHost, ObserveFlow, PresentationSink, SchemeCallback,
};
pub use subscription::{SubId, Subscription};
pub use theme::Theme;
pub use threshold::{Threshold, ThresholdError};
