#![forbid(unsafe_code)]

//! folio public facade crate.
//!
//! Re-exports the types a portfolio embedding needs from the internal crates
//! and offers a small prelude. With the default `web` feature the
//! deterministic [`WebHost`] backend and its [`StepPage`] runner are
//! included.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use folio_core::logging::{LogConfig, LogFormat, LogInitError};
pub use folio_core::{
    CapabilityError, ColorSchemeHost, ElementId, Host, HostFeatures, IntersectionEntry,
    IntersectionHost, ObserveFlow, PresentationSink, Rect, Subscription, Theme, Threshold,
    ThresholdError,
};

// --- Runtime re-exports ----------------------------------------------------

pub use folio_runtime::{
    ConfigError, ContactField, ContactForm, ContactSubmission, FieldError, FieldErrorKind,
    LoadingGate, LoadingPhase, NAV_ITEMS, NavItem, Page, PageConfig, PageError, PageView,
    RevealController, RevealMode, RevealPolicy, ScrollChrome, ScrollRequest, SectionId,
    SectionView, ThemeError, ThemeHandle, ThemeSynchronizer,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use folio_web::{DeterministicClock, StepPage, StepResult, WebHost};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for folio embeddings.
#[derive(Debug)]
pub enum Error {
    /// A host capability is missing where it was required.
    Capability(CapabilityError),
    /// Theme accessor misuse.
    Theme(ThemeError),
    /// Reveal threshold outside `(0, 1]`.
    Threshold(ThresholdError),
    /// Invalid page configuration.
    Config(ConfigError),
    /// The contact form was rejected.
    Contact(Vec<FieldError>),
    /// Tracing subscriber could not be installed.
    Logging(LogInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capability(err) => write!(f, "{err}"),
            Self::Theme(err) => write!(f, "{err}"),
            Self::Threshold(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Contact(errs) => {
                f.write_str("contact form rejected")?;
                for (i, err) in errs.iter().enumerate() {
                    f.write_str(if i == 0 { ": " } else { "; " })?;
                    write!(f, "{err}")?;
                }
                Ok(())
            }
            Self::Logging(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Capability(err) => Some(err),
            Self::Theme(err) => Some(err),
            Self::Threshold(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Contact(errs) => errs.first().map(|e| e as &(dyn std::error::Error + 'static)),
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<CapabilityError> for Error {
    fn from(err: CapabilityError) -> Self {
        Self::Capability(err)
    }
}

impl From<ThemeError> for Error {
    fn from(err: ThemeError) -> Self {
        Self::Theme(err)
    }
}

impl From<ThresholdError> for Error {
    fn from(err: ThresholdError) -> Self {
        Self::Threshold(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<PageError> for Error {
    fn from(err: PageError) -> Self {
        match err {
            PageError::Config(err) => Self::Config(err),
            PageError::Theme(err) => Self::Theme(err),
        }
    }
}

impl From<Vec<FieldError>> for Error {
    fn from(errs: Vec<FieldError>) -> Self {
        Self::Contact(errs)
    }
}

impl From<LogInitError> for Error {
    fn from(err: LogInitError) -> Self {
        Self::Logging(err)
    }
}

/// Standard result type for folio APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, Page, PageConfig, PageView, Result, RevealController, ScrollRequest, SectionId,
        Theme, ThemeHandle, ThemeSynchronizer, Threshold,
    };

    #[cfg(feature = "web")]
    pub use crate::{StepPage, WebHost};

    pub use crate::{core, runtime};

    #[cfg(feature = "web")]
    pub use crate::web;
}

pub use folio_core as core;
pub use folio_runtime as runtime;
#[cfg(feature = "web")]
pub use folio_web as web;
