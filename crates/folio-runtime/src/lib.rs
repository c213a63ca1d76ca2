#![forbid(unsafe_code)]

//! Runtime: the behaviour of the portfolio page, driven by a host.
//!
//! - [`reveal`]: one-shot reveal-on-scroll latch per section.
//! - [`theme_sync`]: single-writer light/dark theme with consumer handles.
//! - [`loading`]: fixed-duration splash gate.
//! - [`scroll`]: navigation and scroll-to-top chrome.
//! - [`contact`]: contact form state and validation.
//! - [`page`]: composition of all of the above.

pub mod config;
pub mod contact;
pub mod loading;
pub mod page;
pub mod reveal;
pub mod scroll;
pub mod section;
pub mod theme_sync;

#[cfg(test)]
mod test_host;

pub use config::{ConfigError, PageConfig};
pub use contact::{ContactField, ContactForm, ContactSubmission, FieldError, FieldErrorKind};
pub use loading::{LoadingGate, LoadingPhase};
pub use page::{Page, PageError, PageView, SectionView};
pub use reveal::{RevealController, RevealMode, RevealPolicy};
pub use scroll::{ScrollChrome, ScrollRequest};
pub use section::{NAV_ITEMS, NavItem, SectionId};
pub use theme_sync::{ThemeError, ThemeHandle, ThemeSynchronizer};
