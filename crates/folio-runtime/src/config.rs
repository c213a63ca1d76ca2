#![forbid(unsafe_code)]

//! Page configuration.
//!
//! Every field has a default matching the shipped page, so a JSON document
//! only needs the keys it overrides:
//!
//! ```
//! use folio_runtime::config::PageConfig;
//!
//! let config = PageConfig::from_json(r#"{ "loading_ms": 1000 }"#).unwrap();
//! assert_eq!(config.loading_duration().as_millis(), 1000);
//! assert_eq!(config.reveal_threshold.to_string(), "0.3");
//! ```

use core::time::Duration;
use std::fmt;

use folio_core::{Threshold, ThresholdError};
use serde::{Deserialize, Serialize};

use crate::loading::DEFAULT_LOADING_DURATION;
use crate::scroll::{NAV_SCROLLED_OFFSET, SCROLL_TO_TOP_OFFSET};

/// Form endpoint the contact section posts to.
pub const DEFAULT_CONTACT_ENDPOINT: &str = "https://formspree.io/f/xeogbqyg";

/// Tunables of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Splash screen duration in milliseconds.
    pub loading_ms: u64,
    /// Reveal threshold for most sections.
    pub reveal_threshold: f64,
    /// Reveal threshold for the projects grid.
    pub projects_threshold: f64,
    /// Scroll offset (px) past which the navigation bar is compact.
    pub nav_scroll_offset: f64,
    /// Scroll offset (px) past which the scroll-to-top button shows.
    pub scroll_to_top_offset: f64,
    /// Form submission endpoint.
    pub contact_endpoint: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            loading_ms: DEFAULT_LOADING_DURATION.as_millis() as u64,
            reveal_threshold: Threshold::DEFAULT.get(),
            projects_threshold: Threshold::RELAXED.get(),
            nav_scroll_offset: NAV_SCROLLED_OFFSET,
            scroll_to_top_offset: SCROLL_TO_TOP_OFFSET,
            contact_endpoint: DEFAULT_CONTACT_ENDPOINT.to_owned(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Check every threshold and the endpoint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Threshold::new(self.reveal_threshold).map_err(ConfigError::Threshold)?;
        Threshold::new(self.projects_threshold).map_err(ConfigError::Threshold)?;
        if self.contact_endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_loading(mut self, duration: Duration) -> Self {
        self.loading_ms = duration.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_reveal_threshold(mut self, threshold: Threshold) -> Self {
        self.reveal_threshold = threshold.get();
        self
    }

    #[must_use]
    pub fn with_projects_threshold(mut self, threshold: Threshold) -> Self {
        self.projects_threshold = threshold.get();
        self
    }

    #[must_use]
    pub fn with_contact_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.contact_endpoint = endpoint.into();
        self
    }

    #[inline]
    pub fn loading_duration(&self) -> Duration {
        Duration::from_millis(self.loading_ms)
    }

    /// Reveal threshold, or the default if the field holds an invalid value.
    pub fn reveal_threshold(&self) -> Threshold {
        Threshold::new(self.reveal_threshold).unwrap_or(Threshold::DEFAULT)
    }

    /// Projects threshold, or the relaxed default if the field is invalid.
    pub fn projects_threshold(&self) -> Threshold {
        Threshold::new(self.projects_threshold).unwrap_or(Threshold::RELAXED)
    }
}

/// Invalid page configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON document could not be read.
    Parse(serde_json::Error),
    /// The config could not be written as JSON.
    Serialize(serde_json::Error),
    /// A threshold is outside `(0, 1]`.
    Threshold(ThresholdError),
    /// The contact endpoint is blank.
    EmptyEndpoint,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid page config: {err}"),
            Self::Serialize(err) => write!(f, "could not serialize page config: {err}"),
            Self::Threshold(err) => write!(f, "invalid page config: {err}"),
            Self::EmptyEndpoint => f.write_str("invalid page config: contact endpoint is empty"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) | Self::Serialize(err) => Some(err),
            Self::Threshold(err) => Some(err),
            Self::EmptyEndpoint => None,
        }
    }
}

impl From<ThresholdError> for ConfigError {
    fn from(err: ThresholdError) -> Self {
        Self::Threshold(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page() {
        let config = PageConfig::default();
        assert_eq!(config.loading_duration(), Duration::from_millis(2500));
        assert_eq!(config.reveal_threshold(), Threshold::DEFAULT);
        assert_eq!(config.projects_threshold(), Threshold::RELAXED);
        assert_eq!(config.nav_scroll_offset, 50.0);
        assert_eq!(config.scroll_to_top_offset, 300.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides() {
        let config = PageConfig::default()
            .with_loading(Duration::from_millis(10))
            .with_reveal_threshold(Threshold::FULL)
            .with_contact_endpoint("https://example.invalid/form");
        assert_eq!(config.loading_ms, 10);
        assert_eq!(config.reveal_threshold(), Threshold::FULL);
        assert_eq!(config.contact_endpoint, "https://example.invalid/form");
    }

    #[test]
    fn invalid_field_falls_back_in_accessor() {
        let config = PageConfig {
            reveal_threshold: 0.0,
            ..PageConfig::default()
        };
        assert_eq!(config.reveal_threshold(), Threshold::DEFAULT);
        assert!(matches!(config.validate(), Err(ConfigError::Threshold(_))));
    }

    #[test]
    fn read_and_write_failures_are_distinct() {
        let json_err = || serde_json::from_str::<u8>("x").unwrap_err();
        let read = ConfigError::Parse(json_err());
        let write = ConfigError::Serialize(json_err());
        assert!(read.to_string().starts_with("invalid page config: "));
        assert!(write.to_string().starts_with("could not serialize page config: "));
        assert!(std::error::Error::source(&write).is_some());
    }

    #[test]
    fn to_json_output_parses_back() {
        let config = PageConfig::default().with_projects_threshold(Threshold::FULL);
        let json = config.to_json().unwrap();
        assert_eq!(PageConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn blank_endpoint_rejected() {
        let config = PageConfig::default().with_contact_endpoint("  ");
        assert!(matches!(config.validate(), Err(ConfigError::EmptyEndpoint)));
    }
}
