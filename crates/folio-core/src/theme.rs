#![forbid(unsafe_code)]

//! Light/dark theme value.
//!
//! The page only ever distinguishes two color schemes. The value is written
//! to the document as the `data-theme` attribute so stylesheet layers can
//! react without going through component state.
//!
//! # Example
//! ```
//! use folio_core::theme::Theme;
//!
//! let theme = Theme::from_prefers_dark(true);
//! assert_eq!(theme, Theme::Dark);
//! assert_eq!(theme.as_str(), "dark");
//! assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
//! ```

use std::fmt;
use std::str::FromStr;

/// Color scheme of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    /// Light scheme. Used whenever the host cannot report a preference.
    #[default]
    Light,
    /// Dark scheme.
    Dark,
}

impl Theme {
    /// Document attribute that mirrors the current theme.
    pub const ATTRIBUTE: &'static str = "data-theme";

    /// Map a `prefers-color-scheme: dark` match result to a theme.
    #[inline]
    pub const fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    /// Attribute value for this theme.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[inline]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// The opposite scheme.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a theme name fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemeError(String);

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme {:?} (expected \"light\" or \"dark\")", self.0)
    }
}

impl std::error::Error for ParseThemeError {}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("light") => Ok(Self::Light),
            s if s.eq_ignore_ascii_case("dark") => Ok(Self::Dark),
            other => Err(ParseThemeError(other.to_owned())),
        }
    }
}
