#![forbid(unsafe_code)]

//! Visibility thresholds for reveal-on-scroll.

use std::fmt;

/// Fraction of an element's area that must be on screen, in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// Threshold used by most sections.
    pub const DEFAULT: Self = Self(0.3);
    /// Threshold for tall sections (project grid) that rarely fit on screen.
    pub const RELAXED: Self = Self(0.2);
    /// Element must be entirely visible.
    pub const FULL: Self = Self(1.0);

    /// Validate a threshold. Zero, negatives, values above one and NaN are
    /// rejected.
    pub fn new(value: f64) -> Result<Self, ThresholdError> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(ThresholdError::OutOfRange(value))
        }
    }

    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Whether a reported intersection ratio satisfies this threshold.
    #[inline]
    pub fn is_met(self, ratio: f64) -> bool {
        ratio >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Invalid threshold value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdError {
    /// Value outside `(0, 1]`.
    OutOfRange(f64),
}

impl fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(v) => write!(f, "threshold {v} is outside (0, 1]"),
        }
    }
}

impl std::error::Error for ThresholdError {}
