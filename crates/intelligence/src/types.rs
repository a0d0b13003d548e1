//! Common types shared across recommendation modules.

use serde::{Deserialize, Serialize};

/// Learned match score clamped to the [0.0, 1.0] range.
///
/// The learned scorer's sigmoid output is wrapped in this newtype so a
/// malformed model can never leak values outside the documented scale.
///
/// # Examples
///
/// ```
/// use learnhub_intelligence::Confidence;
///
/// let c = Confidence::new(0.75);
/// assert_eq!(c.value(), 0.75);
///
/// assert_eq!(Confidence::new(1.5).value(), 1.0);
/// assert_eq!(Confidence::new(-0.5).value(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Create a new Confidence, clamping the value to [0.0, 1.0].
    ///
    /// NaN collapses to zero.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the inner value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// The value as a percentage in [0, 100].
    #[must_use]
    pub fn as_percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(conf: Confidence) -> Self {
        conf.0
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.as_percent())
    }
}
