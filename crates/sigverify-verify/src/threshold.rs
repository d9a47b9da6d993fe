//! Acceptance threshold

use crate::{VerifyError, VerifyResult};
use std::fmt;

/// Minimum similarity score for a "match" verdict.
///
/// Always within `[Threshold::MIN, Threshold::MAX]`.
///
/// # Examples
///
/// ```
/// use sigverify_verify::Threshold;
///
/// let t = Threshold::new(0.75).unwrap();
/// assert!(t.accepts(0.8));
/// assert!(!t.accepts(0.7));
/// assert!(Threshold::new(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    pub const MIN: f64 = 0.1;
    pub const MAX: f64 = 1.0;
    pub const DEFAULT: f64 = 0.6;

    /// Validate a threshold value.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidThreshold`] for values outside
    /// `[0.1, 1.0]` and for NaN.
    pub fn new(value: f64) -> VerifyResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Threshold(value))
        } else {
            Err(VerifyError::InvalidThreshold(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether `score` reaches this threshold.
    pub fn accepts(self, score: f64) -> bool {
        score >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold(Self::DEFAULT)
    }
}

impl TryFrom<f64> for Threshold {
    type Error = VerifyError;

    fn try_from(value: f64) -> VerifyResult<Self> {
        Threshold::new(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
