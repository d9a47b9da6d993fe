//! Similarity scoring and verdicts

use crate::bitmap::CanonicalBitmap;
use crate::threshold::Threshold;
use crate::{VerifyError, VerifyResult};
use sigverify_core::Pix;
use sigverify_similarity::{SsimOptions, ssim};
use std::fmt;

/// Outcome of one comparison. Immutable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonResult {
    score: f64,
    verdict: bool,
}

impl ComparisonResult {
    /// Structural similarity in `[-1.0, 1.0]`
    pub fn score(&self) -> f64 {
        self.score
    }

    /// `true` when the score reached the threshold
    pub fn is_match(&self) -> bool {
        self.verdict
    }

    /// Score as a percentage rounded to two decimals.
    pub fn percentage(&self) -> f64 {
        (self.score * 100.0 * 100.0).round() / 100.0
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "similarity {:.2}% ({})",
            self.percentage(),
            if self.verdict { "match" } else { "no match" }
        )
    }
}

/// Compare two canonical bitmaps.
///
/// `threshold` may be an `f64` or a [`Threshold`]; it is validated before
/// anything else.
///
/// # Errors
///
/// - [`VerifyError::InvalidThreshold`] if the threshold is outside `[0.1, 1.0]`
/// - [`VerifyError::DimensionMismatch`] if the bitmaps differ in size
pub fn compare<T>(
    a: &CanonicalBitmap,
    b: &CanonicalBitmap,
    threshold: T,
) -> VerifyResult<ComparisonResult>
where
    T: TryInto<Threshold>,
    VerifyError: From<T::Error>,
{
    let threshold: Threshold = threshold.try_into()?;
    score_pix(a.as_pix(), b.as_pix(), threshold)
}

/// Compare two 8 bpp bitmaps of equal size, e.g. the output of
/// [`preprocess`](crate::preprocess) with non-default options.
///
/// Same checks, in the same order, as [`compare`].
pub fn compare_pix<T>(a: &Pix, b: &Pix, threshold: T) -> VerifyResult<ComparisonResult>
where
    T: TryInto<Threshold>,
    VerifyError: From<T::Error>,
{
    let threshold: Threshold = threshold.try_into()?;
    score_pix(a, b, threshold)
}

/// Score two bitmaps against an already validated threshold.
pub(crate) fn score_pix(a: &Pix, b: &Pix, threshold: Threshold) -> VerifyResult<ComparisonResult> {
    if !a.sizes_equal(b) {
        return Err(VerifyError::DimensionMismatch {
            expected: (a.width(), a.height()),
            actual: (b.width(), b.height()),
        });
    }

    let score = ssim(a, b, &SsimOptions::default())?;
    let result = ComparisonResult {
        score,
        verdict: threshold.accepts(score),
    };
    log::debug!("{} at threshold {}", result, threshold);
    Ok(result)
}
