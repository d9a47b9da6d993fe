//! Structural similarity index (SSIM)
//!
//! Compares luminance, contrast and structure of two grayscale images
//! window by window:
//!
//! ```text
//! S = ((2 mx my + C1) (2 sxy + C2)) / ((mx^2 + my^2 + C1) (sx + sy + C2))
//! C1 = (K1 L)^2, C2 = (K2 L)^2
//! ```
//!
//! The score is the mean of `S` over every position where the square
//! window lies entirely inside the image. Window statistics are unbiased
//! sample estimates taken from integral images.

use crate::windowed::WindowMoments;
use crate::{SimilarityError, SimilarityResult};
use sigverify_core::Pix;

/// Options for SSIM computation
#[derive(Debug, Clone)]
pub struct SsimOptions {
    /// Side of the uniform square window; odd and >= 3 (default: 7)
    pub window_size: u32,

    /// Luminance stabilizer coefficient (default: 0.01)
    pub k1: f64,

    /// Contrast stabilizer coefficient (default: 0.03)
    pub k2: f64,

    /// Dynamic range of the samples (default: 255.0)
    pub data_range: f64,
}

impl Default for SsimOptions {
    fn default() -> Self {
        Self {
            window_size: 7,
            k1: 0.01,
            k2: 0.03,
            data_range: 255.0,
        }
    }
}

impl SsimOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window size
    pub fn with_window_size(mut self, size: u32) -> Self {
        self.window_size = size;
        self
    }

    /// Set the stabilizer coefficients
    pub fn with_constants(mut self, k1: f64, k2: f64) -> Self {
        self.k1 = k1;
        self.k2 = k2;
        self
    }

    /// Set the data range
    pub fn with_data_range(mut self, range: f64) -> Self {
        self.data_range = range;
        self
    }

    /// Validate options
    pub fn validate(&self) -> SimilarityResult<()> {
        if self.window_size < 3 || self.window_size % 2 == 0 {
            return Err(SimilarityError::InvalidParameters(format!(
                "window_size must be odd and >= 3, got {}",
                self.window_size
            )));
        }
        if !(self.k1 > 0.0 && self.k1.is_finite()) || !(self.k2 > 0.0 && self.k2.is_finite()) {
            return Err(SimilarityError::InvalidParameters(
                "k1 and k2 must be positive".to_string(),
            ));
        }
        if !(self.data_range > 0.0 && self.data_range.is_finite()) {
            return Err(SimilarityError::InvalidParameters(
                "data_range must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn stabilizers(&self) -> (f64, f64) {
        let c1 = (self.k1 * self.data_range).powi(2);
        let c2 = (self.k2 * self.data_range).powi(2);
        (c1, c2)
    }
}

/// Mean structural similarity of two 8 bpp images of equal size.
///
/// Returns a value in `[-1.0, 1.0]`; identical images score exactly 1.0.
///
/// # Errors
///
/// - [`SimilarityError::InvalidParameters`] if `options` do not validate
/// - [`SimilarityError::UnsupportedDepth`] unless both images are 8 bpp
/// - [`SimilarityError::DimensionMismatch`] if the sizes differ
/// - [`SimilarityError::ImageTooSmall`] if the window does not fit
///
/// # Examples
///
/// ```
/// use sigverify_core::Pix;
/// use sigverify_similarity::{SsimOptions, ssim};
///
/// let bytes: Vec<u8> = (0..100u32).map(|i| (i * 7 % 256) as u8).collect();
/// let pix = Pix::from_gray_bytes(10, 10, &bytes).unwrap();
/// let score = ssim(&pix, &pix, &SsimOptions::default()).unwrap();
/// assert_eq!(score, 1.0);
/// ```
pub fn ssim(a: &Pix, b: &Pix, options: &SsimOptions) -> SimilarityResult<f64> {
    options.validate()?;
    let moments = WindowMoments::new(a, b)?;

    let win = options.window_size;
    let (w, h) = (moments.width(), moments.height());
    if w < win || h < win {
        return Err(SimilarityError::ImageTooSmall {
            width: w,
            height: h,
            window: win,
        });
    }

    let (c1, c2) = options.stabilizers();
    let mut total = 0.0f64;
    for y in 0..=(h - win) {
        for x in 0..=(w - win) {
            let st = moments.stats(x, y, win);
            let num =
                (2.0 * st.mean_x * st.mean_y + c1) * (2.0 * st.cov_xy + c2);
            let den = (st.mean_x * st.mean_x + st.mean_y * st.mean_y + c1)
                * (st.var_x + st.var_y + c2);
            total += num / den;
        }
    }

    let count = ((w - win + 1) as f64) * ((h - win + 1) as f64);
    let score = total / count;
    log::trace!(
        "ssim over {} windows ({}x{}, win {}): {}",
        count,
        w,
        h,
        win,
        score
    );
    Ok(score)
}
