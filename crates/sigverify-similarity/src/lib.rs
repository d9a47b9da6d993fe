//! sigverify-similarity - Structural similarity between grayscale images
//!
//! - [`IntegralImage`]: summed area tables for O(1) window sums
//! - [`ssim`]: mean structural similarity index over a sliding window

mod error;
pub mod ssim;
pub mod windowed;

pub use error::{SimilarityError, SimilarityResult};
pub use ssim::{SsimOptions, ssim};
pub use windowed::{IntegralImage, WindowMoments, WindowStats};
