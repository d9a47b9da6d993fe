//! sigverify-verify - Signature normalization and verification
//!
//! Two stages, used in sequence per comparison:
//!
//! - [`normalize`]: raw image -> [`CanonicalBitmap`] (300x150, ink 255 on 0)
//! - [`compare`]: two canonical bitmaps -> [`ComparisonResult`] (SSIM score
//!   and accept/reject verdict against a [`Threshold`])
//!
//! # Examples
//!
//! ```no_run
//! use sigverify_verify::{Threshold, verify_files};
//!
//! let result = verify_files("reference.png", "test.jpg", Threshold::DEFAULT)?;
//! println!("{}", result);
//! # Ok::<(), sigverify_verify::VerifyError>(())
//! ```

pub mod bitmap;
mod error;
pub mod preprocess;
pub mod scorer;
pub mod session;
pub mod threshold;

pub use bitmap::{CANONICAL_HEIGHT, CANONICAL_WIDTH, CanonicalBitmap};
pub use error::{VerifyError, VerifyResult};
pub use preprocess::{
    DEFAULT_PADDING, PreprocessOptions, crop_box, normalize, normalize_bytes, normalize_path,
    preprocess,
};
pub use scorer::{ComparisonResult, compare, compare_pix};
pub use session::VerifierSession;
pub use threshold::Threshold;

use std::path::Path;

/// Normalize two image files and compare them.
///
/// The threshold is validated before either file is read.
pub fn verify_files<P, Q, T>(reference: P, test: Q, threshold: T) -> VerifyResult<ComparisonResult>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    T: TryInto<Threshold>,
    VerifyError: From<T::Error>,
{
    let threshold: Threshold = threshold.try_into()?;
    let reference = normalize_path(reference)?;
    let test = normalize_path(test)?;
    scorer::score_pix(reference.as_pix(), test.as_pix(), threshold)
}
