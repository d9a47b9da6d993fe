//! sigverify - Handwritten signature verification
//!
//! Decides whether two signature images come from the same signer:
//! each image is cropped to its ink, binarized and resized to a
//! canonical 300x150 bitmap, then the two bitmaps are scored with the
//! structural similarity index against an acceptance threshold.
//!
//! # Example
//!
//! ```
//! use sigverify::{Pix, compare, normalize};
//!
//! // A dark bar on light paper
//! let mut bytes = vec![240u8; 64 * 32];
//! for y in 12..20 {
//!     for x in 10..54 {
//!         bytes[y * 64 + x] = 15;
//!     }
//! }
//! let page = Pix::from_gray_bytes(64, 32, &bytes).unwrap();
//!
//! let bitmap = normalize(&page).unwrap();
//! assert_eq!((bitmap.width(), bitmap.height()), (300, 150));
//!
//! let result = compare(&bitmap, &bitmap, 0.6).unwrap();
//! assert_eq!(result.percentage(), 100.0);
//! assert!(result.is_match());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use sigverify_core::*;

// Verification pipeline
pub use sigverify_verify::{
    CANONICAL_HEIGHT, CANONICAL_WIDTH, CanonicalBitmap, ComparisonResult, DEFAULT_PADDING,
    PreprocessOptions, Threshold, VerifierSession, VerifyError, VerifyResult, compare,
    compare_pix, normalize, normalize_bytes, normalize_path, preprocess, verify_files,
};

// Re-export domain crates as modules to avoid name conflicts
pub use sigverify_color as color;
pub use sigverify_io as io;
pub use sigverify_region as region;
pub use sigverify_similarity as similarity;
pub use sigverify_transform as transform;
pub use sigverify_verify as verify;
