//! sigverify-color - Luminance and binarization
//!
//! This crate turns decoded images into binary ink masks:
//!
//! - **Color space conversion** ([`colorspace`]): RGB(A) -> luminance
//! - **Thresholding** ([`threshold`]): fixed threshold and Otsu's method

pub mod colorspace;
pub mod error;
pub mod threshold;

// Re-export core types
pub use sigverify_core;

pub use error::{ColorError, ColorResult};

pub use colorspace::{flatten_alpha, pix_convert_to_gray, rgb_to_gray};

pub use threshold::{
    // Types
    Polarity,
    // Functions
    compute_otsu_threshold,
    threshold_otsu,
    threshold_to_binary,
};
