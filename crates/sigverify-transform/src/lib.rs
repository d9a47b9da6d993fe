//! sigverify-transform - Geometric transformations
//!
//! Resizing for the normalization pipeline:
//!
//! - Area mapping (anti-aliased downscaling)
//! - Bilinear interpolation (upscaling)
//! - Sampling (nearest neighbor)

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::{ScaleMethod, scale, scale_by_sampling, scale_to_size, scale_to_size_with};
