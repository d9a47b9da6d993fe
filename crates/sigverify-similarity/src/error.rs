//! Error types for sigverify-similarity

use thiserror::Error;

/// Errors that can occur while computing image similarity
#[derive(Debug, Error)]
pub enum SimilarityError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] sigverify_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth {
        /// Expected depth description
        expected: &'static str,
        /// Actual depth in bits
        actual: u32,
    },

    /// The two images differ in size
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// The image has no position where the whole window fits
    #[error("image {width}x{height} is smaller than the {window}x{window} window")]
    ImageTooSmall { width: u32, height: u32, window: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for similarity operations
pub type SimilarityResult<T> = Result<T, SimilarityError>;
