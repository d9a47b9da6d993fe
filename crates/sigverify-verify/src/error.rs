//! Error types for sigverify-verify

use sigverify_color::ColorError;
use sigverify_io::IoError;
use sigverify_region::RegionError;
use sigverify_similarity::SimilarityError;
use sigverify_transform::TransformError;
use std::convert::Infallible;
use thiserror::Error;

/// Errors that can occur while normalizing or comparing signatures
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The input could not be decoded as an image
    #[error("failed to decode image: {0}")]
    DecodeError(#[from] IoError),

    /// No ink was found after binarization
    #[error("no signature detected")]
    NoSignatureDetected,

    /// The two bitmaps differ in size
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Threshold outside `[0.1, 1.0]`
    #[error("invalid threshold {0}: must be within [0.1, 1.0]")]
    InvalidThreshold(f64),

    /// A bitmap that does not satisfy the canonical bitmap invariant
    #[error("invalid canonical bitmap: {0}")]
    InvalidBitmap(String),

    /// Invalid preprocessing options
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A session was asked to verify before both images were loaded
    #[error("{0} image not loaded")]
    MissingImage(&'static str),

    /// A lower layer rejected input the pipeline considers valid
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<sigverify_core::Error> for VerifyError {
    fn from(e: sigverify_core::Error) -> Self {
        VerifyError::Internal(e.to_string())
    }
}

impl From<ColorError> for VerifyError {
    fn from(e: ColorError) -> Self {
        VerifyError::Internal(e.to_string())
    }
}

impl From<RegionError> for VerifyError {
    fn from(e: RegionError) -> Self {
        VerifyError::Internal(e.to_string())
    }
}

impl From<TransformError> for VerifyError {
    fn from(e: TransformError) -> Self {
        VerifyError::Internal(e.to_string())
    }
}

impl From<SimilarityError> for VerifyError {
    fn from(e: SimilarityError) -> Self {
        match e {
            SimilarityError::DimensionMismatch { expected, actual } => {
                VerifyError::DimensionMismatch { expected, actual }
            }
            other => VerifyError::Internal(other.to_string()),
        }
    }
}

impl From<Infallible> for VerifyError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerifyError>;
