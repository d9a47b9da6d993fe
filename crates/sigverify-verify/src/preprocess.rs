//! Signature normalization
//!
//! Turns a raw scanned or photographed signature into a [`CanonicalBitmap`]:
//!
//! 1. luminance conversion and Otsu binarization (dark ink becomes foreground)
//! 2. union bounding box of the 8-connected ink regions
//! 3. box expanded by the padding and clamped to the image
//! 4. crop of the raw image, resized to the canonical size
//! 5. luminance conversion and Otsu binarization of the resized crop
//!
//! The second binarization runs on the resampled image, so ink edges are
//! re-decided at the canonical resolution.

use crate::bitmap::{BACKGROUND, CANONICAL_HEIGHT, CANONICAL_WIDTH, CanonicalBitmap, INK};
use crate::{VerifyError, VerifyResult};
use sigverify_color::{Polarity, pix_convert_to_gray, threshold_otsu};
use sigverify_core::{Box, Pix, PixelDepth};
use sigverify_region::{ConnectivityType, foreground_bounding_box};
use sigverify_transform::scale_to_size;
use std::path::Path;

/// Padding added on each side of the ink bounding box
pub const DEFAULT_PADDING: u32 = 15;

/// Options for signature normalization
#[derive(Debug, Clone)]
pub struct PreprocessOptions {
    /// Margin around the ink bounding box, in source pixels (default: 15)
    pub padding: u32,

    /// Output width (default: 300)
    pub width: u32,

    /// Output height (default: 150)
    pub height: u32,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            width: CANONICAL_WIDTH,
            height: CANONICAL_HEIGHT,
        }
    }
}

impl PreprocessOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the padding
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Set the output size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Validate options
    pub fn validate(&self) -> VerifyResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(VerifyError::InvalidOptions(format!(
                "output size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.padding > i32::MAX as u32 / 4 {
            return Err(VerifyError::InvalidOptions(format!(
                "padding {} is too large",
                self.padding
            )));
        }
        Ok(())
    }
}

/// Crop rectangle for an ink bounding box: `bounds` grown by `padding`
/// on every side, then clamped to `[0, width) x [0, height)`.
///
/// Returns `None` only if `bounds` lies entirely outside the image.
///
/// # Examples
///
/// ```
/// use sigverify_core::Box;
/// use sigverify_verify::crop_box;
///
/// let ink = Box::new(5, 40, 100, 20).unwrap();
/// let crop = crop_box(&ink, 15, 200, 70).unwrap();
/// assert_eq!(crop, Box::new(0, 25, 120, 45).unwrap());
/// ```
pub fn crop_box(bounds: &Box, padding: u32, width: u32, height: u32) -> Option<Box> {
    bounds
        .expand(padding as i32)
        .clip(width as i32, height as i32)
}

/// Binary ink mask of an image: 1 where Otsu's method classifies a
/// pixel as dark ink.
fn ink_mask(pix: &Pix) -> VerifyResult<Pix> {
    let gray = pix_convert_to_gray(pix)?;
    Ok(threshold_otsu(&gray, Polarity::DarkForeground)?)
}

/// Normalize a raw image into a binary 8 bpp bitmap of the size given
/// in `options`, with ink 255 and background 0.
///
/// # Errors
///
/// - [`VerifyError::InvalidOptions`] if `options` do not validate
/// - [`VerifyError::NoSignatureDetected`] if no ink is found, or if the
///   result is not two-valued
pub fn preprocess(raw: &Pix, options: &PreprocessOptions) -> VerifyResult<Pix> {
    options.validate()?;

    let mask = ink_mask(raw)?;
    let Some(bounds) = foreground_bounding_box(&mask, ConnectivityType::EightWay)? else {
        log::warn!(
            "no ink found in {}x{} image",
            raw.width(),
            raw.height()
        );
        return Err(VerifyError::NoSignatureDetected);
    };

    let crop = crop_box(&bounds, options.padding, raw.width(), raw.height()).ok_or_else(|| {
        VerifyError::Internal(format!(
            "ink bounds {:?} outside {}x{} image",
            bounds,
            raw.width(),
            raw.height()
        ))
    })?;
    log::debug!("ink bounds {:?}, crop {:?}", bounds, crop);

    // Binary sources are resampled as gray so the scaler can interpolate
    let source = match raw.depth() {
        PixelDepth::Bit1 => pix_convert_to_gray(raw)?,
        _ => raw.clone(),
    };
    let cropped = source.clip_box(&crop)?;
    let resized = scale_to_size(&cropped, options.width, options.height)?;

    let out = ink_mask(&resized)?.convert_1_to_8(BACKGROUND, INK)?;
    if out.count_distinct_values()? < 2 {
        log::warn!("resized crop {:?} binarized to a single value", crop);
        return Err(VerifyError::NoSignatureDetected);
    }
    Ok(out)
}

/// Normalize a raw image into a [`CanonicalBitmap`].
///
/// # Errors
///
/// Returns [`VerifyError::NoSignatureDetected`] when the image holds no
/// detectable ink.
pub fn normalize(raw: &Pix) -> VerifyResult<CanonicalBitmap> {
    let pix = preprocess(raw, &PreprocessOptions::default())?;
    CanonicalBitmap::from_pix(pix)
}

/// Decode an image file and normalize it.
///
/// # Errors
///
/// Returns [`VerifyError::DecodeError`] if the file cannot be read or
/// decoded, otherwise the errors of [`normalize`].
pub fn normalize_path<P: AsRef<Path>>(path: P) -> VerifyResult<CanonicalBitmap> {
    let path = path.as_ref();
    let raw = sigverify_io::read_image(path)?;
    log::debug!("normalizing {}", path.display());
    normalize(&raw)
}

/// Decode an in-memory image and normalize it.
///
/// # Errors
///
/// Returns [`VerifyError::DecodeError`] if the data cannot be decoded,
/// otherwise the errors of [`normalize`].
pub fn normalize_bytes(data: &[u8]) -> VerifyResult<CanonicalBitmap> {
    let raw = sigverify_io::read_image_mem(data)?;
    normalize(&raw)
}
