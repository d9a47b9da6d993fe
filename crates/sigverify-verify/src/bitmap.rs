//! Canonical signature bitmap

use crate::{VerifyError, VerifyResult};
use sigverify_core::{Pix, PixelDepth};

/// Width of every canonical bitmap
pub const CANONICAL_WIDTH: u32 = 300;
/// Height of every canonical bitmap
pub const CANONICAL_HEIGHT: u32 = 150;

/// Pixel value of ink
pub const INK: u32 = 255;
/// Pixel value of background
pub const BACKGROUND: u32 = 0;

/// A normalized signature: 8 bpp, 300x150, holding exactly the two
/// values [`INK`] and [`BACKGROUND`].
///
/// The invariant is checked on construction and the bitmap is immutable
/// afterwards; clones share pixel data.
#[derive(Debug, Clone)]
pub struct CanonicalBitmap {
    pix: Pix,
}

impl CanonicalBitmap {
    /// Wrap a `Pix` that satisfies the canonical invariant.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidBitmap`] if the image is not 8 bpp,
    /// is not 300x150, holds a value other than 0 or 255, or does not
    /// hold both of them.
    pub fn from_pix(pix: Pix) -> VerifyResult<Self> {
        if pix.depth() != PixelDepth::Bit8 {
            return Err(VerifyError::InvalidBitmap(format!(
                "depth {} bpp, expected 8",
                pix.depth().bits()
            )));
        }
        if (pix.width(), pix.height()) != (CANONICAL_WIDTH, CANONICAL_HEIGHT) {
            return Err(VerifyError::InvalidBitmap(format!(
                "size {}x{}, expected {}x{}",
                pix.width(),
                pix.height(),
                CANONICAL_WIDTH,
                CANONICAL_HEIGHT
            )));
        }

        let (mut ink, mut background) = (false, false);
        for y in 0..pix.height() {
            for x in 0..pix.width() {
                match pix.get_pixel_unchecked(x, y) {
                    INK => ink = true,
                    BACKGROUND => background = true,
                    v => {
                        return Err(VerifyError::InvalidBitmap(format!(
                            "value {} at ({}, {})",
                            v, x, y
                        )));
                    }
                }
            }
        }
        if !(ink && background) {
            return Err(VerifyError::InvalidBitmap(
                "bitmap must contain both ink and background".to_string(),
            ));
        }

        Ok(Self { pix })
    }

    pub fn width(&self) -> u32 {
        self.pix.width()
    }

    pub fn height(&self) -> u32 {
        self.pix.height()
    }

    /// Borrow the underlying 8 bpp image.
    pub fn as_pix(&self) -> &Pix {
        &self.pix
    }

    /// The underlying 8 bpp image, e.g. for export with
    /// `sigverify_io::write_image`.
    pub fn to_pix(&self) -> Pix {
        self.pix.clone()
    }

    /// Number of ink pixels.
    pub fn ink_count(&self) -> u64 {
        let mut n = 0;
        for y in 0..self.pix.height() {
            for x in 0..self.pix.width() {
                if self.pix.get_pixel_unchecked(x, y) == INK {
                    n += 1;
                }
            }
        }
        n
    }

    /// The bitmap with ink and background swapped.
    pub fn complement(&self) -> VerifyResult<Self> {
        Ok(Self {
            pix: self.pix.invert()?,
        })
    }
}
