//! Image comparison operations
//!
//! Pixel equality checks and difference counting.

use super::Pix;
use crate::error::{Error, Result};

/// Result of counting pixel differences between two images
#[derive(Debug, Clone)]
pub struct PixelDiffResult {
    /// Number of pixels that differ
    pub n_diff: u64,
    /// Fraction of pixels that differ (0.0 to 1.0)
    pub fract_diff: f64,
    /// Maximum absolute per-pixel difference (per channel for 32 bpp)
    pub max_diff: u32,
}

fn check_same_geometry(a: &Pix, b: &Pix) -> Result<()> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(Error::DimensionMismatch {
            expected: (a.width(), a.height()),
            actual: (b.width(), b.height()),
        });
    }
    if a.depth() != b.depth() {
        return Err(Error::IncompatibleDepths(a.depth().bits(), b.depth().bits()));
    }
    Ok(())
}

fn abs_diff_value(a: u32, b: u32, depth: super::PixelDepth) -> u32 {
    match depth {
        super::PixelDepth::Bit32 => {
            let (ar, ag, ab, _) = crate::color::extract_rgba(a);
            let (br, bg, bb, _) = crate::color::extract_rgba(b);
            (ar.abs_diff(br))
                .max(ag.abs_diff(bg))
                .max(ab.abs_diff(bb)) as u32
        }
        _ => a.abs_diff(b),
    }
}

impl Pix {
    /// Count the number of pixels that differ between two images.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions or depths.
    pub fn count_pixel_diffs(&self, other: &Pix) -> Result<PixelDiffResult> {
        check_same_geometry(self, other)?;

        let depth = self.depth();
        let mut n_diff = 0u64;
        let mut max_diff = 0u32;
        for y in 0..self.height() {
            for x in 0..self.width() {
                let d = abs_diff_value(
                    self.get_pixel_unchecked(x, y),
                    other.get_pixel_unchecked(x, y),
                    depth,
                );
                if d > 0 {
                    n_diff += 1;
                    max_diff = max_diff.max(d);
                }
            }
        }

        let total = self.width() as u64 * self.height() as u64;
        Ok(PixelDiffResult {
            n_diff,
            fract_diff: n_diff as f64 / total as f64,
            max_diff,
        })
    }

    /// Check if two images have the same geometry and pixel values.
    pub fn equals(&self, other: &Pix) -> bool {
        self.count_pixel_diffs(other)
            .map(|r| r.n_diff == 0)
            .unwrap_or(false)
    }
}
