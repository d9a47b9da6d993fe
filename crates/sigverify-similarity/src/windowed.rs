//! Windowed statistics using integral images
//!
//! Computes local means, variances and covariance of two images over
//! square sliding windows in O(1) per window, using summed area tables.

use crate::{SimilarityError, SimilarityResult};
use sigverify_core::{Pix, PixelDepth};

/// Validate that the input image is 8 bpp grayscale.
pub(crate) fn check_8bpp(pix: &Pix) -> SimilarityResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(SimilarityError::UnsupportedDepth {
            expected: "8-bpp grayscale",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Summed area table.
///
/// Entry `(x, y)` holds the sum of all source values in `[0, x) x [0, y)`,
/// so the table is one larger than the source in each dimension.
/// Accumulation is in f64: 8-bit products summed over a full page stay
/// far inside its exact integer range.
#[derive(Debug, Clone)]
pub struct IntegralImage {
    width: u32,
    height: u32,
    data: Vec<f64>,
}

impl IntegralImage {
    /// Build the table for a `width` x `height` grid whose value at
    /// `(x, y)` is `f(x, y)`.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> f64,
    {
        let stride = width as usize + 1;
        let mut data = vec![0.0f64; stride * (height as usize + 1)];
        for y in 0..height {
            let mut row_sum = 0.0;
            let above = y as usize * stride;
            let here = above + stride;
            for x in 0..width {
                row_sum += f(x, y);
                let i = x as usize + 1;
                data[here + i] = data[above + i] + row_sum;
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Table for the pixel values of an 8 bpp image.
    pub fn from_pix(pix: &Pix) -> SimilarityResult<Self> {
        check_8bpp(pix)?;
        Ok(Self::from_fn(pix.width(), pix.height(), |x, y| {
            pix.get_pixel_unchecked(x, y) as f64
        }))
    }

    /// Width of the source grid
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the source grid
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn at(&self, x: u32, y: u32) -> f64 {
        self.data[y as usize * (self.width as usize + 1) + x as usize]
    }

    /// Sum of the source values in the rectangle at `(x, y)` of size `w` x `h`.
    ///
    /// The rectangle must lie inside the source grid.
    #[inline]
    pub fn sum(&self, x: u32, y: u32, w: u32, h: u32) -> f64 {
        debug_assert!(x + w <= self.width && y + h <= self.height);
        self.at(x + w, y + h) - self.at(x, y + h) - self.at(x + w, y) + self.at(x, y)
    }
}

/// Sample statistics of one window position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub mean_x: f64,
    pub mean_y: f64,
    /// Unbiased sample variance of the first image
    pub var_x: f64,
    /// Unbiased sample variance of the second image
    pub var_y: f64,
    /// Unbiased sample covariance
    pub cov_xy: f64,
}

/// First and second order moments of an image pair, as integral images.
pub struct WindowMoments {
    sum_x: IntegralImage,
    sum_y: IntegralImage,
    sum_xx: IntegralImage,
    sum_yy: IntegralImage,
    sum_xy: IntegralImage,
}

impl WindowMoments {
    /// Build the moment tables for two 8 bpp images of equal size.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarityError::UnsupportedDepth`] unless both images are
    /// 8 bpp, and [`SimilarityError::DimensionMismatch`] if their sizes differ.
    pub fn new(a: &Pix, b: &Pix) -> SimilarityResult<Self> {
        check_8bpp(a)?;
        check_8bpp(b)?;
        if !a.sizes_equal(b) {
            return Err(SimilarityError::DimensionMismatch {
                expected: (a.width(), a.height()),
                actual: (b.width(), b.height()),
            });
        }

        let (w, h) = (a.width(), a.height());
        let va = |x, y| a.get_pixel_unchecked(x, y) as f64;
        let vb = |x, y| b.get_pixel_unchecked(x, y) as f64;
        Ok(Self {
            sum_x: IntegralImage::from_fn(w, h, va),
            sum_y: IntegralImage::from_fn(w, h, vb),
            sum_xx: IntegralImage::from_fn(w, h, |x, y| va(x, y) * va(x, y)),
            sum_yy: IntegralImage::from_fn(w, h, |x, y| vb(x, y) * vb(x, y)),
            sum_xy: IntegralImage::from_fn(w, h, |x, y| va(x, y) * vb(x, y)),
        })
    }

    pub fn width(&self) -> u32 {
        self.sum_x.width()
    }

    pub fn height(&self) -> u32 {
        self.sum_x.height()
    }

    /// Statistics of the `size` x `size` window with top-left corner `(x, y)`.
    ///
    /// Variances and covariance use the `n - 1` denominator; `size` must
    /// be at least 2.
    pub fn stats(&self, x: u32, y: u32, size: u32) -> WindowStats {
        let n = (size * size) as f64;
        let sx = self.sum_x.sum(x, y, size, size);
        let sy = self.sum_y.sum(x, y, size, size);
        let sxx = self.sum_xx.sum(x, y, size, size);
        let syy = self.sum_yy.sum(x, y, size, size);
        let sxy = self.sum_xy.sum(x, y, size, size);

        WindowStats {
            mean_x: sx / n,
            mean_y: sy / n,
            var_x: (sxx - sx * sx / n) / (n - 1.0),
            var_y: (syy - sy * sy / n) / (n - 1.0),
            cov_xy: (sxy - sx * sy / n) / (n - 1.0),
        }
    }
}
