//! Binary thresholding
//!
//! Converts 8 bpp grayscale images to 1 bpp masks:
//! - Fixed threshold binarization
//! - Otsu's method (automatic threshold selection from the histogram)
//!
//! In the output, 1 marks foreground. Which side of the threshold counts
//! as foreground is chosen with [`Polarity`].

use crate::ColorResult;
use crate::colorspace::check_8bpp;
use sigverify_core::{Pix, PixMut, PixelDepth};

/// Which gray levels become foreground (1) in a binary image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Pixels `<= threshold` are foreground (dark ink on light paper)
    #[default]
    DarkForeground,
    /// Pixels `> threshold` are foreground
    LightForeground,
}

impl Polarity {
    #[inline]
    fn is_foreground(self, val: u32, threshold: u32) -> bool {
        match self {
            Polarity::DarkForeground => val <= threshold,
            Polarity::LightForeground => val > threshold,
        }
    }
}

/// Convert a grayscale image to binary using a fixed threshold.
///
/// # Errors
///
/// Returns an error if the image is not 8 bpp.
pub fn threshold_to_binary(pix: &Pix, threshold: u8, polarity: Polarity) -> ColorResult<Pix> {
    check_8bpp(pix)?;

    let w = pix.width();
    let h = pix.height();
    let mut out = PixMut::new(w, h, PixelDepth::Bit1)?;
    out.set_informat(pix.informat());

    let t = threshold as u32;
    for y in 0..h {
        for x in 0..w {
            if polarity.is_foreground(pix.get_pixel_unchecked(x, y), t) {
                out.set_pixel_unchecked(x, y, 1);
            }
        }
    }

    Ok(out.into())
}

/// Compute Otsu's threshold for a grayscale image.
///
/// Returns the gray level `t` that maximizes the between-class variance
/// `w0 * w1 * (m0 - m1)^2` of the two classes `<= t` and `> t`, which is
/// the same as minimizing the summed intra-class variance. Ties keep the
/// lowest level.
///
/// Returns `None` when the image holds a single gray level: there is no
/// split with both classes populated.
///
/// # Errors
///
/// Returns an error if the image is not 8 bpp.
pub fn compute_otsu_threshold(pix: &Pix) -> ColorResult<Option<u8>> {
    check_8bpp(pix)?;
    let hist = pix.gray_histogram(1)?;
    Ok(otsu_from_histogram(&hist))
}

fn otsu_from_histogram(hist: &[u32]) -> Option<u8> {
    let total: f64 = hist.iter().map(|&n| n as f64).sum();
    let sum_all: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &n)| i as f64 * n as f64)
        .sum();

    let mut w0 = 0.0f64;
    let mut sum0 = 0.0f64;
    let mut best: Option<(u8, f64)> = None;

    for (level, &count) in hist.iter().enumerate().take(255) {
        w0 += count as f64;
        sum0 += level as f64 * count as f64;
        if w0 == 0.0 {
            continue;
        }
        let w1 = total - w0;
        if w1 == 0.0 {
            break;
        }
        let m0 = sum0 / w0;
        let m1 = (sum_all - sum0) / w1;
        let between = w0 * w1 * (m0 - m1) * (m0 - m1);
        if best.is_none_or(|(_, b)| between > b) {
            best = Some((level as u8, between));
        }
    }

    best.map(|(t, _)| t)
}

/// Convert a grayscale image to binary using Otsu's method.
///
/// Automatically determines the threshold with [`compute_otsu_threshold`].
/// A single-level (uniform) image has no foreground/background split and
/// yields an all-zero mask.
///
/// # Errors
///
/// Returns an error if the image is not 8 bpp.
pub fn threshold_otsu(pix: &Pix, polarity: Polarity) -> ColorResult<Pix> {
    match compute_otsu_threshold(pix)? {
        Some(t) => {
            log::debug!("otsu threshold {} on {}x{}", t, pix.width(), pix.height());
            threshold_to_binary(pix, t, polarity)
        }
        None => {
            log::debug!(
                "otsu: uniform {}x{} image, no foreground",
                pix.width(),
                pix.height()
            );
            let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit1)?;
            out.set_informat(pix.informat());
            Ok(out.into())
        }
    }
}
