//! Color space conversion
//!
//! RGB -> luminance using ITU-R BT.601 weights (0.299, 0.587, 0.114)
//! in 14-bit fixed point, rounded to nearest.

use crate::{ColorError, ColorResult};
use sigverify_core::{Pix, PixMut, PixelDepth, color};

const FIX_SHIFT: u32 = 14;
const R_WEIGHT: u32 = 4899; // 0.299 * 2^14
const G_WEIGHT: u32 = 9617; // 0.587 * 2^14
const B_WEIGHT: u32 = 1868; // 0.114 * 2^14

/// Convert one RGB sample to its luminance.
///
/// # Examples
///
/// ```
/// use sigverify_color::rgb_to_gray;
///
/// assert_eq!(rgb_to_gray(255, 255, 255), 255);
/// assert_eq!(rgb_to_gray(0, 0, 0), 0);
/// ```
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    let y = (r as u32 * R_WEIGHT
        + g as u32 * G_WEIGHT
        + b as u32 * B_WEIGHT
        + (1 << (FIX_SHIFT - 1)))
        >> FIX_SHIFT;
    y.min(255) as u8
}

/// Composite an RGBA sample over a white background.
#[inline]
pub fn flatten_alpha(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8) {
    let a = a as u32;
    let over_white = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
    (over_white(r), over_white(g), over_white(b))
}

/// Convert an image to 8 bpp luminance.
///
/// - 8 bpp input is returned as a shared clone.
/// - 32 bpp input is converted with [`rgb_to_gray`]; with 4 samples per
///   pixel the alpha channel is first flattened onto white, so
///   transparent canvas reads as paper.
/// - 1 bpp input maps foreground to black (0) and background to white.
pub fn pix_convert_to_gray(pix: &Pix) -> ColorResult<Pix> {
    let w = pix.width();
    let h = pix.height();

    match pix.depth() {
        PixelDepth::Bit8 => Ok(pix.clone()),
        PixelDepth::Bit1 => Ok(pix.convert_1_to_8(255, 0)?),
        PixelDepth::Bit32 => {
            let has_alpha = pix.spp() == 4;
            let mut out = PixMut::new(w, h, PixelDepth::Bit8)?;
            out.set_informat(pix.informat());
            for y in 0..h {
                for x in 0..w {
                    let (mut r, mut g, mut b, a) =
                        color::extract_rgba(pix.get_pixel_unchecked(x, y));
                    if has_alpha {
                        (r, g, b) = flatten_alpha(r, g, b, a);
                    }
                    out.set_pixel_unchecked(x, y, rgb_to_gray(r, g, b) as u32);
                }
            }
            Ok(out.into())
        }
    }
}

/// Require an 8 bpp image.
pub(crate) fn check_8bpp(pix: &Pix) -> ColorResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(ColorError::UnsupportedDepth {
            expected: "8 bpp grayscale",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}
