//! Depth conversion and inversion

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

impl Pix {
    /// Convert a 1 bpp image to 8 bpp.
    ///
    /// Pixels that are 0 become `val0` and pixels that are 1 become `val1`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 1 bpp, or
    /// [`Error::InvalidParameter`] if a value does not fit in a byte.
    pub fn convert_1_to_8(&self, val0: u32, val1: u32) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        if val0 > 255 || val1 > 255 {
            return Err(Error::InvalidParameter(format!(
                "8 bpp values must be <= 255: val0={}, val1={}",
                val0, val1
            )));
        }

        let w = self.width();
        let h = self.height();
        let mut pixd = PixMut::new(w, h, PixelDepth::Bit8)?;
        pixd.set_informat(self.informat());

        for y in 0..h {
            for x in 0..w {
                let v = if self.get_pixel_unchecked(x, y) == 0 {
                    val0
                } else {
                    val1
                };
                pixd.set_pixel_unchecked(x, y, v);
            }
        }

        Ok(pixd.into())
    }

    /// Photometric inversion.
    ///
    /// For 1 bpp, foreground and background swap; for 8 bpp each value
    /// `v` becomes `255 - v`. For 32 bpp the color channels are inverted
    /// and alpha is kept.
    pub fn invert(&self) -> Result<Pix> {
        let w = self.width();
        let h = self.height();
        let depth = self.depth();
        let mut pixd = PixMut::new(w, h, depth)?;
        pixd.set_spp(self.spp());
        pixd.set_informat(self.informat());

        let mask = match depth {
            PixelDepth::Bit1 => 1,
            PixelDepth::Bit8 => 0xff,
            PixelDepth::Bit32 => 0xffff_ff00,
        };
        for y in 0..h {
            for x in 0..w {
                pixd.set_pixel_unchecked(x, y, self.get_pixel_unchecked(x, y) ^ mask);
            }
        }

        Ok(pixd.into())
    }
}
