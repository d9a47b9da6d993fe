//! Histogram and pixel counting

use super::{Pix, PixelDepth, get_data_bit};
use crate::error::{Error, Result};

impl Pix {
    /// Get the gray-level histogram of a 1 or 8 bpp image.
    ///
    /// The result has `2^depth` bins (2 for binary, 256 for grayscale).
    ///
    /// # Arguments
    ///
    /// * `factor` - Subsampling factor. Use 1 to count all pixels,
    ///   2 to count every other pixel in each direction, etc.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is 32 bpp or `factor` is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use sigverify_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::new(100, 100, PixelDepth::Bit8).unwrap();
    /// let hist = pix.gray_histogram(1).unwrap();
    /// assert_eq!(hist.len(), 256);
    /// assert_eq!(hist[0], 10_000);
    /// ```
    pub fn gray_histogram(&self, factor: u32) -> Result<Vec<u32>> {
        if factor == 0 {
            return Err(Error::InvalidParameter("factor must be >= 1".to_string()));
        }
        let depth = self.depth();
        if depth == PixelDepth::Bit32 {
            return Err(Error::IncompatibleDepths(32, 8));
        }

        let size = 1usize << depth.bits();
        let mut histogram = vec![0u32; size];

        let mut y = 0;
        while y < self.height() {
            let mut x = 0;
            while x < self.width() {
                histogram[self.get_pixel_unchecked(x, y) as usize] += 1;
                x += factor;
            }
            y += factor;
        }

        Ok(histogram)
    }

    /// Count the ON pixels of a 1 bpp image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 1 bpp.
    pub fn count_ones(&self) -> Result<u64> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let w = self.width();
        let full_words = (w / 32) as usize;
        let rem = w % 32;
        let mut count = 0u64;
        for y in 0..self.height() {
            let line = self.row_data(y);
            count += line[..full_words]
                .iter()
                .map(|word| word.count_ones() as u64)
                .sum::<u64>();
            for x in (w - rem)..w {
                count += get_data_bit(line, x) as u64;
            }
        }
        Ok(count)
    }

    /// Number of distinct values present in a 1 or 8 bpp image.
    pub fn count_distinct_values(&self) -> Result<usize> {
        Ok(self
            .gray_histogram(1)?
            .iter()
            .filter(|&&n| n > 0)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixMut;

    #[test]
    fn test_histogram_8bpp() {
        let pix = Pix::from_gray_bytes(4, 1, &[0, 7, 7, 255]).unwrap();
        let hist = pix.gray_histogram(1).unwrap();
        assert_eq!(hist[0], 1);
        assert_eq!(hist[7], 2);
        assert_eq!(hist[255], 1);
        assert_eq!(pix.count_distinct_values().unwrap(), 3);
    }

    #[test]
    fn test_histogram_subsampled() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let hist = pix.gray_histogram(2).unwrap();
        assert_eq!(hist[0], 4);
    }

    #[test]
    fn test_histogram_rejects() {
        let pix = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        assert!(pix.gray_histogram(1).is_err());
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        assert!(pix.gray_histogram(0).is_err());
    }

    #[test]
    fn test_count_ones_partial_word() {
        let mut pm = PixMut::new(70, 3, PixelDepth::Bit1).unwrap();
        pm.set_pixel(0, 0, 1).unwrap();
        pm.set_pixel(31, 0, 1).unwrap();
        pm.set_pixel(64, 1, 1).unwrap();
        pm.set_pixel(69, 2, 1).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.count_ones().unwrap(), 4);
        let hist = pix.gray_histogram(1).unwrap();
        assert_eq!(hist, vec![206, 4]);
    }
}
