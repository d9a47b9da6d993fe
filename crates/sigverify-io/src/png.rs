//! PNG image format support
//!
//! Decoding expands palettes, sub-byte gray and transparency chunks and
//! strips 16-bit samples, so every PNG arrives as 8 bits per sample:
//! grayscale becomes an 8 bpp `Pix`, everything else 32 bpp.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use sigverify_core::{ImageFormat, Pix, PixMut, PixelDepth, color};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unexpected PNG output depth after expansion: {:?}",
            bit_depth
        )));
    }

    let (pix_depth, spp) = match color_type {
        ColorType::Grayscale => (PixelDepth::Bit8, 1),
        ColorType::GrayscaleAlpha => (PixelDepth::Bit32, 4),
        ColorType::Rgb => (PixelDepth::Bit32, 3),
        ColorType::Rgba => (PixelDepth::Bit32, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix = PixMut::new(width, height, pix_depth)?;
    pix.set_spp(spp);
    pix.set_informat(ImageFormat::Png);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let samples = color_type.samples();

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..];
        for x in 0..width {
            let idx = x as usize * samples;
            let pixel = match color_type {
                ColorType::Grayscale => row[idx] as u32,
                ColorType::GrayscaleAlpha => {
                    let g = row[idx];
                    color::compose_rgba(g, g, g, row[idx + 1])
                }
                ColorType::Rgb => color::compose_rgb(row[idx], row[idx + 1], row[idx + 2]),
                _ => color::compose_rgba(row[idx], row[idx + 1], row[idx + 2], row[idx + 3]),
            };
            pix.set_pixel_unchecked(x, y, pixel);
        }
    }

    Ok(pix.into())
}

/// Write a PNG image
///
/// 1 bpp images are written as 1-bit grayscale with foreground (1)
/// rendered black, 8 bpp as 8-bit grayscale, and 32 bpp as RGB or RGBA
/// depending on the samples per pixel.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth) = match pix.depth() {
        PixelDepth::Bit1 => (ColorType::Grayscale, BitDepth::One),
        PixelDepth::Bit8 => (ColorType::Grayscale, BitDepth::Eight),
        PixelDepth::Bit32 if pix.spp() == 4 => (ColorType::Rgba, BitDepth::Eight),
        PixelDepth::Bit32 => (ColorType::Rgb, BitDepth::Eight),
    };

    let mut data = Vec::new();
    for y in 0..height {
        match pix.depth() {
            PixelDepth::Bit1 => {
                let mut byte = 0u8;
                for x in 0..width {
                    // PNG gray: 0 is black, so foreground bits are inverted
                    if pix.get_pixel_unchecked(x, y) == 0 {
                        byte |= 0x80 >> (x % 8);
                    }
                    if x % 8 == 7 || x == width - 1 {
                        data.push(byte);
                        byte = 0;
                    }
                }
            }
            PixelDepth::Bit8 => {
                data.extend((0..width).map(|x| pix.get_pixel_unchecked(x, y) as u8));
            }
            PixelDepth::Bit32 => {
                for x in 0..width {
                    let (r, g, b, a) = color::extract_rgba(pix.get_pixel_unchecked(x, y));
                    data.extend_from_slice(&[r, g, b]);
                    if color_type == ColorType::Rgba {
                        data.push(a);
                    }
                }
            }
        }
    }

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);
    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    png_writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(pix: &Pix) -> Pix {
        let mut buf = Vec::new();
        write_png(pix, &mut buf).unwrap();
        read_png(Cursor::new(buf)).unwrap()
    }

    #[test]
    fn test_png_gray_roundtrip() {
        let pix = Pix::from_gray_bytes(3, 2, &[0, 50, 100, 150, 200, 255]).unwrap();
        let back = roundtrip(&pix);
        assert_eq!(back.depth(), PixelDepth::Bit8);
        assert_eq!(back.informat(), ImageFormat::Png);
        assert!(pix.equals(&back));
    }

    #[test]
    fn test_png_rgb_roundtrip() {
        let pix = Pix::from_rgb_bytes(2, 1, &[255, 0, 0, 10, 20, 30]).unwrap();
        let back = roundtrip(&pix);
        assert_eq!(back.depth(), PixelDepth::Bit32);
        assert_eq!(back.spp(), 3);
        assert_eq!(back.get_rgb(1, 0), Some((10, 20, 30)));
    }

    #[test]
    fn test_png_binary_reads_back_as_gray() {
        let mut pm = PixMut::new(10, 1, PixelDepth::Bit1).unwrap();
        pm.set_pixel(9, 0, 1).unwrap();
        let pix: Pix = pm.into();
        let back = roundtrip(&pix);
        assert_eq!(back.depth(), PixelDepth::Bit8);
        assert_eq!(back.get_pixel(0, 0), Some(255));
        assert_eq!(back.get_pixel(9, 0), Some(0));
    }

    #[test]
    fn test_png_garbage_is_decode_error() {
        let bad = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];
        assert!(matches!(
            read_png(Cursor::new(bad)),
            Err(IoError::DecodeError(_))
        ));
    }
}
