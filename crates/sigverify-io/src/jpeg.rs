//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`.
//! Decoding supports 8-bit grayscale, 24-bit RGB and CMYK (converted to
//! RGB). Encoding writes grayscale or RGB; alpha is dropped.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType, Encoder};
use sigverify_core::{ImageFormat, Pix, PixMut, PixelDepth, color};
use std::io::{Read, Write};

/// Quality used by `write_image` for JPEG output
pub const DEFAULT_QUALITY: u8 = 75;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
///
/// # Returns
/// A `Pix` at 8 bpp (grayscale) or 32 bpp (RGB).
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let (depth, samples) = match info.pixel_format {
        PixelFormat::L8 => (PixelDepth::Bit8, 1),
        PixelFormat::RGB24 => (PixelDepth::Bit32, 3),
        PixelFormat::CMYK32 => (PixelDepth::Bit32, 4),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    let expected = (width as usize) * (height as usize) * samples;
    if data.len() < expected {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: {} < {}",
            data.len(),
            expected
        )));
    }

    let mut pix = PixMut::new(width, height, depth)?;
    pix.set_informat(ImageFormat::Jpeg);

    for (i, px) in data[..expected].chunks_exact(samples).enumerate() {
        let x = (i % width as usize) as u32;
        let y = (i / width as usize) as u32;
        let val = match info.pixel_format {
            PixelFormat::L8 => px[0] as u32,
            PixelFormat::RGB24 => color::compose_rgb(px[0], px[1], px[2]),
            _ => {
                let (r, g, b) = cmyk_to_rgb(px[0], px[1], px[2], px[3]);
                color::compose_rgb(r, g, b)
            }
        };
        pix.set_pixel_unchecked(x, y, val);
    }

    Ok(pix.into())
}

/// Write a JPEG image
///
/// 8 bpp images are written as grayscale, 32 bpp as RGB. 1 bpp images
/// are written as grayscale with foreground black.
///
/// # Errors
///
/// Returns [`IoError::EncodeError`] if `quality` is outside `1..=100`,
/// a dimension exceeds 65535, or the encoder fails.
pub fn write_jpeg<W: Write>(pix: &Pix, mut writer: W, quality: u8) -> IoResult<()> {
    if !(1..=100).contains(&quality) {
        return Err(IoError::EncodeError(format!(
            "JPEG quality must be in 1..=100, got {}",
            quality
        )));
    }
    let (Ok(width), Ok(height)) = (u16::try_from(pix.width()), u16::try_from(pix.height())) else {
        return Err(IoError::EncodeError(format!(
            "{}x{} exceeds the JPEG size limit",
            pix.width(),
            pix.height()
        )));
    };

    let (w, h) = (pix.width(), pix.height());
    let (data, color_type) = match pix.depth() {
        PixelDepth::Bit1 => {
            let data = (0..h)
                .flat_map(|y| (0..w).map(move |x| (x, y)))
                .map(|(x, y)| if pix.get_pixel_unchecked(x, y) == 0 { 255 } else { 0 })
                .collect();
            (data, ColorType::Luma)
        }
        PixelDepth::Bit8 => {
            let data = (0..h)
                .flat_map(|y| (0..w).map(move |x| (x, y)))
                .map(|(x, y)| pix.get_pixel_unchecked(x, y) as u8)
                .collect();
            (data, ColorType::Luma)
        }
        PixelDepth::Bit32 => {
            let mut data = Vec::with_capacity(w as usize * h as usize * 3);
            for y in 0..h {
                for x in 0..w {
                    let (r, g, b, _) = color::extract_rgba(pix.get_pixel_unchecked(x, y));
                    data.extend_from_slice(&[r, g, b]);
                }
            }
            (data, ColorType::Rgb)
        }
    };

    let mut jpeg_buf = Vec::new();
    let encoder = Encoder::new(&mut jpeg_buf, quality);
    encoder
        .encode(&data, width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    writer.write_all(&jpeg_buf)?;
    Ok(())
}

/// Convert one CMYK sample to RGB.
fn cmyk_to_rgb(c: u8, m: u8, y: u8, k: u8) -> (u8, u8, u8) {
    let kf = 255 - k as u32;
    let conv = |v: u8| (((255 - v as u32) * kf + 127) / 255) as u8;
    (conv(c), conv(m), conv(y))
}
