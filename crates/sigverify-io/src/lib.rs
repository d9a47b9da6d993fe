//! sigverify-io - Image I/O
//!
//! Reads PNG and JPEG images into [`Pix`] and writes both. Formats are
//! detected from the leading magic bytes, never from the file name.
//!
//! # Features
//!
//! - `png-format` (default): PNG read/write via the `png` crate
//! - `jpeg` (default): JPEG read via `jpeg-decoder`, write via `jpeg-encoder`

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use sigverify_core::ImageFormat;

use sigverify_core::Pix;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be read, otherwise the
/// errors of [`read_image_mem`].
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    log::debug!("read {} bytes from {}", data.len(), path.display());
    read_image_mem(&data)
}

/// Decode an image held in memory.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for formats without a decoder,
/// and [`IoError::DecodeError`] when the codec rejects the data.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    let pix = match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data))?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(Cursor::new(data))?,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "no decoder for {:?}",
                other
            )));
        }
    };
    log::debug!(
        "decoded {:?}: {}x{} d={} spp={}",
        format,
        pix.width(),
        pix.height(),
        pix.depth().bits(),
        pix.spp()
    );
    Ok(pix)
}

/// Write an image to a file path.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for formats without an encoder.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_to(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into a byte vector.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_to(pix, &mut buf, format)?;
    Ok(buf)
}

fn write_image_to<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, writer, jpeg::DEFAULT_QUALITY),
        other => {
            let _ = writer;
            Err(IoError::UnsupportedFormat(format!(
                "no encoder for {:?}",
                other
            )))
        }
    }
}
