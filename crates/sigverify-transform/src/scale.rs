//! Image scaling operations
//!
//! Provides various scaling algorithms including:
//! - Linear interpolation (for upscaling)
//! - Sampling (nearest neighbor)
//! - Area mapping (for downscaling with anti-aliasing)
//!
//! Linear and area-map scaling work on 8 bpp gray and 32 bpp color
//! images, channel by channel. Sampling works at every depth.
//!
//! Sample positions are pixel-center aligned: destination pixel `d` maps
//! to source coordinate `(d + 0.5) * src / dst - 0.5`.

use crate::{TransformError, TransformResult};
use sigverify_core::{Pix, PixMut, PixelDepth, color};

/// Scaling method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMethod {
    /// Nearest-neighbor sampling (fastest, pixelated results)
    Sampling,
    /// Bilinear interpolation (good for upscaling)
    Linear,
    /// Area mapping (best for downscaling, anti-aliased)
    AreaMap,
    /// Chosen per axis: area mapping where the axis shrinks or keeps its
    /// size, linear where it grows
    #[default]
    Auto,
}

impl ScaleMethod {
    /// Resolve [`ScaleMethod::Auto`] for a concrete resize.
    ///
    /// Stays `Auto` when one axis shrinks and the other grows.
    fn resolve(self, depth: PixelDepth, src: (u32, u32), dst: (u32, u32)) -> ScaleMethod {
        match self {
            ScaleMethod::Auto if depth == PixelDepth::Bit1 => ScaleMethod::Sampling,
            ScaleMethod::Auto if dst.0 <= src.0 && dst.1 <= src.1 => ScaleMethod::AreaMap,
            ScaleMethod::Auto if dst.0 > src.0 && dst.1 > src.1 => ScaleMethod::Linear,
            m => m,
        }
    }
}

/// Scale an image by the given factors
///
/// # Arguments
/// * `pix` - Input image
/// * `scale_x` - Horizontal scale factor (e.g., 2.0 = double width)
/// * `scale_y` - Vertical scale factor
/// * `method` - Scaling algorithm to use
pub fn scale(pix: &Pix, scale_x: f32, scale_y: f32, method: ScaleMethod) -> TransformResult<Pix> {
    let (w, h) = scaled_dims(pix, scale_x, scale_y)?;
    scale_to_size_with(pix, w, h, method)
}

/// Scale an image to a specific size
///
/// Uses [`ScaleMethod::Auto`].
///
/// # Arguments
/// * `pix` - Input image
/// * `width` - Target width (0 to maintain aspect ratio)
/// * `height` - Target height (0 to maintain aspect ratio)
pub fn scale_to_size(pix: &Pix, width: u32, height: u32) -> TransformResult<Pix> {
    let (w, h) = match (width, height) {
        (0, 0) => {
            return Err(TransformError::InvalidParameters(
                "width and height cannot both be 0".to_string(),
            ));
        }
        (0, h) => {
            let w = (pix.width() as f64 * h as f64 / pix.height() as f64).round() as u32;
            (w.max(1), h)
        }
        (w, 0) => {
            let h = (pix.height() as f64 * w as f64 / pix.width() as f64).round() as u32;
            (w, h.max(1))
        }
        dims => dims,
    };
    scale_to_size_with(pix, w, h, ScaleMethod::Auto)
}

/// Scale an image to exactly `width` x `height` with the given method.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] for a zero target
/// dimension and [`TransformError::UnsupportedDepth`] when linear or
/// area-map scaling is requested for a 1 bpp image.
pub fn scale_to_size_with(
    pix: &Pix,
    width: u32,
    height: u32,
    method: ScaleMethod,
) -> TransformResult<Pix> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "target size {}x{} must be non-zero",
            width, height
        )));
    }

    let src = (pix.width(), pix.height());
    let method = method.resolve(pix.depth(), src, (width, height));
    log::debug!(
        "scale {}x{} -> {}x{} ({:?})",
        src.0,
        src.1,
        width,
        height,
        method
    );

    if src == (width, height) {
        return Ok(pix.clone());
    }

    match method {
        ScaleMethod::Sampling => sample_to(pix, width, height),
        ScaleMethod::Linear => {
            let xt = linear_taps(src.0, width);
            let yt = linear_taps(src.1, height);
            resample(pix, width, height, &xt, &yt)
        }
        ScaleMethod::AreaMap => {
            let xt = area_taps(src.0, width);
            let yt = area_taps(src.1, height);
            resample(pix, width, height, &xt, &yt)
        }
        ScaleMethod::Auto => {
            let xt = auto_taps(src.0, width);
            let yt = auto_taps(src.1, height);
            resample(pix, width, height, &xt, &yt)
        }
    }
}

/// Scale an image using nearest-neighbor sampling
///
/// # Arguments
/// * `pix` - Input image
/// * `scale_x` - Horizontal scale factor
/// * `scale_y` - Vertical scale factor
pub fn scale_by_sampling(pix: &Pix, scale_x: f32, scale_y: f32) -> TransformResult<Pix> {
    let (w, h) = scaled_dims(pix, scale_x, scale_y)?;
    scale_to_size_with(pix, w, h, ScaleMethod::Sampling)
}

fn scaled_dims(pix: &Pix, scale_x: f32, scale_y: f32) -> TransformResult<(u32, u32)> {
    for s in [scale_x, scale_y] {
        if !s.is_finite() || s <= 0.0 {
            return Err(TransformError::InvalidScaleFactor(format!(
                "{} (must be finite and > 0)",
                s
            )));
        }
    }
    let w = ((pix.width() as f64 * scale_x as f64).round() as u32).max(1);
    let h = ((pix.height() as f64 * scale_y as f64).round() as u32).max(1);
    Ok((w, h))
}

/// Source taps `(index, weight)` for each destination position.
type Taps = Vec<Vec<(usize, f32)>>;

/// Bilinear taps; edge samples are clamped to the border pixel.
fn linear_taps(src: u32, dst: u32) -> Taps {
    let ratio = src as f64 / dst as f64;
    let last = src as usize - 1;
    (0..dst)
        .map(|d| {
            let fx = ((d as f64 + 0.5) * ratio - 0.5).max(0.0);
            let x0 = fx.floor() as usize;
            if x0 >= last {
                vec![(last, 1.0)]
            } else {
                let frac = (fx - x0 as f64) as f32;
                vec![(x0, 1.0 - frac), (x0 + 1, frac)]
            }
        })
        .collect()
}

/// Area-coverage taps: each destination pixel averages the source span
/// `[d * ratio, (d + 1) * ratio)`, weighting partial pixels by overlap.
fn area_taps(src: u32, dst: u32) -> Taps {
    let ratio = src as f64 / dst as f64;
    (0..dst)
        .map(|d| {
            let start = d as f64 * ratio;
            let end = ((d + 1) as f64 * ratio).min(src as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src as usize);
            (first..last)
                .filter_map(|s| {
                    let overlap = end.min((s + 1) as f64) - start.max(s as f64);
                    (overlap > 1e-9).then_some((s, (overlap / ratio) as f32))
                })
                .collect()
        })
        .collect()
}

/// Area taps for a shrinking axis, linear taps for a growing one.
fn auto_taps(src: u32, dst: u32) -> Taps {
    if dst <= src {
        area_taps(src, dst)
    } else {
        linear_taps(src, dst)
    }
}

/// Split an 8 bpp or 32 bpp image into per-channel float planes.
fn to_planes(pix: &Pix) -> TransformResult<Vec<Vec<f32>>> {
    let w = pix.width();
    let h = pix.height();
    let n = (w as usize) * (h as usize);

    match pix.depth() {
        PixelDepth::Bit8 => {
            let mut plane = Vec::with_capacity(n);
            for y in 0..h {
                for x in 0..w {
                    plane.push(pix.get_pixel_unchecked(x, y) as f32);
                }
            }
            Ok(vec![plane])
        }
        PixelDepth::Bit32 => {
            let nch = if pix.spp() == 4 { 4 } else { 3 };
            let mut planes = vec![Vec::with_capacity(n); nch];
            for y in 0..h {
                for x in 0..w {
                    let (r, g, b, a) = color::extract_rgba(pix.get_pixel_unchecked(x, y));
                    for (plane, v) in planes.iter_mut().zip([r, g, b, a]) {
                        plane.push(v as f32);
                    }
                }
            }
            Ok(planes)
        }
        PixelDepth::Bit1 => Err(TransformError::UnsupportedDepth(
            "interpolated scaling needs 8 or 32 bpp".to_string(),
        )),
    }
}

fn to_sample(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Separable resampling: horizontal pass, then vertical pass.
fn resample(pix: &Pix, dw: u32, dh: u32, xt: &Taps, yt: &Taps) -> TransformResult<Pix> {
    let planes = to_planes(pix)?;
    let sw = pix.width() as usize;
    let sh = pix.height() as usize;
    let (dwu, dhu) = (dw as usize, dh as usize);

    let out_planes: Vec<Vec<f32>> = planes
        .iter()
        .map(|plane| {
            let mut tmp = vec![0.0f32; sh * dwu];
            for y in 0..sh {
                let row = &plane[y * sw..(y + 1) * sw];
                for (dx, taps) in xt.iter().enumerate() {
                    tmp[y * dwu + dx] = taps.iter().map(|&(s, wt)| row[s] * wt).sum();
                }
            }
            let mut out = vec![0.0f32; dhu * dwu];
            for (dy, taps) in yt.iter().enumerate() {
                for dx in 0..dwu {
                    out[dy * dwu + dx] = taps.iter().map(|&(s, wt)| tmp[s * dwu + dx] * wt).sum();
                }
            }
            out
        })
        .collect();

    let mut out = PixMut::new(dw, dh, pix.depth())?;
    out.set_spp(pix.spp());
    out.set_informat(pix.informat());
    for dy in 0..dh {
        for dx in 0..dw {
            let i = (dy as usize) * dwu + dx as usize;
            let val = match out_planes.len() {
                1 => to_sample(out_planes[0][i]) as u32,
                n => color::compose_rgba(
                    to_sample(out_planes[0][i]),
                    to_sample(out_planes[1][i]),
                    to_sample(out_planes[2][i]),
                    if n == 4 {
                        to_sample(out_planes[3][i])
                    } else {
                        255
                    },
                ),
            };
            out.set_pixel_unchecked(dx, dy, val);
        }
    }
    Ok(out.into())
}

fn sample_to(pix: &Pix, dw: u32, dh: u32) -> TransformResult<Pix> {
    let sw = pix.width();
    let sh = pix.height();
    let index = |d: u32, src: u32, dst: u32| -> u32 {
        let s = ((d as f64 + 0.5) * src as f64 / dst as f64).floor() as u32;
        s.min(src - 1)
    };
    let xs: Vec<u32> = (0..dw).map(|dx| index(dx, sw, dw)).collect();

    let mut out = PixMut::new(dw, dh, pix.depth())?;
    out.set_spp(pix.spp());
    out.set_informat(pix.informat());
    for dy in 0..dh {
        let sy = index(dy, sh, dh);
        for (dx, &sx) in xs.iter().enumerate() {
            out.set_pixel_unchecked(dx as u32, dy, pix.get_pixel_unchecked(sx, sy));
        }
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pix: &Pix, y: u32) -> Vec<u32> {
        (0..pix.width())
            .map(|x| pix.get_pixel(x, y).unwrap())
            .collect()
    }

    #[test]
    fn test_area_map_block_average() {
        let pix = Pix::from_gray_bytes(
            4,
            4,
            &[
                0, 0, 100, 100, //
                0, 0, 100, 100, //
                200, 200, 40, 60, //
                200, 200, 60, 40,
            ],
        )
        .unwrap();
        let out = scale_to_size_with(&pix, 2, 2, ScaleMethod::AreaMap).unwrap();
        assert_eq!(row(&out, 0), vec![0, 100]);
        assert_eq!(row(&out, 1), vec![200, 50]);
    }

    #[test]
    fn test_area_map_fractional_coverage() {
        let pix = Pix::from_gray_bytes(3, 1, &[0, 90, 180]).unwrap();
        let out = scale_to_size_with(&pix, 2, 1, ScaleMethod::AreaMap).unwrap();
        assert_eq!(row(&out, 0), vec![30, 150]);
    }

    #[test]
    fn test_linear_upscale_center_aligned() {
        let pix = Pix::from_gray_bytes(2, 1, &[0, 100]).unwrap();
        let out = scale_to_size_with(&pix, 4, 1, ScaleMethod::Linear).unwrap();
        assert_eq!(row(&out, 0), vec![0, 25, 75, 100]);
    }

    #[test]
    fn test_auto_resolution() {
        let src = (100, 50);
        let d = PixelDepth::Bit8;
        assert_eq!(
            ScaleMethod::Auto.resolve(d, src, (50, 25)),
            ScaleMethod::AreaMap
        );
        assert_eq!(
            ScaleMethod::Auto.resolve(d, src, (100, 25)),
            ScaleMethod::AreaMap
        );
        assert_eq!(
            ScaleMethod::Auto.resolve(d, src, (200, 25)),
            ScaleMethod::Auto
        );
        assert_eq!(
            ScaleMethod::Auto.resolve(d, src, (200, 100)),
            ScaleMethod::Linear
        );
        assert_eq!(
            ScaleMethod::Auto.resolve(PixelDepth::Bit1, src, (50, 25)),
            ScaleMethod::Sampling
        );
        assert_eq!(
            ScaleMethod::Linear.resolve(d, src, (50, 25)),
            ScaleMethod::Linear
        );
    }

    #[test]
    fn test_auto_mixed_axes_keeps_thin_columns() {
        // Width shrinks 10 -> 3 while height grows 2 -> 4
        for col in 0..10u32 {
            let bytes: Vec<u8> = (0..20u32)
                .map(|i| if i % 10 == col { 0 } else { 255 })
                .collect();
            let pix = Pix::from_gray_bytes(10, 2, &bytes).unwrap();
            let out = scale_to_size_with(&pix, 3, 4, ScaleMethod::Auto).unwrap();
            let darkest = row(&out, 1).into_iter().min().unwrap();
            assert!(darkest < 255, "column {} dropped", col);
            // Vertical pass interpolates identical rows
            assert_eq!(row(&out, 0), row(&out, 3));
        }
    }

    #[test]
    fn test_auto_taps_per_axis() {
        assert_eq!(auto_taps(4, 2), area_taps(4, 2));
        assert_eq!(auto_taps(2, 4), linear_taps(2, 4));
    }

    #[test]
    fn test_rgb_channels_and_spp() {
        let pix = Pix::from_rgb_bytes(2, 1, &[255, 0, 0, 0, 0, 255]).unwrap();
        let out = scale_to_size_with(&pix, 1, 1, ScaleMethod::AreaMap).unwrap();
        assert_eq!(out.depth(), PixelDepth::Bit32);
        assert_eq!(out.spp(), 3);
        assert_eq!(out.get_rgb(0, 0), Some((128, 0, 128)));
    }

    #[test]
    fn test_scale_to_size_keeps_aspect() {
        let pix = Pix::new(200, 100, PixelDepth::Bit8).unwrap();
        let out = scale_to_size(&pix, 50, 0).unwrap();
        assert_eq!((out.width(), out.height()), (50, 25));
        let out = scale_to_size(&pix, 0, 300).unwrap();
        assert_eq!((out.width(), out.height()), (600, 300));
        assert!(scale_to_size(&pix, 0, 0).is_err());
    }

    #[test]
    fn test_invalid_scale_factor() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        assert!(matches!(
            scale(&pix, 0.0, 1.0, ScaleMethod::Linear),
            Err(TransformError::InvalidScaleFactor(_))
        ));
        assert!(scale(&pix, f32::NAN, 1.0, ScaleMethod::Linear).is_err());
    }

    #[test]
    fn test_binary_needs_sampling() {
        let mut pm = PixMut::new(2, 2, PixelDepth::Bit1).unwrap();
        pm.set_pixel(0, 0, 1).unwrap();
        let pix: Pix = pm.into();
        assert!(matches!(
            scale_to_size_with(&pix, 4, 4, ScaleMethod::Linear),
            Err(TransformError::UnsupportedDepth(_))
        ));
        let up = scale_by_sampling(&pix, 2.0, 2.0).unwrap();
        assert_eq!(up.depth(), PixelDepth::Bit1);
        assert_eq!(up.count_ones().unwrap(), 4);
        assert_eq!(up.get_pixel(1, 1), Some(1));
        assert_eq!(up.get_pixel(2, 2), Some(0));
    }

    #[test]
    fn test_same_size_is_identity() {
        let pix = Pix::from_gray_bytes(2, 2, &[1, 2, 3, 4]).unwrap();
        let out = scale_to_size(&pix, 2, 2).unwrap();
        assert!(pix.equals(&out));
    }
}
