//! Synthetic signature images
//!
//! Signatures are polylines in unit coordinates, stamped with a round
//! brush into a rectangular signature area on a page. Every stroke set
//! touches all four sides of the unit square, so the ink bounds of a
//! drawing are exactly [`ink_bounds`].

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use sigverify_core::{Box, ImageFormat, Pix, PixMut, PixelDepth, color};

/// Ink gray level of the gray fixtures
pub const INK: u8 = 20;
/// Paper gray level of the gray fixtures
pub const PAPER: u8 = 255;

type Strokes = &'static [&'static [(f32, f32)]];

/// Looping initial, a wave, and an underline.
const SIGNATURE_A: Strokes = &[
    &[
        (0.0, 0.9),
        (0.08, 0.1),
        (0.16, 0.0),
        (0.22, 0.3),
        (0.12, 0.6),
        (0.3, 0.7),
    ],
    &[
        (0.3, 0.7),
        (0.4, 0.35),
        (0.5, 0.75),
        (0.6, 0.3),
        (0.7, 0.7),
        (0.8, 0.4),
    ],
    &[(0.0, 0.9), (0.1, 1.0), (1.0, 0.85)],
];

/// Zigzag and a closed loop.
const SIGNATURE_B: Strokes = &[
    &[(0.0, 0.5), (0.15, 0.0), (0.3, 1.0), (0.45, 0.0), (0.6, 1.0)],
    &[(0.7, 0.5), (0.85, 0.2), (1.0, 0.5), (0.85, 0.8), (0.7, 0.5)],
];

/// Default signature area: the middle half of the width, the middle
/// third of the height.
pub fn signature_area(width: u32, height: u32) -> Box {
    let (w, h) = (width as i32, height as i32);
    Box::new_unchecked(w / 4, h / 3, w / 2, h / 3)
}

/// Brush radius used for a page of the given height.
pub fn stroke_radius(height: u32) -> i32 {
    (height as i32 / 100).max(1)
}

/// Bounding box of the ink drawn into `area` on a page of `height`.
pub fn ink_bounds(area: &Box, height: u32) -> Box {
    let r = stroke_radius(height);
    Box::new_unchecked(area.x - r, area.y - r, area.w + 2 * r + 1, area.h + 2 * r + 1)
}

fn stamp(pm: &mut PixMut, cx: i32, cy: i32, r: i32, val: u32) {
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if x >= 0 && y >= 0 && (x as u32) < pm.width() && (y as u32) < pm.height() {
                pm.set_pixel_unchecked(x as u32, y as u32, val);
            }
        }
    }
}

fn draw_strokes(pm: &mut PixMut, strokes: Strokes, area: &Box, val: u32) {
    let r = stroke_radius(pm.height());
    let to_page = |(u, v): (f32, f32)| {
        (
            area.x as f32 + u * area.w as f32,
            area.y as f32 + v * area.h as f32,
        )
    };
    for stroke in strokes {
        for seg in stroke.windows(2) {
            let (x0, y0) = to_page(seg[0]);
            let (x1, y1) = to_page(seg[1]);
            let steps = ((x1 - x0).hypot(y1 - y0).ceil() as u32).max(1);
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                let x = x0 + (x1 - x0) * t;
                let y = y0 + (y1 - y0) * t;
                stamp(pm, x.round() as i32, y.round() as i32, r, val);
            }
        }
    }
}

/// Uniform 8 bpp page.
pub fn solid_gray(width: u32, height: u32, val: u8) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    pm.set_all(val as u32);
    Ok(pm.into())
}

/// Blank white 8 bpp page.
pub fn blank_gray(width: u32, height: u32) -> TestResult<Pix> {
    solid_gray(width, height, PAPER)
}

/// Dark signature on white paper, drawn into `area`.
pub fn signature_gray_at(width: u32, height: u32, area: &Box) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    pm.set_all(PAPER as u32);
    draw_strokes(&mut pm, SIGNATURE_A, area, INK as u32);
    Ok(pm.into())
}

/// Dark signature on white paper, in the default [`signature_area`].
pub fn signature_gray(width: u32, height: u32) -> TestResult<Pix> {
    signature_gray_at(width, height, &signature_area(width, height))
}

/// A differently shaped signature on white paper.
pub fn other_signature_gray(width: u32, height: u32) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    pm.set_all(PAPER as u32);
    draw_strokes(&mut pm, SIGNATURE_B, &signature_area(width, height), INK as u32);
    Ok(pm.into())
}

/// Colored ink on white paper, 32 bpp RGB.
pub fn signature_rgb(width: u32, height: u32, ink: (u8, u8, u8)) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit32)?;
    pm.set_spp(3);
    pm.set_all(color::compose_rgb(255, 255, 255));
    let val = color::compose_rgb(ink.0, ink.1, ink.2);
    draw_strokes(&mut pm, SIGNATURE_A, &signature_area(width, height), val);
    Ok(pm.into())
}

/// Opaque dark ink on a fully transparent (black, alpha 0) canvas,
/// 32 bpp RGBA.
pub fn signature_rgba(width: u32, height: u32) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit32)?;
    pm.set_spp(4);
    pm.set_all(color::compose_rgba(0, 0, 0, 0));
    let val = color::compose_rgba(INK, INK, INK, 255);
    draw_strokes(&mut pm, SIGNATURE_A, &signature_area(width, height), val);
    Ok(pm.into())
}

/// Darken an 8 bpp page from left to right, down to 75% brightness at
/// the right edge.
pub fn with_uneven_lighting(pix: &Pix) -> TestResult<Pix> {
    let (w, h) = (pix.width(), pix.height());
    if pix.depth() != PixelDepth::Bit8 {
        return Err(TestError::Fixture(sigverify_core::Error::UnsupportedDepth(
            pix.depth().bits(),
        )));
    }
    let span = (w.max(2) - 1) as f32;
    let mut pm = PixMut::new(w, h, PixelDepth::Bit8)?;
    for y in 0..h {
        for x in 0..w {
            let gain = 1.0 - 0.25 * x as f32 / span;
            let v = pix.get_pixel_unchecked(x, y) as f32 * gain;
            pm.set_pixel_unchecked(x, y, v.round() as u32);
        }
    }
    Ok(pm.into())
}

/// Write a fixture as PNG into the regout directory and return its path.
pub fn write_fixture(pix: &Pix, name: &str) -> TestResult<String> {
    std::fs::create_dir_all(regout_dir())?;
    let path = format!("{}/{}.png", regout_dir(), name);
    sigverify_io::write_image(pix, &path, ImageFormat::Png).map_err(|e| {
        TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        }
    })?;
    Ok(path)
}
