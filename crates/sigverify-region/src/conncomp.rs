//! Connected component analysis
//!
//! This module provides functions for finding and labeling connected components
//! in binary images. It uses a Union-Find (disjoint set) structure over a
//! two-pass raster scan.
//!
//! The outer boundary of an 8-connected component encloses exactly the
//! component's pixels, so the component bounding boxes are the bounding
//! boxes of the external contours of the foreground.

use crate::error::{RegionError, RegionResult};
use sigverify_core::{Box, Boxa, Pix, PixMut, PixelDepth};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

/// A connected component in an image
#[derive(Debug, Clone)]
pub struct ConnectedComponent {
    /// Label of this component (1-based, raster order of first pixel)
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Box,
}

impl ConnectedComponent {
    /// Create a new connected component
    pub fn new(label: u32, pixel_count: u32, bounds: Box) -> Self {
        Self {
            label,
            pixel_count,
            bounds,
        }
    }
}

/// Disjoint-set forest over provisional labels.
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // Index 0 is the background and never merged
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi as usize] = lo;
        }
    }
}

fn check_1bpp(pix: &Pix) -> RegionResult<()> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1 bpp binary",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Raster-scan labeling; returns final labels (row-major) and the
/// component list.
fn label_components(
    pix: &Pix,
    connectivity: ConnectivityType,
) -> RegionResult<(Vec<u32>, Vec<ConnectedComponent>)> {
    check_1bpp(pix)?;

    let w = pix.width() as usize;
    let h = pix.height() as usize;
    let mut labels = vec![0u32; w * h];
    let mut uf = UnionFind::new();

    for y in 0..h {
        for x in 0..w {
            if pix.get_pixel_unchecked(x as u32, y as u32) == 0 {
                continue;
            }

            let mut neighbors = [0u32; 4];
            let mut n = 0;
            if x > 0 {
                neighbors[n] = labels[y * w + x - 1];
                n += 1;
            }
            if y > 0 {
                let up = (y - 1) * w;
                neighbors[n] = labels[up + x];
                n += 1;
                if connectivity == ConnectivityType::EightWay {
                    if x > 0 {
                        neighbors[n] = labels[up + x - 1];
                        n += 1;
                    }
                    if x + 1 < w {
                        neighbors[n] = labels[up + x + 1];
                        n += 1;
                    }
                }
            }

            let min_label = neighbors[..n].iter().copied().filter(|&l| l != 0).min();
            let label = match min_label {
                None => uf.make_set(),
                Some(m) => {
                    for &l in neighbors[..n].iter().filter(|&&l| l != 0 && l != m) {
                        uf.union(m, l);
                    }
                    m
                }
            };
            labels[y * w + x] = label;
        }
    }

    // Second pass: resolve roots and renumber in raster order
    let mut remap = vec![0u32; uf.parent.len()];
    let mut components: Vec<ConnectedComponent> = Vec::new();
    // (min_x, min_y, max_x, max_y) per final label
    let mut extents: Vec<(usize, usize, usize, usize)> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if labels[idx] == 0 {
                continue;
            }
            let root = uf.find(labels[idx]) as usize;
            if remap[root] == 0 {
                components.push(ConnectedComponent::new(
                    components.len() as u32 + 1,
                    0,
                    Box::default(),
                ));
                extents.push((x, y, x, y));
                remap[root] = components.len() as u32;
            }
            let final_label = remap[root];
            labels[idx] = final_label;

            let i = (final_label - 1) as usize;
            components[i].pixel_count += 1;
            let e = &mut extents[i];
            e.0 = e.0.min(x);
            e.1 = e.1.min(y);
            e.2 = e.2.max(x);
            e.3 = e.3.max(y);
        }
    }

    for (cc, &(x0, y0, x1, y1)) in components.iter_mut().zip(&extents) {
        cc.bounds = Box::new_unchecked(
            x0 as i32,
            y0 as i32,
            (x1 - x0 + 1) as i32,
            (y1 - y0 + 1) as i32,
        );
    }

    Ok((labels, components))
}

/// Find all connected components in a binary image
///
/// Returns a vector of connected components, each with a label, pixel count,
/// and bounding box. Labels are assigned in raster order of each
/// component's first pixel.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] if the image is not 1 bpp.
pub fn find_connected_components(
    pix: &Pix,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    let (_, components) = label_components(pix, connectivity)?;
    log::debug!(
        "found {} components ({:?}) in {}x{}",
        components.len(),
        connectivity,
        pix.width(),
        pix.height()
    );
    Ok(components)
}

/// Label all connected components in a binary image
///
/// Returns a 32-bit image where each pixel contains the label of its
/// component (0 for background).
pub fn label_connected_components(pix: &Pix, connectivity: ConnectivityType) -> RegionResult<Pix> {
    let (labels, _) = label_components(pix, connectivity)?;
    let w = pix.width();
    let mut out = PixMut::new(w, pix.height(), PixelDepth::Bit32)?;
    out.set_spp(1);
    for (i, &label) in labels.iter().enumerate() {
        out.set_pixel_unchecked(i as u32 % w, i as u32 / w, label);
    }
    Ok(out.into())
}

/// Bounding box of the union of all foreground regions.
///
/// Returns `None` when the image has no foreground pixels.
pub fn foreground_bounding_box(
    pix: &Pix,
    connectivity: ConnectivityType,
) -> RegionResult<Option<Box>> {
    let components = find_connected_components(pix, connectivity)?;
    let boxa: Boxa = components.iter().map(|c| c.bounds).collect();
    Ok(boxa.bounding_box())
}
