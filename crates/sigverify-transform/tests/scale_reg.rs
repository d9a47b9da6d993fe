//! Scale regression test
//!
//! Run with:
//! ```
//! cargo test -p sigverify-transform --test scale_reg
//! ```

use sigverify_core::{ImageFormat, Pix, PixMut, PixelDepth};
use sigverify_test::{RegParams, fixtures};
use sigverify_transform::{
    ScaleMethod, scale, scale_by_sampling, scale_to_size, scale_to_size_with,
};

#[test]
fn scale_reg() {
    let mut rp = RegParams::new("scale");

    let pixs = fixtures::signature_gray(400, 200).expect("signature fixture");
    let w = pixs.width();
    let h = pixs.height();

    // --- Test 1: Scale up 2x ---
    let up2 = scale(&pixs, 2.0, 2.0, ScaleMethod::Linear).expect("scale 2x");
    rp.compare_values((w * 2) as f64, up2.width() as f64, 0.0);
    rp.compare_values((h * 2) as f64, up2.height() as f64, 0.0);

    // --- Test 2: Scale down 0.5x with area mapping ---
    let down2 = scale(&pixs, 0.5, 0.5, ScaleMethod::AreaMap).expect("scale 0.5x");
    rp.compare_values((w / 2) as f64, down2.width() as f64, 0.0);
    rp.compare_values((h / 2) as f64, down2.height() as f64, 0.0);
    // Paper corners stay paper
    rp.compare_values(fixtures::PAPER as f64, down2.get_pixel(0, 0).unwrap_or(0) as f64, 0.0);

    // --- Test 3: Scale to the canonical size ---
    let sized = scale_to_size(&pixs, 300, 150).expect("scale_to_size");
    rp.compare_values(300.0, sized.width() as f64, 0.0);
    rp.compare_values(150.0, sized.height() as f64, 0.0);
    rp.write_pix_and_check(&sized, ImageFormat::Png)
        .expect("write sized");

    // --- Test 4: Area mapping preserves mean intensity ---
    let mean = |p: &Pix| -> f64 {
        let hist = p.gray_histogram(1).expect("histogram");
        let n: f64 = hist.iter().map(|&c| c as f64).sum();
        hist.iter()
            .enumerate()
            .map(|(v, &c)| v as f64 * c as f64)
            .sum::<f64>()
            / n
    };
    let quarter = scale_to_size_with(&pixs, 100, 50, ScaleMethod::AreaMap).expect("area 1/4");
    rp.compare_values(mean(&pixs), mean(&quarter), 0.5);

    // --- Test 5: Interpolation creates intermediate gray levels ---
    let levels = sized.count_distinct_values().expect("distinct");
    assert!(levels > 2, "expected smoothing, got {} levels", levels);

    // --- Test 6: Sampling keeps the original levels ---
    let sampled = scale_by_sampling(&pixs, 0.75, 0.75).expect("sampling");
    rp.compare_values(300.0, sampled.width() as f64, 0.0);
    rp.compare_values(2.0, sampled.count_distinct_values().expect("distinct") as f64, 0.0);

    // --- Test 7: Color images keep spp ---
    let rgb = fixtures::signature_rgb(400, 200, (200, 20, 20)).expect("rgb fixture");
    let rgb_sized = scale_to_size(&rgb, 300, 150).expect("rgb scale");
    assert_eq!(rgb_sized.depth(), PixelDepth::Bit32);
    rp.compare_values(3.0, rgb_sized.spp() as f64, 0.0);

    // --- Test 8: Scale 1.0 is the identity ---
    let s1 = scale(&pixs, 1.0, 1.0, ScaleMethod::Linear).expect("scale 1x");
    rp.compare_pix(&pixs, &s1);

    // --- Test 9: Wide, short crop keeps 1-px strokes ---
    // 1000x100 -> 300x150 shrinks the width and grows the height
    let mut dropped = 0;
    for x0 in 400..420u32 {
        let mut pm = PixMut::new(1000, 100, PixelDepth::Bit8).expect("page");
        pm.set_all(fixtures::PAPER as u32);
        for y in 0..100 {
            pm.set_pixel(x0, y, 0).expect("stroke");
        }
        let page: Pix = pm.into();
        let out = scale_to_size(&page, 300, 150).expect("wide crop");
        let darkest = (0..out.width())
            .map(|x| out.get_pixel(x, 75).unwrap_or(255))
            .min()
            .unwrap_or(255);
        if darkest == 255 {
            dropped += 1;
        }
    }
    rp.compare_values(0.0, dropped as f64, 0.0);

    assert!(rp.cleanup(), "scale regression test failed");
}
