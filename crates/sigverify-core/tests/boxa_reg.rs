//! Box and clipping regression test
//!
//! Run with:
//! ```
//! cargo test -p sigverify-core --test boxa_reg
//! ```

use sigverify_core::{Box, Boxa};
use sigverify_test::{RegParams, fixtures};

#[test]
fn boxa_reg() {
    let mut rp = RegParams::new("boxa");

    // --- Union of boxes ---
    let boxa: Boxa = [
        Box::new_unchecked(40, 30, 10, 10),
        Box::new_unchecked(5, 60, 20, 5),
        Box::new_unchecked(90, 10, 3, 3),
    ]
    .into_iter()
    .collect();
    let bb = boxa.bounding_box().expect("non-empty boxa");
    rp.compare_values(5.0, bb.x as f64, 0.0);
    rp.compare_values(10.0, bb.y as f64, 0.0);
    rp.compare_values(88.0, bb.w as f64, 0.0);
    rp.compare_values(55.0, bb.h as f64, 0.0);
    assert!(boxa.iter().all(|b| bb.contains_box(b)));
    assert!(Boxa::new().bounding_box().is_none());

    // --- Expand then clip stays inside the image ---
    let (w, h) = (100, 70);
    for b in &boxa {
        let c = b.expand(15).clip(w, h).expect("overlaps image");
        assert!(c.x >= 0 && c.y >= 0 && c.right() <= w && c.bottom() <= h);
        assert!(c.contains_box(b));
    }

    // --- Clip an image to its signature area ---
    let page = fixtures::signature_gray(300, 150).expect("fixture");
    let area = fixtures::ink_bounds(&fixtures::signature_area(300, 150), 150);
    let crop = page.clip_box(&area).expect("clip");
    rp.compare_values(area.w as f64, crop.width() as f64, 0.0);
    rp.compare_values(area.h as f64, crop.height() as f64, 0.0);
    // All ink survives the crop
    let ink = |p: &sigverify_core::Pix| p.gray_histogram(1).expect("histogram")[fixtures::INK as usize];
    rp.compare_values(ink(&page) as f64, ink(&crop) as f64, 0.0);

    assert!(rp.cleanup(), "boxa regression test failed");
}
