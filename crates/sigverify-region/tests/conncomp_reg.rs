//! Connected component regression test
//!
//! Run with:
//! ```
//! cargo test -p sigverify-region --test conncomp_reg
//! ```
//!
//! Generate golden files:
//! ```
//! REGTEST_MODE=generate cargo test -p sigverify-region --test conncomp_reg
//! ```

use sigverify_color::{Polarity, threshold_to_binary};
use sigverify_core::{Box, ImageFormat};
use sigverify_region::{
    ConnectivityType, find_connected_components, foreground_bounding_box,
    label_connected_components,
};
use sigverify_test::{RegParams, fixtures};

#[test]
fn conncomp_reg() {
    let mut rp = RegParams::new("conncomp");

    let (w, h) = (400, 200);
    let page = fixtures::signature_gray(w, h).expect("signature fixture");
    let binary = threshold_to_binary(&page, 128, Polarity::DarkForeground).expect("binarize");

    // --- 4-cc vs 8-cc counts ---
    let comps_4 = find_connected_components(&binary, ConnectivityType::FourWay)
        .expect("4-way components");
    let comps_8 = find_connected_components(&binary, ConnectivityType::EightWay)
        .expect("8-way components");
    let n1 = comps_4.len();
    let n2 = comps_8.len();
    eprintln!("Number of 4 c.c.: n1 = {}", n1);
    eprintln!("Number of 8 c.c.: n2 = {}", n2);
    assert!(
        n2 <= n1,
        "8-way components ({}) should be <= 4-way components ({})",
        n2,
        n1
    );
    // The three strokes touch end to end
    rp.compare_values(1.0, n2 as f64, 0.0);

    // --- Pixel counts are conserved ---
    let ink = binary.count_ones().expect("count ones") as f64;
    let total_4: u32 = comps_4.iter().map(|c| c.pixel_count).sum();
    let total_8: u32 = comps_8.iter().map(|c| c.pixel_count).sum();
    rp.compare_values(ink, total_4 as f64, 0.0);
    rp.compare_values(ink, total_8 as f64, 0.0);

    // --- Union bounding box equals the drawn ink bounds ---
    let expected = fixtures::ink_bounds(&fixtures::signature_area(w, h), h);
    let bbox = foreground_bounding_box(&binary, ConnectivityType::EightWay)
        .expect("bounding box")
        .expect("foreground present");
    rp.compare_values(expected.x as f64, bbox.x as f64, 0.0);
    rp.compare_values(expected.y as f64, bbox.y as f64, 0.0);
    rp.compare_values(expected.w as f64, bbox.w as f64, 0.0);
    rp.compare_values(expected.h as f64, bbox.h as f64, 0.0);

    // --- Every component lies inside the union box ---
    for comp in &comps_4 {
        assert!(comp.pixel_count > 0);
        assert!(bbox.contains_box(&comp.bounds));
    }

    // --- Edge-touching signature: box starts at the image origin ---
    let area = Box::new_unchecked(0, 0, 150, 60);
    let edge = fixtures::signature_gray_at(w, h, &area).expect("edge fixture");
    let edge_bin = threshold_to_binary(&edge, 128, Polarity::DarkForeground).expect("binarize");
    let ebox = foreground_bounding_box(&edge_bin, ConnectivityType::EightWay)
        .expect("bounding box")
        .expect("foreground present");
    rp.compare_values(0.0, ebox.x as f64, 0.0);
    rp.compare_values(0.0, ebox.y as f64, 0.0);

    // --- Label image ---
    let labels = label_connected_components(&binary, ConnectivityType::EightWay).expect("labels");
    rp.compare_values(w as f64, labels.width() as f64, 0.0);
    let max_label = (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter_map(|(x, y)| labels.get_pixel(x, y))
        .max()
        .unwrap_or(0);
    rp.compare_values(n2 as f64, max_label as f64, 0.0);

    rp.write_pix_and_check(&binary, ImageFormat::Png)
        .expect("write binary");

    assert!(rp.cleanup(), "conncomp regression test failed");
}
