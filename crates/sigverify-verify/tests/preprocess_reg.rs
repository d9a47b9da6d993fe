//! Signature normalization regression test
//!
//! Run with:
//! ```
//! cargo test -p sigverify-verify --test preprocess_reg
//! ```

use sigverify_core::{Box, ImageFormat};
use sigverify_region::{ConnectivityType, foreground_bounding_box};
use sigverify_test::{RegParams, fixtures};
use sigverify_verify::{
    CANONICAL_HEIGHT, CANONICAL_WIDTH, DEFAULT_PADDING, VerifyError, compare, crop_box, normalize,
};

#[test]
fn preprocess_reg() {
    let mut rp = RegParams::new("preprocess");

    // --- Gray signature on white paper ---
    let page = fixtures::signature_gray(400, 200).expect("gray fixture");
    let gray = normalize(&page).expect("normalize gray");
    rp.compare_values(CANONICAL_WIDTH as f64, gray.width() as f64, 0.0);
    rp.compare_values(CANONICAL_HEIGHT as f64, gray.height() as f64, 0.0);
    let distinct = gray.as_pix().count_distinct_values().expect("distinct");
    rp.compare_values(2.0, distinct as f64, 0.0);
    eprintln!("  gray: {} ink pixels", gray.ink_count());
    rp.write_pix_and_check(gray.as_pix(), ImageFormat::Png)
        .expect("write gray");

    // --- Deterministic ---
    let again = normalize(&page).expect("normalize again");
    rp.compare_pix(gray.as_pix(), again.as_pix());

    // --- Colored ink ---
    let rgb = fixtures::signature_rgb(400, 200, (20, 40, 160)).expect("rgb fixture");
    let color = normalize(&rgb).expect("normalize rgb");
    let distinct = color.as_pix().count_distinct_values().expect("distinct");
    rp.compare_values(2.0, distinct as f64, 0.0);
    let r = compare(&gray, &color, 0.6).expect("compare rgb");
    eprintln!("  rgb vs gray: {}", r);
    assert!(r.is_match(), "colored ink should match: {}", r);

    // --- Transparent canvas reads as paper ---
    let rgba = fixtures::signature_rgba(400, 200).expect("rgba fixture");
    let flat = normalize(&rgba).expect("normalize rgba");
    let r = compare(&gray, &flat, 0.6).expect("compare rgba");
    eprintln!("  rgba vs gray: {}", r);
    assert!(r.is_match(), "transparent canvas should match: {}", r);

    // --- Uneven lighting ---
    let lit = fixtures::with_uneven_lighting(&page).expect("lighting fixture");
    let shaded = normalize(&lit).expect("normalize uneven lighting");
    let r = compare(&gray, &shaded, 0.6).expect("compare lighting");
    eprintln!("  uneven lighting vs gray: {}", r);
    assert!(r.is_match(), "uneven lighting should match: {}", r);

    // --- Ink touching the image border: clamped crop, no error ---
    let (w, h) = (400u32, 200u32);
    let area = Box::new_unchecked(0, 0, 150, 60);
    let edge = fixtures::signature_gray_at(w, h, &area).expect("edge fixture");
    let edge_mask = sigverify_color::threshold_otsu(
        &sigverify_color::pix_convert_to_gray(&edge).expect("gray"),
        sigverify_color::Polarity::DarkForeground,
    )
    .expect("mask");
    let bounds = foreground_bounding_box(&edge_mask, ConnectivityType::EightWay)
        .expect("bounds")
        .expect("ink present");
    let crop = crop_box(&bounds, DEFAULT_PADDING, w, h).expect("crop");
    rp.compare_values(0.0, crop.x as f64, 0.0);
    rp.compare_values(0.0, crop.y as f64, 0.0);
    assert!(crop.right() <= w as i32 && crop.bottom() <= h as i32);
    let edged = normalize(&edge).expect("normalize edge");
    rp.compare_values(CANONICAL_WIDTH as f64, edged.width() as f64, 0.0);

    // --- Blank pages ---
    let blank = fixtures::blank_gray(10, 10).expect("blank fixture");
    assert!(matches!(
        normalize(&blank),
        Err(VerifyError::NoSignatureDetected)
    ));
    let dark = fixtures::solid_gray(50, 30, fixtures::INK).expect("solid fixture");
    assert!(matches!(
        normalize(&dark),
        Err(VerifyError::NoSignatureDetected)
    ));

    assert!(rp.cleanup(), "preprocess regression test failed");
}
