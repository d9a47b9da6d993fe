//! End-to-end verification regression test
//!
//! Writes synthetic signatures as PNG files and runs the file-based
//! entry points on them.
//!
//! Run with:
//! ```
//! cargo test -p sigverify-verify --test verify_reg
//! ```

use sigverify_core::ImageFormat;
use sigverify_test::{RegParams, fixtures};
use sigverify_verify::{
    Threshold, VerifierSession, VerifyError, compare, normalize, normalize_bytes, normalize_path,
    verify_files,
};

#[test]
fn verify_reg() {
    let mut rp = RegParams::new("verify");

    let page = fixtures::signature_gray(480, 240).expect("signature fixture");
    let other = fixtures::other_signature_gray(480, 240).expect("other fixture");
    let blank = fixtures::blank_gray(10, 10).expect("blank fixture");
    let ref_path = fixtures::write_fixture(&page, "verify_reference").expect("write reference");
    let other_path = fixtures::write_fixture(&other, "verify_other").expect("write other");
    let blank_path = fixtures::write_fixture(&blank, "verify_blank").expect("write blank");

    // --- Same file as reference and test ---
    let same = verify_files(&ref_path, &ref_path, 0.6).expect("verify same file");
    eprintln!("  same file: {}", same);
    rp.compare_values(1.0, same.score(), 0.0);
    rp.compare_values(100.0, same.percentage(), 0.0);
    assert!(same.is_match());
    let strict = Threshold::new(0.99).expect("threshold");
    let same_strict =
        verify_files(&ref_path, &ref_path, strict).expect("verify validated threshold");
    rp.compare_values(1.0, same_strict.score(), 0.0);
    assert!(same_strict.is_match());

    // --- File path and in-memory entry points agree with normalize ---
    let from_path = normalize_path(&ref_path).expect("normalize path");
    let bytes = std::fs::read(&ref_path).expect("read fixture");
    let from_bytes = normalize_bytes(&bytes).expect("normalize bytes");
    let direct = normalize(&page).expect("normalize pix");
    rp.compare_pix(direct.as_pix(), from_path.as_pix());
    rp.compare_pix(direct.as_pix(), from_bytes.as_pix());

    // --- JPEG input, gray and color, matches the PNG path ---
    let gray_jpeg =
        sigverify_io::write_image_mem(&page, ImageFormat::Jpeg).expect("encode gray jpeg");
    let from_gray_jpeg = normalize_bytes(&gray_jpeg).expect("normalize gray jpeg");
    let r = compare(&from_path, &from_gray_jpeg, Threshold::DEFAULT).expect("compare gray jpeg");
    eprintln!("  gray jpeg vs png: {}", r);
    assert!(r.is_match(), "gray jpeg should match: {}", r);
    let rgb = fixtures::signature_rgb(480, 240, (20, 30, 120)).expect("rgb fixture");
    let rgb_jpeg =
        sigverify_io::write_image_mem(&rgb, ImageFormat::Jpeg).expect("encode rgb jpeg");
    let from_rgb_jpeg = normalize_bytes(&rgb_jpeg).expect("normalize rgb jpeg");
    let r = compare(&from_path, &from_rgb_jpeg, Threshold::DEFAULT).expect("compare rgb jpeg");
    eprintln!("  rgb jpeg vs png: {}", r);
    assert!(r.is_match(), "rgb jpeg should match: {}", r);

    // --- Different signatures score below self-comparison ---
    let diff = verify_files(&ref_path, &other_path, Threshold::DEFAULT).expect("verify other");
    eprintln!("  different signatures: {}", diff);
    assert!(diff.score() < same.score());

    // --- Complement scores below self-comparison ---
    let inv = direct.complement().expect("complement");
    let r = compare(&direct, &inv, 0.6).expect("compare complement");
    assert!(r.score() < 1.0);
    assert!(!r.is_match());

    // --- Verdict is monotone in the threshold ---
    let mut accepted = true;
    for i in 1..=10 {
        let t = i as f64 / 10.0;
        let v = compare(&direct, &from_path, t).expect("compare").is_match();
        assert!(accepted || !v, "verdict flipped back at threshold {}", t);
        accepted = v;
        let v = verify_files(&ref_path, &other_path, t)
            .expect("verify")
            .is_match();
        assert_eq!(v, diff.score() >= t);
    }

    // --- Error paths ---
    assert!(matches!(
        verify_files("/nonexistent/a.png", "/nonexistent/b.png", 1.5),
        Err(VerifyError::InvalidThreshold(t)) if t == 1.5
    ));
    assert!(matches!(
        verify_files(&blank_path, &ref_path, 0.6),
        Err(VerifyError::NoSignatureDetected)
    ));
    assert!(matches!(
        normalize_bytes(b"\x89PNG\r\n\x1a\ntruncated"),
        Err(VerifyError::DecodeError(_))
    ));
    assert!(matches!(
        normalize_path("/nonexistent/signature.png"),
        Err(VerifyError::DecodeError(_))
    ));

    // --- Session ---
    let mut session = VerifierSession::new();
    assert!(matches!(
        session.verify(),
        Err(VerifyError::MissingImage(_))
    ));
    session.load_reference(&ref_path).expect("load reference");
    session.load_test(&other_path).expect("load test");
    let first = session.verify().expect("session verify");
    rp.compare_values(diff.score(), first.score(), 1e-12);
    session.set_threshold(0.1).expect("threshold");
    let low = session.verify().expect("session verify");
    assert_eq!(low.is_match(), diff.score() >= 0.1);
    assert!(session.load_test(&blank_path).is_err());
    rp.compare_values(
        diff.score(),
        session.verify().expect("session verify").score(),
        1e-12,
    );

    assert!(rp.cleanup(), "verify regression test failed");
}
