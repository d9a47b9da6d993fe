//! Interactive verification session

use crate::bitmap::CanonicalBitmap;
use crate::preprocess::normalize_path;
use crate::scorer::{ComparisonResult, score_pix};
use crate::threshold::Threshold;
use crate::{VerifyError, VerifyResult};
use std::path::Path;

/// Holds a threshold and the last loaded reference and test signatures,
/// for front ends that bind a threshold control to one verifier.
///
/// All mutation goes through `&mut self`; share it across threads
/// behind a lock.
#[derive(Debug, Clone, Default)]
pub struct VerifierSession {
    threshold: Threshold,
    reference: Option<CanonicalBitmap>,
    test: Option<CanonicalBitmap>,
}

impl VerifierSession {
    /// Create an empty session with the default threshold
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Change the threshold. An invalid value leaves the current one in place.
    pub fn set_threshold<T>(&mut self, threshold: T) -> VerifyResult<()>
    where
        T: TryInto<Threshold>,
        VerifyError: From<T::Error>,
    {
        self.threshold = threshold.try_into()?;
        Ok(())
    }

    /// Decode and normalize the reference signature.
    ///
    /// On error the previously loaded reference is kept.
    pub fn load_reference<P: AsRef<Path>>(&mut self, path: P) -> VerifyResult<&CanonicalBitmap> {
        let bitmap = normalize_path(path)?;
        Ok(self.reference.insert(bitmap))
    }

    /// Decode and normalize the signature under test.
    ///
    /// On error the previously loaded test image is kept.
    pub fn load_test<P: AsRef<Path>>(&mut self, path: P) -> VerifyResult<&CanonicalBitmap> {
        let bitmap = normalize_path(path)?;
        Ok(self.test.insert(bitmap))
    }

    pub fn set_reference(&mut self, bitmap: CanonicalBitmap) {
        self.reference = Some(bitmap);
    }

    pub fn set_test(&mut self, bitmap: CanonicalBitmap) {
        self.test = Some(bitmap);
    }

    pub fn reference(&self) -> Option<&CanonicalBitmap> {
        self.reference.as_ref()
    }

    pub fn test(&self) -> Option<&CanonicalBitmap> {
        self.test.as_ref()
    }

    /// Drop both loaded signatures; the threshold is kept.
    pub fn clear(&mut self) {
        self.reference = None;
        self.test = None;
    }

    /// Compare the loaded signatures at the current threshold.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::MissingImage`] if either signature has not
    /// been loaded.
    pub fn verify(&self) -> VerifyResult<ComparisonResult> {
        let reference = self
            .reference
            .as_ref()
            .ok_or(VerifyError::MissingImage("reference"))?;
        let test = self.test.as_ref().ok_or(VerifyError::MissingImage("test"))?;
        score_pix(reference.as_pix(), test.as_pix(), self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigverify_core::Pix;

    fn bitmap(period: u32) -> CanonicalBitmap {
        let bytes: Vec<u8> = (0..300 * 150u32)
            .map(|i| if (i % 300) / period % 2 == 0 { 255 } else { 0 })
            .collect();
        CanonicalBitmap::from_pix(Pix::from_gray_bytes(300, 150, &bytes).unwrap()).unwrap()
    }

    #[test]
    fn test_verify_requires_both_images() {
        let mut s = VerifierSession::new();
        assert!(matches!(
            s.verify(),
            Err(VerifyError::MissingImage("reference"))
        ));
        s.set_reference(bitmap(4));
        assert!(matches!(s.verify(), Err(VerifyError::MissingImage("test"))));
        s.set_test(bitmap(4));
        assert!(s.verify().unwrap().is_match());
        s.clear();
        assert!(s.reference().is_none() && s.test().is_none());
    }

    #[test]
    fn test_threshold_updates() {
        let mut s = VerifierSession::new();
        assert_eq!(s.threshold().value(), Threshold::DEFAULT);
        s.set_threshold(0.9).unwrap();
        assert_eq!(s.threshold().value(), 0.9);
        assert!(s.set_threshold(0.05).is_err());
        assert_eq!(s.threshold().value(), 0.9);
    }

    #[test]
    fn test_failed_load_keeps_previous() {
        let mut s = VerifierSession::new();
        s.set_reference(bitmap(4));
        assert!(matches!(
            s.load_reference("/nonexistent/signature.png"),
            Err(VerifyError::DecodeError(_))
        ));
        assert!(s.reference().is_some());
    }
}
