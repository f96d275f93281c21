use crate::detection::domain::face_locator::FaceLocator;
use crate::shared::constants::DEFAULT_REGION_FRACTION;
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Locator that always reports a fixed centered box.
///
/// Stands in when no face-tracking collaborator is wired up: the HUD gets a
/// stable placeholder region and the sampler crops the middle of the frame.
pub struct CenteredLocator {
    fraction: f64,
}

impl CenteredLocator {
    /// `fraction` is the box size as a fraction of the frame; values are
    /// clamped to (0, 1].
    pub fn new(fraction: f64) -> Self {
        Self {
            fraction: fraction.clamp(f64::MIN_POSITIVE, 1.0),
        }
    }
}

impl Default for CenteredLocator {
    fn default() -> Self {
        Self::new(DEFAULT_REGION_FRACTION)
    }
}

impl FaceLocator for CenteredLocator {
    fn locate(&mut self, _frame: &Frame) -> Result<Option<FaceBox>, Box<dyn std::error::Error>> {
        Ok(Some(FaceBox::centered(self.fraction)))
    }
}
