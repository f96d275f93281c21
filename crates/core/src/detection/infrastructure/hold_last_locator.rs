use crate::detection::domain::face_locator::FaceLocator;
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Decorator that runs the inner locator every N frames, repeating the last
/// result in between.
///
/// Location is usually the expensive stage of a cycle; sampling and
/// prediction tolerate a slightly stale box far better than a stalled loop.
pub struct HoldLastLocator {
    inner: Box<dyn FaceLocator>,
    locate_interval: usize,
    frame_count: usize,
    last: Option<FaceBox>,
}

impl HoldLastLocator {
    pub fn new(inner: Box<dyn FaceLocator>, locate_interval: usize) -> Result<Self, &'static str> {
        if locate_interval < 1 {
            return Err("locate_interval must be >= 1");
        }
        Ok(Self {
            inner,
            locate_interval,
            frame_count: 0,
            last: None,
        })
    }
}

impl FaceLocator for HoldLastLocator {
    fn locate(&mut self, frame: &Frame) -> Result<Option<FaceBox>, Box<dyn std::error::Error>> {
        if self.frame_count % self.locate_interval == 0 {
            self.last = self.inner.locate(frame)?;
        }
        self.frame_count += 1;
        Ok(self.last)
    }
}
