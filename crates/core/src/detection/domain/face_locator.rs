use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Domain interface for the face-locating collaborator.
///
/// Yields zero or one detections per frame as a normalized bounding box.
/// The locator itself is external to this crate: any implementation
/// satisfying this contract plugs in. Implementations may be stateful
/// (e.g., holding results between frames), hence `&mut self`.
pub trait FaceLocator: Send {
    fn locate(&mut self, frame: &Frame) -> Result<Option<FaceBox>, Box<dyn std::error::Error>>;
}
