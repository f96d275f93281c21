use crate::shared::capture_metadata::CaptureMetadata;
use crate::shared::frame::Frame;

/// Produces frames from a camera-like source.
///
/// Implementations handle device/file details while the monitor works with
/// the abstract `Frame` and `CaptureMetadata` types. A failed `open` stands
/// in for a denied camera permission: the monitor reports the source as
/// blocked and never starts sampling.
pub trait CaptureSource: Send {
    /// Acquires the source and returns its metadata.
    fn open(&mut self) -> Result<CaptureMetadata, Box<dyn std::error::Error>>;

    /// Returns an iterator over frames in capture order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the source.
    fn close(&mut self);
}
