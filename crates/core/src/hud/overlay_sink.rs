use crate::shared::frame::Frame;

/// Destination for painted overlay frames.
///
/// The overlay surface is abstract: a directory of stills, a window, a
/// stream. The monitor writes one frame per cycle and never reads back.
pub trait OverlaySink: Send {
    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}

/// Discards every frame. For headless runs and tests.
pub struct NullOverlaySink;

impl OverlaySink for NullOverlaySink {
    fn write(&mut self, _frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}
