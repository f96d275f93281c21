use crate::shared::frame::Frame;

/// Normalized face bounding box as produced by a detection collaborator.
///
/// Center coordinates and dimensions are fractions of the frame size in
/// `[0, 1]`. The box is consumed within the cycle that produced it; pixel
/// geometry is derived on demand via [`FaceBox::to_pixel_region`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceBox {
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl FaceBox {
    pub fn new(x_center: f64, y_center: f64, width: f64, height: f64) -> Self {
        Self {
            x_center,
            y_center,
            width,
            height,
        }
    }

    /// A box of `fraction` of the frame in each dimension, centered.
    pub fn centered(fraction: f64) -> Self {
        Self::new(0.5, 0.5, fraction, fraction)
    }

    /// Converts to pixel space, clamped to the frame rectangle.
    ///
    /// Coordinates are truncated to integers; a box that falls entirely
    /// outside the frame (or has non-positive size) yields an empty region.
    pub fn to_pixel_region(&self, frame_w: u32, frame_h: u32) -> PixelRegion {
        let left = (self.x_center - self.width / 2.0) * frame_w as f64;
        let top = (self.y_center - self.height / 2.0) * frame_h as f64;
        let right = (self.x_center + self.width / 2.0) * frame_w as f64;
        let bottom = (self.y_center + self.height / 2.0) * frame_h as f64;

        let x = (left as i32).max(0);
        let y = (top as i32).max(0);
        let w = ((right.min(frame_w as f64) as i32) - x).max(0);
        let h = ((bottom.min(frame_h as f64) as i32) - y).max(0);

        PixelRegion {
            x,
            y,
            width: w,
            height: h,
        }
    }
}

/// A clamped pixel-space rectangle within a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRegion {
    /// Empty regions skip sampling for the cycle.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// The full frame as a region.
    pub fn full(frame: &Frame) -> Self {
        Self {
            x: 0,
            y: 0,
            width: frame.width() as i32,
            height: frame.height() as i32,
        }
    }
}
