use crate::hud::style::{HudStyle, Rgb};
use crate::prediction::domain::prediction_client::Prediction;
use crate::shared::face_box::PixelRegion;
use crate::shared::frame::Frame;

/// Height of the confidence bar in pixels.
const BAR_HEIGHT: i32 = 3;

/// Draws the HUD onto an overlay frame.
///
/// Every call paints from scratch onto the frame it is given; nothing is
/// carried between cycles, so the caller hands over a fresh copy of the
/// video content each time. With no region, the overlay stays bare video.
pub struct OverlayPainter {
    style: HudStyle,
}

impl OverlayPainter {
    pub fn new(style: HudStyle) -> Self {
        Self { style }
    }

    pub fn paint(
        &self,
        frame: &mut Frame,
        region: Option<&PixelRegion>,
        latest: Option<&Prediction>,
    ) {
        let region = match region {
            Some(r) if !r.is_empty() => *r,
            _ => return,
        };

        let color = self.style.box_color(latest);

        // Glow first so the outline paints over its inner rings
        for g in 1..=self.style.glow_radius as i32 {
            let alpha = 0.45 * (1.0 - g as f32 / (self.style.glow_radius as f32 + 1.0));
            stroke_rect(frame, outset(&region, g), color, alpha);
        }

        for t in 0..self.style.line_width as i32 {
            stroke_rect(frame, outset(&region, -t), color, 1.0);
        }

        if self.style.confidence_bar {
            if let Some(p) = latest {
                self.paint_confidence_bar(frame, &region, p, color);
            }
        }
    }

    fn paint_confidence_bar(
        &self,
        frame: &mut Frame,
        region: &PixelRegion,
        prediction: &Prediction,
        color: Rgb,
    ) {
        let inset = self.style.line_width as i32 + 2;
        let usable = region.width - 2 * inset;
        if usable <= 0 {
            return;
        }
        let filled = (usable as f64 * (prediction.confidence / 100.0).clamp(0.0, 1.0)) as i32;

        let y0 = region.y + inset;
        for dy in 0..BAR_HEIGHT {
            for dx in 0..filled {
                put_pixel(frame, region.x + inset + dx, y0 + dy, color, 1.0);
            }
        }
    }
}

impl Default for OverlayPainter {
    fn default() -> Self {
        Self::new(HudStyle::default())
    }
}

fn outset(region: &PixelRegion, by: i32) -> PixelRegion {
    PixelRegion {
        x: region.x - by,
        y: region.y - by,
        width: region.width + 2 * by,
        height: region.height + 2 * by,
    }
}

/// One-pixel rectangle outline; coordinates outside the frame are skipped.
fn stroke_rect(frame: &mut Frame, r: PixelRegion, color: Rgb, alpha: f32) {
    if r.width <= 0 || r.height <= 0 {
        return;
    }
    let (x0, y0) = (r.x, r.y);
    let (x1, y1) = (r.x + r.width - 1, r.y + r.height - 1);

    for x in x0..=x1 {
        put_pixel(frame, x, y0, color, alpha);
        put_pixel(frame, x, y1, color, alpha);
    }
    for y in y0 + 1..y1 {
        put_pixel(frame, x0, y, color, alpha);
        put_pixel(frame, x1, y, color, alpha);
    }
}

fn put_pixel(frame: &mut Frame, x: i32, y: i32, color: Rgb, alpha: f32) {
    let w = frame.width() as i32;
    let h = frame.height() as i32;
    if x < 0 || y < 0 || x >= w || y >= h {
        return;
    }
    let channels = frame.channels() as usize;
    let idx = (y as usize * w as usize + x as usize) * channels;
    let data = frame.data_mut();
    blend(&mut data[idx], color.r, alpha);
    blend(&mut data[idx + 1], color.g, alpha);
    blend(&mut data[idx + 2], color.b, alpha);
}

fn blend(dst: &mut u8, src: u8, alpha: f32) {
    *dst = (*dst as f32 * (1.0 - alpha) + src as f32 * alpha) as u8;
}
