use crate::prediction::domain::prediction_client::Prediction;

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Positive ("safe") class color.
pub const SAFE_COLOR: Rgb = Rgb::new(0x00, 0xff, 0x99);
/// Negative class color.
pub const ALERT_COLOR: Rgb = Rgb::new(0xff, 0x33, 0x33);
/// Box color before any classification has been applied.
pub const NEUTRAL_COLOR: Rgb = Rgb::new(0x00, 0xea, 0xff);
/// Status background when no face is in frame.
pub const NO_FACE_COLOR: Rgb = Rgb::new(0x11, 0x33, 0x44);
/// Status background when the capture source could not be opened.
pub const BLOCKED_COLOR: Rgb = Rgb::new(0x44, 0x11, 0x11);

/// Visual parameters for the HUD overlay.
#[derive(Clone, Debug)]
pub struct HudStyle {
    /// Outline thickness in pixels.
    pub line_width: u32,
    /// How far the glow extends outside the outline; 0 disables it.
    pub glow_radius: u32,
    /// Draw a confidence bar along the inside top edge of the box.
    pub confidence_bar: bool,
}

impl HudStyle {
    /// Box color for the latest applied classification.
    pub fn box_color(&self, latest: Option<&Prediction>) -> Rgb {
        match latest {
            None => NEUTRAL_COLOR,
            Some(p) if p.is_positive() => SAFE_COLOR,
            Some(_) => ALERT_COLOR,
        }
    }
}

impl Default for HudStyle {
    fn default() -> Self {
        Self {
            line_width: 4,
            glow_radius: 8,
            confidence_bar: true,
        }
    }
}
