use std::path::PathBuf;

use crate::hud::overlay_sink::OverlaySink;
use crate::shared::frame::Frame;

/// Writes each overlay frame as a numbered PNG using the `image` crate.
pub struct ImageFileSink {
    dir: PathBuf,
}

impl ImageFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl OverlaySink for ImageFileSink {
    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::create_dir_all(&self.dir)?;

        let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("Failed to create image from frame data")?;

        let path = self.dir.join(format!("overlay_{:06}.png", frame.cycle()));
        img.save(path)?;
        Ok(())
    }
}
