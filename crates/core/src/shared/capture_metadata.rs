use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct CaptureMetadata {
    pub width: u32,
    pub height: u32,
    /// Nominal frames per second; 0.0 when the source has no native rate.
    pub fps: f64,
    /// Total frames for finite sources, `None` for live ones.
    pub total_frames: Option<usize>,
    pub source_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let meta = CaptureMetadata {
            width: 1280,
            height: 720,
            fps: 30.0,
            total_frames: Some(120),
            source_path: Some(PathBuf::from("/tmp/frames")),
        };
        assert_eq!(meta.width, 1280);
        assert_eq!(meta.height, 720);
        assert_eq!(meta.fps, 30.0);
        assert_eq!(meta.total_frames, Some(120));
        assert_eq!(meta.source_path, Some(PathBuf::from("/tmp/frames")));
    }

    #[test]
    fn test_live_source_metadata() {
        // Live sources report no frame count and no native rate
        let meta = CaptureMetadata {
            width: 640,
            height: 480,
            fps: 0.0,
            total_frames: None,
            source_path: None,
        };
        assert_eq!(meta.total_frames, None);
        assert_eq!(meta.fps, 0.0);
    }
}
