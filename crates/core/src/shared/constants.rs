/// Label treated as the positive ("safe") class by the HUD and status line.
pub const POSITIVE_LABEL: &str = "Mask";

/// Default classification endpoint (matches the reference backend's bind).
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

/// Default fixed-interval cadence between sampling cycles.
pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// Default request timeout for the prediction client.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// JPEG quality for encoded face crops.
pub const JPEG_QUALITY: u8 = 90;

/// Fraction of the frame covered by the centered placeholder box.
pub const DEFAULT_REGION_FRACTION: f64 = 0.5;

/// In-flight prediction jobs the worker queue will hold before the
/// monitor starts skipping dispatch.
pub const PREDICT_QUEUE_CAPACITY: usize = 8;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
