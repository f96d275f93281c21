use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use maskwatch_core::capture::infrastructure::image_dir_source::ImageDirSource;
use maskwatch_core::detection::domain::face_locator::FaceLocator;
use maskwatch_core::detection::infrastructure::centered_locator::CenteredLocator;
use maskwatch_core::detection::infrastructure::hold_last_locator::HoldLastLocator;
use maskwatch_core::hud::infrastructure::image_file_sink::ImageFileSink;
use maskwatch_core::hud::overlay_painter::OverlayPainter;
use maskwatch_core::hud::overlay_sink::{NullOverlaySink, OverlaySink};
use maskwatch_core::hud::status::LogStatusDisplay;
use maskwatch_core::pipeline::cycle::Cadence;
use maskwatch_core::pipeline::monitor_use_case::{MonitorConfig, MonitorUseCase};
use maskwatch_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use maskwatch_core::prediction::infrastructure::http_prediction_client::HttpPredictionClient;
use maskwatch_core::prediction::infrastructure::predict_worker::PredictWorker;
use maskwatch_core::sampling::frame_sampler::FrameSampler;
use maskwatch_core::shared::constants::{
    DEFAULT_ENDPOINT, DEFAULT_INTERVAL_MS, DEFAULT_REGION_FRACTION, DEFAULT_TIMEOUT_MS,
    JPEG_QUALITY,
};

/// Live mask-compliance monitor over a directory of camera frames.
#[derive(Parser)]
#[command(name = "maskwatch")]
struct Cli {
    /// Directory of frame images to treat as the camera feed.
    frames: PathBuf,

    /// Classification endpoint URL.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Milliseconds between cycles (0 = one cycle per frame, unpaced).
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MS)]
    interval_ms: u64,

    /// Write annotated overlay frames to this directory.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Placeholder face box size as a fraction of the frame (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_REGION_FRACTION)]
    region: f64,

    /// Run the locator every Nth cycle, holding the last box in between.
    #[arg(long, default_value_t = 1)]
    locate_every: usize,

    /// Request timeout for the prediction endpoint, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Cycle through the frame directory forever.
    #[arg(long)]
    repeat: bool,

    /// Stop after this many cycles.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// JPEG quality for sampled face crops (1-100).
    #[arg(long, default_value_t = JPEG_QUALITY)]
    quality: u8,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let source = ImageDirSource::new(&cli.frames, cli.repeat);
    let locator = build_locator(&cli)?;
    let client =
        HttpPredictionClient::new(&cli.endpoint, Duration::from_millis(cli.timeout_ms))?;
    let worker = PredictWorker::spawn(Box::new(client));

    let sink: Box<dyn OverlaySink> = match &cli.output {
        Some(dir) => Box::new(ImageFileSink::new(dir)),
        None => Box::new(NullOverlaySink),
    };

    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;

    let config = MonitorConfig {
        cadence: Cadence::from_interval_ms(cli.interval_ms),
        max_cycles: cli.max_cycles,
        drain_timeout: Duration::from_millis(cli.timeout_ms),
    };

    let mut monitor = MonitorUseCase::new(
        Box::new(source),
        locator,
        FrameSampler::new(cli.quality),
        worker,
        OverlayPainter::default(),
        sink,
        Box::new(LogStatusDisplay::new()),
        Box::new(StdoutPipelineLogger::default()),
        config,
        None,
        Some(cancelled),
    );

    let summary = monitor.run()?;
    if summary.camera_blocked {
        log::warn!("capture source blocked; no cycles ran");
    } else {
        log::info!("monitor stopped after {} cycles", summary.cycles_run);
    }
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !(cli.region > 0.0 && cli.region <= 1.0) {
        return Err(format!("--region must be in (0.0, 1.0], got {}", cli.region).into());
    }
    if cli.locate_every < 1 {
        return Err("--locate-every must be >= 1".into());
    }
    if cli.quality == 0 || cli.quality > 100 {
        return Err(format!("--quality must be 1-100, got {}", cli.quality).into());
    }
    Ok(())
}

fn build_locator(cli: &Cli) -> Result<Box<dyn FaceLocator>, Box<dyn std::error::Error>> {
    let base: Box<dyn FaceLocator> = Box::new(CenteredLocator::new(cli.region));
    if cli.locate_every > 1 {
        Ok(Box::new(HoldLastLocator::new(base, cli.locate_every)?))
    } else {
        Ok(base)
    }
}
