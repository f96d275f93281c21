use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::capture::domain::capture_source::CaptureSource;
use crate::detection::domain::face_locator::FaceLocator;
use crate::hud::overlay_painter::OverlayPainter;
use crate::hud::overlay_sink::OverlaySink;
use crate::hud::status::{Status, StatusDisplay};
use crate::pipeline::cycle::{ApplyResult, Cadence, CycleAction, CycleReport, LatestPrediction};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::prediction::domain::prediction_client::Prediction;
use crate::prediction::infrastructure::predict_worker::{PredictJob, PredictOutcome, PredictWorker};
use crate::sampling::frame_sampler::FrameSampler;
use crate::shared::constants::DEFAULT_INTERVAL_MS;

/// Configuration for a monitor run.
#[derive(Clone, Copy, Debug)]
pub struct MonitorConfig {
    pub cadence: Cadence,
    /// Stop after this many cycles; `None` runs until the source ends.
    pub max_cycles: Option<u64>,
    /// How long to wait for in-flight predictions after the loop stops.
    pub drain_timeout: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            cadence: Cadence::Interval(Duration::from_millis(DEFAULT_INTERVAL_MS)),
            max_cycles: None,
            drain_timeout: Duration::from_secs(5),
        }
    }
}

/// What a finished run looked like.
#[derive(Clone, Debug)]
pub struct MonitorSummary {
    pub cycles_run: u64,
    /// The capture source refused to open; no cycle ever started.
    pub camera_blocked: bool,
    pub last_applied: Option<Prediction>,
}

/// Orchestrates the capture → locate → sample → predict → render loop.
///
/// Wires domain components together and drives one cycle per frame at the
/// configured cadence. This is a single-use struct: `run` consumes the
/// owned components, so calling it twice will fail.
///
/// Within a cycle the stages are strictly ordered; across cycles
/// predictions overlap freely and [`LatestPrediction`] keeps stale
/// responses from overwriting newer ones. Nothing short of source
/// exhaustion or cancellation stops the loop.
pub struct MonitorUseCase {
    source: Option<Box<dyn CaptureSource>>,
    locator: Option<Box<dyn FaceLocator>>,
    sampler: FrameSampler,
    worker: Option<PredictWorker>,
    painter: OverlayPainter,
    sink: Option<Box<dyn OverlaySink>>,
    status: Option<Box<dyn StatusDisplay>>,
    logger: Option<Box<dyn PipelineLogger>>,
    config: MonitorConfig,
    on_cycle: Option<Box<dyn Fn(&CycleReport) -> bool + Send>>,
    cancelled: Arc<AtomicBool>,
}

impl MonitorUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Box<dyn CaptureSource>,
        locator: Box<dyn FaceLocator>,
        sampler: FrameSampler,
        worker: PredictWorker,
        painter: OverlayPainter,
        sink: Box<dyn OverlaySink>,
        status: Box<dyn StatusDisplay>,
        logger: Box<dyn PipelineLogger>,
        config: MonitorConfig,
        on_cycle: Option<Box<dyn Fn(&CycleReport) -> bool + Send>>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            source: Some(source),
            locator: Some(locator),
            sampler,
            worker: Some(worker),
            painter,
            sink: Some(sink),
            status: Some(status),
            logger: Some(logger),
            config,
            on_cycle,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn run(&mut self) -> Result<MonitorSummary, Box<dyn std::error::Error>> {
        let mut source = self.source.take().ok_or("Monitor already ran")?;
        let mut locator = self.locator.take().ok_or("Monitor already ran")?;
        let mut worker = self.worker.take().ok_or("Monitor already ran")?;
        let mut sink = self.sink.take().ok_or("Monitor already ran")?;
        let mut status = self.status.take().ok_or("Monitor already ran")?;
        let mut logger = self.logger.take().ok_or("Monitor already ran")?;
        let on_cycle = self.on_cycle.take();

        let metadata = match source.open() {
            Ok(meta) => meta,
            Err(e) => {
                // Terminal for the session: surface and stop, no retry
                log::error!("capture source blocked: {e}");
                status.update(&Status::CameraBlocked);
                return Ok(MonitorSummary {
                    cycles_run: 0,
                    camera_blocked: true,
                    last_applied: None,
                });
            }
        };
        status.update(&Status::CameraActive);
        logger.info(&format!(
            "capture open: {}x{}",
            metadata.width, metadata.height
        ));

        let config = self.config;
        let sampler = &self.sampler;
        let painter = &self.painter;
        let cancelled = self.cancelled.clone();

        let mut latest = LatestPrediction::new();
        let mut cycles_run: u64 = 0;
        let mut in_flight: usize = 0;

        {
            let mut frames = source.frames();
            loop {
                if cancelled.load(Ordering::Relaxed) {
                    break;
                }
                if let Some(max) = config.max_cycles {
                    if cycles_run >= max {
                        break;
                    }
                }

                let cycle_started = Instant::now();
                let frame = match frames.next() {
                    None => break,
                    Some(Err(e)) => {
                        log::warn!("frame capture failed: {e}");
                        pace(&config.cadence, cycle_started);
                        continue;
                    }
                    Some(Ok(frame)) => frame,
                };
                let cycle = frame.cycle();

                let locate_started = Instant::now();
                let (face, locate_failed) = match locator.locate(&frame) {
                    Ok(face) => (face, false),
                    Err(e) => {
                        log::warn!("locate failed: {e}");
                        (None, true)
                    }
                };
                logger.timing("locate", ms_since(locate_started));

                let region = face.map(|b| b.to_pixel_region(frame.width(), frame.height()));

                let action = match &region {
                    None => {
                        status.update(&Status::NoFace);
                        if locate_failed {
                            CycleAction::LocateFailed
                        } else {
                            CycleAction::NoFace
                        }
                    }
                    Some(r) if r.is_empty() => CycleAction::EmptyRegion,
                    Some(r) => {
                        let sample_started = Instant::now();
                        match sampler.sample(&frame, Some(r)) {
                            Ok(Some(still)) => {
                                logger.timing("sample", ms_since(sample_started));
                                if worker.dispatch(PredictJob { cycle, still }) {
                                    in_flight += 1;
                                    CycleAction::Dispatched
                                } else {
                                    log::debug!("predict queue full, skipping cycle {cycle}");
                                    CycleAction::DispatchSkipped
                                }
                            }
                            Ok(None) => CycleAction::EmptyRegion,
                            Err(e) => {
                                log::warn!("sampling failed: {e}");
                                CycleAction::DispatchSkipped
                            }
                        }
                    }
                };

                for outcome in worker.drain() {
                    in_flight = in_flight.saturating_sub(1);
                    absorb_outcome(&outcome, &mut latest, status.as_mut(), logger.as_mut());
                }
                logger.metric("in_flight", in_flight as f64);

                let render_started = Instant::now();
                let mut overlay = frame.clone();
                let tracked = region.filter(|r| !r.is_empty());
                painter.paint(&mut overlay, tracked.as_ref(), latest.value());
                if let Err(e) = sink.write(&overlay) {
                    log::warn!("overlay write failed: {e}");
                }
                logger.timing("render", ms_since(render_started));

                cycles_run += 1;
                logger.cycle(cycle);

                let report = CycleReport {
                    cycle,
                    region,
                    action,
                };
                if let Some(callback) = &on_cycle {
                    if !callback(&report) {
                        break;
                    }
                }

                pace(&config.cadence, cycle_started);
            }
        }

        // Let in-flight predictions settle so the final state is honest
        let deadline = Instant::now() + config.drain_timeout;
        while in_flight > 0 {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                break;
            }
            match worker.next_outcome(left) {
                Some(outcome) => {
                    in_flight -= 1;
                    absorb_outcome(&outcome, &mut latest, status.as_mut(), logger.as_mut());
                }
                None => break,
            }
        }

        worker.shutdown();
        source.close();
        logger.summary();

        Ok(MonitorSummary {
            cycles_run,
            camera_blocked: false,
            last_applied: latest.value().cloned(),
        })
    }
}

fn absorb_outcome(
    outcome: &PredictOutcome,
    latest: &mut LatestPrediction,
    status: &mut dyn StatusDisplay,
    logger: &mut dyn PipelineLogger,
) {
    logger.timing("predict", outcome.elapsed_ms);
    match latest.apply(outcome) {
        ApplyResult::Applied => {
            // apply() only succeeds on Ok results
            if let Some(p) = latest.value() {
                status.update(&Status::Classified {
                    label: p.label.clone(),
                    confidence: p.confidence,
                });
            }
        }
        ApplyResult::Stale => {
            log::debug!("discarding stale prediction from cycle {}", outcome.cycle);
        }
        ApplyResult::Failed => {
            if let Err(e) = &outcome.result {
                log::debug!("prediction failed for cycle {}: {e}", outcome.cycle);
            }
        }
    }
}

fn pace(cadence: &Cadence, cycle_started: Instant) {
    if let Cadence::Interval(period) = cadence {
        if let Some(rest) = period.checked_sub(cycle_started.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}

fn ms_since(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
