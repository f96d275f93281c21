use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for monitor orchestration events.
///
/// Decouples the monitor loop from specific output mechanisms (stdout, GUI
/// signals, log crate) so each caller can observe cycle behavior without
/// changing the orchestration code.
pub trait PipelineLogger: Send {
    /// Report that a cycle finished.
    fn cycle(&mut self, cycle: u64);

    /// Record how long a named stage took within one cycle.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. in-flight requests).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn cycle(&mut self, _cycle: u64) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger that tracks per-stage timing and metrics and
/// reports a summary when the monitor stops.
///
/// Cycle output is throttled to every `throttle_cycles` cycles; a live
/// monitor has no known total, so progress is a running count.
pub struct StdoutPipelineLogger {
    throttle_cycles: u64,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    cycles_seen: u64,
    messages: Vec<String>,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_cycles: u64) -> Self {
        Self {
            throttle_cycles: throttle_cycles.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            cycles_seen: 0,
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let cycles = self.cycles_seen;
        let mut lines = Vec::new();

        lines.push(format!(
            "Monitor summary ({cycles} cycles, {:.1}s total):",
            elapsed_ms / 1000.0
        ));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = if durations.is_empty() {
                0.0
            } else {
                total_ms / durations.len() as f64
            };
            lines.push(format!(
                "  {stage:12}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms"
            ));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let values = &self.metrics[name];
            let avg = if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            };
            lines.push(format!("  {name}: avg {avg:.1}"));
        }

        if cycles > 0 && elapsed_ms > 0.0 {
            let rate = cycles as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Rate: {rate:.1} cycles/s"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn cycle(&mut self, cycle: u64) {
        self.cycles_seen += 1;
        if cycle % self.throttle_cycles == 0 {
            log::info!("Cycle {cycle}");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullPipelineLogger;
        logger.cycle(1);
        logger.timing("locate", 5.0);
        logger.metric("in_flight", 3.0);
        logger.info("hello");
        logger.summary();
        // No panics = success
    }

    #[test]
    fn test_timing_records_values() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.timing("locate", 20.0);
        logger.timing("locate", 30.0);
        logger.timing("render", 5.0);

        let locate = logger.timings_for("locate").unwrap();
        assert_eq!(locate.len(), 2);
        assert!((locate[0] - 20.0).abs() < f64::EPSILON);
        assert!((locate[1] - 30.0).abs() < f64::EPSILON);

        let render = logger.timings_for("render").unwrap();
        assert_eq!(render.len(), 1);
    }

    #[test]
    fn test_metric_records_values() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.metric("in_flight", 3.0);
        logger.metric("in_flight", 4.0);

        let values = logger.metrics_for("in_flight").unwrap();
        assert_eq!(values.len(), 2);
        let avg = values.iter().sum::<f64>() / values.len() as f64;
        assert!((avg - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_includes_stages_and_metrics() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.cycle(0);
        logger.cycle(1);
        logger.timing("predict", 40.0);
        logger.metric("in_flight", 2.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Monitor summary"));
        assert!(summary.contains("predict"));
        assert!(summary.contains("in_flight"));
        assert!(summary.contains("2 cycles"));
    }

    #[test]
    fn test_summary_includes_cycle_rate() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.cycle(0);
        logger.timing("locate", 10.0);
        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("cycles/s"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let logger = StdoutPipelineLogger::new(10);
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_cycle_counter_tracks_all_cycles() {
        let mut logger = StdoutPipelineLogger::new(10);
        for i in 0..20 {
            logger.cycle(i);
        }
        assert_eq!(logger.cycles_seen, 20);
    }

    #[test]
    fn test_info_stores_messages() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.info("monitor started");
        assert_eq!(logger.messages.len(), 1);
        assert_eq!(logger.messages[0], "monitor started");
    }

    #[test]
    fn test_default_throttle() {
        let logger = StdoutPipelineLogger::default();
        assert_eq!(logger.throttle_cycles, 10);
    }
}
