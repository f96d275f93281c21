use crate::hud::style::{Rgb, ALERT_COLOR, BLOCKED_COLOR, NO_FACE_COLOR, SAFE_COLOR};
use crate::shared::constants::POSITIVE_LABEL;

/// Display state for the current cycle, in priority order: a blocked
/// camera wins over everything, then no-face, then the latest label.
#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    CameraActive,
    CameraBlocked,
    NoFace,
    Classified { label: String, confidence: f64 },
}

impl Status {
    /// The single visible line of text.
    pub fn line(&self) -> String {
        match self {
            Status::CameraActive => "Camera Active".to_string(),
            Status::CameraBlocked => "Camera Blocked".to_string(),
            Status::NoFace => "No Face".to_string(),
            Status::Classified { label, confidence } => format!("{label} ({confidence}%)"),
        }
    }

    /// Background color behind the status line.
    pub fn background(&self) -> Rgb {
        match self {
            Status::CameraActive | Status::NoFace => NO_FACE_COLOR,
            Status::CameraBlocked => BLOCKED_COLOR,
            Status::Classified { label, .. } if label == POSITIVE_LABEL => SAFE_COLOR,
            Status::Classified { .. } => ALERT_COLOR,
        }
    }
}

/// Where the status line goes.
///
/// Updates are idempotent: implementations must not re-render when handed
/// the status they are already showing.
pub trait StatusDisplay: Send {
    fn update(&mut self, status: &Status);
}

/// Status display backed by the `log` crate.
pub struct LogStatusDisplay {
    shown: Option<Status>,
}

impl LogStatusDisplay {
    pub fn new() -> Self {
        Self { shown: None }
    }
}

impl Default for LogStatusDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusDisplay for LogStatusDisplay {
    fn update(&mut self, status: &Status) {
        if self.shown.as_ref() == Some(status) {
            return;
        }
        let bg = status.background();
        log::info!(
            "status: {} [#{:02x}{:02x}{:02x}]",
            status.line(),
            bg.r,
            bg.g,
            bg.b
        );
        self.shown = Some(status.clone());
    }
}

/// Discards all updates. For tests and embedders with their own surface.
pub struct NullStatusDisplay;

impl StatusDisplay for NullStatusDisplay {
    fn update(&mut self, _status: &Status) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // ── Status text ──────────────────────────────────────────────────

    #[test]
    fn test_classified_line_shows_label_and_confidence() {
        let s = Status::Classified {
            label: "Mask".to_string(),
            confidence: 97.0,
        };
        assert_eq!(s.line(), "Mask (97%)");
    }

    #[test]
    fn test_classified_line_keeps_fractional_confidence() {
        let s = Status::Classified {
            label: "No Mask".to_string(),
            confidence: 63.25,
        };
        assert_eq!(s.line(), "No Mask (63.25%)");
    }

    #[rstest]
    #[case::active(Status::CameraActive, "Camera Active")]
    #[case::blocked(Status::CameraBlocked, "Camera Blocked")]
    #[case::no_face(Status::NoFace, "No Face")]
    fn test_fixed_lines(#[case] status: Status, #[case] expected: &str) {
        assert_eq!(status.line(), expected);
    }

    // ── Background colors ────────────────────────────────────────────

    #[test]
    fn test_positive_label_gets_safe_background() {
        let s = Status::Classified {
            label: "Mask".to_string(),
            confidence: 97.0,
        };
        assert_eq!(s.background(), SAFE_COLOR);
    }

    #[test]
    fn test_other_labels_get_alert_background() {
        let s = Status::Classified {
            label: "No Mask".to_string(),
            confidence: 88.0,
        };
        assert_eq!(s.background(), ALERT_COLOR);
    }

    #[test]
    fn test_no_face_gets_neutral_background() {
        assert_eq!(Status::NoFace.background(), NO_FACE_COLOR);
    }

    #[test]
    fn test_blocked_gets_blocked_background() {
        assert_eq!(Status::CameraBlocked.background(), BLOCKED_COLOR);
    }

    // ── Idempotent display ───────────────────────────────────────────

    struct CountingDisplay {
        shown: Option<Status>,
        renders: usize,
    }

    impl StatusDisplay for CountingDisplay {
        fn update(&mut self, status: &Status) {
            if self.shown.as_ref() == Some(status) {
                return;
            }
            self.renders += 1;
            self.shown = Some(status.clone());
        }
    }

    #[test]
    fn test_repeated_identical_status_renders_once() {
        let mut display = CountingDisplay {
            shown: None,
            renders: 0,
        };
        for _ in 0..5 {
            display.update(&Status::NoFace);
        }
        assert_eq!(display.renders, 1);
    }

    #[test]
    fn test_state_change_renders_again() {
        let mut display = CountingDisplay {
            shown: None,
            renders: 0,
        };
        display.update(&Status::NoFace);
        display.update(&Status::Classified {
            label: "Mask".to_string(),
            confidence: 97.0,
        });
        display.update(&Status::NoFace);
        assert_eq!(display.renders, 3);
    }
}
