use std::time::{Duration, Instant};

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("frame threshold must be positive")]
    ZeroFrameThreshold,
    #[error("dwell duration must be positive")]
    ZeroDwell,
}

/// Level-set command for the output sink.
///
/// `Activate` is re-emitted on every qualifying frame, so sinks must treat
/// commands as idempotent level writes, not edge-triggered pulses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputCommand {
    Activate,
    Deactivate,
}

/// Hysteresis filter over a per-frame presence signal.
///
/// Two gates stand between raw detections and the output:
///
/// 1. **Frame debounce** — a regime only flips after more than
///    `frame_threshold` consecutive same-valued frames, suppressing
///    single-frame detector noise in both directions.
/// 2. **Dwell gate** — once engaged, the output is asserted only after
///    `dwell` of continuous presence has elapsed.
///
/// Losing presence for more than `frame_threshold` frames clears the
/// engagement even if the dwell gate was never crossed; the one
/// `Deactivate` emitted in that case doubles as a state reset.
///
/// `update` is a pure transition over `(state, detected, now)`: no I/O,
/// no clock reads, no panics. Callers must pass a monotonically
/// non-decreasing `now`; backward time yields saturated (zero) dwell
/// progress rather than a crash.
#[derive(Debug)]
pub struct PresenceDebouncer {
    frame_threshold: u32,
    dwell: Duration,
    engaged_since: Option<Instant>,
    present_streak: u32,
    absent_streak: u32,
}

impl PresenceDebouncer {
    pub fn new(frame_threshold: u32, dwell: Duration) -> Result<Self, ConfigError> {
        if frame_threshold == 0 {
            return Err(ConfigError::ZeroFrameThreshold);
        }
        if dwell.is_zero() {
            return Err(ConfigError::ZeroDwell);
        }
        Ok(Self {
            frame_threshold,
            dwell,
            engaged_since: None,
            present_streak: 0,
            absent_streak: 0,
        })
    }

    /// Feed one frame's detection result and the current time.
    ///
    /// Returns a command when the output level should be (re)written;
    /// `None` on steady-state frames.
    pub fn update(&mut self, detected: bool, now: Instant) -> Option<OutputCommand> {
        match (detected, self.engaged_since) {
            (false, None) => {
                self.present_streak = 0;
                None
            }
            (false, Some(_)) => {
                self.absent_streak += 1;
                if self.absent_streak > self.frame_threshold {
                    self.engaged_since = None;
                    self.present_streak = 0;
                    Some(OutputCommand::Deactivate)
                } else {
                    None
                }
            }
            (true, None) => {
                self.present_streak += 1;
                if self.present_streak > self.frame_threshold {
                    self.engaged_since = Some(now);
                    self.absent_streak = 0;
                }
                None
            }
            (true, Some(since)) => {
                self.absent_streak = 0;
                if now.saturating_duration_since(since) > self.dwell {
                    Some(OutputCommand::Activate)
                } else {
                    None
                }
            }
        }
    }

    /// Whether sustained presence has been confirmed (dwell-gated or not).
    pub fn is_engaged(&self) -> bool {
        self.engaged_since.is_some()
    }

    pub fn engaged_since(&self) -> Option<Instant> {
        self.engaged_since
    }
}
