//! Tick pacing and redraw gating

use std::time::Duration;

use crate::core::{Config, StepKind};

/// Decides how long the driver pauses before a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPacer {
    interval: Duration,
    sleep_every_n_ticks: u64,
}

impl TickPacer {
    pub fn new(tick_interval_ms: u64, sleep_every_n_ticks: u64) -> Self {
        Self {
            interval: Duration::from_millis(tick_interval_ms.max(1)),
            sleep_every_n_ticks: sleep_every_n_ticks.max(1),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.tick_interval_ms, config.sleep_every_n_ticks)
    }

    /// Pause to take before running `tick`, if any.
    ///
    /// Only ticks divisible by `sleep_every_n_ticks` pause, so raising it
    /// fast-forwards the animation without changing its tick counts.
    pub fn pause_before(&self, tick: u64) -> Option<Duration> {
        (tick % self.sleep_every_n_ticks == 0).then_some(self.interval)
    }
}

impl Default for TickPacer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Whether a tick that went from `previous` to `next` changes what is on screen.
///
/// Idle ticks (waiting before and after) are the only ones skipped.
pub fn should_signal_redraw(previous: StepKind, next: StepKind) -> bool {
    previous != StepKind::WaitForInput || next != StepKind::WaitForInput
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacer_sleeps_every_tick_by_default() {
        let pacer = TickPacer::default();
        for tick in 0..5 {
            assert_eq!(pacer.pause_before(tick), Some(Duration::from_millis(16)));
        }
    }

    #[test]
    fn pacer_skips_ticks_between_pauses() {
        let pacer = TickPacer::new(5, 3);
        assert_eq!(pacer.pause_before(0), Some(Duration::from_millis(5)));
        assert_eq!(pacer.pause_before(1), None);
        assert_eq!(pacer.pause_before(2), None);
        assert_eq!(pacer.pause_before(3), Some(Duration::from_millis(5)));
    }

    #[test]
    fn pacer_clamps_zero_values() {
        let pacer = TickPacer::new(0, 0);
        assert_eq!(pacer.pause_before(7), Some(Duration::from_millis(1)));
    }

    #[test]
    fn redraw_skipped_only_when_idle() {
        assert!(!should_signal_redraw(StepKind::WaitForInput, StepKind::WaitForInput));
        assert!(should_signal_redraw(StepKind::WaitForInput, StepKind::InputDetected));
        assert!(should_signal_redraw(StepKind::CheckForPoints, StepKind::WaitForInput));
        assert!(should_signal_redraw(StepKind::TilesFalling, StepKind::TilesFalling));
    }
}
