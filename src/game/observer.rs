//! Phase notifications for animation and lighting
//!
//! The controller calls every hook on every transition. Implementations that
//! don't care about a hook leave the default no-op in place.

use super::controller::{Phase, RevealSummary, SessionOutcome};

/// Receives round events; purely observational
pub trait PhaseObserver {
    /// A phase was entered during `round`
    fn on_phase_enter(&mut self, _phase: Phase, _round: u32) {}

    /// The wheel starts spinning toward a freshly drawn target
    fn on_mix_start(&mut self, _target_hue: f64, _duration_ms: u64) {}

    /// Guesses were scored; REVEAL holds for `duration_ms`
    fn on_reveal(&mut self, _summary: &RevealSummary, _duration_ms: u64) {}

    /// The final round finished and the session was reset
    fn on_session_end(&mut self, _outcome: &SessionOutcome) {}
}

/// Observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PhaseObserver for NoopObserver {}

/// Observer that reports events through the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl PhaseObserver for LogObserver {
    fn on_phase_enter(&mut self, phase: Phase, round: u32) {
        log::info!("round {round}: {phase:?}");
    }

    fn on_mix_start(&mut self, target_hue: f64, duration_ms: u64) {
        log::debug!("mixing toward hue {target_hue:.1} for {duration_ms}ms");
    }

    fn on_reveal(&mut self, summary: &RevealSummary, _duration_ms: u64) {
        log::info!(
            "target {:.1}: P1 at {:.1} +{}, P2 at {:.1} +{}",
            summary.target_hue,
            summary.hues[0],
            summary.gains[0],
            summary.hues[1],
            summary.gains[1],
        );
    }

    fn on_session_end(&mut self, outcome: &SessionOutcome) {
        log::info!(
            "session over after {} rounds, {:?} wins ({} - {})",
            outcome.rounds,
            outcome.winner,
            outcome.scores[0],
            outcome.scores[1],
        );
    }
}
