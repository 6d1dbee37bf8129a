//! Read-only snapshot for renderers

use serde::{Deserialize, Serialize};

use super::controller::{Phase, RoundController, SessionOutcome};
use super::observer::PhaseObserver;
use super::player::PlayerId;

/// When the target hue is handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetVisibility {
    /// Only from REVEAL onward
    #[default]
    Hidden,
    /// In every phase after the target is drawn (debugging)
    Always,
}

/// Everything a renderer draws for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    pub phase: Phase,
    pub round: u32,
    pub max_rounds: u32,
    pub segment_count: u32,
    pub target_hue: Option<f64>,
    pub player_hues: [f64; 2],
    pub scores: [u32; 2],
    pub last_gains: [u32; 2],
    pub time_remaining_ms: u64,
    pub last_outcome: Option<SessionOutcome>,
}

impl<O: PhaseObserver> RoundController<O> {
    /// Snapshot the state a renderer needs at `now_ms`
    pub fn view(&self, now_ms: u64, visibility: TargetVisibility) -> RoundView {
        let round = self.round();
        let target_shown = match (visibility, self.phase()) {
            (_, Phase::Idle) => false,
            (TargetVisibility::Always, _) => true,
            (TargetVisibility::Hidden, phase) => matches!(phase, Phase::Reveal | Phase::Score),
        };
        let players = PlayerId::ALL.map(|id| self.player(id));

        RoundView {
            phase: self.phase(),
            round: round.index,
            max_rounds: self.config().max_rounds,
            segment_count: round.segment_count,
            target_hue: target_shown.then_some(round.target_hue),
            player_hues: players.map(|p| p.hue()),
            scores: players.map(|p| p.score),
            last_gains: self.last_gains(),
            time_remaining_ms: self.time_remaining_ms(now_ms),
            last_outcome: self.last_outcome().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::TickInput;

    fn controller() -> RoundController {
        RoundController::new(GameConfig {
            seed: Some(3),
            ..Default::default()
        })
    }

    #[test]
    fn test_target_hidden_until_reveal() {
        let mut ctl = controller();
        assert_eq!(ctl.view(0, TargetVisibility::Hidden).target_hue, None);

        ctl.advance(0, &TickInput::trigger());
        assert_eq!(ctl.view(0, TargetVisibility::Hidden).target_hue, None);
        ctl.advance(1500, &TickInput::default());
        assert_eq!(ctl.view(1500, TargetVisibility::Hidden).target_hue, None);

        ctl.advance(7500, &TickInput::default());
        let view = ctl.view(7500, TargetVisibility::Hidden);
        assert_eq!(view.phase, Phase::Reveal);
        assert_eq!(view.target_hue, Some(ctl.round().target_hue));
    }

    #[test]
    fn test_target_always_visible_after_draw() {
        let mut ctl = controller();
        assert_eq!(ctl.view(0, TargetVisibility::Always).target_hue, None);
        ctl.advance(0, &TickInput::trigger());
        assert_eq!(
            ctl.view(0, TargetVisibility::Always).target_hue,
            Some(ctl.round().target_hue)
        );
    }

    #[test]
    fn test_time_remaining() {
        let mut ctl = controller();
        ctl.advance(0, &TickInput::trigger());
        assert_eq!(ctl.view(500, TargetVisibility::Hidden).time_remaining_ms, 1000);
        ctl.advance(1500, &TickInput::default());
        let view = ctl.view(2500, TargetVisibility::Hidden);
        assert_eq!(view.time_remaining_ms, 5000);
        assert_eq!(view.segment_count, 12);
        assert_eq!(view.max_rounds, 6);
    }

    #[test]
    fn test_view_serializes() {
        let ctl = controller();
        let json = serde_json::to_string(&ctl.view(0, TargetVisibility::Hidden)).unwrap();
        assert!(json.contains(r#""phase":"Idle""#));
        assert!(json.contains(r#""target_hue":null"#));
    }
}
