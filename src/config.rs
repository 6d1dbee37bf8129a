//! Game tuning and difficulty schedule
//!
//! Loaded from JSON. Every field has a default, so a config file only needs
//! the values it wants to change.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Session tuning and per-round difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Session ===
    /// Rounds per session
    pub max_rounds: u32,
    /// Points for an exact match
    pub max_score: u32,

    // === Difficulty schedule (indexed by round, last entry repeats) ===
    /// Wheel segment count per round
    pub segments_by_round: Vec<u32>,
    /// GUESS window length per round
    pub guess_time_ms_by_round: Vec<u64>,

    // === Timing ===
    /// MIX phase length
    pub spin_duration_ms: u64,
    /// REVEAL hold window
    pub reveal_duration_ms: u64,

    // === Movement ===
    /// Marker speed while a direction is held
    pub move_speed_deg_per_sec: f64,
    /// Addressable positions on the ring
    pub ring_size: u32,

    /// Fixed RNG seed (None = random per run)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            max_score: MAX_SCORE,

            segments_by_round: SEGMENTS_BY_ROUND.to_vec(),
            guess_time_ms_by_round: GUESS_TIME_MS_BY_ROUND.to_vec(),

            spin_duration_ms: SPIN_DURATION_MS,
            reveal_duration_ms: REVEAL_DURATION_MS,

            move_speed_deg_per_sec: MOVE_SPEED_DEG_PER_SEC,
            ring_size: RING_SIZE,

            seed: None,
        }
    }
}

/// Look up a 1-based round in a schedule, clamping past the end.
/// An empty schedule yields `fallback` for every round.
fn scheduled<T: Copy>(schedule: &[T], fallback: T, round: u32) -> T {
    let idx = round.max(1) as usize - 1;
    schedule
        .get(idx)
        .or_else(|| schedule.last())
        .copied()
        .unwrap_or(fallback)
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Wheel segments for a 1-based round
    pub fn segment_count(&self, round: u32) -> u32 {
        scheduled(
            &self.segments_by_round,
            SEGMENTS_BY_ROUND[SEGMENTS_BY_ROUND.len() - 1],
            round,
        )
    }

    /// GUESS window for a 1-based round
    pub fn guess_duration_ms(&self, round: u32) -> u64 {
        scheduled(
            &self.guess_time_ms_by_round,
            GUESS_TIME_MS_BY_ROUND[GUESS_TIME_MS_BY_ROUND.len() - 1],
            round,
        )
    }

    /// Replace values the game can't run with by the nearest usable ones
    pub fn sanitized(mut self) -> Self {
        if self.max_rounds == 0 {
            log::warn!("max_rounds must be at least 1, using 1");
            self.max_rounds = 1;
        }
        if self.ring_size == 0 {
            log::warn!("ring_size must be positive, using {RING_SIZE}");
            self.ring_size = RING_SIZE;
        }
        if !(self.move_speed_deg_per_sec.is_finite() && self.move_speed_deg_per_sec > 0.0) {
            log::warn!(
                "move_speed_deg_per_sec {} is not a positive speed, using {MOVE_SPEED_DEG_PER_SEC}",
                self.move_speed_deg_per_sec
            );
            self.move_speed_deg_per_sec = MOVE_SPEED_DEG_PER_SEC;
        }
        if self.segments_by_round.iter().any(|&s| s == 0) {
            log::warn!("segment counts must be at least 1, raising zeros to 1");
            for s in &mut self.segments_by_round {
                *s = (*s).max(1);
            }
        }
        self
    }
}
