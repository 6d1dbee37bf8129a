//! Player markers on the ring
//!
//! Positions are stored in ring units (`0..ring_size`), the resolution of the
//! physical strip, and converted to hue degrees for scoring and display.

use serde::{Deserialize, Serialize};

use crate::consts::WHEEL_DEGREES;
use crate::wrap;

/// Which of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

/// Held movement intent for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Hold,
    Right,
}

impl Direction {
    /// Parse a raw -1/0/+1 intent. Anything else is rejected.
    pub fn from_intent(intent: i8) -> Option<Self> {
        match intent {
            -1 => Some(Direction::Left),
            0 => Some(Direction::Hold),
            1 => Some(Direction::Right),
            _ => None,
        }
    }

    /// Combine left/right key states; both held cancels out
    pub fn from_held(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            _ => Direction::Hold,
        }
    }

    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Hold => 0.0,
            Direction::Right => 1.0,
        }
    }
}

/// A player's marker and running total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Position in ring units, always in [0, ring_size)
    position: f64,
    /// Cumulative score for the session
    pub score: u32,
    /// Marker speed while a direction is held
    pub move_speed_deg_per_sec: f64,
    /// Number of ring units in a full turn
    ring_size: f64,
}

impl Player {
    pub fn new(id: PlayerId, position: f64, ring_size: f64, move_speed_deg_per_sec: f64) -> Self {
        Self {
            id,
            position: wrap(position, ring_size),
            score: 0,
            move_speed_deg_per_sec,
            ring_size,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn ring_size(&self) -> f64 {
        self.ring_size
    }

    /// Marker position as a hue angle in [0, 360)
    pub fn hue(&self) -> f64 {
        crate::normalize_degrees(self.position * (WHEEL_DEGREES / self.ring_size))
    }

    /// Place the marker at a hue angle
    pub fn set_hue(&mut self, hue: f64) {
        self.position = wrap(hue * (self.ring_size / WHEEL_DEGREES), self.ring_size);
    }

    /// Integrate held movement over `elapsed_secs`
    pub fn apply_continuous_move(&mut self, direction: Direction, elapsed_secs: f64) {
        if elapsed_secs <= 0.0 || direction == Direction::Hold {
            return;
        }
        let units_per_deg = self.ring_size / WHEEL_DEGREES;
        let delta_deg = direction.sign() * self.move_speed_deg_per_sec * elapsed_secs;
        self.position = wrap(self.position + delta_deg * units_per_deg, self.ring_size);
    }

    /// Move by whole ring units (one encoder click = one unit)
    pub fn step(&mut self, units: i32) {
        self.position = wrap(self.position + f64::from(units), self.ring_size);
    }

    /// Fresh marker for a new session
    pub fn reset(&mut self, position: f64) {
        self.position = wrap(position, self.ring_size);
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(position: f64, ring_size: f64) -> Player {
        Player::new(PlayerId::One, position, ring_size, 220.0)
    }

    #[test]
    fn test_direction_from_intent() {
        assert_eq!(Direction::from_intent(-1), Some(Direction::Left));
        assert_eq!(Direction::from_intent(0), Some(Direction::Hold));
        assert_eq!(Direction::from_intent(1), Some(Direction::Right));
        assert_eq!(Direction::from_intent(2), None);
        assert_eq!(Direction::from_intent(-7), None);
    }

    #[test]
    fn test_direction_from_held() {
        assert_eq!(Direction::from_held(true, false), Direction::Left);
        assert_eq!(Direction::from_held(false, true), Direction::Right);
        assert_eq!(Direction::from_held(true, true), Direction::Hold);
        assert_eq!(Direction::from_held(false, false), Direction::Hold);
    }

    #[test]
    fn test_continuous_move_one_second() {
        let mut p = player(0.0, 360.0);
        p.apply_continuous_move(Direction::Right, 1.0);
        assert!((p.hue() - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_continuous_move_wraps_left() {
        let mut p = player(10.0, 360.0);
        p.apply_continuous_move(Direction::Left, 0.5);
        // 10 - 110 = -100 -> 260
        assert!((p.hue() - 260.0).abs() < 1e-9);
    }

    #[test]
    fn test_continuous_move_scales_to_ring() {
        // 30-unit ring: 220 deg = 220/12 units
        let mut p = player(0.0, 30.0);
        p.apply_continuous_move(Direction::Right, 1.0);
        assert!((p.position() - 220.0 / 12.0).abs() < 1e-9);
        assert!((p.hue() - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_or_negative_elapsed_is_ignored() {
        let mut p = player(5.0, 30.0);
        p.apply_continuous_move(Direction::Right, 0.0);
        p.apply_continuous_move(Direction::Right, -1.0);
        assert_eq!(p.position(), 5.0);
    }

    #[test]
    fn test_step_wraps() {
        let mut p = player(29.0, 30.0);
        p.step(1);
        assert_eq!(p.position(), 0.0);
        p.step(-1);
        assert_eq!(p.position(), 29.0);
        p.step(-61);
        assert_eq!(p.position(), 28.0);
    }

    #[test]
    fn test_hue_conversion() {
        let mut p = player(15.0, 30.0);
        assert_eq!(p.hue(), 180.0);
        p.set_hue(90.0);
        assert!((p.position() - 7.5).abs() < 1e-9);
        p.set_hue(-90.0);
        assert!((p.hue() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_clears_score() {
        let mut p = player(3.0, 30.0);
        p.score = 250;
        p.reset(12.0);
        assert_eq!(p.score, 0);
        assert_eq!(p.position(), 12.0);
    }
}
