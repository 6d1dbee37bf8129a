//! Hue Duel - a two-player color guessing game on a hue wheel
//!
//! Core modules:
//! - `game`: Deterministic round state machine and scoring
//! - `config`: Data-driven difficulty schedule and tunables
//! - `input`: Translation of raw key/serial events into tick input

pub mod config;
pub mod game;
pub mod input;

pub use config::GameConfig;
pub use game::{Phase, RoundController, TickInput};

/// Game configuration constants
pub mod consts {
    /// Size of the hue wheel in degrees
    pub const WHEEL_DEGREES: f64 = 360.0;
    /// Largest possible shortest-arc distance on the wheel
    pub const HALF_WHEEL_DEGREES: f64 = 180.0;

    /// Default round count per session
    pub const MAX_ROUNDS: u32 = 6;
    /// Points awarded for an exact match
    pub const MAX_SCORE: u32 = 100;

    /// MIX phase length (target hidden while the wheel spins)
    pub const SPIN_DURATION_MS: u64 = 1500;
    /// REVEAL hold window
    pub const REVEAL_DURATION_MS: u64 = 2000;

    /// Marker speed while a direction is held
    pub const MOVE_SPEED_DEG_PER_SEC: f64 = 220.0;
    /// Addressable positions on the physical ring (LED strip length)
    pub const RING_SIZE: u32 = 30;

    /// Wheel segments per round, hardest last
    pub const SEGMENTS_BY_ROUND: [u32; 6] = [12, 16, 24, 32, 48, 72];
    /// GUESS window per round, shortest last
    pub const GUESS_TIME_MS_BY_ROUND: [u64; 6] = [6000, 5500, 5000, 4500, 4000, 3500];
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    wrap(angle, consts::WHEEL_DEGREES)
}

/// Wrap a value into [0, size) for a circular domain of the given size
#[inline]
pub fn wrap(value: f64, size: f64) -> f64 {
    let wrapped = value.rem_euclid(size);
    // rem_euclid can round up to `size` for tiny negative inputs
    if wrapped >= size { 0.0 } else { wrapped }
}
