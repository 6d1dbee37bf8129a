//! Round state machine and scoring
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Time only from the timestamps passed to `advance`
//! - Seeded RNG only
//! - No rendering or I/O dependencies

pub mod clock;
pub mod controller;
pub mod observer;
pub mod player;
pub mod scoring;
pub mod view;

pub use clock::{Clock, ManualClock, RoundClock, SystemClock};
pub use controller::{
    Phase, RevealSummary, Round, RoundController, Session, SessionOutcome, TickInput,
};
pub use observer::{LogObserver, NoopObserver, PhaseObserver};
pub use player::{Direction, Player, PlayerId};
pub use scoring::{circular_distance, inverse_score, score_guess};
pub use view::{RoundView, TargetVisibility};
