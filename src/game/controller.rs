//! Round state machine
//!
//! `IDLE -> MIX -> GUESS -> REVEAL -> SCORE -> IDLE`. One call to
//! [`RoundController::advance`] per frame moves at most one timed transition
//! forward; SCORE resolves within the tick that enters it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::RoundClock;
use super::observer::{NoopObserver, PhaseObserver};
use super::player::{Direction, Player, PlayerId};
use super::scoring::score_guess;
use crate::config::GameConfig;
use crate::consts::WHEEL_DEGREES;

/// Current stage of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a trigger
    Idle,
    /// Target drawn, wheel spinning, no input
    Mix,
    /// Players steer their markers
    Guess,
    /// Scores applied, target shown
    Reveal,
    /// Round bookkeeping, resolves immediately
    Score,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// One-shot start signal, only honoured in IDLE
    pub trigger: bool,
    /// Held direction per player: -1, 0 or +1
    pub intents: [i8; 2],
}

impl TickInput {
    pub fn trigger() -> Self {
        Self {
            trigger: true,
            ..Default::default()
        }
    }

    pub fn holding(p1: i8, p2: i8) -> Self {
        Self {
            trigger: false,
            intents: [p1, p2],
        }
    }
}

/// A round's fixed parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number within the session
    pub index: u32,
    pub segment_count: u32,
    pub guess_duration_ms: u64,
    /// Drawn on MIX entry, fixed for the rest of the round
    pub target_hue: f64,
}

impl Round {
    fn new(index: u32, config: &GameConfig) -> Self {
        Self {
            index,
            segment_count: config.segment_count(index),
            guess_duration_ms: config.guess_duration_ms(index),
            target_hue: 0.0,
        }
    }
}

/// Result of scoring one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealSummary {
    pub target_hue: f64,
    /// Player marker hues, indexed by `PlayerId::index`
    pub hues: [f64; 2],
    pub gains: [u32; 2],
}

/// Final standings of a finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Higher total; a tie goes to player one
    pub winner: PlayerId,
    pub scores: [u32; 2],
    pub rounds: u32,
}

/// The two players and the round in progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub players: [Player; 2],
    pub round: Round,
}

/// A whole ring position drawn uniformly
fn fresh_position(config: &GameConfig, rng: &mut Pcg32) -> f64 {
    f64::from(rng.random_range(0..config.ring_size))
}

impl Session {
    fn new(config: &GameConfig, rng: &mut Pcg32) -> Self {
        let ring_size = f64::from(config.ring_size);
        let speed = config.move_speed_deg_per_sec;
        let mut fresh = |id| Player::new(id, fresh_position(config, rng), ring_size, speed);
        let players = [fresh(PlayerId::One), fresh(PlayerId::Two)];
        Self {
            players,
            round: Round::new(1, config),
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }
}

/// Drives phases, movement and scoring for a two-player session
#[derive(Debug)]
pub struct RoundController<O: PhaseObserver = NoopObserver> {
    config: GameConfig,
    rng: Pcg32,
    session: Session,
    phase: Phase,
    clock: RoundClock,
    /// Gains from the most recently scored round
    last_gains: [u32; 2],
    /// Standings of the most recently finished session
    last_outcome: Option<SessionOutcome>,
    observer: O,
}

impl RoundController<NoopObserver> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_observer(config, NoopObserver)
    }
}

impl<O: PhaseObserver> RoundController<O> {
    pub fn with_observer(config: GameConfig, observer: O) -> Self {
        let config = config.sanitized();
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg32::seed_from_u64(seed);
        let session = Session::new(&config, &mut rng);
        log::info!(
            "new session: {} rounds, ring of {} (seed {seed})",
            config.max_rounds,
            config.ring_size
        );

        Self {
            config,
            rng,
            session,
            phase: Phase::Idle,
            clock: RoundClock::new(),
            last_gains: [0; 2],
            last_outcome: None,
            observer,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> &Round {
        &self.session.round
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        self.session.player(id)
    }

    pub fn last_gains(&self) -> [u32; 2] {
        self.last_gains
    }

    pub fn last_outcome(&self) -> Option<&SessionOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Milliseconds left in the current timed phase
    pub fn time_remaining_ms(&self, now_ms: u64) -> u64 {
        self.clock.remaining_ms(now_ms)
    }

    /// Advance the state machine to `now_ms`
    pub fn advance(&mut self, now_ms: u64, input: &TickInput) {
        if input.trigger && self.phase != Phase::Idle {
            log::trace!("trigger ignored in {:?}", self.phase);
        }

        match self.phase {
            Phase::Idle => {
                self.clock.tick(now_ms);
                if input.trigger {
                    self.start_mix(now_ms);
                }
            }

            Phase::Mix => {
                self.clock.tick(now_ms);
                if self.clock.is_expired(now_ms) {
                    let guess_ms = self.session.round.guess_duration_ms;
                    self.enter(Phase::Guess, now_ms, Some(guess_ms));
                }
            }

            Phase::Guess => {
                let dt = self.clock.tick_within_phase(now_ms);
                self.move_players(&input.intents, dt);
                if self.clock.is_expired(now_ms) {
                    self.score_round(now_ms);
                }
            }

            Phase::Reveal => {
                self.clock.tick(now_ms);
                if self.clock.is_expired(now_ms) {
                    self.enter(Phase::Score, now_ms, None);
                    self.finish_round(now_ms);
                }
            }

            // Not reached: entering SCORE resolves it within the same tick
            Phase::Score => {
                self.clock.tick(now_ms);
                self.finish_round(now_ms);
            }
        }
    }

    /// Move a player by whole ring units (encoder click). GUESS only.
    pub fn nudge(&mut self, id: PlayerId, units: i32) {
        if self.phase != Phase::Guess {
            log::trace!("nudge for {id:?} ignored in {:?}", self.phase);
            return;
        }
        self.session.players[id.index()].step(units);
    }

    /// Put a player's marker at an absolute hue (absolute encoder). GUESS only.
    pub fn place_player(&mut self, id: PlayerId, hue: f64) {
        if self.phase != Phase::Guess {
            log::trace!("placement for {id:?} ignored in {:?}", self.phase);
            return;
        }
        self.session.players[id.index()].set_hue(hue);
    }

    fn enter(&mut self, phase: Phase, now_ms: u64, duration_ms: Option<u64>) {
        log::debug!("{:?} -> {:?} at {now_ms}ms", self.phase, phase);
        self.phase = phase;
        match duration_ms {
            Some(duration) => self.clock.start_timed(now_ms, duration),
            None => self.clock.start_untimed(now_ms),
        }
        self.observer.on_phase_enter(phase, self.session.round.index);
    }

    fn start_mix(&mut self, now_ms: u64) {
        let round = &mut self.session.round;
        round.target_hue = self.rng.random_range(0.0..WHEEL_DEGREES);
        round.segment_count = self.config.segment_count(round.index);
        round.guess_duration_ms = self.config.guess_duration_ms(round.index);
        self.last_gains = [0; 2];
        log::info!(
            "round {} of {}: {} segments, {}ms to guess",
            round.index,
            self.config.max_rounds,
            round.segment_count,
            round.guess_duration_ms
        );

        let target_hue = round.target_hue;
        let spin_ms = self.config.spin_duration_ms;
        self.enter(Phase::Mix, now_ms, Some(spin_ms));
        self.observer.on_mix_start(target_hue, spin_ms);
    }

    fn move_players(&mut self, intents: &[i8; 2], dt: f64) {
        for (player, &intent) in self.session.players.iter_mut().zip(intents) {
            let direction = Direction::from_intent(intent).unwrap_or_else(|| {
                log::trace!("invalid intent {intent} for {:?}", player.id);
                Direction::Hold
            });
            player.apply_continuous_move(direction, dt);
        }
    }

    fn score_round(&mut self, now_ms: u64) {
        let target_hue = self.session.round.target_hue;
        let max_score = self.config.max_score;
        let mut hues = [0.0; 2];
        let mut gains = [0; 2];

        for (i, player) in self.session.players.iter_mut().enumerate() {
            let hue = player.hue();
            let gain = score_guess(hue, target_hue, max_score);
            log::debug!("{:?}: hue {hue:.1}, +{gain}", player.id);
            player.score = player.score.saturating_add(gain);
            hues[i] = hue;
            gains[i] = gain;
        }
        self.last_gains = gains;

        let summary = RevealSummary {
            target_hue,
            hues,
            gains,
        };
        let reveal_ms = self.config.reveal_duration_ms;
        self.enter(Phase::Reveal, now_ms, Some(reveal_ms));
        self.observer.on_reveal(&summary, reveal_ms);
    }

    fn finish_round(&mut self, now_ms: u64) {
        if self.session.round.index >= self.config.max_rounds {
            self.end_session();
        } else {
            let next = self.session.round.index + 1;
            self.session.round = Round::new(next, &self.config);
        }
        self.enter(Phase::Idle, now_ms, None);
    }

    fn end_session(&mut self) {
        let scores = self.session.players.each_ref().map(|p| p.score);
        let winner = if scores[0] >= scores[1] {
            PlayerId::One
        } else {
            PlayerId::Two
        };
        let outcome = SessionOutcome {
            winner,
            scores,
            rounds: self.session.round.index,
        };
        self.observer.on_session_end(&outcome);
        self.last_outcome = Some(outcome);

        for player in &mut self.session.players {
            player.reset(fresh_position(&self.config, &mut self.rng));
        }
        self.session.round = Round::new(1, &self.config);
    }
}
