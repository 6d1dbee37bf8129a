//! Raw input to tick input
//!
//! Keyboards, encoders and serial lines all report events between frames.
//! These helpers hold that state until the driver builds the next
//! [`TickInput`].

use crate::game::{Direction, PlayerId, TickInput};

/// One-shot start latch
///
/// Any number of `latch` calls between two `take` calls yields a single
/// trigger.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriggerLatch {
    latched: bool,
}

impl TriggerLatch {
    pub fn latch(&mut self) {
        self.latched = true;
    }

    /// Consume the latch
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.latched)
    }
}

/// Left/right held state per player
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldKeys {
    left: [bool; 2],
    right: [bool; 2],
}

impl HeldKeys {
    pub fn set_left(&mut self, id: PlayerId, down: bool) {
        self.left[id.index()] = down;
    }

    pub fn set_right(&mut self, id: PlayerId, down: bool) {
        self.right[id.index()] = down;
    }

    /// Hold a single direction, releasing the other
    pub fn hold(&mut self, id: PlayerId, direction: Direction) {
        let i = id.index();
        self.left[i] = direction == Direction::Left;
        self.right[i] = direction == Direction::Right;
    }

    pub fn direction(&self, id: PlayerId) -> Direction {
        let i = id.index();
        Direction::from_held(self.left[i], self.right[i])
    }

    /// -1/0/+1 per player
    pub fn intents(&self) -> [i8; 2] {
        PlayerId::ALL.map(|id| self.direction(id).sign() as i8)
    }
}

/// Collects events between ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub trigger: TriggerLatch,
    pub held: HeldKeys,
}

impl InputState {
    /// Build this frame's input, consuming the trigger
    pub fn next_tick(&mut self) -> TickInput {
        TickInput {
            trigger: self.trigger.take(),
            intents: self.held.intents(),
        }
    }
}

/// A text command from a serial line or terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a round (`G` from the gear, `R` from the keyboard)
    Trigger,
    /// Gear released; nothing depends on it yet
    Stop,
    /// Move by whole ring positions, e.g. `P1:-2`
    Nudge(PlayerId, i32),
    /// Change held direction, e.g. `P2+`, `P2-`, `P2=`
    Hold(PlayerId, Direction),
    Quit,
}

impl Command {
    /// Parse one line; surrounding whitespace and case are ignored
    pub fn parse(line: &str) -> Option<Self> {
        let token = line.trim().to_ascii_uppercase();
        match token.as_str() {
            "G" | "R" => return Some(Command::Trigger),
            "STOP" => return Some(Command::Stop),
            "Q" | "QUIT" => return Some(Command::Quit),
            _ => {}
        }

        let (id, rest) = if let Some(rest) = token.strip_prefix("P1") {
            (PlayerId::One, rest)
        } else if let Some(rest) = token.strip_prefix("P2") {
            (PlayerId::Two, rest)
        } else {
            return None;
        };

        match rest {
            "+" => Some(Command::Hold(id, Direction::Right)),
            "-" => Some(Command::Hold(id, Direction::Left)),
            "=" => Some(Command::Hold(id, Direction::Hold)),
            _ => {
                let units = rest.strip_prefix(':')?.trim().parse().ok()?;
                Some(Command::Nudge(id, units))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_latch_fires_once() {
        let mut latch = TriggerLatch::default();
        assert!(!latch.take());
        latch.latch();
        latch.latch();
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn test_held_keys() {
        let mut held = HeldKeys::default();
        held.set_left(PlayerId::One, true);
        held.set_right(PlayerId::Two, true);
        assert_eq!(held.intents(), [-1, 1]);

        held.set_right(PlayerId::One, true);
        assert_eq!(held.direction(PlayerId::One), Direction::Hold);

        held.hold(PlayerId::Two, Direction::Left);
        assert_eq!(held.intents(), [0, -1]);
    }

    #[test]
    fn test_next_tick_consumes_trigger() {
        let mut input = InputState::default();
        input.trigger.latch();
        input.held.hold(PlayerId::One, Direction::Right);

        let first = input.next_tick();
        assert!(first.trigger);
        assert_eq!(first.intents, [1, 0]);

        let second = input.next_tick();
        assert!(!second.trigger);
        assert_eq!(second.intents, [1, 0]);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("G\n"), Some(Command::Trigger));
        assert_eq!(Command::parse(" r "), Some(Command::Trigger));
        assert_eq!(Command::parse("STOP"), Some(Command::Stop));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(
            Command::parse("P1:-2"),
            Some(Command::Nudge(PlayerId::One, -2))
        );
        assert_eq!(
            Command::parse("p2: 3"),
            Some(Command::Nudge(PlayerId::Two, 3))
        );
        assert_eq!(
            Command::parse("P2+"),
            Some(Command::Hold(PlayerId::Two, Direction::Right))
        );
        assert_eq!(
            Command::parse("P1="),
            Some(Command::Hold(PlayerId::One, Direction::Hold))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("P3+"), None);
        assert_eq!(Command::parse("P1:abc"), None);
        assert_eq!(Command::parse("P1"), None);
        assert_eq!(Command::parse("HELLO"), None);
    }
}
