//! Hue Duel terminal driver
//!
//! Reads commands from stdin (one per line) and runs the round state machine
//! in real time. A JSON snapshot is printed every time the phase changes.
//!
//! Commands: `G`/`R` start a round, `P1+`/`P1-`/`P1=` hold or release a
//! direction, `P1:<n>` nudges by whole positions (same for `P2`), `Q` quits.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use hue_duel::GameConfig;
use hue_duel::game::{Clock, LogObserver, Phase, RoundController, SystemClock, TargetVisibility};
use hue_duel::input::{Command, InputState};

#[derive(Debug, Parser)]
#[command(name = "hue-duel", version, about = "Two-player hue wheel guessing game")]
struct Args {
    /// JSON config file (missing fields use defaults)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fixed RNG seed, overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Include the target hue in snapshots before REVEAL
    #[arg(long)]
    show_target: bool,

    /// Print the effective config and exit
    #[arg(long)]
    print_config: bool,
}

/// Game instance holding all driver state
struct Game {
    controller: RoundController<LogObserver>,
    clock: SystemClock,
    input: InputState,
    visibility: TargetVisibility,
    last_phase: Phase,
}

impl Game {
    fn new(config: GameConfig, visibility: TargetVisibility) -> Self {
        Self {
            controller: RoundController::with_observer(config, LogObserver),
            clock: SystemClock::new(),
            input: InputState::default(),
            visibility,
            last_phase: Phase::Idle,
        }
    }

    /// Apply one command; returns false on quit
    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Trigger => self.input.trigger.latch(),
            Command::Stop => {}
            Command::Hold(id, direction) => self.input.held.hold(id, direction),
            Command::Nudge(id, units) => self.controller.nudge(id, units),
            Command::Quit => return false,
        }
        true
    }

    /// Run one tick and report phase changes
    fn update(&mut self) -> Result<()> {
        let now = self.clock.now_ms();
        let tick = self.input.next_tick();
        self.controller.advance(now, &tick);

        let phase = self.controller.phase();
        if phase != self.last_phase {
            self.last_phase = phase;
            let view = self.controller.view(now, self.visibility);
            println!("{}", serde_json::to_string(&view)?);
        }
        Ok(())
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GameConfig::from_json_str(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

/// Forward stdin lines to the game loop
fn spawn_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    if args.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let visibility = if args.show_target {
        TargetVisibility::Always
    } else {
        TargetVisibility::Hidden
    };
    let mut game = Game::new(config, visibility);
    let commands = spawn_reader();
    let tick = Duration::from_millis(args.tick_ms.max(1));

    log::info!("Hue Duel ready, send G to start a round");
    'run: loop {
        loop {
            match commands.try_recv() {
                Ok(line) => match Command::parse(&line) {
                    Some(command) => {
                        if !game.handle(command) {
                            break 'run;
                        }
                    }
                    None => log::warn!("unknown command {:?}", line.trim()),
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break 'run,
            }
        }

        game.update()?;
        thread::sleep(tick);
    }

    log::info!("bye");
    Ok(())
}
