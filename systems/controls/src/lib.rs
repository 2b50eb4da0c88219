#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system translating per-frame player input into arena commands.

use std::time::Duration;

use shadow_dimension_core::{Command, Direction, Timescale};
use tracing::info;

/// Frame duration at sixty frames per second.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Input sampled for a single frame.
///
/// `attack`, `speed_up`, `slow_down`, and `quit` are edge-triggered: they are
/// set only on the frame the key went down. Directions are held keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Attack key pressed this frame.
    pub attack: bool,
    /// Up held.
    pub north: bool,
    /// Down held.
    pub south: bool,
    /// Left held.
    pub west: bool,
    /// Right held.
    pub east: bool,
    /// Speed-up key pressed this frame.
    pub speed_up: bool,
    /// Slow-down key pressed this frame.
    pub slow_down: bool,
    /// Quit key pressed this frame.
    pub quit: bool,
}

impl FrameInput {
    fn held_directions(&self) -> impl Iterator<Item = Direction> {
        [
            (self.north, Direction::North),
            (self.south, Direction::South),
            (self.west, Direction::West),
            (self.east, Direction::East),
        ]
        .into_iter()
        .filter_map(|(held, direction)| held.then_some(direction))
    }
}

/// Outcome of handling a frame's input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Keep stepping frames.
    Continue,
    /// Stop the game loop.
    Quit,
}

/// Tunables of the controls system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Simulated time attached to every tick.
    pub frame_duration: Duration,
    /// Slowest permitted timescale.
    pub min_timescale: Timescale,
    /// Fastest permitted timescale.
    pub max_timescale: Timescale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_duration: DEFAULT_FRAME_DURATION,
            min_timescale: Timescale::new(-3),
            max_timescale: Timescale::new(3),
        }
    }
}

/// Keyboard-driven controller owning the current timescale.
#[derive(Debug, Default)]
pub struct Controls {
    config: Config,
    timescale: Timescale,
}

impl Controls {
    /// Creates a controller starting at neutral timescale.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            timescale: Timescale::NEUTRAL,
        }
    }

    /// Timescale applied to the next tick.
    #[must_use]
    pub const fn timescale(&self) -> Timescale {
        self.timescale
    }

    /// Emits the commands for one frame of input.
    ///
    /// The tick always comes first, followed by the attack and one move per
    /// held direction in north, south, west, east order. A quit press emits
    /// nothing.
    pub fn handle(&mut self, input: &FrameInput, out: &mut Vec<Command>) -> Flow {
        if input.quit {
            return Flow::Quit;
        }

        if input.speed_up {
            let faster = self.timescale.faster(self.config.max_timescale);
            if faster != self.timescale {
                self.timescale = faster;
                info!(timescale = faster.get(), "sped up");
            }
        }
        if input.slow_down {
            let slower = self.timescale.slower(self.config.min_timescale);
            if slower != self.timescale {
                self.timescale = slower;
                info!(timescale = slower.get(), "slowed down");
            }
        }

        out.push(Command::Tick {
            dt: self.config.frame_duration,
            timescale: self.timescale,
        });

        if input.attack {
            out.push(Command::StartAttack);
        }

        out.extend(
            input
                .held_directions()
                .map(|direction| Command::MovePlayer { direction }),
        );

        Flow::Continue
    }
}
