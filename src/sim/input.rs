//! Player commands
//!
//! Input handlers push commands into an [`InputQueue`] whenever they fire;
//! the frame loop drains the queue into a single [`TickInput`] per tick.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::tick::TickInput;

/// A command for the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Idle -> Running
    Start,
    /// Lift impulse (pointer down / space)
    Lift,
    /// Running -> Paused
    Pause,
    /// Paused -> Running
    Resume,
    /// Pause or resume depending on the current phase
    TogglePause,
    /// Throw the session away and return to Idle with a new seed
    Reset { seed: u64 },
}

/// Commands buffered between ticks
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<Command>,
    /// Demo mode: the autopilot flies the hero
    pub idle_mode: bool,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drain everything queued since the last tick, oldest first
    pub fn take_input(&mut self) -> TickInput {
        TickInput {
            commands: self.pending.drain(..).collect(),
            idle_mode: self.idle_mode,
        }
    }
}
