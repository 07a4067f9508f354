//! Contestant lifecycle state machine.
//!
//! A contestant cycles through three states: seated at the bench, standing
//! in position on the playground, and pulling the rope. The cycle repeats
//! until the bench reports that no operations remain, at which point the
//! thread exits from the seated state instead of transitioning.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of a contestant thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContestantState {
    /// Waiting on the bench to be picked by the coach. Initial state.
    SeatAtTheBench,
    /// Standing in the playground line, waiting for full assembly.
    StandInPosition,
    /// Pulling the rope.
    DoYourBest,
}

impl ContestantState {
    /// State entered once the current phase completes. No transition
    /// skips a state and none is a self-transition.
    pub fn advanced(self) -> ContestantState {
        match self {
            ContestantState::SeatAtTheBench => ContestantState::StandInPosition,
            ContestantState::StandInPosition => ContestantState::DoYourBest,
            ContestantState::DoYourBest => ContestantState::SeatAtTheBench,
        }
    }
}

impl fmt::Display for ContestantState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContestantState::SeatAtTheBench => write!(f, "seat at the bench"),
            ContestantState::StandInPosition => write!(f, "stand in position"),
            ContestantState::DoYourBest => write!(f, "do your best"),
        }
    }
}
