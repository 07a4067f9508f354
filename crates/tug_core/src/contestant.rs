//! Contestant actor.
//!
//! A contestant waits seated at the bench until picked by its coach, joins
//! the playground line, pulls the rope once the whole assembly is ready,
//! and seats back down with the trial's verdict. The cycle repeats until
//! the bench reports no more operations.
//!
//! The contestant is the sole mutator of its own fields; the monitors
//! hand state changes back through return values (the call-up strength,
//! the line position, the match-over verdict) rather than reaching into
//! the actor.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::bench::{Bench, CallUp};
use crate::error::{Result, SimError};
use crate::models::{ContestantState, TeamSide};
use crate::playground::Playground;

/// A contestant thread driver.
pub struct Contestant {
    number: u32,
    side: TeamSide,
    strength: u32,
    state: ContestantState,
    playground_pos: u32,
    bench: Arc<Bench>,
    playground: Arc<Playground>,
}

impl Contestant {
    pub fn new(
        number: u32,
        side: TeamSide,
        initial_strength: u32,
        bench: Arc<Bench>,
        playground: Arc<Playground>,
    ) -> Contestant {
        Contestant {
            number,
            side,
            strength: initial_strength,
            state: ContestantState::SeatAtTheBench,
            playground_pos: 0,
            bench,
            playground,
        }
    }

    /// Spawns the contestant on a named thread.
    pub fn spawn(self) -> Result<JoinHandle<()>> {
        let name = format!("contestant-{}-{}", self.side, self.number);
        thread::Builder::new()
            .name(name)
            .spawn(move || self.run())
            .map_err(|source| SimError::Spawn {
                role: "contestant",
                source,
            })
    }

    /// Drives the state machine until the match ends, then closes the
    /// bench connection.
    pub fn run(mut self) {
        self.bench
            .seat_down(self.number, self.strength, self.playground_pos, false);

        while self.bench.contestants_have_more_operations() {
            match self.state {
                ContestantState::SeatAtTheBench => {
                    match self.bench.wait_for_contestant_call(self.number) {
                        // Loop guard observes the flag and exits.
                        CallUp::MatchOver => continue,
                        CallUp::Selected { strength } => {
                            self.strength = strength;
                            self.playground_pos = self.playground.stand_in_line(
                                self.number,
                                self.side,
                                self.strength,
                            );
                            self.state = self.state.advanced();
                        }
                    }
                }
                ContestantState::StandInPosition => {
                    self.playground.get_ready(self.number, self.side);
                    self.state = self.state.advanced();
                }
                ContestantState::DoYourBest => {
                    self.playground.pull_the_rope(self.number, self.side);
                    let match_over = self.playground.am_done();
                    self.bench
                        .seat_down(self.number, self.strength, self.playground_pos, match_over);
                    self.playground_pos = 0;
                    self.state = self.state.advanced();
                }
            }
        }

        let number = self.number;
        let side = self.side;
        log::info!("contestant {number} ({side}) finished");
        self.bench.close_bench_connection();
    }
}
