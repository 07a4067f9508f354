//! Coach actor and call-up strategies.
//!
//! Each round the coach waits until its whole roster is seated, calls up
//! exactly the configured team size one contestant at a time, then watches
//! the playground until the trial it assembled has been scored.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::bench::Bench;
use crate::error::{Result, SimError};
use crate::models::TeamSide;
use crate::playground::Playground;

/// How a coach picks its pullers from the seated roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CallUpStrategy {
    /// Highest last-reported strengths first.
    #[default]
    Strongest,
    /// Lowest contestant numbers first.
    BenchOrder,
    /// Uniform shuffle of the seated roster.
    Random,
}

impl CallUpStrategy {
    /// Picks `count` contestant numbers out of the seated
    /// `(number, strength)` snapshot. Every pick is distinct.
    fn pick(self, seated: &mut Vec<(u32, u32)>, count: usize, rng: &mut ChaCha8Rng) -> Vec<u32> {
        assert!(
            seated.len() >= count,
            "bench snapshot smaller than the team size"
        );
        match self {
            CallUpStrategy::Strongest => {
                seated.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
            }
            CallUpStrategy::BenchOrder => {
                seated.sort_by_key(|&(number, _)| number);
            }
            CallUpStrategy::Random => {
                seated.shuffle(rng);
            }
        }
        seated.iter().take(count).map(|&(number, _)| number).collect()
    }
}

/// A coach thread driver.
pub struct Coach {
    side: TeamSide,
    team_size: u32,
    strategy: CallUpStrategy,
    rng: ChaCha8Rng,
    bench: Arc<Bench>,
    playground: Arc<Playground>,
}

impl Coach {
    pub fn new(
        side: TeamSide,
        team_size: u32,
        strategy: CallUpStrategy,
        seed: u64,
        bench: Arc<Bench>,
        playground: Arc<Playground>,
    ) -> Coach {
        Coach {
            side,
            team_size,
            strategy,
            rng: ChaCha8Rng::seed_from_u64(seed),
            bench,
            playground,
        }
    }

    /// Spawns the coach on a named thread.
    pub fn spawn(self) -> Result<JoinHandle<()>> {
        let name = format!("coach-{}", self.side);
        thread::Builder::new()
            .name(name)
            .spawn(move || self.run())
            .map_err(|source| SimError::Spawn {
                role: "coach",
                source,
            })
    }

    /// Runs call-up rounds until the match is over.
    pub fn run(mut self) {
        // The checkpoint is captured before the call-ups: the trial the
        // coach assembles cannot be scored without them, so the sequence
        // number observed here always precedes it.
        'rounds: while self.bench.contestants_have_more_operations() {
            let checkpoint = self.playground.trial_checkpoint();

            let Some(mut seated) = self.bench.wait_for_full_bench() else {
                break 'rounds;
            };
            let picked = self
                .strategy
                .pick(&mut seated, self.team_size as usize, &mut self.rng);
            let side = self.side;
            log::debug!("{side} coach calls up {picked:?}");

            for number in picked {
                if !self.bench.call_contestant(number) {
                    break 'rounds;
                }
            }

            if self.playground.wait_for_trial_end(checkpoint) {
                break 'rounds;
            }
        }

        let side = self.side;
        log::info!("{side} coach finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    #[test]
    fn strongest_picks_by_strength_then_number() {
        let mut seated = vec![(0, 2), (1, 4), (2, 4), (3, 1)];
        let picked = CallUpStrategy::Strongest.pick(&mut seated, 3, &mut rng());
        assert_eq!(picked, vec![1, 2, 0]);
    }

    #[test]
    fn bench_order_picks_lowest_numbers() {
        let mut seated = vec![(3, 9), (0, 1), (2, 5)];
        let picked = CallUpStrategy::BenchOrder.pick(&mut seated, 2, &mut rng());
        assert_eq!(picked, vec![0, 2]);
    }

    #[test]
    fn random_picks_are_distinct_and_seeded() {
        let mut first = vec![(0, 1), (1, 1), (2, 1), (3, 1), (4, 1)];
        let mut second = first.clone();
        let picked_a = CallUpStrategy::Random.pick(&mut first, 3, &mut rng());
        let picked_b = CallUpStrategy::Random.pick(&mut second, 3, &mut rng());
        assert_eq!(picked_a, picked_b);

        let mut sorted = picked_a.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
    }

    #[test]
    #[should_panic(expected = "smaller than the team size")]
    fn picking_from_a_short_snapshot_is_fatal() {
        let mut seated = vec![(0, 1)];
        CallUpStrategy::Strongest.pick(&mut seated, 2, &mut rng());
    }
}
