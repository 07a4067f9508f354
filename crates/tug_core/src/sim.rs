//! Match wiring: builds the monitors, spawns every actor, joins them.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::bench::Bench;
use crate::coach::{CallUpStrategy, Coach};
use crate::config::MatchConfig;
use crate::contestant::Contestant;
use crate::error::{Result, SimError};
use crate::models::{MatchSummary, TeamSide};
use crate::playground::Playground;
use crate::strength::{StrengthPolicy, UniformStrength};

/// Runs a full match to completion with the default call-up strategy.
pub fn run_match(config: &MatchConfig) -> Result<MatchSummary> {
    run_match_with_strategy(config, CallUpStrategy::default())
}

/// Runs a full match with uniform strength sampling seeded from the
/// configuration.
pub fn run_match_with_strategy(
    config: &MatchConfig,
    strategy: CallUpStrategy,
) -> Result<MatchSummary> {
    let mut seeder = seeder(config);
    let policies: [Box<dyn StrengthPolicy>; 2] = [
        Box::new(UniformStrength::new(
            config.min_strength,
            config.max_strength,
            seeder.gen::<u64>(),
        )),
        Box::new(UniformStrength::new(
            config.min_strength,
            config.max_strength,
            seeder.gen::<u64>(),
        )),
    ];
    run_match_with_policies(config, strategy, policies)
}

/// Runs a full match with one explicit strength policy per team. Spawns
/// one thread per contestant and per coach; returns once every actor has
/// terminated.
pub fn run_match_with_policies(
    config: &MatchConfig,
    strategy: CallUpStrategy,
    policies: [Box<dyn StrengthPolicy>; 2],
) -> Result<MatchSummary> {
    config.validate()?;

    let mut seeder = seeder(config);
    let playground = Arc::new(Playground::new(config));
    let mut benches: Vec<Arc<Bench>> = Vec::new();
    let mut handles: Vec<JoinHandle<()>> = Vec::new();

    let spawned = spawn_actors(
        config,
        strategy,
        &mut seeder,
        &playground,
        policies,
        &mut benches,
        &mut handles,
    );
    if let Err(err) = spawned {
        // Wake whatever was already parked so the partial fleet unwinds.
        for bench in &benches {
            bench.declare_match_over();
        }
        playground.cancel();
        for handle in handles {
            let _ = handle.join();
        }
        return Err(err);
    }

    for handle in handles {
        let role = handle
            .thread()
            .name()
            .unwrap_or("actor")
            .to_owned();
        if handle.join().is_err() {
            return Err(SimError::ActorPanicked { role });
        }
    }

    Ok(playground.summary())
}

fn seeder(config: &MatchConfig) -> ChaCha8Rng {
    match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn spawn_actors(
    config: &MatchConfig,
    strategy: CallUpStrategy,
    seeder: &mut ChaCha8Rng,
    playground: &Arc<Playground>,
    policies: [Box<dyn StrengthPolicy>; 2],
    benches: &mut Vec<Arc<Bench>>,
    handles: &mut Vec<JoinHandle<()>>,
) -> Result<()> {
    for (side, policy) in TeamSide::BOTH.into_iter().zip(policies) {
        let bench = Arc::new(Bench::new(side, config.contestants_per_team, policy));
        benches.push(Arc::clone(&bench));

        let coach = Coach::new(
            side,
            config.team_size,
            strategy,
            seeder.gen::<u64>(),
            Arc::clone(&bench),
            Arc::clone(playground),
        );
        handles.push(coach.spawn()?);

        for number in 0..config.contestants_per_team {
            let initial = seeder.gen_range(config.min_strength..=config.max_strength);
            let contestant = Contestant::new(
                number,
                side,
                initial,
                Arc::clone(&bench),
                Arc::clone(playground),
            );
            handles.push(contestant.spawn()?);
        }
    }
    Ok(())
}
