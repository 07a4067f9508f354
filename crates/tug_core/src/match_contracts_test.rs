//! Whole-match contract tests: scripted scenarios through the full actor
//! fleet, plus a configuration-space termination sweep.

use proptest::prelude::*;

use crate::config::MatchConfig;
use crate::models::TeamSide;
use crate::sim::{run_match, run_match_with_policies};
use crate::strength::{FixedStrength, StrengthPolicy};
use crate::CallUpStrategy;

fn scripted(home: u32, away: u32) -> [Box<dyn StrengthPolicy>; 2] {
    [Box::new(FixedStrength(home)), Box::new(FixedStrength(away))]
}

#[test]
fn stronger_side_takes_every_trial_and_the_match() {
    let config = MatchConfig {
        team_size: 1,
        contestants_per_team: 1,
        trials_per_game: 2,
        games_per_match: 2,
        min_strength: 1,
        max_strength: 4,
        winning_margin: 1,
        seed: Some(0),
    };
    let summary =
        run_match_with_policies(&config, CallUpStrategy::default(), scripted(3, 1)).unwrap();

    assert_eq!(summary.trials_played, 4);
    assert_eq!(summary.games.len(), 2);
    for game in &summary.games {
        assert_eq!(game.trial_wins, [2, 0]);
        assert_eq!(game.winner, Some(TeamSide::Home));
    }
    assert_eq!(summary.game_wins, [2, 0]);
    assert_eq!(summary.champion(), Some(TeamSide::Home));
}

#[test]
fn tied_teams_play_out_a_winnerless_match() {
    let config = MatchConfig {
        team_size: 2,
        contestants_per_team: 2,
        trials_per_game: 3,
        games_per_match: 1,
        min_strength: 1,
        max_strength: 4,
        winning_margin: 1,
        seed: Some(0),
    };
    let summary =
        run_match_with_policies(&config, CallUpStrategy::default(), scripted(2, 2)).unwrap();

    assert_eq!(summary.trials_played, 3);
    assert_eq!(summary.games[0].trial_wins, [0, 0]);
    assert_eq!(summary.games[0].winner, None);
    assert_eq!(summary.drawn_games, 1);
    assert_eq!(summary.champion(), None);
}

#[test]
fn spare_contestants_stay_benched_without_blocking_the_match() {
    let config = MatchConfig {
        team_size: 2,
        contestants_per_team: 4,
        trials_per_game: 2,
        games_per_match: 2,
        min_strength: 1,
        max_strength: 4,
        winning_margin: 1,
        seed: Some(13),
    };
    let summary = run_match(&config).unwrap();
    assert_eq!(summary.trials_played, 4);
    assert_eq!(summary.games.len(), 2);
}

#[test]
fn every_strategy_completes_the_same_fixture() {
    for strategy in [
        CallUpStrategy::Strongest,
        CallUpStrategy::BenchOrder,
        CallUpStrategy::Random,
    ] {
        let config = MatchConfig {
            team_size: 2,
            contestants_per_team: 3,
            trials_per_game: 2,
            games_per_match: 1,
            min_strength: 1,
            max_strength: 4,
            winning_margin: 1,
            seed: Some(21),
        };
        let summary = crate::sim::run_match_with_strategy(&config, strategy).unwrap();
        assert_eq!(summary.trials_played, 2);
    }
}

#[test]
fn summary_round_trips_through_json() {
    let config = MatchConfig {
        team_size: 1,
        contestants_per_team: 1,
        trials_per_game: 1,
        games_per_match: 1,
        min_strength: 1,
        max_strength: 4,
        winning_margin: 1,
        seed: Some(3),
    };
    let summary = run_match(&config).unwrap();
    let encoded = serde_json::to_string(&summary).unwrap();
    let decoded: crate::models::MatchSummary = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, summary);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Every valid small configuration terminates with the exact trial
    /// and game counts; counters never overshoot their maxima.
    #[test]
    fn every_valid_config_terminates(
        team_size in 1u32..=3,
        spare in 0u32..=2,
        trials in 1u32..=3,
        games in 1u32..=2,
        seed in any::<u64>(),
    ) {
        let config = MatchConfig {
            team_size,
            contestants_per_team: team_size + spare,
            trials_per_game: trials,
            games_per_match: games,
            min_strength: 1,
            max_strength: 4,
            winning_margin: 1,
            seed: Some(seed),
        };
        let summary = run_match(&config).unwrap();

        prop_assert_eq!(summary.trials_played, u64::from(trials) * u64::from(games));
        prop_assert_eq!(summary.games.len() as u32, games);
        for game in &summary.games {
            prop_assert!(game.trial_wins[0] + game.trial_wins[1] <= trials);
        }
        prop_assert!(summary.game_wins[0] + summary.game_wins[1] + summary.drawn_games == games);
    }
}
