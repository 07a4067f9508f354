//! Trial, game and match results.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::team::TeamSide;

/// Result of a single rope pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// Aggregated strengths, side-indexed (home, away).
    pub totals: [u32; 2],
    /// `None` when the difference stayed below the winning margin.
    pub winner: Option<TeamSide>,
}

impl TrialOutcome {
    /// Decides a trial from the aggregated strengths. The trial has a
    /// winner only when the absolute difference reaches `winning_margin`;
    /// an exact tie never produces a winner.
    pub fn decide(totals: [u32; 2], winning_margin: u32) -> TrialOutcome {
        let delta = i64::from(totals[0]) - i64::from(totals[1]);
        let winner = if delta != 0 && delta.unsigned_abs() >= u64::from(winning_margin) {
            if delta > 0 {
                Some(TeamSide::Home)
            } else {
                Some(TeamSide::Away)
            }
        } else {
            None
        };
        TrialOutcome { totals, winner }
    }
}

/// One completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScore {
    /// Trial wins per side within this game.
    pub trial_wins: [u32; 2],
    /// `None` for a drawn game.
    pub winner: Option<TeamSide>,
}

impl GameScore {
    /// The side with more trial wins takes the game.
    pub fn decide(trial_wins: [u32; 2]) -> GameScore {
        let winner = match trial_wins[0].cmp(&trial_wins[1]) {
            Ordering::Greater => Some(TeamSide::Home),
            Ordering::Less => Some(TeamSide::Away),
            Ordering::Equal => None,
        };
        GameScore { trial_wins, winner }
    }
}

/// Final report of a whole match, consumed by the scoreboard side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Every game in play order.
    pub games: Vec<GameScore>,
    /// Total trials played across all games.
    pub trials_played: u64,
    /// Game wins per side.
    pub game_wins: [u32; 2],
    /// Games that ended without a winner.
    pub drawn_games: u32,
}

impl MatchSummary {
    pub fn from_games(games: Vec<GameScore>, trials_played: u64) -> MatchSummary {
        let mut game_wins = [0u32; 2];
        let mut drawn_games = 0;
        for game in &games {
            match game.winner {
                Some(side) => game_wins[side.index()] += 1,
                None => drawn_games += 1,
            }
        }
        MatchSummary {
            games,
            trials_played,
            game_wins,
            drawn_games,
        }
    }

    /// The side with more game wins, if any.
    pub fn champion(&self) -> Option<TeamSide> {
        match self.game_wins[0].cmp(&self.game_wins[1]) {
            Ordering::Greater => Some(TeamSide::Home),
            Ordering::Less => Some(TeamSide::Away),
            Ordering::Equal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_advantage_wins_the_trial() {
        let outcome = TrialOutcome::decide([3, 1], 1);
        assert_eq!(outcome.winner, Some(TeamSide::Home));

        let outcome = TrialOutcome::decide([2, 6], 2);
        assert_eq!(outcome.winner, Some(TeamSide::Away));
    }

    #[test]
    fn difference_below_the_margin_has_no_winner() {
        let outcome = TrialOutcome::decide([5, 4], 2);
        assert_eq!(outcome.winner, None);
    }

    #[test]
    fn tie_has_no_winner_even_with_zero_margin() {
        assert_eq!(TrialOutcome::decide([4, 4], 1).winner, None);
        assert_eq!(TrialOutcome::decide([4, 4], 0).winner, None);
    }

    #[test]
    fn game_goes_to_the_side_with_more_trial_wins() {
        assert_eq!(GameScore::decide([4, 2]).winner, Some(TeamSide::Home));
        assert_eq!(GameScore::decide([1, 3]).winner, Some(TeamSide::Away));
        assert_eq!(GameScore::decide([3, 3]).winner, None);
    }

    #[test]
    fn summary_tallies_games_and_names_a_champion() {
        let games = vec![
            GameScore::decide([4, 2]),
            GameScore::decide([2, 2]),
            GameScore::decide([5, 1]),
        ];
        let summary = MatchSummary::from_games(games, 18);
        assert_eq!(summary.game_wins, [2, 0]);
        assert_eq!(summary.drawn_games, 1);
        assert_eq!(summary.champion(), Some(TeamSide::Home));
    }

    #[test]
    fn balanced_match_has_no_champion() {
        let games = vec![GameScore::decide([4, 2]), GameScore::decide([1, 3])];
        let summary = MatchSummary::from_games(games, 12);
        assert_eq!(summary.champion(), None);
    }
}
