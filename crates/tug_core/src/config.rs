//! Match configuration.
//!
//! All tunable constants of a match live here and are validated once,
//! before any thread is spawned. The monitors trust a validated config.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Full configuration of a rope-pulling match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Contestants called up to pull in each trial.
    pub team_size: u32,
    /// Roster size per team. Must be at least `team_size`; every trial
    /// fields exactly `team_size` pullers, never a partial team.
    pub contestants_per_team: u32,
    /// Trials played before a game is scored.
    pub trials_per_game: u32,
    /// Games played before the match ends.
    pub games_per_match: u32,
    /// Lower strength bound (inclusive).
    pub min_strength: u32,
    /// Upper strength bound (inclusive).
    pub max_strength: u32,
    /// Minimum aggregate-strength difference for a trial to have a winner.
    /// A smaller difference scores the trial as "no winner".
    pub winning_margin: u32,
    /// Seed for strength sampling. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl MatchConfig {
    /// The classic contest: 5-member rosters, 3 pullers per trial,
    /// 6 trials per game, 3 games, strengths 1..=4.
    pub fn classic() -> Self {
        Self {
            team_size: 3,
            contestants_per_team: 5,
            trials_per_game: 6,
            games_per_match: 3,
            min_strength: 1,
            max_strength: 4,
            winning_margin: 1,
            seed: None,
        }
    }

    /// Rejects degenerate configurations before any actor exists.
    pub fn validate(&self) -> Result<()> {
        if self.team_size == 0 {
            return Err(SimError::InvalidConfig {
                field: "team_size",
                value: 0,
                reason: "a trial needs at least one puller per team",
            });
        }
        if self.contestants_per_team < self.team_size {
            return Err(SimError::InvalidConfig {
                field: "contestants_per_team",
                value: u64::from(self.contestants_per_team),
                reason: "roster cannot field a full team",
            });
        }
        if self.trials_per_game == 0 {
            return Err(SimError::InvalidConfig {
                field: "trials_per_game",
                value: 0,
                reason: "a game needs at least one trial",
            });
        }
        if self.games_per_match == 0 {
            return Err(SimError::InvalidConfig {
                field: "games_per_match",
                value: 0,
                reason: "a match needs at least one game",
            });
        }
        if self.min_strength == 0 {
            return Err(SimError::InvalidConfig {
                field: "min_strength",
                value: 0,
                reason: "strength is a positive integer",
            });
        }
        if self.max_strength < self.min_strength {
            return Err(SimError::InvalidConfig {
                field: "max_strength",
                value: u64::from(self.max_strength),
                reason: "upper strength bound below the lower bound",
            });
        }
        if self.winning_margin == 0 {
            return Err(SimError::InvalidConfig {
                field: "winning_margin",
                value: 0,
                reason: "a zero margin would let an exact tie produce a winner",
            });
        }
        Ok(())
    }

    /// Contestants assembled on the playground during one trial.
    pub fn pullers_per_trial(&self) -> u32 {
        self.team_size * 2
    }

    /// Total contestant threads across both teams.
    pub fn total_contestants(&self) -> u32 {
        self.contestants_per_team * 2
    }
}
