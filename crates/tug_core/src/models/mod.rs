pub mod contestant;
pub mod score;
pub mod team;

pub use contestant::ContestantState;
pub use score::{GameScore, MatchSummary, TrialOutcome};
pub use team::TeamSide;
