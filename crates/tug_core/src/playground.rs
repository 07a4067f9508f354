//! Shared playground monitor.
//!
//! The playground is the arena both teams assemble on. One trial crosses
//! three rendezvous points, each built on the same idiom: every arrival
//! increments a counter under the lock, and the arrival that completes the
//! count performs the one-time side effect (release, or trial scoring)
//! before a broadcast wake. Generation counters make each rendezvous
//! reusable across trials without lost wakeups.
//!
//! The two-phase join (`stand_in_line` then `get_ready`) keeps a fast
//! contestant from pulling before a slow teammate has even joined the
//! line; scoring in `am_done` runs exactly once per trial, in whichever
//! thread happens to report last.

use std::sync::{Condvar, Mutex};

use crate::config::MatchConfig;
use crate::models::{GameScore, MatchSummary, TeamSide, TrialOutcome};

struct LineEntry {
    number: u32,
    strength: u32,
    pulled: bool,
}

struct PlayState {
    /// Per-team lines for the current trial; position = entry order.
    lines: [Vec<LineEntry>; 2],
    /// Arrivals at each rendezvous of the current trial.
    lined_up: u32,
    ready: u32,
    done: u32,
    /// Rendezvous generations, bumped on each release.
    line_gen: u64,
    ready_gen: u64,
    done_gen: u64,
    /// Pulls recorded this trial; `done` may never pass it.
    pulled: u32,
    /// Aggregated strengths for the current trial.
    totals: [u32; 2],
    /// Trial wins within the current game.
    trial_wins: [u32; 2],
    trials_this_game: u32,
    /// Monotonic trial sequence number across the whole match.
    trials_total: u64,
    games: Vec<GameScore>,
    match_over: bool,
}

/// Shared arena monitor: assembly, pulling and scoring state.
pub struct Playground {
    team_size: u32,
    trials_per_game: u32,
    games_per_match: u32,
    winning_margin: u32,
    state: Mutex<PlayState>,
    cvar: Condvar,
}

impl Playground {
    pub fn new(config: &MatchConfig) -> Playground {
        assert!(config.team_size >= 1, "a trial needs at least one puller per team");
        Playground {
            team_size: config.team_size,
            trials_per_game: config.trials_per_game,
            games_per_match: config.games_per_match,
            winning_margin: config.winning_margin,
            state: Mutex::new(PlayState {
                lines: [Vec::new(), Vec::new()],
                lined_up: 0,
                ready: 0,
                done: 0,
                line_gen: 0,
                ready_gen: 0,
                done_gen: 0,
                pulled: 0,
                totals: [0, 0],
                trial_wins: [0, 0],
                trials_this_game: 0,
                trials_total: 0,
                games: Vec::new(),
                match_over: false,
            }),
            cvar: Condvar::new(),
        }
    }

    /// Contestants assembled on the playground during one trial.
    fn pullers(&self) -> u32 {
        self.team_size * 2
    }

    /// Joins this team's line and blocks until both lines are full; the
    /// last arrival overall releases everyone. Returns the 1-based line
    /// position.
    pub fn stand_in_line(&self, number: u32, side: TeamSide, strength: u32) -> u32 {
        let mut st = self.state.lock().unwrap();
        let idx = side.index();
        assert!(
            st.lines[idx].len() < self.team_size as usize,
            "the {side} line is already full, contestant {number} cannot join"
        );
        st.lines[idx].push(LineEntry {
            number,
            strength,
            pulled: false,
        });
        let position = st.lines[idx].len() as u32;
        st.lined_up += 1;
        let gen = st.line_gen;
        if st.lined_up == self.pullers() {
            st.lined_up = 0;
            st.line_gen += 1;
            self.cvar.notify_all();
        } else {
            let _released = self
                .cvar
                .wait_while(st, |s| s.line_gen == gen && !s.match_over)
                .unwrap();
        }
        position
    }

    /// Second-phase rendezvous: blocks until every assembled contestant
    /// has reached this call, then releases all simultaneously.
    pub fn get_ready(&self, number: u32, side: TeamSide) {
        let mut st = self.state.lock().unwrap();
        assert!(
            st.lines[side.index()].iter().any(|e| e.number == number),
            "contestant {number} got ready without standing in line"
        );
        st.ready += 1;
        let gen = st.ready_gen;
        if st.ready == self.pullers() {
            st.ready = 0;
            st.ready_gen += 1;
            self.cvar.notify_all();
        } else {
            let _released = self
                .cvar
                .wait_while(st, |s| s.ready_gen == gen && !s.match_over)
                .unwrap();
        }
    }

    /// Adds this contestant's strength to its team's aggregate. Holds the
    /// lock only for the update; nobody waits here.
    pub fn pull_the_rope(&self, number: u32, side: TeamSide) {
        let mut st = self.state.lock().unwrap();
        let idx = side.index();
        let entry = st.lines[idx]
            .iter_mut()
            .find(|e| e.number == number)
            .unwrap_or_else(|| {
                panic!("contestant {number} pulled the rope without standing in line")
            });
        assert!(
            !entry.pulled,
            "contestant {number} pulled the rope twice in one trial"
        );
        entry.pulled = true;
        let strength = entry.strength;
        st.totals[idx] += strength;
        st.pulled += 1;
    }

    /// Reports this contestant done. The last report across both teams
    /// scores the trial exactly once and broadcasts; every caller returns
    /// the same match-over verdict for the trial it took part in.
    pub fn am_done(&self) -> bool {
        let mut st = self.state.lock().unwrap();
        assert!(
            st.done < st.pulled,
            "am_done reported without a matching pull_the_rope"
        );
        st.done += 1;
        let gen = st.done_gen;
        if st.done == self.pullers() {
            self.score_trial(&mut st);
            st.done_gen += 1;
            self.cvar.notify_all();
            st.match_over
        } else {
            st = self
                .cvar
                .wait_while(st, |s| s.done_gen == gen && !s.match_over)
                .unwrap();
            st.match_over
        }
    }

    /// Scores the trial, closes the game when due, latches `match_over`
    /// after the final game, and resets the per-trial assembly state.
    /// Runs under the monitor lock, in the last reporting thread.
    fn score_trial(&self, st: &mut PlayState) {
        let outcome = TrialOutcome::decide(st.totals, self.winning_margin);
        if let Some(side) = outcome.winner {
            st.trial_wins[side.index()] += 1;
        }
        st.trials_this_game += 1;
        st.trials_total += 1;
        log::debug!(
            "trial {} scored: home {} x {} away, winner {:?}",
            st.trials_total,
            outcome.totals[0],
            outcome.totals[1],
            outcome.winner
        );

        if st.trials_this_game == self.trials_per_game {
            let game = GameScore::decide(st.trial_wins);
            log::info!(
                "game {} finished: home {} x {} away, winner {:?}",
                st.games.len() + 1,
                game.trial_wins[0],
                game.trial_wins[1],
                game.winner
            );
            st.games.push(game);
            st.trial_wins = [0, 0];
            st.trials_this_game = 0;
            if st.games.len() as u32 == self.games_per_match {
                st.match_over = true;
                log::info!("match over after {} trials", st.trials_total);
            }
        }

        st.lines[0].clear();
        st.lines[1].clear();
        st.totals = [0, 0];
        st.pulled = 0;
        st.done = 0;
    }

    /// Coach-side: the current trial sequence number. Capture it before a
    /// call-up round and pass it to [`Playground::wait_for_trial_end`].
    pub fn trial_checkpoint(&self) -> u64 {
        self.state.lock().unwrap().trials_total
    }

    /// Coach-side: blocks until a trial after `checkpoint` has been
    /// scored, or the match is over. Returns the match-over verdict.
    pub fn wait_for_trial_end(&self, checkpoint: u64) -> bool {
        let mut st = self.state.lock().unwrap();
        st = self
            .cvar
            .wait_while(st, |s| s.trials_total == checkpoint && !s.match_over)
            .unwrap();
        st.match_over
    }

    /// Latches `match_over` and wakes every thread parked here. Only used
    /// when the wiring layer has to abandon a match it could not fully
    /// assemble; a completed match latches the flag in `am_done` instead.
    pub fn cancel(&self) {
        let mut st = self.state.lock().unwrap();
        st.match_over = true;
        self.cvar.notify_all();
    }

    /// Final aggregated results for the scoreboard side.
    pub fn summary(&self) -> MatchSummary {
        let st = self.state.lock().unwrap();
        MatchSummary::from_games(st.games.clone(), st.trials_total)
    }
}
