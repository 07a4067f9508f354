//! Per-team bench monitor.
//!
//! The bench is the waiting area of one team. It owns the contestant
//! scheduling state (who is seated, who has been called), the strength
//! policy used to resample a contestant on every call-up, and the shared
//! "more operations" flag whose lifecycle bounds every actor loop.
//!
//! All state lives behind a single mutex; wake-ups are broadcast and every
//! wait re-checks its predicate, so a thread released by shutdown observes
//! the flag instead of a stale condition.

use std::sync::{Condvar, Mutex};

use crate::models::TeamSide;
use crate::strength::StrengthPolicy;

/// Outcome of waiting for a call-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallUp {
    /// Picked by the coach; pull with this strength.
    Selected { strength: u32 },
    /// The match ended while waiting; no more call-ups will come.
    MatchOver,
}

struct BenchState {
    /// Seated flag per contestant number.
    seated: Vec<bool>,
    /// Last strength each contestant reported when seating down.
    strengths: Vec<u32>,
    /// The one contestant currently called and not yet acknowledged.
    called: Option<u32>,
    /// Strength sampled for the called contestant.
    granted_strength: u32,
    more_operations: bool,
    open_connections: usize,
    policy: Box<dyn StrengthPolicy>,
}

/// Waiting area monitor for one team.
pub struct Bench {
    side: TeamSide,
    state: Mutex<BenchState>,
    cvar: Condvar,
}

impl Bench {
    pub fn new(side: TeamSide, roster: u32, policy: Box<dyn StrengthPolicy>) -> Bench {
        assert!(roster >= 1, "a bench needs at least one contestant");
        Bench {
            side,
            state: Mutex::new(BenchState {
                seated: vec![false; roster as usize],
                strengths: vec![0; roster as usize],
                called: None,
                granted_strength: 0,
                more_operations: true,
                open_connections: roster as usize,
                policy,
            }),
            cvar: Condvar::new(),
        }
    }

    pub fn side(&self) -> TeamSide {
        self.side
    }

    /// Records the contestant as seated and idle. A `match_over` report
    /// flips the shared flag and releases every thread parked here.
    pub fn seat_down(&self, number: u32, strength: u32, playground_pos: u32, match_over: bool) {
        let mut st = self.state.lock().unwrap();
        let side = self.side;
        let idx = number as usize;
        assert!(
            idx < st.seated.len(),
            "unknown contestant {number} on the {side} bench"
        );
        st.seated[idx] = true;
        st.strengths[idx] = strength;
        log::debug!("contestant {number} ({side}) seated, strength {strength}, came from position {playground_pos}");
        if match_over && st.more_operations {
            st.more_operations = false;
            log::debug!("{side} bench: match over, releasing waiters");
        }
        self.cvar.notify_all();
    }

    /// Blocks until the coach selects this contestant. Returns the freshly
    /// sampled strength, or [`CallUp::MatchOver`] when woken by shutdown.
    pub fn wait_for_contestant_call(&self, number: u32) -> CallUp {
        let mut st = self.state.lock().unwrap();
        st = self
            .cvar
            .wait_while(st, |s| s.more_operations && s.called != Some(number))
            .unwrap();
        if !st.more_operations {
            return CallUp::MatchOver;
        }
        // Acknowledge the call so the coach can issue the next one.
        st.called = None;
        st.seated[number as usize] = false;
        let strength = st.granted_strength;
        self.cvar.notify_all();
        CallUp::Selected { strength }
    }

    /// Non-blocking check of the shared "more work" flag.
    pub fn contestants_have_more_operations(&self) -> bool {
        self.state.lock().unwrap().more_operations
    }

    /// Called once by each terminating contestant. The last closer
    /// broadcasts so nothing stays parked on a dead bench.
    pub fn close_bench_connection(&self) {
        let mut st = self.state.lock().unwrap();
        assert!(
            st.open_connections > 0,
            "bench connection closed more times than opened"
        );
        st.open_connections -= 1;
        if st.open_connections == 0 {
            let side = self.side;
            log::debug!("{side} bench: all connections closed");
            self.cvar.notify_all();
        }
    }

    /// Coach-side: blocks until every roster member is seated. Returns a
    /// `(number, strength)` snapshot for selection, or `None` on shutdown.
    pub fn wait_for_full_bench(&self) -> Option<Vec<(u32, u32)>> {
        let mut st = self.state.lock().unwrap();
        st = self
            .cvar
            .wait_while(st, |s| {
                s.more_operations && s.seated.iter().filter(|&&seated| seated).count() < s.seated.len()
            })
            .unwrap();
        if !st.more_operations {
            return None;
        }
        let snapshot = st
            .seated
            .iter()
            .zip(&st.strengths)
            .enumerate()
            .filter_map(|(number, (&seated, &strength))| seated.then_some((number as u32, strength)))
            .collect();
        Some(snapshot)
    }

    /// Coach-side: calls one contestant up and blocks until it
    /// acknowledges. At most one call is outstanding at a time. Returns
    /// false when the match ended instead.
    pub fn call_contestant(&self, number: u32) -> bool {
        let mut st = self.state.lock().unwrap();
        st = self
            .cvar
            .wait_while(st, |s| s.more_operations && s.called.is_some())
            .unwrap();
        if !st.more_operations {
            return false;
        }
        let side = self.side;
        assert!(
            st.seated[number as usize],
            "called contestant {number} is not seated on the {side} bench"
        );
        let strength = st.policy.sample();
        st.called = Some(number);
        st.granted_strength = strength;
        log::debug!("{side} coach calls contestant {number} with strength {strength}");
        self.cvar.notify_all();
        st = self
            .cvar
            .wait_while(st, |s| s.more_operations && s.called == Some(number))
            .unwrap();
        st.more_operations
    }

    /// Flips the shared flag and wakes every thread parked on this bench.
    pub fn declare_match_over(&self) {
        let mut st = self.state.lock().unwrap();
        st.more_operations = false;
        self.cvar.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strength::FixedStrength;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn home_bench(roster: u32) -> Arc<Bench> {
        Arc::new(Bench::new(
            TeamSide::Home,
            roster,
            Box::new(FixedStrength(3)),
        ))
    }

    #[test]
    fn call_up_hands_out_a_fresh_strength() {
        let bench = home_bench(1);
        bench.seat_down(0, 1, 0, false);

        let waiter = {
            let bench = Arc::clone(&bench);
            thread::spawn(move || bench.wait_for_contestant_call(0))
        };

        assert!(bench.call_contestant(0));
        assert_eq!(waiter.join().unwrap(), CallUp::Selected { strength: 3 });
    }

    #[test]
    fn shutdown_wakes_a_blocked_contestant() {
        let bench = home_bench(2);
        bench.seat_down(0, 1, 0, false);

        let waiter = {
            let bench = Arc::clone(&bench);
            thread::spawn(move || bench.wait_for_contestant_call(0))
        };
        thread::sleep(Duration::from_millis(50));

        // A teammate returning from the last trial reports the match over.
        bench.seat_down(1, 2, 1, true);

        assert_eq!(waiter.join().unwrap(), CallUp::MatchOver);
        assert!(!bench.contestants_have_more_operations());
    }

    #[test]
    fn more_operations_flag_is_idempotent() {
        let bench = home_bench(1);
        assert!(bench.contestants_have_more_operations());
        assert!(bench.contestants_have_more_operations());

        bench.declare_match_over();
        assert!(!bench.contestants_have_more_operations());
        assert!(!bench.contestants_have_more_operations());
    }

    #[test]
    fn full_bench_snapshot_lists_everyone() {
        let bench = home_bench(3);
        bench.seat_down(0, 5, 0, false);
        bench.seat_down(1, 1, 0, false);
        bench.seat_down(2, 3, 0, false);

        let snapshot = bench.wait_for_full_bench().unwrap();
        assert_eq!(snapshot, vec![(0, 5), (1, 1), (2, 3)]);
    }

    #[test]
    fn full_bench_wait_releases_on_shutdown() {
        let bench = home_bench(2);
        bench.seat_down(0, 1, 0, false);

        let coach = {
            let bench = Arc::clone(&bench);
            thread::spawn(move || bench.wait_for_full_bench())
        };
        thread::sleep(Duration::from_millis(50));

        bench.declare_match_over();
        assert_eq!(coach.join().unwrap(), None);
    }

    #[test]
    fn call_contestant_bails_out_on_shutdown() {
        let bench = home_bench(1);
        bench.declare_match_over();
        assert!(!bench.call_contestant(0));
    }

    #[test]
    #[should_panic(expected = "closed more times")]
    fn closing_more_connections_than_contestants_is_fatal() {
        let bench = home_bench(1);
        bench.close_bench_connection();
        bench.close_bench_connection();
    }
}
