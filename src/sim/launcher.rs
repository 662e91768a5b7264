//! Launch cadence
//!
//! Replaces the original page's self-rescheduling timer chain with a state
//! machine the driver polls once per frame. The launcher lives inside the
//! session, so stopping a show drops every pending launch with it; nothing
//! can fire against a torn-down engine.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Where the show is in its launch schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Rockets still to launch
    Scheduling,
    /// Budget spent; waiting out the grace period so the sky can clear
    Draining,
    /// Stop signal issued
    Done,
}

/// What the driver should do after a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing due this frame
    Wait,
    /// Launch one rocket now
    Launch,
    /// Grace period elapsed: stop the frame loop
    Finished,
}

/// Schedules rocket launches over one show.
#[derive(Debug, Clone)]
pub struct Launcher {
    phase: Phase,
    launched: u32,
    max: u32,
    delay_min_ms: f64,
    delay_max_ms: f64,
    grace_ms: f64,
    /// None means a launch is due on the next poll
    next_due_ms: Option<f64>,
    deadline_ms: f64,
    rng: Pcg32,
}

impl Launcher {
    pub fn new(max: u32, delay_min_ms: f64, delay_max_ms: f64, grace_ms: f64, seed: u64) -> Self {
        Self {
            phase: Phase::Scheduling,
            launched: 0,
            max,
            delay_min_ms,
            delay_max_ms: delay_max_ms.max(delay_min_ms),
            grace_ms,
            next_due_ms: None,
            deadline_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Advance the schedule to `now_ms`.
    ///
    /// The first poll launches immediately. Each launch schedules the next
    /// one random delay later; the poll after the final launch arms the
    /// wind-down timer instead. `Finished` is reported exactly once.
    pub fn poll(&mut self, now_ms: f64) -> Verdict {
        match self.phase {
            Phase::Scheduling => {
                if self.next_due_ms.is_some_and(|due| now_ms < due) {
                    return Verdict::Wait;
                }
                if self.launched < self.max {
                    self.launched += 1;
                    self.next_due_ms = Some(now_ms + self.next_delay());
                    Verdict::Launch
                } else {
                    self.phase = Phase::Draining;
                    self.deadline_ms = now_ms + self.grace_ms;
                    Verdict::Wait
                }
            }
            Phase::Draining => {
                if now_ms >= self.deadline_ms {
                    self.phase = Phase::Done;
                    Verdict::Finished
                } else {
                    Verdict::Wait
                }
            }
            Phase::Done => Verdict::Wait,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn launched(&self) -> u32 {
        self.launched
    }

    fn next_delay(&mut self) -> f64 {
        if self.delay_max_ms > self.delay_min_ms {
            self.rng.random_range(self.delay_min_ms..self.delay_max_ms)
        } else {
            self.delay_min_ms
        }
    }
}
