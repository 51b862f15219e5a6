//! Named repeating timers on a simulation clock.
//!
//! Every periodic behavior in a match (spawning, shooting, the countdown,
//! escalation, crowd checks, each engaged enemy's castle damage) is a record
//! of (kind, delay, next fire time). The engine advances the clock in fixed
//! steps and pops due timers one at a time in fire-time order, so a callback
//! that cancels another timer takes effect before that timer can fire.

use hecs::Entity;

/// Delays shorter than this are raised to it so a timer cannot fire
/// unboundedly often inside one step.
const MIN_DELAY_MS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Spawn,
    Shoot,
    Countdown,
    /// Enemy escalation step.
    Difficulty,
    XpMultiplier,
    CrowdCheck,
    /// Periodic castle damage from one engaged enemy.
    CastleDamage(Entity),
}

/// Whether the scheduler clock moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClockState {
    #[default]
    Running,
    /// Clock frozen; remaining delays are preserved exactly.
    Paused,
}

#[derive(Debug, Clone)]
struct Timer {
    kind: TimerKind,
    delay_ms: f64,
    next_fire_ms: f64,
    /// Insertion order, breaks fire-time ties.
    seq: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: f64,
    clock: ClockState,
    timers: Vec<Timer>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn clock(&self) -> ClockState {
        self.clock
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Register a repeating timer first firing `delay_ms` from now.
    /// Replaces any existing timer of the same kind.
    pub fn add(&mut self, kind: TimerKind, delay_ms: f64) {
        self.cancel(kind);
        let delay_ms = delay_ms.max(MIN_DELAY_MS);
        self.timers.push(Timer {
            kind,
            delay_ms,
            next_fire_ms: self.now_ms + delay_ms,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Remove a timer. Returns whether it existed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.kind != kind);
        self.timers.len() != before
    }

    pub fn contains(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|t| t.kind == kind)
    }

    pub fn delay(&self, kind: TimerKind) -> Option<f64> {
        self.find(kind).map(|t| t.delay_ms)
    }

    /// Milliseconds until the timer next fires.
    pub fn remaining(&self, kind: TimerKind) -> Option<f64> {
        self.find(kind).map(|t| t.next_fire_ms - self.now_ms)
    }

    /// Change a timer's period in place. The pending cycle is re-based on the
    /// new delay (measured from the last fire), never earlier than now.
    pub fn set_delay(&mut self, kind: TimerKind, delay_ms: f64) -> bool {
        let now = self.now_ms;
        let delay_ms = delay_ms.max(MIN_DELAY_MS);
        match self.timers.iter_mut().find(|t| t.kind == kind) {
            Some(timer) => {
                let last_fire = timer.next_fire_ms - timer.delay_ms;
                timer.delay_ms = delay_ms;
                timer.next_fire_ms = (last_fire + delay_ms).max(now);
                true
            }
            None => false,
        }
    }

    /// Drop every timer (match over).
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Drop every timer and rewind the clock (new match).
    pub fn reset(&mut self) {
        self.timers.clear();
        self.now_ms = 0.0;
        self.clock = ClockState::Running;
    }

    pub fn pause(&mut self) {
        self.clock = ClockState::Paused;
    }

    pub fn resume(&mut self) {
        self.clock = ClockState::Running;
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock to
    /// its fire time and re-arming it for the next period.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<TimerKind> {
        if self.clock == ClockState::Paused {
            return None;
        }
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.next_fire_ms <= until_ms)
            .min_by(|a, b| {
                a.next_fire_ms
                    .total_cmp(&b.next_fire_ms)
                    .then(a.seq.cmp(&b.seq))
            })?;

        self.now_ms = self.now_ms.max(timer.next_fire_ms);
        timer.next_fire_ms += timer.delay_ms;
        Some(timer.kind)
    }

    /// Move the clock to `until_ms` once all due timers were popped.
    pub fn settle(&mut self, until_ms: f64) {
        if self.clock == ClockState::Running {
            self.now_ms = self.now_ms.max(until_ms);
        }
    }

    /// Advance by `dt_ms`, returning every timer that fired in order.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<TimerKind> {
        self.advance_to(self.now_ms + dt_ms)
    }

    /// Advance the clock to `until_ms`, returning every timer that fired in
    /// order. Callers that need to react between fires use `pop_due`.
    pub fn advance_to(&mut self, until_ms: f64) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        while let Some(kind) = self.pop_due(until_ms) {
            fired.push(kind);
        }
        self.settle(until_ms);
        fired
    }

    fn find(&self, kind: TimerKind) -> Option<&Timer> {
        self.timers.iter().find(|t| t.kind == kind)
    }
}
