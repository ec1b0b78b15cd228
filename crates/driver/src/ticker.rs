//! Tick driver - turns a session's [`TimerPlan`] into scheduled callbacks
//!
//! The driver is a deadline scheduler with no thread of its own: the host
//! loop calls [`TickDriver::poll`] with the current time and waits until
//! [`TickDriver::next_deadline`] in between. Keeping it clock-agnostic makes
//! timing fully testable with synthetic `Instant`s.
//!
//! Every emitted event carries the epoch of the plan it was scheduled under,
//! so a callback that was already due when the player started a new game is
//! dropped by the session instead of moving the new game's piece.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::core::{GameSession, ScheduledEvent, TimerKind, TimerPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Periodic {
    period: Duration,
    due: Instant,
}

impl Periodic {
    fn start(period_ms: u32, now: Instant) -> Self {
        let period = Duration::from_millis(period_ms as u64);
        Self {
            period,
            due: now + period,
        }
    }

    /// Advance past `now` without firing a burst of catch-up ticks
    fn reschedule(&mut self, now: Instant) {
        self.due += self.period;
        if self.due <= now {
            self.due = now + self.period;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TickDriver {
    plan: Option<TimerPlan>,
    gravity: Option<Periodic>,
    flash: Option<Periodic>,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently running plan, if any
    pub fn plan(&self) -> Option<TimerPlan> {
        self.plan
    }

    /// Reconcile running timers with `plan`.
    ///
    /// A timer whose period changed, or any timer after an epoch change, is
    /// restarted: the old deadline is discarded and the next callback fires
    /// one full period after `now`. Unchanged timers keep their phase.
    pub fn sync(&mut self, plan: TimerPlan, now: Instant) {
        let previous = self.plan;
        let epoch_changed = previous.map(|p| p.epoch != plan.epoch).unwrap_or(true);

        let gravity_changed = epoch_changed || previous.and_then(|p| p.gravity_ms) != plan.gravity_ms;
        if gravity_changed {
            self.gravity = plan.gravity_ms.map(|ms| Periodic::start(ms, now));
        }

        let flash_changed = epoch_changed || previous.and_then(|p| p.flash_ms) != plan.flash_ms;
        if flash_changed {
            self.flash = plan.flash_ms.map(|ms| Periodic::start(ms, now));
        }

        self.plan = Some(plan);
    }

    /// Stop all timers (game over, shutdown)
    pub fn stop(&mut self) {
        self.plan = None;
        self.gravity = None;
        self.flash = None;
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.gravity, self.flash) {
            (Some(g), Some(f)) => Some(g.due.min(f.due)),
            (Some(g), None) => Some(g.due),
            (None, Some(f)) => Some(f.due),
            (None, None) => None,
        }
    }

    /// Time left until the next deadline, capped at `max`
    pub fn timeout(&self, now: Instant, max: Duration) -> Duration {
        self.next_deadline()
            .map(|d| d.saturating_duration_since(now).min(max))
            .unwrap_or(max)
    }

    /// Collect callbacks that are due at `now`, earliest first
    pub fn poll(&mut self, now: Instant) -> ArrayVec<ScheduledEvent, 2> {
        let mut due = ArrayVec::new();
        let Some(plan) = self.plan else {
            return due;
        };

        let mut fired: ArrayVec<(Instant, TimerKind), 2> = ArrayVec::new();
        if let Some(g) = self.gravity.as_mut() {
            if g.due <= now {
                fired.push((g.due, TimerKind::Gravity));
                g.reschedule(now);
            }
        }
        if let Some(f) = self.flash.as_mut() {
            if f.due <= now {
                fired.push((f.due, TimerKind::Flash));
                f.reschedule(now);
            }
        }

        fired.sort_by_key(|&(at, _)| at);
        for (_, kind) in fired {
            due.push(ScheduledEvent {
                epoch: plan.epoch,
                kind,
            });
        }
        due
    }
}

/// One scheduling pass: sync to the session's plan, fire due callbacks,
/// then sync again so interval changes and phase changes take effect from
/// the next tick. Returns how many callbacks changed the session.
pub fn drive(session: &mut GameSession, driver: &mut TickDriver, now: Instant) -> usize {
    driver.sync(session.timer_plan(), now);

    let mut applied = 0;
    for event in driver.poll(now) {
        if session.on_timer(event) {
            applied += 1;
        }
    }

    driver.sync(session.timer_plan(), now);
    applied
}
