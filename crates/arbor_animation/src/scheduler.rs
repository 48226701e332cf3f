//! Timer scheduler
//!
//! Delayed events driven by frame time rather than a wall clock, so the host's
//! frame loop stays the only source of progress. Timers live in a `SlotMap`:
//! a cancelled or fired timer's `TimerId` is never reused, so a stale handle can
//! neither fire nor cancel a newer timer.

use slotmap::{new_key_type, SlotMap};
use std::cmp::Ordering;

new_key_type! {
    /// Handle to a pending timer
    pub struct TimerId;
}

struct PendingTimer<E> {
    deadline: f64,
    /// Insertion order, breaks ties between equal deadlines
    seq: u64,
    event: E,
}

/// Schedules events to be released after a delay measured in frame time
pub struct TimerScheduler<E> {
    timers: SlotMap<TimerId, PendingTimer<E>>,
    now: f64,
    next_seq: u64,
}

impl<E> TimerScheduler<E> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now: 0.0,
            next_seq: 0,
        }
    }

    /// Scheduler time in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Release `event` once `delay` seconds of frame time have passed
    pub fn schedule(&mut self, delay: f32, event: E) -> TimerId {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.timers.insert(PendingTimer {
            deadline: self.now + delay as f64,
            seq,
            event,
        });
        tracing::debug!("TimerScheduler: scheduled {:?} in {:.3}s", id, delay);
        id
    }

    /// Cancel a pending timer, returning its event if it had not fired yet
    pub fn cancel(&mut self, id: TimerId) -> Option<E> {
        let removed = self.timers.remove(id).map(|t| t.event);
        if removed.is_some() {
            tracing::debug!("TimerScheduler: cancelled {:?}", id);
        }
        removed
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advance time by `dt` seconds and return the events that came due,
    /// earliest deadline first
    pub fn advance(&mut self, dt: f32) -> Vec<E> {
        if dt.is_finite() && dt > 0.0 {
            self.now += dt as f64;
        }

        let now = self.now;
        let mut due: Vec<(TimerId, f64, u64)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .map(|(id, t)| (id, t.deadline, t.seq))
            .collect();

        if due.is_empty() {
            return Vec::new();
        }

        due.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then(a.2.cmp(&b.2))
        });

        due.into_iter()
            .filter_map(|(id, _, _)| self.timers.remove(id))
            .map(|t| t.event)
            .collect()
    }
}

impl<E> Default for TimerScheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut timers = TimerScheduler::new();
        let id = timers.schedule(3.0, "winner");

        assert!(timers.advance(2.9).is_empty());
        assert!(timers.is_pending(id));
        assert_eq!(timers.advance(0.2), vec!["winner"]);
        assert!(!timers.is_pending(id));
        assert!(timers.advance(10.0).is_empty());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timers = TimerScheduler::new();
        let id = timers.schedule(1.0, 1u32);
        assert_eq!(timers.cancel(id), Some(1));
        assert_eq!(timers.cancel(id), None);
        assert!(timers.advance(5.0).is_empty());
    }

    #[test]
    fn test_stale_handle_does_not_cancel_newer_timer() {
        let mut timers = TimerScheduler::new();
        let old = timers.schedule(1.0, "old");
        timers.cancel(old);
        let new = timers.schedule(1.0, "new");

        assert!(timers.cancel(old).is_none());
        assert!(timers.is_pending(new));
        assert_eq!(timers.advance(1.0), vec!["new"]);
    }

    #[test]
    fn test_due_events_in_deadline_order() {
        let mut timers = TimerScheduler::new();
        timers.schedule(2.0, 'b');
        timers.schedule(1.0, 'a');
        timers.schedule(2.0, 'c');
        assert_eq!(timers.advance(5.0), vec!['a', 'b', 'c']);
    }
}
