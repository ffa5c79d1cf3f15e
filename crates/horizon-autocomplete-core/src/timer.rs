//! Timer system for Horizon Autocomplete.
//!
//! Provides one-shot timers driven by an explicit clock. The widget uses them
//! for the fetch debounce window and for the blur grace delay; the driver
//! decides what "now" is, which keeps timer behaviour deterministic in tests.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};

/// Deadline used when `now + duration` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// When this timer should fire.
    fire_at: Instant,
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// Manages one-shot timers.
///
/// Stopped timers are removed from the registry immediately; their queue
/// entries are discarded lazily when they reach the front of the queue.
#[derive(Debug)]
pub struct TimerManager {
    /// All pending timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending timer fires (min-heap by fire time).
    queue: BinaryHeap<TimerQueueEntry>,
}

impl TimerManager {
    /// Create a new timer manager.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Start a one-shot timer that fires `duration` after the current wall-clock time.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        self.start_one_shot_at(Instant::now(), duration)
    }

    /// Start a one-shot timer that fires `duration` after `now`.
    ///
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_one_shot_at(&mut self, now: Instant, duration: Duration) -> TimerId {
        let fire_at = now
            .checked_add(duration)
            .or_else(|| now.checked_add(FAR_FUTURE))
            .unwrap_or(now);
        let id = self.timers.insert(TimerData { fire_at });
        self.queue.push(TimerQueueEntry {
            id,
            fire_time: fire_at,
        });

        tracing::trace!(target: "horizon_autocomplete_core::timer", ?id, ?duration, "timer started");
        id
    }

    /// Stop and remove a timer.
    ///
    /// Returns an error if the timer has already fired or been stopped.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if self.timers.remove(id).is_some() {
            tracing::trace!(target: "horizon_autocomplete_core::timer", ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Get the instant at which a pending timer will fire.
    pub fn deadline(&self, id: TimerId) -> Option<Instant> {
        self.timers.get(id).map(|t| t.fire_at)
    }

    /// Get the duration from `now` until the next timer fires, if any.
    ///
    /// Returns `None` if there are no pending timers.
    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        self.discard_stopped();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_duration_since(now))
    }

    /// Process all timers whose deadline is at or before `now`.
    ///
    /// Returns the fired timer IDs in deadline order. Fired timers are removed.
    #[tracing::instrument(skip(self), target = "horizon_autocomplete_core::timer", level = "trace")]
    pub fn process_expired_at(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            if self.timers.remove(entry.id).is_some() {
                tracing::trace!(target: "horizon_autocomplete_core::timer", id = ?entry.id, "timer fired");
                fired.push(entry.id);
            }
        }

        fired
    }

    /// Get the number of pending timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    fn discard_stopped(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let start = Instant::now();
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot_at(start, ms(500));

        assert!(timers.is_active(id));
        assert!(timers.process_expired_at(start + ms(499)).is_empty());
        assert_eq!(timers.process_expired_at(start + ms(500)), vec![id]);
        assert!(!timers.is_active(id));
        assert!(timers.process_expired_at(start + ms(5000)).is_empty());
    }

    #[test]
    fn test_unbounded_duration_is_clamped() {
        let start = Instant::now();
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot_at(start, Duration::from_millis(u64::MAX));

        assert!(timers.is_active(id));
        assert!(timers.process_expired_at(start + ms(10_000)).is_empty());
        assert!(timers.time_until_next(start).unwrap() >= FAR_FUTURE);
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let start = Instant::now();
        let mut timers = TimerManager::new();
        let first = timers.start_one_shot_at(start, ms(100));
        let second = timers.start_one_shot_at(start, ms(200));

        timers.stop(first).unwrap();
        assert_eq!(timers.stop(first), Err(TimerError::InvalidTimerId.into()));

        assert_eq!(timers.process_expired_at(start + ms(1000)), vec![second]);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_fire_order_follows_deadlines() {
        let start = Instant::now();
        let mut timers = TimerManager::new();
        let late = timers.start_one_shot_at(start, ms(300));
        let early = timers.start_one_shot_at(start, ms(100));

        assert_eq!(timers.process_expired_at(start + ms(300)), vec![early, late]);
    }

    #[test]
    fn test_time_until_next_skips_stopped() {
        let start = Instant::now();
        let mut timers = TimerManager::new();
        let first = timers.start_one_shot_at(start, ms(100));
        timers.start_one_shot_at(start, ms(400));

        assert_eq!(timers.time_until_next(start), Some(ms(100)));
        timers.stop(first).unwrap();
        assert_eq!(timers.time_until_next(start), Some(ms(400)));
        assert_eq!(timers.time_until_next(start + ms(500)), Some(Duration::ZERO));
    }

    #[test]
    fn test_deadline() {
        let start = Instant::now();
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot_at(start, ms(150));
        assert_eq!(timers.deadline(id), Some(start + ms(150)));
        timers.stop(id).unwrap();
        assert_eq!(timers.deadline(id), None);
        assert_eq!(timers.time_until_next(start), None);
    }
}
