//! Single-threaded delayed task queue.
//!
//! Tasks are plain values scheduled at an offset from the scheduler's own
//! clock, which only moves when [`Scheduler::advance`] is called.  Nothing is
//! awaited and nothing runs on another thread: the owner drains due tasks once
//! per frame and acts on them in order.

use std::time::Duration;

/// Identifies a scheduled task so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    handle: TaskHandle,
    due: Duration,
    task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once `delay` has elapsed on this scheduler's clock.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            due: self.now + delay,
            task,
        });
        handle
    }

    /// Drop a pending task.  Returns `false` if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Move the clock forward by `dt` and return every task that fell due,
    /// earliest first; tasks due at the same instant keep scheduling order.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.now += dt;
        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| e.due <= now);
        self.entries = pending;
        due.sort_by_key(|e| (e.due, e.handle.0));
        due.into_iter().map(|e| e.task).collect()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Time until `handle` falls due, if it is still pending.
    pub fn remaining(&self, handle: TaskHandle) -> Option<Duration> {
        self.entries
            .iter()
            .find(|e| e.handle == handle)
            .map(|e| e.due.saturating_sub(self.now))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn now(&self) -> Duration {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn tasks_fire_when_due() {
        let mut s = Scheduler::new();
        s.schedule(ms(180), "despawn");
        s.schedule(ms(600), "respawn");
        assert!(s.advance(ms(100)).is_empty());
        assert_eq!(s.advance(ms(80)), vec!["despawn"]);
        assert_eq!(s.pending(), 1);
        assert_eq!(s.advance(ms(1000)), vec!["respawn"]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn one_big_step_returns_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(600), 2);
        s.schedule(ms(180), 1);
        s.schedule(ms(600), 3);
        assert_eq!(s.advance(ms(700)), vec![1, 2, 3]);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut s = Scheduler::new();
        let h = s.schedule(ms(10), "fade");
        assert!(s.is_pending(h));
        assert!(s.cancel(h));
        assert!(!s.cancel(h), "second cancel is a no-op");
        assert!(s.advance(ms(50)).is_empty());
    }

    #[test]
    fn delays_are_relative_to_current_clock() {
        let mut s = Scheduler::new();
        s.advance(ms(1000));
        let h = s.schedule(ms(200), ());
        assert_eq!(s.remaining(h), Some(ms(200)));
        s.advance(ms(150));
        assert_eq!(s.remaining(h), Some(ms(50)));
        assert_eq!(s.advance(ms(50)).len(), 1);
        assert_eq!(s.remaining(h), None);
    }
}
