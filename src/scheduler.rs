//! Virtual-time scheduler for the controller's delayed work.
//!
//! The scheduler never sleeps. Its owner moves time forward and collects the
//! tasks that fell due, so the same code runs under a test's simulated clock
//! and under the async facade's wall clock.

use std::time::Duration;

/// Identifies a scheduled task. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// The kinds of delayed work the controller schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// One-shot auto-resume after a key-driven pause
    Resume,
    /// Repeating one-second countdown tick
    CountdownTick,
}

#[derive(Debug)]
struct Scheduled {
    handle: TaskHandle,
    kind: TaskKind,
    due: Duration,
    interval: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    tasks: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since the scheduler was created
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule_once(&mut self, kind: TaskKind, delay: Duration) -> TaskHandle {
        self.push(kind, delay, None)
    }

    /// Schedule a task that fires every `interval` until cancelled
    pub fn schedule_repeating(&mut self, kind: TaskKind, interval: Duration) -> TaskHandle {
        self.push(kind, interval, Some(interval))
    }

    fn push(&mut self, kind: TaskKind, delay: Duration, interval: Option<Duration>) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.tasks.push(Scheduled {
            handle,
            kind,
            due: self.now + delay,
            interval,
        });
        handle
    }

    /// Cancel a task. Returns false when it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn pending_of(&self, kind: TaskKind) -> usize {
        self.tasks.iter().filter(|t| t.kind == kind).count()
    }

    /// Time left until the earliest task is due
    pub fn time_until_next(&self) -> Option<Duration> {
        self.tasks
            .iter()
            .map(|t| t.due.saturating_sub(self.now))
            .min()
    }

    /// Take the earliest task due at or before `until`.
    ///
    /// Ties go to the task scheduled first. The clock moves to the task's due
    /// time and repeating tasks are re-armed for their next period.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskHandle, TaskKind)> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.handle.0))
            .map(|(i, _)| i)?;

        let task = &mut self.tasks[idx];
        let fired = (task.handle, task.kind);
        if task.due > self.now {
            self.now = task.due;
        }
        match task.interval {
            Some(interval) => task.due += interval,
            None => {
                self.tasks.remove(idx);
            }
        }
        Some(fired)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, t: Duration) {
        if t > self.now {
            self.now = t;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn one_shot_fires_once() {
        let mut s = Scheduler::new();
        let h = s.schedule_once(TaskKind::Resume, 3 * SEC);
        assert!(s.pop_due(2 * SEC).is_none());
        assert_eq!(s.pop_due(3 * SEC), Some((h, TaskKind::Resume)));
        assert!(s.pop_due(10 * SEC).is_none());
        assert!(!s.is_pending(h));
        assert_eq!(s.now(), 3 * SEC);
    }

    #[test]
    fn repeating_rearms_until_cancelled() {
        let mut s = Scheduler::new();
        let h = s.schedule_repeating(TaskKind::CountdownTick, SEC);
        let mut fired = 0;
        while s.pop_due(3 * SEC).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 3);
        assert_eq!(s.time_until_next(), Some(SEC));
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert!(s.pop_due(10 * SEC).is_none());
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut s = Scheduler::new();
        let tick = s.schedule_repeating(TaskKind::CountdownTick, 5 * SEC);
        let resume = s.schedule_once(TaskKind::Resume, 5 * SEC);
        assert_eq!(s.pop_due(5 * SEC).map(|f| f.0), Some(tick));
        assert_eq!(s.pop_due(5 * SEC).map(|f| f.0), Some(resume));
    }

    #[test]
    fn handles_are_not_reused() {
        let mut s = Scheduler::new();
        let a = s.schedule_once(TaskKind::Resume, SEC);
        s.cancel(a);
        let b = s.schedule_once(TaskKind::Resume, SEC);
        assert_ne!(a, b);
        assert_eq!(s.pending_of(TaskKind::Resume), 1);
    }
}
