//! Cancellable periodic tasks and the match clock built on them.
//!
//! Everything here is single-threaded: the host event loop drives a scheduler (`poll` or `advance`) and the
//! scheduler runs every due task in place. Tasks must not schedule or cancel from within their own callback.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use web_time::Instant;

use crate::Seconds;

/// Period of the match clock.
pub const TICK: Duration = Duration::from_secs(1);

const MIN_PERIOD: Duration = Duration::from_millis(1);

pub trait Scheduler {
    type Handle: TimerHandle;

    /// Runs `task` once per `period` until the returned handle is cancelled or dropped.
    fn schedule_repeating(&self, period: Duration, task: Box<dyn FnMut()>) -> Self::Handle;
}

pub trait TimerHandle {
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
}

struct Task {
    id: u64,
    period: Duration,
    next_due: Duration,
    callback: Box<dyn FnMut()>,
}

#[derive(Default)]
struct Timeline {
    next_id: u64,
    tasks: Vec<Task>,
}

impl Timeline {
    fn schedule(&mut self, now: Duration, period: Duration, callback: Box<dyn FnMut()>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let period = period.max(MIN_PERIOD);
        self.tasks.push(Task {
            id,
            period,
            next_due: now + period,
            callback,
        });
        id
    }

    fn run_until(&mut self, now: Duration) -> usize {
        let mut runs = 0;
        for task in &mut self.tasks {
            while task.next_due <= now {
                (task.callback)();
                task.next_due += task.period;
                runs += 1;
            }
        }
        runs
    }

    fn contains(&self, id: u64) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    fn remove(&mut self, id: u64) {
        self.tasks.retain(|task| task.id != id);
    }
}

type SharedTimeline = Rc<RefCell<Timeline>>;

/// Handle to a scheduled task; dropping it cancels the task.
#[derive(Debug)]
pub struct TaskHandle {
    id: u64,
    timeline: Weak<RefCell<Timeline>>,
}

impl TaskHandle {
    fn new(id: u64, timeline: &SharedTimeline) -> Self {
        Self {
            id,
            timeline: Rc::downgrade(timeline),
        }
    }
}

impl TimerHandle for TaskHandle {
    fn cancel(&mut self) {
        if let Some(timeline) = self.timeline.upgrade() {
            timeline.borrow_mut().remove(self.id);
        }
        self.timeline = Weak::new();
    }

    fn is_active(&self) -> bool {
        let Some(timeline) = self.timeline.upgrade() else {
            return false;
        };
        timeline.borrow().contains(self.id)
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl core::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timeline")
            .field("next_id", &self.next_id)
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

/// Wall-clock scheduler, driven by calling [`PolledScheduler::poll`] from the host event loop.
#[derive(Clone, Debug)]
pub struct PolledScheduler {
    origin: Instant,
    timeline: SharedTimeline,
}

impl PolledScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            timeline: Default::default(),
        }
    }

    /// Runs every task that fell due since the last poll; returns how many callbacks ran.
    pub fn poll(&self) -> usize {
        self.timeline.borrow_mut().run_until(self.origin.elapsed())
    }

    pub fn active_tasks(&self) -> usize {
        self.timeline.borrow().tasks.len()
    }
}

impl Default for PolledScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for PolledScheduler {
    type Handle = TaskHandle;

    fn schedule_repeating(&self, period: Duration, task: Box<dyn FnMut()>) -> Self::Handle {
        let id = self
            .timeline
            .borrow_mut()
            .schedule(self.origin.elapsed(), period, task);
        TaskHandle::new(id, &self.timeline)
    }
}

/// Virtual-time scheduler, time only moves through [`ManualScheduler::advance`].
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Rc<Cell<Duration>>,
    timeline: SharedTimeline,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn advance(&self, by: Duration) -> usize {
        let now = self.now.get() + by;
        self.now.set(now);
        self.timeline.borrow_mut().run_until(now)
    }

    pub fn advance_secs(&self, secs: u64) -> usize {
        self.advance(Duration::from_secs(secs))
    }

    pub fn active_tasks(&self) -> usize {
        self.timeline.borrow().tasks.len()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TaskHandle;

    fn schedule_repeating(&self, period: Duration, task: Box<dyn FnMut()>) -> Self::Handle {
        let id = self
            .timeline
            .borrow_mut()
            .schedule(self.now.get(), period, task);
        TaskHandle::new(id, &self.timeline)
    }
}

/// Whole-second counter ticking while a match is being played.
///
/// Holds at most one scheduled task: starting always cancels the previous one first.
#[derive(Debug)]
pub struct MatchClock<H> {
    elapsed: Rc<Cell<Seconds>>,
    handle: Option<H>,
}

impl<H: TimerHandle> MatchClock<H> {
    pub fn new() -> Self {
        Self {
            elapsed: Rc::new(Cell::new(0)),
            handle: None,
        }
    }

    pub fn start<S: Scheduler<Handle = H>>(&mut self, scheduler: &S) {
        self.stop();
        self.elapsed.set(0);
        let elapsed = Rc::clone(&self.elapsed);
        let handle = scheduler.schedule_repeating(
            TICK,
            Box::new(move || elapsed.set(elapsed.get().saturating_add(1))),
        );
        self.handle = Some(handle);
    }

    /// Cancels the running task, keeping the elapsed time. Returns whether a task was running.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(mut handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.stop();
        self.elapsed.set(0);
    }

    pub fn elapsed(&self) -> Seconds {
        self.elapsed.get()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| handle.is_active())
    }
}

impl<H: TimerHandle> Default for MatchClock<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_scheduler_runs_due_tasks() {
        let scheduler = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let _handle = scheduler.schedule_repeating(
            Duration::from_millis(500),
            Box::new(move || counter.set(counter.get() + 1)),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(400)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(700)), 2);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn dropping_handle_cancels_task() {
        let scheduler = ManualScheduler::new();
        let handle = scheduler.schedule_repeating(TICK, Box::new(|| {}));
        assert!(handle.is_active());
        assert_eq!(scheduler.active_tasks(), 1);

        drop(handle);

        assert_eq!(scheduler.active_tasks(), 0);
        assert_eq!(scheduler.advance_secs(5), 0);
    }

    #[test]
    fn clock_counts_whole_seconds_and_stops() {
        let scheduler = ManualScheduler::new();
        let mut clock = MatchClock::new();

        clock.start(&scheduler);
        scheduler.advance(Duration::from_millis(3500));
        assert_eq!(clock.elapsed(), 3);
        assert!(clock.is_running());

        assert!(clock.stop());
        scheduler.advance_secs(10);
        assert_eq!(clock.elapsed(), 3);
        assert!(!clock.is_running());
        assert!(!clock.stop());
    }

    #[test]
    fn restarting_clock_keeps_a_single_task() {
        let scheduler = ManualScheduler::new();
        let mut clock = MatchClock::new();

        clock.start(&scheduler);
        scheduler.advance_secs(2);
        clock.start(&scheduler);

        assert_eq!(scheduler.active_tasks(), 1);
        assert_eq!(clock.elapsed(), 0);
        scheduler.advance_secs(4);
        assert_eq!(clock.elapsed(), 4);

        clock.reset();
        assert_eq!(clock.elapsed(), 0);
        assert_eq!(scheduler.active_tasks(), 0);
    }

    #[test]
    fn polled_scheduler_schedules_and_cancels() {
        let scheduler = PolledScheduler::new();
        let mut handle = scheduler.schedule_repeating(Duration::from_secs(3600), Box::new(|| {}));

        assert_eq!(scheduler.poll(), 0);
        assert_eq!(scheduler.active_tasks(), 1);
        handle.cancel();
        assert!(!handle.is_active());
        assert_eq!(scheduler.active_tasks(), 0);
    }
}
