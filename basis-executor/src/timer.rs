use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::time::Duration;

use basis_core::Task;

struct Timer {
    deadline: u64,
    // Registration order, so that timers sharing a deadline fire FIFO.
    id: u64,
    task: Task,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.id == other.id
    }
}

impl Eq for Timer {}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: earliest deadline first, then lowest id.
        other.deadline.cmp(&self.deadline).then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending timers, keyed by deadline in milliseconds.
#[derive(Default)]
pub(crate) struct TimerQueue {
    heap: BinaryHeap<Timer>,
    next_id: u64,
}

impl TimerQueue {
    pub(crate) fn push(&mut self, deadline: u64, task: Task) {
        let id = self.next_id;
        self.next_id += 1;
        self.heap.push(Timer { deadline, id, task });
    }

    pub(crate) fn next_deadline(&self) -> Option<u64> {
        self.heap.peek().map(|timer| timer.deadline)
    }

    /// Removes the earliest timer if it is due at `now`.
    pub(crate) fn pop_due(&mut self, now: u64) -> Option<Task> {
        match self.heap.peek() {
            Some(timer) if timer.deadline <= now => self.heap.pop().map(|timer| timer.task),
            _ => None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("len", &self.heap.len())
            .field("next_deadline", &self.next_deadline())
            .finish()
    }
}

/// Whole milliseconds in `delay`, rounded up so that a timer never fires
/// early.
pub(crate) fn millis_ceil(delay: Duration) -> u64 {
    let millis = delay.as_millis() + u128::from(delay.subsec_nanos() % 1_000_000 != 0);
    u64::try_from(millis).unwrap_or(u64::MAX)
}
