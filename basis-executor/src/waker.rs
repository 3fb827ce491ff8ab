use std::collections::VecDeque;
use std::sync::Arc;
use std::task::{Wake, Waker};
use std::thread::{self, Thread};

use parking_lot::Mutex;

/// Ids of spawned futures that were woken, plus the thread to unpark when
/// one is. Wakers may be sent to other threads, hence the lock.
#[derive(Debug)]
pub(crate) struct WakeQueue {
    woken: Mutex<VecDeque<usize>>,
    thread: Thread,
}

impl WakeQueue {
    pub(crate) fn new() -> Arc<WakeQueue> {
        Arc::new(WakeQueue { woken: Mutex::new(VecDeque::new()), thread: thread::current() })
    }

    pub(crate) fn waker(self: &Arc<Self>, id: usize) -> Waker {
        Waker::from(Arc::new(TaskWaker { id, queue: self.clone() }))
    }

    pub(crate) fn push(&self, id: usize) {
        self.woken.lock().push_back(id);
        self.thread.unpark();
    }

    pub(crate) fn pop(&self) -> Option<usize> {
        self.woken.lock().pop_front()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.woken.lock().is_empty()
    }
}

struct TaskWaker {
    id: usize,
    queue: Arc<WakeQueue>,
}

impl Wake for TaskWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.queue.push(self.id);
    }
}
