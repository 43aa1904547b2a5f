//! Restartable interval slot.

use std::cell::{Cell, RefCell};

/// Holds at most one running interval.
///
/// [`restart`](Self::restart) stops the current interval before starting a
/// fresh one, so the tick phase follows the latest input. Once
/// [`release`](Self::release) has run the slot stays empty.
pub struct IntervalSlot<H> {
    current: RefCell<Option<H>>,
    released: Cell<bool>,
    start: Box<dyn Fn() -> Option<H>>,
    stop: Box<dyn Fn(H)>,
}

impl<H> IntervalSlot<H> {
    pub fn new(start: impl Fn() -> Option<H> + 'static, stop: impl Fn(H) + 'static) -> Self {
        Self {
            current: RefCell::new(None),
            released: Cell::new(false),
            start: Box::new(start),
            stop: Box::new(stop),
        }
    }

    pub fn restart(&self) {
        if self.released.get() {
            return;
        }
        self.stop_current();
        let handle = (self.start)();
        *self.current.borrow_mut() = handle;
    }

    /// Stop the interval for good.
    pub fn release(&self) {
        self.released.set(true);
        self.stop_current();
    }

    pub fn is_running(&self) -> bool {
        self.current.borrow().is_some()
    }

    fn stop_current(&self) {
        let previous = self.current.borrow_mut().take();
        if let Some(handle) = previous {
            (self.stop)(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    /// Fake timer: handles are sequence numbers, `live` lists the running ones.
    fn slot() -> (IntervalSlot<u32>, Rc<RefCell<Vec<u32>>>) {
        let live = Rc::new(RefCell::new(Vec::new()));
        let next = Rc::new(Cell::new(0));
        let started = live.clone();
        let stopped = live.clone();
        let slot = IntervalSlot::new(
            move || {
                next.set(next.get() + 1);
                started.borrow_mut().push(next.get());
                Some(next.get())
            },
            move |handle| stopped.borrow_mut().retain(|h| *h != handle),
        );
        (slot, live)
    }

    #[test]
    fn restart_replaces_the_running_interval() {
        let (slot, live) = slot();
        slot.restart();
        slot.restart();
        slot.restart();
        assert_eq!(*live.borrow(), vec![3]);
        assert!(slot.is_running());
    }

    #[test]
    fn release_stops_and_blocks_later_restarts() {
        let (slot, live) = slot();
        slot.restart();
        slot.release();
        assert!(live.borrow().is_empty());

        // A late input event after teardown must not revive the timer
        slot.restart();
        assert!(live.borrow().is_empty());
        assert!(!slot.is_running());
    }

    #[test]
    fn failed_start_leaves_slot_empty() {
        let slot = IntervalSlot::<u32>::new(|| None, |_| {});
        slot.restart();
        assert!(!slot.is_running());
    }
}
