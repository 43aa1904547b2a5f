//! Callback Cell
//!
//! A single-slot holder for the most recent callback. Timers read the slot
//! when they fire instead of capturing a closure when they start.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Slot<A> = Rc<RefCell<Option<Rc<dyn Fn(A)>>>>;

/// Shared, replaceable callback. Clones share the same slot.
pub struct CallbackCell<A = ()> {
    slot: Slot<A>,
}

impl<A> Clone for CallbackCell<A> {
    fn clone(&self) -> Self {
        Self { slot: Rc::clone(&self.slot) }
    }
}

impl<A> Default for CallbackCell<A> {
    fn default() -> Self {
        Self { slot: Rc::new(RefCell::new(None)) }
    }
}

impl<A: 'static> fmt::Debug for CallbackCell<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackCell")
            .field("occupied", &self.is_set())
            .finish()
    }
}

impl<A: 'static> CallbackCell<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(callback: impl Fn(A) + 'static) -> Self {
        let cell = Self::new();
        cell.set(callback);
        cell
    }

    /// Replace the stored callback.
    pub fn set(&self, callback: impl Fn(A) + 'static) {
        *self.slot.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn clear(&self) {
        self.slot.borrow_mut().take();
    }

    pub fn is_set(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Invoke whatever callback is stored right now.
    ///
    /// The borrow is released before the call, so the callback may replace
    /// itself. Returns `false` when the slot is empty.
    pub fn call(&self, arg: A) -> bool {
        let current = self.slot.borrow().clone();
        match current {
            Some(callback) => {
                callback(arg);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn call_uses_latest_callback() {
        let hits = Rc::new(Cell::new(0));
        let cell = CallbackCell::<u32>::new();

        let h = hits.clone();
        cell.set(move |n| h.set(h.get() + n));
        let h = hits.clone();
        cell.set(move |n| h.set(h.get() + n * 10));

        assert!(cell.call(2));
        assert_eq!(hits.get(), 20);
    }

    #[test]
    fn empty_cell_reports_no_call() {
        let cell = CallbackCell::<()>::new();
        assert!(!cell.call(()));
        assert!(!cell.is_set());
    }

    #[test]
    fn debug_shows_occupancy() {
        let cell = CallbackCell::<u8>::new();
        assert_eq!(format!("{cell:?}"), "CallbackCell { occupied: false }");
        cell.set(|_| {});
        assert_eq!(format!("{cell:?}"), "CallbackCell { occupied: true }");
    }

    #[test]
    fn callback_may_replace_itself() {
        let cell = CallbackCell::<()>::new();
        let inner = cell.clone();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        cell.set(move |_| {
            h.set(h.get() + 1);
            inner.clear();
        });

        assert!(cell.call(()));
        assert!(!cell.call(()));
        assert_eq!(hits.get(), 1);
    }
}
