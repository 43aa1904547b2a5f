//! Inactivity Watchdog
//!
//! Fires a timeout callback exactly once when no input arrives for the
//! configured number of seconds.
//!
//! The watchdog keeps a deadline, not a counter. Activity moves the
//! deadline to `now + timeout`; [`Watchdog::tick`] compares the clock with
//! it, so a tick that lands mid-second never shortens the idle period.
//! The driver calls `tick` about once per second and
//! [`Watchdog::activity`] on every qualifying input event. Expiry hands
//! back an [`Expiry`] token instead of running the callback inline, so the
//! driver can defer it to a later task.

use std::cell::RefCell;
use std::rc::Rc;

use crate::callback::CallbackCell;

/// Milliseconds since some fixed origin. Must not go backwards.
pub type Clock = Rc<dyn Fn() -> u64>;

const MS_PER_SEC: u64 = 1000;

/// Result of checking a [`Countdown`] against the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Still counting; whole seconds left, rounded up
    Counting(u32),
    /// Reached the deadline on this step
    Expired,
    /// Already expired; waiting for a reset
    Inert,
}

/// Pure countdown state over caller-supplied timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    timeout_secs: u32,
    deadline_ms: u64,
    fired: bool,
}

impl Countdown {
    /// A zero timeout is raised to one second.
    pub fn new(timeout_secs: u32, now_ms: u64) -> Self {
        let timeout_secs = timeout_secs.max(1);
        Self {
            timeout_secs,
            deadline_ms: deadline(now_ms, timeout_secs),
            fired: false,
        }
    }

    pub fn timeout_secs(&self) -> u32 {
        self.timeout_secs
    }

    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    pub fn remaining_secs(&self, now_ms: u64) -> u32 {
        if self.fired {
            return 0;
        }
        let left = self.deadline_ms.saturating_sub(now_ms);
        u32::try_from(left.div_ceil(MS_PER_SEC)).unwrap_or(u32::MAX)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Push the deadline to a full timeout from `now_ms` and re-arm.
    pub fn reset(&mut self, now_ms: u64) {
        self.deadline_ms = deadline(now_ms, self.timeout_secs);
        self.fired = false;
    }

    /// Change the timeout and restart.
    pub fn reconfigure(&mut self, timeout_secs: u32, now_ms: u64) {
        self.timeout_secs = timeout_secs.max(1);
        self.reset(now_ms);
    }

    pub fn step(&mut self, now_ms: u64) -> Step {
        if self.fired {
            return Step::Inert;
        }
        if now_ms >= self.deadline_ms {
            self.fired = true;
            Step::Expired
        } else {
            Step::Counting(self.remaining_secs(now_ms))
        }
    }
}

fn deadline(now_ms: u64, timeout_secs: u32) -> u64 {
    now_ms.saturating_add(u64::from(timeout_secs) * MS_PER_SEC)
}

/// Pending timeout invocation produced by an expiring tick.
///
/// Reads the callback cell when fired, so a callback swapped in between the
/// tick and the deferred run still wins.
#[must_use = "an expiry does nothing until fired"]
pub struct Expiry {
    on_timeout: CallbackCell<()>,
}

impl Expiry {
    /// Run the latest timeout callback. Returns `false` if none is set.
    pub fn fire(self) -> bool {
        self.on_timeout.call(())
    }
}

/// Outcome of [`Watchdog::tick`].
pub enum Tick {
    Counting(u32),
    Expired(Expiry),
    Inert,
}

/// Countdown plus its clock and timeout callback.
///
/// Single-threaded; share it with `Rc` between the input listeners and the
/// interval.
pub struct Watchdog {
    countdown: RefCell<Countdown>,
    on_timeout: CallbackCell<()>,
    clock: Clock,
}

impl Watchdog {
    /// Arm a watchdog for `timeout_secs` with the given timeout callback.
    pub fn start(timeout_secs: u32, clock: Clock, on_timeout: impl Fn() + 'static) -> Rc<Self> {
        let cell = CallbackCell::new();
        cell.set(move |()| on_timeout());
        Rc::new(Self::with_cell(timeout_secs, clock, cell))
    }

    /// Arm a watchdog that reads its callback from an existing cell.
    pub fn with_cell(timeout_secs: u32, clock: Clock, on_timeout: CallbackCell<()>) -> Self {
        let now = clock();
        Self {
            countdown: RefCell::new(Countdown::new(timeout_secs, now)),
            on_timeout,
            clock,
        }
    }

    /// Qualifying input: a full timeout starts now.
    pub fn activity(&self) {
        let now = (self.clock)();
        self.countdown.borrow_mut().reset(now);
    }

    pub fn set_timeout_secs(&self, timeout_secs: u32) {
        let now = (self.clock)();
        self.countdown.borrow_mut().reconfigure(timeout_secs, now);
    }

    /// Swap the timeout callback without touching the countdown.
    pub fn replace_callback(&self, on_timeout: impl Fn() + 'static) {
        self.on_timeout.set(move |()| on_timeout());
    }

    pub fn remaining_secs(&self) -> u32 {
        let now = (self.clock)();
        self.countdown.borrow().remaining_secs(now)
    }

    pub fn timeout_secs(&self) -> u32 {
        self.countdown.borrow().timeout_secs()
    }

    pub fn is_expired(&self) -> bool {
        self.countdown.borrow().has_fired()
    }

    /// Check the deadline against the clock.
    pub fn tick(&self) -> Tick {
        let now = (self.clock)();
        let step = self.countdown.borrow_mut().step(now);
        match step {
            Step::Counting(left) => Tick::Counting(left),
            Step::Expired => {
                log::debug!("[IDLE] countdown expired");
                Tick::Expired(Expiry {
                    on_timeout: self.on_timeout.clone(),
                })
            }
            Step::Inert => Tick::Inert,
        }
    }
}

impl std::fmt::Debug for Watchdog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watchdog")
            .field("countdown", &self.countdown)
            .field("on_timeout", &self.on_timeout)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Virtual time the tests move by hand.
    #[derive(Clone, Default)]
    struct FakeClock(Rc<Cell<u64>>);

    impl FakeClock {
        fn clock(&self) -> Clock {
            let now = self.0.clone();
            Rc::new(move || now.get())
        }

        fn set(&self, ms: u64) {
            self.0.set(ms);
        }

        fn now(&self) -> u64 {
            self.0.get()
        }
    }

    fn counting_watchdog(timeout: u32) -> (Rc<Watchdog>, Rc<Cell<u32>>, FakeClock) {
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        let time = FakeClock::default();
        let dog = Watchdog::start(timeout, time.clock(), move || f.set(f.get() + 1));
        (dog, fired, time)
    }

    /// Advance one second at a time, ticking and firing any expiry the way a
    /// deferred driver would.
    fn run(dog: &Watchdog, time: &FakeClock, secs: u32) {
        for _ in 0..secs {
            time.set(time.now() + 1000);
            if let Tick::Expired(expiry) = dog.tick() {
                expiry.fire();
            }
        }
    }

    #[test]
    fn countdown_rounds_remaining_up() {
        let mut countdown = Countdown::new(3, 0);
        assert_eq!(countdown.step(1000), Step::Counting(2));
        assert_eq!(countdown.step(1500), Step::Counting(2));
        assert_eq!(countdown.step(2999), Step::Counting(1));
        assert_eq!(countdown.step(3000), Step::Expired);
        assert_eq!(countdown.step(4000), Step::Inert);
        assert_eq!(countdown.remaining_secs(4000), 0);
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let mut countdown = Countdown::new(0, 500);
        assert_eq!(countdown.timeout_secs(), 1);
        assert_eq!(countdown.step(1499), Step::Counting(1));
        assert_eq!(countdown.step(1500), Step::Expired);
    }

    #[test]
    fn fires_exactly_once_after_timeout() {
        let (dog, fired, time) = counting_watchdog(15);

        run(&dog, &time, 14);
        assert_eq!(fired.get(), 0);
        assert_eq!(dog.remaining_secs(), 1);

        run(&dog, &time, 1);
        assert_eq!(fired.get(), 1);

        run(&dog, &time, 60);
        assert_eq!(fired.get(), 1);
        assert!(dog.is_expired());
    }

    #[test]
    fn activity_at_second_ten_restarts_full_timeout() {
        let (dog, fired, time) = counting_watchdog(15);

        run(&dog, &time, 10);
        assert_eq!(dog.remaining_secs(), 5);
        dog.activity();
        assert_eq!(dog.remaining_secs(), 15);

        run(&dog, &time, 14);
        assert_eq!(fired.get(), 0);
        run(&dog, &time, 1);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn activity_between_ticks_still_waits_a_full_timeout() {
        let (dog, fired, time) = counting_watchdog(15);

        // Ticks keep landing on whole seconds while input arrives at 10.9 s
        run(&dog, &time, 10);
        time.set(10_900);
        dog.activity();

        for second in 11..=25 {
            time.set(second * 1000);
            if let Tick::Expired(expiry) = dog.tick() {
                expiry.fire();
            }
        }
        assert_eq!(fired.get(), 0, "fired after only 14.1 s idle");
        assert_eq!(dog.remaining_secs(), 1);

        time.set(26_000);
        if let Tick::Expired(expiry) = dog.tick() {
            expiry.fire();
        }
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn resets_just_short_of_the_timeout_never_fire() {
        let (dog, fired, time) = counting_watchdog(15);
        let mut next_input = 14_500;

        for second in 1..=300u64 {
            let now = second * 1000;
            if next_input <= now {
                time.set(next_input);
                dog.activity();
                next_input += 14_500;
            }
            time.set(now);
            if let Tick::Expired(expiry) = dog.tick() {
                expiry.fire();
            }
        }
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn steady_activity_never_fires() {
        let (dog, fired, time) = counting_watchdog(5);
        for _ in 0..100 {
            run(&dog, &time, 4);
            dog.activity();
        }
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn replaced_callback_wins() {
        let (dog, old, time) = counting_watchdog(2);
        let new = Rc::new(Cell::new(0));

        run(&dog, &time, 1);
        let n = new.clone();
        dog.replace_callback(move || n.set(n.get() + 1));
        run(&dog, &time, 1);

        assert_eq!(old.get(), 0);
        assert_eq!(new.get(), 1);
    }

    #[test]
    fn callback_swapped_before_deferred_fire_wins() {
        let (dog, old, time) = counting_watchdog(1);
        let new = Rc::new(Cell::new(0));

        time.set(1000);
        let Tick::Expired(expiry) = dog.tick() else {
            panic!("expected expiry on first tick");
        };
        let n = new.clone();
        dog.replace_callback(move || n.set(n.get() + 1));
        assert!(expiry.fire());

        assert_eq!(old.get(), 0);
        assert_eq!(new.get(), 1);
    }

    #[test]
    fn reset_after_expiry_rearms() {
        let (dog, fired, time) = counting_watchdog(3);
        run(&dog, &time, 3);
        assert_eq!(fired.get(), 1);

        dog.activity();
        assert!(!dog.is_expired());
        run(&dog, &time, 3);
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn new_timeout_restarts_countdown() {
        let (dog, fired, time) = counting_watchdog(15);
        run(&dog, &time, 12);
        dog.set_timeout_secs(30);
        assert_eq!(dog.remaining_secs(), 30);
        run(&dog, &time, 29);
        assert_eq!(fired.get(), 0);
        run(&dog, &time, 1);
        assert_eq!(fired.get(), 1);
    }
}
