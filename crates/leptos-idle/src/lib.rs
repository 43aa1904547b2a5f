//! Leptos Idle Utilities
//!
//! Drives a [`Watchdog`] from window input events and a one-second interval.
//! Everything is released when the owning reactive scope is cleaned up.

mod interval;

use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use mixion_core::watchdog::{Clock, Tick, Watchdog};
use mixion_core::CallbackCell;

pub use interval::IntervalSlot;

/// Window events that count as user activity
pub const ACTIVITY_EVENTS: &[&str] = &[
    "pointerdown",
    "pointermove",
    "mousedown",
    "mousemove",
    "touchstart",
    "keydown",
];

const TICK: Duration = Duration::from_secs(1);

/// Handle returned by [`use_idle_watchdog`]
#[derive(Clone, Copy)]
pub struct IdleWatchdog {
    /// Seconds left before the timeout fires
    pub remaining: ReadSignal<u32>,
    callback: StoredValue<CallbackCell<()>, LocalStorage>,
}

impl IdleWatchdog {
    /// Replace the timeout callback; the countdown keeps running.
    pub fn set_on_timeout(&self, on_timeout: Callback<()>) {
        self.callback
            .with_value(|cell| cell.set(move |()| on_timeout.run(())));
    }
}

/// Wall clock in milliseconds
pub fn browser_clock() -> Clock {
    Rc::new(|| js_sys::Date::now() as u64)
}

/// Start an idle watchdog for the current component.
///
/// `on_timeout` runs once, on a later task, after `timeout_secs` without
/// input. Whatever callback `on_timeout` holds at that moment is the one
/// invoked. A changed `timeout_secs` restarts the countdown.
pub fn use_idle_watchdog(
    timeout_secs: impl Into<Signal<u32>>,
    on_timeout: impl Into<Signal<Callback<()>>>,
) -> IdleWatchdog {
    let timeout_secs = timeout_secs.into();
    let on_timeout = on_timeout.into();

    let cell = CallbackCell::new();
    let initial = on_timeout.get_untracked();
    cell.set(move |()| initial.run(()));

    let initial_secs = timeout_secs.get_untracked();
    let dog = Rc::new(Watchdog::with_cell(initial_secs, browser_clock(), cell.clone()));
    let (remaining, set_remaining) = signal(initial_secs);

    let ticker = {
        let dog = dog.clone();
        Rc::new(IntervalSlot::new(
            move || start_ticker(dog.clone(), set_remaining),
            |handle: IntervalHandle| handle.clear(),
        ))
    };
    ticker.restart();
    let listeners = bind_activity_listeners(dog.clone(), ticker.clone(), set_remaining);

    let handle = IdleWatchdog {
        remaining,
        callback: StoredValue::new_local(cell),
    };

    // Keep the cell pointed at the caller's latest callback
    Effect::new(move |_| {
        handle.set_on_timeout(on_timeout.get());
    });

    let stored_dog = StoredValue::new_local(dog);
    let stored_ticker = StoredValue::new_local(ticker);
    Effect::new(move |prev: Option<u32>| {
        let secs = timeout_secs.get();
        if prev.is_some_and(|p| p != secs) {
            stored_dog.with_value(|dog| {
                dog.set_timeout_secs(secs);
                set_remaining.set(dog.remaining_secs());
            });
            stored_ticker.with_value(|ticker| ticker.restart());
        }
        secs
    });

    on_cleanup(move || {
        for listener in listeners {
            listener.remove();
        }
        stored_ticker.try_with_value(|ticker| ticker.release());
        log::debug!("[IDLE] watchdog released");
    });

    handle
}

/// Restart the countdown and its interval on every activity event.
pub fn bind_activity_listeners(
    dog: Rc<Watchdog>,
    ticker: Rc<IntervalSlot<IntervalHandle>>,
    set_remaining: WriteSignal<u32>,
) -> Vec<WindowListenerHandle> {
    ACTIVITY_EVENTS
        .iter()
        .map(|name| {
            let dog = dog.clone();
            let ticker = ticker.clone();
            window_event_listener_untyped(name, move |_| {
                dog.activity();
                ticker.restart();
                set_remaining.set(dog.remaining_secs());
            })
        })
        .collect()
}

/// Check the watchdog once per second, deferring the timeout callback.
pub fn start_ticker(dog: Rc<Watchdog>, set_remaining: WriteSignal<u32>) -> Option<IntervalHandle> {
    let tick = move || match dog.tick() {
        Tick::Counting(left) => set_remaining.set(left),
        Tick::Expired(expiry) => {
            set_remaining.set(0);
            spawn_local(async move {
                if !expiry.fire() {
                    log::warn!("[IDLE] timeout fired with no callback set");
                }
            });
        }
        Tick::Inert => {}
    };

    match set_interval_with_handle(tick, TICK) {
        Ok(handle) => Some(handle),
        Err(err) => {
            log::error!("[IDLE] could not start interval: {err:?}");
            None
        }
    }
}
