//! MIXION Kiosk Core
//!
//! Browser-independent state behind the kiosk pages: the inactivity
//! watchdog, the session store, optimistic deletion, configuration and the
//! backend data models.

pub mod callback;
pub mod config;
pub mod deletion;
pub mod error;
pub mod models;
pub mod session;
pub mod watchdog;

pub use callback::CallbackCell;
pub use config::KioskConfig;
pub use deletion::{CommitOutcome, DeletionQueue, DeletionState, FailureOutcome, Keyed, Ticket, UndoOutcome};
pub use error::StorageError;
pub use session::{LogoutOptions, MemoryStorage, SessionStore, StorageArea};
pub use watchdog::{Clock, Countdown, Tick, Watchdog};
