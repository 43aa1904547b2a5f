//! Optimistic Deletion
//!
//! Remove an item from a visible list at once, keep it restorable while an
//! undo affordance is shown, and only issue the destructive call once the
//! grace period has passed.
//!
//! Each deletion is tracked by its own [`Ticket`] and moves through a small
//! state machine ([`DeletionState`]). The state flag is the only mutual
//! exclusion between the undo path and the commit path: whichever event
//! arrives first decides, and the loser is ignored.

use std::fmt;

/// Items that can be located in a list by key.
pub trait Keyed {
    type Key: PartialEq + Clone + fmt::Debug;

    fn key(&self) -> Self::Key;
}

/// Handle for one pending deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionState {
    Visible,
    PendingRemoval,
    /// Destructive call in flight; remembers an undo that arrived meanwhile
    Committing { undo_requested: bool },
    Committed,
    RolledBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionEvent {
    UserDelete,
    UserUndo,
    TimerFire,
    CommitSuccess,
    CommitFailure,
}

/// What the caller has to do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    RemoveLocally,
    RestoreLocally,
    /// Restore locally and tell the user the server call failed
    RestoreAndReport,
    /// Restore locally and re-create the item server-side
    Compensate,
    IssueCommit,
    RecordUndo,
    Settle,
    Ignore,
}

impl DeletionState {
    pub fn on(self, event: DeletionEvent) -> (DeletionState, Effect) {
        use DeletionEvent::*;
        use DeletionState::*;

        match (self, event) {
            (Visible, UserDelete) => (PendingRemoval, Effect::RemoveLocally),
            (PendingRemoval, UserUndo) => (RolledBack, Effect::RestoreLocally),
            (PendingRemoval, TimerFire) => (Committing { undo_requested: false }, Effect::IssueCommit),
            (Committing { .. }, UserUndo) => (Committing { undo_requested: true }, Effect::RecordUndo),
            (Committing { undo_requested: false }, CommitSuccess) => (Committed, Effect::Settle),
            (Committing { undo_requested: true }, CommitSuccess) => (RolledBack, Effect::Compensate),
            (Committing { undo_requested: false }, CommitFailure) => (RolledBack, Effect::RestoreAndReport),
            (Committing { undo_requested: true }, CommitFailure) => (RolledBack, Effect::RestoreLocally),
            (Committed, UserUndo) => (RolledBack, Effect::Compensate),
            (state, _) => (state, Effect::Ignore),
        }
    }

    /// No destructive call is pending any more.
    pub fn is_settled(self) -> bool {
        matches!(self, DeletionState::Committed | DeletionState::RolledBack)
    }
}

/// Result of asking to undo a deletion.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoOutcome<T> {
    /// Put back before anything reached the server
    Restored,
    /// Put back locally; the server already deleted it, re-create this
    Recreate(T),
    /// The destructive call is in flight; its result decides
    Deferred,
    Ignored,
}

/// Result of a successful destructive call.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome<T> {
    Committed,
    /// Undo arrived while the call was in flight: item restored, re-create it
    Recreate(T),
    Ignored,
}

/// Result of a failed destructive call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// Item restored; show the failure
    RolledBack,
    /// Item restored as the user had already asked
    RolledBackQuietly,
    Ignored,
}

#[derive(Debug, Clone)]
struct PendingDeletion<T: Keyed> {
    ticket: Ticket,
    key: T::Key,
    item: T,
    index: usize,
    state: DeletionState,
    undo_open: bool,
}

/// All deletions currently in progress for one collection type.
#[derive(Debug, Clone)]
pub struct DeletionQueue<T: Keyed> {
    entries: Vec<PendingDeletion<T>>,
    next_ticket: u64,
}

impl<T: Keyed> Default for DeletionQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_ticket: 1,
        }
    }
}

impl<T: Keyed + Clone> DeletionQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the item with `key` from `list` and start tracking it.
    ///
    /// Returns `None` when no such item is visible.
    pub fn begin(&mut self, list: &mut Vec<T>, key: &T::Key) -> Option<Ticket> {
        let index = list.iter().position(|item| &item.key() == key)?;
        let (state, effect) = DeletionState::Visible.on(DeletionEvent::UserDelete);
        debug_assert_eq!(effect, Effect::RemoveLocally);

        let item = list.remove(index);
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        log::debug!("[DELETE] {ticket} pending for {key:?}");
        self.entries.push(PendingDeletion {
            ticket,
            key: key.clone(),
            item,
            index,
            state,
            undo_open: true,
        });
        Some(ticket)
    }

    /// User pressed undo.
    pub fn undo(&mut self, ticket: Ticket, list: &mut Vec<T>) -> UndoOutcome<T> {
        let Some(pos) = self.position(ticket) else {
            return UndoOutcome::Ignored;
        };
        if !self.entries[pos].undo_open {
            return UndoOutcome::Ignored;
        }
        match self.fire(pos, DeletionEvent::UserUndo) {
            Effect::RestoreLocally => {
                let entry = self.entries.remove(pos);
                restore(list, entry.item, entry.index);
                UndoOutcome::Restored
            }
            Effect::Compensate => {
                let entry = self.entries.remove(pos);
                restore(list, entry.item.clone(), entry.index);
                UndoOutcome::Recreate(entry.item)
            }
            Effect::RecordUndo => UndoOutcome::Deferred,
            _ => UndoOutcome::Ignored,
        }
    }

    /// Grace period elapsed. Returns the item to delete server-side, once.
    pub fn timer_fired(&mut self, ticket: Ticket) -> Option<T> {
        let pos = self.position(ticket)?;
        match self.fire(pos, DeletionEvent::TimerFire) {
            Effect::IssueCommit => Some(self.entries[pos].item.clone()),
            _ => None,
        }
    }

    pub fn commit_succeeded(&mut self, ticket: Ticket, list: &mut Vec<T>) -> CommitOutcome<T> {
        let Some(pos) = self.position(ticket) else {
            return CommitOutcome::Ignored;
        };
        match self.fire(pos, DeletionEvent::CommitSuccess) {
            Effect::Settle => {
                if !self.entries[pos].undo_open {
                    self.entries.remove(pos);
                }
                CommitOutcome::Committed
            }
            Effect::Compensate => {
                let entry = self.entries.remove(pos);
                restore(list, entry.item.clone(), entry.index);
                CommitOutcome::Recreate(entry.item)
            }
            _ => CommitOutcome::Ignored,
        }
    }

    pub fn commit_failed(&mut self, ticket: Ticket, list: &mut Vec<T>) -> FailureOutcome {
        let Some(pos) = self.position(ticket) else {
            return FailureOutcome::Ignored;
        };
        let outcome = match self.fire(pos, DeletionEvent::CommitFailure) {
            Effect::RestoreAndReport => FailureOutcome::RolledBack,
            Effect::RestoreLocally => FailureOutcome::RolledBackQuietly,
            _ => return FailureOutcome::Ignored,
        };
        let entry = self.entries.remove(pos);
        restore(list, entry.item, entry.index);
        outcome
    }

    /// The undo affordance went away. Settled deletions are forgotten.
    pub fn close_undo(&mut self, ticket: Ticket) {
        if let Some(pos) = self.position(ticket) {
            self.entries[pos].undo_open = false;
            if self.entries[pos].state.is_settled() {
                self.entries.remove(pos);
            }
        }
    }

    pub fn state(&self, ticket: Ticket) -> Option<DeletionState> {
        self.position(ticket).map(|pos| self.entries[pos].state)
    }

    /// True while an item with `key` is hidden by an unfinished deletion.
    pub fn is_pending(&self, key: &T::Key) -> bool {
        self.entries
            .iter()
            .any(|e| &e.key == key && !e.state.is_settled())
    }

    /// Number of tracked deletions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, ticket: Ticket) -> Option<usize> {
        self.entries.iter().position(|e| e.ticket == ticket)
    }

    fn fire(&mut self, pos: usize, event: DeletionEvent) -> Effect {
        let entry = &mut self.entries[pos];
        let (next, effect) = entry.state.on(event);
        if effect != Effect::Ignore {
            log::debug!("[DELETE] {} {:?} -> {:?} ({:?})", entry.ticket, entry.state, next, event);
        }
        entry.state = next;
        effect
    }
}

/// Re-insert at the original position, clamped, unless already present.
fn restore<T: Keyed>(list: &mut Vec<T>, item: T, index: usize) {
    let key = item.key();
    if list.iter().any(|existing| existing.key() == key) {
        return;
    }
    let index = index.min(list.len());
    list.insert(index, item);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str);

    impl Keyed for Row {
        type Key = &'static str;

        fn key(&self) -> &'static str {
            self.0
        }
    }

    fn names(list: &[Row]) -> Vec<&'static str> {
        list.iter().map(|r| r.0).collect()
    }

    fn menu() -> Vec<Row> {
        vec![Row("Mojito"), Row("Citrus")]
    }

    #[test]
    fn undo_before_grace_restores_without_commit() {
        let mut list = menu();
        let mut queue = DeletionQueue::new();

        let ticket = queue.begin(&mut list, &"Mojito").unwrap();
        assert_eq!(names(&list), ["Citrus"]);

        assert_eq!(queue.undo(ticket, &mut list), UndoOutcome::Restored);
        assert_eq!(names(&list), ["Mojito", "Citrus"]);

        assert_eq!(queue.timer_fired(ticket), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn grace_expiry_commits_exactly_once() {
        let mut list = menu();
        let mut queue = DeletionQueue::new();
        let ticket = queue.begin(&mut list, &"Mojito").unwrap();

        assert_eq!(queue.timer_fired(ticket), Some(Row("Mojito")));
        assert_eq!(queue.timer_fired(ticket), None);

        assert_eq!(queue.commit_succeeded(ticket, &mut list), CommitOutcome::Committed);
        assert_eq!(names(&list), ["Citrus"]);
        assert_eq!(queue.state(ticket), Some(DeletionState::Committed));

        queue.close_undo(ticket);
        assert!(queue.is_empty());
        assert_eq!(queue.undo(ticket, &mut list), UndoOutcome::Ignored);
        assert_eq!(names(&list), ["Citrus"]);
    }

    #[test]
    fn failed_commit_rolls_back_and_reports() {
        let mut list = menu();
        let mut queue = DeletionQueue::new();
        let ticket = queue.begin(&mut list, &"Mojito").unwrap();
        queue.timer_fired(ticket).unwrap();

        assert_eq!(queue.commit_failed(ticket, &mut list), FailureOutcome::RolledBack);
        assert_eq!(names(&list), ["Mojito", "Citrus"]);

        assert_eq!(queue.commit_succeeded(ticket, &mut list), CommitOutcome::Ignored);
        assert_eq!(queue.commit_failed(ticket, &mut list), FailureOutcome::Ignored);
        assert_eq!(names(&list), ["Mojito", "Citrus"]);
    }

    #[test]
    fn undo_closed_before_timer_is_forgotten_once_settled() {
        let mut list = vec![Row("Mojito"), Row("Citrus"), Row("Cola")];
        let mut queue = DeletionQueue::new();
        let committed = queue.begin(&mut list, &"Mojito").unwrap();
        let failed = queue.begin(&mut list, &"Cola").unwrap();

        // Toasts vanish while both are still waiting for their grace timers
        queue.close_undo(committed);
        queue.close_undo(failed);
        assert_eq!(queue.len(), 2);
        assert!(queue.is_pending(&"Mojito"));

        queue.timer_fired(committed).unwrap();
        queue.timer_fired(failed).unwrap();

        assert_eq!(queue.commit_succeeded(committed, &mut list), CommitOutcome::Committed);
        assert_eq!(queue.state(committed), None);

        assert_eq!(queue.commit_failed(failed, &mut list), FailureOutcome::RolledBack);
        assert_eq!(queue.state(failed), None);

        assert!(queue.is_empty());
        assert_eq!(names(&list), ["Citrus", "Cola"]);
    }

    #[test]
    fn undo_after_commit_asks_for_recreate() {
        let mut list = menu();
        let mut queue = DeletionQueue::new();
        let ticket = queue.begin(&mut list, &"Mojito").unwrap();
        queue.timer_fired(ticket).unwrap();
        queue.commit_succeeded(ticket, &mut list);

        assert_eq!(queue.undo(ticket, &mut list), UndoOutcome::Recreate(Row("Mojito")));
        assert_eq!(names(&list), ["Mojito", "Citrus"]);
        assert_eq!(queue.undo(ticket, &mut list), UndoOutcome::Ignored);
    }

    #[test]
    fn undo_during_commit_is_resolved_by_the_result() {
        let mut list = menu();
        let mut queue = DeletionQueue::new();

        let ok = queue.begin(&mut list, &"Mojito").unwrap();
        queue.timer_fired(ok).unwrap();
        assert_eq!(queue.undo(ok, &mut list), UndoOutcome::Deferred);
        assert_eq!(names(&list), ["Citrus"]);
        assert_eq!(queue.commit_succeeded(ok, &mut list), CommitOutcome::Recreate(Row("Mojito")));
        assert_eq!(names(&list), ["Mojito", "Citrus"]);

        let failed = queue.begin(&mut list, &"Citrus").unwrap();
        queue.timer_fired(failed).unwrap();
        assert_eq!(queue.undo(failed, &mut list), UndoOutcome::Deferred);
        assert_eq!(queue.commit_failed(failed, &mut list), FailureOutcome::RolledBackQuietly);
        assert_eq!(names(&list), ["Mojito", "Citrus"]);
    }

    #[test]
    fn concurrent_deletions_are_independent() {
        let mut list = vec![Row("Mojito"), Row("Citrus"), Row("Berry")];
        let mut queue = DeletionQueue::new();

        let mojito = queue.begin(&mut list, &"Mojito").unwrap();
        let berry = queue.begin(&mut list, &"Berry").unwrap();
        assert_ne!(mojito, berry);
        assert_eq!(names(&list), ["Citrus"]);

        assert_eq!(queue.undo(berry, &mut list), UndoOutcome::Restored);
        assert_eq!(names(&list), ["Citrus", "Berry"]);
        assert!(queue.is_pending(&"Mojito"));

        assert_eq!(queue.timer_fired(mojito), Some(Row("Mojito")));
        assert_eq!(queue.commit_failed(mojito, &mut list), FailureOutcome::RolledBack);
        assert_eq!(names(&list), ["Mojito", "Citrus", "Berry"]);
    }

    #[test]
    fn restore_does_not_duplicate_reloaded_items() {
        let mut list = menu();
        let mut queue = DeletionQueue::new();
        let ticket = queue.begin(&mut list, &"Mojito").unwrap();

        list = menu();
        assert_eq!(queue.undo(ticket, &mut list), UndoOutcome::Restored);
        assert_eq!(names(&list), ["Mojito", "Citrus"]);
    }

    #[test]
    fn unknown_key_starts_nothing() {
        let mut list = menu();
        let mut queue = DeletionQueue::<Row>::new();
        assert_eq!(queue.begin(&mut list, &"Espresso"), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn every_state_has_at_most_one_terminal_outcome() {
        use DeletionEvent::*;
        let events = [UserUndo, TimerFire, CommitSuccess, CommitFailure];
        for state in [DeletionState::Committed, DeletionState::RolledBack] {
            for event in events {
                let (next, effect) = state.on(event);
                if state == DeletionState::RolledBack {
                    assert_eq!((next, effect), (state, Effect::Ignore));
                }
                assert_ne!(effect, Effect::IssueCommit);
            }
        }
    }
}
