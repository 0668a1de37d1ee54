use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::types::ActionResult;

/// The three lifecycle events an action run can terminate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// The operation completed and produced a meaningful result.
    Success,
    /// The operation ran but did not achieve its goal. A normal, expected
    /// outcome, not a defect.
    Failure,
    /// An unexpected error interrupted the attempt.
    Error,
}

impl EventKind {
    /// Every kind, in the order blanket registrations subscribe to them.
    pub const ALL: [EventKind; 3] = [EventKind::Success, EventKind::Failure, EventKind::Error];
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Success => write!(f, "success"),
            EventKind::Failure => write!(f, "failure"),
            EventKind::Error => write!(f, "error"),
        }
    }
}

/// Data handed to listeners alongside the event kind.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    /// The full structured result of the action.
    Result(Box<ActionResult>),
    /// Description of an unexpected error.
    Error {
        /// What went wrong.
        error: String,
    },
    /// Per-candidate failure messages.
    Messages(Vec<String>),
}

/// Callback invoked synchronously when an action emits an event.
pub type Listener = Arc<dyn Fn(EventKind, &EventPayload) + Send + Sync>;

/// Opaque handle identifying one registration, used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerHandle(u64);

struct ListenerEntry {
    handle: ListenerHandle,
    kind: EventKind,
    callback: Listener,
}

/// Registry of event listeners, invoked in registration order.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<ListenerEntry>,
}

impl Listeners {
    /// Subscribe a callback to one event kind, or to all three when `kind`
    /// is `None`. Returns the handle to use for removal.
    pub fn register(&mut self, callback: Listener, kind: Option<EventKind>) -> ListenerHandle {
        let handle = ListenerHandle(self.next_id);
        self.next_id += 1;

        match kind {
            Some(kind) => self.entries.push(ListenerEntry {
                handle,
                kind,
                callback,
            }),
            None => {
                for kind in EventKind::ALL {
                    self.entries.push(ListenerEntry {
                        handle,
                        kind,
                        callback: callback.clone(),
                    });
                }
            }
        }
        handle
    }

    /// Unsubscribe a handle from one kind, or from every kind when `None`.
    /// A handle that was never registered is a no-op.
    pub fn remove(&mut self, handle: ListenerHandle, kind: Option<EventKind>) {
        self.entries
            .retain(|entry| entry.handle != handle || kind.is_some_and(|k| k != entry.kind));
    }

    /// Invoke every listener subscribed to `kind`, in registration order.
    pub fn notify(&self, kind: EventKind, payload: &EventPayload) {
        debug!("Notifying listeners: {}", kind);
        for entry in self.entries.iter().filter(|entry| entry.kind == kind) {
            (entry.callback)(kind, payload);
        }
    }
}
