use async_trait::async_trait;

use crate::events::{EventKind, EventPayload, Listener, ListenerHandle, Listeners};
use crate::types::ActionResult;

/// A unit of work against the Parkanizer service.
///
/// Every run terminates by emitting exactly one `success`, `failure` or
/// `error` event to the registered listeners, then returns the structured
/// result to the caller whether or not anyone was listening. Remote and
/// transport errors are caught inside `run`; only programming errors
/// (panics) escape it.
#[async_trait]
pub trait Action {
    /// The listener registry backing the observer contract.
    fn listeners(&self) -> &Listeners;

    /// Mutable access to the registry, for registration and removal.
    fn listeners_mut(&mut self) -> &mut Listeners;

    /// Execute the action with its stored payload.
    async fn run(&mut self) -> ActionResult;

    /// Subscribe `listener` to one event kind, or to all three when `None`.
    fn register_listener(
        &mut self,
        listener: Listener,
        kind: Option<EventKind>,
    ) -> ListenerHandle {
        self.listeners_mut().register(listener, kind)
    }

    /// Unsubscribe a previous registration; no-op for unknown handles.
    fn remove_listener(&mut self, handle: ListenerHandle, kind: Option<EventKind>) {
        self.listeners_mut().remove(handle, kind);
    }

    /// Notify every listener registered for `kind`.
    fn notify_listeners(&self, kind: EventKind, payload: &EventPayload) {
        self.listeners().notify(kind, payload);
    }

    /// Emit `kind` with the full result as payload, then hand the result
    /// back to the caller.
    fn finish(&self, kind: EventKind, result: ActionResult) -> ActionResult {
        self.notify_listeners(kind, &EventPayload::Result(Box::new(result.clone())));
        result
    }
}
