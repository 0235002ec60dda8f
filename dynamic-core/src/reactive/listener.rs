//! Listener types for signals.
//!
//! A Listener is a callback registered on a signal. It receives the newly
//! written value every time the signal is set.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a registered listener.
///
/// Returned by [`Signal::listen`](super::Signal::listen). Listener lists are
/// append-only, so the id is currently only a registration receipt; it is the
/// handle a future unsubscribe would take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Generate a new unique listener ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

/// A callback registered on a `Signal<T>`.
///
/// The callback is reference counted so the notification loop can take a
/// snapshot of the list and release the signal's borrow before calling out.
/// This is what lets a listener re-enter the signal that is notifying it.
pub struct Listener<T> {
    id: ListenerId,
    notify: Rc<dyn Fn(&T)>,
}

impl<T> Listener<T> {
    /// Create a new listener with the given callback.
    pub fn new<F>(notify: F) -> Self
    where
        F: Fn(&T) + 'static,
    {
        Self {
            id: ListenerId::new(),
            notify: Rc::new(notify),
        }
    }

    /// Get the listener's unique ID.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Invoke the callback with the new value.
    pub fn notify(&self, next: &T) {
        (self.notify)(next);
    }
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            notify: Rc::clone(&self.notify),
        }
    }
}

impl<T> fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish()
    }
}
