//! Signal Implementation
//!
//! A Signal is the fundamental reactive primitive. It holds a value and a
//! list of listeners that are called every time the value is written.
//!
//! # How Signals Work
//!
//! 1. `set` stores the new value first, so any read from inside a listener
//!    already sees it.
//!
//! 2. Every listener registered when the notification starts is then called
//!    with the written value, in registration order.
//!
//! 3. Notification is synchronous and depth-first. A listener that writes to
//!    another signal (or to this one) finishes that nested propagation before
//!    the next listener of the outer write runs.
//!
//! # Memory Layout
//!
//! Each signal consists of:
//! - A unique ID (8 bytes)
//! - The value, behind its own `Rc<RefCell<T>>`
//! - The listener list, behind a separate `Rc<RefCell<Vec<_>>>`
//!
//! Keeping the value slot apart from the listener list means a listener can
//! hold a [`SignalReader`] to a signal without keeping that signal's
//! listeners alive.

use std::cell::{Ref, RefCell};
use std::fmt::{self, Debug};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;
use tracing::trace;

use super::listener::{Listener, ListenerId};

/// Counter for generating unique signal IDs.
static SIGNAL_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Identity of a signal. Clones of a handle share the same ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalId(u64);

impl SignalId {
    fn next() -> Self {
        Self(SIGNAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "signal#{}", self.0)
    }
}

/// Listener snapshot taken at the start of a notification. Most signals
/// have a handful of listeners, so this usually stays on the stack.
type ListenerSnapshot<T> = SmallVec<[Listener<T>; 4]>;

/// A reactive signal holding a value of type T.
///
/// Cloning a `Signal` creates a new handle to the **same** value and
/// listener list.
///
/// # Example
///
/// ```rust
/// use dynamic_core::reactive::Signal;
///
/// let count = Signal::new(0);
/// let doubled = count.derive(|v| v * 2);
///
/// count.set(5);
/// assert_eq!(doubled.get(), 10);
/// ```
pub struct Signal<T> {
    /// Unique identifier for this signal.
    id: SignalId,

    /// The current value.
    value: Rc<RefCell<T>>,

    /// Registered listeners, in registration order. Never shrinks.
    listeners: Rc<RefCell<Vec<Listener<T>>>>,
}

impl<T: 'static> Signal<T> {
    /// Create a new signal with the given initial value.
    pub fn new(initial: T) -> Self {
        Self {
            id: SignalId::next(),
            value: Rc::new(RefCell::new(initial)),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Get the signal's unique ID.
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Access the current value by reference without cloning.
    ///
    /// # Panics
    ///
    /// Panics if the closure writes to this same signal.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Register a listener for future writes.
    ///
    /// The listener is not called with the current value. Registration is
    /// permanent for the lifetime of the signal.
    pub fn listen<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&T) + 'static,
    {
        let listener = Listener::new(listener);
        let id = listener.id();
        self.listeners.borrow_mut().push(listener);
        id
    }

    /// Get the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// A read-only handle to this signal's value slot.
    ///
    /// The reader does not keep the listener list alive.
    pub fn reader(&self) -> SignalReader<T> {
        SignalReader {
            id: self.id,
            value: Rc::clone(&self.value),
        }
    }

    /// Whether both handles point at the same signal.
    pub fn ptr_eq(&self, other: &Signal<T>) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }

    /// Call every listener registered right now with `next`.
    ///
    /// The listener list is copied before any callback runs, so listeners
    /// added during this notification only see later writes.
    fn notify(&self, next: &T) {
        let snapshot: ListenerSnapshot<T> = self.listeners.borrow().iter().cloned().collect();
        if snapshot.is_empty() {
            return;
        }

        trace!(signal = %self.id, listeners = snapshot.len(), "notifying listeners");
        for listener in &snapshot {
            listener.notify(next);
        }
    }
}

impl<T: Clone + 'static> Signal<T> {
    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Set a new value and notify every listener.
    ///
    /// There is no equality check: writing the current value again still
    /// notifies. A panic in a listener unwinds out of `set`, and the
    /// remaining listeners for this write are skipped.
    pub fn set(&self, next: T) {
        *self.value.borrow_mut() = next.clone();
        self.notify(&next);
    }

    /// Update the value using a function of the current value.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = self.with(f);
        self.set(next);
    }

    /// Derive a new signal that follows `map(value)`.
    ///
    /// The derived signal starts at `map(current)`. A forwarding listener on
    /// this signal writes `map(next)` into it on every change, which also
    /// keeps the derived signal alive for as long as this one lives. `map`
    /// must be a pure function of its input.
    pub fn derive<U, F>(&self, map: F) -> Signal<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> U + 'static,
    {
        let derived = Signal::new(self.with(|value| map(value)));
        let target = derived.clone();
        self.listen(move |next| target.set(map(next)));

        trace!(source = %self.id, derived = %derived.id, "derived signal");
        derived
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Rc::clone(&self.value),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<T: Default + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Debug> Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Signal");
        s.field("id", &self.id);
        match self.value.try_borrow() {
            Ok(value) => s.field("value", &*value),
            Err(_) => s.field("value", &format_args!("<borrowed>")),
        };
        s.field("listener_count", &self.listeners.borrow().len())
            .finish()
    }
}

/// Read-only access to a signal's current value.
///
/// Obtained from [`Signal::reader`]. Holding a reader keeps the value slot
/// alive but not the signal's listeners.
pub struct SignalReader<T> {
    id: SignalId,
    value: Rc<RefCell<T>>,
}

impl<T> SignalReader<T> {
    /// ID of the signal this reader was taken from.
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Borrow the current value.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }
}

impl<T: Clone> SignalReader<T> {
    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T> Clone for SignalReader<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Rc::clone(&self.value),
        }
    }
}

impl<T: Debug> Debug for SignalReader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalReader")
            .field("id", &self.id)
            .field("value", &*self.value.borrow())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
