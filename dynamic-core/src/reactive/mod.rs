//! Reactive Primitives
//!
//! This module implements the push-based reactive cell and the helpers that
//! sit around it.
//!
//! # Concepts
//!
//! ## Signals
//!
//! A Signal is a container for mutable state. Writing to it calls every
//! registered listener with the new value, synchronously and in
//! registration order, before the write returns.
//!
//! ## Derived signals
//!
//! `derive` creates a new signal that follows a pure function of another
//! one. The source keeps a forwarding listener, so chains of derived signals
//! stay consistent by the time the original write returns.
//!
//! ## Bindings
//!
//! `bind` connects a signal (or a plain value) to non-reactive host state:
//! apply the current value once, then apply every later write.
//!
//! # Implementation Notes
//!
//! Everything here is single-threaded. Signals use `Rc<RefCell<_>>` and no
//! borrow is held while listeners run, which makes re-entrant writes legal.
//! There is no batching, no equality short-circuit and no unsubscription;
//! listener lists only grow.

mod binding;
mod listener;
mod or_signal;
mod signal;

pub use binding::bind;
pub use listener::{Listener, ListenerId};
pub use or_signal::OrSignal;
pub use signal::{Signal, SignalId, SignalReader};
