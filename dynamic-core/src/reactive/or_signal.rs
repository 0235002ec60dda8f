//! Values that may or may not be reactive.

use std::fmt::Debug;

use super::signal::Signal;

/// Either a plain value or a [`Signal`] of that value.
///
/// This is the type test for signals: code that accepts "anything that
/// could be a signal" takes an `OrSignal<T>` and branches on the tag.
#[derive(Clone)]
pub enum OrSignal<T> {
    /// A fixed value.
    Value(T),
    /// A value that changes over time.
    Signal(Signal<T>),
}

impl<T: Clone + 'static> OrSignal<T> {
    /// Whether this is the reactive variant.
    pub fn is_signal(&self) -> bool {
        matches!(self, OrSignal::Signal(_))
    }

    /// The signal, if this is the reactive variant.
    pub fn as_signal(&self) -> Option<&Signal<T>> {
        match self {
            OrSignal::Signal(signal) => Some(signal),
            OrSignal::Value(_) => None,
        }
    }

    /// Current value, read from the signal when reactive.
    pub fn get(&self) -> T {
        match self {
            OrSignal::Value(value) => value.clone(),
            OrSignal::Signal(signal) => signal.get(),
        }
    }

    /// Turn this into a signal, wrapping a plain value in a fresh one.
    pub fn into_signal(self) -> Signal<T> {
        match self {
            OrSignal::Value(value) => Signal::new(value),
            OrSignal::Signal(signal) => signal,
        }
    }
}

impl<T> From<Signal<T>> for OrSignal<T> {
    fn from(signal: Signal<T>) -> Self {
        OrSignal::Signal(signal)
    }
}

impl<T> From<&Signal<T>> for OrSignal<T> {
    fn from(signal: &Signal<T>) -> Self {
        OrSignal::Signal(signal.clone())
    }
}

impl<T: Debug> Debug for OrSignal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrSignal::Value(value) => f.debug_tuple("Value").field(value).finish(),
            OrSignal::Signal(signal) => f.debug_tuple("Signal").field(signal).finish(),
        }
    }
}
