//! One-way bindings from reactive values to the outside world.
//!
//! A binding pushes a value into something that is not reactive itself,
//! such as a widget property or a terminal cell. It is the only place where
//! signals meet host code.
//!
//! # How Bindings Work
//!
//! 1. The current value is read once and applied immediately.
//!
//! 2. If the source is a signal, exactly one listener is registered on it.
//!
//! 3. Every later write is applied as-is. The binding does not transform
//!    values; any formatting belongs in a `derive` or a template upstream.

use tracing::trace;

use super::listener::ListenerId;
use super::or_signal::OrSignal;

/// Bind `source` to a sink.
///
/// `apply` is called right away with the current value and then once per
/// write to the source. Returns the listener registration when the source is
/// a signal, or `None` for a plain value (which is applied once and never
/// again).
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use dynamic_core::reactive::{bind, OrSignal, Signal};
///
/// let title = Signal::new("Loading".to_string());
/// let window_title = Rc::new(RefCell::new(String::new()));
///
/// let sink = window_title.clone();
/// bind(&OrSignal::from(&title), move |next: &String| {
///     *sink.borrow_mut() = next.clone();
/// });
/// assert_eq!(*window_title.borrow(), "Loading");
///
/// title.set("Ready".to_string());
/// assert_eq!(*window_title.borrow(), "Ready");
/// ```
pub fn bind<T, F>(source: &OrSignal<T>, apply: F) -> Option<ListenerId>
where
    T: Clone + 'static,
    F: Fn(&T) + 'static,
{
    match source {
        OrSignal::Value(value) => {
            apply(value);
            None
        }
        OrSignal::Signal(signal) => {
            signal.with(|current| apply(current));
            let id = signal.listen(apply);
            trace!(signal = %signal.id(), listener = id.raw(), "bound signal");
            Some(id)
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Signal;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn plain_value_applied_once() {
        let applied = Rc::new(RefCell::new(Vec::new()));
        let sink = applied.clone();

        let id = bind(&OrSignal::Value(5), move |v| sink.borrow_mut().push(*v));

        assert!(id.is_none());
        assert_eq!(*applied.borrow(), vec![5]);
    }

    #[test]
    fn signal_applied_now_and_on_every_write() {
        let source = Signal::new(1);
        let applied = Rc::new(RefCell::new(Vec::new()));
        let sink = applied.clone();

        let id = bind(&OrSignal::from(&source), move |v| sink.borrow_mut().push(*v));

        assert!(id.is_some());
        assert_eq!(*applied.borrow(), vec![1]);

        source.set(2);
        source.set(3);
        assert_eq!(*applied.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn registers_exactly_one_listener() {
        let source = Signal::new("a".to_string());
        bind(&OrSignal::from(&source), |_| {});
        assert_eq!(source.listener_count(), 1);
    }

    #[test]
    fn derived_value_is_applied_untransformed() {
        let width = Signal::new(10);
        let label = width.derive(|w| format!("{w}px"));
        let style = Rc::new(RefCell::new(String::new()));
        let sink = style.clone();

        bind(&OrSignal::from(label), move |v: &String| {
            *sink.borrow_mut() = v.clone();
        });
        assert_eq!(*style.borrow(), "10px");

        width.set(42);
        assert_eq!(*style.borrow(), "42px");
    }
}
