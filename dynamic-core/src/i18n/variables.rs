//! Template variables
//!
//! A template variable is either a plain scalar or a signal whose value
//! converts into a scalar. Signals of different value types (`Signal<String>`,
//! `Signal<u32>`, ...) are stored behind the [`ReactiveScalar`] trait so they
//! can live in one map.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::reactive::{ListenerId, Signal, SignalId, SignalReader};

/// A value that can be substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Scalar {
    /// Whether the value counts as "not provided" when it is a plain
    /// variable: the empty string, zero and NaN.
    pub fn is_falsy(&self) -> bool {
        match self {
            Scalar::Text(text) => text.is_empty(),
            Scalar::Int(value) => *value == 0,
            Scalar::Float(value) => *value == 0.0 || value.is_nan(),
        }
    }

    /// Text form used for substitution.
    ///
    /// Floats print without a trailing `.0` when integral, `-0` prints as
    /// `0`, and non-finite values print as `NaN`, `Infinity` and
    /// `-Infinity`.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Scalar::Text(text) => Cow::Borrowed(text),
            Scalar::Int(value) => Cow::Owned(value.to_string()),
            Scalar::Float(value) => Cow::Owned(render_float(*value)),
        }
    }
}

fn render_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<String> for Scalar {
    fn from(text: String) -> Self {
        Scalar::Text(text)
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Scalar::Text(text.to_string())
    }
}

impl From<&String> for Scalar {
    fn from(text: &String) -> Self {
        Scalar::Text(text.clone())
    }
}

macro_rules! scalar_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::Int(i64::from(value))
                }
            }
        )*
    };
}

scalar_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! scalar_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    match i64::try_from(value) {
                        Ok(value) => Scalar::Int(value),
                        Err(_) => Scalar::Float(value as f64),
                    }
                }
            }
        )*
    };
}

scalar_from_wide_int!(u64, usize, isize);

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(f64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

/// Read side of a reactive variable.
pub trait ScalarSource {
    /// Identity of the underlying signal.
    fn signal_id(&self) -> SignalId;

    /// The signal's current value as a scalar.
    fn current(&self) -> Scalar;
}

/// A reactive variable: readable and observable.
pub trait ReactiveScalar: ScalarSource {
    /// Call `callback` after every write to the signal.
    fn on_change(&self, callback: Box<dyn Fn()>) -> ListenerId;

    /// A read-only view that does not keep the signal's listeners alive.
    fn source(&self) -> Rc<dyn ScalarSource>;
}

impl<T> ScalarSource for SignalReader<T>
where
    T: Clone + Into<Scalar> + 'static,
{
    fn signal_id(&self) -> SignalId {
        self.id()
    }

    fn current(&self) -> Scalar {
        self.get().into()
    }
}

impl<T> ScalarSource for Signal<T>
where
    T: Clone + Into<Scalar> + 'static,
{
    fn signal_id(&self) -> SignalId {
        self.id()
    }

    fn current(&self) -> Scalar {
        self.get().into()
    }
}

impl<T> ReactiveScalar for Signal<T>
where
    T: Clone + Into<Scalar> + 'static,
{
    fn on_change(&self, callback: Box<dyn Fn()>) -> ListenerId {
        self.listen(move |_| callback())
    }

    fn source(&self) -> Rc<dyn ScalarSource> {
        Rc::new(self.reader())
    }
}

/// A template variable.
#[derive(Clone)]
pub enum Variable {
    /// A fixed value.
    Plain(Scalar),
    /// A signal; its current value is substituted and changes re-render.
    Reactive(Rc<dyn ReactiveScalar>),
}

impl Variable {
    /// Whether this variable is backed by a signal.
    pub fn is_reactive(&self) -> bool {
        matches!(self, Variable::Reactive(_))
    }

    /// The value substituted right now.
    pub fn current(&self) -> Scalar {
        match self {
            Variable::Plain(value) => value.clone(),
            Variable::Reactive(signal) => signal.current(),
        }
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Plain(value) => f.debug_tuple("Plain").field(value).finish(),
            Variable::Reactive(signal) => f
                .debug_struct("Reactive")
                .field("signal", &signal.signal_id())
                .field("current", &signal.current())
                .finish(),
        }
    }
}

impl From<Scalar> for Variable {
    fn from(value: Scalar) -> Self {
        Variable::Plain(value)
    }
}

macro_rules! variable_from_plain {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Variable {
                fn from(value: $ty) -> Self {
                    Variable::Plain(Scalar::from(value))
                }
            }
        )*
    };
}

variable_from_plain!(String, &str, &String, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl<T> From<Signal<T>> for Variable
where
    T: Clone + Into<Scalar> + 'static,
{
    fn from(signal: Signal<T>) -> Self {
        Variable::Reactive(Rc::new(signal))
    }
}

impl<T> From<&Signal<T>> for Variable
where
    T: Clone + Into<Scalar> + 'static,
{
    fn from(signal: &Signal<T>) -> Self {
        Variable::Reactive(Rc::new(signal.clone()))
    }
}

/// What a placeholder name resolves to during a scan.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Lookup {
    pub(crate) value: Scalar,
    /// Set when the value came from a signal.
    pub(crate) signal: Option<SignalId>,
}

/// Named template variables.
///
/// ```rust
/// use dynamic_core::i18n::Variables;
/// use dynamic_core::reactive::Signal;
///
/// let count = Signal::new(3_u32);
/// let vars = Variables::new().with("name", "Ada").with("count", &count);
/// assert!(vars.has_reactive());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Variables {
    entries: IndexMap<String, Variable>,
}

impl Variables {
    /// An empty variable map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Variable>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Variable>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any variable is backed by a signal.
    pub fn has_reactive(&self) -> bool {
        self.entries.values().any(Variable::is_reactive)
    }

    /// Resolve a placeholder name. Missing names and falsy plain values
    /// resolve to `None`.
    pub(crate) fn lookup(&self, name: &str) -> Option<Lookup> {
        match self.entries.get(name)? {
            Variable::Plain(value) if value.is_falsy() => None,
            Variable::Plain(value) => Some(Lookup {
                value: value.clone(),
                signal: None,
            }),
            Variable::Reactive(signal) => Some(Lookup {
                value: signal.current(),
                signal: Some(signal.signal_id()),
            }),
        }
    }

    /// The reactive variable backed by `id`, if any.
    pub(crate) fn reactive(&self, id: SignalId) -> Option<&Rc<dyn ReactiveScalar>> {
        self.entries.values().find_map(|variable| match variable {
            Variable::Reactive(signal) if signal.signal_id() == id => Some(signal),
            _ => None,
        })
    }

    /// A copy that reads signals through [`ScalarSource`] views only.
    pub(crate) fn detach(&self) -> DetachedVariables {
        let entries = self
            .entries
            .iter()
            .map(|(name, variable)| {
                let slot = match variable {
                    Variable::Plain(value) => Slot::Plain(value.clone()),
                    Variable::Reactive(signal) => Slot::Reactive(signal.source()),
                };
                (name.clone(), slot)
            })
            .collect();
        DetachedVariables { entries }
    }
}

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<Variable>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut variables = Variables::new();
        for (name, value) in iter {
            variables.insert(name, value);
        }
        variables
    }
}

enum Slot {
    Plain(Scalar),
    Reactive(Rc<dyn ScalarSource>),
}

/// Variables captured by a reactive translation for re-rendering.
///
/// Holding these must not keep any signal's listener list alive, otherwise
/// a signal would own (through its listener) a handle to itself.
pub(crate) struct DetachedVariables {
    entries: IndexMap<String, Slot>,
}

impl DetachedVariables {
    pub(crate) fn lookup(&self, name: &str) -> Option<Lookup> {
        match self.entries.get(name)? {
            Slot::Plain(value) if value.is_falsy() => None,
            Slot::Plain(value) => Some(Lookup {
                value: value.clone(),
                signal: None,
            }),
            Slot::Reactive(source) => Some(Lookup {
                value: source.current(),
                signal: Some(source.signal_id()),
            }),
        }
    }
}
