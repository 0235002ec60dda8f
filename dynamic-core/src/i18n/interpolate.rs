//! Template interpolation
//!
//! Replaces `{name}` placeholders with variable values. When any matched
//! variable is a signal, the result is itself a signal that re-renders the
//! whole template every time one of those signals changes.
//!
//! # Algorithm
//!
//! The scan works on a single output buffer seeded with the template:
//!
//! 1. Find the next `{` at or after the cursor, then the next `}` after it.
//!    If there is no `}`, stop; the rest of the text stays as it is.
//! 2. Trim the text between the braces and look it up. A missing name or a
//!    falsy plain value leaves the span untouched and the cursor moves one
//!    past the `{`, so a `{name}` nested inside a longer span is still found.
//! 3. Otherwise splice the value's text over the span and move the cursor
//!    to the end of the inserted text. Inserted text is never rescanned.
//!
//! Re-rendering always starts again from the original template rather than
//! patching the previous output.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexSet;
use tracing::trace;

use super::variables::{Lookup, Variables};
use crate::reactive::{OrSignal, Signal, SignalId};

/// Substitute every resolvable placeholder in `template`.
///
/// Returns the rendered text and the signals that contributed to it, in the
/// order they were first matched.
pub(crate) fn substitute<F>(template: &str, lookup: F) -> (String, IndexSet<SignalId>)
where
    F: Fn(&str) -> Option<Lookup>,
{
    let mut out = template.to_string();
    let mut contributors = IndexSet::new();
    let mut cursor = 0;

    while let Some(offset) = out[cursor..].find('{') {
        let open = cursor + offset;
        let Some(len) = out[open + 1..].find('}') else {
            break;
        };
        let close = open + 1 + len;

        let Some(found) = lookup(out[open + 1..close].trim()) else {
            cursor = open + 1;
            continue;
        };

        if let Some(id) = found.signal {
            contributors.insert(id);
        }
        let text = found.value.render();
        out.replace_range(open..=close, &text);
        cursor = open + text.len();
    }

    (out, contributors)
}

/// Render `template` with `variables`, wiring up re-rendering for every
/// signal that was actually substituted.
pub(crate) fn interpolate(template: &str, variables: &Variables) -> Translated {
    let (text, contributors) = substitute(template, |name| variables.lookup(name));
    if contributors.is_empty() {
        return Translated::Plain(text);
    }

    let output = Signal::new(text);
    let template: Rc<str> = Rc::from(template);
    let detached = Rc::new(variables.detach());

    for id in contributors {
        let Some(signal) = variables.reactive(id) else {
            continue;
        };

        let template = Rc::clone(&template);
        let detached = Rc::clone(&detached);
        let output = output.clone();
        signal.on_change(Box::new(move || {
            let (text, _) = substitute(&template, |name| detached.lookup(name));
            trace!(output = %output.id(), changed = %id, "re-rendered template");
            output.set(text);
        }));
    }

    Translated::Reactive(output)
}

/// The result of a translation.
///
/// `Plain` when no signal took part, `Reactive` otherwise. Both expose the
/// current text through [`text`](Translated::text) and `Display`; only the
/// reactive variant can be listened to.
#[derive(Clone)]
pub enum Translated {
    Plain(String),
    Reactive(Signal<String>),
}

impl Translated {
    /// The current text.
    pub fn text(&self) -> String {
        match self {
            Translated::Plain(text) => text.clone(),
            Translated::Reactive(signal) => signal.get(),
        }
    }

    /// Access the current text without cloning.
    pub fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        match self {
            Translated::Plain(text) => f(text),
            Translated::Reactive(signal) => signal.with(|text| f(text)),
        }
    }

    /// Whether the text can change after it was produced.
    pub fn is_reactive(&self) -> bool {
        matches!(self, Translated::Reactive(_))
    }

    /// The live signal, if any.
    pub fn as_signal(&self) -> Option<&Signal<String>> {
        match self {
            Translated::Plain(_) => None,
            Translated::Reactive(signal) => Some(signal),
        }
    }

    /// A signal holding the text; plain results get a fresh signal that
    /// never changes on its own.
    pub fn into_signal(self) -> Signal<String> {
        match self {
            Translated::Plain(text) => Signal::new(text),
            Translated::Reactive(signal) => signal,
        }
    }
}

impl From<Translated> for OrSignal<String> {
    fn from(translated: Translated) -> Self {
        match translated {
            Translated::Plain(text) => OrSignal::Value(text),
            Translated::Reactive(signal) => OrSignal::Signal(signal),
        }
    }
}

impl fmt::Display for Translated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_text(|text| f.write_str(text))
    }
}

impl fmt::Debug for Translated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Translated::Plain(text) => f.debug_tuple("Plain").field(text).finish(),
            Translated::Reactive(signal) => f.debug_tuple("Reactive").field(signal).finish(),
        }
    }
}

impl PartialEq<str> for Translated {
    fn eq(&self, other: &str) -> bool {
        self.with_text(|text| text == other)
    }
}

impl PartialEq<&str> for Translated {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialEq<String> for Translated {
    fn eq(&self, other: &String) -> bool {
        *self == *other.as_str()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn render(template: &str, variables: &Variables) -> String {
        substitute(template, |name| variables.lookup(name)).0
    }

    #[test]
    fn substitutes_single_variable() {
        let vars = Variables::new().with("name", "World");
        assert_eq!(render("Hello {name}!", &vars), "Hello World!");
    }

    #[test]
    fn substitutes_adjacent_variables() {
        let vars = Variables::new().with("a", 1).with("b", 2);
        assert_eq!(render("{a}{b}", &vars), "12");
    }

    #[test]
    fn missing_variable_left_verbatim() {
        assert_eq!(render("{missing}", &Variables::new()), "{missing}");
        let vars = Variables::new().with("name", "x");
        assert_eq!(render("{missing} and {name}", &vars), "{missing} and x");
    }

    #[test]
    fn falsy_plain_values_left_verbatim() {
        let vars = Variables::new().with("zero", 0).with("empty", "");
        assert_eq!(render("{zero}|{empty}", &vars), "{zero}|{empty}");
    }

    #[test]
    fn trims_whitespace_in_names() {
        let vars = Variables::new().with("name", "Ada");
        assert_eq!(render("Hi { name }.", &vars), "Hi Ada.");
        assert_eq!(render("Hi {\tname\n}.", &vars), "Hi Ada.");
    }

    #[test]
    fn inserted_text_is_not_rescanned() {
        let vars = Variables::new().with("a", "{b}").with("b", "nope");
        assert_eq!(render("{a}", &vars), "{b}");

        let vars = Variables::new().with("self", "{self}");
        assert_eq!(render("{self}{self}", &vars), "{self}{self}");
    }

    #[test]
    fn index_correction_for_shorter_and_longer_values() {
        let vars = Variables::new()
            .with("long_variable_name", "x")
            .with("s", "a much longer replacement");
        assert_eq!(
            render("[{long_variable_name}] [{s}] [{long_variable_name}]", &vars),
            "[x] [a much longer replacement] [x]"
        );
    }

    #[test]
    fn unbalanced_brace_stops_scan() {
        let vars = Variables::new().with("a", "A");
        assert_eq!(render("{a} {oops", &vars), "A {oops");
        assert_eq!(render("{", &vars), "{");
        assert_eq!(render("}{a}", &vars), "}A");
    }

    #[test]
    fn nested_open_brace_still_matches_inner_name() {
        let vars = Variables::new().with("name", "Ada");
        assert_eq!(render("{{name}}", &vars), "{Ada}");
        assert_eq!(render("{ {name}", &vars), "{ Ada");
    }

    #[test]
    fn empty_braces_and_plain_text() {
        let vars = Variables::new().with("a", "A");
        assert_eq!(render("{}", &vars), "{}");
        assert_eq!(render("no placeholders", &vars), "no placeholders");
        assert_eq!(render("", &vars), "");
    }

    #[test]
    fn multibyte_text_around_placeholders() {
        let vars = Variables::new().with("name", "Zoë");
        assert_eq!(render("¡Hola {name}! 👋 {name}", &vars), "¡Hola Zoë! 👋 Zoë");
    }

    #[test]
    fn contributors_deduplicated_in_match_order() {
        let a = Signal::new(1);
        let b = Signal::new(2);
        let vars = Variables::new()
            .with("a", &a)
            .with("b", &b)
            .with("alias", &a)
            .with("plain", 3);

        let (text, contributors) =
            substitute("{b}{a}{alias}{plain}{b}", |name| vars.lookup(name));
        assert_eq!(text, "21132");
        assert_eq!(contributors.into_iter().collect::<Vec<_>>(), vec![b.id(), a.id()]);
    }

    #[test]
    fn unmatched_signal_is_not_a_contributor() {
        let unused = Signal::new(1);
        let vars = Variables::new().with("unused", &unused).with("name", "x");

        let result = interpolate("{name}", &vars);
        assert!(!result.is_reactive());
        assert_eq!(unused.listener_count(), 0);
    }

    #[test]
    fn reactive_result_tracks_signal() {
        let count = Signal::new(0);
        let vars = Variables::new().with("count", &count);

        let result = interpolate("Count: {count}", &vars);
        assert!(result.is_reactive());
        assert_eq!(result, "Count: 0");

        count.set(5);
        assert_eq!(result.text(), "Count: 5");
        assert_eq!(result.as_signal().map(Signal::get).as_deref(), Some("Count: 5"));
    }

    #[test]
    fn one_listener_per_distinct_contributor() {
        let a = Signal::new("x".to_string());
        let vars = Variables::new().with("first", &a).with("second", &a);

        let _result = interpolate("{first} {second} {first}", &vars);
        assert_eq!(a.listener_count(), 1);
    }

    #[test]
    fn each_contributor_change_rerenders_once() {
        let a = Signal::new(1);
        let b = Signal::new(2);
        let vars = Variables::new().with("a", &a).with("b", &b);

        let result = interpolate("{a}+{b}", &vars);
        let renders = Rc::new(RefCell::new(Vec::new()));
        {
            let renders = renders.clone();
            result
                .as_signal()
                .unwrap()
                .listen(move |text| renders.borrow_mut().push(text.clone()));
        }

        a.set(10);
        b.set(20);
        assert_eq!(*renders.borrow(), vec!["10+2", "10+20"]);
    }

    #[test]
    fn rerender_uses_original_template() {
        let name = Signal::new("{name}".to_string());
        let vars = Variables::new().with("name", &name);

        let result = interpolate("<{name}>", &vars);
        assert_eq!(result, "<{name}>");

        name.set("Ada".to_string());
        assert_eq!(result, "<Ada>");
    }

    #[test]
    fn rerender_sees_plain_variables_too() {
        let count = Signal::new(1_u32);
        let vars = Variables::new().with("count", &count).with("unit", "apples");

        let result = interpolate("{count} {unit}", &vars);
        count.set(3);
        assert_eq!(result, "3 apples");
    }

    #[test]
    fn translated_conversions() {
        let plain = Translated::Plain("hi".to_string());
        assert!(!plain.is_reactive());
        assert!(plain.as_signal().is_none());
        assert_eq!(plain.to_string(), "hi");
        assert_eq!(plain, "hi".to_string());
        assert!(!OrSignal::from(plain.clone()).is_signal());
        assert_eq!(plain.into_signal().get(), "hi");

        let signal = Signal::new("live".to_string());
        let reactive = Translated::Reactive(signal.clone());
        assert!(OrSignal::from(reactive.clone()).is_signal());
        assert!(reactive.into_signal().ptr_eq(&signal));
    }
}
