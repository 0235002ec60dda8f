//! Property tests for signal propagation and interpolation.

use std::cell::RefCell;
use std::rc::Rc;

use dynamic_core::i18n::{I18n, Translation, Variables};
use dynamic_core::reactive::Signal;
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

/// Template text built from literal chunks and placeholders.
fn arb_template() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[a-z ]{0,6}",
        Just("{a}".to_string()),
        Just("{ b }".to_string()),
        Just("{missing}".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
    ];
    proptest::collection::vec(piece, 0..12).prop_map(|pieces| pieces.concat())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Every write reaches every listener, in order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn listeners_see_every_write(writes in proptest::collection::vec(any::<i64>(), 0..50)) {
        let signal = Signal::new(0_i64);
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        {
            let first = first.clone();
            signal.listen(move |v| first.borrow_mut().push(*v));
        }
        {
            let second = second.clone();
            signal.listen(move |v| second.borrow_mut().push(*v));
        }

        for (n, value) in writes.iter().enumerate() {
            signal.set(*value);
            prop_assert_eq!(signal.get(), *value);
            prop_assert_eq!(first.borrow().len(), n + 1);
        }

        prop_assert_eq!(&*first.borrow(), &writes);
        prop_assert_eq!(&*second.borrow(), &writes);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Derived values follow the map of every source value
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn derived_sequence_is_mapped_source_sequence(
        initial in any::<i32>(),
        writes in proptest::collection::vec(any::<i32>(), 0..50),
    ) {
        let source = Signal::new(initial);
        let derived = source.derive(|v| i64::from(*v) * 3 - 1);

        let mut observed = vec![derived.get()];
        for value in &writes {
            source.set(*value);
            observed.push(derived.get());
        }

        let expected: Vec<i64> = std::iter::once(initial)
            .chain(writes.iter().copied())
            .map(|v| i64::from(v) * 3 - 1)
            .collect();
        prop_assert_eq!(observed, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Plain interpolation is deterministic and never panics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plain_interpolation_is_idempotent(template in arb_template(), a in "[a-z{}]{1,4}", b in 1..1000_i32) {
        let i18n = I18n::new(Translation::table().with("key", template.as_str()));
        let vars = Variables::new().with("a", a.as_str()).with("b", b);

        let first = i18n.t_with("key", &vars);
        let second = i18n.t_with("key", &vars);
        prop_assert!(!first.is_reactive());
        prop_assert_eq!(first.text(), second.text());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. A reactive result always equals a fresh plain rendering
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reactive_matches_fresh_render(
        template in arb_template(),
        writes in proptest::collection::vec("[a-z{}]{1,4}", 1..10),
    ) {
        let i18n = I18n::new(Translation::table().with("key", template.as_str()));
        let a = Signal::new("start".to_string());
        let reactive = i18n.t_with("key", &Variables::new().with("a", &a).with("b", 7));

        for value in writes {
            a.set(value.clone());
            let fresh = i18n.t_with("key", &Variables::new().with("a", value).with("b", 7));
            prop_assert_eq!(reactive.text(), fresh.text());
        }
    }
}
