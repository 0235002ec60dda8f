//! Reactive Translations
//!
//! This module looks up templates in a nested translation table and fills
//! in `{name}` placeholders from a set of variables.
//!
//! # Concepts
//!
//! ## Keys
//!
//! Keys are dot-separated paths into the table (`"menu.file.open"`). A key
//! that does not lead to a template is returned unchanged, so a missing
//! translation shows up as its key instead of failing.
//!
//! ## Variables
//!
//! Variables may be plain scalars or signals. A translation that used at
//! least one signal comes back as a `Signal<String>` that re-renders from
//! the original template whenever one of those signals is written.
//!
//! # Example
//!
//! ```rust
//! use dynamic_core::i18n::{I18n, Translation, Variables};
//! use dynamic_core::reactive::Signal;
//!
//! let i18n = I18n::new(Translation::table().with("count", "Count: {count}"));
//! let count = Signal::new(0);
//!
//! let label = i18n.t_with("count", &Variables::new().with("count", &count));
//! assert_eq!(label, "Count: 0");
//!
//! count.set(5);
//! assert_eq!(label, "Count: 5");
//! ```

mod error;
mod interpolate;
mod translation;
mod variables;

use std::rc::Rc;

use tracing::debug;

pub use error::{I18nError, Result};
pub use interpolate::Translated;
pub use translation::{Translation, Translations};
pub use variables::{ReactiveScalar, Scalar, ScalarSource, Variable, Variables};

/// A translator over one language's table.
///
/// Cloning is cheap; clones share the table.
#[derive(Debug, Clone)]
pub struct I18n {
    table: Rc<Translation>,
}

impl I18n {
    /// Create a translator for `table`.
    pub fn new(table: Translation) -> Self {
        Self {
            table: Rc::new(table),
        }
    }

    /// Create a translator from a JSON table.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Translation::from_json_str(json).map(Self::new)
    }

    /// The underlying table.
    pub fn table(&self) -> &Translation {
        &self.table
    }

    /// Translate `key` without variables.
    ///
    /// The template is returned exactly as written; placeholders are not
    /// touched. Unknown keys come back as the key itself.
    pub fn t(&self, key: &str) -> Translated {
        Translated::Plain(self.resolve(key).to_string())
    }

    /// Translate `key` and substitute `variables`.
    ///
    /// Returns [`Translated::Reactive`] if at least one signal was
    /// substituted, [`Translated::Plain`] otherwise.
    pub fn t_with(&self, key: &str, variables: &Variables) -> Translated {
        match self.table.resolve(key) {
            Some(template) => interpolate::interpolate(template, variables),
            None => {
                debug!(key, "translation key did not resolve");
                Translated::Plain(key.to_string())
            }
        }
    }

    fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.table.resolve(key).unwrap_or_else(|| {
            debug!(key, "translation key did not resolve");
            key
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
