//! Dynamic Core
//!
//! This crate provides a small push-based reactive value and a translator
//! that builds reactive strings on top of it.
//! It implements:
//!
//! - Signals: observable values with synchronous change notification
//! - Derived signals that follow a pure function of another signal
//! - One-way bindings from signals into host state
//! - Translation tables with `{name}` interpolation, where signal variables
//!   produce strings that update themselves
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - `reactive`: `Signal`, derivation, listeners and bindings
//! - `i18n`: translation tables, template variables and interpolation
//!
//! Everything is single-threaded and synchronous. A write returns only after
//! every listener, derived signal and dependent translation has seen it.
//!
//! # Example
//!
//! ```rust
//! use dynamic_core::i18n::{I18n, Translation, Variables};
//! use dynamic_core::reactive::Signal;
//!
//! let i18n = I18n::new(Translation::table().with("greeting", "Hello {name}, you have {count} messages"));
//!
//! let count = Signal::new(1_u32);
//! let text = i18n.t_with(
//!     "greeting",
//!     &Variables::new().with("name", "Ada").with("count", &count),
//! );
//! assert_eq!(text, "Hello Ada, you have 1 messages");
//!
//! count.update(|n| n + 1);
//! assert_eq!(text, "Hello Ada, you have 2 messages");
//! ```

pub mod i18n;
pub mod reactive;

pub use i18n::{I18n, Translated, Translation, Variables};
pub use reactive::{OrSignal, Signal};
