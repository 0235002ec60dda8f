//! Errors raised while loading translation catalogs.
//!
//! Translating never fails; a key that does not resolve falls back to the
//! key itself. Only building a catalog from external data can go wrong.

use thiserror::Error;

/// Error loading or selecting a translation catalog.
#[derive(Debug, Error)]
pub enum I18nError {
    /// The input was not valid JSON.
    #[error("invalid translation JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value was not an object.
    #[error("translation root must be an object, found {found}")]
    InvalidRoot { found: &'static str },

    /// A node that is neither a string nor an object.
    #[error("translation `{path}` must be a string or an object, found {found}")]
    InvalidLeaf { path: String, found: &'static str },

    /// No table for the requested language.
    #[error("no translations for language `{language}`")]
    UnknownLanguage { language: String },
}

/// Result alias for catalog operations.
pub type Result<T> = std::result::Result<T, I18nError>;
