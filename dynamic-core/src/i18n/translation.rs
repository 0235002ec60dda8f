//! Translation tables
//!
//! A translation table is a tree whose leaves are template strings and
//! whose inner nodes are tables keyed by segment name. Keys address leaves
//! with dot-separated paths: `"menu.file.open"` walks three levels.
//!
//! Tables usually come from JSON:
//!
//! ```json
//! {
//!   "greeting": "Hello {name}!",
//!   "menu": { "open": "Open", "count": "{count} items" }
//! }
//! ```
//!
//! Loading validates the whole tree up front, so a table that loaded
//! successfully only ever contains strings and tables.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use super::error::{I18nError, Result};
use super::I18n;

/// A node in a translation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Translation {
    /// A template string, possibly containing `{name}` placeholders.
    Text(String),
    /// A nested table.
    Table(IndexMap<String, Translation>),
}

impl Translation {
    /// An empty table.
    pub fn table() -> Self {
        Translation::Table(IndexMap::new())
    }

    /// Builder-style insert, for tables assembled in code.
    ///
    /// Inserting into a `Text` node replaces it with a table.
    pub fn with(mut self, key: impl Into<String>, node: impl Into<Translation>) -> Self {
        if let Translation::Text(_) = self {
            self = Translation::table();
        }
        if let Translation::Table(entries) = &mut self {
            entries.insert(key.into(), node.into());
        }
        self
    }

    /// Parse and validate a table from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Validate a table from an already parsed JSON value.
    ///
    /// The root must be an object and every leaf a string.
    pub fn from_json_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(_) => Self::convert(value, ""),
            other => Err(I18nError::InvalidRoot {
                found: json_kind(&other),
            }),
        }
    }

    fn convert(value: Value, path: &str) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Translation::Text(text)),
            Value::Object(entries) => {
                let mut table = IndexMap::with_capacity(entries.len());
                for (key, child) in entries {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    let child = Self::convert(child, &child_path)?;
                    table.insert(key, child);
                }
                Ok(Translation::Table(table))
            }
            other => Err(I18nError::InvalidLeaf {
                path: path.to_string(),
                found: json_kind(&other),
            }),
        }
    }

    /// Walk a dot-separated key down to its template.
    ///
    /// Returns `None` if a segment is missing, if a text node is reached
    /// before the last segment, or if the key names a table.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        let mut node = self;
        for segment in key.split('.') {
            match node {
                Translation::Table(entries) => node = entries.get(segment)?,
                Translation::Text(_) => return None,
            }
        }
        match node {
            Translation::Text(text) => Some(text),
            Translation::Table(_) => None,
        }
    }
}

impl TryFrom<Value> for Translation {
    type Error = I18nError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json_value(value)
    }
}

impl<'de> Deserialize<'de> for Translation {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json_value(value).map_err(serde::de::Error::custom)
    }
}

impl From<&str> for Translation {
    fn from(text: &str) -> Self {
        Translation::Text(text.to_string())
    }
}

impl From<String> for Translation {
    fn from(text: String) -> Self {
        Translation::Text(text)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Translation tables for several languages, keyed by language code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Translations {
    languages: IndexMap<String, Translation>,
}

impl Translations {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the table for `language`.
    pub fn insert(&mut self, language: impl Into<String>, table: Translation) {
        self.languages.insert(language.into(), table);
    }

    /// Parse a catalog of the form `{ "en": { ... }, "de": { ... } }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let entries = match value {
            Value::Object(entries) => entries,
            other => {
                return Err(I18nError::InvalidRoot {
                    found: json_kind(&other),
                })
            }
        };

        let mut languages = IndexMap::with_capacity(entries.len());
        for (language, table) in entries {
            let table = match table {
                Value::Object(_) => Translation::convert(table, &language)?,
                other => {
                    return Err(I18nError::InvalidLeaf {
                        path: language,
                        found: json_kind(&other),
                    })
                }
            };
            languages.insert(language, table);
        }

        debug!(languages = languages.len(), "loaded translation catalog");
        Ok(Self { languages })
    }

    /// The table for `language`, if present.
    pub fn get(&self, language: &str) -> Option<&Translation> {
        self.languages.get(language)
    }

    /// Language codes in insertion order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Build a translator for one language.
    pub fn i18n(&self, language: &str) -> Result<I18n> {
        self.get(language)
            .cloned()
            .map(I18n::new)
            .ok_or_else(|| I18nError::UnknownLanguage {
                language: language.to_string(),
            })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
