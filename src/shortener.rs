//! Over-length identifier aliasing.
//!
//! Oracle before 12c rejects identifiers longer than 30 characters. Legal
//! identifiers over the limit are swapped for generated aliases on the way
//! out and swapped back in fetched rows.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use tracing::debug;

use crate::ast::Row;

/// Identifier length limit of pre-12c Oracle.
pub const DEFAULT_MAX_IDENTIFIER_LENGTH: usize = 30;

/// Prefix of generated aliases.
pub const DEFAULT_ALIAS_PREFIX: &str = "XXAUTO_SHORTENED_ID";

/// Shortening table shared by a driver's dialect and its statements.
pub type SharedShortener = Arc<RwLock<IdentifierShortener>>;

/// Append-only bijection between generated aliases and original identifiers.
#[derive(Debug, Clone)]
pub struct IdentifierShortener {
    max_length: usize,
    prefix: String,
    /// alias -> original, in creation order
    aliases: IndexMap<String, String>,
    /// original -> alias
    originals: HashMap<String, String>,
}

impl Default for IdentifierShortener {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IDENTIFIER_LENGTH, DEFAULT_ALIAS_PREFIX)
    }
}

impl IdentifierShortener {
    pub fn new(max_length: usize, prefix: impl Into<String>) -> Self {
        Self {
            max_length,
            prefix: prefix.into(),
            aliases: IndexMap::new(),
            originals: HashMap::new(),
        }
    }

    pub fn shared(self) -> SharedShortener {
        Arc::new(RwLock::new(self))
    }

    /// Only plain word identifiers are candidates; anything with spaces,
    /// quotes, dots or operators is an expression and is left alone.
    fn is_candidate(identifier: &str) -> bool {
        !identifier.is_empty()
            && identifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }

    /// Alias already assigned to `identifier`, if any.
    pub fn lookup(&self, identifier: &str) -> Option<&str> {
        self.originals.get(identifier).map(String::as_str)
    }

    /// Return `identifier` unchanged when it fits, otherwise its alias,
    /// allocating one on first sight.
    pub fn shorten(&mut self, identifier: &str) -> String {
        if !Self::is_candidate(identifier) || identifier.chars().count() <= self.max_length {
            return identifier.to_string();
        }

        if let Some(alias) = self.lookup(identifier) {
            return alias.to_string();
        }

        let alias = format!("{}{}", self.prefix, self.aliases.len() + 1);
        debug!("Shortened identifier {} to {}", identifier, alias);
        self.aliases.insert(alias.clone(), identifier.to_string());
        self.originals.insert(identifier.to_string(), alias.clone());
        alias
    }

    /// Original identifier behind `alias`.
    pub fn original(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Swap every aliased key of `row` back to its original. Key order and
    /// unrelated keys are preserved.
    pub fn restore(&self, row: Row) -> Row {
        if self.aliases.is_empty() {
            return row;
        }
        row.into_iter()
            .map(|(key, value)| match self.aliases.get(&key) {
                Some(original) => (original.clone(), value),
                None => (key, value),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Alias table in creation order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, o)| (a.as_str(), o.as_str()))
    }

    pub fn clear(&mut self) {
        self.aliases.clear();
        self.originals.clear();
    }
}
