//! Parameter binding for compiled statements.

use serde::Serialize;

use crate::ast::Value;

/// How a bound value is addressed on the native statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum BindKey {
    /// `:name`
    Named(String),
    /// Zero-based position of an anonymous `?` parameter.
    Position(usize),
}

impl std::fmt::Display for BindKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindKey::Named(name) => write!(f, ":{}", name),
            BindKey::Position(pos) => write!(f, "#{}", pos),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binding {
    pub key: BindKey,
    pub value: Value,
}

/// Collects values for one statement and hands out `:cN` placeholders.
///
/// Numbering is monotonic for the lifetime of the binder, so two clauses
/// compiled with the same binder never collide.
#[derive(Debug, Clone, Default)]
pub struct ValueBinder {
    bindings: Vec<Binding>,
    counter: usize,
}

impl ValueBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value under a fresh generated placeholder and return it.
    pub fn placeholder(&mut self, value: Value) -> String {
        let name = format!("c{}", self.counter);
        self.counter += 1;
        self.bindings.push(Binding {
            key: BindKey::Named(name.clone()),
            value,
        });
        format!(":{}", name)
    }

    /// Bind a value under a fixed name. A second bind under the same name
    /// replaces the first.
    pub fn bind(&mut self, name: &str, value: Value) {
        let key = BindKey::Named(name.trim_start_matches(':').to_string());
        match self.bindings.iter_mut().find(|b| b.key == key) {
            Some(existing) => existing.value = value,
            None => self.bindings.push(Binding { key, value }),
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn into_bindings(self) -> Vec<Binding> {
        self.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn reset(&mut self) {
        self.bindings.clear();
        self.counter = 0;
    }
}
