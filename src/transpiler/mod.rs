//! Oracle SQL dialect.
//!
//! Turns the portable [`Query`] model into Oracle-legal SQL text plus
//! bindings: shortened and quoted identifiers, ROWNUM pagination and
//! `SELECT .. FROM DUAL UNION ALL` multi-row inserts.

pub mod compiler;
pub mod insert;

use std::sync::PoisonError;

use crate::ast::{Query, Value};
use crate::config::OracleConfig;
use crate::error::OracleResult;
use crate::shortener::{IdentifierShortener, SharedShortener};

pub use compiler::{CompiledQuery, OracleCompiler};
pub use insert::rewrite_multi_insert;

/// Capabilities every SQL dialect provides to the driver.
pub trait SqlDialect {
    /// Quote an identifier, handling dotted names part by part.
    fn quote_identifier(&self, identifier: &str) -> String;

    /// Compile a query into SQL and bindings.
    fn compile(&self, query: &mut Query) -> OracleResult<CompiledQuery>;

    fn savepoint_sql(&self, level: u32) -> String {
        format!("SAVEPOINT LEVEL{}", level)
    }

    fn rollback_savepoint_sql(&self, level: u32) -> String {
        format!("ROLLBACK TO SAVEPOINT LEVEL{}", level)
    }

    /// `None` when the engine has no release statement.
    fn release_savepoint_sql(&self, level: u32) -> Option<String> {
        Some(format!("RELEASE SAVEPOINT LEVEL{}", level))
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "TRUE".to_string() } else { "FALSE".to_string() }
    }

    /// Inline SQL literal for a value, used where binding is not possible (DDL).
    fn value_literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => self.bool_literal(*b),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::String(s) => format!("'{}'", s.replace('\'', "''")),
            other => other.to_string(),
        }
    }

    fn disable_foreign_keys_sql(&self) -> String;

    fn enable_foreign_keys_sql(&self) -> String;

    fn supports_dynamic_constraints(&self) -> bool {
        true
    }
}

/// Oracle (pre-12c) dialect.
///
/// Holds the connection's shortening table, so every identifier it quotes is
/// visible to statements restoring fetched rows.
#[derive(Debug, Clone)]
pub struct OracleDialect {
    shortener: SharedShortener,
    quote_identifiers: bool,
    schema: Option<String>,
}

impl Default for OracleDialect {
    fn default() -> Self {
        Self::new(IdentifierShortener::default().shared())
    }
}

impl OracleDialect {
    pub fn new(shortener: SharedShortener) -> Self {
        Self {
            shortener,
            quote_identifiers: true,
            schema: None,
        }
    }

    pub fn from_config(config: &OracleConfig) -> Self {
        let shortener = IdentifierShortener::new(
            config.max_identifier_length,
            config.shortened_prefix.clone(),
        );
        Self {
            shortener: shortener.shared(),
            quote_identifiers: config.quote_identifiers,
            schema: config.schema.clone(),
        }
    }

    pub fn with_quoting(mut self, enabled: bool) -> Self {
        self.quote_identifiers = enabled;
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn shortener(&self) -> &SharedShortener {
        &self.shortener
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn quotes_identifiers(&self) -> bool {
        self.quote_identifiers
    }

    /// Shorten one identifier part through the shared table.
    pub fn shorten(&self, identifier: &str) -> String {
        self.shortener
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .shorten(identifier)
    }

    fn quote_part(&self, part: &str) -> String {
        if part == "*" {
            return part.to_string();
        }
        let part = self.shorten(part);
        if self.quote_identifiers {
            format!("\"{}\"", part.replace('"', "\"\""))
        } else {
            part
        }
    }

    /// Append ` FROM DUAL` to a SELECT that has no FROM.
    pub fn from_dualify(sql: &str) -> String {
        let statement = sql.trim().to_lowercase();
        if !statement.starts_with("select") || statement.contains(" from ") {
            return sql.to_string();
        }
        format!("{} FROM DUAL", sql)
    }

    fn foreign_key_sql(&self, action: &str) -> String {
        let from_where = match &self.schema {
            Some(schema) => format!(
                "from sys.all_constraints\n                where owner = {} and constraint_type = 'R'",
                self.value_literal(&Value::String(schema.to_uppercase()))
            ),
            None => "from sys.user_constraints\n                where constraint_type = 'R'".to_string(),
        };
        format!(
            "declare
            cursor c is select owner, table_name, constraint_name
                {from_where};
            begin
                for r in c loop
                    execute immediate 'alter table \"' || r.owner || '\".\"' || r.table_name || '\" {action} constraint \"' || r.constraint_name || '\"';
                end loop;
            end;"
        )
    }
}

/// Identifiers made only of word characters, dots and `*` are quoted;
/// anything else is an expression and is emitted verbatim.
fn is_plain_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '*' | '$' | '#'))
}

impl SqlDialect for OracleDialect {
    fn quote_identifier(&self, identifier: &str) -> String {
        if !is_plain_identifier(identifier) {
            return identifier.to_string();
        }
        identifier
            .split('.')
            .map(|part| self.quote_part(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn compile(&self, query: &mut Query) -> OracleResult<CompiledQuery> {
        OracleCompiler::new(self).compile(query)
    }

    fn release_savepoint_sql(&self, _level: u32) -> Option<String> {
        None
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }

    fn disable_foreign_keys_sql(&self) -> String {
        self.foreign_key_sql("disable")
    }

    fn enable_foreign_keys_sql(&self) -> String {
        self.foreign_key_sql("enable")
    }
}
