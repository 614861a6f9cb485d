//! # QAIL Oracle
//!
//! Oracle (pre-12c) dialect for the portable QAIL query model.
//!
//! Oracle before 12c is missing a few things portable SQL takes for granted:
//!
//! | Missing                   | Emulated by                                     |
//! |---------------------------|-------------------------------------------------|
//! | `LIMIT` / `OFFSET`        | nested `ROWNUM` subqueries                      |
//! | identifiers > 30 chars    | generated aliases, restored on fetch            |
//! | `VALUES (..), (..)`       | `SELECT .. FROM DUAL UNION ALL SELECT ..`       |
//! | `SELECT 1` without FROM   | `FROM DUAL` appended at prepare time            |
//!
//! ## Quick Example
//!
//! ```
//! use qail_oracle::prelude::*;
//!
//! let dialect = OracleDialect::default();
//! let mut query = Query::select(["id", "title"]).from("articles").limit(5).offset(10);
//! let compiled = dialect.compile(&mut query).unwrap();
//!
//! assert!(compiled.sql.starts_with("SELECT * FROM (SELECT /*+ FIRST_ROWS(15) */"));
//! ```

pub mod ast;
pub mod binder;
pub mod config;
pub mod engine;
pub mod error;
pub mod schema;
pub mod shortener;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::binder::{BindKey, Binding, ValueBinder};
    pub use crate::config::OracleConfig;
    pub use crate::engine::{NativeConnection, NativeStatement, OracleDriver, OracleStatement};
    pub use crate::error::*;
    pub use crate::schema::{
        Action, ColumnDef, ColumnType, Constraint, ConstraintKind, OracleSchema, SchemaDialect,
        TableSchema,
    };
    pub use crate::shortener::{IdentifierShortener, SharedShortener};
    pub use crate::transpiler::{CompiledQuery, OracleDialect, SqlDialect};
}

/// Compile a query with a fresh default dialect.
///
/// # Example
///
/// ```
/// use qail_oracle::ast::Query;
///
/// let mut query = Query::select(["id"]).from("users").limit(10);
/// let compiled = qail_oracle::compile(&mut query).unwrap();
/// assert!(compiled.sql.contains("ROWNUM <= :QAIL_MAX_ROW_TO_FETCH"));
/// ```
pub fn compile(query: &mut ast::Query) -> error::OracleResult<transpiler::CompiledQuery> {
    use transpiler::SqlDialect;
    transpiler::OracleDialect::default().compile(query)
}
