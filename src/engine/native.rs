//! Seam to the native Oracle client.
//!
//! The driver never talks OCI itself. A client binding implements these two
//! traits; the driver and statement adapter only see rows as ordered maps.
//!
//! Clients report a lost or refused session as [`OracleError::Connection`]
//! and a statement the server rejected as [`OracleError::Execution`].
//!
//! [`OracleError::Connection`]: crate::error::OracleError::Connection
//! [`OracleError::Execution`]: crate::error::OracleError::Execution

use async_trait::async_trait;

use crate::ast::{Row, Value};
use crate::binder::BindKey;
use crate::error::OracleResult;

/// A prepared statement on the native client.
#[async_trait]
pub trait NativeStatement: Send {
    /// Bind one value. Positional keys are zero-based.
    fn bind_value(&mut self, key: &BindKey, value: &Value) -> OracleResult<()>;

    async fn execute(&mut self) -> OracleResult<()>;

    /// Next row, `None` once the cursor is exhausted.
    async fn fetch(&mut self) -> OracleResult<Option<Row>>;

    /// Rows affected by the last execution.
    fn row_count(&self) -> u64;

    fn close_cursor(&mut self) -> OracleResult<()>;
}

/// A session on the native client.
#[async_trait]
pub trait NativeConnection: Send + Sync {
    type Statement: NativeStatement;

    async fn prepare(&self, sql: &str) -> OracleResult<Self::Statement>;

    /// Run a statement without result rows, returning the affected count.
    async fn exec(&self, sql: &str) -> OracleResult<u64>;

    /// Table targeted by the most recent INSERT on this session.
    fn last_inserted_table(&self) -> Option<String>;

    /// Current value of `sequence`; with `None` the client derives the
    /// sequence from the last inserted table.
    async fn last_insert_id(&self, sequence: Option<&str>) -> OracleResult<Value>;
}
