//! Oracle driver.
//!
//! Owns one native session together with the dialect (and through it the
//! identifier shortening table) for that session.
//!
//! ```rust,ignore
//! let mut driver = OracleDriver::connect(session, OracleConfig::load_default()?).await?;
//!
//! let mut query = Query::select(["id", "title"]).from("articles").limit(10);
//! let mut stmt = driver.prepare(&mut query).await?;
//! stmt.execute().await?;
//! while let Some(row) = stmt.fetch_assoc().await? {
//!     println!("{:?}", row);
//! }
//! ```

pub mod native;
pub mod statement;

use tracing::debug;

use crate::ast::{Query, Row, Value};
use crate::config::OracleConfig;
use crate::error::{OracleError, OracleResult};
use crate::schema::{CatalogQuery, OracleSchema, SchemaDialect, TableSchema};
use crate::transpiler::{CompiledQuery, OracleDialect, SqlDialect};

pub use native::{NativeConnection, NativeStatement};
pub use statement::OracleStatement;

pub struct OracleDriver<C: NativeConnection> {
    connection: C,
    dialect: OracleDialect,
    config: OracleConfig,
}

impl<C: NativeConnection> OracleDriver<C> {
    /// Wrap a native session and run the session init commands.
    pub async fn connect(connection: C, config: OracleConfig) -> OracleResult<Self> {
        for command in config.session_init() {
            debug!("Session init: {}", command);
            connection.exec(&command).await.map_err(|e| match e {
                OracleError::Connection(_) => e,
                other => OracleError::Connection(format!("session init failed: {}", other)),
            })?;
        }
        Ok(Self {
            dialect: OracleDialect::from_config(&config),
            connection,
            config,
        })
    }

    pub fn dialect(&self) -> &OracleDialect {
        &self.dialect
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn schema_dialect(&self) -> OracleSchema<'_> {
        OracleSchema::new(&self.dialect)
    }

    pub fn compile(&self, query: &mut Query) -> OracleResult<CompiledQuery> {
        self.dialect.compile(query)
    }

    /// Compile and prepare a query with its bindings applied.
    pub async fn prepare(&self, query: &mut Query) -> OracleResult<OracleStatement<C::Statement>> {
        let compiled = self.compile(query)?;
        let mut statement = self.prepare_sql(&compiled.sql).await?;
        statement.bind_all(&compiled.bindings)?;
        statement.strip_row_number(compiled.row_number_column);
        if !compiled.buffered {
            statement.buffer_results(false);
        }
        Ok(statement)
    }

    /// Prepare raw SQL. A SELECT without FROM gets `FROM DUAL` appended
    /// before it reaches the native client.
    pub async fn prepare_sql(&self, sql: &str) -> OracleResult<OracleStatement<C::Statement>> {
        let native_sql = OracleDialect::from_dualify(sql);
        debug!("Preparing: {}", native_sql);
        let inner = self.connection.prepare(&native_sql).await?;

        let mut statement = OracleStatement::new(inner, self.dialect.shortener().clone(), sql);
        statement.buffer_results(self.config.buffer_results);
        Ok(statement)
    }

    /// Prepare and execute in one step.
    pub async fn execute(&self, query: &mut Query) -> OracleResult<OracleStatement<C::Statement>> {
        let mut statement = self.prepare(query).await?;
        statement.execute().await?;
        Ok(statement)
    }

    async fn catalog_rows(&self, catalog: CatalogQuery) -> OracleResult<Vec<Row>> {
        debug!("Catalog query: {}", catalog.sql);
        let mut statement = self.prepare_sql(&catalog.sql).await?;
        for (name, value) in &catalog.params {
            statement.bind_named(name, value)?;
        }
        statement.execute().await?;
        let rows = statement.fetch_all_assoc().await?;
        statement.close_cursor()?;
        Ok(rows)
    }

    pub async fn list_tables(&self) -> OracleResult<Vec<String>> {
        let schema = self.schema_dialect();
        let rows = self.catalog_rows(schema.list_tables_sql()).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.values().next().and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }

    /// Reflect a table (`table` or `schema.table`) from the catalog.
    pub async fn describe_table(&self, name: &str) -> OracleResult<TableSchema> {
        let schema = self.schema_dialect();
        let columns = self.catalog_rows(schema.describe_column_sql(name)).await?;
        let indexes = self.catalog_rows(schema.describe_index_sql(name)).await?;
        let foreign_keys = self.catalog_rows(schema.describe_foreign_key_sql(name)).await?;
        schema.describe(name, &columns, &indexes, &foreign_keys)
    }

    /// Last generated id. Callers often pass the table they inserted into
    /// rather than a sequence; in that case the client picks the sequence.
    pub async fn last_insert_id(&self, sequence: Option<&str>) -> OracleResult<Value> {
        let sequence = sequence.filter(|s| {
            self.connection
                .last_inserted_table()
                .is_none_or(|table| table != *s)
        });
        self.connection.last_insert_id(sequence).await
    }

    pub async fn disable_foreign_keys(&self) -> OracleResult<()> {
        self.connection.exec(&self.dialect.disable_foreign_keys_sql()).await?;
        Ok(())
    }

    pub async fn enable_foreign_keys(&self) -> OracleResult<()> {
        self.connection.exec(&self.dialect.enable_foreign_keys_sql()).await?;
        Ok(())
    }

    pub async fn create_savepoint(&self, level: u32) -> OracleResult<()> {
        self.connection.exec(&self.dialect.savepoint_sql(level)).await?;
        Ok(())
    }

    pub async fn rollback_savepoint(&self, level: u32) -> OracleResult<()> {
        self.connection
            .exec(&self.dialect.rollback_savepoint_sql(level))
            .await?;
        Ok(())
    }

    /// No-op on Oracle, which has no RELEASE SAVEPOINT.
    pub async fn release_savepoint(&self, level: u32) -> OracleResult<()> {
        if let Some(sql) = self.dialect.release_savepoint_sql(level) {
            self.connection.exec(&sql).await?;
        }
        Ok(())
    }

    /// Hand back the native session. The shortening table goes with the driver.
    pub fn disconnect(self) -> C {
        self.connection
    }
}
