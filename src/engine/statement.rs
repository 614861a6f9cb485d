//! Statement adapter over a native statement.
//!
//! Adds result buffering and undoes identifier shortening on associative
//! fetches.

use std::collections::VecDeque;
use std::sync::PoisonError;

use tracing::{debug, trace};

use super::native::NativeStatement;
use crate::ast::{Row, Value};
use crate::binder::{BindKey, Binding};
use crate::error::OracleResult;
use crate::shortener::SharedShortener;
use crate::transpiler::compiler::ROW_NUMBER_COLUMN;

pub struct OracleStatement<S> {
    inner: S,
    shortener: SharedShortener,
    query_string: String,
    buffer_results: bool,
    buffer: Option<VecDeque<Row>>,
    strip_row_number: bool,
    row_count: u64,
}

impl<S: NativeStatement> OracleStatement<S> {
    pub fn new(inner: S, shortener: SharedShortener, query_string: impl Into<String>) -> Self {
        Self {
            inner,
            shortener,
            query_string: query_string.into(),
            buffer_results: true,
            buffer: None,
            strip_row_number: false,
            row_count: 0,
        }
    }

    /// SQL as the caller compiled it, before any `FROM DUAL` fix-up.
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    pub fn buffer_results(&mut self, enabled: bool) {
        self.buffer_results = enabled;
    }

    pub fn is_buffered(&self) -> bool {
        self.buffer_results
    }

    /// Drop the pagination row-number column from fetched rows.
    pub fn strip_row_number(&mut self, enabled: bool) {
        self.strip_row_number = enabled;
    }

    /// Bind anonymous parameters in order, starting at position 0.
    pub fn bind(&mut self, params: &[Value]) -> OracleResult<()> {
        for (position, value) in params.iter().enumerate() {
            self.inner.bind_value(&BindKey::Position(position), value)?;
        }
        Ok(())
    }

    pub fn bind_named(&mut self, name: &str, value: &Value) -> OracleResult<()> {
        let key = BindKey::Named(name.trim_start_matches(':').to_string());
        self.inner.bind_value(&key, value)
    }

    pub fn bind_all(&mut self, bindings: &[Binding]) -> OracleResult<()> {
        for binding in bindings {
            self.inner.bind_value(&binding.key, &binding.value)?;
        }
        Ok(())
    }

    /// Execute, discarding rows buffered by a previous execution. In buffered
    /// mode the whole result set is read before returning.
    pub async fn execute(&mut self) -> OracleResult<()> {
        self.buffer = None;
        debug!("Executing: {}", self.query_string);
        self.inner.execute().await?;

        if self.buffer_results {
            let mut rows = VecDeque::new();
            while let Some(row) = self.inner.fetch().await? {
                rows.push_back(row);
            }
            self.row_count = rows.len() as u64;
            self.buffer = Some(rows);
        } else {
            self.row_count = self.inner.row_count();
        }
        Ok(())
    }

    async fn next_row(&mut self) -> OracleResult<Option<Row>> {
        let row = match self.buffer.as_mut() {
            Some(buffer) => buffer.pop_front(),
            None => self.inner.fetch().await?,
        };
        Ok(row)
    }

    fn remove_row_number(&self, row: &mut Row) {
        if !self.strip_row_number {
            return;
        }
        if let Some(index) = row
            .keys()
            .position(|k| k.eq_ignore_ascii_case(ROW_NUMBER_COLUMN))
        {
            row.shift_remove_index(index);
        }
    }

    /// Next row keyed by the caller's original identifiers.
    pub async fn fetch_assoc(&mut self) -> OracleResult<Option<Row>> {
        let Some(mut row) = self.next_row().await? else {
            return Ok(None);
        };
        self.remove_row_number(&mut row);
        let row = self
            .shortener
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .restore(row);
        trace!("Fetched row: {:?}", row);
        Ok(Some(row))
    }

    /// Next row as positional values. Keys are not restored.
    pub async fn fetch_num(&mut self) -> OracleResult<Option<Vec<Value>>> {
        let Some(row) = self.next_row().await? else {
            return Ok(None);
        };
        let mut values: Vec<Value> = row.into_values().collect();
        if self.strip_row_number {
            // the row number is the last column of the outer wrapper
            values.pop();
        }
        Ok(Some(values))
    }

    pub async fn fetch_all_assoc(&mut self) -> OracleResult<Vec<Row>> {
        let mut rows = Vec::new();
        while let Some(row) = self.fetch_assoc().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    pub fn close_cursor(&mut self) -> OracleResult<()> {
        self.buffer = None;
        self.inner.close_cursor()
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}
