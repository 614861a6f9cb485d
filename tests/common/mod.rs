//! In-memory native client for driver tests.
//!
//! Canned rows are registered against a SQL fragment. On execute the mock
//! applies the ROWNUM wrappers the way Oracle would: it keeps rows up to the
//! bound max row, drops rows up to the bound offset and appends the
//! row-number column when the SQL selects one.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use qail_oracle::prelude::*;

#[derive(Default)]
pub struct MockState {
    pub executed: Vec<String>,
    pub prepared: Vec<String>,
    pub binds: Vec<(BindKey, Value)>,
    pub responses: Vec<(String, Vec<Row>)>,
    pub last_inserted_table: Option<String>,
    pub last_insert_id_calls: Vec<Option<String>>,
    pub fetches: usize,
    pub failures: Vec<String>,
}

impl MockState {
    /// Server-side rejection for any SQL containing a registered fragment.
    fn check(&self, sql: &str) -> OracleResult<()> {
        match self.failures.iter().find(|f| sql.contains(f.as_str())) {
            Some(fragment) => Err(OracleError::Execution(format!(
                "ORA-00942: table or view does not exist ({})",
                fragment
            ))),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockConnection {
    pub state: Arc<Mutex<MockState>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows returned by any statement whose SQL contains `fragment`.
    pub fn respond(&self, fragment: &str, rows: Vec<Row>) {
        self.state
            .lock()
            .unwrap()
            .responses
            .push((fragment.to_string(), rows));
    }

    /// Make every statement whose SQL contains `fragment` fail.
    pub fn fail_on(&self, fragment: &str) {
        self.state.lock().unwrap().failures.push(fragment.to_string());
    }

    pub fn executed(&self) -> Vec<String> {
        self.state.lock().unwrap().executed.clone()
    }

    pub fn prepared(&self) -> Vec<String> {
        self.state.lock().unwrap().prepared.clone()
    }

    pub fn binds(&self) -> Vec<(BindKey, Value)> {
        self.state.lock().unwrap().binds.clone()
    }

    pub fn fetches(&self) -> usize {
        self.state.lock().unwrap().fetches
    }
}

pub struct MockStatement {
    sql: String,
    state: Arc<Mutex<MockState>>,
    binds: Vec<(BindKey, Value)>,
    rows: VecDeque<Row>,
    affected: u64,
}

impl MockStatement {
    fn bound(&self, name: &str) -> Option<i64> {
        self.binds.iter().find_map(|(key, value)| match key {
            BindKey::Named(n) if n == name => value.as_i64(),
            _ => None,
        })
    }
}

#[async_trait]
impl NativeStatement for MockStatement {
    fn bind_value(&mut self, key: &BindKey, value: &Value) -> OracleResult<()> {
        self.binds.push((key.clone(), value.clone()));
        self.state
            .lock()
            .unwrap()
            .binds
            .push((key.clone(), value.clone()));
        Ok(())
    }

    async fn execute(&mut self) -> OracleResult<()> {
        let base = {
            let state = self.state.lock().unwrap();
            state.check(&self.sql)?;
            state
                .responses
                .iter()
                .find(|(fragment, _)| self.sql.contains(fragment.as_str()))
                .map(|(_, rows)| rows.clone())
                .unwrap_or_default()
        };

        let max = self.bound("QAIL_MAX_ROW_TO_FETCH").unwrap_or(i64::MAX) as usize;
        let offset = self.bound("QAIL_FETCH_OFFSET").unwrap_or(0) as usize;
        let numbered = self.sql.contains("ROWNUM QAIL_RNUM");

        self.rows = base
            .into_iter()
            .take(max)
            .enumerate()
            .map(|(i, mut row)| {
                if numbered {
                    row.insert("QAIL_RNUM".to_string(), Value::Int(i as i64 + 1));
                }
                row
            })
            .skip(offset)
            .collect();
        self.affected = self.rows.len() as u64;
        Ok(())
    }

    async fn fetch(&mut self) -> OracleResult<Option<Row>> {
        self.state.lock().unwrap().fetches += 1;
        Ok(self.rows.pop_front())
    }

    fn row_count(&self) -> u64 {
        self.affected
    }

    fn close_cursor(&mut self) -> OracleResult<()> {
        self.rows.clear();
        Ok(())
    }
}

#[async_trait]
impl NativeConnection for MockConnection {
    type Statement = MockStatement;

    async fn prepare(&self, sql: &str) -> OracleResult<MockStatement> {
        self.state.lock().unwrap().prepared.push(sql.to_string());
        Ok(MockStatement {
            sql: sql.to_string(),
            state: Arc::clone(&self.state),
            binds: Vec::new(),
            rows: VecDeque::new(),
            affected: 0,
        })
    }

    async fn exec(&self, sql: &str) -> OracleResult<u64> {
        let mut state = self.state.lock().unwrap();
        state.check(sql)?;
        state.executed.push(sql.to_string());
        Ok(0)
    }

    fn last_inserted_table(&self) -> Option<String> {
        self.state.lock().unwrap().last_inserted_table.clone()
    }

    async fn last_insert_id(&self, sequence: Option<&str>) -> OracleResult<Value> {
        let mut state = self.state.lock().unwrap();
        state.last_insert_id_calls.push(sequence.map(str::to_string));
        Ok(Value::Int(42))
    }
}

/// Build a row from key/value pairs, keeping their order.
pub fn row<V: Into<Value> + Clone>(fields: &[(&str, V)]) -> Row {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone().into()))
        .collect()
}

/// `n` article rows with ids 1..=n.
pub fn articles(n: i64) -> Vec<Row> {
    (1..=n)
        .map(|id| {
            let mut r = Row::new();
            r.insert("id".to_string(), Value::Int(id));
            r.insert("title".to_string(), Value::String(format!("Article {}", id)));
            r
        })
        .collect()
}
