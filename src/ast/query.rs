use serde::{Deserialize, Serialize};

use super::expr::*;
use super::values::Value;

/// Statement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    #[default]
    Select,
    Insert,
    Update,
    Delete,
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKind::Select => write!(f, "select"),
            QueryKind::Insert => write!(f, "insert"),
            QueryKind::Update => write!(f, "update"),
            QueryKind::Delete => write!(f, "delete"),
        }
    }
}

/// `UNION [ALL] <query>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Union {
    #[serde(default)]
    pub all: bool,
    pub query: Query,
}

/// The values clause of an INSERT: target, column list and either literal
/// rows or a sub-select feeding the insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertValues {
    pub table: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Expr>>,
    #[serde(default)]
    pub query: Option<Box<Query>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub column: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateClause {
    pub table: String,
    #[serde(default)]
    pub set: Vec<Assignment>,
}

/// Closing SQL for the ROWNUM wrappers, kept apart from the user epilog.
///
/// Both suffixes are rebuilt on every compile and only applied while the
/// matching clause is still positive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginationWrap {
    offset_wrap: Option<String>,
    limit_wrap: Option<String>,
}

impl PaginationWrap {
    pub fn reset(&mut self) {
        self.offset_wrap = None;
        self.limit_wrap = None;
    }

    pub fn set_offset_wrap(&mut self, sql: impl Into<String>) {
        self.offset_wrap = Some(sql.into());
    }

    pub fn set_limit_wrap(&mut self, sql: impl Into<String>) {
        self.limit_wrap = Some(sql.into());
    }

    pub fn offset_wrap(&self) -> Option<&str> {
        self.offset_wrap.as_deref()
    }

    pub fn limit_wrap(&self) -> Option<&str> {
        self.limit_wrap.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.offset_wrap.is_none() && self.limit_wrap.is_none()
    }

    /// Composed closing text for the given clause values. The limit boundary
    /// is the inner one, so it closes first.
    pub fn closing(&self, limit: u64, offset: u64) -> String {
        let mut sql = String::new();
        if limit > 0 {
            if let Some(wrap) = &self.limit_wrap {
                sql.push_str(wrap);
            }
        }
        if offset > 0 {
            if let Some(wrap) = &self.offset_wrap {
                sql.push_str(wrap);
            }
        }
        sql
    }
}

fn default_buffered() -> bool {
    true
}

/// A portable query: independently settable clauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub kind: QueryKind,
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub select: Vec<SelectItem>,
    #[serde(default)]
    pub from: Vec<TableRef>,
    #[serde(default)]
    pub join: Vec<Join>,
    #[serde(default, rename = "where")]
    pub filter: Vec<Expr>,
    #[serde(default)]
    pub group: Vec<Expr>,
    #[serde(default)]
    pub having: Vec<Expr>,
    #[serde(default)]
    pub order: Vec<OrderBy>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub union: Vec<Union>,
    #[serde(default)]
    pub epilog: Option<Epilog>,
    #[serde(default)]
    pub values: Option<InsertValues>,
    #[serde(default)]
    pub update: Option<UpdateClause>,
    /// Whether the statement adapter may buffer the whole result set.
    #[serde(default = "default_buffered")]
    pub buffered: bool,
    #[serde(skip)]
    pub(crate) wrap: PaginationWrap,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            kind: QueryKind::Select,
            distinct: false,
            select: Vec::new(),
            from: Vec::new(),
            join: Vec::new(),
            filter: Vec::new(),
            group: Vec::new(),
            having: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
            union: Vec::new(),
            epilog: None,
            values: None,
            update: None,
            buffered: true,
            wrap: PaginationWrap::default(),
        }
    }
}

impl Query {
    /// `SELECT <columns>`; an empty list selects `*`.
    pub fn select<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            select: columns
                .into_iter()
                .map(|c| SelectItem::new(Expr::Column(c.into())))
                .collect(),
            ..Self::default()
        }
    }

    /// `INSERT INTO <table> (<columns>)`; rows are added with [`Query::values`].
    pub fn insert<I, S>(table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: QueryKind::Insert,
            values: Some(InsertValues {
                table: table.into(),
                columns: columns.into_iter().map(Into::into).collect(),
                rows: Vec::new(),
                query: None,
            }),
            ..Self::default()
        }
    }

    pub fn update(table: impl Into<String>) -> Self {
        Self {
            kind: QueryKind::Update,
            update: Some(UpdateClause {
                table: table.into(),
                set: Vec::new(),
            }),
            ..Self::default()
        }
    }

    pub fn delete(table: impl Into<String>) -> Self {
        Self {
            kind: QueryKind::Delete,
            from: vec![TableRef::new(table)],
            ..Self::default()
        }
    }

    pub fn select_expr(mut self, expr: Expr, alias: Option<&str>) -> Self {
        self.select.push(SelectItem {
            expr,
            alias: alias.map(str::to_string),
        });
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.from.push(TableRef::new(table));
        self
    }

    pub fn from_as(mut self, table: impl Into<String>, alias: impl Into<String>) -> Self {
        self.from.push(TableRef::aliased(table, alias));
        self
    }

    pub fn join(mut self, kind: JoinKind, table: TableRef, on: Vec<Expr>) -> Self {
        self.join.push(Join { kind, table, on });
        self
    }

    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter.push(expr);
        self
    }

    pub fn group_by(mut self, expr: Expr) -> Self {
        self.group.push(expr);
        self
    }

    pub fn having(mut self, expr: Expr) -> Self {
        self.having.push(expr);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.order.push(OrderBy {
            expr: Expr::Column(column.into()),
            order,
        });
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    pub fn union(mut self, query: Query) -> Self {
        self.union.push(Union { all: false, query });
        self
    }

    pub fn union_all(mut self, query: Query) -> Self {
        self.union.push(Union { all: true, query });
        self
    }

    pub fn epilog(mut self, sql: impl Into<String>) -> Self {
        self.epilog = Some(Epilog::Sql(sql.into()));
        self
    }

    /// Append one row of insert values.
    pub fn values<I, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Expr>,
    {
        if let Some(values) = self.values.as_mut() {
            values.rows.push(row.into_iter().map(Into::into).collect());
        }
        self
    }

    /// Feed the insert from a sub-select instead of literal rows.
    pub fn values_query(mut self, query: Query) -> Self {
        if let Some(values) = self.values.as_mut() {
            values.query = Some(Box::new(query));
        }
        self
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Some(update) = self.update.as_mut() {
            update.set.push(Assignment {
                column: column.into(),
                value: Expr::Value(value.into()),
            });
        }
        self
    }

    pub fn unbuffered(mut self) -> Self {
        self.buffered = false;
        self
    }

    /// Current limit, absent read as zero.
    pub fn limit_value(&self) -> u64 {
        self.limit.unwrap_or(0)
    }

    /// Current offset, absent read as zero.
    pub fn offset_value(&self) -> u64 {
        self.offset.unwrap_or(0)
    }

    /// Drop limit and offset, e.g. to reuse the query for a row count.
    pub fn clear_pagination(&mut self) {
        self.limit = None;
        self.offset = None;
    }

    pub fn pagination_wrap(&self) -> &PaginationWrap {
        &self.wrap
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Expr::Value(Value::from(n))
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::Value(Value::from(n))
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::Value(Value::from(s))
    }
}
