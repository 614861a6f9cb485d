//! Generic table-schema model and the Oracle catalog mapper.
//!
//! [`TableSchema`] is what introspection produces and what DDL generation
//! consumes. Columns, constraints and indexes keep insertion order so
//! generated DDL follows the catalog (or the document it was loaded from).

pub mod oracle;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ast::Value;

pub use oracle::{OracleSchema, SchemaDialect};

/// Canonical name of a table's primary key constraint.
pub const PRIMARY_KEY_NAME: &str = "primary";

/// Logical column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    BigInteger,
    Boolean,
    Binary,
    Float,
    Decimal,
    String,
    Text,
    Date,
    Time,
    DateTime,
    Timestamp,
    Uuid,
    Json,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::BigInteger => "biginteger",
            ColumnType::Boolean => "boolean",
            ColumnType::Binary => "binary",
            ColumnType::Float => "float",
            ColumnType::Decimal => "decimal",
            ColumnType::String => "string",
            ColumnType::Text => "text",
            ColumnType::Date => "date",
            ColumnType::Time => "time",
            ColumnType::DateTime => "datetime",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Uuid => "uuid",
            ColumnType::Json => "json",
        };
        write!(f, "{}", name)
    }
}

fn default_nullable() -> bool {
    true
}

/// Column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// `None` when the native type has no logical mapping.
    #[serde(rename = "type", default)]
    pub kind: Option<ColumnType>,
    #[serde(default)]
    pub length: Option<u32>,
    /// Scale for decimals.
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub default: Option<Value>,
    /// Fixed-width string.
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

impl ColumnDef {
    pub fn new(kind: ColumnType) -> Self {
        Self {
            kind: Some(kind),
            length: None,
            precision: None,
            nullable: true,
            default: None,
            fixed: false,
            comment: None,
        }
    }

    /// A column whose type could not be mapped.
    pub fn untyped() -> Self {
        Self {
            kind: None,
            ..Self::new(ColumnType::String)
        }
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Primary,
    Unique,
    Foreign,
}

/// Referential action of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Cascade,
    SetNull,
    NoAction,
    Restrict,
    SetDefault,
}

impl Action {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Action::Cascade => "CASCADE",
            Action::SetNull => "SET NULL",
            Action::NoAction => "NO ACTION",
            Action::Restrict => "RESTRICT",
            Action::SetDefault => "SET DEFAULT",
        }
    }
}

/// Referenced side of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub table: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(rename = "type")]
    pub kind: ConstraintKind,
    pub columns: Vec<String>,
    #[serde(default)]
    pub references: Option<Reference>,
    #[serde(default)]
    pub update: Option<Action>,
    #[serde(default)]
    pub delete: Option<Action>,
}

impl Constraint {
    pub fn primary<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::keyed(ConstraintKind::Primary, columns)
    }

    pub fn unique<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::keyed(ConstraintKind::Unique, columns)
    }

    pub fn foreign(
        columns: Vec<String>,
        table: impl Into<String>,
        referenced: Vec<String>,
        delete: Option<Action>,
    ) -> Self {
        Self {
            kind: ConstraintKind::Foreign,
            columns,
            references: Some(Reference {
                table: table.into(),
                columns: referenced,
            }),
            update: Some(Action::SetNull),
            delete,
        }
    }

    fn keyed<I, S>(kind: ConstraintKind, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            columns: columns.into_iter().map(Into::into).collect(),
            references: None,
            update: None,
            delete: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    #[default]
    Index,
    Fulltext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDef {
    #[serde(rename = "type", default)]
    pub kind: IndexKind,
    pub columns: Vec<String>,
}

/// A table description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    #[serde(default)]
    pub columns: IndexMap<String, ColumnDef>,
    #[serde(default)]
    pub constraints: IndexMap<String, Constraint>,
    #[serde(default)]
    pub indexes: IndexMap<String, IndexDef>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_column(&mut self, name: impl Into<String>, column: ColumnDef) -> &mut Self {
        self.columns.insert(name.into(), column);
        self
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.get(name)
    }

    /// Add or replace a constraint, keeping its original position on replace.
    pub fn add_constraint(&mut self, name: impl Into<String>, constraint: Constraint) -> &mut Self {
        self.constraints.insert(name.into(), constraint);
        self
    }

    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.get(name)
    }

    pub fn add_index(&mut self, name: impl Into<String>, index: IndexDef) -> &mut Self {
        self.indexes.insert(name.into(), index);
        self
    }

    pub fn index(&self, name: &str) -> Option<&IndexDef> {
        self.indexes.get(name)
    }

    pub fn primary_key(&self) -> Option<&[String]> {
        self.constraints
            .values()
            .find(|c| c.kind == ConstraintKind::Primary)
            .map(|c| c.columns.as_slice())
    }
}

/// A catalog query with its named binds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogQuery {
    pub sql: String,
    pub params: Vec<(String, Value)>,
}

impl CatalogQuery {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.push((name.to_string(), value.into()));
        self
    }
}
