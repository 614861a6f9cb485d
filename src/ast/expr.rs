use serde::{Deserialize, Serialize};

use super::values::Value;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    IsNull,
    IsNotNull,
}

impl Operator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "<>",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Like => "LIKE",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
        }
    }

    /// Unary operators take no right-hand side.
    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }
}

/// An expression inside a clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Column or alias reference, quoted and shortened on emission.
    Column(String),
    /// Scalar value, emitted as a bound placeholder.
    Value(Value),
    /// Verbatim SQL.
    Raw(String),
    /// `left op right`
    Compare {
        left: Box<Expr>,
        op: Operator,
        right: Box<Expr>,
    },
    /// `NAME(args)`
    Function { name: String, args: Vec<Expr> },
}

impl Expr {
    pub fn col(name: impl Into<String>) -> Self {
        Expr::Column(name.into())
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(sql.into())
    }

    pub fn val(value: impl Into<Value>) -> Self {
        Expr::Value(value.into())
    }

    pub fn compare(left: Expr, op: Operator, right: Expr) -> Self {
        Expr::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// `column op value`, the common filter shape.
    pub fn filter(column: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        Self::compare(Expr::col(column), op, Expr::val(value))
    }

    pub fn func(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

/// One projected item of a SELECT list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectItem {
    pub expr: Expr,
    #[serde(default)]
    pub alias: Option<String>,
}

impl SelectItem {
    pub fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    pub fn aliased(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

/// A table in FROM or JOIN position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
}

impl JoinKind {
    pub fn as_sql(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    #[serde(default)]
    pub kind: JoinKind,
    pub table: TableRef,
    #[serde(default)]
    pub on: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub expr: Expr,
    #[serde(default)]
    pub order: SortOrder,
}

/// Trailing SQL appended after the query body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Epilog {
    Sql(String),
    Expr(Expr),
}
