//! Multi-row INSERT rewriting.
//!
//! Oracle has no `VALUES (..), (..)` list. A multi-row insert becomes an
//! `INSERT INTO t (cols) SELECT .. FROM DUAL UNION ALL SELECT .. FROM DUAL`.

use tracing::debug;

use crate::ast::*;
use crate::binder::ValueBinder;
use crate::error::{OracleError, OracleResult};

/// Build the UNION ALL of `SELECT .. FROM DUAL` branches that stands in for
/// the literal rows of a multi-row insert.
///
/// Returns `None` for single-row inserts and inserts already fed by a
/// sub-select. The query itself is never modified, so every compilation binds
/// its scalars afresh through `binder`, in row order. Short rows are padded
/// with `NULL`.
pub fn rewrite_multi_insert(
    values: &InsertValues,
    binder: &mut ValueBinder,
) -> OracleResult<Option<Query>> {
    if values.rows.len() <= 1 || values.query.is_some() {
        return Ok(None);
    }

    let mut branches = Vec::with_capacity(values.rows.len());
    for (index, row) in values.rows.iter().enumerate() {
        if row.len() > values.columns.len() {
            return Err(OracleError::ShapeMismatch {
                row: index,
                columns: values.columns.len(),
                values: row.len(),
            });
        }

        let select = values
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let expr = match row.get(i) {
                    None | Some(Expr::Value(Value::Null)) => Expr::raw("NULL"),
                    Some(Expr::Value(value)) => Expr::Raw(binder.placeholder(value.clone())),
                    Some(expr) => expr.clone(),
                };
                SelectItem::aliased(expr, column.clone())
            })
            .collect();

        branches.push(Query {
            select,
            from: vec![TableRef::new("DUAL")],
            ..Query::default()
        });
    }

    let mut branches = branches.into_iter();
    let Some(mut source) = branches.next() else {
        return Ok(None);
    };
    source.union = branches.map(|query| Union { all: true, query }).collect();

    debug!(
        "Rewrote {}-row insert into {} as UNION ALL",
        values.rows.len(),
        values.table
    );
    Ok(Some(source))
}
