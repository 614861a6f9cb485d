//! Clause-by-clause SQL assembly with ROWNUM pagination.
//!
//! Oracle before 12c has no OFFSET/FETCH, so limit and offset are emulated
//! by wrapping the query body in row-numbering subqueries. The `offset` and
//! `limit` parts are emitted *before* `select` and open the wrappers; their
//! closing text is stashed in the query's [`PaginationWrap`] and appended by
//! the `epilog` part.
//!
//! [`PaginationWrap`]: crate::ast::PaginationWrap

use std::cell::Cell;

use serde::Serialize;
use tracing::debug;

use super::{OracleDialect, SqlDialect, rewrite_multi_insert};
use crate::ast::*;
use crate::binder::{Binding, ValueBinder};
use crate::error::{OracleError, OracleResult};

/// Row-number column added by the offset wrapper.
pub const ROW_NUMBER_COLUMN: &str = "QAIL_RNUM";

/// Bind name of the highest row number to fetch.
pub const MAX_ROW_BIND: &str = "QAIL_MAX_ROW_TO_FETCH";

/// Bind name of the number of rows to skip.
pub const OFFSET_BIND: &str = "QAIL_FETCH_OFFSET";

/// Bind names used by one set of pagination wrappers.
struct PageBinds {
    max_row: String,
    offset: String,
}

impl PageBinds {
    fn outer() -> Self {
        Self {
            max_row: MAX_ROW_BIND.to_string(),
            offset: OFFSET_BIND.to_string(),
        }
    }

    /// Names for the `n`th paginated union branch of a statement.
    fn branch(n: usize) -> Self {
        Self {
            max_row: format!("{}_{}", MAX_ROW_BIND, n),
            offset: format!("{}_{}", OFFSET_BIND, n),
        }
    }
}

/// Clauses of a SELECT, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Offset,
    Limit,
    Select,
    From,
    Join,
    Where,
    Group,
    Having,
    Order,
    Union,
    Epilog,
}

const SELECT_PARTS: [Part; 11] = [
    Part::Offset,
    Part::Limit,
    Part::Select,
    Part::From,
    Part::Join,
    Part::Where,
    Part::Group,
    Part::Having,
    Part::Order,
    Part::Union,
    Part::Epilog,
];

/// Output of a compilation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub sql: String,
    pub bindings: Vec<Binding>,
    pub kind: QueryKind,
    /// The result carries the synthetic row-number column as its last field.
    pub row_number_column: bool,
    /// Results may be buffered in memory by the statement.
    pub buffered: bool,
}

/// Compiles queries against one [`OracleDialect`].
pub struct OracleCompiler<'a> {
    dialect: &'a OracleDialect,
    paged_branches: Cell<usize>,
}

impl<'a> OracleCompiler<'a> {
    pub fn new(dialect: &'a OracleDialect) -> Self {
        Self {
            dialect,
            paged_branches: Cell::new(0),
        }
    }

    pub fn compile(&self, query: &mut Query) -> OracleResult<CompiledQuery> {
        let mut binder = ValueBinder::new();
        let sql = match query.kind {
            QueryKind::Select => self.build_select(query, &mut binder)?,
            QueryKind::Insert => self.build_insert(query, &mut binder)?,
            QueryKind::Update => self.build_update(query, &mut binder)?,
            QueryKind::Delete => self.build_delete(query, &mut binder)?,
        };
        debug!("Compiled {} query: {}", query.kind, sql);

        Ok(CompiledQuery {
            sql,
            bindings: binder.into_bindings(),
            kind: query.kind,
            row_number_column: query.kind == QueryKind::Select && query.offset_value() > 0,
            buffered: query.buffered && query.kind == QueryKind::Select,
        })
    }

    /// Build a SELECT, pagination wrappers included.
    pub fn build_select(&self, query: &mut Query, binder: &mut ValueBinder) -> OracleResult<String> {
        self.build_paged_select(query, binder, &PageBinds::outer())
    }

    fn build_paged_select(
        &self,
        query: &mut Query,
        binder: &mut ValueBinder,
        binds: &PageBinds,
    ) -> OracleResult<String> {
        query.wrap.reset();
        let mut sql = String::new();
        for part in SELECT_PARTS {
            let text = match part {
                Part::Offset => self.build_offset_part(query, binder, binds),
                Part::Limit => self.build_limit_part(query, binder, binds),
                Part::Select => self.build_select_part(query, binder),
                Part::From => self.build_from_part(query),
                Part::Join => self.build_join_part(query, binder),
                Part::Where => self.build_conditions(" WHERE", &query.filter, binder),
                Part::Group => self.build_list(" GROUP BY", &query.group, binder),
                Part::Having => self.build_conditions(" HAVING", &query.having, binder),
                Part::Order => self.build_order_part(query, binder),
                Part::Union => self.build_union_part(query, binder)?,
                Part::Epilog => self.build_epilog_part(query, binder),
            };
            sql.push_str(&text);
        }
        Ok(sql)
    }

    fn build_offset_part(&self, query: &mut Query, binder: &mut ValueBinder, binds: &PageBinds) -> String {
        let offset = query.offset_value();
        if offset < 1 {
            return String::new();
        }

        binder.bind(&binds.offset, Value::from(offset));
        if query.limit_value() > 0 {
            // the limit wrapper numbers the rows
            query
                .wrap
                .set_offset_wrap(format!(") WHERE {} > :{}", ROW_NUMBER_COLUMN, binds.offset));
            "SELECT * FROM (".to_string()
        } else {
            query
                .wrap
                .set_offset_wrap(format!(") a) WHERE {} > :{}", ROW_NUMBER_COLUMN, binds.offset));
            format!("SELECT * FROM (SELECT a.*, ROWNUM {} FROM (", ROW_NUMBER_COLUMN)
        }
    }

    fn build_limit_part(&self, query: &mut Query, binder: &mut ValueBinder, binds: &PageBinds) -> String {
        let limit = query.limit_value();
        if limit < 1 {
            return String::new();
        }

        let offset = query.offset_value();
        let end_row = offset.saturating_add(limit);
        binder.bind(&binds.max_row, Value::from(end_row));
        query
            .wrap
            .set_limit_wrap(format!(") a WHERE ROWNUM <= :{}", binds.max_row));

        if offset > 0 {
            format!(
                "SELECT /*+ FIRST_ROWS({}) */ a.*, ROWNUM {} FROM (",
                end_row, ROW_NUMBER_COLUMN
            )
        } else {
            format!("SELECT /*+ FIRST_ROWS({}) */ a.* FROM (", end_row)
        }
    }

    fn build_select_part(&self, query: &Query, binder: &mut ValueBinder) -> String {
        let mut sql = String::from("SELECT ");
        if query.distinct {
            sql.push_str("DISTINCT ");
        }
        if query.select.is_empty() {
            sql.push('*');
            return sql;
        }
        let items: Vec<String> = query
            .select
            .iter()
            .map(|item| {
                let expr = self.build_expr(&item.expr, binder);
                match &item.alias {
                    Some(alias) => format!("{} AS {}", expr, self.dialect.quote_identifier(alias)),
                    None => expr,
                }
            })
            .collect();
        sql.push_str(&items.join(", "));
        sql
    }

    fn table_sql(&self, table: &TableRef) -> String {
        // Oracle rejects AS before a table alias
        match &table.alias {
            Some(alias) => format!(
                "{} {}",
                self.dialect.quote_identifier(&table.name),
                self.dialect.quote_identifier(alias)
            ),
            None => self.dialect.quote_identifier(&table.name),
        }
    }

    fn build_from_part(&self, query: &Query) -> String {
        if query.from.is_empty() {
            return String::new();
        }
        let tables: Vec<String> = query.from.iter().map(|t| self.table_sql(t)).collect();
        format!(" FROM {}", tables.join(", "))
    }

    fn build_join_part(&self, query: &Query, binder: &mut ValueBinder) -> String {
        let mut sql = String::new();
        for join in &query.join {
            sql.push(' ');
            sql.push_str(join.kind.as_sql());
            sql.push(' ');
            sql.push_str(&self.table_sql(&join.table));
            if !join.on.is_empty() {
                sql.push_str(&self.build_conditions(" ON", &join.on, binder));
            }
        }
        sql
    }

    /// `<keyword> a AND b`, empty when there are no conditions.
    fn build_conditions(&self, keyword: &str, conditions: &[Expr], binder: &mut ValueBinder) -> String {
        if conditions.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = conditions
            .iter()
            .map(|c| self.build_expr(c, binder))
            .collect();
        format!("{} {}", keyword, parts.join(" AND "))
    }

    fn build_list(&self, keyword: &str, exprs: &[Expr], binder: &mut ValueBinder) -> String {
        if exprs.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = exprs.iter().map(|e| self.build_expr(e, binder)).collect();
        format!("{} {}", keyword, parts.join(", "))
    }

    fn build_order_part(&self, query: &Query, binder: &mut ValueBinder) -> String {
        if query.order.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = query
            .order
            .iter()
            .map(|o| {
                let dir = match o.order {
                    SortOrder::Asc => "ASC",
                    SortOrder::Desc => "DESC",
                };
                format!("{} {}", self.build_expr(&o.expr, binder), dir)
            })
            .collect();
        format!(" ORDER BY {}", parts.join(", "))
    }

    fn build_union_part(&self, query: &mut Query, binder: &mut ValueBinder) -> OracleResult<String> {
        let mut sql = String::new();
        for union in query.union.iter_mut() {
            sql.push_str(if union.all { " UNION ALL " } else { " UNION " });
            sql.push_str(&self.build_union_branch(&mut union.query, binder)?);
        }
        Ok(sql)
    }

    /// A paginated branch gets its own bind names. With an offset its
    /// row-number column is projected away so every branch keeps the same
    /// column count.
    fn build_union_branch(&self, query: &mut Query, binder: &mut ValueBinder) -> OracleResult<String> {
        if query.limit_value() < 1 && query.offset_value() < 1 {
            return self.build_select(query, binder);
        }

        let n = self.paged_branches.get() + 1;
        self.paged_branches.set(n);
        let projection = if query.offset_value() > 0 {
            Some(self.branch_projection(query)?)
        } else {
            None
        };

        let sql = self.build_paged_select(query, binder, &PageBinds::branch(n))?;
        Ok(match projection {
            Some(columns) => format!("SELECT {} FROM ({})", columns, sql),
            None => sql,
        })
    }

    /// Output column names of a branch's select list.
    fn branch_projection(&self, query: &Query) -> OracleResult<String> {
        let no_names = || {
            OracleError::unsupported("OFFSET on a UNION branch without named select items")
        };
        if query.select.is_empty() {
            return Err(no_names());
        }
        let names = query
            .select
            .iter()
            .map(|item| match (&item.alias, &item.expr) {
                (Some(alias), _) => Ok(self.dialect.quote_identifier(alias)),
                (None, Expr::Column(name)) => {
                    let column = name.rsplit('.').next().unwrap_or(name.as_str());
                    if column.is_empty()
                        || !column.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        return Err(no_names());
                    }
                    Ok(self.dialect.quote_identifier(column))
                }
                _ => Err(no_names()),
            })
            .collect::<OracleResult<Vec<_>>>()?;
        Ok(names.join(", "))
    }

    /// User epilog, then the closing text of whichever wrappers are still live.
    fn build_epilog_part(&self, query: &Query, binder: &mut ValueBinder) -> String {
        let mut sql = match &query.epilog {
            Some(Epilog::Sql(text)) => format!(" {}", text),
            Some(Epilog::Expr(expr)) => format!(" {}", self.build_expr(expr, binder)),
            None => String::new(),
        };
        sql.push_str(
            &query
                .wrap
                .closing(query.limit_value(), query.offset_value()),
        );
        sql
    }

    fn build_insert(&self, query: &mut Query, binder: &mut ValueBinder) -> OracleResult<String> {
        let values = query
            .values
            .as_mut()
            .ok_or_else(|| OracleError::invalid("INSERT without a values clause"))?;
        if values.table.is_empty() {
            return Err(OracleError::invalid("INSERT without a target table"));
        }

        let columns: Vec<String> = values
            .columns
            .iter()
            .map(|c| self.dialect.quote_identifier(c))
            .collect();
        let mut sql = format!(
            "INSERT INTO {} ({})",
            self.dialect.quote_identifier(&values.table),
            columns.join(", ")
        );

        if let Some(mut source) = rewrite_multi_insert(values, binder)? {
            sql.push(' ');
            sql.push_str(&self.build_select(&mut source, binder)?);
            return Ok(sql);
        }
        if let Some(source) = values.query.as_mut() {
            sql.push(' ');
            sql.push_str(&self.build_select(source, binder)?);
            return Ok(sql);
        }

        let [row] = values.rows.as_slice() else {
            return Err(OracleError::invalid("INSERT without rows or a source query"));
        };
        if row.len() > values.columns.len() {
            return Err(OracleError::ShapeMismatch {
                row: 0,
                columns: values.columns.len(),
                values: row.len(),
            });
        }
        let mut items: Vec<String> = row.iter().map(|e| self.build_expr(e, binder)).collect();
        items.resize(values.columns.len(), "NULL".to_string());
        sql.push_str(&format!(" VALUES ({})", items.join(", ")));
        Ok(sql)
    }

    fn build_update(&self, query: &Query, binder: &mut ValueBinder) -> OracleResult<String> {
        let update = query
            .update
            .as_ref()
            .ok_or_else(|| OracleError::invalid("UPDATE without a target table"))?;
        if update.set.is_empty() {
            return Err(OracleError::invalid("UPDATE without assignments"));
        }

        let assignments: Vec<String> = update
            .set
            .iter()
            .map(|a| {
                format!(
                    "{} = {}",
                    self.dialect.quote_identifier(&a.column),
                    self.build_expr(&a.value, binder)
                )
            })
            .collect();

        let mut sql = format!(
            "UPDATE {} SET {}",
            self.dialect.quote_identifier(&update.table),
            assignments.join(", ")
        );
        sql.push_str(&self.build_conditions(" WHERE", &query.filter, binder));
        Ok(sql)
    }

    fn build_delete(&self, query: &Query, binder: &mut ValueBinder) -> OracleResult<String> {
        let table = query
            .from
            .first()
            .ok_or_else(|| OracleError::invalid("DELETE without a target table"))?;
        let mut sql = format!("DELETE FROM {}", self.table_sql(table));
        sql.push_str(&self.build_conditions(" WHERE", &query.filter, binder));
        Ok(sql)
    }

    /// Render an expression; scalars become placeholders, NULL stays literal.
    pub fn build_expr(&self, expr: &Expr, binder: &mut ValueBinder) -> String {
        match expr {
            Expr::Column(name) => self.dialect.quote_identifier(name),
            Expr::Value(Value::Null) => "NULL".to_string(),
            Expr::Value(value) => binder.placeholder(value.clone()),
            Expr::Raw(sql) => sql.clone(),
            Expr::Compare { left, op, right } => {
                let left = self.build_expr(left, binder);
                if op.is_unary() {
                    format!("{} {}", left, op.as_sql())
                } else {
                    format!("{} {} {}", left, op.as_sql(), self.build_expr(right, binder))
                }
            }
            Expr::Function { name, args } => {
                let args: Vec<String> = args.iter().map(|a| self.build_expr(a, binder)).collect();
                format!("{}({})", name, args.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::BindKey;
    use pretty_assertions::assert_eq;

    fn compile(query: &mut Query) -> CompiledQuery {
        OracleDialect::default().compile(query).unwrap()
    }

    fn articles() -> Query {
        Query::select(["id", "title"]).from("articles")
    }

    fn named(bindings: &[Binding], name: &str) -> Option<Value> {
        bindings
            .iter()
            .find(|b| b.key == BindKey::Named(name.to_string()))
            .map(|b| b.value.clone())
    }

    #[test]
    fn test_plain_select() {
        let mut q = articles()
            .filter(Expr::filter("published", Operator::Eq, "Y"))
            .order_by("id", SortOrder::Asc);
        let compiled = compile(&mut q);
        assert_eq!(
            compiled.sql,
            "SELECT \"id\", \"title\" FROM \"articles\" WHERE \"published\" = :c0 ORDER BY \"id\" ASC"
        );
        assert_eq!(compiled.bindings.len(), 1);
        assert!(!compiled.row_number_column);
        assert!(q.pagination_wrap().is_empty());
    }

    #[test]
    fn test_limit_only() {
        let mut q = articles().limit(5);
        let compiled = compile(&mut q);
        assert_eq!(
            compiled.sql,
            "SELECT /*+ FIRST_ROWS(5) */ a.* FROM (SELECT \"id\", \"title\" FROM \"articles\") a WHERE ROWNUM <= :QAIL_MAX_ROW_TO_FETCH"
        );
        assert_eq!(named(&compiled.bindings, MAX_ROW_BIND), Some(Value::Int(5)));
        assert_eq!(named(&compiled.bindings, OFFSET_BIND), None);
        assert!(!compiled.row_number_column);
    }

    #[test]
    fn test_offset_only() {
        let mut q = articles().offset(10);
        let compiled = compile(&mut q);
        assert_eq!(
            compiled.sql,
            "SELECT * FROM (SELECT a.*, ROWNUM QAIL_RNUM FROM (SELECT \"id\", \"title\" FROM \"articles\") a) WHERE QAIL_RNUM > :QAIL_FETCH_OFFSET"
        );
        assert_eq!(named(&compiled.bindings, OFFSET_BIND), Some(Value::Int(10)));
        assert!(compiled.row_number_column);
    }

    #[test]
    fn test_limit_and_offset() {
        let mut q = articles().limit(5).offset(10);
        let compiled = compile(&mut q);
        assert_eq!(
            compiled.sql,
            "SELECT * FROM (SELECT /*+ FIRST_ROWS(15) */ a.*, ROWNUM QAIL_RNUM FROM (SELECT \"id\", \"title\" FROM \"articles\") a WHERE ROWNUM <= :QAIL_MAX_ROW_TO_FETCH) WHERE QAIL_RNUM > :QAIL_FETCH_OFFSET"
        );
        assert_eq!(named(&compiled.bindings, MAX_ROW_BIND), Some(Value::Int(15)));
        assert_eq!(named(&compiled.bindings, OFFSET_BIND), Some(Value::Int(10)));
    }

    #[test]
    fn test_user_epilog_precedes_closing() {
        let mut q = articles().limit(1).epilog("FOR UPDATE");
        let compiled = compile(&mut q);
        assert!(compiled
            .sql
            .ends_with("FROM \"articles\" FOR UPDATE) a WHERE ROWNUM <= :QAIL_MAX_ROW_TO_FETCH"));
    }

    #[test]
    fn test_recompile_after_clearing_pagination() {
        let mut q = articles().limit(5).offset(10);
        compile(&mut q);
        q.clear_pagination();
        let compiled = compile(&mut q);
        assert_eq!(compiled.sql, "SELECT \"id\", \"title\" FROM \"articles\"");
        assert!(compiled.bindings.is_empty());
        assert!(q.pagination_wrap().is_empty());
    }

    #[test]
    fn test_zero_values_do_not_wrap() {
        let mut q = articles().limit(0).offset(0);
        let compiled = compile(&mut q);
        assert_eq!(compiled.sql, "SELECT \"id\", \"title\" FROM \"articles\"");
    }

    #[test]
    fn test_join_and_aliases() {
        let mut q = Query::default()
            .select_expr(Expr::col("a.id"), Some("Articles__id"))
            .from_as("articles", "a")
            .join(
                JoinKind::Left,
                TableRef::aliased("authors", "u"),
                vec![Expr::compare(Expr::col("u.id"), Operator::Eq, Expr::col("a.author_id"))],
            );
        let compiled = compile(&mut q);
        assert_eq!(
            compiled.sql,
            "SELECT \"a\".\"id\" AS \"Articles__id\" FROM \"articles\" \"a\" LEFT JOIN \"authors\" \"u\" ON \"u\".\"id\" = \"a\".\"author_id\""
        );
    }

    #[test]
    fn test_long_alias_is_shortened() {
        let dialect = OracleDialect::default();
        let mut q = Query::default()
            .select_expr(Expr::col("title"), Some("Articles__a_really_long_field_name"))
            .from("articles");
        let compiled = dialect.compile(&mut q).unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT \"title\" AS \"XXAUTO_SHORTENED_ID1\" FROM \"articles\""
        );
    }

    #[test]
    fn test_union_shares_placeholders() {
        let mut q = articles()
            .filter(Expr::filter("id", Operator::Gt, 1))
            .union_all(articles().filter(Expr::filter("id", Operator::Lt, 0)));
        let compiled = compile(&mut q);
        assert_eq!(
            compiled.sql,
            "SELECT \"id\", \"title\" FROM \"articles\" WHERE \"id\" > :c0 UNION ALL SELECT \"id\", \"title\" FROM \"articles\" WHERE \"id\" < :c1"
        );
    }

    #[test]
    fn test_limited_union_branch_keeps_outer_window() {
        let mut q = Query::select(["id"])
            .from("articles")
            .union_all(Query::select(["id"]).from("drafts").limit(2))
            .limit(5)
            .offset(10);
        let compiled = compile(&mut q);
        assert_eq!(
            compiled.sql,
            "SELECT * FROM (SELECT /*+ FIRST_ROWS(15) */ a.*, ROWNUM QAIL_RNUM FROM (\
             SELECT \"id\" FROM \"articles\" UNION ALL \
             SELECT /*+ FIRST_ROWS(2) */ a.* FROM (SELECT \"id\" FROM \"drafts\") a WHERE ROWNUM <= :QAIL_MAX_ROW_TO_FETCH_1\
             ) a WHERE ROWNUM <= :QAIL_MAX_ROW_TO_FETCH) WHERE QAIL_RNUM > :QAIL_FETCH_OFFSET"
        );
        assert_eq!(named(&compiled.bindings, MAX_ROW_BIND), Some(Value::Int(15)));
        assert_eq!(named(&compiled.bindings, OFFSET_BIND), Some(Value::Int(10)));
        assert_eq!(
            named(&compiled.bindings, "QAIL_MAX_ROW_TO_FETCH_1"),
            Some(Value::Int(2))
        );
        assert!(compiled.row_number_column);
    }

    #[test]
    fn test_offset_union_branch_drops_row_number() {
        let mut q = Query::select(["id"])
            .from("articles")
            .union_all(Query::select(["d.id"]).from_as("drafts", "d").offset(3));
        let compiled = compile(&mut q);
        assert_eq!(
            compiled.sql,
            "SELECT \"id\" FROM \"articles\" UNION ALL SELECT \"id\" FROM (\
             SELECT * FROM (SELECT a.*, ROWNUM QAIL_RNUM FROM (SELECT \"d\".\"id\" FROM \"drafts\" \"d\") a) \
             WHERE QAIL_RNUM > :QAIL_FETCH_OFFSET_1)"
        );
        assert_eq!(named(&compiled.bindings, "QAIL_FETCH_OFFSET_1"), Some(Value::Int(3)));
        assert_eq!(named(&compiled.bindings, OFFSET_BIND), None);
        assert!(!compiled.row_number_column);
    }

    #[test]
    fn test_sibling_union_branches_bind_separately() {
        let mut q = articles()
            .union_all(articles().limit(2))
            .union_all(articles().limit(7));
        let compiled = compile(&mut q);
        let names: Vec<String> = compiled.bindings.iter().map(|b| b.key.to_string()).collect();
        assert_eq!(
            names,
            vec![":QAIL_MAX_ROW_TO_FETCH_1", ":QAIL_MAX_ROW_TO_FETCH_2"]
        );
        assert_eq!(
            named(&compiled.bindings, "QAIL_MAX_ROW_TO_FETCH_2"),
            Some(Value::Int(7))
        );
    }

    #[test]
    fn test_offset_union_branch_needs_named_columns() {
        let mut q = articles().union_all(Query::default().from("drafts").offset(3));
        let err = OracleDialect::default().compile(&mut q).unwrap_err();
        assert!(matches!(err, OracleError::Unsupported(_)));
    }

    #[test]
    fn test_end_row_saturates() {
        let mut q = articles().limit(u64::MAX).offset(1);
        let compiled = compile(&mut q);
        assert!(compiled.sql.contains(&format!("FIRST_ROWS({})", u64::MAX)));
        assert_eq!(named(&compiled.bindings, MAX_ROW_BIND), Some(Value::Int(i64::MAX)));
        assert_eq!(named(&compiled.bindings, OFFSET_BIND), Some(Value::Int(1)));
    }

    #[test]
    fn test_single_row_insert() {
        let mut q = Query::insert("articles", ["title", "body"]).values(["a", "b"]);
        let compiled = compile(&mut q);
        assert_eq!(
            compiled.sql,
            "INSERT INTO \"articles\" (\"title\", \"body\") VALUES (:c0, :c1)"
        );
        assert!(!compiled.buffered);
    }

    #[test]
    fn test_insert_without_rows_is_invalid() {
        let mut q = Query::insert("articles", ["title"]);
        let err = OracleDialect::default().compile(&mut q).unwrap_err();
        assert!(matches!(err, OracleError::InvalidQuery(_)));
    }

    #[test]
    fn test_update_and_delete() {
        let mut q = Query::update("articles")
            .set("title", "new")
            .filter(Expr::filter("id", Operator::Eq, 3));
        assert_eq!(
            compile(&mut q).sql,
            "UPDATE \"articles\" SET \"title\" = :c0 WHERE \"id\" = :c1"
        );

        let mut q = Query::delete("articles").filter(Expr::compare(
            Expr::col("published"),
            Operator::IsNull,
            Expr::raw(""),
        ));
        assert_eq!(
            compile(&mut q).sql,
            "DELETE FROM \"articles\" WHERE \"published\" IS NULL"
        );
    }

    #[test]
    fn test_select_without_from() {
        let mut q = Query::default().select_expr(Expr::raw("1 + 1"), None);
        assert_eq!(compile(&mut q).sql, "SELECT 1 + 1");
    }
}
