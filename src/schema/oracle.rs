//! Oracle catalog introspection and DDL.

use tracing::{debug, warn};

use super::*;
use crate::ast::{Row, Value};
use crate::error::{OracleError, OracleResult};
use crate::transpiler::{OracleDialect, SqlDialect};

/// Schema reflection and DDL generation for a dialect.
pub trait SchemaDialect {
    /// Query listing the tables visible to the session.
    fn list_tables_sql(&self) -> CatalogQuery;

    fn describe_column_sql(&self, table: &str) -> CatalogQuery;

    fn describe_index_sql(&self, table: &str) -> CatalogQuery;

    fn describe_foreign_key_sql(&self, table: &str) -> CatalogQuery;

    /// Add one column, from one row of the column query.
    fn convert_column_description(&self, table: &mut TableSchema, row: &Row) -> OracleResult<()>;

    /// Merge one row of the index/constraint query into the table.
    fn convert_index_description(&self, table: &mut TableSchema, row: &Row) -> OracleResult<()>;

    fn convert_foreign_key_description(&self, table: &mut TableSchema, row: &Row) -> OracleResult<()>;

    fn column_sql(&self, table: &TableSchema, name: &str) -> OracleResult<String>;

    fn constraint_sql(&self, table: &TableSchema, name: &str) -> OracleResult<String>;

    fn index_sql(&self, table: &TableSchema, name: &str) -> OracleResult<String>;

    fn create_table_sql(&self, table: &TableSchema) -> OracleResult<Vec<String>>;

    fn truncate_table_sql(&self, table: &TableSchema) -> Vec<String>;

    fn add_constraint_sql(&self, table: &TableSchema) -> OracleResult<Vec<String>>;

    fn drop_constraint_sql(&self, table: &TableSchema) -> Vec<String>;

    /// Build a table description from the rows of the three describe queries.
    fn describe(
        &self,
        name: &str,
        columns: &[Row],
        indexes: &[Row],
        foreign_keys: &[Row],
    ) -> OracleResult<TableSchema> {
        let mut table = TableSchema::new(name);
        for row in columns {
            self.convert_column_description(&mut table, row)?;
        }
        for row in indexes {
            self.convert_index_description(&mut table, row)?;
        }
        for row in foreign_keys {
            self.convert_foreign_key_description(&mut table, row)?;
        }
        Ok(table)
    }
}

const COLUMN_FIELDS: &str =
    "SELECT COLUMN_NAME, DATA_TYPE, DATA_LENGTH, DATA_PRECISION, DATA_SCALE, NULLABLE, DATA_DEFAULT";

const INDEX_FIELDS: &str =
    "SELECT cc.table_name, cc.column_name, cc.constraint_name, c.constraint_type, i.index_name, i.uniqueness";

const FOREIGN_KEY_FIELDS: &str = "SELECT cc.column_name, cc.constraint_name, r.owner AS REFERENCED_OWNER, \
     r.table_name AS REFERENCED_TABLE_NAME, r.column_name AS REFERENCED_COLUMN_NAME, c.delete_rule";

/// Oracle schema dialect, borrowing the driver's SQL dialect for quoting.
pub struct OracleSchema<'a> {
    dialect: &'a OracleDialect,
}

impl<'a> OracleSchema<'a> {
    pub fn new(dialect: &'a OracleDialect) -> Self {
        Self { dialect }
    }

    /// Split `schema.table`, falling back to the configured schema. Both parts
    /// are upper-cased; `None` means the session's own schema.
    pub fn table_split(&self, name: &str) -> (String, Option<String>) {
        match name.split_once('.') {
            Some((schema, table)) => (table.to_uppercase(), Some(schema.to_uppercase())),
            None => (
                name.to_uppercase(),
                self.dialect.schema().map(str::to_uppercase),
            ),
        }
    }

    fn quote(&self, identifier: &str) -> String {
        if self.dialect.quotes_identifiers() {
            self.dialect.quote_identifier(identifier)
        } else {
            identifier.to_string()
        }
    }

    fn quote_list(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| self.quote(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn convert_on_clause(rule: &str) -> Action {
        match rule.trim().to_uppercase().as_str() {
            "CASCADE" => Action::Cascade,
            "SET NULL" => Action::SetNull,
            "NO ACTION" => Action::NoAction,
            "RESTRICT" => Action::Restrict,
            _ => Action::SetNull,
        }
    }

    /// Oracle accepts only CASCADE and SET NULL as delete rules.
    fn foreign_on_clause(action: Option<Action>) -> Option<&'static str> {
        match action {
            Some(action @ (Action::Cascade | Action::SetNull)) => Some(action.as_sql()),
            _ => None,
        }
    }

    fn key_sql(&self, prefix: &str, name: &str, constraint: &Constraint) -> OracleResult<String> {
        let columns = self.quote_list(&constraint.columns);
        if constraint.kind != ConstraintKind::Foreign {
            return Ok(format!("{} ({})", prefix, columns));
        }

        let reference = constraint.references.as_ref().ok_or_else(|| {
            OracleError::invalid(format!("Foreign key {} has no referenced table", name))
        })?;
        let mut sql = format!(
            "{} FOREIGN KEY ({}) REFERENCES {} ({})",
            prefix,
            columns,
            self.quote(&reference.table),
            self.quote_list(&reference.columns)
        );
        if let Some(action) = Self::foreign_on_clause(constraint.delete) {
            sql.push_str(" ON DELETE ");
            sql.push_str(action);
        }
        Ok(sql)
    }
}

/// Catalog field lookup. Clients differ on key case, so the exact key is
/// tried first and a case-insensitive match second.
fn field<'r>(row: &'r Row, name: &str) -> Option<&'r Value> {
    row.get(name)
        .or_else(|| {
            row.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v)
        })
        .filter(|v| !v.is_null())
}

fn required_str<'r>(row: &'r Row, name: &str) -> OracleResult<&'r str> {
    field(row, name)
        .and_then(Value::as_str)
        .ok_or_else(|| OracleError::Database(format!("Catalog row is missing {}", name)))
}

fn int_field(row: &Row, name: &str) -> Option<u32> {
    field(row, name)
        .and_then(Value::as_i64)
        .and_then(|n| u32::try_from(n).ok())
}

impl SchemaDialect for OracleSchema<'_> {
    fn list_tables_sql(&self) -> CatalogQuery {
        let column = if self.dialect.quotes_identifiers() {
            "table_name"
        } else {
            "LOWER(table_name)"
        };
        match self.dialect.schema() {
            None => CatalogQuery::new(format!("SELECT {} FROM sys.user_tables", column)),
            Some(schema) => CatalogQuery::new(format!(
                "SELECT {} FROM sys.all_tables WHERE owner = :bindOwner",
                column
            ))
            .bind("bindOwner", schema.to_uppercase()),
        }
    }

    fn describe_column_sql(&self, name: &str) -> CatalogQuery {
        let (table, schema) = self.table_split(name);
        match schema {
            None => CatalogQuery::new(format!(
                "{} FROM user_tab_columns WHERE table_name = :bindTable",
                COLUMN_FIELDS
            ))
            .bind("bindTable", table),
            Some(schema) => CatalogQuery::new(format!(
                "{} FROM all_tab_columns WHERE table_name = :bindTable AND owner = :bindOwner",
                COLUMN_FIELDS
            ))
            .bind("bindTable", table)
            .bind("bindOwner", schema),
        }
    }

    fn describe_index_sql(&self, name: &str) -> CatalogQuery {
        let (table, schema) = self.table_split(name);
        match schema {
            None => CatalogQuery::new(format!(
                "{} FROM user_cons_columns cc \
                 LEFT JOIN user_indexes i ON(i.index_name = cc.constraint_name) \
                 LEFT JOIN user_constraints c ON(c.constraint_name = cc.constraint_name) \
                 WHERE cc.table_name = :bindTable",
                INDEX_FIELDS
            ))
            .bind("bindTable", table),
            Some(schema) => CatalogQuery::new(format!(
                "{} FROM all_cons_columns cc \
                 LEFT JOIN all_indexes i ON(i.index_name = cc.constraint_name AND cc.owner = i.owner) \
                 LEFT JOIN all_constraints c ON(c.constraint_name = cc.constraint_name AND c.owner = cc.owner) \
                 WHERE cc.table_name = :bindTable AND cc.owner = :bindOwner",
                INDEX_FIELDS
            ))
            .bind("bindTable", table)
            .bind("bindOwner", schema),
        }
    }

    fn describe_foreign_key_sql(&self, name: &str) -> CatalogQuery {
        let (table, schema) = self.table_split(name);
        match schema {
            None => CatalogQuery::new(format!(
                "{} FROM user_cons_columns cc \
                 JOIN user_constraints c ON(c.constraint_name = cc.constraint_name) \
                 JOIN user_cons_columns r ON(r.constraint_name = c.r_constraint_name) \
                 WHERE c.constraint_type = 'R' AND cc.table_name = :bindTable",
                FOREIGN_KEY_FIELDS
            ))
            .bind("bindTable", table),
            Some(schema) => CatalogQuery::new(format!(
                "{} FROM all_cons_columns cc \
                 JOIN all_constraints c ON(c.constraint_name = cc.constraint_name AND c.owner = cc.owner) \
                 JOIN all_cons_columns r ON(r.constraint_name = c.r_constraint_name AND r.owner = c.r_owner) \
                 WHERE c.constraint_type = 'R' AND cc.table_name = :bindTable AND cc.owner = :bindOwner",
                FOREIGN_KEY_FIELDS
            ))
            .bind("bindTable", table)
            .bind("bindOwner", schema),
        }
    }

    fn convert_column_description(&self, table: &mut TableSchema, row: &Row) -> OracleResult<()> {
        let name = required_str(row, "COLUMN_NAME")?.to_lowercase();
        let data_type = required_str(row, "DATA_TYPE")?;
        let length = int_field(row, "DATA_LENGTH");
        let precision = int_field(row, "DATA_PRECISION");
        let scale = int_field(row, "DATA_SCALE").unwrap_or(0);

        let mut column = match data_type {
            "DATE" => ColumnDef::new(ColumnType::DateTime),
            "TIMESTAMP" | "TIMESTAMP(6)" | "TIMESTAMP(9)" => ColumnDef::new(ColumnType::Timestamp),
            "NUMBER" => match precision {
                None => ColumnDef {
                    length,
                    ..ColumnDef::new(ColumnType::Decimal)
                },
                Some(1) => ColumnDef::new(ColumnType::Boolean),
                Some(p) if scale > 0 => ColumnDef::new(ColumnType::Decimal).length(p).precision(scale),
                Some(p) => ColumnDef::new(ColumnType::Integer).length(p),
            },
            "FLOAT" => ColumnDef {
                length: precision,
                ..ColumnDef::new(ColumnType::Decimal)
            },
            "CHAR" | "VARCHAR2" | "NVARCHAR2" | "CLOB" => ColumnDef {
                length,
                ..ColumnDef::new(ColumnType::String)
            },
            "LONG" => ColumnDef::new(ColumnType::String),
            "LONG RAW" => ColumnDef::new(ColumnType::Binary),
            "RAW" | "BLOB" => ColumnDef {
                length,
                ..ColumnDef::new(ColumnType::Binary)
            },
            other => {
                warn!("No column type mapping for {} ({}.{})", other, table.name, name);
                ColumnDef::untyped()
            }
        };

        column.nullable = field(row, "NULLABLE").and_then(Value::as_str) == Some("Y");
        column.default = field(row, "DATA_DEFAULT").cloned();
        table.add_column(name, column);
        Ok(())
    }

    fn convert_index_description(&self, table: &mut TableSchema, row: &Row) -> OracleResult<()> {
        let (name, kind) = match field(row, "CONSTRAINT_TYPE").and_then(Value::as_str) {
            Some("P") => (PRIMARY_KEY_NAME.to_string(), ConstraintKind::Primary),
            Some("U") => (
                required_str(row, "CONSTRAINT_NAME")?.to_string(),
                ConstraintKind::Unique,
            ),
            // check and reference constraints are not reflected here
            _ => return Ok(()),
        };
        let column = required_str(row, "COLUMN_NAME")?.to_lowercase();

        match table.constraints.get_mut(&name) {
            Some(existing) => existing.columns.push(column),
            None => {
                let constraint = match kind {
                    ConstraintKind::Primary => Constraint::primary([column]),
                    _ => Constraint::unique([column]),
                };
                table.add_constraint(name, constraint);
            }
        }
        Ok(())
    }

    fn convert_foreign_key_description(&self, table: &mut TableSchema, row: &Row) -> OracleResult<()> {
        let name = required_str(row, "CONSTRAINT_NAME")?;
        let reference = format!(
            "{}.{}",
            required_str(row, "REFERENCED_OWNER")?,
            required_str(row, "REFERENCED_TABLE_NAME")?
        );
        let delete = field(row, "DELETE_RULE")
            .and_then(Value::as_str)
            .map(Self::convert_on_clause)
            .unwrap_or(Action::SetNull);

        let constraint = Constraint::foreign(
            vec![required_str(row, "COLUMN_NAME")?.to_lowercase()],
            reference,
            vec![required_str(row, "REFERENCED_COLUMN_NAME")?.to_lowercase()],
            Some(delete),
        );
        debug!("Reflected foreign key {} on {}", name, table.name);
        table.add_constraint(name, constraint);
        Ok(())
    }

    fn column_sql(&self, table: &TableSchema, name: &str) -> OracleResult<String> {
        let column = table
            .column(name)
            .ok_or_else(|| OracleError::invalid(format!("Unknown column {}", name)))?;
        let mut out = self.quote(name);

        let kind = column
            .kind
            .ok_or_else(|| OracleError::UnsupportedType("untyped".to_string()))?;
        let mut length = column.length;
        out.push_str(match kind {
            ColumnType::Integer | ColumnType::BigInteger | ColumnType::Boolean => " NUMBER",
            ColumnType::Binary => " BLOB",
            ColumnType::Float => " FLOAT",
            ColumnType::Decimal => " NUMBER",
            ColumnType::Text => " CLOB",
            ColumnType::Date | ColumnType::Time | ColumnType::DateTime => " DATE",
            ColumnType::Timestamp => " TIMESTAMP(6)",
            ColumnType::Uuid => " VARCHAR2(36)",
            ColumnType::String => {
                length = length.or(Some(255));
                if column.fixed { " CHAR" } else { " VARCHAR2" }
            }
            ColumnType::Json => return Err(OracleError::UnsupportedType(kind.to_string())),
        });

        match kind {
            ColumnType::Integer | ColumnType::String => {
                if let Some(length) = length {
                    out.push_str(&format!("({})", length));
                }
            }
            ColumnType::Float | ColumnType::Decimal
                if column.length.is_some() || column.precision.is_some() =>
            {
                out.push_str(&format!(
                    "({},{})",
                    column.length.unwrap_or(0),
                    column.precision.unwrap_or(0)
                ));
            }
            _ => {}
        }

        if !column.nullable {
            out.push_str(" NOT NULL");
        }
        if let Some(default) = &column.default {
            out.push_str(" DEFAULT ");
            out.push_str(&self.dialect.value_literal(default));
        }
        Ok(out)
    }

    fn constraint_sql(&self, table: &TableSchema, name: &str) -> OracleResult<String> {
        let constraint = table
            .constraint(name)
            .ok_or_else(|| OracleError::invalid(format!("Unknown constraint {}", name)))?;
        let prefix = match constraint.kind {
            ConstraintKind::Primary => "PRIMARY KEY".to_string(),
            ConstraintKind::Unique => format!("CONSTRAINT {} UNIQUE", self.quote(name)),
            ConstraintKind::Foreign => format!("CONSTRAINT {}", self.quote(name)),
        };
        self.key_sql(&prefix, name, constraint)
    }

    fn index_sql(&self, _table: &TableSchema, _name: &str) -> OracleResult<String> {
        Err(OracleError::unsupported("indexSql"))
    }

    fn create_table_sql(&self, table: &TableSchema) -> OracleResult<Vec<String>> {
        let mut content = Vec::with_capacity(table.columns.len() + table.constraints.len());
        for name in table.columns.keys() {
            content.push(self.column_sql(table, name)?);
        }
        for name in table.constraints.keys() {
            content.push(self.constraint_sql(table, name)?);
        }
        let indexes = table
            .indexes
            .keys()
            .map(|name| self.index_sql(table, name))
            .collect::<OracleResult<Vec<_>>>()?;

        let table_name = self.quote(&table.name);
        let mut out = vec![format!("CREATE TABLE {} (\n{}\n)", table_name, content.join(",\n"))];
        out.extend(indexes);
        for (name, column) in &table.columns {
            if let Some(comment) = &column.comment {
                out.push(format!(
                    "COMMENT ON COLUMN {}.{} IS {}",
                    table_name,
                    self.quote(name),
                    self.dialect.value_literal(&Value::from(comment.as_str()))
                ));
            }
        }
        Ok(out)
    }

    fn truncate_table_sql(&self, table: &TableSchema) -> Vec<String> {
        vec![format!("TRUNCATE TABLE {}", self.quote(&table.name))]
    }

    fn add_constraint_sql(&self, table: &TableSchema) -> OracleResult<Vec<String>> {
        let table_name = self.quote(&table.name);
        table
            .constraints
            .iter()
            .filter(|(_, c)| c.kind == ConstraintKind::Foreign)
            .map(|(name, _)| -> OracleResult<String> {
                Ok(format!(
                    "ALTER TABLE {} ADD {};",
                    table_name,
                    self.constraint_sql(table, name)?
                ))
            })
            .collect()
    }

    fn drop_constraint_sql(&self, table: &TableSchema) -> Vec<String> {
        let table_name = self.quote(&table.name);
        table
            .constraints
            .iter()
            .filter(|(_, c)| c.kind == ConstraintKind::Foreign)
            .map(|(name, _)| format!("ALTER TABLE {} DROP CONSTRAINT {};", table_name, self.quote(name)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(fields: &[(&str, Value)]) -> Row {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn column_row(name: &str, data_type: &str, length: i64, precision: Value, scale: Value) -> Row {
        row(&[
            ("COLUMN_NAME", Value::from(name)),
            ("DATA_TYPE", Value::from(data_type)),
            ("DATA_LENGTH", Value::Int(length)),
            ("DATA_PRECISION", precision),
            ("DATA_SCALE", scale),
            ("NULLABLE", Value::from("N")),
            ("DATA_DEFAULT", Value::Null),
        ])
    }

    #[test]
    fn test_table_split() {
        let dialect = OracleDialect::default();
        let schema = OracleSchema::new(&dialect);
        assert_eq!(schema.table_split("articles"), ("ARTICLES".to_string(), None));
        assert_eq!(
            schema.table_split("app.articles"),
            ("ARTICLES".to_string(), Some("APP".to_string()))
        );

        let dialect = OracleDialect::default().with_schema("hr");
        let schema = OracleSchema::new(&dialect);
        assert_eq!(
            schema.table_split("articles"),
            ("ARTICLES".to_string(), Some("HR".to_string()))
        );
    }

    #[test]
    fn test_describe_sql_picks_views() {
        let dialect = OracleDialect::default();
        let schema = OracleSchema::new(&dialect);

        let q = schema.describe_column_sql("articles");
        assert!(q.sql.contains("FROM user_tab_columns WHERE table_name = :bindTable"));
        assert_eq!(q.params, vec![("bindTable".to_string(), Value::from("ARTICLES"))]);

        let q = schema.describe_foreign_key_sql("app.articles");
        assert!(q.sql.contains("FROM all_cons_columns cc"));
        assert!(q.sql.contains("r.owner = c.r_owner"));
        assert_eq!(q.params.len(), 2);
        assert_eq!(q.params[1], ("bindOwner".to_string(), Value::from("APP")));
    }

    #[test]
    fn test_list_tables_sql() {
        let dialect = OracleDialect::default();
        let q = OracleSchema::new(&dialect).list_tables_sql();
        assert_eq!(q.sql, "SELECT table_name FROM sys.user_tables");
        assert!(q.params.is_empty());

        let dialect = OracleDialect::default().with_quoting(false).with_schema("app");
        let q = OracleSchema::new(&dialect).list_tables_sql();
        assert_eq!(
            q.sql,
            "SELECT LOWER(table_name) FROM sys.all_tables WHERE owner = :bindOwner"
        );
        assert_eq!(q.params, vec![("bindOwner".to_string(), Value::from("APP"))]);
    }

    #[test]
    fn test_convert_column_types() {
        let dialect = OracleDialect::default();
        let schema = OracleSchema::new(&dialect);
        let mut table = TableSchema::new("t");

        let rows = [
            column_row("ID", "NUMBER", 22, Value::Int(10), Value::Int(0)),
            column_row("FLAG", "NUMBER", 22, Value::Int(1), Value::Int(0)),
            column_row("PRICE", "NUMBER", 22, Value::Int(8), Value::Int(2)),
            column_row("AMOUNT", "NUMBER", 22, Value::Null, Value::Null),
            column_row("TITLE", "VARCHAR2", 100, Value::Null, Value::Null),
            column_row("CREATED", "DATE", 7, Value::Null, Value::Null),
            column_row("STAMP", "TIMESTAMP(6)", 11, Value::Null, Value::Null),
            column_row("DATA", "BLOB", 4000, Value::Null, Value::Null),
            column_row("SHAPE", "SDO_GEOMETRY", 1, Value::Null, Value::Null),
        ];
        for r in &rows {
            schema.convert_column_description(&mut table, r).unwrap();
        }

        assert_eq!(table.columns["id"], ColumnDef::new(ColumnType::Integer).length(10).not_null());
        assert_eq!(table.columns["flag"].kind, Some(ColumnType::Boolean));
        assert_eq!(
            table.columns["price"],
            ColumnDef::new(ColumnType::Decimal).length(8).precision(2).not_null()
        );
        assert_eq!(table.columns["amount"].kind, Some(ColumnType::Decimal));
        assert_eq!(table.columns["amount"].length, Some(22));
        assert_eq!(table.columns["title"].length, Some(100));
        assert_eq!(table.columns["created"].kind, Some(ColumnType::DateTime));
        assert_eq!(table.columns["stamp"].kind, Some(ColumnType::Timestamp));
        assert_eq!(table.columns["data"].kind, Some(ColumnType::Binary));
        assert_eq!(table.columns["shape"].kind, None);
    }

    #[test]
    fn test_unique_constraint_columns_merge_in_order() {
        let dialect = OracleDialect::default();
        let schema = OracleSchema::new(&dialect);
        let mut table = TableSchema::new("t");

        for column in ["X", "Y"] {
            let r = row(&[
                ("COLUMN_NAME", Value::from(column)),
                ("CONSTRAINT_NAME", Value::from("U1")),
                ("CONSTRAINT_TYPE", Value::from("U")),
            ]);
            schema.convert_index_description(&mut table, &r).unwrap();
        }
        let r = row(&[
            ("COLUMN_NAME", Value::from("ID")),
            ("CONSTRAINT_NAME", Value::from("SYS_C0011")),
            ("CONSTRAINT_TYPE", Value::from("P")),
        ]);
        schema.convert_index_description(&mut table, &r).unwrap();
        let r = row(&[
            ("COLUMN_NAME", Value::from("ID")),
            ("CONSTRAINT_NAME", Value::from("CK1")),
            ("CONSTRAINT_TYPE", Value::from("C")),
        ]);
        schema.convert_index_description(&mut table, &r).unwrap();

        assert_eq!(table.constraints.len(), 2);
        assert_eq!(table.constraints["U1"], Constraint::unique(["x", "y"]));
        assert_eq!(table.constraints[PRIMARY_KEY_NAME], Constraint::primary(["id"]));
    }

    #[test]
    fn test_foreign_key_description() {
        let dialect = OracleDialect::default();
        let schema = OracleSchema::new(&dialect);
        let mut table = TableSchema::new("articles");
        let r = row(&[
            ("COLUMN_NAME", Value::from("AUTHOR_ID")),
            ("CONSTRAINT_NAME", Value::from("FK_AUTHOR")),
            ("REFERENCED_OWNER", Value::from("APP")),
            ("REFERENCED_TABLE_NAME", Value::from("AUTHORS")),
            ("REFERENCED_COLUMN_NAME", Value::from("ID")),
            ("DELETE_RULE", Value::from("CASCADE")),
        ]);
        schema.convert_foreign_key_description(&mut table, &r).unwrap();

        let fk = &table.constraints["FK_AUTHOR"];
        assert_eq!(fk.kind, ConstraintKind::Foreign);
        assert_eq!(fk.columns, vec!["author_id"]);
        assert_eq!(
            fk.references,
            Some(Reference {
                table: "APP.AUTHORS".to_string(),
                columns: vec!["id".to_string()],
            })
        );
        assert_eq!(fk.update, Some(Action::SetNull));
        assert_eq!(fk.delete, Some(Action::Cascade));
    }

    #[test]
    fn test_column_sql() {
        let dialect = OracleDialect::default();
        let schema = OracleSchema::new(&dialect);
        let mut table = TableSchema::new("t");
        table
            .add_column("id", ColumnDef::new(ColumnType::Integer).length(11).not_null())
            .add_column("title", ColumnDef::new(ColumnType::String))
            .add_column("code", ColumnDef::new(ColumnType::String).length(2).fixed())
            .add_column("price", ColumnDef::new(ColumnType::Decimal).length(8).precision(2))
            .add_column("active", ColumnDef::new(ColumnType::Boolean).default_value(true))
            .add_column("created", ColumnDef::new(ColumnType::Timestamp))
            .add_column("meta", ColumnDef::new(ColumnType::Json));

        assert_eq!(schema.column_sql(&table, "id").unwrap(), "\"id\" NUMBER(11) NOT NULL");
        assert_eq!(schema.column_sql(&table, "title").unwrap(), "\"title\" VARCHAR2(255)");
        assert_eq!(schema.column_sql(&table, "code").unwrap(), "\"code\" CHAR(2)");
        assert_eq!(schema.column_sql(&table, "price").unwrap(), "\"price\" NUMBER(8,2)");
        assert_eq!(schema.column_sql(&table, "active").unwrap(), "\"active\" NUMBER DEFAULT 1");
        assert_eq!(schema.column_sql(&table, "created").unwrap(), "\"created\" TIMESTAMP(6)");

        let err = schema.column_sql(&table, "meta").unwrap_err();
        assert_eq!(err.to_string(), "Column type json not yet implemented");
    }

    #[test]
    fn test_create_table_sql() {
        let dialect = OracleDialect::default();
        let schema = OracleSchema::new(&dialect);
        let mut table = TableSchema::new("articles");
        table
            .add_column("id", ColumnDef::new(ColumnType::Integer).not_null())
            .add_column("title", ColumnDef::new(ColumnType::String).comment("Headline"))
            .add_constraint(PRIMARY_KEY_NAME, Constraint::primary(["id"]))
            .add_constraint("u_title", Constraint::unique(["title"]))
            .add_constraint(
                "fk_author",
                Constraint::foreign(
                    vec!["author_id".to_string()],
                    "authors",
                    vec!["id".to_string()],
                    Some(Action::NoAction),
                ),
            );

        let sql = schema.create_table_sql(&table).unwrap();
        assert_eq!(
            sql,
            vec![
                "CREATE TABLE \"articles\" (\n\
                 \"id\" NUMBER NOT NULL,\n\
                 \"title\" VARCHAR2(255),\n\
                 PRIMARY KEY (\"id\"),\n\
                 CONSTRAINT \"u_title\" UNIQUE (\"title\"),\n\
                 CONSTRAINT \"fk_author\" FOREIGN KEY (\"author_id\") REFERENCES \"authors\" (\"id\")\n\
                 )"
                .to_string(),
                "COMMENT ON COLUMN \"articles\".\"title\" IS 'Headline'".to_string(),
            ]
        );
    }

    #[test]
    fn test_create_table_with_index_is_unsupported() {
        let dialect = OracleDialect::default();
        let schema = OracleSchema::new(&dialect);
        let mut table = TableSchema::new("t");
        table
            .add_column("id", ColumnDef::new(ColumnType::Integer))
            .add_index(
                "idx_id",
                IndexDef {
                    kind: IndexKind::Index,
                    columns: vec!["id".to_string()],
                },
            );
        let err = schema.create_table_sql(&table).unwrap_err();
        assert!(matches!(err, OracleError::Unsupported(ref op) if op == "indexSql"));
    }

    #[test]
    fn test_foreign_constraint_alter_statements() {
        let dialect = OracleDialect::default();
        let schema = OracleSchema::new(&dialect);
        let mut table = TableSchema::new("articles");
        table
            .add_constraint(PRIMARY_KEY_NAME, Constraint::primary(["id"]))
            .add_constraint(
                "fk_author",
                Constraint::foreign(
                    vec!["author_id".to_string()],
                    "APP.AUTHORS",
                    vec!["id".to_string()],
                    Some(Action::Cascade),
                ),
            );

        assert_eq!(
            schema.add_constraint_sql(&table).unwrap(),
            vec![
                "ALTER TABLE \"articles\" ADD CONSTRAINT \"fk_author\" FOREIGN KEY (\"author_id\") \
                 REFERENCES \"APP\".\"AUTHORS\" (\"id\") ON DELETE CASCADE;"
                    .to_string()
            ]
        );
        assert_eq!(
            schema.drop_constraint_sql(&table),
            vec!["ALTER TABLE \"articles\" DROP CONSTRAINT \"fk_author\";".to_string()]
        );
        assert_eq!(schema.truncate_table_sql(&table), vec!["TRUNCATE TABLE \"articles\"".to_string()]);
    }
}
