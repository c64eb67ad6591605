use crate::env::Environment;
use anyhow::{bail, Context};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// A parameterised SQL statement; placeholders are `?1`, `?2`, ...
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub binds: Vec<Value>,
}

/// Database binding capable of running a batch of statements atomically.
///
/// Register it in the environment as `Arc<dyn SqlDatabase>`:
///
/// ```rust,ignore
/// let db: Arc<dyn SqlDatabase> = Arc::new(MyDb::connect()?);
/// let env = Environment::builder().bind("DB", db).build();
/// ```
#[async_trait]
pub trait SqlDatabase: Send + Sync {
    async fn batch(&self, statements: Vec<Statement>) -> anyhow::Result<()>;
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Statements that clear `table` and insert `rows`.
///
/// Columns are the union of all row keys, sorted; a row without a column binds
/// `null` for it.
fn seed_statements(table: &str, rows: &[Map<String, Value>]) -> anyhow::Result<Vec<Statement>> {
    if table.trim().is_empty() {
        bail!("seed table name must not be empty");
    }
    let table = quote_ident(table);

    let columns: Vec<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut statements = Vec::with_capacity(rows.len() + 1);
    statements.push(Statement {
        sql: format!("DELETE FROM {table}"),
        binds: Vec::new(),
    });

    if columns.is_empty() {
        return Ok(statements);
    }

    let column_list = columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=columns.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let insert = format!("INSERT INTO {table} ({column_list}) VALUES ({placeholders})");

    for row in rows {
        statements.push(Statement {
            sql: insert.clone(),
            binds: columns
                .iter()
                .map(|c| row.get(*c).cloned().unwrap_or(Value::Null))
                .collect(),
        });
    }
    Ok(statements)
}

/// Clear `table` and bulk-insert `rows` in one batch.
pub async fn seed_table(
    db: &dyn SqlDatabase,
    table: &str,
    rows: &[Map<String, Value>],
) -> anyhow::Result<()> {
    let statements = seed_statements(table, rows)?;
    debug!(table = %table, rows = rows.len(), statements = statements.len(), "Seeding table");
    db.batch(statements)
        .await
        .with_context(|| format!("failed to seed table {table}"))
}

/// [`seed_table`] against the `binding` database found in `env`.
pub async fn seed(
    env: &Environment,
    binding: &str,
    table: &str,
    rows: &[Map<String, Value>],
) -> anyhow::Result<()> {
    let db = env
        .get::<Arc<dyn SqlDatabase>>(binding)
        .with_context(|| format!("environment has no database binding `{binding}`"))?;
    seed_table(&**db, table, rows).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("row must be an object"),
        }
    }

    #[test]
    fn test_statements_union_columns() {
        let rows = vec![
            row(json!({"id": 1, "name": "Rex"})),
            row(json!({"id": 2, "age": 3})),
        ];
        let stmts = seed_statements("pets", &rows).unwrap();
        assert_eq!(stmts.len(), 3);
        assert_eq!(stmts[0].sql, "DELETE FROM \"pets\"");
        assert_eq!(
            stmts[1].sql,
            "INSERT INTO \"pets\" (\"age\", \"id\", \"name\") VALUES (?1, ?2, ?3)"
        );
        assert_eq!(stmts[1].binds, vec![Value::Null, json!(1), json!("Rex")]);
        assert_eq!(stmts[2].binds, vec![json!(3), json!(2), Value::Null]);
    }

    #[test]
    fn test_no_rows_only_clears() {
        let stmts = seed_statements("pets", &[]).unwrap();
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn test_identifiers_are_quoted() {
        let stmts = seed_statements("we\"ird", &[]).unwrap();
        assert_eq!(stmts[0].sql, "DELETE FROM \"we\"\"ird\"");
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(seed_statements("  ", &[]).is_err());
    }
}
