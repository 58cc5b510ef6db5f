//! Table-level statements: CREATE, UPDATE, INSERT, DROP, TRUNCATE, copy.

use tracing::debug;

use crate::ast::Expr;
use crate::error::{SlqError, SlqResult};
use crate::schema::TableDef;
use crate::transpiler::placeholders::rewrite_placeholders;
use crate::transpiler::traits::SqlGenerator;

/// Generate CREATE TABLE SQL, one line per column.
///
/// NOT NULL columns also get a kind-specific DEFAULT so the table accepts
/// partially populated rows while it is being filled.
pub fn build_create_table(tbl: &TableDef, generator: &dyn SqlGenerator) -> SlqResult<String> {
    if tbl.columns.is_empty() {
        return Err(SlqError::precondition(format!(
            "table {} has no columns",
            tbl.name
        )));
    }

    let mut sql = format!("CREATE TABLE {} (", generator.quote_identifier(&tbl.name));
    let last = tbl.columns.len() - 1;
    for (i, col) in tbl.columns.iter().enumerate() {
        sql.push('\n');
        sql.push_str(&generator.quote_column(&col.name));
        sql.push(' ');
        sql.push_str(generator.type_name(col.kind)?);

        if !col.nullable {
            sql.push_str(" DEFAULT ");
            sql.push_str(generator.default_literal(col.kind)?);
            sql.push_str(" NOT NULL");
        }

        if i < last {
            sql.push(',');
        }
    }
    sql.push_str("\n)");

    debug!(dialect = %generator.dialect(), table = %tbl.name, "built create table");
    Ok(sql)
}

/// Generate `UPDATE t SET a = ?, b = ? [WHERE ...]` with dialect parameters.
///
/// Parameters are numbered across SET and WHERE, left to right.
pub fn build_update<S: AsRef<str>>(
    table: &str,
    cols: &[S],
    filter: Option<&Expr>,
    generator: &dyn SqlGenerator,
) -> SlqResult<String> {
    if cols.is_empty() {
        return Err(SlqError::precondition("no columns provided"));
    }

    let assignments = cols
        .iter()
        .map(|c| format!("{} = ?", generator.quote_column(c.as_ref())))
        .collect::<Vec<_>>()
        .join(", ");
    let mut sql = format!(
        "UPDATE {} SET {}",
        generator.quote_identifier(table),
        assignments
    );
    if let Some(expr) = filter {
        sql.push_str(" WHERE ");
        sql.push_str(&generator.expr(expr));
    }

    let sql = rewrite_placeholders(&sql, generator);
    debug!(dialect = %generator.dialect(), %sql, "built update");
    Ok(sql)
}

/// Generate a single-row `INSERT INTO t (a, b) VALUES (?, ?)`.
pub fn build_insert<S: AsRef<str>>(
    table: &str,
    cols: &[S],
    generator: &dyn SqlGenerator,
) -> SlqResult<String> {
    if cols.is_empty() {
        return Err(SlqError::precondition("no columns provided"));
    }

    let names = cols
        .iter()
        .map(|c| generator.quote_column(c.as_ref()))
        .collect::<Vec<_>>()
        .join(", ");
    let params = vec!["?"; cols.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        generator.quote_identifier(table),
        names,
        params
    );
    Ok(rewrite_placeholders(&sql, generator))
}

pub fn build_drop_table(table: &str, if_exists: bool, generator: &dyn SqlGenerator) -> String {
    if if_exists {
        format!("DROP TABLE IF EXISTS {}", generator.quote_identifier(table))
    } else {
        format!("DROP TABLE {}", generator.quote_identifier(table))
    }
}

/// Remove all rows, keeping the table.
pub fn build_truncate(table: &str, generator: &dyn SqlGenerator) -> String {
    generator.truncate_table(table)
}

/// Copy a table's structure, and its rows when `copy_data` is set.
pub fn build_copy_table(
    from: &str,
    to: &str,
    copy_data: bool,
    generator: &dyn SqlGenerator,
) -> SlqResult<String> {
    if from == to {
        return Err(SlqError::precondition(format!(
            "cannot copy table {} to itself",
            from
        )));
    }
    Ok(generator.copy_table(from, to, copy_data))
}
