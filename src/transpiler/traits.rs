//! Transpiler traits and utilities.

use tracing::debug;

use crate::ast::{
    BinaryOp, ColRef, ColSelector, Expr, Join, JoinKind, Literal, OrderBy, RowRange, SortOrder,
    TblSelector, Where,
};
use crate::error::{SlqError, SlqResult};
use crate::kind::Kind;
use crate::transpiler::dialect::{Dialect, DialectConfig};
use crate::transpiler::query::Clauses;

/// Wrap `name` in `quote`, doubling any embedded quote character.
pub fn quote_with(quote: char, name: &str) -> String {
    let doubled: String = [quote, quote].iter().collect();
    format!("{q}{}{q}", name.replace(quote, &doubled), q = quote)
}

/// Dialect-specific SQL generation.
///
/// Every generator is built from an explicit [`DialectConfig`] and is
/// read-only afterwards, so one instance can serve concurrent renders.
pub trait SqlGenerator: Send + Sync {
    fn dialect(&self) -> Dialect;

    fn config(&self) -> &DialectConfig;

    /// Native column type for `kind`.
    fn type_name(&self, kind: Kind) -> SlqResult<&'static str>;

    /// Numbered parameter for the 1-based `index`.
    fn placeholder(&self, index: usize) -> String;

    /// Quote a table identifier.
    fn quote_identifier(&self, name: &str) -> String {
        quote_with(self.config().quote, name)
    }

    /// Quote a column identifier.
    fn quote_column(&self, name: &str) -> String {
        quote_with(self.config().col_quote, name)
    }

    fn operator(&self, op: BinaryOp) -> &str {
        self.config().ops.symbol(op)
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }

    fn string_literal(&self, s: &str) -> String {
        format!("'{}'", s.replace('\'', "''"))
    }

    fn literal(&self, lit: &Literal) -> String {
        match lit {
            Literal::Null => "NULL".to_string(),
            Literal::Bool(b) => self.bool_literal(*b),
            Literal::Int(n) => n.to_string(),
            Literal::Float(f) => f.to_string(),
            Literal::Text(s) => self.string_literal(s),
        }
    }

    /// `DEFAULT` literal used for NOT NULL columns of `kind`.
    fn default_literal(&self, kind: Kind) -> SlqResult<&str> {
        self.config()
            .defaults
            .get(&kind)
            .map(String::as_str)
            .ok_or(SlqError::UnsupportedKind {
                dialect: self.dialect().name(),
                kind,
            })
    }

    fn column_ref(&self, col: &ColRef) -> String {
        match &col.table {
            Some(t) => format!("{}.{}", self.quote_identifier(t), self.quote_column(&col.column)),
            None => self.quote_column(&col.column),
        }
    }

    /// Render an expression. Placeholders stay as neutral `?` markers.
    fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Column(col) => self.column_ref(col),
            Expr::Literal(lit) => self.literal(lit),
            Expr::Placeholder => "?".to_string(),
            Expr::Binary { op, left, right } => {
                let operand = |e: &Expr| match e {
                    Expr::Binary { op: inner, .. }
                        if !op.is_logical() || (inner.is_logical() && inner != op) =>
                    {
                        format!("({})", self.expr(e))
                    }
                    _ => self.expr(e),
                };
                format!("{} {} {}", operand(left), self.operator(*op), operand(right))
            }
        }
    }

    /// `SELECT` clause; no columns selects everything.
    fn select_clause(&self, cols: &[&ColSelector]) -> String {
        if cols.is_empty() {
            return "SELECT *".to_string();
        }
        let list = cols
            .iter()
            .map(|c| {
                let col = self.column_ref(&ColRef {
                    table: c.table.clone(),
                    column: c.column.clone(),
                });
                match &c.alias {
                    Some(a) => format!("{} AS {}", col, self.quote_column(a)),
                    None => col,
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("SELECT {}", list)
    }

    fn table_ref(&self, tbl: &TblSelector) -> String {
        let name = self.quote_identifier(&tbl.table);
        match &tbl.alias {
            Some(a) => format!("{} AS {}", name, self.quote_identifier(a)),
            None => name,
        }
    }

    fn from_clause(&self, tbl: &TblSelector) -> String {
        format!("FROM {}", self.table_ref(tbl))
    }

    /// `FROM` clause for a narrowed join.
    fn join_clause(&self, join: &Join) -> SlqResult<String> {
        let (Some(left), Some(right)) = (&join.left, &join.right) else {
            return Err(SlqError::structural("join has not been bound to its tables"));
        };

        let mut sql = format!(
            "FROM {} {} {}",
            self.table_ref(left),
            join.kind.keyword(),
            self.table_ref(right)
        );
        match (&join.constraint, join.kind) {
            (Some(on), _) => {
                sql.push_str(" ON ");
                sql.push_str(&self.expr(on));
            }
            (None, JoinKind::Cross) => {}
            (None, kind) => {
                return Err(SlqError::structural(format!(
                    "{} requires a join constraint",
                    kind.keyword()
                )));
            }
        }
        Ok(sql)
    }

    fn where_clause(&self, filter: &Where) -> String {
        format!("WHERE {}", self.expr(&filter.expr))
    }

    fn order_by_clause(&self, order: &OrderBy) -> String {
        if order.terms.is_empty() {
            return String::new();
        }
        let terms = order
            .terms
            .iter()
            .map(|t| match t.order {
                SortOrder::Asc => self.column_ref(&t.column),
                SortOrder::Desc => format!("{} DESC", self.column_ref(&t.column)),
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("ORDER BY {}", terms)
    }

    /// Row range fragment. Empty when there is no range or both bounds are
    /// unspecified.
    fn range(&self, range: Option<&RowRange>) -> String {
        let Some(rr) = range.filter(|rr| !rr.is_unbounded()) else {
            return String::new();
        };

        let mut sql = String::new();
        if rr.limit >= 0 {
            sql.push_str(&format!("LIMIT {}", rr.limit));
        }
        if rr.offset > 0 {
            if !sql.is_empty() {
                sql.push(' ');
            }
            sql.push_str(&format!("OFFSET {}", rr.offset));
        }
        debug!(dialect = %self.dialect(), fragment = %sql, "rendered range fragment");
        sql
    }

    /// Last chance to adjust clauses before they are joined.
    fn prepare_clauses(&self, _clauses: &mut Clauses) {}

    fn truncate_table(&self, table: &str) -> String {
        format!("TRUNCATE TABLE {}", self.quote_identifier(table))
    }

    fn copy_table(&self, from: &str, to: &str, copy_data: bool) -> String {
        let mut sql = format!(
            "CREATE TABLE {} AS SELECT * FROM {}",
            self.quote_identifier(to),
            self.quote_identifier(from)
        );
        if !copy_data {
            sql.push_str(" WHERE 1 = 0");
        }
        sql
    }
}
