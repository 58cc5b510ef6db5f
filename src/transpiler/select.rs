use tracing::debug;

use crate::ast::{Ast, Inspector, Node};
use crate::error::{SlqError, SlqResult};
use crate::transpiler::placeholders::rewrite_placeholders;
use crate::transpiler::query::QueryBuilder;
use crate::transpiler::traits::SqlGenerator;

/// Generate a SELECT from a narrowed AST.
///
/// The final selectable segment supplies the FROM clause; it must hold a
/// single table or a single join.
pub fn build_select(ast: &Ast, generator: &dyn SqlGenerator) -> SlqResult<String> {
    let insp = Inspector::new(ast);
    let source = insp.find_final_selectable_segment()?;

    let from = match source.nodes() {
        [Node::TblSelector(tbl)] => generator.from_clause(tbl),
        [Node::Join(join)] => generator.join_clause(join)?,
        nodes => {
            return Err(SlqError::structural(format!(
                "expected one table or join in the final selectable segment, found {}",
                nodes.len()
            )));
        }
    };

    let cols = insp.find_column_segment()?.unwrap_or_default();

    let mut qb = QueryBuilder::new(generator);
    qb.set_select(generator.select_clause(&cols))
        .set_from(from)
        .set_range(generator.range(insp.find_row_range()));
    if let Some(filter) = insp.find_where() {
        qb.set_where(generator.where_clause(filter));
    }
    if let Some(order) = insp.find_order_by() {
        qb.set_order_by(generator.order_by_clause(order));
    }

    let sql = rewrite_placeholders(&qb.sql()?, generator);
    debug!(dialect = %generator.dialect(), %sql, "built select");
    Ok(sql)
}
