//! Narrowing passes.
//!
//! Each function here is a walker visitor: it inspects one node plus its
//! surroundings and either keeps it or hands back a resolved replacement.
//! [`narrow`] runs the standard set over a whole tree.

use super::walker::{Cursor, Transform, Walker};
use super::{Ast, ColSelector, Join, Node, NodeType, TblSelector};
use crate::error::{SlqError, SlqResult};

/// Resolve a selector that names a table.
///
/// A selector is a table when it sits in the first segment, or directly
/// after a data source segment (whose handle it inherits).
pub fn narrow_tbl_sel(cursor: &Cursor<'_>, node: &Node) -> SlqResult<Transform> {
    let Node::Selector(sel) = node else {
        return Ok(Transform::Keep);
    };

    let handle = match cursor.prev_segment() {
        None => None,
        Some(prev) if prev.is_all(NodeType::Datasource) => prev.handle().map(str::to_string),
        Some(_) => return Ok(Transform::Keep),
    };

    if sel.name.is_empty() || sel.name.contains('.') {
        return Err(SlqError::visitor(
            NodeType::Selector,
            format!("'{}' is not a valid table name", sel.name),
        ));
    }

    Ok(Transform::Replace(Node::TblSelector(TblSelector {
        handle,
        table: sel.name.clone(),
        alias: sel.alias.clone(),
    })))
}

/// Resolve a selector that names a column: any selector that follows a
/// selectable segment. `user.uid` is split on its last dot.
pub fn narrow_col_sel(cursor: &Cursor<'_>, node: &Node) -> SlqResult<Transform> {
    let Node::Selector(sel) = node else {
        return Ok(Transform::Keep);
    };
    if !cursor.preceding().iter().any(|s| s.is_selectable()) {
        return Ok(Transform::Keep);
    }

    let (table, column) = match sel.name.rsplit_once('.') {
        Some((table, column)) => (Some(table.to_string()), column),
        None => (None, sel.name.as_str()),
    };
    if column.is_empty() || table.as_deref() == Some("") {
        return Err(SlqError::visitor(
            NodeType::Selector,
            format!("'{}' is not a valid column name", sel.name),
        ));
    }

    Ok(Transform::Replace(Node::ColSelector(ColSelector {
        table,
        column: column.to_string(),
        alias: sel.alias.clone(),
    })))
}

/// Table narrowing first, column narrowing otherwise.
pub fn narrow_selector(cursor: &Cursor<'_>, node: &Node) -> SlqResult<Transform> {
    match narrow_tbl_sel(cursor, node)? {
        Transform::Keep => narrow_col_sel(cursor, node),
        replaced => Ok(replaced),
    }
}

/// Bind a join to the two tables selected in the segment before it.
pub fn narrow_join(cursor: &Cursor<'_>, node: &Node) -> SlqResult<Transform> {
    let Node::Join(join) = node else {
        return Ok(Transform::Keep);
    };

    let tables: Vec<&TblSelector> = cursor
        .prev_segment()
        .map(|seg| {
            seg.nodes()
                .iter()
                .filter_map(|n| match n {
                    Node::TblSelector(t) => Some(t),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    let [left, right] = tables.as_slice() else {
        return Err(SlqError::visitor(
            NodeType::Join,
            format!("join requires exactly 2 tables, found {}", tables.len()),
        ));
    };

    Ok(Transform::Replace(Node::Join(Join {
        kind: join.kind,
        constraint: join.constraint.clone(),
        left: Some((*left).clone()),
        right: Some((*right).clone()),
    })))
}

/// Apply the standard narrowing passes to `ast` in a single walk.
pub fn narrow(ast: &mut Ast) -> SlqResult<()> {
    Walker::new(ast)
        .add_visitor(NodeType::Selector, narrow_selector)
        .add_visitor(NodeType::Join, narrow_join)
        .walk()
}
