//! Transpiler test modules.
//!
//! Tests are organized by category:
//! - `core`: SELECT generation from narrowed pipelines
//! - `dialects`: dialect-specific quoting, paging and parameters
//! - `ddl`: CREATE TABLE, UPDATE, INSERT and table commands

mod core;
mod dialects;

use crate::ast::{Ast, Expr, Node, Where, narrow};

/// `@mydb1 | .user | <cols> | <extra>...`, narrowed.
pub(super) fn user_query(cols: &[&str], extra: Vec<Node>) -> Ast {
    let mut ast = Ast::new();
    ast.push_segment(vec![Node::datasource("@mydb1")])
        .push_segment(vec![Node::selector("user")]);
    if !cols.is_empty() {
        ast.push_segment(cols.iter().map(|c| Node::selector(*c)).collect());
    }
    for node in extra {
        ast.push_segment(vec![node]);
    }
    narrow(&mut ast).unwrap();
    ast
}

pub(super) fn filter(expr: Expr) -> Node {
    Node::Where(Where { expr })
}
