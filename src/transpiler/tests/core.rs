//! SELECT generation tests.

use pretty_assertions::assert_eq;

use super::{filter, user_query};
use crate::ast::{
    Ast, BinaryOp, ColRef, Expr, JoinKind, Node, OrderBy, SortOrder, SortTerm, narrow,
};
use crate::error::SlqError;
use crate::transpiler::{Dialect, ToSql};

#[test]
fn test_simple_select() {
    let ast = user_query(&[], vec![]);
    assert_eq!(ast.to_sql().unwrap(), "SELECT * FROM \"user\"");
}

#[test]
fn test_select_columns() {
    let ast = user_query(&["uid", "username"], vec![]);
    assert_eq!(
        ast.to_sql().unwrap(),
        "SELECT \"uid\", \"username\" FROM \"user\""
    );
}

#[test]
fn test_select_with_where_params() {
    let ast = user_query(
        &["uid"],
        vec![filter(Expr::and(
            Expr::equals(Expr::col("uid"), Expr::Placeholder),
            Expr::binary(BinaryOp::Like, Expr::col("username"), Expr::Placeholder),
        ))],
    );
    assert_eq!(
        ast.to_sql().unwrap(),
        "SELECT \"uid\" FROM \"user\" WHERE \"uid\" = $1 AND \"username\" LIKE $2"
    );
}

#[test]
fn test_select_with_literals() {
    let ast = user_query(
        &[],
        vec![filter(Expr::and(
            Expr::equals(Expr::col("active"), true.into()),
            Expr::equals(Expr::col("name"), "o'brien?".into()),
        ))],
    );
    assert_eq!(
        ast.to_sql().unwrap(),
        "SELECT * FROM \"user\" WHERE \"active\" = true AND \"name\" = 'o''brien?'"
    );
}

#[test]
fn test_select_with_order_and_range() {
    let ast = user_query(
        &["uid"],
        vec![
            Node::OrderBy(OrderBy {
                terms: vec![SortTerm {
                    column: ColRef::new("created_at"),
                    order: SortOrder::Desc,
                }],
            }),
            Node::range(20, 10),
        ],
    );
    assert_eq!(
        ast.to_sql().unwrap(),
        "SELECT \"uid\" FROM \"user\" ORDER BY \"created_at\" DESC LIMIT 10 OFFSET 20"
    );
}

#[test]
fn test_unbounded_range_is_omitted() {
    let ast = user_query(&[], vec![Node::range(-1, -1)]);
    assert_eq!(ast.to_sql().unwrap(), "SELECT * FROM \"user\"");
}

#[test]
fn test_join_select() {
    let mut ast = Ast::new();
    ast.push_segment(vec![Node::datasource("@mydb1")])
        .push_segment(vec![Node::selector("user"), Node::selector("address")])
        .push_segment(vec![Node::join(
            JoinKind::Left,
            Some(Expr::equals(
                Expr::qcol("user", "uid"),
                Expr::qcol("address", "uid"),
            )),
        )])
        .push_segment(vec![Node::selector("user.username"), Node::selector("country")]);
    narrow(&mut ast).unwrap();

    assert_eq!(
        ast.to_sql().unwrap(),
        "SELECT \"user\".\"username\", \"country\" FROM \"user\" LEFT JOIN \"address\" \
         ON \"user\".\"uid\" = \"address\".\"uid\""
    );
}

#[test]
fn test_no_selectable_segment() {
    let mut ast = Ast::new();
    ast.push_segment(vec![Node::datasource("@mydb1")]);
    let err = ast.to_sql().unwrap_err();
    assert!(matches!(err, SlqError::Structural(_)));
}

#[test]
fn test_two_tables_without_join() {
    let mut ast = Ast::new();
    ast.push_segment(vec![Node::datasource("@mydb1")])
        .push_segment(vec![Node::selector("user"), Node::selector("address")]);
    narrow(&mut ast).unwrap();
    let err = ast.to_sql_with_dialect(Dialect::SQLite).unwrap_err();
    assert!(matches!(err, SlqError::Structural(_)));
}

#[test]
fn test_unbound_join() {
    let mut ast = Ast::new();
    ast.push_segment(vec![Node::join(JoinKind::Inner, None)]);
    let err = ast.to_sql().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Structural error: join has not been bound to its tables"
    );
}
