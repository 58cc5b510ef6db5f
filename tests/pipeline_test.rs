use pretty_assertions::assert_eq;
use slq::prelude::*;

/// `@mydb1 | .user, .address | join(.user.uid == .address.uid) | .uid, .username, .country`
fn join_query() -> Ast {
    let mut ast = Ast::new();
    ast.push_segment(vec![Node::datasource("@mydb1")])
        .push_segment(vec![Node::selector("user"), Node::selector("address")])
        .push_segment(vec![Node::join(
            JoinKind::Inner,
            Some(Expr::equals(Expr::qcol("user", "uid"), Expr::qcol("address", "uid"))),
        )])
        .push_segment(vec![
            Node::selector("uid"),
            Node::selector("username"),
            Node::selector("country"),
        ]);
    ast
}

#[test]
fn test_narrow_inspect_render() {
    let mut ast = join_query();
    narrow(&mut ast).expect("narrowing failed");

    let insp = Inspector::new(&ast);
    assert_eq!(insp.find_selectable_segments().len(), 2);
    assert!(insp.find_final_selectable_segment().unwrap().is_all(NodeType::Join));
    assert_eq!(insp.find_first_handle(), Some("@mydb1"));

    assert_eq!(
        ast.to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        "SELECT \"uid\", \"username\", \"country\" FROM \"user\" INNER JOIN \"address\" \
         ON \"user\".\"uid\" = \"address\".\"uid\""
    );
}

#[test]
fn test_custom_visitor_fails_fast() {
    let mut ast = join_query();
    let mut visited = Vec::new();

    let err = Walker::new(&mut ast)
        .add_visitor(NodeType::Selector, |cursor, node| {
            visited.push(cursor.path());
            match node {
                Node::Selector(sel) if sel.name == "address" => {
                    Err(SlqError::visitor(NodeType::Selector, "address is off limits"))
                }
                _ => narrow_selector(cursor, node),
            }
        })
        .walk()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Visitor failed on selector node: address is off limits"
    );
    assert_eq!(visited.len(), 2);
    // "user" was narrowed before the failure and stays narrowed.
    assert_eq!(ast.segments()[1].nodes()[0].node_type(), NodeType::TblSelector);
    assert_eq!(ast.segments()[1].nodes()[1], Node::selector("address"));
    assert_eq!(ast.segments()[3].nodes()[0], Node::selector("uid"));
}

#[test]
fn test_ast_json_from_upstream_parser() {
    let json = r#"{
        "segments": [
            {"nodes": [{"Datasource": {"handle": "@sakila"}}]},
            {"nodes": [{"Selector": {"name": "actor"}}]},
            {"nodes": [{"Selector": {"name": "first_name", "alias": "name"}}]},
            {"nodes": [{"RowRange": {"offset": 2, "limit": 5}}]}
        ]
    }"#;
    let mut ast: Ast = serde_json::from_str(json).unwrap();
    narrow(&mut ast).unwrap();

    assert_eq!(
        ast.to_sql_with_dialect(Dialect::SQLite).unwrap(),
        "SELECT \"first_name\" AS \"name\" FROM \"actor\" LIMIT 5 OFFSET 2"
    );
}
