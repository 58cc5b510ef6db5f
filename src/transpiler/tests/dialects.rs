//! SQL dialect tests (SQLite, MySQL, SQL Server).

use pretty_assertions::assert_eq;

use super::{filter, user_query};
use crate::ast::{Expr, Node, RowRange};
use crate::config::RenderConfig;
use crate::transpiler::{Dialect, SqlGenerator, ToSql};

fn range(dialect: Dialect, rr: Option<RowRange>) -> String {
    dialect.generator().range(rr.as_ref())
}

#[test]
fn test_range_fragments() {
    for d in Dialect::ALL {
        assert_eq!(range(d, None), "", "{d}");
        assert_eq!(range(d, Some(RowRange::new(-1, -1))), "", "{d}");
    }

    assert_eq!(
        range(Dialect::SqlServer, Some(RowRange::new(2, 5))),
        "OFFSET 2 ROWS FETCH NEXT 5 ROWS ONLY"
    );
    assert_eq!(
        range(Dialect::SqlServer, Some(RowRange::new(-1, 5))),
        "OFFSET 0 ROWS FETCH NEXT 5 ROWS ONLY"
    );
    assert_eq!(range(Dialect::SqlServer, Some(RowRange::new(3, -1))), "OFFSET 3 ROWS");

    assert_eq!(range(Dialect::Postgres, Some(RowRange::new(2, 5))), "LIMIT 5 OFFSET 2");
    assert_eq!(range(Dialect::Postgres, Some(RowRange::new(3, -1))), "OFFSET 3");
    assert_eq!(range(Dialect::SQLite, Some(RowRange::new(3, -1))), "LIMIT -1 OFFSET 3");
    assert_eq!(
        range(Dialect::MySQL, Some(RowRange::new(3, -1))),
        "LIMIT 18446744073709551615 OFFSET 3"
    );
}

#[test]
fn test_sqlserver_dialect() {
    let ast = user_query(&["uid"], vec![Node::range(5, 10)]);
    assert_eq!(
        ast.to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        "SELECT \"uid\" FROM \"user\" ORDER BY (SELECT 0) OFFSET 5 ROWS FETCH NEXT 10 ROWS ONLY"
    );

    let ast = user_query(
        &[],
        vec![filter(Expr::and(
            Expr::equals(Expr::col("uid"), Expr::Placeholder),
            Expr::equals(Expr::col("active"), true.into()),
        ))],
    );
    assert_eq!(
        ast.to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        "SELECT * FROM \"user\" WHERE \"uid\" = @p1 AND \"active\" = 1"
    );
}

#[test]
fn test_mysql_dialect() {
    let ast = user_query(
        &["uid"],
        vec![filter(Expr::equals(Expr::col("uid"), Expr::Placeholder)), Node::range(0, 3)],
    );
    assert_eq!(
        ast.to_sql_with_dialect(Dialect::MySQL).unwrap(),
        "SELECT `uid` FROM `user` WHERE `uid` = ? LIMIT 3"
    );
}

#[test]
fn test_sqlite_dialect() {
    let ast = user_query(
        &[],
        vec![filter(Expr::equals(Expr::col("active"), false.into()))],
    );
    assert_eq!(
        ast.to_sql_with_dialect(Dialect::SQLite).unwrap(),
        "SELECT * FROM \"user\" WHERE \"active\" = 0"
    );
}

#[test]
fn test_configured_generator() {
    let config = RenderConfig::from_toml_str(
        r#"
[dialects.postgres]
col_quote = "`"

[dialects.postgres.ops]
eq = "=="
"#,
    )
    .unwrap();
    let generator = config.generator(Dialect::Postgres).unwrap();

    let ast = user_query(
        &["uid"],
        vec![filter(Expr::equals(Expr::col("uid"), Expr::Placeholder))],
    );
    assert_eq!(
        ast.to_sql_with(generator.as_ref()).unwrap(),
        "SELECT `uid` FROM \"user\" WHERE `uid` == $1"
    );
    // The built-in generator is unaffected.
    assert_eq!(
        ast.to_sql().unwrap(),
        "SELECT \"uid\" FROM \"user\" WHERE \"uid\" = $1"
    );
}

#[test]
fn test_generators_are_shareable() {
    let generator = std::sync::Arc::new(Dialect::SqlServer.generator());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let generator = generator.clone();
            std::thread::spawn(move || {
                let ast = user_query(&[], vec![Node::range(i, 1)]);
                ast.to_sql_with(&**generator).unwrap()
            })
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        assert_eq!(
            h.join().unwrap(),
            format!(
                "SELECT * FROM \"user\" ORDER BY (SELECT 0) OFFSET {} ROWS FETCH NEXT 1 ROWS ONLY",
                i
            )
        );
    }
}
