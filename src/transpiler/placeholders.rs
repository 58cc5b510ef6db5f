//! Placeholder rewriting.
//!
//! Queries are rendered with neutral `?` markers. The final step rewrites
//! them into the dialect's numbered form (`$1`, `@p1`, ...) left to right.
//! Markers inside quoted literals or quoted identifiers are text, not
//! parameters, and are left alone.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{is_not, tag, take},
    character::complete::char,
    combinator::{map, recognize, value},
    multi::many0_count,
    sequence::tuple,
};
use tracing::debug;

use crate::transpiler::traits::SqlGenerator;

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    Text(&'a str),
    Marker,
}

/// A quoted run, with the quote doubled to escape it: `'it''s'`.
fn quoted<'a>(
    quote: char,
    body: &'static str,
    escape: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    recognize(tuple((
        char(quote),
        many0_count(alt((is_not(body), tag(escape)))),
        char(quote),
    )))
}

fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        map(quoted('\'', "'", "''"), Token::Text),
        map(quoted('"', "\"", "\"\""), Token::Text),
        map(quoted('`', "`", "``"), Token::Text),
        value(Token::Marker, char('?')),
        map(is_not("'\"`?"), Token::Text),
        // An unterminated quote is plain text.
        map(take(1usize), Token::Text),
    ))(input)
}

/// Rewrite every `?` marker with `placeholder(n)`, numbering from 1.
pub fn rewrite_placeholders_with<F>(sql: &str, mut placeholder: F) -> String
where
    F: FnMut(usize) -> String,
{
    let mut out = String::with_capacity(sql.len());
    let mut count = 0;
    let mut rest = sql;

    while !rest.is_empty() {
        match token(rest) {
            Ok((next, Token::Text(text))) => {
                out.push_str(text);
                rest = next;
            }
            Ok((next, Token::Marker)) => {
                count += 1;
                out.push_str(&placeholder(count));
                rest = next;
            }
            Err(_) => {
                out.push_str(rest);
                break;
            }
        }
    }

    debug!(markers = count, "rewrote placeholders");
    out
}

/// Rewrite markers into `generator`'s parameter syntax.
pub fn rewrite_placeholders(sql: &str, generator: &dyn SqlGenerator) -> String {
    rewrite_placeholders_with(sql, |n| generator.placeholder(n))
}

/// Number of `?` markers outside quoted text.
pub fn count_placeholders(sql: &str) -> usize {
    let mut count = 0;
    rewrite_placeholders_with(sql, |n| {
        count = n;
        String::new()
    });
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::Dialect;
    use pretty_assertions::assert_eq;

    fn at_p(sql: &str) -> String {
        rewrite_placeholders_with(sql, |n| format!("@p{}", n))
    }

    #[test]
    fn test_rewrite() {
        assert_eq!(
            at_p("SELECT * FROM t WHERE a=? AND b=?"),
            "SELECT * FROM t WHERE a=@p1 AND b=@p2"
        );
        assert_eq!(at_p(""), "");
        assert_eq!(at_p("?"), "@p1");
        assert_eq!(at_p("??"), "@p1@p2");
        assert_eq!(at_p("no markers"), "no markers");
    }

    #[test]
    fn test_quoted_markers_are_text() {
        assert_eq!(
            at_p("SELECT '?', \"a?\" FROM t WHERE x = ? AND y = 'it''s?'"),
            "SELECT '?', \"a?\" FROM t WHERE x = @p1 AND y = 'it''s?'"
        );
        assert_eq!(at_p("`c?` = ?"), "`c?` = @p1");
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(at_p("a = 'oops ?"), "a = 'oops @p1");
    }

    #[test]
    fn test_dialect_forms() {
        let sql = "UPDATE t SET a = ?, b = ?";
        assert_eq!(
            rewrite_placeholders(sql, Dialect::Postgres.generator().as_ref()),
            "UPDATE t SET a = $1, b = $2"
        );
        assert_eq!(
            rewrite_placeholders(sql, Dialect::SqlServer.generator().as_ref()),
            "UPDATE t SET a = @p1, b = @p2"
        );
        assert_eq!(rewrite_placeholders(sql, Dialect::MySQL.generator().as_ref()), sql);
    }

    #[test]
    fn test_count_preserved() {
        for sql in ["", "?", "a ? b ? c ?", "'?' ? \"?\"", "x = 'unterminated ? ?"] {
            let rewritten = at_p(sql);
            assert_eq!(count_placeholders(sql), rewritten.matches("@p").count(), "{sql}");
        }
    }
}
