//! SQL transpiler.
//!
//! Turns narrowed ASTs and table definitions into dialect SQL. Everything a
//! dialect varies on (quoting, operators, paging, parameters, type names)
//! comes from its [`SqlGenerator`]; the builders here never hard-code it.

pub mod ddl;
pub mod dialect;
pub mod placeholders;
pub mod query;
pub mod select;
pub mod sql;
pub mod traits;

#[cfg(test)]
mod tests;

use crate::ast::Ast;
use crate::error::SlqResult;
use crate::schema::TableDef;

pub use ddl::{
    build_copy_table, build_create_table, build_drop_table, build_insert, build_truncate,
    build_update,
};
pub use dialect::{Dialect, DialectConfig, OperatorTable};
pub use placeholders::{count_placeholders, rewrite_placeholders, rewrite_placeholders_with};
pub use query::{Clauses, QueryBuilder};
pub use select::build_select;
pub use traits::{SqlGenerator, quote_with};

/// Trait for converting to SQL.
pub trait ToSql {
    /// Convert to SQL using the default dialect.
    fn to_sql(&self) -> SlqResult<String> {
        self.to_sql_with_dialect(Dialect::default())
    }

    /// Convert to SQL with a dialect's built-in configuration.
    fn to_sql_with_dialect(&self, dialect: Dialect) -> SlqResult<String> {
        self.to_sql_with(dialect.generator().as_ref())
    }

    /// Convert to SQL with a specific generator.
    fn to_sql_with(&self, generator: &dyn SqlGenerator) -> SlqResult<String>;
}

impl ToSql for Ast {
    fn to_sql_with(&self, generator: &dyn SqlGenerator) -> SlqResult<String> {
        build_select(self, generator)
    }
}

impl ToSql for TableDef {
    fn to_sql_with(&self, generator: &dyn SqlGenerator) -> SlqResult<String> {
        build_create_table(self, generator)
    }
}
