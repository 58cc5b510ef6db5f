use crate::ast::RowRange;
use crate::error::{SlqError, SlqResult};
use crate::kind::Kind;
use crate::transpiler::dialect::{Dialect, DialectConfig};
use crate::transpiler::traits::SqlGenerator;

pub struct SqliteGenerator {
    config: DialectConfig,
}

impl Default for SqliteGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SqliteGenerator {
    pub fn new() -> Self {
        Self::with_config(Dialect::SQLite.default_config())
    }

    pub fn with_config(config: DialectConfig) -> Self {
        Self { config }
    }
}

impl SqlGenerator for SqliteGenerator {
    fn dialect(&self) -> Dialect {
        Dialect::SQLite
    }

    fn config(&self) -> &DialectConfig {
        &self.config
    }

    fn type_name(&self, kind: Kind) -> SlqResult<&'static str> {
        let name = match kind {
            Kind::Unknown | Kind::Text => "TEXT",
            Kind::Int => "INTEGER",
            Kind::Float => "REAL",
            Kind::Decimal => "NUMERIC",
            Kind::Bool => "BOOLEAN",
            Kind::Datetime => "DATETIME",
            Kind::Date => "DATE",
            Kind::Time => "TIME",
            Kind::Bytes => "BLOB",
            Kind::Null => {
                return Err(SlqError::UnsupportedKind {
                    dialect: self.dialect().name(),
                    kind,
                });
            }
        };
        Ok(name)
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn range(&self, range: Option<&RowRange>) -> String {
        let Some(rr) = range.filter(|rr| !rr.is_unbounded()) else {
            return String::new();
        };
        // OFFSET is only valid after LIMIT; -1 means no limit.
        match (rr.limit >= 0, rr.offset > 0) {
            (true, true) => format!("LIMIT {} OFFSET {}", rr.limit, rr.offset),
            (true, false) => format!("LIMIT {}", rr.limit),
            (false, true) => format!("LIMIT -1 OFFSET {}", rr.offset),
            (false, false) => String::new(),
        }
    }

    fn truncate_table(&self, table: &str) -> String {
        format!("DELETE FROM {}", self.quote_identifier(table))
    }

    fn copy_table(&self, from: &str, to: &str, copy_data: bool) -> String {
        let mut sql = format!(
            "CREATE TABLE {} AS SELECT * FROM {}",
            self.quote_identifier(to),
            self.quote_identifier(from)
        );
        if !copy_data {
            sql.push_str(" WHERE 0");
        }
        sql
    }
}
