use crate::ast::RowRange;
use crate::error::{SlqError, SlqResult};
use crate::kind::Kind;
use crate::transpiler::dialect::{Dialect, DialectConfig};
use crate::transpiler::traits::SqlGenerator;

/// MySQL has no "no limit" form; its docs recommend the largest BIGINT UNSIGNED.
const NO_LIMIT: u64 = u64::MAX;

pub struct MysqlGenerator {
    config: DialectConfig,
}

impl Default for MysqlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MysqlGenerator {
    pub fn new() -> Self {
        Self::with_config(Dialect::MySQL.default_config())
    }

    pub fn with_config(config: DialectConfig) -> Self {
        Self { config }
    }
}

impl SqlGenerator for MysqlGenerator {
    fn dialect(&self) -> Dialect {
        Dialect::MySQL
    }

    fn config(&self) -> &DialectConfig {
        &self.config
    }

    fn type_name(&self, kind: Kind) -> SlqResult<&'static str> {
        let name = match kind {
            Kind::Unknown | Kind::Text => "TEXT",
            Kind::Int => "BIGINT",
            Kind::Float => "DOUBLE",
            Kind::Decimal => "DECIMAL",
            Kind::Bool => "TINYINT(1)",
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

    fn string_literal(&self, s: &str) -> String {
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn range(&self, range: Option<&RowRange>) -> String {
        let Some(rr) = range.filter(|rr| !rr.is_unbounded()) else {
            return String::new();
        };
        match (rr.limit >= 0, rr.offset > 0) {
            (true, true) => format!("LIMIT {} OFFSET {}", rr.limit, rr.offset),
            (true, false) => format!("LIMIT {}", rr.limit),
            (false, true) => format!("LIMIT {} OFFSET {}", NO_LIMIT, rr.offset),
            (false, false) => String::new(),
        }
    }
}
