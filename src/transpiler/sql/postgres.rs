use crate::error::{SlqError, SlqResult};
use crate::kind::Kind;
use crate::transpiler::dialect::{Dialect, DialectConfig};
use crate::transpiler::traits::SqlGenerator;

pub struct PostgresGenerator {
    config: DialectConfig,
}

impl Default for PostgresGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PostgresGenerator {
    pub fn new() -> Self {
        Self::with_config(Dialect::Postgres.default_config())
    }

    pub fn with_config(config: DialectConfig) -> Self {
        Self { config }
    }
}

impl SqlGenerator for PostgresGenerator {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn config(&self) -> &DialectConfig {
        &self.config
    }

    fn type_name(&self, kind: Kind) -> SlqResult<&'static str> {
        let name = match kind {
            Kind::Unknown | Kind::Text => "TEXT",
            Kind::Int => "BIGINT",
            Kind::Float => "DOUBLE PRECISION",
            Kind::Decimal => "NUMERIC",
            Kind::Bool => "BOOLEAN",
            Kind::Datetime => "TIMESTAMP",
            Kind::Date => "DATE",
            Kind::Time => "TIME",
            Kind::Bytes => "BYTEA",
            Kind::Null => {
                return Err(SlqError::UnsupportedKind {
                    dialect: self.dialect().name(),
                    kind,
                });
            }
        };
        Ok(name)
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn bool_literal(&self, val: bool) -> String {
        if val {
            "true".to_string()
        } else {
            "false".to_string()
        }
    }

    fn copy_table(&self, from: &str, to: &str, copy_data: bool) -> String {
        let mut sql = format!(
            "CREATE TABLE {} AS TABLE {}",
            self.quote_identifier(to),
            self.quote_identifier(from)
        );
        if !copy_data {
            sql.push_str(" WITH NO DATA");
        }
        sql
    }
}
