use tracing::debug;

use crate::ast::RowRange;
use crate::error::{SlqError, SlqResult};
use crate::kind::Kind;
use crate::transpiler::dialect::{Dialect, DialectConfig};
use crate::transpiler::query::Clauses;
use crate::transpiler::traits::SqlGenerator;

/// Deterministic no-op ordering for paged queries without ORDER BY.
const NEUTRAL_ORDER_BY: &str = "ORDER BY (SELECT 0)";

pub struct SqlServerGenerator {
    config: DialectConfig,
}

impl Default for SqlServerGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlServerGenerator {
    pub fn new() -> Self {
        Self::with_config(Dialect::SqlServer.default_config())
    }

    pub fn with_config(config: DialectConfig) -> Self {
        Self { config }
    }
}

impl SqlGenerator for SqlServerGenerator {
    fn dialect(&self) -> Dialect {
        Dialect::SqlServer
    }

    fn config(&self) -> &DialectConfig {
        &self.config
    }

    fn type_name(&self, kind: Kind) -> SlqResult<&'static str> {
        let name = match kind {
            Kind::Unknown | Kind::Text => "NVARCHAR(MAX)",
            Kind::Int => "BIGINT",
            Kind::Float => "FLOAT",
            Kind::Decimal => "DECIMAL",
            Kind::Bool => "BIT",
            Kind::Datetime => "DATETIME",
            Kind::Date => "DATE",
            Kind::Time => "TIME",
            Kind::Bytes => "VARBINARY(MAX)",
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
        format!("@p{}", index)
    }

    /// `OFFSET n ROWS [FETCH NEXT m ROWS ONLY]`; a missing offset is 0.
    fn range(&self, range: Option<&RowRange>) -> String {
        let Some(rr) = range.filter(|rr| !rr.is_unbounded()) else {
            return String::new();
        };

        let mut sql = format!("OFFSET {} ROWS", rr.offset.max(0));
        if rr.limit >= 0 {
            sql.push_str(&format!(" FETCH NEXT {} ROWS ONLY", rr.limit));
        }
        debug!(dialect = %self.dialect(), fragment = %sql, "rendered range fragment");
        sql
    }

    /// OFFSET/FETCH is only valid after an ORDER BY.
    fn prepare_clauses(&self, clauses: &mut Clauses) {
        if !clauses.range.is_empty() && clauses.order_by.is_empty() {
            clauses.order_by = NEUTRAL_ORDER_BY.to_string();
        }
    }

    fn copy_table(&self, from: &str, to: &str, copy_data: bool) -> String {
        let mut sql = format!(
            "SELECT * INTO {} FROM {}",
            self.quote_identifier(to),
            self.quote_identifier(from)
        );
        if !copy_data {
            sql.push_str(" WHERE 1 = 0");
        }
        sql
    }
}
