use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ast::BinaryOp;
use crate::error::SlqError;
use crate::kind::Kind;
use crate::transpiler::sql::mysql::MysqlGenerator;
use crate::transpiler::sql::postgres::PostgresGenerator;
use crate::transpiler::sql::sqlite::SqliteGenerator;
use crate::transpiler::sql::sqlserver::SqlServerGenerator;
use crate::transpiler::traits::SqlGenerator;

/// Supported SQL Dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Postgres,
    SQLite,
    MySQL,
    SqlServer,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::Postgres
    }
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [
        Dialect::Postgres,
        Dialect::SQLite,
        Dialect::MySQL,
        Dialect::SqlServer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::SQLite => "sqlite",
            Dialect::MySQL => "mysql",
            Dialect::SqlServer => "sqlserver",
        }
    }

    /// Built-in configuration for this dialect.
    pub fn default_config(&self) -> DialectConfig {
        let mut config = DialectConfig::base();
        match self {
            Dialect::Postgres => {
                config.defaults.insert(Kind::Bool, "false".into());
                config.defaults.insert(Kind::Bytes, "''".into());
            }
            Dialect::SQLite => {
                config.defaults.insert(Kind::Bytes, "X''".into());
            }
            Dialect::MySQL => {
                config.quote = '`';
                config.col_quote = '`';
                config.defaults.insert(Kind::Datetime, "'1970-01-01 00:00:00'".into());
                // TEXT and BLOB columns only take expression defaults.
                for kind in [Kind::Unknown, Kind::Text, Kind::Bytes] {
                    config.defaults.insert(kind, "('')".into());
                }
            }
            Dialect::SqlServer => {
                config.ops.set(BinaryOp::Ne, "<>");
                config.defaults.insert(Kind::Bytes, "0x".into());
            }
        }
        config
    }

    /// Generator with this dialect's built-in configuration.
    pub fn generator(&self) -> Box<dyn SqlGenerator> {
        self.generator_with(self.default_config())
    }

    pub fn generator_with(&self, config: DialectConfig) -> Box<dyn SqlGenerator> {
        match self {
            Dialect::Postgres => Box::new(PostgresGenerator::with_config(config)),
            Dialect::SQLite => Box::new(SqliteGenerator::with_config(config)),
            Dialect::MySQL => Box::new(MysqlGenerator::with_config(config)),
            Dialect::SqlServer => Box::new(SqlServerGenerator::with_config(config)),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = SlqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .iter()
            .copied()
            .find(|d| d.name() == s)
            .ok_or_else(|| SlqError::Config(format!("unknown dialect '{}'", s)))
    }
}

/// Operator symbols keyed by operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorTable(BTreeMap<BinaryOp, String>);

impl OperatorTable {
    /// Symbols shared by every dialect unless overridden.
    pub fn base() -> Self {
        let table = BinaryOp::ALL
            .iter()
            .map(|op| (*op, base_symbol(*op).to_string()))
            .collect();
        Self(table)
    }

    /// Symbol for `op`; operators missing from the table use the base symbol.
    pub fn symbol(&self, op: BinaryOp) -> &str {
        self.0.get(&op).map(String::as_str).unwrap_or_else(|| base_symbol(op))
    }

    pub fn set(&mut self, op: BinaryOp, symbol: impl Into<String>) {
        self.0.insert(op, symbol.into());
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::base()
    }
}

fn base_symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Eq => "=",
        BinaryOp::Ne => "!=",
        BinaryOp::Lt => "<",
        BinaryOp::Le => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::Ge => ">=",
        BinaryOp::And => "AND",
        BinaryOp::Or => "OR",
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Like => "LIKE",
    }
}

/// Quoting, operator symbols and DEFAULT literals for one dialect.
///
/// Owned by a single generator and never mutated after it is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialectConfig {
    /// Quote for table identifiers.
    pub quote: char,
    /// Quote for column identifiers.
    pub col_quote: char,
    #[serde(default)]
    pub ops: OperatorTable,
    /// `DEFAULT` literal per kind for NOT NULL columns in CREATE TABLE.
    #[serde(default)]
    pub defaults: HashMap<Kind, String>,
}

impl DialectConfig {
    pub fn base() -> Self {
        let defaults = [
            (Kind::Unknown, "''"),
            (Kind::Text, "''"),
            (Kind::Int, "0"),
            (Kind::Float, "0"),
            (Kind::Decimal, "0"),
            (Kind::Bool, "0"),
            (Kind::Datetime, "'1970-01-01T00:00:00'"),
            (Kind::Date, "'1970-01-01'"),
            (Kind::Time, "'00:00:00'"),
            (Kind::Bytes, "''"),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.to_string()))
        .collect();

        Self {
            quote: '"',
            col_quote: '"',
            ops: OperatorTable::base(),
            defaults,
        }
    }
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self::base()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_names() {
        for d in Dialect::ALL {
            assert_eq!(d.name().parse::<Dialect>().unwrap(), d);
            assert_eq!(d.generator().dialect(), d);
        }
        assert!("oracle".parse::<Dialect>().is_err());
        assert_eq!(Dialect::default(), Dialect::Postgres);
    }

    #[test]
    fn test_operator_table() {
        let mut ops = OperatorTable::base();
        assert_eq!(ops.symbol(BinaryOp::Eq), "=");
        ops.set(BinaryOp::Eq, "==");
        assert_eq!(ops.symbol(BinaryOp::Eq), "==");
        assert_eq!(ops.symbol(BinaryOp::And), "AND");

        let partial: OperatorTable = serde_json::from_str(r#"{"like": "ILIKE"}"#).unwrap();
        assert_eq!(partial.symbol(BinaryOp::Like), "ILIKE");
        assert_eq!(partial.symbol(BinaryOp::Ge), ">=");
    }

    #[test]
    fn test_configs_are_independent() {
        let pg = Dialect::Postgres.default_config();
        let ms = Dialect::SqlServer.default_config();
        assert_eq!(pg.ops.symbol(BinaryOp::Ne), "!=");
        assert_eq!(ms.ops.symbol(BinaryOp::Ne), "<>");
        assert_eq!(Dialect::MySQL.default_config().quote, '`');
    }

    #[test]
    fn test_every_kind_has_a_default() {
        for d in Dialect::ALL {
            let config = d.default_config();
            for kind in Kind::ALL {
                if kind != Kind::Null {
                    assert!(config.defaults.contains_key(&kind), "{d} {kind}");
                }
            }
        }
    }
}
