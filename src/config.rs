//! Render configuration.
//!
//! Per-dialect overrides loaded from TOML and merged onto each dialect's
//! built-in [`DialectConfig`]:
//!
//! ```toml
//! default_dialect = "sqlserver"
//!
//! [dialects.postgres]
//! quote = "\""
//!
//! [dialects.postgres.ops]
//! like = "ILIKE"
//!
//! [dialects.sqlserver.defaults]
//! datetime = "'2000-01-01T00:00:00'"
//! ```
//!
//! Nothing here is global; callers pass the resulting generator around.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ast::BinaryOp;
use crate::error::{SlqError, SlqResult};
use crate::kind::Kind;
use crate::transpiler::{Dialect, DialectConfig, SqlGenerator};

/// Overrides for one dialect. Unset fields keep the built-in value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col_quote: Option<char>,
    /// Operator name (`eq`, `like`, ...) to SQL symbol.
    pub ops: BTreeMap<String, String>,
    /// Kind name to DEFAULT literal.
    pub defaults: BTreeMap<String, String>,
}

impl DialectOverride {
    /// Apply onto `config`. Only named operators and kinds change.
    pub fn apply(&self, config: &mut DialectConfig) -> SlqResult<()> {
        if let Some(q) = self.quote {
            config.quote = q;
        }
        if let Some(q) = self.col_quote {
            config.col_quote = q;
        }
        for (name, symbol) in &self.ops {
            let op: BinaryOp = name.parse()?;
            config.ops.set(op, symbol.clone());
        }
        for (name, literal) in &self.defaults {
            let kind: Kind = name
                .parse()
                .map_err(|_| SlqError::Config(format!("unknown kind '{}' in defaults", name)))?;
            if kind == Kind::Null {
                return Err(SlqError::Config("kind null has no DEFAULT literal".into()));
            }
            config.defaults.insert(kind, literal.clone());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub default_dialect: Dialect,
    /// Keyed by dialect name (`postgres`, `sqlite`, `mysql`, `sqlserver`).
    pub dialects: BTreeMap<String, DialectOverride>,
}

impl RenderConfig {
    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> SlqResult<Self> {
        let config: RenderConfig = toml::from_str(text)?;
        for name in config.dialects.keys() {
            let dialect: Dialect = name.parse()?;
            config.dialect_config(dialect)?;
        }
        debug!(dialects = config.dialects.len(), "loaded render config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> SlqResult<String> {
        toml::to_string(self).map_err(|e| SlqError::Config(e.to_string()))
    }

    /// Built-in configuration for `dialect` with overrides applied.
    pub fn dialect_config(&self, dialect: Dialect) -> SlqResult<DialectConfig> {
        let mut config = dialect.default_config();
        if let Some(ov) = self.dialects.get(dialect.name()) {
            ov.apply(&mut config)?;
        }
        Ok(config)
    }

    pub fn generator(&self, dialect: Dialect) -> SlqResult<Box<dyn SqlGenerator>> {
        Ok(dialect.generator_with(self.dialect_config(dialect)?))
    }

    pub fn default_generator(&self) -> SlqResult<Box<dyn SqlGenerator>> {
        self.generator(self.default_dialect)
    }
}
