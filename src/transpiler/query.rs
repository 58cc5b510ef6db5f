//! Clause composition.

use tracing::debug;

use crate::error::{SlqError, SlqResult};
use crate::transpiler::traits::SqlGenerator;

/// Rendered clause fragments, each including its leading keyword.
/// Empty strings are omitted when composing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clauses {
    pub select: String,
    pub from: String,
    pub filter: String,
    pub order_by: String,
    pub range: String,
}

/// Joins clause fragments into one statement in canonical order:
/// select, from, where, order by, range.
pub struct QueryBuilder<'g> {
    generator: &'g dyn SqlGenerator,
    clauses: Clauses,
}

impl<'g> QueryBuilder<'g> {
    pub fn new(generator: &'g dyn SqlGenerator) -> Self {
        Self {
            generator,
            clauses: Clauses::default(),
        }
    }

    pub fn set_select(&mut self, clause: impl Into<String>) -> &mut Self {
        self.clauses.select = clause.into();
        self
    }

    pub fn set_from(&mut self, clause: impl Into<String>) -> &mut Self {
        self.clauses.from = clause.into();
        self
    }

    pub fn set_where(&mut self, clause: impl Into<String>) -> &mut Self {
        self.clauses.filter = clause.into();
        self
    }

    pub fn set_order_by(&mut self, clause: impl Into<String>) -> &mut Self {
        self.clauses.order_by = clause.into();
        self
    }

    pub fn set_range(&mut self, clause: impl Into<String>) -> &mut Self {
        self.clauses.range = clause.into();
        self
    }

    pub fn clauses(&self) -> &Clauses {
        &self.clauses
    }

    /// Compose the statement. The generator may adjust clauses first.
    pub fn sql(&self) -> SlqResult<String> {
        if self.clauses.select.is_empty() || self.clauses.from.is_empty() {
            return Err(SlqError::structural("query needs both a select and a from clause"));
        }

        let mut clauses = self.clauses.clone();
        self.generator.prepare_clauses(&mut clauses);

        let sql = [
            clauses.select.as_str(),
            clauses.from.as_str(),
            clauses.filter.as_str(),
            clauses.order_by.as_str(),
            clauses.range.as_str(),
        ]
        .iter()
        .filter(|c| !c.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

        debug!(dialect = %self.generator.dialect(), %sql, "composed query");
        Ok(sql)
    }
}
