//! Table and column definitions consumed by the DDL renderer.
//!
//! # Example
//! ```
//! use slq::schema::TableDef;
//! use slq::kind::Kind;
//!
//! let json = r#"{
//!     "name": "actor",
//!     "columns": [
//!         { "name": "actor_id", "kind": "int", "nullable": false },
//!         { "name": "first_name", "kind": "text" }
//!     ]
//! }"#;
//!
//! let tbl = TableDef::from_json(json).unwrap();
//! assert_eq!(tbl.columns[0].kind, Kind::Int);
//! assert!(tbl.columns[1].nullable);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{SlqError, SlqResult};
use crate::kind::Kind;

/// Table definition with columns in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub kind: Kind,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable: true,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

impl TableDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Builder: append a column.
    pub fn column(mut self, col: ColumnDef) -> Self {
        self.columns.push(col);
        self
    }

    /// Build from detected column kinds, e.g. the output of
    /// [`detect_columns`](crate::kind::detect_columns).
    ///
    /// Detected columns are nullable; the samples say nothing about whether
    /// later rows may be missing values.
    pub fn from_detected<S, K>(name: impl Into<String>, names: &[S], kinds: K) -> SlqResult<Self>
    where
        S: AsRef<str>,
        K: IntoIterator<Item = Kind>,
    {
        let kinds: Vec<Kind> = kinds.into_iter().collect();
        if kinds.len() != names.len() {
            return Err(SlqError::precondition(format!(
                "{} column names for {} detected kinds",
                names.len(),
                kinds.len()
            )));
        }

        let columns = names
            .iter()
            .zip(kinds)
            .map(|(n, k)| ColumnDef::new(n.as_ref(), k))
            .collect();
        Ok(Self {
            name: name.into(),
            columns,
        })
    }

    pub fn from_json(json: &str) -> SlqResult<Self> {
        serde_json::from_str(json).map_err(|e| SlqError::Config(e.to_string()))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn find_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{Sample, detect_columns};

    #[test]
    fn test_builder() {
        let tbl = TableDef::new("actor")
            .column(ColumnDef::new("actor_id", Kind::Int).not_null())
            .column(ColumnDef::new("name", Kind::Text));
        assert_eq!(tbl.column_names(), vec!["actor_id", "name"]);
        assert!(!tbl.find_column("actor_id").unwrap().nullable);
        assert!(tbl.find_column("missing").is_none());
    }

    #[test]
    fn test_from_detected() {
        let rows = vec![
            vec![Sample::from(1i64), Sample::from("alice"), Sample::from("1989-11-09")],
            vec![Sample::from(2i64), Sample::from("bob"), Sample::Null],
        ];
        let detected = detect_columns(&rows).unwrap();
        let tbl = TableDef::from_detected(
            "people",
            &["id", "name", "born"],
            detected.iter().map(|(k, _)| *k),
        )
        .unwrap();

        let kinds: Vec<Kind> = tbl.columns.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![Kind::Int, Kind::Text, Kind::Date]);
        assert!(tbl.columns.iter().all(|c| c.nullable));
    }

    #[test]
    fn test_from_detected_length_mismatch() {
        let err = TableDef::from_detected("t", &["a"], [Kind::Int, Kind::Text]).unwrap_err();
        assert!(matches!(err, SlqError::Precondition(_)));
    }

    #[test]
    fn test_from_json_bad_kind() {
        let json = r#"{"name": "t", "columns": [{"name": "a", "kind": "varchar"}]}"#;
        assert!(matches!(TableDef::from_json(json), Err(SlqError::Config(_))));
    }
}
