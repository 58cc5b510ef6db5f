//! # SLQ
//!
//! The core of a pipeline query language over heterogeneous data sources:
//! the query AST and its narrowing passes, value kind inference, and SQL
//! rendering for several dialects.
//!
//! ## Quick Example
//!
//! ```
//! use slq::prelude::*;
//!
//! // @sakila | .actor | .first_name, .last_name | [0:10]
//! let mut ast = Ast::new();
//! ast.push_segment(vec![Node::datasource("@sakila")])
//!     .push_segment(vec![Node::selector("actor")])
//!     .push_segment(vec![Node::selector("first_name"), Node::selector("last_name")])
//!     .push_segment(vec![Node::range(0, 10)]);
//! narrow(&mut ast).unwrap();
//!
//! let sql = ast.to_sql_with_dialect(Dialect::SqlServer).unwrap();
//! assert_eq!(
//!     sql,
//!     "SELECT \"first_name\", \"last_name\" FROM \"actor\" ORDER BY (SELECT 0) OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"
//! );
//! ```
//!
//! ## Kind detection
//!
//! ```
//! use slq::kind::{Kind, detect_kind};
//!
//! let (kind, normalizer) = detect_kind(["1989-11-09", "2001-01-01"]).unwrap();
//! assert_eq!(kind, Kind::Date);
//! assert!(normalizer.is_some());
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod handle;
pub mod kind;
pub mod schema;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::RenderConfig;
    pub use crate::error::*;
    pub use crate::handle::{TableHandle, unique_table_name};
    pub use crate::kind::{Detector, Kind, Sample, detect_kind};
    pub use crate::schema::{ColumnDef, TableDef};
    pub use crate::transpiler::{Dialect, SqlGenerator, ToSql};
}
