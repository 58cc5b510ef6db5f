use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SlqError;

/// Reference to a data source, e.g. `@sakila`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datasource {
    pub handle: String,
}

/// A selector whose role (table or column) is not yet known, e.g. `.user`
/// or `.user.uid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selector {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
}

/// A selector resolved to a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TblSelector {
    /// Owning data source; `None` means the active source.
    #[serde(default)]
    pub handle: Option<String>,
    pub table: String,
    #[serde(default)]
    pub alias: Option<String>,
}

/// A selector resolved to a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColSelector {
    #[serde(default)]
    pub table: Option<String>,
    pub column: String,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL OUTER JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// A join of the two tables selected in the preceding segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    #[serde(default)]
    pub kind: JoinKind,
    #[serde(default)]
    pub constraint: Option<Expr>,
    /// Filled in by the join narrowing pass.
    #[serde(default)]
    pub left: Option<TblSelector>,
    #[serde(default)]
    pub right: Option<TblSelector>,
}

/// Row range `[offset:limit]`. A negative value means unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub offset: i64,
    pub limit: i64,
}

impl RowRange {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    /// Both offset and limit unspecified.
    pub fn is_unbounded(&self) -> bool {
        self.offset < 0 && self.limit < 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortTerm {
    pub column: ColRef,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub terms: Vec<SortTerm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Where {
    pub expr: Expr,
}

/// Column reference inside an expression, e.g. `.user.uid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColRef {
    #[serde(default)]
    pub table: Option<String>,
    pub column: String,
}

impl ColRef {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: column.into(),
        }
    }

    pub fn qualified(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            column: column.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Binary operators. Their SQL spelling comes from the dialect's operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Add,
    Sub,
    Mul,
    Div,
    Like,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 13] = [
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::Lt,
        BinaryOp::Le,
        BinaryOp::Gt,
        BinaryOp::Ge,
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Like,
    ];

    /// Configuration name of the operator.
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "eq",
            BinaryOp::Ne => "ne",
            BinaryOp::Lt => "lt",
            BinaryOp::Le => "le",
            BinaryOp::Gt => "gt",
            BinaryOp::Ge => "ge",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Like => "like",
        }
    }

    /// Logical connectives get parenthesized operands when nested.
    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BinaryOp {
    type Err = SlqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BinaryOp::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| SlqError::Config(format!("unknown operator '{}'", s)))
    }
}

/// Filter and join-constraint expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Column(ColRef),
    Literal(Literal),
    /// Dialect-neutral positional parameter, rendered as `?`.
    Placeholder,
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn col(column: impl Into<String>) -> Self {
        Expr::Column(ColRef::new(column))
    }

    pub fn qcol(table: impl Into<String>, column: impl Into<String>) -> Self {
        Expr::Column(ColRef::qualified(table, column))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn equals(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Eq, left, right)
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::And, left, right)
    }

    /// Number of placeholders in this expression, left to right.
    pub fn placeholder_count(&self) -> usize {
        match self {
            Expr::Placeholder => 1,
            Expr::Binary { left, right, .. } => {
                left.placeholder_count() + right.placeholder_count()
            }
            _ => 0,
        }
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Int(n)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Text(s.to_string())
    }
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

macro_rules! expr_from_literal {
    ($($t:ty),*) => {
        $(impl From<$t> for Expr {
            fn from(v: $t) -> Self {
                Expr::Literal(Literal::from(v))
            }
        })*
    };
}

expr_from_literal!(i64, bool, &str);
