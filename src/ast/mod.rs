//! Query AST.
//!
//! A parsed query is an [`Ast`] holding an ordered list of [`Segment`]s, one
//! per pipeline stage as written left to right:
//!
//! ```text
//! @mydb1 | .user, .address | join(.user.uid == .address.uid) | .uid, .username
//! ───┬──   ───────┬───────   ──────────────┬───────────────   ───────┬───────
//!    │            │                        │                         └── column selectors
//!    │            │                        └── join
//!    │            └── table selectors
//!    └── data source
//! ```
//!
//! Each segment owns its sibling [`Node`]s. Upstream parsers emit unresolved
//! [`Selector`]s; the passes in [`narrow`] resolve them into table or column
//! selectors by way of a [`Walker`].

pub mod inspector;
pub mod narrow;
pub mod nodes;
pub mod walker;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::inspector::Inspector;
pub use self::narrow::{narrow, narrow_col_sel, narrow_join, narrow_selector, narrow_tbl_sel};
pub use self::nodes::{
    BinaryOp, ColRef, ColSelector, Datasource, Expr, Join, JoinKind, Literal, OrderBy, RowRange,
    Selector, SortOrder, SortTerm, TblSelector, Where,
};
pub use self::walker::{Cursor, NodePath, Transform, Walker};

/// Variant tag of a [`Node`]. Visitors are registered per tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Datasource,
    Selector,
    TblSelector,
    ColSelector,
    Join,
    RowRange,
    OrderBy,
    Where,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Datasource => "datasource",
            NodeType::Selector => "selector",
            NodeType::TblSelector => "tbl_selector",
            NodeType::ColSelector => "col_selector",
            NodeType::Join => "join",
            NodeType::RowRange => "row_range",
            NodeType::OrderBy => "order_by",
            NodeType::Where => "where",
        };
        f.write_str(name)
    }
}

/// A single AST node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Datasource(Datasource),
    Selector(Selector),
    TblSelector(TblSelector),
    ColSelector(ColSelector),
    Join(Join),
    RowRange(RowRange),
    OrderBy(OrderBy),
    Where(Where),
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Datasource(_) => NodeType::Datasource,
            Node::Selector(_) => NodeType::Selector,
            Node::TblSelector(_) => NodeType::TblSelector,
            Node::ColSelector(_) => NodeType::ColSelector,
            Node::Join(_) => NodeType::Join,
            Node::RowRange(_) => NodeType::RowRange,
            Node::OrderBy(_) => NodeType::OrderBy,
            Node::Where(_) => NodeType::Where,
        }
    }

    /// Whether this node yields a relation (a table or a join).
    pub fn produces_relation(&self) -> bool {
        match self {
            Node::TblSelector(_) | Node::Join(_) => true,
            Node::Datasource(_)
            | Node::Selector(_)
            | Node::ColSelector(_)
            | Node::RowRange(_)
            | Node::OrderBy(_)
            | Node::Where(_) => false,
        }
    }

    pub fn datasource(handle: impl Into<String>) -> Self {
        Node::Datasource(Datasource {
            handle: handle.into(),
        })
    }

    pub fn selector(name: impl Into<String>) -> Self {
        Node::Selector(Selector {
            name: name.into(),
            alias: None,
        })
    }

    pub fn join(kind: JoinKind, constraint: Option<Expr>) -> Self {
        Node::Join(Join {
            kind,
            constraint,
            left: None,
            right: None,
        })
    }

    pub fn range(offset: i64, limit: i64) -> Self {
        Node::RowRange(RowRange::new(offset, limit))
    }
}

/// One pipeline stage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    nodes: Vec<Node>,
}

impl Segment {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Non-empty, and every node produces a relation.
    pub fn is_selectable(&self) -> bool {
        !self.nodes.is_empty() && self.nodes.iter().all(Node::produces_relation)
    }

    /// Non-empty, and every node has type `node_type`.
    pub fn is_all(&self, node_type: NodeType) -> bool {
        !self.nodes.is_empty() && self.nodes.iter().all(|n| n.node_type() == node_type)
    }

    /// Handle of the first data source node in this segment.
    pub fn handle(&self) -> Option<&str> {
        self.nodes.iter().find_map(|n| match n {
            Node::Datasource(ds) => Some(ds.handle.as_str()),
            _ => None,
        })
    }
}

/// Root of a parsed query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ast {
    segments: Vec<Segment>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Append a segment built from `nodes`.
    pub fn push_segment(&mut self, nodes: Vec<Node>) -> &mut Self {
        self.segments.push(Segment::new(nodes));
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn node(&self, path: NodePath) -> Option<&Node> {
        self.segments.get(path.segment)?.nodes.get(path.node)
    }

    /// Replace the node at `path`, returning the previous node.
    pub fn replace_node(&mut self, path: NodePath, node: Node) -> Option<Node> {
        let slot = self.segments.get_mut(path.segment)?.nodes.get_mut(path.node)?;
        Some(std::mem::replace(slot, node))
    }
}
