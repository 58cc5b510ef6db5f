//! Read-only structural queries over a (usually narrowed) AST.

use super::{Ast, ColSelector, Node, NodeType, OrderBy, RowRange, Segment, Where};
use crate::error::{SlqError, SlqResult};

/// Answers structural questions about an [`Ast`] without modifying it.
#[derive(Debug, Clone, Copy)]
pub struct Inspector<'a> {
    ast: &'a Ast,
}

impl<'a> Inspector<'a> {
    pub fn new(ast: &'a Ast) -> Self {
        Self { ast }
    }

    /// Segments whose nodes all produce a relation, in pipeline order.
    ///
    /// Data source segments never qualify.
    pub fn find_selectable_segments(&self) -> Vec<&'a Segment> {
        self.ast
            .segments()
            .iter()
            .filter(|seg| seg.is_selectable())
            .collect()
    }

    /// The last selectable segment.
    pub fn find_final_selectable_segment(&self) -> SlqResult<&'a Segment> {
        self.find_final_selectable_index()
            .map(|i| &self.ast.segments()[i])
    }

    /// Index of the last selectable segment.
    pub fn find_final_selectable_index(&self) -> SlqResult<usize> {
        self.ast
            .segments()
            .iter()
            .rposition(Segment::is_selectable)
            .ok_or_else(|| SlqError::structural("no selectable segments"))
    }

    pub fn count_nodes(&self, node_type: NodeType) -> usize {
        self.nodes().filter(|n| n.node_type() == node_type).count()
    }

    pub fn find_nodes(&self, node_type: NodeType) -> Vec<&'a Node> {
        self.nodes().filter(|n| n.node_type() == node_type).collect()
    }

    /// Handle of the first data source in the pipeline.
    pub fn find_first_handle(&self) -> Option<&'a str> {
        self.ast.segments().iter().find_map(Segment::handle)
    }

    /// Column selectors of the first all-column segment after the final
    /// selectable segment. `None` means select everything.
    pub fn find_column_segment(&self) -> SlqResult<Option<Vec<&'a ColSelector>>> {
        let start = self.find_final_selectable_index()? + 1;
        let cols = self.ast.segments()[start..]
            .iter()
            .find(|seg| seg.is_all(NodeType::ColSelector))
            .map(|seg| {
                seg.nodes()
                    .iter()
                    .filter_map(|n| match n {
                        Node::ColSelector(c) => Some(c),
                        _ => None,
                    })
                    .collect()
            });
        Ok(cols)
    }

    pub fn find_order_by(&self) -> Option<&'a OrderBy> {
        self.nodes().find_map(|n| match n {
            Node::OrderBy(o) => Some(o),
            _ => None,
        })
    }

    pub fn find_where(&self) -> Option<&'a Where> {
        self.nodes().find_map(|n| match n {
            Node::Where(w) => Some(w),
            _ => None,
        })
    }

    /// The last row range wins when several are written.
    pub fn find_row_range(&self) -> Option<&'a RowRange> {
        self.nodes()
            .filter_map(|n| match n {
                Node::RowRange(r) => Some(r),
                _ => None,
            })
            .last()
    }

    fn nodes(self) -> impl Iterator<Item = &'a Node> {
        self.ast.segments().iter().flat_map(|seg| seg.nodes().iter())
    }
}
