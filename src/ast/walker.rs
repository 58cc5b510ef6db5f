//! Visitor-driven traversal over an [`Ast`].
//!
//! Visitors are keyed by [`NodeType`]. Each visitor sees the node and a
//! read-only [`Cursor`] over the tree, and answers with a [`Transform`]:
//! keep the node, or replace it (the narrowing pattern). The walker writes
//! replacements back by index.
//!
//! The first visitor error stops the walk and is returned as is.
//! Replacements made before the failure stay in the tree; callers that need
//! a clean tree after an error must rebuild it.

use std::collections::HashMap;

use tracing::trace;

use super::{Ast, Node, NodeType, Segment};
use crate::error::SlqResult;

/// Position of a node: segment index, then index within the segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodePath {
    pub segment: usize,
    pub node: usize,
}

/// A visitor's verdict on a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    Keep,
    Replace(Node),
}

/// Read-only view of the tree around the node being visited.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    ast: &'a Ast,
    path: NodePath,
}

impl<'a> Cursor<'a> {
    pub fn new(ast: &'a Ast, path: NodePath) -> Self {
        Self { ast, path }
    }

    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    pub fn path(&self) -> NodePath {
        self.path
    }

    pub fn segment(&self) -> &'a Segment {
        &self.ast.segments()[self.path.segment]
    }

    pub fn prev_segment(&self) -> Option<&'a Segment> {
        self.path
            .segment
            .checked_sub(1)
            .and_then(|i| self.ast.segment(i))
    }

    pub fn next_segment(&self) -> Option<&'a Segment> {
        self.ast.segment(self.path.segment + 1)
    }

    /// Segments before the current one, in pipeline order.
    pub fn preceding(&self) -> &'a [Segment] {
        &self.ast.segments()[..self.path.segment]
    }
}

type Visitor<'v> = Box<dyn FnMut(&Cursor<'_>, &Node) -> SlqResult<Transform> + 'v>;

/// Walks every node once, in segment order then node order.
pub struct Walker<'a, 'v> {
    ast: &'a mut Ast,
    visitors: HashMap<NodeType, Visitor<'v>>,
}

impl<'a, 'v> Walker<'a, 'v> {
    pub fn new(ast: &'a mut Ast) -> Self {
        Self {
            ast,
            visitors: HashMap::new(),
        }
    }

    /// Register `visitor` for nodes of `node_type`, replacing any earlier one.
    pub fn add_visitor<F>(mut self, node_type: NodeType, visitor: F) -> Self
    where
        F: FnMut(&Cursor<'_>, &Node) -> SlqResult<Transform> + 'v,
    {
        self.visitors.insert(node_type, Box::new(visitor));
        self
    }

    pub fn walk(mut self) -> SlqResult<()> {
        for si in 0..self.ast.segments.len() {
            for ni in 0..self.ast.segments[si].nodes.len() {
                let path = NodePath { segment: si, node: ni };
                let node_type = self.ast.segments[si].nodes[ni].node_type();
                let Some(visit) = self.visitors.get_mut(&node_type) else {
                    continue;
                };

                trace!(segment = si, node = ni, %node_type, "visiting node");
                let cursor = Cursor::new(self.ast, path);
                let transform = visit(&cursor, &self.ast.segments[si].nodes[ni])?;

                if let Transform::Replace(node) = transform {
                    trace!(
                        segment = si,
                        node = ni,
                        from = %node_type,
                        to = %node.node_type(),
                        "replacing node"
                    );
                    self.ast.segments[si].nodes[ni] = node;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::ast::ColSelector;
    use crate::ast::fixtures;
    use crate::error::SlqError;

    fn to_col(_: &Cursor<'_>, node: &Node) -> SlqResult<Transform> {
        match node {
            Node::Selector(sel) => Ok(Transform::Replace(Node::ColSelector(ColSelector {
                table: None,
                column: sel.name.clone(),
                alias: None,
            }))),
            _ => Ok(Transform::Keep),
        }
    }

    #[test]
    fn test_visits_every_node_once_in_order() {
        let mut ast = fixtures::join1();
        let seen = RefCell::new(Vec::new());
        let mut walker = Walker::new(&mut ast);
        for t in [NodeType::Datasource, NodeType::Selector, NodeType::Join] {
            let seen = &seen;
            walker = walker.add_visitor(t, move |c, n| {
                seen.borrow_mut().push((c.path(), n.node_type()));
                Ok(Transform::Keep)
            });
        }
        walker.walk().unwrap();

        let seen = seen.into_inner();
        let paths: Vec<(usize, usize)> = seen.iter().map(|(p, _)| (p.segment, p.node)).collect();
        assert_eq!(
            paths,
            vec![(0, 0), (1, 0), (1, 1), (2, 0), (3, 0), (3, 1), (3, 2)]
        );
        assert_eq!(seen[4].1, NodeType::Join);
    }

    #[test]
    fn test_unregistered_types_untouched() {
        let mut ast = fixtures::select1();
        let before = ast.clone();
        Walker::new(&mut ast)
            .add_visitor(NodeType::RowRange, |_, _| Err(SlqError::structural("never called")))
            .walk()
            .unwrap();
        assert_eq!(ast, before);
    }

    #[test]
    fn test_replace() {
        let mut ast = fixtures::select1();
        Walker::new(&mut ast)
            .add_visitor(NodeType::Selector, to_col)
            .walk()
            .unwrap();
        for seg in &ast.segments()[1..] {
            assert!(seg.is_all(NodeType::ColSelector));
        }
    }

    #[test]
    fn test_first_error_aborts_without_rollback() {
        let mut ast = fixtures::join1();
        let mut calls = 0;
        let err = Walker::new(&mut ast)
            .add_visitor(NodeType::Selector, |c, n| {
                calls += 1;
                if c.path().segment == 3 && c.path().node == 1 {
                    return Err(SlqError::visitor(NodeType::Selector, "rejected"));
                }
                to_col(c, n)
            })
            .walk()
            .unwrap_err();

        assert!(matches!(err, SlqError::Visitor { node: NodeType::Selector, .. }));
        assert_eq!(calls, 4);

        // Nodes visited before the failure keep their replacement.
        let segs = ast.segments();
        assert!(segs[1].is_all(NodeType::ColSelector));
        assert_eq!(segs[3].nodes()[0].node_type(), NodeType::ColSelector);
        // The failing node and everything after it are untouched.
        assert_eq!(segs[3].nodes()[1], Node::selector("username"));
        assert_eq!(segs[3].nodes()[2], Node::selector("country"));
        assert_eq!(segs[2].nodes()[0].node_type(), NodeType::Join);
    }

    #[test]
    fn test_cursor_neighbours() {
        let ast = fixtures::select1();
        let cursor = Cursor::new(&ast, NodePath { segment: 1, node: 0 });
        assert_eq!(cursor.prev_segment().and_then(Segment::handle), Some("@mydb1"));
        assert_eq!(cursor.next_segment().map(Segment::len), Some(2));
        assert_eq!(cursor.preceding().len(), 1);

        let first = Cursor::new(&ast, NodePath { segment: 0, node: 0 });
        assert!(first.prev_segment().is_none());
    }
}
