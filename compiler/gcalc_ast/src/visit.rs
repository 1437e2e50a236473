//! Visitor pattern implementation for traversing the AST.
//!
//! Implement [`Visitor`] to perform an operation over a tree; every method
//! has a default that simply walks into the children. Nodes implement
//! [`Visitable`] to dispatch to the right method.

use crate::ast::{AstNode, BinaryOpNode, CallNode, Constant};

/// The result type for visitor operations.
pub type VisitResult<T = ()> = Result<T, VisitError>;

/// An error raised by a visitor to abort the traversal.
#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    /// An error with a custom message.
    #[error("{0}")]
    Custom(String),
}

impl VisitError {
    /// Creates a new custom error with the given message.
    pub fn custom<T: Into<String>>(msg: T) -> Self {
        VisitError::Custom(msg.into())
    }
}

/// A trait for types that can be visited by a `Visitor`.
pub trait Visitable {
    /// Accepts a visitor and calls the appropriate visit method.
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output>;

    /// Visits the children of this node with the given visitor.
    ///
    /// The default implementation does nothing.
    fn visit_children<V: Visitor + ?Sized>(&self, _visitor: &mut V) -> VisitResult<V::Output> {
        Ok(Default::default())
    }
}

/// A visitor for traversing the AST.
///
/// The default implementations visit children and return `Default::default()`.
pub trait Visitor {
    /// The output type of the visitor.
    type Output: Default;

    fn visit_number(&mut self, _text: &str) -> VisitResult<Self::Output> {
        Ok(Default::default())
    }

    fn visit_constant(&mut self, _constant: Constant) -> VisitResult<Self::Output> {
        Ok(Default::default())
    }

    fn visit_variable(&mut self) -> VisitResult<Self::Output> {
        Ok(Default::default())
    }

    fn visit_binary(&mut self, node: &BinaryOpNode) -> VisitResult<Self::Output> {
        self.visit_children(node)
    }

    fn visit_call(&mut self, node: &CallNode) -> VisitResult<Self::Output> {
        self.visit_children(node)
    }

    // Helper to visit children of a node
    fn visit_children<T: Visitable + ?Sized>(&mut self, node: &T) -> VisitResult<Self::Output> {
        node.visit_children(self)
    }
}

impl Visitable for AstNode {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        match self {
            AstNode::NumberLiteral(text) => visitor.visit_number(text),
            AstNode::Constant(constant) => visitor.visit_constant(*constant),
            AstNode::Variable => visitor.visit_variable(),
            AstNode::BinaryOp(node) => visitor.visit_binary(node),
            AstNode::Call(node) => visitor.visit_call(node),
        }
    }
}

impl Visitable for BinaryOpNode {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        visitor.visit_binary(self)
    }

    fn visit_children<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        self.left.accept(visitor)?;
        self.right.accept(visitor)?;
        Ok(Default::default())
    }
}

impl Visitable for CallNode {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        visitor.visit_call(self)
    }

    fn visit_children<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        self.argument.accept(visitor)?;
        Ok(Default::default())
    }
}

/// Shape summary of a tree: node count, depth, and whether the free
/// variable occurs anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total number of nodes
    pub nodes: usize,
    /// Length of the longest root-to-leaf path, a lone leaf has depth 1
    pub depth: usize,
    /// Whether `X` occurs in the tree
    pub uses_variable: bool,
}

impl TreeStats {
    /// Collect the statistics of `node`
    pub fn of(node: &AstNode) -> Self {
        let mut collector = StatsCollector::default();
        // StatsCollector never raises an error
        let _ = node.accept(&mut collector);
        collector.stats
    }
}

#[derive(Default)]
struct StatsCollector {
    stats: TreeStats,
    current_depth: usize,
}

impl StatsCollector {
    fn leaf(&mut self) -> VisitResult {
        self.stats.nodes += 1;
        self.stats.depth = self.stats.depth.max(self.current_depth + 1);
        Ok(())
    }

    fn enter<T: Visitable + ?Sized>(&mut self, node: &T) -> VisitResult {
        self.leaf()?;
        self.current_depth += 1;
        let result = self.visit_children(node);
        self.current_depth -= 1;
        result
    }
}

impl Visitor for StatsCollector {
    type Output = ();

    fn visit_number(&mut self, _text: &str) -> VisitResult {
        self.leaf()
    }

    fn visit_constant(&mut self, _constant: Constant) -> VisitResult {
        self.leaf()
    }

    fn visit_variable(&mut self) -> VisitResult {
        self.stats.uses_variable = true;
        self.leaf()
    }

    fn visit_binary(&mut self, node: &BinaryOpNode) -> VisitResult {
        self.enter(node)
    }

    fn visit_call(&mut self, node: &CallNode) -> VisitResult {
        self.enter(node)
    }
}
