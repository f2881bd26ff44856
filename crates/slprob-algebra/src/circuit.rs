//! A small weighted formula and its bottom-up fold.
//!
//! Not an inference engine: the caller builds the formula, and is
//! responsible for the children of an `Or` being mutually exclusive and the
//! children of an `And` being independent, as a compiled circuit guarantees.
//! Nodes may only reference earlier nodes, so insertion order is a
//! topological order and evaluation is a single forward pass.
//!
//! Deterministic children are simplified away at construction: `And(x, True)`
//! is `x`, `Or(x, False)` is `x`, and so on.

use std::collections::BTreeMap;

use slprob_core::errors::EvaluationError;

use crate::algebra::WeightAlgebra;

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub enum Node<W> {
    True,
    False,
    Atom(W),
    Not(NodeId),
    And(Vec<NodeId>),
    Or(Vec<NodeId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Query {
    name: String,
    node: NodeId,
    evidence: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circuit<W> {
    nodes: Vec<Node<W>>,
    queries: Vec<Query>,
}

impl<W> Default for Circuit<W> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            queries: Vec::new(),
        }
    }
}

impl<W> Circuit<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<W>> {
        self.nodes.get(id)
    }

    /// Names of the registered queries, in registration order.
    pub fn query_names(&self) -> impl Iterator<Item = &str> {
        self.queries.iter().map(|q| q.name.as_str())
    }

    fn push(&mut self, node: Node<W>) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn check(&self, id: NodeId) -> Result<NodeId, EvaluationError> {
        if id < self.nodes.len() {
            Ok(id)
        } else {
            Err(EvaluationError::DanglingNode { node: id })
        }
    }

    fn is_true(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id), Some(Node::True))
    }

    fn is_false(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id), Some(Node::False))
    }

    /// A deterministic fact or its absence.
    pub fn constant(&mut self, value: bool) -> NodeId {
        self.push(if value { Node::True } else { Node::False })
    }

    pub fn atom(&mut self, weight: W) -> NodeId {
        self.push(Node::Atom(weight))
    }

    pub fn not(&mut self, child: NodeId) -> Result<NodeId, EvaluationError> {
        let child = self.check(child)?;
        if self.is_true(child) {
            return Ok(self.constant(false));
        }
        if self.is_false(child) {
            return Ok(self.constant(true));
        }
        Ok(self.push(Node::Not(child)))
    }

    pub fn and(
        &mut self,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, EvaluationError> {
        let mut kept = Vec::new();
        for child in children {
            let child = self.check(child)?;
            if self.is_false(child) {
                return Ok(self.constant(false));
            }
            if !self.is_true(child) {
                kept.push(child);
            }
        }
        Ok(match kept.len() {
            0 => self.constant(true),
            1 => kept[0],
            _ => self.push(Node::And(kept)),
        })
    }

    pub fn or(
        &mut self,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, EvaluationError> {
        let mut kept = Vec::new();
        for child in children {
            let child = self.check(child)?;
            if self.is_true(child) {
                return Ok(self.constant(true));
            }
            if !self.is_false(child) {
                kept.push(child);
            }
        }
        Ok(match kept.len() {
            0 => self.constant(false),
            1 => kept[0],
            _ => self.push(Node::Or(kept)),
        })
    }

    /// Register a query without evidence.
    pub fn query(&mut self, name: impl Into<String>, node: NodeId) -> Result<(), EvaluationError> {
        let node = self.check(node)?;
        self.queries.push(Query {
            name: name.into(),
            node,
            evidence: None,
        });
        Ok(())
    }

    /// Register a query conditioned on evidence. `joint` is the node for
    /// query-and-evidence.
    pub fn query_given(
        &mut self,
        name: impl Into<String>,
        joint: NodeId,
        evidence: NodeId,
    ) -> Result<(), EvaluationError> {
        let node = self.check(joint)?;
        let evidence = self.check(evidence)?;
        self.queries.push(Query {
            name: name.into(),
            node,
            evidence: Some(evidence),
        });
        Ok(())
    }

    /// Same structure with every atom weight replaced by `f(weight)`.
    pub fn map_atoms<V, E>(
        &self,
        mut f: impl FnMut(&W) -> Result<V, E>,
    ) -> Result<Circuit<V>, E> {
        let nodes = self
            .nodes
            .iter()
            .map(|node| {
                Ok(match node {
                    Node::True => Node::True,
                    Node::False => Node::False,
                    Node::Atom(w) => Node::Atom(f(w)?),
                    Node::Not(c) => Node::Not(*c),
                    Node::And(cs) => Node::And(cs.clone()),
                    Node::Or(cs) => Node::Or(cs.clone()),
                })
            })
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Circuit {
            nodes,
            queries: self.queries.clone(),
        })
    }

    /// Fold every node with `algebra` and condition each query on its
    /// evidence (on `one` when it has none).
    pub fn evaluate<A>(&self, algebra: &A) -> Result<BTreeMap<String, W>, EvaluationError>
    where
        A: WeightAlgebra<Weight = W>,
        W: Clone + std::fmt::Debug,
    {
        let mut values: Vec<W> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let value = match node {
                Node::True => algebra.one(),
                Node::False => algebra.zero(),
                Node::Atom(w) => w.clone(),
                Node::Not(c) => algebra.negate(&values[*c])?,
                Node::And(cs) => fold(cs, &values, |a, b| algebra.times(a, b), algebra.one()),
                Node::Or(cs) => fold(cs, &values, |a, b| algebra.plus(a, b), algebra.zero()),
            };
            values.push(value);
        }

        let mut results = BTreeMap::new();
        for query in &self.queries {
            let joint = algebra.value(&values[query.node]);
            let evidence = match query.evidence {
                Some(e) => algebra.value(&values[e]),
                None => algebra.one(),
            };
            let result = algebra.normalize(&joint, &evidence);
            tracing::trace!(query = %query.name, ?result, "query evaluated");
            results.insert(query.name.clone(), result);
        }
        Ok(results)
    }
}

/// Left fold over children, seeded with the first child. `identity` only
/// answers for an empty list.
fn fold<W: Clone>(
    children: &[NodeId],
    values: &[W],
    op: impl Fn(&W, &W) -> W,
    identity: W,
) -> W {
    let mut iter = children.iter();
    let Some(first) = iter.next() else {
        return identity;
    };
    iter.fold(values[*first].clone(), |acc, c| op(&acc, &values[*c]))
}
