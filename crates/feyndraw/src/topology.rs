//! Graph-level queries and invariant checks.
//!
//! The diagram is an undirected multigraph: anchors are nodes and
//! propagators are edges. This module checks the structural invariants every
//! engine-produced state must satisfy and answers connectivity questions.

use std::collections::{HashMap, HashSet};

use petgraph::{
    algo::connected_components,
    graph::{NodeIndex, UnGraph},
    visit::Bfs,
};

use feyndraw_core::{element::Elements, identifier::Id};

use crate::error::EditError;

/// Checks the structural invariants of a diagram.
///
/// - every propagator joins two distinct anchors,
/// - both endpoints exist in the anchor collection,
/// - the selection only names existing elements.
///
/// # Errors
///
/// Returns [`EditError::InvariantViolation`] describing the first violation found.
pub fn validate(elements: &Elements) -> Result<(), EditError> {
    for propagator in elements.propagators().values() {
        let (anchor1, anchor2) = propagator.endpoints();
        if anchor1 == anchor2 {
            return Err(EditError::InvariantViolation(format!(
                "propagator `{}` starts and ends at anchor `{anchor1}`",
                propagator.id()
            )));
        }
        for anchor in [anchor1, anchor2] {
            if elements.anchor(anchor).is_none() {
                return Err(EditError::InvariantViolation(format!(
                    "propagator `{}` references missing anchor `{anchor}`",
                    propagator.id()
                )));
            }
        }
    }

    for element in elements.selection().iter() {
        if !elements.contains(element) {
            return Err(EditError::InvariantViolation(format!(
                "selection references missing element {element}"
            )));
        }
    }

    Ok(())
}

/// Builds the undirected connectivity graph of a diagram.
///
/// Node weights are anchor ids and edge weights propagator ids. Propagators
/// with a dangling endpoint are left out.
pub fn connectivity_graph(elements: &Elements) -> (UnGraph<Id, Id>, HashMap<Id, NodeIndex>) {
    let mut graph = UnGraph::with_capacity(elements.anchors().len(), elements.propagators().len());
    let mut indices = HashMap::with_capacity(elements.anchors().len());

    for id in elements.anchors().keys() {
        indices.insert(*id, graph.add_node(*id));
    }
    for propagator in elements.propagators().values() {
        let (anchor1, anchor2) = propagator.endpoints();
        if let (Some(a), Some(b)) = (indices.get(&anchor1), indices.get(&anchor2)) {
            graph.add_edge(*a, *b, propagator.id());
        }
    }

    (graph, indices)
}

/// Returns every anchor reachable from `from` through propagators, `from` included.
///
/// # Errors
///
/// Returns [`EditError::NotFound`] if `from` is not an anchor of the diagram.
pub fn reachable_anchors(elements: &Elements, from: Id) -> Result<HashSet<Id>, EditError> {
    let (graph, indices) = connectivity_graph(elements);
    let start = *indices
        .get(&from)
        .ok_or_else(|| EditError::anchor_not_found(from))?;

    let mut reached = HashSet::new();
    let mut bfs = Bfs::new(&graph, start);
    while let Some(node) = bfs.next(&graph) {
        reached.insert(graph[node]);
    }
    Ok(reached)
}

/// Number of connected pieces the diagram consists of.
///
/// An isolated anchor counts as its own piece.
pub fn component_count(elements: &Elements) -> usize {
    let (graph, _) = connectivity_graph(elements);
    connected_components(&graph)
}
