//! Grid snapping of the element under the pointer.
//!
//! Before a drag step is computed, the dragged element is normalized onto the
//! active grid so quantization error cannot pile up over many small moves.
//! How an element snaps depends on its kind, so strategies are looked up in a
//! dispatch table keyed by [`ElementKind`].
//!
//! Snapping is best effort. A kind without a registered strategy, a missing
//! element, or an inactive grid all produce an empty [`ChangeSet`].

use std::{collections::HashMap, fmt};

use log::{trace, warn};

use feyndraw_core::{
    element::{ElementKind, ElementRef, Elements},
    grid::fix_position_to_grid,
    identifier::Id,
    view::ViewContext,
};

use crate::change::{ChangeSet, Mutation};

/// Aligns one kind of element to the grid.
pub trait SnapStrategy {
    /// Mutations that put element `id` on the grid of `view`.
    ///
    /// Returns nothing if the element is already aligned or does not exist.
    fn snap(&self, id: Id, elements: &Elements, view: &ViewContext) -> Vec<Mutation>;
}

fn snap_anchor(id: Id, elements: &Elements, grid_size: f32) -> Option<Mutation> {
    let position = elements.anchor(id)?.position();
    let snapped = fix_position_to_grid(position, grid_size);
    (snapped != position).then_some(Mutation::SetAnchorPosition {
        id,
        position: snapped,
    })
}

/// Snaps an anchor to the nearest grid intersection
#[derive(Debug, Default, Clone, Copy)]
pub struct AnchorSnap;

impl SnapStrategy for AnchorSnap {
    fn snap(&self, id: Id, elements: &Elements, view: &ViewContext) -> Vec<Mutation> {
        if elements.anchor(id).is_none() {
            warn!(anchor:% = id; "Cannot snap missing anchor");
            return Vec::new();
        }
        snap_anchor(id, elements, view.grid_size).into_iter().collect()
    }
}

/// Snaps both endpoints of a propagator independently
#[derive(Debug, Default, Clone, Copy)]
pub struct PropagatorSnap;

impl SnapStrategy for PropagatorSnap {
    fn snap(&self, id: Id, elements: &Elements, view: &ViewContext) -> Vec<Mutation> {
        let Some(propagator) = elements.propagator(id) else {
            warn!(propagator:% = id; "Cannot snap missing propagator");
            return Vec::new();
        };
        let (anchor1, anchor2) = propagator.endpoints();
        [anchor1, anchor2]
            .into_iter()
            .filter_map(|anchor| snap_anchor(anchor, elements, view.grid_size))
            .collect()
    }
}

/// Dispatch table from element kind to snap strategy.
///
/// [`SnapResolver::default`] registers [`AnchorSnap`] and [`PropagatorSnap`].
pub struct SnapResolver {
    strategies: HashMap<ElementKind, Box<dyn SnapStrategy>>,
}

impl SnapResolver {
    /// A resolver without any strategy; every request is a no-op
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registers `strategy` for `kind`, replacing any previous one
    pub fn with_strategy(
        mut self,
        kind: ElementKind,
        strategy: impl SnapStrategy + 'static,
    ) -> Self {
        self.strategies.insert(kind, Box::new(strategy));
        self
    }

    pub fn has_strategy(&self, kind: ElementKind) -> bool {
        self.strategies.contains_key(&kind)
    }

    /// Mutations snapping `target` onto the grid of `view`.
    pub fn resolve(
        &self,
        target: ElementRef,
        elements: &Elements,
        view: &ViewContext,
    ) -> ChangeSet {
        if !view.has_grid() {
            return ChangeSet::new();
        }
        let Some(strategy) = self.strategies.get(&target.kind) else {
            trace!(kind:% = target.kind; "No snap strategy registered");
            return ChangeSet::new();
        };

        let changes = ChangeSet::from(strategy.snap(target.id, elements, view));
        trace!(element:% = target, mutations = changes.len(); "Snapped drag target");
        changes
    }
}

impl Default for SnapResolver {
    fn default() -> Self {
        Self::empty()
            .with_strategy(ElementKind::Anchors, AnchorSnap)
            .with_strategy(ElementKind::Propagators, PropagatorSnap)
    }
}

impl fmt::Debug for SnapResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<String> = self.strategies.keys().map(ToString::to_string).collect();
        kinds.sort();
        f.debug_struct("SnapResolver").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use feyndraw_core::{
        element::{Anchor, Propagator, PropagatorKind},
        geometry::Point,
    };

    use super::*;

    fn elements() -> Elements {
        let mut elements = Elements::new();
        elements.insert_anchor(Anchor::new(Id::new("a"), Point::new(13.0, 27.0)));
        elements.insert_anchor(Anchor::new(Id::new("b"), Point::new(40.0, 60.0)));
        elements.insert_propagator(Propagator::new(
            Id::new("p"),
            PropagatorKind::Fermion,
            Id::new("a"),
            Id::new("b"),
        ));
        elements
    }

    #[test]
    fn test_anchor_snaps_to_grid() {
        let resolver = SnapResolver::default();
        let changes = resolver.resolve(
            ElementRef::anchor(Id::new("a")),
            &elements(),
            &ViewContext::with_grid(20.0),
        );
        assert_eq!(
            changes.mutations(),
            &[Mutation::SetAnchorPosition {
                id: Id::new("a"),
                position: Point::new(20.0, 20.0),
            }]
        );
    }

    #[test]
    fn test_propagator_snaps_only_misaligned_endpoints() {
        let resolver = SnapResolver::default();
        let changes = resolver.resolve(
            ElementRef::propagator(Id::new("p")),
            &elements(),
            &ViewContext::with_grid(20.0),
        );
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_no_grid_is_noop() {
        let resolver = SnapResolver::default();
        let changes = resolver.resolve(
            ElementRef::anchor(Id::new("a")),
            &elements(),
            &ViewContext::default(),
        );
        assert!(changes.is_empty());
    }

    #[test]
    fn test_unregistered_kind_is_noop() {
        let resolver = SnapResolver::empty().with_strategy(ElementKind::Anchors, AnchorSnap);
        assert!(!resolver.has_strategy(ElementKind::Propagators));
        let changes = resolver.resolve(
            ElementRef::propagator(Id::new("p")),
            &elements(),
            &ViewContext::with_grid(20.0),
        );
        assert!(changes.is_empty());
    }

    #[test]
    fn test_missing_element_is_noop() {
        let resolver = SnapResolver::default();
        let changes = resolver.resolve(
            ElementRef::anchor(Id::new("ghost")),
            &elements(),
            &ViewContext::with_grid(20.0),
        );
        assert!(changes.is_empty());
    }
}
