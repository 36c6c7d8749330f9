//! Bounding boxes and region selection.
//!
//! # Overview
//!
//! - [`diagram_bounding_box`] - Extent of every anchor of a diagram.
//! - [`selection_bounding_box`] - Extent of the current selection.
//! - [`elements_in_region`] - Marquee selection with a rectangle.
//! - [`elements_in_polygon`] - Free ("lasso") selection with a polygon.
//!
//! Propagators have no position of their own; their extent is the extent of
//! their two endpoints. A propagator is picked up by a region as soon as its
//! segment touches it, while an anchor must lie inside.

use log::debug;

use feyndraw_core::{
    element::{ElementRef, Elements, Selection},
    geometry::{Bounds, Point, polygon_contains, segments_intersect},
};

fn bounds_of(points: impl IntoIterator<Item = Point>) -> Option<Bounds> {
    points
        .into_iter()
        .map(Bounds::from_point)
        .reduce(|acc, bounds| acc.merge(&bounds))
}

/// Smallest box covering every anchor, or `None` for an empty diagram
pub fn diagram_bounding_box(elements: &Elements) -> Option<Bounds> {
    bounds_of(elements.anchors().values().map(|anchor| anchor.position()))
}

/// Smallest box covering the selected anchors and the endpoints of the
/// selected propagators, or `None` if nothing selected exists.
pub fn selection_bounding_box(elements: &Elements) -> Option<Bounds> {
    let selection = elements.selection();
    let anchors = selection
        .anchors()
        .iter()
        .filter_map(|id| elements.anchor(*id))
        .map(|anchor| anchor.position());
    let endpoints = selection
        .propagators()
        .iter()
        .filter_map(|id| elements.endpoints(*id))
        .flat_map(|(a, b)| [a, b]);

    bounds_of(anchors.chain(endpoints))
}

/// Elements touched by the rectangle `region`.
///
/// Anchors are selected when inside or on the edge of `region`. Propagators
/// are selected when any part of their segment lies in it.
pub fn elements_in_region(elements: &Elements, region: Bounds) -> Selection {
    let anchors = elements
        .anchors()
        .values()
        .filter(|anchor| region.contains_point(anchor.position()))
        .map(|anchor| ElementRef::anchor(anchor.id()));
    let propagators = elements
        .propagators_with_location()
        .filter(|(_, a, b)| region.intersects_segment(*a, *b))
        .map(|(propagator, _, _)| ElementRef::propagator(propagator.id()));

    let selection: Selection = anchors.chain(propagators).collect();
    debug!(
        anchors = selection.anchors().len(),
        propagators = selection.propagators().len();
        "Region selection"
    );
    selection
}

fn segment_touches_polygon(polygon: &[Point], a: Point, b: Point) -> bool {
    if polygon_contains(polygon, a) || polygon_contains(polygon, b) {
        return true;
    }
    (0..polygon.len()).any(|i| {
        let next = (i + 1) % polygon.len();
        segments_intersect(a, b, polygon[i], polygon[next])
    })
}

/// Elements touched by the closed polygon `polygon`.
///
/// Follows the rules of [`elements_in_region`]. A polygon with fewer than
/// three vertices selects nothing.
pub fn elements_in_polygon(elements: &Elements, polygon: &[Point]) -> Selection {
    if polygon.len() < 3 {
        return Selection::new();
    }

    let anchors = elements
        .anchors()
        .values()
        .filter(|anchor| polygon_contains(polygon, anchor.position()))
        .map(|anchor| ElementRef::anchor(anchor.id()));
    let propagators = elements
        .propagators_with_location()
        .filter(|(_, a, b)| segment_touches_polygon(polygon, *a, *b))
        .map(|(propagator, _, _)| ElementRef::propagator(propagator.id()));

    let selection: Selection = anchors.chain(propagators).collect();
    debug!(
        vertices = polygon.len(),
        selected = selection.len();
        "Lasso selection"
    );
    selection
}


#[cfg(test)]
mod proptest_tests {
    use feyndraw_core::{element::Anchor, identifier::Id};
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-500.0f32..500.0, -500.0f32..500.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn elements_strategy() -> impl Strategy<Value = Elements> {
        prop::collection::vec(point_strategy(), 1..20).prop_map(|points| {
            let mut elements = Elements::new();
            for (i, point) in points.into_iter().enumerate() {
                elements.insert_anchor(Anchor::new(Id::from_index(i as u64), point));
            }
            elements
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// The diagram bounding box contains every anchor.
    fn check_bounding_box_covers_anchors(elements: &Elements) -> Result<(), TestCaseError> {
        let bounds = diagram_bounding_box(elements)
            .ok_or_else(|| TestCaseError::fail("non-empty diagram has no bounds"))?;
        for anchor in elements.anchors().values() {
            prop_assert!(bounds.contains_point(anchor.position()));
        }
        Ok(())
    }

    /// Marquee with the diagram's own bounding box selects every anchor.
    fn check_full_region_selects_all(elements: &Elements) -> Result<(), TestCaseError> {
        let bounds = diagram_bounding_box(elements)
            .ok_or_else(|| TestCaseError::fail("non-empty diagram has no bounds"))?;
        let selection = elements_in_region(elements, bounds);
        prop_assert_eq!(selection.anchors().len(), elements.anchors().len());
        Ok(())
    }

    proptest! {
        #[test]
        fn bounding_box_covers_anchors(elements in elements_strategy()) {
            check_bounding_box_covers_anchors(&elements)?;
        }

        #[test]
        fn full_region_selects_all(elements in elements_strategy()) {
            check_full_region_selects_all(&elements)?;
        }
    }
}
