//! Integration tests for complete editing scenarios
//!
//! These tests drive the public API the way a host would: take a snapshot,
//! ask the engine for a change-set, apply it, repeat.

use std::collections::HashSet;

use feyndraw::{
    Editor,
    config::{AppConfig, SplitConfig},
    drag::PointerEvent,
    element::{Anchor, ElementRef, Elements, Propagator, PropagatorKind, Selection},
    geometry::Point,
    identifier::Id,
    merge::merge_anchor,
    split::split_propagator,
    topology::{reachable_anchors, validate},
    view::DEFAULT_SIDEBAR_WIDTH,
};

fn id(name: &str) -> Id {
    Id::new(name)
}

/// `x ── A ──P1── B ── y`
fn line() -> Elements {
    let mut elements = Elements::new();
    for (name, x) in [("x", -50.0), ("A", 0.0), ("B", 10.0), ("y", 60.0)] {
        elements.insert_anchor(Anchor::new(id(name), Point::new(x, 0.0)));
    }
    for (name, a, b) in [("Px", "x", "A"), ("P1", "A", "B"), ("Py", "B", "y")] {
        elements.insert_propagator(Propagator::new(
            id(name),
            PropagatorKind::Fermion,
            id(a),
            id(b),
        ));
    }
    elements
}

#[test]
fn test_split_scenario() {
    let mut elements = line();
    let before = elements.clone();
    let outcome =
        split_propagator(&elements, id("P1"), Point::new(5.0, 5.0), &SplitConfig::default())
            .expect("split should succeed");
    outcome
        .changes
        .apply(&mut elements)
        .expect("split change-set should apply");

    let s = outcome.split_anchor;
    let br = outcome.branch_anchor;
    assert_eq!(outcome.target, ElementRef::anchor(br));
    assert_eq!(elements.anchor(s).unwrap().position(), Point::new(5.0, 5.0));
    assert_eq!(elements.anchor(br).unwrap().position(), Point::new(5.0, 5.0));
    assert_eq!(elements.propagator(id("P1")).unwrap().endpoints(), (id("A"), s));
    assert_eq!(
        elements.propagator(outcome.continuation).unwrap().endpoints(),
        (s, id("B"))
    );
    assert_eq!(
        elements.propagator(outcome.branch).unwrap().endpoints(),
        (s, br)
    );

    // Collections grow by exactly two each
    assert_eq!(elements.anchors().len(), before.anchors().len() + 2);
    assert_eq!(elements.propagators().len(), before.propagators().len() + 2);

    // Nothing but the split propagator changed
    for (key, anchor) in before.anchors() {
        assert_eq!(elements.anchor(*key), Some(anchor));
    }
    for (key, propagator) in before.propagators() {
        if *key != id("P1") {
            assert_eq!(elements.propagator(*key), Some(propagator));
        }
    }

    assert_eq!(validate(&elements), Ok(()));
}

#[test]
fn test_split_preserves_connectivity() {
    let mut elements = line();
    let reachable_before = reachable_anchors(&elements, id("A")).unwrap();

    let outcome =
        split_propagator(&elements, id("P1"), Point::new(5.0, 0.0), &SplitConfig::default())
            .unwrap();
    outcome.changes.apply(&mut elements).unwrap();

    let reachable_after = reachable_anchors(&elements, id("A")).unwrap();
    let mut expected: HashSet<Id> = reachable_before;
    expected.insert(outcome.split_anchor);
    expected.insert(outcome.branch_anchor);
    assert_eq!(reachable_after, expected);

    // The branch anchor is a leaf
    assert_eq!(
        elements
            .propagators_referencing(outcome.branch_anchor)
            .count(),
        1
    );
}

#[test]
fn test_merge_scenario() {
    let mut elements = Elements::new();
    elements.insert_anchor(Anchor::new(id("Y"), Point::new(20.0, 20.0)));
    elements.insert_anchor(Anchor::new(id("X"), Point::new(20.0, 20.0)));
    for (name, x, y) in [("n1", 0.0, 0.0), ("n2", 40.0, 0.0), ("n3", 20.0, 40.0)] {
        elements.insert_anchor(Anchor::new(id(name), Point::new(x, y)));
    }
    for (name, other) in [("q1", "n1"), ("q2", "n2"), ("q3", "n3")] {
        elements.insert_propagator(Propagator::new(
            id(name),
            PropagatorKind::Gluon,
            id("X"),
            id(other),
        ));
    }

    let changes = merge_anchor(&elements, id("X"), 0.5, true).unwrap();
    changes.apply(&mut elements).unwrap();

    assert!(elements.anchor(id("X")).is_none());
    assert_eq!(elements.anchors().len(), 4);
    for name in ["q1", "q2", "q3"] {
        let propagator = elements.propagator(id(name)).unwrap();
        assert_eq!(propagator.anchor1(), id("Y"));
        assert!(!propagator.references(id("X")));
    }
    assert_eq!(
        elements.selection(),
        &Selection::single(ElementRef::anchor(id("Y")))
    );
}

fn position_of(editor: &Editor, name: &str) -> Point {
    editor
        .diagram()
        .elements()
        .anchor(id(name))
        .expect("anchor should exist")
        .position()
}

#[test]
fn test_sticky_drag_scenario() {
    let mut elements = Elements::new();
    elements.insert_anchor(Anchor::new(id("a"), Point::new(0.0, 0.0)));
    let mut editor = Editor::with_elements(AppConfig::default(), elements).unwrap();
    let left = DEFAULT_SIDEBAR_WIDTH;

    editor
        .press(ElementRef::anchor(id("a")), PointerEvent::new(left, 0.0))
        .unwrap();

    editor.drag(PointerEvent::new(left + 9.0, 0.0)).unwrap();
    assert_eq!(position_of(&editor, "a"), Point::new(0.0, 0.0));

    editor.drag(PointerEvent::new(left + 11.0, 0.0)).unwrap();
    assert_eq!(position_of(&editor, "a"), Point::new(20.0, 0.0));

    // Measured from the committed step at +20, not from the press
    editor.drag(PointerEvent::new(left + 29.0, 0.0)).unwrap();
    assert_eq!(position_of(&editor, "a"), Point::new(20.0, 0.0));

    editor.release().unwrap();
    assert!(!editor.controller().is_dragging());
}

#[test]
fn test_grid_toggle_changes_drag_behaviour() {
    let mut elements = Elements::new();
    elements.insert_anchor(Anchor::new(id("a"), Point::new(0.0, 0.0)));
    let mut editor = Editor::with_elements(AppConfig::default(), elements).unwrap();
    editor.diagram_mut().info_mut().toggle_grid();
    let left = DEFAULT_SIDEBAR_WIDTH;

    editor
        .press(ElementRef::anchor(id("a")), PointerEvent::new(left, 0.0))
        .unwrap();
    editor.drag(PointerEvent::new(left + 0.5, 0.0)).unwrap();
    editor.drag(PointerEvent::new(left + 7.0, -3.0)).unwrap();
    editor.cancel();

    assert_eq!(position_of(&editor, "a"), Point::new(7.0, -3.0));
}
