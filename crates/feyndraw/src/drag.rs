//! The interactive drag controller.
//!
//! A drag gesture is a small state machine:
//!
//! ```text
//!            press                      release / cancel
//!   Idle ─────────────▶ Dragging ─────────────────────────▶ Idle
//!                        │    ▲
//!                        └────┘ move
//! ```
//!
//! - **press** picks the drag target. An already selected element drags the
//!   whole selection. Otherwise an alt-press on a propagator first splits it
//!   and continues with the new branch anchor, and the target becomes the
//!   selection.
//! - **move** snaps the target, converts the pointer movement since the last
//!   committed step into diagram units, and commits it through the grid
//!   stickiness rule. The origin only advances by what was committed, so
//!   thresholds are measured from the last grid step.
//! - **release** ends the gesture and merges an anchor target into any
//!   coincident anchor. **cancel** ends it without merging.
//!
//! Every operation returns a [`ChangeSet`] for the host to apply before the
//! next event arrives.

use std::mem;

use indexmap::IndexSet;
use log::{debug, trace};

use feyndraw_core::{
    element::{ElementKind, ElementRef, Elements, Selection},
    geometry::Point,
    grid::{delta_to_diagram, delta_to_screen, fix_delta_to_grid, screen_to_diagram},
    identifier::Id,
    view::ViewContext,
};

use crate::{
    change::{ChangeSet, Mutation},
    config::SplitConfig,
    error::EditError,
    merge::merge_anchor,
    snap::SnapResolver,
    split::split_propagator,
};

/// The fields of a pointer event the controller needs.
///
/// `position` is in host-window (screen) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub alt_key: bool,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            alt_key: false,
        }
    }

    /// The same event with the alt modifier held
    pub fn with_alt(mut self) -> Self {
        self.alt_key = true;
        self
    }
}

/// An active drag gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    /// The element the pointer holds.
    pub target: ElementRef,
    /// Screen position of the last committed step.
    pub origin: Point,
}

/// State of the drag controller between events
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Gesture),
}

/// Turns pointer events into change-sets.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
    snap: SnapResolver,
}

impl DragController {
    pub fn new(snap: SnapResolver) -> Self {
        Self {
            state: DragState::Idle,
            snap,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The element being dragged, if any
    pub fn target(&self) -> Option<ElementRef> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging(gesture) => Some(gesture.target),
        }
    }

    /// Starts a gesture on `target`.
    ///
    /// A press during an active gesture abandons that gesture first.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if `target` does not exist, or any
    /// error of [`split_propagator`]. The controller stays idle on error.
    pub fn press(
        &mut self,
        target: ElementRef,
        event: PointerEvent,
        elements: &Elements,
        view: &ViewContext,
        split: &SplitConfig,
    ) -> Result<ChangeSet, EditError> {
        if self.is_dragging() {
            debug!("Press during an active drag, abandoning it");
        }
        self.state = DragState::Idle;

        if !elements.contains(target) {
            return Err(EditError::NotFound {
                kind: target.kind,
                id: target.id,
            });
        }

        let mut changes = ChangeSet::new();
        let mut target = target;

        if elements.selection().contains(target) {
            debug!(
                element:% = target,
                selected = elements.selection().len();
                "Dragging selection"
            );
        } else {
            if event.alt_key && target.kind == ElementKind::Propagators {
                let at = screen_to_diagram(event.position, view);
                let outcome = split_propagator(elements, target.id, at, split)?;
                changes.append(outcome.changes);
                target = outcome.target;
            }
            changes.push(Mutation::Select(Selection::single(target)));
            debug!(element:% = target; "Dragging element");
        }

        self.state = DragState::Dragging(Gesture {
            target,
            origin: event.position,
        });
        Ok(changes)
    }

    /// Handles a pointer move.
    ///
    /// Without an active gesture this is a no-op.
    pub fn drag(
        &mut self,
        event: PointerEvent,
        elements: &Elements,
        view: &ViewContext,
    ) -> ChangeSet {
        let DragState::Dragging(gesture) = self.state else {
            trace!("Move without an active drag");
            return ChangeSet::new();
        };

        let mut changes = self.snap.resolve(gesture.target, elements, view);

        let pointer_delta = event.position.sub_point(gesture.origin);
        let committed = fix_delta_to_grid(delta_to_diagram(pointer_delta, view), view.grid_size);
        if committed.is_zero() {
            return changes;
        }

        let ids = moved_anchors(elements);
        if !ids.is_empty() {
            changes.push(Mutation::MoveAnchors {
                ids,
                delta: committed,
            });
        }

        let origin = gesture.origin.add_point(delta_to_screen(committed, view));
        self.state = DragState::Dragging(Gesture { origin, ..gesture });

        trace!(
            dx = committed.x(),
            dy = committed.y(),
            origin_x = origin.x(),
            origin_y = origin.y();
            "Committed drag step"
        );
        changes
    }

    /// Ends the gesture, merging a dragged anchor into a coincident one.
    ///
    /// The controller is idle afterwards even when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if the dragged anchor disappeared
    /// during the gesture.
    pub fn release(
        &mut self,
        elements: &Elements,
        merge_tolerance: f32,
    ) -> Result<ChangeSet, EditError> {
        let DragState::Dragging(gesture) = mem::take(&mut self.state) else {
            return Ok(ChangeSet::new());
        };

        match gesture.target.kind {
            ElementKind::Anchors => {
                merge_anchor(elements, gesture.target.id, merge_tolerance, true)
            }
            ElementKind::Propagators => Ok(ChangeSet::new()),
        }
    }

    /// Puts back a state saved before a step the host could not apply
    pub(crate) fn restore(&mut self, state: DragState) {
        self.state = state;
    }

    /// Abandons the gesture without merging
    pub fn cancel(&mut self) {
        if let DragState::Dragging(gesture) = mem::take(&mut self.state) {
            debug!(element:% = gesture.target; "Drag cancelled");
        }
    }
}

/// Anchors a drag step moves: the selected anchors and both endpoints of
/// every selected propagator, each once.
fn moved_anchors(elements: &Elements) -> Vec<Id> {
    let selection = elements.selection();
    let mut ids: IndexSet<Id> = selection
        .anchors()
        .iter()
        .copied()
        .filter(|id| elements.anchor(*id).is_some())
        .collect();
    for id in selection.propagators() {
        if let Some(propagator) = elements.propagator(*id) {
            let (anchor1, anchor2) = propagator.endpoints();
            ids.insert(anchor1);
            ids.insert(anchor2);
        }
    }
    ids.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use feyndraw_core::{
        element::{Anchor, Propagator, PropagatorKind},
        view::DEFAULT_SIDEBAR_WIDTH,
    };

    use super::*;

    fn diagram() -> Elements {
        let mut elements = Elements::new();
        elements.insert_anchor(Anchor::new(Id::new("a"), Point::new(0.0, 0.0)));
        elements.insert_anchor(Anchor::new(Id::new("b"), Point::new(100.0, 0.0)));
        elements.insert_anchor(Anchor::new(Id::new("c"), Point::new(100.0, 100.0)));
        elements.insert_propagator(Propagator::new(
            Id::new("p"),
            PropagatorKind::Fermion,
            Id::new("a"),
            Id::new("b"),
        ));
        elements
    }

    fn position(elements: &Elements, id: &str) -> Point {
        elements.anchor(Id::new(id)).unwrap().position()
    }

    fn press(
        controller: &mut DragController,
        elements: &mut Elements,
        target: ElementRef,
        event: PointerEvent,
        view: &ViewContext,
    ) {
        let changes = controller
            .press(target, event, elements, view, &SplitConfig::default())
            .unwrap();
        changes.apply(elements).unwrap();
    }

    fn drag(controller: &mut DragController, elements: &mut Elements, x: f32, view: &ViewContext) {
        let changes = controller.drag(PointerEvent::new(x, 0.0), elements, view);
        changes.apply(elements).unwrap();
    }

    #[test]
    fn test_sticky_drag_on_grid() {
        let view = ViewContext::with_grid(20.0);
        let mut elements = diagram();
        let mut controller = DragController::default();
        press(
            &mut controller,
            &mut elements,
            ElementRef::anchor(Id::new("a")),
            PointerEvent::new(300.0, 0.0),
            &view,
        );

        drag(&mut controller, &mut elements, 309.0, &view);
        assert_eq!(position(&elements, "a"), Point::new(0.0, 0.0));

        drag(&mut controller, &mut elements, 311.0, &view);
        assert_eq!(position(&elements, "a"), Point::new(20.0, 0.0));
        match controller.state() {
            DragState::Dragging(gesture) => assert_eq!(gesture.origin, Point::new(320.0, 0.0)),
            DragState::Idle => panic!("gesture ended early"),
        }

        drag(&mut controller, &mut elements, 329.0, &view);
        assert_eq!(position(&elements, "a"), Point::new(20.0, 0.0));

        drag(&mut controller, &mut elements, 331.0, &view);
        assert_eq!(position(&elements, "a"), Point::new(40.0, 0.0));
    }

    #[test]
    fn test_drag_selected_propagator_moves_both_endpoints_once() {
        let view = ViewContext::with_grid(20.0);
        let mut elements = diagram();
        elements
            .selection_mut()
            .insert(ElementRef::propagator(Id::new("p")));
        elements.selection_mut().insert(ElementRef::anchor(Id::new("a")));

        let mut controller = DragController::default();
        press(
            &mut controller,
            &mut elements,
            ElementRef::propagator(Id::new("p")),
            PointerEvent::new(0.0, 0.0),
            &view,
        );
        // Already selected: the selection is kept
        assert_eq!(elements.selection().len(), 2);

        drag(&mut controller, &mut elements, 40.0, &view);
        assert_eq!(position(&elements, "a"), Point::new(40.0, 0.0));
        assert_eq!(position(&elements, "b"), Point::new(140.0, 0.0));
        assert_eq!(position(&elements, "c"), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_drag_honours_zoom() {
        let view = ViewContext {
            zoom: 2.0,
            ..ViewContext::with_grid(20.0)
        };
        let mut elements = diagram();
        let mut controller = DragController::default();
        press(
            &mut controller,
            &mut elements,
            ElementRef::anchor(Id::new("a")),
            PointerEvent::new(0.0, 0.0),
            &view,
        );

        // 30px at zoom 2 is 15 diagram units: commits one cell
        drag(&mut controller, &mut elements, 30.0, &view);
        assert_eq!(position(&elements, "a"), Point::new(20.0, 0.0));
        assert_eq!(
            controller.state(),
            DragState::Dragging(Gesture {
                target: ElementRef::anchor(Id::new("a")),
                origin: Point::new(40.0, 0.0),
            })
        );
    }

    #[test]
    fn test_alt_press_splits_and_drags_branch() {
        let view = ViewContext::default();
        let mut elements = diagram();
        let mut controller = DragController::default();
        let event = PointerEvent::new(DEFAULT_SIDEBAR_WIDTH + 50.0, 0.0).with_alt();
        press(
            &mut controller,
            &mut elements,
            ElementRef::propagator(Id::new("p")),
            event,
            &view,
        );

        assert_eq!(elements.anchors().len(), 5);
        assert_eq!(elements.propagators().len(), 3);

        let target = controller.target().unwrap();
        assert_eq!(target.kind, ElementKind::Anchors);
        assert_eq!(elements.selection(), &Selection::single(target));
        assert_eq!(
            elements.anchor(target.id).unwrap().position(),
            Point::new(50.0, 0.0)
        );
    }

    #[test]
    fn test_move_without_gesture_is_noop() {
        let mut controller = DragController::default();
        let changes = controller.drag(
            PointerEvent::new(50.0, 50.0),
            &diagram(),
            &ViewContext::default(),
        );
        assert!(changes.is_empty());
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn test_release_merges_coincident_anchor() {
        let view = ViewContext::with_grid(20.0);
        let mut elements = diagram();
        elements.insert_propagator(Propagator::new(
            Id::new("q"),
            PropagatorKind::Gluon,
            Id::new("c"),
            Id::new("a"),
        ));
        let mut controller = DragController::default();
        press(
            &mut controller,
            &mut elements,
            ElementRef::anchor(Id::new("c")),
            PointerEvent::new(0.0, 0.0),
            &view,
        );
        let changes = controller.drag(PointerEvent::new(0.0, -100.0), &elements, &view);
        changes.apply(&mut elements).unwrap();
        assert_eq!(position(&elements, "c"), Point::new(100.0, 0.0));

        let changes = controller.release(&elements, 0.5).unwrap();
        changes.apply(&mut elements).unwrap();

        assert_eq!(controller.state(), DragState::Idle);
        assert!(elements.anchor(Id::new("c")).is_none());
        assert_eq!(
            elements.propagator(Id::new("q")).unwrap().endpoints(),
            (Id::new("b"), Id::new("a"))
        );
        assert_eq!(
            elements.selection(),
            &Selection::single(ElementRef::anchor(Id::new("b")))
        );
    }

    #[test]
    fn test_release_on_propagator_never_merges() {
        let view = ViewContext::default();
        let mut elements = diagram();
        let mut controller = DragController::default();
        press(
            &mut controller,
            &mut elements,
            ElementRef::propagator(Id::new("p")),
            PointerEvent::new(0.0, 0.0),
            &view,
        );
        let changes = controller.release(&elements, 1000.0).unwrap();
        assert!(changes.is_empty());
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut elements = diagram();
        let mut controller = DragController::default();
        press(
            &mut controller,
            &mut elements,
            ElementRef::anchor(Id::new("a")),
            PointerEvent::new(0.0, 0.0),
            &ViewContext::default(),
        );
        controller.cancel();
        assert_eq!(controller.state(), DragState::Idle);
        assert!(controller.release(&elements, 0.5).unwrap().is_empty());
    }

    #[test]
    fn test_press_missing_element() {
        let mut controller = DragController::default();
        let result = controller.press(
            ElementRef::anchor(Id::new("ghost")),
            PointerEvent::default(),
            &diagram(),
            &ViewContext::default(),
            &SplitConfig::default(),
        );
        assert_eq!(result, Err(EditError::anchor_not_found(Id::new("ghost"))));
        assert!(!controller.is_dragging());
    }
}
