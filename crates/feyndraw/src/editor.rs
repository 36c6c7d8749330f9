//! The host-facing editing façade.
//!
//! [`Editor`] owns a [`Diagram`] and a [`DragController`] and applies every
//! change-set the controller produces, so hosts that do not keep their own
//! state container can drive the engine with raw pointer events.

use log::{debug, warn};

use feyndraw_core::{
    element::{ElementRef, Elements},
    geometry::{Bounds, Point},
    grid::screen_to_diagram,
};

use crate::{
    config::AppConfig,
    diagram::Diagram,
    drag::{DragController, PointerEvent},
    error::EditError,
    region::{elements_in_polygon, elements_in_region},
    snap::SnapResolver,
};

/// A diagram being edited
#[derive(Debug)]
pub struct Editor {
    config: AppConfig,
    diagram: Diagram,
    controller: DragController,
}

impl Editor {
    /// Creates an editor for an empty diagram
    pub fn new(config: AppConfig) -> Self {
        let diagram = Diagram::new(&config);
        Self {
            config,
            diagram,
            controller: DragController::default(),
        }
    }

    /// Creates an editor for existing elements.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvariantViolation`] if `elements` is inconsistent.
    pub fn with_elements(config: AppConfig, elements: Elements) -> Result<Self, EditError> {
        let diagram = Diagram::with_elements(&config, elements)?;
        Ok(Self {
            config,
            diagram,
            controller: DragController::default(),
        })
    }

    /// Replaces the snap strategies used while dragging
    pub fn with_snap_resolver(mut self, snap: SnapResolver) -> Self {
        self.controller = DragController::new(snap);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn diagram_mut(&mut self) -> &mut Diagram {
        &mut self.diagram
    }

    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    /// Starts a drag on `target`.
    ///
    /// On error no change is applied and no gesture is active.
    pub fn press(&mut self, target: ElementRef, event: PointerEvent) -> Result<(), EditError> {
        let view = self.diagram.view();
        let changes = self.controller.press(
            target,
            event,
            self.diagram.elements(),
            &view,
            self.config.split(),
        )?;
        if let Err(err) = self.diagram.apply(&changes) {
            self.controller.cancel();
            return Err(err);
        }
        Ok(())
    }

    /// Moves the active drag, if any.
    ///
    /// If the step cannot be applied, the gesture keeps its previous origin.
    pub fn drag(&mut self, event: PointerEvent) -> Result<(), EditError> {
        let view = self.diagram.view();
        let previous = self.controller.state();
        let changes = self.controller.drag(event, self.diagram.elements(), &view);
        if let Err(err) = self.diagram.apply(&changes) {
            self.controller.restore(previous);
            return Err(err);
        }
        Ok(())
    }

    /// Ends the active drag, merging the dragged anchor where it landed.
    pub fn release(&mut self) -> Result<(), EditError> {
        let changes = self
            .controller
            .release(self.diagram.elements(), self.config.edit().merge_tolerance())?;
        self.diagram.apply(&changes)
    }

    /// Abandons the active drag
    pub fn cancel(&mut self) {
        self.controller.cancel();
    }

    /// Selects everything touched by the marquee spanned by two screen points.
    ///
    /// Returns the number of selected elements.
    pub fn select_region(&mut self, start: Point, end: Point) -> Result<usize, EditError> {
        if self.controller.is_dragging() {
            warn!("Region selection during a drag");
        }
        let view = self.diagram.view();
        let region = Bounds::from_corners(
            screen_to_diagram(start, &view),
            screen_to_diagram(end, &view),
        );
        let selection = elements_in_region(self.diagram.elements(), region);
        let count = selection.len();
        self.diagram.select(selection)?;
        debug!(selected = count; "Selected region");
        Ok(count)
    }

    /// Selects everything touched by a lasso through the given screen points.
    ///
    /// Returns the number of selected elements.
    pub fn select_lasso(&mut self, points: &[Point]) -> Result<usize, EditError> {
        let view = self.diagram.view();
        let polygon: Vec<Point> = points
            .iter()
            .map(|point| screen_to_diagram(*point, &view))
            .collect();
        let selection = elements_in_polygon(self.diagram.elements(), &polygon);
        let count = selection.len();
        self.diagram.select(selection)?;
        Ok(count)
    }
}
