//! A diagram: its elements and the view settings they are shown with.

use log::{debug, info};

use feyndraw_core::{
    element::{Anchor, ElementKind, Elements, Propagator, PropagatorKind, Selection},
    geometry::Point,
    identifier::Id,
    view::ViewContext,
};

use crate::{
    change::{ChangeSet, Mutation},
    config::{AppConfig, ViewConfig},
    error::EditError,
    ids::generate_element_id,
    topology,
};

/// Title, grid, pan and zoom of a diagram.
///
/// The grid keeps its size while switched off, so toggling it back on
/// restores the previous spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramInfo {
    title: String,
    grid_size: f32,
    show_grid: bool,
    show_anchors: bool,
    pan: Point,
    zoom: f32,
    view_config: ViewConfig,
}

impl DiagramInfo {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            title: String::new(),
            grid_size: config.grid().size(),
            show_grid: config.grid().enabled(),
            show_anchors: true,
            pan: Point::default(),
            zoom: config.view().clamp_zoom(1.0),
            view_config: *config.view(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Spacing of the grid, whether it is shown or not
    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    pub fn set_grid_size(&mut self, size: f32) {
        self.grid_size = size.max(0.0);
        debug!(size = self.grid_size; "Grid size changed");
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    pub fn show_anchors(&self) -> bool {
        self.show_anchors
    }

    pub fn toggle_anchors(&mut self) {
        self.show_anchors = !self.show_anchors;
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Moves the diagram origin by `delta` screen pixels
    pub fn pan_by(&mut self, delta: Point) {
        self.pan = self.pan.add_point(delta);
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Sets the zoom factor, clamped to the configured range
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = self.view_config.clamp_zoom(zoom);
        debug!(zoom = self.zoom; "Zoom changed");
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.view_config.zoom_step());
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - self.view_config.zoom_step());
    }

    /// Grid spacing in effect: zero while the grid is switched off
    pub fn effective_grid_size(&self) -> f32 {
        if self.show_grid { self.grid_size } else { 0.0 }
    }

    /// The view context geometry and drag code operate in
    pub fn view(&self) -> ViewContext {
        ViewContext {
            grid_size: self.effective_grid_size(),
            pan: self.pan,
            zoom: self.zoom,
            sidebar_width: self.view_config.sidebar_width(),
        }
    }
}

/// Elements of a diagram together with its [`DiagramInfo`]
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    elements: Elements,
    info: DiagramInfo,
}

impl Diagram {
    /// Creates an empty diagram
    pub fn new(config: &AppConfig) -> Self {
        Self {
            elements: Elements::new(),
            info: DiagramInfo::new(config),
        }
    }

    /// Creates a diagram around existing elements.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvariantViolation`] if `elements` is not a
    /// consistent graph.
    pub fn with_elements(config: &AppConfig, elements: Elements) -> Result<Self, EditError> {
        topology::validate(&elements)?;
        info!(
            anchors = elements.anchors().len(),
            propagators = elements.propagators().len();
            "Loaded diagram"
        );
        Ok(Self {
            elements,
            info: DiagramInfo::new(config),
        })
    }

    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    pub fn info(&self) -> &DiagramInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut DiagramInfo {
        &mut self.info
    }

    pub fn view(&self) -> ViewContext {
        self.info.view()
    }

    /// Applies a change-set atomically. See [`ChangeSet::apply`].
    pub fn apply(&mut self, changes: &ChangeSet) -> Result<(), EditError> {
        changes.apply(&mut self.elements)
    }

    /// Adds an anchor with a fresh id and returns the id
    pub fn add_anchor(&mut self, position: Point) -> Result<Id, EditError> {
        let id = generate_element_id(self.elements.anchors(), ElementKind::Anchors)?;
        self.apply(&ChangeSet::from(vec![Mutation::AddAnchor(Anchor::new(
            id, position,
        ))]))?;
        Ok(id)
    }

    /// Adds a propagator with a fresh id between two existing anchors
    pub fn add_propagator(
        &mut self,
        kind: PropagatorKind,
        anchor1: Id,
        anchor2: Id,
    ) -> Result<Id, EditError> {
        let id = generate_element_id(self.elements.propagators(), ElementKind::Propagators)?;
        self.apply(&ChangeSet::from(vec![Mutation::AddPropagator(
            Propagator::new(id, kind, anchor1, anchor2),
        )]))?;
        Ok(id)
    }

    /// Replaces the selection
    pub fn select(&mut self, selection: Selection) -> Result<(), EditError> {
        self.apply(&ChangeSet::from(vec![Mutation::Select(selection)]))
    }
}
