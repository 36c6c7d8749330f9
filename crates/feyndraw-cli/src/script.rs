//! Session scripts: an initial diagram plus the events to replay on it.
//!
//! Scripts are TOML. Pointer coordinates are host-window (screen)
//! coordinates, exactly as a UI would report them.
//!
//! ```toml
//! title = "electron self-energy"
//!
//! [[anchors]]
//! id = "A"
//! x = 0
//! y = 0
//!
//! [[anchors]]
//! id = "B"
//! x = 100
//! y = 0
//!
//! [[propagators]]
//! id = "P1"
//! kind = "fermion"
//! anchor1 = "A"
//! anchor2 = "B"
//!
//! [[events]]
//! action = "press"
//! kind = "propagators"
//! id = "P1"
//! x = 290
//! y = 0
//! alt = true
//!
//! [[events]]
//! action = "move"
//! x = 290
//! y = 60
//!
//! [[events]]
//! action = "release"
//! ```

use std::collections::HashSet;

use log::debug;
use serde::Deserialize;
use toml::Spanned;

use feyndraw::{
    Editor, EditError,
    drag::PointerEvent,
    element::{Anchor, ElementKind, ElementRef, Elements, Propagator, PropagatorKind},
    geometry::Point,
    identifier::Id,
};

use crate::error::CliError;

/// An anchor of the initial diagram
#[derive(Debug, Clone, Deserialize)]
pub struct AnchorSpec {
    pub id: Spanned<Id>,
    pub x: f32,
    pub y: f32,
}

/// A propagator of the initial diagram
#[derive(Debug, Clone, Deserialize)]
pub struct PropagatorSpec {
    pub id: Spanned<Id>,
    #[serde(default)]
    pub kind: PropagatorKind,
    pub anchor1: Id,
    pub anchor2: Id,
}

/// One step of the replayed session
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Event {
    Press {
        kind: ElementKind,
        id: Id,
        x: f32,
        y: f32,
        #[serde(default)]
        alt: bool,
    },
    Move {
        x: f32,
        y: f32,
    },
    Release,
    Cancel,
    SelectRegion {
        from: [f32; 2],
        to: [f32; 2],
    },
    SelectLasso {
        points: Vec<[f32; 2]>,
    },
    Pan {
        dx: f32,
        dy: f32,
    },
    SetZoom {
        zoom: f32,
    },
    ZoomIn,
    ZoomOut,
    SetGridSize {
        size: f32,
    },
    ToggleGrid,
    ToggleAnchors,
    SetTitle {
        title: String,
    },
}

fn point([x, y]: [f32; 2]) -> Point {
    Point::new(x, y)
}

impl Event {
    /// The `action` tag of the event
    pub fn action(&self) -> &'static str {
        match self {
            Self::Press { .. } => "press",
            Self::Move { .. } => "move",
            Self::Release => "release",
            Self::Cancel => "cancel",
            Self::SelectRegion { .. } => "select_region",
            Self::SelectLasso { .. } => "select_lasso",
            Self::Pan { .. } => "pan",
            Self::SetZoom { .. } => "set_zoom",
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",
            Self::SetGridSize { .. } => "set_grid_size",
            Self::ToggleGrid => "toggle_grid",
            Self::ToggleAnchors => "toggle_anchors",
            Self::SetTitle { .. } => "set_title",
        }
    }

    /// Feeds the event to `editor`
    pub fn apply(&self, editor: &mut Editor) -> Result<(), EditError> {
        match self {
            Self::Press {
                kind,
                id,
                x,
                y,
                alt,
            } => {
                let mut event = PointerEvent::new(*x, *y);
                event.alt_key = *alt;
                editor.press(ElementRef::new(*kind, *id), event)
            }
            Self::Move { x, y } => editor.drag(PointerEvent::new(*x, *y)),
            Self::Release => editor.release(),
            Self::Cancel => {
                editor.cancel();
                Ok(())
            }
            Self::SelectRegion { from, to } => editor
                .select_region(point(*from), point(*to))
                .map(|_| ()),
            Self::SelectLasso { points } => {
                let points: Vec<Point> = points.iter().copied().map(point).collect();
                editor.select_lasso(&points).map(|_| ())
            }
            Self::Pan { dx, dy } => {
                editor.diagram_mut().info_mut().pan_by(Point::new(*dx, *dy));
                Ok(())
            }
            Self::SetZoom { zoom } => {
                editor.diagram_mut().info_mut().set_zoom(*zoom);
                Ok(())
            }
            Self::ZoomIn => {
                editor.diagram_mut().info_mut().zoom_in();
                Ok(())
            }
            Self::ZoomOut => {
                editor.diagram_mut().info_mut().zoom_out();
                Ok(())
            }
            Self::SetGridSize { size } => {
                editor.diagram_mut().info_mut().set_grid_size(*size);
                Ok(())
            }
            Self::ToggleGrid => {
                editor.diagram_mut().info_mut().toggle_grid();
                Ok(())
            }
            Self::ToggleAnchors => {
                editor.diagram_mut().info_mut().toggle_anchors();
                Ok(())
            }
            Self::SetTitle { title } => {
                editor.diagram_mut().info_mut().set_title(title.clone());
                Ok(())
            }
        }
    }
}

/// A parsed session script
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub anchors: Vec<AnchorSpec>,
    #[serde(default)]
    pub propagators: Vec<PropagatorSpec>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Script {
    /// Parses a script, keeping the source around for error reports.
    pub fn parse(src: &str) -> Result<Self, CliError> {
        let script: Self =
            toml::from_str(src).map_err(|err| CliError::script(err.message(), src, err.span()))?;
        debug!(
            anchors = script.anchors.len(),
            propagators = script.propagators.len(),
            events = script.events.len();
            "Parsed script"
        );
        Ok(script)
    }

    /// Builds the initial elements, rejecting duplicate ids.
    ///
    /// Graph consistency (endpoints exist, no loops) is checked later by the
    /// editor.
    pub fn elements(&self, src: &str) -> Result<Elements, CliError> {
        let mut elements = Elements::new();

        let mut seen = HashSet::new();
        for spec in &self.anchors {
            let id = *spec.id.get_ref();
            if !seen.insert(id) {
                return Err(duplicate(src, ElementKind::Anchors, &spec.id));
            }
            elements.insert_anchor(Anchor::new(id, Point::new(spec.x, spec.y)));
        }

        let mut seen = HashSet::new();
        for spec in &self.propagators {
            let id = *spec.id.get_ref();
            if !seen.insert(id) {
                return Err(duplicate(src, ElementKind::Propagators, &spec.id));
            }
            elements.insert_propagator(Propagator::new(
                id,
                spec.kind,
                spec.anchor1,
                spec.anchor2,
            ));
        }

        Ok(elements)
    }
}

/// Error for a repeated id, pointing at the repeated definition
fn duplicate(src: &str, kind: ElementKind, id: &Spanned<Id>) -> CliError {
    CliError::script(
        format!("duplicate {kind} id `{}`", id.get_ref()),
        src,
        Some(id.span()),
    )
}
