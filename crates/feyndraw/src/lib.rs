//! Feyndraw - An interactive editing engine for Feynman diagrams.
//!
//! A diagram is a graph of anchors (vertices) joined by propagators (edges).
//! This crate keeps that graph consistent while it is edited with a pointer:
//! splitting a propagator to grow a branch, dragging elements with grid
//! stickiness, and merging anchors that are dropped onto each other.
//!
//! Engine operations read a snapshot of the diagram and describe their effect
//! as a [`ChangeSet`](change::ChangeSet). Applying a change-set is atomic and
//! checked, so every state the host observes is a valid graph.
//!
//! # Examples
//!
//! ```
//! use feyndraw::{
//!     Editor, EditError,
//!     config::AppConfig,
//!     drag::PointerEvent,
//!     element::{ElementRef, PropagatorKind},
//!     geometry::Point,
//! };
//!
//! # fn main() -> Result<(), EditError> {
//! let mut editor = Editor::new(AppConfig::default());
//! let a = editor.diagram_mut().add_anchor(Point::new(0.0, 0.0))?;
//! let b = editor.diagram_mut().add_anchor(Point::new(100.0, 0.0))?;
//! let p = editor.diagram_mut().add_propagator(PropagatorKind::Fermion, a, b)?;
//!
//! // Alt-press in the middle of the propagator and pull a branch down
//! let sidebar = editor.diagram().view().sidebar_width;
//! editor.press(
//!     ElementRef::propagator(p),
//!     PointerEvent::new(sidebar + 40.0, 0.0).with_alt(),
//! )?;
//! editor.drag(PointerEvent::new(sidebar + 40.0, 60.0))?;
//! editor.release()?;
//!
//! assert_eq!(editor.diagram().elements().anchors().len(), 4);
//! assert_eq!(editor.diagram().elements().propagators().len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod change;
pub mod config;
pub mod diagram;
pub mod drag;
pub mod editor;
pub mod ids;
pub mod merge;
pub mod region;
pub mod snap;
pub mod split;
pub mod topology;

mod error;

pub use feyndraw_core::{element, geometry, grid, identifier, view};

pub use diagram::Diagram;
pub use editor::Editor;
pub use error::EditError;
