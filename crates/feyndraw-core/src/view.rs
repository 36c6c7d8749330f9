//! The view context: grid, pan, zoom and the host layout offset.
//!
//! A [`ViewContext`] is a read-only input to the geometry functions in
//! [`crate::grid`]. It is owned by the view layer of the host application and
//! passed explicitly, so the geometry code carries no hidden layout coupling.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Horizontal space taken by the host's sidebar when no view context says otherwise.
pub const DEFAULT_SIDEBAR_WIDTH: f32 = 250.0;

/// Snapshot of the current view of a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewContext {
    /// Effective grid spacing. Values `<= 0` mean the grid is disabled.
    pub grid_size: f32,
    /// Offset of the diagram origin relative to the canvas origin.
    pub pan: Point,
    /// Scale factor from diagram units to screen pixels.
    pub zoom: f32,
    /// Width of the host chrome to the left of the canvas.
    pub sidebar_width: f32,
}

impl ViewContext {
    /// Creates a view with the given grid and otherwise default settings
    pub fn with_grid(grid_size: f32) -> Self {
        Self {
            grid_size,
            ..Self::default()
        }
    }

    /// Returns true when grid quantization is active
    pub fn has_grid(&self) -> bool {
        self.grid_size > 0.0
    }

    /// Zoom factor guarded against zero, negative and non-finite values
    pub fn effective_zoom(&self) -> f32 {
        if self.zoom.is_finite() && self.zoom > 0.0 {
            self.zoom
        } else {
            1.0
        }
    }
}

impl Default for ViewContext {
    fn default() -> Self {
        Self {
            grid_size: 0.0,
            pan: Point::default(),
            zoom: 1.0,
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
        }
    }
}
