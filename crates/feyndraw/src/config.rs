//! Configuration types for the Feyndraw editing engine.
//!
//! All types implement [`serde::Deserialize`] and default every missing
//! field, so a partial configuration file only overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`GridConfig`] - Grid spacing and whether the grid starts enabled.
//! - [`ViewConfig`] - Host layout offset and zoom limits.
//! - [`EditConfig`] - Tolerances used by graph mutations.
//! - [`SplitConfig`] - Which propagator kinds a split creates.
//!
//! # Example
//!
//! ```
//! # use feyndraw::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.grid().size(), 20.0);
//! assert!(config.grid().enabled());
//! ```

use std::str::FromStr;

use serde::Deserialize;

use feyndraw_core::{element::PropagatorKind, view::DEFAULT_SIDEBAR_WIDTH};

/// Top-level configuration combining every section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    grid: GridConfig,

    #[serde(default)]
    view: ViewConfig,

    #[serde(default)]
    edit: EditConfig,

    #[serde(default)]
    split: SplitConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(grid: GridConfig, view: ViewConfig, edit: EditConfig, split: SplitConfig) -> Self {
        Self {
            grid,
            view,
            edit,
            split,
        }
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    pub fn edit(&self) -> &EditConfig {
        &self.edit
    }

    pub fn split(&self) -> &SplitConfig {
        &self.split
    }
}

/// Grid settings applied to a new diagram.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Spacing between grid lines in diagram units.
    size: f32,

    /// Whether the grid is active when a diagram is created.
    enabled: bool,
}

impl GridConfig {
    pub fn new(size: f32, enabled: bool) -> Self {
        Self { size, enabled }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            enabled: true,
        }
    }
}

/// Host layout and zoom settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Width of the host sidebar left of the canvas, in pixels.
    sidebar_width: f32,

    /// Amount added or removed by a single zoom in / zoom out.
    zoom_step: f32,

    min_zoom: f32,

    max_zoom: f32,
}

impl ViewConfig {
    pub fn sidebar_width(&self) -> f32 {
        self.sidebar_width
    }

    pub fn zoom_step(&self) -> f32 {
        self.zoom_step
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    /// Clamps a zoom factor into the configured range
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom.max(self.min_zoom))
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
            zoom_step: 0.1,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

/// Tolerances used when mutating the graph.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Distance at or below which two anchors count as coincident.
    merge_tolerance: f32,
}

impl EditConfig {
    pub fn new(merge_tolerance: f32) -> Self {
        Self { merge_tolerance }
    }

    pub fn merge_tolerance(&self) -> f32 {
        self.merge_tolerance
    }
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            merge_tolerance: 0.5,
        }
    }
}

/// How the kind of a propagator created by a split is chosen.
///
/// Deserialized from either `"inherit"` or a propagator kind name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum KindChoice {
    /// Copy the kind of the propagator being split.
    Inherit,
    /// Always use this kind.
    Fixed(PropagatorKind),
}

impl KindChoice {
    /// Picks the kind for a new propagator split off a `parent` of the given kind
    pub fn resolve(self, parent: PropagatorKind) -> PropagatorKind {
        match self {
            Self::Inherit => parent,
            Self::Fixed(kind) => kind,
        }
    }
}

impl TryFrom<String> for KindChoice {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "inherit" {
            return Ok(Self::Inherit);
        }
        PropagatorKind::from_str(&value)
            .map(Self::Fixed)
            .map_err(|err| err.to_string())
    }
}

/// Propagator kinds created when a propagator is split.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Kind of the propagator restoring the severed half of the original.
    continuation: KindChoice,

    /// Kind of the new branch propagator.
    branch: KindChoice,
}

impl SplitConfig {
    pub fn new(continuation: KindChoice, branch: KindChoice) -> Self {
        Self {
            continuation,
            branch,
        }
    }

    pub fn continuation(&self) -> KindChoice {
        self.continuation
    }

    pub fn branch(&self) -> KindChoice {
        self.branch
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            continuation: KindChoice::Fixed(PropagatorKind::Fermion),
            branch: KindChoice::Fixed(PropagatorKind::Fermion),
        }
    }
}
