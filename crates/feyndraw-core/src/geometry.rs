//! Geometric primitives for diagram editing.
//!
//! This module provides the fundamental geometric types used throughout
//! Feyndraw for positioning anchors, measuring drags and computing selection
//! regions.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate (or displacement) in diagram space
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//! - [`segments_intersect`] and [`polygon_contains`] - hit tests used by region selection
//!
//! # Coordinate System
//!
//! Feyndraw uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner of the diagram at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

use serde::{Deserialize, Serialize};

/// A 2D point representing a position or a displacement in diagram space.
///
/// # Examples
///
/// ```
/// # use feyndraw_core::geometry::Point;
/// let anchor = Point::new(10.0, 20.0);
/// let delta = Point::new(5.0, -5.0);
///
/// let moved = anchor.add_point(delta);
/// assert_eq!(moved.x(), 15.0);
/// assert_eq!(moved.y(), 15.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Calculates the Euclidean length of the point treated as a vector
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// Bounds are always normalized: `min_x <= max_x` and `min_y <= max_y`.
/// A bounds built from a single point is degenerate (zero width and height)
/// but still valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds spanning two opposite corners, in any order.
    ///
    /// This is the natural constructor for a marquee drawn by dragging from
    /// one corner to another in any direction.
    ///
    /// # Examples
    ///
    /// ```
    /// # use feyndraw_core::geometry::{Bounds, Point};
    /// let marquee = Bounds::from_corners(Point::new(50.0, 10.0), Point::new(10.0, 40.0));
    /// assert_eq!(marquee.min_x(), 10.0);
    /// assert_eq!(marquee.max_y(), 40.0);
    /// assert_eq!(marquee.width(), 40.0);
    /// ```
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Creates degenerate bounds containing exactly one point
    pub fn from_point(point: Point) -> Self {
        Self::from_corners(point, point)
    }

    /// Creates bounds from a top-left point and a width and height
    pub fn new_from_top_left(top_left: Point, width: f32, height: f32) -> Self {
        Self::from_corners(top_left, top_left.add_point(Point::new(width, height)))
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the bottom-right corner as a Point
    pub fn max_point(self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        self.min_point().add_point(self.max_point()).scale(0.5)
    }

    /// Merges two bounds into the smallest bounds containing both
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds so that it contains `point`
    pub fn include_point(&self, point: Point) -> Self {
        self.merge(&Self::from_point(point))
    }

    /// Returns true if `point` lies inside or on the edge of the bounds
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Returns true if the segment `a`-`b` touches the bounds.
    ///
    /// Either endpoint inside, or the segment crossing one of the four edges,
    /// counts as touching.
    pub fn intersects_segment(&self, a: Point, b: Point) -> bool {
        if self.contains_point(a) || self.contains_point(b) {
            return true;
        }
        let corners = [
            self.min_point(),
            Point::new(self.max_x, self.min_y),
            self.max_point(),
            Point::new(self.min_x, self.max_y),
        ];
        (0..4).any(|i| segments_intersect(a, b, corners[i], corners[(i + 1) % 4]))
    }

    /// Moves the bounds by the specified offset
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }
}

/// Signed area of the triangle `a`, `b`, `c` (times two)
fn orientation(a: Point, b: Point, c: Point) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Assumes `a`, `b`, `p` are collinear
fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Returns true if the closed segments `p1`-`p2` and `q1`-`q2` share at least one point.
///
/// # Examples
///
/// ```
/// # use feyndraw_core::geometry::{Point, segments_intersect};
/// let crossing = segments_intersect(
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 10.0),
///     Point::new(0.0, 10.0),
///     Point::new(10.0, 0.0),
/// );
/// assert!(crossing);
/// ```
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

/// Even-odd point in polygon test.
///
/// The polygon is implicitly closed; fewer than three vertices never contain anything.
pub fn polygon_contains(polygon: &[Point], point: Point) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
