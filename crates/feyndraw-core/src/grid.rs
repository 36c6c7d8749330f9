//! Grid quantization and screen-to-diagram coordinate conversion.
//!
//! All functions are pure. A grid size `<= 0` always means "no grid": the
//! rounding helpers return their input unchanged instead of failing, and
//! callers that need quantization must check [`ViewContext::has_grid`] first.
//!
//! # Drag stickiness
//!
//! [`fix_delta_to_grid`] turns accumulated pointer movement into a committed
//! movement. On each axis independently nothing is committed until the
//! movement reaches half a grid cell; from then on the movement is rounded to
//! whole grid cells. Small jitters below half a cell therefore never move an
//! element.
//!
//! ```
//! # use feyndraw_core::{geometry::Point, grid::fix_delta_to_grid};
//! assert_eq!(fix_delta_to_grid(Point::new(9.0, 0.0), 20.0), Point::new(0.0, 0.0));
//! assert_eq!(fix_delta_to_grid(Point::new(11.0, -3.0), 20.0), Point::new(20.0, 0.0));
//! ```

use crate::{geometry::Point, view::ViewContext};

/// Stickiness cell used when no grid is active.
pub const NO_GRID_STICKINESS: f32 = 2.0;

/// Rounds `value` to the nearest multiple of `grid`, ties away from zero.
///
/// Rounding is symmetric around zero so `round(-v, g) == -round(v, g)`.
/// With `grid <= 0` the value is returned unchanged.
///
/// # Examples
///
/// ```
/// # use feyndraw_core::grid::round;
/// assert_eq!(round(29.0, 20.0), 20.0);
/// assert_eq!(round(-31.0, 20.0), -40.0);
/// assert_eq!(round(7.3, 0.0), 7.3);
/// ```
pub fn round(value: f32, grid: f32) -> f32 {
    if grid <= 0.0 {
        return value;
    }
    value.signum() * (value.abs() / grid).round() * grid
}

/// Snaps a point to the nearest grid intersection.
///
/// With `grid_size <= 0` the point is returned unchanged.
pub fn fix_position_to_grid(point: Point, grid_size: f32) -> Point {
    Point::new(round(point.x(), grid_size), round(point.y(), grid_size))
}

fn fix_axis(delta: f32, grid_size: f32) -> f32 {
    if grid_size > 0.0 {
        if delta.abs() >= grid_size / 2.0 {
            round(delta, grid_size)
        } else {
            0.0
        }
    } else if delta.abs() >= NO_GRID_STICKINESS / 2.0 {
        delta
    } else {
        0.0
    }
}

/// Converts accumulated drag movement into the movement to commit.
///
/// Each axis is treated independently: an axis commits once
/// `|delta| >= grid_size / 2`, moving by `delta` rounded to whole grid
/// cells. Without a grid the same rule applies with a cell of
/// [`NO_GRID_STICKINESS`], and the committed movement is the raw delta.
pub fn fix_delta_to_grid(delta: Point, grid_size: f32) -> Point {
    Point::new(
        fix_axis(delta.x(), grid_size),
        fix_axis(delta.y(), grid_size),
    )
}

/// Maps a host-window coordinate to the canvas, removing the sidebar and pan.
///
/// When `view` is `None` the default view is used: no pan and the
/// [default sidebar width](crate::view::DEFAULT_SIDEBAR_WIDTH).
///
/// # Examples
///
/// ```
/// # use feyndraw_core::{geometry::Point, grid::relative_position, view::ViewContext};
/// let view = ViewContext {
///     pan: Point::new(10.0, 20.0),
///     sidebar_width: 100.0,
///     ..ViewContext::default()
/// };
/// let p = relative_position(Point::new(150.0, 50.0), Some(&view));
/// assert_eq!(p, Point::new(40.0, 30.0));
/// ```
pub fn relative_position(screen: Point, view: Option<&ViewContext>) -> Point {
    let view = view.copied().unwrap_or_default();
    Point::new(
        screen.x() - view.sidebar_width - view.pan.x(),
        screen.y() - view.pan.y(),
    )
}

/// Maps a host-window coordinate all the way into diagram units, including zoom
pub fn screen_to_diagram(screen: Point, view: &ViewContext) -> Point {
    relative_position(screen, Some(view)).scale(1.0 / view.effective_zoom())
}

/// Converts a pointer displacement in screen pixels to diagram units
pub fn delta_to_diagram(delta: Point, view: &ViewContext) -> Point {
    delta.scale(1.0 / view.effective_zoom())
}

/// Converts a displacement in diagram units back to screen pixels
pub fn delta_to_screen(delta: Point, view: &ViewContext) -> Point {
    delta.scale(view.effective_zoom())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_nearest_multiple() {
        assert_eq!(round(9.0, 20.0), 0.0);
        assert_eq!(round(10.0, 20.0), 20.0);
        assert_eq!(round(31.0, 20.0), 40.0);
        assert_eq!(round(-9.0, 20.0), 0.0);
        assert_eq!(round(-10.0, 20.0), -20.0);
    }

    #[test]
    fn test_round_without_grid_is_identity() {
        assert_eq!(round(13.7, 0.0), 13.7);
        assert_eq!(round(-13.7, -5.0), -13.7);
    }

    #[test]
    fn test_fix_position_to_grid() {
        let fixed = fix_position_to_grid(Point::new(23.0, -47.0), 10.0);
        assert_eq!(fixed, Point::new(20.0, -50.0));

        let unchanged = fix_position_to_grid(Point::new(23.0, -47.0), 0.0);
        assert_eq!(unchanged, Point::new(23.0, -47.0));
    }

    #[test]
    fn test_fix_delta_threshold_is_inclusive_on_both_axes() {
        let fixed = fix_delta_to_grid(Point::new(10.0, -10.0), 20.0);
        assert_eq!(fixed, Point::new(20.0, -20.0));
    }

    #[test]
    fn test_fix_delta_axes_are_independent() {
        let fixed = fix_delta_to_grid(Point::new(12.0, 4.0), 20.0);
        assert_eq!(fixed, Point::new(20.0, 0.0));
    }

    #[test]
    fn test_fix_delta_large_jump_moves_several_cells() {
        let fixed = fix_delta_to_grid(Point::new(65.0, 0.0), 20.0);
        assert_eq!(fixed, Point::new(60.0, 0.0));
    }

    #[test]
    fn test_fix_delta_without_grid_keeps_sign() {
        assert_eq!(
            fix_delta_to_grid(Point::new(0.5, -0.9), 0.0),
            Point::new(0.0, 0.0)
        );
        assert_eq!(
            fix_delta_to_grid(Point::new(-3.5, 1.0), 0.0),
            Point::new(-3.5, 1.0)
        );
    }

    #[test]
    fn test_relative_position_without_view() {
        let p = relative_position(Point::new(300.0, 40.0), None);
        assert_eq!(p, Point::new(300.0 - crate::view::DEFAULT_SIDEBAR_WIDTH, 40.0));
    }

    #[test]
    fn test_screen_to_diagram_applies_zoom() {
        let view = ViewContext {
            zoom: 2.0,
            sidebar_width: 0.0,
            ..ViewContext::default()
        };
        assert_eq!(
            screen_to_diagram(Point::new(40.0, 20.0), &view),
            Point::new(20.0, 10.0)
        );
        let delta = delta_to_diagram(Point::new(8.0, -4.0), &view);
        assert_eq!(delta, Point::new(4.0, -2.0));
        assert_eq!(delta_to_screen(delta, &view), Point::new(8.0, -4.0));
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn value_strategy() -> impl Strategy<Value = f32> {
        -1000.0f32..1000.0
    }

    fn grid_strategy() -> impl Strategy<Value = f32> {
        prop_oneof![Just(5.0f32), Just(10.0f32), Just(20.0f32), 1.0f32..100.0]
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Rounding an already rounded value changes nothing.
    fn check_round_idempotent(value: f32, grid: f32) -> Result<(), TestCaseError> {
        let once = round(value, grid);
        prop_assert_eq!(round(once, grid), once);
        Ok(())
    }

    /// The rounded value is never further than half a cell away.
    fn check_round_error_bounded(value: f32, grid: f32) -> Result<(), TestCaseError> {
        let rounded = round(value, grid);
        prop_assert!((rounded - value).abs() <= grid / 2.0 + 1e-3);
        Ok(())
    }

    /// Below half a cell nothing moves; at or past it exactly one cell moves.
    fn check_stickiness(fraction: f32, grid: f32, negative: bool) -> Result<(), TestCaseError> {
        let sign = if negative { -1.0 } else { 1.0 };
        let below = fix_delta_to_grid(Point::new(sign * fraction * grid * 0.4999, 0.0), grid);
        prop_assert!(below.is_zero());

        let past = grid / 2.0 + fraction * grid * 0.9;
        let fixed = fix_delta_to_grid(Point::new(0.0, sign * past), grid);
        prop_assert_eq!(fixed.x(), 0.0);
        prop_assert!(approx_eq!(f32, fixed.y(), sign * grid, ulps = 2));
        Ok(())
    }

    proptest! {
        #[test]
        fn round_idempotent(value in value_strategy(), grid in grid_strategy()) {
            check_round_idempotent(value, grid)?;
        }

        #[test]
        fn round_error_bounded(value in value_strategy(), grid in grid_strategy()) {
            check_round_error_bounded(value, grid)?;
        }

        #[test]
        fn stickiness(fraction in 0.0f32..1.0, grid in grid_strategy(), negative in any::<bool>()) {
            check_stickiness(fraction, grid, negative)?;
        }
    }
}
