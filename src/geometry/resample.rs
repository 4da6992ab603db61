//! Arc-length resampling of closed polylines.
//!
//! Synthesis samples the curve at uniform "time" steps, so the input polygon is first
//! redistributed so that consecutive points sit an equal distance apart along the curve.

use crate::foundation::core::{BezPath, Line, Point, PointPath};
use crate::foundation::error::{EpicycleError, EpicycleResult};

/// Step search parameters for [`resample`].
///
/// The step starts at `initial_spacing` in input units and is halved while the walk would emit
/// fewer than `min_points`. Paths that would emit more than `max_points` at the initial step
/// are walked at `perimeter / max_points` instead, so the sample count stays bounded however
/// large the input coordinates are.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ResampleOptions {
    /// Arc-length step tried first.
    pub initial_spacing: f64,
    /// The step is halved until at least this many points are emitted.
    pub min_points: usize,
    /// Upper bound on emitted points.
    pub max_points: usize,
    /// Upper bound on halvings; keeps tiny perimeters from looping forever.
    pub max_halvings: u32,
    /// Flattening tolerance used for Bézier inputs.
    pub flatten_tolerance: f64,
}

impl Default for ResampleOptions {
    fn default() -> Self {
        Self {
            initial_spacing: 10.0,
            min_points: 500,
            max_points: 1000,
            max_halvings: 32,
            flatten_tolerance: 0.1,
        }
    }
}

impl ResampleOptions {
    pub fn validate(&self) -> EpicycleResult<()> {
        validate_spacing(self.initial_spacing)?;
        if self.max_points < self.min_points.max(PointPath::MIN_POINTS) {
            return Err(EpicycleError::validation(format!(
                "max_points ({}) must be >= min_points ({}) and >= {}",
                self.max_points,
                self.min_points,
                PointPath::MIN_POINTS
            )));
        }
        if !(self.flatten_tolerance.is_finite() && self.flatten_tolerance > 0.0) {
            return Err(EpicycleError::validation(
                "flatten tolerance must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Resample `path` at a uniform arc-length step chosen as described on [`ResampleOptions`].
///
/// A path with zero perimeter is returned unchanged. A perimeter that overflows `f64` is a
/// validation error.
pub fn resample(path: &PointPath, opts: &ResampleOptions) -> EpicycleResult<PointPath> {
    opts.validate()?;

    let perimeter = finite_perimeter(path)?;
    if perimeter <= 0.0 {
        tracing::debug!(points = path.len(), "zero-length path, skipping resample");
        return Ok(path.clone());
    }

    if emitted_count(perimeter, opts.initial_spacing) > opts.max_points {
        let spacing = perimeter / opts.max_points as f64;
        tracing::debug!(
            spacing,
            initial = opts.initial_spacing,
            "resample step widened for a large path"
        );
        return walk(path, perimeter, spacing);
    }

    let mut spacing = opts.initial_spacing;
    let mut halvings = 0;
    loop {
        let count = emitted_count(perimeter, spacing);
        if count >= opts.min_points || halvings >= opts.max_halvings {
            tracing::debug!(spacing, count, halvings, "resample step settled");
            return walk(path, perimeter, spacing);
        }
        spacing /= 2.0;
        halvings += 1;
    }
}

/// Resample `path` emitting one point every `spacing` units of arc length.
pub fn resample_at_spacing(path: &PointPath, spacing: f64) -> EpicycleResult<PointPath> {
    validate_spacing(spacing)?;
    let perimeter = finite_perimeter(path)?;
    if perimeter <= 0.0 {
        return Ok(path.clone());
    }
    walk(path, perimeter, spacing)
}

/// Resample `path` into exactly `count` evenly spaced points.
pub fn resample_to_count(path: &PointPath, count: usize) -> EpicycleResult<PointPath> {
    if count < PointPath::MIN_POINTS {
        return Err(EpicycleError::insufficient_points(count));
    }
    let perimeter = finite_perimeter(path)?;
    if perimeter <= 0.0 {
        return Ok(path.clone());
    }
    let spacing = perimeter / count as f64;
    let mut points = Vec::with_capacity(count);
    walk_positions(path, (0..count).map(|k| k as f64 * spacing), &mut points);
    PointPath::new(points)
}

/// Flatten the first subpath of `bez` and resample the resulting polygon.
pub fn resample_bez_path(bez: &BezPath, opts: &ResampleOptions) -> EpicycleResult<PointPath> {
    opts.validate()?;
    let polygon = flatten_first_subpath(bez, opts.flatten_tolerance)?;
    resample(&polygon, opts)
}

/// Flatten the first subpath of `bez` into a polygon.
///
/// Curves are approximated by line segments within `tolerance`. Later subpaths are ignored.
pub fn flatten_first_subpath(bez: &BezPath, tolerance: f64) -> EpicycleResult<PointPath> {
    let mut points = Vec::<Point>::new();
    let mut subpaths = 0usize;
    kurbo::flatten(bez.elements().iter().copied(), tolerance, |el| match el {
        kurbo::PathEl::MoveTo(p) => {
            subpaths += 1;
            if subpaths == 1 {
                points.push(p);
            }
        }
        kurbo::PathEl::LineTo(p) if subpaths == 1 => {
            if points.last() != Some(&p) {
                points.push(p);
            }
        }
        _ => {}
    });

    // The closing edge is implicit, so an explicit return to the start is redundant.
    if points.len() > 2 && points.first() == points.last() {
        points.pop();
    }
    PointPath::new(points)
}

/// Keep every `n`-th point so that roughly `target` points survive, `n = len / target`.
///
/// Dense inputs such as traced contours are thinned this way before resampling.
pub fn decimate(points: &[Point], target: usize) -> Vec<Point> {
    let n = if target == 0 { 0 } else { points.len() / target };
    if n < 2 {
        return points.to_vec();
    }
    points.iter().step_by(n).copied().collect()
}

fn validate_spacing(spacing: f64) -> EpicycleResult<()> {
    if spacing.is_finite() && spacing > 0.0 {
        Ok(())
    } else {
        Err(EpicycleError::validation(format!(
            "resample spacing must be finite and > 0, got {spacing}"
        )))
    }
}

fn finite_perimeter(path: &PointPath) -> EpicycleResult<f64> {
    let perimeter = path.perimeter();
    if perimeter.is_finite() {
        Ok(perimeter)
    } else {
        Err(EpicycleError::validation(format!(
            "path perimeter is not finite ({perimeter}); coordinates are too large"
        )))
    }
}

/// Number of `k` with `k * spacing` strictly inside the perimeter.
fn emitted_count(perimeter: f64, spacing: f64) -> usize {
    // The relative slack keeps an exact multiple from emitting a duplicate of the start point.
    let n = (perimeter / spacing * (1.0 - 1e-9)).ceil();
    if n.is_finite() && n >= 1.0 {
        n as usize
    } else {
        1
    }
}

fn walk(path: &PointPath, perimeter: f64, spacing: f64) -> EpicycleResult<PointPath> {
    let count = emitted_count(perimeter, spacing);
    let mut points = Vec::with_capacity(count);
    walk_positions(path, (0..count).map(|k| k as f64 * spacing), &mut points);
    PointPath::new(points)
}

/// Emit the point at each arc-length position; `positions` must be ascending.
fn walk_positions(path: &PointPath, positions: impl Iterator<Item = f64>, out: &mut Vec<Point>) {
    let edges: Vec<Line> = path.edges().collect();
    let last = edges.len() - 1;
    let mut i = 0;
    let mut edge_start = 0.0;
    for s in positions {
        // Rounding can push the final position past the accumulated perimeter; it then lands
        // on the last edge.
        while i < last && s >= edge_start + edges[i].length() {
            edge_start += edges[i].length();
            i += 1;
        }
        let edge = edges[i];
        let len = edge.length();
        let t = if len > 0.0 {
            ((s - edge_start) / len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(edge.p0.lerp(edge.p1, t));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/resample.rs"]
mod tests;
