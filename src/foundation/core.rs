use crate::foundation::error::{EpicycleError, EpicycleResult};

pub use kurbo::{Affine, BezPath, Line, Point, Rect, Vec2};

/// Ordered closed polygon with at least two finite points.
///
/// Traversal order is significant. The edge from the last point back to the first is part of
/// the curve, so every geometric query here treats the path as closed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct PointPath(Vec<Point>);

impl PointPath {
    /// Minimum number of points a path must hold.
    pub const MIN_POINTS: usize = 2;

    pub fn new(points: Vec<Point>) -> EpicycleResult<Self> {
        if points.len() < Self::MIN_POINTS {
            return Err(EpicycleError::insufficient_points(points.len()));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(EpicycleError::validation(format!(
                "point {i} has non-finite coordinates"
            )));
        }
        Ok(Self(points))
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Edges of the closed polygon, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        let n = self.0.len();
        (0..n).map(move |i| Line::new(self.0[i], self.0[(i + 1) % n]))
    }

    /// Arc length of the closed polygon.
    pub fn perimeter(&self) -> f64 {
        self.edges().map(|l| l.length()).sum()
    }

    pub fn bounds(&self) -> Rect {
        bounds_of(&self.0).unwrap_or(Rect::ZERO)
    }

    /// Points with the first one repeated at the end, ready for stroking.
    pub fn closed_points(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.0.len() + 1);
        out.extend_from_slice(&self.0);
        out.push(self.0[0]);
        out
    }

    pub fn to_bez_path(&self) -> BezPath {
        let mut bp = BezPath::new();
        bp.move_to(self.0[0]);
        for p in &self.0[1..] {
            bp.line_to(*p);
        }
        bp.close_path();
        bp
    }
}

impl TryFrom<Vec<Point>> for PointPath {
    type Error = EpicycleError;

    fn try_from(points: Vec<Point>) -> EpicycleResult<Self> {
        Self::new(points)
    }
}

impl From<PointPath> for Vec<Point> {
    fn from(path: PointPath) -> Self {
        path.0
    }
}

/// Axis-aligned bounding box of `points`, `None` when empty.
pub fn bounds_of(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
    )
}

/// Drawable destination area in output units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> EpicycleResult<Self> {
        let v = Self { width, height };
        v.validate()?;
        Ok(v)
    }

    pub fn validate(&self) -> EpicycleResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(EpicycleError::validation("viewport width must be finite and > 0"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(EpicycleError::validation("viewport height must be finite and > 0"));
        }
        Ok(())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
