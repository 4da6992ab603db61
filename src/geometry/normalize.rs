//! Fit a point set into the drawable viewport.

use crate::foundation::core::{Affine, Point, PointPath, Rect, Vec2, Viewport, bounds_of};
use crate::foundation::error::{EpicycleError, EpicycleResult};

/// Destination rectangle for [`normalize`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    pub viewport: Viewport,
    /// Total margin per axis; half of it ends up on each side.
    pub padding: f64,
    /// Height reserved at the bottom of the viewport for controls.
    pub chrome_height: f64,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            padding: 50.0,
            chrome_height: 80.0,
        }
    }
}

impl NormalizeConfig {
    pub fn validate(&self) -> EpicycleResult<()> {
        self.viewport.validate()?;
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(EpicycleError::validation("padding must be finite and >= 0"));
        }
        if !(self.chrome_height.is_finite() && self.chrome_height >= 0.0) {
            return Err(EpicycleError::validation(
                "chrome height must be finite and >= 0",
            ));
        }
        if self.viewport.width <= self.padding {
            return Err(EpicycleError::validation(
                "viewport width must exceed padding",
            ));
        }
        if self.target_height() <= self.padding {
            return Err(EpicycleError::validation(
                "viewport height minus chrome must exceed padding",
            ));
        }
        Ok(())
    }

    /// Usable height once the chrome is removed.
    pub fn target_height(&self) -> f64 {
        self.viewport.height - self.chrome_height
    }

    /// The rectangle a fitted path is centred in.
    pub fn target_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport.width, self.target_height())
    }
}

/// Transform that moves `bounds` to the origin, scales it uniformly into the padded target and
/// centres it.
///
/// Returns [`Affine::IDENTITY`] when `bounds` has no width or no height.
pub fn fit_transform(bounds: Rect, cfg: &NormalizeConfig) -> Affine {
    let (w, h) = (bounds.width(), bounds.height());
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        tracing::debug!(w, h, "degenerate bounds, leaving points unscaled");
        return Affine::IDENTITY;
    }

    let target_w = cfg.viewport.width;
    let target_h = cfg.target_height();
    let scale = ((target_w - cfg.padding) / w).min((target_h - cfg.padding) / h);

    let offset = Vec2::new((target_w - w * scale) / 2.0, (target_h - h * scale) / 2.0);
    Affine::translate(offset) * Affine::scale(scale) * Affine::translate(-bounds.origin().to_vec2())
}

/// Fit `points` into the viewport described by `cfg`.
pub fn normalize_points(points: &[Point], cfg: &NormalizeConfig) -> Vec<Point> {
    let Some(bounds) = bounds_of(points) else {
        return Vec::new();
    };
    let xf = fit_transform(bounds, cfg);
    points.iter().map(|p| xf * *p).collect()
}

/// Fit `path` into the viewport described by `cfg`.
pub fn normalize(path: &PointPath, cfg: &NormalizeConfig) -> EpicycleResult<PointPath> {
    cfg.validate()?;
    PointPath::new(normalize_points(path.points(), cfg))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/normalize.rs"]
mod tests;
