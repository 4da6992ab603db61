//! Polar (radius, phase) form of the coefficients, one rotating arm per frequency.

use num_complex::Complex64;

use crate::fourier::spectrum::Spectrum;

/// How the initial angle of an arm is derived from its coefficient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseMode {
    /// `atan2(im, re)`, correct in all four quadrants.
    #[default]
    Atan2,
    /// `atan(im / re)`.
    ///
    /// Folds angles with a negative real part into the wrong half-plane and yields NaN for a
    /// zero coefficient. Only for reproducing tables exported by older releases.
    LegacyAtan,
}

impl PhaseMode {
    pub fn angle(self, c: Complex64) -> f64 {
        match self {
            Self::Atan2 => c.im.atan2(c.re),
            Self::LegacyAtan => (c.im / c.re).atan(),
        }
    }
}

/// One arm of the epicycle drawing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Epicycle {
    /// Signed frequency; positive turns anticlockwise.
    pub rotation_rate: i64,
    pub radius: f64,
    /// Angle at `t = 0`, radians.
    pub initial_angle: f64,
}

impl Epicycle {
    pub fn from_coefficient(n: i64, c: Complex64, mode: PhaseMode) -> Self {
        Self {
            rotation_rate: n,
            radius: c.norm(),
            initial_angle: mode.angle(c),
        }
    }
}

/// Arms for every coefficient of `spectrum`, sorted by ascending rotation rate.
pub fn epicycles(spectrum: &Spectrum, mode: PhaseMode) -> Vec<Epicycle> {
    spectrum
        .iter()
        .map(|(n, c)| Epicycle::from_coefficient(n, c, mode))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/fourier/polar.rs"]
mod tests;
