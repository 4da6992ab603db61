//! Forward transform: complex coefficients of a sampled closed path.

use std::ops::Range;

use num_complex::Complex64;
use rayon::prelude::*;

use crate::foundation::core::{Point, PointPath};
use crate::foundation::error::{EpicycleError, EpicycleResult};

/// Number of harmonics kept in a truncated series, always at least 2.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "usize", into = "usize")]
pub struct TermCount(usize);

impl TermCount {
    pub const MIN: usize = 2;

    pub fn new(n: usize) -> EpicycleResult<Self> {
        if n < Self::MIN {
            return Err(EpicycleError::validation(format!(
                "term count must be >= {}, got {n}",
                Self::MIN
            )));
        }
        Ok(Self(n))
    }

    /// Clamp `requested` into `[2, min(samples, cap)]`.
    pub fn clamp(requested: usize, samples: usize, cap: usize) -> Self {
        let upper = samples.min(cap).max(Self::MIN);
        let n = requested.clamp(Self::MIN, upper);
        if n != requested {
            tracing::debug!(requested, clamped = n, samples, cap, "term count clamped");
        }
        Self(n)
    }

    /// Truncate a slider-style real value, then [`clamp`](Self::clamp) it.
    pub fn clamp_f64(requested: f64, samples: usize, cap: usize) -> Self {
        let truncated = if requested.is_nan() || requested < 0.0 {
            0
        } else {
            // Saturating float-to-int cast.
            requested.trunc() as usize
        };
        Self::clamp(truncated, samples, cap)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for TermCount {
    type Error = EpicycleError;

    fn try_from(n: usize) -> EpicycleResult<Self> {
        Self::new(n)
    }
}

impl From<TermCount> for usize {
    fn from(n: TermCount) -> Self {
        n.0
    }
}

/// Frequencies kept for `n` terms: `[ceil(-n/2), ceil(n/2))`, exactly `n` integers.
pub fn frequency_range(n: TermCount) -> Range<i64> {
    let n = n.get() as i64;
    -(n / 2)..(n + 1) / 2
}

/// Dense coefficient table for a contiguous frequency range.
///
/// `amplitudes[i]` is the coefficient of frequency `min_frequency + i`.
#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum {
    min_frequency: i64,
    amplitudes: Vec<Complex64>,
    samples: usize,
}

impl Spectrum {
    pub fn term_count(&self) -> TermCount {
        TermCount(self.amplitudes.len())
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Number of path samples the coefficients were computed from.
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn min_frequency(&self) -> i64 {
        self.min_frequency
    }

    pub fn frequencies(&self) -> Range<i64> {
        self.min_frequency..self.min_frequency + self.amplitudes.len() as i64
    }

    pub fn get(&self, n: i64) -> Option<Complex64> {
        let idx = usize::try_from(n.checked_sub(self.min_frequency)?).ok()?;
        self.amplitudes.get(idx).copied()
    }

    /// `(frequency, amplitude)` pairs in ascending frequency order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, Complex64)> + '_ {
        self.frequencies().zip(self.amplitudes.iter().copied())
    }
}

pub(crate) fn to_complex(p: Point) -> Complex64 {
    Complex64::new(p.x, p.y)
}

/// `exp(sign * 2πi * n * t / m)`.
///
/// `n * t` is reduced modulo `m` first so the angle stays in `[0, 2π)` however large the
/// product gets.
pub(crate) fn twiddle(sign: f64, n: i64, t: usize, m: usize) -> Complex64 {
    let m = m as i64;
    let k = (n * t as i64).rem_euclid(m);
    Complex64::from_polar(1.0, sign * std::f64::consts::TAU * k as f64 / m as f64)
}

/// `c_n = (1/M) Σ p_t exp(-2πi n t / M)`.
fn coefficient(points: &[Point], n: i64) -> Complex64 {
    let m = points.len();
    let sum: Complex64 = points
        .iter()
        .enumerate()
        .map(|(t, p)| to_complex(*p) * twiddle(-1.0, n, t, m))
        .sum();
    sum / m as f64
}

/// Direct O(N·M) transform of `path` for the `n` frequencies of [`frequency_range`].
pub fn coefficients(path: &PointPath, n: TermCount) -> Spectrum {
    let range = frequency_range(n);
    let points = path.points();
    Spectrum {
        min_frequency: range.start,
        amplitudes: range.map(|f| coefficient(points, f)).collect(),
        samples: points.len(),
    }
}

/// [`coefficients`] with the frequency loop spread over the current rayon pool.
pub fn coefficients_par(path: &PointPath, n: TermCount) -> Spectrum {
    let range = frequency_range(n);
    let points = path.points();
    Spectrum {
        min_frequency: range.start,
        amplitudes: range
            .into_par_iter()
            .map(|f| coefficient(points, f))
            .collect(),
        samples: points.len(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fourier/spectrum.rs"]
mod tests;
