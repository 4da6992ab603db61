//! Inverse transform: rebuild a path from a truncated series.

use rayon::prelude::*;

use crate::foundation::core::{BezPath, Point, PointPath};
use crate::fourier::spectrum::{
    Spectrum, TermCount, coefficients, coefficients_par, twiddle,
};

/// A reconstructed path, one point per input sample.
///
/// The series models a single traversal of a closed curve; use [`closed_points`] or
/// [`to_bez_path`] when the closing segment has to be drawn.
///
/// [`closed_points`]: Approximation::closed_points
/// [`to_bez_path`]: Approximation::to_bez_path
#[derive(Clone, Debug, PartialEq)]
pub struct Approximation {
    term_count: TermCount,
    points: Vec<Point>,
}

impl Approximation {
    pub fn term_count(&self) -> TermCount {
        self.term_count
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closed_points(&self) -> Vec<Point> {
        let mut out = self.points.clone();
        if let Some(first) = self.points.first() {
            out.push(*first);
        }
        out
    }

    pub fn to_bez_path(&self) -> BezPath {
        let mut bp = BezPath::new();
        let Some((first, rest)) = self.points.split_first() else {
            return bp;
        };
        bp.move_to(*first);
        for p in rest {
            bp.line_to(*p);
        }
        bp.close_path();
        bp
    }
}

fn sample(spectrum: &Spectrum, t: usize) -> Point {
    let m = spectrum.samples();
    let z: num_complex::Complex64 = spectrum
        .iter()
        .map(|(n, c)| c * twiddle(1.0, n, t, m))
        .sum();
    Point::new(z.re, z.im)
}

/// `approx_t = Σ_n c_n exp(2πi n t / M)` for `t = 0..M`.
pub fn reconstruct(spectrum: &Spectrum) -> Approximation {
    Approximation {
        term_count: spectrum.term_count(),
        points: (0..spectrum.samples()).map(|t| sample(spectrum, t)).collect(),
    }
}

/// [`reconstruct`] with the sample loop spread over the current rayon pool.
pub fn reconstruct_par(spectrum: &Spectrum) -> Approximation {
    Approximation {
        term_count: spectrum.term_count(),
        points: (0..spectrum.samples())
            .into_par_iter()
            .map(|t| sample(spectrum, t))
            .collect(),
    }
}

/// Coefficients of `path` at `n` terms together with their reconstruction.
pub fn synthesize(path: &PointPath, n: TermCount) -> (Spectrum, Approximation) {
    let spectrum = coefficients(path, n);
    let approx = reconstruct(&spectrum);
    (spectrum, approx)
}

/// Parallel form of [`synthesize`].
pub fn synthesize_par(path: &PointPath, n: TermCount) -> (Spectrum, Approximation) {
    let spectrum = coefficients_par(path, n);
    let approx = reconstruct_par(&spectrum);
    (spectrum, approx)
}

/// Root-mean-square distance between corresponding points.
///
/// Extra points in the longer slice are ignored; two empty slices give `0.0`.
pub fn rms_error(a: &[Point], b: &[Point]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let sq: f64 = a.iter().zip(b).map(|(p, q)| (*p - *q).hypot2()).sum();
    (sq / n as f64).sqrt()
}

#[cfg(test)]
#[path = "../../tests/unit/fourier/synth.rs"]
mod tests;
