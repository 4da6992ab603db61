use std::ops::RangeInclusive;

use crate::export::table::CoefficientTable;
use crate::foundation::core::{BezPath, Point, PointPath};
use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::fourier::spectrum::{Spectrum, TermCount};
use crate::fourier::synth::{Approximation, synthesize, synthesize_par};
use crate::geometry::normalize::normalize;
use crate::geometry::resample::{resample, resample_bez_path};
use crate::session::config::SessionConfig;

#[derive(Clone, Debug)]
struct Drawing {
    path: PointPath,
    spectrum: Spectrum,
    approximation: Approximation,
}

/// The current drawing and its approximation.
///
/// A committed path is resampled and fitted to the viewport once; changing the term count
/// afterwards only reruns synthesis on the stored path. Replacing the path always recomputes
/// the approximation, so the two never disagree.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    pool: Option<rayon::ThreadPool>,
    term_count: TermCount,
    drawing: Option<Drawing>,
}

impl Session {
    pub fn new(config: SessionConfig) -> EpicycleResult<Self> {
        config.validate()?;
        let pool = if config.parallel {
            Some(build_thread_pool(config.threads)?)
        } else {
            None
        };
        let term_count = TermCount::clamp(config.initial_terms, config.term_cap, config.term_cap);
        Ok(Self {
            config,
            pool,
            term_count,
            drawing: None,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn term_count(&self) -> TermCount {
        self.term_count
    }

    /// Term counts accepted for the current path, `2..=min(samples, cap)`.
    pub fn term_range(&self) -> RangeInclusive<usize> {
        let samples = self
            .drawing
            .as_ref()
            .map_or(self.config.term_cap, |d| d.path.len());
        TermCount::MIN..=samples.min(self.config.term_cap).max(TermCount::MIN)
    }

    /// Resampled, normalized path the approximation is derived from.
    pub fn path(&self) -> Option<&PointPath> {
        self.drawing.as_ref().map(|d| &d.path)
    }

    pub fn spectrum(&self) -> Option<&Spectrum> {
        self.drawing.as_ref().map(|d| &d.spectrum)
    }

    pub fn approximation(&self) -> Option<&Approximation> {
        self.drawing.as_ref().map(|d| &d.approximation)
    }

    /// Resample, normalize and synthesize `raw`, replacing the current drawing.
    ///
    /// On error the session is left exactly as it was.
    #[tracing::instrument(skip(self, raw), fields(raw = raw.len()))]
    pub fn commit_path(&mut self, raw: &[Point]) -> EpicycleResult<&Approximation> {
        let raw = PointPath::new(raw.to_vec())?;
        let sampled = resample(&raw, &self.config.resample)?;
        self.commit_sampled(sampled)
    }

    /// Flatten `bez` (first subpath only) and commit it like [`commit_path`](Self::commit_path).
    #[tracing::instrument(skip(self, bez))]
    pub fn commit_bez_path(&mut self, bez: &BezPath) -> EpicycleResult<&Approximation> {
        let sampled = resample_bez_path(bez, &self.config.resample)?;
        self.commit_sampled(sampled)
    }

    fn commit_sampled(&mut self, sampled: PointPath) -> EpicycleResult<&Approximation> {
        if sampled.len() < PointPath::MIN_POINTS {
            return Err(EpicycleError::insufficient_points(sampled.len()));
        }
        let path = normalize(&sampled, &self.config.normalize)?;
        let term_count = TermCount::clamp(self.term_count.get(), path.len(), self.config.term_cap);
        let (spectrum, approximation) = self.synthesize(&path, term_count);
        tracing::debug!(
            samples = path.len(),
            terms = term_count.get(),
            "committed new path"
        );

        self.term_count = term_count;
        let drawing = self.drawing.insert(Drawing {
            path,
            spectrum,
            approximation,
        });
        Ok(&drawing.approximation)
    }

    /// Clamp `n` into [`term_range`](Self::term_range) and resynthesize the stored path.
    ///
    /// Returns the new approximation, or `None` when there is no drawing yet; the clamped
    /// count is kept either way.
    #[tracing::instrument(skip(self))]
    pub fn set_term_count(&mut self, n: usize) -> Option<&Approximation> {
        let range = self.term_range();
        self.apply_term_count(TermCount::clamp(n, *range.end(), self.config.term_cap))
    }

    /// [`set_term_count`](Self::set_term_count) for slider-style real values (truncated).
    pub fn set_term_count_f64(&mut self, n: f64) -> Option<&Approximation> {
        let range = self.term_range();
        self.apply_term_count(TermCount::clamp_f64(n, *range.end(), self.config.term_cap))
    }

    fn apply_term_count(&mut self, term_count: TermCount) -> Option<&Approximation> {
        self.term_count = term_count;
        let current = self.drawing.as_ref()?;
        let (spectrum, approximation) = self.synthesize(&current.path, term_count);
        let drawing = self.drawing.as_mut()?;
        drawing.spectrum = spectrum;
        drawing.approximation = approximation;
        Some(&drawing.approximation)
    }

    /// Drop the current drawing. The term count is kept.
    pub fn reset(&mut self) {
        self.drawing = None;
    }

    /// Polar coefficient table for the current drawing and term count.
    pub fn export_coefficients(&self) -> Option<CoefficientTable> {
        let drawing = self.drawing.as_ref()?;
        Some(CoefficientTable::from_spectrum(
            &drawing.spectrum,
            self.config.phase_mode,
        ))
    }

    fn synthesize(&self, path: &PointPath, n: TermCount) -> (Spectrum, Approximation) {
        match &self.pool {
            Some(pool) => pool.install(|| synthesize_par(path, n)),
            None => synthesize(path, n),
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> EpicycleResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| EpicycleError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
