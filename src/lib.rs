//! Epicycles turns a closed 2D curve into a truncated complex Fourier series and back.
//!
//! # Pipeline overview
//!
//! 1. **Import**: a drawing, SVG document, point list, or raster silhouette becomes raw points
//!    (see [`import`]).
//! 2. **Resample**: raw points are redistributed at a uniform arc-length step
//!    ([`resample`]), because synthesis assumes uniform time sampling.
//! 3. **Normalize**: the sampled path is fitted into the viewport ([`normalize`]).
//! 4. **Synthesize**: `N` coefficients are computed and the path is rebuilt from them
//!    ([`coefficients`], [`reconstruct`]).
//! 5. **Export**: the coefficient table (CSV/JSON), an SVG document, or a PNG raster
//!    (see [`export`]).
//!
//! [`Session`] owns steps 2–4 for an interactive host: committing a path runs the whole
//! pipeline, while changing the term count only reruns synthesis.
//!
//! # Example
//!
//! ```
//! use epicycles::{Point, Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::default())?;
//! session.commit_path(&[
//!     Point::new(0.0, 0.0),
//!     Point::new(100.0, 0.0),
//!     Point::new(50.0, 80.0),
//! ])?;
//! session.set_term_count(3);
//! let table = session.export_coefficients().expect("a path is committed");
//! assert_eq!(table.len(), 3);
//! # Ok::<(), epicycles::EpicycleError>(())
//! ```
#![forbid(unsafe_code)]

mod foundation;
mod fourier;
mod geometry;
mod session;

/// Output formats for coefficients and approximated paths.
pub mod export;
/// Input sources that produce raw points.
pub mod import;

pub use foundation::core::{Affine, BezPath, Line, Point, PointPath, Rect, Vec2, Viewport, bounds_of};
pub use foundation::error::{EpicycleError, EpicycleResult};
pub use fourier::polar::{Epicycle, PhaseMode, epicycles};
pub use fourier::spectrum::{
    Spectrum, TermCount, coefficients, coefficients_par, frequency_range,
};
pub use fourier::synth::{
    Approximation, reconstruct, reconstruct_par, rms_error, synthesize, synthesize_par,
};
pub use geometry::normalize::{NormalizeConfig, fit_transform, normalize, normalize_points};
pub use geometry::resample::{
    ResampleOptions, decimate, flatten_first_subpath, resample, resample_at_spacing,
    resample_bez_path, resample_to_count,
};
pub use session::config::SessionConfig;
pub use session::state::Session;
