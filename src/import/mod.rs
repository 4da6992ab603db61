//! Input sources that produce raw point paths for a session.

pub mod points;
pub mod raster;
pub mod svg;
