/// Convenience result type used across the crate.
pub type EpicycleResult<T> = Result<T, EpicycleError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Only conditions the caller must act on are represented here. Degenerate bounding boxes and
/// out-of-range term counts are recovered where they occur and never surface as errors.
#[derive(thiserror::Error, Debug)]
pub enum EpicycleError {
    /// A path had fewer than two points (before or after resampling).
    #[error("insufficient points: need at least 2, found {found}")]
    InsufficientPoints {
        /// Number of points actually present.
        found: usize,
    },

    /// Invalid user-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// An import source could not be turned into a point path.
    #[error("import error: {0}")]
    Import(String),

    /// An export target could not be produced.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EpicycleError {
    /// Build a [`EpicycleError::InsufficientPoints`] value.
    pub fn insufficient_points(found: usize) -> Self {
        Self::InsufficientPoints { found }
    }

    /// Build a [`EpicycleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`EpicycleError::Import`] value.
    pub fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }

    /// Build a [`EpicycleError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`EpicycleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for EpicycleError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
