use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::fourier::polar::PhaseMode;
use crate::fourier::spectrum::TermCount;
use crate::geometry::normalize::NormalizeConfig;
use crate::geometry::resample::ResampleOptions;

/// Everything a [`Session`](crate::Session) needs from its host.
///
/// All fields have defaults, so a JSON file only has to name what it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Destination viewport, padding, and reserved chrome height.
    pub normalize: NormalizeConfig,
    /// Arc-length resampling density.
    pub resample: ResampleOptions,
    /// Upper bound on the term count regardless of sample count.
    pub term_cap: usize,
    /// Term count used before the host picks one.
    pub initial_terms: usize,
    /// Phase convention used by coefficient export.
    pub phase_mode: PhaseMode,
    /// Run synthesis on a dedicated rayon pool.
    pub parallel: bool,
    /// Worker threads for the pool; `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            normalize: NormalizeConfig::default(),
            resample: ResampleOptions::default(),
            term_cap: 501,
            initial_terms: 11,
            phase_mode: PhaseMode::Atan2,
            parallel: false,
            threads: None,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> EpicycleResult<()> {
        self.normalize.validate()?;
        self.resample.validate()?;
        if self.term_cap < TermCount::MIN {
            return Err(EpicycleError::validation(format!(
                "term_cap must be >= {}",
                TermCount::MIN
            )));
        }
        if self.threads == Some(0) {
            return Err(EpicycleError::validation("threads must be >= 1 when set"));
        }
        Ok(())
    }

    pub fn from_json_str(text: &str) -> EpicycleResult<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> EpicycleResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read session config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
