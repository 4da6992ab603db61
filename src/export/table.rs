use crate::foundation::error::EpicycleResult;
use crate::fourier::polar::{Epicycle, PhaseMode, epicycles};
use crate::fourier::spectrum::Spectrum;

/// Polar coefficient table, one row per frequency in ascending order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoefficientTable {
    pub phase_mode: PhaseMode,
    pub rows: Vec<Epicycle>,
}

impl CoefficientTable {
    pub const CSV_HEADER: &'static str =
        "rotations per second (anticlockwise),radius,initial angle (radians)";

    pub fn from_spectrum(spectrum: &Spectrum, phase_mode: PhaseMode) -> Self {
        let mut rows = epicycles(spectrum, phase_mode);
        rows.sort_by_key(|e| e.rotation_rate);
        Self { phase_mode, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Comma-separated text with a header row and `\n` line endings.
    pub fn to_csv(&self) -> String {
        let mut out = String::with_capacity(64 + self.rows.len() * 48);
        out.push_str(Self::CSV_HEADER);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format!(
                "{},{},{}\n",
                row.rotation_rate, row.radius, row.initial_angle
            ));
        }
        out
    }

    pub fn to_json_pretty(&self) -> EpicycleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/table.rs"]
mod tests;
