//! Plain point lists: JSON arrays of `[x, y]` pairs or two-column CSV.

use crate::foundation::core::Point;
use crate::foundation::error::{EpicycleError, EpicycleResult};

/// Parse a JSON array of `[x, y]` pairs.
pub fn parse_points_json(text: &str) -> EpicycleResult<Vec<Point>> {
    let pairs: Vec<[f64; 2]> = serde_json::from_str(text)?;
    Ok(pairs.into_iter().map(|[x, y]| Point::new(x, y)).collect())
}

/// Parse `x,y` lines. Blank lines are skipped, as is a non-numeric first line (header).
pub fn parse_points_csv(text: &str) -> EpicycleResult<Vec<Point>> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_row(line) {
            Some(p) => out.push(p),
            None if idx == 0 => continue,
            None => {
                return Err(EpicycleError::import(format!(
                    "line {}: expected 'x,y', got '{line}'",
                    idx + 1
                )));
            }
        }
    }
    Ok(out)
}

fn parse_row(line: &str) -> Option<Point> {
    let mut fields = line.split(',').map(str::trim);
    let x = fields.next()?.parse::<f64>().ok()?;
    let y = fields.next()?.parse::<f64>().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(Point::new(x, y))
}

#[cfg(test)]
#[path = "../../tests/unit/import/points.rs"]
mod tests;
