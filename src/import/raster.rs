//! Silhouette contour of a raster image.
//!
//! Foreground is decided per pixel: when the image has transparent pixels the alpha channel
//! is the mask, otherwise pixels darker than the threshold are. The largest 8-connected
//! foreground component is traced along its outer boundary with a Moore-neighbour walk.

use std::collections::VecDeque;

use anyhow::Context as _;

use crate::foundation::core::Point;
use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::geometry::resample::decimate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SilhouetteOptions {
    /// Luma below this value is foreground (opaque images only).
    pub luma_threshold: u8,
    /// Alpha at or above this value is foreground (images with transparency).
    pub alpha_threshold: u8,
    /// Contours longer than this are thinned with [`decimate`].
    pub max_points: usize,
}

impl Default for SilhouetteOptions {
    fn default() -> Self {
        Self {
            luma_threshold: 128,
            alpha_threshold: 128,
            max_points: 500,
        }
    }
}

// Clockwise in image space (y grows downwards), starting east.
const DIRS: [(i64, i64); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];
const WEST: usize = 4;

/// Decode `bytes` and return the outer contour of the largest silhouette, in pixel units.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn trace_silhouette(bytes: &[u8], opts: &SilhouetteOptions) -> EpicycleResult<Vec<Point>> {
    let img = image::load_from_memory(bytes)
        .context("decode image from memory")?
        .to_rgba8();
    let (width, height) = img.dimensions();
    let mask = Mask::from_rgba(&img, opts);

    let (label, start) = mask
        .largest_component()
        .ok_or_else(|| EpicycleError::import("image contains no silhouette"))?;
    let contour = mask.trace(&label, start);
    tracing::debug!(width, height, points = contour.len(), "silhouette traced");

    if contour.len() < 2 {
        return Err(EpicycleError::import(
            "silhouette is too small to form a contour",
        ));
    }
    let points: Vec<Point> = contour
        .into_iter()
        .map(|(x, y)| Point::new(x as f64 + 0.5, y as f64 + 0.5))
        .collect();
    Ok(decimate(&points, opts.max_points))
}

struct Mask {
    width: i64,
    height: i64,
    fg: Vec<bool>,
}

impl Mask {
    fn from_rgba(img: &image::RgbaImage, opts: &SilhouetteOptions) -> Self {
        let has_alpha = img.pixels().any(|p| p.0[3] < opts.alpha_threshold);
        let fg = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                if has_alpha {
                    a >= opts.alpha_threshold
                } else {
                    let luma = (299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 1000;
                    luma < u32::from(opts.luma_threshold)
                }
            })
            .collect();
        Self {
            width: i64::from(img.width()),
            height: i64::from(img.height()),
            fg,
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Component labels and the raster-first pixel of the largest component.
    fn largest_component(&self) -> Option<(Vec<u32>, (i64, i64))> {
        let mut labels = vec![0u32; self.fg.len()];
        let mut best: Option<(usize, u32, (i64, i64))> = None;
        let mut next_label = 0u32;
        let mut queue = VecDeque::new();

        for y in 0..self.height {
            for x in 0..self.width {
                let i = (y * self.width + x) as usize;
                if !self.fg[i] || labels[i] != 0 {
                    continue;
                }
                next_label += 1;
                labels[i] = next_label;
                queue.push_back((x, y));
                let mut size = 0usize;
                while let Some((cx, cy)) = queue.pop_front() {
                    size += 1;
                    for (dx, dy) in DIRS {
                        let Some(j) = self.index(cx + dx, cy + dy) else {
                            continue;
                        };
                        if self.fg[j] && labels[j] == 0 {
                            labels[j] = next_label;
                            queue.push_back((cx + dx, cy + dy));
                        }
                    }
                }
                if best.is_none_or(|(s, _, _)| size > s) {
                    best = Some((size, next_label, (x, y)));
                }
            }
        }

        let (_, keep, start) = best?;
        for l in &mut labels {
            if *l != keep {
                *l = 0;
            }
        }
        Some((labels, start))
    }

    /// Moore-neighbour boundary walk from `start`, whose west neighbour is background.
    fn trace(&self, labels: &[u32], start: (i64, i64)) -> Vec<(i64, i64)> {
        let inside = |(x, y): (i64, i64)| self.index(x, y).is_some_and(|i| labels[i] != 0);

        let mut contour = vec![start];
        let mut current = start;
        let mut backtrack = WEST;
        let mut first_step = None;
        let max_steps = 8 * self.fg.len() + 8;

        for _ in 0..max_steps {
            let Some((next, next_backtrack)) = Self::step(current, backtrack, &inside) else {
                break;
            };
            if current == start {
                match first_step {
                    Some(first) if first == next => break,
                    None => first_step = Some(next),
                    Some(_) => {}
                }
            }
            contour.push(next);
            current = next;
            backtrack = next_backtrack;
        }

        if contour.len() > 1 && contour.first() == contour.last() {
            contour.pop();
        }
        contour
    }

    /// Next boundary pixel clockwise from `backtrack`, with the backtrack seen from it.
    fn step(
        current: (i64, i64),
        backtrack: usize,
        inside: &impl Fn((i64, i64)) -> bool,
    ) -> Option<((i64, i64), usize)> {
        let at = |d: usize| (current.0 + DIRS[d].0, current.1 + DIRS[d].1);
        for i in 1..=8 {
            let d = (backtrack + i) % 8;
            let candidate = at(d);
            if inside(candidate) {
                let prev = at((backtrack + i - 1) % 8);
                let delta = (prev.0 - candidate.0, prev.1 - candidate.1);
                let back = DIRS.iter().position(|&dir| dir == delta)?;
                return Some((candidate, back));
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/import/raster.rs"]
mod tests;
