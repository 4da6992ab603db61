//! Raster export of a rendered SVG document.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{EpicycleError, EpicycleResult};

/// Rasterize an SVG document at its own size into straight-alpha RGBA8.
pub fn rasterize_svg(svg: &str) -> EpicycleResult<image::RgbaImage> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default()).context("parse svg tree")?;

    let size = tree.size();
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| EpicycleError::export("failed to allocate pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    let mut rgba = pixmap.take();
    demultiply_rgba8_in_place(&mut rgba);
    image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| EpicycleError::export("pixmap size does not match its dimensions"))
}

/// Rasterize `svg` and write it to `out` as PNG.
pub fn write_png(svg: &str, out: &Path) -> EpicycleResult<()> {
    let img = rasterize_svg(svg)?;
    img.save_with_format(out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}

fn to_px(v: f32) -> EpicycleResult<u32> {
    const MAX_DIM: f32 = 16_384.0;
    if !v.is_finite() || v <= 0.0 || v > MAX_DIM {
        return Err(EpicycleError::export(format!(
            "svg size {v} is outside (0, {MAX_DIM}]"
        )));
    }
    Ok(v.ceil() as u32)
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
