use anyhow::Context as _;

use crate::foundation::core::{Affine, BezPath, Point};
use crate::foundation::error::{EpicycleError, EpicycleResult};

/// Parse raw SVG path data (`d` attribute syntax).
pub fn parse_path_data(d: &str) -> EpicycleResult<BezPath> {
    BezPath::from_svg(d.trim())
        .map_err(|e| EpicycleError::import(format!("invalid svg path data: {e}")))
}

/// Parse an SVG document and return its first path in document order.
///
/// Shapes are converted to paths by `usvg`; the element's absolute transform is applied so the
/// result is in document user space. Text is ignored.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn load_svg_path(bytes: &[u8]) -> EpicycleResult<BezPath> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    let path = first_path(tree.root())
        .ok_or_else(|| EpicycleError::import("svg document contains no path"))?;
    let bez = to_bez_path(path);
    if bez.is_empty() {
        return Err(EpicycleError::import("first svg path is empty"));
    }
    Ok(bez)
}

fn first_path(group: &usvg::Group) -> Option<&usvg::Path> {
    group.children().iter().find_map(|child| match child {
        usvg::Node::Path(p) => Some(p.as_ref()),
        usvg::Node::Group(g) => first_path(g.as_ref()),
        usvg::Node::Text(_) | usvg::Node::Image(_) => None,
    })
}

fn to_affine(ts: usvg::Transform) -> Affine {
    Affine::new([
        f64::from(ts.sx),
        f64::from(ts.ky),
        f64::from(ts.kx),
        f64::from(ts.sy),
        f64::from(ts.tx),
        f64::from(ts.ty),
    ])
}

fn to_bez_path(path: &usvg::Path) -> BezPath {
    use usvg::tiny_skia_path::PathSegment;

    fn pt(p: usvg::tiny_skia_path::Point) -> Point {
        Point::new(f64::from(p.x), f64::from(p.y))
    }

    let mut bez = BezPath::new();
    for seg in path.data().segments() {
        match seg {
            PathSegment::MoveTo(p) => bez.move_to(pt(p)),
            PathSegment::LineTo(p) => bez.line_to(pt(p)),
            PathSegment::QuadTo(p1, p) => bez.quad_to(pt(p1), pt(p)),
            PathSegment::CubicTo(p1, p2, p) => bez.curve_to(pt(p1), pt(p2), pt(p)),
            PathSegment::Close => bez.close_path(),
        }
    }
    bez.apply_affine(to_affine(path.abs_transform()));
    bez
}

#[cfg(test)]
#[path = "../../tests/unit/import/svg.rs"]
mod tests;
