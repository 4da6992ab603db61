//! Standalone SVG document for an approximated path.

use crate::foundation::core::{BezPath, Viewport};

/// Stroke and fill settings for [`render_svg`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SvgStyle {
    pub stroke: String,
    pub stroke_width: f64,
    /// Solid background; `None` leaves the canvas transparent.
    pub background: Option<String>,
    /// Colour of the source path when it is drawn underneath.
    pub source_stroke: String,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            stroke: "#007aff".to_string(),
            stroke_width: 4.0,
            background: Some("#ffffff".to_string()),
            source_stroke: "#c7c7cc".to_string(),
        }
    }
}

/// Build an SVG document of `viewport` size stroking `approx`, optionally over `source`.
pub fn render_svg(
    approx: &BezPath,
    source: Option<&BezPath>,
    viewport: Viewport,
    style: &SvgStyle,
) -> String {
    let (w, h) = (viewport.width, viewport.height);
    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    out.push('\n');
    if let Some(bg) = &style.background {
        out.push_str(&format!(
            r#"  <rect x="0" y="0" width="{w}" height="{h}" fill="{bg}"/>"#
        ));
        out.push('\n');
    }
    if let Some(src) = source {
        push_stroke(&mut out, src, &style.source_stroke, style.stroke_width / 2.0);
    }
    push_stroke(&mut out, approx, &style.stroke, style.stroke_width);
    out.push_str("</svg>\n");
    out
}

fn push_stroke(out: &mut String, path: &BezPath, stroke: &str, width: f64) {
    out.push_str(&format!(
        r#"  <path d="{}" fill="none" stroke="{stroke}" stroke-width="{width}" stroke-linejoin="round" stroke-linecap="round"/>"#,
        path.to_svg()
    ));
    out.push('\n');
}

#[cfg(test)]
#[path = "../../tests/unit/export/svg.rs"]
mod tests;
