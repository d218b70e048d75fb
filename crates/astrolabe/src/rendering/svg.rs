//! SVG serialisation of a [`ChartSpec`].

use crate::rendering::primitives::{Baseline, Color, Point, Shape, Stroke, TextAnchor};
use crate::rendering::spec::ChartSpec;
use std::fmt::{self, Write};

#[derive(Debug, Clone)]
pub struct SvgWriter {
    font_family: String,
}

impl Default for SvgWriter {
    fn default() -> Self {
        Self::new("sans-serif")
    }
}

impl SvgWriter {
    pub fn new(font_family: &str) -> Self {
        Self {
            font_family: font_family.to_string(),
        }
    }

    pub fn to_svg(&self, spec: &ChartSpec) -> String {
        let mut svg = String::new();
        // fmt::Write for String never fails
        let _ = self.write(spec, &mut svg);
        svg
    }

    pub fn write(&self, spec: &ChartSpec, out: &mut impl Write) -> fmt::Result {
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.2} {:.2}" font-family="{}">"#,
            spec.width,
            spec.height,
            spec.width,
            spec.height,
            escape_xml(&self.font_family)
        )?;
        writeln!(
            out,
            r#"  <rect x="0" y="0" width="{:.2}" height="{:.2}" {}/>"#,
            spec.width,
            spec.height,
            fill_attrs(Some(spec.background_color))
        )?;

        for shape in &spec.shapes {
            write_shape(out, shape)?;
        }

        writeln!(out, "</svg>")
    }
}

fn write_shape(out: &mut impl Write, shape: &Shape) -> fmt::Result {
    match shape {
        Shape::Circle {
            center,
            radius,
            fill,
            stroke,
        } => writeln!(
            out,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" {} {}/>"#,
            center.x,
            center.y,
            radius,
            fill_attrs(*fill),
            stroke_attrs(stroke.as_ref())
        ),
        Shape::Line { from, to, stroke } => writeln!(
            out,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {}/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            stroke_attrs(Some(stroke))
        ),
        Shape::Rect {
            origin,
            width,
            height,
            fill,
            stroke,
        } => writeln!(
            out,
            r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="4" {} {}/>"#,
            origin.x,
            origin.y,
            width,
            height,
            fill_attrs(*fill),
            stroke_attrs(stroke.as_ref())
        ),
        Shape::Text {
            position,
            content,
            size,
            color,
            anchor,
            baseline,
            bold,
        } => writeln!(
            out,
            r#"  <text x="{:.2}" y="{:.2}" text-anchor="{}" dominant-baseline="{}" font-size="{:.2}"{} {}>{}</text>"#,
            position.x,
            position.y,
            anchor_name(*anchor),
            baseline_name(*baseline),
            size,
            if *bold { r#" font-weight="bold""# } else { "" },
            fill_attrs(Some(*color)),
            escape_xml(content)
        ),
        Shape::Marker {
            center,
            size,
            color,
        } => writeln!(
            out,
            r#"  <polygon points="{}" {}/>"#,
            star_points(*center, *size),
            fill_attrs(Some(*color))
        ),
    }
}

fn fill_attrs(fill: Option<Color>) -> String {
    match fill {
        Some(c) if c.a == 255 => format!(r#"fill="{}""#, c.to_hex()),
        Some(c) => format!(r#"fill="{}" fill-opacity="{:.3}""#, c.to_hex(), c.opacity()),
        None => r#"fill="none""#.to_string(),
    }
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    let Some(stroke) = stroke else {
        return r#"stroke="none""#.to_string();
    };
    let mut parts = vec![
        format!(r#"stroke="{}""#, stroke.color.to_hex()),
        format!(r#"stroke-width="{:.2}""#, stroke.width),
    ];
    if stroke.color.a != 255 {
        parts.push(format!(r#"stroke-opacity="{:.3}""#, stroke.color.opacity()));
    }
    if let Some(dashes) = &stroke.dash_array {
        let pattern: Vec<String> = dashes.iter().map(|d| format!("{:.2}", d)).collect();
        parts.push(format!(r#"stroke-dasharray="{}""#, pattern.join(",")));
    }
    parts.join(" ")
}

fn anchor_name(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn baseline_name(baseline: Baseline) -> &'static str {
    match baseline {
        Baseline::Top => "hanging",
        Baseline::Middle => "central",
        Baseline::Bottom => "text-after-edge",
    }
}

/// Outer and inner vertices of a five-pointed star, point up
fn star_points(center: Point, size: f32) -> String {
    let outer = size / 2.0;
    let inner = outer * 0.4;
    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let angle = (-90.0 + i as f32 * 36.0).to_radians();
            format!("{:.2},{:.2}", center.x + r * angle.cos(), center.y + r * angle.sin())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::primitives::LineStyle;
    use crate::rendering::spec::WheelKind;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & \"c\">"), "a&lt;b &amp; &quot;c&quot;&gt;");
    }

    #[test]
    fn test_dashed_line_and_text() {
        let mut spec = ChartSpec::new(100.0, 100.0, WheelKind::Natal);
        spec.push(Shape::Line {
            from: Point { x: 0.0, y: 0.0 },
            to: Point { x: 10.0, y: 10.0 },
            stroke: Stroke::styled(Color::rgb(128, 128, 128), 1.0, LineStyle::Dashed),
        });
        spec.push(Shape::Text {
            position: Point { x: 5.0, y: 5.0 },
            content: "Sun & Moon".into(),
            size: 12.0,
            color: Color::rgb(0, 0, 128),
            anchor: TextAnchor::Middle,
            baseline: Baseline::Middle,
            bold: true,
        });

        let svg = SvgWriter::default().to_svg(&spec);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\""));
        assert!(svg.contains(r#"stroke-dasharray="6.00,4.00""#));
        assert!(svg.contains(r#"font-weight="bold""#));
        assert!(svg.contains(">Sun &amp; Moon</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_star_has_ten_vertices() {
        assert_eq!(star_points(Point { x: 0.0, y: 0.0 }, 10.0).split(' ').count(), 10);
    }
}
