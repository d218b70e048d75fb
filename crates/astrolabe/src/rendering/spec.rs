use crate::rendering::primitives::{Color, Point, Shape};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelKind {
    Natal,
    Synastry,
}

/// Chart metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMetadata {
    pub kind: WheelKind,
    pub aspect_count: usize,
}

/// Chart specification - declarative description of chart to render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub width: f32,
    pub height: f32,
    pub center: Point,
    /// Pixels per unit of wheel radius
    pub unit_radius: f32,
    pub background_color: Color,
    pub shapes: Vec<Shape>,
    pub metadata: ChartMetadata,
}

impl ChartSpec {
    /// Unit radius as a share of the canvas width
    pub const UNIT_RADIUS_RATIO: f32 = 0.3;

    /// Create a new empty chart spec
    pub fn new(width: f32, height: f32, kind: WheelKind) -> Self {
        Self {
            width,
            height,
            center: Point {
                x: width / 2.0,
                y: height / 2.0,
            },
            unit_radius: width * Self::UNIT_RADIUS_RATIO,
            background_color: Color::WHITE,
            shapes: Vec::new(),
            metadata: ChartMetadata {
                kind,
                aspect_count: 0,
            },
        }
    }

    /// Screen point at ecliptic `angle_deg` and wheel radius `r`.
    ///
    /// 0° points East and angles grow clockwise on screen.
    pub fn polar(&self, angle_deg: f64, r: f32) -> Point {
        let theta = angle_deg.to_radians() as f32;
        let dist = r * self.unit_radius;
        Point {
            x: self.center.x + dist * theta.cos(),
            y: self.center.y + dist * theta.sin(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_orientation() {
        let spec = ChartSpec::new(1000.0, 1000.0, WheelKind::Natal);
        assert_eq!(spec.unit_radius, 300.0);

        let east = spec.polar(0.0, 1.0);
        assert!((east.x - 800.0).abs() < 1e-3 && (east.y - 500.0).abs() < 1e-3);

        // Clockwise: 90° lands below the centre in screen space
        let south = spec.polar(90.0, 1.0);
        assert!((south.x - 500.0).abs() < 1e-3 && (south.y - 800.0).abs() < 1e-3);
    }
}
