use crate::aspects::AspectRecord;
use crate::chart::Chart;
use crate::ephemeris::Body;
use crate::rendering::primitives::{Baseline, Color, LineStyle, Point, Shape, Stroke, TextAnchor};
use crate::rendering::spec::{ChartSpec, WheelKind};
use crate::rendering::visual_config::{GlyphConfig, VisualConfig, LEGEND_ORDER};
use crate::western::{SIGN_GLYPHS, SIGN_NAMES};

/// Cusp labels for the four angles, by cusp index
const ANGLE_LABELS: [(usize, &str); 4] = [(0, "ASC"), (3, "IC"), (6, "DSC"), (9, "MC")];

/// Radii in units of the wheel radius
mod radius {
    pub const ZODIAC: f32 = 1.33;
    pub const OUTER: f32 = 1.08;
    pub const CUSP_LABEL: f32 = 0.7;
    pub const BODY: f32 = 1.0;
    pub const BODY_STEP: f32 = 0.04;
    pub const ASPECT: f32 = 1.0;
    pub const ASPECT_SYMBOL: f32 = 0.9;
    pub const RULER: f32 = 1.13;

    pub const INNER_BODY: f32 = 0.98;
    pub const OUTER_BODY: f32 = 1.12;
    pub const BI_STEP: f32 = 0.01;
    pub const SECOND_CUSP_START: f32 = 1.09;
    pub const SECOND_CUSP_END: f32 = 1.18;
    pub const SECOND_CUSP_LABEL: f32 = 1.21;
    pub const BI_ASPECT_SYMBOL: f32 = 1.05;
}

/// Text placement, before it becomes a [`Shape::Text`]
struct Label<'a> {
    content: &'a str,
    size: f32,
    color: Color,
    baseline: Baseline,
    bold: bool,
}

/// ChartSpec generator - converts charts to drawable shape lists
pub struct ChartSpecGenerator {
    visual_config: VisualConfig,
    glyph_config: GlyphConfig,
}

impl ChartSpecGenerator {
    /// Create a new generator with default configs
    pub fn new() -> Self {
        Self {
            visual_config: VisualConfig::default(),
            glyph_config: GlyphConfig::default(),
        }
    }

    /// Create a generator with custom configs
    pub fn with_configs(visual_config: VisualConfig, glyph_config: GlyphConfig) -> Self {
        Self {
            visual_config,
            glyph_config,
        }
    }

    pub fn visual_config(&self) -> &VisualConfig {
        &self.visual_config
    }

    /// Single wheel: zodiac, cusps, bodies, aspect chords and house rulers.
    pub fn natal_wheel(&self, chart: &Chart, width: f32, height: f32) -> ChartSpec {
        let vc = &self.visual_config;
        let glyphs = self.glyph_config.scaled(width);
        let mut spec = self.blank(width, height, WheelKind::Natal);

        self.zodiac_labels(&mut spec, &glyphs);

        for (i, cusp) in chart.houses.cusps.iter().enumerate() {
            spec.push(Shape::Line {
                from: spec.polar(*cusp, 0.0),
                to: spec.polar(*cusp, radius::OUTER),
                stroke: Stroke::styled(vc.cusp_color, 1.0, LineStyle::Dashed),
            });
            let number = (i + 1).to_string();
            let content = ANGLE_LABELS
                .iter()
                .find(|(idx, _)| *idx == i)
                .map(|(_, label)| *label)
                .unwrap_or(number.as_str());
            self.text(&mut spec, *cusp, radius::CUSP_LABEL, Label {
                content,
                size: glyphs.label_size * 1.3,
                color: vc.cusp_label_color,
                baseline: Baseline::Middle,
                bold: true,
            });
        }

        spec.push(Shape::Circle {
            center: spec.center,
            radius: radius::OUTER * spec.unit_radius,
            fill: None,
            stroke: Some(Stroke::solid(vc.circle_color, 1.5)),
        });

        for (idx, (body, pos)) in chart.positions.iter().enumerate() {
            let r = radius::BODY - radius::BODY_STEP * idx as f32;
            let color = if pos.retrograde {
                vc.retrograde_color
            } else {
                vc.direct_color
            };
            self.body_labels(&mut spec, &glyphs, *body, pos.lon, r, color, -1.0);
            if pos.retrograde {
                self.text(&mut spec, pos.lon, r - 0.135, Label {
                    content: "℞",
                    size: glyphs.degree_size * 1.6,
                    color: vc.retrograde_color,
                    baseline: Baseline::Top,
                    bold: false,
                });
            }
        }

        for aspect in &chart.aspects {
            let (Some(a1), Some(a2)) = (chart.longitude(aspect.first), chart.longitude(aspect.second)) else {
                continue;
            };
            let color = vc.aspect_color(aspect.kind);
            spec.push(Shape::Line {
                from: spec.polar(a1, radius::ASPECT),
                to: spec.polar(a2, radius::ASPECT),
                stroke: Stroke::solid(color.with_alpha(0.8), 1.0),
            });
            self.text(&mut spec, (a1 + a2) / 2.0, radius::ASPECT_SYMBOL, Label {
                content: aspect.kind.symbol(),
                size: glyphs.aspect_symbol_size,
                color,
                baseline: Baseline::Middle,
                bold: true,
            });
        }

        for ruler in &chart.house_rulers {
            let Some(degree) = ruler.ruler_degree else {
                continue;
            };
            spec.push(Shape::Marker {
                center: spec.polar(degree, radius::RULER),
                size: glyphs.label_size,
                color: vc.ruler_color,
            });
            self.text(&mut spec, degree, radius::RULER + 0.03, Label {
                content: ruler.ruler.name(),
                size: glyphs.label_size,
                color: vc.ruler_color,
                baseline: Baseline::Bottom,
                bold: true,
            });
            let house = ruler.house.to_string();
            self.text(&mut spec, degree, radius::RULER + 0.06, Label {
                content: &house,
                size: glyphs.degree_size * 1.3,
                color: vc.ruler_color,
                baseline: Baseline::Bottom,
                bold: false,
            });
        }

        self.legend(&mut spec, &glyphs, None);
        spec.metadata.aspect_count = chart.aspects.len();
        spec
    }

    /// Bi-wheel: chart 1 inside, chart 2 outside, cross aspects between them.
    ///
    /// `aspects` carry chart 1 bodies as `first` and chart 2 bodies as `second`.
    pub fn synastry_wheel(
        &self,
        chart1: &Chart,
        chart2: &Chart,
        aspects: &[AspectRecord],
        width: f32,
        height: f32,
    ) -> ChartSpec {
        let vc = &self.visual_config;
        let glyphs = self.glyph_config.scaled(width);
        let mut spec = self.blank(width, height, WheelKind::Synastry);

        self.zodiac_labels(&mut spec, &glyphs);

        for (i, cusp) in chart1.houses.cusps.iter().enumerate() {
            spec.push(Shape::Line {
                from: spec.polar(*cusp, 0.0),
                to: spec.polar(*cusp, radius::OUTER),
                stroke: Stroke::styled(vc.cusp_color.with_alpha(0.7), 1.0, LineStyle::Dashed),
            });
            let number = (i + 1).to_string();
            self.text(&mut spec, *cusp, radius::CUSP_LABEL, Label {
                content: &number,
                size: glyphs.label_size * 1.2,
                color: vc.cusp_label_color,
                baseline: Baseline::Middle,
                bold: false,
            });
        }

        for (i, cusp) in chart2.houses.cusps.iter().enumerate() {
            spec.push(Shape::Line {
                from: spec.polar(*cusp, radius::SECOND_CUSP_START),
                to: spec.polar(*cusp, radius::SECOND_CUSP_END),
                stroke: Stroke::styled(vc.second_cusp_color.with_alpha(0.7), 1.0, LineStyle::Dotted),
            });
            let number = (i + 1).to_string();
            self.text(&mut spec, *cusp, radius::SECOND_CUSP_LABEL, Label {
                content: &number,
                size: glyphs.label_size * 1.1,
                color: vc.second_cusp_color,
                baseline: Baseline::Middle,
                bold: false,
            });
        }

        for (idx, (body, pos)) in chart1.positions.iter().enumerate() {
            let r = radius::INNER_BODY - radius::BI_STEP * idx as f32;
            self.body_labels(&mut spec, &glyphs, *body, pos.lon, r, vc.first_body_color, -0.75);
        }
        for (idx, (body, pos)) in chart2.positions.iter().enumerate() {
            let r = radius::OUTER_BODY - radius::BI_STEP * idx as f32;
            self.body_labels(&mut spec, &glyphs, *body, pos.lon, r, vc.second_body_color, 0.75);
        }

        for aspect in aspects {
            let (Some(d1), Some(d2)) = (chart1.longitude(aspect.first), chart2.longitude(aspect.second)) else {
                continue;
            };
            let color = vc.aspect_color(aspect.kind).with_alpha(0.7);
            spec.push(Shape::Line {
                from: spec.polar(d1, radius::INNER_BODY),
                to: spec.polar(d2, radius::OUTER_BODY),
                stroke: Stroke::solid(color, 1.5),
            });
            self.text(&mut spec, (d1 + d2) / 2.0, radius::BI_ASPECT_SYMBOL, Label {
                content: aspect.kind.symbol(),
                size: glyphs.aspect_symbol_size,
                color,
                baseline: Baseline::Middle,
                bold: true,
            });
        }

        self.legend(&mut spec, &glyphs, Some("Synastry Aspects"));
        spec.metadata.aspect_count = aspects.len();
        spec
    }

    fn blank(&self, width: f32, height: f32, kind: WheelKind) -> ChartSpec {
        let mut spec = ChartSpec::new(width, height, kind);
        spec.background_color = self.visual_config.background_color;
        spec
    }

    fn zodiac_labels(&self, spec: &mut ChartSpec, glyphs: &GlyphConfig) {
        for i in 0..12 {
            let angle = i as f64 * 30.0 + 15.0;
            let color = self.visual_config.zodiac_colors[i];
            self.text(spec, angle, radius::ZODIAC, Label {
                content: SIGN_GLYPHS[i],
                size: glyphs.zodiac_size,
                color,
                baseline: Baseline::Bottom,
                bold: false,
            });
            self.text(spec, angle, radius::ZODIAC, Label {
                content: SIGN_NAMES[i],
                size: glyphs.zodiac_size,
                color,
                baseline: Baseline::Top,
                bold: false,
            });
        }
    }

    /// Glyph, name and degree of one body. `direction` is -1 to stack the
    /// captions towards the centre, +1 to stack them outwards.
    #[allow(clippy::too_many_arguments)]
    fn body_labels(
        &self,
        spec: &mut ChartSpec,
        glyphs: &GlyphConfig,
        body: Body,
        lon: f64,
        r: f32,
        color: Color,
        direction: f32,
    ) {
        let caption_baseline = if direction < 0.0 {
            Baseline::Top
        } else {
            Baseline::Bottom
        };
        self.text(spec, lon, r, Label {
            content: body.glyph(),
            size: glyphs.body_size,
            color,
            baseline: Baseline::Middle,
            bold: true,
        });
        self.text(spec, lon, r + direction * 0.06, Label {
            content: body.name(),
            size: glyphs.label_size,
            color,
            baseline: caption_baseline,
            bold: false,
        });
        let degree = format!("{:.1}°", lon);
        self.text(spec, lon, r + direction * 0.10, Label {
            content: &degree,
            size: glyphs.degree_size,
            color,
            baseline: caption_baseline,
            bold: false,
        });
    }

    fn legend(&self, spec: &mut ChartSpec, glyphs: &GlyphConfig, title: Option<&str>) {
        let size = glyphs.legend_size;
        let row = size * 1.6;
        let margin = size;
        let box_width = size * 10.0;
        let rows = LEGEND_ORDER.len() as f32 + if title.is_some() { 1.0 } else { 0.0 };
        let origin = Point {
            x: spec.width - box_width - margin,
            y: margin,
        };

        spec.push(Shape::Rect {
            origin,
            width: box_width,
            height: rows * row + size * 0.6,
            fill: Some(Color::WHITE.with_alpha(0.8)),
            stroke: Some(Stroke::solid(Color::rgb(204, 204, 204), 1.0)),
        });

        let mut y = origin.y + row * 0.5 + size * 0.3;
        if let Some(title) = title {
            spec.push(Shape::Text {
                position: Point {
                    x: origin.x + box_width / 2.0,
                    y,
                },
                content: title.to_string(),
                size,
                color: Color::BLACK,
                anchor: TextAnchor::Middle,
                baseline: Baseline::Middle,
                bold: false,
            });
            y += row;
        }

        for kind in LEGEND_ORDER {
            let color = self.visual_config.aspect_color(kind);
            let x = origin.x + size * 0.5;
            spec.push(Shape::Line {
                from: Point { x, y },
                to: Point { x: x + size * 1.6, y },
                stroke: Stroke::solid(color, 2.0),
            });
            spec.push(Shape::Text {
                position: Point {
                    x: x + size * 2.1,
                    y,
                },
                content: format!("{} {}", kind.symbol(), kind.name()),
                size,
                color: Color::BLACK,
                anchor: TextAnchor::Start,
                baseline: Baseline::Middle,
                bold: false,
            });
            y += row;
        }
    }

    fn text(&self, spec: &mut ChartSpec, angle: f64, r: f32, label: Label<'_>) {
        let position = spec.polar(angle, r);
        spec.push(Shape::Text {
            position,
            content: label.content.to_string(),
            size: label.size,
            color: label.color,
            anchor: TextAnchor::Middle,
            baseline: label.baseline,
            bold: label.bold,
        });
    }
}

impl Default for ChartSpecGenerator {
    fn default() -> Self {
        Self::new()
    }
}
