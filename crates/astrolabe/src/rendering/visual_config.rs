use crate::aspects::AspectKind;
use crate::rendering::primitives::Color;
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// CSS color names used by the chart palettes
    pub static ref NAMED_COLORS: HashMap<&'static str, Color> = {
        let mut m = HashMap::new();
        m.insert("black", Color::BLACK);
        m.insert("white", Color::WHITE);
        m.insert("red", Color::rgb(255, 0, 0));
        m.insert("green", Color::rgb(0, 128, 0));
        m.insert("gold", Color::rgb(255, 215, 0));
        m.insert("blue", Color::rgb(0, 0, 255));
        m.insert("gray", Color::rgb(128, 128, 128));
        m.insert("grey", Color::rgb(128, 128, 128));
        m.insert("dimgray", Color::rgb(105, 105, 105));
        m.insert("orange", Color::rgb(255, 165, 0));
        m.insert("navy", Color::rgb(0, 0, 128));
        m.insert("darkred", Color::rgb(139, 0, 0));
        m.insert("purple", Color::rgb(128, 0, 128));
        m.insert("slateblue", Color::rgb(106, 90, 205));
        m.insert("crimson", Color::rgb(220, 20, 60));
        m
    };

    /// Zodiac label colors, element cycle fire/earth/air/water
    pub static ref ZODIAC_COLORS: [Color; 12] = {
        let cycle = [named("red"), named("green"), named("gold"), named("blue")];
        let mut colors = [Color::BLACK; 12];
        for (i, c) in colors.iter_mut().enumerate() {
            *c = cycle[i % 4];
        }
        colors
    };
}

/// Look up a palette color; unknown names draw black
pub fn named(name: &str) -> Color {
    NAMED_COLORS.get(name).copied().unwrap_or(Color::BLACK)
}

/// Legend rows in display order
pub const LEGEND_ORDER: [AspectKind; 5] = [
    AspectKind::Conjunction,
    AspectKind::Sextile,
    AspectKind::Trine,
    AspectKind::Square,
    AspectKind::Opposition,
];

/// Visual styling configuration for chart elements
#[derive(Debug, Clone)]
pub struct VisualConfig {
    pub background_color: Color,
    pub zodiac_colors: [Color; 12],
    pub aspect_colors: HashMap<AspectKind, Color>,
    pub circle_color: Color,
    pub cusp_color: Color,
    pub cusp_label_color: Color,
    pub direct_color: Color,
    pub retrograde_color: Color,
    pub ruler_color: Color,
    pub second_cusp_color: Color,
    pub first_body_color: Color,
    pub second_body_color: Color,
    pub font_family: String,
}

impl Default for VisualConfig {
    fn default() -> Self {
        let mut aspect_colors = HashMap::new();
        aspect_colors.insert(AspectKind::Conjunction, named("gray"));
        aspect_colors.insert(AspectKind::Sextile, named("green"));
        aspect_colors.insert(AspectKind::Square, named("orange"));
        aspect_colors.insert(AspectKind::Trine, named("blue"));
        aspect_colors.insert(AspectKind::Opposition, named("red"));

        Self {
            background_color: Color::WHITE,
            zodiac_colors: *ZODIAC_COLORS,
            aspect_colors,
            circle_color: Color::BLACK,
            cusp_color: named("grey"),
            cusp_label_color: named("dimgray"),
            direct_color: named("navy"),
            retrograde_color: named("darkred"),
            ruler_color: named("purple"),
            second_cusp_color: named("slateblue"),
            first_body_color: named("navy"),
            second_body_color: named("crimson"),
            font_family: "DejaVu Sans, Noto Sans Symbols, Noto Sans Symbols 2, sans-serif".to_string(),
        }
    }
}

impl VisualConfig {
    pub fn aspect_color(&self, kind: AspectKind) -> Color {
        self.aspect_colors.get(&kind).copied().unwrap_or(Color::BLACK)
    }
}

/// Glyph sizes in pixels at the default 1500px canvas
#[derive(Debug, Clone)]
pub struct GlyphConfig {
    pub zodiac_size: f32,
    pub body_size: f32,
    pub label_size: f32,
    pub degree_size: f32,
    pub aspect_symbol_size: f32,
    pub legend_size: f32,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            zodiac_size: 27.0,
            body_size: 24.0,
            label_size: 17.0,
            degree_size: 11.0,
            aspect_symbol_size: 29.0,
            legend_size: 25.0,
        }
    }
}

impl GlyphConfig {
    /// Sizes scaled to a canvas of `width` pixels
    pub fn scaled(&self, width: f32) -> Self {
        let k = width / 1500.0;
        Self {
            zodiac_size: self.zodiac_size * k,
            body_size: self.body_size * k,
            label_size: self.label_size * k,
            degree_size: self.degree_size * k,
            aspect_symbol_size: self.aspect_symbol_size * k,
            legend_size: self.legend_size * k,
        }
    }
}
