pub mod generator;
pub mod primitives;
pub mod raster;
pub mod spec;
pub mod svg;
pub mod visual_config;

pub use generator::ChartSpecGenerator;
pub use primitives::{Baseline, Color, LineStyle, Point, Shape, Stroke, TextAnchor};
pub use raster::{ChartRenderer, PngRenderer, RenderError};
pub use spec::{ChartMetadata, ChartSpec, WheelKind};
pub use svg::SvgWriter;
pub use visual_config::{GlyphConfig, VisualConfig};
