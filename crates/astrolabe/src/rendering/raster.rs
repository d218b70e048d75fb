use crate::rendering::spec::ChartSpec;
use crate::rendering::svg::SvgWriter;
use resvg::{tiny_skia, usvg};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("SVG parse failed: {0}")]
    Svg(String),
    #[error("Cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Turns a chart spec into image bytes.
pub trait ChartRenderer: Send + Sync {
    fn render_png(&self, spec: &ChartSpec) -> Result<Vec<u8>, RenderError>;
}

/// Rasterises through SVG with resvg.
pub struct PngRenderer {
    fontdb: Arc<usvg::fontdb::Database>,
    writer: SvgWriter,
}

impl PngRenderer {
    /// Loads the system font database once.
    pub fn new(font_family: &str) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        log::info!("Loaded {} font faces for chart rendering", db.len());
        Self {
            fontdb: Arc::new(db),
            writer: SvgWriter::new(font_family),
        }
    }
}

impl ChartRenderer for PngRenderer {
    fn render_png(&self, spec: &ChartSpec) -> Result<Vec<u8>, RenderError> {
        let svg = self.writer.to_svg(spec);

        let mut opt = usvg::Options::default();
        opt.fontdb = self.fontdb.clone();
        let tree = usvg::Tree::from_str(&svg, &opt).map_err(|e| RenderError::Svg(e.to_string()))?;

        let size = tree.size().to_int_size();
        let (width, height) = (size.width(), size.height());
        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(RenderError::Pixmap { width, height })?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        let png = pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        log::debug!("Rendered {}x{} chart, {} bytes", width, height, png.len());
        Ok(png)
    }
}
