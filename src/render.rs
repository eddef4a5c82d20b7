use std::path::Path;

use kurbo::{BezPath, PathEl};

use crate::assets::SourceImage;
use crate::config::OutputFormat;
use crate::error::{RoundelError, RoundelResult};

enum OutputSurface {
    Svg(cairo::SvgSurface),
    Pdf(cairo::PdfSurface),
}

/// The shared drawing surface for one run, backed by a cairo vector
/// surface writing straight to the output path.
pub struct Canvas {
    surface: OutputSurface,
    cx: cairo::Context,
}

impl Canvas {
    pub fn create(format: OutputFormat, out: &Path, size: u32) -> RoundelResult<Self> {
        let side = f64::from(size);
        let surface = match format {
            OutputFormat::Svg => {
                let mut svg = cairo::SvgSurface::new(side, side, Some(out)).map_err(|e| {
                    RoundelError::encoding(format!(
                        "creating svg surface '{}' failed: {e}",
                        out.display()
                    ))
                })?;
                svg.set_document_unit(cairo::SvgUnit::Px);
                OutputSurface::Svg(svg)
            }
            OutputFormat::Pdf => {
                let pdf = cairo::PdfSurface::new(side, side, out).map_err(|e| {
                    RoundelError::encoding(format!(
                        "creating pdf surface '{}' failed: {e}",
                        out.display()
                    ))
                })?;
                OutputSurface::Pdf(pdf)
            }
        };

        let cx = match &surface {
            OutputSurface::Svg(s) => cairo::Context::new(s),
            OutputSurface::Pdf(s) => cairo::Context::new(s),
        }
        .map_err(|e| RoundelError::encoding(format!("creating cairo context failed: {e}")))?;

        Ok(Self { surface, cx })
    }

    /// Restricts all subsequent paints to the interior of `path`. Cairo
    /// intersects with the active clip, so nested calls only ever shrink
    /// the paintable region.
    pub fn clip(&self, path: &BezPath) -> RoundelResult<()> {
        self.cx.new_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => self.cx.move_to(p.x, p.y),
                PathEl::LineTo(p) => self.cx.line_to(p.x, p.y),
                PathEl::QuadTo(p1, p2) => {
                    // Cairo has no quadratic segments; raise to a cubic.
                    let (x0, y0) = self.cx.current_point().map_err(|e| {
                        RoundelError::encoding(format!("querying current point failed: {e}"))
                    })?;
                    let c1 = (x0 + 2.0 / 3.0 * (p1.x - x0), y0 + 2.0 / 3.0 * (p1.y - y0));
                    let c2 = (
                        p2.x + 2.0 / 3.0 * (p1.x - p2.x),
                        p2.y + 2.0 / 3.0 * (p1.y - p2.y),
                    );
                    self.cx.curve_to(c1.0, c1.1, c2.0, c2.1, p2.x, p2.y);
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    self.cx.curve_to(p1.x, p1.y, p2.x, p2.y, p3.x, p3.y)
                }
                PathEl::ClosePath => self.cx.close_path(),
            }
        }
        self.cx.clip();
        Ok(())
    }

    /// Paints `source` with its top-left corner at `(x, y)`, through the
    /// active clip.
    pub fn paint(&self, source: &PreparedSource, x: f64, y: f64) -> RoundelResult<()> {
        self.cx
            .set_source_surface(&source.surface, x, y)
            .map_err(|e| RoundelError::encoding(format!("setting source surface failed: {e}")))?;
        self.cx
            .paint()
            .map_err(|e| RoundelError::encoding(format!("painting source failed: {e}")))?;
        Ok(())
    }

    /// Finalizes the document. For PDF the drawn page is emitted
    /// explicitly before the surface is finished.
    pub fn finish(self) -> RoundelResult<()> {
        let Self { surface, cx } = self;
        if let OutputSurface::Pdf(_) = &surface {
            cx.show_page()
                .map_err(|e| RoundelError::encoding(format!("emitting pdf page failed: {e}")))?;
        }
        drop(cx);

        let raw: &cairo::Surface = match &surface {
            OutputSurface::Svg(s) => s.as_ref(),
            OutputSurface::Pdf(s) => s.as_ref(),
        };
        raw.finish();
        raw.status()
            .map_err(|e| RoundelError::encoding(format!("finishing output surface failed: {e}")))
    }
}

/// An input image uploaded once into a cairo source surface and reused
/// across every step that selects it.
pub struct PreparedSource {
    surface: cairo::ImageSurface,
}

impl PreparedSource {
    pub fn new(image: &SourceImage) -> RoundelResult<Self> {
        let width = i32::try_from(image.width)
            .map_err(|_| RoundelError::encoding("image width exceeds cairo limits"))?;
        let height = i32::try_from(image.height)
            .map_err(|_| RoundelError::encoding("image height exceeds cairo limits"))?;
        let stride = width
            .checked_mul(4)
            .ok_or_else(|| RoundelError::encoding("image row size exceeds cairo limits"))?;
        let surface = cairo::ImageSurface::create_for_data(
            image.bgra8_premul.clone(),
            cairo::Format::ARgb32,
            width,
            height,
            stride,
        )
        .map_err(|e| {
            RoundelError::encoding(format!(
                "creating source surface for '{}' failed: {e}",
                image.path.display()
            ))
        })?;
        Ok(Self { surface })
    }
}
