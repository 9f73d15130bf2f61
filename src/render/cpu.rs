//! Vector glyph rasterization through `vello_cpu` into full-surface scratch layers.

use crate::assets::text::GlyphBrush;
use crate::foundation::core::{Affine, Rgba};
use crate::foundation::error::{ForgeError, ForgeResult};

/// How glyph outlines are painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum GlyphPaint {
    Fill,
    /// Centred stroke of the given width in user units.
    Stroke(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PlacedGlyph {
    id: u32,
    x: f32,
    y: f32,
}

#[derive(Clone)]
struct GlyphRunData {
    /// The face parley shaped this run with; glyph ids index into it.
    font: vello_cpu::peniko::FontData,
    font_size: f32,
    glyphs: Vec<PlacedGlyph>,
}

/// A shaped line ready to rasterize: glyph positions in layout space, where the line box
/// starts at the origin.
#[derive(Clone)]
pub(crate) struct ShapedLine {
    runs: Vec<GlyphRunData>,
    anchor: (f64, f64),
}

impl ShapedLine {
    pub(crate) fn from_layout(layout: &parley::Layout<GlyphBrush>) -> Self {
        let mut runs = Vec::new();
        let mut middle = None;
        for line in layout.lines() {
            let m = line.metrics();
            if middle.is_none() {
                // middle of the ascent/descent band
                middle = Some(f64::from(m.baseline) - f64::from(m.ascent - m.descent) / 2.0);
            }
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run
                    .positioned_glyphs()
                    .map(|g| PlacedGlyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();
                runs.push(GlyphRunData {
                    font: run.run().font().clone(),
                    font_size: run.run().font_size(),
                    glyphs,
                });
            }
        }
        let anchor = (
            f64::from(layout.width()) / 2.0,
            middle.unwrap_or(f64::from(layout.height()) / 2.0),
        );
        Self { runs, anchor }
    }

    /// Point in layout space that is placed on the requested position: horizontal centre of
    /// the advance, vertical middle of the em band.
    pub(crate) fn anchor(&self) -> (f64, f64) {
        self.anchor
    }

    pub(crate) fn glyph_count(&self) -> usize {
        self.runs.iter().map(|r| r.glyphs.len()).sum()
    }
}

/// Reusable `vello_cpu` context sized to the surface.
#[derive(Default)]
pub(crate) struct GlyphRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
}

impl GlyphRasterizer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Rasterize `line` under `transform` (user units to physical pixels) into a fresh
    /// premultiplied RGBA8 layer of `width x height` pixels.
    pub(crate) fn rasterize(
        &mut self,
        width: u32,
        height: u32,
        line: &ShapedLine,
        transform: Affine,
        paint: GlyphPaint,
        color: Rgba,
    ) -> ForgeResult<Vec<u8>> {
        let w: u16 = width
            .try_into()
            .map_err(|_| ForgeError::render("glyph layer width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| ForgeError::render("glyph layer height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();

        let [r, g, b, a] = color.to_rgba8();
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        if let GlyphPaint::Stroke(width) = paint {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        }

        for run in &line.runs {
            let glyphs = run.glyphs.iter().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            let builder = ctx.glyph_run(&run.font).font_size(run.font_size);
            match paint {
                GlyphPaint::Fill => builder.fill_glyphs(glyphs),
                GlyphPaint::Stroke(_) => builder.stroke_glyphs(glyphs),
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}
