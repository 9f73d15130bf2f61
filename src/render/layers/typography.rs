use crate::assets::color::sample_stops;
use crate::assets::fonts::{FONT_CHOICES, FontBook, FontChoice};
use crate::assets::palette::Palette;
use crate::assets::text::TextLayoutEngine;
use crate::foundation::core::{Affine, Point, Rgba, Vec2};
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::random::rng::SeededRng;
use crate::random::select::pick;
use crate::render::blur::blur_rgba8_premul;
use crate::render::composite::CompositeMode;
use crate::render::cpu::{GlyphPaint, GlyphRasterizer, ShapedLine};
use crate::render::layers::project_t;
use crate::render::surface::Surface;

pub(crate) const MIN_FONT_SIZE: f64 = 92.0;
pub(crate) const MAX_FONT_SIZE: f64 = 210.0;
pub(crate) const MAX_TILT: f64 = 0.025;

const GLOW_COLOR: Rgba = Rgba::new(1.0, 0.94, 1.0, 0.45);
const GLOW_OFFSET_Y: f64 = 8.0;
const OUTLINE_COLOR: Rgba = Rgba::new(0.05, 0.03, 0.11, 0.55);
const HIGHLIGHT_COLOR: Rgba = Rgba::new(1.0, 1.0, 1.0, 0.8);

/// Font size that fits `chars` glyphs across `width`.
pub(crate) fn font_size_for(width: f64, chars: usize) -> f64 {
    let chars = chars.max(1) as f64;
    (width / (chars * 0.7)).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

pub(crate) fn outline_width(font_size: f64) -> f64 {
    (font_size * 0.04).clamp(3.0, 12.0)
}

pub(crate) fn highlight_width(font_size: f64) -> f64 {
    (font_size * 0.015).clamp(1.5, 6.0)
}

/// Mutable collaborators the typography layer borrows from the pipeline.
pub(crate) struct TypeSetter<'a> {
    pub(crate) fonts: &'a mut FontBook,
    pub(crate) text: &'a mut TextLayoutEngine,
    pub(crate) raster: &'a mut GlyphRasterizer,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TypographyReport {
    pub(crate) font: &'static FontChoice,
    pub(crate) font_size: f64,
    pub(crate) rotation: f64,
    pub(crate) glow_blur: f64,
    /// Whether glyphs were painted; false when no font face is available.
    pub(crate) glyphs_painted: bool,
}

/// The passes that paint a name, back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GlyphStage {
    /// Blurred fill, offset below the name.
    Glow,
    /// Palette gradient through glyph coverage.
    Fill,
    Outline,
    /// Thin screen-blended stroke nudged up and left.
    Highlight,
}

impl GlyphStage {
    pub(crate) const ALL: [Self; 4] = [Self::Glow, Self::Fill, Self::Outline, Self::Highlight];
}

/// Where and how one shaped name is placed on the canvas.
pub(crate) struct NamePlacement<'a> {
    pub(crate) line: &'a ShapedLine,
    pub(crate) center: Point,
    pub(crate) rotation: f64,
    pub(crate) font_size: f64,
    pub(crate) glow_blur: f64,
    /// Start and end of the fill gradient, in canvas units.
    pub(crate) gradient: (Point, Point),
    pub(crate) palette: &'a Palette,
}

impl NamePlacement<'_> {
    /// Layout space to physical pixels. `shift` moves the name in canvas space; `nudge`
    /// moves it along its own tilted axes.
    fn transform(&self, surface: &Surface, shift: Vec2, nudge: Vec2) -> Affine {
        let (ax, ay) = self.line.anchor();
        surface.transform()
            * Affine::translate(self.center.to_vec2() + shift)
            * Affine::rotate(self.rotation)
            * Affine::translate(nudge - Vec2::new(ax, ay))
    }
}

/// Rasterize one pass of the name and composite it onto `surface`.
pub(crate) fn paint_stage(
    surface: &mut Surface,
    raster: &mut GlyphRasterizer,
    place: &NamePlacement<'_>,
    stage: GlyphStage,
) -> ForgeResult<()> {
    let (pw, ph) = surface.pixel_size();
    match stage {
        GlyphStage::Glow => {
            let mut glow = raster.rasterize(
                pw,
                ph,
                place.line,
                place.transform(surface, Vec2::new(0.0, GLOW_OFFSET_Y), Vec2::ZERO),
                GlyphPaint::Fill,
                GLOW_COLOR,
            )?;
            let sigma = place.glow_blur / 2.0 * surface.device_scale();
            blur_rgba8_premul(&mut glow, pw, ph, sigma as f32)?;
            surface.composite_layer(&glow, CompositeMode::Normal)
        }
        GlyphStage::Fill => {
            let fill = raster.rasterize(
                pw,
                ph,
                place.line,
                place.transform(surface, Vec2::ZERO, Vec2::ZERO),
                GlyphPaint::Fill,
                Rgba::new(1.0, 1.0, 1.0, 1.0),
            )?;
            let (start, end) = place.gradient;
            let stops = place.palette.text;
            surface.composite_coverage(&fill, CompositeMode::Normal, |p| {
                sample_stops(stops, project_t(p, start, end)).premul()
            })
        }
        GlyphStage::Outline => {
            let outline = raster.rasterize(
                pw,
                ph,
                place.line,
                place.transform(surface, Vec2::ZERO, Vec2::ZERO),
                GlyphPaint::Stroke(outline_width(place.font_size)),
                OUTLINE_COLOR,
            )?;
            surface.composite_layer(&outline, CompositeMode::Normal)
        }
        GlyphStage::Highlight => {
            let nudge = -place.font_size * 0.01;
            let highlight = raster.rasterize(
                pw,
                ph,
                place.line,
                place.transform(surface, Vec2::ZERO, Vec2::new(nudge, nudge)),
                GlyphPaint::Stroke(highlight_width(place.font_size)),
                HIGHLIGHT_COLOR,
            )?;
            surface.composite_layer(&highlight, CompositeMode::Screen)
        }
    }
}

/// Paint `name` centred, tilted, gradient-filled, outlined and embossed.
///
/// Draws, in order: font, rotation, glow blur. All draws happen before any painting so the
/// stream is consumed identically whether or not a face resolves.
pub(crate) fn render_name(
    surface: &mut Surface,
    setter: &mut TypeSetter<'_>,
    name: &str,
    rng: &mut SeededRng,
    palette: &Palette,
) -> ForgeResult<TypographyReport> {
    let canvas = surface.require_canvas()?;
    let (w, h) = canvas.size();

    let text = name.trim();
    if text.is_empty() {
        return Err(ForgeError::validation(
            "blank names must be replaced before typography",
        ));
    }
    let font = pick(FONT_CHOICES, rng, "fonts")?;
    let font_size = font_size_for(w, text.chars().count());
    let rotation = rng.range(-MAX_TILT, MAX_TILT);
    let glow_blur = rng.range(35.0, 60.0);

    let mut report = TypographyReport {
        font,
        font_size,
        rotation,
        glow_blur,
        glyphs_painted: false,
    };

    let Some(face) = setter.fonts.resolve(font) else {
        tracing::warn!(font = font.id, "typography skipped: no font face");
        return Ok(report);
    };
    let layout = setter.text.layout_line(text, &face, font_size as f32)?;
    let line = ShapedLine::from_layout(&layout);

    let placement = NamePlacement {
        line: &line,
        center: canvas.center(),
        rotation,
        font_size,
        glow_blur,
        gradient: (Point::new(w * 0.2, h * 0.2), Point::new(w * 0.8, h * 0.8)),
        palette,
    };
    for stage in GlyphStage::ALL {
        paint_stage(surface, setter.raster, &placement, stage)?;
    }

    report.glyphs_painted = true;
    tracing::debug!(
        font = font.id,
        face = %face.family,
        glyphs = line.glyph_count(),
        font_size,
        rotation,
        glow_blur,
        "name rendered"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "../../../tests/unit/render/layers/typography.rs"]
mod tests;
