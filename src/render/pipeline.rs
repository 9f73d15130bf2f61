use crate::assets::fonts::FontBook;
use crate::assets::palette::{PALETTES, Palette};
use crate::assets::text::TextLayoutEngine;
use crate::foundation::core::Canvas;
use crate::foundation::error::ForgeResult;
use crate::random::rng::SeededRng;
use crate::random::seed::Seed;
use crate::random::select::pick;
use crate::render::cpu::GlyphRasterizer;
use crate::render::layers::background::paint_background;
use crate::render::layers::particles::sprinkle_sparks;
use crate::render::layers::texture::draw_scanlines;
use crate::render::layers::typography::{TypeSetter, render_name};
use crate::render::surface::{FrameRGBA, Surface};

pub(crate) const MIN_WIDTH: u32 = 720;
pub(crate) const MAX_WIDTH: u32 = 1180;
pub(crate) const MIN_HEIGHT: u32 = 320;
pub(crate) const MAX_HEIGHT: u32 = 520;
const WIDTH_PER_CHAR: u32 = 120;
const ASPECT: f64 = 0.48;

/// Logical poster size for `name`: wider for longer names, height following at a fixed aspect.
pub fn layout_for_name(name: &str) -> Canvas {
    let chars = u32::try_from(name.chars().count()).unwrap_or(u32::MAX);
    let width = chars.saturating_mul(WIDTH_PER_CHAR).clamp(MIN_WIDTH, MAX_WIDTH);
    let height = ((f64::from(width) * ASPECT).round() as u32).clamp(MIN_HEIGHT, MAX_HEIGHT);
    Canvas { width, height }
}

/// Everything that determines the pixels of one render.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderState {
    pub name: String,
    pub seed: Seed,
    /// Name of the drawn palette.
    pub palette: &'static str,
    /// Identifier of the drawn font.
    pub font: &'static str,
    /// Logical width.
    pub width: u32,
    /// Logical height.
    pub height: u32,
    pub device_scale: f64,
    /// Backing buffer width in physical pixels.
    pub width_px: u32,
    /// Backing buffer height in physical pixels.
    pub height_px: u32,
    pub stats: RenderStats,
}

/// Per-layer draws and counts of one render.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct RenderStats {
    pub blobs: u32,
    pub font_size: f64,
    /// Tilt of the name in radians.
    pub rotation: f64,
    pub glow_blur: f64,
    /// False when no font face could be resolved and glyphs were skipped.
    pub glyphs_painted: bool,
    pub sparks: u32,
    pub scanlines: u32,
    /// Total RNG draws consumed.
    pub draws: u64,
}

/// The surface plus the font and glyph machinery, reused across renders.
pub(crate) struct RenderPipeline {
    surface: Surface,
    fonts: FontBook,
    text: TextLayoutEngine,
    raster: GlyphRasterizer,
}

impl RenderPipeline {
    pub(crate) fn new(device_scale: f64, fonts: FontBook) -> ForgeResult<Self> {
        Ok(Self {
            surface: Surface::new(device_scale)?,
            fonts,
            text: TextLayoutEngine::new(),
            raster: GlyphRasterizer::new(),
        })
    }

    pub(crate) fn surface(&self) -> &Surface {
        &self.surface
    }

    pub(crate) fn set_device_scale(&mut self, scale: f64) -> ForgeResult<()> {
        self.surface.set_device_scale(scale)
    }

    pub(crate) fn frame(&self) -> FrameRGBA {
        self.surface.to_frame()
    }

    /// Paint `name` under `seed`: palette, fit, then background, typography, particles,
    /// texture, all fed from one RNG.
    ///
    /// `name` must already be non-blank.
    pub(crate) fn render(&mut self, name: &str, seed: Seed) -> ForgeResult<RenderState> {
        let mut rng = SeededRng::new(seed);
        let palette: &'static Palette = pick(PALETTES, &mut rng, "palettes")?;
        let canvas = layout_for_name(name);
        self.surface.fit(canvas)?;

        let background = paint_background(&mut self.surface, &mut rng, palette)?;
        let mut setter = TypeSetter {
            fonts: &mut self.fonts,
            text: &mut self.text,
            raster: &mut self.raster,
        };
        let typography = render_name(&mut self.surface, &mut setter, name, &mut rng, palette)?;
        let sparks = sprinkle_sparks(&mut self.surface, &mut rng, palette)?;
        let scanlines = draw_scanlines(&mut self.surface)?;

        let (width_px, height_px) = self.surface.pixel_size();
        let stats = RenderStats {
            blobs: background.blobs.len() as u32,
            font_size: typography.font_size,
            rotation: typography.rotation,
            glow_blur: typography.glow_blur,
            glyphs_painted: typography.glyphs_painted,
            sparks: sparks.len() as u32,
            scanlines,
            draws: rng.draws(),
        };
        tracing::debug!(
            palette = palette.name,
            font = typography.font.id,
            width_px,
            height_px,
            draws = stats.draws,
            "render complete"
        );
        Ok(RenderState {
            name: name.to_owned(),
            seed,
            palette: palette.name,
            font: typography.font.id,
            width: canvas.width,
            height: canvas.height,
            device_scale: self.surface.device_scale(),
            width_px,
            height_px,
            stats,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
