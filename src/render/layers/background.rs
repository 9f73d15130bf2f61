use crate::assets::color::{hsla, sample_stops};
use crate::assets::palette::Palette;
use crate::foundation::core::{Circle, Point, Rect};
use crate::foundation::error::ForgeResult;
use crate::random::rng::SeededRng;
use crate::render::composite::CompositeMode;
use crate::render::layers::project_t;
use crate::render::surface::Surface;
use kurbo::Shape;

pub(crate) const MIN_BLOBS: u32 = 4;
pub(crate) const BLOB_SPAN: u32 = 3;

/// Hue of a glow blob is this plus the drawn shift.
const BLOB_BASE_HUE: f64 = 200.0;
const BLOB_SATURATION: f64 = 0.9;
const BLOB_LIGHTNESS: f64 = 0.65;

/// One randomized radial glow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GlowBlob {
    pub(crate) hue_shift: f64,
    pub(crate) alpha: f64,
    pub(crate) radius: f64,
    pub(crate) center: Point,
}

impl GlowBlob {
    /// Draw order: hue shift, alpha, radius, x, y.
    pub(crate) fn draw(rng: &mut SeededRng, width: f64, height: f64) -> Self {
        let hue_shift = rng.range(20.0, 100.0);
        let alpha = rng.range(0.08, 0.20);
        let radius = rng.range(0.4, 1.2) * width.min(height) / 2.0;
        let x = width * rng.range(0.1, 0.9);
        let y = height * rng.range(0.1, 0.9);
        Self {
            hue_shift,
            alpha,
            radius,
            center: Point::new(x, y),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BackgroundReport {
    pub(crate) blobs: Vec<GlowBlob>,
}

/// Diagonal base gradient, then 4-6 additive radial glows.
pub(crate) fn paint_background(
    surface: &mut Surface,
    rng: &mut SeededRng,
    palette: &Palette,
) -> ForgeResult<BackgroundReport> {
    let canvas = surface.require_canvas()?;
    let (w, h) = canvas.size();
    let full = Rect::new(0.0, 0.0, w, h);

    let start = Point::ORIGIN;
    let end = Point::new(w, h);
    surface.fill_region(full, CompositeMode::Normal, |p| {
        sample_stops(palette.background, project_t(p, start, end)).premul()
    });

    let count = rng.count(MIN_BLOBS, BLOB_SPAN);
    let mut blobs = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let blob = GlowBlob::draw(rng, w, h);
        paint_glow(surface, &blob);
        blobs.push(blob);
    }

    tracing::debug!(blobs = count, palette = palette.name, "background painted");
    Ok(BackgroundReport { blobs })
}

fn paint_glow(surface: &mut Surface, blob: &GlowBlob) {
    if blob.radius <= 0.0 {
        return;
    }
    let color = hsla(
        BLOB_BASE_HUE + blob.hue_shift,
        BLOB_SATURATION,
        BLOB_LIGHTNESS,
        blob.alpha,
    )
    .premul();
    let circle = Circle::new(blob.center, blob.radius);
    surface.fill_region(circle.bounding_box(), CompositeMode::Additive, |p| {
        let t = (p.distance(blob.center) / blob.radius) as f32;
        if t >= 1.0 {
            return [0.0; 4];
        }
        let k = 1.0 - t;
        [color[0] * k, color[1] * k, color[2] * k, color[3] * k]
    });
}

#[cfg(test)]
#[path = "../../../tests/unit/render/layers/background.rs"]
mod tests;
