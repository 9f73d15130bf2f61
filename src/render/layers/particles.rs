use crate::assets::palette::Palette;
use crate::foundation::core::{Point, Rect, Rgba};
use crate::foundation::error::ForgeResult;
use crate::random::rng::SeededRng;
use crate::random::select::pick;
use crate::render::composite::CompositeMode;
use crate::render::surface::Surface;

pub(crate) const MIN_SPARKS: u32 = 64;
pub(crate) const SPARK_SPAN: u32 = 86;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Spark {
    pub(crate) center: Point,
    pub(crate) radius: f64,
    pub(crate) color: Rgba,
    pub(crate) alpha: f64,
}

/// Scatter 64-149 additive dots. Per spark the draws are x, y, radius, colour, alpha.
pub(crate) fn sprinkle_sparks(
    surface: &mut Surface,
    rng: &mut SeededRng,
    palette: &Palette,
) -> ForgeResult<Vec<Spark>> {
    let canvas = surface.require_canvas()?;
    let (w, h) = canvas.size();
    let scale = surface.device_scale();

    let count = rng.count(MIN_SPARKS, SPARK_SPAN);
    let mut sparks = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let x = rng.next_f64() * w;
        let y = rng.next_f64() * h;
        let radius = rng.range(0.5, 3.3);
        let color = *pick(palette.sparks, rng, "spark colors")?;
        let alpha = rng.range(0.4, 1.0);
        let spark = Spark {
            center: Point::new(x, y),
            radius,
            color,
            alpha,
        };
        paint_spark(surface, &spark, scale);
        sparks.push(spark);
    }

    tracing::debug!(sparks = count, "sparks sprinkled");
    Ok(sparks)
}

fn paint_spark(surface: &mut Surface, spark: &Spark, scale: f64) {
    let c = spark.color.with_alpha(spark.alpha as f32).premul();
    // one physical pixel of slack for the anti-aliased rim
    let pad = spark.radius + 1.0 / scale;
    let bounds = Rect::new(
        spark.center.x - pad,
        spark.center.y - pad,
        spark.center.x + pad,
        spark.center.y + pad,
    );
    surface.fill_region(bounds, CompositeMode::Additive, |p| {
        let edge = (spark.radius - p.distance(spark.center)) * scale + 0.5;
        let cov = edge.clamp(0.0, 1.0) as f32;
        [c[0] * cov, c[1] * cov, c[2] * cov, c[3] * cov]
    });
}

#[cfg(test)]
#[path = "../../../tests/unit/render/layers/particles.rs"]
mod tests;
