use crate::foundation::core::{Rect, Rgba};
use crate::foundation::error::ForgeResult;
use crate::render::composite::CompositeMode;
use crate::render::surface::Surface;

pub(crate) const SCANLINE_PERIOD: u32 = 3;
const SCANLINE_COLOR: Rgba = Rgba::new(1.0, 1.0, 1.0, 0.04);

/// One-unit-tall soft-light line every third row. Draws no randomness.
pub(crate) fn draw_scanlines(surface: &mut Surface) -> ForgeResult<u32> {
    let canvas = surface.require_canvas()?;
    let (w, _) = canvas.size();
    let color = SCANLINE_COLOR.premul();

    let mut lines = 0;
    for y in (0..canvas.height).step_by(SCANLINE_PERIOD as usize) {
        let y = f64::from(y);
        surface.fill_region(Rect::new(0.0, y, w, y + 1.0), CompositeMode::SoftLight, |_| color);
        lines += 1;
    }
    tracing::debug!(lines, "scanlines drawn");
    Ok(lines)
}

#[cfg(test)]
#[path = "../../../tests/unit/render/layers/texture.rs"]
mod tests;
