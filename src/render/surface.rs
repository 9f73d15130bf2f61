use crate::foundation::core::{Affine, Canvas, Point, Rect};
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::render::composite::{
    CompositeMode, PremulF32, additive, composite_in_place, load_px, over, screen, soft_light,
    store_px,
};

/// Upper bound on device pixel scale; keeps backing buffers inside pixmap limits.
pub const MAX_DEVICE_SCALE: f64 = 8.0;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in physical pixels.
    pub width: u32,
    /// Frame height in physical pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixels, as image encoders expect.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }
}

/// The raster drawing surface.
///
/// Layers issue geometry in logical units; the backing buffer stores premultiplied RGBA8 at
/// `logical * device_scale` resolution.
#[derive(Debug, Clone)]
pub struct Surface {
    canvas: Option<Canvas>,
    device_scale: f64,
    width_px: u32,
    height_px: u32,
    transform: Affine,
    data: Vec<u8>,
}

pub fn validate_device_scale(scale: f64) -> ForgeResult<f64> {
    if !scale.is_finite() || scale <= 0.0 || scale > MAX_DEVICE_SCALE {
        return Err(ForgeError::validation(format!(
            "device scale must be finite and in (0, {MAX_DEVICE_SCALE}], got {scale}"
        )));
    }
    Ok(scale)
}

impl Surface {
    pub fn new(device_scale: f64) -> ForgeResult<Self> {
        Ok(Self {
            canvas: None,
            device_scale: validate_device_scale(device_scale)?,
            width_px: 0,
            height_px: 0,
            transform: Affine::IDENTITY,
            data: Vec::new(),
        })
    }

    /// Size the surface for `canvas`, reallocate and clear the backing buffer, and reset the
    /// transform to a uniform `device_scale` scale.
    pub fn fit(&mut self, canvas: Canvas) -> ForgeResult<()> {
        let width_px = physical_len(canvas.width, self.device_scale)?;
        let height_px = physical_len(canvas.height, self.device_scale)?;
        let len = (width_px as usize)
            .checked_mul(height_px as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ForgeError::render("surface buffer size overflow"))?;

        self.canvas = Some(canvas);
        self.width_px = width_px;
        self.height_px = height_px;
        self.transform = Affine::scale(self.device_scale);
        self.data.clear();
        self.data.resize(len, 0);
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            width_px,
            height_px,
            scale = self.device_scale,
            "surface fitted"
        );
        Ok(())
    }

    /// Change the device scale. Takes effect at the next [`Surface::fit`].
    pub fn set_device_scale(&mut self, scale: f64) -> ForgeResult<()> {
        self.device_scale = validate_device_scale(scale)?;
        Ok(())
    }

    pub fn device_scale(&self) -> f64 {
        self.device_scale
    }

    /// Logical size of the last fit, if any.
    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    pub(crate) fn require_canvas(&self) -> ForgeResult<Canvas> {
        self.canvas
            .ok_or_else(|| ForgeError::render("surface must be fitted before painting"))
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    /// Logical-to-physical transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn to_frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width_px,
            height: self.height_px,
            data: self.data.clone(),
            premultiplied: true,
        }
    }

    /// Shade every physical pixel whose centre lies inside `bounds` (logical units).
    ///
    /// `shader` gets the pixel centre in logical units and returns a premultiplied colour.
    pub(crate) fn fill_region<F>(&mut self, bounds: Rect, mode: CompositeMode, shader: F)
    where
        F: FnMut(Point) -> PremulF32,
    {
        match mode {
            CompositeMode::Normal => self.fill_region_with(bounds, shader, over),
            CompositeMode::Additive => self.fill_region_with(bounds, shader, additive),
            CompositeMode::Screen => self.fill_region_with(bounds, shader, screen),
            CompositeMode::SoftLight => self.fill_region_with(bounds, shader, soft_light),
        }
    }

    #[inline(always)]
    fn fill_region_with<F, K>(&mut self, bounds: Rect, mut shader: F, kernel: K)
    where
        F: FnMut(Point) -> PremulF32,
        K: Fn(PremulF32, PremulF32) -> PremulF32,
    {
        let s = self.device_scale;
        let (x0, x1) = pixel_span(bounds.x0, bounds.x1, s, self.width_px);
        let (y0, y1) = pixel_span(bounds.y0, bounds.y1, s, self.height_px);
        let stride = self.width_px as usize;
        for py in y0..y1 {
            let ly = (f64::from(py) + 0.5) / s;
            for px in x0..x1 {
                let src = shader(Point::new((f64::from(px) + 0.5) / s, ly));
                if src[3] <= 0.0 {
                    continue;
                }
                let i = (py as usize * stride + px as usize) * 4;
                let d = &mut self.data[i..i + 4];
                let out = kernel(load_px(d), src);
                store_px(d, out);
            }
        }
    }

    /// Composite a full-size premultiplied layer.
    pub(crate) fn composite_layer(&mut self, layer: &[u8], mode: CompositeMode) -> ForgeResult<()> {
        composite_in_place(&mut self.data, layer, mode)
    }

    /// Composite `shader` colours masked by the alpha coverage of a full-size layer.
    pub(crate) fn composite_coverage<F>(
        &mut self,
        coverage: &[u8],
        mode: CompositeMode,
        mut shader: F,
    ) -> ForgeResult<()>
    where
        F: FnMut(Point) -> PremulF32,
    {
        if coverage.len() != self.data.len() {
            return Err(ForgeError::render("coverage layer does not match surface size"));
        }
        let s = self.device_scale;
        let w = self.width_px as usize;
        let mut tinted = vec![0u8; coverage.len()];
        for (i, (dst, cov)) in tinted
            .chunks_exact_mut(4)
            .zip(coverage.chunks_exact(4))
            .enumerate()
        {
            if cov[3] == 0 {
                continue;
            }
            let a = f32::from(cov[3]) / 255.0;
            let p = Point::new(((i % w) as f64 + 0.5) / s, ((i / w) as f64 + 0.5) / s);
            let c = shader(p);
            store_px(dst, [c[0] * a, c[1] * a, c[2] * a, c[3] * a]);
        }
        self.composite_layer(&tinted, mode)
    }
}

fn physical_len(logical: u32, scale: f64) -> ForgeResult<u32> {
    let v = (f64::from(logical) * scale).round();
    if v < 1.0 || v > f64::from(u16::MAX) {
        return Err(ForgeError::render(format!(
            "physical surface length {v} is outside 1..={}",
            u16::MAX
        )));
    }
    Ok(v as u32)
}

/// Half-open pixel index range whose centres fall in `[lo, hi)` logical units.
fn pixel_span(lo: f64, hi: f64, scale: f64, len: u32) -> (u32, u32) {
    let clamp = |v: f64| v.clamp(0.0, f64::from(len)) as u32;
    let start = clamp((lo * scale - 0.5).ceil());
    let end = clamp((hi * scale - 0.5).ceil());
    (start, end.max(start))
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in 0..3 {
            px[c] = ((u16::from(px[c]) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
