use crate::foundation::error::{ForgeError, ForgeResult};
use crate::foundation::math::{u8_to_unit, unit_to_u8};

/// Closed set of compositing modes the layers use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeMode {
    /// Premultiplied source-over.
    Normal,
    /// Per-channel saturating sum ("lighter"): overlaps brighten.
    Additive,
    /// Separable screen blend, then source-over.
    Screen,
    /// Separable soft-light blend, then source-over.
    SoftLight,
}

/// Premultiplied RGBA in `0..=1`.
pub(crate) type PremulF32 = [f32; 4];

pub(crate) fn over(d: PremulF32, s: PremulF32) -> PremulF32 {
    let inv = 1.0 - s[3];
    [
        s[0] + d[0] * inv,
        s[1] + d[1] * inv,
        s[2] + d[2] * inv,
        s[3] + d[3] * inv,
    ]
}

pub(crate) fn additive(d: PremulF32, s: PremulF32) -> PremulF32 {
    [
        (s[0] + d[0]).min(1.0),
        (s[1] + d[1]).min(1.0),
        (s[2] + d[2]).min(1.0),
        (s[3] + d[3]).min(1.0),
    ]
}

pub(crate) fn screen(d: PremulF32, s: PremulF32) -> PremulF32 {
    separable(d, s, |sc, dc| sc + dc - sc * dc)
}

pub(crate) fn soft_light(d: PremulF32, s: PremulF32) -> PremulF32 {
    separable(d, s, |sc, dc| {
        if sc <= 0.5 {
            dc - (1.0 - 2.0 * sc) * dc * (1.0 - dc)
        } else {
            let g = if dc <= 0.25 {
                ((16.0 * dc - 12.0) * dc + 4.0) * dc
            } else {
                dc.sqrt()
            };
            dc + (2.0 * sc - 1.0) * (g - dc)
        }
    })
}

#[inline(always)]
fn separable<F>(d: PremulF32, s: PremulF32, blend_fn: F) -> PremulF32
where
    F: Fn(f32, f32) -> f32,
{
    // out_a = sa + da * (1 - sa)
    // out_p = sp * (1 - da) + dp * (1 - sa) + B(sc, dc) * sa * da
    let sa = s[3];
    let da = d[3];
    if sa <= 0.0 {
        return d;
    }
    let mut out = [0.0f32; 4];
    for c in 0..3 {
        let sc = (s[c] / sa).clamp(0.0, 1.0);
        let dc = if da > 0.0 {
            (d[c] / da).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let b = blend_fn(sc, dc).clamp(0.0, 1.0);
        out[c] = (s[c] * (1.0 - da) + d[c] * (1.0 - sa) + b * sa * da).clamp(0.0, 1.0);
    }
    out[3] = (sa + da * (1.0 - sa)).clamp(0.0, 1.0);
    out
}

pub(crate) fn load_px(px: &[u8]) -> PremulF32 {
    [
        u8_to_unit(px[0]),
        u8_to_unit(px[1]),
        u8_to_unit(px[2]),
        u8_to_unit(px[3]),
    ]
}

pub(crate) fn store_px(px: &mut [u8], v: PremulF32) {
    px[0] = unit_to_u8(v[0]);
    px[1] = unit_to_u8(v[1]);
    px[2] = unit_to_u8(v[2]);
    px[3] = unit_to_u8(v[3]);
}

/// Composite a premultiplied RGBA8 layer onto `dst` of the same size.
pub(crate) fn composite_in_place(dst: &mut [u8], src: &[u8], mode: CompositeMode) -> ForgeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ForgeError::render(
            "composite_in_place expects equal-length rgba8 buffers",
        ));
    }
    // Dispatch once per layer, not per pixel.
    match mode {
        CompositeMode::Normal => composite_with(dst, src, over),
        CompositeMode::Additive => composite_with(dst, src, additive),
        CompositeMode::Screen => composite_with(dst, src, screen),
        CompositeMode::SoftLight => composite_with(dst, src, soft_light),
    }
    Ok(())
}

#[inline(always)]
fn composite_with<K>(dst: &mut [u8], src: &[u8], kernel: K)
where
    K: Fn(PremulF32, PremulF32) -> PremulF32,
{
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = kernel(load_px(d), load_px(s));
        store_px(d, out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
