use crate::foundation::error::{ForgeError, ForgeResult};

/// Gaussian-like blur of a premultiplied RGBA8 buffer, in place.
///
/// Three successive box blurs whose widths approximate `sigma`; each pass is a running sum, so
/// cost does not grow with the radius. Edges clamp.
pub(crate) fn blur_rgba8_premul(
    data: &mut [u8],
    width: u32,
    height: u32,
    sigma: f32,
) -> ForgeResult<()> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ForgeError::render("blur buffer size overflow"))?;
    if data.len() != expected_len {
        return Err(ForgeError::render(
            "blur_rgba8_premul expects data matching width*height*4",
        ));
    }
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(ForgeError::validation("blur sigma must be finite and >= 0"));
    }
    if width == 0 || height == 0 {
        return Ok(());
    }

    let mut tmp = vec![0u8; expected_len];
    for radius in box_radii(sigma) {
        if radius == 0 {
            continue;
        }
        horizontal_pass(data, &mut tmp, width, height, radius);
        vertical_pass(&tmp, data, width, height, radius);
    }
    Ok(())
}

/// Radii of three box filters whose combined variance matches `sigma`.
pub(crate) fn box_radii(sigma: f32) -> [u32; 3] {
    const PASSES: f32 = 3.0;
    let s2 = 12.0 * sigma * sigma;
    let ideal = (s2 / PASSES + 1.0).sqrt();
    let mut wl = ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;
    let wlf = wl as f32;
    let m_ideal = (s2 - PASSES * wlf * wlf - 4.0 * PASSES * wlf - 3.0 * PASSES) / (-4.0 * wlf - 4.0);
    let m = m_ideal.round().clamp(0.0, PASSES) as usize;

    let mut out = [0u32; 3];
    for (i, r) in out.iter_mut().enumerate() {
        let w = if i < m { wl } else { wu };
        *r = ((w - 1) / 2) as u32;
    }
    out
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32) {
    let w = width as i64;
    let r = i64::from(radius);
    let win = (2 * r + 1) as u32;
    let idx = |y: i64, x: i64| ((y * w + x.clamp(0, w - 1)) as usize) * 4;
    for y in 0..i64::from(height) {
        let mut acc = [0u32; 4];
        for x in -r..=r {
            let i = idx(y, x);
            for c in 0..4 {
                acc[c] += u32::from(src[i + c]);
            }
        }
        for x in 0..w {
            let o = idx(y, x);
            for c in 0..4 {
                dst[o + c] = ((acc[c] + win / 2) / win) as u8;
            }
            let add = idx(y, x + r + 1);
            let sub = idx(y, x - r);
            for c in 0..4 {
                acc[c] = acc[c] + u32::from(src[add + c]) - u32::from(src[sub + c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32) {
    let w = i64::from(width);
    let h = i64::from(height);
    let r = i64::from(radius);
    let win = (2 * r + 1) as u32;
    let idx = |y: i64, x: i64| ((y.clamp(0, h - 1) * w + x) as usize) * 4;
    for x in 0..w {
        let mut acc = [0u32; 4];
        for y in -r..=r {
            let i = idx(y, x);
            for c in 0..4 {
                acc[c] += u32::from(src[i + c]);
            }
        }
        for y in 0..h {
            let o = idx(y, x);
            for c in 0..4 {
                dst[o + c] = ((acc[c] + win / 2) / win) as u8;
            }
            let add = idx(y + r + 1, x);
            let sub = idx(y - r, x);
            for c in 0..4 {
                acc[c] = acc[c] + u32::from(src[add + c]) - u32::from(src[sub + c]);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
