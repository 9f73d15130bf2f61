use crate::foundation::core::Rgba;

/// Opaque colour from a `0xRRGGBB` literal.
pub const fn rgb_hex(v: u32) -> Rgba {
    Rgba::new(
        ((v >> 16) & 0xff) as f32 / 255.0,
        ((v >> 8) & 0xff) as f32 / 255.0,
        (v & 0xff) as f32 / 255.0,
        1.0,
    )
}

/// HSL(A) to straight sRGB. `h` in degrees (wrapped), `s`/`l`/`a` in `0..=1`.
pub fn hsla(h: f64, s: f64, l: f64, a: f64) -> Rgba {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    let a = a.clamp(0.0, 1.0) as f32;

    if s == 0.0 {
        let l = l as f32;
        return Rgba::new(l, l, l, a);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgba::new(
        hue_to_rgb(p, q, h + 1.0 / 3.0) as f32,
        hue_to_rgb(p, q, h) as f32,
        hue_to_rgb(p, q, h - 1.0 / 3.0) as f32,
        a,
    )
}

/// Colour at `t` along stops spaced evenly by index over `[0, 1]`.
///
/// A single stop is a flat colour.
pub fn sample_stops(stops: &[Rgba], t: f32) -> Rgba {
    match stops {
        [] => Rgba::TRANSPARENT,
        [only] => *only,
        _ => {
            let segments = (stops.len() - 1) as f32;
            let pos = t.clamp(0.0, 1.0) * segments;
            let i = (pos.floor() as usize).min(stops.len() - 2);
            stops[i].lerp(stops[i + 1], pos - i as f32)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
