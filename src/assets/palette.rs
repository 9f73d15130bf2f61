use crate::assets::color::rgb_hex;
use crate::foundation::core::Rgba;

/// Three ordered colour lists drawn together as one unit.
#[derive(Debug, PartialEq)]
pub struct Palette {
    pub name: &'static str,
    /// Diagonal base gradient stops.
    pub background: &'static [Rgba],
    /// Glyph fill gradient stops.
    pub text: &'static [Rgba],
    /// Spark colours, one picked per spark.
    pub sparks: &'static [Rgba],
}

pub static PALETTES: &[Palette] = &[
    Palette {
        name: "neon-dusk",
        background: &[rgb_hex(0x0f0c29), rgb_hex(0x302b63), rgb_hex(0x24243e)],
        text: &[rgb_hex(0xff6ec7), rgb_hex(0xffd86e), rgb_hex(0x6ee7ff)],
        sparks: &[rgb_hex(0xff6ec7), rgb_hex(0x6ee7ff), rgb_hex(0xffffff)],
    },
    Palette {
        name: "solar-flare",
        background: &[rgb_hex(0x1a0500), rgb_hex(0x5c1a00), rgb_hex(0x2b0a14)],
        text: &[rgb_hex(0xfff3b0), rgb_hex(0xffb347), rgb_hex(0xff5e62)],
        sparks: &[rgb_hex(0xffd166), rgb_hex(0xff7b54), rgb_hex(0xfff1e6)],
    },
    Palette {
        name: "aurora",
        background: &[rgb_hex(0x001a1a), rgb_hex(0x003d4d), rgb_hex(0x0b1f3a)],
        text: &[rgb_hex(0x7cffcb), rgb_hex(0x4ad7ff), rgb_hex(0xc39bff)],
        sparks: &[rgb_hex(0x7cffcb), rgb_hex(0xc39bff), rgb_hex(0xe0fff4)],
    },
    Palette {
        name: "deep-sea",
        background: &[rgb_hex(0x000814), rgb_hex(0x001d3d), rgb_hex(0x003566)],
        text: &[rgb_hex(0xffd60a), rgb_hex(0xffc300), rgb_hex(0xf8f9fa)],
        sparks: &[rgb_hex(0xffd60a), rgb_hex(0x90e0ef), rgb_hex(0xcaf0f8)],
    },
    Palette {
        name: "synthwave",
        background: &[rgb_hex(0x12002b), rgb_hex(0x3d0066), rgb_hex(0x7a0f5c), rgb_hex(0x1b0033)],
        text: &[rgb_hex(0xf9f871), rgb_hex(0xff4ecd), rgb_hex(0x00f0ff)],
        sparks: &[rgb_hex(0xff4ecd), rgb_hex(0x00f0ff), rgb_hex(0xf9f871), rgb_hex(0xffffff)],
    },
    Palette {
        name: "ember-mint",
        background: &[rgb_hex(0x0b0b0b), rgb_hex(0x1f2d2b), rgb_hex(0x3a1c14)],
        text: &[rgb_hex(0xb8ffe0), rgb_hex(0xfcefd4), rgb_hex(0xff8a5b)],
        sparks: &[rgb_hex(0xb8ffe0), rgb_hex(0xff8a5b)],
    },
];

#[cfg(test)]
#[path = "../../tests/unit/assets/palette.rs"]
mod tests;
