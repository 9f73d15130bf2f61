//! Nameforge turns a name into a seeded, reproducible neon poster.
//!
//! One seed drives every random choice of a render: palette, glow blobs, font, tilt, glow
//! blur and sparks. Layers always paint in the same order (background, typography,
//! particles, scanlines) from a single draw stream, so a `(name, seed)` pair reproduces the
//! same pixels on the same backend at any device scale.
//!
//! - Build a [`Forge`] from a [`ForgeConfig`]
//! - [`Forge::forge`] / [`Forge::shuffle`] to render, [`Forge::request_resize`] +
//!   [`Forge::poll_resize`] to re-rasterize
//! - [`Forge::export`] for a PNG named after the subject
#![forbid(unsafe_code)]

mod assets;
mod foundation;
mod random;

/// Runtime configuration.
pub mod config;
/// Orchestration, debounced resize and export.
pub mod forge;
/// CPU raster backend.
pub mod render;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;

pub use crate::assets::fonts::{FONT_CHOICES, FontBook, FontChoice, GenericFamily};
pub use crate::assets::palette::{PALETTES, Palette};
pub use crate::config::ForgeConfig;
pub use crate::forge::export::{
    DEFAULT_EXPORT_BASE, ExportedImage, RenderManifest, encode_png, export_base_name,
};
pub use crate::forge::orchestrator::{DEFAULT_NAME, FALLBACK_NAME, Forge, LastUsed};
pub use crate::foundation::core::{Canvas, Rgba};
pub use crate::foundation::error::{ForgeError, ForgeResult};
pub use crate::random::rng::{SeededRng, normalize_seed};
pub use crate::random::seed::{EntropySeeds, Seed, SeedSource, SequenceSeeds};
pub use crate::render::pipeline::{RenderState, RenderStats, layout_for_name};
pub use crate::render::surface::{FrameRGBA, MAX_DEVICE_SCALE};
