//! CPU raster backend: the premultiplied surface, compositing and blur kernels, glyph
//! rasterization, and the four paint layers.

pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod cpu;
pub(crate) mod layers;
/// Render sequencing and the per-render state record.
pub mod pipeline;
/// The device-scaled drawing surface and frame type.
pub mod surface;
