//! The four paint layers, in the order a render applies them.

pub(crate) mod background;
pub(crate) mod particles;
pub(crate) mod texture;
pub(crate) mod typography;

use crate::foundation::core::Point;

/// Position of `p` projected onto the segment `start -> end`, clamped to `[0, 1]`.
pub(crate) fn project_t(p: Point, start: Point, end: Point) -> f32 {
    let d = end - start;
    let len2 = d.hypot2();
    if len2 <= 0.0 {
        return 0.0;
    }
    ((p - start).dot(d) / len2).clamp(0.0, 1.0) as f32
}
