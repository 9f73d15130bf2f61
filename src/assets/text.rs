use std::borrow::Cow;
use std::collections::HashMap;

use parley::fontique::{FontInfoOverride, FontStyle, FontWeight, FontWidth};
use usvg::fontdb;

use crate::assets::fonts::ResolvedFace;
use crate::foundation::error::{ForgeError, ForgeResult};

/// Glyph runs are painted with layer-level paints, so the brush carries nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct GlyphBrush;

/// How a registered face is addressed in parley: a family name unique to that face plus the
/// attributes of the face inside its file.
#[derive(Clone, Debug)]
struct RegisteredFace {
    family: String,
    weight: FontWeight,
    style: FontStyle,
    width: FontWidth,
}

/// Parley contexts plus the alias each registered face was given.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<GlyphBrush>,
    registered: HashMap<fontdb::ID, RegisteredFace>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    /// Shape `text` as a single unwrapped line in `face` at `size_px`.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        face: &ResolvedFace,
        size_px: f32,
    ) -> ForgeResult<parley::Layout<GlyphBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ForgeError::font("text size must be finite and > 0"));
        }

        let reg = self.register(face)?;
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Single(parley::style::FontFamily::Named(Cow::Owned(
                reg.family,
            ))),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(reg.weight));
        builder.push_default(parley::style::StyleProperty::FontStyle(reg.style));
        builder.push_default(parley::style::StyleProperty::FontWidth(reg.width));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(GlyphBrush));

        let mut layout: parley::Layout<GlyphBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Register `face` once, under a family alias no other face shares.
    fn register(&mut self, face: &ResolvedFace) -> ForgeResult<RegisteredFace> {
        if let Some(reg) = self.registered.get(&face.id) {
            return Ok(reg.clone());
        }

        let alias = format!("nameforge-face-{}", self.registered.len());
        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::new(face.bytes.clone()),
            Some(FontInfoOverride {
                family_name: Some(&alias),
                ..FontInfoOverride::default()
            }),
        );
        let infos: Vec<_> = families.into_iter().flat_map(|(_, infos)| infos).collect();
        let info = infos
            .iter()
            .find(|info| info.index() == face.index)
            .or_else(|| infos.first())
            .ok_or_else(|| ForgeError::font("no font families registered from font bytes"))?;

        let reg = RegisteredFace {
            family: alias,
            weight: info.weight(),
            style: info.style(),
            width: info.width(),
        };
        self.registered.insert(face.id, reg.clone());
        Ok(reg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
