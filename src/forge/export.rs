use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::foundation::error::{ForgeError, ForgeResult};
use crate::render::pipeline::RenderState;
use crate::render::surface::FrameRGBA;

/// Base name used when a name sanitizes to nothing.
pub const DEFAULT_EXPORT_BASE: &str = "name-forge";

/// Lower-case `name`, collapse every run of characters outside `[a-z0-9]` into one hyphen and
/// trim hyphens from both ends. Falls back to [`DEFAULT_EXPORT_BASE`] when nothing is left.
pub fn export_base_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut gap = false;
    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if gap && !out.is_empty() {
                out.push('-');
            }
            gap = false;
            out.push(c);
        } else {
            gap = true;
        }
    }
    if out.is_empty() {
        DEFAULT_EXPORT_BASE.to_owned()
    } else {
        out
    }
}

/// Straight-alpha PNG encoding of `frame`.
pub fn encode_png(frame: &FrameRGBA) -> ForgeResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba())
        .ok_or_else(|| ForgeError::export("frame buffer does not match its dimensions"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| ForgeError::export(format!("png encode failed: {e}")))?;
    Ok(buf)
}

/// An encoded render, ready to be saved.
#[derive(Clone, Debug)]
pub struct ExportedImage {
    base: String,
    file_name: String,
    png: Vec<u8>,
    state: RenderState,
}

impl ExportedImage {
    pub(crate) fn new(base: String, png: Vec<u8>, state: RenderState) -> Self {
        Self {
            file_name: format!("{base}.png"),
            base,
            png,
            state,
        }
    }

    /// Re-derive the file name as `<base><suffix>.png`.
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.file_name = format!("{}{suffix}.png", self.base);
        self
    }

    /// Sanitized base name, without suffix or extension.
    pub fn base_name(&self) -> &str {
        &self.base
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn manifest(&self) -> RenderManifest<'_> {
        RenderManifest {
            file: &self.file_name,
            render: &self.state,
        }
    }

    /// Write the PNG into `dir` (created if missing) and return its path.
    pub fn write_to_dir(&self, dir: &Path) -> ForgeResult<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|e| {
            ForgeError::export(format!("create output dir '{}': {e}", dir.display()))
        })?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.png)
            .map_err(|e| ForgeError::export(format!("write '{}': {e}", path.display())))?;
        tracing::info!(path = %path.display(), bytes = self.png.len(), "image exported");
        Ok(path)
    }

    /// Write the JSON manifest next to the image as `<file stem>.json`.
    pub fn write_manifest_to_dir(&self, dir: &Path) -> ForgeResult<PathBuf> {
        let json = serde_json::to_string_pretty(&self.manifest())
            .map_err(|e| ForgeError::export(format!("manifest encode failed: {e}")))?;
        let stem = self.file_name.trim_end_matches(".png");
        let path = dir.join(format!("{stem}.json"));
        std::fs::write(&path, json)
            .map_err(|e| ForgeError::export(format!("write '{}': {e}", path.display())))?;
        Ok(path)
    }
}

/// Reproduction record for one exported image.
#[derive(Clone, Debug, serde::Serialize)]
pub struct RenderManifest<'a> {
    pub file: &'a str,
    pub render: &'a RenderState,
}

#[cfg(test)]
#[path = "../../tests/unit/forge/export.rs"]
mod tests;
