use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::foundation::error::{ForgeError, ForgeResult};
use crate::render::surface::validate_device_scale;

/// Runtime options for a [`crate::Forge`].
///
/// Artwork constants (palettes, fonts, size clamps) are fixed; only the environment is
/// configurable here. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForgeConfig {
    /// Physical pixels per logical unit.
    pub device_scale: f64,
    /// Extra directory scanned for `.ttf`/`.otf`/`.ttc` files.
    pub fonts_dir: Option<PathBuf>,
    pub load_system_fonts: bool,
    /// Quiet interval before a resize request re-renders.
    pub resize_debounce_ms: u64,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            device_scale: 1.0,
            fonts_dir: None,
            load_system_fonts: true,
            resize_debounce_ms: 180,
        }
    }
}

impl ForgeConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> ForgeResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ForgeError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ForgeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ForgeError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> ForgeResult<()> {
        validate_device_scale(self.device_scale)?;
        if let Some(dir) = &self.fonts_dir
            && !dir.is_dir()
        {
            return Err(ForgeError::validation(format!(
                "fonts_dir '{}' is not a directory",
                dir.display()
            )));
        }
        Ok(())
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
