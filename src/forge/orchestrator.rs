use std::time::{Duration, Instant};

use crate::assets::fonts::FontBook;
use crate::config::ForgeConfig;
use crate::forge::debounce::Debouncer;
use crate::forge::export::{ExportedImage, encode_png, export_base_name};
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::random::seed::{EntropySeeds, Seed, SeedSource};
use crate::render::pipeline::{RenderPipeline, RenderState};
use crate::render::surface::{FrameRGBA, validate_device_scale};

/// Substituted for empty or whitespace-only names.
pub const FALLBACK_NAME: &str = "Anonymous";
/// Name held as the last-used pair before the first forge.
pub const DEFAULT_NAME: &str = "Stardust";

/// The most recent `(name, seed)` handed to forge or shuffle.
#[derive(Clone, Debug, PartialEq)]
pub struct LastUsed {
    pub name: String,
    pub seed: Seed,
}

/// Owns the surface and the last-used pair and sequences every render.
///
/// Forge and shuffle replace the last-used pair; resize re-renders it unchanged at a new
/// device scale, after a trailing debounce.
pub struct Forge {
    pipeline: RenderPipeline,
    seeds: Box<dyn SeedSource>,
    last: LastUsed,
    rendered: Option<RenderState>,
    resize: Debouncer<f64>,
}

impl std::fmt::Debug for Forge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forge")
            .field("last", &self.last)
            .field("rendered", &self.rendered)
            .field("resize_pending", &self.resize.is_pending())
            .finish_non_exhaustive()
    }
}

impl Forge {
    /// Build a forge with non-reproducible seeds.
    pub fn new(config: ForgeConfig) -> ForgeResult<Self> {
        Self::with_seed_source(config, EntropySeeds::new())
    }

    /// Build a forge that draws startup, forge and shuffle seeds from `seeds`.
    pub fn with_seed_source(
        config: ForgeConfig,
        seeds: impl SeedSource + 'static,
    ) -> ForgeResult<Self> {
        let fonts = FontBook::load(config.load_system_fonts, config.fonts_dir.as_deref());
        Self::with_font_book(config, fonts, seeds)
    }

    /// Build a forge around an already loaded font book.
    pub fn with_font_book(
        config: ForgeConfig,
        fonts: FontBook,
        seeds: impl SeedSource + 'static,
    ) -> ForgeResult<Self> {
        config.validate()?;
        let mut seeds: Box<dyn SeedSource> = Box::new(seeds);
        let last = LastUsed {
            name: DEFAULT_NAME.to_owned(),
            seed: seeds.next_seed(),
        };
        tracing::debug!(faces = fonts.face_count(), seed = %last.seed, "forge ready");
        Ok(Self {
            pipeline: RenderPipeline::new(config.device_scale, fonts)?,
            seeds,
            last,
            rendered: None,
            resize: Debouncer::new(config.resize_debounce()),
        })
    }

    /// Render `name` under `seed` and remember the pair.
    #[tracing::instrument(skip(self, seed), fields(seed = %seed))]
    pub fn forge(&mut self, name: &str, seed: Seed) -> ForgeResult<RenderState> {
        let name = if name.trim().is_empty() {
            FALLBACK_NAME
        } else {
            name
        };
        self.render_pair(name.to_owned(), seed)
    }

    /// Render `name` under a freshly drawn seed.
    pub fn forge_new(&mut self, name: &str) -> ForgeResult<RenderState> {
        let seed = self.seeds.next_seed();
        self.forge(name, seed)
    }

    /// Same name, new seed.
    #[tracing::instrument(skip(self))]
    pub fn shuffle(&mut self) -> ForgeResult<RenderState> {
        let name = self.last.name.clone();
        let seed = self.seeds.next_seed();
        self.forge(&name, seed)
    }

    /// Queue a re-render at `device_scale`. A later request within the debounce window
    /// replaces this one and restarts the wait.
    pub fn request_resize(&mut self, device_scale: f64, now: Instant) -> ForgeResult<()> {
        let scale = validate_device_scale(device_scale)?;
        if self.resize.schedule(scale, now) {
            tracing::trace!(scale, "pending resize replaced");
        }
        Ok(())
    }

    /// Apply the pending resize if its quiet interval has passed: re-render the last-used
    /// pair at the requested scale.
    pub fn poll_resize(&mut self, now: Instant) -> ForgeResult<Option<RenderState>> {
        let Some(scale) = self.resize.poll(now) else {
            return Ok(None);
        };
        let previous = self.pipeline.surface().device_scale();
        self.pipeline.set_device_scale(scale)?;
        tracing::debug!(scale, name = %self.last.name, seed = %self.last.seed, "resize");
        let outcome = self.render_pair(self.last.name.clone(), self.last.seed);
        if outcome.is_err() {
            self.pipeline.set_device_scale(previous)?;
        }
        outcome.map(Some)
    }

    /// Quiet interval a resize request waits for.
    pub fn resize_debounce(&self) -> Duration {
        self.resize.delay()
    }

    /// Time left before a pending resize fires.
    pub fn time_until_resize(&self, now: Instant) -> Option<Duration> {
        self.resize.time_until_fire(now)
    }

    pub fn cancel_resize(&mut self) -> bool {
        self.resize.cancel().is_some()
    }

    /// Encode the current surface as PNG, named after the last-used name.
    #[tracing::instrument(skip(self))]
    pub fn export(&self) -> ForgeResult<ExportedImage> {
        let state = self.rendered.clone().ok_or(ForgeError::NothingRendered)?;
        let png = encode_png(&self.pipeline.frame())?;
        let base = export_base_name(&state.name);
        tracing::debug!(base = %base, bytes = png.len(), "exported");
        Ok(ExportedImage::new(base, png, state))
    }

    /// Current pixels.
    pub fn frame(&self) -> ForgeResult<FrameRGBA> {
        if self.rendered.is_none() {
            return Err(ForgeError::NothingRendered);
        }
        Ok(self.pipeline.frame())
    }

    pub fn last_used(&self) -> &LastUsed {
        &self.last
    }

    /// State of the most recent completed render.
    pub fn last_render(&self) -> Option<&RenderState> {
        self.rendered.as_ref()
    }

    pub fn device_scale(&self) -> f64 {
        self.pipeline.surface().device_scale()
    }

    fn render_pair(&mut self, name: String, seed: Seed) -> ForgeResult<RenderState> {
        let outcome = self.pipeline.render(&name, seed);
        self.commit(name, seed, outcome)
    }

    /// Record a render outcome. The last-used pair only changes on success; a failed render
    /// may have cleared the surface, so nothing counts as rendered afterwards.
    fn commit(
        &mut self,
        name: String,
        seed: Seed,
        outcome: ForgeResult<RenderState>,
    ) -> ForgeResult<RenderState> {
        let state = match outcome {
            Ok(state) => state,
            Err(err) => {
                self.rendered = None;
                tracing::warn!(name = %name, seed = %seed, error = %err, "render failed");
                return Err(err);
            }
        };
        tracing::info!(
            name = %state.name,
            seed = %state.seed,
            palette = state.palette,
            font = state.font,
            width_px = state.width_px,
            height_px = state.height_px,
            "rendered"
        );
        self.last = LastUsed { name, seed };
        self.rendered = Some(state.clone());
        Ok(state)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/forge/orchestrator.rs"]
mod tests;
