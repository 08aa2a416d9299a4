use anyhow::{Context, Result};

use crate::backend::{Backend, Surface, SurfaceConfig, SurfaceStyle};
use crate::coords::PixelSize;

use super::{DisplayRequirements, View};

/// What the runtime remembers about the surface it created last.
///
/// Backends are not required to report whether a surface is fullscreen, so
/// the flag used at creation time is cached here.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SurfaceCache {
    was_fullscreen: bool,
}

impl SurfaceCache {
    #[inline]
    pub fn was_fullscreen(&self) -> bool {
        self.was_fullscreen
    }

    /// Whether the surface must be closed and opened again to satisfy `req`.
    ///
    /// `current` is the size of the live surface, `None` when there is none.
    pub fn needs_recreate(&self, current: Option<PixelSize>, req: &DisplayRequirements) -> bool {
        let Some(size) = current else {
            return true;
        };
        self.was_fullscreen != req.fullscreen
            || (self.was_fullscreen && req.resolution() != size)
    }

    fn record(&mut self, req: &DisplayRequirements) {
        self.was_fullscreen = req.fullscreen;
    }
}

/// Creation parameters for a surface that satisfies `req`.
pub fn surface_config(req: &DisplayRequirements) -> SurfaceConfig {
    SurfaceConfig {
        size: req.resolution(),
        title: req.window_title.clone(),
        style: SurfaceStyle {
            resize: req.resizable,
            fullscreen: req.fullscreen,
            close: true,
            titlebar: true,
        },
    }
}

/// Brings `surface` in line with `req`.
///
/// Recreates the surface when [`SurfaceCache::needs_recreate`] says so, then
/// forces size and title and applies the view. Creation failures propagate.
pub fn reconcile<B: Backend>(
    backend: &mut B,
    surface: &mut Option<B::Surface>,
    cache: &mut SurfaceCache,
    req: &DisplayRequirements,
) -> Result<()> {
    let current = surface.as_ref().map(|s| s.size());
    if cache.needs_recreate(current, req) {
        if let Some(mut old) = surface.take() {
            old.close();
        }
        let config = surface_config(req);
        log::info!(
            "opening surface {}x{} \"{}\" (fullscreen: {}, resizable: {})",
            config.size.width,
            config.size.height,
            config.title,
            config.style.fullscreen,
            config.style.resize,
        );
        let created = backend
            .create_surface(&config)
            .context("failed to create render surface")?;
        *surface = Some(created);
        cache.record(req);
    }

    let Some(surface) = surface.as_mut() else {
        return Ok(());
    };

    if surface.size() != req.resolution() {
        surface.set_size(req.resolution());
    }
    surface.set_title(&req.window_title);

    let view = View::for_requirements(req, surface.size());
    surface.set_view(view);

    Ok(())
}
