//! Cadence demo: a splash card, a playfield of bouncing blocks and a pause
//! overlay taking turns on one window.
//!
//! `--headless` runs the same scenes without a window for a bounded number
//! of frames.

mod entities;
mod palette;
mod scenes;

use anyhow::Result;
use cadence_engine::logging::{init_logging, LoggingConfig};
use cadence_engine::window::WinitBackend;
use cadence_engine::{HeadlessBackend, Runtime};

use crate::palette::{Palette, PaletteAssets};

const HEADLESS_FRAMES: u64 = 1_000;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut headless = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--headless" => headless = true,
            other => log::warn!("ignoring unknown argument {other:?}"),
        }
    }

    let assets = PaletteAssets::new(Palette::default);

    if headless {
        let mut runtime = Runtime::new(HeadlessBackend::new(), assets);
        scenes::populate(&mut runtime, Some(HEADLESS_FRAMES));
        runtime.run()?;

        let presented = runtime.surface().map_or(0, |s| s.frames_presented());
        let misses = runtime
            .assets()
            .downcast_ref::<PaletteAssets>()
            .map_or(0, |p| p.misses());
        log::info!("headless run presented {presented} frames ({misses} palette misses since last unload)");
    } else {
        let mut runtime = Runtime::new(WinitBackend::new()?, assets);
        scenes::populate(&mut runtime, None);
        runtime.run()?;
    }

    Ok(())
}
