use std::collections::HashMap;

use cadence_engine::coords::ColorRgba;
use cadence_engine::{AssetProvider, ResettableAssets};

/// The demo's only asset: named colors resolved on first use.
#[derive(Debug, Default)]
pub struct Palette {
    colors: HashMap<&'static str, ColorRgba>,
    misses: u64,
}

pub type PaletteAssets = ResettableAssets<Palette>;

impl Palette {
    /// Resolves `name`, caching the result.
    pub fn color(&mut self, name: &'static str) -> ColorRgba {
        if let Some(c) = self.colors.get(name) {
            return *c;
        }
        self.misses += 1;
        let c = lookup(name);
        self.colors.insert(name, c);
        c
    }

    /// Number of cache misses since the last unload.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Resolves `name` through the provider if it is a palette, else white.
pub fn resolve(assets: &mut dyn AssetProvider, name: &'static str) -> ColorRgba {
    assets
        .downcast_mut::<PaletteAssets>()
        .map(|p| p.color(name))
        .unwrap_or_else(ColorRgba::white)
}

fn lookup(name: &str) -> ColorRgba {
    match name {
        "ball.warm" => ColorRgba::from_rgba8(0xf2, 0x8c, 0x28, 0xff),
        "ball.cool" => ColorRgba::from_rgba8(0x3a, 0x86, 0xff, 0xff),
        "spark" => ColorRgba::from_rgba8(0xff, 0xe0, 0x66, 0xff),
        "cursor" => ColorRgba::from_rgba8(0xee, 0xee, 0xee, 0xc0),
        "cursor.hot" => ColorRgba::from_rgba8(0xff, 0x40, 0x40, 0xff),
        "panel" => ColorRgba::from_rgba8(0x22, 0x26, 0x31, 0xff),
        "bar" => ColorRgba::from_rgba8(0x5c, 0xd6, 0x8a, 0xff),
        "splash" => ColorRgba::from_rgba8(0x8a, 0x5c, 0xf6, 0xff),
        _ => {
            log::warn!("unknown palette entry {name:?}");
            ColorRgba::white()
        }
    }
}
