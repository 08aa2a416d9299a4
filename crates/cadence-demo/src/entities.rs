use cadence_engine::backend::Surface;
use cadence_engine::coords::{Rect, Vec2};
use cadence_engine::{AssetProvider, DrawOrder, Entity, SceneWorld};

use crate::palette;

/// Anything with a hit box.
pub trait Solid {
    fn bounds(&self) -> Rect;
}

/// Square bouncing inside an arena, moved on the fixed clock.
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: &'static str,
    pub layer: DrawOrder,
    pub arena: Rect,
}

impl Entity for Ball {
    fn update_frame(&mut self, _dt: f32, _scene: &mut SceneWorld) {}

    fn update_fixed(&mut self, dt: f32, _scene: &mut SceneWorld) {
        self.pos = self.pos + self.vel * dt;

        let half = self.size / 2.0;
        let min = self.arena.origin + Vec2::new(half, half);
        let max = self.arena.max() - Vec2::new(half, half);

        if self.pos.x < min.x || self.pos.x > max.x {
            self.vel.x = -self.vel.x;
            self.pos.x = self.pos.x.clamp(min.x, max.x);
        }
        if self.pos.y < min.y || self.pos.y > max.y {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.clamp(min.y, max.y);
        }
    }

    fn draw(&self, surface: &mut dyn Surface, assets: &mut dyn AssetProvider) {
        surface.fill_rect(self.bounds(), palette::resolve(assets, self.color));
    }

    fn draw_order(&self) -> DrawOrder {
        self.layer
    }
}

impl Solid for Ball {
    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.pos, Vec2::new(self.size, self.size))
    }
}

/// Short-lived particle; removes itself once its lifetime is over.
pub struct Spark {
    pub pos: Vec2,
    pub drift: Vec2,
    pub age: f32,
    pub lifetime: f32,
}

impl Spark {
    pub fn new(pos: Vec2, drift: Vec2, lifetime: f32) -> Self {
        Self {
            pos,
            drift,
            age: 0.0,
            lifetime,
        }
    }
}

impl Entity for Spark {
    fn update_frame(&mut self, dt: f32, _scene: &mut SceneWorld) {
        self.age += dt;
        self.pos = self.pos + self.drift * dt;
    }

    fn update_fixed(&mut self, _dt: f32, _scene: &mut SceneWorld) {}

    fn draw(&self, surface: &mut dyn Surface, assets: &mut dyn AssetProvider) {
        let left = (1.0 - self.age / self.lifetime).clamp(0.0, 1.0);
        let size = 8.0 * left;
        let mut color = palette::resolve(assets, "spark");
        color.a *= left;
        surface.fill_rect(Rect::from_center_size(self.pos, Vec2::new(size, size)), color);
    }

    fn to_destroy(&self) -> bool {
        self.age >= self.lifetime
    }

    fn draw_order(&self) -> DrawOrder {
        DrawOrder(10)
    }
}

/// Follows the pointer and lights up over any solid entity.
#[derive(Default)]
pub struct Cursor {
    pub pos: Vec2,
    pub hovering: bool,
}

impl Entity for Cursor {
    fn update_frame(&mut self, _dt: f32, scene: &mut SceneWorld) {
        self.pos = scene.pointer_position();
        let pos = self.pos;
        self.hovering = scene
            .entities_where(|e| e.downcast_ref::<Ball>().map(|b| b as &dyn Solid))
            .any(|(_, solid)| solid.bounds().contains(pos));
    }

    fn update_fixed(&mut self, _dt: f32, _scene: &mut SceneWorld) {}

    fn draw(&self, surface: &mut dyn Surface, assets: &mut dyn AssetProvider) {
        let name = if self.hovering { "cursor.hot" } else { "cursor" };
        let color = palette::resolve(assets, name);
        surface.fill_rect(Rect::from_center_size(self.pos, Vec2::new(6.0, 6.0)), color);
    }

    fn draw_order(&self) -> DrawOrder {
        DrawOrder(100)
    }
}

/// Static colored block.
pub struct Panel {
    pub rect: Rect,
    pub color: &'static str,
    pub layer: DrawOrder,
}

impl Entity for Panel {
    fn update_frame(&mut self, _dt: f32, _scene: &mut SceneWorld) {}

    fn update_fixed(&mut self, _dt: f32, _scene: &mut SceneWorld) {}

    fn draw(&self, surface: &mut dyn Surface, assets: &mut dyn AssetProvider) {
        surface.fill_rect(self.rect, palette::resolve(assets, self.color));
    }

    fn draw_order(&self) -> DrawOrder {
        self.layer
    }
}
