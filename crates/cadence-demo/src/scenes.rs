use cadence_engine::backend::Backend;
use cadence_engine::coords::{Rect, Vec2};
use cadence_engine::{
    DisplayRequirements, DrawOrder, EntityId, Runtime, RuntimeCtx, Scene, SceneId, SceneWorld,
};

use crate::entities::{Ball, Cursor, Panel, Spark};

/// Queues the demo scenes: a splash card, then the playfield.
pub fn populate<B: Backend>(runtime: &mut Runtime<B>, frame_limit: Option<u64>) {
    runtime.instantiate(Splash::new(1.0));
    runtime.instantiate(Playfield::new(frame_limit));
}

/// Title card shown for a fixed time, then removed.
pub struct Splash {
    display: DisplayRequirements,
    shown: f32,
    duration: f32,
    ready: bool,
}

impl Splash {
    pub fn new(duration: f32) -> Self {
        Self {
            display: DisplayRequirements::new().with_title("cadence"),
            shown: 0.0,
            duration,
            ready: false,
        }
    }
}

impl Scene for Splash {
    fn update_frame(&mut self, dt: f32, world: &mut SceneWorld, _runtime: &mut RuntimeCtx) {
        if !self.ready {
            world.instantiate(Panel {
                rect: Rect::new(120.0, 180.0, 400.0, 120.0),
                color: "splash",
                layer: DrawOrder::default(),
            });
            self.ready = true;
        }
        self.shown += dt;
    }

    fn update_fixed(&mut self, _dt: f32, _world: &mut SceneWorld, _runtime: &mut RuntimeCtx) {}

    fn display(&self) -> &DisplayRequirements {
        &self.display
    }

    fn to_destroy(&self) -> bool {
        self.shown >= self.duration
    }
}

/// Bouncing balls, sparks and a pointer cursor.
///
/// Every few seconds of being drawn it hands the surface to the pause
/// overlay and drops the cached palette.
pub struct Playfield {
    display: DisplayRequirements,
    arena: Rect,
    frame_limit: Option<u64>,
    frames: u64,
    fixed_ticks: u64,
    spark_timer: f32,
    since_switch: f32,
    switch_every: f32,
    overlay: Option<SceneId>,
    seed: u32,
}

impl Playfield {
    const SPARK_INTERVAL: f32 = 0.1;

    pub fn new(frame_limit: Option<u64>) -> Self {
        Self {
            display: DisplayRequirements::new().with_title("cadence"),
            arena: Rect::new(0.0, 0.0, 640.0, 480.0),
            frame_limit,
            frames: 0,
            fixed_ticks: 0,
            spark_timer: 0.0,
            since_switch: 0.0,
            switch_every: 5.0,
            overlay: None,
            seed: 0x2545_f491,
        }
    }

    pub fn fixed_ticks(&self) -> u64 {
        self.fixed_ticks
    }

    fn setup(&mut self, world: &mut SceneWorld, runtime: &mut RuntimeCtx) {
        for i in 0..6 {
            let pos = Vec2::new(80.0 + 90.0 * i as f32, 100.0 + 45.0 * i as f32);
            let vel = Vec2::new(self.random() * 300.0 - 150.0, self.random() * 300.0 - 150.0);
            world.instantiate(Ball {
                pos,
                vel,
                size: 24.0 + 8.0 * (i % 3) as f32,
                color: if i % 2 == 0 { "ball.warm" } else { "ball.cool" },
                layer: DrawOrder(i % 2),
                arena: self.arena,
            });
        }
        world.instantiate(Cursor::default());
        self.overlay = Some(runtime.instantiate(Overlay::new(2.0)));
        log::info!("playfield ready");
    }

    /// xorshift32 in `[0, 1)`.
    fn random(&mut self) -> f32 {
        let mut x = self.seed;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.seed = x;
        (x >> 8) as f32 / (1u32 << 24) as f32
    }
}

impl Scene for Playfield {
    fn update_frame(&mut self, dt: f32, world: &mut SceneWorld, runtime: &mut RuntimeCtx) {
        if self.overlay.is_none() {
            self.setup(world, runtime);
        }

        self.frames += 1;
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            log::info!("frame limit reached after {} frames", self.frames);
            runtime.stop();
        }

        self.spark_timer += dt;
        while self.spark_timer >= Self::SPARK_INTERVAL {
            self.spark_timer -= Self::SPARK_INTERVAL;
            let pos = Vec2::new(self.random() * self.arena.size.x, self.random() * self.arena.size.y);
            let drift = Vec2::new(0.0, -20.0 - self.random() * 40.0);
            world.instantiate(Spark::new(pos, drift, 0.6));
        }

        if runtime.drawn_scene() != runtime.current_scene() {
            return;
        }
        self.since_switch += dt;
        if self.since_switch >= self.switch_every {
            self.since_switch = 0.0;
            if let Some(overlay) = self.overlay {
                log::debug!("switching to the pause overlay");
                runtime.set_drawn(overlay);
                runtime.request_asset_unload();
            }
        }
    }

    fn update_fixed(&mut self, _dt: f32, _world: &mut SceneWorld, _runtime: &mut RuntimeCtx) {
        self.fixed_ticks += 1;
    }

    fn display(&self) -> &DisplayRequirements {
        &self.display
    }
}

/// Stretched pause card with a progress bar; returns to the playfield when full.
pub struct Overlay {
    display: DisplayRequirements,
    hold: f32,
    shown: f32,
    progress: Option<EntityId>,
}

impl Overlay {
    const BAR_WIDTH: f32 = 80.0;

    pub fn new(hold: f32) -> Self {
        Self {
            display: DisplayRequirements::new()
                .with_title("cadence (paused)")
                .with_view(Vec2::new(100.0, 100.0), Vec2::new(50.0, 50.0))
                .with_stretched(true),
            hold,
            shown: 0.0,
            progress: None,
        }
    }
}

impl Scene for Overlay {
    fn update_frame(&mut self, dt: f32, world: &mut SceneWorld, runtime: &mut RuntimeCtx) {
        let progress = *self.progress.get_or_insert_with(|| {
            world.instantiate(Panel {
                rect: Rect::new(5.0, 5.0, 90.0, 90.0),
                color: "panel",
                layer: DrawOrder::default(),
            });
            world.instantiate(Panel {
                rect: Rect::new(10.0, 45.0, 0.0, 10.0),
                color: "bar",
                layer: DrawOrder::default().above(),
            })
        });

        if runtime.drawn_scene() != runtime.current_scene() {
            return;
        }

        self.shown += dt;
        if let Some(bar) = world.entity_mut::<Panel>(progress) {
            bar.rect.size.x = Self::BAR_WIDTH * (self.shown / self.hold).min(1.0);
        }

        if self.shown >= self.hold {
            self.shown = 0.0;
            let playfield = runtime.scenes_of_type::<Playfield>().next().map(|(id, _)| id);
            if let Some(playfield) = playfield {
                runtime.set_drawn(playfield);
            }
        }
    }

    fn update_fixed(&mut self, _dt: f32, _world: &mut SceneWorld, _runtime: &mut RuntimeCtx) {}

    fn display(&self) -> &DisplayRequirements {
        &self.display
    }
}
