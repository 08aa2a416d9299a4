use std::time::Instant;

use anyhow::{Context, Result};

use crate::asset::AssetProvider;
use crate::backend::{Backend, Surface};
use crate::coords::ColorRgba;
use crate::core::Scene;
use crate::display::{reconcile, SurfaceCache};
use crate::time::PhaseClock;

use super::ctx::Pass;
use super::{RuntimeConfig, RuntimeCtx, SceneId};

/// The engine loop.
///
/// Owns the scene sequence (through [`RuntimeCtx`]), the backend, the render
/// surface and the asset provider. Every scene is simulated; only the first
/// one is drawn.
///
/// ```rust,ignore
/// let mut runtime = Runtime::new(WinitBackend::new()?, NoAssets);
/// runtime.instantiate(TitleScreen::default());
/// runtime.run()?;
/// ```
pub struct Runtime<B: Backend> {
    ctx: RuntimeCtx,

    backend: B,
    surface: Option<B::Surface>,
    cache: SurfaceCache,
    assets: Box<dyn AssetProvider>,
    clear_color: ColorRgba,

    frame_clock: PhaseClock,
    fixed_clock: PhaseClock,
    started: bool,
    /// Set when `run` closed the surface; the next start drops it.
    surface_closed: bool,
}

impl<B: Backend> Runtime<B> {
    pub fn new(backend: B, assets: impl AssetProvider) -> Self {
        Self::with_config(backend, assets, RuntimeConfig::default())
    }

    pub fn with_config(backend: B, assets: impl AssetProvider, config: RuntimeConfig) -> Self {
        let now = Instant::now();
        Self {
            ctx: RuntimeCtx::new(config.rates()),
            backend,
            surface: None,
            cache: SurfaceCache::default(),
            assets: Box::new(assets),
            clear_color: config.clear_color,
            frame_clock: PhaseClock::new(now),
            fixed_clock: PhaseClock::new(now),
            started: false,
            surface_closed: false,
        }
    }

    // ── access ────────────────────────────────────────────────────────────

    pub fn ctx(&self) -> &RuntimeCtx {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut RuntimeCtx {
        &mut self.ctx
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The render surface, once the first frame has been drawn.
    ///
    /// After [`run`](Self::run) returns this is the closed surface, until the
    /// next start replaces it.
    pub fn surface(&self) -> Option<&B::Surface> {
        self.surface.as_ref()
    }

    pub fn assets(&self) -> &dyn AssetProvider {
        self.assets.as_ref()
    }

    pub fn assets_mut(&mut self) -> &mut dyn AssetProvider {
        self.assets.as_mut()
    }

    /// Unloads every asset right away.
    pub fn unload_assets(&mut self) {
        self.assets.unload_all();
    }

    /// Number of frame and fixed phases fired so far.
    pub fn phases_fired(&self) -> (u64, u64) {
        (self.frame_clock.fired(), self.fixed_clock.fired())
    }

    // ── forwarding ────────────────────────────────────────────────────────

    /// Queues `scene` for addition; see [`RuntimeCtx::instantiate`].
    pub fn instantiate<S: Scene>(&mut self, scene: S) -> SceneId {
        self.ctx.instantiate(scene)
    }

    pub fn destroy(&mut self, id: SceneId) {
        self.ctx.destroy(id);
    }

    pub fn set_drawn(&mut self, id: SceneId) {
        self.ctx.set_drawn(id);
    }

    pub fn set_update_rate(&mut self, hz: f32) {
        self.ctx.set_update_rate(hz);
    }

    pub fn set_fixed_update_rate(&mut self, hz: f32) {
        self.ctx.set_fixed_update_rate(hz);
    }

    pub fn set_fluctuation_tolerance(&mut self, tolerance: f32) {
        self.ctx.set_fluctuation_tolerance(tolerance);
    }

    pub fn stop(&mut self) {
        self.ctx.stop();
    }

    /// Whether another iteration would do anything: not stopped and at least
    /// one live scene.
    pub fn is_running(&self) -> bool {
        self.ctx.is_running() && self.ctx.scene_count() > 0
    }

    // ── loop ──────────────────────────────────────────────────────────────

    /// Runs until stopped or until no scene is left, then closes the surface.
    pub fn run(&mut self) -> Result<()> {
        self.start(Instant::now());
        log::info!("runtime started with {} scene(s)", self.ctx.scene_count());

        let result = loop {
            if !self.is_running() {
                break Ok(());
            }
            if let Err(e) = self.step() {
                break Err(e);
            }
        };

        self.shutdown();
        log::info!("runtime stopped");
        result
    }

    /// Admits scenes queued so far and restarts both clocks at `now`.
    ///
    /// `run` calls this once; [`step_at`](Self::step_at) calls it on first use.
    pub fn start(&mut self, now: Instant) {
        if std::mem::take(&mut self.surface_closed) {
            self.surface = None;
        }
        self.ctx.scenes.apply_pending();
        self.apply_unload_request();
        self.frame_clock.rebase(now);
        self.fixed_clock.rebase(now);
        self.started = true;
    }

    /// One loop iteration at the current time.
    pub fn step(&mut self) -> Result<bool> {
        self.step_at(Instant::now())
    }

    /// One loop iteration at `now`: the frame phase, then the fixed phase.
    ///
    /// Returns [`is_running`](Self::is_running) after the iteration.
    pub fn step_at(&mut self, now: Instant) -> Result<bool> {
        if !self.started {
            self.start(now);
        }

        let e_frame = self.frame_clock.elapsed(now);
        if self.ctx.rates.frame_due(e_frame) {
            self.frame_clock.reset(now);
            self.ctx.run_pass(e_frame, Pass::Frame);
            self.apply_unload_request();
            self.draw_frame()?;
        }

        let e_fixed = self.fixed_clock.elapsed(now);
        if let Some(dt) = self.ctx.rates.fixed_step(e_fixed) {
            self.fixed_clock.reset(now);
            self.ctx.run_pass(dt, Pass::Fixed);
            self.apply_unload_request();
        }

        Ok(self.is_running())
    }

    /// Reconciles the surface with the drawn scene, pumps events and draws.
    fn draw_frame(&mut self) -> Result<()> {
        let Some(body) = self
            .ctx
            .scenes
            .live
            .first_mut()
            .and_then(|e| e.body.as_mut())
        else {
            return Ok(());
        };

        reconcile(
            &mut self.backend,
            &mut self.surface,
            &mut self.cache,
            body.scene.display(),
        )?;

        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };

        let outcome = self
            .backend
            .dispatch_events(surface)
            .context("failed to dispatch surface events")?;

        if outcome.close_requested {
            log::info!("close requested by the window system");
            self.ctx.stop();
            return Ok(());
        }

        surface.clear(self.clear_color);
        body.world.draw(&mut *surface, self.assets.as_mut());
        surface.present().context("failed to present frame")
    }

    fn apply_unload_request(&mut self) {
        if self.ctx.take_unload_request() {
            self.assets.unload_all();
        }
    }

    fn shutdown(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.close();
            self.surface_closed = true;
        }
        self.started = false;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::asset::{NoAssets, ResettableAssets};
    use crate::backend::{HeadlessBackend, SurfaceOp};
    use crate::coords::{PixelSize, Rect};
    use crate::display::DisplayRequirements;
    use crate::scene::SceneWorld;

    type Log = Rc<RefCell<Vec<(String, f32)>>>;
    type Hook = Box<dyn FnMut(f32, &mut SceneWorld, &mut RuntimeCtx)>;

    /// Scene logging every hook, with optional scripted behavior.
    struct Script {
        name: &'static str,
        log: Log,
        display: DisplayRequirements,
        on_frame: Option<Hook>,
        frames: u32,
        die_after: Option<u32>,
    }

    impl Script {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: log.clone(),
                display: DisplayRequirements::new().with_title(name),
                on_frame: None,
                frames: 0,
                die_after: None,
            }
        }

        fn on_frame(mut self, hook: impl FnMut(f32, &mut SceneWorld, &mut RuntimeCtx) + 'static) -> Self {
            self.on_frame = Some(Box::new(hook));
            self
        }

        fn die_after(mut self, frames: u32) -> Self {
            self.die_after = Some(frames);
            self
        }
    }

    impl Scene for Script {
        fn update_frame(&mut self, dt: f32, world: &mut SceneWorld, runtime: &mut RuntimeCtx) {
            self.frames += 1;
            self.log.borrow_mut().push((format!("frame:{}", self.name), dt));
            if let Some(hook) = self.on_frame.as_mut() {
                hook(dt, world, runtime);
            }
        }

        fn update_fixed(&mut self, dt: f32, _world: &mut SceneWorld, _runtime: &mut RuntimeCtx) {
            self.log.borrow_mut().push((format!("fixed:{}", self.name), dt));
        }

        fn display(&self) -> &DisplayRequirements {
            &self.display
        }

        fn to_destroy(&self) -> bool {
            self.die_after.is_some_and(|n| self.frames >= n)
        }
    }

    /// Solid block entity.
    struct Block {
        rect: Rect,
        color: ColorRgba,
        log: Option<Log>,
    }

    impl Block {
        fn new(color: ColorRgba) -> Self {
            Self { rect: Rect::new(0.0, 0.0, 10.0, 10.0), color, log: None }
        }
    }

    impl crate::core::Entity for Block {
        fn update_frame(&mut self, dt: f32, _scene: &mut SceneWorld) {
            if let Some(log) = &self.log {
                log.borrow_mut().push(("entity".into(), dt));
            }
        }

        fn update_fixed(&mut self, _dt: f32, _scene: &mut SceneWorld) {}

        fn draw(&self, surface: &mut dyn Surface, _assets: &mut dyn AssetProvider) {
            surface.fill_rect(self.rect, self.color);
        }
    }

    fn new_log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn names(log: &Log) -> Vec<String> {
        log.borrow_mut().drain(..).map(|(n, _)| n).collect()
    }

    fn entries(log: &Log) -> Vec<(String, f32)> {
        std::mem::take(&mut *log.borrow_mut())
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn runtime() -> Runtime<HeadlessBackend> {
        Runtime::new(HeadlessBackend::new(), NoAssets)
    }

    // ── frame phase ───────────────────────────────────────────────────────

    #[test]
    fn frame_phase_waits_for_interval() {
        let log = new_log();
        let mut rt = runtime();
        rt.instantiate(Script::new("a", &log));
        let t0 = Instant::now();
        rt.start(t0);

        // 4 ms interval: not yet due at 3 ms, due at 5 ms.
        rt.step_at(t0 + ms(3)).unwrap();
        assert!(names(&log).is_empty());

        rt.step_at(t0 + ms(5)).unwrap();
        let got = entries(&log);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].0, "frame:a");
        assert!((got[0].1 - 0.005).abs() < 1e-4);
    }

    #[test]
    fn uncapped_frame_phase_fires_every_iteration() {
        let log = new_log();
        let mut rt = runtime();
        rt.set_update_rate(0.0);
        assert_eq!(rt.ctx().update_rate(), 0.0);
        rt.instantiate(Script::new("a", &log));
        let t0 = Instant::now();
        rt.start(t0);

        for _ in 0..3 {
            rt.step_at(t0).unwrap();
        }
        assert_eq!(names(&log), ["frame:a", "frame:a", "frame:a"]);
        assert_eq!(rt.phases_fired().0, 3);
    }

    #[test]
    fn negative_rate_is_treated_as_positive() {
        let mut rt = runtime();
        rt.set_update_rate(-60.0);
        rt.set_fixed_update_rate(-30.0);
        assert!((rt.ctx().rates().frame_interval() - 1.0 / 60.0).abs() < 1e-7);
        assert!((rt.ctx().rates().fixed_interval() - 1.0 / 30.0).abs() < 1e-7);
    }

    // ── fixed phase ───────────────────────────────────────────────────────

    #[test]
    fn fixed_delta_is_clamped_by_tolerance() {
        let log = new_log();
        let mut rt = runtime();
        rt.set_update_rate(0.0);
        rt.instantiate(Script::new("a", &log));
        let t0 = Instant::now();
        rt.start(t0);

        rt.step_at(t0 + ms(100)).unwrap();
        let fixed: Vec<f32> = entries(&log)
            .into_iter()
            .filter(|(n, _)| n == "fixed:a")
            .map(|(_, dt)| dt)
            .collect();
        assert_eq!(fixed.len(), 1);
        assert!((fixed[0] - 0.022).abs() < 1e-5, "{fixed:?}");
    }

    #[test]
    fn fixed_delta_below_ceiling_is_passed_through() {
        let log = new_log();
        let mut rt = runtime();
        rt.instantiate(Script::new("a", &log));
        let t0 = Instant::now();
        rt.start(t0);

        rt.step_at(t0 + ms(21)).unwrap();
        let fixed: Vec<f32> = entries(&log)
            .into_iter()
            .filter(|(n, _)| n == "fixed:a")
            .map(|(_, dt)| dt)
            .collect();
        assert_eq!(fixed.len(), 1);
        assert!((fixed[0] - 0.021).abs() < 1e-4, "{fixed:?}");
    }

    #[test]
    fn zero_fixed_rate_never_fires() {
        let log = new_log();
        let mut rt = runtime();
        rt.set_fixed_update_rate(0.0);
        assert_eq!(rt.ctx().fixed_update_rate(), 0.0);
        rt.instantiate(Script::new("a", &log));
        let t0 = Instant::now();
        rt.start(t0);

        for i in 1..=10 {
            rt.step_at(t0 + Duration::from_secs(i)).unwrap();
        }
        assert!(names(&log).iter().all(|n| n == "frame:a"));
        assert_eq!(rt.phases_fired().1, 0);
    }

    #[test]
    fn negative_tolerance_clamps_to_interval() {
        let log = new_log();
        let mut rt = runtime();
        rt.set_fluctuation_tolerance(-3.0);
        assert_eq!(rt.ctx().fluctuation_tolerance(), 0.0);
        rt.instantiate(Script::new("a", &log));
        let t0 = Instant::now();
        rt.start(t0);

        rt.step_at(t0 + ms(500)).unwrap();
        let fixed: Vec<f32> = entries(&log)
            .into_iter()
            .filter(|(n, _)| n == "fixed:a")
            .map(|(_, dt)| dt)
            .collect();
        assert!((fixed[0] - 0.02).abs() < 1e-6, "{fixed:?}");
    }

    // ── scene lifecycle ───────────────────────────────────────────────────

    #[test]
    fn scene_hook_runs_before_its_entities() {
        let log = new_log();
        let mut rt = runtime();
        let a = rt.instantiate(Script::new("a", &log));
        let t0 = Instant::now();
        rt.start(t0);

        let mut block = Block::new(ColorRgba::white());
        block.log = Some(log.clone());
        rt.ctx_mut().world_mut(a).unwrap().instantiate(block);

        rt.step_at(t0 + ms(5)).unwrap(); // admits the block
        rt.step_at(t0 + ms(10)).unwrap();
        assert_eq!(names(&log), ["frame:a", "frame:a", "entity"]);
    }

    #[test]
    fn scene_instantiated_during_pass_joins_afterwards() {
        let log = new_log();
        let mut rt = runtime();
        let spawned = Rc::new(Cell::new(None));
        let slot = spawned.clone();
        let mut child = Some(Script::new("child", &log));
        rt.instantiate(Script::new("a", &log).on_frame(move |_, _, rt| {
            if let Some(child) = child.take() {
                let id = rt.instantiate(child);
                assert!(!rt.contains(id));
                slot.set(Some(id));
            }
        }));
        rt.instantiate(Script::new("b", &log));
        let t0 = Instant::now();
        rt.start(t0);

        rt.step_at(t0 + ms(5)).unwrap();
        assert_eq!(names(&log), ["frame:a", "frame:b"]);

        let child = spawned.get().unwrap();
        assert!(rt.ctx().contains(child));
        let order: Vec<_> = rt.ctx().scene_ids().skip(2).collect();
        assert_eq!(order, [child]);

        rt.step_at(t0 + ms(10)).unwrap();
        assert_eq!(names(&log), ["frame:a", "frame:b", "frame:child"]);
    }

    #[test]
    fn self_destroying_scene_leaves_at_lifecycle_point() {
        let log = new_log();
        let mut rt = runtime();
        let a = rt.instantiate(Script::new("a", &log).die_after(1));
        let seen = Rc::new(Cell::new(false));
        let witness = seen.clone();
        rt.instantiate(Script::new("b", &log).on_frame(move |_, _, rt| {
            witness.set(rt.contains(a));
        }));
        let t0 = Instant::now();
        rt.start(t0);

        rt.step_at(t0 + ms(5)).unwrap();
        // b ran after a turned to_destroy but a was still live.
        assert!(seen.get());
        assert!(!rt.ctx().contains(a));
        assert_eq!(rt.ctx().scene_count(), 1);
    }

    #[test]
    fn destroy_buffers_until_pass_ends() {
        let log = new_log();
        let mut rt = runtime();
        let b_id = Rc::new(Cell::new(None));
        let target = b_id.clone();
        rt.instantiate(Script::new("a", &log).on_frame(move |_, _, rt| {
            if let Some(id) = target.take() {
                rt.destroy(id);
            }
        }));
        let b = rt.instantiate(Script::new("b", &log));
        b_id.set(Some(b));
        let t0 = Instant::now();
        rt.start(t0);

        rt.step_at(t0 + ms(5)).unwrap();
        // b still ran in the pass that destroyed it.
        assert_eq!(names(&log), ["frame:a", "frame:b"]);
        assert!(!rt.ctx().contains(b));

        // Unknown handle: no-op.
        rt.destroy(b);
        assert_eq!(rt.ctx().scene_count(), 1);
    }

    #[test]
    fn set_drawn_swaps_outside_pass() {
        let log = new_log();
        let mut rt = runtime();
        let a = rt.instantiate(Script::new("a", &log));
        let b = rt.instantiate(Script::new("b", &log));
        let c = rt.instantiate(Script::new("c", &log));
        let t0 = Instant::now();
        rt.start(t0);

        rt.set_drawn(c);
        let order: Vec<_> = rt.ctx().scene_ids().collect();
        assert_eq!(order, [c, b, a]);
        assert_eq!(rt.ctx().drawn_scene(), Some(c));

        rt.step_at(t0 + ms(30)).unwrap();
        // All three simulated, c drawn.
        assert_eq!(
            names(&log),
            ["frame:c", "frame:b", "frame:a", "fixed:c", "fixed:b", "fixed:a"]
        );
        assert_eq!(rt.surface().unwrap().title(), "c");
    }

    #[test]
    fn set_drawn_before_start_waits_for_admission() {
        let log = new_log();
        let mut rt = runtime();
        rt.instantiate(Script::new("menu", &log));
        let game = rt.instantiate(Script::new("game", &log));
        rt.set_drawn(game);
        let t0 = Instant::now();
        rt.start(t0);

        assert_eq!(rt.ctx().drawn_scene(), Some(game));
        rt.step_at(t0 + ms(5)).unwrap();
        assert_eq!(rt.surface().unwrap().title(), "game");
    }

    #[test]
    fn buffered_set_drawn_calls_replay_in_order() {
        let log = new_log();
        let mut rt = runtime();
        let mut armed = true;
        let a = rt.instantiate(Script::new("a", &log).on_frame(move |_, _, rt| {
            if std::mem::take(&mut armed) {
                let ids: Vec<_> = rt.scene_ids().collect();
                rt.set_drawn(ids[2]);
                rt.set_drawn(ids[1]);
            }
        }));
        let b = rt.instantiate(Script::new("b", &log));
        let c = rt.instantiate(Script::new("c", &log));
        let t0 = Instant::now();
        rt.start(t0);

        rt.step_at(t0 + ms(5)).unwrap();
        // [a, b, c] -> swap c: [c, b, a] -> swap b: [b, c, a]
        let order: Vec<_> = rt.ctx().scene_ids().collect();
        assert_eq!(order, [b, c, a]);
    }

    #[test]
    fn set_drawn_during_pass_applies_after_additions() {
        let log = new_log();
        let mut rt = runtime();
        let mut overlay = Some(Script::new("overlay", &log));
        rt.instantiate(Script::new("a", &log).on_frame(move |_, _, rt| {
            if let Some(overlay) = overlay.take() {
                let id = rt.instantiate(overlay);
                rt.set_drawn(id);
            }
        }));
        let t0 = Instant::now();
        rt.start(t0);

        rt.step_at(t0 + ms(5)).unwrap();
        assert_eq!(rt.ctx().scene_count(), 2);
        assert_eq!(rt.surface().unwrap().title(), "overlay");
        let (_, drawn) = rt.ctx().scenes_of_type::<Script>().next().unwrap();
        assert_eq!(drawn.name, "overlay");
    }

    #[test]
    fn hooks_see_current_scene_and_not_themselves() {
        let log = new_log();
        let mut rt = runtime();
        let observed = Rc::new(RefCell::new(Vec::new()));
        let sink = observed.clone();
        let a = rt.instantiate(Script::new("a", &log).on_frame(move |_, _, rt| {
            let others = rt.scenes_of_type::<Script>().count();
            sink.borrow_mut().push((rt.current_scene(), others));
        }));
        rt.instantiate(Script::new("b", &log));
        let t0 = Instant::now();
        rt.start(t0);

        rt.step_at(t0 + ms(5)).unwrap();
        assert_eq!(*observed.borrow(), [(Some(a), 1)]);
        assert_eq!(rt.ctx().current_scene(), None);
        assert_eq!(rt.ctx().scene::<Script>(a).map(|s| s.frames), Some(1));
    }

    // ── drawing and display ───────────────────────────────────────────────

    #[test]
    fn only_first_scene_is_drawn() {
        let log = new_log();
        let mut rt = runtime();
        let red = ColorRgba::new(1.0, 0.0, 0.0, 1.0);
        let blue = ColorRgba::new(0.0, 0.0, 1.0, 1.0);
        let a = rt.instantiate(Script::new("a", &log));
        let b = rt.instantiate(Script::new("b", &log));
        let t0 = Instant::now();
        rt.start(t0);
        rt.ctx_mut().world_mut(a).unwrap().instantiate(Block::new(red));
        rt.ctx_mut().world_mut(b).unwrap().instantiate(Block::new(blue));

        rt.step_at(t0 + ms(5)).unwrap();
        let surface = rt.surface().unwrap();
        assert_eq!(
            surface.ops(),
            &[
                SurfaceOp::Clear(ColorRgba::black()),
                SurfaceOp::FillRect(Rect::new(0.0, 0.0, 10.0, 10.0), red),
                SurfaceOp::Present,
            ]
        );
        assert_eq!(rt.ctx().world(b).unwrap().len(), 1);
    }

    #[test]
    fn clear_color_comes_from_config() {
        let log = new_log();
        let config = RuntimeConfig { clear_color: ColorRgba::white(), ..RuntimeConfig::default() };
        let mut rt = Runtime::with_config(HeadlessBackend::new(), NoAssets, config);
        rt.instantiate(Script::new("a", &log));
        let t0 = Instant::now();
        rt.start(t0);

        rt.step_at(t0 + ms(5)).unwrap();
        assert_eq!(rt.surface().unwrap().ops()[0], SurfaceOp::Clear(ColorRgba::white()));
    }

    #[test]
    fn surface_follows_drawn_scene_requirements() {
        let log = new_log();
        let mut rt = runtime();
        let a = rt.instantiate(Script::new("a", &log));
        let t0 = Instant::now();
        rt.start(t0);

        rt.step_at(t0 + ms(5)).unwrap();
        assert_eq!(rt.backend().surfaces_created(), 1);
        assert_eq!(rt.surface().unwrap().size(), PixelSize::new(640, 480));

        let script = rt.ctx_mut().scene_mut::<Script>(a).unwrap();
        script.display.set_resolution(800, 600);
        rt.step_at(t0 + ms(10)).unwrap();
        assert_eq!(rt.backend().surfaces_created(), 1);
        assert_eq!(rt.surface().unwrap().size(), PixelSize::new(800, 600));

        let script = rt.ctx_mut().scene_mut::<Script>(a).unwrap();
        script.display.fullscreen = true;
        rt.step_at(t0 + ms(15)).unwrap();
        assert_eq!(rt.backend().surfaces_created(), 2);
        assert!(rt.surface().unwrap().config().style.fullscreen);
    }

    #[test]
    fn surface_creation_failure_propagates() {
        let log = new_log();
        let mut rt = runtime();
        rt.instantiate(Script::new("a", &log));
        rt.backend_mut().fail_next_create();
        let t0 = Instant::now();
        rt.start(t0);

        assert!(rt.step_at(t0 + ms(5)).is_err());
    }

    // ── termination ───────────────────────────────────────────────────────

    #[test]
    fn stop_from_scene_hook_ends_loop() {
        let log = new_log();
        let mut rt = runtime();
        rt.instantiate(Script::new("a", &log).on_frame(|_, _, rt| rt.stop()));
        let t0 = Instant::now();
        rt.start(t0);

        assert!(!rt.step_at(t0 + ms(5)).unwrap());
        assert!(!rt.ctx().is_running());
    }

    #[test]
    fn close_request_stops_without_presenting() {
        let log = new_log();
        let mut rt = runtime();
        rt.instantiate(Script::new("a", &log));
        rt.backend_mut().request_close();
        let t0 = Instant::now();
        rt.start(t0);

        assert!(!rt.step_at(t0 + ms(5)).unwrap());
        assert_eq!(rt.surface().unwrap().frames_presented(), 0);
    }

    #[test]
    fn run_returns_when_scenes_are_gone() {
        let log = new_log();
        let mut rt = runtime();
        rt.set_update_rate(0.0);
        rt.instantiate(Script::new("a", &log).die_after(3));

        rt.run().unwrap();

        assert_eq!(rt.ctx().scene_count(), 0);
        assert_eq!(names(&log).iter().filter(|n| *n == "frame:a").count(), 3);
        let surface = rt.surface().unwrap();
        assert!(surface.is_closed());
        assert_eq!(surface.frames_presented(), 2);
    }

    #[test]
    fn second_run_opens_a_new_surface() {
        let log = new_log();
        let mut rt = runtime();
        rt.set_update_rate(0.0);
        rt.instantiate(Script::new("a", &log).die_after(3));
        rt.run().unwrap();
        assert!(rt.surface().unwrap().is_closed());

        rt.instantiate(Script::new("b", &log).die_after(3));
        rt.run().unwrap();

        assert_eq!(rt.backend().surfaces_created(), 2);
        let surface = rt.surface().unwrap();
        assert_eq!(surface.ordinal(), 2);
        assert_eq!(surface.title(), "b");
        assert_eq!(surface.frames_presented(), 2);
    }

    #[test]
    fn run_without_scenes_returns_immediately() {
        let mut rt = runtime();
        rt.run().unwrap();
        assert!(rt.surface().is_none());
        assert_eq!(rt.backend().dispatches(), 0);
    }

    // ── assets ────────────────────────────────────────────────────────────

    #[test]
    fn asset_unload_waits_for_lifecycle_point() {
        let log = new_log();
        let mut rt = Runtime::new(HeadlessBackend::new(), ResettableAssets::new(Vec::<u32>::new));
        rt.instantiate(Script::new("a", &log).on_frame(|_, _, rt| rt.request_asset_unload()));
        let t0 = Instant::now();
        rt.start(t0);

        rt.assets_mut()
            .downcast_mut::<ResettableAssets<Vec<u32>>>()
            .unwrap()
            .push(7);

        rt.step_at(t0 + ms(5)).unwrap();
        let assets = rt.assets().downcast_ref::<ResettableAssets<Vec<u32>>>().unwrap();
        assert!(assets.is_empty());
        assert_eq!(assets.unloads(), 1);
    }
}
