//! Physics sandbox: bouncing balls that can be picked up and dragged.

use log::{debug, info, warn};

use crate::app::{AppContext, AppHandler};
use crate::backend::{lock, share, SharedPhysics};
use crate::camera::Camera;
use crate::color::Color;
use crate::config::{DemoConfig, WorldConfig};
use crate::error::PhysicsError;
use crate::input::{KeyEvent, TouchEvent, WindowSize};
use crate::interaction::InteractionController;
use crate::observer::StepStats;
use crate::rng::Rng;
use crate::vec::Vec2;
use crate::world::{BodyHandle, World};

/// Balls bouncing inside the window walls. Touch picks a ball and drags it
/// through the [`InteractionController`]; space pauses, `m` toggles debug.
pub struct PhysicsDemo {
    config: DemoConfig,
    physics: SharedPhysics<World<f32>>,
    camera: Camera<f32>,
    controller: Option<InteractionController<World<f32>>>,
    balls: Vec<BodyHandle>,
    rng: Rng,
    stats: StepStats,
}

impl PhysicsDemo {
    pub fn new(config: DemoConfig) -> Self {
        Self::with_world_config(config, WorldConfig::default())
    }

    pub fn with_world_config(config: DemoConfig, world_config: WorldConfig<f32>) -> Self {
        let rng = Rng::new(config.seed);
        PhysicsDemo {
            config,
            physics: share(World::new(world_config)),
            camera: Camera::new(WindowSize::default()),
            controller: None,
            balls: Vec::new(),
            rng,
            stats: StepStats::default(),
        }
    }

    pub fn physics(&self) -> &SharedPhysics<World<f32>> { &self.physics }
    pub fn balls(&self) -> &[BodyHandle] { &self.balls }
    pub fn stats(&self) -> &StepStats { &self.stats }
    pub fn camera(&self) -> &Camera<f32> { &self.camera }

    /// Present once the demo has been initialised.
    pub fn controller(&self) -> Option<&InteractionController<World<f32>>> {
        self.controller.as_ref()
    }

    fn create_ball(&mut self, size: WindowSize) -> Result<BodyHandle, PhysicsError> {
        let c = &self.config;
        let r = c.ball_radius;
        let pos = Vec2::new(
            self.rng.range(r, size.width as f32 - r),
            self.rng.range(r, size.height as f32 - r),
        );
        let velocity = Vec2::new(
            self.rng.range(-c.max_initial_speed, c.max_initial_speed),
            self.rng.range(-c.max_initial_speed, c.max_initial_speed),
        );
        let mut world = lock(&self.physics);
        let ball = world.add_ball(pos, c.ball_mass, r, c.ball_elasticity, c.ball_friction)?;
        world.set_velocity(ball, velocity)?;
        Ok(ball)
    }
}

impl AppHandler for PhysicsDemo {
    fn on_init(&mut self, ctx: &mut AppContext) {
        ctx.keep_rendering(self.config.render_rate_hz);
        ctx.set_background(Color::DARK_SLATE_GRAY);

        let size = ctx.window();
        self.camera.set_viewport(size);
        if let Err(err) = lock(&self.physics).create_world_bounds(size) {
            warn!("no world bounds: {}", err);
        }

        let count = self.config.ball_count(size.width, size.height);
        for _ in 0..count {
            match self.create_ball(size) {
                Ok(ball) => self.balls.push(ball),
                Err(err) => warn!("skipping ball: {}", err),
            }
        }

        let mouse = lock(&self.physics).add_mouse_body();
        self.controller = Some(
            InteractionController::new(self.physics.clone(), mouse)
                .with_render_rate(self.config.render_rate_hz),
        );
        info!("physics demo: {} balls in {}x{}", self.balls.len(), size.width, size.height);
    }

    fn on_terminate(&mut self, _ctx: &mut AppContext) {
        let mouse = self.controller.as_mut().map(|controller| {
            controller.cancel();
            controller.mouse_body()
        });
        let mut world = lock(&self.physics);
        for handle in self.balls.drain(..).chain(mouse) {
            world.remove_body(handle);
        }
    }

    fn on_resize(&mut self, _ctx: &mut AppContext, size: WindowSize) {
        self.camera.set_viewport(size);
        if let Err(err) = lock(&self.physics).create_world_bounds(size) {
            warn!("ignoring resize: {}", err);
        }
    }

    fn on_touch(&mut self, ctx: &mut AppContext, touch: &TouchEvent) -> bool {
        let Some(controller) = self.controller.as_mut() else {
            return false;
        };
        let response = controller.on_touch(touch, &self.camera);
        if let Some(request) = response.render {
            ctx.request_render(request);
        }
        response.consumed
    }

    fn on_key(&mut self, ctx: &mut AppContext, key: &KeyEvent) {
        if let Some(controller) = self.controller.as_mut() {
            if controller.on_key(key) {
                return;
            }
        }
        if !key.is_down() {
            return;
        }
        if key.is_quit() {
            ctx.quit();
        } else if key.text == " " {
            lock(&self.physics).toggle_integrate_state();
        } else if key.text == "m" {
            let on = lock(&self.physics).toggle_debug_state();
            info!("debug reporting {}", if on { "on" } else { "off" });
        }
    }

    fn on_frame(&mut self, _ctx: &mut AppContext, dt: f32) {
        let mut world = lock(&self.physics);
        world.step(dt, &mut self.stats);
        if world.is_debug() {
            debug!(
                "step {}: {} awake, {} contacts, {} sleeps",
                self.stats.steps, self.stats.last_awake, self.stats.contacts, self.stats.sleeps
            );
        }
    }
}
