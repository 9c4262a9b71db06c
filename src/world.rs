//! The physics world: body and joint tables, stepping, picking and bounds.

use log::{debug, trace};
use slotmap::{new_key_type, SlotMap};

use crate::body::{Activation, Body};
use crate::config::WorldConfig;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::input::WindowSize;
use crate::joint::{solve_contacts, PivotJoint, Walls};
use crate::observer::StepObserver;
use crate::vec::{Ray, Vec2};

/// Fixed steps one call may run before leftover time is dropped.
const MAX_CATCH_UP_STEPS: usize = 8;

new_key_type! {
    /// Non-owning reference to a body. Stale handles fail lookups.
    pub struct BodyHandle;
    /// Non-owning reference to a pivot joint.
    pub struct ConstraintHandle;
}

/// Result of a successful hit-test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hit<F: Float> {
    pub body: BodyHandle,
    /// Hit point relative to the body position, in physics space.
    pub local_pivot: Vec2<F>,
    /// Distance along the picking ray.
    pub distance: F,
}

/// A 2D world of circle bodies kept inside the window.
///
/// Physics space has its origin at the bottom-left of the window with y up.
/// Scene space (where picking rays live) is window pixels with y down, the
/// physics plane sitting at z = 0.
pub struct World<F: Float> {
    bodies: SlotMap<BodyHandle, Body<F>>,
    joints: SlotMap<ConstraintHandle, PivotJoint<F>>,
    walls: Option<Walls<F>>,
    viewport: WindowSize,
    config: WorldConfig<F>,
    integrating: bool,
    debug: bool,
    /// Frame time not yet consumed by fixed sub-steps.
    accumulator: F,
}

impl<F: Float> World<F> {
    pub fn new(config: WorldConfig<F>) -> Self {
        World {
            bodies: SlotMap::with_key(),
            joints: SlotMap::with_key(),
            walls: None,
            viewport: WindowSize::default(),
            config,
            integrating: true,
            debug: false,
            accumulator: F::zero(),
        }
    }

    pub fn config(&self) -> &WorldConfig<F> { &self.config }
    pub fn body_count(&self) -> usize { self.bodies.len() }
    pub fn constraint_count(&self) -> usize { self.joints.len() }
    pub fn body(&self, handle: BodyHandle) -> Option<&Body<F>> { self.bodies.get(handle) }
    pub fn walls(&self) -> Option<&Walls<F>> { self.walls.as_ref() }
    pub fn viewport(&self) -> WindowSize { self.viewport }
    pub fn is_integrating(&self) -> bool { self.integrating }
    pub fn is_debug(&self) -> bool { self.debug }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body<F>)> {
        self.bodies.iter()
    }

    pub fn add_body(&mut self, body: Body<F>) -> BodyHandle {
        self.bodies.insert(body)
    }

    pub fn add_ball(&mut self, pos: Vec2<F>, mass: F, radius: F, elasticity: F, friction: F) -> Result<BodyHandle, PhysicsError> {
        let body = Body::ball(pos, mass, radius, elasticity, friction)?;
        Ok(self.bodies.insert(body))
    }

    /// Add the shapeless kinematic body used as a drag anchor.
    pub fn add_mouse_body(&mut self) -> BodyHandle {
        self.bodies.insert(Body::kinematic(Vec2::zero()))
    }

    /// Remove a body and every joint attached to it.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body<F>> {
        let body = self.bodies.remove(handle)?;
        self.joints.retain(|_, j| !j.involves(handle));
        Some(body)
    }

    pub fn position(&self, handle: BodyHandle) -> Result<Vec2<F>, PhysicsError> {
        self.bodies.get(handle).map(|b| b.pos).ok_or(PhysicsError::BodyNotFound(handle))
    }

    pub fn set_position(&mut self, handle: BodyHandle, pos: Vec2<F>) -> Result<(), PhysicsError> {
        let body = self.bodies.get_mut(handle).ok_or(PhysicsError::BodyNotFound(handle))?;
        body.set_position(pos);
        Ok(())
    }

    pub fn velocity(&self, handle: BodyHandle) -> Result<Vec2<F>, PhysicsError> {
        let dt = self.sub_step();
        self.bodies.get(handle).map(|b| b.velocity(dt)).ok_or(PhysicsError::BodyNotFound(handle))
    }

    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2<F>) -> Result<(), PhysicsError> {
        let dt = self.sub_step();
        let body = self.bodies.get_mut(handle).ok_or(PhysicsError::BodyNotFound(handle))?;
        body.set_velocity(velocity, dt);
        Ok(())
    }

    /// Regenerate the boundary walls for a new window size.
    pub fn create_world_bounds(&mut self, size: WindowSize) -> Result<(), PhysicsError> {
        if size.width == 0 || size.height == 0 {
            return Err(PhysicsError::InvalidViewport { width: size.width, height: size.height });
        }
        self.viewport = size;
        let max = Vec2::new(F::from_f32(size.width as f32), F::from_f32(size.height as f32));
        self.walls = Some(Walls::new(Vec2::zero(), max, F::one()));
        for body in self.bodies.values_mut() {
            if body.is_dynamic() {
                body.wake();
            }
        }
        debug!("world bounds set to {}x{}", size.width, size.height);
        Ok(())
    }

    /// Window pixels (y down) to physics space (y up).
    pub fn translate_to_physics_space(&self, screen: Vec2<F>) -> Vec2<F> {
        let height = F::from_f32(self.viewport.height as f32);
        Vec2::new(screen.x, height - screen.y)
    }

    pub fn translate_from_physics_space(&self, physics: Vec2<F>) -> Vec2<F> {
        // The flip is its own inverse.
        self.translate_to_physics_space(physics)
    }

    /// Nearest dynamic body under the point where `ray` meets the physics plane.
    pub fn hit_test(&self, ray: &Ray<F>) -> Option<Hit<F>> {
        let distance = ray.intersect_z_plane(F::zero())?;
        let point = self.translate_to_physics_space(ray.at(distance).truncate());
        let mut best: Option<(BodyHandle, Vec2<F>, F)> = None;
        for (handle, body) in self.bodies.iter() {
            if !body.is_dynamic() || !body.contains(point) {
                continue;
            }
            let d = body.pos.distance(point);
            if best.map_or(true, |(_, _, best_d)| d < best_d) {
                best = Some((handle, body.pos, d));
            }
        }
        best.map(|(body, pos, _)| Hit { body, local_pivot: point - pos, distance })
    }

    pub fn highlight_body(&mut self, handle: BodyHandle, highlight: bool) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.highlighted = highlight;
        }
    }

    /// Force a body awake. Returns its previous activation, `None` if it is gone.
    pub fn activate_body(&mut self, handle: BodyHandle) -> Option<Activation> {
        let body = self.bodies.get_mut(handle)?;
        let saved = body.activation;
        body.wake();
        Some(saved)
    }

    /// Put back an activation saved by [`activate_body`](Self::activate_body).
    /// Missing bodies are ignored.
    pub fn restore_body_state(&mut self, handle: BodyHandle, state: Activation) {
        if let Some(body) = self.bodies.get_mut(handle) {
            match state {
                Activation::Active => body.wake(),
                Activation::Sleeping => body.sleep(),
            }
        }
    }

    /// Pin `local_pivot` on `body` to `mouse`. The mouse body is moved onto
    /// the pivot first so the grab does not jump.
    pub fn add_pivot_joint(&mut self, body: BodyHandle, mouse: BodyHandle, local_pivot: Vec2<F>) -> Option<ConstraintHandle> {
        let pivot = self.bodies.get(body)?.pos + local_pivot;
        let anchor = self.bodies.get_mut(mouse)?;
        anchor.pos = pivot;
        anchor.prev_pos = pivot;
        let joint = PivotJoint::new(body, mouse, local_pivot, self.config.pivot_stiffness);
        Some(self.joints.insert(joint))
    }

    /// Returns false when the constraint was already released.
    pub fn release_constraint(&mut self, constraint: ConstraintHandle) -> bool {
        self.joints.remove(constraint).is_some()
    }

    pub fn move_mouse_body(&mut self, mouse: BodyHandle, position: Vec2<F>) {
        if let Some(body) = self.bodies.get_mut(mouse) {
            body.move_to(position);
        }
    }

    /// Pause or resume integration. Returns the new state.
    pub fn toggle_integrate_state(&mut self) -> bool {
        self.integrating = !self.integrating;
        debug!("integration {}", if self.integrating { "resumed" } else { "paused" });
        self.integrating
    }

    pub fn toggle_debug_state(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }

    fn sub_step(&self) -> F {
        self.config.time_step / F::from_f32(self.config.sub_steps.max(1) as f32)
    }

    /// Advance the simulation by `dt` seconds of frame time.
    ///
    /// Bodies are integrated in fixed sub-steps of `time_step / sub_steps`,
    /// the same interval velocities are expressed over. Time left over is
    /// carried into the next call. Does nothing while integration is paused
    /// or when `dt` is not positive.
    pub fn step<O: StepObserver>(&mut self, dt: F, observer: &mut O) {
        if !self.integrating || !(dt > F::zero()) {
            return;
        }
        let sub_dt = self.sub_step();
        if !(sub_dt > F::zero()) {
            return;
        }
        // Absorbs rounding when dt is a multiple of the sub-step.
        let threshold = sub_dt * F::from_f32(1.0 - 1e-4);
        let max_runs = self.config.sub_steps.max(1) * MAX_CATCH_UP_STEPS;

        self.accumulator = self.accumulator + dt;
        let mut runs = 0;
        while self.accumulator >= threshold && runs < max_runs {
            self.sub_step_once(sub_dt, observer);
            self.accumulator = (self.accumulator - sub_dt).max(F::zero());
            runs += 1;
        }
        if runs == max_runs && self.accumulator >= threshold {
            trace!("dropping {:?}s of simulation time", self.accumulator);
            self.accumulator = F::zero();
        }

        if runs > 0 {
            observer.on_step_complete();
        }
    }

    fn sub_step_once<O: StepObserver>(&mut self, sub_dt: F, observer: &mut O) {
        let keys: Vec<BodyHandle> = self.bodies.keys().collect();
        let held: Vec<BodyHandle> = self.joints.values().map(|j| j.body).collect();

        let mut awake = 0;
        for body in self.bodies.values_mut() {
            body.apply_acceleration(self.config.gravity);
            body.integrate(sub_dt, self.config.damping);
            if body.is_dynamic() && !body.is_sleeping() {
                awake += 1;
            }
        }
        observer.on_integrate(awake);

        for i in 0..self.config.iterations {
            for joint in self.joints.values() {
                joint.solve(&mut self.bodies);
            }
            let contacts = solve_contacts(&mut self.bodies, &keys);
            if let Some(walls) = &self.walls {
                for body in self.bodies.values_mut() {
                    walls.solve(body);
                }
            }
            observer.on_contacts(i, contacts);
        }

        for (handle, body) in self.bodies.iter_mut() {
            if held.contains(&handle) {
                continue;
            }
            let speed = (body.pos - body.prev_pos).length() / sub_dt;
            if body.tick_idle(speed, self.config.sleep_speed, sub_dt, self.config.sleep_delay) {
                body.sleep();
                trace!("body {:?} fell asleep", handle);
                observer.on_sleep();
            }
        }
    }
}

impl<F: Float> Default for World<F> {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}
