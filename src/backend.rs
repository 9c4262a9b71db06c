//! The physics operations the interaction controller needs, and the shared lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::body::Activation;
use crate::float::Float;
use crate::vec::{Ray, Vec2};
use crate::world::{BodyHandle, ConstraintHandle, Hit, World};

/// What the pick/drag controller asks of a physics engine.
///
/// Handles are non-owning: every method must tolerate handles whose body or
/// constraint no longer exists.
pub trait PhysicsBackend {
    type Scalar: Float;

    fn hit_test(&self, ray: &Ray<Self::Scalar>) -> Option<Hit<Self::Scalar>>;
    fn highlight_body(&mut self, body: BodyHandle, highlight: bool);
    fn activate_body(&mut self, body: BodyHandle) -> Option<Activation>;
    fn restore_body_state(&mut self, body: BodyHandle, state: Activation);
    fn add_pivot_joint(
        &mut self,
        body: BodyHandle,
        mouse: BodyHandle,
        local_pivot: Vec2<Self::Scalar>,
    ) -> Option<ConstraintHandle>;
    fn release_constraint(&mut self, constraint: ConstraintHandle) -> bool;
    fn translate_to_physics_space(&self, screen: Vec2<Self::Scalar>) -> Vec2<Self::Scalar>;
    fn move_mouse_body(&mut self, mouse: BodyHandle, position: Vec2<Self::Scalar>);
}

impl<F: Float> PhysicsBackend for World<F> {
    type Scalar = F;

    fn hit_test(&self, ray: &Ray<F>) -> Option<Hit<F>> {
        World::hit_test(self, ray)
    }

    fn highlight_body(&mut self, body: BodyHandle, highlight: bool) {
        World::highlight_body(self, body, highlight)
    }

    fn activate_body(&mut self, body: BodyHandle) -> Option<Activation> {
        World::activate_body(self, body)
    }

    fn restore_body_state(&mut self, body: BodyHandle, state: Activation) {
        World::restore_body_state(self, body, state)
    }

    fn add_pivot_joint(&mut self, body: BodyHandle, mouse: BodyHandle, local_pivot: Vec2<F>) -> Option<ConstraintHandle> {
        World::add_pivot_joint(self, body, mouse, local_pivot)
    }

    fn release_constraint(&mut self, constraint: ConstraintHandle) -> bool {
        World::release_constraint(self, constraint)
    }

    fn translate_to_physics_space(&self, screen: Vec2<F>) -> Vec2<F> {
        World::translate_to_physics_space(self, screen)
    }

    fn move_mouse_body(&mut self, mouse: BodyHandle, position: Vec2<F>) {
        World::move_mouse_body(self, mouse, position)
    }
}

/// A backend shared between the stepping code and the interaction controller.
pub type SharedPhysics<B> = Arc<Mutex<B>>;

pub fn share<B>(backend: B) -> SharedPhysics<B> {
    Arc::new(Mutex::new(backend))
}

/// Take the physics lock, ignoring poisoning.
pub fn lock<B>(shared: &Mutex<B>) -> MutexGuard<'_, B> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
