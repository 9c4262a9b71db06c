//! Rigid circle bodies with position-based (Verlet) dynamics.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec2;

/// Whether a body takes part in integration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Activation {
    Active,
    Sleeping,
}

/// Dynamic bodies are integrated; kinematic bodies only move when told to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    Kinematic,
}

/// Collision shape, in body-local coordinates centred on the body position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape<F: Float> {
    Circle { radius: F },
}

impl<F: Float> Shape<F> {
    pub fn radius(&self) -> F {
        match *self {
            Shape::Circle { radius } => radius,
        }
    }
}

/// A body in the world. Rotation is not simulated.
#[derive(Clone, Debug)]
pub struct Body<F: Float> {
    pub pos: Vec2<F>,
    pub prev_pos: Vec2<F>,
    pub acceleration: Vec2<F>,
    pub mass: F,
    pub inv_mass: F,
    pub shape: Option<Shape<F>>,
    pub elasticity: F,
    pub friction: F,
    pub kind: BodyKind,
    pub activation: Activation,
    pub highlighted: bool,
    idle_time: F,
}

impl<F: Float> Body<F> {
    /// A dynamic circle.
    pub fn ball(pos: Vec2<F>, mass: F, radius: F, elasticity: F, friction: F) -> Result<Self, PhysicsError> {
        if !(mass.is_finite() && mass > F::zero()) {
            return Err(PhysicsError::InvalidMass);
        }
        if !(radius.is_finite() && radius > F::zero()) {
            return Err(PhysicsError::InvalidRadius);
        }
        Ok(Body {
            pos,
            prev_pos: pos,
            acceleration: Vec2::zero(),
            mass,
            inv_mass: F::one() / mass,
            shape: Some(Shape::Circle { radius }),
            elasticity: elasticity.clamp(F::zero(), F::one()),
            friction: friction.clamp(F::zero(), F::one()),
            kind: BodyKind::Dynamic,
            activation: Activation::Active,
            highlighted: false,
            idle_time: F::zero(),
        })
    }

    /// A shapeless kinematic body, used as a drag anchor.
    pub fn kinematic(pos: Vec2<F>) -> Self {
        Body {
            pos,
            prev_pos: pos,
            acceleration: Vec2::zero(),
            mass: F::zero(),
            inv_mass: F::zero(),
            shape: None,
            elasticity: F::zero(),
            friction: F::zero(),
            kind: BodyKind::Kinematic,
            activation: Activation::Active,
            highlighted: false,
            idle_time: F::zero(),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    pub fn is_sleeping(&self) -> bool {
        self.activation == Activation::Sleeping
    }

    pub fn radius(&self) -> F {
        self.shape.map_or(F::zero(), |s| s.radius())
    }

    pub fn apply_acceleration(&mut self, accel: Vec2<F>) {
        if self.is_dynamic() && !self.is_sleeping() {
            self.acceleration = self.acceleration + accel;
        }
    }

    pub fn integrate(&mut self, dt: F, damping: F) {
        if !self.is_dynamic() || self.is_sleeping() {
            return;
        }
        let velocity = (self.pos - self.prev_pos).scale(damping);
        let new_pos = self.pos + velocity + self.acceleration.scale(dt * dt);
        self.prev_pos = self.pos;
        self.pos = new_pos;
        self.acceleration = Vec2::zero();
    }

    /// Velocity implied by the last step of length `dt`.
    pub fn velocity(&self, dt: F) -> Vec2<F> {
        if dt.is_near_zero(F::from_f32(1e-30)) {
            return Vec2::zero();
        }
        (self.pos - self.prev_pos).scale(F::one() / dt)
    }

    /// Set the velocity as seen over a step of length `dt`.
    pub fn set_velocity(&mut self, velocity: Vec2<F>, dt: F) {
        self.prev_pos = self.pos - velocity.scale(dt);
        self.wake();
    }

    /// Teleport, keeping the current velocity.
    pub fn set_position(&mut self, pos: Vec2<F>) {
        let velocity = self.pos - self.prev_pos;
        self.pos = pos;
        self.prev_pos = pos - velocity;
        self.wake();
    }

    /// Move a kinematic body; the displacement becomes its velocity.
    pub fn move_to(&mut self, pos: Vec2<F>) {
        if self.kind == BodyKind::Kinematic {
            self.prev_pos = self.pos;
            self.pos = pos;
        }
    }

    pub fn wake(&mut self) {
        self.activation = Activation::Active;
        self.idle_time = F::zero();
    }

    pub fn sleep(&mut self) {
        self.activation = Activation::Sleeping;
        self.prev_pos = self.pos;
        self.acceleration = Vec2::zero();
    }

    /// Accumulate idle time; returns true when the body should fall asleep.
    pub(crate) fn tick_idle(&mut self, speed: F, threshold: F, dt: F, delay: F) -> bool {
        if !self.is_dynamic() || self.is_sleeping() || delay <= F::zero() {
            return false;
        }
        if speed < threshold {
            self.idle_time = self.idle_time + dt;
        } else {
            self.idle_time = F::zero();
        }
        self.idle_time >= delay
    }

    /// Whether `point` lies inside the body's shape. Shapeless bodies contain nothing.
    pub fn contains(&self, point: Vec2<F>) -> bool {
        match self.shape {
            Some(Shape::Circle { radius }) => self.pos.distance(point) <= radius,
            None => false,
        }
    }
}
