//! Pointer-driven pick and drag of physics bodies.
//!
//! The state machine itself is [`InteractionState::on_pointer`], a pure
//! function of the current state, the pointer phase and the held modifiers.
//! [`InteractionController`] applies the resulting [`Effect`] to a
//! [`PhysicsBackend`], always under the shared physics lock.

use log::{debug, trace};

use crate::backend::{lock, PhysicsBackend, SharedPhysics};
use crate::body::Activation;
use crate::camera::Camera;
use crate::float::Float;
use crate::input::{KeyEvent, Modifiers, PointState, TouchEvent};
use crate::vec::{Ray, Vec2};
use crate::world::{BodyHandle, ConstraintHandle};

/// Default refresh rate requested while the pointer is interacting.
pub const DEFAULT_RENDER_RATE_HZ: f32 = 30.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionState {
    #[default]
    Idle,
    DraggingPivot,
    /// Accepted but inert: camera motion is not implemented.
    PanningCamera,
}

/// Side effect requested by a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Hit-test and grab. Provisional: a miss sends the controller back to Idle.
    Pick,
    /// Move the mouse body under the pointer.
    Drag,
    /// Drop the grab.
    Release,
}

impl InteractionState {
    /// Next state and the effect to apply for one pointer phase.
    ///
    /// Ctrl on press pans the camera; a plain press enters `DraggingPivot`
    /// with [`Effect::Pick`]. That transition is provisional: the controller
    /// hit-tests under the lock and falls back to `Idle` when nothing is hit.
    /// A finished or interrupted pointer returns to `Idle`.
    pub fn on_pointer(self, phase: PointState, modifiers: Modifiers) -> (Self, Effect) {
        use InteractionState::*;
        match (self, phase) {
            (Idle, PointState::Started) if modifiers.ctrl => (PanningCamera, Effect::None),
            (Idle, PointState::Started) => (DraggingPivot, Effect::Pick),
            // Shift reserves the alternate drag plane, which does nothing yet.
            (DraggingPivot, PointState::Motion) if !modifiers.shift => (DraggingPivot, Effect::Drag),
            (DraggingPivot, p) if p.is_end() => (Idle, Effect::Release),
            (PanningCamera, p) if p.is_end() => (Idle, Effect::None),
            (state, _) => (state, Effect::None),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RenderRequest {
    Continuous { hz: f32 },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchResponse {
    pub consumed: bool,
    pub render: Option<RenderRequest>,
}

/// The body being dragged, its pivot joint, and the activation to restore.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grab {
    pub body: BodyHandle,
    pub constraint: ConstraintHandle,
    pub saved: Activation,
}

/// Turns touch and modifier-key events into body picks and drags.
///
/// Holds a grab if and only if the state is [`InteractionState::DraggingPivot`].
pub struct InteractionController<B: PhysicsBackend> {
    physics: SharedPhysics<B>,
    mouse_body: BodyHandle,
    state: InteractionState,
    grab: Option<Grab>,
    modifiers: Modifiers,
    render_rate_hz: f32,
}

impl<B: PhysicsBackend> InteractionController<B> {
    pub fn new(physics: SharedPhysics<B>, mouse_body: BodyHandle) -> Self {
        InteractionController {
            physics,
            mouse_body,
            state: InteractionState::Idle,
            grab: None,
            modifiers: Modifiers::default(),
            render_rate_hz: DEFAULT_RENDER_RATE_HZ,
        }
    }

    pub fn with_render_rate(mut self, hz: f32) -> Self {
        self.render_rate_hz = hz;
        self
    }

    pub fn state(&self) -> InteractionState { self.state }
    pub fn grab(&self) -> Option<Grab> { self.grab }
    pub fn modifiers(&self) -> Modifiers { self.modifiers }
    pub fn mouse_body(&self) -> BodyHandle { self.mouse_body }
    pub fn physics(&self) -> &SharedPhysics<B> { &self.physics }

    /// Track modifier keys. Returns true when the key was a modifier.
    pub fn on_key(&mut self, event: &KeyEvent) -> bool {
        self.modifiers.apply(event)
    }

    pub fn on_touch(&mut self, touch: &TouchEvent, camera: &Camera<B::Scalar>) -> TouchResponse {
        let previous = self.state;
        let (next, effect) = previous.on_pointer(touch.state, self.modifiers);
        let screen = Vec2::new(B::Scalar::from_f32(touch.screen.x), B::Scalar::from_f32(touch.screen.y));

        self.state = match effect {
            Effect::Pick => {
                if self.pick(&camera.picking_ray(screen)) {
                    next
                } else {
                    InteractionState::Idle
                }
            }
            Effect::Drag => {
                self.drag(screen);
                next
            }
            Effect::Release => {
                self.release();
                next
            }
            Effect::None => next,
        };

        if previous != self.state {
            debug!("interaction {:?} -> {:?}", previous, self.state);
        }

        TouchResponse {
            consumed: true,
            render: Some(RenderRequest::Continuous { hz: self.render_rate_hz }),
        }
    }

    /// Drop any grab and return to Idle, e.g. when the window goes away.
    pub fn cancel(&mut self) {
        self.release();
        self.state = InteractionState::Idle;
    }

    fn pick(&mut self, ray: &Ray<B::Scalar>) -> bool {
        let mut physics = lock(&self.physics);
        let Some(hit) = physics.hit_test(ray) else {
            trace!("pick missed");
            return false;
        };
        let Some(saved) = physics.activate_body(hit.body) else {
            return false;
        };
        let Some(constraint) = physics.add_pivot_joint(hit.body, self.mouse_body, hit.local_pivot) else {
            physics.restore_body_state(hit.body, saved);
            return false;
        };
        physics.highlight_body(hit.body, true);
        self.grab = Some(Grab { body: hit.body, constraint, saved });
        trace!("picked {:?} at {:?}, was {:?}", hit.body, hit.local_pivot, saved);
        true
    }

    fn drag(&mut self, screen: Vec2<B::Scalar>) {
        if self.grab.is_none() {
            return;
        }
        let mut physics = lock(&self.physics);
        let target = physics.translate_to_physics_space(screen);
        physics.move_mouse_body(self.mouse_body, target);
    }

    fn release(&mut self) {
        let Some(grab) = self.grab.take() else {
            return;
        };
        let mut physics = lock(&self.physics);
        physics.highlight_body(grab.body, false);
        physics.restore_body_state(grab.body, grab.saved);
        if !physics.release_constraint(grab.constraint) {
            trace!("constraint {:?} was already released", grab.constraint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: Modifiers = Modifiers { ctrl: false, alt: false, shift: false };
    const CTRL: Modifiers = Modifiers { ctrl: true, alt: false, shift: false };
    const SHIFT: Modifiers = Modifiers { ctrl: false, alt: false, shift: true };

    #[test]
    fn idle_start_picks_or_pans() {
        assert_eq!(
            InteractionState::Idle.on_pointer(PointState::Started, NONE),
            (InteractionState::DraggingPivot, Effect::Pick)
        );
        assert_eq!(
            InteractionState::Idle.on_pointer(PointState::Started, CTRL),
            (InteractionState::PanningCamera, Effect::None)
        );
    }

    #[test]
    fn drag_motion_respects_shift() {
        let s = InteractionState::DraggingPivot;
        assert_eq!(s.on_pointer(PointState::Motion, NONE), (s, Effect::Drag));
        assert_eq!(s.on_pointer(PointState::Motion, SHIFT), (s, Effect::None));
    }

    #[test]
    fn end_phases_return_to_idle() {
        for phase in [PointState::Finished, PointState::Interrupted] {
            assert_eq!(
                InteractionState::DraggingPivot.on_pointer(phase, NONE),
                (InteractionState::Idle, Effect::Release)
            );
            assert_eq!(
                InteractionState::PanningCamera.on_pointer(phase, CTRL),
                (InteractionState::Idle, Effect::None)
            );
            assert_eq!(
                InteractionState::Idle.on_pointer(phase, NONE),
                (InteractionState::Idle, Effect::None)
            );
        }
    }

    #[test]
    fn start_is_ignored_outside_idle() {
        for s in [InteractionState::DraggingPivot, InteractionState::PanningCamera] {
            assert_eq!(s.on_pointer(PointState::Started, NONE), (s, Effect::None));
            assert_eq!(s.on_pointer(PointState::Stationary, NONE), (s, Effect::None));
        }
    }
}
