use dragline::backend::{lock, share, PhysicsBackend, SharedPhysics};
use dragline::camera::Camera;
use dragline::input::{keycode, KeyEvent, KeyState, PointState, TouchEvent, WindowSize};
use dragline::interaction::{InteractionController, InteractionState, RenderRequest};
use dragline::vec::{Ray, Vec2};
use dragline::world::{BodyHandle, ConstraintHandle, Hit};
use dragline::Activation;
use slotmap::SlotMap;

struct MockBody {
    activation: Activation,
    highlighted: bool,
}

/// Backend that reports a scripted hit and records what was asked of it.
#[derive(Default)]
struct MockPhysics {
    bodies: SlotMap<BodyHandle, MockBody>,
    constraints: SlotMap<ConstraintHandle, BodyHandle>,
    next_hit: Option<Hit<f32>>,
    constraints_created: usize,
    constraints_released: usize,
    mouse_moves: Vec<Vec2<f32>>,
}

impl MockPhysics {
    fn add_body(&mut self, activation: Activation) -> BodyHandle {
        self.bodies.insert(MockBody { activation, highlighted: false })
    }

    fn aim_at(&mut self, body: BodyHandle) {
        self.next_hit = Some(Hit { body, local_pivot: Vec2::new(3.0, -4.0), distance: 500.0 });
    }
}

impl PhysicsBackend for MockPhysics {
    type Scalar = f32;

    fn hit_test(&self, _ray: &Ray<f32>) -> Option<Hit<f32>> {
        self.next_hit
    }

    fn highlight_body(&mut self, body: BodyHandle, highlight: bool) {
        if let Some(b) = self.bodies.get_mut(body) {
            b.highlighted = highlight;
        }
    }

    fn activate_body(&mut self, body: BodyHandle) -> Option<Activation> {
        let b = self.bodies.get_mut(body)?;
        let saved = b.activation;
        b.activation = Activation::Active;
        Some(saved)
    }

    fn restore_body_state(&mut self, body: BodyHandle, state: Activation) {
        if let Some(b) = self.bodies.get_mut(body) {
            b.activation = state;
        }
    }

    fn add_pivot_joint(&mut self, body: BodyHandle, _mouse: BodyHandle, _local_pivot: Vec2<f32>) -> Option<ConstraintHandle> {
        self.bodies.get(body)?;
        self.constraints_created += 1;
        Some(self.constraints.insert(body))
    }

    fn release_constraint(&mut self, constraint: ConstraintHandle) -> bool {
        let released = self.constraints.remove(constraint).is_some();
        if released {
            self.constraints_released += 1;
        }
        released
    }

    fn translate_to_physics_space(&self, screen: Vec2<f32>) -> Vec2<f32> {
        Vec2::new(screen.x, 600.0 - screen.y)
    }

    fn move_mouse_body(&mut self, _mouse: BodyHandle, position: Vec2<f32>) {
        self.mouse_moves.push(position);
    }
}

struct Rig {
    physics: SharedPhysics<MockPhysics>,
    controller: InteractionController<MockPhysics>,
    camera: Camera<f32>,
}

fn rig() -> Rig {
    let mut mock = MockPhysics::default();
    let mouse = mock.add_body(Activation::Active);
    let physics = share(mock);
    let controller = InteractionController::new(physics.clone(), mouse);
    Rig { physics, controller, camera: Camera::new(WindowSize::new(800, 600)) }
}

impl Rig {
    fn touch(&mut self, state: PointState, x: f32, y: f32) {
        let response = self.controller.on_touch(&TouchEvent::new(state, x, y), &self.camera);
        assert!(response.consumed);
    }

    fn key(&mut self, state: KeyState, code: i32) {
        self.controller.on_key(&KeyEvent::new(state, code, "", ""));
    }

    fn body(&mut self, activation: Activation) -> BodyHandle {
        lock(&self.physics).add_body(activation)
    }
}

#[test]
fn pick_with_hit_starts_dragging_with_one_constraint() {
    let mut rig = rig();
    let ball = rig.body(Activation::Active);
    lock(&rig.physics).aim_at(ball);

    rig.touch(PointState::Started, 100.0, 100.0);

    assert_eq!(rig.controller.state(), InteractionState::DraggingPivot);
    let grab = rig.controller.grab().expect("grab recorded");
    assert_eq!(grab.body, ball);
    let physics = lock(&rig.physics);
    assert_eq!(physics.constraints_created, 1);
    assert_eq!(physics.constraints.len(), 1);
    assert!(physics.bodies[ball].highlighted);
}

#[test]
fn ctrl_pans_regardless_of_hit() {
    for aimed in [false, true] {
        let mut rig = rig();
        let ball = rig.body(Activation::Active);
        if aimed {
            lock(&rig.physics).aim_at(ball);
        }
        rig.key(KeyState::Down, keycode::CONTROL_LEFT);
        rig.touch(PointState::Started, 10.0, 10.0);

        assert_eq!(rig.controller.state(), InteractionState::PanningCamera);
        assert!(rig.controller.grab().is_none());
        assert_eq!(lock(&rig.physics).constraints_created, 0);

        rig.touch(PointState::Motion, 20.0, 20.0);
        assert!(lock(&rig.physics).mouse_moves.is_empty());
        rig.touch(PointState::Finished, 20.0, 20.0);
        assert_eq!(rig.controller.state(), InteractionState::Idle);
    }
}

#[test]
fn miss_stays_idle() {
    let mut rig = rig();
    rig.touch(PointState::Started, 100.0, 100.0);
    assert_eq!(rig.controller.state(), InteractionState::Idle);
    assert!(rig.controller.grab().is_none());
    assert_eq!(lock(&rig.physics).constraints_created, 0);
}

#[test]
fn release_clears_references_exactly_once() {
    for end in [PointState::Finished, PointState::Interrupted] {
        let mut rig = rig();
        let ball = rig.body(Activation::Active);
        lock(&rig.physics).aim_at(ball);
        rig.touch(PointState::Started, 100.0, 100.0);

        rig.touch(end, 100.0, 100.0);
        rig.touch(end, 100.0, 100.0);

        assert_eq!(rig.controller.state(), InteractionState::Idle);
        assert!(rig.controller.grab().is_none());
        let physics = lock(&rig.physics);
        assert_eq!(physics.constraints_released, 1);
        assert!(physics.constraints.is_empty());
        assert!(!physics.bodies[ball].highlighted);
    }
}

#[test]
fn activation_is_restored_on_release() {
    for initial in [Activation::Active, Activation::Sleeping] {
        let mut rig = rig();
        let ball = rig.body(initial);
        lock(&rig.physics).aim_at(ball);

        rig.touch(PointState::Started, 100.0, 100.0);
        assert_eq!(rig.controller.grab().map(|g| g.saved), Some(initial));
        assert_eq!(lock(&rig.physics).bodies[ball].activation, Activation::Active);

        rig.touch(PointState::Finished, 100.0, 100.0);
        assert_eq!(lock(&rig.physics).bodies[ball].activation, initial);
    }
}

#[test]
fn start_while_dragging_is_ignored() {
    let mut rig = rig();
    let first = rig.body(Activation::Active);
    let second = rig.body(Activation::Active);
    lock(&rig.physics).aim_at(first);
    rig.touch(PointState::Started, 100.0, 100.0);

    lock(&rig.physics).aim_at(second);
    rig.touch(PointState::Started, 200.0, 200.0);

    assert_eq!(rig.controller.state(), InteractionState::DraggingPivot);
    assert_eq!(rig.controller.grab().map(|g| g.body), Some(first));
    assert_eq!(lock(&rig.physics).constraints_created, 1);
}

#[test]
fn motion_moves_mouse_body_unless_shift_held() {
    let mut rig = rig();
    let ball = rig.body(Activation::Active);
    lock(&rig.physics).aim_at(ball);
    rig.touch(PointState::Started, 100.0, 100.0);

    rig.touch(PointState::Motion, 150.0, 120.0);
    assert_eq!(lock(&rig.physics).mouse_moves, vec![Vec2::new(150.0, 480.0)]);

    rig.key(KeyState::Down, keycode::SHIFT_RIGHT);
    rig.touch(PointState::Motion, 300.0, 300.0);
    assert_eq!(lock(&rig.physics).mouse_moves.len(), 1);
    assert_eq!(rig.controller.state(), InteractionState::DraggingPivot);

    rig.key(KeyState::Up, keycode::SHIFT_RIGHT);
    rig.touch(PointState::Motion, 310.0, 300.0);
    assert_eq!(lock(&rig.physics).mouse_moves.len(), 2);
}

#[test]
fn release_tolerates_vanished_body_and_constraint() {
    let mut rig = rig();
    let ball = rig.body(Activation::Sleeping);
    lock(&rig.physics).aim_at(ball);
    rig.touch(PointState::Started, 100.0, 100.0);

    {
        let mut physics = lock(&rig.physics);
        physics.bodies.remove(ball);
        physics.constraints.clear();
    }
    rig.touch(PointState::Finished, 100.0, 100.0);

    assert_eq!(rig.controller.state(), InteractionState::Idle);
    assert!(rig.controller.grab().is_none());
    assert_eq!(lock(&rig.physics).constraints_released, 0);
}

#[test]
fn every_touch_requests_continuous_rendering() {
    let mut rig = rig();
    let camera = rig.camera.clone();
    let response = rig.controller.on_touch(&TouchEvent::new(PointState::Motion, 1.0, 1.0), &camera);
    assert_eq!(response.render, Some(RenderRequest::Continuous { hz: 30.0 }));

    let mut slow = InteractionController::new(rig.physics.clone(), rig.controller.mouse_body()).with_render_rate(10.0);
    let response = slow.on_touch(&TouchEvent::new(PointState::Started, 1.0, 1.0), &camera);
    assert_eq!(response.render, Some(RenderRequest::Continuous { hz: 10.0 }));
}
