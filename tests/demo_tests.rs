use dragline::channel_control::{CHANNELS_UNIFORM, IMAGE_VISUAL_NAME};
use dragline::input::keycode;
use dragline::lights_demo::MAX_ACTIVE_LIGHTS;
use dragline::styling_demo::fade_transition;
use dragline::*;
use serde_json::{json, Value};

const DT: f32 = 1.0 / 60.0;

fn physics_app(width: u32, height: u32) -> Application<PhysicsDemo> {
    let mut app = Application::new(Vec::new(), WindowSize::new(width, height), PhysicsDemo::new(DemoConfig::default()));
    assert!(app.dispatch(AppEvent::Init));
    app
}

fn down(code: i32) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyState::Down, code, "", ""))
}

fn text(s: &str) -> AppEvent {
    AppEvent::Key(KeyEvent::text(KeyState::Down, s))
}

fn touch(state: PointState, x: f32, y: f32) -> AppEvent {
    AppEvent::Touch(TouchEvent::new(state, x, y))
}

#[test]
fn physics_demo_spawns_balls_for_window_area() {
    let app = physics_app(800, 600);
    let demo = app.handler();
    assert_eq!(demo.balls().len(), 34);
    // Balls plus the mouse body.
    assert_eq!(lock(demo.physics()).body_count(), 35);
    assert_eq!(app.context().background(), Color::DARK_SLATE_GRAY);
    assert_eq!(app.context().render_request(), Some(RenderRequest::Continuous { hz: 30.0 }));

    let world = lock(demo.physics());
    for &ball in demo.balls() {
        let body = world.body(ball).unwrap();
        assert_eq!(body.radius(), 26.0);
        assert!(body.pos.x >= 26.0 && body.pos.x <= 800.0 - 26.0);
        assert!(body.pos.y >= 26.0 && body.pos.y <= 600.0 - 26.0);
    }
}

#[test]
fn escape_and_back_quit() {
    for code in [keycode::ESCAPE, keycode::BACK] {
        let mut app = physics_app(320, 240);
        app.dispatch(down(code));
        assert!(app.context().quit_requested());
    }
}

#[test]
fn run_stops_at_quit_and_terminates() {
    let mut app = Application::new(Vec::new(), WindowSize::new(320, 240), PhysicsDemo::new(DemoConfig::default()));
    let events = vec![AppEvent::Init, AppEvent::Frame(DT), down(keycode::ESCAPE), AppEvent::Frame(DT)];
    assert_eq!(app.run(events), 3);
    assert_eq!(app.lifecycle(), Lifecycle::Terminated);
    assert!(app.handler().balls().is_empty());
}

#[test]
fn terminate_removes_balls_and_mouse_body() {
    let mut app = physics_app(320, 240);
    let mouse = app.handler().controller().unwrap().mouse_body();
    assert!(lock(app.handler().physics()).body(mouse).is_some());

    app.dispatch(AppEvent::Terminate);
    let world = lock(app.handler().physics());
    assert!(world.body(mouse).is_none());
    assert_eq!(world.body_count(), 0);
}

#[test]
fn space_pauses_and_m_toggles_debug() {
    let mut app = physics_app(320, 240);
    app.dispatch(text(" "));
    assert!(!lock(app.handler().physics()).is_integrating());

    let before: Vec<_> = {
        let world = lock(app.handler().physics());
        let positions = app.handler().balls().iter().map(|&b| world.position(b).unwrap()).collect();
        positions
    };
    app.dispatch(AppEvent::Frame(DT));
    let world = lock(app.handler().physics());
    for (&b, p) in app.handler().balls().iter().zip(before) {
        assert_eq!(world.position(b).unwrap(), p);
    }
    drop(world);

    app.dispatch(text("m"));
    assert!(lock(app.handler().physics()).is_debug());
    app.dispatch(text(" "));
    app.dispatch(AppEvent::Frame(DT));
    assert_eq!(app.handler().stats().steps, 1);
}

#[test]
fn touch_on_a_ball_grabs_it_and_release_lets_go() {
    let mut app = physics_app(800, 600);
    let (ball, screen) = {
        let demo = app.handler();
        let world = lock(demo.physics());
        let ball = demo.balls()[0];
        let screen = world.translate_from_physics_space(world.position(ball).unwrap());
        (ball, screen)
    };

    app.dispatch(touch(PointState::Started, screen.x, screen.y));
    let controller = app.handler().controller().unwrap();
    assert_eq!(controller.state(), InteractionState::DraggingPivot);
    assert_eq!(controller.grab().map(|g| g.body), Some(ball));

    app.dispatch(touch(PointState::Motion, 400.0, 300.0));
    app.dispatch(AppEvent::Frame(DT));
    app.dispatch(touch(PointState::Finished, 400.0, 300.0));
    let controller = app.handler().controller().unwrap();
    assert_eq!(controller.state(), InteractionState::Idle);
    assert_eq!(lock(app.handler().physics()).constraint_count(), 0);
}

#[test]
fn ctrl_touch_pans_instead_of_grabbing() {
    let mut app = physics_app(800, 600);
    let screen = {
        let demo = app.handler();
        let world = lock(demo.physics());
        let screen = world.translate_from_physics_space(world.position(demo.balls()[0]).unwrap());
        screen
    };
    app.dispatch(down(keycode::CONTROL_RIGHT));
    app.dispatch(touch(PointState::Started, screen.x, screen.y));
    let controller = app.handler().controller().unwrap();
    assert_eq!(controller.state(), InteractionState::PanningCamera);
    assert!(controller.grab().is_none());
}

#[test]
fn terminate_drops_an_active_grab() {
    let mut app = physics_app(800, 600);
    let screen = {
        let demo = app.handler();
        let world = lock(demo.physics());
        let screen = world.translate_from_physics_space(world.position(demo.balls()[0]).unwrap());
        screen
    };
    app.dispatch(touch(PointState::Started, screen.x, screen.y));
    app.dispatch(AppEvent::Terminate);
    assert!(app.handler().controller().unwrap().grab().is_none());
    assert_eq!(lock(app.handler().physics()).constraint_count(), 0);
}

#[test]
fn lighting_keys_switch_lights_and_image_based_light() {
    let mut app = Application::new(Vec::new(), WindowSize::new(800, 600), LightingDemo::new("images", "models"));
    app.dispatch(AppEvent::Init);
    let active = |app: &Application<LightingDemo>| app.handler().scene().active_lights().len();
    assert_eq!(active(&app), MAX_ACTIVE_LIGHTS);
    assert_eq!(app.handler().scene().background, Color::BEIGE);
    assert_eq!(app.context().background(), Color::WHITE);

    app.dispatch(text("1"));
    let scene = app.handler().scene();
    assert_eq!(scene.image_based_light().map(|i| i.scale_factor), Some(0.6));
    let (l1, l2, l6) = (app.handler().light(1).unwrap(), app.handler().light(2).unwrap(), app.handler().light(6).unwrap());
    assert!(!scene.is_active(l1) && !scene.is_active(l2));
    assert!(scene.is_active(l6));
    assert_eq!(active(&app), 4);

    app.dispatch(text("0"));
    let scene = app.handler().scene();
    assert!(scene.image_based_light().is_none());
    assert_eq!(active(&app), MAX_ACTIVE_LIGHTS);
    assert!(scene.is_active(l1) && scene.is_active(l2));
    assert!(!scene.is_active(l6));
}

#[test]
fn orbiting_light_circles_the_y_axis() {
    let mut app = Application::new(Vec::new(), WindowSize::new(800, 600), LightingDemo::new("images", "models"));
    app.dispatch(AppEvent::Init);
    let l1 = app.handler().light(1).unwrap();
    let start = app.handler().scene().light(l1).unwrap().position;

    // A quarter of the three second loop.
    for _ in 0..45 {
        app.dispatch(AppEvent::Frame(DT));
    }
    let quarter = app.handler().scene().light(l1).unwrap().position;
    assert!((quarter.y - start.y).abs() < 1e-4);
    assert!((quarter.length() - start.length()).abs() < 1e-3);
    assert!((quarter - start).length() > 1.0);
}

#[test]
fn channel_control_commits_visibility_after_fade() {
    let mut control = ImageChannelControl::new("image");
    control.set_property(PropertyIndex::ResourceUrl, &json!("gallery.jpg"));
    control.set_property(PropertyIndex::DisableVisibilityTransition, &fade_transition(1.0, 0.0, 0.5));
    control.set_property(PropertyIndex::EnableVisibilityTransition, &fade_transition(0.0, 1.0, 0.5));

    control.set_property(PropertyIndex::Visibility, &json!(false));
    assert!(control.is_animating());
    assert_eq!(control.get_property(PropertyIndex::Visibility), Some(Value::Bool(true)));

    control.tick(0.3);
    assert!(control.visibility());
    control.tick(0.3);
    assert!(!control.is_animating());
    assert_eq!(control.get_property(PropertyIndex::Visibility), Some(Value::Bool(false)));
}

#[test]
fn channel_control_interrupted_fade_commits_first() {
    let mut control = ImageChannelControl::new("image");
    control.set_image("gallery.jpg");
    control.set_property(PropertyIndex::DisableVisibilityTransition, &fade_transition(1.0, 0.0, 0.5));
    control.set_property(PropertyIndex::EnableVisibilityTransition, &fade_transition(0.0, 1.0, 0.5));

    control.set_visibility(false);
    control.tick(0.1);
    // Cutting the fade short commits `false`, then fading back in holds `true`.
    control.set_visibility(true);
    assert!(control.is_animating());
    assert!(!control.visibility());
    assert_eq!(control.pending_visibility(), Some(true));
    control.tick(1.0);
    assert!(control.visibility());
}

#[test]
fn channel_control_without_transition_commits_immediately() {
    let mut control = ImageChannelControl::new("image");
    control.set_visibility(false);
    assert!(!control.is_animating());
    assert!(!control.visibility());

    // An empty descriptor counts as no transition.
    control.set_property(PropertyIndex::EnableVisibilityTransition, &json!([]));
    control.set_visibility(true);
    assert!(control.visibility());
}

#[test]
fn channel_control_properties() {
    let mut control = ImageChannelControl::new("image");
    assert_eq!(control.get_property(PropertyIndex::GreenChannel), Some(json!(1.0)));

    control.set_property(PropertyIndex::RedChannel, &json!(0.25));
    control.set_property(PropertyIndex::BlueChannel, &json!(0));
    // Wrong type: ignored.
    control.set_property(PropertyIndex::GreenChannel, &json!("half"));
    assert_eq!(control.channels(), [0.25, 1.0, 0.0]);
    assert_eq!(control.uniforms(), [(CHANNELS_UNIFORM, [0.25, 1.0, 0.0])]);

    assert!(control.set_property_by_name("visibility", &json!(false)));
    assert!(!control.set_property_by_name("opacity", &json!(0.5)));
    assert_eq!(control.get_property(PropertyIndex::ResourceUrl), None);
    assert_eq!(control.get_property(PropertyIndex::ImageVisual), None);

    assert_eq!(control.natural_size(), (0.0, 0.0));
    let visual = json!({ "url": "big.png", "desiredWidth": 320, "desiredHeight": 200.0 });
    control.set_property(PropertyIndex::ImageVisual, &visual);
    assert_eq!(control.natural_size(), (320.0, 200.0));
    assert_eq!(control.visual().map(|v| v.name.as_str()), Some(IMAGE_VISUAL_NAME));
    assert!(control.take_relayout_request());
    assert!(!control.take_relayout_request());
}

#[test]
fn styling_demo_keys_drive_controls() {
    let mut app = Application::new(Vec::new(), WindowSize::new(480, 800), StylingDemo::new("gallery.jpg"));
    app.dispatch(AppEvent::Init);
    assert_eq!(app.handler().controls().len(), 1);

    app.dispatch(text("r"));
    assert_eq!(app.handler().controls()[0].channels()[0], 0.75);

    app.dispatch(text("v"));
    assert!(app.handler().controls()[0].is_animating());
    for _ in 0..60 {
        app.dispatch(AppEvent::Frame(DT));
    }
    assert!(!app.handler().controls()[0].visibility());

    app.dispatch(down(keycode::ESCAPE));
    assert!(app.context().quit_requested());
}
