//! Benchmarks for world stepping and dragging.

use criterion::{criterion_group, criterion_main, Criterion};
use dragline::*;

fn filled_world(width: u32, height: u32) -> World<f32> {
    let mut world = World::new(WorldConfig::default());
    world.create_world_bounds(WindowSize::new(width, height)).unwrap();
    let config = DemoConfig::default();
    let mut rng = dragline::rng::Rng::new(config.seed);
    let r = config.ball_radius;
    for _ in 0..config.ball_count(width, height) {
        let pos = Vec2::new(rng.range(r, width as f32 - r), rng.range(r, height as f32 - r));
        let ball = world.add_ball(pos, config.ball_mass, r, config.ball_elasticity, config.ball_friction).unwrap();
        world.set_velocity(ball, Vec2::new(rng.range(-100.0, 100.0), rng.range(-100.0, 100.0))).unwrap();
    }
    world
}

fn bench_world_step(c: &mut Criterion) {
    c.bench_function("world_1080p_balls_60_steps", |b| {
        b.iter(|| {
            let mut world = filled_world(1920, 1080);
            for _ in 0..60 {
                world.step(1.0 / 60.0, &mut NoOpStepObserver);
            }
            world.body_count()
        });
    });
}

fn bench_hit_test(c: &mut Criterion) {
    let world = filled_world(1920, 1080);
    let camera = Camera::new(WindowSize::new(1920, 1080));
    c.bench_function("hit_test_1080p_grid_of_rays", |b| {
        b.iter(|| {
            let mut hits = 0;
            for y in (0..1080).step_by(60) {
                for x in (0..1920).step_by(60) {
                    let ray = camera.picking_ray(Vec2::new(x as f32, y as f32));
                    if world.hit_test(&ray).is_some() {
                        hits += 1;
                    }
                }
            }
            hits
        });
    });
}

fn bench_drag(c: &mut Criterion) {
    c.bench_function("drag_across_800x600_60_frames", |b| {
        b.iter(|| {
            let mut world = filled_world(800, 600);
            let mouse = world.add_mouse_body();
            let camera = Camera::new(WindowSize::new(800, 600));
            let physics = share(world);
            let mut controller = InteractionController::new(physics.clone(), mouse);
            controller.on_touch(&TouchEvent::new(PointState::Started, 400.0, 300.0), &camera);
            for i in 0..60 {
                let x = 100.0 + i as f32 * 10.0;
                controller.on_touch(&TouchEvent::new(PointState::Motion, x, 300.0), &camera);
                lock(&physics).step(1.0 / 60.0, &mut NoOpStepObserver);
            }
            controller.on_touch(&TouchEvent::new(PointState::Finished, 700.0, 300.0), &camera);
            controller.state()
        });
    });
}

criterion_group!(benches, bench_world_step, bench_hit_test, bench_drag);
criterion_main!(benches);
