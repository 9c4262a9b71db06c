use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::{info, warn};

use dragline::{
    lock, AppEvent, AppHandler, Application, DemoConfig, KeyEvent, KeyState, LightingDemo, PhysicsDemo,
    PhysicsError, PointState, StylingDemo, TouchEvent, Vec2, WindowSize,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Demo {
    Physics,
    Lights,
    Styling,
}

#[derive(Parser)]
#[command(name = "dragline")]
#[command(about = "Run a demo scene headless over a scripted event sequence", long_about = None)]
#[command(version)]
struct Cli {
    /// Which demo to run
    #[arg(long, value_enum, default_value = "physics")]
    demo: Demo,

    /// Window width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Frames to simulate before and after each scripted interaction
    #[arg(long, default_value = "120")]
    frames: usize,

    /// Seed for scene assembly
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding images and models
    #[arg(long, default_value = "resources")]
    assets: PathBuf,

    /// Arguments passed through to the application
    #[arg(last = true)]
    passthrough: Vec<String>,
}

const FRAME_DT: f32 = 1.0 / 60.0;

fn frames(n: usize) -> impl Iterator<Item = AppEvent> {
    std::iter::repeat(AppEvent::Frame(FRAME_DT)).take(n)
}

fn key(text: &str) -> [AppEvent; 2] {
    [
        AppEvent::Key(KeyEvent::text(KeyState::Down, text)),
        AppEvent::Key(KeyEvent::text(KeyState::Up, text)),
    ]
}

fn run_physics(cli: &Cli, window: WindowSize) {
    let mut config = DemoConfig::default();
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    let mut app = Application::new(cli.passthrough.clone(), window, PhysicsDemo::new(config));
    app.dispatch(AppEvent::Init);
    for event in frames(cli.frames) {
        app.dispatch(event);
    }

    // Grab the first ball where it currently is and drag it to the centre.
    let grab_at = {
        let demo = app.handler();
        let world = lock(demo.physics());
        let at = demo
            .balls()
            .first()
            .and_then(|&ball| world.position(ball).ok())
            .map(|p| world.translate_from_physics_space(p));
        at
    };
    match grab_at {
        Some(start) => {
            let centre = Vec2::new(window.width as f32 / 2.0, window.height as f32 / 2.0);
            app.dispatch(AppEvent::Touch(TouchEvent::new(PointState::Started, start.x, start.y)));
            for i in 1..=10 {
                let t = i as f32 / 10.0;
                let p = start + (centre - start).scale(t);
                app.dispatch(AppEvent::Touch(TouchEvent::new(PointState::Motion, p.x, p.y)));
                app.dispatch(AppEvent::Frame(FRAME_DT));
            }
            let grabbed = app.handler().controller().and_then(|c| c.grab()).is_some();
            info!("drag to centre: {}", if grabbed { "holding" } else { "missed" });
            app.dispatch(AppEvent::Touch(TouchEvent::new(PointState::Finished, centre.x, centre.y)));
        }
        None => warn!("no ball to drag"),
    }
    app.run(frames(cli.frames));
    log_summary(&app);

    let demo = app.handler();
    let stats = demo.stats();
    info!(
        "{} steps, {} sub-steps, {} contacts, {} sleeps",
        stats.steps, stats.sub_steps, stats.contacts, stats.sleeps
    );
}

fn run_lights(cli: &Cli, window: WindowSize) {
    let demo = LightingDemo::new(cli.assets.join("images"), cli.assets.join("models"));
    let mut app = Application::new(cli.passthrough.clone(), window, demo);
    app.dispatch(AppEvent::Init);
    for name in ["1", "2", "3", "4", "5", "6", "0"] {
        for event in key(name).into_iter().chain(frames(cli.frames)) {
            app.dispatch(event);
        }
        let scene = app.handler().scene();
        info!(
            "key {}: {} active lights, image-based light {:?}",
            name,
            scene.active_lights().len(),
            scene.image_based_light().map(|ibl| ibl.scale_factor)
        );
    }
    app.run(std::iter::empty());
    log_summary(&app);
}

fn run_styling(cli: &Cli, window: WindowSize) {
    let image = cli.assets.join("images").join("gallery-small-1.jpg");
    let demo = StylingDemo::new(image.to_string_lossy().into_owned());
    let mut app = Application::new(cli.passthrough.clone(), window, demo);
    app.dispatch(AppEvent::Init);
    for name in ["r", "g", "v", "b", "v"] {
        for event in key(name).into_iter().chain(frames(cli.frames)) {
            app.dispatch(event);
        }
        for control in app.handler().controls() {
            info!("key {}: {} channels {:?} visible {}", name, control.name(), control.channels(), control.visibility());
        }
    }
    app.run(std::iter::empty());
    log_summary(&app);
}

fn log_summary<H: AppHandler>(app: &Application<H>) {
    info!("background {:?}, lifecycle {:?}", app.context().background(), app.lifecycle());
}

fn main() -> Result<(), PhysicsError> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if cli.width == 0 || cli.height == 0 {
        return Err(PhysicsError::InvalidViewport { width: cli.width, height: cli.height });
    }
    let window = WindowSize::new(cli.width, cli.height);
    info!("running {:?} demo at {}x{}", cli.demo, window.width, window.height);

    match cli.demo {
        Demo::Physics => run_physics(&cli, window),
        Demo::Lights => run_lights(&cli, window),
        Demo::Styling => run_styling(&cli, window),
    }
    Ok(())
}
