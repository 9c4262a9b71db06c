//! Toolkit-neutral application shell.
//!
//! Demos implement [`AppHandler`]; an [`Application`] feeds it typed
//! lifecycle and input events and collects its requests (quit, keep
//! rendering, background colour) in an [`AppContext`].

use log::{debug, info};

use crate::color::Color;
use crate::input::{KeyEvent, TouchEvent, WindowSize};
use crate::interaction::RenderRequest;

/// Events an application can receive.
#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    Init,
    Terminate,
    Resize(WindowSize),
    Touch(TouchEvent),
    Key(KeyEvent),
    /// A frame tick with the elapsed time in seconds.
    Frame(f32),
}

/// Window state and the requests handlers make of the shell.
#[derive(Clone, Debug)]
pub struct AppContext {
    window: WindowSize,
    background: Color,
    render: Option<RenderRequest>,
    quit: bool,
    args: Vec<String>,
}

impl AppContext {
    pub fn window(&self) -> WindowSize { self.window }
    pub fn background(&self) -> Color { self.background }
    pub fn render_request(&self) -> Option<RenderRequest> { self.render }
    pub fn quit_requested(&self) -> bool { self.quit }
    pub fn args(&self) -> &[String] { &self.args }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn request_render(&mut self, request: RenderRequest) {
        self.render = Some(request);
    }

    pub fn keep_rendering(&mut self, hz: f32) {
        self.request_render(RenderRequest::Continuous { hz });
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }
}

/// Observer for application events. All methods default to no-ops.
pub trait AppHandler {
    /// Received once, before any other event.
    fn on_init(&mut self, _ctx: &mut AppContext) {}

    fn on_terminate(&mut self, _ctx: &mut AppContext) {}

    fn on_resize(&mut self, _ctx: &mut AppContext, _size: WindowSize) {}

    /// Returns true when the touch was consumed.
    fn on_touch(&mut self, _ctx: &mut AppContext, _touch: &TouchEvent) -> bool {
        false
    }

    fn on_key(&mut self, _ctx: &mut AppContext, _key: &KeyEvent) {}

    fn on_frame(&mut self, _ctx: &mut AppContext, _dt: f32) {}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Running,
    Terminated,
}

/// Drives one [`AppHandler`] through its lifecycle: `Init` starts it,
/// `Terminate` stops it once, and events outside `Running` are dropped.
pub struct Application<H: AppHandler> {
    handler: H,
    ctx: AppContext,
    lifecycle: Lifecycle,
}

impl<H: AppHandler> Application<H> {
    pub fn new(args: Vec<String>, window: WindowSize, handler: H) -> Self {
        Application {
            handler,
            ctx: AppContext {
                window,
                background: Color::BLACK,
                render: None,
                quit: false,
                args,
            },
            lifecycle: Lifecycle::Created,
        }
    }

    pub fn handler(&self) -> &H { &self.handler }
    pub fn handler_mut(&mut self) -> &mut H { &mut self.handler }
    pub fn context(&self) -> &AppContext { &self.ctx }
    pub fn lifecycle(&self) -> Lifecycle { self.lifecycle }

    /// Deliver one event. Events before `Init` or after `Terminate` are
    /// dropped; returns whether the event reached the handler.
    pub fn dispatch(&mut self, event: AppEvent) -> bool {
        match (self.lifecycle, event) {
            (Lifecycle::Created, AppEvent::Init) => {
                self.lifecycle = Lifecycle::Running;
                info!("application init {}x{}", self.ctx.window.width, self.ctx.window.height);
                self.handler.on_init(&mut self.ctx);
                true
            }
            (Lifecycle::Running, AppEvent::Init) => false,
            (Lifecycle::Running, AppEvent::Terminate) => {
                self.lifecycle = Lifecycle::Terminated;
                self.handler.on_terminate(&mut self.ctx);
                info!("application terminated");
                true
            }
            (Lifecycle::Running, AppEvent::Resize(size)) => {
                self.ctx.window = size;
                self.handler.on_resize(&mut self.ctx, size);
                true
            }
            (Lifecycle::Running, AppEvent::Touch(touch)) => {
                self.handler.on_touch(&mut self.ctx, &touch);
                true
            }
            (Lifecycle::Running, AppEvent::Key(key)) => {
                self.handler.on_key(&mut self.ctx, &key);
                true
            }
            (Lifecycle::Running, AppEvent::Frame(dt)) => {
                self.handler.on_frame(&mut self.ctx, dt);
                true
            }
            (state, event) => {
                debug!("dropping {:?} while {:?}", event, state);
                false
            }
        }
    }

    /// Dispatch events until they run out or the handler asks to quit,
    /// then terminate. Returns the number of events dispatched.
    pub fn run<I: IntoIterator<Item = AppEvent>>(&mut self, events: I) -> usize {
        let mut dispatched = 0;
        for event in events {
            if self.dispatch(event) {
                dispatched += 1;
            }
            if self.ctx.quit {
                info!("quit requested");
                break;
            }
        }
        if self.lifecycle == Lifecycle::Running {
            self.dispatch(AppEvent::Terminate);
        }
        dispatched
    }
}
