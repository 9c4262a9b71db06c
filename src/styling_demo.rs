//! Hosts image channel controls and drives them from the keyboard.
//!
//! `v` toggles visibility with a fade, `r`/`g`/`b` cycle the colour
//! channels, Escape quits.

use log::{debug, info};
use serde_json::{json, Value};

use crate::app::{AppContext, AppHandler};
use crate::channel_control::{ImageChannelControl, PropertyIndex, IMAGE_VISUAL_NAME};
use crate::color::Color;
use crate::input::KeyEvent;

const FADE_SECONDS: f32 = 0.4;
const CHANNEL_STEP: f32 = 0.25;

/// Animator map fading the image's opacity between two values.
pub fn fade_transition(from: f32, to: f32, duration: f32) -> Value {
    json!([{
        "target": IMAGE_VISUAL_NAME,
        "property": "opacity",
        "initialValue": from,
        "targetValue": to,
        "animator": {
            "alphaFunction": "EASE_IN_OUT",
            "timePeriod": { "duration": duration, "delay": 0.0 }
        }
    }])
}

/// Keyboard-driven host for one or more [`ImageChannelControl`]s showing
/// the same image.
pub struct StylingDemo {
    image_url: String,
    controls: Vec<ImageChannelControl>,
}

impl StylingDemo {
    pub fn new(image_url: impl Into<String>) -> Self {
        StylingDemo { image_url: image_url.into(), controls: Vec::new() }
    }

    pub fn controls(&self) -> &[ImageChannelControl] { &self.controls }
    pub fn controls_mut(&mut self) -> &mut [ImageChannelControl] { &mut self.controls }

    fn cycle_channel(&mut self, index: PropertyIndex) {
        for control in &mut self.controls {
            let current = control.get_property(index).and_then(|v| v.as_f64()).map_or(1.0, |v| v as f32);
            let next = if current <= 0.0 { 1.0 } else { (current - CHANNEL_STEP).max(0.0) };
            control.set_property(index, &json!(next));
            debug!("{} {} = {}", control.name(), index.name(), next);
        }
    }

    fn toggle_visibility(&mut self) {
        for control in &mut self.controls {
            // Toggle against the value the control is heading to.
            let target = control.pending_visibility().unwrap_or(control.visibility());
            control.set_property(PropertyIndex::Visibility, &Value::Bool(!target));
        }
    }
}

impl AppHandler for StylingDemo {
    fn on_init(&mut self, ctx: &mut AppContext) {
        ctx.set_background(Color::WHITE);
        let size = ctx.window();

        let mut control = ImageChannelControl::new("image");
        control.set_property(PropertyIndex::ResourceUrl, &Value::from(self.image_url.as_str()));
        control.set_property(PropertyIndex::EnableVisibilityTransition, &fade_transition(0.0, 1.0, FADE_SECONDS));
        control.set_property(PropertyIndex::DisableVisibilityTransition, &fade_transition(1.0, 0.0, FADE_SECONDS));
        control.set_size(size.width as f32, size.height as f32);
        self.controls.push(control);

        info!("styling demo: {} control(s) showing {}", self.controls.len(), self.image_url);
    }

    fn on_key(&mut self, ctx: &mut AppContext, key: &KeyEvent) {
        if !key.is_down() {
            return;
        }
        if key.is_quit() {
            ctx.quit();
            return;
        }
        match key.text.as_str() {
            "v" => self.toggle_visibility(),
            "r" => self.cycle_channel(PropertyIndex::RedChannel),
            "g" => self.cycle_channel(PropertyIndex::GreenChannel),
            "b" => self.cycle_channel(PropertyIndex::BlueChannel),
            _ => {}
        }
    }

    fn on_frame(&mut self, _ctx: &mut AppContext, dt: f32) {
        for control in &mut self.controls {
            control.tick(dt);
        }
    }
}
