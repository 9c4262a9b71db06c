//! Image control with per-channel colour multipliers and animated visibility.
//!
//! Properties are set and read through [`PropertyIndex`] with loosely typed
//! [`serde_json::Value`]s. Values of the wrong shape are ignored.
//!
//! Visibility changes commit in two phases: when a matching transition is
//! configured, the new value is held pending while the transition plays and
//! only becomes current when it finishes.

use log::debug;
use serde_json::{Map, Value};

use crate::animation::{AlphaFunction, Animation};

/// Name of the shader uniform carrying the channel multipliers.
pub const CHANNELS_UNIFORM: &str = "uChannels";

/// Name the image visual is registered under; transitions target it.
pub const IMAGE_VISUAL_NAME: &str = "imageVisual";

fn as_f32(value: &Value) -> Option<f32> {
    value.as_f64().map(|v| v as f32)
}

fn float_value(v: f32) -> Value {
    Value::from(f64::from(v))
}

/// One of the control's named properties.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyIndex {
    ResourceUrl,
    RedChannel,
    GreenChannel,
    BlueChannel,
    Visibility,
    EnableVisibilityTransition,
    DisableVisibilityTransition,
    ImageVisual,
}

impl PropertyIndex {
    pub const ALL: [PropertyIndex; 8] = [
        PropertyIndex::ResourceUrl,
        PropertyIndex::RedChannel,
        PropertyIndex::GreenChannel,
        PropertyIndex::BlueChannel,
        PropertyIndex::Visibility,
        PropertyIndex::EnableVisibilityTransition,
        PropertyIndex::DisableVisibilityTransition,
        PropertyIndex::ImageVisual,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PropertyIndex::ResourceUrl => "url",
            PropertyIndex::RedChannel => "redChannel",
            PropertyIndex::GreenChannel => "greenChannel",
            PropertyIndex::BlueChannel => "blueChannel",
            PropertyIndex::Visibility => "visibility",
            PropertyIndex::EnableVisibilityTransition => "enableVisibilityTransition",
            PropertyIndex::DisableVisibilityTransition => "disableVisibilityTransition",
            PropertyIndex::ImageVisual => "imageVisual",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    fn channel(self) -> Option<usize> {
        match self {
            PropertyIndex::RedChannel => Some(0),
            PropertyIndex::GreenChannel => Some(1),
            PropertyIndex::BlueChannel => Some(2),
            _ => None,
        }
    }
}

/// One animated property of a transition.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionAnimator {
    pub target: String,
    pub property: String,
    /// Starting value; the property's current value when absent.
    pub initial_value: Option<f32>,
    pub target_value: f32,
    pub alpha: AlphaFunction,
    pub delay: f32,
    pub duration: f32,
}

impl TransitionAnimator {
    /// Expects `target`, `property` and `targetValue`; `initialValue` and
    /// `animator { alphaFunction, timePeriod { delay, duration } }` are optional.
    fn from_map(map: &Map<String, Value>) -> Option<Self> {
        let target = map.get("target")?.as_str()?.to_owned();
        let property = map.get("property")?.as_str()?.to_owned();
        let target_value = as_f32(map.get("targetValue")?)?;
        let initial_value = map.get("initialValue").and_then(as_f32);

        let animator = map.get("animator").and_then(Value::as_object);
        let alpha = animator
            .and_then(|a| a.get("alphaFunction"))
            .and_then(Value::as_str)
            .and_then(AlphaFunction::from_name)
            .unwrap_or_default();
        let period = animator.and_then(|a| a.get("timePeriod")).and_then(Value::as_object);
        let period_value = |key: &str| period.and_then(|p| p.get(key)).and_then(as_f32);

        Some(TransitionAnimator {
            target,
            property,
            initial_value,
            target_value,
            alpha,
            delay: period_value("delay").unwrap_or(0.0).max(0.0),
            duration: period_value("duration").unwrap_or(1.0).max(0.0),
        })
    }

    fn value_at(&self, start: f32, time: f32) -> f32 {
        let t = if self.duration > 0.0 {
            (time - self.delay) / self.duration
        } else if time >= self.delay {
            1.0
        } else {
            0.0
        };
        let eased = self.alpha.apply(t.clamp(0.0, 1.0));
        start + (self.target_value - start) * eased
    }
}

/// A parsed transition descriptor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionData {
    animators: Vec<TransitionAnimator>,
}

impl TransitionData {
    /// Parse an array of animator maps or a single map. Other shapes give
    /// `None`; malformed animators inside are skipped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let animators = match value {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_object)
                .filter_map(TransitionAnimator::from_map)
                .collect(),
            Value::Object(map) => TransitionAnimator::from_map(map).into_iter().collect(),
            _ => return None,
        };
        Some(TransitionData { animators })
    }

    pub fn animators(&self) -> &[TransitionAnimator] { &self.animators }
    pub fn len(&self) -> usize { self.animators.len() }
    pub fn is_empty(&self) -> bool { self.animators.is_empty() }

    /// Time until the last animator finishes.
    pub fn duration(&self) -> f32 {
        self.animators.iter().map(|a| a.delay + a.duration).fold(0.0, f32::max)
    }
}

/// The renderable image of the control.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageVisual {
    pub name: String,
    pub url: Option<String>,
    pub properties: Map<String, Value>,
}

impl ImageVisual {
    pub fn from_url(url: &str) -> Self {
        let mut properties = Map::new();
        properties.insert("url".to_owned(), Value::from(url));
        ImageVisual { name: IMAGE_VISUAL_NAME.to_owned(), url: Some(url.to_owned()), properties }
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        ImageVisual {
            name: IMAGE_VISUAL_NAME.to_owned(),
            url: map.get("url").and_then(Value::as_str).map(str::to_owned),
            properties: map.clone(),
        }
    }

    pub fn float(&self, key: &str) -> Option<f32> {
        self.properties.get(key).and_then(as_f32)
    }

    /// From `desiredWidth` / `desiredHeight`, zero when unset.
    pub fn natural_size(&self) -> (f32, f32) {
        (self.float("desiredWidth").unwrap_or(0.0), self.float("desiredHeight").unwrap_or(0.0))
    }
}

struct ActiveTransition {
    animation: Animation,
    animators: Vec<TransitionAnimator>,
    starts: Vec<f32>,
}

pub struct ImageChannelControl {
    name: String,
    visual: Option<ImageVisual>,
    channels: [f32; 3],
    visibility: bool,
    pending_visibility: Option<bool>,
    enable_transition: TransitionData,
    disable_transition: TransitionData,
    transition: Option<ActiveTransition>,
    size: (f32, f32),
    relayout_requested: bool,
}

impl ImageChannelControl {
    pub fn new(name: impl Into<String>) -> Self {
        ImageChannelControl {
            name: name.into(),
            visual: None,
            channels: [1.0; 3],
            visibility: true,
            pending_visibility: None,
            enable_transition: TransitionData::default(),
            disable_transition: TransitionData::default(),
            transition: None,
            size: (0.0, 0.0),
            relayout_requested: false,
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn visual(&self) -> Option<&ImageVisual> { self.visual.as_ref() }
    pub fn channels(&self) -> [f32; 3] { self.channels }
    pub fn visibility(&self) -> bool { self.visibility }
    pub fn pending_visibility(&self) -> Option<bool> { self.pending_visibility }
    pub fn is_animating(&self) -> bool { self.transition.is_some() }
    pub fn size(&self) -> (f32, f32) { self.size }

    /// Current uniforms handed to the renderer.
    pub fn uniforms(&self) -> [(&'static str, [f32; 3]); 1] {
        [(CHANNELS_UNIFORM, self.channels)]
    }

    pub fn natural_size(&self) -> (f32, f32) {
        self.visual.as_ref().map_or((0.0, 0.0), ImageVisual::natural_size)
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = (width.max(0.0), height.max(0.0));
    }

    /// True once after the visual changed.
    pub fn take_relayout_request(&mut self) -> bool {
        std::mem::take(&mut self.relayout_requested)
    }

    pub fn set_image(&mut self, url: &str) {
        self.visual = Some(ImageVisual::from_url(url));
        self.relayout_requested = true;
    }

    pub fn set_property(&mut self, index: PropertyIndex, value: &Value) {
        let applied = match index {
            PropertyIndex::ResourceUrl => value.as_str().map(|url| self.set_image(url)),
            PropertyIndex::ImageVisual => value.as_object().map(|map| {
                self.visual = Some(ImageVisual::from_map(map));
                self.relayout_requested = true;
            }),
            PropertyIndex::Visibility => value.as_bool().map(|v| self.set_visibility(v)),
            PropertyIndex::EnableVisibilityTransition => {
                TransitionData::from_value(value).map(|t| self.enable_transition = t)
            }
            PropertyIndex::DisableVisibilityTransition => {
                TransitionData::from_value(value).map(|t| self.disable_transition = t)
            }
            PropertyIndex::RedChannel | PropertyIndex::GreenChannel | PropertyIndex::BlueChannel => {
                match (index.channel(), as_f32(value)) {
                    (Some(channel), Some(v)) => {
                        self.channels[channel] = v;
                        Some(())
                    }
                    _ => None,
                }
            }
        };
        if applied.is_none() {
            debug!("{}: ignoring {:?} for {}", self.name, value, index.name());
        }
    }

    /// Returns false for unknown property names.
    pub fn set_property_by_name(&mut self, name: &str, value: &Value) -> bool {
        match PropertyIndex::from_name(name) {
            Some(index) => {
                self.set_property(index, value);
                true
            }
            None => false,
        }
    }

    /// Channels and visibility read back; other properties are write-only.
    pub fn get_property(&self, index: PropertyIndex) -> Option<Value> {
        match index {
            PropertyIndex::Visibility => Some(Value::Bool(self.visibility)),
            _ => index.channel().map(|c| float_value(self.channels[c])),
        }
    }

    pub fn set_visibility(&mut self, visibility: bool) {
        debug!("{}: set visibility {}", self.name, visibility);

        if self.transition.take().is_some() {
            self.commit_pending();
        }

        if self.visibility != visibility {
            let transition = if self.visibility { &self.disable_transition } else { &self.enable_transition };
            if !transition.is_empty() {
                let transition = transition.clone();
                self.start_transition(transition);
            }
        }

        if self.transition.is_some() {
            self.pending_visibility = Some(visibility);
        } else {
            self.visibility = visibility;
        }
    }

    fn start_transition(&mut self, data: TransitionData) {
        let starts = data
            .animators
            .iter()
            .map(|a| {
                a.initial_value
                    .or_else(|| self.animated_value(a))
                    .unwrap_or(a.target_value)
            })
            .collect();
        let mut animation = Animation::new(data.duration());
        animation.play();
        self.transition = Some(ActiveTransition { animation, animators: data.animators, starts });
    }

    fn animated_value(&self, animator: &TransitionAnimator) -> Option<f32> {
        let visual = self.visual.as_ref().filter(|v| v.name == animator.target)?;
        visual.float(&animator.property)
    }

    /// Advance any running transition.
    pub fn tick(&mut self, dt: f32) {
        let Some(active) = self.transition.as_mut() else {
            return;
        };
        let finished = active.animation.tick(dt);
        let time = active.animation.progress() * active.animation.duration();
        if let Some(visual) = self.visual.as_mut() {
            for (animator, &start) in active.animators.iter().zip(&active.starts) {
                if animator.target == visual.name {
                    let value = animator.value_at(start, time);
                    visual.properties.insert(animator.property.clone(), float_value(value));
                }
            }
        }
        if finished {
            self.transition = None;
            self.on_transition_finished();
        }
    }

    /// Completion notification: the pending visibility becomes current.
    pub fn on_transition_finished(&mut self) {
        self.commit_pending();
    }

    fn commit_pending(&mut self) {
        if let Some(v) = self.pending_visibility.take() {
            self.visibility = v;
        }
    }
}
