//! Time-based animation: playback clock, easing and keyframes.

use crate::color::Color;
use crate::vec::Vec3;

/// Easing applied to normalised progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AlphaFunction {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl AlphaFunction {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            AlphaFunction::Linear => t,
            AlphaFunction::EaseIn => t * t * t,
            AlphaFunction::EaseOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            AlphaFunction::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Parse names like `"EASE_IN_OUT"`. Unknown names give `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "LINEAR" => Some(AlphaFunction::Linear),
            "EASE_IN" => Some(AlphaFunction::EaseIn),
            "EASE_OUT" => Some(AlphaFunction::EaseOut),
            "EASE_IN_OUT" => Some(AlphaFunction::EaseInOut),
            _ => None,
        }
    }
}

pub trait Interpolate: Copy {
    fn interpolate(a: Self, b: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

impl Interpolate for Vec3<f32> {
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        a + (b - a).scale(t)
    }
}

impl Interpolate for Color {
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        Color::rgba(
            f32::interpolate(a.r, b.r, t),
            f32::interpolate(a.g, b.g, t),
            f32::interpolate(a.b, b.b, t),
            f32::interpolate(a.a, b.a, t),
        )
    }
}

/// Values keyed by normalised progress in [0, 1], linearly interpolated.
#[derive(Clone, Debug, Default)]
pub struct KeyFrames<T: Interpolate> {
    frames: Vec<(f32, T)>,
}

impl<T: Interpolate> KeyFrames<T> {
    pub fn new() -> Self {
        KeyFrames { frames: Vec::new() }
    }

    /// Insert a keyframe, keeping frames ordered by progress.
    pub fn add(&mut self, progress: f32, value: T) -> &mut Self {
        let progress = progress.clamp(0.0, 1.0);
        let at = self.frames.partition_point(|(p, _)| *p <= progress);
        self.frames.insert(at, (progress, value));
        self
    }

    pub fn len(&self) -> usize { self.frames.len() }
    pub fn is_empty(&self) -> bool { self.frames.is_empty() }

    pub fn value_at(&self, progress: f32) -> Option<T> {
        let first = self.frames.first()?;
        if progress <= first.0 {
            return Some(first.1);
        }
        for pair in self.frames.windows(2) {
            let ((p0, v0), (p1, v1)) = (pair[0], pair[1]);
            if progress <= p1 {
                let span = p1 - p0;
                let t = if span > 0.0 { (progress - p0) / span } else { 1.0 };
                return Some(T::interpolate(v0, v1, t));
            }
        }
        self.frames.last().map(|(_, v)| *v)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Stopped,
    Playing,
    Finished,
}

/// A playback clock. Owners read [`progress`](Animation::progress) and apply
/// it to whatever they animate; [`tick`](Animation::tick) reports completion.
#[derive(Clone, Debug)]
pub struct Animation {
    duration: f32,
    elapsed: f32,
    looping: bool,
    state: AnimationState,
}

impl Animation {
    pub fn new(duration: f32) -> Self {
        Animation { duration: duration.max(0.0), elapsed: 0.0, looping: false, state: AnimationState::Stopped }
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn play(&mut self) {
        if self.state == AnimationState::Finished {
            self.elapsed = 0.0;
        }
        self.state = AnimationState::Playing;
    }

    pub fn stop(&mut self) {
        self.state = AnimationState::Stopped;
    }

    pub fn state(&self) -> AnimationState { self.state }
    pub fn duration(&self) -> f32 { self.duration }
    pub fn is_playing(&self) -> bool { self.state == AnimationState::Playing }

    /// Normalised progress in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.state == AnimationState::Finished { 1.0 } else { 0.0 };
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Advance by `dt` seconds. Returns true on the tick the animation finishes.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.state != AnimationState::Playing {
            return false;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed < self.duration {
            return false;
        }
        if self.looping && self.duration > 0.0 {
            self.elapsed %= self.duration;
            return false;
        }
        self.elapsed = self.duration;
        self.state = AnimationState::Finished;
        true
    }
}
