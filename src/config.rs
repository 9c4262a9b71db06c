//! Configuration for the physics world and the sandbox demo.

use crate::float::Float;
use crate::vec::Vec2;

/// Configuration for world stepping.
///
/// # Builder Pattern
/// ```
/// use dragline::config::WorldConfig;
/// use dragline::vec::Vec2;
///
/// let config: WorldConfig<f32> = WorldConfig::new()
///     .with_iterations(8)
///     .with_gravity(Vec2::new(0.0, -500.0))
///     .with_damping(0.995)
///     .with_sub_steps(2);
/// ```
#[derive(Clone, Debug)]
pub struct WorldConfig<F: Float> {
    /// Constraint relaxation passes per sub-step. Default: 4.
    pub iterations: usize,
    /// Gravity in physics space (y up). Default: (0, -300).
    pub gravity: Vec2<F>,
    /// Velocity retained per sub-step, [0, 1]. Default: 0.999.
    pub damping: F,
    /// Sub-steps per time step. Default: 2.
    pub sub_steps: usize,
    /// Fixed step the world advances in, whatever the frame time. Default: 1/60 s.
    pub time_step: F,
    /// Fraction of a pivot's error corrected per pass, (0, 1]. Default: 0.5.
    pub pivot_stiffness: F,
    /// Speed below which a body starts counting towards sleep. Default: 2.0.
    pub sleep_speed: F,
    /// Seconds a slow body waits before it sleeps. Default: 0.5.
    pub sleep_delay: F,
}

impl<F: Float> WorldConfig<F> {
    pub fn new() -> Self {
        WorldConfig {
            iterations: 4,
            gravity: Vec2::new(F::zero(), F::from_f32(-300.0)),
            damping: F::from_f32(0.999),
            sub_steps: 2,
            time_step: F::from_f32(1.0 / 60.0),
            pivot_stiffness: F::half(),
            sleep_speed: F::two(),
            sleep_delay: F::half(),
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping.clamp(F::zero(), F::one());
        self
    }

    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }

    pub fn with_time_step(mut self, time_step: F) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_pivot_stiffness(mut self, stiffness: F) -> Self {
        self.pivot_stiffness = stiffness.clamp(F::from_f32(0.01), F::one());
        self
    }

    /// Sleep settings. A `delay` of zero or less disables sleeping.
    pub fn with_sleep(mut self, speed: F, delay: F) -> Self {
        self.sleep_speed = speed;
        self.sleep_delay = delay;
        self
    }
}

impl<F: Float> Default for WorldConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Tunables for the physics sandbox scene.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    pub ball_mass: f32,
    pub ball_radius: f32,
    pub ball_elasticity: f32,
    pub ball_friction: f32,
    /// Balls spawned regardless of window size.
    pub base_ball_count: u32,
    /// One extra ball per this many square pixels of window.
    pub area_per_ball: u32,
    /// Initial velocity components are drawn from `[-max, max]`.
    pub max_initial_speed: f32,
    /// Refresh rate requested while the pointer is interacting.
    pub render_rate_hz: f32,
    pub seed: u64,
}

impl DemoConfig {
    /// Ball count for a window: `base + w * h / area_per_ball`.
    pub fn ball_count(&self, width: u32, height: u32) -> u32 {
        let area = u64::from(width) * u64::from(height);
        let extra = area / u64::from(self.area_per_ball.max(1));
        self.base_ball_count.saturating_add(extra.min(u64::from(u32::MAX)) as u32)
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            ball_mass: 10.0,
            ball_radius: 26.0,
            ball_elasticity: 0.5,
            ball_friction: 0.5,
            base_ball_count: 10,
            area_per_ball: 20_000,
            max_initial_speed: 100.0,
            render_rate_hz: 30.0,
            seed: 0x5eed_ba11,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ball_count_scales_with_area() {
        let config = DemoConfig::default();
        assert_eq!(config.ball_count(0, 0), 10);
        assert_eq!(config.ball_count(800, 600), 10 + 24);
        assert_eq!(config.ball_count(1920, 1080), 10 + 103);
    }

    #[test]
    fn builder_clamps() {
        let config: WorldConfig<f32> = WorldConfig::new()
            .with_sub_steps(0)
            .with_damping(2.0)
            .with_pivot_stiffness(0.0);
        assert_eq!(config.sub_steps, 1);
        assert_eq!(config.damping, 1.0);
        assert!(config.pivot_stiffness > 0.0);
    }
}
