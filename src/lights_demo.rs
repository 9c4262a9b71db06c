//! 3D lighting scene: six coloured lights around a model, toggled from the keyboard.

use std::path::Path;

use log::{debug, info};

use crate::animation::{Animation, KeyFrames};
use crate::app::{AppContext, AppHandler};
use crate::color::Color;
use crate::input::{KeyEvent, TouchEvent};
use crate::vec::Vec3;

/// Lights beyond this many wait until an active one is disabled.
pub const MAX_ACTIVE_LIGHTS: usize = 5;

const ORBIT_SECONDS: f32 = 3.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LightId(usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub color: Color,
    pub position: Vec3<f32>,
    pub target: Vec3<f32>,
    enabled: bool,
}

impl Light {
    pub fn new(color: Color, position: Vec3<f32>) -> Self {
        Light { color, position, target: Vec3::zero(), enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Unit vector from the light towards its target.
    pub fn direction(&self) -> Vec3<f32> {
        (self.target - self.position).normalize()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageBasedLight {
    pub diffuse_url: String,
    pub specular_url: String,
    pub scale_factor: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub url: String,
    pub position: Vec3<f32>,
    pub size: Vec3<f32>,
}

/// Lights, camera and model of a 3D scene.
#[derive(Clone, Debug)]
pub struct SceneView {
    pub background: Color,
    pub near_plane: f32,
    pub far_plane: f32,
    pub camera_position: Vec3<f32>,
    pub camera_target: Vec3<f32>,
    pub model: Option<Model>,
    lights: Vec<Light>,
    active: Vec<LightId>,
    ibl: Option<ImageBasedLight>,
}

impl SceneView {
    pub fn new() -> Self {
        SceneView {
            background: Color::WHITE,
            near_plane: 0.1,
            far_plane: 100.0,
            camera_position: Vec3::new(0.0, 0.0, 1.0),
            camera_target: Vec3::zero(),
            model: None,
            lights: Vec::new(),
            active: Vec::new(),
            ibl: None,
        }
    }

    /// Add a light; it is enabled straight away.
    pub fn add_light(&mut self, light: Light) -> LightId {
        let id = LightId(self.lights.len());
        self.lights.push(light);
        self.enable_light(id, true);
        id
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id.0)
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.get_mut(id.0)
    }

    pub fn active_lights(&self) -> &[LightId] {
        &self.active
    }

    pub fn is_active(&self, id: LightId) -> bool {
        self.active.contains(&id)
    }

    pub fn enable_light(&mut self, id: LightId, enable: bool) {
        let Some(light) = self.lights.get_mut(id.0) else {
            return;
        };
        if light.enabled == enable {
            return;
        }
        light.enabled = enable;
        if enable {
            if self.active.len() < MAX_ACTIVE_LIGHTS {
                self.active.push(id);
            }
        } else {
            self.active.retain(|&a| a != id);
            self.promote_waiting();
        }
    }

    fn promote_waiting(&mut self) {
        for (index, light) in self.lights.iter().enumerate() {
            if self.active.len() >= MAX_ACTIVE_LIGHTS {
                break;
            }
            let id = LightId(index);
            if light.enabled && !self.active.contains(&id) {
                self.active.push(id);
            }
        }
    }

    /// Empty URLs remove the image-based light.
    pub fn set_image_based_light_source(&mut self, diffuse_url: &str, specular_url: &str, scale_factor: f32) {
        self.ibl = if diffuse_url.is_empty() && specular_url.is_empty() {
            None
        } else {
            Some(ImageBasedLight {
                diffuse_url: diffuse_url.to_owned(),
                specular_url: specular_url.to_owned(),
                scale_factor: scale_factor.clamp(0.0, 1.0),
            })
        };
    }

    pub fn image_based_light(&self) -> Option<&ImageBasedLight> {
        self.ibl.as_ref()
    }
}

impl Default for SceneView {
    fn default() -> Self {
        Self::new()
    }
}

/// Model lit by six point lights, one of them orbiting, with number keys
/// switching between direct lighting and image-based lighting.
pub struct LightingDemo {
    scene: SceneView,
    lights: Vec<LightId>,
    diffuse_url: String,
    specular_url: String,
    model_url: String,
    orbit: Animation,
    orbit_degrees: KeyFrames<f32>,
    orbit_local: Vec3<f32>,
}

impl LightingDemo {
    pub fn new(image_dir: impl AsRef<Path>, model_dir: impl AsRef<Path>) -> Self {
        let image_dir = image_dir.as_ref();
        let mut orbit_degrees = KeyFrames::new();
        orbit_degrees.add(0.0, 0.0).add(0.25, 90.0).add(0.5, 180.0).add(0.75, 270.0).add(1.0, 360.0);
        let mut orbit = Animation::new(ORBIT_SECONDS);
        orbit.set_looping(true);
        LightingDemo {
            scene: SceneView::new(),
            lights: Vec::new(),
            diffuse_url: image_dir.join("papermill_E_diffuse-64.ktx").to_string_lossy().into_owned(),
            specular_url: image_dir.join("papermill_pmrem.ktx").to_string_lossy().into_owned(),
            model_url: model_dir.as_ref().join("DamagedHelmet.gltf").to_string_lossy().into_owned(),
            orbit,
            orbit_degrees,
            orbit_local: Vec3::new(-2.0, -2.0, 0.0),
        }
    }

    pub fn scene(&self) -> &SceneView { &self.scene }

    /// Light `n`, counting from 1 as the key bindings do.
    pub fn light(&self, n: usize) -> Option<LightId> {
        n.checked_sub(1).and_then(|i| self.lights.get(i).copied())
    }

    fn set_enabled(&mut self, n: usize, enable: bool) {
        if let Some(id) = self.light(n) {
            self.scene.enable_light(id, enable);
        }
    }

    fn set_ibl(&mut self, scale_factor: f32) {
        let (diffuse, specular) = (self.diffuse_url.clone(), self.specular_url.clone());
        self.scene.set_image_based_light_source(&diffuse, &specular, scale_factor);
    }

    fn update_orbit(&mut self) {
        let degrees = self.orbit_degrees.value_at(self.orbit.progress()).unwrap_or(0.0);
        let position = self.orbit_local.rotate_y(degrees.to_radians());
        if let Some(light) = self.light(1).and_then(|id| self.scene.light_mut(id)) {
            light.position = position;
        }
    }
}

impl AppHandler for LightingDemo {
    fn on_init(&mut self, ctx: &mut AppContext) {
        ctx.set_background(Color::WHITE);
        self.scene.background = Color::BEIGE;
        self.scene.near_plane = 0.5;
        self.scene.far_plane = 0.5;

        let placements = [
            (Color::BROWN, self.orbit_local),
            (Color::BLUE, Vec3::new(-1.0, -1.0, 1.0)),
            (Color::WHITE * 0.4, Vec3::new(-1.0, 0.0, 1.1)),
            (Color::RED, Vec3::new(-1.0, -1.0, 1.1)),
            (Color::GREEN, Vec3::new(-1.0, 1.0, 1.1)),
            (Color::CYAN, Vec3::new(-1.0, -1.2, 1.1)),
        ];
        for (color, position) in placements {
            let id = self.scene.add_light(Light::new(color, position));
            self.lights.push(id);
        }

        self.scene.camera_position = Vec3::new(-1.0, 0.0, 1.1);
        self.scene.camera_target = Vec3::zero();
        self.scene.model = Some(Model {
            url: self.model_url.clone(),
            position: Vec3::zero(),
            size: Vec3::new(1.0, 1.0, 1.0),
        });

        self.orbit.play();
        info!("lighting demo: {} of {} lights active", self.scene.active_lights().len(), self.lights.len());
    }

    fn on_touch(&mut self, _ctx: &mut AppContext, _touch: &TouchEvent) -> bool {
        true
    }

    fn on_key(&mut self, _ctx: &mut AppContext, key: &KeyEvent) {
        if !key.is_down() {
            return;
        }
        match key.name.as_str() {
            "0" => {
                self.scene.set_image_based_light_source("", "", 1.0);
                self.set_enabled(1, true);
                self.set_enabled(2, true);
                // Cycling light 6 re-queues it behind the others.
                self.set_enabled(6, false);
                self.set_enabled(6, true);
                self.set_enabled(3, true);
            }
            "1" => {
                self.set_ibl(0.6);
                self.set_enabled(1, false);
                self.set_enabled(2, false);
            }
            "2" => {
                self.set_ibl(0.6);
                self.set_enabled(1, true);
                self.set_enabled(2, true);
            }
            "3" => {
                self.set_ibl(0.3);
                self.set_enabled(1, true);
                self.set_enabled(2, true);
            }
            "4" => {
                self.set_ibl(0.1);
                self.set_enabled(1, true);
                self.set_enabled(2, true);
            }
            "5" => {
                self.set_ibl(0.0);
                self.set_enabled(1, true);
            }
            "6" => {
                self.set_ibl(0.0);
                self.set_enabled(1, false);
            }
            _ => return,
        }
        debug!("key {}: active lights {:?}", key.name, self.scene.active_lights());
    }

    fn on_frame(&mut self, _ctx: &mut AppContext, dt: f32) {
        self.orbit.tick(dt);
        self.update_orbit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with(n: usize) -> (SceneView, Vec<LightId>) {
        let mut scene = SceneView::new();
        let ids = (0..n).map(|_| scene.add_light(Light::new(Color::WHITE, Vec3::zero()))).collect();
        (scene, ids)
    }

    #[test]
    fn sixth_light_waits_for_a_slot() {
        let (mut scene, ids) = scene_with(6);
        assert_eq!(scene.active_lights().len(), MAX_ACTIVE_LIGHTS);
        assert!(!scene.is_active(ids[5]));
        assert!(scene.light(ids[5]).unwrap().is_enabled());

        scene.enable_light(ids[1], false);
        assert!(scene.is_active(ids[5]));
        assert_eq!(scene.active_lights().len(), MAX_ACTIVE_LIGHTS);

        scene.enable_light(ids[1], true);
        assert!(!scene.is_active(ids[1]));
    }

    #[test]
    fn empty_urls_clear_image_based_light() {
        let mut scene = SceneView::new();
        scene.set_image_based_light_source("d.ktx", "s.ktx", 1.5);
        assert_eq!(scene.image_based_light().map(|i| i.scale_factor), Some(1.0));
        scene.set_image_based_light_source("", "", 1.0);
        assert!(scene.image_based_light().is_none());
    }
}
