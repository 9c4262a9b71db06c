//! Touch-driven pick-and-drag for 2D physics scenes, plus the demo scenes
//! built on it.
//!
//! `dragline` pairs a small Verlet rigid-ball world with an interaction
//! controller that turns pointer and modifier-key events into body picks,
//! pivot-joint drags and releases.
//!
//! # Features
//!
//! - **Picking**: camera rays intersected with the world plane, nearest body wins
//! - **Dragging**: a kinematic mouse body pulls the picked body through a pivot joint
//! - **Sleep-aware**: a picked body is woken and its activation restored on release
//! - **Backend-neutral**: the controller talks to any [`PhysicsBackend`]
//! - **Observable**: monitor world steps via the [`StepObserver`] trait
//! - **Demos**: physics sandbox, lighting scene and image channel control,
//!   driven through a toolkit-neutral [`Application`] shell

pub mod float;
pub mod vec;
pub mod error;
pub mod config;
pub mod observer;
pub mod body;
pub mod joint;
pub mod world;
pub mod camera;
pub mod backend;
pub mod input;
pub mod interaction;
pub mod app;
pub mod rng;
pub mod color;
pub mod animation;
pub mod physics_demo;
pub mod lights_demo;
pub mod channel_control;
pub mod styling_demo;

// Re-export primary API
pub use float::Float;
pub use vec::{Ray, Vec2, Vec3};
pub use error::PhysicsError;
pub use config::{DemoConfig, WorldConfig};
pub use observer::{NoOpStepObserver, StepObserver, StepStats};
pub use body::{Activation, Body, BodyKind, Shape};
pub use joint::{PivotJoint, Walls};
pub use world::{BodyHandle, ConstraintHandle, Hit, World};
pub use camera::Camera;
pub use backend::{lock, share, PhysicsBackend, SharedPhysics};
pub use input::{KeyEvent, KeyState, Modifiers, PointState, TouchEvent, WindowSize};
pub use interaction::{Effect, Grab, InteractionController, InteractionState, RenderRequest, TouchResponse};
pub use app::{AppContext, AppEvent, AppHandler, Application, Lifecycle};
pub use color::Color;
pub use animation::{AlphaFunction, Animation, AnimationState, KeyFrames};
pub use physics_demo::PhysicsDemo;
pub use lights_demo::{LightingDemo, SceneView};
pub use channel_control::{ImageChannelControl, PropertyIndex, TransitionData};
pub use styling_demo::StylingDemo;
