//! Push controller for a single rigid body
//!
//! A tracked hand (the *manipulator*) pushes a box across a horizontal
//! surface. The controller decides each frame whether the user is pushing,
//! and each physics step applies simulated kinetic/static friction, an
//! optional lock-mode containment drag and the push itself.
//!
//! The controller only talks to the body through [`ForceSink`] and to the
//! hand through [`devices::ManipulatorSource`], so it runs unchanged on top
//! of Rapier ([`RapierSink`]) or any other integrator.

mod box_body;
mod config;
mod controller;
mod engagement;
mod error;
mod label;
mod sink;
mod world;

pub use box_body::{BoxBody, RapierSink};
pub use config::PushConfig;
pub use controller::{FrictionRegime, PushController, PushOutcome, StepReport, REST_SPEED_SQR};
pub use engagement::{
    Engagement, LockMode, Thresholds, DIRECTION_DEADZONE_SQR, START_RADIUS_FRACTION,
};
pub use error::{Error, Result};
pub use label::{LockLabel, NullLabel};
pub use sink::ForceSink;
pub use world::PhysicsWorld;

// Re-export for convenience
pub use devices;
pub use glam;
pub use rapier3d;
