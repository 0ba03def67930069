//! Headless pushbox host
//!
//! Drives [`pushbox_physics::PushController`] from a scripted hand against a
//! Rapier world, with the frame/physics cadence split a VR app would have.

pub mod config;
pub mod script;
pub mod sim;

pub use config::{load_config, parse_config, PushboxConfig, SimulationConfig};
pub use script::{default_script, Keyframe, ScriptedManipulator};
pub use sim::{RunSummary, Simulation, TracingLabel};
