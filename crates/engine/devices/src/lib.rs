//! Manipulator input abstractions for pushbox
//!
//! This crate provides platform-agnostic abstractions for the hand that
//! pushes things: its tracked pose, a press signal and a 2D direction.
//!
//! # Modules
//!
//! - [`pose`]: Manipulator pose and per-frame input snapshot
//! - [`gamepad`]: Gamepad state with deadzone processing, gamepad-driven manipulator
//! - [`backend`]: Manipulator source trait for platform-specific implementations
//!
//! # Feature Flags
//!
//! - `gilrs`: Enable gilrs-based gamepad source (native only)

pub mod backend;
pub mod gamepad;
pub mod pose;

// Re-export commonly used types at crate root
pub use backend::{ManipulatorSource, NullSource};
pub use gamepad::{GamepadManipulator, GamepadState};
pub use pose::{ManipulatorState, Pose};

// Backend implementations
#[cfg(feature = "gilrs")]
mod gilrs_backend;

#[cfg(feature = "gilrs")]
pub use gilrs_backend::GilrsManipulator;

/// Create the default manipulator source based on enabled features
#[cfg(feature = "gilrs")]
pub fn create_manipulator_source() -> Box<dyn ManipulatorSource> {
    match GilrsManipulator::new() {
        Ok(source) => Box::new(source),
        Err(e) => {
            tracing::warn!("Failed to initialize gilrs backend: {}", e);
            Box::new(NullSource::new())
        }
    }
}

/// Create the default manipulator source (a null source when no backend is available)
#[cfg(not(feature = "gilrs"))]
pub fn create_manipulator_source() -> Box<dyn ManipulatorSource> {
    Box::new(NullSource::new())
}
