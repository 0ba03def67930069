//! Force sink trait for the body being pushed
//!
//! The controller never integrates anything itself. It reads the body's
//! state and hands contributions to whatever engine owns the body.

use glam::Vec3;

/// Trait for a single simulated rigid body the controller can push.
///
/// Contributions are additive within a step: other systems may push on the
/// same body during the same step.
///
/// Implemented by:
/// - `RapierSink` for a [`BoxBody`](crate::BoxBody) in a Rapier world
pub trait ForceSink {
    /// Current linear velocity
    fn current_velocity(&self) -> Vec3;

    /// Current world position
    fn current_position(&self) -> Vec3;

    /// Overwrite the linear velocity
    fn set_velocity(&mut self, velocity: Vec3);

    /// Apply a mass-independent acceleration for this step
    fn apply_acceleration(&mut self, acceleration: Vec3);

    /// Apply a force for this step; the resulting acceleration scales with 1/mass
    fn apply_force(&mut self, force: Vec3);
}

impl<S: ForceSink + ?Sized> ForceSink for &mut S {
    fn current_velocity(&self) -> Vec3 {
        (**self).current_velocity()
    }

    fn current_position(&self) -> Vec3 {
        (**self).current_position()
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        (**self).set_velocity(velocity)
    }

    fn apply_acceleration(&mut self, acceleration: Vec3) {
        (**self).apply_acceleration(acceleration)
    }

    fn apply_force(&mut self, force: Vec3) {
        (**self).apply_force(force)
    }
}
