use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for the push controller
///
/// Every field has a default, so a partial TOML table fills in the rest.
/// Values are fixed for the lifetime of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Push force in newtons
    pub push_force: f32,
    /// Engage/disengage range when unlocked, in meters
    pub max_distance: f32,
    /// Upper bound on push acceleration (m/s²)
    pub max_push_acceleration: f32,
    /// Coulomb static friction coefficient, 0..=1
    pub static_friction_coefficient: f32,
    /// Coulomb kinetic friction coefficient, 0..=1
    pub kinetic_friction_coefficient: f32,
    /// Mass of the pushed body in kilograms
    pub box_mass: f32,
    /// Gravity magnitude used for the normal force (positive, m/s²)
    pub gravity: f32,
    /// Engage/disengage range when locked, in meters
    pub lock_radius: f32,
    /// Linear drag applied to an unpushed body in lock mode (N·s/m)
    pub runaway_damping: f32,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            push_force: 100.0,
            max_distance: 5.0,
            max_push_acceleration: 50.0,
            static_friction_coefficient: 0.5,
            kinetic_friction_coefficient: 0.3,
            box_mass: 10.0,
            gravity: 9.81,
            lock_radius: 2.0,
            runaway_damping: 5.0,
        }
    }
}

impl PushConfig {
    /// Normal force of the body resting on a horizontal surface
    pub fn normal_force(&self) -> f32 {
        self.box_mass * self.gravity
    }

    /// Largest push force static friction can hold
    pub fn static_friction_limit(&self) -> f32 {
        self.static_friction_coefficient * self.normal_force()
    }

    /// Magnitude of the kinetic friction deceleration
    pub fn kinetic_deceleration(&self) -> f32 {
        self.kinetic_friction_coefficient * self.normal_force() / self.box_mass
    }

    /// Magnitude of the push acceleration, clamped to `[0, max_push_acceleration]`
    pub fn push_acceleration(&self) -> f32 {
        (self.push_force / self.box_mass).clamp(0.0, self.max_push_acceleration)
    }

    /// Reject configurations the force model cannot run with
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("push_force", self.push_force),
            ("max_distance", self.max_distance),
            ("max_push_acceleration", self.max_push_acceleration),
            ("static_friction_coefficient", self.static_friction_coefficient),
            ("kinetic_friction_coefficient", self.kinetic_friction_coefficient),
            ("box_mass", self.box_mass),
            ("gravity", self.gravity),
            ("lock_radius", self.lock_radius),
            ("runaway_damping", self.runaway_damping),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite, got {value}")));
            }
        }

        if self.box_mass <= 0.0 {
            return Err(invalid(format!(
                "box_mass must be positive, got {}",
                self.box_mass
            )));
        }

        for (name, value) in [
            ("static_friction_coefficient", self.static_friction_coefficient),
            ("kinetic_friction_coefficient", self.kinetic_friction_coefficient),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{name} must be within [0, 1], got {value}")));
            }
        }

        for (name, value) in [
            ("max_distance", self.max_distance),
            ("lock_radius", self.lock_radius),
        ] {
            if value <= 0.0 {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        for (name, value) in [
            ("push_force", self.push_force),
            ("max_push_acceleration", self.max_push_acceleration),
            ("gravity", self.gravity),
            ("runaway_damping", self.runaway_damping),
        ] {
            if value < 0.0 {
                return Err(invalid(format!("{name} must not be negative, got {value}")));
            }
        }

        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration(message)
}
