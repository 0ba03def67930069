//! Manipulator pose and per-frame input snapshot
//!
//! A manipulator is whatever the user pushes with: a tracked XR hand, a
//! controller, or a scripted stand-in. Each frame the host samples its world
//! pose plus two signals, a press (button) and a 2D direction (stick).

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// World-space position and orientation of a tracked manipulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Pose at the origin with no rotation
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` with identity rotation
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Rotate a local-space direction into world space
    ///
    /// Translation is ignored, so this is the direction analogue of a
    /// point transform.
    pub fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }
}

/// One frame's worth of manipulator input
///
/// `direction` is clamped to `[-1, 1]` per axis on write. Absent tracking
/// is represented by `pose: None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManipulatorState {
    pub pose: Option<Pose>,
    pub press: bool,
    direction: Vec2,
}

impl ManipulatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with a tracked pose and the given signals
    pub fn tracked(pose: Pose, press: bool, direction: Vec2) -> Self {
        let mut state = Self {
            pose: Some(pose),
            press,
            direction: Vec2::ZERO,
        };
        state.set_direction(direction);
        state
    }

    /// Current directional signal
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Set the directional signal, clamping each axis to `[-1, 1]`
    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    pub fn set_press(&mut self, press: bool) {
        self.press = press;
    }

    pub fn set_pose(&mut self, pose: Option<Pose>) {
        self.pose = pose;
    }

    /// Release press and center the stick; pose is left alone
    pub fn release(&mut self) {
        self.press = false;
        self.direction = Vec2::ZERO;
    }
}
