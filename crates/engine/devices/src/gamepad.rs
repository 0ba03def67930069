//! Gamepad/controller state and input processing
//!
//! This module provides types for tracking gamepad state with deadzone
//! processing, and a manipulator source that maps a controller onto the
//! press + direction signals the push controller consumes.

use glam::Vec2;

use crate::backend::ManipulatorSource;
use crate::pose::Pose;

/// Default deadzone value for analog sticks
pub const DEFAULT_DEADZONE: f32 = 0.15;

/// Default trigger travel above which the trigger counts as a press
pub const DEFAULT_PRESS_THRESHOLD: f32 = 0.5;

/// Gamepad state tracker with deadzone processing
///
/// Tracks the stick, trigger and primary button of one controller.
/// Automatically applies deadzone processing to the stick.
#[derive(Debug, Clone)]
pub struct GamepadState {
    /// Stick (push direction) - processed with deadzone
    pub stick: Vec2,
    /// Raw stick values (before deadzone)
    raw_stick: Vec2,
    /// Trigger (0.0 to 1.0)
    pub trigger: f32,
    /// Primary face button (A / South)
    pub primary_button: bool,
    /// Whether the gamepad is connected
    pub connected: bool,
    /// Deadzone threshold for the stick
    deadzone: f32,
}

impl Default for GamepadState {
    fn default() -> Self {
        Self {
            stick: Vec2::ZERO,
            raw_stick: Vec2::ZERO,
            trigger: 0.0,
            primary_button: false,
            connected: false,
            deadzone: DEFAULT_DEADZONE,
        }
    }
}

impl GamepadState {
    /// Create a new GamepadState with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new GamepadState with custom deadzone
    pub fn with_deadzone(deadzone: f32) -> Self {
        Self {
            deadzone: deadzone.clamp(0.0, 0.9),
            ..Self::default()
        }
    }

    /// Get the current deadzone value
    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    /// Set the deadzone value
    pub fn set_deadzone(&mut self, deadzone: f32) {
        self.deadzone = deadzone.clamp(0.0, 0.9);
        // Reprocess stick with new deadzone
        self.process_stick();
    }

    /// Update stick X axis (raw value)
    pub fn set_stick_x(&mut self, value: f32) {
        self.raw_stick.x = value;
        self.process_stick();
    }

    /// Update stick Y axis (raw value)
    pub fn set_stick_y(&mut self, value: f32) {
        self.raw_stick.y = value;
        self.process_stick();
    }

    fn process_stick(&mut self) {
        self.stick = apply_radial_deadzone(self.raw_stick, self.deadzone);
    }

    /// Update trigger value
    pub fn set_trigger(&mut self, value: f32) {
        self.trigger = value.clamp(0.0, 1.0);
    }

    pub fn set_primary_button(&mut self, pressed: bool) {
        self.primary_button = pressed;
    }

    /// Reset all inputs to default state
    pub fn reset(&mut self) {
        self.stick = Vec2::ZERO;
        self.raw_stick = Vec2::ZERO;
        self.trigger = 0.0;
        self.primary_button = false;
    }

    /// Check if any input is active (beyond deadzone)
    pub fn has_input(&self) -> bool {
        self.stick.length() > 0.01 || self.trigger > 0.01 || self.primary_button
    }
}

/// Apply radial deadzone to an analog stick input
///
/// Uses a circular deadzone which feels more natural than per-axis deadzone.
fn apply_radial_deadzone(raw: Vec2, deadzone: f32) -> Vec2 {
    let magnitude = raw.length();

    if magnitude < deadzone {
        Vec2::ZERO
    } else {
        // Renormalize to make the usable range 0-1
        let normalized = raw.normalize_or_zero();
        let adjusted_magnitude = ((magnitude - deadzone) / (1.0 - deadzone)).clamp(0.0, 1.0);
        normalized * adjusted_magnitude
    }
}

/// Gamepad-driven manipulator
///
/// Press is the primary button or the trigger past `press_threshold`;
/// direction is the deadzoned stick. The pose comes from whatever tracks
/// the hand and is pushed in by the host each frame.
#[derive(Debug, Clone)]
pub struct GamepadManipulator {
    pub gamepad: GamepadState,
    pose: Option<Pose>,
    press_threshold: f32,
}

impl Default for GamepadManipulator {
    fn default() -> Self {
        Self::new()
    }
}

impl GamepadManipulator {
    pub fn new() -> Self {
        Self {
            gamepad: GamepadState::new(),
            pose: None,
            press_threshold: DEFAULT_PRESS_THRESHOLD,
        }
    }

    /// Create with a custom trigger press threshold (clamped to `[0.05, 1]`)
    pub fn with_press_threshold(press_threshold: f32) -> Self {
        Self {
            press_threshold: press_threshold.clamp(0.05, 1.0),
            ..Self::new()
        }
    }

    pub fn press_threshold(&self) -> f32 {
        self.press_threshold
    }

    /// Update the tracked pose; `None` marks tracking as lost
    pub fn set_pose(&mut self, pose: Option<Pose>) {
        self.pose = pose;
    }

    /// Mark gamepad as connected
    pub fn connect(&mut self) {
        self.gamepad.connected = true;
    }

    /// Mark gamepad as disconnected and reset state
    pub fn disconnect(&mut self) {
        self.gamepad.connected = false;
        self.gamepad.reset();
    }
}

impl ManipulatorSource for GamepadManipulator {
    fn current_pose(&self) -> Option<Pose> {
        self.pose
    }

    fn press_signal(&self) -> bool {
        self.gamepad.connected
            && (self.gamepad.primary_button || self.gamepad.trigger >= self.press_threshold)
    }

    fn direction_signal(&self) -> Vec2 {
        if self.gamepad.connected {
            self.gamepad.stick
        } else {
            Vec2::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_gamepad_state_default() {
        let state = GamepadState::default();
        assert!(!state.connected);
        assert_eq!(state.stick, Vec2::ZERO);
        assert_eq!(state.deadzone(), DEFAULT_DEADZONE);
    }

    #[test]
    fn test_deadzone_processing() {
        let mut state = GamepadState::new();

        // Small input should be filtered out
        state.set_stick_x(0.1);
        state.set_stick_y(0.1);
        assert_eq!(state.stick, Vec2::ZERO);

        // Large input should be processed
        state.set_stick_x(0.8);
        state.set_stick_y(0.0);
        assert!(state.stick.x > 0.0);
    }

    #[test]
    fn test_full_deflection_stays_unit() {
        let mut state = GamepadState::new();
        state.set_stick_x(1.0);
        assert!((state.stick.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_trigger_clamping() {
        let mut state = GamepadState::new();

        state.set_trigger(1.5);
        assert_eq!(state.trigger, 1.0);

        state.set_trigger(-0.5);
        assert_eq!(state.trigger, 0.0);
    }

    #[test]
    fn test_press_from_button_or_trigger() {
        let mut manipulator = GamepadManipulator::new();
        manipulator.connect();
        assert!(!manipulator.press_signal());

        manipulator.gamepad.set_primary_button(true);
        assert!(manipulator.press_signal());

        manipulator.gamepad.set_primary_button(false);
        manipulator.gamepad.set_trigger(0.4);
        assert!(!manipulator.press_signal());
        manipulator.gamepad.set_trigger(0.6);
        assert!(manipulator.press_signal());
    }

    #[test]
    fn test_disconnected_reports_nothing() {
        let mut manipulator = GamepadManipulator::new();
        manipulator.connect();
        manipulator.gamepad.set_primary_button(true);
        manipulator.gamepad.set_stick_x(0.9);
        manipulator.set_pose(Some(Pose::from_position(Vec3::X)));

        manipulator.disconnect();

        assert!(!manipulator.press_signal());
        assert_eq!(manipulator.direction_signal(), Vec2::ZERO);
        // Pose tracking is independent of the gamepad link
        assert!(manipulator.current_pose().is_some());
    }
}
